use super::{
    Configuration,
    line::{Channel, LineTransport},
    transport::{Link, TransportError},
};
use serialport::{ClearBuffer, SerialPort};
use std::{
    io,
    path::PathBuf,
    time::Duration,
};

impl Channel for Box<dyn SerialPort> {
    fn purge(&mut self) -> io::Result<()> {
        self.clear(ClearBuffer::Input)?;
        Ok(())
    }
}

/// Serial device node, opened once per reading cycle.
#[derive(Clone, Debug)]
pub struct PortLink {
    path: PathBuf,
    configuration: Configuration,
}
impl PortLink {
    // single read() granularity, the response timeout is enforced by LineTransport
    const READ_TIMEOUT: Duration = Duration::from_millis(10);

    pub fn new(
        path: PathBuf,
        configuration: Configuration,
    ) -> Self {
        Self {
            path,
            configuration,
        }
    }
}
impl Link for PortLink {
    type Transport = LineTransport<Box<dyn SerialPort>>;

    fn open(&self) -> Result<Self::Transport, TransportError> {
        let path = self.path.to_str().ok_or_else(|| {
            TransportError::PortUnavailable(format!(
                "port path {} is not valid unicode",
                self.path.display()
            ))
        })?;

        let port = serialport::new(path, self.configuration.baud_rate)
            .data_bits(self.configuration.bits.into())
            .stop_bits(self.configuration.stop_bits.into())
            .parity(self.configuration.parity.into())
            .flow_control(serialport::FlowControl::None)
            .timeout(Self::READ_TIMEOUT)
            .open()
            .map_err(|error| TransportError::PortUnavailable(format!("{path}: {error}")))?;

        log::debug!("{path}: opened with {:?}", self.configuration);

        Ok(LineTransport::new(port))
    }
}
