use super::transport::{Transport, TransportError};
use std::{
    io::{self, Read, Write},
    slice, thread,
    time::{Duration, Instant},
};

/// Byte marking the end of a command and of a response.
pub const TERMINATOR: u8 = b'\r';

/// Byte stream of a serial connection.
pub trait Channel: Read + Write {
    /// Discards bytes received but not read yet.
    fn purge(&mut self) -> io::Result<()>;
}

/// [`Transport`] exchanging carriage return terminated text lines over a [`Channel`].
pub struct LineTransport<C>
where
    C: Channel,
{
    channel: C,
}
impl<C> LineTransport<C>
where
    C: Channel,
{
    const RESPONSE_LENGTH_MAX: usize = 256;
    const IDLE_INTERVAL: Duration = Duration::from_millis(10);

    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    fn phase_send(
        &mut self,
        command: &str,
    ) -> Result<(), TransportError> {
        let frame = [command.as_bytes(), slice::from_ref(&TERMINATOR)].concat();
        self.channel.write_all(&frame)?;
        self.channel.flush()?;
        Ok(())
    }
    fn phase_receive(
        &mut self,
        timeout: Duration,
    ) -> Result<String, TransportError> {
        let deadline = Instant::now() + timeout;

        let mut buffer = Vec::<u8>::new();
        let mut chunk = [0u8; 64];

        let line = loop {
            let now = Instant::now();
            if now >= deadline {
                return Err(TransportError::Timeout);
            }

            let count = match self.channel.read(&mut chunk) {
                Ok(0) => {
                    thread::sleep(Self::IDLE_INTERVAL.min(deadline - now));
                    continue;
                }
                Ok(count) => count,
                Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(Self::IDLE_INTERVAL.min(deadline - now));
                    continue;
                }
                // the channel already waited for its own read timeout
                Err(error)
                    if matches!(
                        error.kind(),
                        io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
                    ) =>
                {
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            buffer.extend_from_slice(&chunk[..count]);

            // anything past the first terminator is noise
            if let Some(terminator_position) = buffer.iter().position(|byte| *byte == TERMINATOR) {
                buffer.truncate(terminator_position);
                break buffer;
            }

            if buffer.len() > Self::RESPONSE_LENGTH_MAX {
                return Err(TransportError::Io {
                    kind: io::ErrorKind::InvalidData,
                    message: "response length exceeded. Noise?".to_owned(),
                });
            }
        };

        let line = String::from_utf8(line).map_err(|error| TransportError::Io {
            kind: io::ErrorKind::InvalidData,
            message: error.to_string(),
        })?;

        Ok(line)
    }
}
impl<C> Transport for LineTransport<C>
where
    C: Channel,
{
    fn send(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> Result<String, TransportError> {
        self.channel.purge()?;
        self.phase_send(command)?;
        let response = self.phase_receive(timeout)?;
        Ok(response)
    }
}
