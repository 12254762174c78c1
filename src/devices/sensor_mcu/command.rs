use anyhow::{Error, bail};
use derive_more::Display;
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum SensorKind {
    #[display("temperature")]
    Temperature,
    #[display("humidity")]
    Humidity,
    #[display("lux")]
    Lux,
}
impl SensorKind {
    pub const ALL: [SensorKind; 3] = [Self::Temperature, Self::Humidity, Self::Lux];
}
impl FromStr for SensorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s {
            "temperature" | "temp" => Self::Temperature,
            "humidity" | "hum" => Self::Humidity,
            "lux" => Self::Lux,
            _ => bail!(
                "invalid reading type {s}, expected one of temperature/temp, humidity/hum, lux"
            ),
        };
        Ok(value)
    }
}

/// Physical sensor attached to the microcontroller.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Sensor {
    #[display("am2320")]
    Am2320,
    #[display("ds18x20")]
    Ds18x20,
    #[display("lux")]
    Lux,
}
impl FromStr for Sensor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = match s {
            "am2320" => Self::Am2320,
            "ds18x20" => Self::Ds18x20,
            "lux" => Self::Lux,
            _ => bail!("invalid sensor {s}, expected one of am2320, ds18x20, lux"),
        };
        Ok(value)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
#[display("{id}")]
pub struct SensorCommand {
    pub id: &'static str,
    pub kind: SensorKind,
    pub sensor: Sensor,
}
impl SensorCommand {
    pub const fn new(
        id: &'static str,
        kind: SensorKind,
        sensor: Sensor,
    ) -> Self {
        Self { id, kind, sensor }
    }
}

pub const AM2320_TEMPERATURE: SensorCommand =
    SensorCommand::new("am2320_temp", SensorKind::Temperature, Sensor::Am2320);
pub const AM2320_HUMIDITY: SensorCommand =
    SensorCommand::new("am2320_humidity", SensorKind::Humidity, Sensor::Am2320);
pub const DS18X20_TEMPERATURE: SensorCommand =
    SensorCommand::new("ds18x20_temp", SensorKind::Temperature, Sensor::Ds18x20);
pub const LUX: SensorCommand = SensorCommand::new("lux", SensorKind::Lux, Sensor::Lux);

/// Complete command set of the device, in polling order.
pub const COMMANDS: [SensorCommand; 4] = [
    AM2320_TEMPERATURE,
    AM2320_HUMIDITY,
    DS18X20_TEMPERATURE,
    LUX,
];

/// Subset of [`COMMANDS`] requested by the user.
///
/// At most one criterion may be set, none selects every command.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Selection {
    pub kind: Option<SensorKind>,
    pub sensor: Option<Sensor>,
}
impl Selection {
    pub fn commands(&self) -> Result<Box<[SensorCommand]>, Error> {
        let commands = match (self.kind, self.sensor) {
            (None, None) => COMMANDS.to_vec(),
            (Some(kind), None) => COMMANDS
                .iter()
                .filter(|command| command.kind == kind)
                .copied()
                .collect(),
            (None, Some(sensor)) => COMMANDS
                .iter()
                .filter(|command| command.sensor == sensor)
                .copied()
                .collect(),
            (Some(kind), Some(sensor)) => {
                bail!("invalid query, reading type {kind} and sensor {sensor} are exclusive")
            }
        };
        Ok(commands.into_boxed_slice())
    }
}
