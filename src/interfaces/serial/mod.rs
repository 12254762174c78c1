pub mod line;
pub mod port;
pub mod transport;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bits {
    Bits7,
    Bits8,
}
impl From<Bits> for serialport::DataBits {
    fn from(value: Bits) -> Self {
        match value {
            Bits::Bits7 => serialport::DataBits::Seven,
            Bits::Bits8 => serialport::DataBits::Eight,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StopBits {
    StopBits1,
    StopBits2,
}
impl From<StopBits> for serialport::StopBits {
    fn from(value: StopBits) -> Self {
        match value {
            StopBits::StopBits1 => serialport::StopBits::One,
            StopBits::StopBits2 => serialport::StopBits::Two,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Parity {
    None,
    Odd,
    Even,
}
impl From<Parity> for serialport::Parity {
    fn from(value: Parity) -> Self {
        match value {
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
            Parity::Even => serialport::Parity::Even,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Configuration {
    pub baud_rate: u32,
    pub bits: Bits,
    pub stop_bits: StopBits,
    pub parity: Parity,
}
impl Configuration {
    pub const BAUD_RATE_DEFAULT: u32 = 115_200;

    pub fn new(
        baud_rate: u32,
        parity: Parity,
    ) -> Self {
        Self {
            baud_rate,
            bits: Bits::Bits8,
            stop_bits: StopBits::StopBits1,
            parity,
        }
    }
}
impl Default for Configuration {
    fn default() -> Self {
        Self::new(Self::BAUD_RATE_DEFAULT, Parity::Even)
    }
}
