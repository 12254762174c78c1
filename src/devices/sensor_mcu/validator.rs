use super::command::SensorKind;
use crate::datatypes::range::Range;

impl SensorKind {
    /// Physically plausible readings, both ends excluded.
    pub const fn valid_range(&self) -> Range<f64> {
        match self {
            Self::Temperature => Range::exclusive(0.0, 120.0),
            Self::Humidity => Range::exclusive(0.0, 100.0),
            Self::Lux => Range::exclusive(0.0, 65336.0),
        }
    }
}

pub fn is_valid(
    value: f64,
    kind: SensorKind,
) -> bool {
    kind.valid_range().contains(&value)
}
