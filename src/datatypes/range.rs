use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct RangeBoundary<T> {
    pub value: T,
    pub inclusive: bool,
}
impl<T> RangeBoundary<T> {
    pub const fn inclusive(value: T) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }
    pub const fn exclusive(value: T) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Range<T> {
    pub lower: Option<RangeBoundary<T>>,
    pub upper: Option<RangeBoundary<T>>,
}
impl<T> Range<T> {
    pub const fn new(
        lower: Option<RangeBoundary<T>>,
        upper: Option<RangeBoundary<T>>,
    ) -> Self {
        Self { lower, upper }
    }

    /// Open interval, both boundaries excluded.
    pub const fn exclusive(
        lower: T,
        upper: T,
    ) -> Self {
        Self {
            lower: Some(RangeBoundary::exclusive(lower)),
            upper: Some(RangeBoundary::exclusive(upper)),
        }
    }
}
impl<T> Range<T>
where
    T: PartialOrd,
{
    // NaN is never contained, as every comparison with it is false
    pub fn contains(
        &self,
        value: &T,
    ) -> bool {
        if let Some(lower) = &self.lower {
            let above_lower = if lower.inclusive {
                *value >= lower.value
            } else {
                *value > lower.value
            };
            if !above_lower {
                return false;
            }
        }
        if let Some(upper) = &self.upper {
            let below_upper = if upper.inclusive {
                *value <= upper.value
            } else {
                *value < upper.value
            };
            if !below_upper {
                return false;
            }
        }

        true
    }
}
impl<T> fmt::Display for Range<T>
where
    T: fmt::Display,
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.lower {
            Some(lower) => write!(
                f,
                "{}{}",
                if lower.inclusive { '[' } else { '(' },
                lower.value
            )?,
            None => write!(f, "(-inf")?,
        }
        write!(f, ", ")?;
        match &self.upper {
            Some(upper) => write!(
                f,
                "{}{}",
                upper.value,
                if upper.inclusive { ']' } else { ')' }
            )?,
            None => write!(f, "+inf)")?,
        }
        Ok(())
    }
}
