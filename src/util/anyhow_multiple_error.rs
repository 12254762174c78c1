use anyhow::Error as AnyhowError;
use std::{error::Error as StdError, fmt};

/// Several independent failures reported as one.
// #[derive(Debug)] implemented manually
pub struct AnyhowMultipleError {
    inner: Box<[AnyhowError]>,
}
impl AnyhowMultipleError {
    pub fn errors(&self) -> &[AnyhowError] {
        &self.inner
    }
}
impl FromIterator<AnyhowError> for AnyhowMultipleError {
    fn from_iter<T: IntoIterator<Item = AnyhowError>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect::<Box<[_]>>(),
        }
    }
}
impl fmt::Debug for AnyhowMultipleError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_list().entries(self.inner.iter()).finish()
    }
}
impl fmt::Display for AnyhowMultipleError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} error(s)", self.inner.len())?;
        for (index, error) in self.inner.iter().enumerate() {
            // alternate form prints the whole context chain on one line
            write!(f, "{}{:#}", if index == 0 { ": " } else { "; " }, error)?;
        }
        Ok(())
    }
}
impl StdError for AnyhowMultipleError {}
