use std::{io, time::Duration};

/// Failure of a single command/response exchange.
///
/// Only [`TransportError::PortUnavailable`] is fatal for a reading cycle, everything else may be
/// retried by the caller.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum TransportError {
    #[error("port unavailable: {0}")]
    PortUnavailable(String),

    #[error("timeout expired")]
    Timeout,

    #[error("i/o error ({kind}): {message}")]
    Io { kind: io::ErrorKind, message: String },
}
impl TransportError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::PortUnavailable(_))
    }
}
impl From<io::Error> for TransportError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            // device unplugged or taken away while in use
            io::ErrorKind::NotFound
            | io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::PermissionDenied => Self::PortUnavailable(error.to_string()),
            io::ErrorKind::TimedOut => Self::Timeout,
            kind => Self::Io {
                kind,
                message: error.to_string(),
            },
        }
    }
}

/// Single-shot command execution on an opened connection.
///
/// Implementations never retry, retry policy belongs to the caller.
pub trait Transport {
    /// Sends `command` and returns the response without its terminator.
    fn send(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> Result<String, TransportError>;
}

/// Source of [`Transport`] sessions.
///
/// The returned transport owns the connection, dropping it closes the connection.
pub trait Link {
    type Transport: Transport;

    fn open(&self) -> Result<Self::Transport, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::TransportError;
    use std::io;

    #[test]
    fn io_error_classification() {
        assert!(matches!(
            TransportError::from(io::Error::from(io::ErrorKind::BrokenPipe)),
            TransportError::PortUnavailable(_)
        ));
        assert_eq!(
            TransportError::from(io::Error::from(io::ErrorKind::TimedOut)),
            TransportError::Timeout
        );

        let error = TransportError::from(io::Error::new(io::ErrorKind::InvalidData, "framing"));
        assert!(matches!(
            error,
            TransportError::Io {
                kind: io::ErrorKind::InvalidData,
                ..
            }
        ));
        assert!(!error.is_fatal());
    }
}
