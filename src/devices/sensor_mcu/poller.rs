use super::{
    command::SensorCommand,
    parser,
    reading::{AttemptError, CommandOutcome, CommandStatus, Exchange, Reading, ReadingSet},
};
use crate::interfaces::serial::transport::{Link, Transport};
use itertools::Itertools;
use std::{thread, time::Duration};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PollConfig {
    /// Attempts per command. Zero still makes a single attempt.
    pub max_retries: usize,
    /// Response timeout of a single attempt.
    pub timeout: Duration,
    pub retry_interval: Duration,
    pub command_interval: Duration,
    /// Record every [`Exchange`] in the result.
    pub verbose: bool,
}
impl PollConfig {
    pub const MAX_RETRIES_DEFAULT: usize = 3;
    pub const TIMEOUT_DEFAULT: Duration = Duration::from_millis(1000);
    pub const RETRY_INTERVAL_DEFAULT: Duration = Duration::from_millis(100);
    pub const COMMAND_INTERVAL_DEFAULT: Duration = Duration::from_millis(500);

    pub fn attempts_max(&self) -> usize {
        self.max_retries.max(1)
    }
}
impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_retries: Self::MAX_RETRIES_DEFAULT,
            timeout: Self::TIMEOUT_DEFAULT,
            retry_interval: Self::RETRY_INTERVAL_DEFAULT,
            command_interval: Self::COMMAND_INTERVAL_DEFAULT,
            verbose: false,
        }
    }
}

/// Failure of the whole reading cycle.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum PollError {
    #[error("device unavailable ({}): {message}", stage(.command))]
    PortUnavailable {
        command: Option<&'static str>,
        message: String,
    },
}
fn stage(command: &Option<&'static str>) -> &'static str {
    command.unwrap_or("open")
}

/// Runs reading cycles, owning the retry policy.
#[derive(Debug)]
pub struct Poller {
    configuration: PollConfig,
}
impl Poller {
    pub fn new(configuration: PollConfig) -> Self {
        Self { configuration }
    }

    pub fn configuration(&self) -> &PollConfig {
        &self.configuration
    }

    /// Opens `link`, polls `commands` and closes the connection on every exit path.
    pub fn poll_all<L>(
        &self,
        link: &L,
        commands: &[SensorCommand],
    ) -> Result<ReadingSet, PollError>
    where
        L: Link,
    {
        let mut transport = link.open().map_err(|error| PollError::PortUnavailable {
            command: None,
            message: error.to_string(),
        })?;

        let reading_set = self.poll_all_on(&mut transport, commands);
        drop(transport);

        reading_set
    }

    /// Polls `commands` one after another over an already opened transport.
    ///
    /// A command id listed more than once is polled only the first time.
    pub fn poll_all_on<T>(
        &self,
        transport: &mut T,
        commands: &[SensorCommand],
    ) -> Result<ReadingSet, PollError>
    where
        T: Transport,
    {
        let mut outcomes = Vec::<CommandOutcome>::with_capacity(commands.len());
        for command in commands.iter().unique_by(|command| command.id) {
            if !outcomes.is_empty() && !self.configuration.command_interval.is_zero() {
                thread::sleep(self.configuration.command_interval);
            }

            let outcome = self.poll_command(transport, command)?;
            outcomes.push(outcome);
        }

        Ok(ReadingSet::new(outcomes.into_boxed_slice()))
    }

    fn poll_command<T>(
        &self,
        transport: &mut T,
        command: &SensorCommand,
    ) -> Result<CommandOutcome, PollError>
    where
        T: Transport,
    {
        let attempts_max = self.configuration.attempts_max();
        let mut exchanges = Vec::<Exchange>::new();

        let mut attempt = 1;
        loop {
            let error = match self.attempt(transport, command, attempt, &mut exchanges) {
                Ok(reading) => {
                    return Ok(CommandOutcome {
                        command: *command,
                        attempts: attempt,
                        status: CommandStatus::Accepted(reading),
                        exchanges: exchanges.into_boxed_slice(),
                    });
                }
                Err(AttemptError::Transport(error)) if error.is_fatal() => {
                    return Err(PollError::PortUnavailable {
                        command: Some(command.id),
                        message: error.to_string(),
                    });
                }
                Err(error) => error,
            };

            if attempt >= attempts_max {
                log::warn!("{}: giving up after {} attempt(s): {}", command, attempt, error);
                return Ok(CommandOutcome {
                    command: *command,
                    attempts: attempt,
                    status: CommandStatus::Failed(error),
                    exchanges: exchanges.into_boxed_slice(),
                });
            }

            log::debug!("{}: error {}/{}: {}", command, attempt, attempts_max, error);
            attempt += 1;

            if !self.configuration.retry_interval.is_zero() {
                thread::sleep(self.configuration.retry_interval);
            }
        }
    }

    fn attempt<T>(
        &self,
        transport: &mut T,
        command: &SensorCommand,
        attempt: usize,
        exchanges: &mut Vec<Exchange>,
    ) -> Result<Reading, AttemptError>
    where
        T: Transport,
    {
        let response = transport.send(command.id, self.configuration.timeout);
        if self.configuration.verbose {
            exchanges.push(Exchange {
                attempt,
                command: command.id.to_owned(),
                response: response.clone(),
            });
        }

        let raw = response?;
        let value = parser::parse(&raw)?;

        let reading = Reading::new(*command, value);
        if !reading.valid {
            return Err(AttemptError::ValidationRejected {
                value,
                range: command.kind.valid_range(),
            });
        }

        Ok(reading)
    }
}
