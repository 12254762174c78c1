use super::{
    command::{SensorCommand, SensorKind},
    parser::ParseError,
    validator,
};
use crate::{datatypes::range::Range, interfaces::serial::transport::TransportError};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Reading {
    pub command: SensorCommand,
    pub value: f64,
    pub valid: bool,
}
impl Reading {
    pub fn new(
        command: SensorCommand,
        value: f64,
    ) -> Self {
        let valid = validator::is_valid(value, command.kind);
        Self {
            command,
            value,
            valid,
        }
    }
}

/// Reason a single attempt did not produce an accepted reading.
#[derive(Clone, PartialEq, Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    #[error("parse: {0}")]
    Parse(#[from] ParseError),

    #[error("value {value} outside of valid range {range}")]
    ValidationRejected { value: f64, range: Range<f64> },
}

/// Request and raw response of a single attempt, recorded in verbose mode.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Exchange {
    pub attempt: usize,
    pub command: String,
    pub response: Result<String, TransportError>,
}

#[derive(Clone, PartialEq, Debug)]
pub enum CommandStatus {
    Accepted(Reading),
    Failed(AttemptError),
}

#[derive(Clone, PartialEq, Debug)]
pub struct CommandOutcome {
    pub command: SensorCommand,
    pub attempts: usize,
    pub status: CommandStatus,
    pub exchanges: Box<[Exchange]>,
}
impl CommandOutcome {
    pub fn reading(&self) -> Option<&Reading> {
        match &self.status {
            CommandStatus::Accepted(reading) => Some(reading),
            CommandStatus::Failed(_) => None,
        }
    }
    pub fn error(&self) -> Option<&AttemptError> {
        match &self.status {
            CommandStatus::Accepted(_) => None,
            CommandStatus::Failed(error) => Some(error),
        }
    }
}

/// Final result of a reading cycle, one outcome per polled command, in polling order.
#[derive(Clone, PartialEq, Debug)]
pub struct ReadingSet {
    outcomes: Box<[CommandOutcome]>,
}
impl ReadingSet {
    pub fn new(outcomes: Box<[CommandOutcome]>) -> Self {
        debug_assert!(
            outcomes.iter().enumerate().all(|(index, outcome)| outcomes[..index]
                .iter()
                .all(|previous| previous.command.id != outcome.command.id)),
            "duplicated command in reading set"
        );
        Self { outcomes }
    }

    pub fn outcomes(&self) -> &[CommandOutcome] {
        &self.outcomes
    }
    pub fn get(
        &self,
        id: &str,
    ) -> Option<&CommandOutcome> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.command.id == id)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn readings(&self) -> impl Iterator<Item = &Reading> {
        self.outcomes.iter().filter_map(CommandOutcome::reading)
    }
    pub fn readings_of_kind(
        &self,
        kind: SensorKind,
    ) -> impl Iterator<Item = &Reading> {
        self.readings()
            .filter(move |reading| reading.command.kind == kind)
    }
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.error().is_some())
            .count()
    }
}
impl<'a> IntoIterator for &'a ReadingSet {
    type Item = &'a CommandOutcome;
    type IntoIter = std::slice::Iter<'a, CommandOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
