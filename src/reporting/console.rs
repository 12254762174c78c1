use crate::devices::sensor_mcu::reading::{CommandStatus, ReadingSet};
use itertools::Itertools;
use serde_json::{Value, json};

/// One line per command, in polling order.
pub fn render_text(reading_set: &ReadingSet) -> String {
    reading_set
        .outcomes()
        .iter()
        .map(|outcome| match &outcome.status {
            CommandStatus::Accepted(reading) => format!("{}: {}", outcome.command, reading.value),
            CommandStatus::Failed(error) => format!(
                "{}: FAILED after {} attempt(s): {}",
                outcome.command, outcome.attempts, error
            ),
        })
        .join("\n")
}

pub fn render_json(reading_set: &ReadingSet) -> Value {
    let commands = reading_set
        .outcomes()
        .iter()
        .map(|outcome| {
            let status = match &outcome.status {
                CommandStatus::Accepted(reading) => json!({
                    "status": "accepted",
                    "value": reading.value,
                    "valid": reading.valid,
                }),
                CommandStatus::Failed(error) => json!({
                    "status": "failed",
                    "error": error.to_string(),
                }),
            };
            json!({
                "id": outcome.command.id,
                "kind": outcome.command.kind.to_string(),
                "attempts": outcome.attempts,
                "result": status,
            })
        })
        .collect::<Vec<_>>();

    json!({ "readings": commands })
}

#[cfg(test)]
mod tests {
    use super::{render_json, render_text};
    use crate::{
        devices::sensor_mcu::{
            command::{AM2320_TEMPERATURE, LUX},
            reading::{AttemptError, CommandOutcome, CommandStatus, Reading, ReadingSet},
        },
        interfaces::serial::transport::TransportError,
    };
    use serde_json::json;

    fn reading_set() -> ReadingSet {
        ReadingSet::new(
            vec![
                CommandOutcome {
                    command: AM2320_TEMPERATURE,
                    attempts: 1,
                    status: CommandStatus::Accepted(Reading::new(AM2320_TEMPERATURE, 21.5)),
                    exchanges: Box::new([]),
                },
                CommandOutcome {
                    command: LUX,
                    attempts: 3,
                    status: CommandStatus::Failed(AttemptError::Transport(
                        TransportError::Timeout,
                    )),
                    exchanges: Box::new([]),
                },
            ]
            .into_boxed_slice(),
        )
    }

    #[test]
    fn text() {
        assert_eq!(
            render_text(&reading_set()),
            "am2320_temp: 21.5\nlux: FAILED after 3 attempt(s): transport: timeout expired"
        );
    }

    #[test]
    fn json() {
        assert_eq!(
            render_json(&reading_set()),
            json!({
                "readings": [
                    {
                        "id": "am2320_temp",
                        "kind": "temperature",
                        "attempts": 1,
                        "result": { "status": "accepted", "value": 21.5, "valid": true },
                    },
                    {
                        "id": "lux",
                        "kind": "lux",
                        "attempts": 3,
                        "result": { "status": "failed", "error": "transport: timeout expired" },
                    },
                ]
            })
        );
    }
}
