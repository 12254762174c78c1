use crate::{
    devices::sensor_mcu::{command::SensorKind, reading::ReadingSet},
    util::anyhow_multiple_error::AnyhowMultipleError,
};
use anyhow::{Context, Error, bail, ensure};
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use std::time::Duration;

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct CreateReadingRequest {
    #[serde(rename = "sensorName")]
    pub sensor_name: String,
    pub reading_type: u8,
    pub reading_value: f64,
}

pub fn reading_type_id(kind: SensorKind) -> u8 {
    match kind {
        SensorKind::Temperature => 1,
        SensorKind::Humidity => 2,
        SensorKind::Lux => 3,
    }
}

/// Collapses valid readings into a single value per kind, averaging when a kind was read by more
/// than one sensor. Kinds without a valid reading are skipped.
pub fn reduce(reading_set: &ReadingSet) -> Vec<(SensorKind, f64)> {
    SensorKind::ALL
        .iter()
        .filter_map(|kind| {
            let values = reading_set
                .readings_of_kind(*kind)
                .filter(|reading| reading.valid)
                .map(|reading| reading.value)
                .collect::<Vec<_>>();
            if values.is_empty() {
                return None;
            }
            let average = values.iter().sum::<f64>() / values.len() as f64;
            Some((*kind, average))
        })
        .collect()
}

/// Forwards readings to a remote collector with `PUT` requests.
#[derive(Debug)]
pub struct Submitter {
    client: Client,
    endpoint: Url,
    sensor_name: String,
}
impl Submitter {
    const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(
        endpoint: Url,
        sensor_name: String,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .context("build")?;

        Ok(Self {
            client,
            endpoint,
            sensor_name,
        })
    }

    pub fn requests(
        &self,
        reading_set: &ReadingSet,
    ) -> Vec<CreateReadingRequest> {
        reduce(reading_set)
            .into_iter()
            .map(|(kind, value)| CreateReadingRequest {
                sensor_name: self.sensor_name.clone(),
                reading_type: reading_type_id(kind),
                reading_value: value,
            })
            .collect()
    }

    async fn submit(
        &self,
        request: &CreateReadingRequest,
    ) -> Result<(), Error> {
        let response = self
            .client
            .put(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .context("send")?;

        let status = response.status();
        ensure!(
            status == StatusCode::CREATED,
            "create failed with status {status}"
        );

        Ok(())
    }

    /// Submits every reduced reading, returns the number of submitted values.
    ///
    /// A failing submission does not stop the remaining ones, all failures are reported together.
    pub async fn submit_all(
        &self,
        reading_set: &ReadingSet,
    ) -> Result<usize, Error> {
        let requests = self.requests(reading_set);

        let mut errors = Vec::<Error>::new();
        for request in &requests {
            if let Err(error) = self
                .submit(request)
                .await
                .with_context(|| format!("submit reading_type {}", request.reading_type))
            {
                log::warn!("{:?}", error);
                errors.push(error);
            }
        }
        if !errors.is_empty() {
            bail!(errors.into_iter().collect::<AnyhowMultipleError>());
        }

        Ok(requests.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateReadingRequest, Submitter, reduce};
    use crate::devices::sensor_mcu::{
        command::{AM2320_HUMIDITY, AM2320_TEMPERATURE, DS18X20_TEMPERATURE, LUX, SensorKind},
        reading::{AttemptError, CommandOutcome, CommandStatus, Reading, ReadingSet},
    };
    use approx::assert_relative_eq;
    use serde_json::json;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    fn accepted(reading: Reading) -> CommandOutcome {
        CommandOutcome {
            command: reading.command,
            attempts: 1,
            status: CommandStatus::Accepted(reading),
            exchanges: Box::new([]),
        }
    }

    fn reading_set() -> ReadingSet {
        ReadingSet::new(
            vec![
                accepted(Reading::new(AM2320_TEMPERATURE, 21.0)),
                accepted(Reading::new(AM2320_HUMIDITY, 40.0)),
                accepted(Reading::new(DS18X20_TEMPERATURE, 22.0)),
                CommandOutcome {
                    command: LUX,
                    attempts: 2,
                    status: CommandStatus::Failed(AttemptError::ValidationRejected {
                        value: 0.0,
                        range: SensorKind::Lux.valid_range(),
                    }),
                    exchanges: Box::new([]),
                },
            ]
            .into_boxed_slice(),
        )
    }

    #[test]
    fn reduce_averages_temperatures() {
        let reduced = reduce(&reading_set());

        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].0, SensorKind::Temperature);
        assert_relative_eq!(reduced[0].1, 21.5);
        assert_eq!(reduced[1].0, SensorKind::Humidity);
        assert_relative_eq!(reduced[1].1, 40.0);
    }

    #[test]
    fn reduce_skips_invalid() {
        let reading_set = ReadingSet::new(
            vec![
                accepted(Reading::new(AM2320_TEMPERATURE, 0.0)),
                accepted(Reading::new(DS18X20_TEMPERATURE, 19.5)),
            ]
            .into_boxed_slice(),
        );

        let reduced = reduce(&reading_set);

        assert_eq!(reduced, [(SensorKind::Temperature, 19.5)]);
    }

    #[test]
    fn request_serialization() {
        let request = CreateReadingRequest {
            sensor_name: "greenhouse".to_owned(),
            reading_type: 2,
            reading_value: 40.0,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "sensorName": "greenhouse", "reading_type": 2, "reading_value": 40.0 })
        );
    }

    // Minimal HTTP/1.1 server answering `count` requests with `status_line`, returns request heads.
    async fn serve(
        count: usize,
        status_line: &'static str,
    ) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/readings", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for _ in 0..count {
                let (mut stream, _) = listener.accept().await.unwrap();
                let mut buffer = Vec::<u8>::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let read = stream.read(&mut chunk).await.unwrap();
                    buffer.extend_from_slice(&chunk[..read]);
                    let text = String::from_utf8_lossy(&buffer).to_string();
                    if let Some((head, body)) = text.split_once("\r\n\r\n") {
                        let content_length = head
                            .lines()
                            .filter_map(|line| line.split_once(':'))
                            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                            .map(|(_, value)| value.trim().parse::<usize>().unwrap())
                            .unwrap_or(0);
                        if body.len() >= content_length {
                            requests.push(text);
                            break;
                        }
                    }
                    if read == 0 {
                        break;
                    }
                }
                let response =
                    format!("HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.unwrap();
            }
            requests
        });

        (endpoint, handle)
    }

    #[tokio::test]
    async fn submit_all_created() {
        let (endpoint, server) = serve(2, "201 Created").await;
        let submitter = Submitter::new(endpoint.parse().unwrap(), "greenhouse".to_owned()).unwrap();

        let submitted = submitter.submit_all(&reading_set()).await.unwrap();

        assert_eq!(submitted, 2);
        let requests = server.await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("PUT /readings "));
        assert!(requests[0].contains(r#""sensorName":"greenhouse""#));
        assert!(requests[0].contains(r#""reading_type":1"#));
        assert!(requests[1].contains(r#""reading_type":2"#));
    }

    #[tokio::test]
    async fn submit_all_rejected() {
        let (endpoint, server) = serve(2, "500 Internal Server Error").await;
        let submitter = Submitter::new(endpoint.parse().unwrap(), "greenhouse".to_owned()).unwrap();

        let result = submitter.submit_all(&reading_set()).await;

        assert!(result.is_err());
        assert_eq!(server.await.unwrap().len(), 2);
    }
}
