use anyhow::{Context, Error, bail};
use clap::Parser;
use serialmcu_bridge::{
    devices::sensor_mcu::{
        command::{Selection, Sensor, SensorKind},
        poller::{PollConfig, Poller},
        reading::ReadingSet,
    },
    interfaces::serial::{self, port::PortLink},
    reporting::{console, endpoint::Submitter},
    util::logging,
};
use std::{path::PathBuf, str::FromStr, time::Duration};

#[derive(Debug, Clone)]
struct ArgumentsParity(serial::Parity);
impl FromStr for ArgumentsParity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = match s {
            "None" => serial::Parity::None,
            "Odd" => serial::Parity::Odd,
            "Even" => serial::Parity::Even,
            _ => bail!("unsupported parity. supported values: None, Odd, Even"),
        };

        Ok(Self(inner))
    }
}

#[derive(Debug, Parser)]
#[clap(name = "serialmcu-bridge", version, about)]
struct Arguments {
    #[clap(short, long, value_name = "SERIAL_PORT")]
    port: PathBuf,

    /// Attempts per command, 0 behaves as 1
    #[clap(short, long, default_value_t = PollConfig::MAX_RETRIES_DEFAULT)]
    retry: usize,

    #[clap(long, default_value_t = PollConfig::TIMEOUT_DEFAULT.as_millis() as u64)]
    timeout_ms: u64,

    #[clap(long, default_value_t = serial::Configuration::BAUD_RATE_DEFAULT)]
    baud_rate: u32,

    #[clap(long, default_value = "Even")]
    parity: ArgumentsParity,

    /// temperature/temp, humidity/hum or lux
    #[clap(short = 't', long)]
    reading_type: Option<SensorKind>,

    /// am2320, ds18x20 or lux
    #[clap(short = 'j', long = "just-sensor", value_name = "SENSOR")]
    sensor: Option<Sensor>,

    /// Log every command and raw response, plus trace output in debug builds
    #[clap(short, long)]
    verbose: bool,

    /// Print readings as JSON
    #[clap(long)]
    json: bool,

    /// Submit valid readings to the endpoint
    #[clap(short, long)]
    send: bool,

    #[clap(short, long)]
    name: Option<String>,

    #[clap(short, long, default_value = "http://localhost:3000/readings")]
    endpoint: String,
}

fn log_exchanges(reading_set: &ReadingSet) {
    for outcome in reading_set {
        for exchange in outcome.exchanges.iter() {
            match &exchange.response {
                Ok(response) => log::info!(
                    "{} #{}: {:?} => {:?}",
                    outcome.command,
                    exchange.attempt,
                    exchange.command,
                    response
                ),
                Err(error) => log::info!(
                    "{} #{}: {:?} => {}",
                    outcome.command,
                    exchange.attempt,
                    exchange.command,
                    error
                ),
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let arguments = Arguments::parse();

    logging::configure(module_path!(), arguments.verbose);

    let submitter = if arguments.send {
        let name = arguments
            .name
            .clone()
            .context("name is required when sending")?;
        let endpoint = arguments.endpoint.parse().context("endpoint")?;
        Some(Submitter::new(endpoint, name).context("submitter")?)
    } else {
        None
    };

    let commands = Selection {
        kind: arguments.reading_type,
        sensor: arguments.sensor,
    }
    .commands()
    .context("commands")?;

    let link = PortLink::new(
        arguments.port.clone(),
        serial::Configuration::new(arguments.baud_rate, arguments.parity.0),
    );
    let poller = Poller::new(PollConfig {
        max_retries: arguments.retry,
        timeout: Duration::from_millis(arguments.timeout_ms),
        verbose: arguments.verbose,
        ..PollConfig::default()
    });

    // serial i/o blocks, keep it off the runtime thread
    let reading_set = tokio::task::spawn_blocking(move || poller.poll_all(&link, &commands))
        .await
        .context("spawn_blocking")?
        .context("poll_all")?;

    log_exchanges(&reading_set);

    if arguments.json {
        println!("{:#}", console::render_json(&reading_set));
    } else {
        println!("{}", console::render_text(&reading_set));
    }

    if let Some(submitter) = submitter {
        let submitted = submitter
            .submit_all(&reading_set)
            .await
            .context("submit_all")?;
        log::info!("submitted {} reading(s)", submitted);
    }

    Ok(())
}
