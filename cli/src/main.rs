use std::process::ExitCode;

use clap::Parser;
use json_fetch::{FetchConfig, FetchError, JsonFetcher, UreqTransport};
use tokio::sync::oneshot;

#[derive(Parser, Debug)]
#[command(
    name = "json-fetch",
    version,
    about = "GET a URL and print the JSON document it returns",
    after_help = "Exit status: 0 on success, 2 when the server answers with a status other than 200, 1 otherwise."
)]
struct Cli {
    #[arg(help = "URL to fetch")]
    url: String,
    #[arg(
        long = "timeout-ms",
        help = "Give up after this many milliseconds (0 = never; default: $JSON_FETCH_TIMEOUT_MS)"
    )]
    timeout_ms: Option<u64>,
    #[arg(long, help = "Print compact JSON instead of pretty-printed")]
    compact: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match cli.timeout_ms {
        Some(millis) => FetchConfig::with_timeout_ms(millis),
        None => match FetchConfig::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("json-fetch: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    let fetcher = JsonFetcher::with_config(UreqTransport::from_config(&config), config);

    log::debug!("fetching {} (timeout: {:?})", cli.url, fetcher.config().timeout);
    let (tx, rx) = oneshot::channel();
    fetcher.fetch_json(cli.url, move |outcome| {
        let _ = tx.send(outcome);
    });
    let outcome = match rx.await {
        Ok(outcome) => outcome,
        Err(_) => {
            eprintln!("json-fetch: request task ended without a result");
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(value) => {
            log::debug!("fetch succeeded");
            let rendered = if cli.compact {
                serde_json::to_string(&value)
            } else {
                serde_json::to_string_pretty(&value)
            };
            match rendered {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("json-fetch: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            log::info!("fetch failed: {e:?}");
            eprintln!("json-fetch: {e}");
            ExitCode::from(exit_status(&e))
        }
    }
}

fn exit_status(e: &FetchError) -> u8 {
    match e {
        FetchError::Status { .. } => 2,
        _ => 1,
    }
}
