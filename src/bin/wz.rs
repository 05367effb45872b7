//! wz: one-shot weather lookup from the command line
//!
//! Runs the same pipeline a chat bot would, against an in-memory user store.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::LazyLock;

use clap::Parser;
use wzbot::{Config, WeatherOutcome, WeatherServiceBuilder};

static VERSION: LazyLock<String> = LazyLock::new(wzbot::version_string);

/// Look up the current weather for a place
#[derive(Parser)]
#[command(name = "wz")]
#[command(version = VERSION.as_str())]
#[command(about = "Current weather for a place")]
struct Args {
    /// Config file (default: ~/.wzbot/config.toml, then /etc/wzbot/config.toml)
    #[arg(short, long, env = "WZBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Nick to look the request up as
    #[arg(short, long, default_value = "wz")]
    nick: String,

    /// Place to look up (city, "City, ST", postal code...)
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialise tracing (default: info; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // No config file is fine: keys may come from the environment.
    let config = match Config::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let service = match WeatherServiceBuilder::from_config(&config).and_then(|b| b.build()) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let query = args.query.join(" ");
    match service.get_current(&args.nick, &query).await {
        Ok(WeatherOutcome::Report(line)) => {
            // Strip IRC bold markers for the terminal.
            println!("{}", line.replace('\x02', ""));
            ExitCode::SUCCESS
        }
        Ok(WeatherOutcome::NoLocationSet) => {
            println!("No location set. Give a place to look up.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = %e, "lookup failed");
            println!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
