use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nih_reporter::Client;
use nih_reporter::cli::{Cli, run};

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let client = match Client::from_env() {
        Ok(client) => client
            .with_timeout(cli.timeout())
            .with_progress(!cli.no_progress),
        Err(e) => {
            eprintln!("Request failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(endpoint = client.endpoint(), "client ready");

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    match run(&cli, &client, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
