use std::io;
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tag_manifest::cli;

/// Initialize tracing on stderr so stdout only carries the report
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "tag_manifest=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let outcome = cli::run(std::env::args_os());
    outcome
        .write_to(&mut io::stdout().lock(), &mut io::stderr().lock())
        .context("Failed to write output")?;

    Ok(ExitCode::from(outcome.exit_code))
}
