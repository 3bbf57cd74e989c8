// Email Advising - command line entry point

use anyhow::Result;
use clap::Parser;

use email_advising::cli::{run, Args};

fn main() -> Result<()> {
    // Initialize logging (stderr)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let report = run(&args)?;
    println!("{}", report);
    Ok(())
}
