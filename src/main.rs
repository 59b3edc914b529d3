use anyhow::Context;
use clap::Parser;
use paie_engine::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    cli::init_logger(args.verbose);

    tracing::debug!(?args, "Starting paie");

    let output = cli::run(&args).context("payroll calculation failed")?;
    let rendered = output
        .render(args.pretty)
        .context("failed to serialize payroll output")?;
    println!("{}", rendered);

    let failures = output.failures();
    if failures > 0 {
        tracing::error!(failures, "Some payroll calculations failed");
        std::process::exit(1);
    }
    Ok(())
}
