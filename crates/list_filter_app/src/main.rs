use anyhow::Context;
use clap::Parser;
use list_filter_app::{logging, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    let report = run(&cli)?;
    if cli.json {
        println!("{}", report.to_json().context("failed to serialize report")?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
