use clap::Parser;
use config_topology::logging::{self, LOG_CONFIG_FILE};
use config_topology::{run, Cli};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    logging::init(Path::new(LOG_CONFIG_FILE), cli.verbose)?;
    //
    log::info!("#Start main()");

    let summary = run(&cli)?;
    summary.print();

    Ok(())
}
