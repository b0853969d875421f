use clap::Parser;
use hvac_valuation::cli::{self, Cli};
use hvac_valuation::logger;

fn main() {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);

    match cli::run(&cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            tracing::debug!(error = ?e, "valuation failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
