//! sabersql - create a MySQL schema and bulk-load data through the `mysql` client.

use sabersql::cli::Cli;
use sabersql::{app, logging};
use std::io::Write;
use tracing::error;

fn main() {
    // A .env file may carry MYSQL_PWD and friends
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    match app::run(&cli) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
                error!("Failed to write output: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}
