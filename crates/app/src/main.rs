//! Voucher CLI

use std::{io, process};

use voucher_app::{context::AppContext, observability};

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    observability::init(&cli.config.log_level);

    let context = match AppContext::from_config(&cli.config).await {
        Ok(context) => context,
        Err(init_error) => {
            eprintln!("{init_error}");

            let mut source = std::error::Error::source(&init_error);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }

            process::exit(1);
        }
    };

    if let Err(error) = cli.run(&context, io::stdout().lock()).await {
        eprintln!("{error}");
        process::exit(1);
    }
}
