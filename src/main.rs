#[macro_use] extern crate clap;
#[macro_use] extern crate log;

pub mod app;
pub mod error;
pub mod graphics;
pub mod interface;
pub mod logging;

use std::process;

use crate::error::Error;
use crate::interface::cli::cli_main;

fn main() {
    let config = match cli_main() {
        Ok(config) => config,
        Err(e) => {
            logging::init(None);
            let e = Error::from(e);
            error!("{}", e);
            process::exit(e.exit_code());
        }
    };

    logging::init(config.log_filter.as_deref());

    if let Err(e) = app::run(config) {
        error!("{}", e);
        process::exit(e.exit_code());
    }
}
