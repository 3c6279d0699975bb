use std::sync::Once;

use log::LevelFilter;

static INIT: Once = Once::new();

/// Sets up `env_logger`. The filter uses `env_logger` syntax (e.g. "debug" or
/// "glquad=trace,glutin=warn"); without one, `RUST_LOG` is consulted, then `info` is used.
///
/// Only the first call has any effect.
pub fn init(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match filter {
            Some(filter) => {
                builder.parse_filters(filter);
            }
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => {
                    builder.parse_filters(&filter);
                }
                Err(_) => {
                    builder.filter_level(LevelFilter::Info);
                }
            },
        }

        builder.init();

        debug!("logging initialized");
    });
}
