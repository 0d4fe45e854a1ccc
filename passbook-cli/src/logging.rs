use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the console subscriber. `RUST_LOG` wins over the defaults.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "passbook=debug" } else { "passbook=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
