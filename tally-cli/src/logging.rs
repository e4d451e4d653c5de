use tracing_subscriber::EnvFilter;

/// Log to stderr so the interactive display on stdout stays readable.
///
/// `RUST_LOG` wins; otherwise `level` applies to the tally crates only.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tally={level},tally_core={level},tally_store={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
