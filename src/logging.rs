use tracing::level_filters::LevelFilter;

/// Map the number of `-v` flags to a log level.
pub fn level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Log to standard error, standard output being reserved for results.
pub fn init(verbosity: u8) -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("logger initialization failed with {e}"))
}

#[test]
fn test_levels() {
    assert_eq!(level(0), LevelFilter::ERROR);
    assert_eq!(level(2), LevelFilter::INFO);
    assert_eq!(level(9), LevelFilter::TRACE);
}
