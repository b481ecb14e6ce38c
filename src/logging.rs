use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the global subscriber. Warnings only unless `debug` is set.
/// A subscriber installed earlier in the process is left in place.
pub fn init(debug: bool) {
    let level = match debug {
        true => Level::DEBUG,
        false => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Log subscriber already installed");
    }
}
