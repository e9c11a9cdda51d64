use crate::domain::ports::ConfigProvider;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Target for failures the binaries already print to the user. Written to the log file only.
pub const REPORTED_TARGET: &str = "gradebook::reported";

fn console_directives(verbose: bool) -> String {
    let base = if verbose { "gradebook=debug,info" } else { "gradebook=warn" };
    format!("{},{}=off", base, REPORTED_TARGET)
}

/// Console output on stderr plus an optional append-only log file.
pub fn init_cli_logger<C: ConfigProvider>(config: &C, verbose: bool) {
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directives(verbose)));

    let mut layers: Vec<BoxedLayer> = vec![tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(console_filter)
        .boxed()];

    let mut file_error = None;
    if let Some(log_path) = config.log_path() {
        match open_log_file(log_path) {
            Ok(file) => layers.push(file_layer(file, config.log_level(), config.json_logs())),
            Err(e) => file_error = Some((log_path.display().to_string(), e)),
        }
    }

    tracing_subscriber::registry().with(layers).init();

    if let Some((path, e)) = file_error {
        tracing::warn!("Cannot open log file {}: {}; logging to console only", path, e);
    }
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn file_layer(file: File, level: &str, json: bool) -> BoxedLayer {
    let filter = EnvFilter::new(format!("gradebook={}", level));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    if json {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    }
}
