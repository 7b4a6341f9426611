pub mod persistence;

use dirs::home_dir;
use std::{env, path::PathBuf, sync::Once};

pub use persistence::{tmp_path, write_atomic};

const DEFAULT_DIR_NAME: &str = ".monthly_split";
const CONFIG_FILE: &str = "config.json";
const STORE_FILE: &str = "records.json";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "monthly_split=info".parse::<Directive>() {
            filter = filter.add_directive(directive);
        }

        // A subscriber installed by the host application wins.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.monthly_split`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("MONTHLY_SPLIT_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the JSON configuration file.
pub fn config_file() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

/// Path to the default JSON record store.
pub fn store_file() -> PathBuf {
    app_data_dir().join(STORE_FILE)
}
