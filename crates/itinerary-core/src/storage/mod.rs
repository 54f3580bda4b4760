mod config;
pub mod database;

pub use config::{ClockFormat, Config, DisplayConfig, ScheduleConfig};
pub use database::{BlobStore, APP_DATA_KEY};

use std::path::PathBuf;

/// Returns `~/.config/itinerary[-dev]/` based on ITINERARY_ENV.
///
/// Set ITINERARY_ENV=dev to use a development data directory, or
/// ITINERARY_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("ITINERARY_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("ITINERARY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("itinerary-dev")
            } else {
                base_dir.join("itinerary")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
