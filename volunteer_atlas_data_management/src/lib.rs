use const_format::concatcp;
use thiserror::Error;

mod data_manager;
pub mod normalize;
pub mod sheets;

pub use data_manager::*;

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/";
pub const SPREADSHEETS_URL: &str = concatcp!(SHEETS_API_BASE, "spreadsheets");

pub const CREDENTIALS_ENV_VAR: &str = "GDRIVE_API_CREDENTIALS";
pub const CREDENTIALS_FILE_ENV_VAR: &str = "VOLUNTEER_ATLAS_CREDENTIALS_FILE";
pub const CREDENTIALS_FILE: &str = "volunteeratlas-service.json";

/// Maximum offset, in degrees, added to each coordinate.
pub const DEFAULT_JITTER: f64 = 0.005;

#[derive(Debug, Error)]
pub enum DataManagerError {
    #[error("failed to fetch worksheet '{worksheet}': {reason}")]
    Fetch { worksheet: String, reason: String },
    #[error("worksheet '{worksheet}' has no '{column}' column")]
    Schema { worksheet: String, column: String },
    #[error("configuration error: {0}")]
    Configuration(String),
}
