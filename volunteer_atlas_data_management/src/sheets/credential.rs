use std::{fmt, path::{Path, PathBuf}};

use serde::Deserialize;

use crate::{DataManagerError, CREDENTIALS_ENV_VAR, CREDENTIALS_FILE, CREDENTIALS_FILE_ENV_VAR};

/// How requests to the Sheets API are authorized.
#[derive(Clone, PartialEq)]
pub enum Credential {
    ApiKey(String),
    AccessToken(String),
}

#[derive(Deserialize)]
struct CredentialJson {
    api_key: Option<String>,
    access_token: Option<String>,
}

impl Credential {
    pub fn from_json(json: &str) -> Result<Self, DataManagerError> {
        let parsed: CredentialJson = serde_json::from_str(json)
            .map_err(|err| DataManagerError::Configuration(format!("Malformed credential: {err}")))?;

        let non_empty = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(token) = non_empty(parsed.access_token) {
            Ok(Credential::AccessToken(token))
        } else if let Some(key) = non_empty(parsed.api_key) {
            Ok(Credential::ApiKey(key))
        } else {
            Err(DataManagerError::Configuration("Credential has neither 'api_key' nor 'access_token'".to_string()))
        }
    }

    /// Reads the credential from the environment, falling back to the credential file.
    pub fn load() -> Result<Self, DataManagerError> {
        let env_value = dotenv::var(CREDENTIALS_ENV_VAR).ok();
        let file = match dotenv::var(CREDENTIALS_FILE_ENV_VAR) {
            Ok(path) => PathBuf::from(path),
            Err(_) => project_root::get_project_root()
                .map_err(|err| DataManagerError::Configuration(format!("Failed to locate project root: {err}")))?
                .join(CREDENTIALS_FILE),
        };

        Self::load_from(env_value.as_deref(), &file)
    }

    /// Environment values wrapped in backticks come from shells that mangle
    /// the JSON quotes, so those are ignored in favour of the file.
    pub fn load_from(env_value: Option<&str>, file: &Path) -> Result<Self, DataManagerError> {
        if let Some(value) = env_value.filter(|v| !v.trim().is_empty() && !v.contains('`')) {
            tracing::debug!("Using credential from {}", CREDENTIALS_ENV_VAR);
            return Self::from_json(value);
        }

        let contents = std::fs::read_to_string(file)
            .map_err(|err| DataManagerError::Configuration(format!("Failed to read credential file {file:?}: {err}")))?;
        tracing::debug!("Using credential file {:?}", file);
        Self::from_json(&contents)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Credential::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
        }
    }
}
