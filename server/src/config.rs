use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, anyhow};
use volunteer_atlas_data_management::DEFAULT_JITTER;

use crate::map::MapOptions;

pub const DEFAULT_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_ASSETS_DIR: &str = "server/assets";
pub const DEFAULT_OPERATOR_EMAIL: &str = "volunteers.atlas@gmail.com";
pub const DEFAULT_VOLUNTEER_FORM_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSfw3LFsXtCCmr-ewkUuIltKIP5PKNY8Xn8h3MjVrFrvfvktPw/viewform?embedded=true";
pub const DEFAULT_DELIVERY_FORM_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSfFkdsyhiPTQDA5LtnJFzHUFzTL-aQaO-9koXIkOir2K2Lw7g/viewform?embedded=true";
pub const SOURCE_URL: &str = "https://github.com/yuorme/volunteeratlas";
pub const DEFAULT_LOG_FILTER: &str = "server=trace,volunteer_atlas_data_management=debug";
/// Largest accepted jitter, in degrees.
pub const MAX_JITTER: f64 = 1.0;

/// Everything the pages need to know about the outside world.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub operator_email: String,
    pub volunteer_form_url: String,
    pub delivery_form_url: String,
    pub source_url: String,
    pub map: MapOptions,
    /// Height in pixels of every embedded frame.
    pub frame_height: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            operator_email: DEFAULT_OPERATOR_EMAIL.to_string(),
            volunteer_form_url: DEFAULT_VOLUNTEER_FORM_URL.to_string(),
            delivery_form_url: DEFAULT_DELIVERY_FORM_URL.to_string(),
            source_url: SOURCE_URL.to_string(),
            map: MapOptions::default(),
            frame_height: 800,
        }
    }
}

/// Log directives from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
pub fn log_directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("RUST_LOG")
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub assets_dir: PathBuf,
    pub sheet_key: String,
    pub jitter: f64,
    pub site: SiteConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| dotenv::var(name).ok())
    }

    /// Builds the config from any variable lookup, so tests need not touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let sheet_key = var("VOLUNTEER_ATLAS_SHEET_KEY").ok_or_else(|| anyhow!("VOLUNTEER_ATLAS_SHEET_KEY is not set"))?;

        let addr: SocketAddr = var("VOLUNTEER_ATLAS_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .context("VOLUNTEER_ATLAS_ADDR is not a socket address")?;

        let jitter = match var("VOLUNTEER_ATLAS_JITTER") {
            Some(value) => value.parse::<f64>().context("VOLUNTEER_ATLAS_JITTER is not a number")?,
            None => DEFAULT_JITTER,
        };
        if !(0. ..=MAX_JITTER).contains(&jitter) {
            return Err(anyhow!("VOLUNTEER_ATLAS_JITTER must be between 0 and {MAX_JITTER} degrees"));
        }

        let defaults = SiteConfig::default();
        let site = SiteConfig {
            operator_email: var("VOLUNTEER_ATLAS_OPERATOR_EMAIL").unwrap_or(defaults.operator_email),
            volunteer_form_url: var("VOLUNTEER_ATLAS_VOLUNTEER_FORM_URL").unwrap_or(defaults.volunteer_form_url),
            delivery_form_url: var("VOLUNTEER_ATLAS_DELIVERY_FORM_URL").unwrap_or(defaults.delivery_form_url),
            ..defaults
        };

        Ok(Self {
            addr,
            assets_dir: var("VOLUNTEER_ATLAS_ASSETS_DIR").unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()).into(),
            sheet_key,
            jitter,
            site,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn fills_in_defaults() {
        let config = Config::from_lookup(lookup(&[("VOLUNTEER_ATLAS_SHEET_KEY", "abc")])).unwrap();
        assert_eq!(config.sheet_key, "abc");
        assert_eq!(config.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.jitter, DEFAULT_JITTER);
        assert_eq!(config.site, SiteConfig::default());
    }

    #[test]
    fn sheet_key_is_required() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("VOLUNTEER_ATLAS_SHEET_KEY", "  ")])).is_err());
    }

    #[test]
    fn rejects_bad_values() {
        let bad_addr = [("VOLUNTEER_ATLAS_SHEET_KEY", "abc"), ("VOLUNTEER_ATLAS_ADDR", "localhost")];
        assert!(Config::from_lookup(lookup(&bad_addr)).is_err());

        let bad_jitter = [("VOLUNTEER_ATLAS_SHEET_KEY", "abc"), ("VOLUNTEER_ATLAS_JITTER", "-1")];
        assert!(Config::from_lookup(lookup(&bad_jitter)).is_err());

        let huge_jitter = [("VOLUNTEER_ATLAS_SHEET_KEY", "abc"), ("VOLUNTEER_ATLAS_JITTER", "1e308")];
        assert!(Config::from_lookup(lookup(&huge_jitter)).is_err());

        let nan_jitter = [("VOLUNTEER_ATLAS_SHEET_KEY", "abc"), ("VOLUNTEER_ATLAS_JITTER", "NaN")];
        assert!(Config::from_lookup(lookup(&nan_jitter)).is_err());
    }

    #[test]
    fn log_filter_comes_from_rust_log() {
        assert_eq!(log_directives(lookup(&[("RUST_LOG", "server=warn")])), "server=warn");
        assert_eq!(log_directives(lookup(&[("RUST_LOG", " ")])), DEFAULT_LOG_FILTER);
        assert_eq!(log_directives(lookup(&[])), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn overrides_site_settings() {
        let vars = [
            ("VOLUNTEER_ATLAS_SHEET_KEY", "abc"),
            ("VOLUNTEER_ATLAS_OPERATOR_EMAIL", "ops@example.org"),
            ("VOLUNTEER_ATLAS_JITTER", "0.01"),
        ];
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.site.operator_email, "ops@example.org");
        assert_eq!(config.jitter, 0.01);
        assert_eq!(config.site.delivery_form_url, DEFAULT_DELIVERY_FORM_URL);
    }
}
