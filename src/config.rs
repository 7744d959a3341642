//! Configuration management for gitstack
//!
//! Settings are loaded from environment variables with fallback defaults. CLI flags may
//! override individual fields after loading.
//!
//! # Environment Variables
//!
//! - `GITSTACK_GITHUB_TOKEN` (or `GITHUB_TOKEN`): optional API token, raises the rate limit
//! - `GITSTACK_API_URL`: REST endpoint - default: "https://api.github.com"
//! - `GITSTACK_RAW_URL`: raw content endpoint - default: "https://raw.githubusercontent.com"
//! - `GITSTACK_REQUEST_TIMEOUT`: timeout in seconds - default: "30"
//! - `GITSTACK_CACHE_ENABLED`: persistent result cache (true|false) - default: "true"
//! - `GITSTACK_CACHE_DIR`: record directory - default: user cache dir + "gitstack"
//! - `GITSTACK_TREE_TTL`, `GITSTACK_REPO_TTL`, `GITSTACK_PROFILE_TTL`: TTLs in seconds
//! - `GITSTACK_REFRESH_AFTER`: age in seconds after which a cached repo result is refreshed
//!   in the background - default: "120"
//! - `GITSTACK_PROFILE_DELAY_MS`: delay between sequential repository scans - default: "300"
//! - `GITSTACK_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use gitstack::GitstackConfig;
//!
//! let config = GitstackConfig::default();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use crate::cache::policy::TtlPolicy;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_CACHE_ENABLED: bool = true;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TREE_TTL_SECS: u64 = 5 * 60;
const DEFAULT_REPO_TTL_SECS: u64 = 10 * 60;
const DEFAULT_PROFILE_TTL_SECS: u64 = 30 * 60;
const DEFAULT_REFRESH_AFTER_SECS: u64 = 2 * 60;
const DEFAULT_PROFILE_DELAY_MS: u64 = 300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Clone)]
pub struct GitstackConfig {
    /// Bearer token for the hosting API. Never printed.
    pub github_token: Option<String>,

    pub api_url: String,

    pub raw_url: String,

    pub request_timeout_secs: u64,

    pub cache_enabled: bool,

    /// Directory for persisted scan records
    pub cache_dir: Option<PathBuf>,

    pub tree_ttl_secs: u64,

    pub repo_ttl_secs: u64,

    pub profile_ttl_secs: u64,

    /// Age of a cached repository result that triggers a background refresh
    pub refresh_after_secs: u64,

    /// Courtesy delay between sequential repository scans of one account
    pub profile_delay_ms: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Default for GitstackConfig {
    fn default() -> Self {
        let github_token = non_empty_env("GITSTACK_GITHUB_TOKEN").or_else(|| non_empty_env("GITHUB_TOKEN"));

        let api_url = non_empty_env("GITSTACK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let raw_url = non_empty_env("GITSTACK_RAW_URL").unwrap_or_else(|| DEFAULT_RAW_URL.to_string());

        let cache_enabled = env_or("GITSTACK_CACHE_ENABLED", DEFAULT_CACHE_ENABLED);
        let cache_dir = non_empty_env("GITSTACK_CACHE_DIR")
            .map(PathBuf::from)
            .or_else(|| {
                if cache_enabled {
                    dirs::cache_dir()
                        .or_else(|| Some(env::temp_dir()))
                        .map(|dir| dir.join("gitstack"))
                } else {
                    None
                }
            });

        let log_level = env::var("GITSTACK_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            github_token,
            api_url: api_url.trim_end_matches('/').to_string(),
            raw_url: raw_url.trim_end_matches('/').to_string(),
            request_timeout_secs: env_or("GITSTACK_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS),
            cache_enabled,
            cache_dir,
            tree_ttl_secs: env_or("GITSTACK_TREE_TTL", DEFAULT_TREE_TTL_SECS),
            repo_ttl_secs: env_or("GITSTACK_REPO_TTL", DEFAULT_REPO_TTL_SECS),
            profile_ttl_secs: env_or("GITSTACK_PROFILE_TTL", DEFAULT_PROFILE_TTL_SECS),
            refresh_after_secs: env_or("GITSTACK_REFRESH_AFTER", DEFAULT_REFRESH_AFTER_SECS),
            profile_delay_ms: env_or("GITSTACK_PROFILE_DELAY_MS", DEFAULT_PROFILE_DELAY_MS),
            log_level,
        }
    }
}

impl GitstackConfig {
    /// Checks numeric ranges, TTL ordering, endpoint schemes and the log level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        for (field, value) in [
            ("tree_ttl_secs", self.tree_ttl_secs),
            ("repo_ttl_secs", self.repo_ttl_secs),
            ("profile_ttl_secs", self.profile_ttl_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "{} must be at least 1 second",
                    field
                )));
            }
        }

        if self.refresh_after_secs >= self.repo_ttl_secs {
            return Err(ConfigError::ValidationFailed(format!(
                "Refresh threshold ({}s) must be below the repository TTL ({}s)",
                self.refresh_after_secs, self.repo_ttl_secs
            )));
        }

        if self.profile_delay_ms > 60_000 {
            return Err(ConfigError::ValidationFailed(
                "Profile scan delay cannot exceed 60 seconds".to_string(),
            ));
        }

        for (field, url) in [("api_url", &self.api_url), ("raw_url", &self.raw_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::ParseError {
                    field: field.to_string(),
                    error: format!("'{}' is not an http(s) URL", url),
                });
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn profile_delay(&self) -> Duration {
        Duration::from_millis(self.profile_delay_ms)
    }

    pub fn ttl_policy(&self) -> TtlPolicy {
        TtlPolicy {
            tree: Duration::from_secs(self.tree_ttl_secs),
            repo: Duration::from_secs(self.repo_ttl_secs),
            profile: Duration::from_secs(self.profile_ttl_secs),
            refresh_after: Duration::from_secs(self.refresh_after_secs),
        }
    }

    pub fn has_token(&self) -> bool {
        self.github_token.is_some()
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("authenticated".to_string(), self.has_token().to_string());
        map.insert("api_url".to_string(), self.api_url.clone());
        map.insert("raw_url".to_string(), self.raw_url.clone());
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert("cache_enabled".to_string(), self.cache_enabled.to_string());
        if let Some(ref dir) = self.cache_dir {
            map.insert("cache_dir".to_string(), dir.display().to_string());
        }
        map.insert("tree_ttl_secs".to_string(), self.tree_ttl_secs.to_string());
        map.insert("repo_ttl_secs".to_string(), self.repo_ttl_secs.to_string());
        map.insert("profile_ttl_secs".to_string(), self.profile_ttl_secs.to_string());
        map.insert(
            "refresh_after_secs".to_string(),
            self.refresh_after_secs.to_string(),
        );
        map.insert("profile_delay_ms".to_string(), self.profile_delay_ms.to_string());
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Debug for GitstackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitstackConfig")
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("raw_url", &self.raw_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_dir", &self.cache_dir)
            .field("tree_ttl_secs", &self.tree_ttl_secs)
            .field("repo_ttl_secs", &self.repo_ttl_secs)
            .field("profile_ttl_secs", &self.profile_ttl_secs)
            .field("refresh_after_secs", &self.refresh_after_secs)
            .field("profile_delay_ms", &self.profile_delay_ms)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl fmt::Display for GitstackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gitstack Configuration:")?;
        writeln!(f, "  Authenticated: {}", self.has_token())?;
        writeln!(f, "  API URL: {}", self.api_url)?;
        writeln!(f, "  Raw URL: {}", self.raw_url)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Cache Enabled: {}", self.cache_enabled)?;
        if let Some(ref dir) = self.cache_dir {
            writeln!(f, "  Cache Dir: {}", dir.display())?;
        }
        writeln!(
            f,
            "  TTLs: tree {}s, repo {}s, profile {}s (refresh after {}s)",
            self.tree_ttl_secs, self.repo_ttl_secs, self.profile_ttl_secs, self.refresh_after_secs
        )?;
        writeln!(f, "  Profile Scan Delay: {}ms", self.profile_delay_ms)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Temporarily sets or clears an environment variable
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn clean_env() -> Vec<EnvGuard> {
        [
            "GITSTACK_GITHUB_TOKEN",
            "GITHUB_TOKEN",
            "GITSTACK_API_URL",
            "GITSTACK_RAW_URL",
            "GITSTACK_REQUEST_TIMEOUT",
            "GITSTACK_CACHE_ENABLED",
            "GITSTACK_CACHE_DIR",
            "GITSTACK_TREE_TTL",
            "GITSTACK_REPO_TTL",
            "GITSTACK_PROFILE_TTL",
            "GITSTACK_REFRESH_AFTER",
            "GITSTACK_PROFILE_DELAY_MS",
            "GITSTACK_LOG_LEVEL",
        ]
        .iter()
        .map(|key| EnvGuard::unset(key))
        .collect()
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = clean_env();
        let config = GitstackConfig::default();

        assert!(config.github_token.is_none());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.raw_url, DEFAULT_RAW_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert!(config.cache_enabled);
        assert!(config.cache_dir.is_some());
        assert_eq!(config.tree_ttl_secs, 300);
        assert_eq!(config.repo_ttl_secs, 600);
        assert_eq!(config.profile_ttl_secs, 1800);
        assert_eq!(config.refresh_after_secs, 120);
        assert_eq!(config.profile_delay_ms, 300);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let mut guards = clean_env();
        guards.push(EnvGuard::set("GITSTACK_API_URL", "http://localhost:9999/"));
        guards.push(EnvGuard::set("GITSTACK_REPO_TTL", "60"));
        guards.push(EnvGuard::set("GITSTACK_REFRESH_AFTER", "30"));
        guards.push(EnvGuard::set("GITSTACK_CACHE_ENABLED", "false"));
        guards.push(EnvGuard::set("GITSTACK_LOG_LEVEL", "DEBUG"));

        let config = GitstackConfig::default();
        assert_eq!(config.api_url, "http://localhost:9999");
        assert_eq!(config.repo_ttl_secs, 60);
        assert_eq!(config.refresh_after_secs, 30);
        assert!(!config.cache_enabled);
        assert!(config.cache_dir.is_none());
        assert_eq!(config.log_level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_token_fallback_and_redaction() {
        let mut guards = clean_env();
        guards.push(EnvGuard::set("GITHUB_TOKEN", "ghp_secret"));

        let config = GitstackConfig::default();
        assert_eq!(config.github_token.as_deref(), Some("ghp_secret"));

        let debug = format!("{:?}", config);
        assert!(!debug.contains("ghp_secret"));
        assert!(debug.contains("<redacted>"));
        assert!(!config.to_string().contains("ghp_secret"));
    }

    #[test]
    #[serial]
    fn test_unparseable_values_fall_back() {
        let mut guards = clean_env();
        guards.push(EnvGuard::set("GITSTACK_REQUEST_TIMEOUT", "soon"));

        let config = GitstackConfig::default();
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    #[serial]
    fn test_validation_failures() {
        let _guards = clean_env();

        let mut config = GitstackConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = GitstackConfig::default();
        config.request_timeout_secs = 601;
        assert!(config.validate().is_err());

        let mut config = GitstackConfig::default();
        config.refresh_after_secs = config.repo_ttl_secs;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationFailed(_))));

        let mut config = GitstackConfig::default();
        config.api_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::ParseError { .. })));

        let mut config = GitstackConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_ttl_policy_from_config() {
        let _guards = clean_env();
        let policy = GitstackConfig::default().ttl_policy();
        assert_eq!(policy.tree, Duration::from_secs(300));
        assert_eq!(policy.repo, Duration::from_secs(600));
        assert_eq!(policy.profile, Duration::from_secs(1800));
        assert_eq!(policy.refresh_after, Duration::from_secs(120));
    }

    #[test]
    #[serial]
    fn test_display_map_hides_token() {
        let mut guards = clean_env();
        guards.push(EnvGuard::set("GITSTACK_GITHUB_TOKEN", "ghp_secret"));
        let map = GitstackConfig::default().to_display_map();
        assert_eq!(map.get("authenticated").map(String::as_str), Some("true"));
        assert!(map.values().all(|v| !v.contains("ghp_secret")));
    }
}
