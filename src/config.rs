//! Federation configuration.
//!
//! The rule is configured via a TOML file, with support for environment
//! variable interpolation using `${VAR_NAME}` syntax:
//!
//! ```toml
//! aws_account_id = "123456789012"
//! saml_provider_name = "GithubSSO"
//! role_name_prefix = "github_"
//! github_organization = "example-org"
//! ```
//!
//! Hosts that carry their own configuration layer can skip the file loader
//! and construct [`FederationConfig`] directly.

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

fn default_connection() -> String {
    "github".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("legate/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Configuration for the GitHub → AWS federation rule.
///
/// All values are read-only once loaded; one instance is safely shared
/// across concurrent login events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FederationConfig {
    /// AWS account that owns the assumable roles.
    pub aws_account_id: String,

    /// Name of the IAM SAML provider that has a trust relationship with
    /// the identity provider.
    pub saml_provider_name: String,

    /// Prefix prepended to the team slug to form the IAM role name,
    /// e.g. `github_` turns team `webops` into role `github_webops`.
    #[serde(default)]
    pub role_name_prefix: String,

    /// GitHub organization whose teams grant roles. Teams in any other
    /// organization are ignored.
    pub github_organization: String,

    /// Connection name under which GitHub logins arrive.
    #[serde(default = "default_connection")]
    pub connection: String,

    /// GitHub REST API base URL. Overridden in tests; the default is fine
    /// everywhere else.
    #[serde(default = "default_api_base")]
    pub github_api_base: String,

    /// `User-Agent` sent with team lookups. GitHub rejects requests that
    /// don't carry one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl FederationConfig {
    /// Load configuration from a TOML file.
    ///
    /// Environment variables in the format `${VAR_NAME}` are expanded.
    /// Missing required variables cause an error.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(contents)?;
        let config: FederationConfig = toml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and completeness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aws_account_id.is_empty() || !self.aws_account_id.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ConfigError::Validation(format!(
                "aws_account_id must be a numeric AWS account id, got '{}'",
                self.aws_account_id
            )));
        }

        if self.saml_provider_name.is_empty() {
            return Err(ConfigError::Validation(
                "saml_provider_name must not be empty".into(),
            ));
        }

        if self.github_organization.is_empty() {
            return Err(ConfigError::Validation(
                "github_organization must not be empty".into(),
            ));
        }

        if self.connection.is_empty() {
            return Err(ConfigError::Validation("connection must not be empty".into()));
        }

        Url::parse(&self.github_api_base).map_err(|e| {
            ConfigError::Validation(format!(
                "github_api_base is not a valid URL ('{}'): {}",
                self.github_api_base, e
            ))
        })?;

        if self.user_agent.is_empty() {
            return Err(ConfigError::Validation("user_agent must not be empty".into()));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {1}: {0}")]
    Io(std::io::Error, std::path::PathBuf),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("configuration validation error: {0}")]
    Validation(String),
}

/// Expand `${VAR_NAME}` references against the process environment.
///
/// Variables appearing after a `#` on a line are inside a TOML comment and
/// are left alone.
fn expand_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();
    let mut out = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }

        let comment_pos = line.find('#');
        let mut last_end = 0;

        for cap in re.captures_iter(line) {
            let matched = cap.get(0).unwrap();
            if comment_pos.is_some_and(|pos| matched.start() >= pos) {
                continue;
            }

            let var_name = &cap[1];
            let value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

            out.push_str(&line[last_end..matched.start()]);
            out.push_str(&value);
            last_end = matched.end();
        }

        out.push_str(&line[last_end..]);
    }

    Ok(out)
}
