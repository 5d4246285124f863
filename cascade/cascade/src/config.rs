use crate::populator::{Component, Target};
use crate::source::Endpoint;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".cascade.toml";

pub const ENV_BASE_URL: &str = "CASCADE_BASE_URL";
pub const ENV_SESSION_COOKIE: &str = "CASCADE_SESSION_COOKIE";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CASCADE_REQUEST_TIMEOUT_SECS";
pub const ENV_INSECURE_TLS: &str = "CASCADE_INSECURE_TLS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config file not found: {0}")]
    NotFound(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Client configuration.
///
/// ```toml
/// base_url = "http://127.0.0.1:8000"
/// request_timeout_secs = 30
/// session_cookie = "sessionid=abc"
///
/// [department]
/// path = "/helper/get_department_for_organization/"
/// query_param = "organization_id"
/// control_id = "id_department"
/// ```
///
/// Endpoint tables are all-or-nothing: a table that is present must name
/// every field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Scheme and authority of the admin site, e.g. `https://admin.example.com`.
    pub base_url: String,
    /// Skip TLS certificate verification.
    pub insecure_tls: bool,
    /// Upper bound for one option request; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Sent verbatim as the `Cookie` header; the helper endpoints require a login.
    pub session_cookie: Option<String>,
    pub department: EndpointConfig,
    pub designation: EndpointConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub path: String,
    pub query_param: String,
    pub control_id: String,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            insecure_tls: false,
            request_timeout_secs: Some(30),
            session_cookie: None,
            department: EndpointConfig {
                path: "/helper/get_department_for_organization/".to_string(),
                query_param: "organization_id".to_string(),
                control_id: "id_department".to_string(),
            },
            designation: EndpointConfig {
                path: "/helper/get_designation_for_department/".to_string(),
                query_param: "department_id".to_string(),
                control_id: "id_designation".to_string(),
            },
        }
    }
}

impl CascadeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let mut config: CascadeConfig = toml::from_str(contents)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Explicit file if given, else `.cascade.toml` when present, else
    /// defaults; environment variables are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env()?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| envmnt::exists(key).then(|| envmnt::get_or(key, "")))
    }

    /// Applies `CASCADE_*` overrides read through `lookup`, which returns
    /// `None` for unset variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(cookie) = lookup(ENV_SESSION_COOKIE) {
            self.session_cookie = Some(cookie).filter(|c| !c.trim().is_empty());
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            self.request_timeout_secs = match raw.trim() {
                "" | "0" => None,
                value => Some(value.parse().map_err(|_| {
                    ConfigError::Invalid(format!(
                        "{ENV_REQUEST_TIMEOUT_SECS} must be a number of seconds, got '{value}'"
                    ))
                })?),
            };
        }
        if let Some(raw) = lookup(ENV_INSECURE_TLS) {
            self.insecure_tls = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        Ok(())
    }

    pub fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self.department.path = normalize_path(&self.department.path);
        self.designation.path = normalize_path(&self.designation.path);
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        for (name, endpoint) in [
            ("department", &self.department),
            ("designation", &self.designation),
        ] {
            if endpoint.query_param.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{name}.query_param must not be empty"
                )));
            }
            if endpoint.control_id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{name}.control_id must not be empty"
                )));
            }
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn endpoint(&self, component: Component) -> &EndpointConfig {
        match component {
            Component::Department => &self.department,
            Component::Designation => &self.designation,
        }
    }

    pub fn target(&self, component: Component) -> Target {
        let endpoint = self.endpoint(component);
        Target {
            component,
            endpoint: Endpoint::new(&endpoint.path, &endpoint.query_param),
            control_id: endpoint.control_id.clone(),
        }
    }
}

/// Forces a leading slash so every endpoint resolves against the site root.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
