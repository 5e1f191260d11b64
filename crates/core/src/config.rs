//! API configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! the client services. The intent is to avoid reading process-wide
//! environment variables during operation, which leads to inconsistent
//! behaviour in multi-threaded runtimes and test harnesses.

use serde::{Deserialize, Serialize};

/// Environment variable selecting the deployment environment.
pub const ENV_ENVIRONMENT: &str = "CLINIDENT_ENV";
/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "CLINIDENT_API_URL";

/// Errors raised while resolving the API configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("unknown environment '{0}' (expected 'development' or 'production')")]
    UnknownEnvironment(String),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Deployment environment selecting the default API base URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Base URL used when no explicit override is given.
    pub fn default_base_url(self) -> &'static str {
        match self {
            Environment::Development => "http://localhost:8082",
            Environment::Production => "http://localhost:8080",
        }
    }

    fn parse(value: &str) -> ConfigResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::UnknownEnvironment(other.to_owned())),
        }
    }
}

/// Every resource path the remote API serves.
///
/// The paths are fixed by the server; keeping them in one table means a
/// renamed endpoint is a one-line change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Productos,
    Pacientes,
    Medicos,
    FichasMedicas,
    Proformas,
    Citas,
    DetallesProforma,
    Cobranzas,
    Cuentas,
    Categorias,
    Usuarios,
    Roles,
    Bancos,
}

impl Endpoint {
    /// The path of this endpoint relative to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "/api",
            Endpoint::Productos => "/api/productos",
            Endpoint::Pacientes => "/api/pacientes",
            Endpoint::Medicos => "/api/medicos",
            Endpoint::FichasMedicas => "/api/fichas-medicas",
            Endpoint::Proformas => "/api/proformas",
            Endpoint::Citas => "/api/citas",
            Endpoint::DetallesProforma => "/api/detalles-proforma",
            Endpoint::Cobranzas => "/api/cobranzas",
            Endpoint::Cuentas => "/api/cuentas",
            Endpoint::Categorias => "/api/categorias",
            Endpoint::Usuarios => "/api/usuarios",
            Endpoint::Roles => "/api/roles",
            Endpoint::Bancos => "/api/bancos",
        }
    }
}

/// API configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    environment: Environment,
    base_url: String,
}

impl ApiConfig {
    /// Create a configuration for `environment`, with an optional explicit
    /// base URL override. Trailing slashes are stripped so endpoint paths
    /// concatenate cleanly.
    pub fn new(environment: Environment, base_url: Option<String>) -> ConfigResult<Self> {
        let raw = base_url.unwrap_or_else(|| environment.default_base_url().to_owned());
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidBaseUrl(raw));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(raw));
        }
        Ok(Self {
            environment,
            base_url: trimmed.to_owned(),
        })
    }

    /// Resolve the configuration from `CLINIDENT_ENV` / `CLINIDENT_API_URL`,
    /// defaulting to the development environment.
    pub fn from_env() -> ConfigResult<Self> {
        let environment = match std::env::var(ENV_ENVIRONMENT) {
            Ok(value) => Environment::parse(&value)?,
            Err(_) => Environment::Development,
        };
        let base_url = std::env::var(ENV_BASE_URL).ok();
        Self::new(environment, base_url)
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a collection endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Full URL of a single resource under an endpoint.
    pub fn resource_url(&self, endpoint: Endpoint, id: i64) -> String {
        format!("{}{}/{}", self.base_url, endpoint.path(), id)
    }

    /// Full URL of a relationship sub-path, e.g. proformas by patient.
    pub fn subpath_url(&self, endpoint: Endpoint, subpath: &str) -> String {
        format!("{}{}/{}", self.base_url, endpoint.path(), subpath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoint_urls_from_base() {
        let cfg = ApiConfig::new(Environment::Development, None).expect("valid config");
        assert_eq!(cfg.url(Endpoint::Pacientes), "http://localhost:8082/api/pacientes");
        assert_eq!(
            cfg.resource_url(Endpoint::Medicos, 3),
            "http://localhost:8082/api/medicos/3"
        );
        assert_eq!(
            cfg.subpath_url(Endpoint::Proformas, "paciente/7"),
            "http://localhost:8082/api/proformas/paciente/7"
        );
    }

    #[test]
    fn strips_trailing_slash_from_override() {
        let cfg = ApiConfig::new(
            Environment::Production,
            Some("https://clinica.example.com/".into()),
        )
        .expect("valid config");
        assert_eq!(cfg.url(Endpoint::Bancos), "https://clinica.example.com/api/bancos");
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(ApiConfig::new(Environment::Development, Some("ftp://x".into())).is_err());
        assert!(ApiConfig::new(Environment::Development, Some("   ".into())).is_err());
    }

    #[test]
    fn parses_environment_aliases() {
        assert_eq!(Environment::parse("dev").unwrap(), Environment::Development);
        assert_eq!(Environment::parse("PRODUCTION").unwrap(), Environment::Production);
        assert!(Environment::parse("staging").is_err());
    }
}
