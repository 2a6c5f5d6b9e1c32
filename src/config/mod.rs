use once_cell::sync::Lazy;
use std::env;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the portal backend. Every endpoint is joined onto this,
    /// so a bare host with no trailing path is expected.
    pub base_url: Url,
    pub request_logging: bool,
}

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CAMPUS_API_URL") {
            match Url::parse(&v) {
                Ok(url) => self.api.base_url = url,
                Err(err) => {
                    tracing::warn!("ignoring unparseable CAMPUS_API_URL '{}': {}", v, err)
                }
            }
        }
        if let Ok(v) = env::var("CAMPUS_API_REQUEST_LOGGING") {
            self.api.request_logging = v.parse().unwrap_or(self.api.request_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL"),
                request_logging: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL"),
                request_logging: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
