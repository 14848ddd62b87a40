use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Drop and rebuild the drinks table on startup. Development
    /// convenience only; off unless DATABASE_RECREATE=true.
    pub recreate_on_start: bool,
}

/// Identity provider settings. Tokens are verified against the tenant's
/// JWKS endpoint, so only the domain and expected audience are needed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub domain: String,
    pub audience: String,
}

impl AuthConfig {
    /// Expected `iss` claim, e.g. `https://tenant.auth.example.com/`
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn jwks_url(&self) -> String {
        format!("https://{}/.well-known/jwks.json", self.domain)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_RECREATE") {
            self.database.recreate_on_start = v.parse().unwrap_or(self.database.recreate_on_start);
        }

        // Identity provider overrides
        if let Ok(v) = env::var("AUTH_DOMAIN") {
            self.auth.domain = v;
        }
        if let Ok(v) = env::var("AUTH_AUDIENCE") {
            self.auth.audience = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "sqlite://drinks.db".to_string(),
                max_connections: 5,
                recreate_on_start: false,
            },
            auth: AuthConfig {
                domain: "dev-drinks.us.auth0.com".to_string(),
                audience: "drinks".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "sqlite:///var/lib/drinks-api/drinks.db".to_string(),
                max_connections: 10,
                recreate_on_start: false,
            },
            auth: AuthConfig {
                domain: "staging-drinks.us.auth0.com".to_string(),
                audience: "drinks".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "sqlite:///var/lib/drinks-api/drinks.db".to_string(),
                max_connections: 20,
                recreate_on_start: false,
            },
            auth: AuthConfig {
                domain: "drinks.us.auth0.com".to_string(),
                audience: "drinks".to_string(),
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
