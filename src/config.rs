//! Runtime configuration.
//!
//! Every flag falls back to an environment variable; `.env` files are loaded
//! by the binary before parsing.

use axum::http::{HeaderValue, Method};
use clap::Parser;
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::ledger::DEFAULT_SEED;

const LOCAL_ORIGINS: &[&str] = &["http://localhost:8080", "http://localhost:3000"];

#[derive(Parser, Debug, Clone)]
#[command(name = "quack")]
#[command(about = "Quack API - synthetic vault, governance and agent data for the Solana AI Hedge Syndicate frontend")]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "QUACK_BIND_ADDR", default_value = "0.0.0.0")]
    pub bind: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Seed for the synthetic ledger
    #[arg(long, env = "QUACK_LEDGER_SEED", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Deployment host, allowed as an https origin
    #[arg(long, env = "VERCEL_URL")]
    pub vercel_url: Option<String>,

    /// Set on Vercel deployments; opens CORS to any origin
    #[arg(long, env = "VERCEL")]
    pub vercel: Option<String>,

    /// Deployment environment; `production` opens CORS to any origin
    #[arg(long, env = "ENVIRONMENT", default_value = "development")]
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            seed: DEFAULT_SEED,
            vercel_url: None,
            vercel: None,
            environment: "development".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl ServerConfig {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn cors_origins(&self) -> CorsOrigins {
        let on_vercel = self
            .vercel
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty());
        if on_vercel || self.environment.eq_ignore_ascii_case("production") {
            return CorsOrigins::Any;
        }

        let mut origins: Vec<String> = LOCAL_ORIGINS.iter().map(|s| s.to_string()).collect();
        if let Some(host) = self.vercel_url.as_deref().map(str::trim) {
            if !host.is_empty() {
                origins.push(format!("https://{host}"));
            }
        }
        CorsOrigins::List(origins)
    }

    /// Wildcard origins cannot carry credentials, so only the explicit list allows them.
    pub fn cors_layer(&self) -> CorsLayer {
        match self.cors_origins() {
            CorsOrigins::Any => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
            CorsOrigins::List(origins) => {
                let values: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|o| match HeaderValue::from_str(o) {
                        Ok(v) => Some(v),
                        Err(e) => {
                            warn!(origin = %o, error = %e, "Skipping invalid CORS origin");
                            None
                        }
                    })
                    .collect();
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(values))
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers(AllowHeaders::mirror_request())
                    .allow_credentials(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_origins_by_default() {
        let cfg = ServerConfig::default();
        assert_eq!(
            cfg.cors_origins(),
            CorsOrigins::List(vec![
                "http://localhost:8080".to_string(),
                "http://localhost:3000".to_string(),
            ])
        );
    }

    #[test]
    fn test_vercel_url_is_appended() {
        let cfg = ServerConfig {
            vercel_url: Some("quack.vercel.app".to_string()),
            ..ServerConfig::default()
        };
        match cfg.cors_origins() {
            CorsOrigins::List(list) => {
                assert_eq!(list.last().unwrap(), "https://quack.vercel.app")
            }
            CorsOrigins::Any => panic!("expected explicit origins"),
        }
    }

    #[test]
    fn test_production_allows_any_origin() {
        let prod = ServerConfig {
            environment: "production".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(prod.cors_origins(), CorsOrigins::Any);

        let vercel = ServerConfig {
            vercel: Some("1".to_string()),
            ..ServerConfig::default()
        };
        assert_eq!(vercel.cors_origins(), CorsOrigins::Any);
    }

    #[test]
    fn test_parse_flags() {
        let cfg = ServerConfig::try_parse_from(["quack", "--port", "9001", "--seed", "7"])
            .expect("flags parse");
        assert_eq!(cfg.port, 9001);
        assert_eq!(cfg.seed, 7);
        assert!(cfg.listen_addr().ends_with(":9001"));
    }
}
