use anyhow::Result;
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::collections::HashSet;
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FRONTEND_ORIGIN: &str = "https://youtube-trends-finder.vercel.app";
pub const DEFAULT_REGION_CODE: &str = "JP";
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 12 hours, in seconds.
const CORS_MAX_AGE: usize = 12 * 60 * 60;

/// How upstream failures are reported to the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamPolicy {
    /// Log the failure and answer 200 with an empty list.
    Lenient,
    /// Answer 502/503 with an error payload.
    Strict,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub youtube_api_key: Option<String>,
    pub port: u16,
    pub frontend_origin: String,
    pub region_code: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub upstream_policy: UpstreamPolicy,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup. Missing or malformed values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let youtube_api_key = lookup("YOUTUBE_API_KEY").filter(|key| !key.trim().is_empty());
        if youtube_api_key.is_none() {
            warn!("YOUTUBE_API_KEY is not set in environment variables");
        }

        let port = match lookup("PORT").filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("Invalid PORT value '{raw}', using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let timeout_secs = lookup("YOUTUBE_TIMEOUT_SECS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let upstream_policy = match lookup("STRICT_UPSTREAM_ERRORS").as_deref() {
            Some("1") | Some("true") | Some("TRUE") | Some("yes") => UpstreamPolicy::Strict,
            _ => UpstreamPolicy::Lenient,
        };

        Settings {
            youtube_api_key,
            port,
            frontend_origin: lookup("FRONTEND_ORIGIN")
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string()),
            region_code: lookup("YOUTUBE_REGION_CODE")
                .unwrap_or_else(|| DEFAULT_REGION_CODE.to_string()),
            api_base_url: lookup("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            upstream_policy,
        }
    }
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
    info!("Starting YouTube trends backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_cors(settings: &Settings) -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[settings.frontend_origin.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Origin", "Content-Type"]))
        .expose_headers(HashSet::from(["Content-Length".to_string()]))
        .max_age(Some(CORS_MAX_AGE))
        .allow_credentials(true)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let settings = settings_from(&[]);
        assert_eq!(settings.youtube_api_key, None);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.frontend_origin, DEFAULT_FRONTEND_ORIGIN);
        assert_eq!(settings.region_code, "JP");
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
        assert_eq!(settings.upstream_policy, UpstreamPolicy::Lenient);
    }

    #[test]
    fn reads_overrides() {
        let settings = settings_from(&[
            ("YOUTUBE_API_KEY", "abc"),
            ("PORT", "3000"),
            ("FRONTEND_ORIGIN", "http://localhost:5173"),
            ("YOUTUBE_REGION_CODE", "US"),
            ("YOUTUBE_TIMEOUT_SECS", "3"),
            ("STRICT_UPSTREAM_ERRORS", "true"),
        ]);
        assert_eq!(settings.youtube_api_key.as_deref(), Some("abc"));
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.frontend_origin, "http://localhost:5173");
        assert_eq!(settings.region_code, "US");
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.upstream_policy, UpstreamPolicy::Strict);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let settings = settings_from(&[("YOUTUBE_API_KEY", "  ")]);
        assert_eq!(settings.youtube_api_key, None);
    }

    #[test]
    fn invalid_port_and_timeout_fall_back() {
        let settings = settings_from(&[("PORT", "http"), ("YOUTUBE_TIMEOUT_SECS", "0")]);
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn cors_builds_for_configured_origin() {
        let settings = settings_from(&[("FRONTEND_ORIGIN", "http://localhost:5173")]);
        assert!(create_cors(&settings).is_ok());
    }
}
