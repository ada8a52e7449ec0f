use std::{env, str::FromStr, time::Duration};

use thiserror::Error;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const DATABASE: &str = "Travel";
const CURRENCY: &str = "INR";
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const AI_TIMEOUT_SECS: u64 = 60;
/// Longest trip the itinerary generator is asked to plan.
pub const MAX_TRIP_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    pub jwt_secret: String,
    pub stripe_secret_key: String,
    pub stripe_publishable_key: String,
    pub payment_currency: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub ai_timeout: Duration,
    pub max_trip_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            mongodb_uri: String::new(),
            mongodb_database: DATABASE.to_string(),
            jwt_secret: "default_secret".to_string(),
            stripe_secret_key: String::new(),
            stripe_publishable_key: String::new(),
            payment_currency: CURRENCY.to_string(),
            gemini_api_key: String::new(),
            gemini_model: GEMINI_MODEL.to_string(),
            ai_timeout: Duration::from_secs(AI_TIMEOUT_SECS),
            max_trip_days: MAX_TRIP_DAYS,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. `.env` loading is left to the caller.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let mongodb_uri = env::var("MONGODB_URI")
            .ok()
            .filter(|uri| !uri.is_empty())
            .ok_or(ConfigError::Missing("MONGODB_URI"))?;

        let ai_timeout_secs: u64 = parse_var("AI_TIMEOUT_SECS", AI_TIMEOUT_SECS)?;
        if ai_timeout_secs < 1 {
            return Err(ConfigError::Invalid {
                name: "AI_TIMEOUT_SECS",
                value: ai_timeout_secs.to_string(),
            });
        }
        let max_trip_days: i64 = parse_var("MAX_TRIP_DAYS", MAX_TRIP_DAYS)?;
        if max_trip_days < 1 {
            return Err(ConfigError::Invalid {
                name: "MAX_TRIP_DAYS",
                value: max_trip_days.to_string(),
            });
        }

        Ok(Self {
            host: var_or("HOST", defaults.host),
            port: parse_var("PORT", PORT)?,
            mongodb_uri,
            mongodb_database: var_or("MONGODB_DATABASE", defaults.mongodb_database),
            jwt_secret: var_or("JWT_SECRET", defaults.jwt_secret),
            stripe_secret_key: var_or("STRIPE_SECRET_KEY", defaults.stripe_secret_key),
            stripe_publishable_key: var_or(
                "STRIPE_PUBLISHABLE_KEY",
                defaults.stripe_publishable_key,
            ),
            payment_currency: var_or("PAYMENT_CURRENCY", defaults.payment_currency),
            gemini_api_key: var_or("GEMINI_API_KEY", defaults.gemini_api_key),
            gemini_model: var_or("GEMINI_MODEL", defaults.gemini_model),
            ai_timeout: Duration::from_secs(ai_timeout_secs),
            max_trip_days,
        })
    }
}

fn var_or(name: &str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
