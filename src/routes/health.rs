use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details.into()),
        }
    }

    fn error(details: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details.into()),
        }
    }
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let database = match state.catalog.ping().await {
        Ok(()) => ServiceStatus::ok("Connected successfully to MongoDB"),
        Err(e) => {
            error!("Database health check failed: {}", e);
            ServiceStatus::error(format!("Failed to connect: {}", e))
        }
    };
    health.services.insert("database".to_string(), database);

    health.services.insert(
        "payments".to_string(),
        key_status("Payment gateway key", &state.config.stripe_secret_key, "STRIPE_SECRET_KEY"),
    );
    health.services.insert(
        "ai".to_string(),
        key_status("Gemini API key", &state.config.gemini_api_key, "GEMINI_API_KEY"),
    );

    // Any failing dependency degrades the whole service.
    if health.services.values().any(|s| s.status != "ok") {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn key_status(label: &str, key: &str, variable: &str) -> ServiceStatus {
    if key.is_empty() {
        return ServiceStatus::error(format!("{} not configured", variable));
    }
    ServiceStatus::ok(format!("{} configured ({})", label, mask_key(key)))
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
