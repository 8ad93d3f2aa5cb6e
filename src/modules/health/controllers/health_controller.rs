use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::modules::installments::controllers::InstallmentState;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub installment_terms: bool,
    pub provider_forwarding: bool,
}

/// GET /health - Liveness probe
pub async fn health_check() -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: env!("CARGO_PKG_NAME").to_string(),
    };

    HttpResponse::Ok().json(response)
}

/// GET /ready - Readiness probe
/// Ready once installment terms are loaded and valid
pub async fn readiness_check(state: Option<web::Data<InstallmentState>>) -> impl Responder {
    let (installment_terms, provider_forwarding) = match state.as_deref() {
        Some(state) => match state.commit.settings().validate() {
            Ok(()) => (true, state.handoff.is_enabled()),
            Err(e) => {
                tracing::error!("Installment terms invalid: {}", e);
                (false, state.handoff.is_enabled())
            }
        },
        None => (false, false),
    };

    let response = ReadinessResponse {
        ready: installment_terms,
        checks: ReadinessChecks {
            installment_terms,
            provider_forwarding,
        },
    };

    if response.ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
