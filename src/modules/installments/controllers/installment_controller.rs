// HTTP handlers for installment pricing
//
// Endpoints:
// - GET  /v1/installments/plans  - Price every plan for a basis
// - POST /v1/installments/quote  - Display estimate for one selection
// - POST /v1/installments/commit - Authoritative recomputation at order finalization

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{InstallmentSettings, ProviderConfig};
use crate::core::{AppError, Result};
use crate::modules::installments::models::{InstallmentCommitment, PlanOption, PricingResult};
use crate::modules::installments::services::{
    CommitRequest, CommitService, DisplayConfig, DisplaySlots, DisplayText, HandoffBuilder,
    HandoffCustomer, HandoffOrder, PricingEngine, ReturnUrls, SelectionController, SignedHandoff,
};

/// Shared, read-only installment configuration for the handlers
pub struct InstallmentState {
    pub commit: CommitService,
    pub handoff: HandoffBuilder,
}

impl InstallmentState {
    pub fn new(settings: InstallmentSettings, provider: ProviderConfig) -> Self {
        Self {
            commit: CommitService::new(settings),
            handoff: HandoffBuilder::new(provider),
        }
    }

    fn settings(&self) -> &InstallmentSettings {
        self.commit.settings()
    }

    fn display_config(&self, basis: Decimal) -> DisplayConfig {
        let settings = self.settings();
        DisplayConfig::new(
            settings.pricing_input(basis),
            settings.currency_symbol.clone(),
        )
    }
}

/// Query for GET /v1/installments/plans
#[derive(Debug, Deserialize)]
pub struct PlansQuery {
    /// Cart total; ignored when a fixed basis is configured
    #[serde(default)]
    pub basis: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: PlanOption,
    pub months: u32,
    pub label: &'static str,
    #[serde(flatten)]
    pub result: PricingResult,
    pub display: DisplayText,
}

#[derive(Debug, Serialize)]
pub struct PlansResponse {
    pub basis: Decimal,
    pub available: bool,
    pub annual_rate_percent: Decimal,
    pub monthly_fee: Decimal,
    pub default_plan: PlanOption,
    pub plans: Vec<PlanResponse>,
}

/// Request for POST /v1/installments/quote
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub basis: Option<Decimal>,
    /// Selected plan code; absent means the default plan
    #[serde(default)]
    pub plan_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub basis: Decimal,
    pub plan: Option<PlanOption>,
    pub months: Option<u32>,
    pub estimate: Option<PricingResult>,
    pub display: DisplayText,
}

/// Request for POST /v1/installments/commit
#[derive(Debug, Deserialize)]
pub struct CommitOrderRequest {
    pub order_id: String,
    pub order_total: Decimal,
    #[serde(default)]
    pub basis: Option<Decimal>,
    pub plan_code: String,
    #[serde(default)]
    pub terms_accepted: bool,
    pub currency: String,
    #[serde(default)]
    pub customer: Option<HandoffCustomer>,
    #[serde(default)]
    pub return_urls: Option<ReturnUrls>,
}

#[derive(Debug, Serialize)]
pub struct CommitOrderResponse {
    pub order_id: String,
    pub commitment: InstallmentCommitment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handoff: Option<SignedHandoff>,
}

/// GET /v1/installments/plans
///
/// Prices all four plans for the context basis.
pub async fn list_plans(
    query: web::Query<PlansQuery>,
    state: web::Data<InstallmentState>,
) -> Result<HttpResponse> {
    let settings = state.settings();
    let basis = settings.context_basis(query.basis.unwrap_or(Decimal::ZERO));
    let config = state.display_config(basis);

    let plans = PricingEngine::quote_all(&config.input)
        .into_iter()
        .map(|quote| PlanResponse {
            plan: quote.plan,
            months: quote.months,
            label: quote.label,
            result: quote.result,
            display: DisplayText::from_result(
                &quote.result,
                &config.currency_symbol,
                config.input.decimal_places,
            ),
        })
        .collect();

    Ok(HttpResponse::Ok().json(PlansResponse {
        basis: config.input.principal,
        available: settings.is_available_for(basis),
        annual_rate_percent: config.input.annual_rate_percent,
        monthly_fee: config.input.monthly_fee,
        default_plan: PlanOption::DEFAULT,
        plans,
    }))
}

/// POST /v1/installments/quote
///
/// Runs the same selection flow as the checkout widget: the default plan
/// when none is given, lenient resolution of unknown codes.
pub async fn quote(
    request: web::Json<QuoteRequest>,
    state: web::Data<InstallmentState>,
) -> Result<HttpResponse> {
    let basis = state
        .settings()
        .context_basis(request.basis.unwrap_or(Decimal::ZERO));

    let mut controller =
        SelectionController::new(Some(state.display_config(basis)), Some(DisplaySlots::with_total()));
    controller.initialize();
    if let Some(code) = request.plan_code.as_deref() {
        controller.select_code(code);
    }

    let plan = controller.state().plan();
    let display = controller
        .render()
        .ok_or_else(|| AppError::internal("Quote rendered without configuration"))?;

    Ok(HttpResponse::Ok().json(QuoteResponse {
        basis,
        plan,
        months: plan.map(|p| p.months()),
        estimate: controller.current_estimate(),
        display,
    }))
}

/// POST /v1/installments/commit
///
/// Recomputes the figures server-side; client-side estimates are never trusted.
///
/// # Returns
/// - 200: Commitment record (and provider handoff when forwarding is on)
/// - 400: Unknown plan code or terms not accepted
/// - 422: Installments not available for this basis
pub async fn commit(
    request: web::Json<CommitOrderRequest>,
    state: web::Data<InstallmentState>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    let commitment = state.commit.commit(&CommitRequest {
        plan_code: request.plan_code.clone(),
        terms_accepted: request.terms_accepted,
        order_total: request.order_total,
        basis: request.basis,
    })?;

    let handoff = match request.return_urls {
        Some(return_urls) => {
            let order = HandoffOrder {
                order_id: request.order_id.clone(),
                order_total: request.order_total,
                currency: request.currency,
                decimal_places: state.settings().decimal_places,
                customer: request.customer,
                return_urls,
            };
            state.handoff.prepare(&order, &commitment)?
        }
        None if state.handoff.is_enabled() => {
            return Err(AppError::validation(
                "return_urls are required when provider forwarding is enabled",
            ))
        }
        None => None,
    };

    Ok(HttpResponse::Ok().json(CommitOrderResponse {
        order_id: request.order_id,
        commitment,
        handoff,
    }))
}

/// Configure installment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/installments")
            .route("/plans", web::get().to(list_plans))
            .route("/quote", web::post().to(quote))
            .route("/commit", web::post().to(commit)),
    );
}
