use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use installment_pricing::config::Config;
use installment_pricing::logging;
use installment_pricing::modules::{health, installments};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    logging::init(&config.app);

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting installment pricing service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!(
        apr_percent = %config.installments.annual_rate_percent,
        monthly_fee = %config.installments.monthly_fee,
        min_total = %config.installments.min_total,
        decimals = config.installments.decimal_places,
        forwarding = config.provider.forwarding_enabled(),
        "Installment terms loaded"
    );

    let state = web::Data::new(installments::InstallmentState::new(
        config.installments.clone(),
        config.provider.clone(),
    ));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(health::configure)
            .configure(installments::configure)
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("HTTP server error")
}
