use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AppConfig;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `LOG_LEVEL`; `LOG_FORMAT=json` emits JSON lines.
pub fn init(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "installment_pricing={},actix_web=info",
            app.log_level.trim().to_lowercase()
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if app.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
