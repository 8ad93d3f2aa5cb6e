// End-to-end checkout flow: estimate shown at checkout, then committed order

use actix_web::{test, web, App};
use base64::prelude::*;
use installment_pricing::config::{BasisMode, ForwardMode, InstallmentSettings, ProviderConfig};
use installment_pricing::installments::services::{
    CommitRequest, CommitService, DisplayConfig, DisplaySlots, SelectionController,
};
use installment_pricing::installments::{configure, InstallmentState};
use installment_pricing::PlanOption;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::str::FromStr;

fn settings() -> InstallmentSettings {
    InstallmentSettings {
        annual_rate_percent: dec!(12.5),
        monthly_fee: dec!(29),
        currency_symbol: "kr".to_string(),
        ..InstallmentSettings::default()
    }
}

/// The committed figures must be the ones the customer saw
#[core::prelude::v1::test]
fn test_displayed_estimate_matches_commit_for_every_plan() {
    let service = CommitService::new(settings());

    for order_total in [dec!(9000.01), dec!(10000), dec!(24999.95), dec!(187650.40)] {
        for plan in PlanOption::ALL {
            let config = DisplayConfig::new(
                service.settings().pricing_input(order_total),
                service.settings().currency_symbol.clone(),
            );
            let mut controller =
                SelectionController::new(Some(config), Some(DisplaySlots::with_total()));
            controller.initialize();
            controller.select(plan);
            let shown = controller.current_estimate().unwrap();

            let committed = service
                .commit(&CommitRequest {
                    plan_code: plan.code().to_string(),
                    terms_accepted: true,
                    order_total,
                    basis: None,
                })
                .unwrap();

            assert_eq!(committed.monthly_amount, shown.monthly_payment, "{} {}", order_total, plan);
            assert_eq!(committed.total_credit_cost, shown.total_credit_cost, "{} {}", order_total, plan);
            assert_eq!(committed.total_cost, shown.total_cost, "{} {}", order_total, plan);
        }
    }
}

/// Display tolerates unknown codes, commit does not
#[core::prelude::v1::test]
fn test_fallback_asymmetry_between_display_and_commit() {
    let service = CommitService::new(settings());
    let config = DisplayConfig::new(service.settings().pricing_input(dec!(10000)), "kr");

    let mut controller = SelectionController::new(Some(config), Some(DisplaySlots::new()));
    controller.initialize();
    controller.select_code("18m");
    assert!(controller.current_estimate().is_some());

    let rejected = service.commit(&CommitRequest {
        plan_code: "18m".to_string(),
        terms_accepted: true,
        order_total: dec!(10000),
        basis: None,
    });
    assert!(rejected.is_err());
}

/// Forwarding on: the commit response carries a signed provider handoff
#[actix_web::test]
async fn test_commit_with_provider_handoff() {
    let provider = ProviderConfig {
        forward_mode: ForwardMode::Post,
        provider_url: "https://pay.example.com/checkout".to_string(),
        api_key: "merchant-1".to_string(),
        api_secret: "s3cret".to_string(),
        send_customer: false,
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(InstallmentState::new(settings(), provider)))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/v1/installments/commit")
        .set_json(json!({
            "order_id": "2001",
            "order_total": "15000.50",
            "plan_code": "24m",
            "terms_accepted": true,
            "currency": "NOK",
            "customer": {
                "email": "ola@example.com",
                "name": "Ola Nordmann",
                "phone": "+4798765432"
            },
            "return_urls": {
                "success": "https://shop.example.com/thanks",
                "cancel": "https://shop.example.com/checkout",
                "callback": "https://shop.example.com/callback"
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let handoff = &body["handoff"];
    assert_eq!(handoff["action"], json!("https://pay.example.com/checkout"));
    assert_eq!(handoff["signature"].as_str().unwrap().len(), 64);

    let payload_json = BASE64_STANDARD
        .decode(handoff["payload"].as_str().unwrap())
        .unwrap();
    let payload: Value = serde_json::from_slice(&payload_json).unwrap();

    assert_eq!(payload["merchant_key"], json!("merchant-1"));
    assert_eq!(payload["order_id"], json!("2001"));
    assert_eq!(payload["amount"], json!(1500050));
    assert_eq!(payload["plan_id"], json!("24m"));
    assert_eq!(payload["calc"]["months"], json!(24));
    assert_eq!(
        payload["calc"]["monthly"],
        body["commitment"]["monthly_amount"]
    );
    assert!(payload.get("customer").is_none());

    let basis = Decimal::from_str(payload["calc"]["basis"].as_str().unwrap()).unwrap();
    assert_eq!(basis, dec!(15000.50));
}

/// Forwarding on without return URLs is a client error
#[actix_web::test]
async fn test_commit_forwarding_requires_return_urls() {
    let provider = ProviderConfig {
        forward_mode: ForwardMode::Post,
        provider_url: "https://pay.example.com/checkout".to_string(),
        api_key: "merchant-1".to_string(),
        ..ProviderConfig::default()
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(InstallmentState::new(settings(), provider)))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/v1/installments/commit")
        .set_json(json!({
            "order_id": "2002",
            "order_total": "15000",
            "plan_code": "6m",
            "terms_accepted": true,
            "currency": "NOK"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

/// An order total too large for minor units is rejected, not a crash
#[actix_web::test]
async fn test_commit_with_oversized_total_is_client_error() {
    let provider = ProviderConfig {
        forward_mode: ForwardMode::Post,
        provider_url: "https://pay.example.com/checkout".to_string(),
        api_key: "merchant-1".to_string(),
        api_secret: "s3cret".to_string(),
        send_customer: false,
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(InstallmentState::new(settings(), provider)))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/v1/installments/commit")
        .set_json(json!({
            "order_id": "2003",
            "order_total": "1000000000000000000000000000",
            "basis": "10000",
            "plan_code": "12m",
            "terms_accepted": true,
            "currency": "NOK",
            "return_urls": {
                "success": "https://shop.example.com/thanks",
                "cancel": "https://shop.example.com/checkout",
                "callback": "https://shop.example.com/callback"
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("out of range"));
}

/// With a fixed basis the committed figures follow the quoted ones
#[actix_web::test]
async fn test_fixed_basis_quote_matches_commit() {
    let fixed = InstallmentSettings {
        basis_mode: BasisMode::Fixed,
        basis_fixed: Some(dec!(15000)),
        ..settings()
    };
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(InstallmentState::new(
                fixed,
                ProviderConfig::default(),
            )))
            .configure(configure),
    )
    .await;

    let quote = test::TestRequest::post()
        .uri("/v1/installments/quote")
        .set_json(json!({ "basis": "12000", "plan_code": "24m" }))
        .to_request();
    let quote: Value = test::call_and_read_body_json(&app, quote).await;

    let commit = test::TestRequest::post()
        .uri("/v1/installments/commit")
        .set_json(json!({
            "order_id": "2004",
            "order_total": "12000",
            "plan_code": "24m",
            "terms_accepted": true,
            "currency": "NOK"
        }))
        .to_request();
    let commit: Value = test::call_and_read_body_json(&app, commit).await;

    let amount = |value: &Value| Decimal::from_str(value.as_str().unwrap()).unwrap();
    assert_eq!(amount(&quote["basis"]), dec!(15000));
    assert_eq!(amount(&commit["commitment"]["basis_total"]), dec!(15000));
    assert_eq!(
        amount(&commit["commitment"]["monthly_amount"]),
        amount(&quote["estimate"]["monthly_payment"])
    );
    assert_eq!(
        amount(&commit["commitment"]["total_cost"]),
        amount(&quote["estimate"]["total_cost"])
    );
}
