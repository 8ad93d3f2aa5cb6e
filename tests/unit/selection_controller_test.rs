// State machine tests for the plan selection controller

use installment_pricing::installments::services::{
    DisplayConfig, DisplaySlots, DisplaySurface, OutputSlot, SelectionController, SelectionState,
    PLACEHOLDER,
};
use installment_pricing::{PlanOption, PricingInput};
use proptest::prelude::*;
use rust_decimal_macros::dec;

fn checkout_config() -> DisplayConfig {
    DisplayConfig::new(PricingInput::new(dec!(10000), dec!(9.9), dec!(30), 2), "kr")
}

fn controller() -> SelectionController<DisplaySlots> {
    SelectionController::new(Some(checkout_config()), Some(DisplaySlots::with_total()))
}

/// Surface that records every write in order
#[derive(Default)]
struct EventLog {
    writes: Vec<(OutputSlot, String)>,
}

impl DisplaySurface for EventLog {
    fn publish(&mut self, slot: OutputSlot, text: &str) {
        self.writes.push((slot, text.to_string()));
    }
}

#[test]
fn test_default_selection_renders_thirty_six_months() {
    let mut controller = controller();
    controller.initialize();

    let slots = controller.surface().unwrap();
    assert_eq!(slots.monthly_payment.as_deref(), Some("kr 352.20"));
    assert_eq!(slots.total_credit_cost.as_deref(), Some("kr 2679.20"));
    assert_eq!(slots.total_cost.as_deref(), Some("kr 12679.20"));
}

#[test]
fn test_selection_change_republishes() {
    let mut controller = controller();
    controller.initialize();
    controller.select(PlanOption::SixMonths);

    assert_eq!(controller.state(), SelectionState::Selected(PlanOption::SixMonths));
    let slots = controller.surface().unwrap();
    assert_eq!(slots.monthly_payment.as_deref(), Some("kr 1745.12"));
    assert_eq!(slots.total_credit_cost.as_deref(), Some("kr 470.72"));
}

#[test]
fn test_reselect_is_idempotent() {
    let mut controller = controller();
    controller.initialize();
    controller.select(PlanOption::TwelveMonths);
    let first = controller.surface().cloned().unwrap();

    // Same event delivered twice more
    controller.select(PlanOption::TwelveMonths);
    controller.select(PlanOption::TwelveMonths);
    let again = controller.surface().cloned().unwrap();

    assert_eq!(first.monthly_payment, again.monthly_payment);
    assert_eq!(first.total_credit_cost, again.total_credit_cost);
    assert_eq!(first.total_cost, again.total_cost);
    assert!(again.publish_count() > first.publish_count());
}

#[test]
fn test_unknown_code_matches_six_months() {
    let mut fallback = controller();
    fallback.initialize();
    fallback.select_code("48m");

    let mut six = controller();
    six.initialize();
    six.select_code("6m");

    assert_eq!(fallback.state(), SelectionState::Selected(PlanOption::SixMonths));
    assert_eq!(fallback.render(), six.render());
}

#[test]
fn test_unselected_shows_placeholder_not_zero() {
    let mut controller = controller();
    controller.initialize();
    controller.clear();

    let slots = controller.surface().unwrap();
    for text in [&slots.monthly_payment, &slots.total_credit_cost, &slots.total_cost] {
        assert_eq!(text.as_deref(), Some(PLACEHOLDER));
    }
    assert!(controller.current_estimate().is_none());
}

#[test]
fn test_zero_cost_estimate_is_distinct_from_placeholder() {
    let config = DisplayConfig::new(PricingInput::default(), "kr");
    let mut controller = SelectionController::new(Some(config), Some(DisplaySlots::new()));
    controller.initialize();

    let slots = controller.surface().unwrap();
    assert_eq!(slots.monthly_payment.as_deref(), Some("kr 0.00"));
    assert_eq!(slots.total_credit_cost.as_deref(), Some("kr 0.00"));
}

#[test]
fn test_optional_total_slot_is_skipped() {
    let mut controller =
        SelectionController::new(Some(checkout_config()), Some(EventLog::default()));
    controller.initialize();

    let slots: Vec<OutputSlot> = controller
        .surface()
        .unwrap()
        .writes
        .iter()
        .map(|(slot, _)| *slot)
        .collect();
    assert_eq!(slots, vec![OutputSlot::MonthlyPayment, OutputSlot::TotalCreditCost]);
}

#[test]
fn test_decimals_and_empty_symbol() {
    let config = DisplayConfig::new(PricingInput::new(dec!(10000), dec!(0), dec!(0), 0), "");
    let mut controller = SelectionController::new(Some(config), Some(DisplaySlots::new()))
        .with_selection(PlanOption::SixMonths);
    controller.initialize();

    let slots = controller.surface().unwrap();
    assert_eq!(slots.monthly_payment.as_deref(), Some("1667"));
    assert_eq!(slots.total_credit_cost.as_deref(), Some("2"));
}

#[test]
fn test_rebind_republishes_current_selection() {
    let mut controller = controller();
    controller.initialize();
    controller.select(PlanOption::TwentyFourMonths);

    controller.rebind(DisplaySlots::new());

    let slots = controller.surface().unwrap();
    assert_eq!(slots.monthly_payment.as_deref(), Some("kr 490.99"));
    assert_eq!(slots.total_cost, None);
}

proptest! {
    /// Property: output depends only on the last selection, not on history
    #[test]
    fn prop_output_independent_of_history(
        history in prop::collection::vec(prop::sample::select(PlanOption::ALL.to_vec()), 0..10),
        last in prop::sample::select(PlanOption::ALL.to_vec()),
    ) {
        let mut replayed = controller();
        replayed.initialize();
        for plan in history {
            replayed.select(plan);
        }
        replayed.select(last);

        let mut direct = controller();
        direct.initialize();
        direct.select(last);

        prop_assert_eq!(replayed.render(), direct.render());
        prop_assert_eq!(replayed.state(), SelectionState::Selected(last));
    }
}
