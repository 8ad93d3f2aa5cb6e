use serde::Serialize;
use tracing::{debug, info};

use crate::core::money::format_amount;
use crate::modules::installments::models::{PlanOption, PricingInput, PricingResult};
use crate::modules::installments::services::PricingEngine;

/// Shown in every slot while no plan is selected
pub const PLACEHOLDER: &str = "—";

/// Named presentation targets the controller writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputSlot {
    MonthlyPayment,
    TotalCreditCost,
    TotalCost,
}

/// Where formatted estimates are published (checkout widget, API response, ...)
pub trait DisplaySurface {
    fn publish(&mut self, slot: OutputSlot, text: &str);

    /// The grand total slot is optional on most surfaces
    fn has_slot(&self, slot: OutputSlot) -> bool {
        slot != OutputSlot::TotalCost
    }
}

/// Configuration handed over once per checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub input: PricingInput,
    pub currency_symbol: String,
}

impl DisplayConfig {
    pub fn new(input: PricingInput, currency_symbol: impl Into<String>) -> Self {
        Self {
            input,
            currency_symbol: currency_symbol.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(PlanOption),
}

impl SelectionState {
    pub fn plan(&self) -> Option<PlanOption> {
        match self {
            Self::Unselected => None,
            Self::Selected(plan) => Some(*plan),
        }
    }
}

/// Formatted text for each slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayText {
    pub monthly_payment: String,
    pub total_credit_cost: String,
    pub total_cost: String,
}

impl DisplayText {
    pub fn placeholder() -> Self {
        Self {
            monthly_payment: PLACEHOLDER.to_string(),
            total_credit_cost: PLACEHOLDER.to_string(),
            total_cost: PLACEHOLDER.to_string(),
        }
    }

    pub fn from_result(result: &PricingResult, currency_symbol: &str, decimal_places: u32) -> Self {
        Self {
            monthly_payment: format_amount(currency_symbol, result.monthly_payment, decimal_places),
            total_credit_cost: format_amount(
                currency_symbol,
                result.total_credit_cost,
                decimal_places,
            ),
            total_cost: format_amount(currency_symbol, result.total_cost, decimal_places),
        }
    }

    fn get(&self, slot: OutputSlot) -> &str {
        match slot {
            OutputSlot::MonthlyPayment => &self.monthly_payment,
            OutputSlot::TotalCreditCost => &self.total_credit_cost,
            OutputSlot::TotalCost => &self.total_cost,
        }
    }
}

/// Keeps the displayed estimate in step with the customer's plan choice.
///
/// Owns the only mutable state in the pricing flow. Every transition into a
/// selected plan recomputes from scratch and overwrites the surface, so
/// duplicate or repeated events are harmless. Without a configuration or a
/// surface the controller still tracks the selection but publishes nothing.
pub struct SelectionController<S: DisplaySurface> {
    config: Option<DisplayConfig>,
    surface: Option<S>,
    state: SelectionState,
    initialized: bool,
}

impl<S: DisplaySurface> SelectionController<S> {
    pub fn new(config: Option<DisplayConfig>, surface: Option<S>) -> Self {
        Self {
            config,
            surface,
            state: SelectionState::Unselected,
            initialized: false,
        }
    }

    /// Seeds a selection supplied by the caller before initialization
    pub fn with_selection(mut self, plan: PlanOption) -> Self {
        self.state = SelectionState::Selected(plan);
        self
    }

    /// Applies the default plan (unless one is already selected) and renders.
    ///
    /// Runs once per controller; later calls return `false` and change nothing.
    pub fn initialize(&mut self) -> bool {
        if self.initialized {
            debug!("Selection controller already initialized, skipping");
            return false;
        }

        if self.state == SelectionState::Unselected {
            debug!(plan = %PlanOption::DEFAULT, "Applying default plan selection");
            self.state = SelectionState::Selected(PlanOption::DEFAULT);
        }

        self.initialized = true;
        self.publish();

        info!(
            plan = ?self.state.plan().map(|p| p.code()),
            surface_bound = self.surface.is_some(),
            configured = self.config.is_some(),
            "Selection controller initialized"
        );
        true
    }

    /// Handles a plan selection event
    pub fn select(&mut self, plan: PlanOption) {
        if self.state == SelectionState::Selected(plan) {
            debug!(plan = %plan, "Plan reselected, recomputing");
        } else {
            debug!(from = ?self.state.plan().map(|p| p.code()), to = %plan, "Plan selection changed");
        }

        self.state = SelectionState::Selected(plan);
        self.publish();
    }

    /// Handles a selection event carrying a raw plan code (unknown codes fall back to 6m)
    pub fn select_code(&mut self, code: &str) {
        self.select(PlanOption::resolve_for_display(code));
    }

    /// Drops the selection and shows placeholders
    pub fn clear(&mut self) {
        debug!("Plan selection cleared");
        self.state = SelectionState::Unselected;
        self.publish();
    }

    /// Replaces the display surface and republishes the current state to it
    pub fn rebind(&mut self, surface: S) {
        debug!(plan = ?self.state.plan().map(|p| p.code()), "Rebinding display surface");
        self.surface = Some(surface);
        if self.initialized {
            self.publish();
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Priced figures for the current selection
    pub fn current_estimate(&self) -> Option<PricingResult> {
        let config = self.config.as_ref()?;
        let plan = self.state.plan()?;
        Some(PricingEngine::price_plan(&config.input, plan))
    }

    /// Formatted text for the current state, or `None` when not configured
    pub fn render(&self) -> Option<DisplayText> {
        let config = self.config.as_ref()?;

        let text = match self.current_estimate() {
            Some(result) => DisplayText::from_result(
                &result,
                &config.currency_symbol,
                config.input.decimal_places,
            ),
            None => DisplayText::placeholder(),
        };

        Some(text)
    }

    fn publish(&mut self) {
        let Some(text) = self.render() else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        for slot in [
            OutputSlot::MonthlyPayment,
            OutputSlot::TotalCreditCost,
            OutputSlot::TotalCost,
        ] {
            if surface.has_slot(slot) {
                surface.publish(slot, text.get(slot));
            }
        }

        debug!(
            monthly = %text.monthly_payment,
            credit = %text.total_credit_cost,
            "Published installment estimate"
        );
    }
}

/// In-memory surface holding the last text published to each slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySlots {
    pub monthly_payment: Option<String>,
    pub total_credit_cost: Option<String>,
    pub total_cost: Option<String>,
    show_total: bool,
    publish_count: usize,
}

impl DisplaySlots {
    /// Monthly payment and credit cost only
    pub fn new() -> Self {
        Self::default()
    }

    /// Also carries the grand total slot
    pub fn with_total() -> Self {
        Self {
            show_total: true,
            ..Self::default()
        }
    }

    /// Number of individual slot writes received
    pub fn publish_count(&self) -> usize {
        self.publish_count
    }
}

impl DisplaySurface for DisplaySlots {
    fn publish(&mut self, slot: OutputSlot, text: &str) {
        let target = match slot {
            OutputSlot::MonthlyPayment => &mut self.monthly_payment,
            OutputSlot::TotalCreditCost => &mut self.total_credit_cost,
            OutputSlot::TotalCost => &mut self.total_cost,
        };
        *target = Some(text.to_string());
        self.publish_count += 1;
    }

    fn has_slot(&self, slot: OutputSlot) -> bool {
        slot != OutputSlot::TotalCost || self.show_total
    }
}
