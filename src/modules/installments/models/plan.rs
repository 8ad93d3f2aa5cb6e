use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::AppError;

/// Installment plan durations offered at checkout
///
/// Only these four durations exist. Codes travel as `"6m"`, `"12m"`, `"24m"`
/// and `"36m"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PlanOption {
    SixMonths,
    TwelveMonths,
    TwentyFourMonths,
    ThirtySixMonths,
}

impl PlanOption {
    /// All plans, shortest first
    pub const ALL: [PlanOption; 4] = [
        PlanOption::SixMonths,
        PlanOption::TwelveMonths,
        PlanOption::TwentyFourMonths,
        PlanOption::ThirtySixMonths,
    ];

    /// Plan pre-selected before the first render
    pub const DEFAULT: PlanOption = PlanOption::ThirtySixMonths;

    /// Plan used when the display layer receives an unknown code
    pub const DISPLAY_FALLBACK: PlanOption = PlanOption::SixMonths;

    pub fn months(&self) -> u32 {
        match self {
            Self::SixMonths => 6,
            Self::TwelveMonths => 12,
            Self::TwentyFourMonths => 24,
            Self::ThirtySixMonths => 36,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::SixMonths => "6m",
            Self::TwelveMonths => "12m",
            Self::TwentyFourMonths => "24m",
            Self::ThirtySixMonths => "36m",
        }
    }

    /// Human-readable label shown at checkout and stored on the order
    pub fn label(&self) -> &'static str {
        match self {
            Self::SixMonths => "6 months",
            Self::TwelveMonths => "12 months (1 year)",
            Self::TwentyFourMonths => "24 months (2 years)",
            Self::ThirtySixMonths => "36 months (3 years)",
        }
    }

    pub fn from_months(months: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|plan| plan.months() == months)
    }

    /// Strict lookup used by the commit path.
    ///
    /// Surrounding whitespace is ignored, as form input arrives sanitized that
    /// way; any other deviation from a known code is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|plan| plan.code() == code.trim())
    }

    /// Lenient lookup used by the display layer.
    ///
    /// Unknown codes resolve to [`PlanOption::DISPLAY_FALLBACK`] so an estimate is
    /// always shown. Commit never goes through here.
    pub fn resolve_for_display(code: &str) -> Self {
        match Self::from_code(code) {
            Some(plan) => plan,
            None => {
                tracing::warn!(
                    plan_code = %code,
                    fallback = Self::DISPLAY_FALLBACK.code(),
                    "Unrecognized plan code at display time, using fallback"
                );
                Self::DISPLAY_FALLBACK
            }
        }
    }
}

impl Default for PlanOption {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PlanOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for PlanOption {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            AppError::invalid_plan(format!(
                "'{}' is not one of {}",
                s,
                Self::ALL.map(|plan| plan.code()).join(", ")
            ))
        })
    }
}

impl TryFrom<String> for PlanOption {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PlanOption> for String {
    fn from(plan: PlanOption) -> Self {
        plan.code().to_string()
    }
}
