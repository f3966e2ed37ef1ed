use crate::domain::window::AvailableTime;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discount rule identified by its code, with optional minimum spend and
/// time-of-day eligibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_time: Option<AvailableTime>,
}

impl Coupon {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            minimum_amount: None,
            available_time: None,
        }
    }

    pub fn with_minimum_amount(mut self, minimum_amount: f64) -> Self {
        self.minimum_amount = Some(minimum_amount);
        self
    }

    pub fn with_available_time(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.available_time = Some(AvailableTime::new(start, end));
        self
    }
}

/// One applicability question. The coupon is borrowed for the call only.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInput<'a> {
    pub coupon: &'a Coupon,
    pub total_amount: f64,
    /// `None` means "now" according to the evaluator's clock.
    pub reference_time: Option<NaiveDateTime>,
}

impl<'a> EvaluationInput<'a> {
    pub fn new(coupon: &'a Coupon, total_amount: f64) -> Self {
        Self {
            coupon,
            total_amount,
            reference_time: None,
        }
    }

    pub fn at(mut self, reference_time: NaiveDateTime) -> Self {
        self.reference_time = Some(reference_time);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    BlankCode,
    NotFound,
    Invalid,
    BelowMinimum { minimum: f64, total: f64 },
    OutsideWindow { start: String, end: String },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::BlankCode => write!(f, "coupon code is blank"),
            RejectionReason::NotFound => write!(f, "coupon not found"),
            RejectionReason::Invalid => write!(f, "coupon is not currently valid"),
            RejectionReason::BelowMinimum { minimum, total } => {
                write!(f, "order total {} is below the minimum {}", total, minimum)
            }
            RejectionReason::OutsideWindow { start, end } => {
                write!(f, "outside the available time {}-{}", start, end)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    Applicable,
    Rejected(RejectionReason),
}

impl Applicability {
    pub fn is_applicable(&self) -> bool {
        matches!(self, Applicability::Applicable)
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            Applicability::Applicable => None,
            Applicability::Rejected(reason) => Some(reason),
        }
    }
}
