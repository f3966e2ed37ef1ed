use serde::{Deserialize, Serialize};

/// How an explicit `minimum_amount` of zero is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroMinimumPolicy {
    /// Zero is a real minimum: negative totals are rejected.
    #[default]
    Enforce,
    /// Zero means "no minimum", the same as an absent field.
    Ignore,
}

/// How a window whose end is earlier than its start is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindowPolicy {
    /// Plain same-day interval; `end < start` admits nothing.
    #[default]
    SameDay,
    /// `end < start` spans midnight: admitted from start to end of day and
    /// from start of day to end.
    WrapOvernight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPolicy {
    #[serde(default)]
    pub zero_minimum: ZeroMinimumPolicy,
    #[serde(default)]
    pub time_window: TimeWindowPolicy,
}

impl EvaluationPolicy {
    /// Minimum actually enforced for a coupon's configured minimum.
    pub fn effective_minimum(&self, minimum_amount: Option<f64>) -> Option<f64> {
        match (minimum_amount, self.zero_minimum) {
            (Some(minimum), ZeroMinimumPolicy::Ignore) if minimum == 0.0 => None,
            (minimum, _) => minimum,
        }
    }
}
