pub mod applicability;

pub use crate::domain::model::{Applicability, Coupon, EvaluationInput, RejectionReason};
pub use crate::domain::policy::{EvaluationPolicy, TimeWindowPolicy, ZeroMinimumPolicy};
pub use crate::domain::ports::{Clock, CouponFinder, CouponValidator};
pub use crate::domain::window::{AvailableTime, TimeOfDay};
pub use crate::utils::error::Result;
