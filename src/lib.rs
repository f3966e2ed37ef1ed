pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{verdict_exit_code, CliCommand, CliConfig};

pub use adapters::clock::{FixedClock, SystemClock};
pub use adapters::memory::{InMemoryCouponStore, StoredCoupon, ValidityRules};
pub use config::CatalogConfig;
pub use core::applicability::CouponApplicabilityChecker;
pub use domain::model::{Applicability, Coupon, EvaluationInput, RejectionReason};
pub use domain::policy::{EvaluationPolicy, TimeWindowPolicy, ZeroMinimumPolicy};
pub use domain::ports::{Clock, CouponFinder, CouponValidator};
pub use domain::window::AvailableTime;
pub use utils::error::{CouponError, Result};
