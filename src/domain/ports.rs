use crate::domain::model::Coupon;
use chrono::NaiveDateTime;

/// Resolves the canonical coupon record for a code.
pub trait CouponFinder: Send + Sync {
    fn find_coupon_by_code(&self, code: &str) -> Option<Coupon>;
}

/// Decides whether a coupon is usable at all (expiry, usage limits, ...).
pub trait CouponValidator: Send + Sync {
    fn is_coupon_valid(&self, coupon: &Coupon) -> bool;
}

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

impl<F> CouponFinder for F
where
    F: Fn(&str) -> Option<Coupon> + Send + Sync,
{
    fn find_coupon_by_code(&self, code: &str) -> Option<Coupon> {
        self(code)
    }
}

impl<F> CouponValidator for F
where
    F: Fn(&Coupon) -> bool + Send + Sync,
{
    fn is_coupon_valid(&self, coupon: &Coupon) -> bool {
        self(coupon)
    }
}
