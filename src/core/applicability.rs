use crate::adapters::clock::SystemClock;
use crate::core::{
    Applicability, Clock, Coupon, CouponFinder, CouponValidator, EvaluationInput,
    EvaluationPolicy, RejectionReason,
};
use chrono::NaiveDateTime;

/// Decides whether a coupon may be applied to an order total at a moment.
///
/// Lookup and validity are delegated to the injected collaborators; the
/// minimum-spend and time-of-day rules are read from the record the finder
/// returns, not from the caller's copy. Checks run in order and stop at the
/// first rejection.
#[derive(Debug, Clone)]
pub struct CouponApplicabilityChecker<F, V, C = SystemClock> {
    finder: F,
    validator: V,
    clock: C,
    policy: EvaluationPolicy,
}

impl<F, V> CouponApplicabilityChecker<F, V, SystemClock>
where
    F: CouponFinder,
    V: CouponValidator,
{
    pub fn new(finder: F, validator: V) -> Self {
        Self {
            finder,
            validator,
            clock: SystemClock,
            policy: EvaluationPolicy::default(),
        }
    }
}

impl<F, V, C> CouponApplicabilityChecker<F, V, C>
where
    F: CouponFinder,
    V: CouponValidator,
    C: Clock,
{
    pub fn with_clock<K: Clock>(self, clock: K) -> CouponApplicabilityChecker<F, V, K> {
        CouponApplicabilityChecker {
            finder: self.finder,
            validator: self.validator,
            clock,
            policy: self.policy,
        }
    }

    pub fn with_policy(mut self, policy: EvaluationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    /// `reference_time` of `None` means the clock's current moment.
    pub fn is_applicable(
        &self,
        coupon: &Coupon,
        total_amount: f64,
        reference_time: Option<NaiveDateTime>,
    ) -> bool {
        let input = EvaluationInput {
            coupon,
            total_amount,
            reference_time,
        };
        self.evaluate(&input).is_applicable()
    }

    pub fn evaluate(&self, input: &EvaluationInput<'_>) -> Applicability {
        let reference = input.reference_time.unwrap_or_else(|| self.clock.now());
        let verdict = self.check(input.coupon, input.total_amount, reference);

        if let Applicability::Rejected(reason) = &verdict {
            tracing::debug!(
                "🚫 Coupon '{}' rejected for total {} at {}: {}",
                input.coupon.code,
                input.total_amount,
                reference,
                reason
            );
        }
        verdict
    }

    /// Candidates that apply to the same total at the same moment, in input order.
    pub fn applicable_coupons<'c, I>(
        &self,
        candidates: I,
        total_amount: f64,
        reference_time: Option<NaiveDateTime>,
    ) -> Vec<&'c Coupon>
    where
        I: IntoIterator<Item = &'c Coupon>,
    {
        let reference = reference_time.unwrap_or_else(|| self.clock.now());
        candidates
            .into_iter()
            .filter(|coupon| self.is_applicable(coupon, total_amount, Some(reference)))
            .collect()
    }

    fn check(&self, coupon: &Coupon, total_amount: f64, reference: NaiveDateTime) -> Applicability {
        if coupon.code.trim().is_empty() {
            return Applicability::Rejected(RejectionReason::BlankCode);
        }

        let Some(target) = self.finder.find_coupon_by_code(&coupon.code) else {
            return Applicability::Rejected(RejectionReason::NotFound);
        };

        // Validity is asked about the caller's record, matching the lookup key.
        if !self.validator.is_coupon_valid(coupon) {
            return Applicability::Rejected(RejectionReason::Invalid);
        }

        if let Some(minimum) = self.policy.effective_minimum(target.minimum_amount) {
            if total_amount < minimum {
                return Applicability::Rejected(RejectionReason::BelowMinimum {
                    minimum,
                    total: total_amount,
                });
            }
        }

        if let Some(window) = &target.available_time {
            if !window.admits(reference, self.policy.time_window) {
                return Applicability::Rejected(RejectionReason::OutsideWindow {
                    start: window.start.clone(),
                    end: window.end.clone(),
                });
            }
        }

        Applicability::Applicable
    }
}
