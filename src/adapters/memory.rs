use crate::domain::model::Coupon;
use crate::domain::ports::{Clock, CouponFinder, CouponValidator};
use crate::utils::error::{CouponError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Usability rules kept next to each catalog coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityRules {
    pub enabled: bool,
    pub starts_at: Option<NaiveDateTime>,
    pub expires_at: Option<NaiveDateTime>,
    pub usage_limit: Option<u32>,
    pub used_count: u32,
}

impl Default for ValidityRules {
    fn default() -> Self {
        Self {
            enabled: true,
            starts_at: None,
            expires_at: None,
            usage_limit: None,
            used_count: 0,
        }
    }
}

impl ValidityRules {
    /// `starts_at` and `expires_at` are both inclusive.
    pub fn is_satisfied_at(&self, now: NaiveDateTime) -> bool {
        if !self.enabled {
            return false;
        }
        if self.starts_at.is_some_and(|starts_at| now < starts_at) {
            return false;
        }
        if self.expires_at.is_some_and(|expires_at| now > expires_at) {
            return false;
        }
        match self.usage_limit {
            Some(limit) => self.used_count < limit,
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredCoupon {
    pub coupon: Coupon,
    pub name: Option<String>,
    pub rules: ValidityRules,
}

/// Read-only coupon catalog, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCouponStore {
    entries: Vec<StoredCoupon>,
    index: HashMap<String, usize>,
}

impl InMemoryCouponStore {
    pub fn new(entries: Vec<StoredCoupon>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.coupon.code.clone(), position).is_some() {
                return Err(CouponError::DuplicateCouponError {
                    code: entry.coupon.code.clone(),
                });
            }
        }
        Ok(Self { entries, index })
    }

    pub fn get(&self, code: &str) -> Option<&StoredCoupon> {
        self.index.get(code).and_then(|&position| self.entries.get(position))
    }

    pub fn coupons(&self) -> impl Iterator<Item = &Coupon> {
        self.entries.iter().map(|entry| &entry.coupon)
    }

    pub fn entries(&self) -> &[StoredCoupon] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finder(&self) -> CatalogFinder<'_> {
        CatalogFinder { store: self }
    }

    pub fn validator<C: Clock>(&self, clock: C) -> CatalogValidator<'_, C> {
        CatalogValidator { store: self, clock }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogFinder<'a> {
    store: &'a InMemoryCouponStore,
}

impl CouponFinder for CatalogFinder<'_> {
    fn find_coupon_by_code(&self, code: &str) -> Option<Coupon> {
        self.store.get(code).map(|entry| entry.coupon.clone())
    }
}

/// Checks catalog validity rules at the clock's current time.
#[derive(Debug, Clone)]
pub struct CatalogValidator<'a, C> {
    store: &'a InMemoryCouponStore,
    clock: C,
}

impl<C: Clock> CouponValidator for CatalogValidator<'_, C> {
    fn is_coupon_valid(&self, coupon: &Coupon) -> bool {
        match self.store.get(&coupon.code) {
            Some(entry) => entry.rules.is_satisfied_at(self.clock.now()),
            None => false,
        }
    }
}
