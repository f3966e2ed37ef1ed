use crate::adapters::memory::{InMemoryCouponStore, StoredCoupon, ValidityRules};
use crate::domain::model::Coupon;
use crate::domain::policy::EvaluationPolicy;
use crate::domain::window::AvailableTime;
use crate::utils::error::{CouponError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: Option<CatalogInfo>,
    #[serde(default)]
    pub policy: EvaluationPolicy,
    #[serde(default)]
    pub coupons: Vec<CouponEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponEntry {
    pub code: String,
    pub name: Option<String>,
    pub minimum_amount: Option<f64>,
    pub available_time: Option<AvailableTime>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub starts_at: Option<NaiveDateTime>,
    pub expires_at: Option<NaiveDateTime>,
    pub usage_limit: Option<u32>,
    #[serde(default)]
    pub used_count: u32,
}

fn default_enabled() -> bool {
    true
}

impl CouponEntry {
    pub fn coupon(&self) -> Coupon {
        Coupon {
            code: self.code.clone(),
            minimum_amount: self.minimum_amount,
            available_time: self.available_time.clone(),
        }
    }

    pub fn rules(&self) -> ValidityRules {
        ValidityRules {
            enabled: self.enabled,
            starts_at: self.starts_at,
            expires_at: self.expires_at,
            usage_limit: self.usage_limit,
            used_count: self.used_count,
        }
    }

    fn validate_entry(&self, position: usize) -> Result<()> {
        let field = |name: &str| format!("coupons[{}].{}", position, name);

        validation::validate_non_empty_string(&field("code"), &self.code)?;

        if let Some(minimum) = self.minimum_amount {
            validation::validate_non_negative_amount(&field("minimum_amount"), minimum)?;
        }

        if let Some(window) = &self.available_time {
            validation::validate_time_of_day(&field("available_time.start"), &window.start)?;
            validation::validate_time_of_day(&field("available_time.end"), &window.end)?;
        }

        if let (Some(starts_at), Some(expires_at)) = (self.starts_at, self.expires_at) {
            if expires_at < starts_at {
                return Err(CouponError::ConfigValidationError {
                    field: field("expires_at"),
                    message: format!(
                        "Expiry {} is earlier than start {}",
                        expires_at, starts_at
                    ),
                });
            }
        }

        Ok(())
    }
}

impl CatalogConfig {
    /// 從 TOML 檔案載入優惠券目錄
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CouponError::IoError)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(
            "📁 Loaded {} coupons from {}",
            config.coupons.len(),
            path.as_ref().display()
        );
        Ok(config)
    }

    /// 從 TOML 字串解析目錄
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(CouponError::TomlError)
    }

    /// 替換環境變數 (例如 ${PROMO_END})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CouponError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: format!("Pattern error: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證目錄內容
    pub fn validate_config(&self) -> Result<()> {
        if let Some(info) = &self.catalog {
            validation::validate_non_empty_string("catalog.name", &info.name)?;
        }

        let mut seen = HashSet::with_capacity(self.coupons.len());
        for (position, entry) in self.coupons.iter().enumerate() {
            entry.validate_entry(position)?;
            if !seen.insert(entry.code.as_str()) {
                return Err(CouponError::DuplicateCouponError {
                    code: entry.code.clone(),
                });
            }
        }

        if self.coupons.is_empty() {
            tracing::warn!("⚠️ Coupon catalog is empty, every code will be rejected");
        }

        Ok(())
    }

    pub fn catalog_name(&self) -> &str {
        self.catalog
            .as_ref()
            .map(|info| info.name.as_str())
            .unwrap_or("unnamed")
    }

    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    /// 建立記憶體內的優惠券目錄
    pub fn build_store(&self) -> Result<InMemoryCouponStore> {
        let entries = self
            .coupons
            .iter()
            .map(|entry| StoredCoupon {
                coupon: entry.coupon(),
                name: entry.name.clone(),
                rules: entry.rules(),
            })
            .collect();
        InMemoryCouponStore::new(entries)
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
