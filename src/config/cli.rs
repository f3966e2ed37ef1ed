use crate::domain::model::Applicability;
use crate::utils::error::{CouponError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

const REFERENCE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// `check` exits with this code when the coupon does not apply.
pub const NOT_APPLICABLE_EXIT_CODE: i32 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "coupon-check")]
#[command(about = "Check whether coupons apply to an order total at a given time")]
pub struct CliConfig {
    /// Path to the TOML coupon catalog
    #[arg(short, long, default_value = "coupons.toml")]
    pub catalog: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print results and logs as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum CliCommand {
    /// Check a single coupon code
    Check {
        #[arg(long)]
        code: String,

        /// Order total
        #[arg(long, allow_hyphen_values = true)]
        total: f64,

        /// Reference time (YYYY-MM-DDTHH:MM:SS), defaults to now
        #[arg(long)]
        at: Option<String>,
    },
    /// Evaluate every coupon in the catalog
    List {
        #[arg(long, allow_hyphen_values = true)]
        total: f64,

        #[arg(long)]
        at: Option<String>,
    },
}

impl CliCommand {
    pub fn total(&self) -> f64 {
        match self {
            CliCommand::Check { total, .. } | CliCommand::List { total, .. } => *total,
        }
    }

    /// `None` when no `--at` was given.
    pub fn reference_time(&self) -> Result<Option<NaiveDateTime>> {
        let at = match self {
            CliCommand::Check { at, .. } | CliCommand::List { at, .. } => at,
        };
        at.as_deref().map(parse_reference_time).transpose()
    }
}

pub fn parse_reference_time(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();
    REFERENCE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| CouponError::InvalidReferenceTimeError {
            value: value.to_string(),
            reason: format!("expected one of {}", REFERENCE_TIME_FORMATS.join(", ")),
        })
}

/// 單一優惠券檢查的退出碼
pub fn verdict_exit_code(verdict: &Applicability) -> i32 {
    if verdict.is_applicable() {
        0
    } else {
        NOT_APPLICABLE_EXIT_CODE
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("catalog", &self.catalog)?;
        validation::validate_file_extensions(
            "catalog",
            std::slice::from_ref(&self.catalog),
            &["toml"],
        )?;

        if let CliCommand::Check { code, .. } = &self.command {
            validation::validate_non_empty_string("code", code)?;
        }

        if !self.command.total().is_finite() {
            return Err(CouponError::InvalidConfigValueError {
                field: "total".to_string(),
                value: self.command.total().to_string(),
                reason: "Order total must be a finite number".to_string(),
            });
        }

        self.command.reference_time()?;
        Ok(())
    }
}
