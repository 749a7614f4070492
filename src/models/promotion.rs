use crate::errors::{AppError, AppResult};
use crate::utils::ids::next_sequential_id;
use crate::utils::money;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

const PROMOTION_PREFIX: &str = "P";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum PromotionKind {
    /// Percentage off the price
    Percentage,
    /// Fixed amount off the price
    Fixed,
}

impl PromotionKind {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PromotionKind::Percentage => "percentage",
            PromotionKind::Fixed => "fixed",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(PromotionKind::Percentage),
            "fixed" => Some(PromotionKind::Fixed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PromotionKind::Percentage => "Percentage Off",
            PromotionKind::Fixed => "Fixed Amount Off",
        }
    }
}

/// A host discount code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Promotion {
    pub id: String, // P001, P002, ...
    pub code: String,
    pub description: String,
    pub kind: PromotionKind,
    pub value: f64,
    pub expiry: Option<NaiveDate>,
    pub usage_limit: Option<u32>, // None = unlimited
}

impl Promotion {
    pub fn next_id<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
        next_sequential_id(PROMOTION_PREFIX, existing)
    }

    /// Codes are stored upper-case and compared that way.
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// "20%" or "5.00".
    pub fn value_label(&self) -> String {
        match self.kind {
            PromotionKind::Percentage => format!("{}%", self.value),
            PromotionKind::Fixed => money(self.value),
        }
    }

    pub fn usage_label(&self) -> String {
        self.usage_limit
            .map_or_else(|| "Unlimited".to_string(), |n| n.to_string())
    }

    /// A promotion is still valid on its expiry date.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry.is_some_and(|d| d < today)
    }

    /// Checks for a promotion being created on `today`.
    pub fn validate(&self, today: NaiveDate) -> AppResult<()> {
        if self.code.is_empty() || self.code.chars().any(char::is_whitespace) {
            return Err(AppError::InvalidInput(
                "promotion code must be a single non-empty word".into(),
            ));
        }
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(AppError::InvalidInput(format!(
                "promotion value must be a positive number (got {})",
                self.value
            )));
        }
        if self.kind == PromotionKind::Percentage && self.value > 100.0 {
            return Err(AppError::InvalidInput(format!(
                "a percentage promotion cannot exceed 100% (got {})",
                self.value
            )));
        }
        if self.is_expired(today) {
            return Err(AppError::InvalidInput(
                "promotion expiry date is already in the past".into(),
            ));
        }
        if self.usage_limit == Some(0) {
            return Err(AppError::InvalidInput(
                "usage limit must be at least 1 (omit it for unlimited)".into(),
            ));
        }
        Ok(())
    }
}
