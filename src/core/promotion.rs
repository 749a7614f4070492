use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_promotion, insert_promotion, promotion_code_exists, promotion_ids,
};
use crate::errors::{AppError, AppResult};
use crate::models::promotion::{Promotion, PromotionKind};
use chrono::NaiveDate;

/// Input for a new promotion; the id is assigned on insert.
#[derive(Debug, Clone)]
pub struct NewPromotion {
    pub code: String,
    pub description: String,
    pub kind: PromotionKind,
    pub value: f64,
    pub expiry: Option<NaiveDate>,
    pub usage_limit: Option<u32>,
}

/// Host-side discount codes.
pub struct PromotionLogic;

impl PromotionLogic {
    pub fn add(pool: &DbPool, new: &NewPromotion, today: NaiveDate) -> AppResult<Promotion> {
        let ids = promotion_ids(&pool.conn)?;
        let promotion = Promotion {
            id: Promotion::next_id(ids.iter().map(String::as_str)),
            code: Promotion::normalize_code(&new.code),
            description: new.description.trim().to_string(),
            kind: new.kind,
            value: new.value,
            expiry: new.expiry,
            usage_limit: new.usage_limit,
        };
        promotion.validate(today)?;

        if promotion_code_exists(&pool.conn, &promotion.code)? {
            return Err(AppError::InvalidInput(format!(
                "promotion code '{}' already exists",
                promotion.code
            )));
        }

        insert_promotion(&pool.conn, &promotion)?;
        audit(
            &pool.conn,
            "promotion_add",
            &promotion.id,
            &format!("{} {}", promotion.code, promotion.value_label()),
        );
        Ok(promotion)
    }

    pub fn delete(pool: &DbPool, id: &str) -> AppResult<()> {
        delete_promotion(&pool.conn, id)?;
        audit(&pool.conn, "promotion_del", id, "promotion deleted");
        Ok(())
    }
}
