use crate::cli::parser::PromotionAction;
use crate::config::Config;
use crate::core::promotion::{NewPromotion, PromotionLogic};
use crate::db::pool::DbPool;
use crate::db::queries::load_promotions;
use crate::errors::AppResult;
use crate::models::promotion::Promotion;
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREEN, GREY, RESET};
use crate::utils::date::{format_date, parse_date_arg, today};
use crate::utils::table::Table;
use chrono::NaiveDate;

fn status_cell(p: &Promotion, today: NaiveDate) -> String {
    if p.is_expired(today) {
        format!("{}expired{}", GREY, RESET)
    } else {
        format!("{}active{}", GREEN, RESET)
    }
}

pub fn handle(action: &PromotionAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match action {
        PromotionAction::Add {
            code,
            description,
            kind,
            value,
            expires,
            limit,
        } => {
            let new = NewPromotion {
                code: code.clone(),
                description: description.clone(),
                kind: *kind,
                value: *value,
                expiry: expires.as_deref().map(parse_date_arg).transpose()?,
                usage_limit: *limit,
            };
            let p = PromotionLogic::add(&pool, &new, today())?;
            success(format!(
                "Promotion {} added: {} ({} {})",
                p.id,
                p.code,
                p.kind.label(),
                p.value_label()
            ));
        }
        PromotionAction::List => {
            let promotions = load_promotions(&pool.conn)?;
            if promotions.is_empty() {
                info("No promotions defined.");
                return Ok(());
            }

            let today = today();
            let mut table = Table::with_headers(&[
                "ID", "Code", "Description", "Type", "Value", "Expires", "Usage Limit", "Status",
            ]);
            for p in &promotions {
                table.add_row(vec![
                    p.id.clone(),
                    p.code.clone(),
                    p.description.clone(),
                    p.kind.label().to_string(),
                    p.value_label(),
                    p.expiry.as_ref().map_or_else(|| "N/A".to_string(), format_date),
                    p.usage_label(),
                    status_cell(p, today),
                ]);
            }
            print!("{}", table.render(&cfg.separator_char));
        }
        PromotionAction::Del { id } => {
            PromotionLogic::delete(&pool, id)?;
            success(format!("Promotion {} deleted", id));
        }
    }

    Ok(())
}
