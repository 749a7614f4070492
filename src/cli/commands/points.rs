use crate::cli::commands::open_ledger;
use crate::cli::parser::{PointsAction, RedeemAction};
use crate::config::Config;
use crate::core::rewards::{Redemption, RewardsLogic};
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::transaction::{EarnPointsRequest, SpendPointsRequest, Transaction};
use crate::ui::messages::{info, success};
use crate::utils::colors::{RESET, color_for_kind};
use crate::utils::formatting::bold;
use crate::utils::table::Table;
use crate::utils::{money, signed_points};

fn print_balance(balance: i64) {
    println!("🌿 GreenPoints balance: {}", bold(&balance.to_string()));
}

fn log_transaction(pool: &DbPool, operation: &str, tx: &Transaction) {
    audit(
        &pool.conn,
        operation,
        &tx.id.to_string(),
        &format!("{} {}", signed_points(tx), tx.description),
    );
}

fn print_history(history: &[Transaction], limit: Option<usize>, cfg: &Config) {
    if history.is_empty() {
        info("No transactions yet.");
        return;
    }

    let shown = limit.unwrap_or(history.len()).min(history.len());
    let mut table = Table::with_headers(&["ID", "Date", "Points", "Description"]);
    for tx in &history[..shown] {
        table.add_row(vec![
            tx.id.to_string(),
            tx.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            format!("{}{}{}", color_for_kind(tx.kind), signed_points(tx), RESET),
            tx.description.clone(),
        ]);
    }

    print!("{}", table.render(&cfg.separator_char));
    if shown < history.len() {
        println!("… {} older transaction(s) not shown", history.len() - shown);
    }
}

fn report_redemption(pool: &DbPool, r: &Redemption) {
    log_transaction(pool, "redeem", &r.transaction);
    success(format!("Reward value: ${}", money(r.value)));
}

pub fn handle(action: &PointsAction, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let mut ledger = open_ledger(&pool)?;
    let rules = &cfg.points;

    match action {
        PointsAction::Balance => {
            print_balance(ledger.current_balance());
            return Ok(());
        }
        PointsAction::History { limit } => {
            print_history(&ledger.history(), *limit, cfg);
            return Ok(());
        }
        PointsAction::Export {
            format,
            file,
            kind,
            force,
        } => {
            let n = ExportLogic::export(&ledger.history(), *format, file, *kind, *force)?;
            if n > 0 {
                audit(
                    &pool.conn,
                    "export",
                    format.as_str(),
                    &format!("{} transaction(s) exported to {}", n, file),
                );
            }
            return Ok(());
        }
        PointsAction::Earn {
            amount,
            description,
        } => {
            let tx = ledger.earn_request(&EarnPointsRequest::new(*amount, description.as_str()))?;
            log_transaction(&pool, "earn", &tx);
        }
        PointsAction::Spend {
            amount,
            description,
        } => {
            let tx =
                ledger.spend_request(&SpendPointsRequest::new(*amount, description.as_str()))?;
            log_transaction(&pool, "spend", &tx);
        }
        PointsAction::Charge { kwh } => {
            log_reward(&pool, RewardsLogic::earn_charging(&mut ledger, rules, *kwh)?);
        }
        PointsAction::Visit { service } => {
            log_reward(&pool, RewardsLogic::earn_service_visit(&mut ledger, rules, service)?);
        }
        PointsAction::Referral => {
            log_reward(&pool, RewardsLogic::earn_referral(&mut ledger, rules)?);
        }
        PointsAction::Redeem { reward } => match reward {
            RedeemAction::Discount { points } => {
                let r = RewardsLogic::redeem_charging_discount(&mut ledger, rules, *points)?;
                report_redemption(&pool, &r);
            }
            RedeemAction::Voucher { points } => {
                let r = RewardsLogic::redeem_service_voucher(&mut ledger, rules, *points)?;
                report_redemption(&pool, &r);
            }
            RedeemAction::Benefit { points, name } => {
                let tx = RewardsLogic::exchange_for_benefit(&mut ledger, *points, name)?;
                log_transaction(&pool, "redeem", &tx);
            }
        },
    }

    print_balance(ledger.current_balance());
    Ok(())
}

fn log_reward(pool: &DbPool, tx: Option<Transaction>) {
    match tx {
        Some(tx) => log_transaction(pool, "earn", &tx),
        None => info("This reward is disabled in the configuration (0 points)."),
    }
}
