//! Earning and redemption policy layered on top of the ledger.

use crate::config::PointsRules;
use crate::core::ledger::{PointsLedger, TransactionStore};
use crate::errors::{AppError, AppResult};
use crate::models::transaction::Transaction;
use crate::utils::money;

/// Outcome of a redemption: the debit plus the value it bought.
#[derive(Debug, Clone)]
pub struct Redemption {
    pub transaction: Transaction,
    pub value: f64,
}

pub struct RewardsLogic;

impl RewardsLogic {
    /// `charging_base + kwh * points_per_kwh`, checked.
    pub fn charging_points(rules: &PointsRules, kwh: u32) -> AppResult<i64> {
        i64::from(kwh)
            .checked_mul(rules.points_per_kwh)
            .and_then(|p| p.checked_add(rules.charging_base))
            .ok_or_else(|| {
                AppError::PointsOverflow(format!("charging reward for {kwh} kWh is out of range"))
            })
    }

    pub fn earn_welcome_bonus<S: TransactionStore>(
        ledger: &mut PointsLedger<S>,
        rules: &PointsRules,
    ) -> AppResult<Option<Transaction>> {
        if !ledger.is_empty() {
            return Ok(None);
        }
        earn_if_rewarded(ledger, rules.welcome_bonus, "Welcome Bonus")
    }

    pub fn earn_charging<S: TransactionStore>(
        ledger: &mut PointsLedger<S>,
        rules: &PointsRules,
        kwh: u32,
    ) -> AppResult<Option<Transaction>> {
        let points = Self::charging_points(rules, kwh)?;
        earn_if_rewarded(
            ledger,
            points,
            &format!("Charged {} kWh at partner station", kwh),
        )
    }

    pub fn earn_service_visit<S: TransactionStore>(
        ledger: &mut PointsLedger<S>,
        rules: &PointsRules,
        service: &str,
    ) -> AppResult<Option<Transaction>> {
        let service = non_blank(service, "service name")?;
        earn_if_rewarded(
            ledger,
            rules.service_visit,
            &format!("Visited partner service: {}", service),
        )
    }

    pub fn earn_referral<S: TransactionStore>(
        ledger: &mut PointsLedger<S>,
        rules: &PointsRules,
    ) -> AppResult<Option<Transaction>> {
        earn_if_rewarded(ledger, rules.referral, "New Driver/Service Referral Bonus")
    }

    pub fn earn_booking<S: TransactionStore>(
        ledger: &mut PointsLedger<S>,
        rules: &PointsRules,
    ) -> AppResult<Option<Transaction>> {
        earn_if_rewarded(ledger, rules.booking, "Booked through GreenPoint Platform")
    }

    pub fn redeem_charging_discount<S: TransactionStore>(
        ledger: &mut PointsLedger<S>,
        rules: &PointsRules,
        points: i64,
    ) -> AppResult<Redemption> {
        let value = value_of(points, rules.discount_points_per_unit)?;
        let transaction = ledger.spend(
            points,
            &format!("Redeemed for ${} charging discount", money(value)),
        )?;
        Ok(Redemption { transaction, value })
    }

    pub fn redeem_service_voucher<S: TransactionStore>(
        ledger: &mut PointsLedger<S>,
        rules: &PointsRules,
        points: i64,
    ) -> AppResult<Redemption> {
        let value = value_of(points, rules.voucher_points_per_unit)?;
        let transaction = ledger.spend(
            points,
            &format!("Redeemed for ${} service partner voucher", money(value)),
        )?;
        Ok(Redemption { transaction, value })
    }

    pub fn exchange_for_benefit<S: TransactionStore>(
        ledger: &mut PointsLedger<S>,
        points: i64,
        benefit: &str,
    ) -> AppResult<Transaction> {
        let benefit = non_blank(benefit, "benefit type")?;
        ledger.spend(points, &format!("Exchanged for: {} benefit", benefit))
    }
}

/// A rule worth zero or less is switched off: nothing is credited.
fn earn_if_rewarded<S: TransactionStore>(
    ledger: &mut PointsLedger<S>,
    points: i64,
    description: &str,
) -> AppResult<Option<Transaction>> {
    if points <= 0 {
        return Ok(None);
    }
    ledger.earn(points, description).map(Some)
}

fn value_of(points: i64, points_per_unit: i64) -> AppResult<f64> {
    if points_per_unit <= 0 {
        return Err(AppError::Config(format!(
            "points per unit must be positive (got {points_per_unit})"
        )));
    }
    Ok(points as f64 / points_per_unit as f64)
}

fn non_blank<'a>(value: &'a str, what: &str) -> AppResult<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        return Err(AppError::InvalidInput(format!("please specify a {what}")));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::SystemClock;
    use crate::core::ledger::MemoryStore;
    use crate::core::notify::RecordingNotifier;

    fn ledger() -> PointsLedger<MemoryStore> {
        PointsLedger::open(
            MemoryStore::default(),
            Box::new(SystemClock),
            Box::new(RecordingNotifier::default()),
        )
        .unwrap()
    }

    #[test]
    fn charging_points_use_base_plus_rate() {
        let rules = PointsRules::default();
        assert_eq!(RewardsLogic::charging_points(&rules, 0).unwrap(), 10);
        assert_eq!(RewardsLogic::charging_points(&rules, 30).unwrap(), 70);

        let mut l = ledger();
        let tx = RewardsLogic::earn_charging(&mut l, &rules, 25).unwrap().unwrap();
        assert_eq!(tx.amount, 60);
        assert_eq!(tx.description, "Charged 25 kWh at partner station");
    }

    #[test]
    fn welcome_bonus_only_on_empty_ledger() {
        let rules = PointsRules::default();
        let mut l = ledger();
        assert!(RewardsLogic::earn_welcome_bonus(&mut l, &rules).unwrap().is_some());
        assert!(RewardsLogic::earn_welcome_bonus(&mut l, &rules).unwrap().is_none());
        assert_eq!(l.current_balance(), 200);
    }

    #[test]
    fn welcome_bonus_can_be_disabled() {
        let rules = PointsRules {
            welcome_bonus: 0,
            ..PointsRules::default()
        };
        let mut l = ledger();
        assert!(RewardsLogic::earn_welcome_bonus(&mut l, &rules).unwrap().is_none());
        assert!(l.is_empty());
    }

    #[test]
    fn fixed_rewards() {
        let rules = PointsRules::default();
        let mut l = ledger();
        let visit = RewardsLogic::earn_service_visit(&mut l, &rules, "Green EV Mechanics");
        assert!(visit.unwrap().is_some());
        assert!(RewardsLogic::earn_referral(&mut l, &rules).unwrap().is_some());
        assert!(RewardsLogic::earn_booking(&mut l, &rules).unwrap().is_some());
        assert_eq!(l.current_balance(), 25 + 100 + 10);
        assert!(RewardsLogic::earn_service_visit(&mut l, &rules, "  ").is_err());
    }

    #[test]
    fn zero_rules_switch_rewards_off() {
        let rules = PointsRules {
            booking: 0,
            referral: 0,
            service_visit: -5,
            charging_base: 0,
            points_per_kwh: 0,
            ..PointsRules::default()
        };
        let mut l = ledger();
        assert!(RewardsLogic::earn_booking(&mut l, &rules).unwrap().is_none());
        assert!(RewardsLogic::earn_referral(&mut l, &rules).unwrap().is_none());
        assert!(RewardsLogic::earn_service_visit(&mut l, &rules, "Green Cafe")
            .unwrap()
            .is_none());
        assert!(RewardsLogic::earn_charging(&mut l, &rules, 40).unwrap().is_none());
        assert!(l.is_empty());
    }

    #[test]
    fn charging_reward_overflow_is_an_error() {
        let rules = PointsRules {
            points_per_kwh: i64::MAX,
            ..PointsRules::default()
        };
        assert!(matches!(
            RewardsLogic::charging_points(&rules, 2),
            Err(AppError::PointsOverflow(_))
        ));

        let rules = PointsRules {
            charging_base: i64::MAX,
            ..PointsRules::default()
        };
        let mut l = ledger();
        assert!(RewardsLogic::earn_charging(&mut l, &rules, 1).is_err());
        assert!(l.is_empty());
    }

    #[test]
    fn redemptions_convert_points_to_value() {
        let rules = PointsRules::default();
        let mut l = ledger();
        l.earn(300, "seed").unwrap();

        let d = RewardsLogic::redeem_charging_discount(&mut l, &rules, 100).unwrap();
        assert_eq!(d.value, 10.0);
        assert_eq!(d.transaction.description, "Redeemed for $10.00 charging discount");

        let v = RewardsLogic::redeem_service_voucher(&mut l, &rules, 50).unwrap();
        assert_eq!(v.value, 10.0);
        assert_eq!(l.current_balance(), 150);
    }

    #[test]
    fn redemption_over_balance_keeps_balance() {
        let rules = PointsRules::default();
        let mut l = ledger();
        l.earn(40, "seed").unwrap();
        assert!(matches!(
            RewardsLogic::redeem_charging_discount(&mut l, &rules, 100),
            Err(AppError::InsufficientBalance { .. })
        ));
        assert_eq!(l.current_balance(), 40);
    }

    #[test]
    fn benefit_needs_a_name() {
        let mut l = ledger();
        l.earn(40, "seed").unwrap();
        assert!(matches!(
            RewardsLogic::exchange_for_benefit(&mut l, 10, ""),
            Err(AppError::InvalidInput(_))
        ));
        let tx = RewardsLogic::exchange_for_benefit(&mut l, 10, "Premium Feature Access").unwrap();
        assert_eq!(tx.description, "Exchanged for: Premium Feature Access benefit");
    }
}
