use crate::models::{AppData, StateSnapshot, Today};
use chrono::NaiveDate;

/// Seeds a fresh ledger. The first day is never charged.
pub fn ensure_initialized(data: &mut AppData, today: NaiveDate, default_target: i64) -> bool {
    if data.last_applied.is_some() {
        return false;
    }
    data.balance = 0;
    data.target = default_target;
    data.last_applied = Some(today);
    true
}

/// Charges the daily target once for every day since the last charge.
/// Returns true when the ledger changed and needs to be persisted.
pub fn apply_missed_daily_charges(data: &mut AppData, today: NaiveDate, default_target: i64) -> bool {
    if ensure_initialized(data, today, default_target) {
        return true;
    }

    let Some(last) = data.last_applied else {
        return false;
    };
    if today <= last {
        return false;
    }

    let days = (today - last).num_days();
    let charge = data.target.saturating_mul(days);
    data.balance = data.balance.saturating_sub(charge);
    data.last_applied = Some(today);
    true
}

pub fn add_work(data: &mut AppData, minutes: i64) -> i64 {
    data.balance = data.balance.saturating_add(minutes);
    data.balance
}

pub fn add_relax(data: &mut AppData, minutes: i64) -> i64 {
    data.balance = data.balance.saturating_sub(minutes);
    data.balance
}

pub fn need(balance: i64) -> i64 {
    balance.saturating_neg().max(0)
}

pub fn snapshot(data: &AppData, today: NaiveDate) -> StateSnapshot {
    StateSnapshot {
        balance: data.balance,
        need: need(data.balance),
        target: data.target,
        today: Today::Label(today.to_string()),
        last_applied: Some(data.last_applied.unwrap_or(today).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_TARGET;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn first_run_is_not_charged() {
        let mut data = AppData::default();
        assert!(apply_missed_daily_charges(&mut data, day(10), DEFAULT_TARGET));
        assert_eq!(data.balance, 0);
        assert_eq!(data.target, DEFAULT_TARGET);
        assert_eq!(data.last_applied, Some(day(10)));

        assert!(!apply_missed_daily_charges(&mut data, day(10), DEFAULT_TARGET));
        assert_eq!(data.balance, 0);
    }

    #[test]
    fn missed_days_are_charged_per_day() {
        let mut data = AppData {
            balance: 30,
            target: 100,
            last_applied: Some(day(1)),
        };
        assert!(apply_missed_daily_charges(&mut data, day(4), DEFAULT_TARGET));
        assert_eq!(data.balance, 30 - 300);
        assert_eq!(data.last_applied, Some(day(4)));
    }

    #[test]
    fn clock_going_backwards_changes_nothing() {
        let mut data = AppData {
            balance: 5,
            target: 60,
            last_applied: Some(day(9)),
        };
        assert!(!apply_missed_daily_charges(&mut data, day(8), DEFAULT_TARGET));
        assert_eq!(data.balance, 5);
        assert_eq!(data.last_applied, Some(day(9)));
    }

    #[test]
    fn need_is_the_deficit() {
        assert_eq!(need(-15), 15);
        assert_eq!(need(0), 0);
        assert_eq!(need(40), 0);
        assert_eq!(need(i64::MIN), i64::MAX);
    }

    #[test]
    fn work_and_relax_move_balance() {
        let mut data = AppData::default();
        assert_eq!(add_work(&mut data, 45), 45);
        assert_eq!(add_relax(&mut data, 60), -15);

        let snap = snapshot(&data, day(2));
        assert_eq!(snap.need, 15);
        assert_eq!(snap.today, Today::Label("2026-03-02".to_string()));
    }
}
