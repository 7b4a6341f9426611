use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::config::GasBonusSettings;
use crate::core::{classifier::GAS_CATEGORY, dates::MonthKey, time::Clock};
use crate::domain::{FinancialRecord, GAS_BONUS_JOB};
use crate::errors::Result;
use crate::storage::RecordStore;

/// Injects the recurring gas bonus income entry, once per month.
pub struct GasBonusService;

impl GasBonusService {
    /// The gas bonus record to add for `today`'s month, if one is due: the
    /// day is past `injection_day` and the month has no gas bonus yet.
    pub fn pending_injection(
        records: &[FinancialRecord],
        today: NaiveDate,
        settings: &GasBonusSettings,
    ) -> Option<FinancialRecord> {
        if today.day() <= settings.injection_day {
            return None;
        }
        let month = MonthKey::of(today);
        let already_recorded = records
            .iter()
            .any(|record| record.is_gas_bonus() && record.month() == month);
        if already_recorded {
            return None;
        }
        Some(
            FinancialRecord::income(GAS_BONUS_JOB, settings.net(), today)
                .with_category(GAS_CATEGORY),
        )
    }

    /// Adds the pending gas bonus to `store`, returning it when one was added.
    pub fn inject_if_due(
        store: &mut dyn RecordStore,
        clock: &dyn Clock,
        settings: &GasBonusSettings,
    ) -> Result<Option<FinancialRecord>> {
        let today = clock.today();
        let records = store.records_for_month(MonthKey::of(today))?;
        let Some(record) = Self::pending_injection(&records, today, settings) else {
            return Ok(None);
        };
        store.add_record(record.clone())?;
        info!("injected gas bonus of {:.2} for {}", record.amount, MonthKey::of(today));
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn not_due_on_or_before_injection_day() {
        let settings = GasBonusSettings::default();
        assert!(GasBonusService::pending_injection(&[], date(2024, 3, 1), &settings).is_none());
        assert!(GasBonusService::pending_injection(&[], date(2024, 3, 15), &settings).is_none());
    }

    #[test]
    fn due_after_injection_day_when_absent() {
        let settings = GasBonusSettings::default();
        let record = GasBonusService::pending_injection(&[], date(2024, 3, 16), &settings)
            .expect("bonus due");
        assert!(record.is_gas_bonus());
        assert_eq!(record.amount, 91.84);
        assert_eq!(record.category.as_deref(), Some("Gas"));
        assert_eq!(record.date, date(2024, 3, 16));
    }

    #[test]
    fn only_once_per_month() {
        let settings = GasBonusSettings::default();
        let existing = vec![FinancialRecord::income(GAS_BONUS_JOB, 91.84, date(2024, 3, 20))];
        assert!(
            GasBonusService::pending_injection(&existing, date(2024, 3, 28), &settings).is_none()
        );
        assert!(
            GasBonusService::pending_injection(&existing, date(2024, 4, 16), &settings).is_some()
        );
    }
}
