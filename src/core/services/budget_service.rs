use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::core::{
    allocation::AllocationEngine,
    dates::MonthKey,
    month::{records_by_month, MonthTotals, RecordFilter},
    reconcile::reconcile,
    subscriptions::SubscriptionTotals,
    time::Clock,
};
use crate::domain::{
    Allocation, Bucket, BucketShare, BudgetRow, FinancialRecord, SubscriptionRecord, Summary,
};
use crate::errors::Result;
use crate::storage::RecordStore;

/// Everything derived for one month: totals, the detailed bucket split, and
/// the reconciled summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub month: MonthKey,
    pub totals: MonthTotals,
    /// Gas bonus recorded this month, or the configured net bonus if none was.
    pub gas_bonus_available: f64,
    /// Bonus available minus gas spent; negative when gas was overspent.
    pub gas_delta: f64,
    pub subscriptions: SubscriptionTotals,
    pub allocation: Allocation,
    pub summary: Summary,
    pub rows: Vec<BudgetRow>,
}

impl MonthlyBudget {
    pub fn gas_overspent(&self) -> bool {
        self.gas_delta < 0.0
    }

    pub fn row(&self, account: &str) -> Option<&BudgetRow> {
        self.rows.iter().find(|row| row.account == account)
    }
}

/// A month in the history listing: the entries that matched the filter and
/// the budget computed from all of the month's records.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthHistory {
    pub month: MonthKey,
    pub entries: Vec<FinancialRecord>,
    pub budget: MonthlyBudget,
}

pub struct BudgetService;

impl BudgetService {
    /// Builds the budget for `month` from whichever of `records` fall in it.
    pub fn monthly_budget(
        month: MonthKey,
        records: &[FinancialRecord],
        subscriptions: &[SubscriptionRecord],
        config: &Config,
    ) -> MonthlyBudget {
        let totals =
            MonthTotals::from_records(records.iter().filter(|record| record.month() == month));
        let gas_bonus_available = if totals.gas_bonus_net > 0.0 {
            totals.gas_bonus_net
        } else {
            config.gas.net()
        };
        let gas_delta = gas_bonus_available - totals.gas_spent;

        let allocation = AllocationEngine::allocate(
            totals.income,
            totals.gas_bonus_net,
            &config.allocation,
            &config.gas,
        );
        let subscription_totals = SubscriptionTotals::for_month(subscriptions, month);
        let summary = reconcile(totals.income, &allocation, gas_delta);
        debug!(
            "budget for {}: income {:.2}, gas delta {:.2}",
            month, totals.income, gas_delta
        );

        MonthlyBudget {
            month,
            totals,
            gas_bonus_available,
            gas_delta,
            subscriptions: subscription_totals,
            rows: budget_rows(&totals, &allocation, gas_delta, &subscription_totals),
            allocation,
            summary,
        }
    }

    /// One entry per month with at least one record matching `filter`,
    /// newest month first.
    pub fn history(
        records: &[FinancialRecord],
        subscriptions: &[SubscriptionRecord],
        config: &Config,
        filter: &RecordFilter,
    ) -> Vec<MonthHistory> {
        records_by_month(filter.apply(records))
            .into_iter()
            .map(|(month, entries)| MonthHistory {
                month,
                entries,
                budget: Self::monthly_budget(month, records, subscriptions, config),
            })
            .collect()
    }

    /// Budget for the clock's current month, read through a record store.
    pub fn current_month(
        store: &dyn RecordStore,
        clock: &dyn Clock,
        config: &Config,
    ) -> Result<MonthlyBudget> {
        let month = MonthKey::of(clock.today());
        let records = store.records_for_month(month)?;
        let subscriptions = store.subscriptions()?;
        Ok(Self::monthly_budget(month, &records, &subscriptions, config))
    }

    /// History of every month before the clock's current one.
    pub fn past_months(
        store: &dyn RecordStore,
        clock: &dyn Clock,
        config: &Config,
        search: Option<&str>,
    ) -> Result<Vec<MonthHistory>> {
        let mut filter = RecordFilter::default().excluding_month(MonthKey::of(clock.today()));
        if let Some(term) = search {
            filter = filter.search(term);
        }
        let records = store.records()?;
        let subscriptions = store.subscriptions()?;
        Ok(Self::history(&records, &subscriptions, config, &filter))
    }
}

fn budget_rows(
    totals: &MonthTotals,
    allocation: &Allocation,
    gas_delta: f64,
    subscriptions: &SubscriptionTotals,
) -> Vec<BudgetRow> {
    let share = |bucket: Bucket| {
        BudgetRow::from_share(BucketShare {
            bucket,
            amount: allocation.amount(bucket),
            percent: allocation.percent(bucket),
        })
    };
    let gas_category = if gas_delta < 0.0 {
        "Gas (overspend hits Checkings)"
    } else {
        "Gas"
    };
    vec![
        BudgetRow::new("Net Income", "-", None, totals.income),
        share(Bucket::GasBonus),
        BudgetRow::new("Gas Remaining", gas_category, None, gas_delta),
        share(Bucket::Mom),
        share(Bucket::Checkings),
        BudgetRow::new("Subscriptions (Monthly)", "Recurring", None, subscriptions.monthly),
        share(Bucket::Hysa),
        share(Bucket::Roth),
        BudgetRow::new("Yearly Subscriptions", "Recurring", None, subscriptions.yearly),
    ]
}
