//! Derived allocation views. Never persisted; recomputed per month on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Buckets a month's net income is split across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bucket {
    GasBonus,
    Mom,
    Checkings,
    Hysa,
    Roth,
}

impl Bucket {
    pub const ALL: [Bucket; 5] = [
        Bucket::GasBonus,
        Bucket::Mom,
        Bucket::Checkings,
        Bucket::Hysa,
        Bucket::Roth,
    ];

    pub fn account(self) -> &'static str {
        match self {
            Bucket::GasBonus => "Gas Bonus",
            Bucket::Mom => "MOM",
            Bucket::Checkings => "AMEX Checkings",
            Bucket::Hysa => "AMEX HYSA",
            Bucket::Roth => "RothIRA",
        }
    }

    pub fn category(self) -> &'static str {
        match self {
            Bucket::GasBonus => "Gas",
            Bucket::Mom => "Mom",
            Bucket::Checkings => "Spending",
            Bucket::Hysa => "Savings",
            Bucket::Roth => "Retirement",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.account())
    }
}

/// One value per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketValues {
    pub gas_bonus: f64,
    pub mom: f64,
    pub checkings: f64,
    pub hysa: f64,
    pub roth: f64,
}

impl BucketValues {
    pub fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::GasBonus => self.gas_bonus,
            Bucket::Mom => self.mom,
            Bucket::Checkings => self.checkings,
            Bucket::Hysa => self.hysa,
            Bucket::Roth => self.roth,
        }
    }

    pub fn sum(&self) -> f64 {
        self.gas_bonus + self.mom + self.checkings + self.hysa + self.roth
    }
}

/// Output of the allocation engine: bucket amounts and their share of the
/// month's net income. Shares sum to one whenever the total is positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub total: f64,
    pub amounts: BucketValues,
    pub percents: BucketValues,
}

impl Allocation {
    pub fn zero(total: f64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn amount(&self, bucket: Bucket) -> f64 {
        self.amounts.get(bucket)
    }

    pub fn percent(&self, bucket: Bucket) -> f64 {
        self.percents.get(bucket)
    }

    pub fn shares(&self) -> Vec<BucketShare> {
        Bucket::ALL
            .iter()
            .map(|&bucket| BucketShare {
                bucket,
                amount: self.amount(bucket),
                percent: self.percent(bucket),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketShare {
    pub bucket: Bucket,
    pub amount: f64,
    pub percent: f64,
}

/// Cent-exact coarse view of a month: MOM + Gross HYSA + Roth tie out to the
/// net income target once reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Net income less actual gas spend.
    pub net_income: f64,
    pub mom: f64,
    pub net_checking: f64,
    /// Net checking plus HYSA.
    pub gross_hysa: f64,
    pub roth: f64,
    /// Cent-rounded month net income the rows reconcile against.
    pub target_total: f64,
    /// Difference still visible after reconciliation; zero when balanced.
    pub residual: f64,
}

impl Summary {
    pub fn allocated_total(&self) -> f64 {
        self.mom + self.gross_hysa + self.roth
    }

    pub fn is_balanced(&self) -> bool {
        self.residual == 0.0
    }

    pub fn rows(&self) -> Vec<SummaryRow> {
        vec![
            SummaryRow::new("Net Income", "- gas", self.net_income),
            SummaryRow::new("MOM", "Mom", self.mom),
            SummaryRow::new("Net Checking", "Spending budget", self.net_checking),
            SummaryRow::new("Gross HYSA", "Checking + HYSA", self.gross_hysa),
            SummaryRow::new("RothIRA", "Retirement", self.roth),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub account: String,
    pub category: String,
    pub amount: f64,
}

impl SummaryRow {
    fn new(account: &str, category: &str, amount: f64) -> Self {
        Self {
            account: account.into(),
            category: category.into(),
            amount,
        }
    }
}

/// A line of the detailed monthly budget. `percent` is `None` for
/// informational rows that are not part of the split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    pub account: String,
    pub category: String,
    pub percent: Option<f64>,
    pub amount: f64,
}

impl BudgetRow {
    pub fn new(
        account: impl Into<String>,
        category: impl Into<String>,
        percent: Option<f64>,
        amount: f64,
    ) -> Self {
        Self {
            account: account.into(),
            category: category.into(),
            percent,
            amount,
        }
    }

    pub fn from_share(share: BucketShare) -> Self {
        Self::new(
            share.bucket.account(),
            share.bucket.category(),
            Some(share.percent),
            share.amount,
        )
    }

    /// Zero-value informational rows, which presenters usually hide.
    pub fn is_empty(&self) -> bool {
        self.percent.is_none() && self.amount == 0.0
    }
}
