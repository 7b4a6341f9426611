use serde::{Deserialize, Serialize};

use crate::currency::round2;

use super::ConfigError;

/// Stores the allocation policy and gas bonus settings. Unknown keys are
/// ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub allocation: AllocationPolicy,
    #[serde(default)]
    pub gas: GasBonusSettings,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.allocation.validate()?;
        self.gas.validate()
    }
}

/// Relative weights for the three-way split of what remains after the gas
/// bonus and MOM buckets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitWeights {
    pub checkings: f64,
    pub hysa: f64,
    pub roth: f64,
}

impl Default for SplitWeights {
    fn default() -> Self {
        Self {
            checkings: 1.4,
            hysa: 2.0,
            roth: 1.0,
        }
    }
}

impl SplitWeights {
    pub fn sum(&self) -> f64 {
        self.checkings + self.hysa + self.roth
    }
}

/// Tiers, weights and caps driving the allocation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationPolicy {
    /// Share of the base pool that goes to MOM.
    pub mom_rate: f64,
    /// Minimum MOM amount once the month's total reaches `mom_floor_threshold`.
    pub mom_floor: f64,
    pub mom_floor_threshold: f64,
    pub weights: SplitWeights,
    /// Checkings may not exceed this share of the month's total.
    pub checkings_cap_rate: f64,
    /// Share of capped-off checkings excess sent to HYSA; the rest goes to Roth.
    pub cap_excess_to_hysa: f64,
    /// HYSA must end strictly above Roth; this is the margin added when
    /// rebalancing to get it there.
    pub hysa_over_roth_margin: f64,
    /// Percent shortfall below which no residual correction is applied.
    pub residual_tolerance: f64,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            mom_rate: 0.11,
            mom_floor: 100.0,
            mom_floor_threshold: 200.0,
            weights: SplitWeights::default(),
            checkings_cap_rate: 0.20,
            cap_excess_to_hysa: 0.6,
            hysa_over_roth_margin: 0.01,
            residual_tolerance: 1e-9,
        }
    }
}

impl AllocationPolicy {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("mom_rate", self.mom_rate),
            ("mom_floor", self.mom_floor),
            ("mom_floor_threshold", self.mom_floor_threshold),
            ("weights.checkings", self.weights.checkings),
            ("weights.hysa", self.weights.hysa),
            ("weights.roth", self.weights.roth),
            ("checkings_cap_rate", self.checkings_cap_rate),
            ("hysa_over_roth_margin", self.hysa_over_roth_margin),
            ("residual_tolerance", self.residual_tolerance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.weights.sum() <= 0.0 {
            return Err(ConfigError::Invalid(
                "split weights must not all be zero".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.cap_excess_to_hysa) {
            return Err(ConfigError::Invalid(format!(
                "cap_excess_to_hysa must be within 0..=1, got {}",
                self.cap_excess_to_hysa
            )));
        }
        Ok(())
    }
}

/// The recurring gas bonus: a fixed gross amount taxed at a flat rate,
/// injected once a month after `injection_day`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasBonusSettings {
    pub gross: f64,
    pub tax_rate: f64,
    pub injection_day: u32,
}

impl Default for GasBonusSettings {
    fn default() -> Self {
        Self {
            gross: 100.0,
            tax_rate: 0.0816,
            injection_day: 15,
        }
    }
}

impl GasBonusSettings {
    /// Net bonus after tax, in cents.
    pub fn net(&self) -> f64 {
        round2(self.gross * (1.0 - self.tax_rate))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gross.is_finite() || self.gross < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gas bonus gross must be non-negative, got {}",
                self.gross
            )));
        }
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(ConfigError::Invalid(format!(
                "gas bonus tax rate must be within 0..=1, got {}",
                self.tax_rate
            )));
        }
        if !(1..=31).contains(&self.injection_day) {
            return Err(ConfigError::Invalid(format!(
                "gas bonus injection day must be within 1..=31, got {}",
                self.injection_day
            )));
        }
        Ok(())
    }
}
