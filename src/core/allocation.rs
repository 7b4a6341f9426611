//! Splits a month's net income across the Gas Bonus, MOM, Checkings, HYSA and
//! Roth buckets.
//!
//! The split is a pure function of the month's total, the gas bonus actually
//! received, and the [`AllocationPolicy`]:
//!
//! 1. A non-positive total allocates nothing.
//! 2. The gas bonus is carved out first, never exceeding the total.
//! 3. MOM takes a share of what is left, floored once the total reaches the
//!    floor threshold, but never more than what is left.
//! 4. The remainder is split by weight across Checkings, HYSA and Roth.
//! 5. Checkings is capped at a share of the total; the excess moves to HYSA
//!    and Roth.
//! 6. HYSA must strictly exceed Roth (see [`enforce_hysa_above_roth`]).
//! 7. Any percentage shortfall is added to Roth so shares sum to one.

use tracing::debug;

use crate::config::{AllocationPolicy, GasBonusSettings};
use crate::domain::{Allocation, BucketValues};

pub struct AllocationEngine;

impl AllocationEngine {
    /// Allocates `total` using the default policy and gas bonus settings.
    pub fn compute(total: f64, gas_bonus_net: f64) -> Allocation {
        Self::allocate(
            total,
            gas_bonus_net,
            &AllocationPolicy::default(),
            &GasBonusSettings::default(),
        )
    }

    /// Allocates `total`. A non-positive or non-finite `gas_bonus_net` means no
    /// bonus was recorded, and the configured net bonus is used instead.
    ///
    /// A negative bonus is treated the same way on purpose: it cannot come from
    /// a validated record, so it is read as "no bonus yet" rather than as a
    /// negative bucket.
    pub fn allocate(
        total: f64,
        gas_bonus_net: f64,
        policy: &AllocationPolicy,
        gas: &GasBonusSettings,
    ) -> Allocation {
        if !(total > 0.0) || !total.is_finite() {
            return Allocation::zero(total);
        }

        let fixed_gas = if gas_bonus_net.is_finite() && gas_bonus_net > 0.0 {
            gas_bonus_net
        } else {
            gas.net()
        };
        let gas_bonus = fixed_gas.min(total);
        let base_pool = (total - gas_bonus).max(0.0);

        let mut mom = base_pool * policy.mom_rate;
        if total >= policy.mom_floor_threshold {
            mom = mom.max(policy.mom_floor);
        }
        mom = mom.min(base_pool);

        let remaining = (base_pool - mom).max(0.0);

        let weights = policy.weights;
        let weight_sum = if weights.sum() > 0.0 {
            weights.sum()
        } else {
            1.0
        };
        let mut checkings = remaining * (weights.checkings / weight_sum);
        let mut hysa = remaining * (weights.hysa / weight_sum);
        let mut roth = remaining * (weights.roth / weight_sum);

        let max_checkings = total * policy.checkings_cap_rate;
        if checkings > max_checkings {
            let excess = checkings - max_checkings;
            debug!(
                "checkings {:.2} exceeds cap {:.2}, redistributing {:.2}",
                checkings, max_checkings, excess
            );
            checkings = max_checkings;
            hysa += excess * policy.cap_excess_to_hysa;
            roth += excess * (1.0 - policy.cap_excess_to_hysa);
        }

        let (hysa, roth) = enforce_hysa_above_roth(hysa, roth, policy.hysa_over_roth_margin);

        let mut amounts = BucketValues {
            gas_bonus,
            mom,
            checkings,
            hysa,
            roth,
        };
        let mut percents = shares_of(&amounts, total);

        let residual = 1.0 - percents.sum();
        if residual > policy.residual_tolerance {
            debug!(
                "adding residual share {:.9} ({:.2}) to Roth",
                residual,
                residual * total
            );
            amounts.roth += residual * total;
            percents.roth = amounts.roth / total;
        }

        Allocation {
            total,
            amounts,
            percents,
        }
    }
}

/// HYSA must strictly exceed Roth. When it does not, moves half the gap plus
/// `margin` from Roth to HYSA, bounded by Roth's balance. If Roth still ends
/// negative, HYSA absorbs the shortfall and Roth is zeroed; HYSA itself is not
/// protected from going negative here.
pub fn enforce_hysa_above_roth(hysa: f64, roth: f64, margin: f64) -> (f64, f64) {
    if hysa > roth || hysa + roth <= 0.0 {
        return (hysa, roth);
    }
    let shift = ((roth - hysa) / 2.0 + margin).min(roth);
    debug!("moving {:.2} from Roth to HYSA to keep HYSA above Roth", shift);
    let mut hysa = hysa + shift;
    let mut roth = roth - shift;
    if roth < 0.0 {
        hysa += roth;
        roth = 0.0;
    }
    (hysa, roth)
}

fn shares_of(amounts: &BucketValues, total: f64) -> BucketValues {
    BucketValues {
        gas_bonus: amounts.gas_bonus / total,
        mom: amounts.mom / total,
        checkings: amounts.checkings / total,
        hysa: amounts.hysa / total,
        roth: amounts.roth / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SplitWeights;

    fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() <= tolerance
    }

    #[test]
    fn non_positive_totals_allocate_nothing() {
        for total in [0.0, -50.0, f64::NAN] {
            let allocation = AllocationEngine::compute(total, 91.84);
            assert_eq!(allocation.amounts, BucketValues::default());
            assert_eq!(allocation.percents, BucketValues::default());
        }
    }

    #[test]
    fn thousand_dollar_month_matches_worked_example() {
        let allocation = AllocationEngine::compute(1000.0, 91.84);
        let amounts = allocation.amounts;
        assert!(close(amounts.gas_bonus, 91.84, 1e-9));
        assert!(close(amounts.mom, 100.0, 1e-9));
        assert!(close(amounts.checkings, 200.0, 1e-9));
        assert!(close(amounts.hysa, 401.63, 0.005));
        assert!(close(amounts.roth, 206.53, 0.005));
        assert!(close(amounts.sum(), 1000.0, 1e-6));
        assert!(close(allocation.percents.gas_bonus, 0.09184, 1e-12));
        assert!(close(allocation.percents.sum(), 1.0, 1e-9));
    }

    #[test]
    fn missing_bonus_uses_configured_default() {
        let recorded = AllocationEngine::compute(800.0, 0.0);
        assert!(close(recorded.amounts.gas_bonus, 91.84, 1e-9));
        for missing in [-10.0, f64::NAN, f64::NEG_INFINITY, f64::INFINITY] {
            let allocation = AllocationEngine::compute(800.0, missing);
            assert!(close(allocation.amounts.gas_bonus, 91.84, 1e-9), "{missing}");
            assert!(allocation.amounts.gas_bonus >= 0.0);
        }
    }

    #[test]
    fn gas_bonus_never_exceeds_total() {
        let allocation = AllocationEngine::compute(50.0, 91.84);
        assert_eq!(allocation.amounts.gas_bonus, 50.0);
        assert_eq!(allocation.amounts.mom, 0.0);
        assert_eq!(allocation.percents.gas_bonus, 1.0);
    }

    #[test]
    fn mom_floor_applies_only_from_threshold() {
        let below = AllocationEngine::compute(199.0, 91.84);
        assert!(close(below.amounts.mom, (199.0 - 91.84) * 0.11, 1e-9));

        let at = AllocationEngine::compute(200.0, 91.84);
        assert!(close(at.amounts.mom, 100.0, 1e-9));

        // Floor is bounded by the base pool.
        let tight = AllocationEngine::compute(250.0, 200.0);
        assert!(close(tight.amounts.mom, 50.0, 1e-9));
    }

    #[test]
    fn checkings_is_capped_and_excess_redistributed() {
        let allocation = AllocationEngine::compute(5000.0, 91.84);
        assert!(close(allocation.amounts.checkings, 1000.0, 1e-9));
        assert!(allocation.amounts.hysa > allocation.amounts.roth);
        assert!(close(allocation.amounts.sum(), 5000.0, 1e-6));
    }

    #[test]
    fn tie_break_keeps_hysa_strictly_above_roth() {
        let mut policy = AllocationPolicy::default();
        policy.weights = SplitWeights {
            checkings: 1.0,
            hysa: 1.0,
            roth: 1.0,
        };
        policy.checkings_cap_rate = 1.0;
        let allocation =
            AllocationEngine::allocate(600.0, 91.84, &policy, &GasBonusSettings::default());
        let amounts = allocation.amounts;
        assert!(amounts.hysa > amounts.roth);
        assert!(close(amounts.hysa - amounts.roth, 0.02, 1e-9));
        assert!(close(amounts.sum(), 600.0, 1e-6));
    }

    #[test]
    fn tie_break_shift_is_bounded_by_roth() {
        assert_eq!(enforce_hysa_above_roth(0.0, 0.0, 0.01), (0.0, 0.0));
        assert_eq!(enforce_hysa_above_roth(5.0, 1.0, 0.01), (5.0, 1.0));
        let (hysa, roth) = enforce_hysa_above_roth(0.0, 0.005, 0.01);
        assert!(close(hysa, 0.005, 1e-12));
        assert_eq!(roth, 0.0);
    }

    #[test]
    fn unallocated_remainder_lands_in_roth() {
        let mut policy = AllocationPolicy::default();
        policy.weights = SplitWeights {
            checkings: 0.0,
            hysa: 0.0,
            roth: 0.0,
        };
        let allocation =
            AllocationEngine::allocate(1000.0, 91.84, &policy, &GasBonusSettings::default());
        assert!(close(allocation.amounts.roth, 1000.0 - 91.84 - 100.0, 1e-6));
        assert!(close(allocation.percents.sum(), 1.0, 1e-9));
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let first = AllocationEngine::compute(1234.56, 91.84);
        let second = AllocationEngine::compute(1234.56, 91.84);
        assert_eq!(first, second);
    }
}
