//! Folds the month's gas delta into the allocation and rounds everything to
//! cents so MOM, Gross HYSA and Roth tie out to the month's net income.

use tracing::warn;

use crate::currency::round2;
use crate::domain::{Allocation, Summary};

/// Largest cent drift from independent roundings that is absorbed into Net
/// Checking. Anything larger is left visible in [`Summary::residual`].
pub const MAX_CENT_DRIFT: f64 = 0.02;

/// Share of an unspent gas bonus that goes to MOM; the rest goes to checking.
const GAS_SURPLUS_TO_MOM: f64 = 2.0 / 3.0;

/// Builds the summary view.
///
/// `gas_delta` is the gas bonus available minus gas actually spent. A
/// positive delta is split between MOM and Net Checking; an overspend is not
/// re-added here since it already comes out of checking.
pub fn reconcile(total: f64, allocation: &Allocation, gas_delta: f64) -> Summary {
    let amounts = &allocation.amounts;
    let mut net_checking = amounts.checkings;
    let mut mom = amounts.mom;

    if gas_delta > 0.0 {
        let (to_mom, to_checking) = split_gas_surplus(gas_delta);
        mom += to_mom;
        net_checking += to_checking;
    }

    let mom = round2(mom);
    net_checking = round2(net_checking);
    let mut gross_hysa = round2(net_checking + amounts.hysa);
    let roth = round2(amounts.roth);
    let target_total = round2(total);

    let residual = round2(target_total - round2(mom + gross_hysa + roth));
    if residual != 0.0 && residual.abs() <= MAX_CENT_DRIFT {
        // Shift both rows by the same cents. Re-rounding HYSA here can flip
        // a half cent and leave the opposite drift behind.
        net_checking = round2(net_checking + residual);
        gross_hysa = round2(gross_hysa + residual);
    }

    let remaining = round2(target_total - round2(mom + gross_hysa + roth));
    if remaining != 0.0 {
        warn!(
            "summary is off by {:.2} against net income {:.2}",
            remaining, target_total
        );
    }

    Summary {
        net_income: round2(total - (amounts.gas_bonus - gas_delta)),
        mom,
        net_checking,
        gross_hysa,
        roth,
        target_total,
        residual: remaining,
    }
}

/// Splits an unspent gas bonus two thirds to MOM and the rest to checking,
/// each rounded to cents independently.
pub fn split_gas_surplus(gas_delta: f64) -> (f64, f64) {
    let to_mom = round2(gas_delta * GAS_SURPLUS_TO_MOM);
    let to_checking = round2(gas_delta - to_mom);
    (to_mom, to_checking)
}
