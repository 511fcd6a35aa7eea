//! Balance evaluation.

use super::entities::{Asset, BalanceReport};

/// Amount of `asset` held by `holder`; zero when the holder has no entry.
pub fn balance_of(asset: &Asset, holder: &str) -> f64 {
    asset.balances.get(holder).copied().unwrap_or(0.0)
}

/// Balance of `holder` packaged as a query result.
pub fn balance_report(asset: &Asset, holder: &str) -> BalanceReport {
    BalanceReport {
        identity: holder.to_string(),
        balance: balance_of(asset, holder),
    }
}
