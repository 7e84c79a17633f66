use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed figures for the simulated vault and its single depositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaultProfile {
    pub total_vault_value_usd: f64,
    pub sol_price_usd: f64,
    pub user_deposited_sol: f64,
    pub total_shares: f64,
    pub win_user_count: u32,
    pub lose_user_count: u32,
    pub win_percent: f64,
    pub vault_share_price: f64,
    pub deposit_date: NaiveDate,
    pub estimated_yield_percent: f64,
    pub estimated_yield_sol: f64,
}

impl Default for VaultProfile {
    fn default() -> Self {
        Self {
            total_vault_value_usd: 2_847_392.45,
            sol_price_usd: 150.0,
            user_deposited_sol: 25.5,
            total_shares: 1_000_000.0,
            win_user_count: 912,
            lose_user_count: 335,
            win_percent: 73.1,
            vault_share_price: 1.0847,
            deposit_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap_or_default(),
            estimated_yield_percent: 8.47,
            estimated_yield_sol: 2.16,
        }
    }
}

impl VaultProfile {
    pub fn user_deposited_usd(&self) -> f64 {
        self.user_deposited_sol * self.sol_price_usd
    }

    /// User deposit as a fraction of the vault, 0 for an empty vault.
    pub fn ownership_ratio(&self) -> f64 {
        if self.total_vault_value_usd > 0.0 {
            self.user_deposited_usd() / self.total_vault_value_usd
        } else {
            0.0
        }
    }

    pub fn ownership_percent(&self) -> f64 {
        self.ownership_ratio() * 100.0
    }

    pub fn user_shares(&self) -> f64 {
        self.ownership_ratio() * self.total_shares
    }
}
