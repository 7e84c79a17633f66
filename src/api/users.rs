//! Per-user profile, NAV history, commentary and deposits.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::format::{iso_timestamp, usd_grouped};
use super::{days_param, wallet_param, ApiResult, AppState};
use crate::ledger::{wagers::round_to, AggregateStats, LedgerSnapshot};

const COMMENTARY_AGENT: &str = "AI Trading System";

#[derive(Debug, Deserialize)]
pub struct WalletQuery {
    pub wallet: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WalletDaysQuery {
    pub wallet: Option<String>,
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub total_deposited: f64,
    pub deposit_date: String,
    pub days_in_vault: i64,
    pub vault_share_percent: f64,
    pub vault_shares: f64,
    pub estimated_yield_percent: f64,
    #[serde(rename = "estimatedYieldSOL")]
    pub estimated_yield_sol: f64,
}

#[derive(Debug, Serialize)]
pub struct NavPoint {
    pub date: String,
    pub nav: f64,
}

#[derive(Debug, Serialize)]
pub struct AgentCommentary {
    pub agent: &'static str,
    pub timestamp: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub id: String,
    pub amount: f64,
    pub timestamp: String,
    pub transaction_hash: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositTotal {
    pub deposited_amount: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_user_profile))
        .route("/nav/history", get(get_user_nav_history))
        .route("/commentary", get(get_user_commentary))
        .route("/deposits", get(get_user_deposits))
        .route("/:wallet/deposit", get(get_user_deposit_amount))
}

pub async fn get_user_profile(
    Query(params): Query<WalletQuery>,
    State(state): State<AppState>,
) -> ApiResult<UserProfileResponse> {
    wallet_param(params.wallet.as_deref())?;
    let ledger = &state.ledger;
    let profile = ledger.profile();

    Ok(Json(UserProfileResponse {
        total_deposited: profile.user_deposited_sol,
        deposit_date: profile.deposit_date.format("%b %-d, %Y").to_string(),
        days_in_vault: ledger.days_in_vault(),
        vault_share_percent: round_to(profile.ownership_percent(), 2),
        vault_shares: round_to(profile.user_shares(), 4),
        estimated_yield_percent: profile.estimated_yield_percent,
        estimated_yield_sol: profile.estimated_yield_sol,
    }))
}

/// The user's portfolio series expressed per unit of deposit.
pub async fn get_user_nav_history(
    Query(params): Query<WalletDaysQuery>,
    State(state): State<AppState>,
) -> ApiResult<Vec<NavPoint>> {
    wallet_param(params.wallet.as_deref())?;
    let days = days_param(params.days, 30, 365)?;
    let points = state
        .ledger
        .user_nav_history(days)
        .into_iter()
        .map(|p| NavPoint {
            date: p.date,
            nav: p.value,
        })
        .collect();
    Ok(Json(points))
}

pub async fn get_user_commentary(
    Query(params): Query<WalletQuery>,
    State(state): State<AppState>,
) -> ApiResult<AgentCommentary> {
    wallet_param(params.wallet.as_deref())?;
    Ok(Json(AgentCommentary {
        agent: COMMENTARY_AGENT,
        timestamp: "Just now",
        message: commentary_message(&state.ledger.aggregate_stats()),
    }))
}

pub async fn get_user_deposits(
    Query(params): Query<WalletQuery>,
    State(state): State<AppState>,
) -> ApiResult<Vec<Deposit>> {
    wallet_param(params.wallet.as_deref())?;
    Ok(Json(deposits(&state.ledger)))
}

/// Total deposited for the wallet in the path.
pub async fn get_user_deposit_amount(
    Path(wallet): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<DepositTotal> {
    wallet_param(Some(&wallet))?;
    let deposited_amount = deposits(&state.ledger).iter().map(|d| d.amount).sum();
    Ok(Json(DepositTotal { deposited_amount }))
}

fn deposits(ledger: &LedgerSnapshot) -> Vec<Deposit> {
    let profile = ledger.profile();
    let deposited_at = Utc.from_utc_datetime(
        &profile
            .deposit_date
            .and_time(NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()),
    );
    vec![Deposit {
        id: "deposit-001".to_string(),
        amount: profile.user_deposited_sol,
        timestamp: iso_timestamp(deposited_at),
        transaction_hash: "5j7s...".to_string(),
        status: "confirmed",
    }]
}

/// Summary of every settled bet, worded by the sign of the net result.
pub fn commentary_message(stats: &AggregateStats) -> String {
    let loss_word = if stats.loss_count == 1 { "loss" } else { "losses" };
    let amount = usd_grouped(stats.net_win_amount.abs());

    let mut message = format!(
        "Summary of all your bets: You've participated in {} total bets with {} wins and {} {}, resulting in a {:.1}% win rate. ",
        stats.total_bets, stats.win_count, stats.loss_count, loss_word, stats.win_rate
    );

    if stats.net_win_amount < 0.0 {
        message.push_str(&format!(
            "Your losing bets have resulted in a total loss of {amount}. Your risk management needs improvement, and you may want to reconsider your betting strategy or position sizing."
        ));
    } else {
        message.push_str(&format!(
            "Your winning bets have generated a total profit of {amount}. Your risk management has been effective, with well-diversified positions across multiple market types and appropriate position sizing."
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(win_count: u32, loss_count: u32, net_win_amount: f64) -> AggregateStats {
        let total_bets = win_count + loss_count;
        AggregateStats {
            win_count,
            loss_count,
            total_bets,
            win_rate: if total_bets > 0 {
                win_count as f64 / total_bets as f64 * 100.0
            } else {
                0.0
            },
            net_win_amount,
        }
    }

    #[test]
    fn test_commentary_profit() {
        let msg = commentary_message(&stats(8, 2, 1234.5));
        assert!(msg.contains("10 total bets with 8 wins and 2 losses"));
        assert!(msg.contains("80.0% win rate"));
        assert!(msg.contains("total profit of $1,234.50"));
    }

    #[test]
    fn test_commentary_loss_and_singular() {
        let msg = commentary_message(&stats(0, 1, -75.0));
        assert!(msg.contains("0 wins and 1 loss,"));
        assert!(msg.contains("total loss of $75.00"));
    }
}
