//! Vault statistics, history series, allocations and deposits.

use axum::{
    extract::{Json as AxumJson, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::{days_param, ApiError, ApiResult, AppState};
use crate::ledger::wagers::round_to;

#[derive(Debug, Deserialize)]
pub struct VaultStatsQuery {
    pub wallet: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultStatsResponse {
    pub total_value_locked: f64,
    pub win_user_count: u32,
    pub lose_user_count: u32,
    pub win_percent: f64,
    pub vault_share_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_deposited_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_vault_shares: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_win_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_lose_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_win_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_win_amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct NavPoint {
    pub date: String,
    pub nav: f64,
}

#[derive(Debug, Serialize)]
pub struct TvlPoint {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct PortfolioAmountPoint {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct MarketAllocation {
    pub market: &'static str,
    pub allocation: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub amount: f64,
    pub wallet_address: String,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    pub transaction_hash: String,
    pub status: &'static str,
    pub message: &'static str,
}

const ALLOCATIONS: &[(&str, u32)] = &[
    ("Perps", 42),
    ("Spot", 28),
    ("Options", 18),
    ("Liquid Staking", 12),
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_vault_stats))
        .route("/nav/history", get(get_nav_history))
        .route("/tvl/history", get(get_tvl_history))
        .route("/portfolio/amount", get(get_portfolio_amount_history))
        .route("/allocations", get(get_market_allocations))
        .route("/deposit", post(post_deposit))
}

/// Vault-wide figures; user figures are added when a wallet is supplied.
pub async fn get_vault_stats(
    Query(params): Query<VaultStatsQuery>,
    State(state): State<AppState>,
) -> Json<VaultStatsResponse> {
    let ledger = &state.ledger;
    let profile = ledger.profile();

    let mut resp = VaultStatsResponse {
        total_value_locked: profile.total_vault_value_usd,
        win_user_count: profile.win_user_count,
        lose_user_count: profile.lose_user_count,
        win_percent: profile.win_percent,
        vault_share_price: profile.vault_share_price,
        user_deposited_amount: None,
        user_vault_shares: None,
        user_win_count: None,
        user_lose_count: None,
        user_win_rate: None,
        user_win_amount: None,
    };

    let has_wallet = params
        .wallet
        .as_deref()
        .is_some_and(|w| !w.trim().is_empty());
    if has_wallet {
        let stats = ledger.aggregate_stats();
        resp.user_deposited_amount = Some(profile.user_deposited_usd());
        resp.user_vault_shares = Some(round_to(profile.user_shares(), 4));
        resp.user_win_count = Some(stats.win_count);
        resp.user_lose_count = Some(stats.loss_count);
        resp.user_win_rate = Some(stats.win_rate);
        resp.user_win_amount = Some(stats.net_win_amount);
    }

    Json(resp)
}

pub async fn get_nav_history(
    Query(params): Query<DaysQuery>,
    State(state): State<AppState>,
) -> ApiResult<Vec<NavPoint>> {
    let days = days_param(params.days, 30, 365)?;
    let points = state
        .ledger
        .vault_nav_history(days)
        .into_iter()
        .map(|p| NavPoint {
            date: p.date,
            nav: p.value,
        })
        .collect();
    Ok(Json(points))
}

pub async fn get_tvl_history(
    Query(params): Query<DaysQuery>,
    State(state): State<AppState>,
) -> ApiResult<Vec<TvlPoint>> {
    let days = days_param(params.days, 30, 1095)?;
    let points = state
        .ledger
        .tvl_history(days)
        .into_iter()
        .map(|p| TvlPoint {
            date: p.date,
            value: p.value,
        })
        .collect();
    Ok(Json(points))
}

/// Portfolio value series ending on deposit plus net winnings.
pub async fn get_portfolio_amount_history(
    Query(params): Query<DaysQuery>,
    State(state): State<AppState>,
) -> ApiResult<Vec<PortfolioAmountPoint>> {
    let days = days_param(params.days, 30, 1095)?;
    let points = state
        .ledger
        .trajectory(days)
        .into_iter()
        .map(|p| PortfolioAmountPoint {
            date: p.date,
            amount: p.value,
        })
        .collect();
    Ok(Json(points))
}

pub async fn get_market_allocations() -> Json<Vec<MarketAllocation>> {
    Json(
        ALLOCATIONS
            .iter()
            .map(|&(market, allocation)| MarketAllocation { market, allocation })
            .collect(),
    )
}

/// Acknowledge a deposit. Nothing is verified or stored.
pub async fn post_deposit(AxumJson(req): AxumJson<DepositRequest>) -> ApiResult<DepositResponse> {
    let wallet = req.wallet_address.trim();
    if wallet.is_empty() {
        return Err(ApiError::bad_request("walletAddress required"));
    }
    if !(req.amount.is_finite() && req.amount > 0.0) {
        return Err(ApiError::bad_request("invalid amount"));
    }

    let tx = Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("deposit:{}:{}", wallet.to_lowercase(), req.amount).as_bytes(),
    );
    info!(
        wallet = %wallet,
        amount = req.amount,
        signed = req.signature.is_some(),
        "Deposit request accepted"
    );

    Ok(Json(DepositResponse {
        transaction_hash: tx.simple().to_string(),
        status: "pending",
        message: "Deposit transaction created",
    }))
}
