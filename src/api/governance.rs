//! Governance proposals.
//!
//! Each ledger wager is served as a proposal; votes are acknowledged but not
//! recorded.

use axum::{
    extract::{Json as AxumJson, Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::format::iso_timestamp;
use super::{ApiError, ApiResult, AppState};
use crate::ledger::{ApprovalStatus, LifecycleState, Outcome, PositionSide, Side, WagerRecord};

const BET_URL_BASE: &str = "https://polymarket.com/bet";
const EVENT_URL_BASE: &str = "https://polymarket.com/event";

#[derive(Debug, Deserialize)]
pub struct ProposalsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    pub id: String,
    pub market: String,
    pub direction: PositionSide,
    pub position_size: String,
    pub risk_score: f64,
    pub confidence: u32,
    pub status: ApprovalStatus,
    pub summary: String,
    pub timestamp: String,
    pub data_sources: Vec<String>,
    pub bet_status: LifecycleState,
    pub bet_result: Option<Outcome>,
    pub closed_at: Option<String>,
    pub vote: Side,
}

impl ProposalView {
    fn from_record(record: &WagerRecord, source_base: &str) -> Self {
        let timestamp = iso_timestamp(record.timestamp);
        Self {
            id: record.id.clone(),
            market: record.description.clone(),
            direction: record.side.into(),
            position_size: record.stake_display.clone(),
            risk_score: record.risk_score,
            confidence: record.confidence_percent,
            status: record.approval_status,
            summary: record.description.clone(),
            // Settled wagers close on the day they were placed.
            closed_at: record.outcome.map(|_| timestamp.clone()),
            timestamp,
            data_sources: vec![format!("{source_base}/{}", record.id)],
            bet_status: record.lifecycle_state,
            bet_result: record.outcome,
            vote: record.side,
        }
    }
}

impl From<&WagerRecord> for ProposalView {
    fn from(record: &WagerRecord) -> Self {
        Self::from_record(record, BET_URL_BASE)
    }
}

#[derive(Debug, Serialize)]
pub struct AgentReasoning {
    pub agent: &'static str,
    pub vote: Side,
    pub rationale: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub vote: String,
    pub wallet_address: String,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub message: &'static str,
    pub vote_id: Option<String>,
}

const REASONING: &[(&str, Side, &str)] = &[
    (
        "Quant Analyst",
        Side::Yes,
        "Bollinger bands squeezing with RSI at 68 indicates strong momentum building. The 20-day moving average has crossed above the 50-day, forming a golden cross pattern. Volume profile shows increasing accumulation over the past 48 hours, with large buy orders at $98.50 support level. MACD histogram is positive and expanding, suggesting continued upward momentum. Fibonacci retracement from recent swing high shows we're at 61.8% level, which historically acts as strong support before continuation moves. My technical analysis suggests a 78% probability of reaching $105 target within 7 days based on similar historical patterns.",
    ),
    (
        "Risk Manager",
        Side::Yes,
        "Portfolio heat check: currently at 42%, sufficient room for this $150k position which would bring us to 58% - still well within our 75% threshold. Correlation analysis shows SOL-PERP has 0.72 correlation with our existing JTO long position, which is manageable. Maximum drawdown scenario: if SOL drops 15% (worst case), our portfolio would see 3.2% drawdown, well within our 5% daily limit. Position sizing is appropriate at 5.3% of portfolio. Risk-adjusted return calculation shows Sharpe ratio improvement of 0.12 if this trade executes. I approve with the condition that we set a stop-loss at $95.50 (3% below entry) to limit downside exposure.",
    ),
    (
        "Market Maker",
        Side::Yes,
        "Order book depth analysis shows strong liquidity on both sides. Bid-ask spread is currently 0.08% which is tight for SOL-PERP, indicating healthy market conditions. Large limit orders visible at $98.00-$98.50 range provide natural support. Order flow data from the past 2 hours shows 65% buy volume vs 35% sell volume, indicating institutional accumulation. Market depth at current price level can absorb our $150k position without significant slippage (estimated 0.12% slippage). Liquidity providers are active, and we should be able to enter and exit efficiently. The market microstructure supports this trade execution.",
    ),
    (
        "News Analyst",
        Side::No,
        "Sentiment analysis from social media shows mixed signals. Twitter/X sentiment score is 52/100 (neutral), with recent mentions showing some concern about regulatory developments. News flow in the past 24 hours includes: (1) SEC comments on crypto regulation (slightly negative), (2) Solana Foundation partnership announcement (positive), (3) Major exchange listing rumors (positive). However, the regulatory uncertainty creates headwinds. On-chain metrics show whale accumulation (positive), but retail sentiment is cooling. My sentiment model gives this trade a 45% probability of success based on news catalysts. I recommend waiting 24-48 hours for clearer regulatory signals before entering this position.",
    ),
    (
        "Arbitrage Analyst",
        Side::Yes,
        "Cross-market analysis reveals SOL is trading at a 0.8% premium on perpetual futures vs spot markets, which is within normal range but suggests slight bullish bias. Funding rate is positive at 0.012% per 8 hours, indicating long interest. Options market shows put-call ratio of 0.65, suggesting bullish sentiment. The SOL/BTC ratio has been strengthening, indicating SOL outperformance. Statistical arbitrage opportunities are limited currently, but the directional trade has merit. I've identified that if we enter this position, we can hedge with a small BTC short to capture the ratio spread, improving our risk-adjusted returns. The arbitrage landscape supports this trade with additional hedging opportunities available.",
    ),
];

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/proposals", get(get_proposals))
        .route("/proposals/:proposal_id", get(get_proposal))
        .route(
            "/proposals/:proposal_id/reasoning",
            get(get_proposal_reasoning),
        )
        .route("/proposals/:proposal_id/vote", post(post_vote))
        .route("/random-bet", get(get_random_bet))
}

/// All wagers as proposals, optionally filtered by approval status.
pub async fn get_proposals(
    Query(params): Query<ProposalsQuery>,
    State(state): State<AppState>,
) -> ApiResult<Vec<ProposalView>> {
    let limit = params.limit.unwrap_or(50);
    if !(1..=100).contains(&limit) {
        return Err(ApiError::unprocessable("limit must be between 1 and 100"));
    }
    let status = params
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_uppercase);

    let proposals = state
        .ledger
        .list_wagers()
        .iter()
        .filter(|r| {
            status
                .as_deref()
                .map_or(true, |s| r.approval_status.as_str() == s)
        })
        .take(limit as usize)
        .map(ProposalView::from)
        .collect();
    Ok(Json(proposals))
}

pub async fn get_proposal(
    Path(proposal_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<ProposalView> {
    state
        .ledger
        .get_wager(&proposal_id)
        .map(|r| Json(ProposalView::from(r)))
        .ok_or_else(|| ApiError::not_found("Proposal not found"))
}

pub async fn get_proposal_reasoning(Path(_proposal_id): Path<String>) -> Json<Vec<AgentReasoning>> {
    Json(
        REASONING
            .iter()
            .map(|&(agent, vote, rationale)| AgentReasoning {
                agent,
                vote,
                rationale,
            })
            .collect(),
    )
}

/// Acknowledge a vote. Signatures are not checked and nothing is stored.
pub async fn post_vote(
    Path(proposal_id): Path<String>,
    State(state): State<AppState>,
    AxumJson(req): AxumJson<VoteRequest>,
) -> ApiResult<VoteResponse> {
    if !matches!(req.vote.as_str(), "YES" | "NO") {
        return Err(ApiError::bad_request("Vote must be 'YES' or 'NO'"));
    }
    if state.ledger.get_wager(&proposal_id).is_none() {
        return Err(ApiError::not_found("Proposal not found"));
    }

    let wallet = req.wallet_address.trim().to_lowercase();
    let vote_id = Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("vote:{proposal_id}:{wallet}").as_bytes(),
    );
    info!(
        proposal_id = %proposal_id,
        wallet = %wallet,
        vote = %req.vote,
        signed = req.signature.is_some(),
        "Vote acknowledged"
    );

    Ok(Json(VoteResponse {
        success: true,
        message: "Vote recorded",
        vote_id: Some(format!("vote-{vote_id}")),
    }))
}

/// One wager per call from a seeded pick stream.
pub async fn get_random_bet(State(state): State<AppState>) -> ApiResult<ProposalView> {
    let ordinal = state.next_pick();
    state
        .ledger
        .pick_wager(ordinal)
        .map(|r| Json(ProposalView::from_record(r, EVENT_URL_BASE)))
        .ok_or_else(|| ApiError::not_found("No bets available"))
}
