use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::rng::SeededDraws;

/// Prediction-market questions cycled through by the wager generator.
pub const DEFAULT_DESCRIPTIONS: &[&str] = &[
    "Will Trump say tariff",
    "Will BTC hit $100k by March",
    "Will Solana network handle 100k TPS?",
    "Will GDP growth exceed 2% in Q2?",
    "Will Layer 2 solutions process 50% of Ethereum transactions?",
    "Will AI tokens outperform BTC this quarter?",
    "Will S&P 500 hit new all-time high by June?",
    "Will Ethereum ETF be approved?",
    "Will Fed cut rates by 0.5%?",
    "Will inflation drop below 3%?",
    "Will DeFi TVL exceed $200B?",
    "Will NFT trading volume recover?",
    "Will stablecoin market cap grow 20%?",
    "Will crypto regulation pass Congress?",
    "Will Bitcoin halving cause price surge?",
];

const WINDOW_DAYS: i64 = 365;
const WIN_AMOUNT_RANGE: (f64, f64) = (100.0, 500.0);
const LOSS_AMOUNT_RANGE: (f64, f64) = (50.0, 200.0);
const YES_WEIGHT: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::Rejected => "REJECTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Yes,
    No,
}

/// One synthetic bet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerRecord {
    pub id: String,
    pub description: String,
    pub approval_status: ApprovalStatus,
    pub lifecycle_state: LifecycleState,
    pub outcome: Option<Outcome>,
    pub side: Side,
    pub timestamp: DateTime<Utc>,
    pub stake_display: String,
    pub risk_score: f64,
    pub confidence_percent: u32,
}

impl WagerRecord {
    pub fn is_open_approved(&self) -> bool {
        self.approval_status == ApprovalStatus::Approved
            && self.lifecycle_state == LifecycleState::Open
    }
}

/// Win/loss summary over settled approved wagers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub win_count: u32,
    pub loss_count: u32,
    pub total_bets: u32,
    pub win_rate: f64,
    pub net_win_amount: f64,
}

impl AggregateStats {
    fn from_counts(win_count: u32, loss_count: u32, net_win_amount: f64) -> Self {
        let total_bets = win_count + loss_count;
        let win_rate = if total_bets > 0 {
            win_count as f64 / total_bets as f64 * 100.0
        } else {
            0.0
        };
        Self {
            win_count,
            loss_count,
            total_bets,
            win_rate,
            net_win_amount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WagerParams {
    pub count: usize,
    pub open_tail_count: usize,
    pub descriptions: Vec<String>,
    pub approval_rate: f64,
    pub win_rate: f64,
}

impl Default for WagerParams {
    fn default() -> Self {
        Self {
            count: 365,
            open_tail_count: 10,
            descriptions: DEFAULT_DESCRIPTIONS.iter().map(|s| s.to_string()).collect(),
            approval_rate: 0.8,
            win_rate: 0.8,
        }
    }
}

/// Generate `params.count` wagers ending at `anchor`.
///
/// Draw order per index: approval, win (closed approved only), win/loss amount,
/// side, stake, risk score, confidence. Changing the order changes every
/// downstream number, including the trajectory end value.
pub fn generate(
    params: &WagerParams,
    draws: &mut SeededDraws,
    anchor: DateTime<Utc>,
) -> (Vec<WagerRecord>, AggregateStats) {
    let count = params.count;
    let open_from = count.saturating_sub(params.open_tail_count);
    let window_start = anchor - Duration::days(WINDOW_DAYS);
    let step_ms = if count > 0 {
        Duration::days(WINDOW_DAYS).num_milliseconds() / count as i64
    } else {
        0
    };

    let mut records = Vec::with_capacity(count);
    let mut win_count = 0u32;
    let mut loss_count = 0u32;
    let mut net_win_amount = 0.0f64;

    for i in 0..count {
        let approved = draws.unit() < params.approval_rate;

        let (approval_status, lifecycle_state, outcome) = if approved {
            if i >= open_from {
                (ApprovalStatus::Approved, LifecycleState::Open, None)
            } else if draws.unit() < params.win_rate {
                win_count += 1;
                net_win_amount += draws.uniform(WIN_AMOUNT_RANGE.0, WIN_AMOUNT_RANGE.1);
                (ApprovalStatus::Approved, LifecycleState::Closed, Some(Outcome::Win))
            } else {
                loss_count += 1;
                net_win_amount -= draws.uniform(LOSS_AMOUNT_RANGE.0, LOSS_AMOUNT_RANGE.1);
                (ApprovalStatus::Approved, LifecycleState::Closed, Some(Outcome::Loss))
            }
        } else {
            (ApprovalStatus::Rejected, LifecycleState::Closed, None)
        };

        let side = if draws.unit() < YES_WEIGHT {
            Side::Yes
        } else {
            Side::No
        };

        let description = if params.descriptions.is_empty() {
            String::new()
        } else {
            params.descriptions[i % params.descriptions.len()].clone()
        };

        let stake = draws.int_inclusive(100, 1000);
        let risk_score = round_to(draws.uniform(4.0, 9.0), 1);
        let confidence_percent = draws.int_inclusive(60, 90) as u32;

        records.push(WagerRecord {
            id: format!("prop-{:03}", i + 1),
            description,
            approval_status,
            lifecycle_state,
            outcome,
            side,
            timestamp: window_start + Duration::milliseconds(step_ms * i as i64),
            stake_display: format!("${}", group_thousands(stake)),
            risk_score,
            confidence_percent,
        });
    }

    (
        records,
        AggregateStats::from_counts(win_count, loss_count, net_win_amount),
    )
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
