//! Agent personas and their debate transcripts.

use axum::{extract::Path, response::Json, routing::get, Router};
use serde::Serialize;

use super::AppState;
use crate::ledger::Side;

#[derive(Debug, Serialize)]
pub struct AgentPersona {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub avatar: &'static str,
    pub description: &'static str,
    pub specialty: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DebateMessage {
    pub agent: &'static str,
    pub message: &'static str,
    pub timestamp: &'static str,
    pub vote: Side,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateTranscript {
    pub proposal_id: Option<String>,
    pub messages: Vec<DebateMessage>,
}

const QUANT: &str = "Quant Analyst";
const RISK: &str = "Risk Manager";
const MAKER: &str = "Market Maker";
const NEWS: &str = "News Analyst";
const ARB: &str = "Arbitrage Analyst";

pub const PERSONAS: &[AgentPersona] = &[
    AgentPersona {
        id: "quant-analyst",
        name: QUANT,
        role: "Technical Analysis & Indicators",
        avatar: "📊",
        description: "Analyzes price action, volume profiles, and technical indicators...",
        specialty: "Technical Analysis",
    },
    AgentPersona {
        id: "risk-manager",
        name: RISK,
        role: "Portfolio Risk & Exposure",
        avatar: "🛡️",
        description: "Monitors portfolio heat, correlation risk, and maximum drawdown...",
        specialty: "Risk Management",
    },
    AgentPersona {
        id: "market-maker",
        name: MAKER,
        role: "Liquidity & Order Flow",
        avatar: "💧",
        description: "Tracks order book depth, spread dynamics, and liquidity conditions...",
        specialty: "Market Microstructure",
    },
    AgentPersona {
        id: "news-analyst",
        name: NEWS,
        role: "Sentiment & Events",
        avatar: "📰",
        description: "Monitors social sentiment, news catalysts, and upcoming events...",
        specialty: "Sentiment Analysis",
    },
    AgentPersona {
        id: "arbitrage-analyst",
        name: ARB,
        role: "Cross-Market Opportunities",
        avatar: "⚡",
        description: "Identifies pricing inefficiencies across venues and derivatives...",
        specialty: "Statistical Arbitrage",
    },
];

const fn msg(
    agent: &'static str,
    message: &'static str,
    timestamp: &'static str,
    vote: Side,
) -> DebateMessage {
    DebateMessage {
        agent,
        message,
        timestamp,
        vote,
    }
}

/// Approved after the size was cut from $150k to $120k.
const APPROVED_WITH_COMPROMISE: &[DebateMessage] = &[
    msg(QUANT, "I'm proposing a $150k LONG on SOL-PERP. Bollinger bands are squeezing with RSI at 68, the 20-day average crossed the 50-day and MACD is expanding. I estimate a 78% chance of reaching $105 within 7 days. I vote YES.", "14:28:33", Side::Yes),
    msg(RISK, "Portfolio heat goes from 42% to 58%, inside our 75% limit. Correlation with the JTO long is 0.72. A 15% drop costs 3.2% of the portfolio. I vote YES on condition of a stop-loss at $95.50.", "14:29:01", Side::Yes),
    msg(MAKER, "Spread is 0.08% with strong depth at $98.00-$98.50 and 65% buy flow over two hours. Expected slippage is 0.12%. I vote YES.", "14:29:45", Side::Yes),
    msg(NEWS, "Sentiment is neutral at 52/100 and yesterday's SEC comments add regulatory risk. My model gives this 45%. I'd wait 24-48 hours. I vote NO.", "14:30:22", Side::No),
    msg(ARB, "Perps trade 0.8% over spot, funding is positive and put-call is 0.65. We can hedge with a small BTC short to capture the ratio spread. I vote YES.", "14:31:15", Side::Yes),
    msg(RISK, "Four YES and one NO meets the threshold. Given the sentiment risk I propose cutting size to $120k. Is everyone comfortable with that?", "14:33:12", Side::Yes),
    msg(NEWS, "The smaller size addresses enough of my concern. I'll change to YES, with the caveat that we watch news flow closely for 48 hours.", "14:34:20", Side::Yes),
    msg(ARB, "Consensus reached. All five agents vote YES at $120k. I'll prepare the ratio hedge once the position fills.", "14:34:55", Side::Yes),
];

/// Unanimous short that later settled as a win.
const UNANIMOUS: &[DebateMessage] = &[
    msg(QUANT, "I'm proposing an $87k SHORT on JTO-PERP. RSI is 78 at the $3.20 resistance and volume is fading on rallies. 72% chance of a pullback to $2.85 within 5 days. I vote YES.", "10:15:22", Side::Yes),
    msg(RISK, "Heat goes from 35% to 48% and JTO correlation with our book is only 0.28. A 20% rally costs 2.1%. I vote YES.", "10:16:05", Side::Yes),
    msg(MAKER, "Spread is 0.12% and heavy offers sit at $3.20. We can fill this size cleanly. I vote YES.", "10:16:48", Side::Yes),
    msg(NEWS, "The token unlock announcement is weighing on sentiment at 48/100. Leaning toward the short. I vote YES.", "10:17:30", Side::Yes),
    msg(ARB, "Perps trade 1.2% under spot with negative funding and heavy put buying. I vote YES.", "10:18:15", Side::Yes),
    msg(RISK, "Unanimous. Proposal approved for execution.", "10:18:45", Side::Yes),
];

/// Rejected on concentration risk.
const REJECTED: &[DebateMessage] = &[
    msg(QUANT, "I'm proposing a $200k LONG on BTC-PERP on a possible breakout. Volatility is elevated and I put the odds at 55%. I vote YES, cautiously.", "11:20:15", Side::Yes),
    msg(RISK, "This takes portfolio heat to 78%, over our 75% limit, and BTC has 0.85 correlation with the SOL position. A 10% drop is a 5.8% drawdown, past our 5% daily limit. I vote NO.", "11:21:02", Side::No),
    msg(MAKER, "Liquidity is fine but this size risks slippage and poor execution. I vote NO.", "11:21:45", Side::No),
    msg(NEWS, "Macro headlines are mixed and there is no clear catalyst. I vote NO.", "11:22:30", Side::No),
    msg(ARB, "Basis and funding are flat, nothing here to hedge against. I vote NO.", "11:23:10", Side::No),
    msg(RISK, "Four NO votes. Proposal rejected.", "11:23:40", Side::No),
];

/// Unanimous short that was executed and settled as a loss.
const EXECUTED_LOSS: &[DebateMessage] = &[
    msg(QUANT, "I'm proposing a $95k SHORT position on ETH-PERP. Technical analysis shows a bearish divergence forming with RSI at 72. Price is approaching a key resistance at $2,850. Volume is declining on recent moves higher. I estimate a 68% probability of a pullback. I vote YES.", "09:45:10", Side::Yes),
    msg(RISK, "Portfolio heat is at 52%, so this would bring us to 65% - acceptable. ETH correlation with existing positions is moderate at 0.65. Risk parameters are within limits. I vote YES.", "09:46:00", Side::Yes),
    msg(MAKER, "ETH liquidity is excellent. Spread is tight at 0.06%. Order book shows good depth. Execution should be clean. I vote YES.", "09:46:45", Side::Yes),
    msg(NEWS, "ETH sentiment is slightly bearish at 45/100. There are concerns about network upgrades and some negative news about gas fees. However, there's also positive news about Layer 2 adoption. My model gives this a 52% probability. I'm neutral but will vote YES given the technical setup.", "09:47:30", Side::Yes),
    msg(ARB, "ETH is trading at a 0.5% premium on perps, suggesting slight bullish bias. Funding rate is slightly positive. Options market is neutral. The arbitrage signals are mixed, but I'll support the trade given the technical analysis. I vote YES.", "09:48:15", Side::Yes),
    msg(RISK, "Unanimous consensus - all 5 agents vote YES. Proposal approved for execution. We'll monitor the position closely given the mixed signals.", "09:48:45", Side::Yes),
];

const UNDER_REVIEW: &[DebateMessage] = &[msg(
    QUANT,
    "Proposal under review...",
    "00:00:00",
    Side::Yes,
)];

const LIVE: &[DebateMessage] = &[msg(QUANT, "Current analysis...", "14:28:33", Side::Yes)];

const LIVE_PROPOSAL_ID: &str = "prop-002";

/// Transcript for a proposal; unknown ids get a placeholder.
pub fn transcript_for(proposal_id: &str) -> &'static [DebateMessage] {
    match proposal_id {
        "prop-001" => APPROVED_WITH_COMPROMISE,
        "prop-002" => UNANIMOUS,
        "prop-003" => REJECTED,
        "prop-004" => EXECUTED_LOSS,
        _ => UNDER_REVIEW,
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_agents))
        .route("/debate/live", get(get_live_debate))
        .route("/debate/:proposal_id", get(get_debate_transcript))
}

pub async fn get_agents() -> Json<&'static [AgentPersona]> {
    Json(PERSONAS)
}

pub async fn get_debate_transcript(Path(proposal_id): Path<String>) -> Json<DebateTranscript> {
    let messages = transcript_for(&proposal_id).to_vec();
    Json(DebateTranscript {
        proposal_id: Some(proposal_id),
        messages,
    })
}

pub async fn get_live_debate() -> Json<DebateTranscript> {
    Json(DebateTranscript {
        proposal_id: Some(LIVE_PROPOSAL_ID.to_string()),
        messages: LIVE.to_vec(),
    })
}
