use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use super::format::{long_date, usd_grouped, usd_plain};
use super::AppState;
use crate::ledger::{Position, PositionSide, Side};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    pub market: String,
    pub side: PositionSide,
    pub bet_description: String,
    pub vote: Side,
    pub hedge_bet_amount: String,
    pub my_share: String,
    pub hedge_win_amount: String,
    pub my_win_amount: String,
    pub close_date: String,
}

impl From<&Position> for PositionView {
    fn from(p: &Position) -> Self {
        Self {
            market: p.market.clone(),
            side: p.side,
            bet_description: p.description.clone(),
            vote: p.vote,
            hedge_bet_amount: usd_grouped(p.vault_stake),
            my_share: usd_plain(p.user_stake),
            hedge_win_amount: format!("+{}", usd_grouped(p.vault_payout)),
            my_win_amount: format!("+{}", usd_plain(p.user_payout)),
            close_date: long_date(p.close_date),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/current", get(get_current_positions))
}

/// Open positions projected from the ledger's open wagers.
pub async fn get_current_positions(State(state): State<AppState>) -> Json<Vec<PositionView>> {
    Json(
        state
            .ledger
            .open_positions()
            .iter()
            .map(PositionView::from)
            .collect(),
    )
}
