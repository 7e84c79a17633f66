use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::rng::SeededDraws;
use super::wagers::{Side, WagerRecord};

pub const POSITION_MARKET: &str = "POLYMARKET";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSide {
    Long,
    Short,
}

impl From<Side> for PositionSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Yes => PositionSide::Long,
            Side::No => PositionSide::Short,
        }
    }
}

/// Vault-side and user-side exposure for one open wager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub wager_id: String,
    pub market: String,
    pub side: PositionSide,
    pub description: String,
    pub vote: Side,
    pub vault_stake: f64,
    pub user_stake: f64,
    pub vault_payout: f64,
    pub user_payout: f64,
    pub close_date: DateTime<Utc>,
}

/// Project every open approved wager onto the vault and the user's share of it.
///
/// `ownership_ratio` is user deposit over total vault value.
pub fn project_positions<'a>(
    records: impl IntoIterator<Item = &'a WagerRecord>,
    ownership_ratio: f64,
    draws: &mut SeededDraws,
    anchor: DateTime<Utc>,
) -> Vec<Position> {
    records
        .into_iter()
        .filter(|r| r.is_open_approved())
        .map(|record| {
            let vault_stake = draws.uniform(50_000.0, 300_000.0);
            let vault_payout = draws.uniform(vault_stake * 0.03, vault_stake * 0.15);
            let close_days = draws.int_inclusive(7, 30);

            Position {
                wager_id: record.id.clone(),
                market: POSITION_MARKET.to_string(),
                side: record.side.into(),
                description: record.description.clone(),
                vote: record.side,
                vault_stake,
                user_stake: ownership_ratio * vault_stake,
                vault_payout,
                user_payout: ownership_ratio * vault_payout,
                close_date: anchor + Duration::days(close_days),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::rng::WAGER_STREAM;
    use crate::ledger::wagers::{generate, WagerParams};
    use chrono::TimeZone;

    #[test]
    fn test_positions_follow_open_wagers() {
        let anchor = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let mut draws = SeededDraws::new(42, WAGER_STREAM);
        let params = WagerParams {
            approval_rate: 1.0,
            ..WagerParams::default()
        };
        let (records, _) = generate(&params, &mut draws, anchor);

        let ratio = 3825.0 / 2_847_392.45;
        let positions = project_positions(&records, ratio, &mut draws, anchor);
        assert_eq!(positions.len(), 10);

        for (p, r) in positions.iter().zip(records[355..].iter()) {
            assert_eq!(p.wager_id, r.id);
            assert_eq!(p.market, POSITION_MARKET);
            assert_eq!(p.side, PositionSide::from(r.side));
            assert!((50_000.0..300_000.0).contains(&p.vault_stake));
            assert!(p.vault_payout >= p.vault_stake * 0.03);
            assert!(p.vault_payout <= p.vault_stake * 0.15);
            assert!((p.user_stake - ratio * p.vault_stake).abs() < 1e-9);
            assert!((p.user_payout - ratio * p.vault_payout).abs() < 1e-9);

            let days = (p.close_date - anchor).num_days();
            assert!((7..=30).contains(&days));
        }
    }

    #[test]
    fn test_side_mapping() {
        assert_eq!(PositionSide::from(Side::Yes), PositionSide::Long);
        assert_eq!(PositionSide::from(Side::No), PositionSide::Short);
    }
}
