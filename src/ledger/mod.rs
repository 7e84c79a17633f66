//! Synthetic ledger: seeded wagers, their aggregate statistics, the open
//! positions projected from them and the portfolio series that ends on the
//! same numbers.
//!
//! Everything is derived from one seed. A [`LedgerSnapshot`] is built once at
//! startup and shared read-only by every handler.

pub mod positions;
pub mod profile;
pub mod rng;
pub mod snapshot;
pub mod trajectory;
pub mod wagers;

pub use positions::{project_positions, Position, PositionSide, POSITION_MARKET};
pub use profile::VaultProfile;
pub use rng::SeededDraws;
pub use snapshot::{LedgerParams, LedgerSnapshot, DEFAULT_SEED};
pub use trajectory::{synthesize, tvl_walk, TrajectoryPoint, MAX_POINTS};
pub use wagers::{
    generate, AggregateStats, ApprovalStatus, LifecycleState, Outcome, Side, WagerParams,
    WagerRecord,
};
