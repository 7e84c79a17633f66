//! Value-over-time series.
//!
//! [`synthesize`] bridges a start value to a pinned end value with a regime
//! switching random walk; [`tvl_walk`] is a free multiplicative walk used for
//! vault-wide TVL. Both cap their output at [`MAX_POINTS`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::rng::SeededDraws;
use super::wagers::round_to;

pub const MAX_POINTS: usize = 200;

/// Share of the per-day growth applied as drift.
const DRIFT_WEIGHT: f64 = 0.3;
/// Initial trend regime length in days.
const FIRST_REGIME_DAYS: (i64, i64) = (15, 45);
/// Regime length drawn at every flip.
const NEXT_REGIME_DAYS: (i64, i64) = (10, 40);
const CYCLE_RANGE: (f64, f64) = (0.005, 0.02);
const NOISE_RANGE: (f64, f64) = (-0.015, 0.015);
const CONVERGENCE_BLEND: f64 = 0.3;

pub const TVL_BASE: f64 = 2_500_000.0;
const TVL_DAILY_CHANGE: (f64, f64) = (-0.02, 0.03);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub date: String,
    pub value: f64,
}

/// `Mon DD, YYYY` for windows longer than a month, `Mon DD` otherwise.
pub fn format_day(date: DateTime<Utc>, days: i64) -> String {
    if days > 30 {
        date.format("%b %d, %Y").to_string()
    } else {
        date.format("%b %d").to_string()
    }
}

/// Alternating trend direction. The first regime lasts [`FIRST_REGIME_DAYS`],
/// every later one [`NEXT_REGIME_DAYS`].
#[derive(Debug, Clone)]
struct Regime {
    direction: f64,
    age: i64,
    len: i64,
}

impl Regime {
    fn new(draws: &mut SeededDraws) -> Self {
        Self {
            direction: 1.0,
            age: 0,
            len: draws.int_inclusive(FIRST_REGIME_DAYS.0, FIRST_REGIME_DAYS.1),
        }
    }

    /// Direction for the next day, flipping once the current regime has run out.
    fn advance(&mut self, draws: &mut SeededDraws) -> f64 {
        if self.age >= self.len {
            self.direction = -self.direction;
            self.len = draws.int_inclusive(NEXT_REGIME_DAYS.0, NEXT_REGIME_DAYS.1);
            self.age = 0;
        }
        self.age += 1;
        self.direction
    }
}

/// Bridge `start_value` to `end_value` over `days` daily points ending at `anchor`.
///
/// The last point is always `round(end_value, 2)`, before and after resampling.
pub fn synthesize(
    days: i64,
    start_value: f64,
    end_value: f64,
    draws: &mut SeededDraws,
    anchor: DateTime<Utc>,
) -> Vec<TrajectoryPoint> {
    if days <= 0 {
        return Vec::new();
    }

    let pinned_end = round_to(end_value, 2);
    let mut points = walk(days, start_value, end_value, draws, anchor);
    converge_tail(&mut points, start_value, end_value - start_value);
    if let Some(last) = points.last_mut() {
        last.value = pinned_end;
    }

    let mut points = downsample(points);
    if let Some(last) = points.last_mut() {
        last.value = pinned_end;
    }
    points
}

/// Clamped regime-switching walk, before the tail correction.
fn walk(
    days: i64,
    start_value: f64,
    end_value: f64,
    draws: &mut SeededDraws,
    anchor: DateTime<Utc>,
) -> Vec<TrajectoryPoint> {
    let drift = (end_value - start_value) / days as f64 * DRIFT_WEIGHT;
    let floor = start_value * 0.5;
    let ceiling = end_value * 1.5;
    let first_day = anchor - Duration::days(days);

    let mut current = start_value;
    let mut regime = Regime::new(draws);
    (0..days)
        .map(|i| {
            let direction = regime.advance(draws);
            let cycle = direction * draws.uniform(CYCLE_RANGE.0, CYCLE_RANGE.1) * current;
            let noise = draws.uniform(NOISE_RANGE.0, NOISE_RANGE.1) * current;
            current = (current + drift + cycle + noise).max(floor).min(ceiling);

            TrajectoryPoint {
                date: format_day(first_day + Duration::days(i), days),
                value: round_to(current, 2),
            }
        })
        .collect()
}

/// Pull the final 10% of points [`CONVERGENCE_BLEND`] of the way toward the
/// straight line from the start value. Series of 10 points or fewer are left alone.
fn converge_tail(points: &mut [TrajectoryPoint], start_value: f64, total_growth: f64) {
    let len = points.len();
    if len <= 10 {
        return;
    }
    let blend_from = len * 9 / 10;
    for (i, point) in points.iter_mut().enumerate().skip(blend_from) {
        let target = start_value + total_growth * (i as f64 / len as f64);
        point.value = round_to(point.value + (target - point.value) * CONVERGENCE_BLEND, 2);
    }
}

/// Daily TVL walk of `days` points ending on `anchor`'s day.
pub fn tvl_walk(days: i64, draws: &mut SeededDraws, anchor: DateTime<Utc>) -> Vec<TrajectoryPoint> {
    if days <= 0 {
        return Vec::new();
    }

    let mut value = TVL_BASE;
    let points = (0..days)
        .map(|i| {
            value *= 1.0 + draws.uniform(TVL_DAILY_CHANGE.0, TVL_DAILY_CHANGE.1);
            TrajectoryPoint {
                date: format_day(anchor - Duration::days(days - i - 1), days),
                value: round_to(value, 2),
            }
        })
        .collect();

    downsample(points)
}

/// Keep every `ceil(len / MAX_POINTS)`-th point, ending on the true final point.
fn downsample(points: Vec<TrajectoryPoint>) -> Vec<TrajectoryPoint> {
    let len = points.len();
    if len <= MAX_POINTS {
        return points;
    }

    let stride = len.div_ceil(MAX_POINTS);
    let last_index = len - 1;
    let mut sampled: Vec<TrajectoryPoint> = Vec::with_capacity(MAX_POINTS);
    let mut final_point = None;
    for (i, point) in points.into_iter().enumerate() {
        if i == last_index {
            final_point = Some(point);
        } else if i % stride == 0 {
            sampled.push(point);
        }
    }

    if let Some(final_point) = final_point {
        // The final point takes over the last sampled slot so the count stays capped.
        if last_index % stride != 0 {
            sampled.pop();
        }
        sampled.push(final_point);
    }
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::rng::TRAJECTORY_STREAM_BASE;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn run(days: i64, start: f64, end: f64) -> Vec<TrajectoryPoint> {
        let mut draws = SeededDraws::new(42, TRAJECTORY_STREAM_BASE + days.max(0) as u64);
        synthesize(days, start, end, &mut draws, anchor())
    }

    #[test]
    fn test_short_window_pins_end() {
        let points = run(30, 100.0, 200.0);
        assert_eq!(points.len(), 30);
        assert_eq!(points.last().unwrap().value, 200.0);
    }

    #[test]
    fn test_long_window_is_downsampled_and_pinned() {
        let points = run(500, 100.0, 500.0);
        assert!(points.len() <= MAX_POINTS);
        assert_eq!(points.last().unwrap().value, 500.0);
        // Last date is the final day of the window, not a stride sample.
        assert_eq!(
            points.last().unwrap().date,
            format_day(anchor() - Duration::days(1), 500)
        );
    }

    #[test]
    fn test_non_positive_days_are_empty() {
        assert!(run(0, 100.0, 200.0).is_empty());
        assert!(run(-5, 100.0, 200.0).is_empty());
    }

    #[test]
    fn test_values_respect_clamp() {
        for days in [1, 7, 30, 90, 365, 1095] {
            let points = run(days, 100.0, 200.0);
            for p in &points {
                assert!(p.value >= 50.0 && p.value <= 300.0, "{days}: {}", p.value);
            }
        }
    }

    #[test]
    fn test_first_point_starts_near_start_value() {
        let points = run(90, 1000.0, 1200.0);
        let first = points[0].value;
        // One step moves at most drift + 2% cycle + 1.5% noise.
        assert!((first - 1000.0).abs() < 1000.0 * 0.04);
    }

    #[test]
    fn test_same_days_same_series() {
        assert_eq!(run(120, 3825.0, 4800.0), run(120, 3825.0, 4800.0));
    }

    #[test]
    fn test_date_formats() {
        let short = run(30, 100.0, 200.0);
        assert_eq!(
            short[0].date,
            (anchor() - Duration::days(30)).format("%b %d").to_string()
        );
        let long = run(31, 100.0, 200.0);
        assert!(long[0].date.contains(", 20"));
    }

    #[test]
    fn test_downsample_caps_and_keeps_last() {
        for len in [201usize, 365, 400, 1095] {
            let points: Vec<TrajectoryPoint> = (0..len)
                .map(|i| TrajectoryPoint {
                    date: i.to_string(),
                    value: i as f64,
                })
                .collect();
            let sampled = downsample(points);
            assert!(sampled.len() <= MAX_POINTS, "{len}");
            assert_eq!(sampled[0].value, 0.0);
            assert_eq!(sampled.last().unwrap().value, (len - 1) as f64);
        }
    }

    #[test]
    fn test_tvl_walk_shape() {
        let mut draws = SeededDraws::new(42, 0);
        let points = tvl_walk(30, &mut draws, anchor());
        assert_eq!(points.len(), 30);
        assert_eq!(points.last().unwrap().date, anchor().format("%b %d").to_string());

        let mut draws = SeededDraws::new(42, 0);
        assert!(tvl_walk(1095, &mut draws, anchor()).len() <= MAX_POINTS);

        let mut draws = SeededDraws::new(42, 0);
        assert!(tvl_walk(0, &mut draws, anchor()).is_empty());
    }

    #[test]
    fn test_tail_blends_toward_straight_line() {
        let (days, start, end) = (120, 1000.0, 1400.0);
        let stream = TRAJECTORY_STREAM_BASE + days as u64;

        let mut raw_draws = SeededDraws::new(42, stream);
        let raw = walk(days, start, end, &mut raw_draws, anchor());
        let mut draws = SeededDraws::new(42, stream);
        let finished = synthesize(days, start, end, &mut draws, anchor());
        assert_eq!(raw.len(), finished.len());

        let len = raw.len();
        let blend_from = len * 9 / 10;
        for i in 0..len - 1 {
            let expected = if i < blend_from {
                raw[i].value
            } else {
                let target = start + (end - start) * (i as f64 / len as f64);
                round_to(raw[i].value + (target - raw[i].value) * 0.3, 2)
            };
            assert_eq!(finished[i].value, expected, "index {i}");
            assert_eq!(finished[i].date, raw[i].date);
        }
        assert_eq!(finished[len - 1].value, end);
    }

    #[test]
    fn test_short_series_skip_blend() {
        let mut points: Vec<TrajectoryPoint> = (0..10)
            .map(|i| TrajectoryPoint {
                date: i.to_string(),
                value: 50.0,
            })
            .collect();
        let before = points.clone();
        converge_tail(&mut points, 100.0, 100.0);
        assert_eq!(points, before);

        let mut points: Vec<TrajectoryPoint> = (0..20)
            .map(|i| TrajectoryPoint {
                date: i.to_string(),
                value: 50.0,
            })
            .collect();
        converge_tail(&mut points, 100.0, 100.0);
        assert!(points[..18].iter().all(|p| p.value == 50.0));
        // i = 18: target 190, 50 + 140 * 0.3
        assert_eq!(points[18].value, 92.0);
    }

    #[test]
    fn test_regime_lengths() {
        for seed in [1, 42, 99] {
            let mut draws = SeededDraws::new(seed, TRAJECTORY_STREAM_BASE);
            let mut regime = Regime::new(&mut draws);
            let directions: Vec<f64> = (0..2_000).map(|_| regime.advance(&mut draws)).collect();

            let mut runs = Vec::new();
            let mut run_len = 1;
            for pair in directions.windows(2) {
                if pair[0] == pair[1] {
                    run_len += 1;
                } else {
                    runs.push(run_len);
                    run_len = 1;
                }
            }
            // The final run may be cut short by the window.
            assert!(runs.len() > 10);
            assert_eq!(directions[0], 1.0);
            assert!((15..=45).contains(&runs[0]), "seed {seed}: first {}", runs[0]);
            for &r in &runs[1..] {
                assert!((10..=40).contains(&r), "seed {seed}: {r}");
            }
        }
    }

    #[test]
    fn test_regime_length_draws_cover_bounds() {
        let mut draws = SeededDraws::new(5, TRAJECTORY_STREAM_BASE);
        let firsts: Vec<i64> = (0..2_000).map(|_| Regime::new(&mut draws).len).collect();
        assert_eq!(firsts.iter().min(), Some(&FIRST_REGIME_DAYS.0));
        assert_eq!(firsts.iter().max(), Some(&FIRST_REGIME_DAYS.1));
    }
}
