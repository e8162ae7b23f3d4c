//! Weighted daily-quantity allocation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pacer_core::{Mode, ModeConfig};
use tracing::warn;

/// Distribute `remain` units of work across `days`, reserving trailing
/// buffer days and front- or back-loading the rest according to `mode`.
///
/// The result maps every input day to an integer quantity whose sum is
/// exactly `remain` (for non-empty `days`); trailing buffer days map to 0.
/// Negative remainders are unrepresentable by the `u32` parameter, which is
/// the documented normalization for out-of-range input. A malformed config
/// (non-finite or negative `buffer_rate`, non-finite `slope`) is replaced by
/// the gentle defaults with a logged warning, never an error.
///
/// Deterministic: no randomness, no clock, nothing but the three inputs.
pub fn allocate(remain: u32, days: &[NaiveDate], mode: &ModeConfig) -> BTreeMap<NaiveDate, u32> {
    if days.is_empty() {
        return BTreeMap::new();
    }
    if remain == 0 {
        return days.iter().map(|d| (*d, 0)).collect();
    }

    let mode = if mode.is_well_formed() {
        mode
    } else {
        warn!(config = ?mode, "malformed mode config, falling back to gentle defaults");
        Mode::Gentle.config()
    };

    let total_days = days.len();

    // Trailing buffer days are schedule slack before the deadline. The
    // extra cap at `total_days` keeps a pathological buffer_rate from
    // reserving more days than exist.
    let buffer_count = mode
        .max_buffer
        .min((total_days as f64 * mode.buffer_rate).floor() as usize)
        .min(total_days);

    // Deadline too close to afford a buffer: distribute over every day
    // rather than degenerate to an all-zero plan.
    let mut active_count = total_days - buffer_count;
    if active_count == 0 {
        active_count = total_days;
    }
    let (active_days, buffer_days) = days.split_at(active_count);

    // w_k = 1 + slope * ((m-1)/2 - k) / ((m-1)/2), clamped at zero.
    // A positive slope makes earlier days heavier. The clamp can flatten
    // the tail once slope exceeds 1; the renormalization below still
    // conserves the total, which is the guarantee that matters.
    let weights: Vec<f64> = if active_count == 1 {
        vec![1.0]
    } else {
        let half = (active_count as f64 - 1.0) / 2.0;
        (0..active_count)
            .map(|k| (1.0 + mode.slope * (half - k as f64) / half).max(0.0))
            .collect()
    };
    let total_weight: f64 = weights.iter().sum();

    let raw: Vec<f64> = weights
        .iter()
        .map(|w| f64::from(remain) * w / total_weight)
        .collect();
    let mut allocation: Vec<u32> = raw.iter().map(|v| v.floor() as u32).collect();
    let assigned: u32 = allocation.iter().sum();
    let leftover = remain - assigned;

    // Hand the leftover units to the days with the largest fractional
    // remainder, earliest day first on ties.
    let mut order: Vec<usize> = (0..active_count).collect();
    order.sort_by(|&a, &b| {
        let frac_a = raw[a] - f64::from(allocation[a]);
        let frac_b = raw[b] - f64::from(allocation[b]);
        frac_b.total_cmp(&frac_a).then(a.cmp(&b))
    });
    for &idx in order.iter().take(leftover as usize) {
        allocation[idx] += 1;
    }

    active_days
        .iter()
        .zip(&allocation)
        .map(|(day, amount)| (*day, *amount))
        .chain(buffer_days.iter().map(|day| (*day, 0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ten_days() -> Vec<NaiveDate> {
        days(date(2026, 1, 1), date(2026, 1, 10))
    }

    #[test]
    fn empty_day_sequence_yields_empty_plan() {
        assert!(allocate(50, &[], Mode::Gentle.config()).is_empty());
    }

    #[test]
    fn zero_remaining_maps_every_day_to_zero() {
        let plan = allocate(0, &ten_days(), Mode::Strict.config());
        assert_eq!(plan.len(), 10);
        assert!(plan.values().all(|&v| v == 0));
    }

    #[test]
    fn sum_is_conserved_across_modes_and_sizes() {
        for mode in [Mode::Gentle, Mode::Strict] {
            for len in 1..=14usize {
                let range = days(date(2026, 2, 1), date(2026, 2, len as u32));
                for remain in [1u32, 7, 10, 99, 100, 1000] {
                    let plan = allocate(remain, &range, mode.config());
                    let total: u32 = plan.values().sum();
                    assert_eq!(total, remain, "mode {mode} len {len} remain {remain}");
                }
            }
        }
    }

    #[test]
    fn gentle_ten_day_scenario_reserves_two_buffer_days() {
        // min(maxBuffer 3, floor(10 * 0.2)) = 2 buffer days, 8 active.
        let range = ten_days();
        let plan = allocate(100, &range, Mode::Gentle.config());

        assert_eq!(plan.values().sum::<u32>(), 100);
        assert_eq!(plan[&date(2026, 1, 9)], 0);
        assert_eq!(plan[&date(2026, 1, 10)], 0);
        assert!(plan[&date(2026, 1, 8)] > 0);
    }

    #[test]
    fn strict_ten_day_scenario_front_loads() {
        // Strict reserves min(2, floor(10 * 0.1)) = 1 buffer day; the first
        // active day must outweigh the last active day.
        let range = ten_days();
        let plan = allocate(100, &range, Mode::Strict.config());

        assert_eq!(plan.values().sum::<u32>(), 100);
        assert_eq!(plan[&date(2026, 1, 10)], 0);
        assert!(plan[&date(2026, 1, 1)] > plan[&date(2026, 1, 9)]);
    }

    #[test]
    fn three_day_gentle_scenario_has_no_buffer() {
        // floor(3 * 0.2) = 0 buffer days; reproducible rounding pins the
        // exact split of 10 over weights [1.5, 1.0, 0.5].
        let range = days(date(2026, 1, 1), date(2026, 1, 3));
        let plan = allocate(10, &range, Mode::Gentle.config());

        assert_eq!(plan[&date(2026, 1, 1)], 5);
        assert_eq!(plan[&date(2026, 1, 2)], 3);
        assert_eq!(plan[&date(2026, 1, 3)], 2);
    }

    #[test]
    fn single_day_receives_everything() {
        let range = vec![date(2026, 6, 1)];
        let plan = allocate(42, &range, Mode::Strict.config());
        assert_eq!(plan[&date(2026, 6, 1)], 42);
    }

    #[test]
    fn leftover_tie_breaks_toward_earliest_day() {
        // Flat weights split 1 unit over 2 days as 0.5/0.5; the earlier day
        // wins the tie.
        let flat = ModeConfig {
            max_buffer: 0,
            buffer_rate: 0.0,
            slope: 0.0,
            daily_limit_hours: 3,
            warning_threshold: 0.8,
        };
        let range = days(date(2026, 1, 1), date(2026, 1, 2));
        let plan = allocate(1, &range, &flat);
        assert_eq!(plan[&date(2026, 1, 1)], 1);
        assert_eq!(plan[&date(2026, 1, 2)], 0);
    }

    #[test]
    fn extreme_slope_clamps_weights_but_conserves_sum() {
        // Slopes above 1 drive tail weights negative; they clamp to zero
        // and the renormalized distribution still sums exactly.
        let steep = ModeConfig {
            max_buffer: 0,
            buffer_rate: 0.0,
            slope: 5.0,
            daily_limit_hours: 5,
            warning_threshold: 0.9,
        };
        let range = ten_days();
        let plan = allocate(73, &range, &steep);
        assert_eq!(plan.values().sum::<u32>(), 73);
        assert_eq!(plan[&date(2026, 1, 10)], 0);
    }

    #[test]
    fn malformed_config_falls_back_to_gentle() {
        let broken = ModeConfig {
            max_buffer: 3,
            buffer_rate: f64::NAN,
            slope: 0.5,
            daily_limit_hours: 3,
            warning_threshold: 0.8,
        };
        let range = ten_days();
        assert_eq!(
            allocate(100, &range, &broken),
            allocate(100, &range, Mode::Gentle.config())
        );
    }

    #[test]
    fn buffer_never_exceeds_day_count() {
        // A rate above 1 would reserve more days than exist; the allocator
        // falls back to distributing over all of them.
        let greedy = ModeConfig {
            max_buffer: 5,
            buffer_rate: 2.0,
            slope: 0.5,
            daily_limit_hours: 3,
            warning_threshold: 0.8,
        };
        let range = days(date(2026, 1, 1), date(2026, 1, 2));
        let plan = allocate(9, &range, &greedy);
        assert_eq!(plan.values().sum::<u32>(), 9);
        assert!(plan.values().any(|&v| v > 0));
    }

    #[test]
    fn allocation_is_deterministic() {
        let range = ten_days();
        let a = allocate(57, &range, Mode::Strict.config());
        let b = allocate(57, &range, Mode::Strict.config());
        assert_eq!(a, b);
    }
}
