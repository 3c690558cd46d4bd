use std::time::Instant;

use keepa_history::{
    NO_DATA, closest_value_at_time, extreme_points_in_interval, last, last_time,
    out_of_stock_percentage_in_interval, validate, value_at_time, weighted_mean_in_interval,
};
use rand::rngs::StdRng;

use crate::generate::{Case, random_window};
use crate::oracle::Expanded;

const WINDOWS_PER_CASE: usize = 20;

/// Run every cross-check over `cases`.
pub fn run_all(cases: &[Case], base: i32, rng: &mut StdRng) {
    check_generated_series_are_valid(cases);
    check_point_lookups(cases, base);
    check_interval_queries(cases, base, rng);
    println!("All verification checks passed!");
}

/// 1. The generator only produces well-formed series.
fn check_generated_series_are_valid(cases: &[Case]) {
    println!("  check: generated series pass validation");
    let t = Instant::now();
    for (i, case) in cases.iter().enumerate() {
        if let Err(e) = validate(&case.csv, case.kind) {
            panic!("case {i}: {e}");
        }
    }
    println!("    PASS ({:.3?})", t.elapsed());
}

/// 2. value_at_time and closest_value_at_time at every minute around the
///    history.
fn check_point_lookups(cases: &[Case], base: i32) {
    println!("  check: point lookups at every minute");
    let t = Instant::now();
    let mut lookups = 0usize;

    for (i, case) in cases.iter().enumerate() {
        let oracle = Expanded::new(&case.csv, case.kind.kind());
        let horizon = case.last_time().unwrap_or(base) + 10;
        for m in base - 10..horizon {
            assert_eq!(
                value_at_time(&case.csv, case.kind, m),
                oracle.value_at(m),
                "case {i} {:?} {:?}: value at {m}",
                case.kind,
                case.csv
            );
            assert_eq!(
                closest_value_at_time(&case.csv, case.kind, m),
                oracle.closest_value_at(m),
                "case {i} {:?} {:?}: closest value at {m}",
                case.kind,
                case.csv
            );
            lookups += 1;
        }

        let lt = last_time(&case.csv, case.kind);
        if lt != NO_DATA {
            assert_eq!(value_at_time(&case.csv, case.kind, lt), last(&case.csv, case.kind));
        }
        if let Some(first) = case.first_time() {
            assert_eq!(value_at_time(&case.csv, case.kind, first - 1), NO_DATA);
        }
    }

    println!("    PASS ({lookups} lookups, {:.3?})", t.elapsed());
}

/// 3. Extremes, weighted mean and out of stock percentage over random
///    windows, including empty and inverted ones.
fn check_interval_queries(cases: &[Case], base: i32, rng: &mut StdRng) {
    println!("  check: interval queries over random windows");
    let t = Instant::now();
    let mut windows = 0usize;
    let mut answered = 0usize;

    for (i, case) in cases.iter().enumerate() {
        let oracle = Expanded::new(&case.csv, case.kind.kind());
        let horizon = case.now.max(case.last_time().unwrap_or(base));
        for _ in 0..WINDOWS_PER_CASE {
            let (start, end) = random_window(rng, base, horizon);
            let ctx = || {
                format!(
                    "case {i} {:?} {:?} now={} [{start},{end})",
                    case.kind, case.csv, case.now
                )
            };

            let extremes = extreme_points_in_interval(&case.csv, case.kind, start, end);
            assert_eq!(extremes, oracle.extremes(start, end), "{}: extremes", ctx());

            let mean = weighted_mean_in_interval(&case.csv, case.kind, case.now, start, end);
            assert_eq!(mean, oracle.weighted_mean(case.now, start, end), "{}: mean", ctx());

            let pct = out_of_stock_percentage_in_interval(
                &case.csv,
                case.kind,
                case.now,
                start,
                end,
                case.tracking_since,
            );
            assert_eq!(
                pct,
                oracle.out_of_stock_percentage(case.now, start, end, case.tracking_since),
                "{}: out of stock since {}",
                ctx(),
                case.tracking_since
            );
            assert!(pct == NO_DATA || (0..=100).contains(&pct), "{}: pct {pct}", ctx());

            windows += 1;
            if mean != NO_DATA {
                answered += 1;
            }
        }
    }

    let answered_pct = if windows > 0 {
        answered as f64 / windows as f64 * 100.0
    } else {
        0.0
    };
    println!(
        "    PASS ({windows} windows, {answered_pct:.1}% with a mean, {:.3?})",
        t.elapsed()
    );
}
