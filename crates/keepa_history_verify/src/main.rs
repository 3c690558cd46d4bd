mod generate;
mod oracle;
mod verify;

use std::str::FromStr;
use std::time::Instant;

use jiff::{SignedDuration, Timestamp};
use keepa_history::time;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 0x4B45_4550; // "KEEP"
const DEFAULT_CASES: usize = 500;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(name, raw = %raw, "ignoring unparsable setting");
            default
        }),
        Err(_) => default,
    }
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let total = Instant::now();
    let seed: u64 = env_or("KEEPA_VERIFY_SEED", DEFAULT_SEED);
    let cases: usize = env_or("KEEPA_VERIFY_CASES", DEFAULT_CASES);

    // --- Phase 1: Time base ---
    println!("Phase 1: Checking the Keepa time base against the system clock...");
    let now = time::now_minutes();
    let clock = Timestamp::now();
    let converted = time::keepa_minutes_to_timestamp(now).expect("keepa minutes in range");
    let drift = clock.duration_since(converted);
    assert!(
        drift >= SignedDuration::ZERO && drift < SignedDuration::from_secs(120),
        "keepa minute {now} is {converted}, clock is {clock}"
    );
    println!("  keepa minute {now} = {converted}");

    // --- Phase 2: Generate ---
    println!("Phase 2: Generating {cases} random history series (seed {seed})...");
    let t = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    // Keep the series close to the present so the numbers look like real
    // Keepa minutes.
    let base = now - 7 * time::MINUTES_PER_DAY;
    let generated: Vec<_> = (0..cases)
        .map(|_| generate::random_case(&mut rng, base))
        .collect();
    let records: usize = generated
        .iter()
        .map(|c| c.csv.len() / c.kind.kind().stride())
        .sum();
    println!(
        "  generated {records} records ({:.1}s)",
        t.elapsed().as_secs_f64()
    );

    // --- Phase 3: Verify ---
    println!("Phase 3: Cross-checking queries against minute-by-minute expansion...");
    let t = Instant::now();
    verify::run_all(&generated, base, &mut rng);
    println!("  verification complete ({:.1}s)", t.elapsed().as_secs_f64());

    println!(
        "\nAll done! Total time: {:.1}s",
        total.elapsed().as_secs_f64()
    );
}
