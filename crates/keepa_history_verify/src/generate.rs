use keepa_history::{CsvType, UNAVAILABLE};
use rand::Rng;
use rand::rngs::StdRng;

const KINDS: [CsvType; 4] = [
    CsvType::Amazon,
    CsvType::Sales,
    CsvType::BuyBoxShipping,
    CsvType::NewFbmShipping,
];

pub struct Case {
    pub kind: CsvType,
    pub csv: Vec<i32>,
    pub now: i32,
    pub tracking_since: i32,
}

impl Case {
    pub fn first_time(&self) -> Option<i32> {
        self.csv.first().copied()
    }

    pub fn last_time(&self) -> Option<i32> {
        let stride = self.kind.kind().stride();
        self.csv.len().checked_sub(stride).map(|i| self.csv[i])
    }
}

/// A short random series starting at `base`, with about a quarter of the
/// records unavailable. `now` may fall before the last record.
pub fn random_case(rng: &mut StdRng, base: i32) -> Case {
    let kind = KINDS[rng.gen_range(0..KINDS.len())];
    let records = rng.gen_range(0..10);

    let mut csv = Vec::new();
    let mut t = base + rng.gen_range(0..40);
    for _ in 0..records {
        csv.push(t);
        csv.push(if rng.gen_bool(0.25) {
            UNAVAILABLE
        } else {
            rng.gen_range(0..1000)
        });
        if kind.is_with_shipping() {
            csv.push(if rng.gen_bool(0.2) { -1 } else { rng.gen_range(0..50) });
        }
        t += rng.gen_range(1..20);
    }

    let now = t + rng.gen_range(-30..30);
    let tracking_since = base + rng.gen_range(-10..30);
    Case {
        kind,
        csv,
        now,
        tracking_since,
    }
}

/// A query window around the case's history; occasionally empty or inverted.
pub fn random_window(rng: &mut StdRng, base: i32, horizon: i32) -> (i32, i32) {
    let start = rng.gen_range(base - 20..horizon + 20);
    let end = start + rng.gen_range(-5..120);
    (start, end)
}
