//! Writes a synthetic `sample_cars.csv` in the dashboard's input format.
//!
//! Values are deliberately messy: ranges, currency formatting, unit suffixes,
//! a few unparseable cells and Latin-1 accented names.

use anyhow::{anyhow, Context, Result};
use encoding_rs::mem::{encode_latin1_lossy, is_str_latin1};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64() as usize % items.len()]
    }
}

/// `(company, model prefix, price scale)`
const MAKERS: [(&str, &str, u64); 8] = [
    ("FERRARI", "SF", 4),
    ("ROLLS ROYCE", "PHANTOM", 5),
    ("TOYOTA", "COROLLA", 1),
    ("KIA", "SELTOS", 1),
    ("PORSCHE", "911", 3),
    ("TESLA", "MODEL", 2),
    ("CITRO\u{cb}N", "C", 1),
    ("SEAT", "LE\u{d3}N", 1),
];

const FUELS: [&str; 5] = ["Petrol", "Diesel", "Hybrid", "Electric", "plug in hyrbrid"];
const SEATS: [&str; 5] = ["2", "4", "5", "7", "2+2"];

fn horsepower(rng: &mut SimpleRng) -> String {
    let hp = rng.range(70, 1000);
    match rng.range(0, 9) {
        0 => "N/A".to_string(),
        1 | 2 => format!("{}-{hp} hp", hp.saturating_sub(rng.range(20, 150))),
        _ => format!("{hp} hp"),
    }
}

fn price(rng: &mut SimpleRng, scale: u64) -> String {
    let upper = rng.range(15, 120) * 1_000 * scale;
    let fmt = |v: u64| {
        let thousands = v / 1_000;
        if thousands >= 1_000 {
            format!("${},{:03},000", thousands / 1_000, thousands % 1_000)
        } else {
            format!("${thousands},000")
        }
    };
    match rng.range(0, 11) {
        0 => "TBD".to_string(),
        1..=3 => format!("{}-{}", fmt(upper * 3 / 4), fmt(upper)),
        _ => fmt(upper),
    }
}

fn acceleration(rng: &mut SimpleRng) -> String {
    if rng.range(0, 14) == 0 {
        return "unknown".to_string();
    }
    format!("{:.1} sec", 2.0 + rng.next_f64() * 12.0)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let rows = 120;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Company Names",
        "Cars Names",
        "Engines",
        "CC/Battery Capacity",
        "HorsePower",
        "Total Speed",
        "Performance(0 - 100 )KM/H",
        "Cars Prices",
        "Fuel Types",
        "Seats",
        "Torque",
    ])?;

    for i in 0..rows {
        let &(company, model, scale) = rng.pick(&MAKERS);
        let fuel = *rng.pick(&FUELS);
        let seats = *rng.pick(&SEATS);
        writer.write_record([
            company.to_string(),
            format!("{model} {}", i % 17 + 1),
            "V8".to_string(),
            format!("{} cc", rng.range(1000, 6500)),
            horsepower(&mut rng),
            format!("{} km/h", rng.range(150, 350)),
            acceleration(&mut rng),
            price(&mut rng, scale),
            fuel.to_string(),
            seats.to_string(),
            format!("{} Nm", rng.range(150, 900)),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV: {}", e.error()))?;
    let utf8 = String::from_utf8(bytes).context("CSV writer produced invalid UTF-8")?;
    if !is_str_latin1(&utf8) {
        log::warn!("some characters were replaced during Latin-1 encoding");
    }
    let latin1 = encode_latin1_lossy(&utf8);

    let output_path = "sample_cars.csv";
    std::fs::write(output_path, &latin1).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {rows} cars to {output_path}");
    Ok(())
}
