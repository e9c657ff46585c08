use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.45),
    ("VAFB SLC-4E", 0.10),
    ("KSC LC-39A", 0.30),
    ("CCAFS SLC-40", 0.15),
];

/// Booster category, success probability, typical payload (kg).
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 0.05, 500.0),
    ("v1.1", 0.35, 2500.0),
    ("FT", 0.70, 4500.0),
    ("B4", 0.55, 5000.0),
    ("B5", 0.95, 4000.0),
];

const MAX_PAYLOAD: f64 = 9600.0;

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Pick an index from a list of weights summing to 1.
    fn weighted(&mut self, weights: impl Iterator<Item = f64>) -> usize {
        let r = self.next_f64();
        let mut acc = 0.0;
        let mut last = 0;
        for (i, w) in weights.enumerate() {
            acc += w;
            last = i;
            if r < acc {
                return i;
            }
        }
        last
    }
}

struct Launch {
    flight: i64,
    site: &'static str,
    payload: f64,
    booster: &'static str,
    class: i64,
}

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<Launch> {
    (0..n)
        .map(|i| {
            // Later flights use later boosters.
            let era = ((i * BOOSTERS.len()) / n).min(BOOSTERS.len() - 1);
            let (booster, p_success, typical) = BOOSTERS[era];
            let site = SITES[rng.weighted(SITES.iter().map(|(_, w)| *w))].0;
            let payload = rng.gauss(typical, typical * 0.5).clamp(0.0, MAX_PAYLOAD).round();
            let class = i64::from(rng.next_f64() < p_success);
            Launch {
                flight: i as i64 + 1,
                site,
                payload,
                booster,
                class,
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload),
            l.booster.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(56, &mut rng);

    write_csv("sample_launches.csv", &launches)?;
    write_parquet("sample_launches.parquet", &launches)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to sample_launches.csv and sample_launches.parquet",
        launches.len()
    );
    Ok(())
}
