use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use launch_dash::config::DEFAULT_DATA_PATH;
use launch_dash::data::model::{COL_BOOSTER, COL_OUTCOME, COL_PAYLOAD, COL_SITE};

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One CSV line, laid out like the course dataset (leading index column).
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "")]
    index: usize,
    #[serde(rename = "Flight Number")]
    flight_number: usize,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    #[serde(rename = "class")]
    outcome: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: &'static str,
}

/// Booster generations in flight order:
/// (category, flights, success probability, max payload kg).
const ERAS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 0.0, 700.0),
    ("v1.1", 15, 0.2, 4500.0),
    ("FT", 24, 0.65, 6500.0),
    ("B4", 11, 0.55, 9600.0),
    ("B5", 1, 1.0, 9600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn generate(rng: &mut SimpleRng) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for (category, flights, success, max_payload) in ERAS {
        for _ in 0..flights {
            let flight_number = rows.len() + 1;
            // Early flights all flew from CCAFS LC-40.
            let site = if category == "v1.0" {
                SITES[0]
            } else {
                *rng.pick(&SITES)
            };
            let payload_mass = (rng.next_f64() * max_payload).round();
            let outcome = (rng.next_f64() < success) as i64;
            rows.push(SampleRow {
                index: rows.len(),
                flight_number,
                site,
                outcome,
                payload_mass,
                booster_version: format!("F9 {category} B{}", 1000 + flight_number),
                booster_category: category,
            });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COL_SITE, DataType::Utf8, false),
        Field::new(COL_PAYLOAD, DataType::Float64, false),
        Field::new(COL_OUTCOME, DataType::Int64, false),
        Field::new(COL_BOOSTER, DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.outcome))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_category),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => write_csv(path, &rows)?,
        Some("parquet") | Some("pq") => write_parquet(path, &rows)?,
        _ => bail!("output must end in .csv or .parquet: {output}"),
    }

    println!("Wrote {} launches to {output}", rows.len());
    Ok(())
}
