use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_f64() * items.len() as f64) as usize % items.len()]
    }
}

/// One CSV row, in the column layout of the launch notebook export.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

/// Boosters in service order, with their rough success odds.
const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 0.2),
    ("v1.1", 0.35),
    ("FT", 0.7),
    ("B4", 0.6),
    ("B5", 0.9),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_flights = 56;

    let mut rows = Vec::with_capacity(n_flights);
    for i in 0..n_flights {
        // Booster generations roll over as the flight number grows.
        let era = (i * BOOSTERS.len()) / n_flights;
        let (booster, odds) = BOOSTERS[era];
        let site = rng.pick(&SITES);
        let payload = (rng.next_f64() * 9600.0 / 10.0).round() * 10.0;
        let class = i64::from(rng.next_f64() < odds);

        rows.push(Row {
            flight_number: i as i64 + 1,
            launch_site: site.to_string(),
            class,
            payload_mass_kg: payload,
            booster_category: booster.to_string(),
        });
    }

    // CSV
    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;

    // Parquet
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
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.launch_site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| &r.booster_category))),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "spacex_launch_dash.parquet";
    let file = File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {} launches to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
