use std::sync::Arc;

use arrow::array::{Int64Array, StringArray};
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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

/// One CSV row, matching the columns the explorer reads.
#[derive(Serialize)]
struct Row {
    country: String,
    suburb: String,
    availability_30: String,
    availability_60: String,
    availability_90: String,
    availability_365: String,
    last_review: String,
}

/// (country, suburbs, peak month) – listings are busiest around the peak,
/// so availability dips there.
const MARKETS: [(&str, &[&str], u32); 11] = [
    ("United States", &["Brooklyn", "Mission", "South Beach"], 7),
    ("Turkey", &["Beyoglu", "Kadikoy"], 8),
    ("Hong Kong", &["Central", "Wan Chai"], 10),
    ("Australia", &["Bondi", "Manly", "Fitzroy"], 1),
    ("Portugal", &["Alfama", "Ribeira"], 8),
    ("Brazil", &["Copacabana", "Leblon"], 2),
    ("Canada", &["Plateau", "Kitsilano"], 7),
    ("Spain", &["Gracia", "Eixample", "Malasana"], 8),
    ("China", &["Jing'an", "Chaoyang"], 5),
    // Outside the allow-list; dropped by the explorer.
    ("Japan", &["Shibuya"], 4),
    ("Mexico", &["Roma Norte"], 12),
];

fn availability(rng: &mut SimpleRng, window: u32, busy: f64) -> String {
    // ~3% malformed cells exercise the coercion path.
    if rng.next_f64() < 0.03 {
        return "N/A".to_string();
    }
    let free = (window as f64 * (1.0 - busy) * (0.6 + 0.4 * rng.next_f64())).round();
    (free as u32).min(window).to_string()
}

fn review_date(rng: &mut SimpleRng) -> (String, u32) {
    let month = rng.below(12) as u32 + 1;
    let day = rng.below(28) as u32 + 1;
    let roll = rng.next_f64();
    let text = if roll < 0.05 {
        String::new()
    } else if roll < 0.07 {
        "not reviewed".to_string()
    } else {
        format!("2023-{month:02}-{day:02}")
    };
    (text, month)
}

fn generate(n: usize, rng: &mut SimpleRng) -> Vec<Row> {
    (0..n)
        .map(|_| {
            let (country, suburbs, peak) = *rng.pick(&MARKETS);
            let suburb = rng.pick(suburbs).to_string();
            let (last_review, month) = review_date(rng);

            // Circular distance in months from the peak, 0..=6.
            let diff = (month as i32 - peak as i32).rem_euclid(12);
            let distance = diff.min(12 - diff) as f64;
            let busy = 0.85 - 0.12 * distance;

            Row {
                country: country.to_string(),
                suburb,
                availability_30: availability(rng, 30, busy),
                availability_60: availability(rng, 60, busy),
                availability_90: availability(rng, 90, busy),
                availability_365: availability(rng, 365, busy * 0.8),
                last_review,
            }
        })
        .collect()
}

fn write_csv(path: &str, rows: &[Row]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Parquet copy with integer availability columns (malformed cells become
/// nulls) to exercise the typed-column path of the loader.
fn write_parquet(path: &str, rows: &[Row]) -> Result<(), Box<dyn std::error::Error>> {
    let text = |f: fn(&Row) -> &str| {
        StringArray::from(
            rows.iter()
                .map(|r| Some(f(r)).filter(|s| !s.is_empty()))
                .collect::<Vec<_>>(),
        )
    };
    let int = |f: fn(&Row) -> &str| {
        Int64Array::from(rows.iter().map(|r| f(r).parse::<i64>().ok()).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("country", DataType::Utf8, false),
        Field::new("suburb", DataType::Utf8, true),
        Field::new("availability_30", DataType::Int64, true),
        Field::new("availability_60", DataType::Int64, true),
        Field::new("availability_90", DataType::Int64, true),
        Field::new("availability_365", DataType::Int64, true),
        Field::new("last_review", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(text(|r| r.country.as_str())),
            Arc::new(text(|r| r.suburb.as_str())),
            Arc::new(int(|r| r.availability_30.as_str())),
            Arc::new(int(|r| r.availability_60.as_str())),
            Arc::new(int(|r| r.availability_90.as_str())),
            Arc::new(int(|r| r.availability_365.as_str())),
            Arc::new(text(|r| r.last_review.as_str())),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(2_000, &mut rng);

    write_csv("sample_listings.csv", &rows)?;
    write_parquet("sample_listings.parquet", &rows)?;

    println!(
        "Wrote {} listings across {} markets to sample_listings.csv and sample_listings.parquet",
        rows.len(),
        MARKETS.len()
    );
    Ok(())
}
