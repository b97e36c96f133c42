use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{ListingDataset, Metric, RawListing};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listings dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the listing columns (recommended)
/// * `.json`    – `[{ "country": "...", "availability_30": 12, ... }, ...]`
/// * `.parquet` – any column types; cells are read as text and normalized
///
/// Only `country` is required. `suburb`, `last_review` and the four
/// `availability_*` columns are treated as all-missing when absent.
pub fn load_file(path: &Path) -> Result<ListingDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = ListingDataset::from_raw(rows);
    let stats = dataset.stats;
    log::info!(
        "Loaded {} of {} rows from {} ({} outside the country allow-list)",
        dataset.len(),
        stats.rows_read,
        path.display(),
        stats.rows_dropped
    );
    if stats.coerced_numbers > 0 || stats.coerced_dates > 0 {
        log::debug!(
            "Coerced {} availability cells and {} review dates to missing",
            stats.coerced_numbers,
            stats.coerced_dates
        );
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Column lookup shared by all formats
// ---------------------------------------------------------------------------

/// Positions of the columns of interest within a header.
#[derive(Debug, Clone, Copy)]
struct Columns {
    country: usize,
    suburb: Option<usize>,
    availability: [Option<usize>; 4],
    last_review: Option<usize>,
}

impl Columns {
    fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);
        let country = find("country").context("missing 'country' column")?;
        let mut availability = [None; 4];
        for metric in Metric::ALL {
            availability[metric.index()] = find(metric.column());
        }
        Ok(Columns {
            country,
            suburb: find("suburb"),
            availability,
            last_review: find("last_review"),
        })
    }

    fn indices(&self) -> Vec<usize> {
        std::iter::once(self.country)
            .chain(self.suburb)
            .chain(self.availability.iter().flatten().copied())
            .chain(self.last_review)
            .collect()
    }

    /// Build a raw row from a cell accessor.
    fn row(&self, cell: impl Fn(usize) -> Option<String>) -> RawListing {
        let get = |idx: Option<usize>| idx.and_then(&cell);
        RawListing {
            country: cell(self.country),
            suburb: get(self.suburb),
            availability: self.availability.map(&get),
            last_review: get(self.last_review),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RawListing>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let columns = Columns::locate(headers.as_slice()).context("CSV header")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(columns.row(|i| record.get(i).and_then(non_empty)));
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn load_json(path: &Path) -> Result<Vec<RawListing>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    // A key missing from one record is a missing cell; missing from every
    // record it is a missing column, as for CSV headers.
    if !records.is_empty() && !records.iter().any(|rec| rec.get("country").is_some()) {
        bail!("missing 'country' column");
    }

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            rec.as_object()
                .map(json_row)
                .with_context(|| format!("Row {i} is not a JSON object"))
        })
        .collect()
}

fn json_row(obj: &Map<String, JsonValue>) -> RawListing {
    let cell = |name: &str| obj.get(name).and_then(json_to_text);
    RawListing {
        country: cell("country"),
        suburb: cell("suburb"),
        availability: Metric::ALL.map(|m| cell(m.column())),
        last_review: cell("last_review"),
    }
}

fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => non_empty(s),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of listings.
///
/// Every column of interest is cast to text first, so integer, float,
/// date and timestamp columns written by Pandas or Polars all go through
/// the same normalizer as CSV cells.
fn load_parquet(path: &Path) -> Result<Vec<RawListing>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        rows.extend(batch_rows(&batch)?);
    }
    Ok(rows)
}

fn batch_rows(batch: &RecordBatch) -> Result<Vec<RawListing>> {
    let schema = batch.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    let columns = Columns::locate(names.as_slice()).context("parquet schema")?;

    // Text view of the columns we read, cast once per batch.
    let wanted = columns.indices();
    let text: Vec<Option<ArrayRef>> = batch
        .columns()
        .iter()
        .enumerate()
        .map(|(i, col)| {
            if wanted.contains(&i) {
                cast(col, &DataType::Utf8).map(Some)
            } else {
                Ok(None)
            }
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("casting parquet columns to text")?;

    let rows = (0..batch.num_rows())
        .map(|row| {
            columns.row(|col| {
                let arr = text.get(col)?.as_ref()?.as_string::<i32>();
                if arr.is_null(row) {
                    None
                } else {
                    non_empty(arr.value(row))
                }
            })
        })
        .collect();
    Ok(rows)
}
