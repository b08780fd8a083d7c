use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::mem::decode_latin1;
use thiserror::Error;

use super::model::{CarDataset, RawCar};

/// Columns the dashboard needs, in their canonical spelling.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Company Names",
    "Cars Names",
    "Fuel Types",
    "HorsePower",
    "Cars Prices",
    "Seats",
    "Performance(0-100)KM/H",
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the cars sheet from a Latin-1 encoded CSV file.
pub fn load_file(path: &Path) -> Result<CarDataset, DatasetError> {
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_bytes(&bytes)?;
    log::info!("Loaded {} cars from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Decode ISO-8859-1 bytes (every byte maps to the code point of the same
/// value) and parse them as CSV.
pub fn load_bytes(bytes: &[u8]) -> Result<CarDataset, DatasetError> {
    let text = decode_latin1(bytes);
    load_str(&text)
}

/// Parse already-decoded CSV text.
///
/// Rows shorter than the header are padded with empty cells, longer rows are
/// truncated. Cell contents are not validated here; the normaliser decides
/// what is a number.
pub fn load_str(text: &str) -> Result<CarDataset, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = canonical_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let padded: StringRecord = (0..headers.len())
            .map(|i| record.get(i).unwrap_or(""))
            .collect();
        rows.push(padded.deserialize::<RawCar>(Some(&headers))?);
    }

    Ok(CarDataset::from_raw(rows))
}

// ---------------------------------------------------------------------------
// Header matching
// ---------------------------------------------------------------------------

fn squash(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Rewrite header cells that match a required column (ignoring whitespace)
/// to the canonical spelling, so `Performance(0 - 100 )KM/H` is accepted.
fn canonical_headers(raw: &StringRecord) -> Result<StringRecord, DatasetError> {
    let headers: StringRecord = raw
        .iter()
        .map(|h| {
            let key = squash(h);
            REQUIRED_COLUMNS
                .iter()
                .find(|c| squash(c) == key)
                .copied()
                .unwrap_or(h)
        })
        .collect();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DatasetError::MissingColumn(col));
        }
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "Company Names,Cars Names,Engines,Fuel Types,HorsePower,Cars Prices,Seats,Performance(0 - 100 )KM/H";

    #[test]
    fn parses_rows_and_derived_columns() {
        let csv = format!(
            "{HEADER}\n\
             FERRARI,SF90 STRADALE,V8,plug in hyrbrid,963 hp,\"$460,000\",2,2.5 sec\n\
             ROLLS ROYCE,PHANTOM,V12,Petrol,563 hp,\"$200,000-$300,000\",5,5.3 sec\n"
        );
        let ds = load_str(&csv).unwrap();
        assert_eq!(ds.len(), 2);
        let first = &ds.records[0];
        assert_eq!(first.raw.company, "FERRARI");
        assert_eq!(first.horsepower, Some(963));
        assert_eq!(first.price, Some(460_000));
        assert_eq!(first.acceleration, Some(2.5));
        assert_eq!(ds.records[1].price, Some(300_000));
    }

    #[test]
    fn short_rows_are_padded() {
        let csv = format!("{HEADER}\nKIA,Rio,I4,Petrol\n");
        let ds = load_str(&csv).unwrap();
        let rec = &ds.records[0];
        assert_eq!(rec.raw.fuel_type, "Petrol");
        assert_eq!(rec.raw.seats, "");
        assert_eq!(rec.horsepower, None);
        assert_eq!(rec.acceleration, None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = load_str("Company Names,Cars Names\nA,B\n").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("Fuel Types")));
    }

    #[test]
    fn decodes_latin1() {
        let mut bytes = format!("{HEADER}\n").into_bytes();
        bytes.extend_from_slice(b"CITRO\xcbN,C\xe9,I4,Diesel,90 hp,\"$20,000\",5,12 sec\n");
        let ds = load_bytes(&bytes).unwrap();
        assert_eq!(ds.records[0].raw.company, "CITRO\u{cb}N");
        assert_eq!(ds.records[0].raw.name, "C\u{e9}");
    }

    #[test]
    fn c1_bytes_keep_their_code_points() {
        let mut bytes = format!("{HEADER}\n").into_bytes();
        bytes.extend_from_slice(b"A\x80,B\x96,I4,Diesel,90 hp,$1,5,12 sec\n");
        let ds = load_bytes(&bytes).unwrap();
        assert_eq!(ds.records[0].raw.company, "A\u{80}");
        assert_eq!(ds.records[0].raw.name, "B\u{96}");
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "{HEADER}\nA,X,V6,Petrol,300 hp,$1,4,4 sec\n").unwrap();
        let ds = load_file(tmp.path()).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
