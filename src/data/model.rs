use std::fmt;

use serde::Deserialize;

use super::normalize::{parse_acceleration, parse_horsepower, parse_price};

// ---------------------------------------------------------------------------
// RawCar – one CSV row exactly as it appears in the source file
// ---------------------------------------------------------------------------

/// Text columns of the source CSV. Every field defaults to an empty string so
/// short rows still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCar {
    #[serde(rename = "Company Names", default)]
    pub company: String,
    #[serde(rename = "Cars Names", default)]
    pub name: String,
    #[serde(rename = "Fuel Types", default)]
    pub fuel_type: String,
    #[serde(rename = "HorsePower", default)]
    pub horsepower: String,
    #[serde(rename = "Cars Prices", default)]
    pub price: String,
    #[serde(rename = "Seats", default)]
    pub seats: String,
    /// Header is normalised by the loader before deserialization.
    #[serde(rename = "Performance(0-100)KM/H", default)]
    pub acceleration: String,
}

// ---------------------------------------------------------------------------
// CarRecord – raw row plus derived numeric columns
// ---------------------------------------------------------------------------

/// A single car (one row of the dataset) with its normalised numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CarRecord {
    pub raw: RawCar,
    /// Upper bound of the horsepower text, e.g. `"300-450 hp"` → 450.
    pub horsepower: Option<i64>,
    /// Upper bound of the price text, e.g. `"$30,000-$45,000"` → 45000.
    pub price: Option<i64>,
    /// 0-100 km/h time in seconds.
    pub acceleration: Option<f64>,
}

impl From<RawCar> for CarRecord {
    fn from(raw: RawCar) -> Self {
        let horsepower = parse_horsepower(&raw.horsepower);
        let price = parse_price(&raw.price);
        let acceleration = parse_acceleration(&raw.acceleration);
        CarRecord {
            raw,
            horsepower,
            price,
            acceleration,
        }
    }
}

impl CarRecord {
    /// Value of a categorical column. Empty cells count as missing.
    pub fn category(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::Company => &self.raw.company,
            CategoricalField::FuelType => &self.raw.fuel_type,
            CategoricalField::Seats => &self.raw.seats,
        };
        if value.is_empty() {
            None
        } else {
            Some(value.as_str())
        }
    }

    /// Derived numeric value as `f64` for aggregation and plotting.
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Horsepower => self.horsepower.map(|v| v as f64),
            NumericField::Price => self.price.map(|v| v as f64),
            NumericField::Acceleration => self.acceleration,
        }
    }
}

// ---------------------------------------------------------------------------
// Column selectors
// ---------------------------------------------------------------------------

/// Columns that hold categories (counted, grouped, filtered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Company,
    FuelType,
    Seats,
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoricalField::Company => write!(f, "Company"),
            CategoricalField::FuelType => write!(f, "Fuel Type"),
            CategoricalField::Seats => write!(f, "Seats"),
        }
    }
}

/// Derived numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Horsepower,
    Price,
    Acceleration,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericField::Horsepower => write!(f, "HorsePower (hp)"),
            NumericField::Price => write!(f, "Price ($)"),
            NumericField::Acceleration => write!(f, "0-100 km/h (seconds)"),
        }
    }
}

// ---------------------------------------------------------------------------
// CarDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset in source order. Read-only after loading.
#[derive(Debug, Clone, Default)]
pub struct CarDataset {
    pub records: Vec<CarRecord>,
}

impl CarDataset {
    /// Normalise every raw row into a [`CarRecord`].
    pub fn from_raw(rows: Vec<RawCar>) -> Self {
        let records: Vec<CarRecord> = rows.into_iter().map(CarRecord::from).collect();

        let missing = |f: NumericField| records.iter().filter(|r| r.numeric(f).is_none()).count();
        log::debug!(
            "normalised {} records (unparsed: horsepower={}, price={}, acceleration={})",
            records.len(),
            missing(NumericField::Horsepower),
            missing(NumericField::Price),
            missing(NumericField::Acceleration),
        );

        CarDataset { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records, for the preview table.
    pub fn preview(&self, n: usize) -> &[CarRecord] {
        &self.records[..n.min(self.records.len())]
    }
}
