//! Vehicle model
//!
//! One inventory unit exactly as it is stored in the record store. Keys keep
//! the PascalCase layout of the stored documents so records round-trip
//! without a mapping layer. Every attribute is optional: a missing field
//! means "unknown", never zero or false.

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Gearbox type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Transmission {
    Automatic,
    Manual,
}

/// Driven wheels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Drivetrain {
    #[serde(rename = "AWD")]
    Awd,
    #[serde(rename = "FWD")]
    Fwd,
    #[serde(rename = "RWD")]
    Rwd,
    #[serde(rename = "4WD")]
    FourWd,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BodyStyle {
    Coupe,
    Convertible,
    Crossover,
    Hatchback,
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Truck,
    Van,
    Minivan,
    Wagon,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Condition {
    New,
    Used,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
    Hydrogen,
}

/// Color as stored: `[human name, hex code]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color(pub String, pub String);

impl Color {
    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn hex(&self) -> &str {
        &self.1
    }
}

/// EPA fuel economy rating (MPG)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpaRating {
    #[serde(rename = "City")]
    pub city: u32,
    #[serde(rename = "Highway")]
    pub highway: u32,
}

/// Vehicle principal
///
/// `price` and `msrp` are exact decimals. They are never converted to
/// floating point; sorting uses their string form (see `SortKey`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Vehicle {
    #[serde(default, deserialize_with = "string_or_number")]
    pub stock_num: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub sold: Option<bool>,
    #[serde(default, deserialize_with = "lenient_whole")]
    pub model_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient")]
    pub make: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub trim: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub engine: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub transmission: Option<Transmission>,
    #[serde(default, deserialize_with = "lenient")]
    pub drivetrain: Option<Drivetrain>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Decimal>,
    #[serde(default, rename = "MSRP", deserialize_with = "lenient")]
    pub msrp: Option<Decimal>,
    #[serde(default, rename = "VIN", deserialize_with = "lenient")]
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub int_color: Option<Color>,
    #[serde(default, deserialize_with = "lenient")]
    pub ext_color: Option<Color>,
    #[serde(default, deserialize_with = "lenient_whole")]
    pub owners: Option<u32>,
    #[serde(default, rename = "EPA", deserialize_with = "lenient")]
    pub epa: Option<EpaRating>,
    #[serde(default, deserialize_with = "lenient_whole")]
    pub odometer: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub body_style: Option<BodyStyle>,
    #[serde(default, deserialize_with = "lenient")]
    pub options: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub condition: Option<Condition>,
    #[serde(default, deserialize_with = "lenient")]
    pub fuel_type: Option<FuelType>,
}

impl Vehicle {
    /// Empty record carrying only a stock number
    pub fn with_stock_num(stock_num: impl Into<String>) -> Self {
        Self {
            stock_num: Some(stock_num.into()),
            sold: None,
            model_year: None,
            make: None,
            model: None,
            trim: None,
            engine: None,
            transmission: None,
            drivetrain: None,
            price: None,
            msrp: None,
            vin: None,
            int_color: None,
            ext_color: None,
            owners: None,
            epa: None,
            odometer: None,
            body_style: None,
            options: None,
            condition: None,
            fuel_type: None,
        }
    }

    pub fn stock_num(&self) -> Option<&str> {
        self.stock_num.as_deref()
    }

    pub fn is_sold(&self) -> bool {
        self.sold.unwrap_or(false)
    }

    /// "2020 Toyota Camry", skipping unknown parts
    pub fn title(&self) -> String {
        let year = self.model_year.map(|y| y.to_string());
        [year.as_deref(), self.make.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transmission::Automatic => write!(f, "Automatic"),
            Transmission::Manual => write!(f, "Manual"),
        }
    }
}

impl fmt::Display for Drivetrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Drivetrain::Awd => "AWD",
            Drivetrain::Fwd => "FWD",
            Drivetrain::Rwd => "RWD",
            Drivetrain::FourWd => "4WD",
        };
        f.write_str(label)
    }
}

impl fmt::Display for BodyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BodyStyle::Coupe => "Coupe",
            BodyStyle::Convertible => "Convertible",
            BodyStyle::Crossover => "Crossover",
            BodyStyle::Hatchback => "Hatchback",
            BodyStyle::Sedan => "Sedan",
            BodyStyle::Suv => "SUV",
            BodyStyle::Truck => "Truck",
            BodyStyle::Van => "Van",
            BodyStyle::Minivan => "Minivan",
            BodyStyle::Wagon => "Wagon",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::New => write!(f, "New"),
            Condition::Used => write!(f, "Used"),
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Diesel => "Diesel",
            FuelType::Hybrid => "Hybrid",
            FuelType::Electric => "Electric",
            FuelType::Hydrogen => "Hydrogen",
        };
        f.write_str(label)
    }
}

/// Older records store the stock number as an integer
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let stock_num = match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        Value::Null => None,
        other => {
            debug!("Ignoring unreadable StockNum {}", other);
            None
        }
    };
    Ok(stock_num)
}

/// A field that does not decode is unknown, it never rejects the record
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(read_field(Value::deserialize(deserializer)?))
}

/// Like `lenient`, also accepting whole floats such as `45210.0`
fn lenient_whole<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let value = match value.as_f64() {
        Some(f) if value.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Value::from(f as i64)
        }
        _ => value,
    };
    Ok(read_field(value))
}

fn read_field<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_null() {
        return None;
    }

    match serde_json::from_value::<T>(value.clone()) {
        Ok(field) => Some(field),
        Err(e) => {
            debug!(
                "Ignoring unreadable {} value {}: {}",
                std::any::type_name::<T>(),
                value,
                e
            );
            None
        }
    }
}
