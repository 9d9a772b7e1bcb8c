//! Listing syndication feed
//!
//! CSV with a fixed column set consumed by third-party vehicle listing
//! services. `FeedService::listable` decides which vehicles belong in it;
//! `render` writes every entry it is given.

use std::io;

use rust_decimal::Decimal;

use crate::config::DealershipConfig;
use crate::models::{Color, Vehicle};

pub const FEED_COLUMNS: [&str; 23] = [
    "vin",
    "id",
    "store_code",
    "place_id",
    "dealership_name",
    "dealership_address",
    "image_link",
    "link",
    "price",
    "condition",
    "make",
    "model",
    "trim",
    "year",
    "mileage",
    "exterior_color",
    "interior_color",
    "body_style",
    "vehicle_option",
    "drive_train",
    "engine",
    "fuel",
    "transmission",
];

/// One vehicle plus its lead photo
#[derive(Debug, Clone, Copy)]
pub struct FeedEntry<'a> {
    pub vehicle: &'a Vehicle,
    pub image_link: Option<&'a str>,
}

pub struct FeedService {
    dealership: DealershipConfig,
}

impl FeedService {
    pub fn new(dealership: DealershipConfig) -> Self {
        Self { dealership }
    }

    /// Vehicles that belong in the feed
    pub fn listable<'a>(vehicles: &'a [Vehicle]) -> impl Iterator<Item = &'a Vehicle> {
        vehicles.iter().filter(|v| !v.is_sold() && v.stock_num().is_some())
    }

    pub fn render(&self, entries: &[FeedEntry<'_>]) -> Result<String, csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(FEED_COLUMNS)?;
        for entry in entries {
            writer.write_record(self.row(entry))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    fn row(&self, entry: &FeedEntry<'_>) -> Vec<String> {
        let v = entry.vehicle;
        let stock_num = v.stock_num().unwrap_or_default();
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let label = |value: Option<String>| value.unwrap_or_default();

        vec![
            text(&v.vin),
            stock_num.to_string(),
            self.dealership.store_code.clone(),
            self.dealership.place_id.clone(),
            self.dealership.name.clone(),
            self.dealership.address.clone(),
            entry.image_link.unwrap_or_default().to_string(),
            self.dealership.listing_url(stock_num),
            v.price
                .map(|p| format_price(p, &self.dealership.currency))
                .unwrap_or_default(),
            label(v.condition.map(|c| c.to_string().to_lowercase())),
            text(&v.make),
            text(&v.model),
            text(&v.trim),
            label(v.model_year.map(|y| y.to_string())),
            label(v.odometer.map(format_mileage)),
            color_name(&v.ext_color),
            color_name(&v.int_color),
            label(v.body_style.map(|b| b.to_string())),
            v.options.as_ref().map(|o| o.join(",")).unwrap_or_default(),
            label(v.drivetrain.map(|d| d.to_string())),
            text(&v.engine),
            label(v.fuel_type.map(|f| f.to_string())),
            label(v.transmission.map(|t| t.to_string())),
        ]
    }
}

/// `23075.5` → `"23075.50 USD"`
pub fn format_price(price: Decimal, currency: &str) -> String {
    format!("{:.2} {}", price.round_dp(2), currency)
}

/// Nearest hundred: `45251` → `"45300 miles"`
pub fn format_mileage(odometer: u64) -> String {
    format!("{} miles", (odometer + 50) / 100 * 100)
}

fn color_name(color: &Option<Color>) -> String {
    color.as_ref().map(|c| c.name().to_string()).unwrap_or_default()
}
