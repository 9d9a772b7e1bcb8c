//! Fill the inventory node with generated vehicles (development only)
//!
//! Usage: `seed [COUNT]`, 30 vehicles by default. Replaces the whole node.

use std::sync::Arc;

use anyhow::{bail, Result};
use dotenvy::dotenv;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use dealership_inventory::clients::FirebaseDatabaseClient;
use dealership_inventory::config::DatabaseConfig;
use dealership_inventory::models::{
    BodyStyle, Color, Condition, Drivetrain, EpaRating, FuelType, Transmission, Vehicle,
};
use dealership_inventory::repositories::InventoryRepository;

const DEFAULT_COUNT: usize = 30;

const MODELS: &[(&str, &[&str])] = &[
    ("Toyota", &["Camry", "Corolla", "RAV4", "Tacoma"]),
    ("Honda", &["Civic", "Accord", "CR-V"]),
    ("Ford", &["F-150", "Escape", "Mustang"]),
    ("Chevrolet", &["Silverado", "Malibu", "Equinox"]),
    ("Subaru", &["Outback", "Forester", "Impreza"]),
    ("BMW", &["330i", "X3", "X5"]),
];
const TRIMS: &[&str] = &["M", "SE", "S", "Sport", "Lariat", "LT"];
const COLORS: &[(&str, &str)] = &[
    ("Black", "#1c1c1c"),
    ("White", "#f4f4f4"),
    ("Silver", "#c0c0c0"),
    ("Red", "#a32020"),
    ("Blue", "#1f3f8f"),
    ("Gray", "#6b6b6b"),
];
const ENGINES: &[&str] = &["2.0L I4", "2.5L I4", "3.5L V6", "5.0L V8"];
const OPTIONS: &[&str] = &[
    "Sunroof",
    "Heated Seats",
    "Navigation",
    "Backup Camera",
    "Apple CarPlay",
    "Tow Package",
];

fn color<R: Rng>(rng: &mut R) -> Option<Color> {
    COLORS
        .choose(rng)
        .map(|(name, hex)| Color(name.to_string(), hex.to_string()))
}

fn generate_vehicle<R: Rng>(rng: &mut R) -> Vehicle {
    let mut vehicle = Vehicle::with_stock_num(Uuid::new_v4().to_string());
    let (make, models) = MODELS[rng.gen_range(0..MODELS.len())];
    let price: i64 = rng.gen_range(10_000..=50_000);
    let mpg: u32 = rng.gen_range(11..40);
    let new = rng.gen_bool(0.3);

    vehicle.sold = Some(rng.gen_bool(0.2));
    vehicle.model_year = Some(rng.gen_range(2014..=2024));
    vehicle.make = Some(make.to_string());
    vehicle.model = models.choose(rng).map(|m| m.to_string());
    vehicle.trim = TRIMS.choose(rng).map(|t| t.to_string());
    vehicle.engine = ENGINES.choose(rng).map(|e| e.to_string());
    vehicle.transmission = Some(if rng.gen_bool(0.5) {
        Transmission::Automatic
    } else {
        Transmission::Manual
    });
    vehicle.drivetrain = [Drivetrain::Awd, Drivetrain::Fwd, Drivetrain::Rwd]
        .choose(rng)
        .copied();
    vehicle.price = Some(Decimal::from(price));
    vehicle.msrp = Some(Decimal::from(price + rng.gen_range(1_000..6_000)));
    vehicle.vin = Some(
        (0..17)
            .map(|_| *b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789".choose(rng).unwrap_or(&b'X') as char)
            .collect(),
    );
    vehicle.int_color = color(rng);
    vehicle.ext_color = color(rng);
    vehicle.owners = Some(if new { 0 } else { rng.gen_range(1..=3) });
    vehicle.epa = Some(EpaRating {
        city: mpg,
        highway: mpg + rng.gen_range(0..5),
    });
    vehicle.odometer = Some(if new { rng.gen_range(0..50) } else { rng.gen_range(0..100_000) });
    vehicle.body_style = [BodyStyle::Sedan, BodyStyle::Suv, BodyStyle::Truck, BodyStyle::Coupe]
        .choose(rng)
        .copied();
    let option_count = rng.gen_range(0..4);
    vehicle.options = Some(
        OPTIONS
            .choose_multiple(rng, option_count)
            .map(|o| o.to_string())
            .collect(),
    );
    vehicle.condition = Some(if new { Condition::New } else { Condition::Used });
    vehicle.fuel_type = Some(FuelType::Gasoline);
    vehicle
}

fn generate_vehicles<R: Rng>(rng: &mut R, count: usize) -> Vec<Vehicle> {
    (0..count).map(|_| generate_vehicle(rng)).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let count = match std::env::args().nth(1) {
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => bail!("COUNT must be a positive number, got '{}'", raw),
        },
        None => DEFAULT_COUNT,
    };

    let config = DatabaseConfig::from_env()?;
    let store = FirebaseDatabaseClient::new(&config)?;
    let repository = InventoryRepository::new(Arc::new(store), config.clone(), None);

    let vehicles = generate_vehicles(&mut rand::thread_rng(), count);
    let written = repository.replace_inventory(&vehicles).await?;

    info!("✅ Seeded {} vehicles into {}", written, config.inventory_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealership_inventory::services::InventoryQueryEngine;

    #[test]
    fn test_generated_vehicles_are_complete() {
        let vehicles = generate_vehicles(&mut rand::thread_rng(), 25);
        assert_eq!(vehicles.len(), 25);

        for vehicle in &vehicles {
            assert!(vehicle.stock_num().is_some());
            assert!(vehicle.make.is_some() && vehicle.model.is_some());
            assert_eq!(vehicle.vin.as_ref().map(String::len), Some(17));
            let msrp = vehicle.msrp.unwrap();
            assert!(msrp > vehicle.price.unwrap());
        }

        let metadata = InventoryQueryEngine::default().compute_metadata(&vehicles);
        assert_eq!(metadata.make_total(), 25);
    }

    #[test]
    fn test_generated_vehicles_survive_storage_format() {
        let vehicle = generate_vehicle(&mut rand::thread_rng());
        let value = serde_json::to_value(&vehicle).unwrap();
        let decoded: Vehicle = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, vehicle);
    }
}
