//! Data models
//!
//! Vehicle records as stored, derived inventory metadata and image links.

pub mod image;
pub mod inventory;
pub mod metadata;
pub mod vehicle;

pub use image::{VehicleImage, VehicleWithImages};
pub use inventory::InventorySnapshot;
pub use metadata::{InventoryMetadata, UNKNOWN_FACET};
pub use vehicle::{
    BodyStyle, Color, Condition, Drivetrain, EpaRating, FuelType, Transmission, Vehicle,
};
