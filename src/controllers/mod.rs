pub mod feed_controller;
pub mod inventory_controller;
pub mod lead_controller;

pub use feed_controller::FeedController;
pub use inventory_controller::InventoryController;
pub use lead_controller::LeadController;
