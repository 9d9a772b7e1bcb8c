//! Services module
//!
//! Business logic: the query engine and its predicates, image
//! resolution, the syndication feed and lead notifications.

pub mod feed_service;
pub mod image_service;
pub mod inventory_query_engine;
pub mod mail_service;
pub mod vehicle_filter;

pub use feed_service::{FeedEntry, FeedService};
pub use image_service::ImageService;
pub use inventory_query_engine::{
    EngineConfig, InventoryQueryEngine, Paginate, SearchResult, SortArgs, SortKey, SortOrder,
};
pub use mail_service::{LeadMailer, LeadNotification, MailError, SmtpMailer};
pub use vehicle_filter::{VehicleFilter, VehiclePredicate};
