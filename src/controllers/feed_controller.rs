use crate::repositories::InventoryRepository;
use crate::services::{FeedEntry, FeedService, ImageService};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct FeedController {
    repository: InventoryRepository,
    images: ImageService,
    feed: FeedService,
}

impl FeedController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.inventory.clone(),
            images: state.images.clone(),
            feed: state.feed(),
        }
    }

    /// CSV of every unsold vehicle with its lead photo
    pub async fn render(&self) -> AppResult<String> {
        let snapshot = self.repository.snapshot().await?;
        let vehicles: Vec<_> = FeedService::listable(snapshot.vehicles()).collect();

        let images = self.images.first_image_urls(vehicles.iter().copied()).await;

        let entries: Vec<FeedEntry<'_>> = vehicles
            .iter()
            .zip(images.iter())
            .map(|(vehicle, image)| FeedEntry {
                vehicle: *vehicle,
                image_link: image.as_deref(),
            })
            .collect();

        self.feed
            .render(&entries)
            .map_err(|e| AppError::Internal(format!("feed rendering failed: {}", e)))
    }
}
