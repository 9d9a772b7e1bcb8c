//! Vehicle image resolution
//!
//! Lists a vehicle's folder in the blob store and resolves each object to a
//! download URL concurrently. Resolution is best effort: a failed URL is
//! left out and a failed listing yields no images, so a listing never fails
//! because of a photo.

use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use tracing::warn;

use crate::clients::BlobStore;
use crate::config::StorageConfig;
use crate::models::{Vehicle, VehicleImage, VehicleWithImages};

#[derive(Clone)]
pub struct ImageService {
    blobs: Arc<dyn BlobStore>,
    config: StorageConfig,
}

impl ImageService {
    pub fn new(blobs: Arc<dyn BlobStore>, config: StorageConfig) -> Self {
        Self { blobs, config }
    }

    /// Up to `limit` images of one vehicle (configured limit by default)
    pub async fn images_for(&self, stock_num: &str, limit: Option<usize>) -> Vec<VehicleImage> {
        let limit = limit.unwrap_or(self.config.image_limit);
        if limit == 0 {
            return Vec::new();
        }

        let prefix = self.config.vehicle_prefix(stock_num);
        let objects = match self.blobs.list(&prefix, limit).await {
            Ok(objects) => objects,
            Err(e) => {
                warn!("⚠️ Could not list images for {}: {}", stock_num, e);
                return Vec::new();
            }
        };

        let resolved = join_all(objects.iter().map(|object| async move {
            match self.blobs.download_url(object).await {
                Ok(url) => Some(VehicleImage {
                    name: object.name().to_string(),
                    url,
                }),
                Err(e) => {
                    warn!("⚠️ Skipping image {}: {}", object.full_path, e);
                    None
                }
            }
        }))
        .await;

        resolved.into_iter().flatten().collect()
    }

    pub async fn first_image(&self, stock_num: &str) -> Option<VehicleImage> {
        self.images_for(stock_num, Some(1)).await.into_iter().next()
    }

    pub async fn with_images(&self, vehicle: Vehicle) -> VehicleWithImages {
        let images = match vehicle.stock_num() {
            Some(stock_num) => self.images_for(stock_num, None).await,
            None => Vec::new(),
        };
        VehicleWithImages { vehicle, images }
    }

    /// Attach images to every vehicle, in input order
    ///
    /// At most `concurrency` vehicles are in flight against the blob store.
    pub async fn enrich<'a, I>(&self, vehicles: I) -> Vec<VehicleWithImages>
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        stream::iter(vehicles.into_iter().cloned())
            .map(|vehicle| self.with_images(vehicle))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await
    }

    /// Lead photo URL of every vehicle, in input order
    pub async fn first_image_urls<'a, I>(&self, vehicles: I) -> Vec<Option<String>>
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let stock_nums: Vec<Option<String>> = vehicles
            .into_iter()
            .map(|v| v.stock_num().map(str::to_owned))
            .collect();
        stream::iter(stock_nums)
            .map(|stock_num| async move {
                match stock_num {
                    Some(stock_num) => self.first_image(&stock_num).await.map(|i| i.url),
                    None => None,
                }
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await
    }
}
