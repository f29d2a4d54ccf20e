//! Equipment service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{build_listing, Equipment, EquipmentListing},
    repository::equipment::EquipmentStore,
};

#[derive(Clone)]
pub struct EquipmentService {
    store: Arc<dyn EquipmentStore>,
}

impl EquipmentService {
    pub fn new(store: Arc<dyn EquipmentStore>) -> Self {
        Self { store }
    }

    /// Joined listing; an empty inventory is reported as not found
    pub async fn list(&self) -> AppResult<Vec<EquipmentListing>> {
        let rows = self.store.list_joined().await?;
        if rows.is_empty() {
            return Err(AppError::NotFound("No equipment registered".to_string()));
        }
        tracing::debug!("Listing {} equipment rows", rows.len());
        Ok(build_listing(rows))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn find_by_description(&self, filter: &str) -> AppResult<Equipment> {
        self.store
            .find_by_description(filter)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No equipment description contains '{}'", filter))
            })
    }

    pub async fn create(&self, data: &Equipment) -> AppResult<Equipment> {
        let equipment = self.store.create(data).await?;
        tracing::info!("Created equipment {}", equipment.id);
        Ok(equipment)
    }

    /// Overwrite the mutable fields of an existing row.
    ///
    /// Returns the payload as submitted, not the stored row.
    pub async fn update(&self, id: i32, data: Equipment) -> AppResult<Equipment> {
        let mut current = self.get_by_id(id).await?;
        current.apply_update(&data);

        if !self.store.update(&current).await? {
            return Err(not_found(id));
        }

        tracing::info!("Updated equipment {}", id);
        Ok(data)
    }

    /// Delete a row and hand back what was removed
    pub async fn delete(&self, id: i32) -> AppResult<Equipment> {
        let removed = self.store.delete(id).await?.ok_or_else(|| not_found(id))?;
        tracing::info!("Deleted equipment {}", id);
        Ok(removed)
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Equipment {} not found", id))
}
