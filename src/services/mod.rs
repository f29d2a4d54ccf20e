//! Business logic services

pub mod equipment;

use std::sync::Arc;

use crate::repository::{equipment::EquipmentStore, Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self::with_equipment_store(Arc::new(repository.equipment))
    }

    /// Create services over an arbitrary equipment store
    pub fn with_equipment_store(store: Arc<dyn EquipmentStore>) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(store),
        }
    }
}
