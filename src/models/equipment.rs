//! Equipment model

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Equipment record, also used as the create/update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    /// Assigned by the database; ignored on input
    #[serde(default)]
    #[sqlx(rename = "id_equipos")]
    pub id: i32,
    #[serde(rename = "nombre")]
    #[sqlx(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    #[sqlx(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "tipo_equipo_id")]
    #[sqlx(rename = "tipo_equipo_id")]
    pub type_id: i32,
    #[serde(rename = "marca_id")]
    #[sqlx(rename = "marca_id")]
    pub brand_id: i32,
    #[serde(rename = "estado_equipo_id")]
    #[sqlx(rename = "estado_equipo_id")]
    pub status_id: i32,
    #[serde(rename = "anio_compra")]
    #[sqlx(rename = "anio_compra")]
    pub purchase_year: Option<i32>,
    #[serde(rename = "costo", default, with = "rust_decimal::serde::float_option")]
    #[sqlx(rename = "costo")]
    #[schema(value_type = Option<f64>)]
    pub cost: Option<Decimal>,
    /// Free-form state, independent of `estado_equipo_id`
    #[serde(rename = "estado")]
    #[sqlx(rename = "estado")]
    pub status: Option<String>,
}

impl Equipment {
    /// Copy the fields an update is allowed to change.
    ///
    /// `status_id` and `status` are left as they are.
    pub fn apply_update(&mut self, changes: &Equipment) {
        self.name = changes.name.clone();
        self.description = changes.description.clone();
        self.brand_id = changes.brand_id;
        self.type_id = changes.type_id;
        self.purchase_year = changes.purchase_year;
        self.cost = changes.cost;
    }
}

/// Equipment joined with its type, brand and status rows
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentJoinRow {
    #[sqlx(flatten)]
    pub equipment: Equipment,
    pub type_description: String,
    pub brand_name: String,
    pub status_description: String,
}

/// Equipment listing entry with display labels
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EquipmentListing {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub tipo_equipo_id: i32,
    pub tipo_equipo: String,
    pub marca_id: i32,
    pub marca: String,
    pub estado_equipo_id: i32,
    pub estado_equipo: String,
    pub anio_compra: Option<i32>,
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub costo: Option<Decimal>,
    pub detalle: String,
    pub estado: Option<String>,
}

impl From<EquipmentJoinRow> for EquipmentListing {
    fn from(row: EquipmentJoinRow) -> Self {
        let detalle = format!(
            "Tipo: {}, Marca {} Estado Equipo {}",
            row.type_description, row.brand_name, row.status_description
        );
        let e = row.equipment;
        Self {
            id: e.id,
            nombre: e.name,
            descripcion: e.description,
            tipo_equipo_id: e.type_id,
            tipo_equipo: row.type_description,
            marca_id: e.brand_id,
            marca: row.brand_name,
            estado_equipo_id: e.status_id,
            estado_equipo: row.status_description,
            anio_compra: e.purchase_year,
            costo: e.cost,
            detalle,
            estado: e.status,
        }
    }
}

impl EquipmentListing {
    /// Status ascending, then brand ascending, then type descending
    pub fn listing_order(a: &Self, b: &Self) -> Ordering {
        a.estado_equipo_id
            .cmp(&b.estado_equipo_id)
            .then(a.marca_id.cmp(&b.marca_id))
            .then(b.tipo_equipo_id.cmp(&a.tipo_equipo_id))
    }
}

/// Build the listing from join rows, keeping join order among equal keys
pub fn build_listing(rows: Vec<EquipmentJoinRow>) -> Vec<EquipmentListing> {
    let mut listing: Vec<EquipmentListing> = rows.into_iter().map(Into::into).collect();
    // sort_by is stable
    listing.sort_by(EquipmentListing::listing_order);
    listing
}
