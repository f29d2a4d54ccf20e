//! Equipment repository

use async_trait::async_trait;
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentJoinRow},
};

const EQUIPMENT_COLUMNS: &str = "id_equipos, nombre, descripcion, tipo_equipo_id, marca_id, \
     estado_equipo_id, anio_compra, costo, estado";

/// Storage operations behind the equipment endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentStore: Send + Sync {
    /// Equipment joined with its lookups, in join (id) order
    async fn list_joined(&self) -> AppResult<Vec<EquipmentJoinRow>>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>>;

    /// First equipment (lowest id) whose description contains `filter`
    async fn find_by_description(&self, filter: &str) -> AppResult<Option<Equipment>>;

    async fn create(&self, data: &Equipment) -> AppResult<Equipment>;

    /// Write the mutable columns of `data`; `false` when the row is gone
    async fn update(&self, data: &Equipment) -> AppResult<bool>;

    /// Remove a row, returning it as it was before removal
    async fn delete(&self, id: i32) -> AppResult<Option<Equipment>>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentStore for EquipmentRepository {
    async fn list_joined(&self) -> AppResult<Vec<EquipmentJoinRow>> {
        let mut conn = self.pool.acquire().await?;
        Ok(list_joined(&mut conn).await?)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Equipment>> {
        let mut conn = self.pool.acquire().await?;
        Ok(find_by_id(&mut conn, id).await?)
    }

    async fn find_by_description(&self, filter: &str) -> AppResult<Option<Equipment>> {
        let mut conn = self.pool.acquire().await?;
        Ok(find_by_description(&mut conn, filter).await?)
    }

    async fn create(&self, data: &Equipment) -> AppResult<Equipment> {
        let mut conn = self.pool.acquire().await?;
        insert(&mut conn, data)
            .await
            .map_err(AppError::from_write_error)
    }

    async fn update(&self, data: &Equipment) -> AppResult<bool> {
        let mut conn = self.pool.acquire().await?;
        let rows = update_mutable_fields(&mut conn, data).await?;
        Ok(rows > 0)
    }

    async fn delete(&self, id: i32) -> AppResult<Option<Equipment>> {
        let mut conn = self.pool.acquire().await?;
        Ok(delete(&mut conn, id).await?)
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}

/// Inner join of equipment with type, brand and status
pub async fn list_joined(conn: &mut PgConnection) -> Result<Vec<EquipmentJoinRow>, sqlx::Error> {
    sqlx::query_as::<_, EquipmentJoinRow>(
        r#"
        SELECT e.id_equipos, e.nombre, e.descripcion, e.tipo_equipo_id, e.marca_id,
               e.estado_equipo_id, e.anio_compra, e.costo, e.estado,
               t.descripcion AS type_description,
               m.nombre_marca AS brand_name,
               es.descripcion AS status_description
        FROM equipos e
        INNER JOIN tipo_equipo t ON e.tipo_equipo_id = t.id_tipo_equipo
        INNER JOIN marcas m ON e.marca_id = m.id_marcas
        INNER JOIN estados_equipo es ON e.estado_equipo_id = es.id_estados_equipo
        ORDER BY e.id_equipos
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn find_by_id(
    conn: &mut PgConnection,
    id: i32,
) -> Result<Option<Equipment>, sqlx::Error> {
    let query = format!("SELECT {} FROM equipos WHERE id_equipos = $1", EQUIPMENT_COLUMNS);
    sqlx::query_as::<_, Equipment>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Literal substring match; `%` and `_` in the filter are not wildcards
pub async fn find_by_description(
    conn: &mut PgConnection,
    filter: &str,
) -> Result<Option<Equipment>, sqlx::Error> {
    let query = format!(
        "SELECT {} FROM equipos WHERE strpos(descripcion, $1) > 0 ORDER BY id_equipos LIMIT 1",
        EQUIPMENT_COLUMNS
    );
    sqlx::query_as::<_, Equipment>(&query)
        .bind(filter)
        .fetch_optional(conn)
        .await
}

/// Insert a row; the id in `data` is ignored
pub async fn insert(conn: &mut PgConnection, data: &Equipment) -> Result<Equipment, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO equipos (
            nombre, descripcion, tipo_equipo_id, marca_id, estado_equipo_id,
            anio_compra, costo, estado
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {}
        "#,
        EQUIPMENT_COLUMNS
    );
    sqlx::query_as::<_, Equipment>(&query)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.type_id)
        .bind(data.brand_id)
        .bind(data.status_id)
        .bind(data.purchase_year)
        .bind(data.cost)
        .bind(&data.status)
        .fetch_one(conn)
        .await
}

/// Update everything but `estado_equipo_id` and `estado`
pub async fn update_mutable_fields(
    conn: &mut PgConnection,
    data: &Equipment,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE equipos
        SET nombre = $1, descripcion = $2, marca_id = $3, tipo_equipo_id = $4,
            anio_compra = $5, costo = $6
        WHERE id_equipos = $7
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.brand_id)
    .bind(data.type_id)
    .bind(data.purchase_year)
    .bind(data.cost)
    .bind(data.id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(conn: &mut PgConnection, id: i32) -> Result<Option<Equipment>, sqlx::Error> {
    let query = format!(
        "DELETE FROM equipos WHERE id_equipos = $1 RETURNING {}",
        EQUIPMENT_COLUMNS
    );
    sqlx::query_as::<_, Equipment>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
}
