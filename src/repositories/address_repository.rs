use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::geo::bounding_box::{BoundingBox, LongitudeSpan};
use crate::models::{Address, AddressChanges, NewAddress};
use crate::utils::errors::AppResult;

/// Contrato de persistencia de direcciones.
///
/// Los listados devuelven las direcciones ordenadas por id ascendente.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn create(&self, address: NewAddress) -> AppResult<Address>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Address>>;

    /// `None` si la dirección no existe
    async fn update(&self, id: i64, changes: AddressChanges) -> AppResult<Option<Address>>;

    /// `false` si la dirección no existe
    async fn delete(&self, id: i64) -> AppResult<bool>;

    async fn list_all(&self) -> AppResult<Vec<Address>>;

    /// Página de direcciones por id ascendente
    async fn list_page(&self, limit: usize, offset: usize) -> AppResult<Vec<Address>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .skip(offset)
            .take(limit)
            .collect())
    }

    /// Candidatos dentro del bounding box (pre-filtro conservador)
    async fn list_within(&self, bounds: &BoundingBox) -> AppResult<Vec<Address>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|address| bounds.contains(&address.location()))
            .collect())
    }
}

const ADDRESS_COLUMNS: &str = "id, uuid, name, street, city, state, country, postal_code, \
     building_number, apartment, latitude, longitude, created_at, updated_at";

/// Repositorio PostgreSQL
pub struct PgAddressRepository {
    pool: PgPool,
}

impl PgAddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn create(&self, address: NewAddress) -> AppResult<Address> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO addresses (uuid, name, street, city, state, country, postal_code,
                                   building_number, apartment, latitude, longitude, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING {}
            "#,
            ADDRESS_COLUMNS
        );

        let created = sqlx::query_as::<_, Address>(&query)
            .bind(Uuid::new_v4())
            .bind(address.name)
            .bind(address.street)
            .bind(address.city)
            .bind(address.state)
            .bind(address.country)
            .bind(address.postal_code)
            .bind(address.building_number)
            .bind(address.apartment)
            .bind(address.latitude)
            .bind(address.longitude)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Address>> {
        let query = format!("SELECT {} FROM addresses WHERE id = $1", ADDRESS_COLUMNS);

        let address = sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(address)
    }

    async fn update(&self, id: i64, changes: AddressChanges) -> AppResult<Option<Address>> {
        let mut tx = self.pool.begin().await?;

        let select = format!("SELECT {} FROM addresses WHERE id = $1 FOR UPDATE", ADDRESS_COLUMNS);
        let Some(mut current) = sqlx::query_as::<_, Address>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        changes.apply(&mut current, Utc::now());

        let update = format!(
            r#"
            UPDATE addresses
            SET name = $2, street = $3, city = $4, state = $5, country = $6, postal_code = $7,
                building_number = $8, apartment = $9, latitude = $10, longitude = $11, updated_at = $12
            WHERE id = $1
            RETURNING {}
            "#,
            ADDRESS_COLUMNS
        );

        let updated = sqlx::query_as::<_, Address>(&update)
            .bind(id)
            .bind(current.name)
            .bind(current.street)
            .bind(current.city)
            .bind(current.state)
            .bind(current.country)
            .bind(current.postal_code)
            .bind(current.building_number)
            .bind(current.apartment)
            .bind(current.latitude)
            .bind(current.longitude)
            .bind(current.updated_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> AppResult<Vec<Address>> {
        let query = format!("SELECT {} FROM addresses ORDER BY id", ADDRESS_COLUMNS);

        let addresses = sqlx::query_as::<_, Address>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(addresses)
    }

    async fn list_page(&self, limit: usize, offset: usize) -> AppResult<Vec<Address>> {
        let query = format!(
            "SELECT {} FROM addresses ORDER BY id LIMIT $1 OFFSET $2",
            ADDRESS_COLUMNS
        );

        let addresses = sqlx::query_as::<_, Address>(&query)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(addresses)
    }

    async fn list_within(&self, bounds: &BoundingBox) -> AppResult<Vec<Address>> {
        let (query, longitude_bounds) = within_query(bounds);
        debug!("🔍 Candidatos dentro de {:?}", bounds);

        let mut statement = sqlx::query_as::<_, Address>(&query)
            .bind(bounds.min_latitude)
            .bind(bounds.max_latitude);
        if let Some((min, max)) = longitude_bounds {
            statement = statement.bind(min).bind(max);
        }

        let addresses = statement.fetch_all(&self.pool).await?;

        Ok(addresses)
    }
}

/// Condición SQL sobre longitud; `$3`/`$4` reciben los límites devueltos
fn longitude_clause(span: LongitudeSpan) -> (&'static str, Option<(f64, f64)>) {
    match span {
        LongitudeSpan::Any => ("", None),
        LongitudeSpan::Range { min, max } => ("AND longitude BETWEEN $3 AND $4", Some((min, max))),
        LongitudeSpan::Wrapped { min, max } => {
            ("AND (longitude >= $3 OR longitude <= $4)", Some((min, max)))
        }
    }
}

/// SELECT de candidatos dentro del bounding box (`$1`/`$2` = latitudes)
fn within_query(bounds: &BoundingBox) -> (String, Option<(f64, f64)>) {
    let (clause, longitude_bounds) = longitude_clause(bounds.longitude);
    let query = format!(
        "SELECT {} FROM addresses WHERE latitude BETWEEN $1 AND $2 {} ORDER BY id",
        ADDRESS_COLUMNS, clause
    );
    (query, longitude_bounds)
}
