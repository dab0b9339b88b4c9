use async_trait::async_trait;
use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlRow},
    MySqlPool, Row,
};
use tracing::{debug, info};

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{Supplier, SupplierDraft},
    },
    ports::{
        config::{ConfigKey, ConfigProvider},
        repositories::SupplierRepository,
    },
};

/// Connection settings resolved from runtime configuration
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DatabaseSettings {
    /// Read the current DB settings; every key must be set by now
    pub fn from_config(config: &dyn ConfigProvider) -> RepositoryResult<Self> {
        let require = |key: ConfigKey| {
            config.get(key).ok_or_else(|| RepositoryError::Database {
                message: format!("{} is not set", key),
            })
        };

        Ok(Self {
            host: require(ConfigKey::DbHost)?,
            user: require(ConfigKey::DbUser)?,
            password: require(ConfigKey::DbPassword)?,
            database: require(ConfigKey::DbName)?,
        })
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("database", &self.database)
            .finish()
    }
}

/// MySQL implementation of SupplierRepository.
///
/// Expects an existing `suppliers` table; no schema management is done here.
#[derive(Clone)]
pub struct SqlSupplierRepository {
    pool: MySqlPool,
}

impl SqlSupplierRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Build a pool that opens connections on first use
    pub fn connect_lazy(settings: &DatabaseSettings) -> Self {
        info!(host = %settings.host, database = %settings.database, "configuring database pool");
        let pool = MySqlPoolOptions::new()
            .max_connections(10)
            .connect_lazy_with(settings.connect_options());
        Self::new(pool)
    }
}

fn supplier_from_row(row: &MySqlRow) -> Result<Supplier, sqlx::Error> {
    Ok(Supplier {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        photo_url: row.try_get("photo_url")?,
    })
}

#[async_trait]
impl SupplierRepository for SqlSupplierRepository {
    async fn create(&self, draft: SupplierDraft) -> RepositoryResult<Supplier> {
        let result = sqlx::query(
            r#"
            INSERT INTO suppliers (name, address, city, state, email, phone, photo_url)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.photo_url)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id() as i64;
        debug!(id, "created supplier");
        Ok(Supplier::from_draft(id, draft))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<Supplier>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, address, city, state, email, phone, photo_url
            FROM suppliers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| supplier_from_row(row).map_err(RepositoryError::from))
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Supplier> {
        let row = sqlx::query(
            r#"
            SELECT id, name, address, city, state, email, phone, photo_url
            FROM suppliers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(supplier_from_row(&row)?),
            None => Err(RepositoryError::NotFound { id }),
        }
    }

    async fn update_by_id(&self, id: i64, draft: SupplierDraft) -> RepositoryResult<Supplier> {
        let result = sqlx::query(
            r#"
            UPDATE suppliers
            SET name = ?, address = ?, city = ?, state = ?, email = ?, phone = ?, photo_url = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(&draft.state)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.photo_url)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // MySQL reports changed rows, so an identical update affects zero rows
        if result.rows_affected() == 0 {
            self.find_by_id(id).await?;
        }

        Ok(Supplier::from_draft(id, draft))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { id });
        }
        Ok(())
    }
}
