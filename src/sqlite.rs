// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistent storage.

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, Sqlite, query, query_as};
use thiserror::Error;

use crate::config::Config;
use crate::group::Group;
use crate::store::GroupStore;

/// Re-export of SQLite connection pool type.
pub type Pool = SqlitePool;

#[derive(Debug, Error)]
pub enum SqliteStoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("invalid members column: {0}")]
    MembersColumn(#[from] serde_json::Error),
}

/// Create the database if it doesn't already exist.
pub async fn create_database(url: &str) -> Result<(), SqliteStoreError> {
    if !Sqlite::database_exists(url).await? {
        Sqlite::create_database(url).await?;
    }

    Ok(())
}

/// Drop the database if it exists.
pub async fn drop_database(url: &str) -> Result<(), SqliteStoreError> {
    if Sqlite::database_exists(url).await? {
        Sqlite::drop_database(url).await?;
    }

    Ok(())
}

/// Create a connection pool.
pub async fn connection_pool(url: &str, max_connections: u32) -> Result<Pool, SqliteStoreError> {
    let pool: Pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;

    Ok(pool)
}

/// SQLite-based persistent group store.
///
/// Group records live in one table whose name is supplied by [`Config`]. The member list is held
/// in a JSON text column so a members write replaces exactly one field of the record.
#[derive(Clone, Debug)]
pub struct SqliteGroupStore {
    pool: Pool,
    table: String,
}

#[derive(Debug, FromRow)]
struct GroupRow {
    group_id: String,
    max_members: Option<u32>,
    members: String,
}

impl TryFrom<GroupRow> for Group {
    type Error = serde_json::Error;

    fn try_from(row: GroupRow) -> Result<Self, Self::Error> {
        Ok(Self {
            group_id: row.group_id,
            max_members: row.max_members,
            members: serde_json::from_str(&row.members)?,
        })
    }
}

impl SqliteGroupStore {
    /// Create a new `SqliteGroupStore` using the provided db `Pool` and configuration.
    pub fn new(pool: Pool, config: &Config) -> Self {
        Self {
            pool,
            table: config.groups_table().to_owned(),
        }
    }

    /// Create the groups table if it doesn't already exist.
    ///
    /// The table name comes from the externally-supplied configuration, which is why this is not
    /// expressed as a regular migration.
    pub async fn create_table(&self) -> Result<(), SqliteStoreError> {
        query(&format!(
            "
            CREATE TABLE IF NOT EXISTS {} (
                group_id TEXT NOT NULL PRIMARY KEY,
                max_members INTEGER,
                members TEXT NOT NULL
            )
            ",
            self.table
        ))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace a full group record.
    ///
    /// Group creation is the business of an external collaborator; this is provided for seeding
    /// development and test databases.
    pub async fn insert_group(&self, group: &Group) -> Result<(), SqliteStoreError> {
        query(&format!(
            "
            INSERT OR REPLACE INTO {} (group_id, max_members, members)
            VALUES ($1, $2, $3)
            ",
            self.table
        ))
        .bind(&group.group_id)
        .bind(group.max_members)
        .bind(serde_json::to_string(&group.members)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl GroupStore for SqliteGroupStore {
    type Error = SqliteStoreError;

    async fn group(&self, id: &str) -> Result<Option<Group>, Self::Error> {
        let row = query_as::<_, GroupRow>(&format!(
            "SELECT group_id, max_members, members FROM {} WHERE group_id = $1",
            self.table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Group::try_from).transpose()?)
    }

    async fn set_members(&self, id: &str, members: &[String]) -> Result<(), Self::Error> {
        query(&format!(
            "UPDATE {} SET members = $1 WHERE group_id = $2",
            self.table
        ))
        .bind(serde_json::to_string(&members)?)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn compare_and_swap_members(
        &self,
        id: &str,
        expected: &[String],
        next: &[String],
    ) -> Result<bool, Self::Error> {
        // Compare and swap run inside one transaction. Returning early drops the transaction
        // which rolls it back.
        let mut tx = self.pool.begin().await?;

        let row: Option<(String,)> = query_as(&format!(
            "SELECT members FROM {} WHERE group_id = $1",
            self.table
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((members,)) = row else {
            return Ok(false);
        };
        let members: Vec<String> = serde_json::from_str(&members)?;
        if members.as_slice() != expected {
            return Ok(false);
        }

        query(&format!(
            "UPDATE {} SET members = $1 WHERE group_id = $2",
            self.table
        ))
        .bind(serde_json::to_string(&next)?)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(true)
    }
}
