use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::{
    model::{EntryPatch, FoodEntry, NewEntry},
    repo_types::FoodEntryRow,
};

/// Durable store for food entries. Every method is scoped to `owner_id`;
/// an entry owned by someone else behaves exactly like a missing one.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    async fn create(&self, owner_id: Uuid, entry: NewEntry) -> anyhow::Result<FoodEntry>;

    /// Newest `created_at` first.
    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<FoodEntry>>;

    async fn list_by_owner_and_date(
        &self,
        owner_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<FoodEntry>>;

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: EntryPatch,
    ) -> anyhow::Result<Option<FoodEntry>>;

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgEntryRepository {
    db: PgPool,
}

impl PgEntryRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const ENTRY_COLUMNS: &str =
    "id, owner_id, food_name, quantity, price, meal_type, entry_date, created_at";

#[async_trait]
impl EntryRepository for PgEntryRepository {
    async fn create(&self, owner_id: Uuid, entry: NewEntry) -> anyhow::Result<FoodEntry> {
        let row = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            INSERT INTO food_entries (id, owner_id, food_name, quantity, price, meal_type, entry_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&entry.food_name)
        .bind(&entry.quantity)
        .bind(entry.price)
        .bind(entry.meal_type.label())
        .bind(entry.date)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.db)
        .await
        .context("insert food entry")?;
        FoodEntry::try_from(row)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<FoodEntry>> {
        let rows = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
              FROM food_entries
             WHERE owner_id = $1
             ORDER BY created_at DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.db)
        .await
        .context("list entries by owner")?;
        rows.into_iter().map(FoodEntry::try_from).collect()
    }

    async fn list_by_owner_and_date(
        &self,
        owner_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<FoodEntry>> {
        let rows = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
              FROM food_entries
             WHERE owner_id = $1 AND entry_date = $2
             ORDER BY created_at DESC
            "#
        ))
        .bind(owner_id)
        .bind(date)
        .fetch_all(&self.db)
        .await
        .context("list entries by owner and date")?;
        rows.into_iter().map(FoodEntry::try_from).collect()
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: EntryPatch,
    ) -> anyhow::Result<Option<FoodEntry>> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        let current = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            SELECT {ENTRY_COLUMNS}
              FROM food_entries
             WHERE id = $1 AND owner_id = $2
             FOR UPDATE
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await
        .context("load entry for update")?;

        let Some(current) = current else {
            return Ok(None);
        };
        let mut entry = FoodEntry::try_from(current)?;
        patch.apply(&mut entry);

        let row = sqlx::query_as::<_, FoodEntryRow>(&format!(
            r#"
            UPDATE food_entries
               SET food_name = $3, quantity = $4, price = $5, meal_type = $6, entry_date = $7
             WHERE id = $1 AND owner_id = $2
            RETURNING {ENTRY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&entry.food_name)
        .bind(&entry.quantity)
        .bind(entry.price)
        .bind(entry.meal_type.label())
        .bind(entry.date)
        .fetch_one(&mut *tx)
        .await
        .context("update food entry")?;

        tx.commit().await.context("commit tx")?;
        FoodEntry::try_from(row).map(Some)
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM food_entries
             WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.db)
        .await
        .context("delete food entry")?;
        Ok(result.rows_affected() > 0)
    }
}
