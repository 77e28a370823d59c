use async_trait::async_trait;
use time::{Date, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    model::{EntryPatch, FoodEntry, NewEntry},
    repo::EntryRepository,
};

/// Process-local entry store. Entries are kept in insertion order, so
/// walking the vector backwards yields newest-created first.
#[derive(Default)]
pub struct MemoryEntryRepository {
    entries: RwLock<Vec<FoodEntry>>,
}

impl MemoryEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryRepository for MemoryEntryRepository {
    async fn create(&self, owner_id: Uuid, entry: NewEntry) -> anyhow::Result<FoodEntry> {
        let entry = FoodEntry {
            id: Uuid::new_v4(),
            owner_id,
            food_name: entry.food_name,
            quantity: entry.quantity,
            price: entry.price,
            meal_type: entry.meal_type,
            date: entry.date,
            created_at: OffsetDateTime::now_utc(),
        };
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<FoodEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_by_owner_and_date(
        &self,
        owner_id: Uuid,
        date: Date,
    ) -> anyhow::Result<Vec<FoodEntry>> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .rev()
            .filter(|e| e.owner_id == owner_id && e.date == date)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        owner_id: Uuid,
        id: Uuid,
        patch: EntryPatch,
    ) -> anyhow::Result<Option<FoodEntry>> {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries
            .iter_mut()
            .find(|e| e.id == id && e.owner_id == owner_id)
        else {
            return Ok(None);
        };
        patch.apply(entry);
        Ok(Some(entry.clone()))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| !(e.id == id && e.owner_id == owner_id));
        Ok(entries.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::model::MealType;
    use rust_decimal::Decimal;
    use time::macros::date;

    fn new_entry(name: &str, date: Date) -> NewEntry {
        NewEntry {
            food_name: name.into(),
            quantity: String::new(),
            price: Some(Decimal::from(10)),
            meal_type: MealType::Lunch,
            date,
        }
    }

    #[tokio::test]
    async fn lists_only_the_owners_entries_newest_first() {
        let repo = MemoryEntryRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.create(alice, new_entry("Idli", date!(2024 - 03 - 01))).await.unwrap();
        repo.create(bob, new_entry("Bagel", date!(2024 - 03 - 01))).await.unwrap();
        repo.create(alice, new_entry("Dosa", date!(2024 - 03 - 02))).await.unwrap();

        let names: Vec<_> = repo
            .list_by_owner(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.food_name)
            .collect();
        assert_eq!(names, ["Dosa", "Idli"]);

        let on_first = repo
            .list_by_owner_and_date(alice, date!(2024 - 03 - 01))
            .await
            .unwrap();
        assert_eq!(on_first.len(), 1);
        assert_eq!(on_first[0].food_name, "Idli");
    }

    #[tokio::test]
    async fn foreign_update_and_delete_look_like_missing() {
        let repo = MemoryEntryRepository::new();
        let alice = Uuid::new_v4();
        let mallory = Uuid::new_v4();
        let entry = repo
            .create(alice, new_entry("Thali", date!(2024 - 03 - 01)))
            .await
            .unwrap();

        let patch = EntryPatch {
            food_name: Some("Stolen".into()),
            ..Default::default()
        };
        assert_eq!(repo.update(mallory, entry.id, patch.clone()).await.unwrap(), None);
        assert!(!repo.delete(mallory, entry.id).await.unwrap());
        assert_eq!(
            repo.update(mallory, Uuid::new_v4(), patch).await.unwrap(),
            None
        );

        let still_there = repo.list_by_owner(alice).await.unwrap();
        assert_eq!(still_there[0].food_name, "Thali");
    }

    #[tokio::test]
    async fn owner_can_update_and_delete() {
        let repo = MemoryEntryRepository::new();
        let alice = Uuid::new_v4();
        let entry = repo
            .create(alice, new_entry("Thali", date!(2024 - 03 - 01)))
            .await
            .unwrap();

        let patch = EntryPatch {
            price: Some(None),
            ..Default::default()
        };
        let updated = repo.update(alice, entry.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.price, None);
        assert_eq!(updated.owner_id, alice);

        assert!(repo.delete(alice, entry.id).await.unwrap());
        assert!(!repo.delete(alice, entry.id).await.unwrap());
        assert!(repo.list_by_owner(alice).await.unwrap().is_empty());
    }
}
