use rust_decimal::Decimal;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::model::{FoodEntry, MealType};

/// Row shape of `food_entries`; `meal_type` is stored as its display label.
#[derive(Debug, FromRow)]
pub struct FoodEntryRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub food_name: String,
    pub quantity: String,
    pub price: Option<Decimal>,
    pub meal_type: String,
    pub entry_date: Date,
    pub created_at: OffsetDateTime,
}

impl TryFrom<FoodEntryRow> for FoodEntry {
    type Error = anyhow::Error;

    fn try_from(r: FoodEntryRow) -> Result<Self, Self::Error> {
        let meal_type: MealType = r
            .meal_type
            .parse()
            .map_err(|e| anyhow::anyhow!("entry {} has corrupt meal_type: {e}", r.id))?;
        Ok(Self {
            id: r.id,
            owner_id: r.owner_id,
            food_name: r.food_name,
            quantity: r.quantity,
            price: r.price,
            meal_type,
            date: r.entry_date,
            created_at: r.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn row(meal_type: &str) -> FoodEntryRow {
        FoodEntryRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            food_name: "Poha".into(),
            quantity: String::new(),
            price: None,
            meal_type: meal_type.into(),
            entry_date: date!(2024 - 01 - 02),
            created_at: datetime!(2024-01-02 08:30 UTC),
        }
    }

    #[test]
    fn converts_stored_label() {
        let entry = FoodEntry::try_from(row("Evening Tea / Snacks")).unwrap();
        assert_eq!(entry.meal_type, MealType::EveningSnacks);
        assert_eq!(entry.date, date!(2024 - 01 - 02));
        assert_eq!(entry.price, None);
    }

    #[test]
    fn rejects_unknown_label() {
        assert!(FoodEntry::try_from(row("Midnight")).is_err());
    }
}
