//! Pure summaries over an owner's entries.
//!
//! A price counts when it is present, zero included; an absent price is
//! skipped. Nothing here inspects the value to decide inclusion.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use time::Date;

use crate::entries::model::{FoodEntry, MealType, YearMonth};

pub fn total_expense<'a, I>(entries: I) -> Decimal
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    entries.into_iter().filter_map(|e| e.price).sum()
}

pub fn filter_by_date<'a, I>(entries: I, date: Date) -> Vec<&'a FoodEntry>
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    entries.into_iter().filter(|e| e.date == date).collect()
}

pub fn filter_by_month<'a, I>(entries: I, month: YearMonth) -> Vec<&'a FoodEntry>
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    entries.into_iter().filter(|e| month.contains(e.date)).collect()
}

/// Priced totals per day, ascending by date.
pub fn daily_breakdown<'a, I>(entries: I) -> BTreeMap<Date, Decimal>
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    let mut out = BTreeMap::new();
    for entry in entries {
        if let Some(price) = entry.price {
            *out.entry(entry.date).or_insert(Decimal::ZERO) += price;
        }
    }
    out
}

/// Priced totals per meal type. Always holds all four meal types.
pub fn meal_type_breakdown<'a, I>(entries: I) -> BTreeMap<MealType, Decimal>
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    let mut out: BTreeMap<MealType, Decimal> =
        MealType::ALL.into_iter().map(|m| (m, Decimal::ZERO)).collect();
    for entry in entries {
        if let Some(price) = entry.price {
            *out.entry(entry.meal_type).or_insert(Decimal::ZERO) += price;
        }
    }
    out
}

pub fn distinct_days_tracked<'a, I>(entries: I) -> usize
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    entries.into_iter().map(|e| e.date).collect::<HashSet<_>>().len()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use time::{macros::date, OffsetDateTime};
    use uuid::Uuid;

    pub(crate) fn entry(date: Date, meal_type: MealType, price: Option<i64>) -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            owner_id: Uuid::nil(),
            food_name: "Meal".into(),
            quantity: String::new(),
            price: price.map(Decimal::from),
            meal_type,
            date,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn month(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn total_of_nothing_is_zero() {
        let none: [FoodEntry; 0] = [];
        assert_eq!(total_expense(&none), Decimal::ZERO);
    }

    #[test]
    fn total_skips_untracked_prices() {
        let entries = [
            entry(date!(2024 - 03 - 01), MealType::Lunch, Some(50)),
            entry(date!(2024 - 03 - 01), MealType::Dinner, None),
            entry(date!(2024 - 03 - 02), MealType::Breakfast, Some(20)),
        ];
        assert_eq!(total_expense(&entries), Decimal::from(70));
    }

    #[test]
    fn total_ignores_order() {
        let mut entries = vec![
            entry(date!(2024 - 03 - 01), MealType::Lunch, Some(5)),
            entry(date!(2024 - 03 - 03), MealType::Dinner, Some(7)),
            entry(date!(2024 - 03 - 02), MealType::Breakfast, Some(11)),
        ];
        let forward = total_expense(&entries);
        entries.reverse();
        assert_eq!(total_expense(&entries), forward);
    }

    #[test]
    fn total_matches_meal_type_breakdown_when_all_priced() {
        let entries = [
            entry(date!(2024 - 03 - 01), MealType::Lunch, Some(50)),
            entry(date!(2024 - 03 - 01), MealType::Lunch, Some(15)),
            entry(date!(2024 - 03 - 02), MealType::EveningSnacks, Some(30)),
            entry(date!(2024 - 03 - 02), MealType::Dinner, Some(0)),
        ];
        let by_meal: Decimal = meal_type_breakdown(&entries).values().copied().sum();
        assert_eq!(by_meal, total_expense(&entries));
    }

    #[test]
    fn zero_priced_entries_are_kept_in_breakdowns() {
        let entries = [entry(date!(2024 - 03 - 05), MealType::Breakfast, Some(0))];

        let daily = daily_breakdown(&entries);
        assert_eq!(daily.get(&date!(2024 - 03 - 05)), Some(&Decimal::ZERO));

        let by_meal = meal_type_breakdown(&entries);
        assert_eq!(by_meal[&MealType::Breakfast], Decimal::ZERO);
    }

    #[test]
    fn daily_breakdown_excludes_unpriced_days_and_sorts() {
        let entries = [
            entry(date!(2024 - 03 - 10), MealType::Lunch, Some(40)),
            entry(date!(2024 - 03 - 02), MealType::Lunch, Some(10)),
            entry(date!(2024 - 03 - 02), MealType::Dinner, Some(5)),
            entry(date!(2024 - 03 - 07), MealType::Dinner, None),
        ];
        let daily: Vec<_> = daily_breakdown(&entries).into_iter().collect();
        assert_eq!(
            daily,
            vec![
                (date!(2024 - 03 - 02), Decimal::from(15)),
                (date!(2024 - 03 - 10), Decimal::from(40)),
            ]
        );
    }

    #[test]
    fn meal_type_breakdown_always_has_four_keys() {
        let none: [FoodEntry; 0] = [];
        let empty = meal_type_breakdown(&none);
        assert_eq!(empty.keys().copied().collect::<Vec<_>>(), MealType::ALL);
        assert!(empty.values().all(|v| v.is_zero()));

        let only_dinner = [entry(date!(2024 - 03 - 01), MealType::Dinner, Some(99))];
        let by_meal = meal_type_breakdown(&only_dinner);
        assert_eq!(by_meal.len(), 4);
        assert_eq!(by_meal[&MealType::Dinner], Decimal::from(99));
        assert_eq!(by_meal[&MealType::Lunch], Decimal::ZERO);
    }

    #[test]
    fn filter_by_month_uses_calendar_month() {
        let entries = [
            entry(date!(2024 - 02 - 28), MealType::Lunch, None),
            entry(date!(2024 - 03 - 05), MealType::Lunch, None),
            entry(date!(2024 - 04 - 01), MealType::Lunch, None),
            entry(date!(2024 - 03 - 31), MealType::Lunch, None),
            entry(date!(2023 - 03 - 15), MealType::Lunch, None),
        ];
        let march: Vec<_> = filter_by_month(&entries, month("2024-03"))
            .into_iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(march, vec![date!(2024 - 03 - 05), date!(2024 - 03 - 31)]);
    }

    #[test]
    fn filter_by_date_preserves_input_order() {
        let a = entry(date!(2024 - 03 - 01), MealType::Dinner, Some(1));
        let b = entry(date!(2024 - 03 - 02), MealType::Lunch, Some(2));
        let c = entry(date!(2024 - 03 - 01), MealType::Breakfast, Some(3));
        let entries = [a.clone(), b, c.clone()];

        let picked = filter_by_date(&entries, date!(2024 - 03 - 01));
        assert_eq!(picked, vec![&a, &c]);
    }

    #[test]
    fn counts_distinct_days() {
        let entries = [
            entry(date!(2024 - 01 - 01), MealType::Lunch, None),
            entry(date!(2024 - 01 - 01), MealType::Dinner, Some(3)),
            entry(date!(2024 - 01 - 02), MealType::Lunch, None),
        ];
        assert_eq!(distinct_days_tracked(&entries), 2);
        assert_eq!(distinct_days_tracked(&entries[..0]), 0);
    }

    #[test]
    fn filters_compose_with_aggregates() {
        let entries = [
            entry(date!(2024 - 03 - 01), MealType::Lunch, Some(10)),
            entry(date!(2024 - 04 - 01), MealType::Lunch, Some(99)),
        ];
        let march = filter_by_month(&entries, month("2024-03"));
        assert_eq!(total_expense(march.iter().copied()), Decimal::from(10));
        assert_eq!(distinct_days_tracked(march), 1);
    }
}
