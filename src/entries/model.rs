use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use time::{macros::format_description, Date, Month, OffsetDateTime};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Time-of-day category of a logged meal. Declaration order is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    #[serde(rename = "Evening Tea / Snacks", alias = "EveningSnacks")]
    EveningSnacks,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::EveningSnacks,
        MealType::Dinner,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::EveningSnacks => "Evening Tea / Snacks",
            MealType::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MealType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(MealType::Breakfast),
            "Lunch" => Ok(MealType::Lunch),
            "Evening Tea / Snacks" | "EveningSnacks" => Ok(MealType::EveningSnacks),
            "Dinner" => Ok(MealType::Dinner),
            other => Err(AppError::validation(format!("unknown meal type {other:?}"))),
        }
    }
}

/// One logged food record, always owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub food_name: String,
    pub quantity: String,
    /// `None` means "not tracked", which is not the same as a price of zero.
    pub price: Option<Decimal>,
    pub meal_type: MealType,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Body of `POST /entries`. Owner, id and creation time are never taken from the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub food_name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    pub meal_type: MealType,
    #[serde(deserialize_with = "iso_date::deserialize")]
    pub date: Date,
}

impl NewEntry {
    pub fn validate(mut self) -> AppResult<Self> {
        self.food_name = validate_food_name(&self.food_name)?;
        self.quantity = self.quantity.trim().to_string();
        validate_price(self.price)?;
        Ok(self)
    }
}

/// Body of `PUT /entries/:id`. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    pub food_name: Option<String>,
    pub quantity: Option<String>,
    /// Outer `None`: leave as is. `Some(None)`: clear to "not tracked".
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<Decimal>>,
    pub meal_type: Option<MealType>,
    #[serde(default, deserialize_with = "iso_date::deserialize_option")]
    pub date: Option<Date>,
}

impl EntryPatch {
    pub fn validate(mut self) -> AppResult<Self> {
        if let Some(name) = &self.food_name {
            self.food_name = Some(validate_food_name(name)?);
        }
        if let Some(q) = &self.quantity {
            self.quantity = Some(q.trim().to_string());
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(self)
    }

    /// Writes the patched fields into `entry`. Identity, owner and creation time are untouched.
    pub fn apply(self, entry: &mut FoodEntry) {
        if let Some(name) = self.food_name {
            entry.food_name = name;
        }
        if let Some(quantity) = self.quantity {
            entry.quantity = quantity;
        }
        if let Some(price) = self.price {
            entry.price = price;
        }
        if let Some(meal_type) = self.meal_type {
            entry.meal_type = meal_type;
        }
        if let Some(date) = self.date {
            entry.date = date;
        }
    }
}

fn validate_food_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("foodName is required"));
    }
    Ok(name.to_string())
}

/// Prices fit `NUMERIC(12,2)`: at most ten integer digits and two decimals.
pub const MAX_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);
const PRICE_SCALE: u32 = 2;

fn validate_price(price: Option<Decimal>) -> AppResult<()> {
    let Some(p) = price else {
        return Ok(());
    };
    if p < Decimal::ZERO {
        return Err(AppError::validation("price must not be negative"));
    }
    if p > MAX_PRICE {
        return Err(AppError::validation(format!("price must not exceed {MAX_PRICE}")));
    }
    if p.normalize().scale() > PRICE_SCALE {
        return Err(AppError::validation("price allows at most two decimal places"));
    }
    Ok(())
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> AppResult<Date> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|_| AppError::validation(format!("invalid date {s:?}, expected YYYY-MM-DD")))
}

pub(crate) mod iso_date {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text).map_err(de::Error::custom)
    }

    pub fn serialize_option<S: Serializer>(
        date: &Option<Date>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.collect_str(d),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| super::parse_date(&text).map_err(de::Error::custom))
            .transpose()
    }
}

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: Month,
}

impl YearMonth {
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::validation(format!("invalid month {s:?}, expected YYYY-MM"));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let digits = year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !digits {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;
        Ok(Self { year, month })
    }
}

impl TryFrom<String> for YearMonth {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
