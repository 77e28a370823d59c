use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::entries::model::{iso_date, MealType, YearMonth};

/// `month` and `date` are mutually exclusive; neither means "everything".
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub month: Option<YearMonth>,
    #[serde(default, deserialize_with = "iso_date::deserialize_option")]
    pub date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub month: YearMonth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    All,
    Month(YearMonth),
    Day(Date),
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DailyAmount {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub amount: Decimal,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealTypeAmount {
    pub meal_type: MealType,
    pub amount: Decimal,
}

/// Dashboard figures for the requested scope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub month: Option<YearMonth>,
    #[serde(serialize_with = "iso_date::serialize_option")]
    pub date: Option<Date>,
    pub total_expense: Decimal,
    pub total_meals: usize,
    pub days_tracked: usize,
    pub daily: Vec<DailyAmount>,
    pub by_meal_type: Vec<MealTypeAmount>,
}
