use crate::{
    entries::model::FoodEntry,
    error::{AppError, AppResult},
};

use super::{
    aggregate::{
        daily_breakdown, distinct_days_tracked, filter_by_date, filter_by_month,
        meal_type_breakdown, total_expense,
    },
    dto::{DailyAmount, MealTypeAmount, ReportScope, SummaryQuery, SummaryResponse},
};

impl TryFrom<SummaryQuery> for ReportScope {
    type Error = AppError;

    fn try_from(q: SummaryQuery) -> AppResult<Self> {
        match (q.month, q.date) {
            (Some(_), Some(_)) => {
                Err(AppError::validation("use either month or date, not both"))
            }
            (Some(month), None) => Ok(ReportScope::Month(month)),
            (None, Some(date)) => Ok(ReportScope::Day(date)),
            (None, None) => Ok(ReportScope::All),
        }
    }
}

pub fn summarize(entries: &[FoodEntry], scope: ReportScope) -> SummaryResponse {
    let scoped: Vec<&FoodEntry> = match scope {
        ReportScope::All => entries.iter().collect(),
        ReportScope::Month(m) => filter_by_month(entries, m),
        ReportScope::Day(d) => filter_by_date(entries, d),
    };
    let (month, date) = match scope {
        ReportScope::All => (None, None),
        ReportScope::Month(m) => (Some(m), None),
        ReportScope::Day(d) => (None, Some(d)),
    };

    SummaryResponse {
        month,
        date,
        total_expense: total_expense(scoped.iter().copied()),
        total_meals: scoped.len(),
        days_tracked: distinct_days_tracked(scoped.iter().copied()),
        daily: daily_breakdown(scoped.iter().copied())
            .into_iter()
            .map(|(date, amount)| DailyAmount { date, amount })
            .collect(),
        by_meal_type: meal_type_breakdown(scoped.iter().copied())
            .into_iter()
            .map(|(meal_type, amount)| MealTypeAmount { meal_type, amount })
            .collect(),
    }
}
