use rust_decimal::Decimal;

use super::aggregate::total_expense;
use crate::entries::model::FoodEntry;

const HEADER: &str = "Date,Food Item,Quantity,Meal Type,Price";

/// A rendered spreadsheet export plus the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReport {
    pub file_name: String,
    pub body: String,
}

/// Renders entries as CSV, oldest date first (ties keep input order),
/// followed by a blank line, an empty row and the total expense row.
pub fn to_csv<'a, I>(entries: I, label: &str) -> CsvReport
where
    I: IntoIterator<Item = &'a FoodEntry>,
{
    let mut rows: Vec<&FoodEntry> = entries.into_iter().collect();
    rows.sort_by_key(|e| e.date);

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(HEADER.to_string());
    lines.extend(rows.iter().map(|e| {
        format!(
            "{},{},{},{},{}",
            e.date,
            quote(&e.food_name),
            quote(&e.quantity),
            e.meal_type,
            e.price.map(format_amount).unwrap_or_default(),
        )
    }));
    lines.push(String::new());
    lines.push(",,,,".to_string());
    lines.push(format!(
        ",,,Total Expense,{}",
        format_amount(total_expense(rows.iter().copied()))
    ));

    CsvReport {
        file_name: format!("food-report-{label}.csv"),
        body: lines.join("\n"),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// `50.00` and `50` both render as `50`.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}
