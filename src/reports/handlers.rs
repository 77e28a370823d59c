use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    csv::to_csv,
    dto::{ExportQuery, ReportScope, SummaryQuery, SummaryResponse},
    services::summarize,
};
use crate::{
    auth::extractors::AuthUser,
    error::AppResult,
    reports::aggregate::filter_by_month,
    state::AppState,
};

pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports/summary", get(summary))
        .route("/reports/export", get(export_csv))
}

#[instrument(skip(state, query))]
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> AppResult<Json<SummaryResponse>> {
    let Query(query) = query?;
    let scope = ReportScope::try_from(query)?;
    let entries = state.entries.list_by_owner(user_id).await?;
    Ok(Json(summarize(&entries, scope)))
}

#[instrument(skip(state, query))]
pub async fn export_csv(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(ExportQuery { month }) = query?;
    let entries = state.entries.list_by_owner(user_id).await?;
    let month_entries = filter_by_month(&entries, month);
    let report = to_csv(month_entries, &month.to_string());

    info!(%user_id, %month, file = %report.file_name, "csv export");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", report.file_name),
            ),
        ],
        report.body,
    ))
}
