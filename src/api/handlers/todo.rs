//! Daily production report handlers.

use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Local;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::REPORT_TAG;
use crate::api::dto::{TodoQuery, TodoReportResponse};
use crate::api::handlers::current_user;
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::services::reports::todo_workbook;
use crate::state::AppState;
use crate::utils::validate::ValidatedQuery;

pub fn todo_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_todo_report))
        .routes(routes!(export_todo_report))
}

/// GET /api/reports/todo - The daily production report
///
/// The caller sees only jobs in workflows they have access to.
#[utoipa::path(
    get,
    path = "/",
    tag = REPORT_TAG,
    params(TodoQuery),
    responses(
        (status = 200, description = "Bucketed daily report", body = TodoReportResponse)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_todo_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedQuery(query): ValidatedQuery<TodoQuery>,
) -> AppResult<Json<TodoReportResponse>> {
    let user = current_user(&state, &auth).await?;
    let workflows = user.permitted_workflows();

    let report = state
        .services
        .todo
        .daily_report(&workflows, query.manager_tools)
        .await?;

    Ok(Json(TodoReportResponse::from(report)))
}

/// GET /api/reports/todo/export - The daily report as an Excel workbook
#[utoipa::path(
    get,
    path = "/export",
    tag = REPORT_TAG,
    params(TodoQuery),
    responses(
        (status = 200, description = "Workbook download", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn export_todo_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedQuery(query): ValidatedQuery<TodoQuery>,
) -> AppResult<Response> {
    let user = current_user(&state, &auth).await?;
    let workflows = user.permitted_workflows();

    let report = state
        .services
        .todo
        .daily_report(&workflows, query.manager_tools)
        .await?;
    let bytes = todo_workbook(&report)?;

    let filename = format!("daily_report_{}.xlsx", Local::now().format("%Y%m%d"));
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?;

    let mut response = (StatusCode::OK, bytes).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        ),
    );
    response
        .headers_mut()
        .insert(header::CONTENT_DISPOSITION, disposition);
    Ok(response)
}
