//! Plate order handlers: CRUD plus the two PDF generation paths.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PLATE_TAG;
use crate::api::dto::{
    CreatePlateOrderRequest, GenerateMode, GenerateRequest, GenerationAccepted, PaginationParams,
    PlateOrderResponse,
};
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::{ValidatedJson, ValidatedQuery};

pub fn plate_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_plate_orders))
        .routes(routes!(create_plate_order))
        .routes(routes!(get_plate_order))
        .routes(routes!(generate_pdf))
}

/// GET /api/plate-orders - List plate orders, newest first
#[utoipa::path(
    get,
    path = "/",
    tag = PLATE_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Plate orders by page", body = Vec<PlateOrderResponse>)
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn list_plate_orders(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<Vec<PlateOrderResponse>>> {
    let orders = state
        .services
        .plates
        .list_orders(params.offset(), params.limit())
        .await?;
    Ok(Json(orders.into_iter().map(PlateOrderResponse::from).collect()))
}

/// POST /api/plate-orders - Create a plate order
#[utoipa::path(
    post,
    path = "/",
    tag = PLATE_TAG,
    request_body = CreatePlateOrderRequest,
    responses(
        (status = 201, description = "Plate order created", body = PlateOrderResponse),
        (status = 400, description = "Invalid request")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn create_plate_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<CreatePlateOrderRequest>,
) -> AppResult<(StatusCode, Json<PlateOrderResponse>)> {
    let order = state
        .services
        .plates
        .create_order(req.into_new_order(auth.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(PlateOrderResponse::from(order))))
}

/// GET /api/plate-orders/:id - Get a plate order by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = PLATE_TAG,
    params(
        ("id" = i32, Path, description = "Plate order ID")
    ),
    responses(
        (status = 200, description = "Plate order found", body = PlateOrderResponse),
        (status = 404, description = "Plate order not found")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn get_plate_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<PlateOrderResponse>> {
    let order = state.services.plates.get_order(id).await?;
    Ok(Json(PlateOrderResponse::from(order)))
}

/// POST /api/plate-orders/:id/generate - Generate the box or label PDF
///
/// `download` holds the request while the barcode artifact wait runs and
/// streams the PDF back; `background` returns 202 immediately and the
/// wait+generate sequence continues on a background task.
#[utoipa::path(
    post,
    path = "/{id}/generate",
    tag = PLATE_TAG,
    params(
        ("id" = i32, Path, description = "Plate order ID")
    ),
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "PDF download", content_type = "application/pdf"),
        (status = 202, description = "Generation accepted", body = GenerationAccepted),
        (status = 404, description = "Plate order not found"),
        (status = 422, description = "Barcode artifacts not produced in time")
    ),
    security(
        ("bearerAuth" = [])
    )
)]
async fn generate_pdf(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<GenerateRequest>,
) -> AppResult<Response> {
    match req.mode {
        GenerateMode::Download => {
            let pdf = state.services.plates.generate_and_download(id, req.kind).await?;

            let disposition =
                HeaderValue::from_str(&format!("attachment; filename=\"{}\"", pdf.filename))
                    .map_err(|e| AppError::Internal {
                        source: anyhow::Error::from(e),
                    })?;

            let mut response = (StatusCode::OK, pdf.bytes).into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
            response
                .headers_mut()
                .insert(header::CONTENT_DISPOSITION, disposition);
            Ok(response)
        }
        GenerateMode::Background => {
            let started = state
                .services
                .plates
                .generate_in_background(id, req.kind)
                .await?;

            let body = Json(GenerationAccepted {
                accepted: true,
                already_running: !started,
            });
            Ok((StatusCode::ACCEPTED, body).into_response())
        }
    }
}
