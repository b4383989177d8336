use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use common::{DashboardLayout, DashboardUpdate, FilterOptions};
use compute::render_dashboard;
use tracing::{debug, info, instrument, trace, warn};

use crate::schemas::{ApiResponse, AppState, DashboardFilterRequest, ErrorResponse};

/// Filter the forecast records and rebuild the charts and the table
///
/// Called by the page whenever a filter control changes. Each call is
/// independent of the previous ones and never modifies the loaded data.
/// Any well-formed filter is accepted; only a body that is not a filter
/// object is rejected.
#[utoipa::path(
    post,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    request_body = DashboardFilterRequest,
    responses(
        (status = 200, description = "Dashboard recomputed for the given filter", body = ApiResponse<DashboardUpdate>),
        (status = 400, description = "Request body is not a filter object", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_dashboard(
    State(state): State<AppState>,
    request: Result<Json<DashboardFilterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DashboardUpdate>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_dashboard function");

    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            warn!("Rejected dashboard request: {}", rejection.body_text());
            let error_response = ErrorResponse {
                error: rejection.body_text(),
                code: "INVALID_FILTER".to_string(),
                success: false,
            };
            return Err((StatusCode::BAD_REQUEST, Json(error_response)));
        }
    };

    let filter = request.to_filter();
    let cache_key = filter.cache_key();

    // Check cache first
    if let Some(update) = state.cache.get(&cache_key).await {
        debug!("Dashboard served from cache: {}", cache_key);
        return Ok(Json(ApiResponse {
            data: update,
            message: "Dashboard retrieved from cache".to_string(),
            success: true,
        }));
    }

    let update = render_dashboard(&state.dataset, &filter);
    info!(
        "Dashboard recomputed: {} of {} rows match",
        update.row_count, update.total_rows
    );

    // Cache the result
    state.cache.insert(cache_key, update.clone()).await;

    Ok(Json(ApiResponse {
        data: update,
        message: "Dashboard updated successfully".to_string(),
        success: true,
    }))
}

/// Get the static page structure: filter controls, chart panels and table
#[utoipa::path(
    get,
    path = "/api/v1/layout",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard layout retrieved successfully", body = ApiResponse<DashboardLayout>)
    )
)]
#[instrument(skip(state))]
pub async fn get_layout(State(state): State<AppState>) -> Json<ApiResponse<DashboardLayout>> {
    Json(ApiResponse {
        data: state.layout.as_ref().clone(),
        message: "Dashboard layout retrieved successfully".to_string(),
        success: true,
    })
}

/// Get the selectable supplier and material values
#[utoipa::path(
    get,
    path = "/api/v1/filter-options",
    tag = "dashboard",
    responses(
        (status = 200, description = "Filter options retrieved successfully", body = ApiResponse<FilterOptions>)
    )
)]
#[instrument(skip(state))]
pub async fn get_filter_options(State(state): State<AppState>) -> Json<ApiResponse<FilterOptions>> {
    let options = FilterOptions {
        suppliers: state.dataset.suppliers(),
        materials: state.dataset.materials(),
    };
    debug!(
        "Filter options: {} suppliers, {} materials",
        options.suppliers.len(),
        options.materials.len()
    );

    Json(ApiResponse {
        data: options,
        message: "Filter options retrieved successfully".to_string(),
        success: true,
    })
}
