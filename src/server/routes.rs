// ==========================================
// 车间生产计划与执行系统 - HTTP 路由
// ==========================================
// 职责: REST 端点注册与 ApiError→HTTP 状态码映射
// 约束: 处理函数只做提取/转发，业务校验在 API 层
// 映射: InvalidInput→400, NotFound→404, 其余→500（详情只记日志）
// ==========================================

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::{
    CreateAlertRequest, CreateDowntimeRequest, CreatePlannedRequest, CreateProductionLogRequest,
    UpdateOrderRequest, UpdateStockRequest,
};
use crate::app::AppState;
use crate::domain::PlannedProductionPatch;

pub type SharedState = Arc<AppState>;

/// 分页参数
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

// ==========================================
// ApiError → HTTP 响应
// ==========================================
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            // 详情只保留在服务端日志，响应体为通用消息
            tracing::error!("请求处理失败: {}", self);
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// 请求体解析失败统一转 400（而不是框架默认的 422）
fn extract_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| ApiError::InvalidInput(format!("请求体无效: {}", e)))
}

// ==========================================
// 路由注册
// ==========================================
pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/orders", get(list_orders))
        .route("/api/updateOrder", post(update_order))
        .route("/api/materials", get(list_materials))
        .route("/api/materials/{id}", put(update_stock))
        .route("/api/logs/production", get(list_logs).post(create_log))
        .route("/api/planned", get(list_planned).post(create_planned))
        .route(
            "/api/planned/{id}",
            put(update_planned).delete(delete_planned),
        )
        .route("/api/alerts", get(list_alerts).post(create_alert))
        .route("/api/downtime", get(list_downtime).post(create_downtime))
        .route("/api/kpis/overview", get(kpi_overview))
        .route("/api/erp/order/{order_id}", get(erp_order_details))
        .route("/api/erp/order/{order_id}/bom", get(erp_bom))
        .route(
            "/api/erp/order/{order_id}/materials",
            get(erp_material_availability),
        )
        .route(
            "/api/erp/order/{order_id}/operations/{operation_id}/smv",
            get(erp_operation_smv),
        )
}

// ==========================================
// 处理函数
// ==========================================

/// GET /api/health - 存活探针
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "workshop-mes" }))
}

/// GET /api/orders
async fn list_orders(State(state): State<SharedState>) -> Result<Response, ApiError> {
    Ok(Json(state.order_api.list_orders()?).into_response())
}

/// POST /api/updateOrder
async fn update_order(
    State(state): State<SharedState>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = extract_json(payload)?;
    let order = state.order_api.update_order_dates(req)?;
    Ok(Json(json!({ "success": true, "order": order })).into_response())
}

/// GET /api/materials
async fn list_materials(State(state): State<SharedState>) -> Result<Response, ApiError> {
    Ok(Json(state.material_api.list_materials()?).into_response())
}

/// PUT /api/materials/{id}
async fn update_stock(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateStockRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = extract_json(payload)?;
    let material = state.material_api.update_stock(id, req)?;
    Ok(Json(json!({ "success": true, "material": material })).into_response())
}

/// POST /api/logs/production
async fn create_log(
    State(state): State<SharedState>,
    payload: Result<Json<CreateProductionLogRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = extract_json(payload)?;
    let log = state.production_api.create_log(req)?;
    Ok((StatusCode::CREATED, Json(log)).into_response())
}

/// GET /api/logs/production?limit=N
async fn list_logs(
    State(state): State<SharedState>,
    Query(query): Query<LimitQuery>,
) -> Result<Response, ApiError> {
    Ok(Json(state.production_api.list_logs(query.limit)?).into_response())
}

/// GET /api/planned
async fn list_planned(
    State(state): State<SharedState>,
    Query(query): Query<LimitQuery>,
) -> Result<Response, ApiError> {
    Ok(Json(state.planning_api.list_planned(query.limit)?).into_response())
}

/// POST /api/planned
async fn create_planned(
    State(state): State<SharedState>,
    payload: Result<Json<CreatePlannedRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = extract_json(payload)?;
    let entry = state.planning_api.create_planned(req)?;
    Ok((StatusCode::CREATED, Json(entry)).into_response())
}

/// PUT /api/planned/{id}
async fn update_planned(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    payload: Result<Json<PlannedProductionPatch>, JsonRejection>,
) -> Result<Response, ApiError> {
    let patch = extract_json(payload)?;
    Ok(Json(state.planning_api.update_planned(id, patch)?).into_response())
}

/// DELETE /api/planned/{id}
async fn delete_planned(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let deleted = state.planning_api.delete_planned(id)?;
    Ok(Json(json!({ "deleted": deleted })).into_response())
}

/// POST /api/alerts
async fn create_alert(
    State(state): State<SharedState>,
    payload: Result<Json<CreateAlertRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = extract_json(payload)?;
    let alert = state.event_api.create_alert(req)?;
    Ok((StatusCode::CREATED, Json(alert)).into_response())
}

/// GET /api/alerts
async fn list_alerts(
    State(state): State<SharedState>,
    Query(query): Query<LimitQuery>,
) -> Result<Response, ApiError> {
    Ok(Json(state.event_api.list_alerts(query.limit)?).into_response())
}

/// POST /api/downtime
async fn create_downtime(
    State(state): State<SharedState>,
    payload: Result<Json<CreateDowntimeRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let req = extract_json(payload)?;
    let log = state.event_api.create_downtime(req)?;
    Ok((StatusCode::CREATED, Json(log)).into_response())
}

/// GET /api/downtime
async fn list_downtime(
    State(state): State<SharedState>,
    Query(query): Query<LimitQuery>,
) -> Result<Response, ApiError> {
    Ok(Json(state.event_api.list_downtime(query.limit)?).into_response())
}

/// GET /api/kpis/overview
async fn kpi_overview(State(state): State<SharedState>) -> Result<Response, ApiError> {
    Ok(Json(state.dashboard_api.kpi_overview()?).into_response())
}

/// GET /api/erp/order/{order_id}
async fn erp_order_details(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(Json(state.erp_api.order_details(&order_id).await?).into_response())
}

/// GET /api/erp/order/{order_id}/bom
async fn erp_bom(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(Json(state.erp_api.bom(&order_id).await?).into_response())
}

/// GET /api/erp/order/{order_id}/materials
async fn erp_material_availability(
    State(state): State<SharedState>,
    Path(order_id): Path<String>,
) -> Result<Response, ApiError> {
    Ok(Json(state.erp_api.material_availability(&order_id).await?).into_response())
}

/// GET /api/erp/order/{order_id}/operations/{operation_id}/smv
async fn erp_operation_smv(
    State(state): State<SharedState>,
    Path((order_id, operation_id)): Path<(String, i64)>,
) -> Result<Response, ApiError> {
    let smv = state.erp_api.operation_smv(&order_id, operation_id).await?;
    Ok(Json(json!({ "operation_id": operation_id, "smv": smv })).into_response())
}
