use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::orders::{CreateOrderRequest, OrderList, UpdateOrderStatusRequest},
    entity::OrderStatus,
    error::AppResult,
    models::Order,
    response::ApiResponse,
    routes::params::OrderListQuery,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/", get(list_orders))
        .route("/phone/{phone_number}", get(list_orders_by_phone))
        .route("/status/{status}", get(list_orders_by_status))
        .route("/{id}/status", patch(update_order_status))
        .route("/{id}", delete(delete_order))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order placed with status pending", body = ApiResponse<Order>)
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::create_order(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("sort_order" = Option<String>, Query, description = "Sort order on created_at: asc, desc"),
    ),
    responses(
        (status = 200, description = "List all orders", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/phone/{phone_number}",
    params(
        ("phone_number" = String, Path, description = "Customer phone number, exact match")
    ),
    responses(
        (status = 200, description = "Orders for the phone number", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders_by_phone(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders_by_phone(&state, &phone_number).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/status/{status}",
    params(
        ("status" = OrderStatus, Path, description = "One of pending, shipped, delivered, canceled")
    ),
    responses(
        (status = 200, description = "Orders with the given status", body = ApiResponse<OrderList>),
        (status = 400, description = "Unknown status literal"),
    ),
    tag = "Orders"
)]
pub async fn list_orders_by_status(
    State(state): State<AppState>,
    Path(status): Path<OrderStatus>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders_by_status(&state, status).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status replaced, updated_at refreshed", body = ApiResponse<Order>),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_order_status(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Deleted order"),
        (status = 404, description = "Order not found"),
    ),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = order_service::delete_order(&state, id).await?;
    Ok(Json(resp))
}
