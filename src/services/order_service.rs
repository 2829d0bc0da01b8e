use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::orders::{CreateOrderRequest, OrderList, UpdateOrderStatusRequest},
    entity::orders::{
        ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
        OrderStatus,
    },
    error::{AppError, AppResult},
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

/// Orders are taken at face value: the product reference is not checked
/// for existence, stock is not decremented, and total_amount is stored as
/// the caller supplied it.
pub async fn create_order(
    state: &AppState,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let now = Utc::now();
    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        customer_name: Set(payload.customer_name),
        phone_number: Set(payload.phone_number),
        address: Set(payload.address),
        product_id: Set(payload.product_id),
        quantity: Set(payload.quantity),
        total_amount: Set(payload.total_amount),
        status: Set(OrderStatus::Pending),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.pool,
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Order placed",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

    let finder = match sort_order {
        SortOrder::Asc => Orders::find().order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => Orders::find().order_by_desc(OrderCol::CreatedAt),
    };

    let items: Vec<Order> = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(items.len() as i64);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

/// Exact match on the phone_number index; zero rows is a normal outcome.
pub async fn list_orders_by_phone(
    state: &AppState,
    phone_number: &str,
) -> AppResult<ApiResponse<OrderList>> {
    let items: Vec<Order> = Orders::find()
        .filter(OrderCol::PhoneNumber.eq(phone_number))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(items.len() as i64);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn list_orders_by_status(
    state: &AppState,
    status: OrderStatus,
) -> AppResult<ApiResponse<OrderList>> {
    let items: Vec<Order> = Orders::find()
        .filter(OrderCol::Status.eq(status))
        .order_by_desc(OrderCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(items.len() as i64);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

/// Replaces the status and refreshes updated_at. Any status may follow any
/// other, including re-setting the current value.
pub async fn update_order_status(
    state: &AppState,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = Orders::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let mut active: OrderActive = existing.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Status updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub async fn delete_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Orders::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.pool,
        "order_delete",
        Some("orders"),
        Some(serde_json::json!({ "order_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub(crate) fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        customer_name: model.customer_name,
        phone_number: model.phone_number,
        address: model.address,
        product_id: model.product_id,
        quantity: model.quantity,
        total_amount: model.total_amount,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
