use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{entity::OrderStatus, models::Order};

/// Status is not accepted here: every new order starts out pending.
/// `total_amount` is caller-asserted and freezes the price at order time.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub phone_number: String,
    pub address: String,
    pub product_id: Uuid,
    pub quantity: i32,
    pub total_amount: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}
