use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub category: String,
    pub image: String,
    pub size: Vec<String>,
    pub rating: Option<f64>,
    pub created_at: DateTimeWithTimeZone,
}

// Orders point at products with a plain UUID rather than a relation:
// an order must survive the deletion of the product it references.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
