use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use storefront_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::products::{ActiveModel as ProductActive, Column, Entity as Products},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let products = vec![
        (
            "Classic Tee",
            "Plain cotton t-shirt",
            19.99,
            120,
            "apparel",
            "https://cdn.example.com/images/classic-tee.png",
            vec!["S", "M", "L", "XL"],
            Some(4.3),
        ),
        (
            "Canvas Sneakers",
            "Low-top everyday sneakers",
            49.50,
            60,
            "shoes",
            "https://cdn.example.com/images/canvas-sneakers.png",
            vec!["40", "41", "42", "43"],
            Some(4.6),
        ),
        (
            "Wool Beanie",
            "Warm knit beanie",
            14.00,
            200,
            "accessories",
            "https://cdn.example.com/images/wool-beanie.png",
            vec![],
            None,
        ),
        (
            "Denim Jacket",
            "Mid-weight denim jacket",
            89.90,
            35,
            "apparel",
            "https://cdn.example.com/images/denim-jacket.png",
            vec!["M", "L"],
            Some(4.8),
        ),
    ];

    for (name, desc, price, stock, category, image, size, rating) in products {
        let exists = Products::find()
            .filter(Column::Name.eq(name))
            .one(&orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        ProductActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(Some(desc.to_string())),
            price: Set(price),
            stock: Set(stock),
            category: Set(category.to_string()),
            image: Set(image.to_string()),
            size: Set(size.into_iter().map(String::from).collect()),
            rating: Set(rating),
            created_at: Set(Utc::now().into()),
        }
        .insert(&orm)
        .await?;

        println!("Seeded product {name}");
    }

    println!("Seed completed");
    Ok(())
}
