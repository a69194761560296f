//! Seed the database with sample bakeries and baked goods.
//!
//! Runs migrations first so seeding works against a fresh database file.
//! Seeding is additive; running it twice inserts the sample set twice.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use bakehouse_server::db;

use super::migrate::database_url_from_env;

/// Sample data: bakery name plus (name, price) pairs for its goods.
const SAMPLE_BAKERIES: &[(&str, &[(&str, f64)])] = &[
    (
        "Flour Power",
        &[
            ("Croissant", 3.5),
            ("Baguette", 2.75),
            ("Pain au Chocolat", 4.25),
        ],
    ),
    (
        "Crusty Corner",
        &[("Sourdough Loaf", 6.5), ("Cinnamon Roll", 3.0)],
    ),
    ("Knead to Know", &[("Bagel", 1.75)]),
];

/// Seed the database with sample data.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any statement fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = database_url_from_env()?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    sqlx::migrate!("../server/migrations").run(&pool).await?;

    let mut bakeries = 0;
    let mut goods = 0;
    for (bakery_name, bakery_goods) in SAMPLE_BAKERIES {
        let bakery_id = insert_bakery(&pool, bakery_name).await?;
        bakeries += 1;

        for (good_name, price) in *bakery_goods {
            insert_baked_good(&pool, good_name, *price, bakery_id).await?;
            goods += 1;
        }
    }

    info!("Seeding complete!");
    info!("  Bakeries inserted: {bakeries}");
    info!("  Baked goods inserted: {goods}");

    Ok(())
}

async fn insert_bakery(pool: &SqlitePool, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("INSERT INTO bakeries (name, created_at) VALUES (?, ?) RETURNING id")
        .bind(name)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
}

async fn insert_baked_good(
    pool: &SqlitePool,
    name: &str,
    price: f64,
    bakery_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO baked_goods (name, price, bakery_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(price)
        .bind(bakery_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    Ok(())
}
