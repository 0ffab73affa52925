//! Replaces the room catalog with the standard four rooms.
//!
//! Run with `cargo run --bin seed_rooms`. Intended for fresh databases;
//! it refuses to run once bookings reference the existing rooms.

use anyhow::Context;

use azure_horizon::config::Config;
use azure_horizon::database::Database;

struct SeedRoom {
    name: &'static str,
    description: &'static str,
    image: &'static str,
    features: &'static [&'static str],
    price: f64,
}

const ROOMS: &[SeedRoom] = &[
    SeedRoom {
        name: "Ocean Suite",
        description: "Luxurious suite with panoramic ocean views and private balcony.",
        image: "https://images.unsplash.com/photo-1611892440504-42a792e24d32?auto=format&fit=crop&w=800",
        features: &["Ocean view", "King bed", "Smart TV", "Free Wi-Fi"],
        price: 450.0,
    },
    SeedRoom {
        name: "Beach Villa",
        description: "Private villa steps from the sand with outdoor shower.",
        image: "https://images.unsplash.com/photo-1566665797739-1674de7a421a?auto=format&fit=crop&w=800",
        features: &["Beach access", "Queen bed", "Mini kitchen", "Terrace"],
        price: 680.0,
    },
    SeedRoom {
        name: "Horizon Penthouse",
        description: "Our signature penthouse with wraparound terrace and jacuzzi.",
        image: "https://images.unsplash.com/photo-1582719508461-905c673771fd?auto=format&fit=crop&w=800",
        features: &["360° views", "King bed", "Jacuzzi", "Butler service"],
        price: 1200.0,
    },
    SeedRoom {
        name: "Garden Retreat",
        description: "Peaceful retreat surrounded by tropical gardens.",
        image: "/room-garden-retreat.jpg",
        features: &["Garden view", "Queen bed", "Rainfall shower", "Yoga deck"],
        price: 350.0,
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let db = Database::connect_lazy(&config.database.url, config.database.pool_size)?;
    db.run_migrations().await.context("running migrations")?;

    let mut tx = db.pool.begin().await?;

    sqlx::query("DELETE FROM rooms")
        .execute(&mut *tx)
        .await
        .context("clearing existing rooms")?;

    for room in ROOMS {
        let features: Vec<String> = room.features.iter().map(|f| f.to_string()).collect();
        sqlx::query(
            "INSERT INTO rooms (name, description, image, features, price) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(room.name)
        .bind(room.description)
        .bind(room.image)
        .bind(&features)
        .bind(room.price)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("inserting room {}", room.name))?;
    }

    tx.commit().await?;

    println!("Rooms seeded successfully ({} rooms)", ROOMS.len());
    Ok(())
}
