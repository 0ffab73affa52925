//! Creates the initial admin account if it does not exist yet.
//!
//! Run with `cargo run --bin seed_admin`. Reads ADMIN_EMAIL, ADMIN_PASSWORD
//! and ADMIN_NAME from the environment, with development defaults.

use anyhow::Context;

use azure_horizon::config::Config;
use azure_horizon::database::Database;
use azure_horizon::models::user::{hash_password, normalize_email};
use azure_horizon::models::User;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let email = normalize_email(
        &std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@azurehorizon.com".to_string()),
    );
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let name = std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin User".to_string());

    let db = Database::connect_lazy(&config.database.url, config.database.pool_size)?;
    db.run_migrations().await.context("running migrations")?;

    if User::find_by_email(&email, &db).await?.is_some() {
        println!("Admin user already exists");
        return Ok(());
    }

    let password_hash = hash_password(&password)
        .await
        .map_err(|e| anyhow::anyhow!("hashing admin password: {e}"))?;

    sqlx::query(
        "INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, 'admin')",
    )
    .bind(&name)
    .bind(&email)
    .bind(&password_hash)
    .execute(&db.pool)
    .await
    .context("inserting admin user")?;

    println!("Admin user created successfully!");
    println!("Email: {email}");
    println!("Change the default password after first login.");
    Ok(())
}
