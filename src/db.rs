use crate::error::PressError;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

pub async fn create_pool(url: &str) -> Result<PgPool, PressError> {
    let pool = PgPoolOptions::new().connect(url).await?;
    info!("Connected to database");
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> Result<(), PressError> {
    sqlx::migrate!().run(pool).await?;
    info!("Migrations applied");
    Ok(())
}
