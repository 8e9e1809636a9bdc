use clap::Parser;
use std::sync::Arc;
use tracing::info;

use crate::{
    article::db::ArticleDb,
    auth::{session::MemorySessions, Auth},
    config::StartArgs,
    state::State,
    views::Views,
};

pub mod article;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod router;
pub mod state;
pub mod views;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = StartArgs::parse();

    tracing_subscriber::fmt().with_max_level(args.log_level).init();

    let admin = args.admin().expect("invalid admin credentials");

    let db_pool = db::create_pool(&args.database_url)
        .await
        .expect("error while connecting to db");

    db::migrate(&db_pool).await.expect("error in migrations");

    let articles = ArticleDb::new(db_pool).await;
    let auth = Auth::new(admin, Arc::new(MemorySessions::new()));
    let views = Views::new().expect("unable to load templates");

    let state = State::new(Arc::new(articles), auth, views);

    let addr = format!("{}:{}", args.address, args.port);

    info!("Now listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("error while starting TCP listener");

    axum::serve(listener, router::router(state))
        .await
        .expect("error while starting server");
}
