use crate::{
    article::{parse_id, Article, ArticleStore, StoreError},
    error::PressError,
    state::State,
};
use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_macros::debug_handler;
use minijinja::context;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use self::admin::{admin_router, auth_router};

mod admin;
mod extract;

pub fn router(state: State) -> Router {
    public_router(state.clone())
        .merge(auth_router(state.clone()))
        .merge(admin_router(state))
        .layer(TraceLayer::new_for_http())
}

fn public_router(state: State) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/article/:id", get(article))
        .with_state(state)
}

#[debug_handler]
pub async fn index(state: axum::extract::State<State>) -> Result<Response, PressError> {
    let articles = list_or_empty(state.articles.as_ref()).await;
    Ok(state
        .views
        .render("index.html", context! { articles })?
        .into_response())
}

pub async fn article(
    state: axum::extract::State<State>,
    path: axum::extract::Path<String>,
) -> Result<Response, PressError> {
    let Some(id) = parse_id(&path) else {
        return Err(article_not_found());
    };

    match state.articles.find(id).await {
        Ok(article) => Ok(state
            .views
            .render("article.html", context! { article })?
            .into_response()),
        Err(StoreError::NotFound(_)) => Err(article_not_found()),
        Err(e) => {
            error!("Error while loading article {id}: {e}");
            Err(article_not_found())
        }
    }
}

/// Listings degrade to an empty page when the store is unavailable.
async fn list_or_empty(articles: &dyn ArticleStore) -> Vec<Article> {
    match articles.list().await {
        Ok(articles) => {
            debug!("Loaded {} articles", articles.len());
            articles
        }
        Err(e) => {
            error!("Error while listing articles: {e}");
            vec![]
        }
    }
}

fn article_not_found() -> PressError {
    PressError::NotFound("Article not found".to_string())
}
