use super::{article_not_found, extract::JsonOrForm, list_or_empty};
use crate::{
    article::{parse_id, ArticleForm, StoreError},
    auth::{session::Identity, Auth},
    error::PressError,
    state::State,
};
use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Router,
};
use minijinja::context;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub(super) fn admin_router(state: State) -> Router {
    let router_admin = Router::new()
        .route("/", get(admin))
        .route("/new", get(new_form).post(create))
        .route("/edit/:id", get(edit_form).post(update))
        .route("/delete/:id", post(delete))
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            session_check,
        ))
        .with_state(state);

    Router::new()
        .nest("/admin", router_admin)
        .route("/admin/", get(|| async { Redirect::to("/admin") }))
}

pub(super) fn auth_router(state: State) -> Router {
    Router::new()
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .with_state(state)
}

#[derive(Deserialize)]
struct Credentials {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn login_form(state: axum::extract::State<State>) -> Result<Response, PressError> {
    Ok(state
        .views
        .render("login.html", context! { error => () })?
        .into_response())
}

async fn login(
    state: axum::extract::State<State>,
    JsonOrForm(credentials): JsonOrForm<Credentials>,
) -> Result<Response, PressError> {
    let Some(token) = state
        .auth
        .login(&credentials.username, &credentials.password)
    else {
        warn!("Rejected login for '{}'", credentials.username);
        return Ok(state
            .views
            .render("login.html", context! { error => INVALID_CREDENTIALS })?
            .into_response());
    };

    info!("'{}' logged in", credentials.username);

    let cookie = Auth::create_session_cookie(token);

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Redirect::to("/admin"),
    )
        .into_response())
}

async fn logout(
    state: axum::extract::State<State>,
    headers: HeaderMap,
) -> Response {
    state.auth.logout(&headers);

    info!("Logged out");

    (
        [(header::SET_COOKIE, Auth::removal_cookie().to_string())],
        Redirect::to("/"),
    )
        .into_response()
}

async fn admin(
    state: axum::extract::State<State>,
    Extension(identity): Extension<Identity>,
) -> Result<Response, PressError> {
    let articles = list_or_empty(state.articles.as_ref()).await;
    Ok(state
        .views
        .render("admin.html", context! { articles, identity })?
        .into_response())
}

async fn new_form(state: axum::extract::State<State>) -> Result<Response, PressError> {
    Ok(state.views.render("new.html", context! {})?.into_response())
}

async fn create(
    state: axum::extract::State<State>,
    JsonOrForm(form): JsonOrForm<ArticleForm>,
) -> Response {
    match state.articles.insert(form).await {
        Ok(article) => {
            info!("Created article {}", article.id);
            Redirect::to("/admin").into_response()
        }
        Err(StoreError::Invalid(reason)) => {
            warn!("Rejected new article: {reason}");
            Redirect::to("/admin/new").into_response()
        }
        Err(e) => {
            error!("Error while creating article: {e}");
            Redirect::to("/admin/new").into_response()
        }
    }
}

async fn edit_form(
    state: axum::extract::State<State>,
    path: axum::extract::Path<String>,
) -> Result<Response, PressError> {
    let Some(id) = parse_id(&path) else {
        return Err(article_not_found());
    };

    match state.articles.find(id).await {
        Ok(article) => Ok(state
            .views
            .render("edit.html", context! { article })?
            .into_response()),
        Err(StoreError::NotFound(_)) => Err(article_not_found()),
        Err(e) => {
            error!("Error while loading article {id}: {e}");
            Err(article_not_found())
        }
    }
}

async fn update(
    state: axum::extract::State<State>,
    path: axum::extract::Path<String>,
    JsonOrForm(form): JsonOrForm<ArticleForm>,
) -> Response {
    let Some(id) = parse_id(&path) else {
        warn!("Edit of unknown article {}", path.0);
        return Redirect::to("/admin").into_response();
    };

    match state.articles.update(id, form).await {
        Ok(_) => info!("Updated article {id}"),
        Err(StoreError::NotFound(_)) => warn!("Edit of unknown article {id}"),
        Err(StoreError::Invalid(reason)) => warn!("Rejected edit of article {id}: {reason}"),
        Err(e) => error!("Error while updating article {id}: {e}"),
    }

    Redirect::to("/admin").into_response()
}

async fn delete(
    state: axum::extract::State<State>,
    path: axum::extract::Path<String>,
) -> Response {
    let Some(id) = parse_id(&path) else {
        warn!("Delete of unknown article {}", path.0);
        return Redirect::to("/admin").into_response();
    };

    match state.articles.delete(id).await {
        Ok(()) => info!("Deleted article {id}"),
        Err(StoreError::NotFound(_)) => warn!("Delete of unknown article {id}"),
        Err(e) => error!("Error while deleting article {id}: {e}"),
    }

    Redirect::to("/admin").into_response()
}

/// Lets requests with a live session through, sending everyone else to the
/// login page.
async fn session_check(
    auth: axum::extract::State<Arc<Auth>>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(identity) = auth.authenticate(req.headers()) else {
        debug!("No session for {}", req.uri());
        return Redirect::to("/login").into_response();
    };

    req.extensions_mut().insert(identity);

    next.run(req).await
}
