use std::sync::Arc;

use crate::{article::ArticleStore, auth::Auth, views::Views};

#[derive(Debug, Clone)]
pub struct State {
    pub articles: Arc<dyn ArticleStore>,

    pub auth: Arc<Auth>,

    pub views: Views,
}

impl State {
    pub fn new(articles: Arc<dyn ArticleStore>, auth: Auth, views: Views) -> Self {
        Self {
            articles,
            auth: Arc::new(auth),
            views,
        }
    }
}
