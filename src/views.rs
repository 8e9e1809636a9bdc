use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;
use std::sync::Arc;

use crate::error::PressError;

const TEMPLATES: [(&str, &str); 7] = [
    ("layout.html", include_str!("../templates/layout.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("article.html", include_str!("../templates/article.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("admin.html", include_str!("../templates/admin.html")),
    ("new.html", include_str!("../templates/new.html")),
    ("edit.html", include_str!("../templates/edit.html")),
];

/// Renders named templates with a serializable context.
#[derive(Debug, Clone)]
pub struct Views {
    context: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self, PressError> {
        let mut context = Environment::new();

        for (name, source) in TEMPLATES {
            context.add_template(name, source)?;
        }

        Ok(Self {
            context: Arc::new(context),
        })
    }

    pub fn render(&self, name: &str, data: impl Serialize) -> Result<Html<String>, PressError> {
        let template = self.context.get_template(name)?;
        Ok(Html(template.render(data)?))
    }
}
