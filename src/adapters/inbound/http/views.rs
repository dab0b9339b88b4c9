use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::{context, Environment};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Page templates compiled into the binary
const TEMPLATES: [(&str, &str); 8] = [
    ("layout.html", include_str!("templates/layout.html")),
    ("_form.html", include_str!("templates/_form.html")),
    ("home.html", include_str!("templates/home.html")),
    ("supplier-list-all.html", include_str!("templates/supplier-list-all.html")),
    ("supplier-add.html", include_str!("templates/supplier-add.html")),
    ("supplier-update.html", include_str!("templates/supplier-update.html")),
    ("404.html", include_str!("templates/404.html")),
    ("500.html", include_str!("templates/500.html")),
];

/// HTML page renderer. Values are HTML-escaped when rendered.
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    /// Render a page with the given status; template failures become a bare 500
    pub fn page<S: Serialize>(&self, status: StatusCode, name: &str, ctx: S) -> Response {
        match self.render(name, ctx) {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                error!(template = name, error = %e, "failed to render page");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }

    pub fn error_page(&self, message: impl AsRef<str>) -> Response {
        self.page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "500.html",
            context! { message => message.as_ref() },
        )
    }

    pub fn not_found_page(&self) -> Response {
        self.page(StatusCode::NOT_FOUND, "404.html", context! {})
    }
}
