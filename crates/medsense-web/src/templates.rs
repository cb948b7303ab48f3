//! HTML templates, compiled into the binary and rendered with minijinja.
//!
//! Templates ending in `.html` are auto-escaped, so disease and symptom
//! names coming from the URL or the form are safe to interpolate.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;
use tracing::error;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html",              include_str!("../templates/base.html")),
    ("home.html",              include_str!("../templates/home.html")),
    ("results.html",           include_str!("../templates/results.html")),
    ("error.html",             include_str!("../templates/error.html")),
    ("disease_detail.html",    include_str!("../templates/disease_detail.html")),
    ("disease_not_found.html", include_str!("../templates/disease_not_found.html")),
    ("knowledge_base.html",    include_str!("../templates/knowledge_base.html")),
    ("about.html",             include_str!("../templates/about.html")),
    ("how_to_use.html",        include_str!("../templates/how_to_use.html")),
    ("not_found.html",         include_str!("../templates/not_found.html")),
];

/// Served when a template itself fails to render.
const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head><meta charset="UTF-8"><title>Ошибка — MedSense</title></head>
<body>
<h1>Ошибка</h1>
<p>Не удалось отобразить страницу. Попробуйте позже.</p>
<p><a href="/">На главную</a></p>
</body>
</html>"#;

/// Compiled template set.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render a page. Rendering failures are logged and replaced by a
    /// static fallback page so a request never fails on presentation.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Html<String> {
        match self.env.get_template(name).and_then(|t| t.render(ctx)) {
            Ok(html) => Html(html),
            Err(e) => {
                error!(template = name, "Template rendering failed: {e:#}");
                Html(FALLBACK_HTML.to_string())
            }
        }
    }
}
