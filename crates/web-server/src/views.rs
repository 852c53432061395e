//! HTML views, compiled once from templates embedded in the binary.

use core_types::Product;
use std::sync::LazyLock;
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error("Templates failed to load: {0}")]
    Load(String),

    #[error("Template rendering failed: {0}")]
    Render(#[from] tera::Error),
}

static TEMPLATES: LazyLock<Result<Tera, String>> = LazyLock::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("home.html", include_str!("../templates/home.html")),
        ("produto.html", include_str!("../templates/produto.html")),
        ("deletado.html", include_str!("../templates/deletado.html")),
        ("error.html", include_str!("../templates/error.html")),
    ])
    .map_err(|e| format!("{e:?}"))?;
    Ok(tera)
});

fn render(template: &str, context: &Context) -> Result<String, ViewError> {
    let tera = TEMPLATES.as_ref().map_err(|e| ViewError::Load(e.clone()))?;
    Ok(tera.render(template, context)?)
}

pub fn home_page(items: &[&str]) -> Result<String, ViewError> {
    let mut context = Context::new();
    context.insert("items", items);
    render("home.html", &context)
}

pub fn product_page(product: &Product) -> Result<String, ViewError> {
    let mut context = Context::new();
    context.insert("product", product);
    render("produto.html", &context)
}

/// Confirms a deletion, echoing the identifier exactly as it was requested.
pub fn deleted_page(product_id: &str) -> Result<String, ViewError> {
    let mut context = Context::new();
    context.insert("product_id", product_id);
    render("deletado.html", &context)
}

pub fn error_page(error_code: u16, error_msg: &str) -> Result<String, ViewError> {
    let mut context = Context::new();
    context.insert("error_code", &error_code);
    context.insert("error_msg", error_msg);
    render("error.html", &context)
}
