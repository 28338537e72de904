//! # PabloBot Page Templating
//!
//! File: cli/src/core/templating.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Renders the chat page served at `/` by `pablobot srv`. The page template
//! ships inside the binary (`cli/assets/index.html.tera`) and is rendered once
//! at startup with Tera, filling in the bot's name and greeting.
//!
use crate::core::error::{PabloError, Result};
use anyhow::{anyhow, Context};
use serde::Serialize;
use tera::Tera;
use tracing::debug;

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html.tera");

/// Values available to the index template.
#[derive(Serialize, Debug)]
pub struct PageContext<'a> {
    pub bot_name: &'a str,
    pub greeting: &'a str,
}

/// Renders the embedded index page.
pub fn render_index(page: &PageContext<'_>) -> Result<String> {
    render_page(INDEX_TEMPLATE, page)
}

fn render_page(template: &str, page: &PageContext<'_>) -> Result<String> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![INDEX_TEMPLATE_NAME]);
    tera.add_raw_template(INDEX_TEMPLATE_NAME, template)
        .map_err(|e| anyhow!(PabloError::Template { source: e }))
        .context("Failed to parse the index page template")?;

    let context = tera::Context::from_serialize(page)
        .map_err(|e| anyhow!(PabloError::Template { source: e }))?;
    let html = tera
        .render(INDEX_TEMPLATE_NAME, &context)
        .map_err(|e| anyhow!(PabloError::Template { source: e }))
        .context("Failed to render the index page")?;

    debug!("Rendered index page ({} bytes)", html.len());
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_index_includes_bot_identity() {
        let html = render_index(&PageContext {
            bot_name: "PabloBot",
            greeting: "Hello. How may I assist you?",
        })
        .unwrap();
        assert!(html.contains("<title>PabloBot</title>"));
        assert!(html.contains("Hello. How may I assist you?"));
        assert!(html.contains("/static/script.js"));
    }

    #[test]
    fn test_render_escapes_html() {
        let html = render_index(&PageContext {
            bot_name: "<b>Bot</b>",
            greeting: "hi",
        })
        .unwrap();
        assert!(!html.contains("<b>Bot</b>"));
        assert!(html.contains("&lt;b&gt;Bot&lt;&#x2F;b&gt;"));
    }

    #[test]
    fn test_render_reports_bad_template() {
        let page = PageContext {
            bot_name: "PabloBot",
            greeting: "hi",
        };
        let err = render_page("{% if %}", &page).unwrap_err();
        assert!(err.to_string().contains("Failed to parse the index page template"));
    }
}
