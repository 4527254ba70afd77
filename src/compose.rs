//! Template compositor.
//!
//! Merges the page-shell template (the client build's `index.html`) with
//! one route's render output. Two markers anchor the substitutions:
//!
//! - `<head>` — head-metadata fragments are inserted immediately after it
//! - `<div id="root"></div>` — the markup is inserted inside it, so the
//!   client hydrates into the same container it rendered into
//!
//! Each substitution is applied to the first occurrence only. The template
//! is expected to contain exactly one of each marker; [`validate`] checks
//! that up front so a malformed shell is reported once, before the route
//! loop, instead of producing a site of half-composed pages.

use crate::render::RenderResult;
use thiserror::Error;

/// Head-insertion marker: head fragments go immediately after it.
pub const HEAD_MARKER: &str = "<head>";

/// Body-insertion marker: the hydration root the markup goes inside.
pub const BODY_MARKER: &str = "<div id=\"root\"></div>";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template is missing the '{0}' marker")]
    MissingMarker(&'static str),
}

/// Check that the page shell carries both insertion markers.
pub fn validate(template: &str) -> Result<(), TemplateError> {
    if !template.contains(HEAD_MARKER) {
        return Err(TemplateError::MissingMarker(HEAD_MARKER));
    }
    if !template.contains(BODY_MARKER) {
        return Err(TemplateError::MissingMarker(BODY_MARKER));
    }
    Ok(())
}

/// Compose a final document from the shell and one route's output.
pub fn compose(template: &str, result: &RenderResult) -> String {
    let head = result.head.concat();
    template
        .replacen(HEAD_MARKER, &format!("{HEAD_MARKER}{head}"), 1)
        .replacen(
            BODY_MARKER,
            &format!("<div id=\"root\">{}</div>", result.markup),
            1,
        )
}
