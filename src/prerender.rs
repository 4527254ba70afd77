//! Prerendering orchestrator.
//!
//! Drives the core pipeline: discover routes, render each one through the
//! adapter, compose the result into the page shell, and write the document
//! to its route-derived path. Routes are processed sequentially; each
//! route's render → compose → write is a pure per-route transformation
//! with no cross-route dependency.
//!
//! ## Failure isolation
//!
//! A failed render or write affects only that route's artifact: it is
//! logged with the offending route and the loop continues. One bad route
//! must not block SEO coverage for the rest of the site. The two fatal
//! cases — a missing renderer artifact and a marker-less template — are
//! both detected before the loop starts, so a fatal abort never leaves a
//! partial mix of old and new pages behind.

use crate::compose;
use crate::emit;
use crate::render::{RenderError, Renderer};
use crate::routes;
use crate::wp::WpClient;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrerenderError {
    #[error("failed to read template: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Template(#[from] compose::TemplateError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Outcome of one prerender run.
#[derive(Debug, Default)]
pub struct PrerenderSummary {
    pub written: u32,
    pub failed: u32,
}

impl fmt::Display for PrerenderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failed > 0 {
            write!(f, "{} prerendered, {} failed", self.written, self.failed)
        } else {
            write!(f, "{} prerendered", self.written)
        }
    }
}

/// Read the page shell and check it carries both insertion markers.
pub fn load_template(path: &Path) -> Result<String, PrerenderError> {
    let template = fs::read_to_string(path)?;
    compose::validate(&template)?;
    Ok(template)
}

/// Prerender every discovered route into `output_dir`.
///
/// Per-route failures are logged and counted, never propagated — the
/// summary tells the operator what happened, the exit code stays zero.
pub fn run(
    client: &mut WpClient,
    renderer: &dyn Renderer,
    template: &str,
    output_dir: &Path,
) -> PrerenderSummary {
    let mut summary = PrerenderSummary::default();
    for route in routes::discover(client) {
        match render_route(renderer, template, output_dir, &route) {
            Ok(()) => {
                println!("Prerendered {route}");
                summary.written += 1;
            }
            Err(err) => {
                log::warn!("skipping route {route}: {err}");
                summary.failed += 1;
            }
        }
    }
    summary
}

fn render_route(
    renderer: &dyn Renderer,
    template: &str,
    output_dir: &Path,
    route: &str,
) -> Result<(), PrerenderError> {
    let result = renderer.render(route)?;
    let document = compose::compose(template, &result);
    let path = emit::path_for(output_dir, route);
    emit::write_page(&path, &document)?;
    Ok(())
}
