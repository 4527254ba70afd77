//! Static renderer adapter.
//!
//! Rendering is owned by an external subsystem — the client app's SSR
//! build — and this module only pins down its contract: a pure function
//! from a route to a markup fragment plus head metadata. Markup passes
//! through verbatim; sanitization is the rendering subsystem's job, not
//! ours.
//!
//! The production adapter, [`CommandRenderer`], treats the SSR build
//! artifact as an executable: it is invoked once per route with the route
//! as its single argument and must print a JSON [`RenderResult`] on
//! stdout:
//!
//! ```json
//! {
//!   "markup": "<p>Hi</p>",
//!   "head": {
//!     "title": "<title>X</title>",
//!     "meta": "<meta name=\"description\" content=\"...\">",
//!     "links": "<link rel=\"canonical\" href=\"...\">"
//!   }
//! }
//! ```
//!
//! Constructing the adapter fails if the artifact does not exist, so a
//! missing SSR build aborts the pipeline before any route is processed.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("renderer artifact not found: {0} (build the SSR bundle first)")]
    MissingArtifact(PathBuf),
    #[error("failed to run renderer: {0}")]
    Io(#[from] std::io::Error),
    #[error("renderer exited with {status} for route '{route}': {stderr}")]
    Failed {
        route: String,
        status: String,
        stderr: String,
    },
    #[error("renderer produced invalid output: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

/// Head-metadata fragments for one route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeadBundle {
    pub title: String,
    pub meta: String,
    pub links: String,
}

impl HeadBundle {
    /// Fragments concatenated in document order: title, meta tags, link
    /// tags.
    pub fn concat(&self) -> String {
        format!("{}{}{}", self.title, self.meta, self.links)
    }
}

/// Output of rendering one route. Produced once per route per run, never
/// cached across runs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderResult {
    pub markup: String,
    pub head: HeadBundle,
}

/// A function from route to markup + head metadata.
pub trait Renderer {
    fn render(&self, route: &str) -> Result<RenderResult, RenderError>;
}

/// Renderer backed by the external SSR executable.
#[derive(Debug)]
pub struct CommandRenderer {
    program: PathBuf,
}

impl CommandRenderer {
    /// Fails fast when the artifact is missing — the operator forgot to
    /// build the SSR bundle, and no output should be written.
    pub fn new(program: &Path) -> Result<Self, RenderError> {
        if !program.exists() {
            return Err(RenderError::MissingArtifact(program.to_path_buf()));
        }
        Ok(Self {
            program: program.to_path_buf(),
        })
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, route: &str) -> Result<RenderResult, RenderError> {
        let output = Command::new(&self.program).arg(route).output()?;
        if !output.status.success() {
            return Err(RenderError::Failed {
                route: route.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}
