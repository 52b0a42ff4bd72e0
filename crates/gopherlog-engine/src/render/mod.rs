//! # Render
//!
//! Turning a finished [`Page`] into text and writing it to
//! `<output_root>/<year>/<month>/index.gph`.
//!
//! The pagination engine only depends on the [`Renderer`] trait; the bundled
//! implementation is the file-based [`TemplateRenderer`].

pub mod template;

use crate::page::Page;
use std::fs;
use std::path::{Path, PathBuf};

pub use template::{Template, TemplateRenderer};

/// File name of every rendered month page.
pub const PAGE_FILE_NAME: &str = "index.gph";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid template: {0}")]
    Template(String),
    #[error("Failed to create month directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write page {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Produces the text of one page.
pub trait Renderer {
    fn render(&self, page: &Page) -> Result<String, RenderError>;
}

/// Directory a page is written to: `<output_root>/<year>/<month>`.
pub fn page_dir(output_root: &Path, page: &Page) -> PathBuf {
    output_root.join(&page.year).join(&page.month)
}

/// Render `page` and write it below `output_root`, returning the written path.
pub fn write_page(
    output_root: &Path,
    page: &Page,
    renderer: &dyn Renderer,
) -> Result<PathBuf, RenderError> {
    let dir = page_dir(output_root, page);
    fs::create_dir_all(&dir).map_err(|source| RenderError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let text = renderer.render(page)?;
    let path = dir.join(PAGE_FILE_NAME);
    fs::write(&path, text).map_err(|source| RenderError::Write {
        path: path.clone(),
        source,
    })?;

    log::debug!("Wrote {} ({} entries)", path.display(), page.entries.len());
    Ok(path)
}
