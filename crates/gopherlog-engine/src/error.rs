use crate::corpus::CorpusError;
use crate::render::RenderError;
use crate::sync::SyncError;

/// Failure of one pipeline stage. Every stage failure ends the run.
#[derive(Debug, thiserror::Error)]
pub enum PhlogError {
    #[error("fetch failed: {0}")]
    Sync(#[from] SyncError),
    #[error("parse failed: {0}")]
    Corpus(#[from] CorpusError),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}
