pub mod corpus;
pub mod entry;
pub mod error;
pub mod markup;
pub mod page;
pub mod paginate;
pub mod render;
pub mod sync;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use corpus::{CorpusError, load_entries, sort_chronologically};
pub use entry::{Entry, EntryError};
pub use error::PhlogError;
pub use markup::{Counters, FootnoteTargets};
pub use page::{MonthKey, OutputEntry, Page};
pub use paginate::{PageBuilder, paginate, publish};
pub use render::{RenderError, Renderer, TemplateRenderer};
pub use sync::{SyncError, sync_repository};

use std::path::{Path, PathBuf};

/// Load, sort and render the log at `log_root` into `output_root`.
///
/// Returns the paths of the written pages.
pub fn build_phlog(
    log_root: &Path,
    output_root: &Path,
    renderer: &dyn Renderer,
    targets: &FootnoteTargets,
) -> Result<Vec<PathBuf>, PhlogError> {
    let mut entries = load_entries(log_root)?;
    sort_chronologically(&mut entries);
    Ok(publish(&entries, output_root, renderer, targets)?)
}
