use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary log checkout
pub fn create_test_log_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file (and its parent directories) below the log root
pub fn create_entry_file(log_dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = log_dir.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Minimal valid entry text
pub fn entry_text(begin: &str, topic: &str) -> String {
    format!("BEGIN: {begin}\nEND: None\nTOPIC: {topic}\nAPPENDIX: \n\nSomething happened.\n")
}
