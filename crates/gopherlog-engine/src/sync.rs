//! Fetching the log repository with the `git` executable.

use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("could not run `git {command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`git {command}` failed: {stderr}")]
    Failed { command: String, stderr: String },
    #[error("{0} exists but is not a git checkout")]
    NotACheckout(PathBuf),
}

/// Clone `url` into `repo_dir`, or bring an existing checkout up to date.
///
/// An existing checkout is hard-reset before pulling, so local edits in the
/// checkout are discarded.
pub fn sync_repository(repo_dir: &Path, url: &str) -> Result<(), SyncError> {
    if is_checkout(repo_dir) {
        log::info!("Updating {}", repo_dir.display());
        git(Some(repo_dir), &["reset", "--hard"])?;
        git(Some(repo_dir), &["pull", "--force", "origin"])?;
        return Ok(());
    }

    if is_nonempty_dir(repo_dir) {
        return Err(SyncError::NotACheckout(repo_dir.to_path_buf()));
    }

    log::info!("Cloning {url} into {}", repo_dir.display());
    let target = repo_dir.to_string_lossy();
    git(None, &["clone", url, target.as_ref()])?;
    Ok(())
}

pub fn is_checkout(dir: &Path) -> bool {
    dir.join(".git").exists()
}

fn is_nonempty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_some())
}

fn git(dir: Option<&Path>, args: &[&str]) -> Result<String, SyncError> {
    let command = args.join(" ");
    let mut cmd = Command::new("git");
    if let Some(dir) = dir {
        cmd.arg("-C").arg(dir);
    }
    let output = cmd
        .args(args)
        .output()
        .map_err(|source| SyncError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(SyncError::Failed {
            command,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
