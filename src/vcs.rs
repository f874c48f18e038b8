//! Version-control collaborator.
//!
//! Removing a converted original should also drop it from the git index so
//! the next commit records the deletion. That is strictly best-effort: the
//! site may not be a checkout, git may not be installed, or the file may be
//! untracked. Callers receive an [`Untracker`] as an optional capability and
//! ignore its errors.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        source: io::Error,
    },
    #[error("{program} exited with {status} for {path}")]
    Failed {
        program: &'static str,
        status: ExitStatus,
        path: String,
    },
}

/// Removes a file from version-control tracking.
pub trait Untracker {
    fn untrack(&self, path: &Path) -> Result<(), VcsError>;
}

/// Runs `git rm -q -- <file>` from the file's own directory.
///
/// Running from the parent directory makes the call independent of the
/// process working directory. Git's output is discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitUntracker;

impl GitUntracker {
    pub fn new() -> Self {
        Self
    }
}

impl Untracker for GitUntracker {
    fn untrack(&self, path: &Path) -> Result<(), VcsError> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let file_name = path.file_name().unwrap_or(path.as_os_str());

        let status = Command::new("git")
            .args(["rm", "-q", "--"])
            .arg(file_name)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| VcsError::Spawn {
                program: "git",
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(VcsError::Failed {
                program: "git",
                status,
                path: path.display().to_string(),
            })
        }
    }
}
