//! Per-job scratch directory
//!
//! Each extraction job owns one uniquely named directory. The directory and
//! everything in it is removed when the [`Workspace`] is dropped, so every
//! exit path of a job (success, tool failure, IO error, cancelled request)
//! cleans up.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

const WORKSPACE_PREFIX: &str = "ocr-job-";

const INPUT_FILE: &str = "input.pdf";
const OUTPUT_FILE: &str = "output.pdf";
const SIDECAR_FILE: &str = "output.txt";

#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace under `parent`, or the system temp dir when `None`.
    pub fn create(parent: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);

        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };

        Ok(Self { dir })
    }

    /// [`Workspace::create`] off the async worker threads
    pub async fn create_async(parent: Option<PathBuf>) -> io::Result<Self> {
        tokio::task::spawn_blocking(move || Self::create(parent.as_deref()))
            .await
            .map_err(io::Error::other)?
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.path().join(INPUT_FILE)
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join(OUTPUT_FILE)
    }

    pub fn sidecar_path(&self) -> PathBuf {
        self.dir.path().join(SIDECAR_FILE)
    }

    /// Remove the workspace now, reporting any error instead of swallowing it.
    pub fn close(self) -> io::Result<()> {
        self.dir.close()
    }

    /// [`Workspace::close`] on the blocking pool, so a large tree does not stall other requests
    pub async fn remove(self) -> io::Result<()> {
        tokio::task::spawn_blocking(move || self.close())
            .await
            .map_err(io::Error::other)?
    }
}
