//! Semantic review delegated to an external program.
//!
//! The program is invoked as
//!
//! ```text
//! PROGRAM [ARGS..] <expected> <actual> <artifact>
//! ```
//!
//! with absolute paths. It must exit successfully and print the revision
//! count as the first line of its standard output. When the count is
//! positive it is expected to have written the rendered difference document
//! to `<artifact>`.

use super::{SemanticReview, SemanticReviewer, diff_artifact_path};
use crate::common::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Reviewer backed by an external command.
#[derive(Debug, Clone)]
pub struct ExternalCommandReviewer {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalCommandReviewer {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a fixed argument placed before the three paths.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several fixed arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    #[inline]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn tool_name(&self) -> String {
        self.program.display().to_string()
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| Error::from_io(path, e))
}

impl SemanticReviewer for ExternalCommandReviewer {
    fn review_semantically(&self, expected: &Path, actual: &Path) -> Result<SemanticReview> {
        let expected = absolute(expected)?;
        let actual = absolute(actual)?;
        let artifact = diff_artifact_path(&actual);

        log::debug!(
            "Running reviewer {} on {} and {}",
            self.program.display(),
            expected.display(),
            actual.display()
        );

        // `output` waits for the child, so no process outlives this call.
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&expected)
            .arg(&actual)
            .arg(&artifact)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::external_tool(self.tool_name(), format!("failed to start: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::external_tool(
                self.tool_name(),
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let first_line = stdout.lines().next().unwrap_or("").trim();
        let revision_count: usize = first_line.parse().map_err(|_| {
            Error::external_tool(
                self.tool_name(),
                format!("expected a revision count, got {:?}", first_line),
            )
        })?;

        if revision_count == 0 {
            return Ok(SemanticReview::equivalent());
        }

        if !artifact.is_file() {
            return Err(Error::external_tool(
                self.tool_name(),
                format!(
                    "reported {} revisions but wrote no diff document at {}",
                    revision_count,
                    artifact.display()
                ),
            ));
        }

        log::info!("Reviewer found {} revisions", revision_count);
        Ok(SemanticReview::with_revisions(revision_count, artifact))
    }
}
