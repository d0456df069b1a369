//! Output destinations for scenario sets.

use std::fs;
use std::path::{Path, PathBuf};

use pricer_trs::ScenarioSet;

use crate::error::{ReportError, Result};

/// A destination that renders a scenario set to a single file.
///
/// Sinks only read the set, so several can write the same set
/// concurrently.
pub trait ScenarioSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// File the sink writes to
    fn destination(&self) -> &Path;

    /// Render `set` to the destination, replacing any existing file.
    fn write(&self, set: &ScenarioSet) -> Result<PathBuf>;
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| ReportError::create_dir(parent, e))
        }
        _ => Ok(()),
    }
}
