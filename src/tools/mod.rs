//! Developer tooling built on the parser: script-manifest readers, the
//! shell-session generator, the module scaffolder and a TCP forwarder.
//!
//! A script manifest is a config-subset file with top-level `id`, `name` and
//! `entry` strings and a `[tests]` table holding one array of tables per
//! test mode (`[[tests.smoke]]`, `[[tests.integration]]`).

use std::fs;
use std::path::{Path, PathBuf};

pub mod fields;
pub mod forward;
pub mod scaffold;
pub mod session;
pub mod shell;

pub use fields::{list_entry, read_field, ScriptEntry};
pub use forward::Forwarder;
pub use scaffold::{scaffold, ScaffoldOptions};
pub use session::{generate_session, Mode};

/// Absolute form of `path`, following symlinks when the path exists.
pub(crate) fn absolutize(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
