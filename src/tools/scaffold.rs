use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::absolutize;
use crate::error::ConfigError;

static MODULE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("module id pattern is valid"));

const MODULE_SH_TMPL: &str = r#"#!/usr/bin/env bash
# {{name}}: {{one_line}}
set -euo pipefail

usage() {
  cat <<'EOF'
Usage: {{id}}.sh [--help]

{{one_line}}
EOF
}

case "${1:-}" in
  -h|--help) usage; exit 0 ;;
esac

echo "{{id}}: not implemented yet" >&2
exit 1
"#;

const README_MD_TMPL: &str = r#"# {{name}}

{{one_line}}

## Usage

```bash
scripts/{{id}}/{{id}}.sh --help
```
"#;

const SCRIPT_TOML_TMPL: &str = r#"id = "{{id}}"
name = "{{name}}"
entry = "{{id}}.sh"

[tests]

[[tests.smoke]]
kind = "script"
args = ["--help"]
"#;

/// Inputs for [`scaffold`].
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    pub id: String,
    /// Human-readable name; defaults to the id.
    pub name: String,
    /// One-line description; defaults to a placeholder built from the name.
    pub one_line: String,
    pub repo_root: PathBuf,
    /// Directory with `module.sh.tmpl`, `README.md.tmpl` and
    /// `script.toml.tmpl`; the built-in templates are used when unset.
    pub templates: Option<PathBuf>,
    pub force: bool,
}

fn apply_template(tmpl: &str, id: &str, name: &str, one_line: &str) -> String {
    tmpl.replace("{{id}}", id)
        .replace("{{name}}", name)
        .replace("{{one_line}}", one_line)
}

fn load_template(dir: Option<&Path>, file: &str, builtin: &'static str) -> Result<String, ConfigError> {
    let Some(dir) = dir else {
        return Ok(builtin.to_string());
    };
    let path = dir.join(file);
    fs::read_to_string(&path).map_err(|e| ConfigError::FileError {
        message: format!("Failed to read template: {}", e),
        path: path.display().to_string(),
        hint: None,
        code: Some(310),
    })
}

fn write_file(path: &Path, content: &str, executable: bool) -> Result<(), ConfigError> {
    let io_err = |e: std::io::Error| ConfigError::FileError {
        message: format!("Failed to write file: {}", e),
        path: path.display().to_string(),
        hint: None,
        code: Some(311),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)?;

    #[cfg(unix)]
    if executable {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).map_err(io_err)?.permissions();
        perms.set_mode(perms.mode() | 0o111);
        fs::set_permissions(path, perms).map_err(io_err)?;
    }
    #[cfg(not(unix))]
    let _ = executable;

    Ok(())
}

/// Create `scripts/<id>/{<id>.sh, README.md, script.toml}` under the repo root.
///
/// Returns the created paths. Nothing is written if any target exists and
/// `force` is not set.
pub fn scaffold(opts: &ScaffoldOptions) -> Result<Vec<PathBuf>, ConfigError> {
    let id = opts.id.trim();
    if !MODULE_ID.is_match(id) {
        return Err(ConfigError::runtime("id must match: [a-z0-9][a-z0-9-]*"));
    }

    let name = match opts.name.trim() {
        "" => id.to_string(),
        name => name.to_string(),
    };
    let one_line = match opts.one_line.trim() {
        "" => format!("{} module (TODO: describe)", name),
        line => line.to_string(),
    };

    let module_dir = absolutize(&opts.repo_root).join("scripts").join(id);
    let templates = opts.templates.as_deref();
    let outputs = [
        (
            module_dir.join(format!("{}.sh", id)),
            load_template(templates, "module.sh.tmpl", MODULE_SH_TMPL)?,
            true,
        ),
        (
            module_dir.join("README.md"),
            load_template(templates, "README.md.tmpl", README_MD_TMPL)?,
            false,
        ),
        (
            module_dir.join("script.toml"),
            load_template(templates, "script.toml.tmpl", SCRIPT_TOML_TMPL)?,
            false,
        ),
    ];

    if !opts.force {
        if let Some((existing, _, _)) = outputs.iter().find(|(path, _, _)| path.exists()) {
            return Err(ConfigError::RuntimeError {
                message: format!(
                    "refusing to overwrite existing file: {} (use --force)",
                    existing.display()
                ),
                hint: None,
                code: None,
            });
        }
    }

    let mut created = Vec::with_capacity(outputs.len());
    for (path, tmpl, executable) in outputs {
        write_file(&path, &apply_template(&tmpl, id, &name, &one_line), executable)?;
        debug!(path = %path.display(), "scaffolded file");
        created.push(path);
    }
    Ok(created)
}
