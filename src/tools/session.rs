use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use tracing::debug;

use super::absolutize;
use super::shell::{arg_expr, quote};
use crate::ast::{Table, Value};
use crate::config::TomletConfig;

/// Which `[[tests.<mode>]]` array a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Smoke,
    Integration,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Smoke => "smoke",
            Mode::Integration => "integration",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variables cleared in integration mode so the host setup cannot leak in.
const INTEGRATION_UNSET: &[&[&str]] = &[
    &["ZSH", "ZSH_CUSTOM"],
    &["MIHOMO_CONFIG", "MIHOMO_CONFIG_URL", "MIHOMO_SESSION", "MIHOMO_BIN"],
];

/// Accumulates the emitted bash script line by line.
#[derive(Default)]
struct Script {
    out: String,
}

impl Script {
    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// A line that reports `message` on stderr and aborts the session.
    fn fail(&mut self, message: &str) {
        self.line(&format!("echo {} >&2; exit 2", quote(message)));
    }
}

enum Step<'a> {
    Table(&'a Table),
    NotATable,
}

/// Generate a bash script that runs the `mode` steps of the manifest at
/// `manifest`, with `root` exported as the repository root.
///
/// Manifest problems are reported inside the script (an `echo ... >&2; exit 2`
/// line), so callers can always pipe the output straight into bash.
pub fn generate_session(manifest: &Path, mode: Mode, root: &Path) -> String {
    let mut script = Script::default();

    let manifest = absolutize(manifest);
    let script_dir = manifest.parent().unwrap_or_else(|| Path::new("/"));

    let config = match TomletConfig::from_file(&manifest) {
        Ok(config) => config,
        Err(e) => {
            script.fail(&format!("error: {}", e));
            return script.out;
        }
    };
    let doc = config.document();

    let Some(script_id) = doc.get("id").and_then(Value::as_str).filter(|s| !s.is_empty()) else {
        script.fail(&format!("error: missing/invalid id in {}", manifest.display()));
        return script.out;
    };
    let Some(entry) = doc.get("entry").and_then(Value::as_str).filter(|s| !s.is_empty()) else {
        script.fail(&format!("error: missing/invalid entry in {}", manifest.display()));
        return script.out;
    };
    let entry_path = absolutize(&script_dir.join(entry));

    let steps = collect_steps(doc.get("tests"), mode);

    script.line("#!/usr/bin/env bash");
    script.line("set -euo pipefail");
    script.line(&format!("export REPO_ROOT={}", quote(&absolutize(root).to_string_lossy())));
    script.line(&format!("export SCRIPT_ID={}", quote(script_id)));
    script.line(&format!("export SCRIPT_DIR={}", quote(&script_dir.to_string_lossy())));
    script.line(&format!("export SCRIPT_ENTRY={}", quote(&entry_path.to_string_lossy())));
    script.line("export SCRIPT_TMPDIR=\"$(mktemp -d)\"");
    script.line("trap 'rm -rf \"$SCRIPT_TMPDIR\"' EXIT");
    if mode == Mode::Integration {
        script.line("export SCRIPT_HOME=\"$SCRIPT_TMPDIR/home\"");
        script.line("mkdir -p \"$SCRIPT_HOME\"");
        script.line("export HOME=\"$SCRIPT_HOME\"");
        script.line("export XDG_CONFIG_HOME=\"$HOME/.config\"");
        script.line("export XDG_CACHE_HOME=\"$HOME/.cache\"");
        script.line("export XDG_DATA_HOME=\"$HOME/.local/share\"");
        for group in INTEGRATION_UNSET {
            script.line(&format!("unset {} || true", group.join(" ")));
        }
    }
    script.line("cd \"$SCRIPT_DIR\"");
    script.line("");

    if steps.is_empty() {
        match mode {
            Mode::Integration => {
                script.line("echo \"(no integration steps)\" >&2");
                script.line("exit 2");
            }
            Mode::Smoke => script.line("echo \"(no steps)\""),
        }
        return script.out;
    }

    for (idx, step) in steps.into_iter().enumerate() {
        let idx = idx + 1;
        match step {
            Step::Table(table) => emit_step(&mut script, idx, table),
            Step::NotATable => script.fail(&format!("error: invalid step #{} (not a table)", idx)),
        }
    }

    debug!(manifest = %manifest.display(), %mode, "generated session");
    script.out
}

/// Steps under `tests.<mode>`; anything of the wrong shape counts as none.
fn collect_steps(tests: Option<&Value>, mode: Mode) -> Vec<Step<'_>> {
    let Some(Value::Table(tests)) = tests else {
        return Vec::new();
    };
    match tests.get(mode.as_str()) {
        Some(Value::TableArray(tables)) => tables.iter().map(Step::Table).collect(),
        Some(Value::StrArray(items)) => items.iter().map(|_| Step::NotATable).collect(),
        _ => Vec::new(),
    }
}

fn emit_step(script: &mut Script, idx: usize, step: &Table) {
    match step.get("kind") {
        Some(Value::Str(kind)) if kind == "script" => {
            let args: &[String] = match step.get("args") {
                None => &[],
                Some(Value::StrArray(args)) => args,
                Some(_) => {
                    script.fail(&format!("error: step #{} args must be an array", idx));
                    return;
                }
            };
            let rendered: Vec<_> = args.iter().map(|a| arg_expr(a)).collect();

            script.line(&format!("echo {}", quote(&format!("-- step {}: script", idx))));
            script.line(format!("\"$SCRIPT_ENTRY\" {}", rendered.join(" ")).trim_end());
            script.line("");
            debug!(step = idx, args = args.len(), "emitted script step");
        }
        Some(Value::Str(kind)) if kind == "bash" => {
            let run_lines: Vec<&str> = match step.get("run") {
                None => Vec::new(),
                Some(Value::Str(run)) => run.lines().filter(|l| !l.trim().is_empty()).collect(),
                Some(Value::StrArray(run)) => run.iter().map(String::as_str).collect(),
                Some(_) => {
                    script.fail(&format!("error: step #{} run must be a string or string array", idx));
                    return;
                }
            };

            script.line(&format!("echo {}", quote(&format!("-- step {}: bash", idx))));
            script.line(&run_lines.join("\n"));
            script.line("");
            debug!(step = idx, lines = run_lines.len(), "emitted bash step");
        }
        Some(Value::Str(kind)) => {
            script.fail(&format!("error: step #{} unknown kind: {:?}", idx, kind));
        }
        Some(other) => {
            script.fail(&format!("error: step #{} unknown kind: <{}>", idx, other.type_name()));
        }
        None => script.fail(&format!("error: step #{} unknown kind: <missing>", idx)),
    }
}
