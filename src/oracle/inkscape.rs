//! Inkscape as a geometry oracle.
//!
//! Each query or export is one blocking `inkscape` process. Arguments are
//! passed directly, never through a shell.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use super::{parse_query_output, Axis, GeometryOracle};
use crate::error::SceneError;

/// Command-line dialect spoken by the installed Inkscape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InkscapeCli {
    /// Inkscape 0.92: `--query-id ID -X`, `--export-png=OUT`.
    #[default]
    Legacy,
    /// Inkscape 1.x: `--query-id=ID --query-x`, `--export-filename=OUT`.
    Modern,
}

/// Exit status and captured output of one external command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutcome {
    /// Human-readable exit status.
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs Inkscape against one source document.
#[derive(Clone, Debug)]
pub struct InkscapeOracle {
    program: PathBuf,
    source: PathBuf,
    cli: InkscapeCli,
}

impl InkscapeOracle {
    pub fn new(program: impl Into<PathBuf>, source: impl Into<PathBuf>, cli: InkscapeCli) -> Self {
        Self {
            program: program.into(),
            source: source.into(),
            cli,
        }
    }

    /// Arguments for a single-axis geometry query.
    pub fn query_args(&self, id: &str, axis: Axis) -> Vec<OsString> {
        match self.cli {
            InkscapeCli::Legacy => {
                let flag = match axis {
                    Axis::X => "-X",
                    Axis::Y => "-Y",
                    Axis::Width => "-W",
                    Axis::Height => "-H",
                };
                vec![
                    "--query-id".into(),
                    id.into(),
                    flag.into(),
                    self.source.clone().into(),
                ]
            }
            InkscapeCli::Modern => {
                let flag = match axis {
                    Axis::X => "--query-x",
                    Axis::Y => "--query-y",
                    Axis::Width => "--query-width",
                    Axis::Height => "--query-height",
                };
                vec![
                    format!("--query-id={id}").into(),
                    flag.into(),
                    self.source.clone().into(),
                ]
            }
        }
    }

    /// Arguments for exporting one item, alone, as PNG.
    pub fn export_args(&self, id: &str, output: &Path) -> Vec<OsString> {
        match self.cli {
            InkscapeCli::Legacy => {
                let mut target = OsString::from("--export-png=");
                target.push(output);
                vec![
                    self.source.clone().into(),
                    "--export-id".into(),
                    id.into(),
                    "--export-id-only".into(),
                    target,
                ]
            }
            InkscapeCli::Modern => {
                let mut target = OsString::from("--export-filename=");
                target.push(output);
                vec![
                    self.source.clone().into(),
                    format!("--export-id={id}").into(),
                    "--export-id-only".into(),
                    "--export-type=png".into(),
                    target,
                ]
            }
        }
    }

    fn run(&self, args: &[OsString]) -> Result<CommandOutcome, SceneError> {
        debug!(program = %self.program.display(), ?args, "running inkscape");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| SceneError::OracleLaunch {
                program: self.program.display().to_string(),
                source,
            })?;

        Ok(CommandOutcome {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

impl GeometryOracle for InkscapeOracle {
    fn query(&self, id: &str, axis: Axis) -> Result<f64, SceneError> {
        let outcome = self.run(&self.query_args(id, axis))?;

        if !outcome.success {
            return Err(SceneError::OracleFailed {
                id: id.to_string(),
                axis: axis.as_str(),
                status: outcome.status_text(),
                stderr: outcome.stderr,
            });
        }

        parse_query_output(&outcome.stdout).ok_or_else(|| SceneError::OracleOutput {
            id: id.to_string(),
            axis: axis.as_str(),
            output: outcome.stdout.trim().to_string(),
        })
    }

    fn export_png(&self, id: &str, output: &Path) -> Result<CommandOutcome, SceneError> {
        self.run(&self.export_args(id, output))
    }
}
