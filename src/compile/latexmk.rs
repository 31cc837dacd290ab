// src/compile/latexmk.rs

//! Blocking `latexmk` invocation through the platform shell.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::compile::{CompileOutcome, CompileRequest, Compiler};

/// Production [`Compiler`] that shells out to `latexmk`.
///
/// The invocation is a blocking call with no timeout; the run waits until
/// the tool exits. stdout and stderr are captured and returned as the log
/// text.
#[derive(Debug, Clone)]
pub struct LatexmkCompiler {
    program: String,
}

impl LatexmkCompiler {
    pub fn new() -> Self {
        Self {
            program: "latexmk".to_string(),
        }
    }

    /// Use a different latexmk binary (e.g. from a TeX distribution that is
    /// not on PATH).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command_line(&self, entry_point: &Path, output_dir: &Path, req: &CompileRequest<'_>) -> String {
        // latexmk substitutes %O with its default options and %S with the
        // source file inside the -pdflatex command; the pretex rides along
        // in front of the \input.
        format!(
            "{} -pdf -interaction=nonstopmode -output-directory='{}' -jobname='{}' -pdflatex=\"pdflatex %O '{}'\" '{}'",
            self.program,
            output_dir.display(),
            req.output_name,
            req.pretex,
            entry_point.display(),
        )
    }
}

impl Default for LatexmkCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler for LatexmkCompiler {
    fn compile(&self, req: &CompileRequest<'_>) -> Result<CompileOutcome> {
        // The command runs from the source directory so relative \input
        // paths resolve; entry point and output directory have to be
        // absolute for that.
        let entry_point = req
            .entry_point
            .canonicalize()
            .with_context(|| format!("resolving entry point {:?}", req.entry_point))?;
        let output_dir = req
            .output_dir
            .canonicalize()
            .with_context(|| format!("resolving output directory {:?}", req.output_dir))?;

        let command_line = self.command_line(&entry_point, &output_dir, req);
        info!(entry = ?entry_point, output = %req.output_name, "invoking latexmk");
        debug!(cmd = %command_line, "compiler command line");

        // Build a shell command appropriate for the platform.
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&command_line);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&command_line);
            c
        };

        if let Some(parent) = entry_point.parent() {
            cmd.current_dir(parent);
        }

        let output = cmd
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("running latexmk for '{}'", req.output_name))?;

        let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.stderr.is_empty() {
            log.push_str(&String::from_utf8_lossy(&output.stderr));
        }

        info!(
            output = %req.output_name,
            exit_code = output.status.code().unwrap_or(-1),
            success = output.status.success(),
            "latexmk exited"
        );

        Ok(CompileOutcome {
            success: output.status.success(),
            log,
        })
    }
}
