use std::collections::HashSet;
use std::fs;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use coursetex::compile::{CompileOutcome, CompileRequest, Compiler};

/// A fake compiler that:
/// - records which output names were "compiled"
/// - writes a placeholder PDF artifact for successful compilations
/// - fails (exit-status style, not error) for configured output names.
#[derive(Debug, Default)]
pub struct FakeCompiler {
    compiled: Arc<Mutex<Vec<String>>>,
    fail_for: HashSet<String>,
    /// Output names that report success but produce no artifact.
    no_artifact_for: HashSet<String>,
    /// When failing, still leave a partial artifact in the output dir, to
    /// exercise the caller's cleanup of incomplete attempts.
    partial_on_failure: bool,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make compilations of this output name report failure.
    pub fn fail_for(mut self, output_name: &str) -> Self {
        self.fail_for.insert(output_name.to_string());
        self
    }

    /// Make compilations of this output name report success without
    /// producing an artifact.
    pub fn no_artifact_for(mut self, output_name: &str) -> Self {
        self.no_artifact_for.insert(output_name.to_string());
        self
    }

    pub fn with_partial_on_failure(mut self) -> Self {
        self.partial_on_failure = true;
        self
    }

    /// Shared handle to the recorded output names, in compilation order.
    pub fn compiled(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.compiled)
    }

    /// Output names compiled so far, in order.
    pub fn compiled_names(&self) -> Vec<String> {
        self.compiled.lock().unwrap().clone()
    }
}

impl Compiler for FakeCompiler {
    fn compile(&self, req: &CompileRequest<'_>) -> Result<CompileOutcome> {
        {
            let mut guard = self.compiled.lock().unwrap();
            guard.push(req.output_name.to_string());
        }

        let artifact = req.output_dir.join(format!("{}.pdf", req.output_name));

        if self.fail_for.contains(req.output_name) {
            if self.partial_on_failure {
                fs::write(&artifact, b"%PDF-1.5 truncated")?;
            }
            return Ok(CompileOutcome {
                success: false,
                log: format!("! Emergency stop: fake failure for {}", req.output_name),
            });
        }

        if !self.no_artifact_for.contains(req.output_name) {
            fs::write(&artifact, format!("%PDF-1.5 fake build of {}", req.output_name))?;
        }
        Ok(CompileOutcome {
            success: true,
            log: format!("fake latexmk run for {}", req.output_name),
        })
    }
}
