//! polytrim: print the polyfill modules a set of source files needs.
//!
//! Exit status: 0 on success, 1 if any file could not be analyzed (the
//! report still covers the rest), 2 if configuration or catalog loading failed.

mod args;
mod output;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use polytrim_analysis::AnalysisSession;
use polytrim_core::config::PolytrimConfig;
use polytrim_core::errors::{ParseError, PipelineError, PolytrimErrorCode};

use args::{CliArgs, OutputFormat};
use output::{render_json, render_list, JsonError, JsonReport};

fn main() -> ExitCode {
    polytrim_core::tracing::init_tracing();
    let args = CliArgs::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("polytrim: {}", e.coded_string());
            ExitCode::from(2)
        }
    }
}

/// Returns whether every file was analyzed.
fn run(args: &CliArgs) -> Result<bool, PipelineError> {
    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = PolytrimConfig::load(&root, Some(&args.overrides()))?;
    let mut session = AnalysisSession::from_config(config)?;

    if args.transform {
        return transform(&mut session, &args.files);
    }

    let result = session.analyze_files(&args.files);
    for e in &result.errors {
        eprintln!("polytrim: {}", e.coded_string());
    }
    let modules = AnalysisSession::union(&result.data);

    let rendered = match args.format {
        OutputFormat::List => render_list(&modules),
        OutputFormat::Prelude => session.render_prelude(&modules),
        OutputFormat::Json => {
            let report = JsonReport {
                modules: &modules,
                files: &result.data,
                errors: result
                    .errors
                    .iter()
                    .map(|e| JsonError {
                        code: e.error_code(),
                        message: e.to_string(),
                    })
                    .collect(),
            };
            let mut json = render_json(&report).unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to serialize report");
                String::from("{}")
            });
            json.push('\n');
            json
        }
    };
    write_stdout(&rendered);

    tracing::info!(
        files = result.data.len(),
        failed = result.error_count(),
        modules = modules.len(),
        "analysis complete"
    );
    Ok(result.is_clean())
}

fn transform(session: &mut AnalysisSession, files: &[PathBuf]) -> Result<bool, PipelineError> {
    let mut clean = true;
    for path in files {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                let err = ParseError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                };
                eprintln!("polytrim: {}", err.coded_string());
                clean = false;
                continue;
            }
        };
        match session.transform(&source, path) {
            Ok(out) => write_stdout(&out),
            Err(e) => {
                eprintln!("polytrim: {}", e.coded_string());
                clean = false;
            }
        }
    }
    Ok(clean)
}

fn write_stdout(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
        tracing::warn!(error = %e, "stdout closed");
    }
}
