use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use polytrim_core::config::{CliOverrides, MemberConflictPolicy, ModuleFormat};

/// CLI arguments for the polytrim binary.
#[derive(Parser, Debug)]
#[command(
    name = "polytrim",
    version,
    about = "Report the core-js polyfill modules a program actually uses"
)]
pub struct CliArgs {
    /// Source files to analyze (.js, .mjs, .cjs, .jsx, .ts, .mts, .cts, .tsx).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Candidate module selectors, e.g. `es.array.*` or `/^es\.promise/`.
    #[arg(short = 'm', long, value_delimiter = ',')]
    pub modules: Option<Vec<String>>,

    /// Selectors removed after alias expansion.
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Directory holding `polytrim.toml`. Defaults to the working directory.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Extra catalog definitions (TOML).
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Static-member owner conflict handling.
    #[arg(long = "member-conflicts", value_enum, ignore_case = true)]
    pub member_conflicts: Option<ConflictArg>,

    /// What to print.
    #[arg(short = 'f', long, value_enum, default_value = "list")]
    pub format: OutputFormat,

    /// Module syntax of the printed prelude.
    #[arg(long = "module-format", value_enum, ignore_case = true)]
    pub module_format: Option<ModuleFormatArg>,

    /// Precede the prelude with a comment listing the modules.
    #[arg(long)]
    pub summary: bool,

    /// Print each input with its prelude prepended instead of a report.
    #[arg(long)]
    pub transform: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One module id per line.
    List,
    /// Union plus per-file reports as JSON.
    Json,
    /// Import statements for the union.
    Prelude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConflictArg {
    LastWins,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModuleFormatArg {
    Esm,
    Cjs,
}

impl CliArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            modules: self.modules.clone(),
            exclude: self.exclude.clone(),
            member_conflicts: self.member_conflicts.map(|c| match c {
                ConflictArg::LastWins => MemberConflictPolicy::LastWins,
                ConflictArg::Reject => MemberConflictPolicy::Reject,
            }),
            catalog_path: self.catalog.clone(),
            format: self.module_format.map(|f| match f {
                ModuleFormatArg::Esm => ModuleFormat::Esm,
                ModuleFormatArg::Cjs => ModuleFormat::Cjs,
            }),
            summary: self.summary.then_some(true),
        }
    }
}
