//! Output configuration: how needed modules are rendered for the host.

use serde::{Deserialize, Serialize};

/// Module syntax for the rendered polyfill prelude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// `import "core-js/modules/<id>.js";`
    #[default]
    Esm,
    /// `require("core-js/modules/<id>.js");`
    Cjs,
}

impl ModuleFormat {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "esm" | "module" => Some(Self::Esm),
            "cjs" | "commonjs" => Some(Self::Cjs),
            _ => None,
        }
    }
}

/// Configuration for rendering results.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Prelude module syntax. Default: esm.
    pub format: Option<ModuleFormat>,
    /// Import specifier prefix. Default: `core-js/modules/`.
    pub import_prefix: Option<String>,
    /// Emit a comment listing the injected modules. Default: false.
    pub summary: Option<bool>,
    /// Sort the final module list lexically. Default: true.
    pub sort: Option<bool>,
}

impl OutputConfig {
    pub fn effective_format(&self) -> ModuleFormat {
        self.format.unwrap_or_default()
    }

    pub fn effective_import_prefix(&self) -> &str {
        self.import_prefix.as_deref().unwrap_or("core-js/modules/")
    }

    pub fn effective_summary(&self) -> bool {
        self.summary.unwrap_or(false)
    }

    pub fn effective_sort(&self) -> bool {
        self.sort.unwrap_or(true)
    }
}
