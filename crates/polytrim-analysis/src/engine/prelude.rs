//! Import prelude rendering: the polyfill imports a host prepends to an entry
//! module.

use polytrim_core::config::{ModuleFormat, OutputConfig};
use polytrim_core::types::FeatureId;

#[derive(Debug, Clone)]
pub struct PreludeOptions {
    pub format: ModuleFormat,
    pub import_prefix: String,
    pub summary: bool,
}

impl Default for PreludeOptions {
    fn default() -> Self {
        Self::from_config(&OutputConfig::default())
    }
}

impl PreludeOptions {
    pub fn from_config(output: &OutputConfig) -> Self {
        Self {
            format: output.effective_format(),
            import_prefix: output.effective_import_prefix().to_string(),
            summary: output.effective_summary(),
        }
    }

    fn specifier(&self, id: &FeatureId) -> String {
        format!("{}{}.js", self.import_prefix, id)
    }
}

/// One import (or `require`) per module, in the given order, optionally
/// preceded by a comment listing them. Empty when `modules` is empty.
pub fn render_prelude(modules: &[FeatureId], options: &PreludeOptions) -> String {
    if modules.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    if options.summary {
        out.push_str(&format!("/**\n * polyfills ({}):\n", modules.len()));
        for id in modules {
            out.push_str(&format!(" * - {id}\n"));
        }
        out.push_str(" */\n");
    }
    for id in modules {
        let specifier = options.specifier(id);
        match options.format {
            ModuleFormat::Esm => out.push_str(&format!("import \"{specifier}\";\n")),
            ModuleFormat::Cjs => out.push_str(&format!("require(\"{specifier}\");\n")),
        }
    }
    out
}

/// Insert the prelude into `code` after any hashbang line and leading
/// `"use strict"` directive, which must stay first.
pub fn prepend_prelude(code: &str, modules: &[FeatureId], options: &PreludeOptions) -> String {
    let prelude = render_prelude(modules, options);
    if prelude.is_empty() {
        return code.to_string();
    }

    let split = head_len(code);
    let (head, body) = code.split_at(split);
    let mut out = String::with_capacity(code.len() + prelude.len() + 1);
    out.push_str(head);
    if !head.is_empty() && !head.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&prelude);
    out.push_str(body);
    out
}

/// Byte length of the hashbang line plus a directive line that follows it.
fn head_len(code: &str) -> usize {
    let mut len = 0;
    let mut rest = code;
    if rest.starts_with("#!") {
        let line = line_len(rest);
        len += line;
        rest = &rest[line..];
    }
    let trimmed = rest.trim_start();
    if trimmed.starts_with("\"use strict\"") || trimmed.starts_with("'use strict'") {
        let skipped = rest.len() - trimmed.len();
        len += skipped + line_len(trimmed);
    }
    len
}

fn line_len(s: &str) -> usize {
    s.find('\n').map_or(s.len(), |i| i + 1)
}
