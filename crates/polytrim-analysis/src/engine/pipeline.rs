//! Per-file analysis: parse → normalize → classify, driven by `PolytrimConfig`.

use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use polytrim_core::config::PolytrimConfig;
use polytrim_core::errors::{ParseError, PipelineError, PipelineResult};
use polytrim_core::types::{FeatureId, FxHashMap, FxHashSet};
use serde::Serialize;

use super::classifier::{Classifier, UsageReport};
use super::prelude::{prepend_prelude, render_prelude, PreludeOptions};
use super::registry::PatternRegistry;
use super::selection::{known_ids, ModuleSelection};
use crate::catalog::TomlCatalogLoader;
use crate::parsers::{JavaScriptParser, Language};
use crate::syntax::normalize;

/// Result of analyzing one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub language: Language,
    pub syntax_errors: u32,
    pub parse_time_us: u64,
    pub report: UsageReport,
}

/// A configured analyzer: classifier, resolved candidate list and one
/// tree-sitter parser per language, reused across files.
pub struct AnalysisSession {
    config: PolytrimConfig,
    classifier: Classifier,
    candidates: Vec<FeatureId>,
    prelude: PreludeOptions,
    parsers: FxHashMap<Language, JavaScriptParser>,
}

impl AnalysisSession {
    /// Build a session from resolved configuration.
    ///
    /// Selectors are expanded against the catalog, aliases are resolved, and
    /// exclusions applied to the expanded list. Under the `reject` conflict
    /// policy the registry is validated here, before any file is parsed.
    pub fn from_config(config: PolytrimConfig) -> Result<Self, PipelineError> {
        let mut classifier =
            Classifier::builtin().with_policy(config.analysis.effective_member_conflicts());
        if let Some(ref path) = config.analysis.catalog_path {
            classifier.extend(TomlCatalogLoader::load_from_file(path)?);
        }

        let modules = config.analysis.effective_modules();
        let selection =
            ModuleSelection::parse(modules.as_slice(), config.analysis.exclude.as_slice())?;
        let selected = {
            let universe = known_ids(classifier.catalog(), classifier.aliases());
            selection.candidates(&universe)
        };
        let candidates = selection.apply_exclude(classifier.resolve(&selected));

        PatternRegistry::build_with_policy(classifier.catalog(), &candidates, classifier.policy())?;

        tracing::info!(
            selected = selected.len(),
            candidates = candidates.len(),
            policy = classifier.policy().as_str(),
            "analysis session ready"
        );

        let prelude = PreludeOptions::from_config(&config.output);
        Ok(Self {
            config,
            classifier,
            candidates,
            prelude,
            parsers: FxHashMap::default(),
        })
    }

    pub fn config(&self) -> &PolytrimConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Alias-expanded candidates after exclusion.
    pub fn candidates(&self) -> &[FeatureId] {
        &self.candidates
    }

    /// Analyze source text. The language is detected from `path`.
    pub fn analyze_source(
        &mut self,
        source: &str,
        path: &Path,
    ) -> Result<FileAnalysis, PipelineError> {
        let language = Language::from_path(path).ok_or_else(|| ParseError::UnsupportedLanguage {
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })?;

        let parser = match self.parsers.entry(language) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(JavaScriptParser::new(language)?),
        };
        let parsed = parser.parse(source, path)?;

        if parsed.has_errors() && self.config.analysis.effective_fail_on_parse_errors() {
            return Err(ParseError::SyntaxErrors {
                path: path.to_path_buf(),
                count: parsed.error_count,
            }
            .into());
        }

        let tree = normalize(parsed.tree.root_node(), source);
        let mut report = self.classifier.report_resolved(&self.candidates, &tree)?;
        if self.config.output.effective_sort() {
            report = report.sorted();
        }

        tracing::debug!(
            file = %path.display(),
            features = report.features.len(),
            "file analyzed"
        );

        Ok(FileAnalysis {
            path: path.to_path_buf(),
            language,
            syntax_errors: parsed.error_count,
            parse_time_us: parsed.parse_time_us,
            report,
        })
    }

    pub fn analyze_file(&mut self, path: &Path) -> Result<FileAnalysis, PipelineError> {
        let source = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.analyze_source(&source, path)
    }

    /// Analyze every file, collecting failures instead of stopping at the first.
    pub fn analyze_files<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
    ) -> PipelineResult<Vec<FileAnalysis>> {
        let mut result = PipelineResult::new(Vec::with_capacity(paths.len()));
        for path in paths {
            let path = path.as_ref();
            match self.analyze_file(path) {
                Ok(analysis) => result.data.push(analysis),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "file skipped");
                    result.add_error(e);
                }
            }
        }
        result
    }

    /// Features needed by any of `analyses`, deduplicated and sorted.
    pub fn union(analyses: &[FileAnalysis]) -> Vec<FeatureId> {
        let mut seen: FxHashSet<&FeatureId> = FxHashSet::default();
        let mut all: Vec<FeatureId> = analyses
            .iter()
            .flat_map(|a| &a.report.features)
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect();
        all.sort();
        all
    }

    pub fn render_prelude(&self, modules: &[FeatureId]) -> String {
        render_prelude(modules, &self.prelude)
    }

    /// Analyze `source` and return it with the needed imports prepended.
    pub fn transform(&mut self, source: &str, path: &Path) -> Result<String, PipelineError> {
        let analysis = self.analyze_source(source, path)?;
        Ok(prepend_prelude(source, &analysis.report.features, &self.prelude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(modules: &[&str]) -> AnalysisSession {
        let mut config = PolytrimConfig::default();
        config.analysis.modules = modules.iter().map(|m| m.to_string()).collect();
        AnalysisSession::from_config(config).unwrap()
    }

    #[test]
    fn test_unsupported_extension() {
        let mut s = session(&["es.map"]);
        let err = s.analyze_source("x", Path::new("style.css")).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Parse(ParseError::UnsupportedLanguage { ref extension }) if extension == "css"
        ));
    }

    #[test]
    fn test_parser_reused_per_language() {
        let mut s = session(&["es.map"]);
        s.analyze_source("new Map()", Path::new("a.js")).unwrap();
        s.analyze_source("new Map()", Path::new("b.mjs")).unwrap();
        s.analyze_source("new Map()", Path::new("c.ts")).unwrap();
        assert_eq!(s.parsers.len(), 2);
    }

    #[test]
    fn test_transform_prepends_imports() {
        let mut s = session(&["es.map"]);
        let out = s.transform("new Map();\n", Path::new("a.js")).unwrap();
        assert_eq!(out, "import \"core-js/modules/es.map.constructor.js\";\nnew Map();\n");
    }
}
