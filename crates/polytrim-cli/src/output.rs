//! Report rendering for stdout.

use polytrim_analysis::{FeatureId, FileAnalysis};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub modules: &'a [FeatureId],
    pub files: &'a [FileAnalysis],
    pub errors: Vec<JsonError>,
}

#[derive(Debug, Serialize)]
pub struct JsonError {
    pub code: &'static str,
    pub message: String,
}

pub fn render_list(modules: &[FeatureId]) -> String {
    let mut out = String::new();
    for id in modules {
        out.push_str(id.as_str());
        out.push('\n');
    }
    out
}

pub fn render_json(report: &JsonReport<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_is_one_id_per_line() {
        let modules = vec![FeatureId::from("es.map.constructor"), FeatureId::from("es.set.constructor")];
        assert_eq!(render_list(&modules), "es.map.constructor\nes.set.constructor\n");
        assert_eq!(render_list(&[]), "");
    }

    #[test]
    fn test_json_shape() {
        let modules = vec![FeatureId::from("es.array.at")];
        let report = JsonReport {
            modules: &modules,
            files: &[],
            errors: vec![JsonError {
                code: "PARSE_ERROR",
                message: "boom".to_string(),
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();
        assert_eq!(value["modules"][0], "es.array.at");
        assert_eq!(value["errors"][0]["code"], "PARSE_ERROR");
        assert!(value["files"].as_array().unwrap().is_empty());
    }
}
