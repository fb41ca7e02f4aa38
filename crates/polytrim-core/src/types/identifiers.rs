//! Feature identifiers.
//!
//! A `FeatureId` names one polyfillable API surface in reverse-namespaced
//! dotted form, e.g. `es.array.includes` or `es.promise.constructor`. The
//! naming scheme tracks core-js module names; nothing here validates that an
//! id exists.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Leading namespace segment (`es`, `esnext`, `web`).
    pub fn namespace(&self) -> &str {
        self.0.split('.').next().unwrap_or("")
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeatureId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for FeatureId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FeatureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for FeatureId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FeatureId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace() {
        assert_eq!(FeatureId::from("es.array.at").namespace(), "es");
        assert_eq!(FeatureId::from("web.url").namespace(), "web");
        assert_eq!(FeatureId::from("").namespace(), "");
    }

    #[test]
    fn test_serde_transparent() {
        #[derive(Deserialize)]
        struct Wrapper {
            ids: Vec<FeatureId>,
        }
        let w: Wrapper = toml::from_str(r#"ids = ["es.map.constructor"]"#).unwrap();
        assert_eq!(w.ids[0], "es.map.constructor");
    }
}
