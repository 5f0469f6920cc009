//! Rule metadata.

use serde::{Deserialize, Serialize};

/// Static metadata about a detector.
///
/// `priority` is a small positive integer; lower values are more severe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub rule_set_name: String,
    #[serde(default)]
    pub external_info_url: Option<String>,
    pub priority: u32,
}

impl Rule {
    pub fn new(name: impl Into<String>, rule_set_name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            rule_set_name: rule_set_name.into(),
            external_info_url: None,
            priority,
        }
    }

    pub fn with_external_info_url(mut self, url: impl Into<String>) -> Self {
        self.external_info_url = Some(url.into());
        self
    }
}
