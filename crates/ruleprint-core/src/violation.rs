//! Rule violations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// One rule finding at a code location.
///
/// Function and class/method scopes are independent and may all be absent
/// for file-level findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub file_name: String,
    pub begin_line: u32,
    pub end_line: u32,
    #[serde(default)]
    pub namespace_name: Option<String>,
    #[serde(default)]
    pub function_name: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub method_name: Option<String>,
    pub description: String,
    pub rule: Arc<Rule>,
}

impl Violation {
    pub fn new(
        file_name: impl Into<String>,
        begin_line: u32,
        end_line: u32,
        description: impl Into<String>,
        rule: Arc<Rule>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            begin_line,
            end_line,
            namespace_name: None,
            function_name: None,
            class_name: None,
            method_name: None,
            description: description.into(),
            rule,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace_name = Some(namespace.into());
        self
    }

    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function_name = Some(function.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self
    }

    /// Sets the method scope together with its owning class.
    pub fn with_method(mut self, class: impl Into<String>, method: impl Into<String>) -> Self {
        self.class_name = Some(class.into());
        self.method_name = Some(method.into());
        self
    }
}
