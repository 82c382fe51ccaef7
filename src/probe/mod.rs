//! Probe descriptors and prompt expansion.
//!
//! A probe is pure data: a set of prompt templates plus the enumerations
//! substituted into them. The four built-in variants differ only in their
//! data, so there is a single descriptor type rather than a type per
//! variant.

pub mod builtin;

use serde::{Deserialize, Serialize};

use crate::error::{ProbeError, Result};

/// Placeholder substituted with a target-language name.
pub const LANG_PLACEHOLDER: &str = "[lang]";
/// Placeholder substituted with a task name (payload-style probes only).
pub const TASK_PLACEHOLDER: &str = "[task]";

/// Declarative description of one probe variant.
///
/// `templates` × `languages` (× `tasks`, when non-empty) defines the full
/// prompt list. Everything else is metadata the harness passes through to
/// reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSpec {
    pub name: String,
    pub description: String,
    pub goal: String,
    /// BCP 47 tag of the prompts' natural language.
    pub locale: String,
    pub tags: Vec<String>,
    pub recommended_detector: String,
    pub templates: Vec<String>,
    pub languages: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl ProbeSpec {
    /// Number of prompts `prompts()` will produce.
    pub fn prompt_count(&self) -> usize {
        self.templates.len() * self.languages.len() * self.tasks.len().max(1)
    }

    /// Expand the descriptor into its full prompt list.
    ///
    /// Order is template-major, then language, then task, matching
    /// declaration order, stable across runs. A placeholder surviving
    /// substitution is a construction defect and fails the whole expansion.
    pub fn prompts(&self) -> Result<Vec<String>> {
        let mut prompts = Vec::with_capacity(self.prompt_count());
        for template in &self.templates {
            for language in &self.languages {
                if self.tasks.is_empty() {
                    prompts.push(self.substitute(template, language, None)?);
                } else {
                    for task in &self.tasks {
                        prompts.push(self.substitute(template, language, Some(task))?);
                    }
                }
            }
        }
        Ok(prompts)
    }

    fn substitute(&self, template: &str, language: &str, task: Option<&str>) -> Result<String> {
        let mut prompt = template.replace(LANG_PLACEHOLDER, language);
        if let Some(task) = task {
            prompt = prompt.replace(TASK_PLACEHOLDER, task);
        }
        if prompt.contains(LANG_PLACEHOLDER) || prompt.contains(TASK_PLACEHOLDER) {
            return Err(ProbeError::Template {
                probe: self.name.clone(),
                message: format!("unsubstituted placeholder in '{prompt}'"),
            });
        }
        Ok(prompt)
    }
}
