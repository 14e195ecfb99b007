//! Assistant identity from TOML (`[assistant]` section)

use dispatch_domain::AssistantContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssistantConfig {
    pub name: String,
    pub business: String,
    pub description: Option<String>,
}

impl Default for FileAssistantConfig {
    fn default() -> Self {
        Self {
            name: "Assistant".to_string(),
            business: "the business".to_string(),
            description: None,
        }
    }
}

impl FileAssistantConfig {
    pub fn to_context(&self) -> AssistantContext {
        let context = AssistantContext::new(&self.name, &self.business);
        match &self.description {
            Some(description) => context.with_description(description),
            None => context,
        }
    }
}
