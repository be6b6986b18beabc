use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiMessage {
    pub role: String,
    pub content: String,
}

impl AiMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.2,
            max_tokens: 1024,
        }
    }
}

/// Outcome of one run over a sheet.
///
/// `plan` is whatever JSON object could be pulled out of the reply — it is
/// not validated beyond being parseable, and it is only ever displayed,
/// never executed.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub reply: String,
    pub plan: Option<Value>,
}

impl AnalysisReport {
    /// Pretty-printed plan when one was extracted, else the raw reply.
    pub fn display_text(&self) -> String {
        match &self.plan {
            Some(plan) => {
                serde_json::to_string_pretty(plan).unwrap_or_else(|_| self.reply.clone())
            }
            None => self.reply.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_prefers_the_pretty_printed_plan() {
        let report = AnalysisReport {
            reply: "```json\n{\"plan\":\"x\"}\n```".to_string(),
            plan: Some(json!({"plan": "x"})),
        };
        assert_eq!(report.display_text(), "{\n  \"plan\": \"x\"\n}");
    }

    #[test]
    fn display_falls_back_to_the_raw_reply() {
        let report = AnalysisReport {
            reply: "I could not produce a plan.".to_string(),
            plan: None,
        };
        assert_eq!(report.display_text(), "I could not produce a plan.");
    }
}
