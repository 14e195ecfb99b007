//! Console output for resolved turns

use colored::Colorize;
use dispatch_application::ResolveTurnError;
use dispatch_domain::{AssistantReply, CatalogIssue, CompiledTools, Severity};
use serde_json::json;

/// Formats replies, failures and schemas for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a reply for humans
    pub fn format_reply(reply: &AssistantReply) -> String {
        let mut output = String::new();

        if let Some(text) = &reply.text {
            output.push_str(&format!("{} {}\n", "Assistant:".cyan().bold(), text));
        }

        if let Some(call) = &reply.function_call {
            output.push_str(&format!(
                "\n{} {}\n",
                "Function call:".yellow().bold(),
                call.name.bold()
            ));
            if call.arguments.is_empty() {
                output.push_str(&format!("  {}\n", "(no arguments)".dimmed()));
            }
            for (key, value) in &call.arguments {
                output.push_str(&format!("  {} = {}\n", key.green(), value));
            }
        }

        output
    }

    /// Format a reply as JSON
    pub fn format_reply_json(reply: &AssistantReply) -> String {
        serde_json::to_string_pretty(&json!({ "reply": reply }))
            .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a failure for humans
    pub fn format_failure(error: &ResolveTurnError) -> String {
        format!(
            "{} [{}] {}\n",
            "Error:".red().bold(),
            error.kind(),
            error
        )
    }

    /// Format a failure as JSON
    pub fn format_failure_json(error: &ResolveTurnError) -> String {
        serde_json::to_string_pretty(&json!({
            "error": {
                "kind": error.kind().as_str(),
                "message": error.to_string(),
            }
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the compiled tools. Always JSON; `null` schema when absent.
    pub fn format_schema(compiled: &CompiledTools) -> String {
        let unmapped: Vec<_> = compiled
            .unmapped
            .iter()
            .map(|u| {
                json!({
                    "function": u.function,
                    "parameter": u.parameter,
                    "type": u.raw_type,
                })
            })
            .collect();

        serde_json::to_string_pretty(&json!({
            "schema": compiled.schema,
            "unmapped": unmapped,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    /// Format catalog validation issues, errors first
    pub fn format_issues(issues: &[CatalogIssue]) -> String {
        let mut sorted: Vec<_> = issues.iter().collect();
        sorted.sort_by_key(|i| !i.is_error());

        let mut output = String::new();
        for issue in sorted {
            let label = match issue.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow().bold(),
            };
            output.push_str(&format!("{}: {}\n", label, issue.message));
        }
        output
    }
}
