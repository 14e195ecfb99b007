//! System instruction sent with every turn

use crate::catalog::entities::{Task, find_by_function, non_blank};
use crate::conversation::turn::{ConversationTurn, last_executed_function};
use serde::{Deserialize, Serialize};

/// Who the assistant is and whom it works for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantContext {
    pub assistant_name: String,
    pub business_name: String,
    #[serde(default)]
    pub assistant_description: Option<String>,
}

impl AssistantContext {
    pub fn new(assistant_name: impl Into<String>, business_name: impl Into<String>) -> Self {
        Self {
            assistant_name: assistant_name.into(),
            business_name: business_name.into(),
            assistant_description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.assistant_description = Some(description.into());
        self
    }
}

/// Builder for the system instruction text
pub struct SystemInstruction;

impl SystemInstruction {
    /// Full instruction for one turn: identity, tool-usage rules and, when
    /// the last executed function's task carries one, its follow-up
    /// instruction.
    pub fn build(context: &AssistantContext, tasks: &[Task], history: &[ConversationTurn]) -> String {
        let mut instruction = Self::base(context);
        if let Some(section) = Self::follow_up(tasks, history) {
            instruction.push_str("\n\n");
            instruction.push_str(&section);
        }
        instruction
    }

    /// Identity line followed by the tool-usage rules.
    pub fn base(context: &AssistantContext) -> String {
        let mut identity = format!(
            "You are {}, a friendly and efficient virtual assistant for {}. ",
            context.assistant_name, context.business_name
        );
        if let Some(description) = non_blank(context.assistant_description.as_deref()) {
            identity.push_str(description.trim_end_matches('.'));
            identity.push_str(". ");
        }
        identity.push_str("Your goal is to help the user.\n");
        identity.push_str(Self::tool_rules());
        identity
    }

    fn tool_rules() -> &'static str {
        r#"Evaluate the user's request against the available tools (functions):
* IF the request clearly matches a tool's description AND you have (or have already asked the user for) every parameter that tool needs:
    * You MUST use the tool. Your whole reply must be the structured `functionCall` object.
    * Do not add explanations, confirmations or conversation before or after it.
    * Do not write the `functionCall` as a JSON string inside the text of the reply, and do not use Markdown code blocks.
* IF you asked the user to confirm an action of a tool (e.g. "Do you confirm X?") and the user agrees:
    * Call the SAME tool again.
    * Include the matching confirmation parameter (e.g. `confirmacion_usuario_reagendar: true`) and the key identifiers being processed (e.g. `cita_id_original`).
* WHEN a tool needs several pieces of data over multiple turns:
    * Call the tool with what you have; the backend will report what is missing.
    * On the next turn, call the SAME tool again with both the new data and the key data established earlier.
* IN ANY OTHER CASE (general question, no matching tool, unsure which tool, or parameters still missing after asking):
    * Answer with a helpful conversational text message and do not call a function. If you cannot help, explain why and say a human agent will be notified.
Always keep a friendly and efficient tone."#
    }

    /// Extra section for the function that just ran, if its task has one.
    pub fn follow_up(tasks: &[Task], history: &[ConversationTurn]) -> Option<String> {
        let function = last_executed_function(history)?;
        let task = find_by_function(tasks, function)?;
        let extra = non_blank(task.instruction.as_deref())?;
        Some(format!(
            r#"Additional instructions for your current reply (based on the function '{}' that just completed and whose result has already been shown to the user):
{}
Take this instruction into account when writing your text reply."#,
            function,
            extra.trim()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entities::AutomationFunction;

    fn context() -> AssistantContext {
        AssistantContext::new("Lía", "Clínica Sonrisa")
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("t1", "Agendar")
                .with_function(AutomationFunction::new("agendarCita"))
                .with_instruction("Ofrece enviar un recordatorio por WhatsApp."),
            Task::new("t2", "Horarios").with_function(AutomationFunction::new("listarHorarios")),
        ]
    }

    #[test]
    fn test_base_instruction_identity() {
        let text = SystemInstruction::base(&context().with_description("Especialista en citas."));
        assert!(text.starts_with(
            "You are Lía, a friendly and efficient virtual assistant for Clínica Sonrisa. Especialista en citas. "
        ));
        assert!(text.contains("functionCall"));
    }

    #[test]
    fn test_blank_description_is_skipped() {
        let text = SystemInstruction::base(&context().with_description("   "));
        assert!(text.contains("Clínica Sonrisa. Your goal"));
    }

    #[test]
    fn test_follow_up_injected_for_last_function() {
        let history = vec![
            ConversationTurn::user("Agenda mañana a las 10"),
            ConversationTurn::function_result("agendarCita", "Cita creada"),
        ];
        let text = SystemInstruction::build(&context(), &tasks(), &history);
        assert!(text.contains("the function 'agendarCita' that just completed"));
        assert!(text.contains("Ofrece enviar un recordatorio por WhatsApp."));
    }

    #[test]
    fn test_follow_up_uses_most_recent_function_only() {
        let history = vec![
            ConversationTurn::function_result("agendarCita", "Cita creada"),
            ConversationTurn::function_result("listarHorarios", "10:00"),
        ];
        assert!(SystemInstruction::follow_up(&tasks(), &history).is_none());
    }

    #[test]
    fn test_no_follow_up_without_function_turn() {
        let history = vec![ConversationTurn::user("Hola")];
        let text = SystemInstruction::build(&context(), &tasks(), &history);
        assert_eq!(text, SystemInstruction::base(&context()));
    }
}
