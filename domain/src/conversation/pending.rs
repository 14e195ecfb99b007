//! Explicit tracking of a function call being assembled across turns.
//!
//! The model gathers parameters over several turns and may re-invoke the
//! same function once the user confirms. Callers that want this state
//! outside the replayed history keep a [`PendingCall`] next to it.

use crate::dispatch::reply::{AssistantReply, FunctionCall};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCall {
    pub function_name: String,
    #[serde(default)]
    pub collected_args: Map<String, Value>,
}

impl PendingCall {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            collected_args: Map::new(),
        }
    }

    pub fn from_call(call: &FunctionCall) -> Self {
        Self {
            function_name: call.name.clone(),
            collected_args: call.arguments.clone(),
        }
    }

    /// Merge a call's arguments in. Later values win.
    ///
    /// Returns `false` and leaves `self` untouched if `call` targets a
    /// different function.
    pub fn merge(&mut self, call: &FunctionCall) -> bool {
        if call.name != self.function_name {
            return false;
        }
        for (key, value) in &call.arguments {
            self.collected_args.insert(key.clone(), value.clone());
        }
        true
    }

    /// Update the tracker from a resolved reply.
    ///
    /// Starts tracking on the first call, merges when the same function is
    /// re-invoked and switches when a different one is called. Replies
    /// without a call leave the tracker as is.
    pub fn observe(pending: &mut Option<PendingCall>, reply: &AssistantReply) {
        let Some(call) = reply.function_call.as_ref() else {
            return;
        };
        if let Some(current) = pending.as_mut()
            && current.merge(call)
        {
            return;
        }
        *pending = Some(PendingCall::from_call(call));
    }

    /// The accumulated call, ready to hand to the business layer.
    pub fn to_call(&self) -> FunctionCall {
        FunctionCall::with_arguments(self.function_name.clone(), self.collected_args.clone())
    }

    /// Finish tracking, returning the accumulated call.
    pub fn complete(pending: &mut Option<PendingCall>) -> Option<FunctionCall> {
        pending.take().map(|p| p.to_call())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_with(call: FunctionCall) -> AssistantReply {
        AssistantReply::call("ok", call)
    }

    #[test]
    fn test_observe_starts_and_merges() {
        let mut pending = None;
        PendingCall::observe(
            &mut pending,
            &reply_with(FunctionCall::new("reagendarCita").with_arg("cita_id_original", "c-1")),
        );
        PendingCall::observe(
            &mut pending,
            &reply_with(
                FunctionCall::new("reagendarCita")
                    .with_arg("nueva_fecha", "2025-02-01")
                    .with_arg("confirmacion_usuario_reagendar", true),
            ),
        );

        let current = pending.as_ref().unwrap();
        assert_eq!(current.function_name, "reagendarCita");
        assert_eq!(current.collected_args.len(), 3);
        assert_eq!(current.collected_args["confirmacion_usuario_reagendar"], true);
    }

    #[test]
    fn test_later_values_win() {
        let mut pending = PendingCall::new("agendarCita");
        pending.merge(&FunctionCall::new("agendarCita").with_arg("hora", "10:00"));
        pending.merge(&FunctionCall::new("agendarCita").with_arg("hora", "11:00"));
        assert_eq!(pending.to_call().get_string("hora"), Some("11:00"));
    }

    #[test]
    fn test_different_function_replaces_tracker() {
        let mut pending = Some(PendingCall::from_call(
            &FunctionCall::new("agendarCita").with_arg("hora", "10:00"),
        ));
        PendingCall::observe(&mut pending, &reply_with(FunctionCall::new("cancelarCita")));

        let current = pending.unwrap();
        assert_eq!(current.function_name, "cancelarCita");
        assert!(current.collected_args.is_empty());
    }

    #[test]
    fn test_text_reply_leaves_tracker() {
        let mut pending = Some(PendingCall::new("agendarCita"));
        PendingCall::observe(&mut pending, &AssistantReply::text("¿A qué hora?"));
        assert_eq!(pending.unwrap().function_name, "agendarCita");
    }

    #[test]
    fn test_complete_clears() {
        let mut pending = Some(PendingCall::from_call(
            &FunctionCall::new("agendarCita").with_arg("fecha", "2025-01-01"),
        ));
        let call = PendingCall::complete(&mut pending).unwrap();
        assert_eq!(call.get_string("fecha"), Some("2025-01-01"));
        assert!(pending.is_none());
        assert!(PendingCall::complete(&mut pending).is_none());
    }
}
