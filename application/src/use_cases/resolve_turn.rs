//! Resolve Turn use case.
//!
//! Runs one assistant turn: compiles the task catalog into tools, builds the
//! system instruction, sends a single request through the [`LlmGateway`]
//! and resolves the response into an [`AssistantReply`].
//!
//! There is no retry and no tool loop. Executing the returned function call
//! is the caller's business.

use crate::config::ResolverConfig;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, GenerateRequest, LlmGateway};
use dispatch_domain::util::preview;
use dispatch_domain::{
    AssistantContext, AssistantReply, ConversationTurn, DomainError, FinishReason, ModelResponse,
    RecoveryStrategy, ReplyOrigin, SystemInstruction, Task, ToolSchemaCompiler, default_strategies,
    resolve_response,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Errors that can occur while resolving a turn.
#[derive(Error, Debug)]
pub enum ResolveTurnError {
    #[error("Provider is not configured: {0}")]
    ConfigurationMissing(String),

    #[error("Response blocked by the provider's safety filter")]
    SafetyBlocked,

    #[error("Model returned no usable text or function call (finish reason: {finish_reason})")]
    EmptyOrUnparseableResponse { finish_reason: String },

    #[error("Provider request failed: {0}")]
    ProviderTransport(String),

    #[error("Provider did not answer within {0:?}")]
    DeadlineExceeded(Duration),

    #[error("Turn cancelled")]
    Cancelled,
}

/// Failure category, for callers that route on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    ConfigurationMissing,
    SafetyBlocked,
    EmptyOrUnparseableResponse,
    ProviderTransport,
    DeadlineExceeded,
    Cancelled,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ConfigurationMissing => "configuration_missing",
            FailureKind::SafetyBlocked => "safety_blocked",
            FailureKind::EmptyOrUnparseableResponse => "empty_or_unparseable_response",
            FailureKind::ProviderTransport => "provider_transport",
            FailureKind::DeadlineExceeded => "deadline_exceeded",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ResolveTurnError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ResolveTurnError::ConfigurationMissing(_) => FailureKind::ConfigurationMissing,
            ResolveTurnError::SafetyBlocked => FailureKind::SafetyBlocked,
            ResolveTurnError::EmptyOrUnparseableResponse { .. } => {
                FailureKind::EmptyOrUnparseableResponse
            }
            ResolveTurnError::ProviderTransport(_) => FailureKind::ProviderTransport,
            ResolveTurnError::DeadlineExceeded(_) => FailureKind::DeadlineExceeded,
            ResolveTurnError::Cancelled => FailureKind::Cancelled,
        }
    }
}

impl From<DomainError> for ResolveTurnError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::SafetyBlocked => ResolveTurnError::SafetyBlocked,
            DomainError::EmptyOrUnparseableResponse { finish_reason } => {
                ResolveTurnError::EmptyOrUnparseableResponse { finish_reason }
            }
        }
    }
}

impl From<GatewayError> for ResolveTurnError {
    fn from(e: GatewayError) -> Self {
        if e.is_configuration() {
            ResolveTurnError::ConfigurationMissing(e.to_string())
        } else {
            ResolveTurnError::ProviderTransport(e.to_string())
        }
    }
}

/// Input for the [`ResolveTurnUseCase`].
#[derive(Debug, Clone)]
pub struct ResolveTurnInput {
    pub context: AssistantContext,
    /// The business's task catalog for this call.
    pub tasks: Vec<Task>,
    /// Prior turns, oldest first. Never modified.
    pub history: Vec<ConversationTurn>,
    /// The new user message.
    pub message: String,
}

impl ResolveTurnInput {
    pub fn new(context: AssistantContext, message: impl Into<String>) -> Self {
        Self {
            context,
            tasks: Vec::new(),
            history: Vec::new(),
            message: message.into(),
        }
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Use case for resolving one assistant turn.
///
/// 1. Fail fast if the gateway is not configured
/// 2. Compile tools and build the system instruction
/// 3. Send one request, bounded by the deadline and cancellation token
/// 4. Resolve the response (structured call, safety, recovery, text)
#[derive(Clone)]
pub struct ResolveTurnUseCase {
    gateway: Arc<dyn LlmGateway>,
    config: ResolverConfig,
    strategies: Arc<Vec<Box<dyn RecoveryStrategy>>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ResolveTurnUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>, config: ResolverConfig) -> Self {
        Self {
            gateway,
            config,
            strategies: Arc::new(default_strategies()),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Replace the recovery strategies. An empty list disables recovery.
    pub fn with_recovery_strategies(mut self, strategies: Vec<Box<dyn RecoveryStrategy>>) -> Self {
        self.strategies = Arc::new(strategies);
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a turn with no external cancellation.
    pub async fn execute(&self, input: ResolveTurnInput) -> Result<AssistantReply, ResolveTurnError> {
        self.execute_with_cancellation(input, &CancellationToken::new())
            .await
    }

    /// Resolve a turn, giving up as soon as `cancel` fires.
    pub async fn execute_with_cancellation(
        &self,
        input: ResolveTurnInput,
        cancel: &CancellationToken,
    ) -> Result<AssistantReply, ResolveTurnError> {
        info!(
            "Resolving turn via {}: {}",
            self.gateway.name(),
            preview(&input.message, 100)
        );

        if let Err(e) = self.gateway.ensure_configured() {
            error!("Gateway {} is not configured: {}", self.gateway.name(), e);
            return Err(self.fail(ResolveTurnError::ConfigurationMissing(e.to_string())));
        }

        let request = self.build_request(input);
        debug!(
            "Request: model {}, {} functions, {} history turns",
            request.model,
            request.tools.as_ref().map_or(0, |t| t.len()),
            request.history.len()
        );
        self.conversation_logger.log(ConversationEvent::new(
            "turn_request",
            serde_json::to_value(&request).unwrap_or(serde_json::Value::Null),
        ));

        let response = self
            .call_gateway(&request, cancel)
            .await
            .map_err(|e| self.fail(e))?;

        self.resolve(&response).map_err(|e| self.fail(e))
    }

    fn build_request(&self, input: ResolveTurnInput) -> GenerateRequest {
        let compiled = ToolSchemaCompiler::new(self.config.required_policy).compile(&input.tasks);
        for unmapped in &compiled.unmapped {
            warn!(
                "Parameter type not mapped explicitly: '{}' ({}.{}), using string",
                unmapped.raw_type, unmapped.function, unmapped.parameter
            );
        }

        let system_instruction =
            SystemInstruction::build(&input.context, &input.tasks, &input.history);

        GenerateRequest {
            model: self.config.model.clone(),
            system_instruction,
            tools: compiled.schema,
            history: input.history,
            message: input.message,
            generation: self.config.generation.clone(),
            safety: self.config.safety.clone(),
        }
    }

    async fn call_gateway(
        &self,
        request: &GenerateRequest,
        cancel: &CancellationToken,
    ) -> Result<ModelResponse, ResolveTurnError> {
        let deadline = self.config.deadline;
        let bounded = async {
            match deadline {
                Some(limit) => match tokio::time::timeout(limit, self.gateway.generate(request)).await
                {
                    Ok(result) => result.map_err(ResolveTurnError::from),
                    Err(_) => Err(ResolveTurnError::DeadlineExceeded(limit)),
                },
                None => self
                    .gateway
                    .generate(request)
                    .await
                    .map_err(ResolveTurnError::from),
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ResolveTurnError::Cancelled),
            result = bounded => result,
        }
    }

    fn resolve(&self, response: &ModelResponse) -> Result<AssistantReply, ResolveTurnError> {
        if let Some(reason) = &response.finish_reason
            && !reason.is_normal()
            && *reason != FinishReason::Safety
        {
            warn!("Unexpected finish reason: {}", reason);
        }

        let resolution = resolve_response(
            response,
            self.strategies.as_slice(),
            &self.config.acknowledgments,
        )?;

        let reply = resolution.reply;
        match (&resolution.origin, &reply.function_call) {
            (ReplyOrigin::Structured, Some(call)) => {
                info!("Function call: {} ({} args)", call.name, call.arguments.len());
            }
            (ReplyOrigin::Recovered { strategy }, Some(call)) => {
                warn!(
                    "Recovered function call '{}' from text via {}",
                    call.name, strategy
                );
            }
            _ => debug!("Text reply: {}", preview(reply.text.as_deref().unwrap_or(""), 100)),
        }

        self.conversation_logger.log(ConversationEvent::new(
            "turn_reply",
            serde_json::json!({
                "origin": origin_label(&resolution.origin),
                "finish_reason": response.finish_reason.as_ref().map(ToString::to_string),
                "reply": reply,
            }),
        ));

        Ok(reply)
    }

    /// Log a failure and hand it back.
    fn fail(&self, e: ResolveTurnError) -> ResolveTurnError {
        match &e {
            ResolveTurnError::SafetyBlocked => error!("Turn blocked by safety filter"),
            ResolveTurnError::Cancelled => info!("Turn cancelled"),
            other => warn!("Turn failed: {}", other),
        }
        self.conversation_logger.log(ConversationEvent::new(
            "turn_failed",
            serde_json::json!({
                "kind": e.kind().as_str(),
                "detail": e.to_string(),
            }),
        ));
        e
    }
}

fn origin_label(origin: &ReplyOrigin) -> &'static str {
    match origin {
        ReplyOrigin::Structured => "structured",
        ReplyOrigin::Recovered { .. } => "recovered",
        ReplyOrigin::Text => "text",
    }
}
