//! Response types returned by [`ChatModel`](crate::llm::ChatModel) implementations.
//!
//! A [`ChatResponse`] wraps the assistant [`Message`](crate::Message) along with
//! token usage and, for thinking models configured with
//! [`ReasoningMode::Separated`](crate::llm::ReasoningMode::Separated), the
//! extracted reasoning trace.

use crate::llm_stream::MessageChunkStream;
use crate::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The result of a non-streaming chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The assistant message produced by the model.
    pub message: Message,

    /// Token usage for this request, when the provider reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,

    /// Extracted reasoning/thinking content, present only when the request
    /// used [`ReasoningMode::Separated`](crate::llm::ReasoningMode::Separated)
    /// and the provider supports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<ReasoningContent>,

    /// Provider-specific metadata (model id, finish reason, request id, ...).
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Token accounting for a single chat completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    /// Tokens consumed by the prompt (messages, tools, system prompt).
    pub input_tokens: u64,

    /// Tokens produced in the visible response.
    pub output_tokens: u64,

    /// Tokens spent on internal reasoning, if the provider bills for it
    /// separately from `output_tokens`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u64>,

    /// Total tokens billed for the request.
    pub total_tokens: u64,
}

/// The model's extracted thinking/reasoning trace.
///
/// Only populated when [`ReasoningMode::Separated`](crate::llm::ReasoningMode::Separated)
/// was requested and the provider exposes a separate reasoning channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningContent {
    /// The reasoning text itself.
    pub content: String,

    /// Tokens spent producing the reasoning trace, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
}

/// The result of a streaming chat completion: a live stream of message
/// chunks plus whatever usage and reasoning land once the stream closes.
pub struct ChatStreamResponse {
    /// Stream of incremental message chunks, terminated by one chunk with
    /// `is_final: true`.
    pub chunks: MessageChunkStream,

    /// Usage totals, available only after the stream has been fully drained
    /// (providers typically emit this on the final chunk's metadata).
    pub usage: Option<UsageMetadata>,
}

impl std::fmt::Debug for ChatStreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStreamResponse")
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MessageContent, MessageRole};

    #[test]
    fn chat_response_serializes_without_optional_fields() {
        let response = ChatResponse {
            message: Message {
                id: None,
                role: MessageRole::Assistant,
                content: MessageContent::Text("hi".into()),
                name: None,
                tool_calls: None,
                tool_call_id: None,
                metadata: None,
            },
            usage: None,
            reasoning: None,
            metadata: HashMap::new(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("usage").is_none());
        assert!(json.get("reasoning").is_none());
    }

    #[test]
    fn usage_metadata_round_trips() {
        let usage = UsageMetadata {
            input_tokens: 10,
            output_tokens: 5,
            reasoning_tokens: Some(2),
            total_tokens: 15,
        };
        let json = serde_json::to_string(&usage).unwrap();
        let parsed: UsageMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, usage);
    }
}
