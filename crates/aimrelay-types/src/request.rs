use serde_json::Value;
use thiserror::Error;

use crate::{Conversation, Message, Role};

/// Reasons an inbound chat payload is rejected before any upstream call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("field required: {0}")]
    MissingField(&'static str),

    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("messages[{index}]: {reason}")]
    InvalidMessage { index: usize, reason: String },

    #[error("field `model` must not be empty")]
    EmptyModel,
}

/// Normalized chat request: the conversation to forward and the target model
///
/// The model identifier is not checked against any provider's catalogue.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub conversation: Conversation,
    pub model: String,
}

impl ChatRequest {
    /// Parse and validate a raw request body
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;
        Self::from_value(value)
    }

    /// Validate a decoded `{messages, model}` payload
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let Value::Object(mut body) = value else {
            return Err(ValidationError::NotAnObject);
        };

        let conversation = match body.remove("messages") {
            None | Some(Value::Null) => return Err(ValidationError::MissingField("messages")),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| parse_message(index, item))
                .collect::<Result<Conversation, _>>()?,
            Some(_) => {
                return Err(ValidationError::InvalidField {
                    field: "messages",
                    expected: "an array of messages",
                })
            }
        };

        let model = match body.remove("model") {
            None | Some(Value::Null) => return Err(ValidationError::MissingField("model")),
            Some(Value::String(model)) if model.is_empty() => {
                return Err(ValidationError::EmptyModel)
            }
            Some(Value::String(model)) => model,
            Some(_) => {
                return Err(ValidationError::InvalidField {
                    field: "model",
                    expected: "a string",
                })
            }
        };

        Ok(Self { conversation, model })
    }
}

fn parse_message(index: usize, item: Value) -> Result<Message, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidMessage {
        index,
        reason: reason.to_string(),
    };

    let Value::Object(mut fields) = item else {
        return Err(invalid("message must be an object"));
    };

    let role = match fields.remove("role") {
        Some(Value::String(role)) => Role::from(role),
        Some(_) => return Err(invalid("`role` must be a string")),
        None => return Err(invalid("field required: role")),
    };
    let content = match fields.remove("content") {
        Some(Value::String(content)) => content,
        Some(_) => return Err(invalid("`content` must be a string")),
        None => return Err(invalid("field required: content")),
    };

    Ok(Message {
        role,
        content,
        extra: fields,
    })
}
