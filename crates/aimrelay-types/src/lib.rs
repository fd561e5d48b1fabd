//! Core types shared by the aimrelay crates
//!
//! Messages and conversations, the normalized chat request, search results and
//! the single reply shape every provider is reduced to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod request;

pub use request::{ChatRequest, ValidationError};

// ============================================================================
// Message Types
// ============================================================================

/// Author of a message in a conversation
///
/// Unknown role strings are kept as `Other` and forwarded untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(name) => name,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "system" => Role::System,
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Role::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message structure for chat API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Any other fields the client sent with the message (e.g. `name`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            extra: Map::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Chronologically ordered message history
pub type Conversation = Vec<Message>;

// ============================================================================
// Search Types
// ============================================================================

pub const NO_TITLE: &str = "No title";
pub const NO_SNIPPET: &str = "No description available";

/// A single web search hit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl SearchResult {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(NO_TITLE)
    }

    pub fn link(&self) -> &str {
        self.link.as_deref().unwrap_or("")
    }

    pub fn snippet(&self) -> &str {
        self.snippet.as_deref().unwrap_or(NO_SNIPPET)
    }
}

// ============================================================================
// Reply Types
// ============================================================================

/// Assistant reply, normalized across providers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderReply {
    pub text: String,
}

impl ProviderReply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
