//! Protocol events produced by an event source.
//!
//! The handler treats events as opaque: all it needs is their wire JSON.
//! [`AgUiEvent`] covers the lifecycle and text-message events most agents
//! emit, and any [`serde_json::Value`] can be sent as-is.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A unit of output from an agent run.
pub trait Event {
    /// Produces the wire-format JSON encoding of this event.
    fn to_json(&self) -> Result<Value>;
}

impl Event for Value {
    fn to_json(&self) -> Result<Value> {
        Ok(self.clone())
    }
}

impl<E: Event + ?Sized> Event for Box<E> {
    fn to_json(&self) -> Result<Value> {
        (**self).to_json()
    }
}

/// Standard AG-UI events, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum AgUiEvent {
    RunStarted {
        thread_id: String,
        run_id: String,
    },
    RunFinished {
        thread_id: String,
        run_id: String,
    },
    RunError {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
    TextMessageStart {
        message_id: String,
        role: String,
    },
    TextMessageContent {
        message_id: String,
        delta: String,
    },
    TextMessageEnd {
        message_id: String,
    },
    Custom {
        name: String,
        value: Value,
    },
}

impl AgUiEvent {
    pub fn run_started(thread_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self::RunStarted {
            thread_id: thread_id.into(),
            run_id: run_id.into(),
        }
    }

    pub fn run_finished(thread_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self::RunFinished {
            thread_id: thread_id.into(),
            run_id: run_id.into(),
        }
    }

    pub fn run_error(message: impl Into<String>) -> Self {
        Self::RunError {
            message: message.into(),
            code: None,
        }
    }

    /// The wire name of this event's type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::RunStarted { .. } => "RUN_STARTED",
            Self::RunFinished { .. } => "RUN_FINISHED",
            Self::RunError { .. } => "RUN_ERROR",
            Self::TextMessageStart { .. } => "TEXT_MESSAGE_START",
            Self::TextMessageContent { .. } => "TEXT_MESSAGE_CONTENT",
            Self::TextMessageEnd { .. } => "TEXT_MESSAGE_END",
            Self::Custom { .. } => "CUSTOM",
        }
    }
}

impl Event for AgUiEvent {
    fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
