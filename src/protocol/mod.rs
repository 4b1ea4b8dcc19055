//! AG-UI protocol types.
//!
//! This module contains the request body of an agent run, the chat message
//! model with its polymorphic `content` decoding, and the events an agent
//! streams back.

pub mod events;
pub mod input;
pub mod message;

pub use events::{AgUiEvent, Event};
pub use input::{RunAgentInput, Tool};
pub use message::{ContentKind, ContentPart, Message, MessageContent};

use serde::{Deserialize, Deserializer};

/// Decodes an explicit `null` as the field's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
