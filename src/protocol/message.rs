//! Chat messages and their content parts.
//!
//! Producers may send a message's `content` either as a plain string or as a
//! structured array of parts. Both shapes are normalized on decode, so a
//! [`Message`] always holds an ordered list of [`ContentPart`]s.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use crate::protocol::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;

const CONTENT_SHAPE_ERROR: &str = "content must be either a string or an array of content parts";

/// Type tag of a text part.
pub const TEXT_PART: &str = "text";
/// Type tag of an image part.
pub const IMAGE_PART: &str = "image";

/// A chat message in the run history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message identifier
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Free-form role (`user`, `assistant`, `system`, `tool`, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    /// Ordered content parts; empty when the producer sent none
    #[serde(default, deserialize_with = "deserialize_content")]
    pub content: Vec<ContentPart>,
    /// Optional author name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Message {
    /// Creates a message holding a single text part.
    pub fn text(id: impl Into<String>, role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            content: vec![ContentPart::text(text)],
            ..Self::default()
        }
    }

    /// Concatenates the text of every text part, in order.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter(|part| part.kind() == ContentKind::Text)
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}

/// The kind of a [`ContentPart`], derived from its type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Image,
    /// Any type tag this crate does not know about
    Other,
}

/// One atomic unit of message content.
///
/// Which payload fields are populated is left to the producer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPart {
    /// Type tag (`text`, `image`, ...)
    #[serde(rename = "type")]
    pub part_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Inline payload, typically base64
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ContentPart {
    /// Creates a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            part_type: TEXT_PART.to_string(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Creates an image part referencing a URL.
    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            part_type: IMAGE_PART.to_string(),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Creates an image part carrying inline data.
    pub fn image_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            part_type: IMAGE_PART.to_string(),
            mime_type: Some(mime_type.into()),
            data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self.part_type.as_str() {
            TEXT_PART => ContentKind::Text,
            IMAGE_PART => ContentKind::Image,
            _ => ContentKind::Other,
        }
    }
}

/// The shapes a `content` field may take on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    /// `null`
    Empty,
    /// A plain string
    Text(String),
    /// An array of structured parts
    Parts(Vec<ContentPart>),
}

impl From<MessageContent> for Vec<ContentPart> {
    fn from(content: MessageContent) -> Self {
        match content {
            MessageContent::Empty => Vec::new(),
            MessageContent::Text(text) => vec![ContentPart::text(text)],
            MessageContent::Parts(parts) => parts,
        }
    }
}

impl<'de> Deserialize<'de> for MessageContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MessageContentVisitor)
    }
}

struct MessageContentVisitor;

impl<'de> Visitor<'de> for MessageContentVisitor {
    type Value = MessageContent;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(CONTENT_SHAPE_ERROR)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MessageContent::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(MessageContent::Empty)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(MessageContent::Text(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(MessageContent::Text(value))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut parts = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        loop {
            match seq.next_element::<ContentPart>() {
                Ok(Some(part)) => parts.push(part),
                Ok(None) => break,
                Err(e) => {
                    return Err(de::Error::custom(format!("{CONTENT_SHAPE_ERROR}: {e}")));
                }
            }
        }
        Ok(MessageContent::Parts(parts))
    }
}

fn deserialize_content<'de, D>(deserializer: D) -> Result<Vec<ContentPart>, D::Error>
where
    D: Deserializer<'de>,
{
    MessageContent::deserialize(deserializer).map(Vec::from)
}
