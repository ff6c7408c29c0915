use serde::{Deserialize, Serialize};

/// The author of a piece of conversation content.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person at the terminal.
    User,
    /// Text produced by the model.
    Model,
}

/// A single part of a content entry.
///
/// Only text parts are produced by this crate.  Parts the model marks as
/// thoughts are kept on the wire type so they can be skipped when the reply
/// is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// The text of this part.
    #[serde(default)]
    pub text: String,

    /// True when the model flags this part as internal reasoning.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub thought: bool,
}

impl Part {
    /// Create a plain text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            thought: false,
        }
    }
}

/// One entry in the conversation: a role and the parts it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Who produced the content.  The API omits this on some responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// The parts making up the content.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a content entry from a role and a single text part.
    pub fn new_with_text(text: impl Into<String>, role: Role) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part::text(text)],
        }
    }

    /// Shorthand for a user entry.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new_with_text(text, Role::User)
    }

    /// Shorthand for a model entry.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new_with_text(text, Role::Model)
    }

    /// The concatenated text of every non-thought part, or `None` if there is none.
    pub fn text(&self) -> Option<String> {
        let mut out = String::new();
        let mut found = false;
        for part in self.parts.iter().filter(|p| !p.thought) {
            out.push_str(&part.text);
            found = true;
        }
        if found { Some(out) } else { None }
    }
}
