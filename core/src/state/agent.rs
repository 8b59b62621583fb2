// Agent model
// A named, linkable target shown as one row of the panel

use serde::{Deserialize, Serialize};

/// A selectable agent link
///
/// Agents are plain values: the controller never mutates them and hands out
/// clones whenever one leaves its ownership. Identity is positional because
/// `id` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Optional stable identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display title
    pub title: String,
    /// Target URL opened when the agent is selected
    pub url: String,
    /// Avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Short description shown under the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Agent {
    /// Create an agent with the two required fields
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            url: url.into(),
            avatar: None,
            description: None,
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the avatar image URL
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_deserialize_required_only() {
        let agent: Agent =
            serde_json::from_str(r#"{"title":"Bot A","url":"https://x"}"#).unwrap();
        assert_eq!(agent, Agent::new("Bot A", "https://x"));
    }

    #[test]
    fn test_agent_missing_url_is_rejected() {
        let result: Result<Agent, _> = serde_json::from_str(r#"{"title":"Bot A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_agent_serialize_omits_absent_fields() {
        let agent = Agent::new("Bot A", "https://x").with_description("helps");
        let json = serde_json::to_value(&agent).unwrap();

        assert_eq!(json["description"], "helps");
        assert!(json.get("avatar").is_none());
        assert!(json.get("id").is_none());
    }
}
