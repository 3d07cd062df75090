use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single role-tagged message of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(into)]
pub struct ContextMessage {
    pub role: Role,
    pub content: String,
}

impl ContextMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Body of a single-turn request to the completion service. Sent verbatim
/// once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub messages: Vec<ContextMessage>,
}

impl CompletionRequest {
    pub fn add_message(mut self, message: ContextMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn to_json(&self) -> crate::Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// The only part of the service reply this crate relies on. Any other field
/// the service sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub completion: Option<String>,
}

impl CompletionResponse {
    /// Returns the completion text when it is present and non-empty.
    pub fn into_text(self) -> Option<String> {
        self.completion.filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_wire_format() {
        let fixture = CompletionRequest::default()
            .add_message(ContextMessage::system("You are a farm planning assistant."))
            .add_message(ContextMessage::user("Plan maize."));

        let actual: serde_json::Value =
            serde_json::from_slice(&fixture.to_json().unwrap()).unwrap();

        let expected = json!({
            "messages": [
                {"role": "system", "content": "You are a farm planning assistant."},
                {"role": "user", "content": "Plan maize."}
            ]
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let fixture = r#"{"completion":"Rice demand is up.","usage":{"tokens":12}}"#;

        let actual = serde_json::from_str::<CompletionResponse>(fixture)
            .unwrap()
            .into_text();

        assert_eq!(actual, Some("Rice demand is up.".to_string()));
    }

    #[test]
    fn test_response_without_completion() {
        let actual = serde_json::from_str::<CompletionResponse>("{}")
            .unwrap()
            .into_text();

        assert_eq!(actual, None);
    }

    #[test]
    fn test_response_with_empty_completion() {
        let actual = serde_json::from_str::<CompletionResponse>(r#"{"completion":""}"#)
            .unwrap()
            .into_text();

        assert_eq!(actual, None);
    }
}
