use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Gender, Product};

/// Request body for `POST /chat-product-search`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_feedback: Option<String>,
}

/// Response body for `POST /chat-product-search`
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub ai_response: String,
    pub products: Vec<Product>,
    pub conversation_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_data: Option<SearchIntent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Shopping intent the model extracts from a chat message
///
/// Every field is optional in the model's output; the model also tends to
/// answer with a bare string where a list is expected, so lists accept both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchIntent {
    #[serde(default, deserialize_with = "lenient_gender")]
    pub gender: Gender,
    #[serde(default = "default_product_type")]
    pub product_type: String,
    #[serde(default, deserialize_with = "string_or_list")]
    pub style_preferences: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub color_preferences: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub brand_preferences: Vec<String>,
    #[serde(default)]
    pub search_keywords: String,
}

fn default_product_type() -> String {
    "t-shirt".to_string()
}

impl SearchIntent {
    /// Keywords to search with, falling back to the raw message
    pub fn search_query(&self, message: &str) -> String {
        if self.search_keywords.trim().is_empty() {
            message.trim().to_string()
        } else {
            self.search_keywords.trim().to_string()
        }
    }

    /// Brand preferences with "any" and blanks removed
    pub fn preferred_brands(&self) -> Vec<&str> {
        self.brand_preferences
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty() && !b.eq_ignore_ascii_case("any"))
            .collect()
    }
}

fn lenient_gender<'de, D>(deserializer: D) -> Result<Gender, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(Gender::parse).unwrap_or_default())
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}
