use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{ChatMessage, Gender, Product, Role};

/// Everything remembered about one chat session
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    pub messages: Vec<ChatMessage>,
    pub detected_gender: Option<Gender>,
    pub detected_style: Vec<String>,
    pub feedback: Vec<String>,
    pub searched_products: Vec<Product>,
}

/// In-process conversation memory
///
/// Sessions live for the life of the process; nothing is evicted or persisted.
#[derive(Clone, Default)]
pub struct ConversationStore {
    inner: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh 8-character session id
    pub fn new_id() -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        id
    }

    /// Returns the requested id, or a new one, making sure the session exists
    pub async fn resolve(&self, requested: Option<&str>) -> String {
        let id = requested
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(Self::new_id);

        let mut inner = self.inner.write().await;
        if !inner.contains_key(&id) {
            tracing::debug!(conversation_id = %id, "Starting conversation");
            inner.insert(id.clone(), Conversation::default());
        }
        id
    }

    pub async fn push_message(&self, id: &str, role: Role, content: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner
            .entry(id.to_string())
            .or_default()
            .messages
            .push(ChatMessage::new(role, content));
    }

    /// The last `n` messages, oldest first
    pub async fn recent_messages(&self, id: &str, n: usize) -> Vec<ChatMessage> {
        let inner = self.inner.read().await;
        inner
            .get(id)
            .map(|conversation| {
                let start = conversation.messages.len().saturating_sub(n);
                conversation.messages[start..].to_vec()
            })
            .unwrap_or_default()
    }

    pub async fn set_detected(&self, id: &str, gender: Gender, styles: Vec<String>) {
        let mut inner = self.inner.write().await;
        let conversation = inner.entry(id.to_string()).or_default();
        conversation.detected_gender = Some(gender);
        conversation.detected_style = styles;
    }

    pub async fn add_feedback(&self, id: &str, feedback: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner
            .entry(id.to_string())
            .or_default()
            .feedback
            .push(feedback.into());
    }

    pub async fn record_products(&self, id: &str, products: &[Product]) {
        let mut inner = self.inner.write().await;
        inner
            .entry(id.to_string())
            .or_default()
            .searched_products
            .extend_from_slice(products);
    }

    pub async fn snapshot(&self, id: &str) -> Option<Conversation> {
        self.inner.read().await.get(id).cloned()
    }

    /// Number of sessions held
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
