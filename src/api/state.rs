use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    chat::ChatService,
    conversation::ConversationStore,
    llm::GenerativeModel,
    trends::{TrendRecorder, TrendStore},
};

/// Request-independent settings handlers need
#[derive(Debug, Clone)]
pub struct Settings {
    pub reply_language: String,
    pub product_limit: usize,
    pub max_upload_bytes: usize,
    pub cors_origins: Vec<String>,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            reply_language: config.reply_language.clone(),
            product_limit: config.product_limit,
            max_upload_bytes: config.max_upload_bytes,
            cors_origins: config.allowed_origins(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: Option<Arc<dyn GenerativeModel>>,
    pub chat: ChatService,
    pub trends: Option<TrendStore>,
    pub recorder: Option<TrendRecorder>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State without trend tracking
    pub fn new(model: Option<Arc<dyn GenerativeModel>>, settings: Settings) -> Self {
        let chat = ChatService::new(
            model.clone(),
            ConversationStore::new(),
            settings.product_limit,
            settings.reply_language.clone(),
        );

        Self {
            model,
            chat,
            trends: None,
            recorder: None,
            settings: Arc::new(settings),
        }
    }

    pub fn with_trends(mut self, store: TrendStore, recorder: TrendRecorder) -> Self {
        self.trends = Some(store);
        self.recorder = Some(recorder);
        self
    }

    pub fn model(&self) -> Option<&dyn GenerativeModel> {
        self.model.as_deref()
    }

    pub fn ai_available(&self) -> bool {
        self.model.is_some()
    }
}
