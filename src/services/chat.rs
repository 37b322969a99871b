//! Chat-driven product search
//!
//! Each message goes through two model calls: one that turns the message into
//! a structured [`SearchIntent`], and one that writes the short reply shown to
//! the shopper. Both degrade to keyword heuristics, so the chat keeps working
//! without a model.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::{
    error::{AppError, AppResult},
    models::{ChatMessage, ChatRequest, ChatResponse, Gender, Role, SearchIntent},
    services::{
        body_profile,
        catalog::Brand,
        conversation::ConversationStore,
        llm::{GenerativeModel, LlmError},
        product_search,
    },
};

/// Turns of history shown to the intent prompt
const INTENT_HISTORY: usize = 3;
/// Turns of history shown to the reply prompt
const REPLY_HISTORY: usize = 5;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

pub const GENERIC_REPLY: &str =
    "🤖 I understand what you're after. Finding matching products for you now.";

#[derive(Clone)]
pub struct ChatService {
    model: Option<Arc<dyn GenerativeModel>>,
    conversations: ConversationStore,
    product_limit: usize,
    reply_language: String,
}

impl ChatService {
    pub fn new(
        model: Option<Arc<dyn GenerativeModel>>,
        conversations: ConversationStore,
        product_limit: usize,
        reply_language: impl Into<String>,
    ) -> Self {
        Self {
            model,
            conversations,
            product_limit,
            reply_language: reply_language.into(),
        }
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Handles one chat message end to end
    pub async fn respond(&self, request: &ChatRequest) -> AppResult<ChatResponse> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::InvalidInput("message must not be empty".to_string()));
        }

        let id = self
            .conversations
            .resolve(request.conversation_id.as_deref())
            .await;
        let previous_gender = self
            .conversations
            .snapshot(&id)
            .await
            .and_then(|conversation| conversation.detected_gender);

        self.conversations.push_message(&id, Role::User, message).await;
        if let Some(feedback) = request
            .user_feedback
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
        {
            self.conversations.add_feedback(&id, feedback).await;
        }

        let intent = self.extract_intent(&id, message, previous_gender).await;
        self.conversations
            .set_detected(&id, intent.gender, intent.style_preferences.clone())
            .await;

        tracing::info!(
            conversation_id = %id,
            gender = %intent.gender,
            product_type = %intent.product_type,
            styles = ?intent.style_preferences,
            "Shopping intent detected"
        );

        let reply = self.compose_reply(&id, message, &intent).await;
        self.conversations
            .push_message(&id, Role::Assistant, reply.clone())
            .await;

        let search_query = intent.search_query(message);
        let products = product_search::search(&intent, &search_query, self.product_limit);
        self.conversations.record_products(&id, &products).await;

        Ok(ChatResponse {
            ai_response: reply,
            products,
            conversation_id: id,
            success: true,
            detected_gender: Some(intent.gender),
            search_query: Some(search_query),
            analysis_data: Some(intent),
        })
    }

    async fn extract_intent(
        &self,
        id: &str,
        message: &str,
        previous_gender: Option<Gender>,
    ) -> SearchIntent {
        let Some(model) = &self.model else {
            return heuristic_intent(message, previous_gender);
        };

        let history = self.conversations.recent_messages(id, INTENT_HISTORY).await;
        match model.generate(&intent_prompt(message, &history)).await {
            Ok(text) => parse_intent(&text).unwrap_or_else(|| {
                tracing::warn!(conversation_id = %id, "Model intent was not valid JSON, using keywords");
                heuristic_intent(message, previous_gender)
            }),
            Err(e) => {
                tracing::warn!(conversation_id = %id, error = %e, "Intent extraction failed, using keywords");
                heuristic_intent(message, previous_gender)
            }
        }
    }

    async fn compose_reply(&self, id: &str, message: &str, intent: &SearchIntent) -> String {
        let Some(model) = &self.model else {
            return GENERIC_REPLY.to_string();
        };

        let history = self.conversations.recent_messages(id, REPLY_HISTORY).await;
        let prompt = reply_prompt(message, intent, &history, &self.reply_language);
        match model.generate(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                tracing::warn!(conversation_id = %id, error = %e, "Reply generation failed");
                fallback_reply(&e, intent)
            }
        }
    }
}

/// Parses the first `{...}` span of a model answer into an intent
pub fn parse_intent(text: &str) -> Option<SearchIntent> {
    let json = JSON_OBJECT.find(text)?;
    serde_json::from_str(json.as_str()).ok()
}

/// Intent read straight from the message with keyword matching
pub fn heuristic_intent(message: &str, previous_gender: Option<Gender>) -> SearchIntent {
    let brands: Vec<String> = Brand::mentioned_in(message)
        .into_iter()
        .map(|brand| brand.display_name().to_string())
        .collect();

    SearchIntent {
        gender: body_profile::mentioned_gender(message)
            .or(previous_gender)
            .unwrap_or_default(),
        product_type: body_profile::detect_garment(message)
            .map(|kind| kind.label().to_string())
            .unwrap_or_else(|| "t-shirt".to_string()),
        style_preferences: body_profile::detect_styles(message),
        color_preferences: body_profile::detect_colors(message),
        brand_preferences: if brands.is_empty() {
            vec!["any".to_string()]
        } else {
            brands
        },
        search_keywords: message.trim().to_string(),
    }
}

fn fallback_reply(error: &LlmError, intent: &SearchIntent) -> String {
    if error.is_quota() {
        format!(
            "🤖 I understand! You're looking for {} for {}. Finding matching options for you.",
            intent.product_type,
            audience(intent.gender)
        )
    } else {
        GENERIC_REPLY.to_string()
    }
}

fn audience(gender: Gender) -> &'static str {
    match gender {
        Gender::Female => "women",
        Gender::Male => "men",
    }
}

fn format_history(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|message| format!("{}: {}", message.role, message.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn intent_prompt(message: &str, history: &[ChatMessage]) -> String {
    format!(
        r#"Analyse this shopper message: "{message}"

Conversation history:
{history}

Work out the following and return it as JSON:
{{
    "gender": "female" or "male" (use "female" when unclear),
    "product_type": "t-shirt", "trousers", "dress", "jeans", "jacket", "hoodie", "shirt", etc.,
    "style_preferences": ["oversize", "vintage", "basic", "high waist", "sport", "classic", etc.],
    "color_preferences": ["white", "black", "blue", "red", etc.],
    "brand_preferences": ["zara", "pull&bear", "stradivarius", etc. or "any"],
    "search_keywords": "the best keywords to search the catalog with"
}}

Return only the JSON object, no other text."#,
        message = message,
        history = format_history(history),
    )
}

pub fn reply_prompt(
    message: &str,
    intent: &SearchIntent,
    history: &[ChatMessage],
    reply_language: &str,
) -> String {
    format!(
        "You are a personal shopping assistant.\n\
         \n\
         Shopper profile:\n\
         - Gender: {gender}\n\
         - Latest request: {message}\n\
         - Product wanted: {product}\n\
         - Style preferences: {styles}\n\
         \n\
         Conversation history:\n\
         {history}\n\
         \n\
         Your task:\n\
         1. Say that you understand the request\n\
         2. Repeat which features the shopper is looking for\n\
         3. Say that you are finding matching products for them\n\
         4. Be friendly and professional\n\
         \n\
         Reply in 2-3 sentences, in {language}.",
        gender = intent.gender,
        message = message,
        product = intent.product_type,
        styles = intent.style_preferences.join(", "),
        history = format_history(history),
        language = reply_language,
    )
}
