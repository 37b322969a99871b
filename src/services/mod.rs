pub mod body_profile;
pub mod catalog;
pub mod chat;
pub mod conversation;
pub mod fit_analysis;
pub mod llm;
pub mod photo_analysis;
pub mod product_search;
pub mod product_selection;
pub mod trends;
