mod chat;
mod fit;
mod photo;
mod product;
mod profile;
mod trend;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, Role, SearchIntent};
pub use fit::{AiSource, SizeAnalysisResponse, SizeRequest};
pub use photo::PhotoAnalysisResponse;
pub use product::{Product, ProductRequest, ProductResponse};
pub use profile::{BodyProfile, BodyType, GarmentKind, Gender};
pub use trend::{TrendEntry, TrendQuery, TrendResponse};
