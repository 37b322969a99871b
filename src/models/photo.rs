use serde::Serialize;

use super::{AiSource, BodyType, Gender};

/// Response body for `POST /analyze-photo`
#[derive(Debug, Clone, Serialize)]
pub struct PhotoAnalysisResponse {
    pub success: bool,
    pub analysis: String,
    pub ai_type: AiSource,
    /// Gender read back out of the analysis text
    pub detected_gender: Gender,
    /// Body type read back out of the analysis text
    pub detected_body_type: BodyType,
}
