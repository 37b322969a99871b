use crate::{
    error::{AppError, AppResult},
    models::{AiSource, PhotoAnalysisResponse},
    services::{
        body_profile,
        llm::{GenerativeModel, ImageInput},
    },
};

/// Analysis returned when the model quota is exhausted
pub const QUOTA_ANALYSIS: &str = "👤 **Gender:** Female\n\
🔹 **Body Type:** Rectangle\n\
📝 **Description:** This body type has balanced shoulders and hips with a soft waistline, a classic frame.\n\
🎯 **Suggestions:** A-line dresses, high-waisted trousers, waist-defining pieces, fit & flare cuts and layered outfits work well.";

/// Analysis returned when no model is configured
pub const OFFLINE_ANALYSIS: &str = "👤 **Gender:** Female\n\
🔹 **Body Type:** Rectangle\n\
📝 **Description:** Classic body shape analysis\n\
🎯 **Suggestions:** Many clothing styles suit this shape.";

/// Checks an uploaded file before it is sent to the model
pub fn validate_upload(content_type: Option<&str>, data: &[u8], max_bytes: usize) -> AppResult<()> {
    let is_image = content_type
        .map(|ct| ct.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false);
    if !is_image {
        return Err(AppError::InvalidInput(
            "Please upload a valid image file".to_string(),
        ));
    }
    if data.is_empty() {
        return Err(AppError::InvalidInput("Uploaded image is empty".to_string()));
    }
    if data.len() > max_bytes {
        return Err(AppError::InvalidInput(format!(
            "Image is larger than {} bytes",
            max_bytes
        )));
    }
    Ok(())
}

pub fn build_prompt(reply_language: &str) -> String {
    format!(
        "Analyse this photo and determine:\n\
         \n\
         1. 👤 Gender (Male/Female)\n\
         2. 🔹 Body type (Rectangle, Pear, Apple, Hourglass, Athletic)\n\
         3. 📏 Overall build\n\
         4. 🎯 The clothing that suits this body type best\n\
         \n\
         Format:\n\
         👤 **Gender:** [Female/Male]\n\
         🔹 **Body Type:** [Type]\n\
         📝 **Description:** This body type [detailed description]\n\
         🎯 **Suggestions:** [Gender-specific clothing suggestions]\n\
         \n\
         Keep the labels above in English. Write the rest in {}, in a professional but friendly tone.\n\
         Pay special attention to gender, because size advice depends on it.",
        reply_language
    )
}

/// Answers `POST /analyze-photo` for an already validated image
pub async fn analyze_photo(
    model: Option<&dyn GenerativeModel>,
    image: &ImageInput,
    reply_language: &str,
) -> AppResult<PhotoAnalysisResponse> {
    let (analysis, ai_type) = match model {
        Some(model) => match model
            .generate_with_image(&build_prompt(reply_language), image)
            .await
        {
            Ok(text) => (text, AiSource::RealGeminiVision),
            Err(e) if e.is_quota() => {
                tracing::warn!(error = %e, "Model quota exhausted, using canned photo analysis");
                (QUOTA_ANALYSIS.to_string(), AiSource::QuotaLimitedVision)
            }
            Err(e) => return Err(AppError::Llm(e)),
        },
        None => (OFFLINE_ANALYSIS.to_string(), AiSource::FallbackVision),
    };

    let profile = body_profile::extract_profile(&analysis);

    Ok(PhotoAnalysisResponse {
        success: true,
        analysis,
        ai_type,
        detected_gender: profile.gender,
        detected_body_type: profile.body_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BodyType, Gender};
    use crate::services::llm::{LlmError, MockGenerativeModel};

    fn image() -> ImageInput {
        ImageInput {
            mime_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[test]
    fn test_validate_upload() {
        assert!(validate_upload(Some("image/png"), b"png", 10).is_ok());
        assert!(validate_upload(Some("IMAGE/JPEG"), b"jpg", 10).is_ok());
        assert!(matches!(
            validate_upload(Some("text/plain"), b"hello", 10),
            Err(AppError::InvalidInput(_))
        ));
        assert!(validate_upload(None, b"hello", 10).is_err());
        assert!(validate_upload(Some("image/png"), b"", 10).is_err());
        assert!(validate_upload(Some("image/png"), &[0u8; 11], 10).is_err());
    }

    #[test]
    fn test_canned_analyses_parse_back() {
        for text in [QUOTA_ANALYSIS, OFFLINE_ANALYSIS] {
            let profile = body_profile::extract_profile(text);
            assert_eq!(profile.gender, Gender::Female);
            assert_eq!(profile.body_type, BodyType::Rectangle);
        }
    }

    #[tokio::test]
    async fn test_model_analysis_is_parsed() {
        let mut model = MockGenerativeModel::new();
        model
            .expect_generate_with_image()
            .withf(|_, image| image.mime_type == "image/jpeg")
            .times(1)
            .returning(|_, _| {
                Ok("👤 **Gender:** Male\n🔹 **Body Type:** Athletic\n📝 **Description:** Broad shoulders".to_string())
            });

        let response = analyze_photo(Some(&model), &image(), "English").await.unwrap();
        assert_eq!(response.ai_type, AiSource::RealGeminiVision);
        assert_eq!(response.detected_gender, Gender::Male);
        assert_eq!(response.detected_body_type, BodyType::Athletic);
    }

    #[tokio::test]
    async fn test_quota_gives_canned_analysis() {
        let mut model = MockGenerativeModel::new();
        model
            .expect_generate_with_image()
            .returning(|_, _| Err(LlmError::QuotaExceeded("quota".to_string())));

        let response = analyze_photo(Some(&model), &image(), "English").await.unwrap();
        assert_eq!(response.ai_type, AiSource::QuotaLimitedVision);
        assert_eq!(response.analysis, QUOTA_ANALYSIS);
    }

    #[tokio::test]
    async fn test_network_error_is_returned() {
        let mut model = MockGenerativeModel::new();
        model
            .expect_generate_with_image()
            .returning(|_, _| Err(LlmError::Network("timeout".to_string())));

        let result = analyze_photo(Some(&model), &image(), "English").await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_offline_analysis() {
        let response = analyze_photo(None, &image(), "English").await.unwrap();
        assert_eq!(response.ai_type, AiSource::FallbackVision);
        assert_eq!(response.analysis, OFFLINE_ANALYSIS);
    }
}
