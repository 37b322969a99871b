use serde::{Deserialize, Deserializer, Serialize};

use super::Gender;

/// Where an AI-facing answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiSource {
    /// Size verdict written by the model
    RealGeminiSpecific,
    /// Model quota exhausted, BMI heuristic used instead
    QuotaLimitedSpecific,
    /// No model configured
    FallbackSpecific,
    /// Photo analysis written by the model
    RealGeminiVision,
    /// Model quota exhausted, canned photo analysis used instead
    QuotaLimitedVision,
    /// No model configured
    FallbackVision,
}

/// Request body for `POST /analyze-size`
#[derive(Debug, Clone, Deserialize)]
pub struct SizeRequest {
    /// Height in centimetres
    pub user_height: i32,
    /// Weight in kilograms
    pub user_weight: i32,
    pub product_name: String,
    pub product_size: String,
    pub brand: String,
    /// Anything not recognised as female is sized as male
    #[serde(deserialize_with = "female_or_male")]
    pub gender: Gender,
}

fn female_or_male<'de, D>(deserializer: D) -> Result<Gender, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(Gender::parse(&value).unwrap_or(Gender::Male))
}

impl SizeRequest {
    /// Body mass index from the request's height and weight
    pub fn bmi(&self) -> f64 {
        let height_m = f64::from(self.user_height) / 100.0;
        f64::from(self.user_weight) / (height_m * height_m)
    }

    /// Requested size, trimmed and upper-cased
    pub fn normalized_size(&self) -> String {
        self.product_size.trim().to_uppercase()
    }

    /// "{brand} {product} ({size})"
    pub fn queried_product(&self) -> String {
        format!(
            "{} {} ({})",
            self.brand.trim(),
            self.product_name.trim(),
            self.product_size.trim()
        )
    }
}

/// Response body for `POST /analyze-size`
#[derive(Debug, Clone, Serialize)]
pub struct SizeAnalysisResponse {
    pub success: bool,
    pub recommendation: String,
    pub ai_type: AiSource,
    pub bmi: f64,
    pub gender: Gender,
    pub analysis_type: &'static str,
    pub queried_product: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(height: i32, weight: i32) -> SizeRequest {
        SizeRequest {
            user_height: height,
            user_weight: weight,
            product_name: " Basic Tee ".to_string(),
            product_size: " m ".to_string(),
            brand: "Zara".to_string(),
            gender: Gender::Female,
        }
    }

    #[test]
    fn test_bmi() {
        let bmi = request(175, 70).bmi();
        assert!((bmi - 22.857).abs() < 0.01);
    }

    #[test]
    fn test_normalized_size_and_query() {
        let req = request(170, 60);
        assert_eq!(req.normalized_size(), "M");
        assert_eq!(req.queried_product(), "Zara Basic Tee (m)");
    }

    #[test]
    fn test_ai_source_serialization() {
        assert_eq!(
            serde_json::to_string(&AiSource::QuotaLimitedSpecific).unwrap(),
            r#""quota_limited_specific""#
        );
        assert_eq!(
            serde_json::to_string(&AiSource::RealGeminiVision).unwrap(),
            r#""real_gemini_vision""#
        );
    }

    #[test]
    fn test_size_request_accepts_turkish_gender() {
        let req: SizeRequest = serde_json::from_str(
            r#"{"user_height":180,"user_weight":80,"product_name":"Gömlek","product_size":"L","brand":"Zara","gender":"erkek"}"#,
        )
        .unwrap();
        assert_eq!(req.gender, Gender::Male);
    }

    #[test]
    fn test_size_request_treats_unknown_gender_as_male() {
        let req: SizeRequest = serde_json::from_str(
            r#"{"user_height":170,"user_weight":65,"product_name":"Tee","product_size":"M","brand":"Zara","gender":"unisex"}"#,
        )
        .unwrap();
        assert_eq!(req.gender, Gender::Male);
    }

    #[test]
    fn test_size_request_keeps_negative_measurements() {
        let req: SizeRequest = serde_json::from_str(
            r#"{"user_height":-170,"user_weight":60,"product_name":"Tee","product_size":"M","brand":"Zara","gender":"kadın"}"#,
        )
        .unwrap();
        assert_eq!(req.user_height, -170);
        assert_eq!(req.gender, Gender::Female);
    }
}
