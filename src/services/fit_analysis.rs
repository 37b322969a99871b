use crate::{
    error::{AppError, AppResult},
    models::{AiSource, Gender, SizeAnalysisResponse, SizeRequest},
    services::llm::GenerativeModel,
};

pub const ANALYSIS_TYPE: &str = "specific_product_fit";

/// Answers `POST /analyze-size`
///
/// Without a model the answer is a short canned summary. A quota failure is
/// answered with a BMI heuristic; any other model failure is returned.
pub async fn analyze_size(
    model: Option<&dyn GenerativeModel>,
    request: &SizeRequest,
    reply_language: &str,
) -> AppResult<SizeAnalysisResponse> {
    validate(request)?;

    let bmi = request.bmi();
    let (recommendation, ai_type) = match model {
        Some(model) => match model.generate(&build_prompt(request, reply_language)).await {
            Ok(text) => (text, AiSource::RealGeminiSpecific),
            Err(e) if e.is_quota() => {
                tracing::warn!(error = %e, "Model quota exhausted, using BMI heuristic");
                (heuristic_recommendation(request, bmi), AiSource::QuotaLimitedSpecific)
            }
            Err(e) => return Err(AppError::Llm(e)),
        },
        None => (offline_recommendation(request, bmi), AiSource::FallbackSpecific),
    };

    Ok(SizeAnalysisResponse {
        success: true,
        recommendation,
        ai_type,
        bmi,
        gender: request.gender,
        analysis_type: ANALYSIS_TYPE,
        queried_product: request.queried_product(),
    })
}

fn validate(request: &SizeRequest) -> AppResult<()> {
    if request.user_height <= 0 || request.user_weight <= 0 {
        return Err(AppError::InvalidInput(
            "Height and weight must be positive".to_string(),
        ));
    }
    for (field, value) in [
        ("product_name", &request.product_name),
        ("product_size", &request.product_size),
        ("brand", &request.brand),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
        }
    }
    Ok(())
}

fn gender_advice(gender: Gender) -> &'static str {
    match gender {
        Gender::Female => {
            "Things to keep in mind for women's sizing:\n\
             - How bust, waist and hip measurements relate to each other\n\
             - Fit differs by body type (pear, apple, hourglass)\n\
             - Women's clothing is usually cut to follow the body's shape"
        }
        Gender::Male => {
            "Things to keep in mind for men's sizing:\n\
             - Shoulder and chest width are the key measurements\n\
             - Waist size tends to be more stable\n\
             - Men's clothing is usually cut wider"
        }
    }
}

pub fn build_prompt(request: &SizeRequest, reply_language: &str) -> String {
    let person = request.gender.person();
    let size = request.normalized_size();

    format!(
        "You are a clothing size expert. The user wants to know whether one specific product and size fits them.\n\
         \n\
         User details:\n\
         - Gender: {gender}\n\
         - Height: {height} cm\n\
         - Weight: {weight} kg\n\
         - Brand: {brand}\n\
         - Product: {product}\n\
         - Size to try: {size}\n\
         \n\
         {advice}\n\
         \n\
         QUESTION: \"Does size {size} of the {brand} {product} fit this {person}?\"\n\
         \n\
         Please:\n\
         1. Calculate and assess the BMI\n\
         2. Say whether size {size} suits this {person}\n\
         3. Take {brand}'s sizing into account if you know it\n\
         4. Suggest an alternative size (larger or smaller)\n\
         5. Give advice specific to this kind of product\n\
         6. Do NOT recommend other brands, only analyse the given product\n\
         \n\
         Start with a clear \"YES, it fits\" or \"NO, it does not fit\", then explain.\n\
         Answer in {language}, in a warm and helpful tone.",
        gender = request.gender,
        height = request.user_height,
        weight = request.user_weight,
        brand = request.brand.trim(),
        product = request.product_name.trim(),
        size = size,
        advice = gender_advice(request.gender),
        person = person,
        language = reply_language,
    )
}

/// Sizes that usually fit a given BMI
pub fn size_band(bmi: f64) -> &'static [&'static str] {
    if bmi < 18.5 {
        &["XS", "S"]
    } else if bmi < 25.0 {
        &["S", "M"]
    } else if bmi < 30.0 {
        &["M", "L"]
    } else {
        &["L", "XL", "XXL"]
    }
}

fn heuristic_recommendation(request: &SizeRequest, bmi: f64) -> String {
    let band = size_band(bmi);
    let size = request.normalized_size();
    let verdict = if band.contains(&size.as_str()) {
        "✅ YES, this size should fit you".to_string()
    } else {
        format!("⚠️ Sizes {} are likely a better fit", band.join("-"))
    };

    format!(
        "📊 BMI: {bmi:.1}\n\
         \n\
         🎯 {brand} {product} - size {size} analysis:\n\
         \n\
         {verdict}\n\
         \n\
         👤 For a {person}'s build:\n\
         {advice}\n\
         \n\
         💡 This is a general guide. Trying the garment on gives the most accurate answer.",
        bmi = bmi,
        brand = request.brand.trim(),
        product = request.product_name.trim(),
        size = size,
        verdict = verdict,
        person = request.gender.person(),
        advice = gender_advice(request.gender),
    )
}

fn offline_recommendation(request: &SizeRequest, bmi: f64) -> String {
    format!(
        "📊 BMI: {:.1}\n\
         🎯 Size {} of the {} {}\n\
         👤 Assessed for a {}'s build.\n\
         💡 It generally looks suitable, give it a try.",
        bmi,
        request.normalized_size(),
        request.brand.trim(),
        request.product_name.trim(),
        request.gender.person(),
    )
}
