use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    models::{BodyProfile, Gender, Product, ProductRequest, ProductResponse},
    services::{
        body_profile,
        catalog::{self, Brand, CatalogEntry, BASIC},
    },
};

/// Most listings taken from a single style category
const PER_CATEGORY: usize = 2;

/// Labels at or below this length are treated as a bare body type, not an analysis
const MIN_ANALYSIS_LEN: usize = 10;

/// Products picked for one brand and body profile
#[derive(Debug, Clone)]
pub struct Selection {
    pub profile: BodyProfile,
    pub products: Vec<Product>,
}

/// Text the body profile is read from
///
/// A long `body_type` is an analysis produced by `/analyze-photo` and is used
/// as is. A short one is a bare label such as "Pear"; the category's gender
/// hint is put in front of it so the gender is not lost.
pub fn analysis_text(request: &ProductRequest) -> String {
    let body_type = request.body_type.trim();
    if body_type.chars().count() > MIN_ANALYSIS_LEN {
        return body_type.to_string();
    }

    let gender = Gender::parse(&request.category)
        .unwrap_or_else(|| body_profile::detect_gender(&request.category));
    format!("{} {}", gender, body_type)
}

/// Picks up to `limit` listings of `brand` that suit the profile in `analysis`
///
/// Each call reshuffles, so repeated requests show a different mix.
pub fn select_for_brand<R: Rng + ?Sized>(
    brand: Brand,
    analysis: &str,
    limit: usize,
    rng: &mut R,
) -> Selection {
    let profile = body_profile::extract_profile(analysis);
    let categories = catalog::recommended_categories(profile.gender, profile.body_type);

    tracing::debug!(
        brand = %brand,
        profile = %profile,
        categories = ?categories,
        "Selecting products"
    );

    let mut selected: Vec<&CatalogEntry> = Vec::new();
    for category in categories {
        let mut listings = catalog::category_products(brand, profile.gender, category);
        listings.shuffle(rng);
        selected.extend(listings.into_iter().take(PER_CATEGORY));
    }

    if selected.len() < limit {
        let mut basics: Vec<&CatalogEntry> = catalog::category_products(brand, profile.gender, BASIC)
            .into_iter()
            .filter(|basic| !selected.contains(basic))
            .collect();
        basics.shuffle(rng);
        selected.extend(basics);
    }

    selected.shuffle(rng);
    selected.truncate(limit);

    let recommended_for = profile.to_string();
    let products = selected
        .into_iter()
        .map(|entry| entry.to_product(&recommended_for))
        .collect();

    Selection { profile, products }
}

/// Builds the `/get-products` response
pub fn get_products<R: Rng + ?Sized>(
    request: &ProductRequest,
    limit: usize,
    rng: &mut R,
) -> ProductResponse {
    let Some(brand) = Brand::parse(&request.brand) else {
        tracing::warn!(brand = %request.brand, "Unknown brand requested");
        return ProductResponse::unavailable(&request.brand);
    };

    let selection = select_for_brand(brand, &analysis_text(request), limit, rng);
    if selection.products.is_empty() {
        tracing::warn!(brand = %brand, profile = %selection.profile, "No products for profile");
        return ProductResponse::unavailable(&request.brand);
    }

    ProductResponse {
        success: true,
        product_count: selection.products.len(),
        ai_recommendation: format!(
            "🎯 {} picks chosen for a {} body type!",
            brand, selection.profile.body_type
        ),
        brand: request.brand.clone(),
        products: selection.products,
        is_dynamic: Some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BodyType;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn request(brand: &str, body_type: &str, category: &str) -> ProductRequest {
        ProductRequest {
            brand: brand.to_string(),
            body_type: body_type.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_short_label_gets_gender_prefix() {
        assert_eq!(analysis_text(&request("Zara", "Pear", "woman")), "female Pear");
        assert_eq!(analysis_text(&request("Zara", "Athletic", "erkek")), "male Athletic");
    }

    #[test]
    fn test_long_text_used_as_is() {
        let text = "👤 **Gender:** Male 🔹 **Body Type:** Athletic";
        assert_eq!(analysis_text(&request("Zara", text, "woman")), text);
    }

    #[test]
    fn test_selection_respects_limit_and_profile() {
        let mut rng = StdRng::seed_from_u64(7);
        let selection = select_for_brand(Brand::Zara, "female Rectangle", 6, &mut rng);

        assert_eq!(selection.profile.gender, Gender::Female);
        assert_eq!(selection.profile.body_type, BodyType::Rectangle);
        assert_eq!(selection.products.len(), 6);
        assert!(selection
            .products
            .iter()
            .all(|p| p.brand == "Zara" && p.recommended_for == "female Rectangle"));

        let allowed: HashSet<&str> = catalog::recommended_categories(Gender::Female, BodyType::Rectangle)
            .iter()
            .copied()
            .chain([BASIC])
            .collect();
        assert!(selection
            .products
            .iter()
            .all(|p| allowed.contains(p.category.as_str())));
    }

    #[test]
    fn test_at_most_two_per_category() {
        let mut rng = StdRng::seed_from_u64(1);
        let selection = select_for_brand(Brand::Zara, "female Rectangle", 20, &mut rng);
        for category in ["waist_defining", "wrap_dress", "high_waist"] {
            let count = selection
                .products
                .iter()
                .filter(|p| p.category == category)
                .count();
            assert!(count <= 2, "{} appeared {} times", category, count);
        }
    }

    #[test]
    fn test_basics_fill_small_selection_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(3);
        // Men with a pear shape only have the basic category recommended
        let selection = select_for_brand(Brand::Zara, "male Pear", 6, &mut rng);
        let names: Vec<&str> = selection.products.iter().map(|p| p.name.as_str()).collect();
        let unique: HashSet<&str> = names.iter().copied().collect();

        assert!(!names.is_empty());
        assert_eq!(names.len(), unique.len());
        assert!(selection.products.iter().all(|p| p.category == BASIC));
    }

    #[test]
    fn test_get_products_unknown_brand() {
        let mut rng = StdRng::seed_from_u64(0);
        let response = get_products(&request("Mango", "Pear", "woman"), 6, &mut rng);
        assert!(!response.success);
        assert!(response.products.is_empty());
        assert_eq!(response.brand, "Mango");
    }

    #[test]
    fn test_get_products_for_brand_alias() {
        let mut rng = StdRng::seed_from_u64(0);
        let response = get_products(&request("pull&bear", "Pear", "woman"), 6, &mut rng);
        assert!(response.success);
        assert_eq!(response.product_count, response.products.len());
        assert_eq!(response.is_dynamic, Some(true));
        assert!(response.products.iter().all(|p| p.brand == "Pull & Bear"));
    }
}
