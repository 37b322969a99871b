use crate::{
    models::{Product, SearchIntent},
    services::{
        body_profile,
        catalog::{self, Brand, CatalogEntry, BASIC},
    },
};

const KIND_WEIGHT: u32 = 3;
const STYLE_WEIGHT: u32 = 2;
const COLOR_WEIGHT: u32 = 2;
const KEYWORD_WEIGHT: u32 = 1;

/// Shortest query token that counts as a keyword
const MIN_TOKEN_LEN: usize = 3;

/// Finds catalog listings that match a chat intent
///
/// Listings are scored on garment kind, style, colour and query keywords,
/// best first. When nothing scores, the shopper's basics are returned so the
/// chat always has something to show.
pub fn search(intent: &SearchIntent, query: &str, limit: usize) -> Vec<Product> {
    let brands: Vec<Brand> = intent
        .preferred_brands()
        .into_iter()
        .filter_map(Brand::parse)
        .collect();

    let candidates: Vec<&CatalogEntry> = catalog::entries()
        .iter()
        .filter(|entry| entry.gender == intent.gender)
        .filter(|entry| brands.is_empty() || brands.contains(&entry.brand))
        .collect();

    let kind = body_profile::detect_garment(&intent.product_type)
        .or_else(|| body_profile::detect_garment(query));
    let styles: Vec<String> = intent.style_preferences.iter().map(|s| canonical(s)).collect();
    let colors: Vec<String> = intent.color_preferences.iter().map(|c| canonical(c)).collect();
    let tokens = tokens(query);

    let mut scored: Vec<(u32, &CatalogEntry)> = candidates
        .iter()
        .map(|entry| {
            let name = entry.name.to_lowercase();
            let mut score = 0;

            if kind == Some(entry.kind) {
                score += KIND_WEIGHT;
            }
            score += STYLE_WEIGHT
                * styles
                    .iter()
                    .filter(|style| style_matches(entry, &name, style))
                    .count() as u32;
            if colors.iter().any(|color| color == entry.color) {
                score += COLOR_WEIGHT;
            }
            score += KEYWORD_WEIGHT
                * tokens.iter().filter(|token| name.contains(token.as_str())).count() as u32;

            (score, *entry)
        })
        .filter(|(score, _)| *score > 0)
        .collect();

    // sort_by is stable, so equal scores keep catalog order
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut matches: Vec<&CatalogEntry> = scored.into_iter().map(|(_, entry)| entry).collect();
    if matches.is_empty() {
        tracing::debug!(query = %query, "No scored matches, falling back to basics");
        matches = candidates
            .into_iter()
            .filter(|entry| entry.category == BASIC)
            .collect();
    }
    matches.truncate(limit);

    let recommended_for = format!("{} {}", intent.gender, intent.product_type.trim());
    let products: Vec<Product> = matches
        .into_iter()
        .map(|entry| entry.to_product(&recommended_for))
        .collect();

    tracing::info!(
        query = %query,
        gender = %intent.gender,
        results = products.len(),
        "Catalog search completed"
    );

    products
}

fn canonical(term: &str) -> String {
    body_profile::canonical_term(term)
        .map(str::to_string)
        .unwrap_or_else(|| term.trim().to_lowercase())
}

fn style_matches(entry: &CatalogEntry, lowered_name: &str, style: &str) -> bool {
    if style.is_empty() {
        return false;
    }
    entry.category.contains(&style.replace(' ', "_")) || lowered_name.contains(style)
}

fn tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn intent(gender: Gender, product_type: &str) -> SearchIntent {
        SearchIntent {
            gender,
            product_type: product_type.to_string(),
            style_preferences: Vec::new(),
            color_preferences: Vec::new(),
            brand_preferences: vec!["any".to_string()],
            search_keywords: String::new(),
        }
    }

    #[test]
    fn test_garment_kind_ranks_first() {
        let results = search(&intent(Gender::Female, "elbise"), "elbise", 6);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.recommended_for == "female elbise"));
        // a dress whose name also carries the keyword outranks other dresses
        assert_eq!(results[0].name, "Bel Vurgulu Midi Elbise");
    }

    #[test]
    fn test_brand_preference_filters() {
        let mut wanted = intent(Gender::Female, "jeans");
        wanted.brand_preferences = vec!["pull&bear".to_string()];

        let results = search(&wanted, "mom jean", 6);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.brand == "Pull & Bear"));
        assert_eq!(results[0].name, "High Waist Mom Jean");
    }

    #[test]
    fn test_gender_is_respected() {
        let results = search(&intent(Gender::Male, "shirt"), "shirt", 10);
        assert!(!results.is_empty());
        let male_names: Vec<&str> = catalog::entries()
            .iter()
            .filter(|e| e.gender == Gender::Male)
            .map(|e| e.name)
            .collect();
        assert!(results.iter().all(|p| male_names.contains(&p.name.as_str())));
    }

    #[test]
    fn test_style_and_color_boost() {
        let mut wanted = intent(Gender::Male, "t-shirt");
        wanted.color_preferences = vec!["siyah".to_string()];
        wanted.style_preferences = vec!["vintage".to_string()];

        let results = search(&wanted, "black vintage tee", 3);
        assert_eq!(results[0].name, "Oversize Vintage Tişört");
    }

    #[test]
    fn test_falls_back_to_basics() {
        let results = search(&intent(Gender::Female, "umbrella"), "umbrella", 6);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.category == BASIC));
    }

    #[test]
    fn test_limit_is_applied() {
        let results = search(&intent(Gender::Female, "dress"), "dress", 2);
        assert_eq!(results.len(), 2);
    }
}
