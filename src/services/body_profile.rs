//! Keyword heuristics over free text
//!
//! The model answers in prose, sometimes in English and sometimes in Turkish.
//! These helpers recover the handful of structured fields the rest of the
//! service needs. A labelled field ("Gender: Female") wins over keywords found
//! anywhere else in the text.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::{BodyProfile, BodyType, GarmentKind, Gender};

static GENDER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:gender|cinsiyet)\b[^\p{L}\n]*(\p{L}+)").expect("valid regex")
});

static BODY_TYPE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:body\s+type|body\s+shape|vücut\s+tipi)\b[^\p{L}\n]*(\p{L}+(?:\s+\p{L}+)?)")
        .expect("valid regex")
});

static FEMALE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:kadın|kadin|bayan|hanım|female|woman|women|girl)\b").expect("valid regex")
});

static MALE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:erkek|adam|male|man|men|boy)\b").expect("valid regex")
});

static BODY_TYPE_WORDS: LazyLock<Vec<(BodyType, Regex)>> = LazyLock::new(|| {
    [
        (BodyType::Rectangle, r"(?i)\b(?:rectangle|dikdörtgen)"),
        (BodyType::Pear, r"(?i)\b(?:pear|armut)"),
        (BodyType::Apple, r"(?i)\b(?:apple|elma\b)"),
        (BodyType::Hourglass, r"(?i)\b(?:hourglass|kum\s+saati)"),
        (BodyType::Athletic, r"(?i)\b(?:athletic|atletik)"),
    ]
    .into_iter()
    .map(|(body_type, pattern)| (body_type, Regex::new(pattern).expect("valid regex")))
    .collect()
});

// Order matters: "t-shirt" must win over "shirt", "jean pantolon" over "pantolon".
static GARMENT_WORDS: LazyLock<Vec<(GarmentKind, Regex)>> = LazyLock::new(|| {
    [
        (GarmentKind::TShirt, r"(?i)\b(?:t-shirt|tshirt|tee\b|tişört|tisort)"),
        (GarmentKind::Hoodie, r"(?i)\b(?:hoodie|sweatshirt|kapüşonlu)"),
        (GarmentKind::Blazer, r"(?i)\bblazer"),
        (GarmentKind::Jeans, r"(?i)\b(?:jeans?\b|denim|kot\b)"),
        (GarmentKind::Dress, r"(?i)\b(?:dress|elbise)"),
        (GarmentKind::Shirt, r"(?i)\b(?:shirt|gömlek|gomlek)"),
        (GarmentKind::Top, r"(?i)\b(?:top\b|tops\b|blouse|bluz|crop)"),
        (GarmentKind::Trousers, r"(?i)\b(?:trousers|pants|pantolon)"),
        (GarmentKind::Jacket, r"(?i)\b(?:jacket|coat|mont\b|ceket|kaban)"),
        (GarmentKind::Sweater, r"(?i)\b(?:sweater|jumper|cardigan|kazak|hırka)"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("valid regex")))
    .collect()
});

/// Canonical style tag and the words that signal it
const STYLE_WORDS: &[(&str, &[&str])] = &[
    ("oversize", &["oversize", "oversized", "bol"]),
    ("vintage", &["vintage", "retro"]),
    ("basic", &["basic", "plain", "sade"]),
    ("high waist", &["high waist", "high-waist", "yüksek bel"]),
    ("sport", &["sport", "sporty", "spor", "athleisure"]),
    ("classic", &["classic", "klasik", "elegant", "şık"]),
    ("slim fit", &["slim", "dar kesim"]),
    ("wrap", &["wrap", "kruvaze"]),
    ("fitted", &["fitted", "bodycon", "tailored"]),
];

/// Canonical colour and the words that signal it
const COLOR_WORDS: &[(&str, &[&str])] = &[
    ("white", &["white", "beyaz"]),
    ("black", &["black", "siyah"]),
    ("blue", &["blue", "mavi"]),
    ("navy", &["navy", "lacivert"]),
    ("red", &["red", "kırmızı"]),
    ("green", &["green", "yeşil"]),
    ("beige", &["beige", "bej"]),
    ("grey", &["grey", "gray", "gri"]),
    ("pink", &["pink", "pembe"]),
    ("yellow", &["yellow", "sarı"]),
    ("brown", &["brown", "kahverengi"]),
    ("purple", &["purple", "mor"]),
    ("orange", &["orange", "turuncu"]),
];

/// Gender mentioned in the text; female when nothing is found
pub fn detect_gender(text: &str) -> Gender {
    mentioned_gender(text).unwrap_or_default()
}

/// Gender mentioned in the text, if any
pub fn mentioned_gender(text: &str) -> Option<Gender> {
    let labelled = GENDER_LABEL
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Gender::parse(m.as_str()));

    labelled.or_else(|| {
        if text.contains('👩') || FEMALE_WORDS.is_match(text) {
            Some(Gender::Female)
        } else if text.contains('👨') || MALE_WORDS.is_match(text) {
            Some(Gender::Male)
        } else {
            None
        }
    })
}

/// Body type mentioned in the text; rectangle when nothing is found
pub fn detect_body_type(text: &str) -> BodyType {
    let labelled = BODY_TYPE_LABEL
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| first_body_type(m.as_str()));

    labelled
        .or_else(|| first_body_type(text))
        .unwrap_or_default()
}

fn first_body_type(text: &str) -> Option<BodyType> {
    BODY_TYPE_WORDS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(body_type, _)| *body_type)
}

/// Gender and body type from an analysis text
pub fn extract_profile(text: &str) -> BodyProfile {
    let profile = BodyProfile {
        gender: detect_gender(text),
        body_type: detect_body_type(text),
    };
    tracing::debug!(profile = %profile, "Body profile extracted");
    profile
}

/// First garment kind mentioned in the text
pub fn detect_garment(text: &str) -> Option<GarmentKind> {
    GARMENT_WORDS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(kind, _)| *kind)
}

/// Style tags mentioned in the text, in canonical form
pub fn detect_styles(text: &str) -> Vec<String> {
    canonical_matches(text, STYLE_WORDS)
}

/// Colours mentioned in the text, in canonical form
pub fn detect_colors(text: &str) -> Vec<String> {
    canonical_matches(text, COLOR_WORDS)
}

/// Canonical form of a style or colour word, if it is a known one
pub fn canonical_term(word: &str) -> Option<&'static str> {
    let lowered = word.trim().to_lowercase();
    STYLE_WORDS
        .iter()
        .chain(COLOR_WORDS.iter())
        .find(|(canonical, words)| *canonical == lowered || words.contains(&lowered.as_str()))
        .map(|(canonical, _)| *canonical)
}

fn canonical_matches(text: &str, table: &[(&'static str, &[&str])]) -> Vec<String> {
    let lowered = text.to_lowercase();
    table
        .iter()
        .filter(|(_, words)| words.iter().any(|word| contains_word(&lowered, word)))
        .map(|(canonical, _)| canonical.to_string())
        .collect()
}

/// Whole-word (or whole-phrase) containment on already lower-cased text
fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.match_indices(word).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_gender_wins() {
        let text = "👤 **Gender:** Male\n🎯 **Suggestions:** avoid styles made for women";
        assert_eq!(detect_gender(text), Gender::Male);
    }

    #[test]
    fn test_turkish_labelled_gender() {
        assert_eq!(detect_gender("Cinsiyet: Kadın, Vücut Tipi: Armut"), Gender::Female);
        assert_eq!(detect_gender("cinsiyet: erkek"), Gender::Male);
    }

    #[test]
    fn test_woman_is_not_man() {
        assert_eq!(detect_gender("a woman with a balanced frame"), Gender::Female);
        assert_eq!(detect_gender("female shopper"), Gender::Female);
        assert_eq!(detect_gender("a male shopper"), Gender::Male);
    }

    #[test]
    fn test_gender_defaults_to_female() {
        assert_eq!(detect_gender("balanced shoulders and hips"), Gender::Female);
        assert_eq!(mentioned_gender("balanced shoulders and hips"), None);
    }

    #[test]
    fn test_emoji_gender() {
        assert_eq!(detect_gender("👨 Rectangle"), Gender::Male);
    }

    #[test]
    fn test_body_type_keywords() {
        assert_eq!(detect_body_type("Vücut Tipi: Armut"), BodyType::Pear);
        assert_eq!(detect_body_type("classic hourglass figure"), BodyType::Hourglass);
        assert_eq!(detect_body_type("kum saati"), BodyType::Hourglass);
        assert_eq!(detect_body_type("an athletic build"), BodyType::Athletic);
        assert_eq!(detect_body_type("nothing useful"), BodyType::Rectangle);
    }

    #[test]
    fn test_labelled_body_type_wins_over_prose() {
        let text = "**Body Type:** Apple\n📝 Unlike a pear shape, weight sits at the middle.";
        assert_eq!(detect_body_type(text), BodyType::Apple);
    }

    #[test]
    fn test_extract_profile() {
        let profile = extract_profile("👩 Cinsiyet: Kadın 🔹 Vücut Tipi: Rectangle");
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.body_type, BodyType::Rectangle);
    }

    #[test]
    fn test_detect_garment() {
        assert_eq!(detect_garment("beyaz oversize tişört"), Some(GarmentKind::TShirt));
        assert_eq!(detect_garment("a white t-shirt"), Some(GarmentKind::TShirt));
        assert_eq!(detect_garment("linen shirt for summer"), Some(GarmentKind::Shirt));
        assert_eq!(detect_garment("yüksek bel jean"), Some(GarmentKind::Jeans));
        assert_eq!(detect_garment("siyah elbise"), Some(GarmentKind::Dress));
        assert_eq!(detect_garment("something nice"), None);
    }

    #[test]
    fn test_detect_styles_and_colors() {
        let text = "Siyah oversize hoodie, biraz vintage olsun";
        assert_eq!(detect_styles(text), vec!["oversize", "vintage"]);
        assert_eq!(detect_colors(text), vec!["black"]);
    }

    #[test]
    fn test_colour_words_are_whole_words() {
        // "red" inside "tailored" is not a colour
        assert!(detect_colors("a tailored look").is_empty());
    }

    #[test]
    fn test_canonical_term() {
        assert_eq!(canonical_term("Siyah"), Some("black"));
        assert_eq!(canonical_term("yüksek bel"), Some("high waist"));
        assert_eq!(canonical_term("fitted"), Some("fitted"));
        assert_eq!(canonical_term("sparkly"), None);
    }
}
