use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Gender section a shopper is served from
///
/// Accepts English and Turkish spellings on input ("female", "woman", "kadın",
/// "male", "erkek", ...) and always serializes as `female` / `male`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    /// Parses a free-form gender label
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "female" | "woman" | "women" | "kadın" | "kadin" | "bayan" | "f" | "w" => {
                Some(Gender::Female)
            }
            "male" | "man" | "men" | "erkek" | "bay" | "m" => Some(Gender::Male),
            _ => None,
        }
    }

    /// Noun used when talking about the shopper in prompts
    pub fn person(&self) -> &'static str {
        match self {
            Gender::Female => "woman",
            Gender::Male => "man",
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Gender::parse(&value).ok_or_else(|| format!("unknown gender '{}'", value))
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
        }
    }
}

/// Coarse body shape label
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    #[default]
    Rectangle,
    Pear,
    Apple,
    Hourglass,
    Athletic,
}

impl BodyType {
    pub const ALL: [BodyType; 5] = [
        BodyType::Rectangle,
        BodyType::Pear,
        BodyType::Apple,
        BodyType::Hourglass,
        BodyType::Athletic,
    ];
}

impl Display for BodyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BodyType::Rectangle => "Rectangle",
            BodyType::Pear => "Pear",
            BodyType::Apple => "Apple",
            BodyType::Hourglass => "Hourglass",
            BodyType::Athletic => "Athletic",
        };
        write!(f, "{}", name)
    }
}

/// Kind of garment a catalog entry is, or a shopper asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentKind {
    TShirt,
    Top,
    Shirt,
    Dress,
    Trousers,
    Jeans,
    Jacket,
    Hoodie,
    Blazer,
    Sweater,
}

impl GarmentKind {
    /// Human label, as used in replies and search queries
    pub fn label(&self) -> &'static str {
        match self {
            GarmentKind::TShirt => "t-shirt",
            GarmentKind::Top => "top",
            GarmentKind::Shirt => "shirt",
            GarmentKind::Dress => "dress",
            GarmentKind::Trousers => "trousers",
            GarmentKind::Jeans => "jeans",
            GarmentKind::Jacket => "jacket",
            GarmentKind::Hoodie => "hoodie",
            GarmentKind::Blazer => "blazer",
            GarmentKind::Sweater => "sweater",
        }
    }
}

impl Display for GarmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Gender and body type recovered from an analysis text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BodyProfile {
    pub gender: Gender,
    pub body_type: BodyType,
}

impl Display for BodyProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.gender, self.body_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parses_turkish_and_english() {
        assert_eq!(Gender::parse("Kadın"), Some(Gender::Female));
        assert_eq!(Gender::parse("woman"), Some(Gender::Female));
        assert_eq!(Gender::parse(" erkek "), Some(Gender::Male));
        assert_eq!(Gender::parse("MALE"), Some(Gender::Male));
        assert_eq!(Gender::parse("robot"), None);
    }

    #[test]
    fn test_gender_serde() {
        let gender: Gender = serde_json::from_str(r#""kadın""#).unwrap();
        assert_eq!(gender, Gender::Female);
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), r#""male""#);
        assert!(serde_json::from_str::<Gender>(r#""unknown""#).is_err());
    }

    #[test]
    fn test_body_type_display_matches_serde() {
        for body_type in BodyType::ALL {
            let json = serde_json::to_string(&body_type).unwrap();
            assert_eq!(json, format!("\"{}\"", body_type));
        }
    }

    #[test]
    fn test_garment_kind_serde() {
        assert_eq!(
            serde_json::to_string(&GarmentKind::TShirt).unwrap(),
            r#""t_shirt""#
        );
        assert_eq!(GarmentKind::TShirt.label(), "t-shirt");
    }

    #[test]
    fn test_body_profile_display() {
        let profile = BodyProfile {
            gender: Gender::Male,
            body_type: BodyType::Athletic,
        };
        assert_eq!(profile.to_string(), "male Athletic");
    }
}
