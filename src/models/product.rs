use serde::{Deserialize, Serialize};

/// A product listing returned to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: String,
    pub image: String,
    pub url: String,
    pub brand: String,
    pub category: String,
    pub color: String,
    /// Who the product was picked for, e.g. "female Pear"
    pub recommended_for: String,
}

/// Request body for `POST /get-products`
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub brand: String,
    /// Either a full analysis text or a bare body type label
    pub body_type: String,
    /// Gender hint used when `body_type` is only a label
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    "woman".to_string()
}

/// Response body for `POST /get-products`
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub products: Vec<Product>,
    pub ai_recommendation: String,
    pub brand: String,
    pub product_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dynamic: Option<bool>,
}

impl ProductResponse {
    /// Response for a brand with nothing to show
    pub fn unavailable(brand: &str) -> Self {
        Self {
            success: false,
            products: Vec::new(),
            ai_recommendation: format!("{} products are currently unavailable.", brand),
            brand: brand.to_string(),
            product_count: 0,
            is_dynamic: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults_to_woman() {
        let request: ProductRequest =
            serde_json::from_str(r#"{"brand":"Zara","body_type":"Pear"}"#).unwrap();
        assert_eq!(request.category, "woman");
    }

    #[test]
    fn test_unavailable_omits_is_dynamic() {
        let json = serde_json::to_value(ProductResponse::unavailable("Mango")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["product_count"], 0);
        assert_eq!(json["ai_recommendation"], "Mango products are currently unavailable.");
        assert!(json.get("is_dynamic").is_none());
    }
}
