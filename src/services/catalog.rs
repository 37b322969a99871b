//! Static product catalog
//!
//! Mock listings keyed by brand, gender section and style category, plus the
//! table of style categories that suit each body type. Nothing here is
//! fetched; the data ships in the binary.

use regex::Regex;
use serde::Serialize;
use std::fmt::Display;
use std::sync::LazyLock;

use crate::models::{BodyType, GarmentKind, Gender, Product};

/// Brands the catalog carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Brand {
    Zara,
    PullAndBear,
    Stradivarius,
}

impl Brand {
    pub const ALL: [Brand; 3] = [Brand::Zara, Brand::PullAndBear, Brand::Stradivarius];

    /// Parses a brand name, tolerating case, spacing and "&" / "and"
    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name
            .to_lowercase()
            .replace('&', "and")
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();

        match key.as_str() {
            "zara" => Some(Brand::Zara),
            "pullandbear" | "pb" | "pandb" => Some(Brand::PullAndBear),
            "stradivarius" | "strad" => Some(Brand::Stradivarius),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Brand::Zara => "Zara",
            Brand::PullAndBear => "Pull & Bear",
            Brand::Stradivarius => "Stradivarius",
        }
    }

    /// Brands named anywhere in a free-text message
    pub fn mentioned_in(text: &str) -> Vec<Brand> {
        BRAND_MENTIONS
            .iter()
            .filter(|(_, pattern)| pattern.is_match(text))
            .map(|(brand, _)| *brand)
            .collect()
    }
}

impl Display for Brand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

static BRAND_MENTIONS: LazyLock<Vec<(Brand, Regex)>> = LazyLock::new(|| {
    [
        (Brand::Zara, r"(?i)\bzara\b"),
        (
            Brand::PullAndBear,
            r"(?i)\bpull\s*(?:&|and|n)\s*bear\b|\bpullandbear\b",
        ),
        (Brand::Stradivarius, r"(?i)\bstradivarius\b"),
    ]
    .into_iter()
    .map(|(brand, pattern)| (brand, Regex::new(pattern).expect("valid regex")))
    .collect()
});

/// One mock listing
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub brand: Brand,
    pub gender: Gender,
    pub category: &'static str,
    pub kind: GarmentKind,
    pub name: &'static str,
    pub price: &'static str,
    pub color: &'static str,
    pub image: &'static str,
    pub url: &'static str,
}

impl CatalogEntry {
    /// Client-facing product, stamped with who it was picked for
    pub fn to_product(&self, recommended_for: &str) -> Product {
        Product {
            name: self.name.to_string(),
            price: self.price.to_string(),
            image: self.image.to_string(),
            url: self.url.to_string(),
            brand: self.brand.display_name().to_string(),
            category: self.category.to_string(),
            color: self.color.to_string(),
            recommended_for: recommended_for.to_string(),
        }
    }
}

pub const BASIC: &str = "basic";

/// Style categories that flatter a body type, best first
pub fn recommended_categories(gender: Gender, body_type: BodyType) -> &'static [&'static str] {
    match (gender, body_type) {
        (Gender::Female, BodyType::Rectangle) => &[
            "waist_defining",
            "wrap_dress",
            "high_waist",
            "belted",
            "peplum",
        ],
        (Gender::Female, BodyType::Pear) => &[
            "shoulder_detail",
            "boat_neck",
            "blazer",
            "light_top",
            "structured_top",
        ],
        (Gender::Female, BodyType::Apple) => &[
            "empire_waist",
            "v_neck",
            "flowy_top",
            "straight_leg",
            "long_cardigan",
        ],
        (Gender::Female, BodyType::Hourglass) => &[
            "fitted_dress",
            "bodycon",
            "wrap_dress",
            "high_waist",
            "belted",
        ],
        (Gender::Female, BodyType::Athletic) => &[
            "feminine_detail",
            "soft_lines",
            "ruffles",
            "flowing",
        ],
        (Gender::Male, BodyType::Rectangle) => &[
            "layered",
            "textured",
            "regular_fit",
            "horizontal_stripes",
        ],
        (Gender::Male, BodyType::Athletic) => &["fitted", "slim_fit", "tailored", "structured"],
        (Gender::Male, BodyType::Apple) => &[
            "v_neck",
            "vertical_lines",
            "dark_colors",
            "single_breasted",
        ],
        (Gender::Male, BodyType::Pear | BodyType::Hourglass) => &[BASIC],
    }
}

/// Every listing in the catalog
pub fn entries() -> &'static [CatalogEntry] {
    CATALOG
}

/// Listings of one brand's gender section
pub fn brand_products(brand: Brand, gender: Gender) -> Vec<&'static CatalogEntry> {
    CATALOG
        .iter()
        .filter(|entry| entry.brand == brand && entry.gender == gender)
        .collect()
}

/// Listings in one style category of a brand's gender section
pub fn category_products(
    brand: Brand,
    gender: Gender,
    category: &str,
) -> Vec<&'static CatalogEntry> {
    brand_products(brand, gender)
        .into_iter()
        .filter(|entry| entry.category == category)
        .collect()
}

macro_rules! listing {
    ($brand:ident, $gender:ident, $category:literal, $kind:ident, $name:literal, $price:literal, $color:literal, $image:literal, $url:expr) => {
        CatalogEntry {
            brand: Brand::$brand,
            gender: Gender::$gender,
            category: $category,
            kind: GarmentKind::$kind,
            name: $name,
            price: $price,
            color: $color,
            image: concat!("https://dummyimage.com/300x400/", $image),
            url: $url,
        }
    };
}

const ZARA_WOMAN_DRESS: &str = "https://www.zara.com/tr/tr/kadin-elbise-l1066.html";
const ZARA_WOMAN_TROUSERS: &str = "https://www.zara.com/tr/tr/kadin-pantolon-l1335.html";
const ZARA_WOMAN_TOPS: &str = "https://www.zara.com/tr/tr/kadin-tishertler-l1362.html";
const ZARA_WOMAN_BLAZER: &str = "https://www.zara.com/tr/tr/kadin-blazer-l1309.html";
const ZARA_MAN_SHIRT: &str = "https://www.zara.com/tr/tr/erkek-gomlek-l669.html";
const ZARA_MAN_TSHIRT: &str = "https://www.zara.com/tr/tr/erkek-tisort-l855.html";
const PB_WOMAN: &str = "https://www.pullandbear.com/tr/kadin-n6417";
const PB_WOMAN_JEANS: &str = "https://www.pullandbear.com/tr/kadin/giyim/jean-n6581";
const PB_MAN: &str = "https://www.pullandbear.com/tr/erkek-n6228";
const STRAD_WOMAN: &str = "https://www.stradivarius.com/tr/kadin-n1906";
const STRAD_WOMAN_DRESS: &str = "https://www.stradivarius.com/tr/kadin/giyim/elbise-n1995";
const STRAD_WOMAN_MINI: &str = "https://www.stradivarius.com/tr/kadin/giyim/elbise/mini-n1999";

static CATALOG: &[CatalogEntry] = &[
    // Zara, women
    listing!(Zara, Female, "waist_defining", Dress, "Bel Vurgulu Midi Elbise", "399.95 TL", "red", "e74c3c/ffffff?text=Bel+Vurgulu+Elbise", ZARA_WOMAN_DRESS),
    listing!(Zara, Female, "waist_defining", Dress, "Kemer Detaylı Elbise", "349.95 TL", "red", "c0392b/ffffff?text=Kemer+Detayli", ZARA_WOMAN_DRESS),
    listing!(Zara, Female, "wrap_dress", Dress, "Çiçekli Wrap Elbise", "449.95 TL", "yellow", "f39c12/ffffff?text=Wrap+Elbise", ZARA_WOMAN_DRESS),
    listing!(Zara, Female, "wrap_dress", Dress, "Saten Wrap Dress", "499.95 TL", "orange", "d35400/ffffff?text=Saten+Wrap", ZARA_WOMAN_DRESS),
    listing!(Zara, Female, "high_waist", Trousers, "Yüksek Bel Wide Leg", "349.95 TL", "blue", "3498db/ffffff?text=Yuksek+Bel", ZARA_WOMAN_TROUSERS),
    listing!(Zara, Female, "high_waist", Trousers, "High Waist Straight", "289.95 TL", "navy", "2980b9/ffffff?text=High+Waist", ZARA_WOMAN_TROUSERS),
    listing!(Zara, Female, "belted", Trousers, "Kemerli Paperbag Pantolon", "379.95 TL", "beige", "d2b48c/ffffff?text=Paperbag", ZARA_WOMAN_TROUSERS),
    listing!(Zara, Female, "shoulder_detail", Top, "Omuz Detaylı Bluz", "199.95 TL", "green", "1abc9c/ffffff?text=Omuz+Detayli", ZARA_WOMAN_TOPS),
    listing!(Zara, Female, "shoulder_detail", Top, "Statement Shoulder", "249.95 TL", "green", "16a085/ffffff?text=Statement+Shoulder", ZARA_WOMAN_TOPS),
    listing!(Zara, Female, "boat_neck", Top, "Kayık Yaka Triko", "259.95 TL", "white", "ecf0f1/333333?text=Kayik+Yaka", ZARA_WOMAN_TOPS),
    listing!(Zara, Female, "blazer", Blazer, "Structured Blazer", "699.95 TL", "purple", "8e44ad/ffffff?text=Structured+Blazer", ZARA_WOMAN_BLAZER),
    listing!(Zara, Female, "blazer", Blazer, "Oversize Blazer", "599.95 TL", "purple", "9b59b6/ffffff?text=Oversize+Blazer", ZARA_WOMAN_BLAZER),
    listing!(Zara, Female, "fitted_dress", Dress, "Bodycon Midi", "299.95 TL", "orange", "e67e22/ffffff?text=Bodycon+Midi", ZARA_WOMAN_DRESS),
    listing!(Zara, Female, "fitted_dress", Dress, "Fitted Pencil Dress", "349.95 TL", "yellow", "f39c12/ffffff?text=Fitted+Pencil", ZARA_WOMAN_DRESS),
    listing!(Zara, Female, "v_neck", Sweater, "V Neck Sweater", "199.95 TL", "green", "27ae60/ffffff?text=V+Neck+Sweater", ZARA_WOMAN_TOPS),
    listing!(Zara, Female, "flowy_top", Top, "Dökümlü Saten Bluz", "279.95 TL", "pink", "f8a5c2/ffffff?text=Dokumlu+Bluz", ZARA_WOMAN_TOPS),
    listing!(Zara, Female, "ruffles", Top, "Fırfırlı Poplin Bluz", "299.95 TL", "white", "dfe6e9/333333?text=Firfirli+Bluz", ZARA_WOMAN_TOPS),
    listing!(Zara, Female, "basic", TShirt, "Basic Tişört", "99.95 TL", "grey", "95a5a6/ffffff?text=Basic", ZARA_WOMAN_TOPS),
    listing!(Zara, Female, "basic", TShirt, "Oversize Pamuklu Tişört", "129.95 TL", "white", "bdc3c7/333333?text=Oversize+Tee", ZARA_WOMAN_TOPS),
    // Zara, men
    listing!(Zara, Male, "fitted", Shirt, "Slim Fit Gömlek", "299.95 TL", "navy", "34495e/ffffff?text=Slim+Fit", ZARA_MAN_SHIRT),
    listing!(Zara, Male, "fitted", Shirt, "Tailored Shirt", "349.95 TL", "navy", "2c3e50/ffffff?text=Tailored", ZARA_MAN_SHIRT),
    listing!(Zara, Male, "regular_fit", Shirt, "Regular Fit Oxford Gömlek", "279.95 TL", "blue", "5dade2/ffffff?text=Oxford", ZARA_MAN_SHIRT),
    listing!(Zara, Male, "layered", Jacket, "Overshirt Ceket", "449.95 TL", "brown", "8d6e63/ffffff?text=Overshirt", ZARA_MAN_SHIRT),
    listing!(Zara, Male, "v_neck", Sweater, "V Yaka Triko Kazak", "329.95 TL", "grey", "7f8c8d/ffffff?text=V+Yaka+Kazak", ZARA_MAN_TSHIRT),
    listing!(Zara, Male, "dark_colors", TShirt, "Siyah Heavy Tişört", "159.95 TL", "black", "2d3436/ffffff?text=Heavy+Tee", ZARA_MAN_TSHIRT),
    listing!(Zara, Male, "basic", TShirt, "Basic Erkek Tişört", "99.95 TL", "white", "dcdde1/333333?text=Basic+Tee", ZARA_MAN_TSHIRT),
    // Pull & Bear, women
    listing!(PullAndBear, Female, "waist_defining", Dress, "Bel Detaylı Elbise", "159.99 TL", "red", "ff6b6b/ffffff?text=Bel+Detayli", PB_WOMAN),
    listing!(PullAndBear, Female, "high_waist", Jeans, "High Waist Mom Jean", "199.99 TL", "blue", "4ecdc4/ffffff?text=Mom+Jean", PB_WOMAN_JEANS),
    listing!(PullAndBear, Female, "straight_leg", Jeans, "Straight Leg Jean", "219.99 TL", "blue", "3c6382/ffffff?text=Straight+Leg", PB_WOMAN_JEANS),
    listing!(PullAndBear, Female, "shoulder_detail", Top, "Off-Shoulder Top", "89.99 TL", "blue", "45b7d1/ffffff?text=Off+Shoulder", PB_WOMAN),
    listing!(PullAndBear, Female, "long_cardigan", Sweater, "Uzun Triko Hırka", "249.99 TL", "beige", "e0c097/ffffff?text=Uzun+Hirka", PB_WOMAN),
    listing!(PullAndBear, Female, "soft_lines", Top, "Drapeli Crop Top", "109.99 TL", "pink", "fab1a0/ffffff?text=Drapeli+Top", PB_WOMAN),
    listing!(PullAndBear, Female, "basic", TShirt, "Basic Tee", "69.99 TL", "green", "96ceb4/ffffff?text=Basic", PB_WOMAN),
    listing!(PullAndBear, Female, "basic", Hoodie, "Oversize Hoodie", "189.99 TL", "grey", "a4b0be/ffffff?text=Oversize+Hoodie", PB_WOMAN),
    // Pull & Bear, men
    listing!(PullAndBear, Male, "fitted", Hoodie, "Regular Fit Hoodie", "149.99 TL", "purple", "786fa6/ffffff?text=Regular+Hoodie", PB_MAN),
    listing!(PullAndBear, Male, "textured", Sweater, "Dokulu Triko Kazak", "199.99 TL", "beige", "c8b6a6/ffffff?text=Dokulu+Kazak", PB_MAN),
    listing!(PullAndBear, Male, "horizontal_stripes", TShirt, "Çizgili Tişört", "89.99 TL", "navy", "273c75/ffffff?text=Cizgili+Tee", PB_MAN),
    listing!(PullAndBear, Male, "vertical_lines", Shirt, "Dikey Çizgili Gömlek", "179.99 TL", "blue", "487eb0/ffffff?text=Dikey+Cizgili", PB_MAN),
    listing!(PullAndBear, Male, "basic", TShirt, "Oversize Vintage Tişört", "99.99 TL", "black", "353b48/ffffff?text=Vintage+Tee", PB_MAN),
    listing!(PullAndBear, Male, "basic", Jeans, "Baggy Jean", "229.99 TL", "blue", "40739e/ffffff?text=Baggy+Jean", PB_MAN),
    // Stradivarius, women
    listing!(Stradivarius, Female, "fitted_dress", Dress, "Bodycon Elbise", "179.95 TL", "yellow", "f8b500/ffffff?text=Bodycon", STRAD_WOMAN_DRESS),
    listing!(Stradivarius, Female, "fitted_dress", Dress, "Fitted Mini", "149.95 TL", "orange", "f0932b/ffffff?text=Fitted+Mini", STRAD_WOMAN_MINI),
    listing!(Stradivarius, Female, "waist_defining", Dress, "Cinched Waist Dress", "199.95 TL", "red", "eb4d4b/ffffff?text=Cinched+Waist", STRAD_WOMAN_DRESS),
    listing!(Stradivarius, Female, "empire_waist", Dress, "Empire Bel Midi Elbise", "229.95 TL", "green", "6ab04c/ffffff?text=Empire+Bel", STRAD_WOMAN_DRESS),
    listing!(Stradivarius, Female, "belted", Dress, "Kemerli Gömlek Elbise", "259.95 TL", "beige", "dfc5a4/ffffff?text=Kemerli+Elbise", STRAD_WOMAN_DRESS),
    listing!(Stradivarius, Female, "shoulder_detail", Top, "Shoulder Detail Top", "119.95 TL", "purple", "a29bfe/ffffff?text=Shoulder+Detail", STRAD_WOMAN),
    listing!(Stradivarius, Female, "flowing", Dress, "Dökümlü Maxi Elbise", "279.95 TL", "white", "f5f6fa/333333?text=Maxi+Elbise", STRAD_WOMAN_DRESS),
    listing!(Stradivarius, Female, "basic", TShirt, "Trendy Tee", "79.95 TL", "blue", "74b9ff/ffffff?text=Trendy", STRAD_WOMAN),
    listing!(Stradivarius, Female, "basic", Jeans, "Wide Leg Jean", "239.95 TL", "blue", "5f7fa3/ffffff?text=Wide+Leg", STRAD_WOMAN),
];
