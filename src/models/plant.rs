use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    Apple,
    Pear,
    Cherry,
    Plum,
    Peach,
    Apricot,
    #[serde(rename = "citrus_orange")]
    Orange,
    #[serde(rename = "citrus_lemon")]
    Lemon,
    Grape,
    Blueberry,
    Raspberry,
    Blackberry,
    Strawberry,
    Fig,
    Avocado,
    Kiwi,
    Persimmon,
}

impl PlantKind {
    /// Stable identifier used in configuration and entity ids.
    pub fn key(&self) -> &'static str {
        match self {
            PlantKind::Apple => "apple",
            PlantKind::Pear => "pear",
            PlantKind::Cherry => "cherry",
            PlantKind::Plum => "plum",
            PlantKind::Peach => "peach",
            PlantKind::Apricot => "apricot",
            PlantKind::Orange => "citrus_orange",
            PlantKind::Lemon => "citrus_lemon",
            PlantKind::Grape => "grape",
            PlantKind::Blueberry => "blueberry",
            PlantKind::Raspberry => "raspberry",
            PlantKind::Blackberry => "blackberry",
            PlantKind::Strawberry => "strawberry",
            PlantKind::Fig => "fig",
            PlantKind::Avocado => "avocado",
            PlantKind::Kiwi => "kiwi",
            PlantKind::Persimmon => "persimmon",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantKind::Apple => "Apple Tree",
            PlantKind::Pear => "Pear Tree",
            PlantKind::Cherry => "Cherry Tree",
            PlantKind::Plum => "Plum Tree",
            PlantKind::Peach => "Peach Tree",
            PlantKind::Apricot => "Apricot Tree",
            PlantKind::Orange => "Orange Tree",
            PlantKind::Lemon => "Lemon Tree",
            PlantKind::Grape => "Grapevine",
            PlantKind::Blueberry => "Blueberry Bush",
            PlantKind::Raspberry => "Raspberry Cane",
            PlantKind::Blackberry => "Blackberry Cane",
            PlantKind::Strawberry => "Strawberry Plant",
            PlantKind::Fig => "Fig Tree",
            PlantKind::Avocado => "Avocado Tree",
            PlantKind::Kiwi => "Kiwi Vine",
            PlantKind::Persimmon => "Persimmon Tree",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "apple" => Some(PlantKind::Apple),
            "pear" => Some(PlantKind::Pear),
            "cherry" => Some(PlantKind::Cherry),
            "plum" => Some(PlantKind::Plum),
            "peach" => Some(PlantKind::Peach),
            "apricot" => Some(PlantKind::Apricot),
            "citrus_orange" | "orange" => Some(PlantKind::Orange),
            "citrus_lemon" | "lemon" => Some(PlantKind::Lemon),
            "grape" | "grapevine" => Some(PlantKind::Grape),
            "blueberry" => Some(PlantKind::Blueberry),
            "raspberry" => Some(PlantKind::Raspberry),
            "blackberry" => Some(PlantKind::Blackberry),
            "strawberry" => Some(PlantKind::Strawberry),
            "fig" => Some(PlantKind::Fig),
            "avocado" => Some(PlantKind::Avocado),
            "kiwi" => Some(PlantKind::Kiwi),
            "persimmon" => Some(PlantKind::Persimmon),
            _ => None,
        }
    }

    pub fn all() -> &'static [PlantKind] {
        &[
            PlantKind::Apple,
            PlantKind::Pear,
            PlantKind::Cherry,
            PlantKind::Plum,
            PlantKind::Peach,
            PlantKind::Apricot,
            PlantKind::Orange,
            PlantKind::Lemon,
            PlantKind::Grape,
            PlantKind::Blueberry,
            PlantKind::Raspberry,
            PlantKind::Blackberry,
            PlantKind::Strawberry,
            PlantKind::Fig,
            PlantKind::Avocado,
            PlantKind::Kiwi,
            PlantKind::Persimmon,
        ]
    }
}

impl std::fmt::Display for PlantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[default]
    Northern,
    Southern,
}

impl Hemisphere {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hemisphere::Northern => "Northern",
            Hemisphere::Southern => "Southern",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "northern" | "north" | "n" => Some(Hemisphere::Northern),
            "southern" | "south" | "s" => Some(Hemisphere::Southern),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Hemisphere::Northern => Hemisphere::Southern,
            Hemisphere::Southern => Hemisphere::Northern,
        }
    }
}

impl std::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprayType {
    Organic,
    Conventional,
}

impl SprayType {
    pub fn from_preference(organic: bool) -> Self {
        if organic {
            SprayType::Organic
        } else {
            SprayType::Conventional
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SprayType::Organic => "Organic",
            SprayType::Conventional => "Conventional",
        }
    }

    /// Lowercase form exposed in sensor attributes.
    pub fn key(&self) -> &'static str {
        match self {
            SprayType::Organic => "organic",
            SprayType::Conventional => "conventional",
        }
    }
}

impl std::fmt::Display for SprayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprayProducts {
    pub organic: Vec<String>,
    pub conventional: Vec<String>,
}

impl SprayProducts {
    pub fn for_type(&self, spray_type: SprayType) -> &[String] {
        match spray_type {
            SprayType::Organic => &self.organic,
            SprayType::Conventional => &self.conventional,
        }
    }
}

/// Care attributes for one catalog plant. Months are 1-based and
/// expressed for the northern hemisphere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantProfile {
    pub kind: PlantKind,
    pub display_name: String,
    pub pruning_months: Vec<u32>,
    pub spray_months: Vec<u32>,
    pub spray_products: SprayProducts,
    pub care_notes: String,
}

impl PlantProfile {
    pub fn key(&self) -> &'static str {
        self.kind.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_kind_from_key_valid() {
        assert_eq!(PlantKind::from_key("apple"), Some(PlantKind::Apple));
        assert_eq!(PlantKind::from_key("Apple"), Some(PlantKind::Apple));
        assert_eq!(
            PlantKind::from_key("citrus_orange"),
            Some(PlantKind::Orange)
        );
        assert_eq!(PlantKind::from_key("citrus lemon"), Some(PlantKind::Lemon));
        assert_eq!(PlantKind::from_key("kiwi"), Some(PlantKind::Kiwi));
    }

    #[test]
    fn plant_kind_from_key_invalid() {
        assert_eq!(PlantKind::from_key("mango"), None);
        assert_eq!(PlantKind::from_key(""), None);
        assert_eq!(PlantKind::from_key("citrus"), None);
    }

    #[test]
    fn plant_kind_key_round_trip() {
        for kind in PlantKind::all() {
            assert_eq!(
                PlantKind::from_key(kind.key()),
                Some(*kind),
                "Round-trip failed for {:?}",
                kind
            );
        }
    }

    #[test]
    fn plant_kind_serde_uses_config_keys() {
        let yaml = serde_yaml::to_string(&PlantKind::Orange).unwrap();
        assert_eq!(yaml.trim(), "citrus_orange");
        let parsed: PlantKind = serde_yaml::from_str("blueberry").unwrap();
        assert_eq!(parsed, PlantKind::Blueberry);
    }

    #[test]
    fn hemisphere_from_str() {
        assert_eq!(Hemisphere::from_str("southern"), Some(Hemisphere::Southern));
        assert_eq!(Hemisphere::from_str("North"), Some(Hemisphere::Northern));
        assert_eq!(Hemisphere::from_str("equator"), None);
        assert_eq!(Hemisphere::Northern.toggled(), Hemisphere::Southern);
    }

    #[test]
    fn spray_type_selects_product_list() {
        let products = SprayProducts {
            organic: vec!["Neem oil".into()],
            conventional: vec!["Captan".into()],
        };
        assert_eq!(products.for_type(SprayType::Organic), ["Neem oil"]);
        assert_eq!(products.for_type(SprayType::Conventional), ["Captan"]);
        assert_eq!(SprayType::from_preference(false), SprayType::Conventional);
    }
}
