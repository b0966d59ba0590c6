use crate::error::{OrchardCareError, Result};
use crate::models::{PlantKind, PlantProfile, SprayProducts};
use std::collections::BTreeMap;

struct PlantEntry {
    kind: PlantKind,
    pruning_months: &'static [u32],
    spray_months: &'static [u32],
    organic: &'static [&'static str],
    conventional: &'static [&'static str],
    care_notes: &'static str,
}

/// Northern-hemisphere care windows for every supported plant.
const PLANT_CARE_DATA: &[PlantEntry] = &[
    PlantEntry {
        kind: PlantKind::Apple,
        pruning_months: &[12, 1, 2],
        spray_months: &[3, 4, 5, 9],
        organic: &["Neem oil", "Copper fungicide", "Horticultural oil", "Bacillus thuringiensis"],
        conventional: &["Captan", "Imidacloprid", "Malathion", "Fungicide spray"],
        care_notes: "Prune during dormancy. Spring sprays prevent scab and insects.",
    },
    PlantEntry {
        kind: PlantKind::Pear,
        pruning_months: &[12, 1, 2],
        spray_months: &[3, 4, 5, 9],
        organic: &["Neem oil", "Copper fungicide", "Kaolin clay", "Spinosad"],
        conventional: &["Captan", "Imidacloprid", "Carbaryl", "Streptomycin"],
        care_notes: "Similar care to apples. Watch for fire blight.",
    },
    PlantEntry {
        kind: PlantKind::Cherry,
        // Summer pruning avoids silver leaf infection
        pruning_months: &[6, 7, 8],
        spray_months: &[3, 4, 5],
        organic: &["Copper fungicide", "Neem oil", "Bacillus subtilis"],
        conventional: &["Captan", "Propiconazole", "Imidacloprid"],
        care_notes: "Prune in summer to prevent silver leaf disease.",
    },
    PlantEntry {
        kind: PlantKind::Plum,
        pruning_months: &[6, 7, 8],
        spray_months: &[3, 4, 5],
        organic: &["Copper fungicide", "Neem oil", "Horticultural oil"],
        conventional: &["Captan", "Chlorpyrifos", "Fungicide spray"],
        care_notes: "Summer pruning prevents disease. Watch for brown rot.",
    },
    PlantEntry {
        kind: PlantKind::Peach,
        pruning_months: &[12, 1, 2],
        spray_months: &[3, 4, 5, 6],
        organic: &["Copper fungicide", "Neem oil", "Sulfur spray", "Spinosad"],
        conventional: &["Captan", "Imidacloprid", "Propiconazole", "Malathion"],
        care_notes: "Heavy pruning needed. Susceptible to peach leaf curl.",
    },
    PlantEntry {
        kind: PlantKind::Apricot,
        pruning_months: &[12, 1, 2],
        spray_months: &[3, 4, 5, 6],
        organic: &[
            "Copper fungicide",
            "Neem oil",
            "Sulfur spray",
            "Horticultural oil",
            "Bacillus subtilis",
        ],
        conventional: &[
            "Captan",
            "Imidacloprid",
            "Propiconazole",
            "Malathion",
            "Fungicide spray",
        ],
        care_notes: "Prune during dormancy to maintain shape and airflow. Susceptible to brown \
                     rot and bacterial canker. Thin fruit for better quality.",
    },
    PlantEntry {
        kind: PlantKind::Orange,
        pruning_months: &[3, 4, 5],
        spray_months: &[2, 3, 4, 8, 9],
        organic: &["Neem oil", "Horticultural oil", "Insecticidal soap", "Copper fungicide"],
        conventional: &["Imidacloprid", "Abamectin", "Copper sulfate", "Fungicide spray"],
        care_notes: "Light pruning only. Watch for citrus canker and scale.",
    },
    PlantEntry {
        kind: PlantKind::Lemon,
        pruning_months: &[3, 4, 5],
        spray_months: &[2, 3, 4, 8, 9, 10],
        organic: &["Neem oil", "Horticultural oil", "Insecticidal soap", "Copper fungicide"],
        conventional: &["Imidacloprid", "Abamectin", "Copper sulfate", "Systemic insecticide"],
        care_notes: "Minimal pruning. Regular feeding and watering important.",
    },
    PlantEntry {
        kind: PlantKind::Grape,
        pruning_months: &[12, 1, 2],
        spray_months: &[4, 5, 6, 7],
        organic: &["Copper fungicide", "Sulfur spray", "Bacillus subtilis", "Neem oil"],
        conventional: &["Captan", "Mancozeb", "Imidacloprid", "Fungicide spray"],
        care_notes: "Heavy winter pruning required. Watch for powdery mildew.",
    },
    PlantEntry {
        kind: PlantKind::Blueberry,
        pruning_months: &[12, 1, 2],
        spray_months: &[3, 4, 5],
        organic: &["Neem oil", "Copper fungicide", "Horticultural oil", "Bacillus thuringiensis"],
        conventional: &["Captan", "Imidacloprid", "Fungicide spray", "Insecticide spray"],
        care_notes: "Light pruning of old wood. Acidic soil preferred.",
    },
    PlantEntry {
        kind: PlantKind::Raspberry,
        pruning_months: &[11, 12, 1, 2],
        spray_months: &[3, 4, 5],
        organic: &["Neem oil", "Copper fungicide", "Horticultural oil"],
        conventional: &["Captan", "Malathion", "Fungicide spray"],
        care_notes: "Remove old canes after fruiting. Thin new growth.",
    },
    PlantEntry {
        kind: PlantKind::Blackberry,
        pruning_months: &[11, 12, 1, 2],
        spray_months: &[3, 4, 5],
        organic: &["Neem oil", "Copper fungicide", "Horticultural oil"],
        conventional: &["Captan", "Malathion", "Systemic fungicide"],
        care_notes: "Prune old canes to ground level. Train new growth.",
    },
    PlantEntry {
        kind: PlantKind::Strawberry,
        pruning_months: &[11, 12, 1],
        spray_months: &[3, 4, 5, 9],
        organic: &["Neem oil", "Copper fungicide", "Bacillus subtilis"],
        conventional: &["Captan", "Imidacloprid", "Fungicide spray"],
        care_notes: "Remove runners and old leaves. Watch for gray mold.",
    },
    PlantEntry {
        kind: PlantKind::Fig,
        pruning_months: &[12, 1, 2, 3],
        spray_months: &[3, 4, 5, 8, 9],
        organic: &["Neem oil", "Copper fungicide", "Horticultural oil", "Insecticidal soap"],
        conventional: &["Captan", "Imidacloprid", "Malathion", "Systemic fungicide"],
        care_notes: "Minimal pruning needed. Remove suckers and dead wood. Watch for fig rust \
                     and scale insects.",
    },
    PlantEntry {
        kind: PlantKind::Avocado,
        pruning_months: &[2, 3, 4],
        spray_months: &[2, 3, 4, 5, 8, 9, 10],
        organic: &[
            "Neem oil",
            "Horticultural oil",
            "Copper fungicide",
            "Bacillus thuringiensis",
            "Spinosad",
        ],
        conventional: &[
            "Imidacloprid",
            "Abamectin",
            "Copper sulfate",
            "Systemic insecticide",
            "Fungicide spray",
        ],
        care_notes: "Light pruning only - remove dead branches and suckers. Sensitive to \
                     over-pruning. Watch for thrips, mites, and root rot.",
    },
    PlantEntry {
        kind: PlantKind::Kiwi,
        pruning_months: &[6, 7, 8],
        spray_months: &[9, 10, 11, 3, 4],
        organic: &[
            "Copper fungicide",
            "Neem oil",
            "Horticultural oil",
            "Bacillus thuringiensis",
            "Spinosad",
        ],
        conventional: &[
            "Captan",
            "Imidacloprid",
            "Mancozeb",
            "Systemic insecticide",
            "Fungicide spray",
        ],
        care_notes: "Heavy winter pruning required. Train on strong trellis system. Separate \
                     male and female plants needed. Watch for scale insects and bacterial canker.",
    },
    PlantEntry {
        kind: PlantKind::Persimmon,
        pruning_months: &[12, 1, 2],
        spray_months: &[3, 4, 5, 8, 9],
        organic: &[
            "Neem oil",
            "Copper fungicide",
            "Horticultural oil",
            "Bacillus subtilis",
            "Kaolin clay",
        ],
        conventional: &[
            "Captan",
            "Imidacloprid",
            "Propiconazole",
            "Malathion",
            "Fungicide spray",
        ],
        care_notes: "Minimal pruning needed - persimmons fruit on new wood. Remove water sprouts \
                     and dead branches. Watch for persimmon psylla and scale insects.",
    },
];

impl PlantEntry {
    fn to_profile(&self) -> PlantProfile {
        PlantProfile {
            kind: self.kind,
            display_name: self.kind.as_str().to_string(),
            pruning_months: self.pruning_months.to_vec(),
            spray_months: self.spray_months.to_vec(),
            spray_products: SprayProducts {
                organic: self.organic.iter().map(|p| p.to_string()).collect(),
                conventional: self.conventional.iter().map(|p| p.to_string()).collect(),
            },
            care_notes: self.care_notes.to_string(),
        }
    }
}

/// Validated plant catalog. Every profile has months in 1..=12 without
/// repeats and non-empty product lists for both spray types.
#[derive(Debug, Clone)]
pub struct PlantCatalog {
    profiles: BTreeMap<PlantKind, PlantProfile>,
}

impl PlantCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_profiles(PLANT_CARE_DATA.iter().map(PlantEntry::to_profile))
    }

    pub fn from_profiles(profiles: impl IntoIterator<Item = PlantProfile>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for profile in profiles {
            validate_profile(&profile)?;
            if map.insert(profile.kind, profile).is_some() {
                return Err(OrchardCareError::InvalidCatalog(
                    "duplicate plant entry".to_string(),
                ));
            }
        }
        tracing::debug!("Plant catalog loaded with {} entries", map.len());
        Ok(Self { profiles: map })
    }

    pub fn get(&self, kind: PlantKind) -> Option<&PlantProfile> {
        self.profiles.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlantProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }
}

fn validate_profile(profile: &PlantProfile) -> Result<()> {
    validate_months(profile, &profile.pruning_months)?;
    validate_months(profile, &profile.spray_months)?;

    if profile.spray_products.organic.is_empty() {
        return Err(OrchardCareError::InvalidCatalog(format!(
            "{} has no organic spray products",
            profile.key()
        )));
    }
    if profile.spray_products.conventional.is_empty() {
        return Err(OrchardCareError::InvalidCatalog(format!(
            "{} has no conventional spray products",
            profile.key()
        )));
    }
    Ok(())
}

fn validate_months(profile: &PlantProfile, months: &[u32]) -> Result<()> {
    for (i, &month) in months.iter().enumerate() {
        if !(1..=12).contains(&month) {
            return Err(OrchardCareError::InvalidMonthValue {
                plant: profile.key().to_string(),
                month,
            });
        }
        if months[..i].contains(&month) {
            return Err(OrchardCareError::InvalidCatalog(format!(
                "{} lists month {} twice",
                profile.key(),
                month
            )));
        }
    }
    Ok(())
}
