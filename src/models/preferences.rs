use super::{Hemisphere, PlantKind, SprayType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub hemisphere: Hemisphere,
    pub organic_preference: bool,
    pub selected_plants: Vec<PlantKind>,
}

impl UserPreferences {
    pub fn new(hemisphere: Hemisphere, organic_preference: bool) -> Self {
        Self {
            hemisphere,
            organic_preference,
            selected_plants: Vec::new(),
        }
    }

    /// Builds preferences from raw plant keys. Unknown keys are dropped with
    /// a warning and duplicates collapse onto their first occurrence.
    pub fn from_keys<S: AsRef<str>>(
        hemisphere: Hemisphere,
        organic_preference: bool,
        keys: &[S],
    ) -> Self {
        let mut prefs = Self::new(hemisphere, organic_preference);
        for key in keys {
            match PlantKind::from_key(key.as_ref()) {
                Some(kind) => prefs.select(kind),
                None => tracing::warn!("Ignoring unknown plant '{}'", key.as_ref()),
            }
        }
        prefs
    }

    #[cfg(test)]
    pub fn with_plant(mut self, kind: PlantKind) -> Self {
        self.select(kind);
        self
    }

    pub fn select(&mut self, kind: PlantKind) {
        if !self.selected_plants.contains(&kind) {
            self.selected_plants.push(kind);
        }
    }

    /// Select or deselect. Returns whether the plant is now selected.
    pub fn toggle(&mut self, kind: PlantKind) -> bool {
        if self.is_selected(kind) {
            self.selected_plants.retain(|&p| p != kind);
            false
        } else {
            self.selected_plants.push(kind);
            true
        }
    }

    pub fn is_selected(&self, kind: PlantKind) -> bool {
        self.selected_plants.contains(&kind)
    }

    pub fn spray_type(&self) -> SprayType {
        SprayType::from_preference(self.organic_preference)
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::new(Hemisphere::Northern, true)
    }
}
