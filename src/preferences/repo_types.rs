use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A preference category and the per-user view it is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreferenceCategory {
    // food
    Dairy,
    Fats,
    Fruits,
    Grains,
    Nuts,
    Proteins,
    Sweets,
    Vegetables,
    // equipment
    Core,
    LowerBody,
    UpperBody,
    Cardio,
}

impl PreferenceCategory {
    pub const FOOD: [PreferenceCategory; 8] = [
        Self::Dairy,
        Self::Fats,
        Self::Fruits,
        Self::Grains,
        Self::Nuts,
        Self::Proteins,
        Self::Sweets,
        Self::Vegetables,
    ];

    pub const EQUIPMENT: [PreferenceCategory; 4] =
        [Self::Core, Self::LowerBody, Self::UpperBody, Self::Cardio];

    pub fn view(self) -> &'static str {
        match self {
            Self::Dairy => "user_dairy_view",
            Self::Fats => "user_fats_view",
            Self::Fruits => "user_fruits_view",
            Self::Grains => "user_grains_view",
            Self::Nuts => "user_nuts_view",
            Self::Proteins => "user_proteins_view",
            Self::Sweets => "user_sweets_view",
            Self::Vegetables => "user_vegetables_view",
            Self::Core => "user_core_equipment_view",
            Self::LowerBody => "user_lower_body_equipment_view",
            Self::UpperBody => "user_upper_body_equipment_view",
            Self::Cardio => "user_cardio_equipment_view",
        }
    }

    pub fn name_column(self) -> &'static str {
        match self {
            Self::Dairy => "dairy_name",
            Self::Fats => "fat_name",
            Self::Fruits => "fruit_name",
            Self::Grains => "grain_name",
            Self::Nuts => "nut_name",
            Self::Proteins => "protein_name",
            Self::Sweets => "sweet_name",
            Self::Vegetables => "vegetable_name",
            Self::Core => "core_equipment_name",
            Self::LowerBody => "lower_body_equipment_name",
            Self::UpperBody => "upper_body_equipment_name",
            Self::Cardio => "cardio_equipment_name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceItem {
    pub item_name: String,
    pub preference: bool,
}

impl PreferenceItem {
    pub fn liked(name: impl Into<String>) -> Self {
        Self {
            item_name: name.into(),
            preference: true,
        }
    }
}

/// Per-category preference entries, iterated in category order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceSet(pub BTreeMap<PreferenceCategory, Vec<PreferenceItem>>);

impl PreferenceSet {
    pub fn get(&self, category: PreferenceCategory) -> &[PreferenceItem] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of liked entries only, in category then row order.
    pub fn liked_names(&self) -> Vec<String> {
        self.0
            .values()
            .flatten()
            .filter(|item| item.preference)
            .map(|item| item.item_name.clone())
            .collect()
    }

    pub fn liked_count(&self) -> usize {
        self.0.values().flatten().filter(|item| item.preference).count()
    }
}
