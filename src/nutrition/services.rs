use super::repo_types::{MealMacroTarget, MealType, UserMacroProfile};

impl UserMacroProfile {
    pub fn meal_percent(&self, meal: MealType) -> f64 {
        match meal {
            MealType::Breakfast => self.breakfast_percent,
            MealType::Lunch => self.lunch_percent,
            MealType::Dinner => self.dinner_percent,
        }
    }
}

/// Scale the daily profile by the meal's own share of the day.
pub fn allocate(profile: &UserMacroProfile, meal: MealType) -> MealMacroTarget {
    let share = profile.meal_percent(meal);
    MealMacroTarget {
        calories: profile.calories * share,
        protein_percent: profile.protein_percent * share,
        carb_percent: profile.carb_percent * share,
        fat_percent: profile.fat_percent * share,
    }
}
