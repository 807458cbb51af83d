use crate::exercises::{ExercisePool, WorkoutCategory};
use crate::nutrition::{MealMacroTarget, MealType};

/// System + user instruction pair for one text generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub const MEAL_SCHEMA: &[(&str, &str)] = &[
    ("Meal_name", "String"),
    ("Cuisine", "String"),
    ("Food_description", "String"),
    ("Ingredients", "String"),
    ("Cooking_Time", "Integer"),
    ("Recipe", "String"),
    ("Calories", "Integer"),
    ("Protein", "Integer"),
    ("Fat", "Integer"),
    ("Carbs", "Integer"),
    ("Serving_size", "String"),
];

pub const WORKOUT_EXERCISES: usize = 6;

fn render_schema<'a>(fields: impl IntoIterator<Item = (String, &'a str)>) -> String {
    fields
        .into_iter()
        .map(|(name, ty)| format!("  - {}: {}", name, ty))
        .collect::<Vec<_>>()
        .join("\n")
}

fn workout_schema() -> String {
    render_schema((1..=WORKOUT_EXERCISES).flat_map(|i| {
        [
            (format!("ExerciseName_{i}"), "String"),
            (format!("Sets_{i}"), "Integer"),
            (format!("Reps_{i}"), "Integer"),
        ]
    }))
}

fn phrase(user_phrase: Option<&str>) -> Option<&str> {
    user_phrase.map(str::trim).filter(|p| !p.is_empty())
}

pub fn meal_prompt(
    meal: MealType,
    liked_foods: &[String],
    target: &MealMacroTarget,
    user_phrase: Option<&str>,
) -> Prompt {
    let meal_name = meal.as_str();
    let system = format!(
        "You are a meal planner. The user lists the foods they like, the kind of meal they want \
         right now and their targets for calories, protein, carbs and fat. Create one AUTHENTIC \
         {meal_name} meal for them. Give ingredient measurements and a serving size that says how \
         much of the cooked dish to eat to hit the targets, for example \"100g fried rice\" or \
         \"2 pieces jerk chicken\".\n\
         Respond only with a JSON object with exactly these fields:\n{schema}",
        schema = render_schema(MEAL_SCHEMA.iter().map(|(n, t)| (n.to_string(), *t))),
    );

    let mut user = String::new();
    if !liked_foods.is_empty() {
        user.push_str(&format!("I like the following foods: {}. ", liked_foods.join(", ")));
    }
    if let Some(p) = phrase(user_phrase) {
        user.push_str(&format!("I am interested in {p} {meal_name} meals. "));
    }
    user.push_str(&format!(
        "My targets for {meal_name} are:\nCalories: {}\nProtein: {}%\nCarbs: {}%\nFat: {}%\n",
        target.calories, target.protein_percent, target.carb_percent, target.fat_percent,
    ));
    match phrase(user_phrase) {
        Some(p) => user.push_str(&format!("Generate an authentic meal from the cuisine of {p}. ")),
        None => user.push_str("Generate an authentic meal. "),
    }
    user.push_str("Use only the ingredients the authentic recipe needs.");

    Prompt { system, user }
}

pub fn workout_prompt(
    category: &WorkoutCategory,
    equipment: &[String],
    pool: &ExercisePool,
    user_phrase: Option<&str>,
) -> Prompt {
    let system = format!(
        "You are a workout planner. The user tells you the equipment they prefer and the type of \
         workout they want. Build a {label} workout focused on {sub} with exactly \
         {WORKOUT_EXERCISES} exercises taken from the exercise data given, with sets and reps.\n\
         Every ExerciseName must be the exact name from the data, in lowercase.\n\
         Respond only with a JSON object with exactly these fields:\n{schema}",
        label = category.label(),
        sub = category.sub_category.to_lowercase(),
        schema = workout_schema(),
    );

    let exercises = pool
        .iter()
        .map(|ex| {
            format!(
                "name ({}) target {} bodypart {}",
                ex.name.to_lowercase(),
                ex.target_muscle,
                ex.body_part
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    let mut user = format!(
        "I prefer the following equipment: {}. Available exercises: {}.",
        equipment.join(", "),
        exercises
    );
    if let Some(p) = phrase(user_phrase) {
        user.push_str(&format!(
            " Use \"{p}\" only to narrow down the body part I want; do not suggest anything that is not in the data."
        ));
    }
    user.push_str(&format!(
        " Pick {WORKOUT_EXERCISES} exercises from this list at random and give sets and reps for each."
    ));

    Prompt { system, user }
}

pub fn image_prompt(meal_name: &str) -> String {
    format!(
        "A high-resolution, detailed photograph of a single, well-prepared serving of {meal_name}. \
         The key ingredients are clearly recognizable with fresh, vibrant colors and textures, \
         plated in a way that reflects its culinary tradition, against a simple uncluttered \
         background. Bright, balanced lighting and a crisp high-end food photography style."
    )
}
