use crate::domain::{
    assessment::entities::SectionKey,
    food::entities::{FamilyRecipe, FoodRecord},
    knowledge::value_objects::RetrievalResult,
    patient::entities::{HistoryEntry, HistoryKind, PatientProfile, is_placeholder},
    prompt::{
        policies::{available_ingredients_rules, safety_rules},
        value_objects::{CompositionOptions, GenerationMode, PromptContext},
    },
};

/// History entries longer than this are shortened in the prompt.
const HISTORY_ENTRY_MAX_CHARS: usize = 800;

/// Builds the instruction document for one generation call.
///
/// Pure: the same inputs always produce byte-identical text. Identifying
/// profile fields (names, guardian, address, contact) are never read.
pub fn compose(
    profile: &PatientProfile,
    retrieval: &RetrievalResult,
    foods: &[FoodRecord],
    available_ingredients: Option<&str>,
    mode: GenerationMode,
    options: &CompositionOptions,
) -> PromptContext {
    let plan_days = options.plan_days.max(1);
    let mut blocks: Vec<String> = Vec::new();

    blocks.push(introduction(mode, plan_days));
    blocks.push(format!("CHILD PROFILE:\n{}", render_profile(profile)));

    if let Some(whitelist) = render_whitelist(foods) {
        blocks.push(format!(
            "APPROVED FOODS (the only foods you may name):\n{whitelist}"
        ));
    }

    if !retrieval.is_empty() {
        let background = retrieval.texts().collect::<Vec<_>>().join("\n---\n");
        blocks.push(format!(
            "BACKGROUND KNOWLEDGE (internal context, do not cite):\n{background}"
        ));
    }

    match mode {
        GenerationMode::MealPlan => {
            let ingredients = available_ingredients
                .map(single_line)
                .filter(|text| !text.is_empty());
            if let Some(ingredients) = ingredients {
                blocks.push(format!(
                    "AVAILABLE INGREDIENTS AT HOME: {ingredients}\n{}",
                    bullet_list(&available_ingredients_rules(plan_days))
                ));
            }
        }
        GenerationMode::Assessment => {
            blocks.push(render_history(&options.history, options.history_limit));
        }
        GenerationMode::RecipeReview => {
            blocks.push(render_recipes(&options.recipes));
        }
    }

    let rules = safety_rules(profile)
        .iter()
        .enumerate()
        .map(|(index, rule)| format!("{}. {rule}", index + 1))
        .collect::<Vec<_>>()
        .join("\n");
    blocks.push(format!("SAFETY RULES:\n{rules}"));

    blocks.push(output_format(mode, plan_days, profile));

    PromptContext {
        mode,
        text: blocks.join("\n\n"),
    }
}

fn introduction(mode: GenerationMode, plan_days: u8) -> String {
    match mode {
        GenerationMode::MealPlan => format!(
            "You are a pediatric nutrition expert. Create a {plan_days}-day meal plan for a \
child (0-5 years old) with the profile below, based only on the approved foods."
        ),
        GenerationMode::Assessment => "You are a pediatric nutrition expert. Write a dietary \
assessment for a child (0-5 years old) with the profile below, including a 7-day meal plan \
based only on the approved foods."
            .to_string(),
        GenerationMode::RecipeReview => "You are a pediatric nutrition expert. Review the \
family recipes below and decide which are suitable for a child (0-5 years old) with the \
profile below."
            .to_string(),
    }
}

/// Fixed field order; absent values are spelled out rather than omitted.
fn render_profile(profile: &PatientProfile) -> String {
    let age = profile
        .age_months
        .map(|age| format!("{age} months"))
        .unwrap_or_else(unknown);
    let weight = profile
        .weight_kg
        .map(|weight| format!("{weight:.1} kg"))
        .unwrap_or_else(unknown);
    let height = profile
        .height_cm
        .map(|height| format!("{height:.1} cm"))
        .unwrap_or_else(unknown);
    let bmi = profile
        .bmi()
        .map(|bmi| format!("{bmi:.1}"))
        .unwrap_or_else(unknown);
    let bmi_category = text_or(profile.bmi_category.as_deref(), "Unknown");
    let allergies = if profile.allergies.is_empty() {
        "None".to_string()
    } else {
        profile
            .allergies
            .iter()
            .map(|allergy| single_line(allergy))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let conditions = text_or(profile.medical_conditions.as_deref(), "None");
    let religion = text_or(profile.religion.as_deref(), "None");
    let sex = profile
        .sex
        .map(|sex| sex.to_string())
        .unwrap_or_else(unknown);
    let breastfeeding = match profile.breastfeeding {
        Some(true) => "Yes".to_string(),
        Some(false) => "No".to_string(),
        None => unknown(),
    };

    [
        format!("- Age: {age}"),
        format!("- Weight: {weight}"),
        format!("- Height: {height}"),
        format!("- BMI: {bmi}"),
        format!("- BMI Category: {bmi_category}"),
        format!("- Allergies: {allergies}"),
        format!("- Medical Conditions: {conditions}"),
        format!("- Religion: {religion}"),
        format!("- Sex: {sex}"),
        format!("- Breastfeeding: {breastfeeding}"),
    ]
    .join("\n")
}

/// Bullet list of catalog names, deduplicated case-insensitively in catalog
/// order. `None` when there is nothing to list.
fn render_whitelist(foods: &[FoodRecord]) -> Option<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();

    for food in foods {
        let name = single_line(&food.name);
        if name.is_empty() {
            continue;
        }
        let folded = name.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        lines.push(format!("- {name}"));
    }

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn render_history(history: &[HistoryEntry], limit: usize) -> String {
    let entries: Vec<String> = history
        .iter()
        .take(limit)
        .map(|entry| {
            let kind = match entry.kind {
                HistoryKind::Note => "note",
                HistoryKind::MealPlan => "meal plan",
            };
            format!(
                "- {} ({kind}): {}",
                entry.date.format("%Y-%m-%d"),
                truncate_chars(&single_line(&entry.text), HISTORY_ENTRY_MAX_CHARS)
            )
        })
        .collect();

    if entries.is_empty() {
        "PREVIOUS NOTES AND MEAL PLANS: None recorded.".to_string()
    } else {
        format!(
            "PREVIOUS NOTES AND MEAL PLANS (most recent first):\n{}",
            entries.join("\n")
        )
    }
}

fn render_recipes(recipes: &[FamilyRecipe]) -> String {
    let rendered = recipes
        .iter()
        .map(|recipe| {
            format!(
                "Recipe: {}\nDescription: {}\n---",
                single_line(&recipe.name),
                single_line(&recipe.description)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("FAMILY RECIPES TO REVIEW:\n{rendered}")
}

fn output_format(mode: GenerationMode, plan_days: u8, profile: &PatientProfile) -> String {
    match mode {
        GenerationMode::MealPlan => {
            let meals = if profile.is_under_six_months() {
                "a feeding schedule (times and approximate amounts of breast milk or formula)"
            } else {
                "breakfast, mid-morning snack, lunch, afternoon snack and dinner, each with an \
age-appropriate portion size"
            };
            format!(
                "OUTPUT FORMAT:\nLabel each day \"Day 1\" to \"Day {plan_days}\". For each day list \
{meals}. Finish with a brief explanation of your choices. Keep the output short and practical."
            )
        }
        GenerationMode::Assessment => {
            let headings = SectionKey::ALL
                .iter()
                .map(|key| format!("## {}", key.heading()))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "OUTPUT FORMAT:\nWrite the assessment under exactly these seven headings, in this \
order, each on its own line and spelled exactly as shown. Do not add other headings.\n{headings}"
            )
        }
        GenerationMode::RecipeReview => "OUTPUT FORMAT:\nFor each recipe provide:\n\
1. SUITABLE or NOT SUITABLE\n\
2. The reason, considering allergies, age-appropriateness and medical conditions\n\
3. If suitable: modifications for the child's age and conditions\n\
4. If not suitable: why, and alternatives from the approved foods"
            .to_string(),
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn text_or(value: Option<&str>, default: &str) -> String {
    match value.map(single_line) {
        Some(text) if !is_placeholder(&text) => text,
        _ => default.to_string(),
    }
}

/// Collapses internal whitespace so a value cannot break the field layout.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max).collect();
        truncated.push_str("...");
        truncated
    }
}
