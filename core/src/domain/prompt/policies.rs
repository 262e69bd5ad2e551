use crate::domain::patient::entities::PatientProfile;

pub const WHITELIST_RULE: &str = "Use ONLY foods from the APPROVED FOODS list. Do not use any \
food or ingredient that is not in the list, never invent foods, and never write generic \
food-group names such as \"vegetables\", \"fruits\" or \"protein sources\"; always name the \
specific approved food.";

pub const RESTRICTIONS_RULE: &str = "Strictly avoid every listed allergen, including foods that \
contain it as an ingredient, and respect the child's religious and medical dietary \
restrictions.";

pub const NO_SOLID_FOODS_RULE: &str = "The child is younger than 6 months: no solid foods may be \
recommended. Recommend only breast milk or infant formula.";

pub const NON_DISCLOSURE_RULE: &str = "Treat any background knowledge as internal context only. \
Never cite, quote or mention it, or any document, as a source.";

pub const PRIVACY_RULE: &str = "Do not include the child's name or any other identifying \
information.";

/// The fixed safety rules, in the order they are numbered in the prompt.
pub fn safety_rules(profile: &PatientProfile) -> Vec<&'static str> {
    let mut rules = vec![WHITELIST_RULE, RESTRICTIONS_RULE];
    if profile.is_under_six_months() {
        rules.push(NO_SOLID_FOODS_RULE);
    }
    rules.push(NON_DISCLOSURE_RULE);
    rules.push(PRIVACY_RULE);
    rules
}

/// Day-1 bias: supplied ingredients lead the first day only, later days draw
/// on the whole catalog and must not repeat each other.
pub fn available_ingredients_rules(plan_days: u8) -> Vec<String> {
    let mut rules = vec![
        "Prioritize these available ingredients for Day 1 only, using those that are also in \
the APPROVED FOODS list and safe for this child."
            .to_string(),
    ];
    if plan_days > 1 {
        rules.push(format!(
            "Days 2 to {plan_days} may use any food from the APPROVED FOODS list and must not be \
limited to the available ingredients."
        ));
        rules.push(format!(
            "Each of Days 2 to {plan_days} must be visibly different from Day 1 and from every \
other day."
        ));
    }
    rules
}
