use uuid::Uuid;

use crate::domain::patient::entities::{PatientProfile, is_placeholder};

/// Keyword bag used to score knowledge fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalQuery {
    text: String,
}

impl RetrievalQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Builds the query from age, age band, medical conditions and allergies.
    /// The same profile always yields the same query.
    pub fn from_profile(profile: &PatientProfile) -> Self {
        let mut terms: Vec<String> = Vec::new();

        if let Some(age) = profile.age_months {
            terms.push(age.to_string());
        }
        if let Some(band) = profile.age_band() {
            terms.push(band.keyword().to_string());
        }
        if let Some(conditions) = profile.medical_conditions.as_deref() {
            terms.extend(significant_words(conditions));
        }
        for allergy in &profile.allergies {
            terms.extend(significant_words(allergy));
        }

        let mut seen = Vec::with_capacity(terms.len());
        for term in terms {
            if !seen.contains(&term) {
                seen.push(term);
            }
        }

        Self {
            text: seen.join(" "),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercase whitespace-separated keywords, duplicates removed.
    pub fn keywords(&self) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();
        for word in self.text.to_lowercase().split_whitespace() {
            if !keywords.iter().any(|k| k == word) {
                keywords.push(word.to_string());
            }
        }
        keywords
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn significant_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| !is_placeholder(word))
        .filter(|word| word.chars().count() >= 3 || word.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedFragment {
    pub entry_id: Uuid,
    pub text: String,
    pub score: usize,
}

/// Fragments ordered by descending score; ties keep discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievalResult {
    pub fragments: Vec<RetrievedFragment>,
}

impl RetrievalResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.fragments.iter().map(|f| f.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::entities::parse_allergies;

    fn profile() -> PatientProfile {
        let mut profile = PatientProfile::new(Uuid::nil());
        profile.age_months = Some(18);
        profile.medical_conditions = Some("Iron-deficiency anemia, of mild grade".to_string());
        profile.allergies = parse_allergies("Peanuts, Egg");
        profile
    }

    #[test]
    fn test_query_from_profile_is_deterministic() {
        let first = RetrievalQuery::from_profile(&profile());
        let second = RetrievalQuery::from_profile(&profile());
        assert_eq!(first, second);
        assert_eq!(
            first.keywords(),
            vec!["18", "toddler", "iron-deficiency", "anemia", "mild", "grade", "peanuts", "egg"]
        );
    }

    #[test]
    fn test_query_skips_placeholder_fields() {
        let mut profile = PatientProfile::new(Uuid::nil());
        profile.medical_conditions = Some("None".to_string());
        assert!(RetrievalQuery::from_profile(&profile).is_empty());
    }

    #[test]
    fn test_keywords_are_lowercase_and_unique() {
        let query = RetrievalQuery::new("Iron IRON  zinc");
        assert_eq!(query.keywords(), vec!["iron", "zinc"]);
    }
}
