use crate::domain::knowledge::{
    entities::KnowledgeEntry,
    value_objects::{RetrievalQuery, RetrievalResult, RetrievedFragment},
};

/// Summaries longer than this are scored line by line.
pub const FRAGMENT_SPLIT_THRESHOLD: usize = 500;

/// Ranks knowledge fragments by how many query keywords they contain.
///
/// Zero-score fragments are dropped, the rest are sorted by descending score
/// (stable, so ties keep corpus order) and truncated to `k`.
pub fn retrieve(query: &RetrievalQuery, corpus: &[KnowledgeEntry], k: usize) -> RetrievalResult {
    let keywords = query.keywords();
    if keywords.is_empty() || corpus.is_empty() || k == 0 {
        return RetrievalResult::empty();
    }

    let mut scored: Vec<RetrievedFragment> = corpus
        .iter()
        .flat_map(|entry| {
            split_fragments(&entry.ai_summary)
                .into_iter()
                .map(move |fragment| (entry.id, fragment))
        })
        .filter_map(|(entry_id, fragment)| {
            let score = score_fragment(&keywords, fragment);
            (score > 0).then(|| RetrievedFragment {
                entry_id,
                text: fragment.to_string(),
                score,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(k);

    RetrievalResult { fragments: scored }
}

/// Splits a summary into scoring units.
pub fn split_fragments(summary: &str) -> Vec<&str> {
    if summary.chars().count() > FRAGMENT_SPLIT_THRESHOLD {
        summary
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    } else {
        let trimmed = summary.trim();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed]
        }
    }
}

fn score_fragment(keywords: &[String], fragment: &str) -> usize {
    let haystack = fragment.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| haystack.contains(keyword.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn entry(n: u128, summary: &str) -> KnowledgeEntry {
        KnowledgeEntry {
            id: Uuid::from_u128(n),
            ai_summary: summary.to_string(),
            source_filename: format!("doc-{n}.pdf"),
            uploaded_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let corpus = vec![entry(1, "Iron rich foods for infants")];
        let result = retrieve(&RetrievalQuery::new("   "), &corpus, 4);
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_corpus_returns_nothing() {
        let result = retrieve(&RetrievalQuery::new("iron infant"), &[], 4);
        assert!(result.is_empty());
    }

    #[test]
    fn test_results_sorted_by_score_and_truncated() {
        let corpus = vec![
            entry(1, "Zinc supports growth."),
            entry(2, "Iron and zinc for the anemic infant."),
            entry(3, "Iron fortified cereals."),
            entry(4, "Unrelated text about sleep."),
            entry(5, "Infant iron needs rise at six months."),
        ];
        let query = RetrievalQuery::new("iron zinc infant");

        let result = retrieve(&query, &corpus, 3);

        assert_eq!(result.len(), 3);
        assert_eq!(result.fragments[0].entry_id, Uuid::from_u128(2));
        assert_eq!(result.fragments[0].score, 3);
        assert_eq!(result.fragments[1].entry_id, Uuid::from_u128(5));
        assert_eq!(result.fragments[1].score, 2);
        assert!(
            result
                .fragments
                .windows(2)
                .all(|pair| pair[0].score >= pair[1].score)
        );
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let corpus = vec![
            entry(1, "iron first"),
            entry(2, "iron second"),
            entry(3, "iron third"),
        ];
        let result = retrieve(&RetrievalQuery::new("iron"), &corpus, 4);
        let ids: Vec<_> = result.fragments.iter().map(|f| f.entry_id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)]
        );
    }

    #[test]
    fn test_long_summary_is_split_into_lines() {
        let mut summary = String::from("Breastfeeding guidance for the first months.\n\n");
        summary.push_str(&"filler text without keywords. ".repeat(20));
        summary.push_str("\nPeanut introduction should be gradual.");
        assert!(summary.chars().count() > FRAGMENT_SPLIT_THRESHOLD);

        let corpus = vec![entry(1, &summary)];
        let result = retrieve(&RetrievalQuery::new("peanut"), &corpus, 4);

        assert_eq!(result.len(), 1);
        assert_eq!(result.fragments[0].text, "Peanut introduction should be gradual.");
    }

    #[test]
    fn test_short_summary_is_one_fragment() {
        let fragments = split_fragments("  line one\nline two  ");
        assert_eq!(fragments, vec!["line one\nline two"]);
        assert!(split_fragments("   ").is_empty());
    }

    #[test]
    fn test_bounded_and_ordered_for_many_corpora() {
        const WORDS: [&str; 6] = ["iron", "zinc", "infant", "toddler", "peanut", "sleep"];
        let queries = [
            RetrievalQuery::new("iron"),
            RetrievalQuery::new("iron zinc infant"),
            RetrievalQuery::new("toddler peanut sleep iron"),
        ];

        for size in [0usize, 1, 2, 5, 9, 16] {
            let corpus: Vec<KnowledgeEntry> = (0..size)
                .map(|i| {
                    let summary = WORDS
                        .iter()
                        .enumerate()
                        .filter(|(w, _)| (i * 7 + w * 3) % (w + 2) == 0)
                        .map(|(_, word)| *word)
                        .collect::<Vec<_>>()
                        .join(" ");
                    entry(i as u128, &format!("note {i}: {summary}"))
                })
                .collect();

            for query in &queries {
                for k in 0..=10 {
                    let result = retrieve(query, &corpus, k);

                    assert!(result.len() <= k, "size {size} k {k}");
                    assert!(result.len() <= corpus.len());
                    assert!(result.fragments.iter().all(|f| f.score > 0));
                    assert!(
                        result
                            .fragments
                            .windows(2)
                            .all(|pair| pair[0].score >= pair[1].score),
                        "size {size} k {k} query {:?}",
                        query.text()
                    );
                }
            }
        }
    }

    #[test]
    fn test_zero_k_returns_nothing() {
        let corpus = vec![entry(1, "iron")];
        assert!(retrieve(&RetrievalQuery::new("iron"), &corpus, 0).is_empty());
    }
}
