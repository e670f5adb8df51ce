//! Class-based TF-IDF term scoring.
//!
//! Classical TF-IDF scores a term against one document; here each cluster's
//! concatenated text is treated as a single "document", so scores measure
//! how characteristic a term is of a cluster. One deliberate departure from
//! the textbook formula: the idf numerator is the size of the original
//! corpus, not the number of clusters, which inflates idf toward the scale
//! of the input. Scores can go negative for terms saturating every cluster;
//! negative scores are preserved, not clamped.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::config::ScoringConfig;
use crate::error::TopicModelError;
use crate::types::ClusterId;

/// Score terms per cluster over the concatenated cluster texts.
///
/// `corpus_size` is the number of original documents (pre-grouping).
/// Returns, per cluster, `(term, score)` pairs sorted ascending by score
/// and truncated to the `top_n_terms` highest-scoring entries.
///
/// # Errors
/// - [`TopicModelError::Parameter`] if `corpus_size` is zero or the scoring
///   configuration is invalid.
/// - [`TopicModelError::DegenerateCluster`] if a cluster's text yields no
///   terms after tokenization and stopword filtering.
pub fn score_terms(
    texts_per_cluster: &BTreeMap<ClusterId, String>,
    corpus_size: usize,
    config: &ScoringConfig,
) -> Result<BTreeMap<ClusterId, Vec<(String, f32)>>, TopicModelError> {
    config.validate()?;
    if corpus_size == 0 {
        return Err(TopicModelError::Parameter(
            "corpus_size must be positive".to_string(),
        ));
    }

    // Term counts per cluster, plus corpus-wide totals for the idf term.
    let mut cluster_counts: BTreeMap<ClusterId, HashMap<String, usize>> = BTreeMap::new();
    let mut cluster_totals: BTreeMap<ClusterId, usize> = BTreeMap::new();
    let mut term_totals: HashMap<String, usize> = HashMap::new();

    for (&cluster, text) in texts_per_cluster {
        let terms = extract_terms(text, config.ngram_range);
        if terms.is_empty() {
            return Err(TopicModelError::DegenerateCluster { cluster });
        }

        cluster_totals.insert(cluster, terms.len());
        let counts = cluster_counts.entry(cluster).or_default();
        for term in terms {
            *term_totals.entry(term.clone()).or_insert(0) += 1;
            *counts.entry(term).or_insert(0) += 1;
        }
    }

    debug!(
        clusters = texts_per_cluster.len(),
        vocabulary = term_totals.len(),
        corpus_size = corpus_size,
        "Computed term counts"
    );

    let mut table = BTreeMap::new();
    for (&cluster, counts) in &cluster_counts {
        let cluster_total = cluster_totals[&cluster] as f32;

        let mut scored: Vec<(String, f32)> = counts
            .iter()
            .map(|(term, &count)| {
                let tf = count as f32 / cluster_total;
                let idf = (corpus_size as f32 / term_totals[term] as f32).ln();
                (term.clone(), tf * idf)
            })
            .collect();

        // Ascending by score; ties broken by term so output is stable.
        scored.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        if scored.len() > config.top_n_terms {
            scored.drain(..scored.len() - config.top_n_terms);
        }

        table.insert(cluster, scored);
    }

    Ok(table)
}

/// Tokenize text and expand tokens into the configured n-gram range.
fn extract_terms(text: &str, (lo, hi): (usize, usize)) -> Vec<String> {
    let tokens = tokenize(text);
    let mut terms = Vec::new();

    for size in lo..=hi {
        if size == 0 || size > tokens.len() {
            continue;
        }
        for window in tokens.windows(size) {
            terms.push(window.join(" "));
        }
    }

    terms
}

/// Tokenize text into lowercase words.
///
/// Filters out:
/// - Stop words (common English words)
/// - Single character tokens
/// - Numbers
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .filter(|s| s.len() > 1)
        .filter(|s| !is_stop_word(s))
        .filter(|s| !s.chars().all(|c| c.is_numeric()))
        .map(String::from)
        .collect()
}

/// Check if a word is a stop word.
fn is_stop_word(word: &str) -> bool {
    const STOP_WORDS: &[&str] = &[
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
        "it", "its", "of", "on", "or", "that", "the", "to", "was", "were", "will", "with", "this",
        "they", "but", "have", "had", "what", "when", "where", "who", "which", "why", "how", "all",
        "each", "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor",
        "not", "only", "own", "same", "so", "than", "too", "very", "can", "just", "should", "now",
        "also", "been", "being", "do", "does", "did", "doing", "would", "could", "might", "must",
        "shall", "about", "above", "after", "again", "against", "am", "any", "before", "below",
        "between", "into", "through", "during", "out", "over", "under", "up", "down", "then",
        "once", "here", "there", "if", "else", "while", "because", "until", "we", "you", "your",
        "our", "their", "him", "her", "them", "me", "my", "myself", "itself", "those", "these",
        "his",
    ];

    STOP_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_texts(texts: &[(i32, &str)]) -> BTreeMap<ClusterId, String> {
        texts
            .iter()
            .map(|&(id, text)| (id, text.to_string()))
            .collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Hello World");
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[test]
    fn test_tokenize_removes_stop_words() {
        let tokens = tokenize("the quick brown fox");
        assert!(!tokens.contains(&"the".to_string()));
        assert!(tokens.contains(&"quick".to_string()));
    }

    #[test]
    fn test_tokenize_removes_single_chars_and_numbers() {
        let tokens = tokenize("a b 123 rust");
        assert_eq!(tokens, vec!["rust"]);
    }

    #[test]
    fn test_extract_terms_unigrams() {
        let terms = extract_terms("rust systems programming", (1, 1));
        assert_eq!(terms, vec!["rust", "systems", "programming"]);
    }

    #[test]
    fn test_extract_terms_bigrams() {
        let terms = extract_terms("rust systems programming", (2, 2));
        assert_eq!(terms, vec!["rust systems", "systems programming"]);
    }

    #[test]
    fn test_extract_terms_mixed_range() {
        let terms = extract_terms("rust systems", (1, 2));
        assert_eq!(terms, vec!["rust", "systems", "rust systems"]);
    }

    #[test]
    fn test_score_terms_sorted_ascending() {
        let texts = cluster_texts(&[
            (0, "rust rust rust compiler borrow checker"),
            (1, "python python interpreter bytecode"),
        ]);
        let table = score_terms(&texts, 10, &ScoringConfig::default()).unwrap();

        for scores in table.values() {
            for pair in scores.windows(2) {
                assert!(pair[0].1 <= pair[1].1);
            }
        }
    }

    #[test]
    fn test_score_terms_disjoint_vocabularies() {
        let texts = cluster_texts(&[
            (0, "rust compiler borrow checker lifetimes"),
            (1, "espresso roast crema portafilter"),
        ]);
        let table = score_terms(&texts, 8, &ScoringConfig::default()).unwrap();

        let rust_vocab = ["rust", "compiler", "borrow", "checker", "lifetimes"];
        let coffee_vocab = ["espresso", "roast", "crema", "portafilter"];

        // Top term of each cluster stays within its own vocabulary.
        let top_0 = &table[&0].last().unwrap().0;
        let top_1 = &table[&1].last().unwrap().0;
        assert!(rust_vocab.contains(&top_0.as_str()));
        assert!(coffee_vocab.contains(&top_1.as_str()));
    }

    #[test]
    fn test_score_terms_negative_idf_preserved() {
        // "shared" appears 4 times across clusters with corpus_size 2, so
        // idf = ln(2/4) < 0.
        let texts = cluster_texts(&[(0, "shared shared alpha"), (1, "shared shared beta")]);
        let table = score_terms(&texts, 2, &ScoringConfig::default()).unwrap();

        let shared_score = table[&0]
            .iter()
            .find(|(term, _)| term == "shared")
            .map(|&(_, score)| score)
            .unwrap();
        assert!(shared_score < 0.0);
    }

    #[test]
    fn test_score_terms_idf_uses_corpus_size() {
        let texts = cluster_texts(&[(0, "alpha"), (1, "beta")]);
        let small = score_terms(&texts, 2, &ScoringConfig::default()).unwrap();
        let large = score_terms(&texts, 200, &ScoringConfig::default()).unwrap();

        // tf is 1.0 in both, so the score is the idf itself.
        let score_small = small[&0][0].1;
        let score_large = large[&0][0].1;
        assert!((score_small - 2.0f32.ln()).abs() < 1e-5);
        assert!((score_large - 200.0f32.ln()).abs() < 1e-5);
    }

    #[test]
    fn test_score_terms_truncates_to_top_n() {
        let texts = cluster_texts(&[(0, "one two three four five six seven eight nine ten")]);
        let config = ScoringConfig {
            top_n_terms: 3,
            ..Default::default()
        };
        let table = score_terms(&texts, 10, &config).unwrap();
        assert_eq!(table[&0].len(), 3);
    }

    #[test]
    fn test_score_terms_degenerate_cluster() {
        // Nothing survives the stopword and length filters.
        let texts = cluster_texts(&[(0, "rust compiler"), (1, "the a an 1 2 3")]);
        let result = score_terms(&texts, 5, &ScoringConfig::default());
        assert!(matches!(
            result,
            Err(TopicModelError::DegenerateCluster { cluster: 1 })
        ));
    }

    #[test]
    fn test_score_terms_zero_corpus_size() {
        let texts = cluster_texts(&[(0, "rust compiler")]);
        let result = score_terms(&texts, 0, &ScoringConfig::default());
        assert!(matches!(result, Err(TopicModelError::Parameter(_))));
    }

    #[test]
    fn test_score_terms_idempotent() {
        let texts = cluster_texts(&[
            (0, "rust compiler borrow checker"),
            (1, "python interpreter bytecode"),
        ]);
        let first = score_terms(&texts, 6, &ScoringConfig::default()).unwrap();
        let second = score_terms(&texts, 6, &ScoringConfig::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_terms_empty_input() {
        let texts = BTreeMap::new();
        let table = score_terms(&texts, 5, &ScoringConfig::default()).unwrap();
        assert!(table.is_empty());
    }
}
