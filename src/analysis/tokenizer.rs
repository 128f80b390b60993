use std::collections::BTreeSet;
use unicode_segmentation::UnicodeSegmentation;
use crate::analysis::token::Term;

/// Split `text` into runs of letters and digits, then lowercase each run.
///
/// Text is walked by extended grapheme cluster, so combining marks stay with
/// the letter they modify ("cafe\u{301}", Devanagari vowel signs and viramas).
/// A cluster whose base character is neither a letter nor a digit is a
/// boundary. Terms come back in left-to-right order, duplicates included.
pub fn tokenize(text: &str) -> Vec<Term> {
    let mut terms = Vec::new();
    let mut word = String::new();

    for grapheme in text.graphemes(true) {
        if grapheme.chars().next().is_some_and(char::is_alphanumeric) {
            word.push_str(grapheme);
        } else if !word.is_empty() {
            terms.push(normalize(&word));
            word.clear();
        }
    }
    if !word.is_empty() {
        terms.push(normalize(&word));
    }

    terms
}

/// Lowercase one isolated word. Final sigma folds to σ so "ΟΔΟΣ", "οδος"
/// and "οδοσ" all name the same term.
fn normalize(word: &str) -> Term {
    Term::new(&word.to_lowercase().replace('ς', "σ"))
}

/// Distinct terms of `text`; a term repeated in one document posts once.
pub fn unique_terms(text: &str) -> BTreeSet<Term> {
    tokenize(text).into_iter().collect()
}

/// The term a query string resolves to. Only the first term is used.
pub fn query_term(query: &str) -> Option<Term> {
    tokenize(query).into_iter().next()
}
