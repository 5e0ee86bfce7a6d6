use crate::engine::dictionary::Dictionary;
use std::collections::HashSet;

/// Largest edit distance searched for candidates.
const MAX_DISTANCE: u32 = 2;

/// Generate spelling suggestions for `word`.
///
/// Candidates come from the dictionary and the user's added words. Closer
/// matches are tried first; the wider search only runs when the tighter
/// one leaves room. The casing of `word` is carried over to the result.
pub fn generate<'a, I>(
    word: &str,
    dictionary: Option<&Dictionary>,
    extra_words: I,
    max_suggestions: usize,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    if max_suggestions == 0 || word.is_empty() {
        return Vec::new();
    }

    let lower = word.to_lowercase();
    let extra: Vec<&str> = extra_words.into_iter().collect();
    let mut seen = HashSet::new();
    let mut ranked: Vec<(usize, String)> = Vec::new();

    for distance in 1..=MAX_DISTANCE {
        let mut candidates = dictionary
            .map(|dict| dict.within_distance(&lower, distance))
            .unwrap_or_default();
        candidates.extend(
            extra
                .iter()
                .filter(|w| strsim::levenshtein(&lower, &w.to_lowercase()) <= distance as usize)
                .map(|w| w.to_string()),
        );

        for candidate in candidates {
            if candidate == lower || candidate == word {
                continue;
            }
            if seen.insert(candidate.clone()) {
                ranked.push((strsim::levenshtein(&lower, &candidate), candidate));
            }
        }

        if ranked.len() >= max_suggestions {
            break;
        }
    }

    ranked.sort();
    ranked
        .into_iter()
        .take(max_suggestions)
        .map(|(_, candidate)| match_case(word, &candidate))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Casing {
    Lower,
    Capitalized,
    Upper,
}

fn casing(word: &str) -> Casing {
    let mut letters = word.chars().filter(|c| c.is_alphabetic());
    let Some(first) = letters.next() else {
        return Casing::Lower;
    };
    let rest: Vec<char> = letters.collect();

    if first.is_uppercase() && !rest.is_empty() && rest.iter().all(|c| c.is_uppercase()) {
        Casing::Upper
    } else if first.is_uppercase() {
        Casing::Capitalized
    } else {
        Casing::Lower
    }
}

/// Re-case a dictionary candidate to look like the misspelled input.
fn match_case(original: &str, candidate: &str) -> String {
    match casing(original) {
        Casing::Lower => candidate.to_string(),
        Casing::Upper => candidate.to_uppercase(),
        Casing::Capitalized => {
            let mut chars = candidate.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
