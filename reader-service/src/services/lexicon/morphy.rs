//! Morphological reduction of inflected forms to WordNet base forms.
//!
//! Exception lists win outright; otherwise suffix rules are applied
//! repeatedly until some candidate exists in the index.

use super::PartOfSpeech;
use std::collections::HashMap;

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJ_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn rules(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => NOUN_RULES,
        PartOfSpeech::Verb => VERB_RULES,
        PartOfSpeech::Adjective => ADJ_RULES,
        PartOfSpeech::Adverb => &[],
    }
}

/// One round of suffix rules; duplicates are dropped so repeated rounds stay
/// linear in the word length.
fn apply_rules(forms: &[String], pos: PartOfSpeech) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for form in forms {
        for (old, new) in rules(pos) {
            if let Some(stem) = form.strip_suffix(old) {
                let candidate = format!("{}{}", stem, new);
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
    }
    out
}

fn filter_known<'a>(
    forms: impl IntoIterator<Item = &'a String>,
    is_known: &impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for form in forms {
        if is_known(form) && !result.contains(form) {
            result.push(form.clone());
        }
    }
    result
}

/// Base forms of `form` for `pos` that `is_known` accepts, best first.
pub fn base_forms(
    form: &str,
    pos: PartOfSpeech,
    exceptions: &HashMap<String, Vec<String>>,
    is_known: impl Fn(&str) -> bool,
) -> Vec<String> {
    let original = vec![form.to_string()];

    if let Some(bases) = exceptions.get(form) {
        return filter_known(original.iter().chain(bases.iter()), &is_known);
    }

    let mut forms = apply_rules(&original, pos);
    let results = filter_known(original.iter().chain(forms.iter()), &is_known);
    if !results.is_empty() {
        return results;
    }

    // Every rule shortens or rewrites a suffix, so this terminates.
    while !forms.is_empty() {
        forms = apply_rules(&forms, pos);
        let results = filter_known(forms.iter(), &is_known);
        if !results.is_empty() {
            return results;
        }
    }

    Vec::new()
}
