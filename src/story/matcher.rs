//! Maps a free-form utterance onto one of a scene's choices.
//!
//! Three passes, first hit wins:
//! 1. case-insensitive substring either way between utterance and label/id
//! 2. closest candidate by similarity ratio, at least `SIMILARITY_CUTOFF`
//! 3. share of the candidate's words (longer than two chars) found in the
//!    utterance, at least `TOKEN_OVERLAP_CUTOFF`

use std::collections::HashSet;

use super::scene::{Choice, Scene};

pub const SIMILARITY_CUTOFF: f64 = 0.45;
pub const TOKEN_OVERLAP_CUTOFF: f64 = 0.34;

pub fn match_choice<'a>(scene: &'a Scene, utterance: &str) -> Option<&'a Choice> {
    let user_lower = utterance.trim().to_lowercase();
    if user_lower.is_empty() {
        return None;
    }

    // (candidate text, choice), labels before ids within a choice
    let mut candidates: Vec<(String, &'a Choice)> = Vec::new();
    for choice in &scene.choices {
        if let Some(label) = choice.label.as_deref().map(str::trim) {
            if !label.is_empty() {
                candidates.push((label.to_string(), choice));
            }
        }
        if let Some(id) = choice.id.as_deref() {
            if !id.is_empty() {
                candidates.push((id.to_string(), choice));
            }
        }
    }
    if candidates.is_empty() {
        return None;
    }

    for (text, choice) in &candidates {
        let text_lower = text.to_lowercase();
        if text_lower.contains(&user_lower) || user_lower.contains(&text_lower) {
            return Some(*choice);
        }
    }

    let utterance = utterance.trim();
    let mut best_close: Option<(f64, &str, &'a Choice)> = None;
    for (text, choice) in &candidates {
        let score = similarity(text, utterance);
        if score < SIMILARITY_CUTOFF {
            continue;
        }
        // ties go to the lexically larger candidate
        let better = match best_close {
            None => true,
            Some((best, best_text, _)) => {
                score > best || (score == best && text.as_str() > best_text)
            }
        };
        if better {
            best_close = Some((score, text.as_str(), *choice));
        }
    }
    if let Some((_, _, choice)) = best_close {
        return Some(choice);
    }

    let user_tokens = tokens(&user_lower);
    let mut best_overlap: Option<(f64, &'a Choice)> = None;
    for (text, choice) in &candidates {
        let text_tokens = tokens(&text.to_lowercase());
        if text_tokens.is_empty() || user_tokens.is_empty() {
            continue;
        }
        let shared = text_tokens.intersection(&user_tokens).count();
        let score = shared as f64 / text_tokens.len() as f64;
        if score > best_overlap.map_or(0.0, |(best, _)| best) {
            best_overlap = Some((score, *choice));
        }
    }

    best_overlap
        .filter(|(score, _)| *score >= TOKEN_OVERLAP_CUTOFF)
        .map(|(_, choice)| choice)
}

fn tokens(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Ratcliff/Obershelp ratio: twice the matched characters over the total length
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(&a, &b) as f64 / total as f64
}

fn matched_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_common_block(a, b);
    if size == 0 {
        return 0;
    }
    size + matched_chars(&a[..i], &b[..j]) + matched_chars(&a[i + size..], &b[j + size..])
}

/// Longest common substring as (start in a, start in b, length). The
/// earliest block in `a`, then in `b`, wins among equals.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        let mut row = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                let size = prev[j] + 1;
                row[j + 1] = size;
                if size > best.2 {
                    best = (i + 1 - size, j + 1 - size, size);
                }
            }
        }
        prev = row;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene {
            id: Some("bridge".to_string()),
            choices: vec![
                Choice {
                    id: Some("pay".to_string()),
                    label: Some("Pay the ferryman".to_string()),
                    next_scene: Some("far_shore".to_string()),
                },
                Choice {
                    id: Some("jump".to_string()),
                    label: Some("Jump the gap".to_string()),
                    next_scene: Some("river".to_string()),
                },
            ],
            ..Default::default()
        }
    }

    fn matched_id(utterance: &str) -> Option<String> {
        let scene = scene();
        match_choice(&scene, utterance).and_then(|choice| choice.id.clone())
    }

    #[test]
    fn test_substring_match_ignores_case() {
        assert_eq!(matched_id("I want to PAY THE FERRYMAN please").as_deref(), Some("pay"));
        assert_eq!(matched_id("jump").as_deref(), Some("jump"));
    }

    #[test]
    fn test_close_spelling_matches() {
        assert_eq!(matched_id("Jmp teh gap").as_deref(), Some("jump"));
    }

    #[test]
    fn test_token_overlap_fallback() {
        // too long for the ratio, but shares "the" and "ferryman"
        assert_eq!(
            matched_id("honestly I would rather hand some silver coins over to the ferryman").as_deref(),
            Some("pay")
        );
    }

    #[test]
    fn test_unrelated_or_empty_input_does_not_match() {
        assert_eq!(matched_id("sing a song about dragons"), None);
        assert_eq!(matched_id("   "), None);
        assert_eq!(match_choice(&Scene::default(), "pay"), None);
    }

    #[test]
    fn test_similarity_ratio() {
        assert_eq!(similarity("abcd", "abcd"), 1.0);
        assert_eq!(similarity("abcd", "wxyz"), 0.0);
        // matching blocks "ab" and "d": 2 * 3 / 8
        assert!((similarity("abxd", "abyd") - 0.75).abs() < 1e-9);
    }
}
