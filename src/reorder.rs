// src/reorder.rs

//! Re-order Paragraphs builder.
//!
//! Admins enter paragraphs in their correct order. Each paragraph gets a
//! letter id by position (A, B, C, ... Z, AA, AB, ...), the letter sequence
//! becomes the answer key, and the paragraphs are stored shuffled.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::AdminError;
use crate::models::question::Paragraph;

/// Shuffled paragraphs plus the answer key that restores entry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderKey {
    pub sentences: Vec<Paragraph>,
    pub correct_order: Vec<String>,
}

/// Spreadsheet-style column letters: 0 → A, 25 → Z, 26 → AA.
pub fn letter_id(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Builds the stored form of a reorder question from paragraphs in correct order.
pub fn build_with<R: Rng + ?Sized>(
    paragraphs: &[String],
    rng: &mut R,
) -> Result<ReorderKey, AdminError> {
    if paragraphs.len() < 2 {
        return Err(AdminError::Validation(
            "Re-order questions need at least 2 paragraphs".to_string(),
        ));
    }
    if let Some(pos) = paragraphs.iter().position(|p| p.trim().is_empty()) {
        return Err(AdminError::Validation(format!(
            "Paragraph {} is empty",
            letter_id(pos)
        )));
    }

    let ordered: Vec<Paragraph> = paragraphs
        .iter()
        .enumerate()
        .map(|(i, text)| Paragraph {
            id: letter_id(i),
            text: text.clone(),
        })
        .collect();

    let correct_order = ordered.iter().map(|p| p.id.clone()).collect();
    let mut sentences = ordered;
    sentences.shuffle(rng);

    Ok(ReorderKey {
        sentences,
        correct_order,
    })
}

/// [`build_with`] using the thread-local generator.
pub fn build(paragraphs: &[String]) -> Result<ReorderKey, AdminError> {
    build_with(paragraphs, &mut rand::rng())
}

/// Maps shuffled `sentences` back through `correct_order`.
///
/// Fails when the key names an unknown id, repeats an id, or leaves a
/// sentence out.
pub fn reconstruct(sentences: &[Paragraph], correct_order: &[String]) -> Result<Vec<String>, AdminError> {
    if sentences.len() != correct_order.len() {
        return Err(AdminError::Validation(format!(
            "Answer key has {} entries for {} paragraphs",
            correct_order.len(),
            sentences.len()
        )));
    }

    let mut by_id: HashMap<&str, &str> = sentences
        .iter()
        .map(|p| (p.id.as_str(), p.text.as_str()))
        .collect();

    correct_order
        .iter()
        .map(|id| {
            by_id
                .remove(id.as_str())
                .map(str::to_string)
                .ok_or_else(|| AdminError::Validation(format!("Answer key entry '{}' does not match a paragraph", id)))
        })
        .collect()
}
