// tests/reorder_tests.rs

use std::collections::BTreeSet;

use pte_admin::error::AdminError;
use pte_admin::models::question::{Paragraph, Question, QuestionKind};
use pte_admin::reorder::{build_with, letter_id, reconstruct};
use pte_admin::resources::{Draft, QuestionDraft, QuestionResource, Resource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn paragraphs(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Paragraph number {}.", i + 1)).collect()
}

#[test]
fn random_paragraph_sets_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..50 {
        // Arrange
        let n = rng.random_range(2..40);
        let input = paragraphs(n);

        // Act
        let key = build_with(&input, &mut rng).expect("valid paragraphs");

        // Assert: key holds n distinct letters in entry order
        assert_eq!(key.correct_order.len(), n);
        let distinct: BTreeSet<&String> = key.correct_order.iter().collect();
        assert_eq!(distinct.len(), n);
        let expected: Vec<String> = (0..n).map(letter_id).collect();
        assert_eq!(key.correct_order, expected);

        // Assert: the shuffled sentences map back to the input
        assert_eq!(key.sentences.len(), n);
        assert_eq!(reconstruct(&key.sentences, &key.correct_order).unwrap(), input);
    }
}

#[test]
fn fewer_than_two_paragraphs_are_rejected() {
    let mut rng = StdRng::seed_from_u64(1);

    assert!(matches!(build_with(&[], &mut rng), Err(AdminError::Validation(_))));
    assert!(matches!(
        build_with(&["Only one".to_string()], &mut rng),
        Err(AdminError::Validation(_))
    ));
}

#[test]
fn blank_paragraph_is_rejected_by_letter() {
    let mut rng = StdRng::seed_from_u64(1);
    let input = vec!["First".to_string(), "   ".to_string(), "Third".to_string()];

    let err = build_with(&input, &mut rng).unwrap_err();

    assert_eq!(err.to_string(), "Paragraph B is empty");
}

#[test]
fn surrounding_whitespace_round_trips_exactly() {
    // Arrange
    let mut rng = StdRng::seed_from_u64(3);
    let input = vec![
        "  Indented first paragraph.".to_string(),
        "Second.\n".to_string(),
        "\tThird, tab-led ".to_string(),
    ];

    // Act
    let key = build_with(&input, &mut rng).unwrap();

    // Assert
    assert_eq!(reconstruct(&key.sentences, &key.correct_order).unwrap(), input);
}

#[test]
fn mismatched_answer_key_is_rejected() {
    let sentences = vec![
        Paragraph { id: "A".into(), text: "one".into() },
        Paragraph { id: "B".into(), text: "two".into() },
    ];

    assert!(reconstruct(&sentences, &["A".to_string()]).is_err());
    assert!(reconstruct(&sentences, &["A".to_string(), "C".to_string()]).is_err());
}

#[test]
fn stored_question_reopens_with_paragraphs_in_correct_order() {
    // Arrange: stored shuffled, with the key restoring the order
    let question = Question {
        id: Some("q1".to_string()),
        title: "Water cycle".to_string(),
        sentences: vec![
            Paragraph { id: "C".into(), text: "Rain falls.".into() },
            Paragraph { id: "A".into(), text: "Water evaporates.".into() },
            Paragraph { id: "B".into(), text: "Clouds form.".into() },
        ],
        correct_order: vec!["A".into(), "B".into(), "C".into()],
        ..Question::default()
    };
    let resource = QuestionResource(QuestionKind::ReorderParagraphs);

    // Act
    let draft: QuestionDraft = resource.draft_from(&question);

    // Assert
    assert_eq!(
        draft.paragraphs,
        vec!["Water evaporates.".to_string(), "Clouds form.".to_string(), "Rain falls.".to_string()]
    );
    assert!(draft.check(false).is_ok());
}
