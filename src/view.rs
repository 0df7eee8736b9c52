// src/view.rs

//! Read-only detail panels, rendered as text lines.

use crate::models::banner::Banner;
use crate::models::question::{Question, QuestionKind};
use crate::models::section::Section;
use crate::models::voucher::VoucherOrder;
use crate::reorder;

pub trait Render {
    fn render(&self) -> Vec<String>;
}

fn push_field(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        lines.push(format!("{}: {}", label, value));
    }
}

impl Render for Question {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} [{}{}]",
            self.title,
            self.difficulty,
            if self.is_predictive { ", predictive" } else { "" }
        )];
        push_field(&mut lines, "ID", self.id.as_deref());
        push_field(&mut lines, "Text", self.text.as_deref());
        push_field(&mut lines, "Prompt", self.prompt.as_deref());
        push_field(&mut lines, "Transcript", self.transcript.as_deref());
        push_field(&mut lines, "Image", self.image.as_deref());
        push_field(&mut lines, "Audio", self.audio.as_deref());
        push_field(&mut lines, "Answer", self.answer.as_deref());

        if !self.answers.is_empty() {
            lines.push(format!("Answers: {}", self.answers.join(", ")));
        }

        for (i, option) in self.options.iter().enumerate() {
            let mark = if option.is_correct { "*" } else { " " };
            lines.push(format!("  [{}] {}. {}", mark, i + 1, option.text));
        }

        if !self.sentences.is_empty() {
            lines.push("Paragraphs (as shown):".to_string());
            for p in &self.sentences {
                lines.push(format!("  {}) {}", p.id, p.text));
            }
            match reorder::reconstruct(&self.sentences, &self.correct_order) {
                Ok(_) => lines.push(format!("Correct order: {}", self.correct_order.join(" → "))),
                Err(e) => lines.push(format!("Correct order: invalid ({})", e)),
            }
        }
        lines
    }
}

impl Render for Banner {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        push_field(&mut lines, "ID", self.id.as_deref());
        push_field(&mut lines, "Image", self.image.as_deref());
        lines
    }
}

/// Groups references under their bucket labels.
impl Render for Section {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        push_field(&mut lines, "ID", self.id.as_deref());
        let kinds: Vec<QuestionKind> = self.kinds_present();
        if kinds.is_empty() {
            lines.push("No questions selected".to_string());
        }
        for kind in kinds {
            let refs = self.bucket(kind);
            lines.push(format!("{} ({}):", kind.label(), refs.len()));
            for r in &refs {
                match r.question() {
                    Some(q) => lines.push(format!(
                        "  - {} ({})",
                        r.label(),
                        q.id.as_deref().unwrap_or("unsaved")
                    )),
                    None => lines.push(format!("  - {}", r.label())),
                }
            }
        }
        lines
    }
}

impl Render for VoucherOrder {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![format!("Order for {} [{}]", self.user.label(), self.status)];
        push_field(&mut lines, "ID", self.id.as_deref());
        lines.push(format!("Quantity: {}", self.quantity));
        lines.push(format!("Amount: {:.2}", self.amount));
        push_field(&mut lines, "Gateway order", self.order_id.as_deref());
        push_field(&mut lines, "Gateway payment", self.payment_id.as_deref());
        if let Some(created) = self.created_at {
            lines.push(format!("Created: {}", created.format("%Y-%m-%d %H:%M UTC")));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{AnswerOption, Paragraph};

    #[test]
    fn options_show_correct_mark() {
        let q = Question {
            title: "Bees".to_string(),
            options: vec![
                AnswerOption { text: "Wrong".into(), is_correct: false },
                AnswerOption { text: "Right".into(), is_correct: true },
            ],
            ..Question::default()
        };
        let lines = q.render();
        assert!(lines.contains(&"  [*] 2. Right".to_string()));
        assert!(lines.contains(&"  [ ] 1. Wrong".to_string()));
    }

    #[test]
    fn reorder_shows_answer_key() {
        let q = Question {
            title: "Rivers".to_string(),
            sentences: vec![
                Paragraph { id: "B".into(), text: "Then".into() },
                Paragraph { id: "A".into(), text: "First".into() },
            ],
            correct_order: vec!["A".into(), "B".into()],
            ..Question::default()
        };
        assert!(q.render().contains(&"Correct order: A → B".to_string()));
    }
}
