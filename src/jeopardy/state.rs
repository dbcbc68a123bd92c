//! Board, category and question structures for Jeopardy.

use serde::{Deserialize, Serialize};

/// `Normal → Double → Final → Concluded`. A phase only advances once
/// every question in it has been guessed; contestants at zero or below
/// after Double Jeopardy skip the final round entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Normal,
    Double,
    Final,
    Concluded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub value: i64,
    pub question: String,
    pub answer: String,
    /// False on load; flips true at selection and never back.
    #[serde(default)]
    pub guessed: bool,
    #[serde(default)]
    pub daily_double: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub questions: Vec<Question>,
}

impl Category {
    pub fn remaining(&self) -> usize {
        self.questions.iter().filter(|q| !q.guessed).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalQuestion {
    pub category: String,
    pub question: String,
    pub answer: String,
}

/// The full trivia payload: two boards plus the final-round question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriviaSet {
    pub normal: Vec<Category>,
    pub double: Vec<Category>,
    #[serde(rename = "final")]
    pub final_question: FinalQuestion,
}

/// One category as the adapter sees it: the name plus the values still
/// on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub name: String,
    pub open_values: Vec<i64>,
}

/// Structured snapshot for adapters and the render round-trip property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JeopardyView {
    pub phase: Phase,
    pub score: i64,
    pub remaining: usize,
    pub categories: Vec<CategoryView>,
}
