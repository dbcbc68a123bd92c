//! The Jeopardy session: phase machine, clue flow, wagering and scoring.
//!
//! Clue selection and answering are async because they suspend on bounded
//! user input (wager text, answer text). Every wait has a default path on
//! expiry, so a session can never hang.

use super::judge::{has_answer_prefix, is_correct, strip_answer_prefix};
use super::source::{prefix_or_default, PrefixGenerator, TriviaSource};
use super::state::{Category, CategoryView, JeopardyView, Phase, TriviaSet};
use super::wager::{daily_double_wager, final_wager};
use crate::constants::{ANSWER_TIMEOUT, FINAL_ANSWER_TIMEOUT, WAGER_TIMEOUT};
use crate::engine::{
    Button, ChannelId, GameKind, PlayerId, RenderPayload, Renderable, Session,
};
use crate::error::GameError;
use crate::input::{read_matching, GameIo};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    /// Wrong answer: the wager is deducted.
    Incorrect,
    /// No (captured) answer in time: scored as incorrect but with no
    /// deduction.
    TimedOut,
}

/// What one clue (or the final round) did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueResult {
    pub verdict: Verdict,
    pub wager: i64,
    pub score: i64,
    pub phase: Phase,
    pub correct_answer: String,
}

pub struct JeopardySession {
    channel: ChannelId,
    player: PlayerId,
    board: TriviaSet,
    phase: Phase,
    score: i64,
    last_action: Instant,
}

impl JeopardySession {
    /// Starts a session from the remote trivia source. There is no local
    /// fallback: a fetch failure means the game cannot start.
    pub async fn start(
        channel: ChannelId,
        player: PlayerId,
        source: &dyn TriviaSource,
    ) -> Result<Self, GameError> {
        let board = source.fetch_board().await.map_err(|e| {
            tracing::warn!(target: "jeopardy", channel = %channel, user = %player, error = %e, "could not start game");
            e
        })?;
        Ok(Self::from_set(channel, player, board))
    }

    /// Builds a session from an already-loaded board.
    pub fn from_set(channel: ChannelId, player: PlayerId, board: TriviaSet) -> Self {
        Self {
            channel,
            player,
            board,
            phase: Phase::Normal,
            score: 0,
            last_action: Instant::now(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    fn categories(&self) -> &[Category] {
        match self.phase {
            Phase::Normal => &self.board.normal,
            _ => &self.board.double,
        }
    }

    /// Unguessed questions left in the current phase's board.
    pub fn remaining_unguessed(&self) -> usize {
        match self.phase {
            Phase::Normal | Phase::Double => {
                self.categories().iter().map(Category::remaining).sum()
            }
            Phase::Final | Phase::Concluded => 0,
        }
    }

    /// Runs one clue end to end: selection, daily-double wager, answer
    /// window, judging, scoring, and any phase transition. Selecting a
    /// guessed or nonexistent (category, value) pair fails with `NotFound`
    /// and leaves all state unchanged.
    pub async fn play_clue(
        &mut self,
        category: &str,
        value: i64,
        io: &dyn GameIo,
        prefixer: &dyn PrefixGenerator,
    ) -> Result<ClueResult, GameError> {
        if !matches!(self.phase, Phase::Normal | Phase::Double) {
            return Err(GameError::InvalidMove(
                "the board is closed; the game has moved on".into(),
            ));
        }

        let board = match self.phase {
            Phase::Normal => &mut self.board.normal,
            _ => &mut self.board.double,
        };
        let slot = board
            .iter_mut()
            .find(|c| c.name.eq_ignore_ascii_case(category))
            .and_then(|c| {
                c.questions
                    .iter_mut()
                    .find(|q| q.value == value && !q.guessed)
            })
            .ok_or_else(|| GameError::NotFound(format!("{category} for {value}")))?;

        // Monotonic: selection consumes the question even if the answer
        // flow later times out.
        slot.guessed = true;
        let clue = slot.question.clone();
        let answer = slot.answer.clone();
        let is_daily_double = slot.daily_double;
        self.last_action = Instant::now();

        let wager = if is_daily_double {
            io.show(RenderPayload::text(format!(
                "**Daily Double!** Enter your wager (max {}).",
                super::wager::max_wager(self.score)
            )))
            .await;
            let input = io.read_text(WAGER_TIMEOUT).await;
            daily_double_wager(input.as_deref(), self.score)
        } else {
            value
        };

        io.show(
            RenderPayload::text(format!("**{category} — {wager}**\n{clue}"))
                .field("Category", category.to_string()),
        )
        .await;

        // Only prefixed responses are candidates; anything else is dropped
        // without judging.
        let captured = read_matching(io, ANSWER_TIMEOUT, has_answer_prefix).await;
        let verdict = self
            .judge_and_score(captured, &answer, Some(&clue), wager, io, prefixer)
            .await;

        self.advance_phase_if_exhausted(io).await;
        Ok(ClueResult {
            verdict,
            wager,
            score: self.score,
            phase: self.phase,
            correct_answer: answer,
        })
    }

    /// The final round: wager, single 60-second answer window without the
    /// prefix requirement, then conclusion.
    pub async fn play_final(
        &mut self,
        io: &dyn GameIo,
        prefixer: &dyn PrefixGenerator,
    ) -> Result<ClueResult, GameError> {
        if self.phase != Phase::Final {
            return Err(GameError::InvalidMove(
                "the game is not in the final round".into(),
            ));
        }
        self.last_action = Instant::now();
        let category = self.board.final_question.category.clone();
        let clue = self.board.final_question.question.clone();
        let answer = self.board.final_question.answer.clone();

        io.show(RenderPayload::text(format!(
            "**Final Jeopardy!** Category: {category}. Enter your wager (max {}).",
            super::wager::max_wager(self.score)
        )))
        .await;
        let input = io.read_text(WAGER_TIMEOUT).await;
        let wager = final_wager(input.as_deref(), self.score);

        io.show(RenderPayload::text(format!("**{category}**\n{clue}")))
            .await;

        let captured = io.read_text(FINAL_ANSWER_TIMEOUT).await;
        // No clue-word exclusion in the final round: judge against the
        // full answer word set.
        let verdict = self
            .judge_and_score(captured, &answer, None, wager, io, prefixer)
            .await;

        self.phase = Phase::Concluded;
        io.show(RenderPayload::text(format!(
            "That's the game! Final score: **{}**.",
            self.score
        )))
        .await;

        Ok(ClueResult {
            verdict,
            wager,
            score: self.score,
            phase: self.phase,
            correct_answer: answer,
        })
    }

    async fn judge_and_score(
        &mut self,
        captured: Option<String>,
        answer: &str,
        clue: Option<&str>,
        wager: i64,
        io: &dyn GameIo,
        prefixer: &dyn PrefixGenerator,
    ) -> Verdict {
        self.last_action = Instant::now();
        match captured {
            Some(raw) => {
                let response = strip_answer_prefix(&raw);
                if is_correct(&response, answer, clue) {
                    self.score += wager;
                    io.show(RenderPayload::text(format!(
                        "Correct! **+{wager}** — your score is now **{}**.",
                        self.score
                    )))
                    .await;
                    Verdict::Correct
                } else {
                    self.score -= wager;
                    let prefix = prefix_or_default(prefixer, answer).await;
                    io.show(RenderPayload::text(format!(
                        "Incorrect. The answer was: *{prefix} {answer}?* **-{wager}** — your score is now **{}**.",
                        self.score
                    )))
                    .await;
                    Verdict::Incorrect
                }
            }
            None => {
                // Out of time: no deduction, but the reveal still fires.
                let prefix = prefix_or_default(prefixer, answer).await;
                io.show(RenderPayload::text(format!(
                    "Time's up! The answer was: *{prefix} {answer}?* Your score stays at **{}**.",
                    self.score
                )))
                .await;
                Verdict::TimedOut
            }
        }
    }

    async fn advance_phase_if_exhausted(&mut self, io: &dyn GameIo) {
        if self.remaining_unguessed() > 0 {
            return;
        }
        match self.phase {
            Phase::Normal => {
                self.phase = Phase::Double;
                io.show(RenderPayload::text(
                    "The board is clear — on to **Double Jeopardy!**",
                ))
                .await;
            }
            Phase::Double => {
                if self.score > 0 {
                    self.phase = Phase::Final;
                    io.show(RenderPayload::text(
                        "The board is clear — get ready for **Final Jeopardy!**",
                    ))
                    .await;
                } else {
                    // Nobody rides to the final round on a non-positive
                    // score.
                    self.phase = Phase::Concluded;
                    io.show(RenderPayload::text(format!(
                        "With a score of **{}** the game ends here. Thanks for playing!",
                        self.score
                    )))
                    .await;
                }
            }
            Phase::Final | Phase::Concluded => {}
        }
    }

    pub fn view(&self) -> JeopardyView {
        let categories = match self.phase {
            Phase::Normal | Phase::Double => self
                .categories()
                .iter()
                .map(|c| CategoryView {
                    name: c.name.clone(),
                    open_values: c
                        .questions
                        .iter()
                        .filter(|q| !q.guessed)
                        .map(|q| q.value)
                        .collect(),
                })
                .collect(),
            Phase::Final | Phase::Concluded => Vec::new(),
        };
        JeopardyView {
            phase: self.phase,
            score: self.score,
            remaining: self.remaining_unguessed(),
            categories,
        }
    }
}

impl Renderable for JeopardySession {
    fn render(&self) -> RenderPayload {
        let view = self.view();
        let content = match self.phase {
            Phase::Normal => format!("**Jeopardy!** Score: {}", self.score),
            Phase::Double => format!("**Double Jeopardy!** Score: {}", self.score),
            Phase::Final => format!("**Final Jeopardy!** Score: {}", self.score),
            Phase::Concluded => format!("Game over. Final score: **{}**", self.score),
        };
        let mut payload = RenderPayload::text(content);
        for (idx, category) in view.categories.iter().enumerate() {
            let values = category
                .open_values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" · ");
            payload = payload.field(category.name.clone(), values);
            for value in &category.open_values {
                payload = payload.button(Button::new(
                    format!("jp_{idx}_{value}"),
                    format!("{} {value}", category.name),
                ));
            }
        }
        payload.with_board(&view)
    }
}

impl Session for JeopardySession {
    fn kind(&self) -> GameKind {
        GameKind::Jeopardy
    }

    fn channel(&self) -> ChannelId {
        self.channel
    }

    fn idle_for(&self) -> Duration {
        self.last_action.elapsed()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
