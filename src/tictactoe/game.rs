//! The Tic-Tac-Toe session: one human against the minimax opponent.

use super::ai;
use super::state::{Board, Mark, Status};
use crate::engine::{
    Action, Button, ChannelId, GameKind, GameUpdate, Interactive, Payout, PlayerId, RenderPayload,
    Renderable, Session,
};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::{Duration, Instant};

/// Structured snapshot for adapters and the render round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicTacToeView {
    pub board: Board,
    pub status: Status,
    pub to_move: Mark,
}

pub struct TicTacToeSession {
    channel: ChannelId,
    human: PlayerId,
    human_mark: Mark,
    board: Board,
    to_move: Mark,
    status: Status,
    last_action: Instant,
}

impl TicTacToeSession {
    /// Human moves first as X. When `ai_first` is set the engine (as X)
    /// opens and the human answers as O.
    pub fn new(channel: ChannelId, human: PlayerId, ai_first: bool) -> Self {
        let mut session = Self {
            channel,
            human,
            human_mark: if ai_first { Mark::O } else { Mark::X },
            board: Board::new(),
            to_move: Mark::X,
            status: Status::InProgress,
            last_action: Instant::now(),
        };
        if ai_first {
            session.ai_reply();
        }
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    fn ai_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    /// Applies one human move, then the AI's reply if the game continues.
    /// Invalid moves are rejected without any state change.
    pub fn play(&mut self, row: usize, col: usize) -> Result<Status, GameError> {
        if row > 2 || col > 2 {
            return Err(GameError::InvalidMove(format!(
                "cell ({row}, {col}) is off the board"
            )));
        }
        if self.status != Status::InProgress {
            return Err(GameError::InvalidMove("the game is over".into()));
        }
        if self.to_move != self.human_mark {
            return Err(GameError::InvalidMove("it is not your turn".into()));
        }
        if !self.board.is_empty_cell(row, col) {
            return Err(GameError::InvalidMove(format!(
                "cell ({row}, {col}) is already taken"
            )));
        }

        self.board.place(row, col, self.human_mark);
        self.to_move = self.ai_mark();
        self.status = self.board.status();
        self.last_action = Instant::now();

        if self.status == Status::InProgress {
            self.ai_reply();
        }
        Ok(self.status)
    }

    fn ai_reply(&mut self) {
        if let Some((row, col)) = ai::best_move(&self.board, self.ai_mark()) {
            self.board.place(row, col, self.ai_mark());
            self.status = self.board.status();
        }
        self.to_move = self.human_mark;
    }

    pub fn view(&self) -> TicTacToeView {
        TicTacToeView {
            board: self.board.clone(),
            status: self.status,
            to_move: self.to_move,
        }
    }

    fn final_update(&self) -> GameUpdate {
        let (message, amount) = match self.status {
            Status::Won(mark) if mark == self.human_mark => ("You win!".to_string(), 1),
            Status::Won(_) => ("The machine wins.".to_string(), -1),
            Status::Draw => ("It's a draw.".to_string(), 0),
            Status::InProgress => return GameUpdate::ReRender,
        };
        GameUpdate::GameOver {
            message,
            payouts: vec![Payout {
                player: self.human,
                amount,
            }],
        }
    }
}

impl Interactive for TicTacToeSession {
    fn handle(&mut self, action: &Action) -> GameUpdate {
        if action.actor != self.human {
            return GameUpdate::Reject("This is not your game.".into());
        }
        // Expected custom id form: `ttt_<row>_<col>`.
        let cell = match action.button_parts().as_deref() {
            Some(["ttt", row, col]) => match (row.parse::<usize>(), col.parse::<usize>()) {
                (Ok(r), Ok(c)) => (r, c),
                _ => return GameUpdate::NoOp,
            },
            _ => return GameUpdate::NoOp,
        };

        match self.play(cell.0, cell.1) {
            Ok(Status::InProgress) => GameUpdate::ReRender,
            Ok(_) => self.final_update(),
            Err(e) => GameUpdate::Reject(e.to_string()),
        }
    }
}

impl Renderable for TicTacToeSession {
    fn render(&self) -> RenderPayload {
        let header = match self.status {
            Status::InProgress => format!("Tic-Tac-Toe — you are {}", self.human_mark),
            Status::Won(mark) if mark == self.human_mark => "Tic-Tac-Toe — you won!".to_string(),
            Status::Won(_) => "Tic-Tac-Toe — the machine won.".to_string(),
            Status::Draw => "Tic-Tac-Toe — draw.".to_string(),
        };
        let mut payload = RenderPayload::text(header).with_board(&self.view());
        let over = self.status != Status::InProgress;
        for row in 0..3 {
            for col in 0..3 {
                let label = match self.board.get(row, col) {
                    Some(mark) => mark.to_string(),
                    None => "·".to_string(),
                };
                let mut button = Button::new(format!("ttt_{row}_{col}"), label);
                if over || self.board.get(row, col).is_some() {
                    button = button.disabled();
                }
                payload = payload.button(button);
            }
        }
        payload
    }
}

impl Session for TicTacToeSession {
    fn kind(&self) -> GameKind {
        GameKind::TicTacToe
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
