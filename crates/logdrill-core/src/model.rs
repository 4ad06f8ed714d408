//! Core data model types for logdrill.
//!
//! Drill modes, the queries a session presents, and the events it emits to
//! whatever is rendering the drill.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::table::{round_text, TableIndex};
use crate::validator::MIN_SIGNIFICANT_DIGITS;

/// How a session orders and asks its queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Table order, argument to logarithm.
    Normal,
    /// Shuffled order, argument to logarithm.
    #[default]
    Shuffled,
    /// Shuffled order, logarithm to argument.
    Reverse,
}

impl Mode {
    /// Whether the index order is shuffled at start.
    pub fn shuffles(self) -> bool {
        !matches!(self, Mode::Normal)
    }

    pub fn direction(self) -> Direction {
        match self {
            Mode::Normal | Mode::Shuffled => Direction::ArgumentToLog,
            Mode::Reverse => Direction::LogToArgument,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::Shuffled => write!(f, "shuffled"),
            Mode::Reverse => write!(f, "reverse"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "ordered" => Ok(Mode::Normal),
            "shuffled" | "shuffle" | "random" => Ok(Mode::Shuffled),
            "reverse" | "reversed" => Ok(Mode::Reverse),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Which side of the table is shown and which is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Show the argument, ask for its logarithm.
    ArgumentToLog,
    /// Show the logarithm, ask for its argument.
    LogToArgument,
}

/// A single prompt and the answer it expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub index: TableIndex,
    pub direction: Direction,
    /// Text shown to the user.
    pub prompt: String,
    /// Ground truth the answer is checked against.
    pub correct_answer: String,
}

impl Query {
    pub fn new(index: TableIndex, direction: Direction) -> Self {
        match direction {
            Direction::ArgumentToLog => Self {
                index,
                direction,
                prompt: index.argument_text(),
                correct_answer: index.logarithm_text(),
            },
            // The argument always has exactly three significant digits, so
            // this direction is an exact match on it.
            Direction::LogToArgument => Self {
                index,
                direction,
                prompt: round_text(&index.logarithm_text(), MIN_SIGNIFICANT_DIGITS),
                correct_answer: index.argument_text(),
            },
        }
    }

    /// The correct answer as shown after a miss.
    pub fn display_answer(&self) -> String {
        round_text(&self.correct_answer, MIN_SIGNIFICANT_DIGITS)
    }
}

/// How a finished session went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No mistakes.
    Good,
    /// Fewer mistakes than queries.
    Warn,
    /// At least as many mistakes as queries.
    Bad,
}

impl Severity {
    pub fn classify(mistakes: usize, total: usize) -> Self {
        if mistakes == 0 {
            Severity::Good
        } else if mistakes < total {
            Severity::Warn
        } else {
            Severity::Bad
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Good => write!(f, "good"),
            Severity::Warn => write!(f, "warn"),
            Severity::Bad => write!(f, "bad"),
        }
    }
}

/// Result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub mistakes: usize,
    pub total: usize,
    pub severity: Severity,
}

impl SessionSummary {
    pub fn new(mistakes: usize, total: usize) -> Self {
        Self {
            mistakes,
            total,
            severity: Severity::classify(mistakes, total),
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} mistake(s) over {} quer{} [{}]",
            self.mistakes,
            self.total,
            if self.total == 1 { "y" } else { "ies" },
            self.severity
        )
    }
}

/// Something the presentation layer should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new query is waiting for an answer.
    QueryPresented {
        index: TableIndex,
        prompt: String,
        direction: Direction,
    },
    /// The answer was correct; carries the input verbatim.
    AnswerAccepted { input: String },
    /// The answer was wrong; carries the correct answer for display.
    AnswerRejected { correct: String },
    /// A pass ended with queries outstanding; the caller should pause and
    /// then resume the session.
    RetryAnnounced { remaining: usize },
    /// Every query has been answered.
    SessionFinished(SessionSummary),
}
