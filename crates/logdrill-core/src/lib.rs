//! logdrill-core: answer checking and quiz sessions for logarithm table drills.
//!
//! This crate holds everything with real logic in it: the table itself,
//! significant-digit rounding on decimal text, the answer validator, and the
//! session state machine. Rendering is left to callers, which observe
//! [`model::SessionEvent`]s and feed typed answers back in.

pub mod config;
pub mod decimal;
pub mod error;
pub mod model;
pub mod session;
pub mod table;
pub mod validator;

pub use decimal::{round_to_significant, Decimal};
pub use error::{DecimalError, TableError};
pub use model::{Direction, Mode, Query, SessionEvent, SessionSummary, Severity};
pub use session::{
    NoopObserver, Session, SessionConfig, SessionController, SessionObserver, SessionState,
    SubmitOutcome,
};
pub use table::{argument_text, logarithm_text, IndexRange, LogTable, TableIndex, TableRow};
pub use validator::{validate, Validator, MIN_SIGNIFICANT_DIGITS};
