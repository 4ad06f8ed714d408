//! Quiz session state machine.
//!
//! A session walks an ordered list of table indices. Correct answers are
//! marked off; wrong ones count as mistakes and stay outstanding. When a pass
//! reaches the end with indices still outstanding the session pauses, and
//! the caller resumes it after its own delay to serve the leftovers again in
//! their original relative order. The session finishes once every index has
//! been answered.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Mode, Query, SessionEvent, SessionSummary};
use crate::table::{IndexRange, TableIndex};
use crate::validator::Validator;

/// Receives the events a session emits.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_event(&mut self, _: &SessionEvent) {}
}

/// Records every event, mostly for tests.
impl SessionObserver for Vec<SessionEvent> {
    fn on_event(&mut self, event: &SessionEvent) {
        self.push(event.clone());
    }
}

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A query is out and input is accepted.
    Presenting,
    /// A pass ended with mistakes outstanding; waiting for `resume`.
    RetryPause,
    /// Every index has been answered.
    Finished,
}

/// What happened to a submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected,
    /// The session was not presenting a query; nothing changed.
    NotAccepting,
}

/// What a session drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub range: IndexRange,
    pub mode: Mode,
}

/// All mutable state of one run.
#[derive(Debug, Clone)]
pub struct Session {
    ordered: Vec<TableIndex>,
    /// Parallel to `ordered`.
    answered: Vec<bool>,
    remaining: usize,
    mistakes: usize,
    cursor: usize,
    state: SessionState,
    current: Option<Query>,
}

impl Session {
    fn new(ordered: Vec<TableIndex>) -> Self {
        let total = ordered.len();
        Self {
            ordered,
            answered: vec![false; total],
            remaining: total,
            mistakes: 0,
            cursor: 0,
            state: SessionState::Presenting,
            current: None,
        }
    }

    /// The order queries are served in.
    pub fn ordered_indices(&self) -> &[TableIndex] {
        &self.ordered
    }

    pub fn is_answered(&self, index: TableIndex) -> bool {
        self.ordered
            .iter()
            .position(|&i| i == index)
            .is_some_and(|position| self.answered[position])
    }

    pub fn total(&self) -> usize {
        self.ordered.len()
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn mistakes(&self) -> usize {
        self.mistakes
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The query awaiting an answer, while presenting.
    pub fn current_query(&self) -> Option<&Query> {
        self.current.as_ref()
    }
}

/// Drives one session from start to finish.
///
/// Restarting means dropping the controller and starting a new one.
#[derive(Debug, Clone)]
pub struct SessionController {
    config: SessionConfig,
    validator: Validator,
    session: Session,
}

impl SessionController {
    /// Start a session, shuffling with the thread-local RNG.
    pub fn start(config: SessionConfig, observer: &mut dyn SessionObserver) -> Self {
        Self::start_with_rng(config, &mut rand::rng(), observer)
    }

    /// Start a session, shuffling with `rng`.
    pub fn start_with_rng<R: Rng + ?Sized>(
        config: SessionConfig,
        rng: &mut R,
        observer: &mut dyn SessionObserver,
    ) -> Self {
        let mut ordered: Vec<TableIndex> = config.range.iter().collect();
        if config.mode.shuffles() {
            ordered.shuffle(rng);
        }

        tracing::debug!(
            "starting session over {} in {} mode ({} queries)",
            config.range,
            config.mode,
            ordered.len()
        );

        let mut controller = Self {
            config,
            validator: Validator::default(),
            session: Session::new(ordered),
        };
        controller.advance(observer);
        controller
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn current_query(&self) -> Option<&Query> {
        self.session.current_query()
    }

    /// The final summary, once finished.
    pub fn summary(&self) -> Option<SessionSummary> {
        (self.session.state == SessionState::Finished)
            .then(|| SessionSummary::new(self.session.mistakes, self.session.total()))
    }

    /// Check `input` against the current query and move on.
    ///
    /// Outside `Presenting` this does nothing and reports `NotAccepting`.
    pub fn submit_answer(
        &mut self,
        input: &str,
        observer: &mut dyn SessionObserver,
    ) -> SubmitOutcome {
        if self.session.state != SessionState::Presenting {
            tracing::warn!("answer submitted while {:?}, ignoring", self.session.state);
            return SubmitOutcome::NotAccepting;
        }
        let Some(query) = self.session.current.take() else {
            return SubmitOutcome::NotAccepting;
        };

        let session = &mut self.session;
        let outcome = if self.validator.validate(input, &query.correct_answer) {
            session.answered[session.cursor] = true;
            session.remaining -= 1;
            tracing::debug!(
                "index {} accepted, {} remaining",
                query.index,
                session.remaining
            );
            observer.on_event(&SessionEvent::AnswerAccepted {
                input: input.to_string(),
            });
            SubmitOutcome::Accepted
        } else {
            session.mistakes += 1;
            tracing::debug!(
                "index {} rejected, {} mistake(s) so far",
                query.index,
                session.mistakes
            );
            observer.on_event(&SessionEvent::AnswerRejected {
                correct: query.display_answer(),
            });
            SubmitOutcome::Rejected
        };

        session.cursor += 1;
        self.advance(observer);
        outcome
    }

    /// Leave the retry pause and serve the outstanding indices again.
    ///
    /// Returns `false` without doing anything unless the session is paused.
    pub fn resume(&mut self, observer: &mut dyn SessionObserver) -> bool {
        if self.session.state != SessionState::RetryPause {
            tracing::warn!("resume called while {:?}, ignoring", self.session.state);
            return false;
        }
        self.session.state = SessionState::Presenting;
        self.session.cursor = 0;
        self.advance(observer);
        true
    }

    fn advance(&mut self, observer: &mut dyn SessionObserver) {
        let session = &mut self.session;
        while session.cursor < session.ordered.len() && session.answered[session.cursor] {
            session.cursor += 1;
        }

        if let Some(&index) = session.ordered.get(session.cursor) {
            let query = Query::new(index, self.config.mode.direction());
            observer.on_event(&SessionEvent::QueryPresented {
                index,
                prompt: query.prompt.clone(),
                direction: query.direction,
            });
            session.current = Some(query);
            return;
        }

        if session.remaining == 0 {
            session.state = SessionState::Finished;
            let summary = SessionSummary::new(session.mistakes, session.total());
            tracing::info!("session finished: {summary}");
            observer.on_event(&SessionEvent::SessionFinished(summary));
        } else {
            session.state = SessionState::RetryPause;
            tracing::debug!("pass complete, {} to retry", session.remaining);
            observer.on_event(&SessionEvent::RetryAnnounced {
                remaining: session.remaining,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Direction, Severity};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(min: u32, max: u32, mode: Mode) -> SessionConfig {
        SessionConfig {
            range: IndexRange::new(min, max).unwrap(),
            mode,
        }
    }

    fn start(min: u32, max: u32, mode: Mode, events: &mut Vec<SessionEvent>) -> SessionController {
        let mut rng = StdRng::seed_from_u64(7);
        SessionController::start_with_rng(config(min, max, mode), &mut rng, events)
    }

    fn answer_correctly(controller: &mut SessionController, events: &mut Vec<SessionEvent>) {
        let answer = controller.current_query().unwrap().correct_answer.clone();
        assert_eq!(
            controller.submit_answer(&answer, events),
            SubmitOutcome::Accepted
        );
    }

    #[test]
    fn normal_mode_keeps_table_order() {
        let mut events = Vec::new();
        let controller = start(10, 14, Mode::Normal, &mut events);

        let order: Vec<u32> = controller
            .session()
            .ordered_indices()
            .iter()
            .map(|i| i.get())
            .collect();
        assert_eq!(order, vec![10, 11, 12, 13, 14]);
        assert_eq!(controller.state(), SessionState::Presenting);
        assert_eq!(
            events,
            vec![SessionEvent::QueryPresented {
                index: TableIndex::new(10).unwrap(),
                prompt: "1.10".into(),
                direction: Direction::ArgumentToLog,
            }]
        );
    }

    #[test]
    fn shuffled_mode_is_a_permutation() {
        let mut events = Vec::new();
        let controller = start(1, 100, Mode::Shuffled, &mut events);

        let mut order: Vec<u32> = controller
            .session()
            .ordered_indices()
            .iter()
            .map(|i| i.get())
            .collect();
        assert_ne!(order, (1..=100).collect::<Vec<_>>());
        order.sort_unstable();
        assert_eq!(order, (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn reverse_mode_asks_for_the_argument() {
        let mut events = Vec::new();
        let controller = start(37, 37, Mode::Reverse, &mut events);

        let query = controller.current_query().unwrap();
        assert_eq!(query.direction, Direction::LogToArgument);
        assert_eq!(query.prompt, "0.137");
        assert_eq!(query.correct_answer, "1.37");
    }

    #[test]
    fn rejected_answer_reports_rounded_truth() {
        let mut events = Vec::new();
        let mut controller = start(100, 100, Mode::Normal, &mut events);

        assert_eq!(
            controller.submit_answer("0.3", &mut events),
            SubmitOutcome::Rejected
        );
        assert!(events.contains(&SessionEvent::AnswerRejected {
            correct: "0.301".into()
        }));
        assert_eq!(controller.session().mistakes(), 1);
        assert_eq!(controller.session().remaining(), 1);
    }

    #[test]
    fn accepted_answer_is_echoed_verbatim() {
        let mut events = Vec::new();
        let mut controller = start(100, 100, Mode::Normal, &mut events);

        controller.submit_answer(".3010", &mut events);
        assert!(events.contains(&SessionEvent::AnswerAccepted {
            input: ".3010".into()
        }));
        assert_eq!(controller.state(), SessionState::Finished);
    }

    #[test]
    fn input_is_refused_while_paused() {
        let mut events = Vec::new();
        let mut controller = start(1, 2, Mode::Normal, &mut events);

        controller.submit_answer("9", &mut events);
        controller.submit_answer("9", &mut events);
        assert_eq!(controller.state(), SessionState::RetryPause);
        assert!(controller.current_query().is_none());

        let before = events.len();
        assert_eq!(
            controller.submit_answer("0.00432", &mut events),
            SubmitOutcome::NotAccepting
        );
        assert_eq!(events.len(), before);
        assert_eq!(controller.session().mistakes(), 2);
        assert_eq!(controller.session().remaining(), 2);
    }

    #[test]
    fn resume_only_from_pause() {
        let mut events = Vec::new();
        let mut controller = start(1, 1, Mode::Normal, &mut events);
        assert!(!controller.resume(&mut events));

        controller.submit_answer("0", &mut events);
        assert_eq!(
            events.last(),
            Some(&SessionEvent::RetryAnnounced { remaining: 1 })
        );
        assert!(controller.resume(&mut events));
        assert_eq!(controller.state(), SessionState::Presenting);
        assert_eq!(controller.session().cursor(), 0);

        answer_correctly(&mut controller, &mut events);
        assert_eq!(controller.state(), SessionState::Finished);
        assert!(!controller.resume(&mut events));
        assert_eq!(
            controller.submit_answer("0.00432", &mut events),
            SubmitOutcome::NotAccepting
        );
    }

    #[test]
    fn retry_serves_only_outstanding_indices_in_order() {
        let mut events = Vec::new();
        let mut controller = start(20, 25, Mode::Normal, &mut events);

        // Miss 21 and 24 on the first pass.
        for raw in 20..=25 {
            let current = controller.current_query().unwrap().index.get();
            assert_eq!(current, raw);
            if raw == 21 || raw == 24 {
                controller.submit_answer("x", &mut events);
            } else {
                answer_correctly(&mut controller, &mut events);
            }
        }
        assert_eq!(controller.state(), SessionState::RetryPause);
        assert!(controller.session().is_answered(TableIndex::new(20).unwrap()));
        assert!(!controller.session().is_answered(TableIndex::new(21).unwrap()));

        controller.resume(&mut events);
        assert_eq!(controller.current_query().unwrap().index.get(), 21);
        answer_correctly(&mut controller, &mut events);
        assert_eq!(controller.current_query().unwrap().index.get(), 24);
        answer_correctly(&mut controller, &mut events);

        assert_eq!(controller.state(), SessionState::Finished);
        let summary = controller.summary().unwrap();
        assert_eq!(summary.mistakes, 2);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.severity, Severity::Warn);
    }

    #[test]
    fn as_many_mistakes_as_queries_is_bad() {
        let mut events = Vec::new();
        let mut controller = start(1, 3, Mode::Shuffled, &mut events);

        for _ in 0..3 {
            controller.submit_answer("", &mut events);
        }
        controller.resume(&mut events);
        for _ in 0..3 {
            answer_correctly(&mut controller, &mut events);
        }

        assert_eq!(
            events.last(),
            Some(&SessionEvent::SessionFinished(SessionSummary {
                mistakes: 3,
                total: 3,
                severity: Severity::Bad,
            }))
        );
    }

    #[test]
    fn noop_observer_still_drives_the_session() {
        let mut controller = SessionController::start(config(5, 6, Mode::Reverse), &mut NoopObserver);
        while let Some(query) = controller.current_query().cloned() {
            controller.submit_answer(&query.correct_answer, &mut NoopObserver);
        }
        assert_eq!(controller.summary(), Some(SessionSummary::new(0, 2)));
    }
}
