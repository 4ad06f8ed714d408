//! The `logdrill drill` command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use logdrill_core::config::load_config_from;
use logdrill_core::{
    Direction, Mode, SessionConfig, SessionController, SessionEvent, SessionObserver,
    SessionState, SessionSummary, Severity,
};

/// Renders session events as plain lines on a writer.
struct ConsoleObserver<W: Write> {
    out: W,
}

impl<W: Write> ConsoleObserver<W> {
    fn new(out: W) -> Self {
        Self { out }
    }

    fn render(&mut self, event: &SessionEvent) -> std::io::Result<()> {
        match event {
            SessionEvent::QueryPresented {
                prompt, direction, ..
            } => match direction {
                Direction::ArgumentToLog => writeln!(self.out, "log {prompt} = ?")?,
                Direction::LogToArgument => writeln!(self.out, "antilog {prompt} = ?")?,
            },
            SessionEvent::AnswerAccepted { input } => writeln!(self.out, "  correct: {input}")?,
            SessionEvent::AnswerRejected { correct } => {
                writeln!(self.out, "  wrong, expected {correct}")?
            }
            SessionEvent::RetryAnnounced { remaining } => {
                writeln!(self.out, "\n{remaining} left to retry, starting again...\n")?
            }
            SessionEvent::SessionFinished(summary) => {
                writeln!(self.out, "\nFinished: {summary}")?;
                writeln!(self.out, "{}", verdict(summary.severity))?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> SessionObserver for ConsoleObserver<W> {
    fn on_event(&mut self, event: &SessionEvent) {
        if let Err(e) = self.render(event) {
            tracing::warn!("failed to write drill output: {e}");
        }
    }
}

fn verdict(severity: Severity) -> &'static str {
    match severity {
        Severity::Good => "Perfect run.",
        Severity::Warn => "A few slips. Keep practicing.",
        Severity::Bad => "Review the table and try again.",
    }
}

pub async fn execute(
    min: Option<u32>,
    max: Option<u32>,
    mode: Option<Mode>,
    retry_delay_ms: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;

    // Flags override the config file
    if let Some(min) = min {
        config.range_min = min;
    }
    if let Some(max) = max {
        config.range_max = max;
    }
    if let Some(mode) = mode {
        config.mode = mode;
    }
    if let Some(delay) = retry_delay_ms {
        config.retry_delay_ms = delay;
    }

    let session_config = config.session_config()?;
    eprintln!(
        "logdrill v{}: {} queries, {} mode. Answer to at least 3 significant digits.",
        env!("CARGO_PKG_VERSION"),
        session_config.range.len(),
        session_config.mode,
    );
    eprintln!();

    let reader = BufReader::new(tokio::io::stdin());
    let mut observer = ConsoleObserver::new(std::io::stdout());
    run_drill(
        session_config,
        Duration::from_millis(config.retry_delay_ms),
        reader,
        &mut observer,
    )
    .await?;

    Ok(())
}

/// Run a session to completion, reading one answer per line.
async fn run_drill<R: AsyncBufRead + Unpin>(
    config: SessionConfig,
    retry_delay: Duration,
    reader: R,
    observer: &mut dyn SessionObserver,
) -> Result<SessionSummary> {
    let mut lines = reader.lines();
    let mut controller = SessionController::start(config, observer);

    loop {
        match controller.state() {
            SessionState::Finished => break,
            SessionState::RetryPause => {
                tokio::time::sleep(retry_delay).await;
                controller.resume(observer);
            }
            SessionState::Presenting => {
                let Some(line) = lines.next_line().await? else {
                    anyhow::bail!(
                        "input ended with {} of {} queries unanswered",
                        controller.session().remaining(),
                        controller.session().total()
                    );
                };
                controller.submit_answer(line.trim(), observer);
            }
        }
    }

    controller
        .summary()
        .ok_or_else(|| anyhow::anyhow!("session ended without a summary"))
}
