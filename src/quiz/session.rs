//! Quiz session controller.
//!
//! Page progression, verdicts, attempt counting and elapsed time, expressed as
//! a small state machine driven by one [`Scheduler`]:
//!
//! ```text
//! Idle --submit--> Evaluating --flash_ms--> Celebrating --celebrate_ms--> Idle (next page)
//!                                      \                             \--> Finished
//!                                       \-> Retrying --retry_ms--> Idle (placement cleared)
//! ```
//!
//! Side effects (sound, confetti, colour flashes, messages) are not performed
//! here; every transition returns [`Signal`]s for the presentation layer.

use super::answer_box::{AnswerBox, DragSession, DropOutcome};
use super::dataset::{Dataset, FIRST_PAGE, Page};
use super::hover::{PointerSample, SlotLayout};
use super::placement::{ItemRef, Placement};
use super::scheduler::{Scheduler, TimerId};
use crate::error::{DatasetError, SessionError};

/// Timing and layout knobs. All durations in milliseconds.
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct QuizConfig {
    pub layout: SlotLayout,
    pub flash_ms: u64,
    pub celebrate_ms: u64,
    pub retry_ms: u64,
    pub tick_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            layout: SlotLayout::default(),
            flash_ms: 1000,
            celebrate_ms: 3000,
            retry_ms: 1500,
            tick_ms: 1000,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// Non-empty answer in the wrong order or with wrong pictures.
    Incorrect,
    /// Nothing placed at all.
    Empty,
}

/// Exact ordered comparison; an empty placement is reported separately.
pub fn evaluate(placement: &Placement, target: &[ItemRef]) -> Verdict {
    if placement.matches(target) {
        Verdict::Correct
    } else if placement.is_empty() {
        Verdict::Empty
    } else {
        Verdict::Incorrect
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Evaluating(Verdict),
    Celebrating,
    Retrying,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Correct,
    Wrong,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashColor {
    Success,
    Failure,
    Warning,
}

/// Presentation requests emitted by the session. Fire-and-forget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Signal {
    Cue(AudioCue),
    Flash(FlashColor),
    FlashCleared,
    ConfettiStarted,
    ConfettiStopped,
    PleaseAddImages,
    TryAgain,
    PlacementCleared,
    PageAdvanced { page: u32 },
    Completed { elapsed_secs: u64, attempts: u32 },
    Tick { elapsed_secs: u64 },
    SessionReset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionTimer {
    Tick,
    FlashEnd,
    CelebrationEnd,
    RetryEnd,
}

pub struct QuizSession<D: Dataset> {
    dataset: D,
    config: QuizConfig,
    page: u32,
    answer: AnswerBox,
    attempts: u32,
    elapsed_ms: u64,
    finished_after_secs: Option<u64>,
    phase: SessionPhase,
    scheduler: Scheduler<SessionTimer>,
    tick: Option<TimerId>,
}

impl<D: Dataset> QuizSession<D> {
    /// Starts on page 1 with the elapsed-time tick running from `now_ms`.
    /// A zero `tick_ms` is raised to 1 ms so the clock always moves.
    pub fn new(dataset: D, mut config: QuizConfig, now_ms: u64) -> Result<Self, DatasetError> {
        config.tick_ms = config.tick_ms.max(1);
        let max_items = dataset.page(FIRST_PAGE).ok_or(DatasetError::NoPages)?.question.len();
        let mut scheduler = Scheduler::new(now_ms);
        let tick = Some(scheduler.schedule_every(config.tick_ms, SessionTimer::Tick));
        Ok(Self {
            answer: AnswerBox::new(max_items, config.layout),
            dataset,
            config,
            page: FIRST_PAGE,
            attempts: 0,
            elapsed_ms: 0,
            finished_after_secs: None,
            phase: SessionPhase::Idle,
            scheduler,
            tick,
        })
    }

    pub fn page_number(&self) -> u32 {
        self.page
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.dataset.page(self.page)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// Elapsed time captured when the last page was solved.
    pub fn finished_after_secs(&self) -> Option<u64> {
        self.finished_after_secs
    }

    pub fn is_ticking(&self) -> bool {
        self.tick.is_some_and(|id| self.scheduler.is_pending(id))
    }

    pub fn placement(&self) -> &Placement {
        self.answer.placement()
    }

    pub fn answer_box(&self) -> &AnswerBox {
        &self.answer
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    // --- Drag plumbing (only while idle) --------------------------------------

    pub fn begin_option_drag(&self, option_index: usize) -> Option<DragSession> {
        if self.phase != SessionPhase::Idle {
            return None;
        }
        let item = self.current_page()?.images.get(option_index)?.clone();
        Some(DragSession::from_option(item, option_index))
    }

    pub fn begin_placed_drag(&self, index: usize) -> Option<DragSession> {
        if self.phase != SessionPhase::Idle {
            return None;
        }
        DragSession::from_placed(self.answer.placement(), index)
    }

    pub fn hover(&self, session: DragSession, sample: PointerSample) -> DragSession {
        self.answer.hover(session, sample)
    }

    pub fn hover_slot(&mut self, session: DragSession, slot: usize) -> DragSession {
        self.answer.hover_slot(session, slot)
    }

    pub fn drop_item(&mut self, session: DragSession) -> DropOutcome {
        self.answer.drop_item(session)
    }

    pub fn cancel_drag(&self, session: DragSession) {
        self.answer.cancel(session);
    }

    // --- Submission -----------------------------------------------------------

    /// Judges the current placement against the page's question and enters
    /// the feedback window. Immediate signals are returned; the rest arrive
    /// through [`Self::advance`].
    pub fn submit(&mut self) -> Result<(Verdict, Vec<Signal>), SessionError> {
        match self.phase {
            SessionPhase::Idle => {}
            SessionPhase::Finished => return Err(SessionError::Finished),
            phase => return Err(SessionError::Busy { phase }),
        }
        let Some(page) = self.dataset.page(self.page) else {
            return Err(SessionError::Finished);
        };
        let verdict = evaluate(self.answer.placement(), &page.question);
        let signals = match verdict {
            Verdict::Correct => {
                self.attempts += 1;
                vec![Signal::Flash(FlashColor::Success), Signal::Cue(AudioCue::Correct)]
            }
            Verdict::Incorrect => {
                self.attempts += 1;
                vec![Signal::Flash(FlashColor::Failure), Signal::Cue(AudioCue::Wrong), Signal::TryAgain]
            }
            Verdict::Empty => vec![
                Signal::Flash(FlashColor::Warning),
                Signal::Cue(AudioCue::Empty),
                Signal::PleaseAddImages,
            ],
        };
        self.phase = SessionPhase::Evaluating(verdict);
        self.scheduler.schedule_after(self.config.flash_ms, SessionTimer::FlashEnd);
        Ok((verdict, signals))
    }

    /// Fires every timer due up to `now_ms` and returns the resulting signals
    /// in order.
    pub fn advance(&mut self, now_ms: u64) -> Vec<Signal> {
        let mut signals = Vec::new();
        while let Some((_, timer)) = self.scheduler.pop_due(now_ms) {
            self.on_timer(timer, &mut signals);
        }
        self.scheduler.settle(now_ms);
        signals
    }

    fn on_timer(&mut self, timer: SessionTimer, out: &mut Vec<Signal>) {
        match timer {
            SessionTimer::Tick => {
                self.elapsed_ms = self.elapsed_ms.saturating_add(self.config.tick_ms);
                out.push(Signal::Tick { elapsed_secs: self.elapsed_secs() });
            }
            SessionTimer::FlashEnd => {
                let SessionPhase::Evaluating(verdict) = self.phase else {
                    return;
                };
                out.push(Signal::FlashCleared);
                if verdict == Verdict::Correct {
                    self.phase = SessionPhase::Celebrating;
                    out.push(Signal::ConfettiStarted);
                    self.scheduler.schedule_after(self.config.celebrate_ms, SessionTimer::CelebrationEnd);
                } else {
                    self.phase = SessionPhase::Retrying;
                    self.scheduler.schedule_after(self.config.retry_ms, SessionTimer::RetryEnd);
                }
            }
            SessionTimer::CelebrationEnd => {
                if self.phase != SessionPhase::Celebrating {
                    return;
                }
                out.push(Signal::ConfettiStopped);
                self.advance_page(out);
            }
            SessionTimer::RetryEnd => {
                if self.phase != SessionPhase::Retrying {
                    return;
                }
                self.answer.clear();
                self.phase = SessionPhase::Idle;
                out.push(Signal::PlacementCleared);
            }
        }
    }

    fn advance_page(&mut self, out: &mut Vec<Signal>) {
        let next = self.page + 1;
        match self.dataset.page(next) {
            Some(page) => {
                self.page = next;
                self.answer.reset_for(page.question.len());
                self.phase = SessionPhase::Idle;
                out.push(Signal::PlacementCleared);
                out.push(Signal::PageAdvanced { page: next });
            }
            None => {
                self.stop_tick();
                let elapsed_secs = self.elapsed_secs();
                self.finished_after_secs = Some(elapsed_secs);
                self.phase = SessionPhase::Finished;
                out.push(Signal::Completed { elapsed_secs, attempts: self.attempts });
            }
        }
    }

    fn stop_tick(&mut self) {
        if let Some(id) = self.tick.take() {
            self.scheduler.cancel(id);
        }
    }

    /// Back to page 1 with counters zeroed. Pending feedback timers are
    /// dropped and the elapsed-time tick restarts from the current clock.
    pub fn reset(&mut self) -> Vec<Signal> {
        self.scheduler.cancel_all();
        self.tick = Some(self.scheduler.schedule_every(self.config.tick_ms, SessionTimer::Tick));
        let max_items = self.dataset.page(FIRST_PAGE).map_or(0, |p| p.question.len());
        self.page = FIRST_PAGE;
        self.answer.reset_for(max_items);
        self.attempts = 0;
        self.elapsed_ms = 0;
        self.finished_after_secs = None;
        self.phase = SessionPhase::Idle;
        vec![Signal::SessionReset, Signal::PlacementCleared, Signal::PageAdvanced { page: FIRST_PAGE }]
    }
}
