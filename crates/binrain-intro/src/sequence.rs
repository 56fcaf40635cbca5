//! Intro state machine.

use std::time::Duration;

use binrain_core::IntroTiming;

/// Where the intro is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IntroPhase {
    /// Nothing shown yet; the drawing is invisible.
    #[default]
    NotStarted,
    /// Waiting for the reveal delay or drawing the segments.
    Revealing,
    /// Every segment is drawn; pausing before the hide.
    Revealed,
    /// The intro is gone (or was skipped). Terminal.
    Hidden,
}

/// Completion signals fed back into the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroSignal {
    /// The delay before showing the drawing has passed.
    RevealDelayElapsed,
    /// The stroke animation of a segment finished.
    StrokeEnd(usize),
    /// The pause after the last stroke has passed.
    PauseElapsed,
    /// The intro container finished fading out.
    HideTransitionEnd,
}

/// What the sequence wants done. The caller owns the clock and the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroEffect {
    /// Deliver `signal` once `after` has passed.
    Schedule { after: Duration, signal: IntroSignal },
    /// Make the drawing visible.
    ShowDrawing,
    /// Start the stroke animation of segment `index` after `delay`.
    StartStroke {
        index: usize,
        delay: Duration,
        duration: Duration,
    },
    /// Every segment has been drawn.
    MarkDrawn,
    /// Start fading out the intro container.
    HideIntro { duration: Duration },
    /// Remember for this session that the intro was shown.
    PersistIntroSeen,
    /// Reveal the main page.
    ShowMainContent,
    /// Start the rain ticker.
    StartRain,
}

/// One-shot intro sequence: `NotStarted → Revealing → Revealed → Hidden`.
///
/// Every stage after the reveal delay is chained on a completion signal, so
/// nothing races a transition against a guessed duration.
#[derive(Debug, Clone)]
pub struct IntroSequence {
    phase: IntroPhase,
    timing: IntroTiming,
    segment_count: usize,
    main_visible: bool,
}

impl IntroSequence {
    pub fn new(timing: IntroTiming, segment_count: usize) -> Self {
        Self {
            phase: IntroPhase::NotStarted,
            timing,
            segment_count,
            main_visible: false,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Whether the main content has been revealed.
    pub fn is_main_visible(&self) -> bool {
        self.main_visible
    }

    /// Begin the sequence. Only the first call has any effect.
    pub fn start(&mut self, intro_seen: bool) -> Vec<IntroEffect> {
        if self.phase != IntroPhase::NotStarted {
            return Vec::new();
        }

        if intro_seen {
            tracing::debug!("intro already shown this session, skipping");
            return self.skip();
        }
        if self.segment_count == 0 {
            tracing::warn!("intro drawing has no segments, skipping reveal");
            return self.skip();
        }

        self.phase = IntroPhase::Revealing;
        vec![IntroEffect::Schedule {
            after: self.timing.reveal_delay,
            signal: IntroSignal::RevealDelayElapsed,
        }]
    }

    /// Advance on a completion signal. Signals that do not apply to the
    /// current phase are ignored.
    pub fn handle(&mut self, signal: IntroSignal) -> Vec<IntroEffect> {
        match (self.phase, signal) {
            (IntroPhase::Revealing, IntroSignal::RevealDelayElapsed) => {
                let mut effects = Vec::with_capacity(self.segment_count + 1);
                effects.push(IntroEffect::ShowDrawing);
                effects.extend((0..self.segment_count).map(|index| IntroEffect::StartStroke {
                    index,
                    delay: self.timing.stroke_delay(index),
                    duration: self.timing.stroke_duration,
                }));
                effects
            }
            (IntroPhase::Revealing, IntroSignal::StrokeEnd(index))
                if index + 1 == self.segment_count =>
            {
                self.phase = IntroPhase::Revealed;
                vec![
                    IntroEffect::MarkDrawn,
                    IntroEffect::Schedule {
                        after: self.timing.pause,
                        signal: IntroSignal::PauseElapsed,
                    },
                ]
            }
            (IntroPhase::Revealed, IntroSignal::PauseElapsed) => {
                self.phase = IntroPhase::Hidden;
                vec![
                    IntroEffect::HideIntro {
                        duration: self.timing.fade,
                    },
                    IntroEffect::PersistIntroSeen,
                ]
            }
            (IntroPhase::Hidden, IntroSignal::HideTransitionEnd) if !self.main_visible => {
                self.main_visible = true;
                vec![IntroEffect::ShowMainContent, IntroEffect::StartRain]
            }
            _ => Vec::new(),
        }
    }

    fn skip(&mut self) -> Vec<IntroEffect> {
        self.phase = IntroPhase::Hidden;
        self.main_visible = true;
        vec![IntroEffect::StartRain, IntroEffect::ShowMainContent]
    }
}
