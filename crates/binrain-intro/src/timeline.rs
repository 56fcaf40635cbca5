//! Clock side of the intro: timers, stroke animations and the hide fade.

use std::time::Duration;

use crate::sequence::IntroSignal;

/// Cubic ease-in-out over 0.0-1.0.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone)]
struct Stroke {
    index: usize,
    start: Duration,
    duration: Duration,
    ended: bool,
}

impl Stroke {
    fn end(&self) -> Duration {
        self.start + self.duration
    }
}

#[derive(Debug, Clone)]
struct Fade {
    start: Duration,
    duration: Duration,
    ended: bool,
}

/// Pending timers and running animations, keyed on time since startup.
///
/// [`Timeline::poll`] reports each completion once, stamped with the time it
/// actually happened so follow-up delays do not drift with the poll rate.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    timers: Vec<(Duration, IntroSignal)>,
    strokes: Vec<Stroke>,
    fade: Option<Fade>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `signal` at `at`.
    pub fn schedule(&mut self, at: Duration, signal: IntroSignal) {
        self.timers.push((at, signal));
    }

    /// Animate segment `index` from `start` for `duration`.
    pub fn start_stroke(&mut self, index: usize, start: Duration, duration: Duration) {
        self.strokes.retain(|s| s.index != index);
        self.strokes.push(Stroke {
            index,
            start,
            duration,
            ended: false,
        });
    }

    /// Fade the intro out from `start` over `duration`.
    pub fn start_fade(&mut self, start: Duration, duration: Duration) {
        self.fade = Some(Fade {
            start,
            duration,
            ended: false,
        });
    }

    /// Collect everything that completed at or before `now`, oldest first.
    pub fn poll(&mut self, now: Duration) -> Vec<(Duration, IntroSignal)> {
        let mut fired = Vec::new();

        self.timers.retain(|&(at, signal)| {
            if at <= now {
                fired.push((at, signal));
                false
            } else {
                true
            }
        });

        for stroke in self.strokes.iter_mut().filter(|s| !s.ended) {
            if stroke.end() <= now {
                stroke.ended = true;
                fired.push((stroke.end(), IntroSignal::StrokeEnd(stroke.index)));
            }
        }

        if let Some(fade) = self.fade.as_mut().filter(|f| !f.ended) {
            let end = fade.start + fade.duration;
            if end <= now {
                fade.ended = true;
                fired.push((end, IntroSignal::HideTransitionEnd));
            }
        }

        fired.sort_by_key(|&(at, _)| at);
        fired
    }

    /// Eased draw progress of segment `index` at `now`; 0.0 if not started.
    pub fn stroke_progress(&self, index: usize, now: Duration) -> f64 {
        let Some(stroke) = self.strokes.iter().find(|s| s.index == index) else {
            return 0.0;
        };
        if now <= stroke.start {
            return 0.0;
        }
        if stroke.duration.is_zero() || now >= stroke.end() {
            return 1.0;
        }
        let t = (now - stroke.start).as_secs_f64() / stroke.duration.as_secs_f64();
        ease_in_out(t)
    }

    /// Opacity of the intro container at `now`: 1.0 until the fade starts,
    /// then down to 0.0.
    pub fn fade_opacity(&self, now: Duration) -> f64 {
        let Some(fade) = &self.fade else {
            return 1.0;
        };
        if now <= fade.start {
            return 1.0;
        }
        if fade.duration.is_zero() {
            return 0.0;
        }
        let t = (now - fade.start).as_secs_f64() / fade.duration.as_secs_f64();
        (1.0 - t).clamp(0.0, 1.0)
    }

    /// Earliest pending completion, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        let timers = self.timers.iter().map(|&(at, _)| at);
        let strokes = self.strokes.iter().filter(|s| !s.ended).map(Stroke::end);
        let fade = self
            .fade
            .iter()
            .filter(|f| !f.ended)
            .map(|f| f.start + f.duration);
        timers.chain(strokes).chain(fade).min()
    }

    /// Whether an animation is in flight at `now` and needs redrawing.
    pub fn is_animating(&self, now: Duration) -> bool {
        let stroking = self
            .strokes
            .iter()
            .any(|s| !s.ended && now >= s.start);
        let fading = self.fade.as_ref().is_some_and(|f| !f.ended && now >= f.start);
        stroking || fading
    }
}
