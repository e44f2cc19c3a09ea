use crate::compile::behavior::{Capture, RuntimeManifest, StepBehavior, SubmitGuard, Transition};
use crate::util::text::pluralize_stars;

use super::host::{CapturedValue, Host, TrackEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// 0-based index into the manifest's steps.
    Step(usize),
    ThankYou,
    /// Acknowledgment removed, waiting out the transition delay.
    Dismissing,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    AcknowledgmentExpired,
    HandBack,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    due_ms: u64,
    kind: TimerKind,
}

/// Rust interpreter for a [`RuntimeManifest`], step for step the same
/// machine the embedded script runs. Time is virtual and only moves through
/// [`Machine::advance`].
#[derive(Debug, Clone)]
pub struct Machine {
    manifest: RuntimeManifest,
    state: State,
    submitted: Vec<bool>,
    stars: Vec<u32>,
    inputs: Vec<String>,
    now_ms: u64,
    timer: Option<Timer>,
    acknowledgment_visible: bool,
}

impl Machine {
    pub fn new(manifest: RuntimeManifest) -> Self {
        let count = manifest.steps.len();
        let mut machine = Self {
            manifest,
            state: State::Closed,
            submitted: vec![false; count],
            stars: vec![0; count],
            inputs: vec![String::new(); count],
            now_ms: 0,
            timer: None,
            acknowledgment_visible: false,
        };
        let initial = machine.manifest.initial.clone();
        machine.enter(&initial);
        machine
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_acknowledgment_visible(&self) -> bool {
        self.acknowledgment_visible
    }

    pub fn selected_stars(&self, step: usize) -> u32 {
        self.stars.get(step).copied().unwrap_or(0)
    }

    /// Whether the step's submit control currently accepts a click.
    pub fn is_submit_armed(&self, step: usize) -> bool {
        let Some(behavior) = self.active(step) else {
            return false;
        };
        match behavior.guard {
            SubmitGuard::StarSelected => self.stars[step] > 0,
            SubmitGuard::Open => true,
        }
    }

    pub fn active_step_id(&self) -> &str {
        match self.state {
            State::Step(index) => &self.manifest.steps[index].step_id,
            State::ThankYou | State::Dismissing | State::Closed => &self.manifest.thank_you.step_id,
        }
    }

    pub fn select_star(&mut self, step: usize, count: u32) -> bool {
        let Some(behavior) = self.active(step) else {
            return false;
        };
        if behavior.capture != Capture::StarCount || count < 1 || count > behavior.max_stars {
            return false;
        }
        self.stars[step] = count;
        true
    }

    pub fn input_text(&mut self, step: usize, value: &str) -> bool {
        let Some(behavior) = self.active(step) else {
            return false;
        };
        if behavior.capture != Capture::TextInput {
            return false;
        }
        self.inputs[step] = value.to_string();
        true
    }

    /// Activates the step's submit control. Returns `true` only when the
    /// click fired the step's side effects and moved the machine on.
    pub fn submit(&mut self, step: usize, host: &mut dyn Host) -> bool {
        let Some(behavior) = self.active(step) else {
            return false;
        };
        let value = match behavior.capture {
            Capture::StarCount => {
                let count = self.stars[step];
                if behavior.guard == SubmitGuard::StarSelected && count == 0 {
                    return false;
                }
                CapturedValue::Feedback(pluralize_stars(count))
            }
            Capture::TextInput => CapturedValue::Text(self.inputs[step].clone()),
        };
        let analytics = behavior.analytics.clone();
        let next = behavior.next.clone();

        self.submitted[step] = true;
        let event = TrackEvent {
            id: analytics.id,
            name: analytics.name,
            group: analytics.group,
            value,
            event_type: analytics.event_type,
            event: crate::compile::behavior::SUBMITTED_EVENT.to_string(),
            offset: host.current_time().unwrap_or(0),
        };
        host.track(&analytics.channel, &event);
        self.enter(&next);
        true
    }

    /// Moves virtual time forward, firing due timers in order.
    pub fn advance(&mut self, ms: u64, host: &mut dyn Host) {
        let target = self.now_ms.saturating_add(ms);
        while let Some(timer) = self.timer {
            if timer.due_ms > target {
                break;
            }
            self.timer = None;
            self.now_ms = timer.due_ms;
            self.fire(timer.kind, host);
        }
        self.now_ms = target;
    }

    fn active(&self, step: usize) -> Option<&StepBehavior> {
        match self.state {
            State::Step(index) if index == step && !self.submitted[step] => {
                self.manifest.steps.get(step)
            }
            _ => None,
        }
    }

    fn enter(&mut self, transition: &Transition) {
        match transition {
            Transition::Step { index, .. } if *index < self.manifest.steps.len() => {
                self.state = State::Step(*index);
            }
            _ => {
                self.state = State::ThankYou;
                self.acknowledgment_visible = true;
                self.schedule(self.manifest.thank_you.duration_ms, TimerKind::AcknowledgmentExpired);
            }
        }
    }

    fn schedule(&mut self, delay_ms: u64, kind: TimerKind) {
        self.timer = Some(Timer {
            due_ms: self.now_ms.saturating_add(delay_ms),
            kind,
        });
    }

    fn fire(&mut self, kind: TimerKind, host: &mut dyn Host) {
        match kind {
            TimerKind::AcknowledgmentExpired => {
                self.acknowledgment_visible = false;
                self.state = State::Dismissing;
                self.schedule(self.manifest.thank_you.transition_delay_ms, TimerKind::HandBack);
            }
            TimerKind::HandBack => {
                self.state = State::Closed;
                host.seek_to(self.manifest.thank_you.continue_time);
                host.hide();
            }
        }
    }
}
