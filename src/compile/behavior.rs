use serde::{Deserialize, Serialize};

pub const FEEDBACK_GROUP: &str = "Feedback";
pub const EVENT_TYPE: &str = "BW";
pub const SUBMITTED_EVENT: &str = "submitted";
pub const THANK_YOU_STEP_ID: &str = "thank-you-step";

pub fn step_id(position: usize) -> String {
    format!("question-{position}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SubmitGuard {
    /// Submit stays inert until a star has been chosen.
    StarSelected,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capture {
    StarCount,
    TextInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Transition {
    Step { index: usize, target: String },
    ThankYou,
}

impl Transition {
    /// Transition out of the step at 0-based `index` of `total`.
    pub fn after(index: usize, total: usize) -> Self {
        if index + 1 < total {
            Self::Step {
                index: index + 1,
                target: step_id(index + 2),
            }
        } else {
            Self::ThankYou
        }
    }

    pub fn initial(total: usize) -> Self {
        if total == 0 {
            Self::ThankYou
        } else {
            Self::Step {
                index: 0,
                target: step_id(1),
            }
        }
    }

    pub fn target_id(&self) -> &str {
        match self {
            Self::Step { target, .. } => target,
            Self::ThankYou => THANK_YOU_STEP_ID,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTemplate {
    pub id: String,
    pub name: String,
    pub group: String,
    #[serde(rename = "type")]
    pub event_type: String,
    /// `track_data.type` the host tracker files the event under.
    pub channel: String,
}

/// What the runtime does for one step; paired 1:1 with the step's markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepBehavior {
    pub step_id: String,
    pub submit_id: String,
    pub guard: SubmitGuard,
    pub capture: Capture,
    pub max_stars: u32,
    pub analytics: AnalyticsTemplate,
    pub next: Transition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouBehavior {
    pub step_id: String,
    pub duration_ms: u64,
    pub transition_delay_ms: u64,
    pub continue_time: i64,
}

/// Everything the fixed runtime script needs, embedded as a serialized
/// attribute on the overlay root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeManifest {
    pub callback: String,
    pub initial: Transition,
    pub steps: Vec<StepBehavior>,
    pub thank_you: ThankYouBehavior,
}
