use serde::Serialize;
use tera::Context;

use crate::render::templates::{OverlayTemplates, STAR_STEP, TEXT_STEP, THANK_YOU};
use crate::survey::types::{ResolvedKind, ResolvedQuestion, ThankYou};

use super::behavior::{
    step_id, AnalyticsTemplate, Capture, StepBehavior, SubmitGuard, Transition,
    EVENT_TYPE, FEEDBACK_GROUP, THANK_YOU_STEP_ID,
};
use super::error::CompileError;

/// Markup and behavior for one question, produced together so the assembler
/// never has to line them up by index.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub markup: String,
    pub behavior: StepBehavior,
}

#[derive(Debug, Serialize)]
struct StepView<'a> {
    step_id: &'a str,
    submit_id: &'a str,
    position: usize,
    total: usize,
    active: bool,
    text: &'a str,
    track_id: &'a str,
    track_name: &'a str,
    next_step: &'a str,
    label: &'a str,
    stars: Vec<u32>,
    placeholder: &'a str,
}

pub fn submit_label(position: usize, total: usize) -> &'static str {
    if position == total {
        "SUBMIT FEEDBACK"
    } else {
        "NEXT"
    }
}

pub fn build_behavior(q: &ResolvedQuestion, total: usize, max_stars: u32) -> StepBehavior {
    let (guard, capture, submit_id, channel, stars) = match &q.kind {
        ResolvedKind::StarRating => (
            SubmitGuard::StarSelected,
            Capture::StarCount,
            format!("survey-submit-{}", q.position),
            "feedback",
            max_stars,
        ),
        ResolvedKind::Text { .. } => (
            SubmitGuard::Open,
            Capture::TextInput,
            format!("text-submit-{}", q.position),
            "customform",
            0,
        ),
    };
    StepBehavior {
        step_id: step_id(q.position),
        submit_id,
        guard,
        capture,
        max_stars: stars,
        analytics: AnalyticsTemplate {
            id: q.track_id.clone(),
            name: q.track_name.clone(),
            group: FEEDBACK_GROUP.to_string(),
            event_type: EVENT_TYPE.to_string(),
            channel: channel.to_string(),
        },
        next: Transition::after(q.position - 1, total),
    }
}

pub fn build_step(
    templates: &OverlayTemplates,
    q: &ResolvedQuestion,
    total: usize,
    max_stars: u32,
) -> Result<StepRecord, CompileError> {
    let behavior = build_behavior(q, total, max_stars);
    let (partial, placeholder) = match &q.kind {
        ResolvedKind::StarRating => (STAR_STEP, ""),
        ResolvedKind::Text { placeholder } => (TEXT_STEP, placeholder.as_str()),
    };
    let view = StepView {
        step_id: &behavior.step_id,
        submit_id: &behavior.submit_id,
        position: q.position,
        total,
        active: q.position == 1,
        text: &q.text,
        track_id: &q.track_id,
        track_name: &q.track_name,
        next_step: behavior.next.target_id(),
        label: submit_label(q.position, total),
        stars: (1..=behavior.max_stars).collect(),
        placeholder,
    };
    let mut ctx = Context::new();
    ctx.insert("step", &view);
    let markup = templates.render(partial, &ctx)?;
    Ok(StepRecord { markup, behavior })
}

pub fn build_steps(
    templates: &OverlayTemplates,
    questions: &[ResolvedQuestion],
    max_stars: u32,
) -> Result<Vec<StepRecord>, CompileError> {
    questions
        .iter()
        .map(|q| build_step(templates, q, questions.len(), max_stars))
        .collect()
}

#[derive(Debug, Serialize)]
struct ThankYouView<'a> {
    step_id: &'a str,
    active: bool,
    message: &'a str,
    subtext: &'a str,
}

pub fn build_thank_you(
    templates: &OverlayTemplates,
    thank_you: &ThankYou,
    initial: bool,
) -> Result<String, CompileError> {
    let view = ThankYouView {
        step_id: THANK_YOU_STEP_ID,
        active: initial,
        message: &thank_you.message,
        subtext: &thank_you.subtext,
    };
    let mut ctx = Context::new();
    ctx.insert("thank_you", &view);
    templates.render(THANK_YOU, &ctx)
}
