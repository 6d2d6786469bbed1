//! Stateless renderers for the showcase boxes.
//!
//! Everything here is a pure function of a [`BoxSnapshot`]: the same
//! snapshot always yields the same markup, and no renderer feeds anything
//! back to the lifecycle.

pub mod markup;
mod page;
mod variants;

use shared::{
    domain::{BoxId, BoxVariant, LifecycleState},
    protocol::BoxSnapshot,
};

use markup::{classes, escape};

pub use page::{render_page, PAGE_TITLE};

/// Borrowed view of one box, the renderer's only input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxView<'a> {
    pub box_id: BoxId,
    pub variant: BoxVariant,
    pub state: LifecycleState,
    pub stage: u8,
    pub reward: Option<&'a str>,
}

impl<'a> From<&'a BoxSnapshot> for BoxView<'a> {
    fn from(snapshot: &'a BoxSnapshot) -> Self {
        Self {
            box_id: snapshot.box_id,
            variant: snapshot.variant,
            state: snapshot.state,
            stage: snapshot.stage,
            reward: Some(snapshot.reward.as_str()).filter(|reward| !reward.is_empty()),
        }
    }
}

/// DOM id of the element a box renders into.
pub fn box_element_id(box_id: BoxId) -> String {
    format!("box-{box_id}")
}

pub fn render_box(snapshot: &BoxSnapshot) -> String {
    render_view(&BoxView::from(snapshot))
}

pub fn render_view(view: &BoxView<'_>) -> String {
    let theme = variants::theme(view.variant);
    let visual = variants::visual(view);
    let reward = variants::reward_panel(view, theme.reward_animation);
    let button = trigger_button(view, theme.idle_button, theme.busy_button);

    format!(
        "<section id=\"{id}\" class=\"bg-gradient-to-br {card} p-6 rounded-xl shadow-2xl\" data-variant=\"{variant}\" data-state=\"{state}\">\
<h3 class=\"text-xl font-bold text-white mb-2\">{title}</h3>\
<p class=\"{muted} text-sm mb-4\">{description}</p>\
<div class=\"flex flex-col items-center gap-4\">{visual}{reward}{button}</div>\
</section>",
        id = box_element_id(view.box_id),
        card = theme.card,
        variant = variant_slug(view.variant),
        state = view.state,
        title = escape(view.variant.title()),
        muted = theme.muted_text,
        description = escape(view.variant.description()),
    )
}

fn trigger_button(view: &BoxView<'_>, idle: &str, busy: &str) -> String {
    let state = view.state;
    let class = classes([
        ("px-6 py-2 rounded-full font-semibold transition-all", true),
        (idle, state == LifecycleState::Idle),
        (
            "bg-gray-500 text-gray-300 cursor-not-allowed",
            state == LifecycleState::Claimed,
        ),
        (busy, state.is_in_flight()),
    ]);
    let disabled = if state.accepts_trigger() { "" } else { " disabled" };

    format!(
        "<button type=\"button\" data-action=\"trigger\" data-box-id=\"{}\" class=\"{class}\"{disabled}>{}</button>",
        view.box_id,
        escape(view.variant.button_label(state)),
    )
}

fn variant_slug(variant: BoxVariant) -> &'static str {
    match variant {
        BoxVariant::Spinning => "spinning",
        BoxVariant::Chest => "chest",
        BoxVariant::CardFlip => "card_flip",
        BoxVariant::SlotMachine => "slot_machine",
        BoxVariant::ParticleBurst => "particle_burst",
        BoxVariant::MultiStage => "multi_stage",
        BoxVariant::Shake => "shake",
        BoxVariant::GlowPulse => "glow_pulse",
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
