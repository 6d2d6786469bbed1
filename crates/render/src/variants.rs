//! The eight hand-authored box visuals. Each function draws only the
//! animated area of a card; the frame, reward panel and trigger control
//! are shared.

use shared::domain::{BoxVariant, LifecycleState};

use crate::{
    markup::{classes, div, escape, text_div},
    BoxView,
};

/// Per-variant colour scheme for the shared card frame.
pub(crate) struct Theme {
    pub card: &'static str,
    pub muted_text: &'static str,
    pub idle_button: &'static str,
    pub busy_button: &'static str,
    pub reward_animation: &'static str,
}

pub(crate) fn theme(variant: BoxVariant) -> Theme {
    match variant {
        BoxVariant::Spinning => Theme {
            card: "from-purple-900 to-purple-700",
            muted_text: "text-purple-200",
            idle_button: "bg-yellow-400 hover:bg-yellow-300 text-purple-900 hover:scale-105",
            busy_button: "bg-purple-600 text-purple-300 cursor-not-allowed",
            reward_animation: "animate-bounce",
        },
        BoxVariant::Chest => Theme {
            card: "from-amber-900 to-amber-700",
            muted_text: "text-amber-200",
            idle_button: "bg-yellow-500 hover:bg-yellow-400 text-amber-900 hover:scale-105",
            busy_button: "bg-amber-600 text-amber-300 cursor-not-allowed",
            reward_animation: "animate-fade-in",
        },
        BoxVariant::CardFlip => Theme {
            card: "from-blue-900 to-blue-700",
            muted_text: "text-blue-200",
            idle_button: "bg-blue-400 hover:bg-blue-300 text-blue-900 hover:scale-105",
            busy_button: "bg-blue-600 text-blue-300 cursor-not-allowed",
            reward_animation: "animate-bounce",
        },
        BoxVariant::SlotMachine => Theme {
            card: "from-red-900 to-red-700",
            muted_text: "text-red-200",
            idle_button: "bg-yellow-500 hover:bg-yellow-400 text-red-900 hover:scale-105",
            busy_button: "bg-red-600 text-red-300 cursor-not-allowed",
            reward_animation: "animate-pulse",
        },
        BoxVariant::ParticleBurst => Theme {
            card: "from-green-900 to-green-700",
            muted_text: "text-green-200",
            idle_button: "bg-green-400 hover:bg-green-300 text-green-900 hover:scale-105",
            busy_button: "bg-green-600 text-green-300 cursor-not-allowed",
            reward_animation: "animate-fade-in",
        },
        BoxVariant::MultiStage => Theme {
            card: "from-indigo-900 to-indigo-700",
            muted_text: "text-indigo-200",
            idle_button: "bg-indigo-400 hover:bg-indigo-300 text-indigo-900 hover:scale-105",
            busy_button: "bg-indigo-600 text-indigo-300 cursor-not-allowed",
            reward_animation: "animate-bounce",
        },
        BoxVariant::Shake => Theme {
            card: "from-pink-900 to-pink-700",
            muted_text: "text-pink-200",
            idle_button: "bg-pink-400 hover:bg-pink-300 text-pink-900 hover:scale-105",
            busy_button: "bg-pink-600 text-pink-300 cursor-not-allowed",
            reward_animation: "animate-bounce",
        },
        BoxVariant::GlowPulse => Theme {
            card: "from-cyan-900 to-cyan-700",
            muted_text: "text-cyan-200",
            idle_button: "bg-cyan-400 hover:bg-cyan-300 text-cyan-900 hover:scale-105",
            busy_button: "bg-cyan-600 text-cyan-300 cursor-not-allowed",
            reward_animation: "animate-pulse",
        },
    }
}

pub(crate) fn visual(view: &BoxView<'_>) -> String {
    match view.variant {
        BoxVariant::Spinning => spinning(view.state),
        BoxVariant::Chest => chest(view.state),
        BoxVariant::CardFlip => card_flip(view.state, view.reward.is_some()),
        BoxVariant::SlotMachine => slot_machine(view.state),
        BoxVariant::ParticleBurst => particle_burst(view.state),
        BoxVariant::MultiStage => multi_stage(view.state, view.stage),
        BoxVariant::Shake => shake(view.state),
        BoxVariant::GlowPulse => glow_pulse(view.state),
    }
}

fn overlay(class: &str, glyph: &str) -> String {
    div(
        "absolute inset-0 flex items-center justify-center",
        &text_div(class, glyph),
    )
}

fn check_or(state: LifecycleState, glyph: &'static str) -> &'static str {
    if state == LifecycleState::Claimed {
        "✓"
    } else {
        glyph
    }
}

fn spinning(state: LifecycleState) -> String {
    use LifecycleState::*;

    let body = text_div(
        &classes([
            ("w-full h-full bg-gradient-to-br from-yellow-400 to-orange-500 rounded-lg shadow-lg flex items-center justify-center text-4xl transform transition-all duration-300", true),
            ("hover:scale-110 hover:rotate-6", state == Idle),
            ("scale-150 opacity-0", state == Revealing),
            ("scale-50 opacity-30", state == Claimed),
        ]),
        check_or(state, "🎁"),
    );
    let sparkle = if state == Revealing {
        overlay("text-6xl animate-bounce", "✨")
    } else {
        String::new()
    };

    div(
        &classes([
            ("relative w-32 h-32", true),
            ("animate-spin", state == Opening),
            ("animate-pulse", state == Anticipation),
        ]),
        &format!("{body}{sparkle}"),
    )
}

fn chest(state: LifecycleState) -> String {
    use LifecycleState::*;

    let lid_open = matches!(state, Opening | Revealing);
    let lid = div(
        &classes([
            ("absolute top-0 left-0 w-full h-16 bg-gradient-to-b from-amber-600 to-amber-700 rounded-t-lg border-4 border-yellow-600 transform-origin-bottom transition-transform duration-700", true),
            ("-rotate-90 -translate-y-8", lid_open),
            ("animate-pulse", state == Anticipation),
        ]),
        &div("absolute top-1/2 left-1/2 transform -translate-x-1/2 -translate-y-1/2 w-6 h-6 bg-yellow-400 rounded-full", ""),
    );
    let base = div(
        &classes([
            ("absolute bottom-0 left-0 w-full h-20 bg-gradient-to-b from-amber-700 to-amber-800 rounded-b-lg border-4 border-yellow-600 border-t-0", true),
            ("hover:shadow-yellow-400/50 hover:shadow-lg", state == Idle),
        ]),
        "",
    );

    let mut inner = format!("{lid}{base}");
    if lid_open {
        inner.push_str(&div(
            "absolute bottom-20 left-1/2 transform -translate-x-1/2 w-24 h-32 bg-gradient-to-t from-yellow-300/80 to-transparent animate-pulse",
            "",
        ));
    }
    if state == Revealing {
        inner.push_str(&div("absolute top-0 left-0 w-2 h-2 bg-yellow-400 rounded-full animate-ping", ""));
        inner.push_str(&div("absolute top-0 right-0 w-2 h-2 bg-yellow-400 rounded-full animate-ping animation-delay-100", ""));
        inner.push_str(&div("absolute top-10 left-1/2 w-3 h-3 bg-yellow-300 rounded-full animate-bounce", ""));
    }

    div("relative w-32 h-32", &inner)
}

fn card_flip(state: LifecycleState, has_reward: bool) -> String {
    use LifecycleState::*;

    let back = div(
        &classes([
            ("absolute w-full h-full bg-gradient-to-br from-blue-500 to-purple-600 rounded-lg backface-hidden border-4 border-blue-300 flex items-center justify-center transition-all", true),
            ("hover:shadow-blue-400/50 hover:shadow-xl hover:scale-105", state == Idle),
        ]),
        &text_div("text-6xl", "🎴"),
    );
    let front = div(
        "absolute w-full h-full bg-gradient-to-br from-yellow-300 to-orange-400 rounded-lg backface-hidden rotate-y-180 border-4 border-yellow-200 flex items-center justify-center",
        &text_div("text-6xl", if has_reward { "🏆" } else { "✨" }),
    );
    let card = div(
        &classes([
            ("relative w-full h-full transition-transform duration-700 transform-style-3d", true),
            ("rotate-y-180", matches!(state, Opening | Revealing | Claimed)),
            ("animate-pulse", state == Anticipation),
        ]),
        &format!("{back}{front}"),
    );
    let sparkle = if state == Revealing {
        div(
            "absolute -top-8 left-1/2 transform -translate-x-1/2 animate-bounce",
            &text_div("text-4xl", "✨"),
        )
    } else {
        String::new()
    };

    div("relative w-32 h-48 perspective-1000", &format!("{card}{sparkle}"))
}

const SLOT_SYMBOLS: [&str; 5] = ["🍒", "💎", "⭐", "🎰", "💰"];

fn slot_machine(state: LifecycleState) -> String {
    use LifecycleState::*;

    let settled = matches!(state, Revealing | Claimed);
    let reels: String = SLOT_SYMBOLS
        .iter()
        .take(3)
        .map(|symbol| {
            text_div(
                &classes([
                    ("w-16 h-20 bg-white rounded flex items-center justify-center text-4xl overflow-hidden", true),
                    ("animate-slot-spin", state == Opening),
                ]),
                if settled { "💎" } else { *symbol },
            )
        })
        .collect();

    div(
        "bg-gradient-to-b from-yellow-600 to-yellow-700 p-4 rounded-lg border-4 border-yellow-500",
        &div("flex gap-2 bg-black p-3 rounded", &reels),
    )
}

fn particle_burst(state: LifecycleState) -> String {
    use LifecycleState::*;

    let orb = text_div(
        &classes([
            ("w-full h-full bg-gradient-to-br from-green-400 to-emerald-500 rounded-full shadow-lg flex items-center justify-center text-5xl transform transition-all duration-500", true),
            ("hover:scale-110", state == Idle),
            ("scale-110 animate-pulse", state == Opening),
            ("scale-0", state == Revealing),
        ]),
        check_or(state, "🌟"),
    );

    let mut inner = orb;
    if state == Revealing {
        for (corner, colour, animation) in [
            ("top-0 left-0", "bg-yellow-400", "animate-particle-1"),
            ("top-0 right-0", "bg-green-400", "animate-particle-2"),
            ("bottom-0 left-0", "bg-blue-400", "animate-particle-3"),
            ("bottom-0 right-0", "bg-pink-400", "animate-particle-4"),
        ] {
            inner.push_str(&div(
                &format!("absolute {corner} w-4 h-4 {colour} rounded-full {animation}"),
                "",
            ));
        }
        inner.push_str(&text_div(
            "absolute top-1/2 left-1/2 transform -translate-x-1/2 -translate-y-1/2 text-6xl animate-scale-in",
            "💎",
        ));
    }

    div("relative w-32 h-32", &inner)
}

const LOCK_LAYERS: [(&str, &str); 3] = [
    ("border-yellow-400", "scale-125 opacity-0"),
    ("border-green-400 scale-110", "scale-150 opacity-0"),
    ("border-blue-400 scale-125", "scale-175 opacity-0"),
];

fn multi_stage(state: LifecycleState, stage: u8) -> String {
    use LifecycleState::*;

    let mut inner = text_div(
        &classes([
            ("w-full h-full bg-gradient-to-br from-indigo-500 to-purple-600 rounded-lg shadow-lg flex items-center justify-center text-5xl transition-all duration-300", true),
            ("hover:scale-105", state == Idle),
        ]),
        check_or(state, "🔒"),
    );

    if state != Claimed {
        for (layer, (look, peeled)) in (1u8..).zip(LOCK_LAYERS) {
            let base = format!(
                "absolute top-0 left-0 w-full h-full border-4 {look} rounded-lg transition-all duration-500"
            );
            inner.push_str(&div(
                &classes([
                    (base.as_str(), true),
                    (peeled, state == Opening && stage >= layer),
                ]),
                "",
            ));
        }
    }
    if state == Revealing {
        inner.push_str(&text_div(
            "absolute inset-0 flex items-center justify-center text-6xl animate-bounce",
            "🎁",
        ));
    }

    let mut out = div("relative w-32 h-32", &inner);
    if state == Opening {
        out.push_str(&text_div(
            "text-white text-sm",
            &format!("Stage {stage}/{}", LOCK_LAYERS.len()),
        ));
    }
    out
}

fn shake(state: LifecycleState) -> String {
    use LifecycleState::*;

    let body = text_div(
        &classes([
            ("w-full h-full bg-gradient-to-br from-pink-400 to-rose-500 rounded-2xl shadow-lg flex items-center justify-center text-5xl transform transition-all duration-300", true),
            ("hover:rotate-12", state == Idle),
            ("animate-shake", state == Opening),
            ("scale-150 rotate-180 opacity-0", state == Revealing),
        ]),
        check_or(state, "🎀"),
    );
    let burst = if state == Revealing {
        overlay("text-6xl animate-bounce", "🎉")
    } else {
        String::new()
    };

    div("relative w-32 h-32", &format!("{body}{burst}"))
}

fn glow_pulse(state: LifecycleState) -> String {
    use LifecycleState::*;

    let mut inner = text_div(
        &classes([
            ("w-full h-full bg-gradient-to-br from-cyan-400 to-blue-500 rounded-full shadow-lg flex items-center justify-center text-5xl transform transition-all duration-500", true),
            ("hover:shadow-cyan-400/70 hover:shadow-2xl", state == Idle),
            ("animate-ping", state == Opening),
            ("scale-0", state == Revealing),
            ("opacity-30", state == Claimed),
        ]),
        "⚡",
    );
    if state == Opening {
        inner.push_str(&div(
            "absolute inset-0 rounded-full bg-cyan-400/30 animate-ping",
            "",
        ));
    }
    if state == Revealing {
        inner.push_str(&overlay("text-7xl animate-scale-in", "💫"));
    }

    div("relative w-32 h-32", &inner)
}

/// Reward panel, shown only while the box is revealing.
pub(crate) fn reward_panel(view: &BoxView<'_>, animation: &str) -> String {
    match view.reward {
        Some(reward) if view.state == LifecycleState::Revealing && !reward.is_empty() => div(
            &format!("bg-white/20 backdrop-blur-sm px-6 py-3 rounded-lg {animation}"),
            &format!(
                "<p class=\"text-yellow-300 font-bold text-lg\">{}</p>",
                escape(reward)
            ),
        ),
        _ => String::new(),
    }
}
