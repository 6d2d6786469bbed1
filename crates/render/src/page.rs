use shared::{domain::LifecycleState, protocol::BoxSnapshot};

use crate::{
    markup::{escape, text_div},
    render_box,
};

pub const PAGE_TITLE: &str = "Loot Box Animation Examples";
const TAGLINE: &str = "8 Engaging Animation Patterns for Maximum User Engagement";

/// Keyframes the utility classes do not provide.
const EXTRA_STYLES: &str = r#"
@keyframes shake { 0%,100% { transform: rotate(0) } 25% { transform: rotate(-12deg) } 75% { transform: rotate(12deg) } }
@keyframes slot-spin { 0% { transform: translateY(-100%) } 100% { transform: translateY(100%) } }
@keyframes scale-in { 0% { transform: scale(0) } 100% { transform: scale(1) } }
@keyframes fade-in { 0% { opacity: 0 } 100% { opacity: 1 } }
@keyframes particle-1 { to { transform: translate(-48px, -48px); opacity: 0 } }
@keyframes particle-2 { to { transform: translate(48px, -48px); opacity: 0 } }
@keyframes particle-3 { to { transform: translate(-48px, 48px); opacity: 0 } }
@keyframes particle-4 { to { transform: translate(48px, 48px); opacity: 0 } }
.animate-shake { animation: shake 0.3s ease-in-out infinite }
.animate-slot-spin { animation: slot-spin 0.15s linear infinite }
.animate-scale-in { animation: scale-in 0.4s ease-out both }
.animate-fade-in { animation: fade-in 0.5s ease-out both }
.animate-particle-1 { animation: particle-1 0.8s ease-out both }
.animate-particle-2 { animation: particle-2 0.8s ease-out both }
.animate-particle-3 { animation: particle-3 0.8s ease-out both }
.animate-particle-4 { animation: particle-4 0.8s ease-out both }
.animation-delay-100 { animation-delay: 100ms }
.perspective-1000 { perspective: 1000px }
.transform-style-3d { transform-style: preserve-3d }
.backface-hidden { backface-visibility: hidden }
.rotate-y-180 { transform: rotateY(180deg) }
.scale-175 { transform: scale(1.75) }
"#;

/// Posts triggers and swaps box fragments pushed over the event socket.
const CLIENT_SCRIPT: &str = r#"
(() => {
  const scheme = location.protocol === 'https:' ? 'wss' : 'ws';
  const socket = new WebSocket(`${scheme}://${location.host}/ws`);
  socket.addEventListener('message', (msg) => {
    const event = JSON.parse(msg.data);
    if (event.type !== 'box_state_changed') return;
    const target = document.getElementById(`box-${event.payload.snapshot.box_id}`);
    if (target) target.outerHTML = event.payload.html;
  });
  document.addEventListener('click', (e) => {
    const button = e.target.closest('[data-action="trigger"]');
    if (!button || button.disabled) return;
    fetch(`/boxes/${button.dataset.boxId}/trigger`, { method: 'POST' });
  });
})();
"#;

fn legend_dot(state: LifecycleState) -> &'static str {
    match state {
        LifecycleState::Idle => "bg-green-500",
        LifecycleState::Anticipation => "bg-yellow-500 animate-pulse",
        LifecycleState::Opening => "bg-orange-500 animate-spin",
        LifecycleState::Revealing => "bg-purple-500 animate-bounce",
        LifecycleState::Claimed => "bg-gray-500",
    }
}

fn legend() -> String {
    let entries: String = LifecycleState::ALL
        .into_iter()
        .map(|state| {
            format!(
                "<div class=\"flex items-center gap-2\"><div class=\"w-4 h-4 {} rounded-full\"></div><span class=\"text-gray-200\">{}</span></div>",
                legend_dot(state),
                escape(state.legend_label()),
            )
        })
        .collect();

    format!(
        "<div class=\"inline-block bg-white/10 backdrop-blur-sm rounded-lg p-6 mb-8\">\
<h2 class=\"text-white font-semibold mb-3\">Reward Claim Lifecycle States:</h2>\
<div class=\"flex flex-wrap gap-4 justify-center text-sm\">{entries}</div></div>"
    )
}

/// Full showcase document with one card per snapshot, in the order given.
pub fn render_page(snapshots: &[BoxSnapshot]) -> String {
    let grid: String = snapshots.iter().map(render_box).collect();

    format!(
        "<!DOCTYPE html>\
<html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title>\
<script src=\"https://cdn.tailwindcss.com\"></script>\
<style>{EXTRA_STYLES}</style></head>\
<body><main class=\"min-h-screen bg-gradient-to-br from-slate-900 via-purple-900 to-slate-900 p-8\">\
<div class=\"max-w-7xl mx-auto\">\
<header class=\"text-center mb-12\">\
<h1 class=\"text-5xl font-bold text-white mb-4 bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 via-pink-500 to-purple-500\">{title}</h1>\
<p class=\"text-xl text-gray-300 mb-6\">{tagline}</p>{legend}</header>\
<div class=\"grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6\">{grid}</div>\
<footer class=\"mt-16 text-center text-gray-400 text-sm\">{hint}</footer>\
</div></main><script>{CLIENT_SCRIPT}</script></body></html>",
        title = escape(PAGE_TITLE),
        tagline = escape(TAGLINE),
        legend = legend(),
        hint = text_div("", "Click any box to see the complete animation lifecycle"),
    )
}
