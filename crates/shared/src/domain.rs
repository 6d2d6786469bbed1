use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId(pub u32);

impl BoxId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of boxes on the showcase page, one per [`BoxVariant`].
pub const BOX_COUNT: usize = 8;

/// Static rewards, indexed by box id.
pub const REWARDS: [&str; BOX_COUNT] = [
    "🏆 Legendary Sword",
    "💎 1000 Gems",
    "⭐ Epic Skin",
    "💰 Jackpot!",
    "🎁 Mystery Box",
    "🔮 Rare Artifact",
    "🎉 Party Pack",
    "⚡ Power Boost",
];

pub fn reward_for(box_id: BoxId) -> Option<&'static str> {
    REWARDS.get(box_id.index()).copied()
}

pub fn all_box_ids() -> impl Iterator<Item = BoxId> {
    (0..BOX_COUNT as u32).map(BoxId)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Idle,
    Anticipation,
    Opening,
    Revealing,
    Claimed,
}

impl LifecycleState {
    pub const ALL: [LifecycleState; 5] = [
        LifecycleState::Idle,
        LifecycleState::Anticipation,
        LifecycleState::Opening,
        LifecycleState::Revealing,
        LifecycleState::Claimed,
    ];

    /// A new sequence may only start from a resting state.
    pub fn accepts_trigger(self) -> bool {
        matches!(self, LifecycleState::Idle | LifecycleState::Claimed)
    }

    pub fn is_in_flight(self) -> bool {
        !self.accepts_trigger()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Anticipation => "anticipation",
            LifecycleState::Opening => "opening",
            LifecycleState::Revealing => "revealing",
            LifecycleState::Claimed => "claimed",
        }
    }

    /// Label shown in the page legend.
    pub fn legend_label(self) -> &'static str {
        match self {
            LifecycleState::Idle => "Idle/Available",
            LifecycleState::Anticipation => "Anticipation",
            LifecycleState::Opening => "Opening/Active",
            LifecycleState::Revealing => "Revealing",
            LifecycleState::Claimed => "Claimed/Complete",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxVariant {
    Spinning,
    Chest,
    CardFlip,
    SlotMachine,
    ParticleBurst,
    MultiStage,
    Shake,
    GlowPulse,
}

impl BoxVariant {
    /// Variants in page order; the position is the box id.
    pub const ALL: [BoxVariant; BOX_COUNT] = [
        BoxVariant::Spinning,
        BoxVariant::Chest,
        BoxVariant::CardFlip,
        BoxVariant::SlotMachine,
        BoxVariant::ParticleBurst,
        BoxVariant::MultiStage,
        BoxVariant::Shake,
        BoxVariant::GlowPulse,
    ];

    pub fn for_box(box_id: BoxId) -> Option<Self> {
        Self::ALL.get(box_id.index()).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            BoxVariant::Spinning => "Classic Spinner",
            BoxVariant::Chest => "Treasure Chest",
            BoxVariant::CardFlip => "Card Flip",
            BoxVariant::SlotMachine => "Slot Machine",
            BoxVariant::ParticleBurst => "Particle Burst",
            BoxVariant::MultiStage => "Multi-Stage Unlock",
            BoxVariant::Shake => "Shake & Open",
            BoxVariant::GlowPulse => "Glow Pulse",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BoxVariant::Spinning => "Traditional spinning box with scale effects",
            BoxVariant::Chest => "Classic chest opening with light beam",
            BoxVariant::CardFlip => "3D card flip reveal animation",
            BoxVariant::SlotMachine => "Vegas-style spinning slots",
            BoxVariant::ParticleBurst => "Explosive particle reveal effect",
            BoxVariant::MultiStage => "Progressive unlock with multiple layers",
            BoxVariant::Shake => "Shake animation before opening",
            BoxVariant::GlowPulse => "Pulsing glow with energy effects",
        }
    }

    pub fn open_label(self) -> &'static str {
        match self {
            BoxVariant::Spinning => "Open Box",
            BoxVariant::Chest => "Open Chest",
            BoxVariant::CardFlip => "Flip Card",
            BoxVariant::SlotMachine => "Pull Lever",
            BoxVariant::ParticleBurst => "Burst Open",
            BoxVariant::MultiStage => "Unlock",
            BoxVariant::Shake => "Shake & Open",
            BoxVariant::GlowPulse => "Activate",
        }
    }

    pub fn progress_label(self) -> &'static str {
        match self {
            BoxVariant::Spinning | BoxVariant::Chest => "Opening...",
            BoxVariant::CardFlip => "Flipping...",
            BoxVariant::SlotMachine => "Spinning...",
            BoxVariant::ParticleBurst => "Bursting...",
            BoxVariant::MultiStage => "Unlocking...",
            BoxVariant::Shake => "Shaking...",
            BoxVariant::GlowPulse => "Activating...",
        }
    }

    /// Trigger control label for the given state.
    pub fn button_label(self, state: LifecycleState) -> &'static str {
        match state {
            LifecycleState::Idle => self.open_label(),
            LifecycleState::Claimed => "Claimed",
            _ => self.progress_label(),
        }
    }
}
