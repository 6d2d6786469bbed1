use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BoxId, BoxVariant, LifecycleState};

/// Everything a renderer or a remote page needs to draw one box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSnapshot {
    pub box_id: BoxId,
    pub variant: BoxVariant,
    pub state: LifecycleState,
    /// Unlock progress (0..=3); only the multi-stage variant draws it.
    pub stage: u8,
    pub reward: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    BoxStateChanged {
        snapshot: BoxSnapshot,
        html: String,
        emitted_at: DateTime<Utc>,
    },
}
