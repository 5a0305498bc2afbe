use chrono::Utc;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::utils::{finite_or_zero, parse_amount};

// Highest id handed out by this process, so ids are never reused even when
// several participants are created within the same millisecond.
static LAST_ISSUED_ID: AtomicI64 = AtomicI64::new(0);

/// Opaque participant identifier. Stored as a millisecond timestamp, which is
/// also how it appears inside the persisted `friends` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(i64);

impl ParticipantId {
    pub fn from_raw(raw: i64) -> Self {
        ParticipantId(raw)
    }

    /// Issues a fresh id: the current time in milliseconds, bumped past every
    /// id already issued by this process and past `floor` (typically the
    /// largest id of a hydrated participant list).
    pub fn next_after(floor: Option<ParticipantId>) -> Self {
        let now = Utc::now().timestamp_millis();
        let floor = floor.map_or(i64::MIN, |id| id.0).saturating_add(1);
        let bump = |last: i64| now.max(last.saturating_add(1)).max(floor);
        let previous = LAST_ISSUED_ID
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
            .unwrap_or_else(|last| last);
        ParticipantId(bump(previous))
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub expense: f64,
}

// Browser writers serialize NaN and Infinity as null, and some keep numbers as
// text. Every shape that is not a finite number becomes 0.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match RawAmount::deserialize(deserializer)? {
        RawAmount::Number(value) => finite_or_zero(value),
        RawAmount::Text(raw) => parse_amount(&raw),
        RawAmount::Other(_) => 0.0,
    })
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            expense: 0.0,
        }
    }
}

/// Everything the user has entered. Derived amounts are never stored here;
/// they are recomputed from this value on every read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillState {
    pub bill: f64,
    pub tip_percentage: f64,
    pub participants: Vec<Participant>,
}

impl BillState {
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn max_participant_id(&self) -> Option<ParticipantId> {
        self.participants.iter().map(|p| p.id).max()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
