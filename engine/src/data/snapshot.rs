// Maps a BillState onto the three persisted slots and back.
use serde_json::Value;
use std::collections::HashSet;

use shared::models::{BillState, Participant};
use shared::utils::parse_amount;

use super::store::KeyValueStore;
use crate::error::EngineError;

pub const BILL_SLOT: &str = "bill";
pub const TIP_PERCENTAGE_SLOT: &str = "tipPercentage";
pub const FRIENDS_SLOT: &str = "friends";

/// Hydrates a state from the store. Each slot is loaded on its own: a slot
/// that cannot be read or parsed falls back to its default and does not
/// affect the others. The first such failure is returned next to the state.
pub async fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> (BillState, Option<EngineError>) {
    let mut first_error = None;

    let bill = load_amount(store, BILL_SLOT, &mut first_error).await.max(0.0);
    let tip_percentage = load_amount(store, TIP_PERCENTAGE_SLOT, &mut first_error).await;
    let participants = match load_participants(store).await {
        Ok(participants) => participants,
        Err(e) => {
            tracing::warn!(slot = FRIENDS_SLOT, error = %e, "Could not load participants");
            first_error.get_or_insert(e);
            Vec::new()
        }
    };

    tracing::debug!(bill, tip_percentage, participants = participants.len(), "Loaded bill state");
    (BillState { bill, tip_percentage, participants }, first_error)
}

/// Writes the whole state in one batch; there is no partial save.
pub async fn save_state<S: KeyValueStore + ?Sized>(store: &S, state: &BillState) -> Result<(), EngineError> {
    let friends = serde_json::to_string(&state.participants)?;
    let entries = [
        (BILL_SLOT, state.bill.to_string()),
        (TIP_PERCENTAGE_SLOT, state.tip_percentage.to_string()),
        (FRIENDS_SLOT, friends),
    ];
    store.set_many(&entries).await?;
    tracing::trace!(participants = state.participants.len(), "Saved bill state");
    Ok(())
}

async fn load_amount<S: KeyValueStore + ?Sized>(store: &S, slot: &str, first_error: &mut Option<EngineError>) -> f64 {
    match store.get(slot).await {
        Ok(raw) => raw.map_or(0.0, |raw| parse_amount(&raw)),
        Err(e) => {
            tracing::warn!(slot, error = %e, "Could not load slot");
            first_error.get_or_insert(e);
            0.0
        }
    }
}

// Only a slot that is not a JSON array fails as a whole; single bad entries are dropped.
async fn load_participants<S: KeyValueStore + ?Sized>(store: &S) -> Result<Vec<Participant>, EngineError> {
    let raw = match store.get(FRIENDS_SLOT).await? {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(Vec::new()),
    };
    let entries: Vec<Value> = serde_json::from_str(&raw)?;

    let mut seen = HashSet::new();
    let mut participants = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let participant: Participant = match serde_json::from_value(entry) {
            Ok(participant) => participant,
            Err(e) => {
                tracing::warn!(position, error = %e, "Dropping unreadable stored participant");
                continue;
            }
        };
        if participant.name.trim().is_empty() {
            tracing::warn!(participant_id = %participant.id, "Dropping stored participant with a blank name");
            continue;
        }
        if !seen.insert(participant.id) {
            tracing::warn!(participant_id = %participant.id, "Dropping stored participant with a duplicate id");
            continue;
        }
        participants.push(participant);
    }
    Ok(participants)
}
