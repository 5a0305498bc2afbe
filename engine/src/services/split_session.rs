// The state-loading/saving boundary handed to the front end.
// Loads once at startup, saves the whole snapshot after each mutation, and
// reports storage problems as values instead of aborting.
use shared::models::{BillState, Participant, ParticipantId};

use crate::calculator::SplitSummary;
use crate::data::snapshot::{load_state, save_state};
use crate::data::store::KeyValueStore;
use crate::error::EngineError;
use crate::operations;

/// Outcome of a session operation whose persistence succeeded (or was not needed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    Unchanged,
}

pub struct SplitSession<S> {
    store: S,
    state: BillState,
    // Set when the in-memory state is ahead of the store after a failed save.
    dirty: bool,
}

impl<S: KeyValueStore> SplitSession<S> {
    /// Hydrates from `store`. Slots that fail to load start from their
    /// defaults while the rest is kept; the first error is handed back so the
    /// caller can tell the user.
    pub async fn open(store: S) -> (Self, Option<EngineError>) {
        let (state, load_error) = load_state(&store).await;
        match &load_error {
            None => tracing::info!(participants = state.participants.len(), "Session opened from stored state"),
            Some(e) => tracing::warn!(error = %e, participants = state.participants.len(), "Session opened from partially loaded state"),
        }
        (Self { store, state, dirty: false }, load_error)
    }

    pub fn state(&self) -> &BillState {
        &self.state
    }

    pub fn summary(&self) -> SplitSummary {
        SplitSummary::compute(&self.state)
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.state.participant(id)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub async fn set_bill(&mut self, bill: f64) -> Result<Change, EngineError> {
        let next = operations::set_bill(&self.state, bill);
        self.commit(next).await
    }

    pub async fn set_tip_percentage(&mut self, tip_percentage: f64) -> Result<Change, EngineError> {
        let next = operations::set_tip_percentage(&self.state, tip_percentage);
        self.commit(next).await
    }

    pub async fn add_participant(&mut self, name: &str) -> Result<Change, EngineError> {
        let next = operations::add_participant(&self.state, name);
        self.commit(next).await
    }

    pub async fn update_expense(&mut self, id: ParticipantId, raw_value: &str) -> Result<Change, EngineError> {
        let next = operations::update_expense(&self.state, id, raw_value);
        self.commit(next).await
    }

    pub async fn delete_participant(&mut self, id: ParticipantId) -> Result<Change, EngineError> {
        let next = operations::delete_participant(&self.state, id);
        self.commit(next).await
    }

    /// Writes the current state regardless of whether anything changed.
    pub async fn save(&mut self) -> Result<(), EngineError> {
        match save_state(&self.store, &self.state).await {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                self.dirty = true;
                tracing::error!(error = %e, "Failed to save bill state, keeping it in memory");
                Err(e)
            }
        }
    }

    // The new state is kept even when saving it fails.
    async fn commit(&mut self, next: BillState) -> Result<Change, EngineError> {
        if next == self.state {
            return Ok(Change::Unchanged);
        }
        self.state = next;
        self.save().await?;
        Ok(Change::Applied)
    }
}
