use shared::models::{BillState, Participant, ParticipantId};
use shared::utils::parse_amount;

/// Appends a participant with a fresh id and no extra expense. A name that is
/// empty after trimming leaves the state as it was.
pub fn add_participant(state: &BillState, name: &str) -> BillState {
    let name = name.trim();
    if name.is_empty() {
        tracing::debug!("Ignoring participant with a blank name");
        return state.clone();
    }

    let id = ParticipantId::next_after(state.max_participant_id());
    tracing::debug!(participant_id = %id, name, "Adding participant");

    let mut participants = state.participants.clone();
    participants.push(Participant::new(id, name));
    BillState { participants, ..state.clone() }
}

/// Sets one participant's extra expense from raw user text. Anything that does
/// not parse as a finite number is stored as 0; negatives are kept.
pub fn update_expense(state: &BillState, id: ParticipantId, raw_value: &str) -> BillState {
    if state.participant(id).is_none() {
        tracing::debug!(participant_id = %id, "Expense update for unknown participant ignored");
        return state.clone();
    }

    let expense = parse_amount(raw_value);
    tracing::debug!(participant_id = %id, expense, "Updating participant expense");

    let participants = state
        .participants
        .iter()
        .map(|p| if p.id == id { Participant { expense, ..p.clone() } } else { p.clone() })
        .collect();
    BillState { participants, ..state.clone() }
}

pub fn delete_participant(state: &BillState, id: ParticipantId) -> BillState {
    if state.participant(id).is_none() {
        tracing::debug!(participant_id = %id, "Delete for unknown participant ignored");
        return state.clone();
    }

    tracing::debug!(participant_id = %id, "Deleting participant");
    let participants = state.participants.iter().filter(|p| p.id != id).cloned().collect();
    BillState { participants, ..state.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(names: &[&str]) -> BillState {
        names.iter().fold(BillState::default(), |state, name| add_participant(&state, name))
    }

    fn ids(state: &BillState) -> Vec<ParticipantId> {
        state.participants.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_add_participants_preserves_order() {
        let state = state_with(&["Alice", "Bob"]);
        let names: Vec<&str> = state.participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_ne!(state.participants[0].id, state.participants[1].id);
        assert!(state.participants.iter().all(|p| p.expense == 0.0));
    }

    #[test]
    fn test_add_blank_name_is_noop() {
        let state = state_with(&["Alice"]);
        for blank in ["", "   ", "\t\n"] {
            let next = add_participant(&state, blank);
            assert_eq!(next, state);
            assert_eq!(ids(&next), ids(&state));
        }
    }

    #[test]
    fn test_add_trims_name() {
        let state = state_with(&["  Carol  "]);
        assert_eq!(state.participants[0].name, "Carol");
    }

    #[test]
    fn test_add_does_not_touch_previous_state() {
        let state = state_with(&["Alice"]);
        let next = add_participant(&state, "Bob");
        assert_eq!(state.participant_count(), 1);
        assert_eq!(next.participant_count(), 2);
    }

    #[test]
    fn test_add_after_hydrated_ids_stays_unique() {
        let mut state = BillState::default();
        state.participants.push(Participant::new(ParticipantId::from_raw(i64::MAX / 2), "Future"));
        let next = add_participant(&state, "Now");
        assert!(next.participants[1].id > next.participants[0].id);
    }

    #[test]
    fn test_update_expense() {
        let state = state_with(&["A", "B"]);
        let a = state.participants[0].id;
        let next = update_expense(&state, a, "20");
        assert_eq!(next.participants[0].expense, 20.0);
        assert_eq!(next.participants[1], state.participants[1]);
        assert_eq!(ids(&next), ids(&state));
    }

    #[test]
    fn test_update_expense_invalid_input_is_zero() {
        let state = state_with(&["A"]);
        let a = state.participants[0].id;
        let state = update_expense(&state, a, "15");
        assert_eq!(update_expense(&state, a, "abc").participants[0].expense, 0.0);
        assert_eq!(update_expense(&state, a, "").participants[0].expense, 0.0);
        assert_eq!(update_expense(&state, a, "NaN").participants[0].expense, 0.0);
    }

    #[test]
    fn test_update_expense_accepts_negative() {
        let state = state_with(&["A"]);
        let a = state.participants[0].id;
        assert_eq!(update_expense(&state, a, "-5").participants[0].expense, -5.0);
    }

    #[test]
    fn test_update_expense_unknown_id_is_noop() {
        let state = state_with(&["A"]);
        let next = update_expense(&state, ParticipantId::from_raw(-1), "10");
        assert_eq!(next, state);
    }

    #[test]
    fn test_delete_participant() {
        let state = state_with(&["A", "B", "C"]);
        let b = state.participants[1].id;
        let next = delete_participant(&state, b);
        let names: Vec<&str> = next.participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(state.participant_count(), 3);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let state = state_with(&["A", "B"]);
        let next = delete_participant(&state, ParticipantId::from_raw(-1));
        assert_eq!(next, state);
    }
}
