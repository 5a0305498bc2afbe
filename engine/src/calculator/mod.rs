// Split calculation: derives every monetary output from a BillState.
// Nothing in here performs I/O or mutates its inputs.
use shared::models::{BillState, Participant, ParticipantId};
use shared::utils::finite_or_zero;

pub struct SplitCalculator;

impl SplitCalculator {
    pub fn total_with_tip(bill: f64, tip_percentage: f64) -> f64 {
        let bill = finite_or_zero(bill);
        bill + bill * tip_percentage / 100.0
    }

    pub fn total_individual_expenses(participants: &[Participant]) -> f64 {
        participants.iter().map(|p| p.expense).sum()
    }

    // Negative when the extras exceed the tipped bill. That is reported, not clamped.
    pub fn remaining_to_split(total_with_tip: f64, total_individual_expenses: f64) -> f64 {
        total_with_tip - total_individual_expenses
    }

    pub fn split_base_amount(remaining_to_split: f64, participant_count: usize) -> f64 {
        if participant_count == 0 {
            return 0.0;
        }
        remaining_to_split / participant_count as f64
    }

    pub fn amount_owed(split_base_amount: f64, expense: f64) -> f64 {
        split_base_amount + expense
    }
}

/// What one participant ends up paying.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantShare {
    pub id: ParticipantId,
    pub name: String,
    pub expense: f64,
    pub amount_owed: f64,
}

/// All derived values for a state, in full precision.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitSummary {
    pub total_with_tip: f64,
    pub total_individual_expenses: f64,
    pub remaining_to_split: f64,
    pub split_base_amount: f64,
    pub shares: Vec<ParticipantShare>,
}

impl SplitSummary {
    pub fn compute(state: &BillState) -> Self {
        let total_with_tip = SplitCalculator::total_with_tip(state.bill, state.tip_percentage);
        let total_individual_expenses = SplitCalculator::total_individual_expenses(&state.participants);
        let remaining_to_split = SplitCalculator::remaining_to_split(total_with_tip, total_individual_expenses);
        let split_base_amount = SplitCalculator::split_base_amount(remaining_to_split, state.participants.len());

        let shares = state
            .participants
            .iter()
            .map(|p| ParticipantShare {
                id: p.id,
                name: p.name.clone(),
                expense: p.expense,
                amount_owed: SplitCalculator::amount_owed(split_base_amount, p.expense),
            })
            .collect();

        SplitSummary {
            total_with_tip,
            total_individual_expenses,
            remaining_to_split,
            split_base_amount,
            shares,
        }
    }

    /// True when the individual extras exceed the bill with tip.
    pub fn is_over_budget(&self) -> bool {
        self.remaining_to_split < 0.0
    }
}
