// BillState transitions. Each one borrows the current state and returns the
// next one, leaving the input untouched.
pub mod participants;
pub mod totals;

pub use participants::{add_participant, delete_participant, update_expense};
pub use totals::{set_bill, set_tip_percentage};
