use shared::models::BillState;
use shared::utils::finite_or_zero;

// Bill is never negative; anything that is not a usable amount becomes 0.
pub fn set_bill(state: &BillState, bill: f64) -> BillState {
    let bill = finite_or_zero(bill).max(0.0);
    tracing::debug!(bill, "Setting bill amount");
    BillState { bill, ..state.clone() }
}

// No range check: clamping the tip is up to whoever collects the input.
pub fn set_tip_percentage(state: &BillState, tip_percentage: f64) -> BillState {
    let tip_percentage = finite_or_zero(tip_percentage);
    tracing::debug!(tip_percentage, "Setting tip percentage");
    BillState { tip_percentage, ..state.clone() }
}
