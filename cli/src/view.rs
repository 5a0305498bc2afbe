// Text rendering of a bill and its split.
use engine::SplitSummary;
use shared::models::BillState;
use shared::utils::format_money;

use crate::config::DisplaySettings;

pub const OVER_BUDGET_WARNING: &str = "Warning: extra expenses exceed the total bill with tip!";
pub const EMPTY_LIST_HINT: &str = "No friends yet...";

pub fn render(state: &BillState, summary: &SplitSummary, display: &DisplaySettings) -> String {
    let money = |value: f64| format_money(value, &display.currency_symbol, display.decimals);
    let mut out = String::new();

    out.push_str(&format!("Bill: {}   Tip: {}%\n", money(state.bill), state.tip_percentage));
    out.push_str(&format!("Total with tip: {}\n", money(summary.total_with_tip)));
    out.push_str(&format!(
        "(Extra expenses: {} | {} to split)\n",
        money(summary.total_individual_expenses),
        money(summary.remaining_to_split)
    ));
    if summary.is_over_budget() {
        out.push_str(&format!("!! {}\n", OVER_BUDGET_WARNING));
    }

    if summary.shares.is_empty() {
        out.push_str(EMPTY_LIST_HINT);
        out.push('\n');
        return out;
    }

    let name_width = summary.shares.iter().map(|s| s.name.chars().count()).max().unwrap_or(0);
    for (position, share) in summary.shares.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}. {:<width$}  base {} + extra {} = {}\n",
            position + 1,
            share.name,
            money(summary.split_base_amount),
            money(share.expense),
            money(share.amount_owed),
            width = name_width,
        ));
    }
    out
}
