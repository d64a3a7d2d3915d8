//! One-step Q-learning (Bellman) update.

use crate::q_table::QTable;

/// Before/after values of a single table cell update, handed to observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdUpdate {
    pub old: f32,
    pub new: f32,
}

/// Apply one off-policy TD update to `table[state + action]`:
///
/// Q(s,a) ← Q(s,a) + α[r + γ·max_a' Q(s',a') − Q(s,a)]
///
/// `best_next` is the caller-computed maximum over the successor state's full
/// action set. Arithmetic runs in f64 and is stored back as f32, the table's
/// cell type.
pub fn td_update(
    table: &mut QTable,
    state: &[usize],
    action: &[usize],
    reward: f64,
    best_next: f32,
    learning_rate: f64,
    discount_factor: f64,
) -> TdUpdate {
    let old = table.value(state, action);
    let td_target = reward + discount_factor * f64::from(best_next);
    let td_error = td_target - f64::from(old);
    let new = (f64::from(old) + learning_rate * td_error) as f32;
    table.set_value(state, action, new);
    TdUpdate { old, new }
}
