//! Observer port - structured observation of decisions and updates.
//!
//! The engine emits events instead of printing; hosts that want the old
//! debug-trace behavior implement this trait and log however they like.

use crate::{Result, store::TableKind};

/// Observer for engine decisions and learning updates.
///
/// All methods default to no-ops so implementations only override what they
/// care about. Observer failures propagate: a host that treats its trace as
/// required (e.g. an audit log) gets to abort the decision cycle.
pub trait DecisionObserver: Send {
    /// An action was selected. `state` and `action` are the encoded index
    /// tuples, `q_value` the stored value of the chosen pair, and `explored`
    /// whether the pick came from the random branch of ε-greedy.
    fn on_action_chosen(
        &mut self,
        _kind: TableKind,
        _state: &[usize],
        _action: &[usize],
        _q_value: f32,
        _explored: bool,
    ) -> Result<()> {
        Ok(())
    }

    /// A table cell moved from `old` to `new` through a learning update.
    fn on_value_updated(
        &mut self,
        _kind: TableKind,
        _state: &[usize],
        _action: &[usize],
        _old: f32,
        _new: f32,
    ) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl DecisionObserver for NullObserver {}
