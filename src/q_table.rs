//! Dense Q-table over a fixed multi-dimensional shape.

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

/// Q-table mapping (state, action) index tuples to Q-values.
///
/// One axis per state variable followed by one axis per action variable.
/// The shape is fixed at creation; every index tuple handed in must match it
/// exactly. Out-of-bounds or wrong-arity tuples are programming errors and
/// panic through ndarray's bounds checks rather than being clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: ArrayD<f32>,
}

impl QTable {
    /// Create a zero-filled table of exactly `shape`.
    ///
    /// Zero initialization makes unvisited state-action pairs neutral:
    /// neither optimistic nor pessimistic.
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            values: ArrayD::zeros(IxDyn(shape)),
        }
    }

    /// Rebuild a table from a persisted shape and row-major values.
    ///
    /// Returns `None` when the element count does not match the shape.
    pub fn from_raw(shape: &[usize], values: Vec<f32>) -> Option<Self> {
        ArrayD::from_shape_vec(IxDyn(shape), values)
            .ok()
            .map(|values| Self { values })
    }

    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major copy of all cell values, for persistence.
    pub fn raw_values(&self) -> Vec<f32> {
        self.values.iter().copied().collect()
    }

    /// Q-value at `state + action`.
    pub fn value(&self, state: &[usize], action: &[usize]) -> f32 {
        self.values[IxDyn(&concat_index(state, action))]
    }

    /// Overwrite the Q-value at `state + action`.
    pub fn set_value(&mut self, state: &[usize], action: &[usize], value: f32) {
        self.values[IxDyn(&concat_index(state, action))] = value;
    }

    /// Maximum Q-value over the given actions in `state`.
    ///
    /// Returns 0.0 for an empty action set: a state with nothing left to do
    /// contributes no future value to a bootstrapped target.
    pub fn max_value(&self, state: &[usize], actions: &[Vec<usize>]) -> f32 {
        if actions.is_empty() {
            return 0.0;
        }
        actions
            .iter()
            .map(|action| self.value(state, action))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Index into `actions` of the highest-valued action in `state`.
    ///
    /// Ties break to the first maximum in scan order (strict `>` comparison),
    /// which keeps greedy selection deterministic for a fixed action order.
    pub fn greedy(&self, state: &[usize], actions: &[Vec<usize>]) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (idx, action) in actions.iter().enumerate() {
            let q = self.value(state, action);
            match best {
                Some((_, best_q)) if q <= best_q => {}
                _ => best = Some((idx, q)),
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Summary statistics for inspection tooling: (non-zero, min, max, mean).
    pub fn stats(&self) -> (usize, f32, f32, f64) {
        let mut non_zero = 0usize;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for &v in self.values.iter() {
            if v != 0.0 {
                non_zero += 1;
            }
            min = min.min(v);
            max = max.max(v);
            sum += f64::from(v);
        }
        let mean = if self.values.is_empty() {
            0.0
        } else {
            sum / self.values.len() as f64
        };
        (non_zero, min, max, mean)
    }
}

fn concat_index(state: &[usize], action: &[usize]) -> Vec<usize> {
    let mut index = Vec::with_capacity(state.len() + action.len());
    index.extend_from_slice(state);
    index.extend_from_slice(action);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_initializes_every_cell_to_zero() {
        let table = QTable::zeros(&[2, 3, 4]);
        assert_eq!(table.len(), 24);
        assert_eq!(table.value(&[1, 2], &[3]), 0.0);
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut table = QTable::zeros(&[2, 2, 2]);
        table.set_value(&[1, 0], &[1], 0.75);
        assert_eq!(table.value(&[1, 0], &[1]), 0.75);
        assert_eq!(table.value(&[0, 0], &[0]), 0.0);
    }

    #[test]
    fn max_value_over_actions() {
        let mut table = QTable::zeros(&[1, 3]);
        table.set_value(&[0], &[1], 2.5);
        table.set_value(&[0], &[2], 1.0);
        let actions = vec![vec![0], vec![1], vec![2]];
        assert_eq!(table.max_value(&[0], &actions), 2.5);
    }

    #[test]
    fn greedy_first_maximum_wins_ties() {
        let mut table = QTable::zeros(&[1, 4]);
        table.set_value(&[0], &[1], 1.0);
        table.set_value(&[0], &[3], 1.0);
        let actions = vec![vec![0], vec![1], vec![2], vec![3]];
        assert_eq!(table.greedy(&[0], &actions), Some(1));
        // All-zero values: the very first action wins.
        let fresh = QTable::zeros(&[1, 4]);
        assert_eq!(fresh.greedy(&[0], &actions), Some(0));
    }

    #[test]
    fn greedy_empty_action_set_is_none() {
        let table = QTable::zeros(&[1, 2]);
        assert_eq!(table.greedy(&[0], &[]), None);
    }

    #[test]
    fn from_raw_rejects_mismatched_length() {
        assert!(QTable::from_raw(&[2, 2], vec![0.0; 3]).is_none());
        assert!(QTable::from_raw(&[2, 2], vec![0.0; 4]).is_some());
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_index_panics() {
        let table = QTable::zeros(&[2, 2]);
        let _ = table.value(&[2], &[0]);
    }
}
