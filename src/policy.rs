//! ε-greedy action selection.
//!
//! Pure with respect to the table: selection reads Q-values and a source of
//! randomness, never mutates either table or state.

use rand::{Rng, rngs::StdRng};

use crate::{
    error::{Error, Result},
    q_table::QTable,
};

/// Outcome of one selection: which legal action was picked and whether it
/// came from an exploration draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Index into the caller's legal-action slice.
    pub index: usize,
    pub explored: bool,
}

/// Select one action from `actions` for the encoded `state`.
///
/// With probability `epsilon` a uniformly random legal action is returned;
/// otherwise the action with the highest stored Q-value, ties broken by the
/// first maximum in the order `actions` is given in. The caller controls
/// legality entirely through the `actions` slice: anything excluded (an
/// unreachable cell, a depleted ammo type) cannot be drawn even while
/// exploring.
///
/// # Errors
///
/// Returns [`Error::NoLegalActions`] for an empty action set; the host must
/// never ask for a decision when no action is legal.
pub fn epsilon_greedy(
    table: &QTable,
    state: &[usize],
    actions: &[Vec<usize>],
    epsilon: f64,
    rng: &mut StdRng,
) -> Result<Choice> {
    if actions.is_empty() {
        return Err(Error::NoLegalActions);
    }

    if rng.random::<f64>() < epsilon {
        return Ok(Choice {
            index: rng.random_range(0..actions.len()),
            explored: true,
        });
    }

    let index = table
        .greedy(state, actions)
        .ok_or(Error::NoLegalActions)?;
    Ok(Choice {
        index,
        explored: false,
    })
}
