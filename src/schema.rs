//! Difficulty variants: table shapes and state/action encoding.
//!
//! One engine serves both game difficulties; the variant chosen at agent
//! construction fixes the encoding for the agent's whole lifetime. Mixing
//! encodings against one table would silently alias unrelated states, so
//! there is deliberately no way to switch a live agent.
//!
//! Every encoder returns the plain index tuple used against the matching
//! table axis by axis: state components first, action components appended.

use serde::{Deserialize, Serialize};

use crate::types::{
    AmmoStock, GridPos, MoveAction, MoveObservation, ShootAction, ShootObservation, WindDirection,
};

/// Per-ammo-type axis bounds of the advanced shoot table (exclusive).
const ADVANCED_AMMO_BOUNDS: [usize; 3] = [7, 4, 2];

/// Game difficulty variant, selecting the state/action schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Rich encoding on a 6x6 board: shoot decisions see the enemy position,
    /// four cardinal winds and per-type ammo stocks, and pick a shell type.
    Advanced,
    /// Reduced encoding on a 10x10 board: shoot decisions see only own
    /// position and one of eight winds, and pick a cell.
    Basic,
}

impl Variant {
    /// Board side length; rows and columns are both bounded by this.
    pub fn grid_size(self) -> usize {
        match self {
            Variant::Advanced => 6,
            Variant::Basic => 10,
        }
    }

    /// Number of wind directions this variant's encoding distinguishes.
    pub fn wind_direction_count(self) -> usize {
        match self {
            Variant::Advanced => 4,
            Variant::Basic => 8,
        }
    }

    /// Exclusive bound on the wind strength component.
    pub fn wind_strength_bound(self) -> usize {
        match self {
            Variant::Advanced => 3,
            Variant::Basic => 10,
        }
    }

    /// Exclusive bound on the fuel component of the move state.
    pub fn fuel_bound(self) -> usize {
        match self {
            Variant::Advanced => 21,
            Variant::Basic => 101,
        }
    }

    /// Short name used in persisted file names.
    pub fn name(self) -> &'static str {
        match self {
            Variant::Advanced => "advanced",
            Variant::Basic => "basic",
        }
    }

    /// Wind direction index for this variant.
    ///
    /// Directions outside the variant's closed set (including
    /// [`WindDirection::Unknown`]) map to the sentinel index
    /// `wind_direction_count()`, which lies outside the table axis.
    pub fn wind_index(self, direction: WindDirection) -> usize {
        let index = match direction {
            WindDirection::North => 0,
            WindDirection::South => 1,
            WindDirection::East => 2,
            WindDirection::West => 3,
            WindDirection::NorthEast => 4,
            WindDirection::NorthWest => 5,
            WindDirection::SouthEast => 6,
            WindDirection::SouthWest => 7,
            WindDirection::Unknown => self.wind_direction_count(),
        };
        if index >= self.wind_direction_count() {
            self.wind_direction_count()
        } else {
            index
        }
    }

    /// Shape of the movement table: (row, col, fuel) state axes followed by
    /// (row, col) action axes.
    pub fn move_table_shape(self) -> Vec<usize> {
        let n = self.grid_size();
        vec![n, n, self.fuel_bound(), n, n]
    }

    /// Shape of the shooting table: state axes followed by action axes.
    pub fn shoot_table_shape(self) -> Vec<usize> {
        let n = self.grid_size();
        let dirs = self.wind_direction_count();
        let strength = self.wind_strength_bound();
        match self {
            Variant::Advanced => {
                let [a0, a1, a2] = ADVANCED_AMMO_BOUNDS;
                vec![n, n, n, n, dirs, strength, a0, a1, a2, n, n, 3]
            }
            Variant::Basic => vec![n, n, dirs, strength, n, n],
        }
    }

    /// Encode the movement state: (own row, own col, fuel).
    pub fn encode_move_state(self, obs: &MoveObservation) -> Vec<usize> {
        vec![obs.position.row, obs.position.col, obs.fuel]
    }

    /// Encode the shooting state for this variant's arity.
    pub fn encode_shoot_state(self, obs: &ShootObservation) -> Vec<usize> {
        let wind = self.wind_index(obs.wind.direction);
        match self {
            Variant::Advanced => {
                let [light, medium, heavy] = obs.ammo.counts();
                vec![
                    obs.position.row,
                    obs.position.col,
                    obs.enemy.row,
                    obs.enemy.col,
                    wind,
                    obs.wind.strength,
                    light,
                    medium,
                    heavy,
                ]
            }
            Variant::Basic => vec![
                obs.position.row,
                obs.position.col,
                wind,
                obs.wind.strength,
            ],
        }
    }

    /// Encode a movement action: (target row, target col).
    pub fn encode_move_action(self, action: &MoveAction) -> Vec<usize> {
        vec![action.target.row, action.target.col]
    }

    /// Encode a shooting action for this variant's arity.
    ///
    /// # Panics
    ///
    /// Panics if an advanced-variant action carries no ammo type; that is a
    /// caller contract violation, not a recoverable condition.
    pub fn encode_shoot_action(self, action: &ShootAction) -> Vec<usize> {
        match self {
            Variant::Advanced => {
                let ammo = action
                    .ammo
                    .expect("advanced-variant shot action must carry an ammo type");
                vec![action.target.row, action.target.col, ammo.index()]
            }
            Variant::Basic => vec![action.target.row, action.target.col],
        }
    }

    /// Every cell of the board in row-major order.
    pub fn all_cells(self) -> Vec<GridPos> {
        let n = self.grid_size();
        let mut cells = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                cells.push(GridPos::new(row, col));
            }
        }
        cells
    }

    /// The legal shot actions given the current ammo stocks, in deterministic
    /// scan order (ammo type outer, cells row-major).
    ///
    /// A type with zero remaining shells is never included, so it can be
    /// picked neither by exploitation nor by a uniform exploration draw.
    /// Returns an empty set when the advanced variant is out of ammo.
    pub fn shoot_actions(self, stock: &AmmoStock) -> Vec<ShootAction> {
        match self {
            Variant::Advanced => {
                let mut actions = Vec::new();
                for ammo in stock.available() {
                    for cell in self.all_cells() {
                        actions.push(ShootAction {
                            target: cell,
                            ammo: Some(ammo),
                        });
                    }
                }
                actions
            }
            Variant::Basic => self
                .all_cells()
                .into_iter()
                .map(|cell| ShootAction {
                    target: cell,
                    ammo: None,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AmmoType, Wind};

    #[test]
    fn table_shapes_match_state_plus_action_arity() {
        for variant in [Variant::Advanced, Variant::Basic] {
            let obs = ShootObservation {
                position: GridPos::new(0, 0),
                enemy: GridPos::new(1, 1),
                wind: Wind::new(WindDirection::North, 0),
                ammo: AmmoStock::new(1, 1, 1),
            };
            let state = variant.encode_shoot_state(&obs);
            let action = variant.encode_shoot_action(&variant.shoot_actions(&obs.ammo)[0]);
            assert_eq!(
                state.len() + action.len(),
                variant.shoot_table_shape().len()
            );

            let move_obs = MoveObservation {
                position: GridPos::new(0, 0),
                fuel: 3,
            };
            let move_state = variant.encode_move_state(&move_obs);
            assert_eq!(move_state.len() + 2, variant.move_table_shape().len());
        }
    }

    #[test]
    fn wind_index_covers_closed_set() {
        assert_eq!(Variant::Advanced.wind_index(WindDirection::West), 3);
        assert_eq!(Variant::Basic.wind_index(WindDirection::SouthWest), 7);
    }

    #[test]
    fn unknown_wind_maps_to_out_of_range_sentinel() {
        for variant in [Variant::Advanced, Variant::Basic] {
            let sentinel = variant.wind_index(WindDirection::Unknown);
            assert_eq!(sentinel, variant.wind_direction_count());
        }
        // A direction the reduced set does not recognize behaves like unknown.
        assert_eq!(
            Variant::Advanced.wind_index(WindDirection::NorthEast),
            Variant::Advanced.wind_direction_count()
        );
    }

    #[test]
    fn zero_stock_type_is_excluded_from_shot_actions() {
        let stock = AmmoStock::new(2, 0, 1);
        let actions = Variant::Advanced.shoot_actions(&stock);
        assert!(
            actions
                .iter()
                .all(|action| action.ammo != Some(AmmoType::Medium))
        );
        // Two in-stock types over a 6x6 board.
        assert_eq!(actions.len(), 2 * 36);
    }

    #[test]
    fn basic_shot_actions_cover_board_without_ammo() {
        let actions = Variant::Basic.shoot_actions(&AmmoStock::new(0, 0, 0));
        assert_eq!(actions.len(), 100);
        assert!(actions.iter().all(|action| action.ammo.is_none()));
    }
}
