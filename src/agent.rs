//! The decision-making agent: owns the tables, the RNG, and the store.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Result,
    adapters::MsgPackRepository,
    config::AgentConfig,
    learner::td_update,
    policy,
    ports::{DecisionObserver, TableRepository, observer::NullObserver},
    q_table::QTable,
    schema::Variant,
    store::{QTableStore, TableKind},
    types::{GridPos, MoveAction, MoveObservation, ShootAction, ShootObservation},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent for one duel participant.
///
/// Holds the movement and shooting tables exclusively; the host drives one
/// decision/update cycle at a time. Every learning update mutates a table in
/// place and synchronously persists it — an update that did not reach disk
/// did not happen.
///
/// # Examples
///
/// ```no_run
/// use duelcore::{AgentConfig, DuelAgent, GridPos, MoveObservation, Variant};
///
/// let mut agent = DuelAgent::new(AgentConfig::new(Variant::Advanced, "/data/agent"))?;
///
/// let obs = MoveObservation {
///     position: GridPos::new(2, 3),
///     fuel: 10,
/// };
/// let legal = vec![GridPos::new(2, 4), GridPos::new(3, 3)];
/// let action = agent.choose_move(&obs, &legal)?;
/// // ... host executes the move and observes a reward ...
/// agent.learn_move(&obs, action, 1.0)?;
/// # Ok::<(), duelcore::Error>(())
/// ```
pub struct DuelAgent {
    variant: Variant,
    epsilon: f64,
    learning_rate: f64,
    discount_factor: f64,
    move_table: QTable,
    shoot_table: QTable,
    store: QTableStore,
    rng: StdRng,
    observer: Box<dyn DecisionObserver>,
}

impl std::fmt::Debug for DuelAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuelAgent")
            .field("variant", &self.variant)
            .field("epsilon", &self.epsilon)
            .field("learning_rate", &self.learning_rate)
            .field("discount_factor", &self.discount_factor)
            .field("base_dir", &self.store.base_dir())
            .finish()
    }
}

impl DuelAgent {
    /// Create an agent with file-backed persistence.
    ///
    /// Both tables are loaded (or zero-created) here, so configuration and
    /// persistence problems surface at construction rather than mid-game.
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::with_repository(config, Arc::new(MsgPackRepository::new()))
    }

    /// Create an agent backed by a custom repository (e.g. in-memory for
    /// tests).
    pub fn with_repository(
        config: AgentConfig,
        repository: Arc<dyn TableRepository + Send + Sync>,
    ) -> Result<Self> {
        config.validate()?;
        let store = QTableStore::new(&config.base_dir, config.variant, repository)?;
        let move_table = store.load_or_init(TableKind::Move)?;
        let shoot_table = store.load_or_init(TableKind::Shoot)?;
        Ok(Self {
            variant: config.variant,
            epsilon: config.epsilon,
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            move_table,
            shoot_table,
            store,
            rng: build_rng(config.seed),
            observer: Box::new(NullObserver),
        })
    }

    /// Install an observer receiving decision and update events.
    pub fn with_observer(mut self, observer: Box<dyn DecisionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Read access to the movement table (for inspection and tests).
    pub fn move_table(&self) -> &QTable {
        &self.move_table
    }

    /// Read access to the shooting table (for inspection and tests).
    pub fn shoot_table(&self) -> &QTable {
        &self.shoot_table
    }

    /// Pick a movement target from `legal_cells` via ε-greedy selection.
    ///
    /// The host supplies the reachable cells; their order is the greedy
    /// tie-break order.
    ///
    /// # Errors
    ///
    /// [`Error::NoLegalActions`](crate::Error::NoLegalActions) when
    /// `legal_cells` is empty.
    pub fn choose_move(
        &mut self,
        obs: &MoveObservation,
        legal_cells: &[GridPos],
    ) -> Result<MoveAction> {
        let state = self.variant.encode_move_state(obs);
        let actions: Vec<Vec<usize>> = legal_cells
            .iter()
            .map(|cell| vec![cell.row, cell.col])
            .collect();

        let choice =
            policy::epsilon_greedy(&self.move_table, &state, &actions, self.epsilon, &mut self.rng)?;
        let chosen = &actions[choice.index];
        self.observer.on_action_chosen(
            TableKind::Move,
            &state,
            chosen,
            self.move_table.value(&state, chosen),
            choice.explored,
        )?;

        Ok(MoveAction {
            target: legal_cells[choice.index],
        })
    }

    /// Pick a shot via ε-greedy selection over the full legal action space:
    /// every board cell crossed with every ammo type still in stock (advanced
    /// variant), or every board cell (basic variant).
    ///
    /// A depleted ammo type is excluded from the action space outright, so
    /// neither exploration nor exploitation can pick it.
    ///
    /// # Errors
    ///
    /// [`Error::NoLegalActions`](crate::Error::NoLegalActions) when the
    /// advanced variant is out of ammo entirely.
    pub fn choose_shot(&mut self, obs: &ShootObservation) -> Result<ShootAction> {
        let shot_actions = self.variant.shoot_actions(&obs.ammo);
        let state = self.variant.encode_shoot_state(obs);
        let actions: Vec<Vec<usize>> = shot_actions
            .iter()
            .map(|action| self.variant.encode_shoot_action(action))
            .collect();

        let choice = policy::epsilon_greedy(
            &self.shoot_table,
            &state,
            &actions,
            self.epsilon,
            &mut self.rng,
        )?;
        let chosen = &actions[choice.index];
        self.observer.on_action_chosen(
            TableKind::Shoot,
            &state,
            chosen,
            self.shoot_table.value(&state, chosen),
            choice.explored,
        )?;

        Ok(shot_actions[choice.index])
    }

    /// Apply one Q-learning update for a completed movement transition and
    /// persist the table.
    ///
    /// The successor state places the agent at the chosen target with fuel
    /// decremented by one (floored at zero); its action set is every board
    /// cell.
    pub fn learn_move(
        &mut self,
        obs: &MoveObservation,
        action: MoveAction,
        reward: f64,
    ) -> Result<()> {
        let state = self.variant.encode_move_state(obs);
        let action_index = self.variant.encode_move_action(&action);

        let next_obs = MoveObservation {
            position: action.target,
            fuel: obs.fuel.saturating_sub(1),
        };
        let next_state = self.variant.encode_move_state(&next_obs);
        let next_actions: Vec<Vec<usize>> = self
            .variant
            .all_cells()
            .into_iter()
            .map(|cell| vec![cell.row, cell.col])
            .collect();
        let best_next = self.move_table.max_value(&next_state, &next_actions);

        let update = td_update(
            &mut self.move_table,
            &state,
            &action_index,
            reward,
            best_next,
            self.learning_rate,
            self.discount_factor,
        );
        self.observer.on_value_updated(
            TableKind::Move,
            &state,
            &action_index,
            update.old,
            update.new,
        )?;

        self.store.persist(TableKind::Move, &self.move_table)
    }

    /// Apply one Q-learning update for a completed shooting transition and
    /// persist the table.
    ///
    /// The successor state consumes one shell of the fired type (advanced
    /// variant); shooting does not move the shooter, so everything else is
    /// carried over. The successor action set is recomputed from the
    /// remaining stock, exactly as selection would compute it.
    ///
    /// # Panics
    ///
    /// Panics if an advanced-variant `action` carries no ammo type (caller
    /// contract violation).
    pub fn learn_shot(
        &mut self,
        obs: &ShootObservation,
        action: ShootAction,
        reward: f64,
    ) -> Result<()> {
        let state = self.variant.encode_shoot_state(obs);
        let action_index = self.variant.encode_shoot_action(&action);

        let next_obs = match self.variant {
            Variant::Advanced => {
                let ammo = action
                    .ammo
                    .expect("advanced-variant shot action must carry an ammo type");
                ShootObservation {
                    ammo: obs.ammo.consume(ammo),
                    ..*obs
                }
            }
            Variant::Basic => *obs,
        };
        let next_state = self.variant.encode_shoot_state(&next_obs);
        let next_actions: Vec<Vec<usize>> = self
            .variant
            .shoot_actions(&next_obs.ammo)
            .iter()
            .map(|action| self.variant.encode_shoot_action(action))
            .collect();
        // max_value treats an exhausted successor (no ammo left at all) as
        // contributing zero future value.
        let best_next = self.shoot_table.max_value(&next_state, &next_actions);

        let update = td_update(
            &mut self.shoot_table,
            &state,
            &action_index,
            reward,
            best_next,
            self.learning_rate,
            self.discount_factor,
        );
        self.observer.on_value_updated(
            TableKind::Shoot,
            &state,
            &action_index,
            update.old,
            update.new,
        )?;

        self.store.persist(TableKind::Shoot, &self.shoot_table)
    }
}
