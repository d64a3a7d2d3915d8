//! Table persistence across agent lifetimes, against real files.

use duelcore::{
    AgentConfig, DuelAgent, Error, GridPos, MoveAction, MoveObservation, QTable, TableKind,
    Variant, adapters::MsgPackRepository, ports::TableRepository,
};
use tempfile::TempDir;

fn config(dir: &TempDir, variant: Variant) -> AgentConfig {
    AgentConfig::new(variant, dir.path()).with_epsilon(0.0).with_seed(1)
}

#[test]
fn learned_values_survive_agent_restart() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let obs = MoveObservation {
        position: GridPos::new(1, 1),
        fuel: 5,
    };
    let action = MoveAction {
        target: GridPos::new(2, 2),
    };

    let expected = {
        let mut agent =
            DuelAgent::new(config(&dir, Variant::Advanced)).expect("agent creation failed");
        agent.learn_move(&obs, action, 3.0).expect("learn failed");
        let state = Variant::Advanced.encode_move_state(&obs);
        agent.move_table().value(&state, &[2, 2])
    };
    assert!(expected > 0.0);

    // A fresh agent over the same directory sees the exact learned value and
    // exploits it.
    let mut reborn =
        DuelAgent::new(config(&dir, Variant::Advanced)).expect("agent creation failed");
    let state = Variant::Advanced.encode_move_state(&obs);
    assert_eq!(reborn.move_table().value(&state, &[2, 2]), expected);

    let legal = vec![GridPos::new(0, 0), GridPos::new(2, 2)];
    let chosen = reborn.choose_move(&obs, &legal).expect("choose failed");
    assert_eq!(chosen.target, GridPos::new(2, 2));
}

#[test]
fn fresh_directories_yield_identical_zero_tables() {
    let first_dir = TempDir::new().expect("failed to create temp dir");
    let second_dir = TempDir::new().expect("failed to create temp dir");

    let first =
        DuelAgent::new(config(&first_dir, Variant::Basic)).expect("agent creation failed");
    let second =
        DuelAgent::new(config(&second_dir, Variant::Basic)).expect("agent creation failed");

    assert_eq!(first.move_table(), second.move_table());
    assert_eq!(first.shoot_table(), second.shoot_table());
}

#[test]
fn variants_persist_side_by_side_without_collision() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let _advanced =
        DuelAgent::new(config(&dir, Variant::Advanced)).expect("agent creation failed");
    let _basic = DuelAgent::new(config(&dir, Variant::Basic)).expect("agent creation failed");

    let mut advanced =
        DuelAgent::new(config(&dir, Variant::Advanced)).expect("agent creation failed");
    let obs = MoveObservation {
        position: GridPos::new(0, 0),
        fuel: 1,
    };
    advanced
        .learn_move(
            &obs,
            MoveAction {
                target: GridPos::new(0, 1),
            },
            1.0,
        )
        .expect("learn failed");

    // The basic agent's files are untouched by advanced learning.
    let basic = DuelAgent::new(config(&dir, Variant::Basic)).expect("agent creation failed");
    let (non_zero, ..) = basic.move_table().stats();
    assert_eq!(non_zero, 0);
}

#[test]
fn shape_mismatched_file_fails_construction() {
    let dir = TempDir::new().expect("failed to create temp dir");

    // Plant a wrongly shaped table exactly where the advanced move table
    // would live.
    let alien = QTable::zeros(&[3, 3, 3]);
    let repo = MsgPackRepository::new();
    let store = duelcore::QTableStore::new(
        dir.path(),
        Variant::Advanced,
        std::sync::Arc::new(MsgPackRepository::new()),
    )
    .expect("store creation failed");
    repo.save(&alien, &store.table_path(TableKind::Move))
        .expect("save failed");

    let result = DuelAgent::new(config(&dir, Variant::Advanced));
    assert!(matches!(result, Err(Error::ShapeMismatch { .. })));
}

#[test]
fn missing_base_directory_fails_loudly() {
    let config = AgentConfig::new(Variant::Advanced, "/nonexistent_duelcore_base_12345");
    let result = DuelAgent::new(config);
    assert!(matches!(result, Err(Error::Config { .. })));
}
