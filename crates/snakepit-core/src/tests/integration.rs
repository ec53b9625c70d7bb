//! Integration tests for the full step pipeline.
//!
//! These run hand-built worlds through [`step`] and [`Simulation`] and check
//! the observable outcome: movement, growth, scoring, deaths, respawns, and
//! food upkeep.

use std::collections::HashSet;

use tessera::{Direction, GridPos};

use crate::brain::GreedyForager;
use crate::config::ArenaConfig;
use crate::entity::{AgentId, INITIAL_LENGTH};
use crate::simulation::{step, Simulation};
use crate::transition::{DeathCause, StepEvent};
use crate::world::HumanStatus;

use super::helpers::{
    add_agent, add_food, agent_at, empty_world, rng, vertical_cells, KeepCourse, Scripted,
};

// =============================================================================
// Movement
// =============================================================================

#[test]
fn reversal_request_is_ignored() {
    let mut world = empty_world(200);
    let id = add_agent(&mut world, agent_at(0, true, &vertical_cells((50, 50), 5), Direction::Up));

    let (next, _) = step(&world, Some(Direction::Down), &KeepCourse, &mut rng(1));

    let agent = next.agent(id).unwrap();
    assert_eq!(agent.direction(), Direction::Up);
    assert_eq!(agent.head(), GridPos::new(50, 49));
    assert_eq!(agent.len(), 5);
    assert_eq!(agent.tail(), GridPos::new(50, 53));
}

#[test]
fn eating_grows_and_scores() {
    let mut world = empty_world(200);
    let id = add_agent(&mut world, agent_at(0, true, &vertical_cells((10, 10), 5), Direction::Up));
    let food = add_food(&mut world, (10, 9));

    let (next, report) = step(&world, None, &KeepCourse, &mut rng(2));

    let agent = next.agent(id).unwrap();
    assert_eq!(agent.head(), GridPos::new(10, 9));
    assert_eq!(agent.len(), 6);
    assert_eq!(agent.score(), 10);
    assert_eq!(agent.tail(), GridPos::new(10, 14));

    assert_eq!(next.foods().len(), 1);
    assert!(next.food_pool().get(food).is_none());
    assert_eq!(report.food_eaten(), 1);
    assert_eq!(report.food_spawned(), 1);
}

#[test]
fn wall_kills_without_moving() {
    let mut world = empty_world(200);
    let cells = [(0, 5), (1, 5), (2, 5)];
    let id = add_agent(&mut world, agent_at(0, true, &cells, Direction::Left));
    add_food(&mut world, (100, 100));

    let (next, report) = step(&world, None, &KeepCourse, &mut rng(3));

    let agent = next.agent(id).unwrap();
    assert!(!agent.is_alive());
    assert_eq!(agent.body(), world.agent(id).unwrap().body());
    assert_eq!(agent.score(), 0);
    assert_eq!(next.foods(), world.foods());
    assert_eq!(report.deaths().collect::<Vec<_>>(), vec![(id, DeathCause::Wall)]);
}

#[test]
fn head_on_kills_both() {
    let mut world = empty_world(200);
    let human = add_agent(&mut world, agent_at(0, true, &[(30, 31), (30, 32)], Direction::Up));
    let bot = add_agent(&mut world, agent_at(1, false, &[(30, 29), (30, 28)], Direction::Down));

    let (next, report) = step(&world, None, &KeepCourse, &mut rng(4));

    let mut deaths: Vec<_> = report.deaths().collect();
    deaths.sort_by_key(|(id, _)| *id);
    assert_eq!(deaths, vec![(human, DeathCause::HeadOn), (bot, DeathCause::HeadOn)]);
    assert_eq!(next.human_status(), HumanStatus::Defeated { final_score: 0 });
    assert_eq!(next.human().unwrap().head(), GridPos::new(30, 31));
}

#[test]
fn head_on_between_bots() {
    let mut world = empty_world(200);
    let a = add_agent(&mut world, agent_at(1, false, &[(29, 30), (28, 30)], Direction::Right));
    let b = add_agent(&mut world, agent_at(2, false, &[(31, 30), (32, 30)], Direction::Left));
    let brain = Scripted::default()
        .with(a, Direction::Right)
        .with(b, Direction::Left);

    let (next, report) = step(&world, None, &brain, &mut rng(5));

    assert_eq!(report.deaths().count(), 2);
    assert_eq!(report.respawns(), 2);
    assert!(next.agents().all(|agent| agent.is_alive()));
}

#[test]
fn collision_with_other_tail() {
    let mut world = empty_world(50);
    let human = add_agent(&mut world, agent_at(0, true, &[(10, 10), (9, 10)], Direction::Right));
    add_agent(&mut world, agent_at(1, false, &[(11, 8), (11, 9), (11, 10)], Direction::Up));

    let (next, report) = step(&world, None, &KeepCourse, &mut rng(6));

    assert!(!next.agent(human).unwrap().is_alive());
    assert_eq!(report.deaths().collect::<Vec<_>>(), vec![(human, DeathCause::Collision)]);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn dead_bot_respawns_same_tick() {
    let mut world = empty_world(200);
    let mut bot = agent_at(7, false, &[(0, 5), (1, 5), (2, 5), (3, 5)], Direction::Left);
    bot.add_score(30);
    let id = add_agent(&mut world, bot);

    let (next, report) = step(&world, None, &KeepCourse, &mut rng(7));

    let bot = next.agent(id).unwrap();
    assert!(bot.is_alive());
    assert_eq!(bot.name(), "bot-7");
    assert_eq!(bot.len(), INITIAL_LENGTH);
    assert_eq!(bot.score(), 0);
    assert_eq!(bot.direction(), Direction::Up);
    assert!(bot.body().is_contiguous());
    assert_eq!(
        report.events(),
        &[
            StepEvent::Died { agent: id, cause: DeathCause::Wall },
            StepEvent::Respawned { agent: id },
        ]
    );
}

#[test]
fn dead_human_stays_frozen() {
    let mut world = empty_world(200);
    let id = add_agent(&mut world, agent_at(0, true, &[(0, 5), (1, 5), (2, 5)], Direction::Left));

    let mut sim = Simulation::from_world(world, 8).with_brain(Box::new(KeepCourse));
    sim.step(None);
    let frozen = sim.world().agent(id).unwrap().clone();
    assert!(!frozen.is_alive());

    for direction in [Direction::Up, Direction::Right, Direction::Down, Direction::Left] {
        sim.step(Some(direction));
        assert_eq!(sim.world().agent(id).unwrap(), &frozen);
    }
    assert_eq!(sim.world().viewport_focus(), frozen.head() - GridPos::new(20, 20));
}

#[test]
fn bot_population_is_constant() {
    let config = ArenaConfig::default()
        .with_world_size(30)
        .with_bots(40)
        .with_food(20)
        .with_seed(11);
    let mut sim = Simulation::new(&config).unwrap();

    let mut deaths = 0;
    for _ in 0..200 {
        let report = sim.step(None);
        deaths += report.deaths().count();
        assert_eq!(sim.world().bots().count(), 40);
        assert!(sim.world().bots().all(|bot| bot.is_alive()));
    }
    // A crowded 30x30 arena is deadly.
    assert!(deaths > 0);
}

#[test]
fn crowded_arena_never_shares_heads() {
    // The most bots a 10x10 world accepts: deaths and respawns every tick.
    for seed in 0..8 {
        let config = ArenaConfig::default()
            .with_world_size(10)
            .with_bots(19)
            .with_food(10)
            .with_seed(seed);
        let mut sim = Simulation::new(&config).unwrap();

        for _ in 0..40 {
            sim.step(None);
            let mut heads = HashSet::new();
            for agent in sim.world().agents().filter(|a| a.is_alive()) {
                assert!(
                    heads.insert(agent.head()),
                    "seed {seed} tick {}: shared head {}",
                    sim.tick(),
                    agent.head()
                );
            }
        }
    }
}

#[test]
fn forager_eats_nearby_food() {
    let mut world = empty_world(40);
    let id = add_agent(&mut world, agent_at(1, false, &vertical_cells((10, 10), 3), Direction::Up));
    add_food(&mut world, (13, 10));

    let mut sim = Simulation::from_world(world, 12).with_brain(Box::new(GreedyForager::new()));
    for _ in 0..3 {
        sim.step(None);
    }

    let bot = sim.world().agent(id).unwrap();
    assert_eq!(bot.head(), GridPos::new(13, 10));
    assert_eq!(bot.score(), 10);
    assert_eq!(bot.len(), 4);
}

#[test]
fn default_session_runs() {
    let mut sim = Simulation::new(&ArenaConfig::default().with_seed(2024)).unwrap();
    for _ in 0..30 {
        sim.step(None);
    }
    let world = sim.world();
    assert_eq!(world.tick(), 30);
    assert_eq!(world.foods().len(), 300);
    assert_eq!(world.bots().count(), 99);
    assert_eq!(world.agent(AgentId::HUMAN).map(|h| h.is_human()), Some(true));
}
