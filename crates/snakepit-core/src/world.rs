//! World/session state.
//!
//! The [`World`] is the single unit of ownership in a session: it holds every
//! agent, the food pool, the viewport, and the tick counter. The step engine
//! reads one `World` and produces the next; the presentation layer only ever
//! sees a `&World`.
//!
//! # Determinism
//!
//! Agents are stored in a `BTreeMap` keyed by [`AgentId`], so every pass over
//! the population visits agents in the same order on every platform.
//!
//! # Example
//!
//! ```
//! use snakepit_core::config::ArenaConfig;
//! use snakepit_core::world::create_session;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let config = ArenaConfig::default().with_bots(10).with_food(50);
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let world = create_session(&config, &mut rng).unwrap();
//!
//! assert_eq!(world.bots().count(), 10);
//! assert_eq!(world.foods().len(), 50);
//! assert!(world.human().is_some());
//! assert_eq!(world.tick(), 0);
//! ```

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tessera::{Bounds, GridPos, OccupancyGrid};
use tracing::info;

use crate::config::{ArenaConfig, ConfigError, DEFAULT_VIEWPORT};
use crate::entity::{Agent, AgentId, Food};
use crate::food::FoodPool;

/// Names handed out to bots, cycling when exhausted.
pub const BOT_NAMES: [&str; 51] = [
    "SnakeKing", "Venom", "Python", "Viper", "Cobra", "SlitherMaster",
    "Noodle", "Worm", "SolidSnake", "Liquid", "BigBoss", "Ocelot",
    "Kaa", "Nagini", "Basilisk", "Jormungandr", "Orochi", "Hydra",
    "Medusa", "Gorgon", "Sidewinder", "Rattler", "Copperhead", "Mamba",
    "Taipan", "Anaconda", "Boa", "Constrictor", "Asp", "Adder",
    "PixelEater", "ByteBite", "LagMonster", "Glitch", "DevNull",
    "Sudo", "Root", "Admin", "User123", "Guest99", "PlayerOne",
    "NoobSlayer", "ProGamer", "SpeedRunner", "Camper", "Troll",
    "Lurker", "Bot_01", "AI_Overlord", "Skynet", "Hal9000",
];

/// Name of the `index`-th bot (0-based), cycling through [`BOT_NAMES`].
#[must_use]
pub fn bot_name(index: usize) -> &'static str {
    BOT_NAMES[index % BOT_NAMES.len()]
}

// =============================================================================
// Viewport
// =============================================================================

/// The visible window the presentation layer draws.
///
/// `focus` is the world cell drawn at the top-left of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    width: i32,
    height: i32,
    focus: GridPos,
}

impl Viewport {
    /// Creates a viewport with its focus at the origin.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            focus: GridPos::ZERO,
        }
    }

    /// Window width in cells.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Window height in cells.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Top-left world cell of the window.
    #[must_use]
    pub fn focus(&self) -> GridPos {
        self.focus
    }

    /// Moves the focus so `cell` sits at the centre of the window.
    ///
    /// The focus is not clamped; it may lie outside the world near edges.
    pub fn center_on(&mut self, cell: GridPos) {
        self.focus = cell - GridPos::new(self.width / 2, self.height / 2);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT, DEFAULT_VIEWPORT)
    }
}

// =============================================================================
// Read-model helpers
// =============================================================================

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Agent id.
    pub id: AgentId,
    /// Display name.
    pub name: String,
    /// Current score.
    pub score: u32,
    /// True for the human agent.
    pub is_human: bool,
}

/// Alive versus total agent counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSummary {
    /// Agents currently alive.
    pub alive: usize,
    /// All agents, alive or dead.
    pub total: usize,
}

/// What the presentation layer should show for the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HumanStatus {
    /// No human agent in this world.
    Absent,
    /// The human is alive.
    Playing {
        /// Current score.
        score: u32,
    },
    /// The human died; the world keeps its frozen body.
    Defeated {
        /// Score at the moment of death.
        final_score: u32,
    },
}

// =============================================================================
// World
// =============================================================================

/// Complete state of one arena session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    bounds: Bounds,
    agents: BTreeMap<AgentId, Agent>,
    food: FoodPool,
    viewport: Viewport,
    tick: u64,
}

impl World {
    /// Creates a world with no agents and an empty food pool.
    ///
    /// Intended for scripted setups; use [`create_session`] for a populated
    /// world.
    #[must_use]
    pub fn empty(bounds: Bounds, viewport: Viewport, food_target: usize) -> Self {
        Self {
            bounds,
            agents: BTreeMap::new(),
            food: FoodPool::new(food_target),
            viewport,
            tick: 0,
        }
    }

    /// Inserts an agent, replacing any agent with the same id.
    pub fn insert_agent(&mut self, agent: Agent) -> Option<Agent> {
        self.agents.insert(agent.id(), agent)
    }

    /// Mutable access to the food pool, for scripted setups.
    #[must_use]
    pub fn food_pool_mut(&mut self) -> &mut FoodPool {
        &mut self.food
    }

    // -------------------------------------------------------------------------
    // Snapshot accessors
    // -------------------------------------------------------------------------

    /// World extent.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Side length of the world.
    #[must_use]
    pub fn world_size(&self) -> i32 {
        self.bounds.size()
    }

    /// All agents in id order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    /// Agent by id.
    #[must_use]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// The human agent, alive or dead, if one exists.
    #[must_use]
    pub fn human(&self) -> Option<&Agent> {
        self.agents.values().find(|agent| agent.is_human())
    }

    /// All AI agents in id order.
    pub fn bots(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values().filter(|agent| !agent.is_human())
    }

    /// Number of agents.
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Number of alive agents.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.agents.values().filter(|agent| agent.is_alive()).count()
    }

    /// Live food items in pool order.
    #[must_use]
    pub fn foods(&self) -> &[Food] {
        self.food.items()
    }

    /// The food pool.
    #[must_use]
    pub fn food_pool(&self) -> &FoodPool {
        &self.food
    }

    /// The viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Top-left world cell of the viewport.
    #[must_use]
    pub fn viewport_focus(&self) -> GridPos {
        self.viewport.focus()
    }

    /// Number of completed steps.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The top `limit` alive agents by score (ties broken by id).
    #[must_use]
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut alive: Vec<&Agent> = self.agents.values().filter(|a| a.is_alive()).collect();
        alive.sort_by(|a, b| b.score().cmp(&a.score()).then(a.id().cmp(&b.id())));
        alive
            .into_iter()
            .take(limit)
            .map(|agent| LeaderboardEntry {
                id: agent.id(),
                name: agent.name().to_string(),
                score: agent.score(),
                is_human: agent.is_human(),
            })
            .collect()
    }

    /// Alive and total agent counts.
    #[must_use]
    pub fn population_summary(&self) -> PopulationSummary {
        PopulationSummary {
            alive: self.alive_count(),
            total: self.agents.len(),
        }
    }

    /// Whether the human is playing, defeated, or absent.
    #[must_use]
    pub fn human_status(&self) -> HumanStatus {
        match self.human() {
            None => HumanStatus::Absent,
            Some(human) if human.is_alive() => HumanStatus::Playing {
                score: human.score(),
            },
            Some(human) => HumanStatus::Defeated {
                final_score: human.score(),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Resolver access
    // -------------------------------------------------------------------------

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub(crate) fn food_mut(&mut self) -> &mut FoodPool {
        &mut self.food
    }

    pub(crate) fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }
}

/// Builds the initial population and food pool for a session.
///
/// The human gets [`AgentId::HUMAN`]; bots get ids `1..=bot_count` and names
/// from [`BOT_NAMES`]. Agents are placed one at a time on cells no earlier
/// agent holds. The viewport starts centred on the human's head.
///
/// # Errors
///
/// Returns a [`ConfigError`] if `config` fails validation.
pub fn create_session<R: Rng + ?Sized>(
    config: &ArenaConfig,
    rng: &mut R,
) -> Result<World, ConfigError> {
    config.validate()?;

    let bounds = Bounds::new(config.world_size);
    let viewport = Viewport::new(config.viewport_width, config.viewport_height);
    let mut world = World::empty(bounds, viewport, config.food_count);
    let mut occupancy = OccupancyGrid::new(bounds);
    let crowded = || ConfigError::Overcrowded {
        agents: config.bot_count + 1,
        length: crate::entity::INITIAL_LENGTH,
        cells: bounds.cell_count(),
    };

    let human = Agent::create(AgentId::HUMAN, &config.human_name, true, bounds, rng, |cell| {
        !occupancy.is_occupied(cell)
    })
    .ok_or_else(crowded)?;
    occupancy.mark_all(human.body().iter());
    world.viewport.center_on(human.head());
    world.insert_agent(human);

    for index in 0..config.bot_count {
        let id = AgentId::new(u32::try_from(index + 1).unwrap_or(u32::MAX));
        let bot = Agent::create(id, bot_name(index), false, bounds, rng, |cell| {
            !occupancy.is_occupied(cell)
        })
        .ok_or_else(crowded)?;
        occupancy.mark_all(bot.body().iter());
        world.insert_agent(bot);
    }

    world.food.replenish(bounds, rng);

    info!(
        world_size = config.world_size,
        bots = config.bot_count,
        food = config.food_count,
        "session created"
    );

    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::INITIAL_LENGTH;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tessera::Direction;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    mod session_tests {
        use super::*;

        #[test]
        fn builds_population() {
            let config = ArenaConfig::default();
            let world = create_session(&config, &mut rng()).unwrap();

            assert_eq!(world.agent_count(), 100);
            assert_eq!(world.bots().count(), 99);
            assert_eq!(world.foods().len(), 300);
            assert_eq!(world.world_size(), 200);
            assert_eq!(world.tick(), 0);

            let human = world.human().unwrap();
            assert_eq!(human.id(), AgentId::HUMAN);
            assert_eq!(human.name(), "Player 1");
            assert!(world.agents().all(|a| a.len() == INITIAL_LENGTH && a.is_alive()));
        }

        #[test]
        fn names_cycle() {
            let config = ArenaConfig::default().with_bots(60).with_food(0);
            let world = create_session(&config, &mut rng()).unwrap();
            let names: Vec<_> = world.bots().map(|b| b.name().to_string()).collect();
            assert_eq!(names[0], "SnakeKing");
            assert_eq!(names[50], "Hal9000");
            assert_eq!(names[51], "SnakeKing");
            assert_eq!(names[59], BOT_NAMES[8]);
        }

        #[test]
        fn viewport_starts_on_human() {
            let world = create_session(&ArenaConfig::default(), &mut rng()).unwrap();
            let head = world.human().unwrap().head();
            assert_eq!(world.viewport_focus(), head - GridPos::new(20, 20));
        }

        #[test]
        fn invalid_config_is_rejected() {
            let config = ArenaConfig::default().with_world_size(3);
            assert!(create_session(&config, &mut rng()).is_err());
        }

        #[test]
        fn bodies_do_not_overlap() {
            for seed in 0..10 {
                let config = ArenaConfig::default().with_world_size(30).with_bots(40).with_food(0);
                let world = create_session(&config, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
                let mut seen = std::collections::HashSet::new();
                for cell in world.agents().flat_map(|a| a.body().iter()) {
                    assert!(seen.insert(cell), "seed {seed}: {cell} placed twice");
                }
            }
        }

        #[test]
        fn packed_world_still_has_distinct_heads() {
            // 20 agents of 5 segments fill a 10x10 world exactly.
            for seed in 0..10 {
                let config = ArenaConfig::default().with_world_size(10).with_bots(19).with_food(0);
                let world = create_session(&config, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
                let mut heads = std::collections::HashSet::new();
                for agent in world.agents() {
                    assert!(world.bounds().contains(agent.head()));
                    assert!(heads.insert(agent.head()), "seed {seed}: shared head {}", agent.head());
                }
            }
        }

        #[test]
        fn same_seed_same_session() {
            let config = ArenaConfig::default().with_bots(20);
            let a = create_session(&config, &mut rng()).unwrap();
            let b = create_session(&config, &mut rng()).unwrap();
            assert_eq!(a, b);
        }
    }

    mod read_model_tests {
        use super::*;

        fn scripted_world() -> World {
            let mut world = World::empty(Bounds::new(50), Viewport::default(), 0);
            for (id, score, alive) in [(0, 40, true), (1, 70, true), (2, 70, true), (3, 90, false)] {
                let mut agent = Agent::with_body(
                    AgentId::new(id),
                    &format!("a{id}"),
                    id == 0,
                    [GridPos::new(id as i32 * 3, 10)],
                    Direction::Up,
                )
                .unwrap();
                agent.add_score(score);
                if !alive {
                    agent.mark_dead();
                }
                world.insert_agent(agent);
            }
            world
        }

        #[test]
        fn leaderboard_orders_alive_by_score_then_id() {
            let board = scripted_world().leaderboard(10);
            let ids: Vec<_> = board.iter().map(|e| e.id.as_u32()).collect();
            assert_eq!(ids, vec![1, 2, 0]);
            assert!(board[2].is_human);
        }

        #[test]
        fn leaderboard_respects_limit() {
            assert_eq!(scripted_world().leaderboard(2).len(), 2);
        }

        #[test]
        fn population_summary_counts_dead() {
            let summary = scripted_world().population_summary();
            assert_eq!(summary, PopulationSummary { alive: 3, total: 4 });
        }

        #[test]
        fn human_status_transitions() {
            let mut world = scripted_world();
            assert_eq!(world.human_status(), HumanStatus::Playing { score: 40 });

            world.agent_mut(AgentId::HUMAN).unwrap().mark_dead();
            assert_eq!(world.human_status(), HumanStatus::Defeated { final_score: 40 });

            let empty = World::empty(Bounds::new(10), Viewport::default(), 0);
            assert_eq!(empty.human_status(), HumanStatus::Absent);
            assert!(empty.human().is_none());
        }
    }

    #[test]
    fn viewport_center_on() {
        let mut viewport = Viewport::new(40, 30);
        viewport.center_on(GridPos::new(50, 50));
        assert_eq!(viewport.focus(), GridPos::new(30, 35));
    }

    #[test]
    fn world_serializes() {
        let config = ArenaConfig::default().with_bots(3).with_food(5);
        let world = create_session(&config, &mut rng()).unwrap();
        let json = serde_json::to_string(&world).unwrap();
        let back: World = serde_json::from_str(&json).unwrap();
        assert_eq!(world, back);
    }
}
