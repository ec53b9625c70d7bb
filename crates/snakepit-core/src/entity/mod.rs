//! Entity types for the arena simulation.
//!
//! - [`AgentId`] / [`FoodId`]: stable identifiers
//! - [`Agent`]: a snake, human- or brain-controlled
//! - [`Food`]: a consumable item on the grid
//!
//! Agents are owned by the [`World`](crate::world::World) and have no lifetime
//! of their own. A bot that dies is re-initialised in place under the same id
//! and name; the record itself is never replaced.
//!
//! # Example
//!
//! ```
//! use snakepit_core::entity::{Agent, AgentId};
//! use tessera::{Bounds, Direction};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let agent = Agent::create(AgentId::new(1), "Viper", false, Bounds::new(200), &mut rng, |_| true)
//!     .unwrap();
//!
//! assert_eq!(agent.len(), 5);
//! assert_eq!(agent.direction(), Direction::Up);
//! assert!(agent.is_alive());
//! ```

pub mod components;

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tessera::{Bounds, Direction, GridPos};

pub use components::{AgentFlags, Body, Color, PALETTE};

/// Segments in a freshly created agent.
pub const INITIAL_LENGTH: usize = 5;

/// Random draws for a fully clear start before placement scans the world.
pub const PLACEMENT_ATTEMPTS: usize = 32;

// =============================================================================
// Identifiers
// =============================================================================

/// Stable identifier of an agent, preserved across respawns.
///
/// Ordered by numeric value; the world iterates agents in this order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(u32);

impl AgentId {
    /// Identifier conventionally used for the human agent.
    pub const HUMAN: AgentId = AgentId(0);

    /// Creates an `AgentId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a food item. Monotonically increasing within a world.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FoodId(u64);

impl FoodId {
    /// Creates a `FoodId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FoodId({})", self.0)
    }
}

// =============================================================================
// Agent
// =============================================================================

/// A snake in the arena.
///
/// # Invariants
///
/// - The body always has at least one segment.
/// - Consecutive segments are one axis-aligned step apart.
/// - The score never decreases while the agent lives; respawning resets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    name: String,
    color: Color,
    body: Body,
    direction: Direction,
    score: u32,
    flags: AgentFlags,
}

impl Agent {
    /// Creates an agent on cells that `is_free` accepts.
    ///
    /// The body has [`INITIAL_LENGTH`] segments extending along +y from a
    /// random start cell and the agent faces up; the start row is sampled so
    /// the whole body fits inside `bounds`. After [`PLACEMENT_ATTEMPTS`]
    /// blocked draws the world is scanned in row-major order for a clear
    /// straight placement in any orientation, and failing that for any free
    /// head cell. Returns `None` only when no cell is free.
    ///
    /// Humans are white, bots get a random palette colour.
    ///
    /// `bounds` must be at least [`INITIAL_LENGTH`] cells wide; session
    /// configuration validates this before any agent is created.
    pub fn create<R, F>(
        id: AgentId,
        name: &str,
        is_human: bool,
        bounds: Bounds,
        rng: &mut R,
        is_free: F,
    ) -> Option<Self>
    where
        R: Rng + ?Sized,
        F: Fn(GridPos) -> bool,
    {
        let (body, direction) = Self::start_body(bounds, rng, &is_free)?;
        let color = if is_human {
            Color::WHITE
        } else {
            Color::random(rng)
        };
        let flags = if is_human {
            AgentFlags::HUMAN
        } else {
            AgentFlags::empty()
        };

        Some(Self {
            id,
            name: name.to_string(),
            color,
            body,
            direction,
            score: 0,
            flags,
        })
    }

    /// Creates an alive agent with an explicit body, for scripted setups.
    ///
    /// Returns `None` if `segments` is empty.
    #[must_use]
    pub fn with_body<I: IntoIterator<Item = GridPos>>(
        id: AgentId,
        name: &str,
        is_human: bool,
        segments: I,
        direction: Direction,
    ) -> Option<Self> {
        let body = Body::from_segments(segments)?;
        let (color, flags) = if is_human {
            (Color::WHITE, AgentFlags::HUMAN)
        } else {
            (PALETTE[0], AgentFlags::empty())
        };
        Some(Self {
            id,
            name: name.to_string(),
            color,
            body,
            direction,
            score: 0,
            flags,
        })
    }

    fn random_start<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> GridPos {
        let size = bounds.size();
        let reserve = i32::try_from(INITIAL_LENGTH).unwrap_or(i32::MAX) - 1;
        let max_row = (size - reserve).max(1);
        bounds.random_cell_in(rng, 0..size.max(1), 0..max_row)
    }

    fn start_body<R, F>(bounds: Bounds, rng: &mut R, is_free: &F) -> Option<(Body, Direction)>
    where
        R: Rng + ?Sized,
        F: Fn(GridPos) -> bool,
    {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let body = Body::straight(Self::random_start(bounds, rng), Direction::Up, INITIAL_LENGTH);
            if body.iter().all(is_free) {
                return Some((body, Direction::Up));
            }
        }

        let fitting = || {
            bounds.cells().flat_map(move |head| {
                Direction::ALL.into_iter().filter_map(move |facing| {
                    let body = Body::straight(head, facing, INITIAL_LENGTH);
                    let fits = body.iter().all(|cell| bounds.contains(cell));
                    fits.then_some((body, facing))
                })
            })
        };
        fitting()
            .find(|(body, _)| body.iter().all(is_free))
            .or_else(|| fitting().find(|(body, _)| is_free(body.head())))
    }

    /// Returns the direction the agent will take given a request.
    ///
    /// The request is honoured unless it is an exact reversal of the current
    /// direction on a body longer than one segment, in which case the current
    /// direction is kept.
    #[must_use]
    pub fn resolve_next_direction(&self, requested: Direction) -> Direction {
        if self.direction.is_opposite(requested) && self.body.len() > 1 {
            self.direction
        } else {
            requested
        }
    }

    /// Re-initialises this agent in place: new body on cells `is_free`
    /// accepts, new colour and direction, score 0, alive. Id, name and the
    /// human bit are kept.
    ///
    /// Returns false, leaving the agent untouched, when no free cell exists.
    pub fn respawn<R, F>(&mut self, bounds: Bounds, rng: &mut R, is_free: F) -> bool
    where
        R: Rng + ?Sized,
        F: Fn(GridPos) -> bool,
    {
        match Self::create(self.id, &self.name, self.is_human(), bounds, rng, is_free) {
            Some(fresh) => {
                *self = fresh;
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assigned colour.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Body segments.
    #[must_use]
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Head cell.
    #[must_use]
    pub fn head(&self) -> GridPos {
        self.body.head()
    }

    /// Tail cell.
    #[must_use]
    pub fn tail(&self) -> GridPos {
        self.body.tail()
    }

    /// Body length in segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: bodies are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Current direction of travel.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Status bits.
    #[must_use]
    pub fn flags(&self) -> AgentFlags {
        self.flags
    }

    /// True unless the agent has died.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.flags.contains(AgentFlags::DEAD)
    }

    /// True for the externally controlled agent.
    #[must_use]
    pub fn is_human(&self) -> bool {
        self.flags.contains(AgentFlags::HUMAN)
    }

    // -------------------------------------------------------------------------
    // Mutation (resolvers only)
    // -------------------------------------------------------------------------

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn advance(&mut self, head: GridPos, grow: bool) {
        self.body.advance(head, grow);
    }

    pub(crate) fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn mark_dead(&mut self) {
        self.flags.insert(AgentFlags::DEAD);
    }
}

// =============================================================================
// Food
// =============================================================================

/// A food item on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Food {
    id: FoodId,
    position: GridPos,
    color: Color,
    value: u32,
}

impl Food {
    /// Creates a food item.
    #[must_use]
    pub const fn new(id: FoodId, position: GridPos, color: Color, value: u32) -> Self {
        Self {
            id,
            position,
            color,
            value,
        }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> FoodId {
        self.id
    }

    /// Cell the item occupies.
    #[must_use]
    pub fn position(&self) -> GridPos {
        self.position
    }

    /// Display colour.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Point value (1 for every spawned item).
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }
}
