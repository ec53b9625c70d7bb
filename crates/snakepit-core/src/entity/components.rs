//! Component types shared by agents and food.
//!
//! - [`Color`]: packed RGB colour with a fixed palette
//! - [`AgentFlags`]: human/dead status bits
//! - [`Body`]: the ordered segment sequence of an agent

use std::collections::VecDeque;
use std::fmt;

use bitflags::bitflags;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tessera::{Direction, GridPos};

// =============================================================================
// Color
// =============================================================================

/// Packed `0xRRGGBB` colour.
///
/// The simulation never interprets colours; it only assigns them so that the
/// presentation layer can tell agents and food apart.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
    /// Colour reserved for the human agent.
    pub const WHITE: Color = Color(0x00ff_ffff);

    /// Creates a colour from a packed `0xRRGGBB` value (upper byte ignored).
    #[must_use]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// Returns the packed `0xRRGGBB` value.
    #[must_use]
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Picks a palette colour uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        PALETTE[rng.gen_range(0..PALETTE.len())]
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({self})")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Colours assigned to bots and food.
pub const PALETTE: [Color; 9] = [
    Color::from_rgb(0xef4444), // red
    Color::from_rgb(0xf97316), // orange
    Color::from_rgb(0xeab308), // yellow
    Color::from_rgb(0x22c55e), // green
    Color::from_rgb(0x06b6d4), // cyan
    Color::from_rgb(0x3b82f6), // blue
    Color::from_rgb(0x8b5cf6), // violet
    Color::from_rgb(0xd946ef), // fuchsia
    Color::from_rgb(0xf43f5e), // rose
];

// =============================================================================
// Agent Flags
// =============================================================================

bitflags! {
    /// Lifecycle and control bits for an agent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AgentFlags: u8 {
        /// Steered by external input rather than a brain.
        const HUMAN = 0b0000_0001;
        /// No longer moving; bots are respawned, the human stays dead.
        const DEAD = 0b0000_0010;
    }
}

// =============================================================================
// Body
// =============================================================================

/// Ordered body segments: index 0 is the head, the last index is the tail.
///
/// Backed by a `VecDeque` so the per-tick head insert and tail removal are
/// both O(1).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Body {
    segments: VecDeque<GridPos>,
}

impl Body {
    /// Creates a body from segments ordered head first.
    ///
    /// Returns `None` for an empty segment list.
    #[must_use]
    pub fn from_segments<I: IntoIterator<Item = GridPos>>(segments: I) -> Option<Self> {
        let segments: VecDeque<GridPos> = segments.into_iter().collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// Builds a straight body of `length` segments with its head at `head`,
    /// trailing away from `facing`.
    #[must_use]
    pub fn straight(head: GridPos, facing: Direction, length: usize) -> Self {
        let behind = facing.opposite().vector();
        let segments = (0..length.max(1))
            .map(|i| head + behind * i32::try_from(i).unwrap_or(i32::MAX))
            .collect();
        Self { segments }
    }

    /// The head segment.
    #[must_use]
    pub fn head(&self) -> GridPos {
        // Never empty: both constructors reject or pad empty input.
        self.segments[0]
    }

    /// The tail segment.
    #[must_use]
    pub fn tail(&self) -> GridPos {
        self.segments[self.segments.len() - 1]
    }

    /// Number of segments (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates segments from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.segments.iter().copied()
    }

    /// True if every pair of consecutive segments is exactly one
    /// axis-aligned step apart.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        self.segments
            .iter()
            .zip(self.segments.iter().skip(1))
            .all(|(a, b)| tessera::manhattan(*a, *b) == 1)
    }

    /// Prepends a new head. When `grow` is false the tail is dropped so the
    /// length is unchanged.
    pub(crate) fn advance(&mut self, head: GridPos, grow: bool) {
        self.segments.push_front(head);
        if !grow {
            self.segments.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod color_tests {
        use super::*;
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        #[test]
        fn display_is_hex() {
            assert_eq!(Color::WHITE.to_string(), "#ffffff");
            assert_eq!(PALETTE[4].to_string(), "#06b6d4");
        }

        #[test]
        fn random_comes_from_palette() {
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            for _ in 0..50 {
                assert!(PALETTE.contains(&Color::random(&mut rng)));
            }
        }

        #[test]
        fn upper_byte_is_masked() {
            assert_eq!(Color::from_rgb(0xff12_3456).rgb(), 0x12_3456);
        }
    }

    mod flag_tests {
        use super::*;

        #[test]
        fn flags_combine() {
            let mut flags = AgentFlags::HUMAN;
            assert!(!flags.contains(AgentFlags::DEAD));
            flags.insert(AgentFlags::DEAD);
            assert!(flags.contains(AgentFlags::HUMAN | AgentFlags::DEAD));
        }

        #[test]
        fn flags_serialize() {
            let flags = AgentFlags::HUMAN | AgentFlags::DEAD;
            let json = serde_json::to_string(&flags).unwrap();
            let back: AgentFlags = serde_json::from_str(&json).unwrap();
            assert_eq!(flags, back);
        }
    }

    mod body_tests {
        use super::*;

        #[test]
        fn facing_up_extends_down() {
            let body = Body::straight(GridPos::new(50, 50), Direction::Up, 5);
            let cells: Vec<_> = body.iter().collect();
            assert_eq!(
                cells,
                vec![
                    GridPos::new(50, 50),
                    GridPos::new(50, 51),
                    GridPos::new(50, 52),
                    GridPos::new(50, 53),
                    GridPos::new(50, 54),
                ]
            );
            assert_eq!(body.head(), GridPos::new(50, 50));
            assert_eq!(body.tail(), GridPos::new(50, 54));
            assert!(body.is_contiguous());
        }

        #[test]
        fn facing_down_extends_up() {
            let body = Body::straight(GridPos::new(4, 9), Direction::Down, 3);
            assert_eq!(body.tail(), GridPos::new(4, 7));
            assert!(body.is_contiguous());
        }

        #[test]
        fn empty_segments_rejected() {
            assert!(Body::from_segments(Vec::new()).is_none());
            assert_eq!(Body::straight(GridPos::ZERO, Direction::Up, 0).len(), 1);
        }

        #[test]
        fn advance_without_growth_keeps_length() {
            let mut body = Body::straight(GridPos::new(3, 3), Direction::Up, 3);
            body.advance(GridPos::new(3, 2), false);
            assert_eq!(body.len(), 3);
            assert_eq!(body.head(), GridPos::new(3, 2));
            assert_eq!(body.tail(), GridPos::new(3, 4));
        }

        #[test]
        fn advance_with_growth_adds_segment() {
            let mut body = Body::straight(GridPos::new(3, 3), Direction::Up, 3);
            body.advance(GridPos::new(4, 3), true);
            assert_eq!(body.len(), 4);
            assert_eq!(body.tail(), GridPos::new(3, 5));
            assert!(body.is_contiguous());
        }

        #[test]
        fn gap_is_not_contiguous() {
            let body =
                Body::from_segments([GridPos::new(0, 0), GridPos::new(0, 2)]).unwrap();
            assert!(!body.is_contiguous());
        }
    }
}
