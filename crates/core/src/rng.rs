//! RNG module - deterministic tile generation
//!
//! Every random draw in the engine flows through [`TileSpawner`]: kind draws
//! for refills, constrained draws for the match-free initial fill, fresh tile
//! identities, and the Fisher-Yates permutation behind shuffles. Seeds are
//! explicit, so identical seeds and call sequences replay identical games.
//!
//! Also provides a simple LCG usable on its own in tests.

use arrayvec::ArrayVec;
use tile_match_types::{Tile, TileId, TileKind, MAX_TILE_KINDS};

const PALETTE_CAP: usize = MAX_TILE_KINDS as usize;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Rebuild an RNG from a captured state, bit for bit
    ///
    /// Unlike [`SimpleRng::new`] this applies no zero-seed guard; a state
    /// captured mid-sequence must resume exactly where it was.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max); `max` must be non-zero
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (for snapshots and sequence restarts)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Session-scoped source of fresh tiles
///
/// Owns the RNG and the monotonic identity counter. Identities are unique for
/// the lifetime of the spawner, which is what keeps them unique within any
/// grid the session ever holds.
#[derive(Debug, Clone)]
pub struct TileSpawner {
    rng: SimpleRng,
    next_id: u64,
}

impl TileSpawner {
    /// Create a spawner with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            next_id: 1,
        }
    }

    /// Rebuild a spawner from captured state
    ///
    /// Used when adopting an existing grid: `next_id` must exceed every
    /// identity already on the board or uniqueness breaks.
    pub fn from_state(rng_state: u32, next_id: u64) -> Self {
        Self {
            rng: SimpleRng::from_state(rng_state),
            next_id,
        }
    }

    /// Draw a uniformly random kind from a palette of `palette` kinds
    ///
    /// `palette` must be non-zero; validated configurations guarantee this.
    pub fn draw_kind(&mut self, palette: u8) -> TileKind {
        TileKind(self.rng.next_range(palette as u32) as u8)
    }

    /// Draw a uniformly random kind from the palette minus `banned`
    ///
    /// The draw is uniform over the allowed kinds, which matches the
    /// distribution of draw-and-reject without the retry loop. `banned` must
    /// not cover the whole palette.
    pub fn draw_kind_avoiding(&mut self, palette: u8, banned: &[TileKind]) -> TileKind {
        let mut allowed: ArrayVec<TileKind, PALETTE_CAP> = ArrayVec::new();
        for k in 0..palette {
            let kind = TileKind(k);
            if !banned.contains(&kind) {
                allowed.push(kind);
            }
        }
        debug_assert!(!allowed.is_empty(), "banned kinds cover the palette");
        allowed[self.rng.next_range(allowed.len() as u32) as usize]
    }

    /// Mint a fresh tile identity
    pub fn mint_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn a tile with a fresh identity and an unconstrained random kind
    pub fn spawn(&mut self, palette: u8) -> Tile {
        let kind = self.draw_kind(palette);
        Tile::new(self.mint_id(), kind)
    }

    /// Spawn a tile with a fresh identity, avoiding the given kinds
    pub fn spawn_avoiding(&mut self, palette: u8, banned: &[TileKind]) -> Tile {
        let kind = self.draw_kind_avoiding(palette, banned);
        Tile::new(self.mint_id(), kind)
    }

    /// Shuffle a slice with the spawner's RNG (Fisher-Yates)
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        self.rng.shuffle(slice);
    }

    /// Pick a uniformly random index below `len`; `len` must be non-zero
    pub fn pick_index(&mut self, len: usize) -> usize {
        self.rng.next_range(len as u32) as usize
    }

    /// Current RNG state (for snapshots and sequence restarts)
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Next identity the spawner will mint (for snapshots)
    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}

impl Default for TileSpawner {
    fn default() -> Self {
        Self::new(1)
    }
}
