use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::filters::domain::filter_kind::FilterKind;
use crate::filters::domain::frame_filter::FrameFilter;
use crate::shared::constants::FILTER_COUNT;
use crate::shared::frame::Frame;

use super::effects::{self, FilterFn};

/// Dispatch table in button order; `FilterKind::index() - 1` selects the entry.
const TABLE: [FilterFn; FILTER_COUNT] = [
    effects::thermal,
    effects::edge_enhanced,
    effects::high_contrast,
    effects::particles,
    effects::sepia,
    effects::neon,
    effects::vintage,
    effects::glitch,
];

/// CPU implementation of every filter.
///
/// With a seed, each application draws from a fresh generator seeded with
/// it, so the same input always produces the same output. Without one the
/// randomized filters differ from call to call.
#[derive(Clone, Debug, Default)]
pub struct FilterBank {
    seed: Option<u64>,
}

impl FilterBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl FrameFilter for FilterBank {
    fn apply(&self, kind: FilterKind, frame: &Frame) -> Frame {
        let filter = TABLE[kind.index() - 1];
        filter(frame, &mut self.rng())
    }
}
