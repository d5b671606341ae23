use std::fmt;

use crate::shared::constants::FILTER_COUNT;

/// The fixed, ordered set of visual filters. Discriminants are the
/// 1-based filter indices shown on the buttons and bound to number keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterKind {
    #[default]
    Thermal = 1,
    EdgeEnhanced = 2,
    HighContrast = 3,
    Particles = 4,
    Sepia = 5,
    Neon = 6,
    Vintage = 7,
    Glitch = 8,
}

impl FilterKind {
    pub const ALL: [FilterKind; FILTER_COUNT] = [
        FilterKind::Thermal,
        FilterKind::EdgeEnhanced,
        FilterKind::HighContrast,
        FilterKind::Particles,
        FilterKind::Sepia,
        FilterKind::Neon,
        FilterKind::Vintage,
        FilterKind::Glitch,
    ];

    /// Maps a 1-based index to a filter; `None` outside `1..=FILTER_COUNT`.
    pub fn from_index(index: usize) -> Option<FilterKind> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Short button caption.
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Thermal => "Thermal",
            FilterKind::EdgeEnhanced => "Edge+",
            FilterKind::HighContrast => "B&W",
            FilterKind::Particles => "Particles",
            FilterKind::Sepia => "Sepia",
            FilterKind::Neon => "Neon",
            FilterKind::Vintage => "Vintage",
            FilterKind::Glitch => "Cyber",
        }
    }

    /// Whether the output depends on randomness beyond the input frame.
    pub fn is_stochastic(&self) -> bool {
        matches!(
            self,
            FilterKind::Particles | FilterKind::Vintage | FilterKind::Glitch
        )
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
