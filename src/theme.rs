//! House themes for the field.
//!
//! The field's theme color comes from a "sorting hat": the host asks the
//! [`HouseSelector`] to sort, it spends a short moment deciding, and then
//! reports a [`House`] whose primary color becomes the field theme.
//!
//! | House | Primary | Secondary | Traits |
//! |-------|---------|-----------|--------|
//! | Gryffindor | red | gold | Brave, Determined, Leadership |
//! | Slytherin | green | silver | Ambitious, Cunning, Strategic |
//! | Ravenclaw | blue | bronze | Wise, Creative, Analytical |
//! | Hufflepuff | yellow | black | Loyal, Patient, Dedicated |

use crate::spawn::SpawnContext;
use glam::Vec3;
use std::fmt;

/// How long a sort takes, in seconds.
pub const SORT_DURATION: f32 = 2.0;

/// Convert a `0xRRGGBB` sRGB color to RGB components (0-1 per channel).
pub fn rgb_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// A themed palette for the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    Gryffindor,
    Slytherin,
    Ravenclaw,
    Hufflepuff,
}

impl House {
    pub const ALL: [House; 4] = [
        House::Gryffindor,
        House::Slytherin,
        House::Ravenclaw,
        House::Hufflepuff,
    ];

    pub fn name(self) -> &'static str {
        match self {
            House::Gryffindor => "Gryffindor",
            House::Slytherin => "Slytherin",
            House::Ravenclaw => "Ravenclaw",
            House::Hufflepuff => "Hufflepuff",
        }
    }

    /// Theme color applied to the field.
    pub fn primary(self) -> Vec3 {
        match self {
            House::Gryffindor => rgb_hex(0xdc2626),
            House::Slytherin => rgb_hex(0x16a34a),
            House::Ravenclaw => rgb_hex(0x2563eb),
            House::Hufflepuff => rgb_hex(0xfacc15),
        }
    }

    /// Second gradient stop, used for accents such as the clear color.
    pub fn secondary(self) -> Vec3 {
        match self {
            House::Gryffindor => rgb_hex(0xeab308),
            House::Slytherin => rgb_hex(0xe5e7eb),
            House::Ravenclaw => rgb_hex(0xcd7f32),
            House::Hufflepuff => rgb_hex(0x000000),
        }
    }

    pub fn traits(self) -> [&'static str; 3] {
        match self {
            House::Gryffindor => ["Brave", "Determined", "Leadership"],
            House::Slytherin => ["Ambitious", "Cunning", "Strategic"],
            House::Ravenclaw => ["Wise", "Creative", "Analytical"],
            House::Hufflepuff => ["Loyal", "Patient", "Dedicated"],
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SortState {
    Idle,
    Sorting { house: House, ready_at: f32 },
}

/// Picks a random house after a short delay.
///
/// ```ignore
/// if input.key_pressed(KeyCode::H) {
///     selector.sort(&mut rng, clock.elapsed());
/// }
/// if let Some(house) = selector.update(clock.elapsed()) {
///     handle.set_theme(house.primary());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HouseSelector {
    state: SortState,
    selected: Option<House>,
    duration: f32,
}

impl HouseSelector {
    pub fn new() -> Self {
        Self {
            state: SortState::Idle,
            selected: None,
            duration: SORT_DURATION,
        }
    }

    /// Change how long sorting takes.
    pub fn with_duration(mut self, seconds: f32) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    /// Start sorting at time `now` (seconds). Ignored while a sort is
    /// already running. Returns whether a sort started.
    pub fn sort(&mut self, rng: &mut SpawnContext, now: f32) -> bool {
        if self.is_sorting() {
            return false;
        }
        let house = House::ALL[rng.random_index(House::ALL.len())];
        self.state = SortState::Sorting {
            house,
            ready_at: now + self.duration,
        };
        true
    }

    /// Poll at time `now`. Yields the house once, when sorting finishes.
    pub fn update(&mut self, now: f32) -> Option<House> {
        match self.state {
            SortState::Sorting { house, ready_at } if now >= ready_at => {
                self.state = SortState::Idle;
                self.selected = Some(house);
                Some(house)
            }
            _ => None,
        }
    }

    pub fn is_sorting(&self) -> bool {
        matches!(self.state, SortState::Sorting { .. })
    }

    /// The last house chosen, if any.
    pub fn selected(&self) -> Option<House> {
        self.selected
    }

    /// Pre-select a house without sorting.
    pub fn select(&mut self, house: House) {
        self.state = SortState::Idle;
        self.selected = Some(house);
    }
}

impl Default for HouseSelector {
    fn default() -> Self {
        Self::new()
    }
}
