//! Autopilot - plays the player for headless sessions
//!
//! Wanders in random 8-way headings and keeps shooting at the nearest enemy.
//! Seeded, so a given seed always produces the same session.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::session::IntentSource;
use crate::sim::{GameObject, GameState, Group, TickInput};

/// Frames to hold a heading before picking a new one
const HOLD_MIN: u32 = 10;
const HOLD_MAX: u32 = 40;

/// Component threshold for snapping a direction onto 8-way input (~sin 22.5°)
const SNAP: f32 = 0.38;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    heading: IVec2,
    hold: u32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            heading: IVec2::ZERO,
            hold: 0,
        }
    }
}

/// Snap a direction to the nearest of the 8 key directions
pub fn snap_to_axis(dir: Vec2) -> IVec2 {
    let snap = |c: f32| {
        if c > SNAP {
            1
        } else if c < -SNAP {
            -1
        } else {
            0
        }
    };
    let dir = crate::normalize(dir);
    IVec2::new(snap(dir.x), snap(dir.y))
}

impl IntentSource for Autopilot {
    fn next_intent(&mut self, state: &GameState) -> TickInput {
        if self.hold == 0 {
            self.heading = IVec2::new(self.rng.random_range(-1..=1), self.rng.random_range(-1..=1));
            self.hold = self.rng.random_range(HOLD_MIN..=HOLD_MAX);
        }
        self.hold -= 1;

        let Some(player) = state.player() else {
            return TickInput::default();
        };
        let here = player.body.position;

        let nearest = state
            .registry
            .iter_group(Group::Enemies)
            .map(|(_, e)| e.body().position)
            .min_by(|a, b| {
                a.distance_squared(here)
                    .partial_cmp(&b.distance_squared(here))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        TickInput {
            movement: self.heading,
            fire: nearest.map_or(IVec2::ZERO, |enemy| snap_to_axis(enemy - here)),
            quit: false,
        }
    }
}
