use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::IVec2;
use rand::rngs::SmallRng;
use smallvec::SmallVec;

use crate::constants::player::STEP_TIME;
use crate::inventory::Inventory;
use crate::map::direction::Direction;

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// The cell an entity stands on.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position(pub IVec2);

/// Discrete, rate-limited walking driven by held direction keys.
#[derive(Component, Debug, Clone)]
pub struct Walker {
    /// Milliseconds between steps.
    pub step_time: u32,
    /// Milliseconds until the next step is allowed.
    pub timeout: u32,
    /// Held directions, most recently pressed first.
    pub queue: SmallVec<[Direction; 4]>,
}

impl Walker {
    pub fn new(step_time: u32) -> Self {
        Self {
            step_time,
            timeout: 0,
            queue: SmallVec::new(),
        }
    }

    pub fn begin(&mut self, direction: Direction) {
        self.end(direction);
        self.queue.insert(0, direction);
    }

    pub fn end(&mut self, direction: Direction) {
        self.queue.retain(|d| *d != direction);
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(STEP_TIME)
    }
}

/// Which hand is busy: the primary button swings the selected tool, the secondary one places material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WieldMode {
    Tool,
    Material,
}

/// What the player is currently using and on which cell.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wielding {
    pub mode: Option<WieldMode>,
    pub target: Option<IVec2>,
}

impl Wielding {
    /// Starts using `mode` on `target`; an action already in progress keeps its mode.
    pub fn begin(&mut self, mode: WieldMode, target: IVec2) {
        self.mode.get_or_insert(mode);
        self.target = Some(target);
    }

    pub fn retarget(&mut self, target: IVec2) {
        if self.mode.is_some() {
            self.target = Some(target);
        }
    }

    /// Stops `mode`, if it is the one in progress.
    pub fn end(&mut self, mode: WieldMode) {
        if self.mode == Some(mode) {
            *self = Wielding::default();
        }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub walker: Walker,
    pub wielding: Wielding,
    pub inventory: Inventory,
}

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

/// Frame time, already multiplied by the overclock factor.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DeltaTime {
    pub seconds: f32,
    pub millis: u32,
}

impl DeltaTime {
    pub fn from_seconds(seconds: f32) -> Self {
        Self {
            seconds,
            millis: (seconds * 1000.0).round() as u32,
        }
    }
}

/// The simulation's random source; seeded so a world and its first moments can be replayed.
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

/// Settings fixed at startup that systems need to consult.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Settings {
    /// Simulated milliseconds per real millisecond.
    pub overclock: u32,
}
