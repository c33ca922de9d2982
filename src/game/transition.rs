//! Level-change and respawn timing.
//!
//! One signed counter drives both the circular wipe and the moment a level
//! is swapped. Negative values open the view after a load, positive values
//! close it before the next one; zero is normal play.

/// Frames the wipe takes to fully open or close.
pub const TRANSITION_SPAN: i32 = 30;
/// Death frames before the wipe starts closing.
pub const DEATH_WIPE_START: u32 = 10;
/// Death frames after which the level is reloaded.
pub const DEATH_RELOAD_AFTER: u32 = 40;
const WIPE_SCALE: f32 = 8.0;

/// What the game should do after a transition tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    /// Nothing to load this frame.
    Continue,
    /// The level is cleared and the wipe has closed.
    Advance,
    /// The player died and the wipe has closed.
    Reload,
}

/// Wipe counter and death timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Negative while opening, positive while closing, zero in play.
    pub counter: i32,
    /// Frames since the player died; 0 while alive.
    pub dead: u32,
}

impl Transition {
    /// State right after a level load.
    pub fn opening() -> Self {
        Transition {
            counter: -TRANSITION_SPAN,
            dead: 0,
        }
    }

    /// The player has died and the level will reload.
    pub fn is_dying(&self) -> bool {
        self.dead > 0
    }

    /// The wipe is partly closed.
    pub fn is_active(&self) -> bool {
        self.counter != 0
    }

    /// Keep the wipe fully closed.
    pub fn hold_closed(&mut self) {
        self.counter = TRANSITION_SPAN;
    }

    /// Radius of the visible circle; zero when fully closed.
    pub fn wipe_radius(&self) -> f32 {
        (TRANSITION_SPAN - self.counter.abs()).max(0) as f32 * WIPE_SCALE
    }

    /// Advance one frame. `cleared` is true when no enemies remain.
    pub fn tick(&mut self, cleared: bool) -> TransitionStep {
        if cleared {
            self.counter += 1;
            if self.counter > TRANSITION_SPAN {
                return TransitionStep::Advance;
            }
        }
        if self.counter < 0 {
            self.counter += 1;
        }

        if self.dead > 0 {
            self.dead += 1;
            if self.dead >= DEATH_WIPE_START {
                self.counter = (self.counter + 1).min(TRANSITION_SPAN);
            }
            if self.dead > DEATH_RELOAD_AFTER {
                return TransitionStep::Reload;
            }
        }
        TransitionStep::Continue
    }
}

impl Default for Transition {
    fn default() -> Self {
        Transition::opening()
    }
}
