//! What the renderer and LED collaborators are told: enter-phase cues, the
//! per-tick snapshot, the LED intent, and the step model of the result
//! animations.

use crate::board::{BoardKind, Grid};
use crate::common::{Coord, StrikeResult};
use crate::config::{
    HIT_FRAMES, HIT_FRAME_RATE, LED_DUTY, LED_PERIOD, LOOP_RATE, MISS_FLASHES, MISS_FRAME_RATE,
};
use crate::game::Phase;
use crate::ship::Ship;

/// Fixed screen content requested when a phase is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Scene {
    /// Leave the display as it is.
    Keep,
    /// Blank the matrix.
    Clear,
    /// Blank the matrix and scroll a message.
    Text(&'static str),
}

/// The one-shot "enter phase" action, emitted exactly once per transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct PhaseCue {
    pub phase: Phase,
    pub scene: Scene,
}

impl PhaseCue {
    pub fn for_transition(from: Phase, to: Phase, last_result: Option<StrikeResult>) -> Self {
        let scene = match to {
            Phase::Splash | Phase::ResultGraphic | Phase::Wait => Scene::Clear,
            Phase::Ready => Scene::Text("READY?"),
            Phase::Result => match last_result {
                Some(StrikeResult::Hit) => Scene::Text("HIT"),
                _ => Scene::Text("MISS"),
            },
            // Only the winner gets here straight from its own result screen.
            Phase::EndResult if from == Phase::Result => Scene::Text("YOU WIN!"),
            Phase::EndResult => Scene::Text("YOU LOSE!"),
            Phase::PlayAgain => Scene::Text("PUSH TO PLAY AGAIN!"),
            Phase::Placing | Phase::Aim | Phase::Fire | Phase::Transfer => Scene::Keep,
        };
        PhaseCue { phase: to, scene }
    }
}

/// How the status LED should behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum LedIntent {
    On,
    Off,
    /// Software PWM flicker, shown after a hit.
    Flicker,
    /// Keep whatever level the LED already has.
    Hold,
}

impl LedIntent {
    pub fn for_phase(phase: Phase, last_result: Option<StrikeResult>, winner: bool) -> Self {
        match phase {
            Phase::Placing | Phase::Aim => LedIntent::On,
            Phase::Splash | Phase::Ready | Phase::Wait => LedIntent::Off,
            Phase::ResultGraphic | Phase::Result => match last_result {
                Some(StrikeResult::Hit) => LedIntent::Flicker,
                _ => LedIntent::Off,
            },
            Phase::EndResult if winner => LedIntent::On,
            Phase::EndResult => LedIntent::Off,
            Phase::Fire | Phase::Transfer | Phase::PlayAgain => LedIntent::Hold,
        }
    }
}

/// Software PWM: on for `duty` ticks of every `period`.
#[derive(Debug, Clone)]
pub struct Flicker {
    period: u32,
    duty: u32,
    count: u32,
}

impl Flicker {
    pub fn new(period: u32, duty: u32) -> Self {
        Self {
            period: period.max(1),
            duty,
            count: 0,
        }
    }

    /// Advance one tick and return the LED level for it.
    pub fn update(&mut self) -> bool {
        let on = self.count < self.duty;
        self.count = (self.count + 1) % self.period;
        on
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl Default for Flicker {
    fn default() -> Self {
        Self::new(LED_PERIOD, LED_DUTY)
    }
}

/// LED level tracking across ticks.
///
/// Every run of flicker starts from the beginning of the PWM cycle; a hold in
/// between does not count as leaving it.
#[derive(Debug, Clone, Default)]
pub struct Led {
    level: bool,
    flicker: Flicker,
    flickering: bool,
}

impl Led {
    /// Apply this tick's intent and return the resulting level.
    pub fn apply(&mut self, intent: LedIntent) -> bool {
        self.level = match intent {
            LedIntent::On => {
                self.flickering = false;
                true
            }
            LedIntent::Off => {
                self.flickering = false;
                false
            }
            LedIntent::Flicker => {
                if !self.flickering {
                    self.flicker.reset();
                    self.flickering = true;
                }
                self.flicker.update()
            }
            LedIntent::Hold => self.level,
        };
        self.level
    }

    pub fn level(&self) -> bool {
        self.level
    }
}

/// Frame timing of the hit tick and the miss cross animations.
///
/// A frame is drawn once the tick count passes the frame period; the
/// animation is exhausted on the period after its last frame.
#[derive(Debug, Clone)]
pub struct ResultAnimation {
    frames: u32,
    period: u32,
    frame: u32,
    tick: u32,
    done: bool,
}

impl ResultAnimation {
    pub fn new(result: StrikeResult) -> Self {
        let (frames, rate) = match result {
            StrikeResult::Hit => (HIT_FRAMES, HIT_FRAME_RATE),
            StrikeResult::Miss => (MISS_FLASHES * 2, MISS_FRAME_RATE),
        };
        Self {
            frames,
            period: LOOP_RATE / rate,
            frame: 0,
            tick: 0,
            done: false,
        }
    }

    /// Advance one tick. True once the last frame has been shown.
    pub fn tick(&mut self) -> bool {
        if self.done {
            return true;
        }
        self.tick += 1;
        if self.tick > self.period {
            self.tick = 0;
            if self.frame >= self.frames {
                self.done = true;
            } else {
                self.frame += 1;
            }
        }
        self.done
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Read-only view of the coordinator for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    /// Ship in placement, while there is one.
    pub ship: Option<Ship>,
    pub cursor: Coord,
    /// Which grid `board` holds: own ships except while aiming.
    pub view: BoardKind,
    pub board: Grid,
    pub last_result: Option<StrikeResult>,
    pub score: u8,
    pub led: LedIntent,
}

/// The display collaborator.
pub trait Renderer {
    /// Run the enter-phase action.
    fn enter(&mut self, cue: &PhaseCue);

    /// Draw one tick. Returns `true` once the result animation is exhausted;
    /// the value is ignored outside `ResultGraphic`.
    fn draw(&mut self, snapshot: &Snapshot) -> bool;
}

/// Renderer for a peer without a display: animations finish immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn enter(&mut self, _cue: &PhaseCue) {}

    fn draw(&mut self, _snapshot: &Snapshot) -> bool {
        true
    }
}
