//! Build-time game constants for the 5×7 infrared battleship.

/// Number of columns on the LED matrix, and so on each board.
pub const GRID_WIDTH: usize = 5;
/// Number of rows on the LED matrix.
pub const GRID_HEIGHT: usize = 7;

pub const NUM_SHIPS: usize = 3;
/// Ship lengths in the order they are placed.
pub const SHIP_LENGTHS: [u8; NUM_SHIPS] = [2, 3, 4];

/// Score at which every enemy ship cell has been hit.
pub const WINNING_SCORE: u8 = total_ship_cells(&SHIP_LENGTHS);

/// Anchor a freshly issued ship starts from (always vertical).
pub const NEW_SHIP_ANCHOR: (u8, u8) = (2, 3);
/// Where a rotated ship is moved to.
pub const ROTATE_ORIGIN: (u8, u8) = (0, 0);
/// Aim cursor start: the centre of the matrix.
pub const CURSOR_START: (u8, u8) = ((GRID_WIDTH / 2) as u8, (GRID_HEIGHT / 2) as u8);

/// Scheduler ticks per second.
pub const LOOP_RATE: u32 = 300;
/// Input samples per second.
pub const INPUT_RATE: u32 = 20;

/// Seconds the HIT/MISS banner is shown before play moves on.
pub const RESULT_SECONDS: f32 = 2.2;
/// Seconds the WIN/LOSE banner is shown before the restart prompt.
pub const GAME_OVER_SECONDS: f32 = 9.0;

/// Frames in the hit tick animation and their rate in Hz.
pub const HIT_FRAMES: u32 = 9;
pub const HIT_FRAME_RATE: u32 = 10;
/// Cross flashes shown for a miss (two frames each) and their rate in Hz.
pub const MISS_FLASHES: u32 = 2;
pub const MISS_FRAME_RATE: u32 = 2;

/// LED software PWM period and on-time, in ticks.
pub const LED_PERIOD: u32 = LOOP_RATE / 4;
pub const LED_DUTY: u32 = LOOP_RATE / 6;

const fn total_ship_cells(lengths: &[u8]) -> u8 {
    let mut total = 0;
    let mut i = 0;
    while i < lengths.len() {
        total += lengths[i];
        i += 1;
    }
    total
}

/// Phase durations expressed in scheduler ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// `Result` is left once its phase tick exceeds this.
    pub result_ticks: u32,
    /// `EndResult` is left once its phase tick exceeds this.
    pub game_over_ticks: u32,
}

impl Timing {
    /// Convert durations in seconds to ticks at `loop_rate`.
    pub fn from_seconds(loop_rate: u32, result_secs: f32, game_over_secs: f32) -> Self {
        Self {
            result_ticks: seconds_to_ticks(loop_rate, result_secs),
            game_over_ticks: seconds_to_ticks(loop_rate, game_over_secs),
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::from_seconds(LOOP_RATE, RESULT_SECONDS, GAME_OVER_SECONDS)
    }
}

fn seconds_to_ticks(loop_rate: u32, secs: f32) -> u32 {
    libm::roundf(loop_rate as f32 * libm::fmaxf(secs, 0.0)) as u32
}
