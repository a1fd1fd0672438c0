//! Turn coordinator: the phase state machine each peer runs on its own.
//!
//! Neither peer can see the other's phase. They stay in step only because
//! each phase polls for exactly the byte the other side sends next, so a lost
//! byte leaves a peer waiting in its phase for good. Only `Result` and
//! `EndResult` move on by themselves, after a fixed number of ticks.
//!
//! The state machine is split in two: [`Coordinator::transition`] decides
//! what an event means in the current phase without touching anything, and
//! [`Coordinator::apply`] carries that decision out on the board.
//! [`Coordinator::tick`] runs one scheduler tick against a link and a
//! renderer.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use log::{debug, trace};

use crate::board::{Board, BoardKind};
use crate::common::{Coord, Direction, StrikeResult};
use crate::config::Timing;
use crate::display::{LedIntent, PhaseCue, Renderer, Snapshot};
use crate::input::InputEvent;
use crate::link::Link;
use crate::protocol::{decode_strike, LinkCodec, Outbound, StatusCode, NO_POSITION};

/// Game phases, in the order a round normally visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Title screen until the first press.
    Splash,
    /// Ships are moved, rotated and committed one by one.
    Placing,
    /// All ships placed; first to confirm takes the first turn.
    Ready,
    /// Active turn: the cursor picks a strike target.
    Aim,
    /// Strike sent; waiting for hit or miss.
    Fire,
    /// Hit or miss animation.
    ResultGraphic,
    /// Hit or miss banner, timed.
    Result,
    /// Passive turn: waiting for the opponent's strike.
    Wait,
    /// Strike answered; waiting to hear whether play goes on.
    Transfer,
    /// Win or lose banner, timed.
    EndResult,
    /// Waiting for either side to ask for a new game.
    PlayAgain,
}

/// Everything that can drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    /// A byte read as a status code.
    Status(StatusCode),
    /// A byte read as a strike coordinate.
    Strike(Coord),
    /// The renderer ran out of result animation frames.
    AnimationDone,
    /// The phase-local timer of a timed phase ran out.
    TimerElapsed,
}

/// Which interpretation a phase gives to inbound bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// The phase does not read the link.
    Nothing,
    Status,
    Position,
}

/// The board mutation and/or message a transition performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    MoveShip(Direction),
    RotateShip,
    /// Commit the ship in placement and hand out the next one.
    PlaceShip,
    MoveCursor(Direction),
    /// Latch the cursor and send it as a strike.
    Fire(Coord),
    /// Note the opponent's answer, committing the hit if it was one.
    RecordResult(StrikeResult),
    /// Check an incoming strike against our ships and answer hit or miss.
    AnswerStrike(Coord),
    Send(StatusCode),
    /// Fresh board and score; `announce` tells the opponent too.
    Restart { announce: bool },
}

/// What an event means in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: Action,
    /// Phase to enter afterwards, `None` to stay.
    pub next: Option<Phase>,
}

impl Transition {
    const IGNORE: Transition = Transition {
        action: Action::None,
        next: None,
    };

    fn stay(action: Action) -> Self {
        Transition { action, next: None }
    }

    fn to(next: Phase) -> Self {
        Transition {
            action: Action::None,
            next: Some(next),
        }
    }

    fn with(action: Action, next: Phase) -> Self {
        Transition {
            action,
            next: Some(next),
        }
    }
}

/// Side effects of applying one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    pub outbound: Option<Outbound>,
    pub cue: Option<PhaseCue>,
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub sent: Vec<Outbound>,
    pub entered: Vec<PhaseCue>,
}

/// One peer's complete game context.
#[derive(Debug)]
pub struct Coordinator {
    board: Board,
    phase: Phase,
    last_result: Option<StrikeResult>,
    phase_tick: u32,
    timing: Timing,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::with_timing(Timing::default())
    }

    pub fn with_timing(timing: Timing) -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Splash,
            last_result: None,
            phase_tick: 0,
            timing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access, for setting up positions directly.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn last_result(&self) -> Option<StrikeResult> {
        self.last_result
    }

    /// Ticks spent in the current phase.
    pub fn phase_tick(&self) -> u32 {
        self.phase_tick
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// How the current phase reads the link.
    pub fn expects(&self) -> Expect {
        match self.phase {
            Phase::Ready | Phase::Fire | Phase::Transfer | Phase::PlayAgain => Expect::Status,
            Phase::Wait => Expect::Position,
            Phase::Splash
            | Phase::Placing
            | Phase::Aim
            | Phase::ResultGraphic
            | Phase::Result
            | Phase::EndResult => Expect::Nothing,
        }
    }

    /// Whether the timed phase has run its course.
    pub fn timer_due(&self) -> bool {
        match self.phase {
            Phase::Result => self.phase_tick > self.timing.result_ticks,
            Phase::EndResult => self.phase_tick > self.timing.game_over_ticks,
            _ => false,
        }
    }

    /// Decide what `event` means in the current phase. Pure: reads the board
    /// but changes nothing.
    pub fn transition(&self, event: &Event) -> Transition {
        use Event::{AnimationDone, Input, Status, Strike, TimerElapsed};
        use InputEvent::{Confirm, Move, Rotate};

        let board = &self.board;
        match self.phase {
            Phase::Splash => match event {
                Input(Confirm) | Input(Rotate) => Transition::to(Phase::Placing),
                _ => Transition::IGNORE,
            },
            Phase::Placing => match event {
                Input(Move(dir)) => Transition::stay(Action::MoveShip(*dir)),
                Input(Rotate) => Transition::stay(Action::RotateShip),
                Input(Confirm) => match board.current_ship() {
                    Some(ship) if board.is_valid_position(&ship) => {
                        if board.is_last_ship() {
                            Transition::with(Action::PlaceShip, Phase::Ready)
                        } else {
                            Transition::stay(Action::PlaceShip)
                        }
                    }
                    _ => Transition::IGNORE,
                },
                _ => Transition::IGNORE,
            },
            Phase::Ready => match event {
                Input(Confirm) | Input(Rotate) => {
                    Transition::with(Action::Send(StatusCode::PlayerTwo), Phase::Aim)
                }
                Status(StatusCode::PlayerTwo) => Transition::to(Phase::Wait),
                _ => Transition::IGNORE,
            },
            Phase::Aim => match event {
                Input(Move(dir)) => Transition::stay(Action::MoveCursor(*dir)),
                Input(Confirm) if !board.is_recorded(board.cursor()) => {
                    Transition::with(Action::Fire(board.cursor()), Phase::Fire)
                }
                _ => Transition::IGNORE,
            },
            Phase::Fire => match event {
                Status(StatusCode::Hit) => Transition::with(
                    Action::RecordResult(StrikeResult::Hit),
                    Phase::ResultGraphic,
                ),
                Status(StatusCode::Miss) => Transition::with(
                    Action::RecordResult(StrikeResult::Miss),
                    Phase::ResultGraphic,
                ),
                _ => Transition::IGNORE,
            },
            Phase::ResultGraphic => match event {
                AnimationDone => Transition::to(Phase::Result),
                _ => Transition::IGNORE,
            },
            Phase::Result => match event {
                TimerElapsed if board.is_winner() => {
                    Transition::with(Action::Send(StatusCode::Loser), Phase::EndResult)
                }
                TimerElapsed => Transition::with(Action::Send(StatusCode::PlayOn), Phase::Wait),
                _ => Transition::IGNORE,
            },
            Phase::Wait => match event {
                Strike(coord) => Transition::with(Action::AnswerStrike(*coord), Phase::Transfer),
                _ => Transition::IGNORE,
            },
            Phase::Transfer => match event {
                Status(StatusCode::Loser) => Transition::to(Phase::EndResult),
                Status(StatusCode::PlayOn) => Transition::to(Phase::Aim),
                _ => Transition::IGNORE,
            },
            Phase::EndResult => match event {
                TimerElapsed => Transition::to(Phase::PlayAgain),
                _ => Transition::IGNORE,
            },
            Phase::PlayAgain => match event {
                Input(Confirm) | Input(Rotate) => {
                    Transition::with(Action::Restart { announce: true }, Phase::Placing)
                }
                Status(StatusCode::PlayAgain) => {
                    Transition::with(Action::Restart { announce: false }, Phase::Placing)
                }
                _ => Transition::IGNORE,
            },
        }
    }

    /// Carry out a transition: mutate the board, pick the outbound message
    /// and enter the next phase.
    pub fn apply(&mut self, transition: Transition) -> Outcome {
        let mut outcome = Outcome::default();
        match transition.action {
            Action::None => {}
            Action::MoveShip(dir) => self.board.move_ship(dir),
            Action::RotateShip => self.board.rotate_ship(),
            Action::PlaceShip => match self.board.place_current_ship() {
                Ok(()) => {
                    self.board.next_ship();
                }
                Err(e) => trace!("placement rejected: {}", e),
            },
            Action::MoveCursor(dir) => self.board.move_cursor(dir),
            Action::Fire(coord) => {
                if self.board.is_valid_strike() {
                    outcome.outbound = Some(Outbound::Strike(coord));
                } else {
                    trace!("strike at {} already recorded", coord);
                }
            }
            Action::RecordResult(result) => {
                if result == StrikeResult::Hit {
                    self.board.add_hit();
                }
                self.last_result = Some(result);
            }
            Action::AnswerStrike(coord) => {
                let answer = if self.board.is_hit(coord) {
                    StatusCode::Hit
                } else {
                    StatusCode::Miss
                };
                debug!("incoming strike at {} -> {:?}", coord, answer);
                outcome.outbound = Some(Outbound::Status(answer));
            }
            Action::Send(code) => outcome.outbound = Some(Outbound::Status(code)),
            Action::Restart { announce } => {
                self.board.initialize();
                self.last_result = None;
                if announce {
                    outcome.outbound = Some(Outbound::Status(StatusCode::PlayAgain));
                }
            }
        }
        if let Some(next) = transition.next {
            outcome.cue = Some(self.enter(next));
        }
        outcome
    }

    /// Decide and apply in one step.
    pub fn handle(&mut self, event: Event) -> Outcome {
        let transition = self.transition(&event);
        if transition == Transition::IGNORE {
            trace!("{:?} ignored in {:?}", event, self.phase);
        }
        self.apply(transition)
    }

    fn enter(&mut self, next: Phase) -> PhaseCue {
        let cue = PhaseCue::for_transition(self.phase, next, self.last_result);
        debug!("phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        self.phase_tick = 0;
        cue
    }

    /// Read the pending link byte the way the current phase expects it.
    pub fn poll<L: Link>(&self, codec: &mut LinkCodec<L>) -> Option<Event> {
        match self.expects() {
            Expect::Nothing => None,
            Expect::Status => match codec.get_status() {
                StatusCode::NoResponse => None,
                code => Some(Event::Status(code)),
            },
            Expect::Position => match codec.get_position() {
                NO_POSITION => None,
                byte => match decode_strike(byte) {
                    Some(coord) => Some(Event::Strike(coord)),
                    None => {
                        trace!("discarding byte {:#04x} while waiting for a strike", byte);
                        None
                    }
                },
            },
        }
    }

    /// One scheduler tick: local input, then the phase timer, then the link,
    /// then drawing. Messages go out on `codec` as soon as they are decided
    /// and every phase entered is announced to `renderer` once.
    pub fn tick<L: Link, R: Renderer>(
        &mut self,
        input: Option<InputEvent>,
        codec: &mut LinkCodec<L>,
        renderer: &mut R,
    ) -> TickReport {
        let mut report = TickReport::default();
        self.phase_tick = self.phase_tick.saturating_add(1);

        if let Some(input) = input {
            self.dispatch(Event::Input(input), codec, renderer, &mut report);
        }
        if self.timer_due() {
            self.dispatch(Event::TimerElapsed, codec, renderer, &mut report);
        }
        if let Some(event) = self.poll(codec) {
            self.dispatch(event, codec, renderer, &mut report);
        }
        let animation_done = renderer.draw(&self.snapshot());
        if animation_done && self.phase == Phase::ResultGraphic {
            self.dispatch(Event::AnimationDone, codec, renderer, &mut report);
        }
        report
    }

    fn dispatch<L: Link, R: Renderer>(
        &mut self,
        event: Event,
        codec: &mut LinkCodec<L>,
        renderer: &mut R,
        report: &mut TickReport,
    ) {
        let outcome = self.handle(event);
        if let Some(msg) = outcome.outbound {
            codec.send(msg);
            report.sent.push(msg);
        }
        if let Some(cue) = outcome.cue {
            renderer.enter(&cue);
            report.entered.push(cue);
        }
    }

    /// Read-only view for the renderer and LED.
    pub fn snapshot(&self) -> Snapshot {
        let view = match self.phase {
            Phase::Aim | Phase::Fire => BoardKind::OpponentRecord,
            _ => BoardKind::OwnShips,
        };
        Snapshot {
            phase: self.phase,
            ship: self.board.current_ship(),
            cursor: self.board.cursor(),
            view,
            board: self.board.grid(view),
            last_result: self.last_result,
            score: self.board.score(),
            led: LedIntent::for_phase(self.phase, self.last_result, self.board.is_winner()),
        }
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}
