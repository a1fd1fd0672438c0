#![cfg(feature = "std")]

//! Host-side peers: a node runs one device's tick loop against a link, and a
//! simulation runs two nodes in lock step.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::common::StrikeResult;
use crate::config::Timing;
use crate::display::{Led, PhaseCue, Renderer, ResultAnimation, Scene, Snapshot};
use crate::game::{Coordinator, Phase, TickReport};
use crate::input::{Cadence, EdgeSampler};
use crate::link::in_memory::InMemoryLink;
use crate::link::lossy::LossyLink;
use crate::link::Link;
use crate::pilot::{AutoPilot, Pilot};
use crate::protocol::{LinkCodec, Outbound};

/// Renderer for a peer without a matrix: logs the enter-phase cues and runs
/// the result animation timing so `ResultGraphic` ends when it would on the
/// device.
pub struct HeadlessRenderer {
    name: String,
    animation: Option<ResultAnimation>,
    led: Led,
}

impl HeadlessRenderer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            animation: None,
            led: Led::default(),
        }
    }

    pub fn led_level(&self) -> bool {
        self.led.level()
    }
}

impl Renderer for HeadlessRenderer {
    fn enter(&mut self, cue: &PhaseCue) {
        self.animation = None;
        match cue.scene {
            Scene::Text(text) => log::info!("[{}] {:?}: {}", self.name, cue.phase, text),
            Scene::Keep | Scene::Clear => log::debug!("[{}] {:?}", self.name, cue.phase),
        }
    }

    fn draw(&mut self, snapshot: &Snapshot) -> bool {
        self.led.apply(snapshot.led);
        if snapshot.phase != Phase::ResultGraphic {
            return false;
        }
        let result = snapshot.last_result.unwrap_or(StrikeResult::Miss);
        self.animation
            .get_or_insert_with(|| ResultAnimation::new(result))
            .tick()
    }
}

/// Running totals for one peer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PeerStats {
    pub strikes_sent: u64,
    pub hits_scored: u64,
    pub games_won: u32,
    pub games_lost: u32,
}

impl PeerStats {
    pub fn games_completed(&self) -> u32 {
        self.games_won + self.games_lost
    }
}

/// One simulated device: coordinator, link, pilot at the keys, and a
/// headless display.
pub struct PeerNode<L: Link> {
    name: String,
    coordinator: Coordinator,
    codec: LinkCodec<L>,
    pilot: Box<dyn Pilot>,
    renderer: HeadlessRenderer,
    sampler: EdgeSampler,
    cadence: Cadence,
    rng: SmallRng,
    ticks: u64,
    stats: PeerStats,
}

impl<L: Link> PeerNode<L> {
    pub fn new(
        name: impl Into<String>,
        coordinator: Coordinator,
        link: L,
        pilot: Box<dyn Pilot>,
        seed: u64,
    ) -> Self {
        let name = name.into();
        Self {
            renderer: HeadlessRenderer::new(name.clone()),
            name,
            coordinator,
            codec: LinkCodec::new(link),
            pilot,
            sampler: EdgeSampler::new(),
            cadence: Cadence::default(),
            rng: SmallRng::seed_from_u64(seed),
            ticks: 0,
            stats: PeerStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    pub fn phase(&self) -> Phase {
        self.coordinator.phase()
    }

    pub fn link(&mut self) -> &mut L {
        self.codec.link_mut()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stats(&self) -> &PeerStats {
        &self.stats
    }

    pub fn led_level(&self) -> bool {
        self.renderer.led_level()
    }

    /// Run one scheduler tick: sample the pilot's keys when a sample is due,
    /// then hand everything to the coordinator.
    pub fn step(&mut self) -> TickReport {
        self.ticks += 1;
        let input = if self.cadence.ready() {
            let keys = self.pilot.keys(&mut self.rng, &self.coordinator.snapshot());
            self.sampler.sample(keys)
        } else {
            None
        };
        let report = self
            .coordinator
            .tick(input, &mut self.codec, &mut self.renderer);
        self.record(&report);
        report
    }

    fn record(&mut self, report: &TickReport) {
        for msg in &report.sent {
            if let Outbound::Strike(coord) = msg {
                self.stats.strikes_sent += 1;
                log::debug!("[{}] fires at {}", self.name, coord);
            }
        }
        for cue in &report.entered {
            match cue.phase {
                Phase::ResultGraphic if self.coordinator.last_result() == Some(StrikeResult::Hit) => {
                    self.stats.hits_scored += 1;
                }
                Phase::EndResult if self.coordinator.board().is_winner() => {
                    self.stats.games_won += 1;
                }
                Phase::EndResult => self.stats.games_lost += 1,
                _ => {}
            }
        }
    }

    /// Tick at `period` until this peer has finished `games` games and
    /// reached the restart prompt. Fails after `max_ticks` without that, or
    /// straight away for a zero `period`.
    pub async fn run(&mut self, period: Duration, games: u32, max_ticks: u64) -> anyhow::Result<()> {
        if period.is_zero() {
            anyhow::bail!("[{}] tick period must be non-zero", self.name);
        }
        let mut pacer = interval(period);
        pacer.set_missed_tick_behavior(MissedTickBehavior::Burst);
        while self.ticks < max_ticks {
            pacer.tick().await;
            self.step();
            if self.stats.games_completed() >= games && self.phase() == Phase::PlayAgain {
                return Ok(());
            }
        }
        Err(anyhow::anyhow!(
            "[{}] stuck in {:?} after {} ticks",
            self.name,
            self.phase(),
            self.ticks
        ))
    }
}

/// Options for a lock-step simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    /// Probability that any transmitted byte is lost.
    pub loss: f64,
    pub max_ticks: u64,
    pub games: u32,
    pub timing: Timing,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            loss: 0.0,
            max_ticks: 2_000_000,
            games: 1,
            timing: Timing::default(),
        }
    }
}

/// Per-peer section of a [`SimReport`].
#[derive(Debug, Clone, Serialize)]
pub struct PeerReport {
    pub name: String,
    pub phase: Phase,
    pub score: u8,
    pub bytes_dropped: u64,
    pub bytes_overwritten: u64,
    #[serde(flatten)]
    pub stats: PeerStats,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub seed: u64,
    pub ticks: u64,
    pub games_completed: u32,
    /// Name of the peer with more wins, if any.
    pub winner: Option<String>,
    /// The run hit `max_ticks` with a peer waiting on a byte that never came.
    pub stalled: bool,
    pub peers: [PeerReport; 2],
}

type SimLink = LossyLink<InMemoryLink>;

/// Two peers on an in-memory IR link, ticked together.
///
/// Peer "alpha" leads: it takes the first turn and asks for restarts. Peer
/// "bravo" only ever follows the link, so the two never race for the lead.
pub struct Simulation {
    config: SimConfig,
    alpha: PeerNode<SimLink>,
    bravo: PeerNode<SimLink>,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let (la, lb) = InMemoryLink::pair();
        let seed = config.seed;
        let alpha = PeerNode::new(
            "alpha",
            Coordinator::with_timing(config.timing),
            LossyLink::new(la, config.loss, seed ^ 0xA1),
            Box::new(AutoPilot::leader()),
            seed,
        );
        let bravo = PeerNode::new(
            "bravo",
            Coordinator::with_timing(config.timing),
            LossyLink::new(lb, config.loss, seed ^ 0xB2),
            Box::new(AutoPilot::follower()),
            seed.wrapping_add(1),
        );
        Self {
            config,
            alpha,
            bravo,
            ticks: 0,
        }
    }

    pub fn alpha(&self) -> &PeerNode<SimLink> {
        &self.alpha
    }

    pub fn bravo(&self) -> &PeerNode<SimLink> {
        &self.bravo
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Tick both peers once.
    pub fn step(&mut self) {
        self.ticks += 1;
        self.alpha.step();
        self.bravo.step();
    }

    fn finished(&self) -> bool {
        let done = |p: &PeerNode<SimLink>| {
            p.stats().games_completed() >= self.config.games && p.phase() == Phase::PlayAgain
        };
        done(&self.alpha) && done(&self.bravo)
    }

    /// Run until both peers finished the configured games or `max_ticks`.
    pub fn run(&mut self) -> SimReport {
        while !self.finished() && self.ticks < self.config.max_ticks {
            self.step();
        }
        let stalled = !self.finished();
        if stalled {
            log::warn!(
                "simulation stalled: alpha in {:?}, bravo in {:?}",
                self.alpha.phase(),
                self.bravo.phase()
            );
        }
        self.report(stalled)
    }

    fn report(&self, stalled: bool) -> SimReport {
        let peer = |p: &PeerNode<SimLink>| {
            let link = p.codec.link();
            PeerReport {
                name: p.name().to_string(),
                phase: p.phase(),
                score: p.coordinator().board().score(),
                bytes_dropped: link.dropped(),
                bytes_overwritten: link.inner().overwritten(),
                stats: p.stats().clone(),
            }
        };
        let (a, b) = (peer(&self.alpha), peer(&self.bravo));
        let winner = match a.stats.games_won.cmp(&b.stats.games_won) {
            std::cmp::Ordering::Greater => Some(a.name.clone()),
            std::cmp::Ordering::Less => Some(b.name.clone()),
            std::cmp::Ordering::Equal => None,
        };
        SimReport {
            seed: self.config.seed,
            ticks: self.ticks,
            games_completed: a.stats.games_completed().min(b.stats.games_completed()),
            winner,
            stalled,
            peers: [a, b],
        }
    }
}
