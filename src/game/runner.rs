//! Match host and its fixed-rate frame loop

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::GameplayConfig;
use crate::util::time::{snapshot_interval, tick_delta, tick_duration};

use super::input::ControlInput;
use super::phase::GamePhase;
use super::rules::{EndReason, MatchRules};
use super::simulation::Simulation;
use super::snapshot::{MatchSnapshot, SnapshotBuilder};
use super::store::GameStore;

/// Operations collaborators may request between frames
#[derive(Debug, Clone, PartialEq)]
pub enum MatchCommand {
    Start { map_id: String, mode_id: String },
    Pause,
    Resume,
    End,
    Restart,
    SwitchWeapon(String),
    HealPlayer(u32),
    DamagePlayer(u32),
}

/// Messages into the runner
#[derive(Debug, Clone)]
pub enum RunnerMsg {
    /// Latched until the next input arrives
    Input(ControlInput),
    Command(MatchCommand),
    Shutdown,
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("Match runner has stopped")]
    Closed,
}

/// Final numbers of a runner
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub match_id: Uuid,
    pub frames: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,
    pub end_reason: Option<EndReason>,
}

/// Handle to a running match
#[derive(Clone)]
pub struct MatchHandle {
    pub id: Uuid,
    msg_tx: mpsc::Sender<RunnerMsg>,
    snapshot_tx: broadcast::Sender<MatchSnapshot>,
    latest: Arc<RwLock<Option<MatchSnapshot>>>,
}

impl MatchHandle {
    pub async fn send_input(&self, input: ControlInput) -> Result<(), RunnerError> {
        self.send(RunnerMsg::Input(input)).await
    }

    pub async fn command(&self, command: MatchCommand) -> Result<(), RunnerError> {
        self.send(RunnerMsg::Command(command)).await
    }

    pub async fn shutdown(&self) -> Result<(), RunnerError> {
        self.send(RunnerMsg::Shutdown).await
    }

    async fn send(&self, msg: RunnerMsg) -> Result<(), RunnerError> {
        self.msg_tx.send(msg).await.map_err(|_| RunnerError::Closed)
    }

    /// Snapshots from now on
    pub fn subscribe(&self) -> broadcast::Receiver<MatchSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Most recent snapshot, for observers that poll
    pub fn latest(&self) -> Option<MatchSnapshot> {
        self.latest.read().clone()
    }
}

/// Owns one match and drives it
pub struct MatchRunner {
    id: Uuid,
    store: GameStore,
    simulation: Simulation,
    input: ControlInput,
    msg_rx: mpsc::Receiver<RunnerMsg>,
    snapshot_tx: broadcast::Sender<MatchSnapshot>,
    snapshot_builder: SnapshotBuilder,
    latest: Arc<RwLock<Option<MatchSnapshot>>>,
    tick_rate: u32,
    auto_end: bool,
    end_reason: Option<EndReason>,
}

impl MatchRunner {
    pub fn new(
        id: Uuid,
        seed: u64,
        gameplay: GameplayConfig,
        tick_rate: u32,
        snapshot_rate: u32,
    ) -> (Self, MatchHandle) {
        let (msg_tx, msg_rx) = mpsc::channel(256);
        let (snapshot_tx, _) = broadcast::channel(64);
        let latest = Arc::new(RwLock::new(None));

        let handle = MatchHandle {
            id,
            msg_tx,
            snapshot_tx: snapshot_tx.clone(),
            latest: latest.clone(),
        };

        let runner = Self {
            id,
            store: GameStore::new(gameplay, seed),
            simulation: Simulation::new(),
            input: ControlInput::default(),
            msg_rx,
            snapshot_tx,
            snapshot_builder: SnapshotBuilder::new(snapshot_interval(tick_rate, snapshot_rate)),
            latest,
            tick_rate,
            auto_end: gameplay.auto_end,
            end_reason: None,
        };

        (runner, handle)
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Run the frame loop until shutdown or until every handle is dropped
    pub async fn run(mut self) -> RunSummary {
        info!(match_id = %self.id, tick_rate = self.tick_rate, "Match runner started");

        let dt = tick_delta(self.tick_rate);
        let mut frame_interval = interval(tick_duration(self.tick_rate));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            frame_interval.tick().await;

            if !self.process_messages() {
                break;
            }
            self.step(dt);
        }

        let summary = self.summary();
        info!(
            match_id = %self.id,
            frames = summary.frames,
            score = summary.score,
            kills = summary.kills,
            "Match runner stopped"
        );
        summary
    }

    /// Drain the message queue. Returns false once the runner should stop.
    pub fn process_messages(&mut self) -> bool {
        loop {
            match self.msg_rx.try_recv() {
                Ok(RunnerMsg::Input(input)) => self.input = input,
                Ok(RunnerMsg::Command(command)) => self.apply(command),
                Ok(RunnerMsg::Shutdown) => return false,
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => {
                    debug!(match_id = %self.id, "All handles dropped");
                    return false;
                }
            }
        }
    }

    fn apply(&mut self, command: MatchCommand) {
        debug!(match_id = %self.id, ?command, "Applying command");
        match command {
            MatchCommand::Start { map_id, mode_id } => {
                self.end_reason = None;
                self.input = ControlInput::default();
                self.store.start_game(&map_id, &mode_id);
            }
            MatchCommand::Restart => {
                self.end_reason = None;
                self.input = ControlInput::default();
                self.store.restart_game();
            }
            MatchCommand::Pause => self.store.pause_game(),
            MatchCommand::Resume => self.store.resume_game(),
            MatchCommand::End => self.store.end_game(),
            MatchCommand::SwitchWeapon(weapon_id) => {
                self.store.switch_weapon(&weapon_id);
            }
            MatchCommand::HealPlayer(amount) => self.store.heal_player(amount),
            MatchCommand::DamagePlayer(amount) => self.store.damage_player(amount),
        }
    }

    /// Run one frame and publish a snapshot when one is due
    pub fn step(&mut self, dt: f32) -> Option<MatchSnapshot> {
        let events = self.simulation.tick(&mut self.store, &self.input, dt);
        self.snapshot_builder.record(events);

        if self.auto_end {
            if let Some(reason) = MatchRules::evaluate(&self.store) {
                info!(match_id = %self.id, ?reason, "Ending match");
                self.end_reason = Some(reason);
                self.store.end_game();
                self.snapshot_builder.record(self.store.drain_events());
            }
        }

        if !self.snapshot_builder.should_send() {
            return None;
        }

        let snapshot = self.snapshot_builder.build(self.simulation.frame(), &self.store);
        *self.latest.write() = Some(snapshot.clone());
        // No subscribers is fine
        let _ = self.snapshot_tx.send(snapshot.clone());
        Some(snapshot)
    }

    pub fn summary(&self) -> RunSummary {
        let player = self.store.player();
        RunSummary {
            match_id: self.id,
            frames: self.simulation.frame(),
            phase: self.store.phase(),
            score: player.score,
            kills: player.kills,
            deaths: player.deaths,
            end_reason: self.end_reason,
        }
    }
}
