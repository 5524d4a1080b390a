//! Authoritative match state and the operations that mutate it
//!
//! `GameStore` is the single source of truth for a match. Simulation
//! components and the host read it through accessors and change it only
//! through the operations below. Nothing here returns an error: invalid ids
//! fall back or no-op, numeric inputs are clamped at the mutation boundary.

use std::collections::{HashMap, VecDeque};
use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::GameplayConfig;
use crate::content::{
    self, EnemyArchetype, GameMode, MapDefinition, Weapon, ARCHETYPES, DEFAULT_ENEMY_ID,
    FALLBACK_MAP_ID, FALLBACK_MODE_ID, MAPS, MODES, WEAPONS,
};

use super::bullets::{Bullet, BulletKey, BulletPool};
use super::combat::{CombatSystem, MAX_PLAYER_HEALTH};
use super::events::{BulletExpiry, EnemyDamage, GameEvent};
use super::phase::GamePhase;
use super::schedule::{DeferredAction, Scheduler};

/// Seconds between a start/restart and the `playing` phase
pub const LOADING_DELAY: f32 = 1.5;
/// Seconds between an elimination and its replacement spawn
pub const RESPAWN_DELAY: f32 = 5.0;
/// Enemies stand with their body centre this far above a spawn point
pub const ENEMY_CENTRE_HEIGHT: f32 = 1.0;
/// Half extent of the square used when a map has no enemy spawns
pub const FALLBACK_SPAWN_EXTENT: f32 = 10.0;
/// Weapons the player starts every match with; the first is equipped
pub const STARTING_LOADOUT: [&str; 2] = ["k5", "ak47"];

/// Undrained events kept; the oldest are dropped past this
pub const MAX_PENDING_EVENTS: usize = 4096;

const INITIAL_MAP_ID: &str = "downtown";

/// Player state in a match (authoritative)
#[derive(Debug, Clone)]
pub struct PlayerState {
    /// 0..=100
    pub health: u32,
    pub score: u32,
    pub kills: u32,
    pub deaths: u32,

    pub position: Vec3,
    /// (pitch, yaw, roll); roll is unused
    pub rotation: Vec3,

    pub current_weapon: &'static Weapon,
    pub weapons: Vec<&'static Weapon>,
    /// Rounds left per weapon id
    pub ammo: HashMap<&'static str, u32>,
    /// Match clock at the last shot
    pub last_shot_at: Option<f32>,
}

impl PlayerState {
    pub fn new(spawn: Vec3) -> Self {
        let weapons: Vec<&'static Weapon> = WEAPONS
            .iter()
            .filter(|w| STARTING_LOADOUT.contains(&w.id))
            .collect();
        let current_weapon = weapons.first().copied().unwrap_or(&WEAPONS[0]);
        let ammo = weapons.iter().map(|w| (w.id, w.max_ammo)).collect();

        Self {
            health: MAX_PLAYER_HEALTH,
            score: 0,
            kills: 0,
            deaths: 0,
            position: spawn,
            rotation: Vec3::ZERO,
            current_weapon,
            weapons,
            ammo,
            last_shot_at: None,
        }
    }

    /// Rounds left for a weapon; unknown weapons have none
    pub fn ammo_for(&self, weapon_id: &str) -> u32 {
        self.ammo.get(weapon_id).copied().unwrap_or(0)
    }

    pub fn current_ammo(&self) -> u32 {
        self.ammo_for(self.current_weapon.id)
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.x
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Enemy state in a match
#[derive(Debug, Clone)]
pub struct EnemyState {
    pub id: Uuid,
    pub archetype: &'static EnemyArchetype,
    pub health: u32,
    /// Archetype health at spawn, for health bars
    pub max_health: u32,
    pub position: Vec3,
    pub rotation: Vec3,
    pub is_active: bool,
    /// Match clock at the last attack
    pub last_attack_at: Option<f32>,
}

impl EnemyState {
    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }
}

/// The match store
pub struct GameStore {
    phase: GamePhase,
    map: &'static MapDefinition,
    mode: &'static GameMode,
    player: PlayerState,
    enemies: Vec<EnemyState>,
    bullets: BulletPool,
    /// Remaining time budget in seconds
    timer: f32,
    timer_expired: bool,
    /// Seconds since the current match was (re)started
    clock: f32,
    /// Bumped by start, restart and end
    epoch: u64,
    scheduler: Scheduler,
    rng: ChaCha8Rng,
    events: VecDeque<GameEvent>,
    gameplay: GameplayConfig,
}

impl GameStore {
    pub fn new(gameplay: GameplayConfig, seed: u64) -> Self {
        let map = resolve_map(INITIAL_MAP_ID);
        let mode = resolve_mode(FALLBACK_MODE_ID);

        Self {
            phase: GamePhase::Menu,
            map,
            mode,
            player: PlayerState::new(map.player_spawn),
            enemies: Vec::new(),
            bullets: BulletPool::new(),
            timer: 0.0,
            timer_expired: false,
            clock: 0.0,
            epoch: 0,
            scheduler: Scheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: VecDeque::new(),
            gameplay,
        }
    }

    // ---- reads -------------------------------------------------------------

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn map(&self) -> &'static MapDefinition {
        self.map
    }

    pub fn mode(&self) -> &'static GameMode {
        self.mode
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn enemies(&self) -> &[EnemyState] {
        &self.enemies
    }

    pub fn enemy(&self, id: Uuid) -> Option<&EnemyState> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn bullets(&self) -> &BulletPool {
        &self.bullets
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Hand over the events recorded since the last drain. Callers driving
    /// the store without `Simulation::tick` must drain regularly; only the
    /// newest `MAX_PENDING_EVENTS` are kept.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    fn record(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    // ---- match lifecycle ---------------------------------------------------

    /// Reset everything and begin loading a match. Unknown ids fall back to
    /// the training map and deathmatch mode. Any match in progress is
    /// discarded.
    pub fn start_game(&mut self, map_id: &str, mode_id: &str) {
        let map = resolve_map(map_id);
        let mode = resolve_mode(mode_id);
        self.reset_match(map, mode);
    }

    /// Same as `start_game` with the current map and mode
    pub fn restart_game(&mut self) {
        self.reset_match(self.map, self.mode);
    }

    pub fn pause_game(&mut self) {
        if self.transition(GamePhase::Paused) {
            info!("Game paused");
        }
    }

    pub fn resume_game(&mut self) {
        if self.transition(GamePhase::Playing) {
            info!("Game resumed");
        }
    }

    /// Enter `gameOver`. Enemies and bullets stay until the next start;
    /// pending deferred tasks are invalidated.
    pub fn end_game(&mut self) {
        if self.transition(GamePhase::GameOver) {
            self.bump_epoch();
            info!(
                score = self.player.score,
                kills = self.player.kills,
                deaths = self.player.deaths,
                "Game over"
            );
        }
    }

    fn reset_match(&mut self, map: &'static MapDefinition, mode: &'static GameMode) {
        self.bump_epoch();
        self.map = map;
        self.mode = mode;
        self.clock = 0.0;
        self.player = PlayerState::new(map.player_spawn);
        self.enemies.clear();
        self.bullets.clear();
        self.timer = mode.time_limit.unwrap_or(0.0);
        self.timer_expired = false;

        self.transition(GamePhase::Loading);
        self.record(GameEvent::MatchReset {
            map_id: map.id.to_string(),
            mode_id: mode.id.to_string(),
            epoch: self.epoch,
        });
        self.scheduler
            .schedule(self.clock, LOADING_DELAY, self.epoch, DeferredAction::BeginPlaying);

        info!(map = map.id, mode = mode.id, epoch = self.epoch, "Loading match");
    }

    fn bump_epoch(&mut self) {
        self.epoch += 1;
        self.scheduler.cancel_stale(self.epoch);
    }

    /// Apply a phase change. Out-of-table transitions are applied with a
    /// warning, or rejected when strict phases are configured.
    fn transition(&mut self, next: GamePhase) -> bool {
        let from = self.phase;
        if !from.can_transition_to(next) {
            if self.gameplay.strict_phases {
                warn!(?from, to = ?next, "Rejected phase transition");
                return false;
            }
            warn!(?from, to = ?next, "Unguarded phase transition");
        }

        if from != next {
            self.phase = next;
            self.record(GameEvent::PhaseChanged { from, to: next });
            debug!(?from, to = ?next, "Phase changed");
        }
        true
    }

    fn begin_playing(&mut self) {
        if !self.transition(GamePhase::Playing) {
            return;
        }
        info!(map = self.map.name, mode = self.mode.name, "Starting game");

        for _ in 0..self.mode.enemy_count.unwrap_or(0) {
            let position = self.random_enemy_spawn();
            self.spawn_enemy(DEFAULT_ENEMY_ID, position);
        }
    }

    // ---- clock and deferred work -------------------------------------------

    /// Advance the match clock and run deferred tasks that came due. The
    /// clock stands still outside `loading` and `playing`.
    pub fn advance_clock(&mut self, dt: f32) {
        if !self.phase.advances_clock() {
            return;
        }
        self.clock += dt;

        for task in self.scheduler.take_due(self.clock) {
            if task.epoch != self.epoch {
                debug!(task_epoch = task.epoch, epoch = self.epoch, "Dropping stale deferred task");
                continue;
            }

            match task.action {
                DeferredAction::BeginPlaying => self.begin_playing(),
                DeferredAction::RespawnEnemy { archetype } => {
                    if self.phase == GamePhase::Playing {
                        let position = self.random_enemy_spawn();
                        self.spawn_enemy(archetype, position);
                    }
                }
            }
        }
    }

    /// Queue a replacement `basic` enemy after the respawn delay.
    /// Returns the due instant on the match clock.
    pub fn schedule_enemy_respawn(&mut self) -> f32 {
        let due_at = self.clock + RESPAWN_DELAY;
        self.scheduler.schedule(
            self.clock,
            RESPAWN_DELAY,
            self.epoch,
            DeferredAction::RespawnEnemy {
                archetype: DEFAULT_ENEMY_ID,
            },
        );
        self.record(GameEvent::RespawnScheduled { due_at });
        due_at
    }

    /// Count the match timer down while playing. Only modes with a time
    /// limit count; expiry is reported once and does not end the match.
    pub fn tick_timer(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing || self.mode.time_limit.is_none() || self.timer_expired {
            return;
        }

        self.timer = (self.timer - dt).max(0.0);
        if self.timer <= 0.0 {
            self.timer_expired = true;
            self.record(GameEvent::TimerExpired);
            info!("Match timer expired");
        }
    }

    pub fn timer_expired(&self) -> bool {
        self.timer_expired
    }

    /// A random map enemy spawn lifted to body height, or a random point
    /// near the origin when the map defines none
    fn random_enemy_spawn(&mut self) -> Vec3 {
        let spawns = self.map.enemy_spawns;
        let ground = if spawns.is_empty() {
            Vec3::new(
                self.rng.gen_range(-FALLBACK_SPAWN_EXTENT..FALLBACK_SPAWN_EXTENT),
                0.0,
                self.rng.gen_range(-FALLBACK_SPAWN_EXTENT..FALLBACK_SPAWN_EXTENT),
            )
        } else {
            spawns[self.rng.gen_range(0..spawns.len())]
        };
        ground + Vec3::Y * ENEMY_CENTRE_HEIGHT
    }

    /// Uniform sample in [0, 1) from the match RNG
    pub(crate) fn random_unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    // ---- player ------------------------------------------------------------

    /// Overwrite the player position. Collision is the caller's concern.
    pub fn move_player(&mut self, x: f32, y: f32, z: f32) {
        self.player.position = Vec3::new(x, y, z);
    }

    /// Overwrite the player rotation as (pitch, yaw, roll)
    pub fn rotate_player(&mut self, x: f32, y: f32, z: f32) {
        self.player.rotation = Vec3::new(x, y, z);
    }

    /// Fire the current weapon along the player's yaw. Does nothing when the
    /// magazine is empty. Returns the new bullet id.
    pub fn shoot_weapon(&mut self) -> Option<Uuid> {
        let weapon = self.player.current_weapon;
        let ammo = self.player.ammo_for(weapon.id);

        if ammo == 0 {
            debug!(weapon = weapon.id, "Out of ammo");
            self.record(GameEvent::OutOfAmmo {
                weapon_id: weapon.id.to_string(),
            });
            return None;
        }

        if self.gameplay.enforce_fire_rate
            && !CombatSystem::can_fire(self.player.last_shot_at, self.clock, weapon.shot_interval())
        {
            return None;
        }

        let direction = CombatSystem::fire_direction(self.player.yaw());
        let bullet_id = self.create_bullet(
            self.player.position,
            direction,
            weapon.bullet_speed,
            weapon.damage,
            true,
        );

        let ammo_left = ammo - 1;
        self.player.ammo.insert(weapon.id, ammo_left);
        self.player.last_shot_at = Some(self.clock);
        self.record(GameEvent::ShotFired {
            bullet_id,
            weapon_id: weapon.id.to_string(),
            ammo_left,
        });
        debug!(weapon = weapon.name, ammo_left, "Shot fired");

        Some(bullet_id)
    }

    /// Refill the current weapon to its magazine size
    pub fn reload_weapon(&mut self) {
        let weapon = self.player.current_weapon;
        let previous = self.player.ammo.insert(weapon.id, weapon.max_ammo);

        if previous != Some(weapon.max_ammo) {
            self.record(GameEvent::Reloaded {
                weapon_id: weapon.id.to_string(),
                ammo: weapon.max_ammo,
            });
            debug!(weapon = weapon.name, "Reloaded");
        }
    }

    /// Equip an owned weapon. Unknown or unowned ids are ignored.
    pub fn switch_weapon(&mut self, weapon_id: &str) -> bool {
        let Some(weapon) = self.player.weapons.iter().copied().find(|w| w.id == weapon_id) else {
            debug!(weapon = weapon_id, "Weapon not available");
            return false;
        };

        if self.player.current_weapon.id != weapon.id {
            self.player.current_weapon = weapon;
            self.record(GameEvent::WeaponSwitched {
                weapon_id: weapon.id.to_string(),
            });
            debug!(weapon = weapon.name, "Switched weapon");
        }
        true
    }

    /// Damage the player, flooring health at 0. Reaching 0 counts one death;
    /// further damage while at 0 changes nothing.
    pub fn damage_player(&mut self, amount: u32) {
        if !self.player.is_alive() {
            return;
        }

        let (health, killed) = CombatSystem::apply_damage(self.player.health, amount);
        self.player.health = health;
        self.record(GameEvent::PlayerDamaged { amount, health });

        if killed {
            self.player.deaths += 1;
            self.record(GameEvent::PlayerDied {
                deaths: self.player.deaths,
            });
            info!(deaths = self.player.deaths, "Player died");
        }
    }

    /// Heal the player, capped at full health
    pub fn heal_player(&mut self, amount: u32) {
        let health = CombatSystem::apply_heal(self.player.health, amount);
        self.player.health = health;
        self.record(GameEvent::PlayerHealed { amount, health });
    }

    // ---- enemies -----------------------------------------------------------

    /// Add an active enemy at `position` facing a random direction. Unknown
    /// archetypes fall back to `basic`.
    pub fn spawn_enemy(&mut self, archetype_id: &str, position: Vec3) -> Uuid {
        let archetype = content::archetype(archetype_id).unwrap_or_else(|err| {
            warn!(error = %err, fallback = DEFAULT_ENEMY_ID, "Falling back to default archetype");
            content::archetype(DEFAULT_ENEMY_ID).unwrap_or(&ARCHETYPES[0])
        });

        let id = Uuid::new_v4();
        let yaw = self.rng.gen_range(0.0..TAU);
        self.enemies.push(EnemyState {
            id,
            archetype,
            health: archetype.health,
            max_health: archetype.health,
            position,
            rotation: Vec3::new(0.0, yaw, 0.0),
            is_active: true,
            last_attack_at: None,
        });

        self.record(GameEvent::EnemySpawned {
            enemy_id: id,
            archetype: archetype.id.to_string(),
            position,
        });
        debug!(enemy_id = %id, archetype = archetype.id, ?position, "Spawned enemy");
        id
    }

    /// Damage an enemy. At 0 health it is removed and the player gets the
    /// kill and its score in the same step.
    pub fn damage_enemy(&mut self, id: Uuid, amount: u32) -> EnemyDamage {
        let Some(index) = self.enemies.iter().position(|e| e.id == id) else {
            return EnemyDamage::Missing;
        };

        let enemy = &mut self.enemies[index];
        let (remaining, killed) = CombatSystem::apply_damage(enemy.health, amount);
        enemy.health = remaining;
        self.record(GameEvent::EnemyHit {
            enemy_id: id,
            damage: amount,
            remaining,
        });

        if !killed {
            return EnemyDamage::Wounded { remaining };
        }

        let enemy = self.enemies.remove(index);
        let score_awarded = self.gameplay.score_policy.score_for(enemy.archetype);
        self.player.score += score_awarded;
        self.player.kills += 1;

        self.record(GameEvent::EnemyEliminated {
            enemy_id: id,
            archetype: enemy.archetype.id.to_string(),
            score_awarded,
        });
        info!(enemy_id = %id, score = self.player.score, kills = self.player.kills, "Enemy eliminated");

        EnemyDamage::Eliminated { score_awarded }
    }

    /// Set an enemy's position and facing
    pub fn move_enemy(&mut self, id: Uuid, position: Vec3, yaw: f32) -> bool {
        match self.enemies.iter_mut().find(|e| e.id == id) {
            Some(enemy) => {
                enemy.position = position;
                enemy.rotation.y = yaw;
                true
            }
            None => false,
        }
    }

    /// Stamp an enemy's attack time with the match clock
    pub fn record_enemy_attack(&mut self, id: Uuid) -> bool {
        let now = self.clock;
        match self.enemies.iter_mut().find(|e| e.id == id) {
            Some(enemy) => {
                enemy.last_attack_at = Some(now);
                true
            }
            None => false,
        }
    }

    /// Record the outcome of an enemy attack
    pub fn report_enemy_attack(&mut self, enemy_id: Uuid, ranged: bool, landed: bool) {
        self.record(GameEvent::EnemyAttacked {
            enemy_id,
            ranged,
            landed,
        });
    }

    // ---- bullets -----------------------------------------------------------

    pub fn create_bullet(
        &mut self,
        position: Vec3,
        direction: Vec3,
        speed: f32,
        damage: u32,
        from_player: bool,
    ) -> Uuid {
        let bullet = Bullet::new(position, direction, speed, damage, from_player);
        let id = bullet.id;
        self.bullets.insert(bullet);
        id
    }

    /// Age and move a bullet. A bullet past its lifetime is removed and
    /// `None` is returned; otherwise a copy of the moved bullet.
    pub fn advance_bullet(&mut self, key: BulletKey, dt: f32) -> Option<Bullet> {
        let bullet = self.bullets.get_mut(key)?;
        if bullet.advance(dt) {
            return Some(bullet.clone());
        }
        self.expire_bullet(key, BulletExpiry::Lifetime);
        None
    }

    /// Remove a bullet from the live set
    pub fn expire_bullet(&mut self, key: BulletKey, cause: BulletExpiry) -> bool {
        match self.bullets.remove(key) {
            Some(bullet) => {
                self.record(GameEvent::BulletExpired {
                    bullet_id: bullet.id,
                    cause,
                });
                true
            }
            None => false,
        }
    }
}

fn resolve_map(id: &str) -> &'static MapDefinition {
    content::map(id).unwrap_or_else(|err| {
        warn!(error = %err, fallback = FALLBACK_MAP_ID, "Falling back to default map");
        content::map(FALLBACK_MAP_ID).unwrap_or(&MAPS[0])
    })
}

fn resolve_mode(id: &str) -> &'static GameMode {
    content::mode(id).unwrap_or_else(|err| {
        warn!(error = %err, fallback = FALLBACK_MODE_ID, "Falling back to default mode");
        content::mode(FALLBACK_MODE_ID).unwrap_or(&MODES[0])
    })
}
