//! One game session: world state, timers and the Running → Won/Lost latch.
//!
//! The driver feeds time through `advance` (or `pump` with a `Clock`) and
//! calls `frame` once per display frame, in that order.  Both are no-ops
//! once the game has ended; only `reset` brings the session back.

use std::time::Duration;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{GameStatus, World};
use crate::input::InputState;
use crate::render::{render, OutcomeSink, ScoreSink, Surface};
use crate::timer::{Clock, Scheduler, TimerId, TimerKind};

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    world: World,
    status: GameStatus,
    scheduler: Scheduler,
    formation_timer: Option<TimerId>,
}

impl Session {
    /// Start a running session at time `now`, with the formation timer armed.
    pub fn new(config: GameConfig, now: Duration) -> Self {
        let world = compute::init_world(&config);
        Self::with_world(config, world, now)
    }

    /// Start a running session from an arbitrary world, e.g. a mid-game
    /// position.
    pub fn with_world(config: GameConfig, world: World, now: Duration) -> Self {
        let mut scheduler = Scheduler::new(now);
        let formation_timer =
            Some(scheduler.schedule_every(config.formation_period(), TimerKind::Formation));
        log::info!("Session started with {} enemies", world.enemies.len());
        Session {
            config,
            world,
            status: GameStatus::Running,
            scheduler,
            formation_timer,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Whether the periodic formation tick is still scheduled.
    pub fn formation_active(&self) -> bool {
        self.formation_timer
            .is_some_and(|id| self.scheduler.is_pending(id))
    }

    pub fn score(&self) -> u32 {
        self.world.score
    }

    /// `advance` driven by a clock.
    pub fn pump<C, O>(&mut self, clock: &C, outcome: &mut O)
    where
        C: Clock + ?Sized,
        O: OutcomeSink + ?Sized,
    {
        self.advance(clock.now(), outcome);
    }

    /// Run every timer expiry due up to `now`, oldest first.
    pub fn advance<O: OutcomeSink + ?Sized>(&mut self, now: Duration, outcome: &mut O) {
        while let Some(kind) = self.scheduler.pop_due(now) {
            match kind {
                TimerKind::Formation => self.formation_tick(outcome),
                TimerKind::FireRearm => self.world.can_shoot = true,
            }
        }
        self.scheduler.settle(now);
    }

    /// One display frame: update, then draw.  Returns whether the frame loop
    /// should keep going.  A frame that ends the game is still drawn.
    pub fn frame<P>(&mut self, input: &InputState, out: &mut P) -> bool
    where
        P: Surface + ScoreSink + OutcomeSink + ?Sized,
    {
        if !self.is_running() {
            return false;
        }
        self.update(input, out);
        render(out, &self.world);
        self.is_running()
    }

    /// Throw the current game away and start over at time `now`.
    pub fn reset<P>(&mut self, now: Duration, out: &mut P)
    where
        P: ScoreSink + OutcomeSink + ?Sized,
    {
        self.scheduler.cancel_all();
        self.scheduler.settle(now);
        self.world = compute::init_world(&self.config);
        self.status = GameStatus::Running;
        self.formation_timer = Some(
            self.scheduler
                .schedule_every(self.config.formation_period(), TimerKind::Formation),
        );
        out.show_score(self.world.score);
        out.hide_outcome();
        log::info!("Session reset");
    }

    fn update<P>(&mut self, input: &InputState, out: &mut P)
    where
        P: ScoreSink + OutcomeSink + ?Sized,
    {
        let mut world = compute::move_player(&self.world, input);

        if input.fire() && world.can_shoot {
            world = compute::player_shoot(&world, &self.config.bullet);
            self.scheduler
                .schedule_once(self.config.fire_cooldown(), TimerKind::FireRearm);
        }

        world = compute::advance_bullets(&world, self.config.bullet.speed);
        world = compute::resolve_collisions(&world, self.config.score_per_kill);

        let scored = world.score != self.world.score;
        self.world = world;
        if scored {
            out.show_score(self.world.score);
        }

        if self.world.enemies.is_empty() {
            self.finish(GameStatus::Won, out);
        }
    }

    fn formation_tick<O: OutcomeSink + ?Sized>(&mut self, outcome: &mut O) {
        if !self.is_running() {
            return;
        }
        let step = compute::advance_formation(&self.world, self.config.formation.descent_step);
        self.world = step.world;
        if step.hit_edge {
            log::debug!(
                "Formation hit edge, now moving {}",
                if self.world.formation.direction > 0.0 { "right" } else { "left" }
            );
        }
        if step.invaded {
            self.finish(GameStatus::Lost, outcome);
        }
    }

    /// Latch a terminal status.  Later calls are ignored.
    fn finish<O: OutcomeSink + ?Sized>(&mut self, status: GameStatus, outcome: &mut O) {
        if self.status.is_terminal() {
            return;
        }
        self.status = status;
        // Formation tick and any pending fire re-arm both stop here.
        self.formation_timer = None;
        self.scheduler.cancel_all();

        let message = status.message().unwrap_or_default();
        log::info!("{message} (score {})", self.world.score);
        outcome.show_outcome(status, message);
    }
}
