//! Simulation host: the single writer of the game snapshot.
//!
//! Two fixed-rate schedules (survival and physics) are driven from one
//! `advance(real_dt)` call. Due ticks run to completion in timestamp order,
//! physics first when both fall on the same instant, so the snapshot is never
//! observed mid-update. Player input arrives as direct method calls between
//! frames.

use crate::advisory::{Advisor, AdvisoryConfig, AdvisoryRuntime};
use crate::campfire::nearest_lit;
use crate::crafting::{requirements, RecipeId, Requirements};
use crate::entity::World;
use crate::error::ActionError;
use crate::event::SimEvent;
use crate::interaction::{self, acquire_target, InteractionOutcome, InteractionTarget, FIRE_REACH};
use crate::inventory::ItemId;
use crate::notification::{NotificationQueue, DEFAULT_DURATION};
use crate::projectile::{ProjectileArena, ProjectileEvent, ProjectileId};
use crate::snapshot::{ConsumeOutcome, CraftOutcome, GameSnapshot, PlayerPose};
use crate::survival::SurvivalTuning;
use emberwild_core::{ItemKind, SimTick};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Schedule comparisons treat instants closer than this as equal.
const TIME_EPSILON: f64 = 1e-9;

/// Scheduling settings for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Seconds between survival ticks.
    pub survival_interval: f64,
    /// Physics ticks per second.
    pub physics_rate: u32,
    /// Seconds between pose publications into the snapshot.
    pub pose_publish_interval: f64,
    /// Seconds a notification stays on screen.
    pub notification_seconds: f32,
    /// Longest frame the host will simulate in one `advance` call.
    pub max_frame_delta: f64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            survival_interval: 1.0,
            physics_rate: 60,
            pose_publish_interval: 2.0,
            notification_seconds: DEFAULT_DURATION,
            max_frame_delta: 1.0,
        }
    }
}

impl HostConfig {
    /// Seconds per physics tick.
    pub fn physics_interval(&self) -> f64 {
        1.0 / f64::from(self.physics_rate.max(1))
    }
}

/// A fixed-rate tick source.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchedule {
    interval: f64,
    ticks: SimTick,
}

impl FixedSchedule {
    /// Schedule firing every `interval` seconds, first at `interval`.
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(TIME_EPSILON),
            ticks: SimTick::ZERO,
        }
    }

    /// Seconds between ticks.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Ticks fired so far.
    pub fn ticks(&self) -> SimTick {
        self.ticks
    }

    /// Host time at which the next tick is due.
    pub fn next_due(&self) -> f64 {
        (self.ticks.0 + 1) as f64 * self.interval
    }

    fn fire(&mut self) -> SimTick {
        self.ticks = self.ticks.advance(1);
        self.ticks
    }
}

/// Publishes the live pose into the snapshot on a coarse cadence.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseThrottle {
    interval: f64,
    next_publish: f64,
}

impl PoseThrottle {
    /// Throttle publishing every `interval` seconds.
    pub fn new(interval: f64) -> Self {
        let interval = interval.max(0.0);
        Self {
            interval,
            next_publish: interval,
        }
    }

    /// Check (and consume) a publication slot at `now`.
    pub fn should_publish(&mut self, now: f64) -> bool {
        if now + TIME_EPSILON < self.next_publish {
            return false;
        }
        while self.next_publish <= now + TIME_EPSILON {
            self.next_publish += self.interval.max(TIME_EPSILON);
        }
        true
    }
}

struct AdvisorySlot {
    runtime: AdvisoryRuntime,
    advisor: Box<dyn Advisor>,
}

enum Due {
    Physics,
    Survival,
}

/// Owner of the snapshot, the world and every live projectile.
pub struct SimulationHost {
    snapshot: GameSnapshot,
    world: World,
    projectiles: ProjectileArena,
    notifications: NotificationQueue,
    tuning: SurvivalTuning,
    config: HostConfig,
    live_pose: PlayerPose,
    now: f64,
    survival: FixedSchedule,
    physics: FixedSchedule,
    pose_throttle: PoseThrottle,
    warming: bool,
    target: Option<InteractionTarget>,
    events: Vec<SimEvent>,
    advisory: Option<AdvisorySlot>,
    latest_advice: Option<String>,
}

impl SimulationHost {
    /// Start hosting `snapshot` in `world`.
    pub fn new(
        mut snapshot: GameSnapshot,
        world: World,
        tuning: SurvivalTuning,
        config: HostConfig,
    ) -> Self {
        snapshot.normalize();
        let live_pose = snapshot.pose;
        info!(
            day = snapshot.clock.day,
            time = snapshot.clock.time,
            entities = world.entities().len(),
            "Simulation host started"
        );
        Self {
            survival: FixedSchedule::new(config.survival_interval),
            physics: FixedSchedule::new(config.physics_interval()),
            pose_throttle: PoseThrottle::new(config.pose_publish_interval),
            notifications: NotificationQueue::new(config.notification_seconds),
            projectiles: ProjectileArena::new(),
            live_pose,
            now: 0.0,
            warming: false,
            target: None,
            events: Vec::new(),
            advisory: None,
            latest_advice: None,
            snapshot,
            world,
            tuning,
            config,
        }
    }

    /// Attach an advisory collaborator.
    pub fn with_advisor(mut self, config: AdvisoryConfig, advisor: Box<dyn Advisor>) -> Self {
        self.advisory = Some(AdvisorySlot {
            runtime: AdvisoryRuntime::new(config),
            advisor,
        });
        self
    }

    /// Current snapshot (read-only).
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// World entities.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Live projectiles.
    pub fn projectiles(&self) -> &ProjectileArena {
        &self.projectiles
    }

    /// On-screen notifications.
    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Survival tuning in use.
    pub fn tuning(&self) -> &SurvivalTuning {
        &self.tuning
    }

    /// Standing near a lit fire as of the last survival tick.
    pub fn warming(&self) -> bool {
        self.warming
    }

    /// What the player is looking at, for the prompt UI.
    pub fn current_target(&self) -> Option<&InteractionTarget> {
        self.target.as_ref()
    }

    /// Most recent advisory text.
    pub fn latest_advice(&self) -> Option<&str> {
        self.latest_advice.as_deref()
    }

    /// Pose as last reported by the presentation layer.
    pub fn live_pose(&self) -> &PlayerPose {
        &self.live_pose
    }

    /// Host time in seconds.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Survival ticks run so far.
    pub fn survival_ticks(&self) -> SimTick {
        self.survival.ticks()
    }

    /// Physics ticks run so far.
    pub fn physics_ticks(&self) -> SimTick {
        self.physics.ticks()
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pure crafting query for the HUD.
    pub fn requirements(&self, recipe: RecipeId) -> Requirements {
        requirements(recipe, &self.snapshot.inventory)
    }

    /// Report the player's pose. It reaches the snapshot on the next publication slot.
    pub fn set_pose(&mut self, pose: PlayerPose) {
        let view_direction = pose
            .view_direction
            .try_normalize()
            .unwrap_or(self.live_pose.view_direction);
        self.live_pose = PlayerPose {
            position: pose.position,
            view_direction,
        };
    }

    /// Advance host time by `real_dt` seconds, running every tick that falls due.
    pub fn advance(&mut self, real_dt: f32) {
        let dt = if real_dt.is_finite() {
            f64::from(real_dt).clamp(0.0, self.config.max_frame_delta)
        } else {
            0.0
        };
        let target = self.now + dt;

        loop {
            let physics_at = self.physics.next_due();
            let survival_at = self.survival.next_due();
            let (at, due) = if physics_at <= survival_at + TIME_EPSILON {
                (physics_at, Due::Physics)
            } else {
                (survival_at, Due::Survival)
            };
            if at > target + TIME_EPSILON {
                break;
            }

            self.now = self.now.max(at);
            match due {
                Due::Physics => self.physics_tick(),
                Due::Survival => self.survival_tick(),
            }
            if self.pose_throttle.should_publish(self.now) {
                self.snapshot.pose = self.live_pose;
            }
        }

        self.now = target;
        self.notifications.update(dt as f32);
    }

    fn physics_tick(&mut self) {
        self.physics.fire();
        let dt = self.physics.interval() as f32;
        let events = self.projectiles.step(
            dt,
            &mut self.world,
            &mut self.snapshot,
            self.live_pose.position,
        );
        for event in events {
            self.record_projectile(event);
        }
        self.target = acquire_target(&self.world, &self.snapshot.campfires, &self.live_pose);
    }

    fn survival_tick(&mut self) {
        let tick = self.survival.fire();
        let outcome = self
            .snapshot
            .survival_tick(self.live_pose.position, &self.tuning);
        self.warming = outcome.report.warming;

        if outcome.entered_game_over {
            self.notifications.push("You died", "skull");
            self.events.push(SimEvent::GameOver {
                day: self.snapshot.clock.day,
                time: self.snapshot.clock.time,
            });
        }
        if outcome.report.day_wrapped {
            self.snapshot.clock.roll_day();
            info!(day = self.snapshot.clock.day, tick = tick.0, "New day");
            self.events.push(SimEvent::DayRolled {
                day: self.snapshot.clock.day,
            });
        }
        for id in outcome.extinguished {
            self.notifications.push("Campfire burned out", "campfire");
            self.events.push(SimEvent::CampfireExtinguished { id });
        }

        self.poll_advisor();
    }

    fn poll_advisor(&mut self) {
        if self.snapshot.game_over || !self.snapshot.settings.advisory_enabled {
            return;
        }
        let Some(slot) = self.advisory.as_mut() else {
            return;
        };
        if let Some(text) = slot
            .runtime
            .poll(&self.snapshot, self.warming, slot.advisor.as_mut())
        {
            self.latest_advice = Some(text.clone());
            self.events.push(SimEvent::Advisory { text });
        }
    }

    /// Act on whatever the player is looking at.
    pub fn interact(&mut self) -> Result<InteractionOutcome, ActionError> {
        let result = self.try_interact();
        let outcome = self.finish("interact", result)?;
        self.record_interaction(outcome);
        Ok(outcome)
    }

    fn try_interact(&mut self) -> Result<InteractionOutcome, ActionError> {
        self.snapshot.ensure_alive()?;
        self.target = acquire_target(&self.world, &self.snapshot.campfires, &self.live_pose);
        let target = self.target.ok_or(ActionError::NothingInRange)?;
        let outcome = interaction::interact(&mut self.snapshot, &mut self.world, &target)?;
        if matches!(outcome, InteractionOutcome::Harvested { .. }) {
            self.target =
                acquire_target(&self.world, &self.snapshot.campfires, &self.live_pose);
        }
        Ok(outcome)
    }

    /// Fire an arrow along the live view direction.
    pub fn fire(&mut self) -> Result<ProjectileId, ActionError> {
        let result = self.projectiles.fire(&mut self.snapshot, &self.live_pose);
        let id = self.finish("fire", result)?;
        self.events.push(SimEvent::Shot {
            projectile: id,
            ammunition: self.snapshot.ammunition(),
        });
        Ok(id)
    }

    /// Craft a recipe; campfires are placed ahead of the live pose.
    pub fn craft(&mut self, recipe: RecipeId) -> Result<CraftOutcome, ActionError> {
        let result = self.snapshot.craft(recipe, &self.live_pose, &self.tuning);
        let outcome = self.finish("craft", result)?;
        self.events.push(SimEvent::Crafted { recipe });
        match outcome {
            CraftOutcome::Item { kind, count } => {
                self.notifications.push(format!("+{count} {kind}"), kind.icon());
            }
            CraftOutcome::Campfire { id, position } => {
                self.notifications.push("Campfire placed", "campfire");
                self.events.push(SimEvent::CampfirePlaced {
                    id,
                    x: position.x,
                    z: position.z,
                });
            }
        }
        Ok(outcome)
    }

    /// Use an inventory item.
    pub fn consume(&mut self, id: ItemId) -> Result<ConsumeOutcome, ActionError> {
        let result = self.snapshot.consume(id);
        let outcome = self.finish("consume", result)?;
        match outcome {
            ConsumeOutcome::Ate { kind, .. } => {
                self.notifications.push(format!("Ate {kind}"), kind.icon());
                self.events.push(SimEvent::Consumed { item: kind });
            }
            ConsumeOutcome::Drank { .. } => {
                self.notifications
                    .push("Drank from waterskin", ItemKind::Waterskin.icon());
                self.events.push(SimEvent::Consumed {
                    item: ItemKind::FullWaterskin,
                });
            }
            ConsumeOutcome::ToggledTool { tool, active } => {
                let item = tool.item();
                let message = if active {
                    format!("{item} equipped")
                } else {
                    format!("{item} put away")
                };
                self.notifications.push(message, item.icon());
                self.events.push(SimEvent::ToolToggled { tool, active });
            }
            ConsumeOutcome::NoEffect => {}
        }
        Ok(outcome)
    }

    /// Cook at the nearest lit campfire within reach.
    pub fn cook(&mut self) -> Result<InteractionOutcome, ActionError> {
        let near_fire = nearest_lit(&self.snapshot.campfires, self.live_pose.position)
            .is_some_and(|(_, distance)| distance <= FIRE_REACH);
        let result = self
            .snapshot
            .ensure_alive()
            .and_then(|()| {
                if near_fire {
                    Ok(())
                } else {
                    Err(ActionError::NothingInRange)
                }
            })
            .and_then(|()| self.snapshot.cook())
            .map(|cooked| match cooked {
                Some((raw, cooked)) => InteractionOutcome::Cooked { raw, cooked },
                None => InteractionOutcome::NothingToCook,
            });
        let outcome = self.finish("cook", result)?;
        self.record_interaction(outcome);
        Ok(outcome)
    }

    /// Start over: fresh snapshot (keeping settings), no projectiles, every entity restored.
    pub fn restart(&mut self) {
        let settings = self.snapshot.settings.clone();
        self.snapshot = GameSnapshot::new();
        self.snapshot.settings = settings;
        self.live_pose = self.snapshot.pose;
        self.projectiles.clear();
        self.world.respawn_all();
        self.notifications.clear();
        self.warming = false;
        self.target = None;
        self.latest_advice = None;
        if let Some(slot) = self.advisory.as_mut() {
            slot.runtime.reset();
        }
        info!("Simulation restarted");
        self.events.push(SimEvent::Restarted);
    }

    /// Stop hosting and hand back the final snapshot with the live pose published.
    pub fn teardown(mut self) -> GameSnapshot {
        self.snapshot.pose = self.live_pose;
        info!(
            survival_ticks = self.survival.ticks().0,
            physics_ticks = self.physics.ticks().0,
            "Simulation host stopped"
        );
        self.snapshot
    }

    fn finish<T>(
        &mut self,
        action: &'static str,
        result: Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        result.map_err(|err| {
            debug!(action, %err, "Action rejected");
            self.notifications.push(err.to_string(), err.icon());
            self.events.push(SimEvent::Rejected {
                action,
                reason: err.to_string(),
            });
            err
        })
    }

    fn record_interaction(&mut self, outcome: InteractionOutcome) {
        match outcome {
            InteractionOutcome::Drank { thirst } => {
                self.notifications.push("Drank water", "water");
                self.events.push(SimEvent::Drank {
                    thirst,
                    filled_waterskin: false,
                });
            }
            InteractionOutcome::FilledWaterskin { thirst } => {
                self.notifications
                    .push("Waterskin filled", ItemKind::FullWaterskin.icon());
                self.events.push(SimEvent::Drank {
                    thirst,
                    filled_waterskin: true,
                });
            }
            InteractionOutcome::Cooked { raw, cooked } => {
                self.notifications.push(format!("+1 {cooked}"), cooked.icon());
                self.events.push(SimEvent::Cooked { raw, cooked });
            }
            InteractionOutcome::NothingToCook => {
                self.notifications.push("Nothing to cook", "campfire");
            }
            InteractionOutcome::Harvested { entity, kind, item } => {
                self.notifications.push(format!("+1 {item}"), item.icon());
                self.events.push(SimEvent::Harvested { entity, kind, item });
            }
        }
    }

    fn record_projectile(&mut self, event: ProjectileEvent) {
        match event {
            ProjectileEvent::StuckInEntity {
                id,
                entity,
                kind,
                harvested,
            } => {
                self.events.push(SimEvent::ArrowStuck {
                    projectile: id,
                    entity,
                });
                if let Some(item) = harvested {
                    self.notifications.push(format!("+1 {item}"), item.icon());
                    self.events.push(SimEvent::Harvested { entity, kind, item });
                }
            }
            ProjectileEvent::Grounded { id, .. } => {
                self.events.push(SimEvent::ArrowGrounded { projectile: id });
            }
            ProjectileEvent::Collected { id } => {
                self.notifications
                    .push(format!("+1 {}", ItemKind::Arrow), ItemKind::Arrow.icon());
                self.events.push(SimEvent::ArrowCollected { projectile: id });
            }
            ProjectileEvent::Expired { id } => debug!(id, "Projectile pruned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityKind, WorldEntity};
    use crate::time::Clock;
    use glam::Vec3;

    fn host(snapshot: GameSnapshot, world: World) -> SimulationHost {
        SimulationHost::new(
            snapshot,
            world,
            SurvivalTuning::default(),
            HostConfig::default(),
        )
    }

    fn run_frames(host: &mut SimulationHost, frames: u32) {
        for _ in 0..frames {
            host.advance(1.0 / 60.0);
        }
    }

    #[test]
    fn one_second_runs_sixty_physics_ticks_and_one_survival_tick() {
        let mut host = host(GameSnapshot::new(), World::default());
        run_frames(&mut host, 60);
        assert_eq!(host.physics_ticks(), SimTick(60));
        assert_eq!(host.survival_ticks(), SimTick(1));
        assert_eq!(host.snapshot().clock.time, 801);
    }

    #[test]
    fn large_frames_are_capped() {
        let mut host = host(GameSnapshot::new(), World::default());
        host.advance(30.0);
        assert_eq!(host.survival_ticks(), SimTick(1));
        host.advance(f32::NAN);
        assert_eq!(host.survival_ticks(), SimTick(1));
    }

    #[test]
    fn schedule_due_times_do_not_drift() {
        let mut schedule = FixedSchedule::new(1.0 / 60.0);
        for _ in 0..6000 {
            schedule.fire();
        }
        assert!((schedule.next_due() - 6001.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn pose_is_published_every_two_seconds() {
        let mut host = host(GameSnapshot::new(), World::default());
        let moved = PlayerPose {
            position: Vec3::new(5.0, 1.6, 5.0),
            view_direction: Vec3::X,
        };
        host.set_pose(moved);
        host.advance(1.0);
        assert_eq!(host.snapshot().pose, PlayerPose::default());
        host.advance(1.0);
        assert_eq!(host.snapshot().pose, moved);
    }

    #[test]
    fn midnight_rolls_the_day() {
        let mut snapshot = GameSnapshot::new();
        snapshot.clock = Clock::new(1, 2399);
        let mut host = host(snapshot, World::default());
        host.advance(1.0);

        assert_eq!(host.snapshot().clock, Clock::new(2, 0));
        assert!(host.drain_events().contains(&SimEvent::DayRolled { day: 2 }));
    }

    #[test]
    fn death_is_announced_once_and_blocks_actions() {
        let mut snapshot = GameSnapshot::new();
        snapshot.stats.health = 0.0;
        let mut host = host(snapshot, World::default());
        host.advance(1.0);
        host.advance(1.0);

        let deaths = host
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SimEvent::GameOver { .. }))
            .count();
        // Loading a dead snapshot already flags game over.
        assert_eq!(deaths, 0);
        assert!(host.snapshot().game_over);
        assert_eq!(host.interact(), Err(ActionError::GameOver));

        host.restart();
        assert!(!host.snapshot().game_over);
        assert_eq!(host.snapshot().stats.health, 100.0);
    }

    #[test]
    fn starving_player_dies_and_event_fires() {
        let mut snapshot = GameSnapshot::new();
        snapshot.stats.health = 0.4;
        snapshot.stats.hunger = 0.0;
        let mut host = host(snapshot, World::default());
        host.advance(1.0);
        host.advance(1.0);
        host.advance(1.0);

        let events = host.drain_events();
        let deaths = events
            .iter()
            .filter(|e| matches!(e, SimEvent::GameOver { .. }))
            .count();
        assert_eq!(deaths, 1);
        assert!(host.snapshot().game_over);
    }

    #[test]
    fn interact_harvests_what_the_player_faces() {
        let world = World::new(vec![WorldEntity::new(1, EntityKind::Tree, 3.0, 0.0)]);
        let mut host = host(GameSnapshot::new(), world);
        host.set_pose(PlayerPose {
            position: Vec3::new(0.0, 1.6, 0.0),
            view_direction: Vec3::X,
        });
        host.advance(1.0 / 60.0);
        assert!(host.current_target().is_some());

        host.interact().unwrap();
        assert_eq!(host.snapshot().inventory.count(ItemKind::Wood), 1);
        assert!(host.current_target().is_none());
        assert_eq!(host.notifications().iter().next().unwrap().message, "+1 Wood");
        assert!(matches!(
            host.drain_events()[..],
            [SimEvent::Harvested { entity: 1, .. }]
        ));
    }

    #[test]
    fn rejected_action_notifies_and_changes_nothing() {
        let mut host = host(GameSnapshot::new(), World::default());
        let before = host.snapshot().clone();
        assert_eq!(host.interact(), Err(ActionError::NothingInRange));
        assert_eq!(host.craft(RecipeId::Bow), Err(ActionError::MissingIngredients {
            missing: "3 Wood".into()
        }));
        assert_eq!(host.snapshot(), &before);
        assert_eq!(host.notifications().len(), 2);
        assert!(host
            .drain_events()
            .iter()
            .all(|e| matches!(e, SimEvent::Rejected { .. })));
    }

    #[test]
    fn campfire_warms_and_cooks() {
        let mut snapshot = GameSnapshot::new();
        snapshot.inventory = crate::inventory::Inventory::with_items([
            (ItemKind::Wood, 3),
            (ItemKind::FlintStone, 1),
            (ItemKind::RawMeat, 1),
        ]).unwrap();
        let mut host = host(snapshot, World::default());

        let CraftOutcome::Campfire { position, .. } = host.craft(RecipeId::Campfire).unwrap()
        else {
            panic!("expected campfire");
        };
        assert!((position - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
        host.advance(1.0);
        assert!(host.warming());

        let outcome = host.cook().unwrap();
        assert_eq!(
            outcome,
            InteractionOutcome::Cooked {
                raw: ItemKind::RawMeat,
                cooked: ItemKind::CookedMeat
            }
        );
        assert_eq!(host.cook().unwrap(), InteractionOutcome::NothingToCook);
    }

    #[test]
    fn cooking_needs_a_fire() {
        let mut snapshot = GameSnapshot::new();
        snapshot.inventory.collect(ItemKind::RawMeat).unwrap();
        let mut host = host(snapshot, World::default());
        assert_eq!(host.cook(), Err(ActionError::NothingInRange));
        assert_eq!(host.snapshot().inventory.count(ItemKind::RawMeat), 1);
    }

    #[test]
    fn shooting_and_recollecting_an_arrow() {
        let mut snapshot = GameSnapshot::new();
        snapshot.inventory.collect(ItemKind::Bow).unwrap();
        snapshot.inventory.add(ItemKind::Arrow, 2).unwrap();
        let mut host = host(snapshot, World::default());
        let bow = host.snapshot().inventory.find(ItemKind::Bow).unwrap().id;
        host.consume(bow).unwrap();

        host.set_pose(PlayerPose {
            position: Vec3::new(0.0, 1.6, 0.0),
            view_direction: Vec3::new(0.0, -1.0, 0.2),
        });
        host.fire().unwrap();
        assert_eq!(host.snapshot().ammunition(), 1);
        run_frames(&mut host, 5);

        assert_eq!(host.snapshot().ammunition(), 2);
        assert!(host.projectiles().is_empty());
        let names: Vec<&str> = host.drain_events().iter().map(SimEvent::name).collect();
        assert_eq!(
            names,
            vec!["tool_toggled", "shot", "arrow_grounded", "arrow_collected"]
        );
    }

    struct Fixed;

    impl Advisor for Fixed {
        fn advise(&mut self, _summary: &crate::advisory::SnapshotSummary) -> anyhow::Result<String> {
            Ok("Gather wood before dusk.".into())
        }
    }

    #[test]
    fn advisor_is_consulted_on_cadence() {
        let mut host = host(GameSnapshot::new(), World::default())
            .with_advisor(AdvisoryConfig::default(), Box::new(Fixed));
        for _ in 0..60 {
            host.advance(1.0);
        }
        assert_eq!(host.latest_advice(), Some("Gather wood before dusk."));
        let advisories = host
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, SimEvent::Advisory { .. }))
            .count();
        assert_eq!(advisories, 1);
    }

    #[test]
    fn teardown_publishes_live_pose() {
        let mut host = host(GameSnapshot::new(), World::default());
        let pose = PlayerPose {
            position: Vec3::new(-4.0, 1.6, 9.0),
            view_direction: Vec3::NEG_Z,
        };
        host.set_pose(pose);
        let snapshot = host.teardown();
        assert_eq!(snapshot.pose, pose);
    }
}
