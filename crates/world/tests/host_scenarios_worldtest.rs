//! End-to-end scenarios driven through the simulation host.

use emberwild_core::{ItemKind, ToolKind};
use emberwild_world::{
    ActionError, Clock, ConsumeOutcome, CraftOutcome, EntityKind, GameSnapshot, HostConfig,
    InteractionOutcome, Inventory, PlayerPose, RecipeId, SimEvent, SimulationHost, SurvivalTuning,
    World, WorldEntity,
};
use glam::Vec3;

fn host_with(snapshot: GameSnapshot, world: World) -> SimulationHost {
    SimulationHost::new(
        snapshot,
        world,
        SurvivalTuning::default(),
        HostConfig::default(),
    )
}

fn snapshot_with(items: &[(ItemKind, u32)]) -> GameSnapshot {
    let mut snapshot = GameSnapshot::new();
    snapshot.inventory = Inventory::with_items(items.iter().copied()).unwrap();
    snapshot
}

fn low_pose(direction: Vec3) -> PlayerPose {
    PlayerPose {
        position: Vec3::new(0.0, 0.5, 0.0),
        view_direction: direction.normalize(),
    }
}

#[test]
fn campfire_is_placed_ahead_and_warms_the_player() {
    let mut snapshot = snapshot_with(&[(ItemKind::Wood, 3), (ItemKind::FlintStone, 1)]);
    snapshot.stats.temperature = 40.0;
    let mut host = host_with(snapshot, World::default());

    let outcome = host.craft(RecipeId::Campfire).expect("ingredients present");
    let CraftOutcome::Campfire { position, .. } = outcome else {
        panic!("expected a placed campfire, got {outcome:?}");
    };
    assert!((position - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    assert!(host.snapshot().inventory.is_empty());

    host.advance(1.0);
    assert!(host.warming());
    assert!(host.snapshot().stats.temperature > 40.0);

    let events = host.drain_events();
    assert!(events
        .iter()
        .any(|event| matches!(event, SimEvent::CampfirePlaced { .. })));
}

#[test]
fn crafting_without_ingredients_is_rejected_untouched() {
    let snapshot = snapshot_with(&[(ItemKind::Wood, 2)]);
    let mut host = host_with(snapshot, World::default());
    let before = host.snapshot().inventory.clone();

    let err = host.craft(RecipeId::Campfire).unwrap_err();
    assert_eq!(
        err,
        ActionError::MissingIngredients {
            missing: "1 Wood, 1 Flint Stone".into()
        }
    );
    assert_eq!(host.snapshot().inventory, before);
    assert!(host.snapshot().campfires.is_empty());
    assert_eq!(host.notifications().len(), 1);
}

#[test]
fn time_wraps_at_midnight_and_rolls_the_day() {
    let mut snapshot = GameSnapshot::new();
    snapshot.clock = Clock::new(1, 2399);
    let mut host = host_with(snapshot, World::default());

    host.advance(1.0);
    assert_eq!(host.snapshot().clock, Clock::new(2, 0));
    assert!(host.snapshot().clock.is_night());
    assert!(host
        .drain_events()
        .contains(&SimEvent::DayRolled { day: 2 }));
}

#[test]
fn critical_hunger_costs_health() {
    let mut snapshot = GameSnapshot::new();
    snapshot.stats.hunger = 3.0;
    let mut host = host_with(snapshot, World::default());

    host.advance(1.0);
    let stats = host.snapshot().stats;
    assert!((stats.hunger - 2.9).abs() < 1e-4);
    assert!((stats.health - 99.5).abs() < 1e-4);
}

#[test]
fn water_fills_the_waterskin_then_it_can_be_drunk() {
    let mut snapshot = snapshot_with(&[(ItemKind::Waterskin, 1), (ItemKind::Wood, 2)]);
    snapshot.stats.thirst = 30.0;
    let world = World::new(vec![WorldEntity::new(7, EntityKind::WaterSource, 0.0, 4.0)]);
    let mut host = host_with(snapshot, world);
    host.set_pose(low_pose(Vec3::new(0.0, -0.1, 1.0)));

    let outcome = host.interact().expect("water in front");
    assert_eq!(outcome, InteractionOutcome::FilledWaterskin { thirst: 20.0 });
    assert!((host.snapshot().stats.thirst - 50.0).abs() < 1e-4);

    // A spare empty waterskin would leave the full one nowhere to go once drunk.
    assert_eq!(
        host.craft(RecipeId::Waterskin),
        Err(ActionError::StackFull(ItemKind::Waterskin))
    );
    assert_eq!(host.snapshot().inventory.count(ItemKind::Wood), 2);

    let full = host
        .snapshot()
        .inventory
        .find(ItemKind::FullWaterskin)
        .expect("waterskin filled")
        .id;
    let drank = host.consume(full).expect("drinkable");
    assert_eq!(drank, ConsumeOutcome::Drank { thirst: 40.0 });
    assert!((host.snapshot().stats.thirst - 90.0).abs() < 1e-4);
    assert_eq!(host.snapshot().inventory.count(ItemKind::Waterskin), 1);
    assert!(host.world().get(7).is_some_and(|entity| entity.visible));
}

#[test]
fn harvesting_depletes_and_retargets() {
    let world = World::new(vec![
        WorldEntity::new(1, EntityKind::Bush, 0.0, 3.0),
        WorldEntity::new(2, EntityKind::Tree, 0.0, 6.0),
    ]);
    let mut host = host_with(GameSnapshot::new(), world);
    host.set_pose(low_pose(Vec3::Z));

    let first = host.interact().expect("bush in front");
    assert!(matches!(
        first,
        InteractionOutcome::Harvested { item: ItemKind::Berries, .. }
    ));
    let second = host.interact().expect("tree behind the bush");
    assert!(matches!(
        second,
        InteractionOutcome::Harvested { item: ItemKind::Wood, .. }
    ));
    assert_eq!(host.world().visible_count(), 0);
    assert_eq!(host.interact().unwrap_err(), ActionError::NothingInRange);
}

#[test]
fn death_blocks_actions_until_restart() {
    let mut snapshot = snapshot_with(&[(ItemKind::Wood, 5)]);
    snapshot.stats.health = 0.25;
    snapshot.stats.hunger = 0.0;
    snapshot.settings.autosave = false;
    let mut host = host_with(snapshot, World::default());

    host.advance(1.0);
    assert_eq!(host.snapshot().stats.health, 0.0);
    host.advance(1.0);
    assert!(host.snapshot().game_over);
    assert!(host
        .drain_events()
        .iter()
        .any(|event| matches!(event, SimEvent::GameOver { .. })));

    let frozen = host.snapshot().clone();
    host.advance(5.0);
    assert_eq!(host.snapshot().clock, frozen.clock);
    assert_eq!(
        host.craft(RecipeId::Waterskin).unwrap_err(),
        ActionError::GameOver
    );

    host.restart();
    assert!(!host.snapshot().game_over);
    assert!(host.snapshot().inventory.is_empty());
    assert!(!host.snapshot().settings.autosave);
}

#[test]
fn bow_toggles_and_gates_firing() {
    let snapshot = snapshot_with(&[(ItemKind::Bow, 1), (ItemKind::Arrow, 1)]);
    let mut host = host_with(snapshot, World::default());
    assert_eq!(host.fire().unwrap_err(), ActionError::NoRangedTool);

    let bow = host
        .snapshot()
        .inventory
        .find(ItemKind::Bow)
        .expect("bow carried")
        .id;
    assert_eq!(
        host.consume(bow).expect("toggle"),
        ConsumeOutcome::ToggledTool {
            tool: ToolKind::Bow,
            active: true
        }
    );
    host.fire().expect("armed");
    assert_eq!(host.snapshot().ammunition(), 0);
    assert_eq!(host.fire().unwrap_err(), ActionError::NoAmmunition);
}

#[test]
fn teardown_publishes_the_live_pose() {
    let mut host = host_with(GameSnapshot::new(), World::default());
    let pose = PlayerPose {
        position: Vec3::new(4.0, 1.6, -2.0),
        view_direction: Vec3::X,
    };
    host.set_pose(pose);
    let snapshot = host.teardown();
    assert_eq!(snapshot.pose, pose);
}
