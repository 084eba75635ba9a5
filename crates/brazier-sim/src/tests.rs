//! Tests for membership resolution, the brazier registry, bookkeeping,
//! and the activation pass.

use glam::Vec3;
use hecs::{Entity, World};

use brazier_core::components::{Bonfire, BurnContainer, DisplayName};
use brazier_core::config::{ControllerConfig, FeatureFlags};
use brazier_core::constants::{DEFAULT_WARMUP_SECS, FAST_WARMUP_SECS};
use brazier_core::enums::{BrazierKind, ModifiedState};
use brazier_core::types::{TerritoryId, TerritoryRange};

use crate::bookkeeping::ModifiedBraziers;
use crate::controller::ActivationController;
use crate::error::ActivationError;
use crate::systems::activation::{brazier_kind, is_proximity_name};
use crate::systems::membership::{resolve_candidates, Candidates, Resolution};
use crate::systems::registry::BrazierRegistry;
use crate::territory::ComponentTerritories;
use crate::world_setup::*;

const HOME: TerritoryId = TerritoryId(3);
const AWAY: TerritoryId = TerritoryId(4);

fn enabled(world: &World, brazier: Entity) -> bool {
    world.get::<&BurnContainer>(brazier).unwrap().enabled
}

fn warmup(world: &World, brazier: Entity) -> f32 {
    world.get::<&Bonfire>(brazier).unwrap().time_to_full_strength
}

fn set_warmup(world: &World, brazier: Entity, secs: f32) {
    world.get::<&mut Bonfire>(brazier).unwrap().time_to_full_strength = secs;
}

/// Clanless connected owner with a character at the origin of `HOME`.
fn solo_world() -> (World, Entity, Entity, Entity) {
    let mut world = World::new();
    let owner = spawn_user(&mut world, true);
    let character = spawn_character(&mut world, owner, Vec3::ZERO, Some(HOME)).unwrap();
    let heart = spawn_castle_heart(&mut world, Some(owner), HOME);
    (world, owner, character, heart)
}

fn resolve(world: &World, heart: Entity) -> Resolution {
    resolve_candidates(
        world,
        &ComponentTerritories::default(),
        &FeatureFlags::default(),
        HOME,
        heart,
    )
    .unwrap()
}

// ---- Membership ----

#[test]
fn test_solo_owner_on_territory_is_sole_candidate() {
    let (world, _owner, character, heart) = solo_world();
    assert_eq!(
        resolve(&world, heart),
        Resolution::Resolved(Candidates {
            entities: vec![character],
            proximity_enabled: true,
        })
    );
}

#[test]
fn test_solo_owner_disconnected_yields_none() {
    let (mut world, owner, _character, heart) = solo_world();
    set_connected(&mut world, owner, false).unwrap();
    assert_eq!(resolve(&world, heart), Resolution::Resolved(Candidates::none()));
}

#[test]
fn test_solo_owner_off_territory_yields_none() {
    let (mut world, _owner, character, heart) = solo_world();
    move_entity(&mut world, character, Vec3::ZERO, Some(AWAY)).unwrap();
    assert_eq!(resolve(&world, heart), Resolution::Resolved(Candidates::none()));
}

#[test]
fn test_solo_owner_without_character_yields_none() {
    let mut world = World::new();
    let owner = spawn_user(&mut world, true);
    let heart = spawn_castle_heart(&mut world, Some(owner), HOME);
    assert_eq!(resolve(&world, heart), Resolution::Resolved(Candidates::none()));
}

#[test]
fn test_unowned_heart_skips() {
    let mut world = World::new();
    let heart = spawn_castle_heart(&mut world, None, HOME);
    assert_eq!(resolve(&world, heart), Resolution::Skip);
}

#[test]
fn test_feature_off_skips() {
    let (world, _owner, _character, heart) = solo_world();
    let resolution = resolve_candidates(
        &world,
        &ComponentTerritories::default(),
        &FeatureFlags { solar: false },
        HOME,
        heart,
    )
    .unwrap();
    assert_eq!(resolution, Resolution::Skip);
}

#[test]
fn test_clan_members_in_roster_order() {
    let mut world = World::new();
    let a = spawn_user(&mut world, true);
    let b = spawn_user(&mut world, true);
    let c = spawn_user(&mut world, true);
    let char_a = spawn_character(&mut world, a, Vec3::ZERO, Some(HOME)).unwrap();
    let _char_b = spawn_character(&mut world, b, Vec3::ZERO, Some(AWAY)).unwrap();
    let char_c = spawn_character(&mut world, c, Vec3::ZERO, Some(HOME)).unwrap();
    spawn_clan(&mut world, &[c, b, a]).unwrap();
    let heart = spawn_castle_heart(&mut world, Some(a), HOME);

    assert_eq!(
        resolve(&world, heart),
        Resolution::Resolved(Candidates {
            entities: vec![char_c, char_a],
            proximity_enabled: true,
        })
    );
}

#[test]
fn test_clan_disconnected_member_on_territory_ignored() {
    let mut world = World::new();
    let owner = spawn_user(&mut world, true);
    let offline = spawn_user(&mut world, false);
    spawn_character(&mut world, owner, Vec3::ZERO, Some(AWAY)).unwrap();
    spawn_character(&mut world, offline, Vec3::ZERO, Some(HOME)).unwrap();
    spawn_clan(&mut world, &[owner, offline]).unwrap();
    let heart = spawn_castle_heart(&mut world, Some(owner), HOME);

    assert_eq!(resolve(&world, heart), Resolution::Resolved(Candidates::none()));
}

#[test]
fn test_clan_connected_elsewhere_yields_none() {
    let mut world = World::new();
    let a = spawn_user(&mut world, true);
    let b = spawn_user(&mut world, true);
    spawn_character(&mut world, a, Vec3::ZERO, Some(AWAY)).unwrap();
    spawn_character(&mut world, b, Vec3::ZERO, None).unwrap();
    spawn_clan(&mut world, &[a, b]).unwrap();
    let heart = spawn_castle_heart(&mut world, Some(a), HOME);

    assert_eq!(resolve(&world, heart), Resolution::Resolved(Candidates::none()));
}

#[test]
fn test_clan_owner_offline_member_online_counts() {
    let mut world = World::new();
    let owner = spawn_user(&mut world, false);
    let member = spawn_user(&mut world, true);
    spawn_character(&mut world, owner, Vec3::ZERO, Some(HOME)).unwrap();
    let member_char = spawn_character(&mut world, member, Vec3::ZERO, Some(HOME)).unwrap();
    spawn_clan(&mut world, &[owner, member]).unwrap();
    let heart = spawn_castle_heart(&mut world, Some(owner), HOME);

    assert_eq!(
        resolve(&world, heart),
        Resolution::Resolved(Candidates {
            entities: vec![member_char],
            proximity_enabled: true,
        })
    );
}

#[test]
fn test_missing_user_component_is_error() {
    let mut world = World::new();
    let not_a_user = world.spawn((DisplayName("rock".into()),));
    let heart = spawn_castle_heart(&mut world, Some(not_a_user), HOME);
    let err = resolve_candidates(
        &world,
        &ComponentTerritories::default(),
        &FeatureFlags::default(),
        HOME,
        heart,
    )
    .unwrap_err();
    assert!(matches!(err, ActivationError::MissingComponent { entity, .. } if entity == not_a_user));
}

// ---- Registry ----

#[test]
fn test_registry_filters_by_territory() {
    let mut world = World::new();
    let home = spawn_brazier(&mut world, "prox", Vec3::ZERO, HOME, false);
    spawn_brazier(&mut world, "prox", Vec3::ZERO, AWAY, false);
    world.spawn((DisplayName("not a brazier".into()),));

    let directory = ComponentTerritories::default();
    let mut registry = BrazierRegistry::new();
    let found: Vec<Entity> = registry.braziers_in(&world, &directory, HOME).collect();
    assert_eq!(found, vec![home]);
    assert_eq!(registry.pending(), 0);
}

#[test]
fn test_registry_releases_snapshot_on_early_stop() {
    let mut world = World::new();
    for i in 0..5 {
        spawn_brazier(&mut world, &format!("prox {i}"), Vec3::ZERO, HOME, false);
    }
    let directory = ComponentTerritories::default();
    let mut registry = BrazierRegistry::new();
    {
        let mut iter = registry.braziers_in(&world, &directory, HOME);
        assert!(iter.next().is_some());
    }
    assert_eq!(registry.pending(), 0, "Snapshot must be cleared when iteration stops early");
}

#[test]
fn test_registry_empty_territory() {
    let world = World::new();
    let directory = ComponentTerritories::default();
    let mut registry = BrazierRegistry::new();
    assert_eq!(registry.braziers_in(&world, &directory, HOME).count(), 0);
}

// ---- Bookkeeping ----

#[test]
fn test_bookkeeping_sized_from_range() {
    let modified = ModifiedBraziers::new(TerritoryRange::new(1, 10));
    for id in 1..=10 {
        assert_eq!(modified.len(TerritoryId(id)), 0);
    }
    assert_eq!(modified.total(), 0);
}

#[test]
fn test_bookkeeping_one_territory_per_brazier() {
    let mut world = World::new();
    let brazier = spawn_brazier(&mut world, "prox", Vec3::ZERO, HOME, false);
    let mut modified = ModifiedBraziers::new(TerritoryRange::default());

    assert!(modified.mark(HOME, brazier).unwrap());
    assert!(!modified.mark(HOME, brazier).unwrap());
    assert!(modified.mark(AWAY, brazier).unwrap());

    assert!(!modified.contains(HOME, brazier));
    assert!(modified.contains(AWAY, brazier));
    assert_eq!(modified.territory_of(brazier), Some(AWAY));
    assert_eq!(modified.total(), 1);
    assert_eq!(modified.state_of(brazier), ModifiedState::Modified);

    assert!(modified.release(AWAY, brazier).unwrap());
    assert_eq!(modified.state_of(brazier), ModifiedState::Default);
}

#[test]
fn test_bookkeeping_rejects_out_of_range() {
    let mut world = World::new();
    let brazier = spawn_brazier(&mut world, "prox", Vec3::ZERO, HOME, false);
    let mut modified = ModifiedBraziers::new(TerritoryRange::new(1, 2));
    assert!(matches!(
        modified.mark(HOME, brazier),
        Err(ActivationError::TerritoryOutOfRange { .. })
    ));
    assert_eq!(modified.total(), 0);
}

// ---- Name predicate ----

#[test]
fn test_proximity_name_is_case_insensitive() {
    assert!(is_proximity_name("Proximity hall", "prox"));
    assert!(is_proximity_name("GATE PROX", "prox"));
    assert!(is_proximity_name("approximate", "prox"));
    assert!(!is_proximity_name("Brazier", "prox"));
    assert!(!is_proximity_name("", "prox"));
    assert_eq!(brazier_kind("pRoX", "PROX"), BrazierKind::Proximity);
    assert_eq!(brazier_kind("kitchen", "prox"), BrazierKind::Plain);
}

// ---- Activation ----

#[test]
fn test_brazier_within_radius_lit_and_modified() {
    let (mut world, _owner, _character, heart) = solo_world();
    let brazier = spawn_brazier(&mut world, "prox", Vec3::new(15.0, 0.0, 0.0), HOME, false);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    let report = controller.apply(&world, HOME, heart).unwrap();

    assert!(enabled(&world, brazier));
    assert_eq!(warmup(&world, brazier), FAST_WARMUP_SECS);
    assert!(controller.modified().contains(HOME, brazier));
    assert_eq!(report.lit, 1);
    assert_eq!(report.entered_modified, 1);
    assert_eq!(report.evaluated, 1);
}

#[test]
fn test_radius_boundary_is_inclusive() {
    let (mut world, _owner, _character, heart) = solo_world();
    let at_edge = spawn_brazier(&mut world, "prox", Vec3::new(12.0, 0.0, 16.0), HOME, false);
    let past_edge = spawn_brazier(&mut world, "prox", Vec3::new(20.01, 0.0, 0.0), HOME, false);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    controller.apply(&world, HOME, heart).unwrap();

    assert!(enabled(&world, at_edge), "Exactly 20 units away should light");
    assert!(!enabled(&world, past_edge), "Past 20 units should stay dark");
    assert_eq!(controller.state_of(past_edge), ModifiedState::Default);
}

#[test]
fn test_height_difference_ignored() {
    let (mut world, _owner, character, heart) = solo_world();
    move_entity(&mut world, character, Vec3::new(0.0, 400.0, 0.0), Some(HOME)).unwrap();
    let brazier = spawn_brazier(&mut world, "prox", Vec3::new(10.0, 0.0, 0.0), HOME, false);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    controller.apply(&world, HOME, heart).unwrap();
    assert!(enabled(&world, brazier));
}

#[test]
fn test_second_pass_is_idempotent() {
    let (mut world, _owner, _character, heart) = solo_world();
    spawn_brazier(&mut world, "prox near", Vec3::new(5.0, 0.0, 5.0), HOME, false);
    spawn_brazier(&mut world, "prox far", Vec3::new(50.0, 0.0, 0.0), HOME, true);
    spawn_brazier(&mut world, "plain", Vec3::ZERO, HOME, true);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    let first = controller.apply(&world, HOME, heart).unwrap();
    let second = controller.apply(&world, HOME, heart).unwrap();

    assert_eq!(first.writes(), 4, "near lit + far doused, both entering modified");
    assert_eq!(second.writes(), 0);
    assert_eq!(second.evaluated, 3);
}

#[test]
fn test_second_flip_keeps_warmup() {
    let (mut world, _owner, character, heart) = solo_world();
    let brazier = spawn_brazier(&mut world, "prox", Vec3::new(10.0, 0.0, 0.0), HOME, false);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    controller.apply(&world, HOME, heart).unwrap();
    assert_eq!(warmup(&world, brazier), FAST_WARMUP_SECS);

    set_warmup(&world, brazier, 7.0);
    move_entity(&mut world, character, Vec3::new(100.0, 0.0, 0.0), Some(HOME)).unwrap();
    let report = controller.apply(&world, HOME, heart).unwrap();

    assert!(!enabled(&world, brazier));
    assert_eq!(warmup(&world, brazier), 7.0, "Warm-up only set on entering modified");
    assert_eq!(report.extinguished, 1);
    assert_eq!(report.entered_modified, 0);
}

#[test]
fn test_modified_brazier_stays_modified_after_returning_to_baseline() {
    let (mut world, _owner, character, heart) = solo_world();
    let brazier = spawn_brazier(&mut world, "prox", Vec3::new(10.0, 0.0, 0.0), HOME, false);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    controller.apply(&world, HOME, heart).unwrap();
    move_entity(&mut world, character, Vec3::new(100.0, 0.0, 0.0), Some(HOME)).unwrap();
    controller.apply(&world, HOME, heart).unwrap();

    assert!(!enabled(&world, brazier));
    assert_eq!(controller.state_of(brazier), ModifiedState::Modified);
    assert_eq!(warmup(&world, brazier), FAST_WARMUP_SECS);
}

#[test]
fn test_rename_reverts_regardless_of_flag() {
    let (mut world, _owner, _character, heart) = solo_world();
    let brazier = spawn_brazier(&mut world, "Prox Gate", Vec3::new(10.0, 0.0, 0.0), HOME, false);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    controller.apply(&world, HOME, heart).unwrap();
    assert!(enabled(&world, brazier));

    rename(&mut world, brazier, "Gate").unwrap();
    let report = controller.apply(&world, HOME, heart).unwrap();

    assert_eq!(report.reverted, 1);
    assert_eq!(warmup(&world, brazier), DEFAULT_WARMUP_SECS);
    assert!(enabled(&world, brazier), "Revert does not touch the enabled flag");
    assert!(!controller.modified().contains(HOME, brazier));
}

#[test]
fn test_plain_brazier_untouched() {
    let (mut world, _owner, _character, heart) = solo_world();
    let brazier = spawn_brazier(&mut world, "kitchen", Vec3::ZERO, HOME, false);
    set_warmup(&world, brazier, 3.0);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    let report = controller.apply(&world, HOME, heart).unwrap();

    assert_eq!(report.writes(), 0);
    assert!(!enabled(&world, brazier));
    assert_eq!(warmup(&world, brazier), 3.0);
}

#[test]
fn test_owner_disconnected_douses_proximity_braziers() {
    let (mut world, owner, _character, heart) = solo_world();
    let lit = spawn_brazier(&mut world, "prox", Vec3::ZERO, HOME, true);
    set_connected(&mut world, owner, false).unwrap();
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    let report = controller.apply(&world, HOME, heart).unwrap();

    assert!(!enabled(&world, lit));
    assert_eq!(report.extinguished, 1);
    assert_eq!(warmup(&world, lit), FAST_WARMUP_SECS);
}

#[test]
fn test_feature_off_writes_nothing() {
    let (mut world, owner, _character, heart) = solo_world();
    set_connected(&mut world, owner, false).unwrap();
    let lit = spawn_brazier(&mut world, "prox", Vec3::ZERO, HOME, true);
    let config = ControllerConfig {
        features: FeatureFlags { solar: false },
        ..Default::default()
    };
    let mut controller = ActivationController::from_config(config);

    let report = controller.apply(&world, HOME, heart).unwrap();

    assert!(report.skipped);
    assert_eq!(report.writes(), 0);
    assert!(enabled(&world, lit));
    assert_eq!(controller.modified().total(), 0);
}

#[test]
fn test_other_territory_braziers_untouched() {
    let (mut world, _owner, _character, heart) = solo_world();
    let away = spawn_brazier(&mut world, "prox", Vec3::ZERO, AWAY, false);
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    let report = controller.apply(&world, HOME, heart).unwrap();

    assert_eq!(report.evaluated, 0);
    assert!(!enabled(&world, away));
}

#[test]
fn test_out_of_range_territory_rejected() {
    let (mut world, _owner, _character, heart) = solo_world();
    let brazier = spawn_brazier(&mut world, "prox", Vec3::ZERO, HOME, false);
    let mut controller = ActivationController::new(
        ControllerConfig::default(),
        ComponentTerritories::new(TerritoryRange::new(10, 20)),
        FeatureFlags::default(),
    );

    let err = controller.apply(&world, HOME, heart).unwrap_err();
    assert!(matches!(err, ActivationError::TerritoryOutOfRange { territory, .. } if territory == HOME));
    assert!(!enabled(&world, brazier));
}

#[test]
fn test_brazier_without_name_is_error() {
    let (mut world, _owner, _character, heart) = solo_world();
    let brazier = spawn_brazier(&mut world, "prox", Vec3::ZERO, HOME, false);
    world.remove_one::<DisplayName>(brazier).unwrap();
    let mut controller = ActivationController::from_config(ControllerConfig::default());

    let err = controller.apply(&world, HOME, heart).unwrap_err();
    assert!(matches!(err, ActivationError::MissingComponent { entity, .. } if entity == brazier));
}

#[test]
fn test_custom_radius_and_marker() {
    let (mut world, _owner, _character, heart) = solo_world();
    let brazier = spawn_brazier(&mut world, "[auto] hall", Vec3::new(30.0, 0.0, 0.0), HOME, false);
    let config = ControllerConfig {
        proximity_radius: 35.0,
        name_marker: "[AUTO]".into(),
        fast_warmup_secs: 1.0,
        ..Default::default()
    };
    let mut controller = ActivationController::from_config(config);

    controller.apply(&world, HOME, heart).unwrap();

    assert!(enabled(&world, brazier));
    assert_eq!(warmup(&world, brazier), 1.0);
}
