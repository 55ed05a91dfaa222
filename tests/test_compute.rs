use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use origami_invaders::compute::{init_state, nudge_ship, steer_ship, tick};
use origami_invaders::entities::{Enemy, GameState, GameStatus, Shot, ShotOwner, Sprite};
use origami_invaders::mapping::Geometry;
use origami_invaders::settings::{
    ENEMY_COUNT, ENEMY_MAX_HEALTH, ENEMY_SPEED, KILL_REWARD, SHIP_MAX_HEALTH, SHOT_SPEED,
};

fn geom() -> Geometry {
    Geometry::new(800, 600)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn base_state() -> GameState {
    init_state(&geom(), 0, &mut seeded_rng())
}

fn enemy_at(x: i32, y: i32) -> Enemy {
    Enemy {
        x,
        y,
        speed: ENEMY_SPEED,
        health: ENEMY_MAX_HEALTH,
        last_shot_ms: 0,
    }
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_ship_centered_on_the_floor() {
    let s = base_state();
    assert_eq!(s.ship.x, 400); // display width / 2
    assert_eq!(s.ship.y, 540); // 600 − margin − ship height
    assert_eq!(s.ship.health, SHIP_MAX_HEALTH);
}

#[test]
fn init_state_spawns_the_full_population_in_the_top_band() {
    let s = base_state();
    assert_eq!(s.enemies.len(), ENEMY_COUNT);
    for e in &s.enemies {
        assert!((50..150).contains(&e.y), "enemy outside the band: y={}", e.y);
        assert!((0..760).contains(&e.x));
        assert_eq!(e.health, ENEMY_MAX_HEALTH);
    }
}

#[test]
fn init_state_zeroes_score_and_shots() {
    let s = base_state();
    assert!(s.shots.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.status, GameStatus::Playing);
}

// ── steering & clamping ───────────────────────────────────────────────────────

#[test]
fn steer_moves_the_ship_to_an_in_range_target() {
    let s = base_state();
    let s2 = steer_ship(&s, 123, &geom());
    assert_eq!(s2.ship.x, 123);
}

#[test]
fn steer_clamps_negative_targets() {
    let s = base_state();
    let s2 = steer_ship(&s, -5_000, &geom());
    assert_eq!(s2.ship.x, 25); // half ship width
}

#[test]
fn steer_clamps_oversized_targets() {
    let s = base_state();
    let s2 = steer_ship(&s, 5_000, &geom());
    assert_eq!(s2.ship.x, 775); // display width − half ship width
}

#[test]
fn steer_does_not_mutate_the_original() {
    let s = base_state();
    let _ = steer_ship(&s, 123, &geom());
    assert_eq!(s.ship.x, 400);
}

#[test]
fn nudge_moves_by_ship_speed_and_clamps() {
    let s = base_state();
    assert_eq!(nudge_ship(&s, -1, &geom()).ship.x, 395);
    assert_eq!(nudge_ship(&s, 1, &geom()).ship.x, 405);

    let mut near_edge = base_state();
    near_edge.ship.x = 27;
    assert_eq!(nudge_ship(&near_edge, -1, &geom()).ship.x, 25);
}

proptest! {
    #[test]
    fn ship_center_always_stays_clamped(target in -100_000i32..100_000) {
        let g = geom();
        let s = init_state(&g, 0, &mut seeded_rng());
        let s2 = steer_ship(&s, target, &g);
        prop_assert!((25..=775).contains(&s2.ship.x));
    }
}

// ── tick — freezing ───────────────────────────────────────────────────────────

#[test]
fn tick_is_a_noop_after_game_over() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 200)];
    s.status = GameStatus::GameOver;
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.enemies[0].y, 200); // no movement
    assert_eq!(s2.score, s.score);
    assert!(s2.shots.is_empty());
}

// ── tick — ship auto-fire ─────────────────────────────────────────────────────

#[test]
fn ship_fires_once_its_cooldown_elapses() {
    let s = base_state(); // last shot at t=0
    let s2 = tick(&s, &geom(), 500, &mut seeded_rng());
    let ship_shots: Vec<_> = s2.shots.iter().filter(|s| s.owner == ShotOwner::Ship).collect();
    assert_eq!(ship_shots.len(), 1);
    assert_eq!(s2.last_ship_shot_ms, 500);
}

#[test]
fn ship_holds_fire_inside_the_cooldown() {
    let s = base_state();
    let s2 = tick(&s, &geom(), 499, &mut seeded_rng());
    assert!(s2.shots.iter().all(|s| s.owner != ShotOwner::Ship));
    assert_eq!(s2.last_ship_shot_ms, 0);
}

// ── tick — shot movement & bounds ─────────────────────────────────────────────

#[test]
fn ship_shot_travels_up() {
    let mut s = base_state();
    s.shots.push(Shot { x: 398, y: 300, owner: ShotOwner::Ship });
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.shots.len(), 1);
    assert_eq!(s2.shots[0].y, 300 - SHOT_SPEED);
}

#[test]
fn enemy_shot_travels_down() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 60)];
    s.shots.push(Shot { x: 100, y: 300, owner: ShotOwner::Enemy });
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.shots.len(), 1);
    assert_eq!(s2.shots[0].y, 300 + SHOT_SPEED);
}

#[test]
fn shots_disappear_beyond_the_top_edge() {
    let mut s = base_state();
    // Fully above the screen after moving: dropped.  Still partially visible: kept.
    s.shots.push(Shot { x: 100, y: -6, owner: ShotOwner::Ship });
    s.shots.push(Shot { x: 200, y: 5, owner: ShotOwner::Ship });
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.shots.len(), 1);
    assert_eq!(s2.shots[0].x, 200);
}

#[test]
fn shots_disappear_beyond_the_bottom_edge() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 60)];
    s.shots.push(Shot { x: 100, y: 595, owner: ShotOwner::Enemy }); // moves past 600
    s.shots.push(Shot { x: 200, y: 585, owner: ShotOwner::Enemy });
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.shots.len(), 1);
    assert_eq!(s2.shots[0].x, 200);
}

// ── tick — enemy movement & respawn ───────────────────────────────────────────

#[test]
fn enemies_descend_each_tick() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 200)];
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.enemies[0].y, 200 + ENEMY_SPEED);
}

#[test]
fn enemy_leaving_the_bottom_respawns_in_the_top_band() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 599)]; // moves to 601, past the floor
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.enemies.len(), 1);
    assert!((50..150).contains(&s2.enemies[0].y));
    assert_eq!(s2.enemies[0].health, ENEMY_MAX_HEALTH);
}

#[test]
fn enemy_population_is_constant_across_many_ticks() {
    let g = geom();
    let mut rng = seeded_rng();
    let mut s = init_state(&g, 0, &mut rng);
    let mut now = 0u64;
    for _ in 0..1_000 {
        now += 33;
        s = tick(&s, &g, now, &mut rng);
        assert_eq!(s.enemies.len(), ENEMY_COUNT);
    }
}

// ── tick — enemy fire ─────────────────────────────────────────────────────────

#[test]
fn enemy_fires_once_its_cooldown_elapses() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 100)];
    let s2 = tick(&s, &geom(), 1_500, &mut seeded_rng());
    let enemy_shots: Vec<_> = s2.shots.iter().filter(|s| s.owner == ShotOwner::Enemy).collect();
    assert_eq!(enemy_shots.len(), 1);
    // Fired from the bottom center of the (already moved) enemy.
    assert_eq!(enemy_shots[0].x, 100 + 20 - 2);
    assert_eq!(enemy_shots[0].y, 102 + 40);
    assert_eq!(s2.enemies[0].last_shot_ms, 1_500);
}

#[test]
fn enemy_holds_fire_inside_the_cooldown() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 100)];
    let s2 = tick(&s, &geom(), 1_000, &mut seeded_rng());
    assert!(s2.shots.iter().all(|s| s.owner != ShotOwner::Enemy));
}

#[test]
fn enemy_does_not_double_fire_on_consecutive_ticks() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 100)];
    let g = geom();
    let mut rng = seeded_rng();
    let s2 = tick(&s, &g, 1_500, &mut rng);
    let s3 = tick(&s2, &g, 1_533, &mut rng);
    let enemy_shots = s3.shots.iter().filter(|s| s.owner == ShotOwner::Enemy).count();
    assert_eq!(enemy_shots, 1);
}

// ── tick — collisions ─────────────────────────────────────────────────────────

#[test]
fn ship_enemy_overlap_ends_the_round() {
    // Ship at x=400 on the 800-wide display; enemy box moving into its box.
    let mut s = base_state();
    s.enemies = vec![enemy_at(390, 530)];
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);

    // Entity updates stay frozen until restart.
    let s3 = tick(&s2, &geom(), 200, &mut seeded_rng());
    assert_eq!(s3.enemies[0].y, s2.enemies[0].y);
}

#[test]
fn ship_shot_destroys_the_enemy_and_scores() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 300)];
    s.shots.push(Shot { x: 110, y: 345, owner: ShotOwner::Ship }); // moves into the box
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());

    assert_eq!(s2.score, KILL_REWARD);
    assert!(s2.shots.iter().all(|s| s.owner != ShotOwner::Ship));
    // Population restored in the same tick, replacement back in the band.
    assert_eq!(s2.enemies.len(), 1);
    assert!((50..150).contains(&s2.enemies[0].y));
    assert_eq!(s2.enemies[0].health, ENEMY_MAX_HEALTH);
}

#[test]
fn ship_shot_missing_leaves_the_enemy_alone() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 300)];
    s.shots.push(Shot { x: 300, y: 345, owner: ShotOwner::Ship }); // wide of the box
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.score, 0);
    assert_eq!(s2.enemies[0].health, ENEMY_MAX_HEALTH);
    assert_eq!(s2.shots.len(), 1);
}

#[test]
fn enemy_shot_damages_the_ship() {
    let mut s = base_state();
    s.enemies = vec![enemy_at(100, 60)]; // out of the way
    s.shots.push(Shot { x: 400, y: 528, owner: ShotOwner::Enemy }); // moves into the hull
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.ship.health, SHIP_MAX_HEALTH - 10);
    assert!(s2.shots.is_empty());
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn hull_depletion_ends_the_round() {
    let mut s = base_state();
    s.ship.health = 10;
    s.enemies = vec![enemy_at(100, 60)];
    s.shots.push(Shot { x: 400, y: 528, owner: ShotOwner::Enemy });
    let s2 = tick(&s, &geom(), 100, &mut seeded_rng());
    assert_eq!(s2.ship.health, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
}

#[test]
fn ship_health_never_increases_during_play() {
    let g = geom();
    let mut rng = seeded_rng();
    let mut s = init_state(&g, 0, &mut rng);
    let mut now = 0u64;
    let mut last_health = s.ship.health;
    for _ in 0..1_000 {
        now += 33;
        s = tick(&s, &g, now, &mut rng);
        assert!(s.ship.health <= last_health);
        last_health = s.ship.health;
    }
}

// ── sprite capability sanity ──────────────────────────────────────────────────

#[test]
fn collision_boxes_follow_sprite_rects() {
    let s = base_state();
    let ship_rect = s.ship.rect();
    assert_eq!(ship_rect.x, 375);
    assert_eq!(ship_rect.y, 540);
    let enemy = enemy_at(390, 530);
    assert!(enemy.rect().intersects(&ship_rect));
}
