/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus the geometry, the monotonic clock in milliseconds, and
/// an RNG handle where needed) and returns a brand-new `GameState`.  Side
/// effects are limited to the injected RNG, so tests drive everything with
/// a seeded generator and a hand-rolled clock.

use rand::Rng;

use crate::entities::{Enemy, GameState, GameStatus, Shot, ShotOwner, Ship, Sprite};
use crate::mapping::Geometry;
use crate::settings::{
    ENEMY_COUNT, ENEMY_FIRE_COOLDOWN_MS, ENEMY_HEIGHT, ENEMY_MAX_HEALTH, ENEMY_SHOT_DAMAGE,
    ENEMY_SHOT_SIZE, ENEMY_SPEED, ENEMY_WIDTH, KILL_REWARD, SHIP_BOTTOM_MARGIN,
    SHIP_FIRE_COOLDOWN_MS, SHIP_HEIGHT, SHIP_MAX_HEALTH, SHIP_SHOT_DAMAGE, SHIP_SHOT_SIZE,
    SHIP_SPEED, SHIP_WIDTH, SHOT_SPEED, SPAWN_BAND_TOP,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh enemy at a random spot in the top band.  Its fire clock starts
/// now, so it waits a full cooldown before its first shot.
fn spawn_enemy(geom: &Geometry, now_ms: u64, rng: &mut impl Rng) -> Enemy {
    let max_x = (geom.display_width() as i32 - ENEMY_WIDTH as i32).max(1);
    let band_bottom = (geom.display_height() as i32 / 4).max(SPAWN_BAND_TOP + 1);
    Enemy {
        x: rng.gen_range(0..max_x),
        y: rng.gen_range(SPAWN_BAND_TOP..band_bottom),
        speed: ENEMY_SPEED,
        health: ENEMY_MAX_HEALTH,
        last_shot_ms: now_ms,
    }
}

/// Build the initial round state: ship centered on the floor, the full
/// enemy population in the top band, score zeroed.
pub fn init_state(geom: &Geometry, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let display_h = geom.display_height() as i32;
    GameState {
        ship: Ship {
            x: geom.display_width() as i32 / 2,
            y: display_h - SHIP_BOTTOM_MARGIN as i32 - SHIP_HEIGHT as i32,
            speed: SHIP_SPEED,
            health: SHIP_MAX_HEALTH,
        },
        enemies: (0..ENEMY_COUNT)
            .map(|_| spawn_enemy(geom, now_ms, rng))
            .collect(),
        shots: Vec::new(),
        score: 0,
        high_score: 0,
        status: GameStatus::Playing,
        last_ship_shot_ms: now_ms,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Steer the ship toward a target center column.  The target may come from
/// the tracker or a keyboard nudge and can be wildly out of range; the ship
/// center always ends up within [half-width, display-width − half-width].
pub fn steer_ship(state: &GameState, target_x: i32, geom: &Geometry) -> GameState {
    let half = (SHIP_WIDTH / 2) as i32;
    let x = target_x.clamp(half, geom.display_width() as i32 - half);
    GameState {
        ship: Ship { x, ..state.ship.clone() },
        ..state.clone()
    }
}

/// Keyboard fallback: shift the ship by its speed in the given direction.
pub fn nudge_ship(state: &GameState, direction: i32, geom: &Geometry) -> GameState {
    steer_ship(state, state.ship.x + direction.signum() * state.ship.speed, geom)
}

// ── Per-frame tick ──────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  A no-op after game over — entity
/// updates stay frozen until the next round starts.
pub fn tick(state: &GameState, geom: &Geometry, now_ms: u64, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let display_h = geom.display_height() as i32;

    // ── 1. Ship auto-fire on its cooldown ────────────────────────────────────
    let mut shots = state.shots.clone();
    let mut last_ship_shot_ms = state.last_ship_shot_ms;
    if now_ms.saturating_sub(last_ship_shot_ms) >= SHIP_FIRE_COOLDOWN_MS {
        last_ship_shot_ms = now_ms;
        shots.push(Shot {
            x: state.ship.x - (SHIP_SHOT_SIZE.0 / 2) as i32,
            y: state.ship.y - SHIP_SHOT_SIZE.1 as i32,
            owner: ShotOwner::Ship,
        });
    }

    // ── 2. Advance shots, drop those that leave the play area ────────────────
    let mut shots: Vec<Shot> = shots
        .iter()
        .filter_map(|s| {
            let new_y = match s.owner {
                ShotOwner::Ship => s.y - SHOT_SPEED,
                ShotOwner::Enemy => s.y + SHOT_SPEED,
            };
            let height = s.size().1 as i32;
            if new_y + height < 0 || new_y > display_h {
                None
            } else {
                Some(Shot { y: new_y, ..s.clone() })
            }
        })
        .collect();

    // ── 3. Enemies descend; bottom exits respawn in the top band ─────────────
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            let moved = Enemy { y: e.y + e.speed, ..e.clone() };
            if moved.y > display_h {
                spawn_enemy(geom, now_ms, rng)
            } else {
                moved
            }
        })
        .collect();

    // ── 4. Enemy fire on per-enemy cooldowns ─────────────────────────────────
    for enemy in enemies.iter_mut() {
        if now_ms.saturating_sub(enemy.last_shot_ms) >= ENEMY_FIRE_COOLDOWN_MS {
            enemy.last_shot_ms = now_ms;
            shots.push(Shot {
                x: enemy.x + (ENEMY_WIDTH / 2) as i32 - (ENEMY_SHOT_SIZE.0 / 2) as i32,
                y: enemy.y + ENEMY_HEIGHT as i32,
                owner: ShotOwner::Enemy,
            });
        }
    }

    // ── 5. Collision: ship ↔ enemy ends the round ────────────────────────────
    let ship_rect = state.ship.rect();
    let mut status = GameStatus::Playing;
    if enemies.iter().any(|e| e.rect().intersects(&ship_rect)) {
        status = GameStatus::GameOver;
    }

    // ── 6. Collision: ship shots ↔ enemies ───────────────────────────────────
    let mut used_shots: Vec<usize> = Vec::new();
    for (si, shot) in shots.iter().enumerate() {
        if shot.owner != ShotOwner::Ship {
            continue;
        }
        let shot_rect = shot.rect();
        for enemy in enemies.iter_mut() {
            if enemy.health > 0 && shot_rect.intersects(&enemy.rect()) {
                enemy.health -= SHIP_SHOT_DAMAGE;
                used_shots.push(si);
                break;
            }
        }
    }

    // Destroyed enemies are replaced in the same tick — the population
    // never dips below the configured count.
    let mut score = state.score;
    for enemy in enemies.iter_mut() {
        if enemy.health <= 0 {
            score += KILL_REWARD;
            *enemy = spawn_enemy(geom, now_ms, rng);
        }
    }

    let shots: Vec<Shot> = shots
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_shots.contains(i))
        .map(|(_, s)| s.clone())
        .collect();

    // ── 7. Collision: enemy shots ↔ ship ─────────────────────────────────────
    let mut health = state.ship.health;
    let mut survivors: Vec<Shot> = Vec::with_capacity(shots.len());
    for shot in shots {
        if shot.owner == ShotOwner::Enemy && shot.rect().intersects(&ship_rect) {
            health -= ENEMY_SHOT_DAMAGE;
        } else {
            survivors.push(shot);
        }
    }
    if health <= 0 {
        status = GameStatus::GameOver;
    }

    GameState {
        ship: Ship { health, ..state.ship.clone() },
        enemies,
        shots: survivors,
        score,
        status,
        last_ship_shot_ms,
        ..state.clone()
    }
}
