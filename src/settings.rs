/// Game configuration constants.
///
/// Everything tunable lives here: resolutions, color thresholds, entity
/// parameters, pacing.  Values derived from the *current* resolution pair
/// (scale factors) live in `mapping::Geometry`, which is built from these
/// and passed explicitly to whoever needs it.

use std::time::Duration;

use image::Rgb;

use crate::vision::HsvRange;

// ── Pacing ────────────────────────────────────────────────────────────────────

/// Target tick period. ≈30 FPS — webcams rarely deliver faster anyway.
pub const TICK: Duration = Duration::from_millis(33);

// ── Resolutions ───────────────────────────────────────────────────────────────

/// Display (game-space) resolutions selectable from the options screen.
pub const DISPLAY_MODES: &[(u32, u32)] = &[(640, 480), (800, 600), (1024, 768)];

/// Index into `DISPLAY_MODES` used when none is requested.
pub const DEFAULT_MODE_INDEX: usize = 1;

pub const CAM_BASE_WIDTH: u32 = 640;
pub const CAM_BASE_HEIGHT: u32 = 480;

/// Display resolution → camera capture resolution.
const CAM_MODES: &[((u32, u32), (u32, u32))] = &[
    ((640, 480), (320, 240)),
    ((800, 600), (640, 480)),
    ((1024, 768), (1280, 720)),
];

/// Capture resolution for a display mode; unknown displays fall back to the
/// base camera resolution instead of failing.
pub fn camera_mode_for(display: (u32, u32)) -> (u32, u32) {
    CAM_MODES
        .iter()
        .find(|(d, _)| *d == display)
        .map(|(_, c)| *c)
        .unwrap_or((CAM_BASE_WIDTH, CAM_BASE_HEIGHT))
}

// ── Color tracking ────────────────────────────────────────────────────────────

/// Red straddles the hue-circle seam, so it needs BOTH ranges unioned.
/// Collapsing this to a single range silently loses half of all reds.
pub const RED_RANGES: [HsvRange; 2] = [
    HsvRange::new((0, 10), (100, 255), (100, 255)),
    HsvRange::new((170, 180), (100, 255), (100, 255)),
];

/// A blob must exceed this many pixels before it counts as a detection.
pub const MIN_BLOB_AREA: u32 = 100;

// ── Ship ──────────────────────────────────────────────────────────────────────

pub const SHIP_WIDTH: u32 = 50;
pub const SHIP_HEIGHT: u32 = 50;
/// Gap between the ship's bottom edge and the screen floor.
pub const SHIP_BOTTOM_MARGIN: u32 = 10;
/// Columns moved per keyboard nudge.
pub const SHIP_SPEED: i32 = 5;
pub const SHIP_MAX_HEALTH: i32 = 100;
pub const SHIP_FIRE_COOLDOWN_MS: u64 = 500;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: u32 = 40;
pub const ENEMY_HEIGHT: u32 = 40;
pub const ENEMY_SPEED: i32 = 2;
pub const ENEMY_MAX_HEALTH: i32 = 30;
/// Fixed enemy population, maintained across kills and bottom exits.
pub const ENEMY_COUNT: usize = 5;
pub const ENEMY_FIRE_COOLDOWN_MS: u64 = 1500;
/// Upper edge of the respawn band; the lower edge is a quarter of the
/// display height.
pub const SPAWN_BAND_TOP: i32 = 50;

// ── Shots ─────────────────────────────────────────────────────────────────────

pub const SHIP_SHOT_SIZE: (u32, u32) = (4, 15);
pub const ENEMY_SHOT_SIZE: (u32, u32) = (4, 10);
/// Rows traveled per tick, both directions.
pub const SHOT_SPEED: i32 = 10;
pub const SHIP_SHOT_DAMAGE: i32 = 30;
pub const ENEMY_SHOT_DAMAGE: i32 = 10;
/// Score awarded per enemy destroyed.
pub const KILL_REWARD: u32 = 10;

// ── Overlay palette ───────────────────────────────────────────────────────────

pub const C_SHIP: Rgb<u8> = Rgb([0, 0, 255]);
pub const C_ENEMY: Rgb<u8> = Rgb([255, 0, 0]);
pub const C_SHIP_SHOT: Rgb<u8> = Rgb([255, 255, 0]);
pub const C_ENEMY_SHOT: Rgb<u8> = Rgb([255, 0, 255]);
