/// Game overlay compositing.
///
/// Sprites live in display space; the camera frame does not.  Each rect goes
/// through the reciprocal display→camera mapping before being stroked onto
/// the frame, so the overlay lines up with what the webcam sees no matter
/// which resolution pair is active.

use image::{Rgb, RgbImage};

use crate::entities::{GameState, Rect, Sprite};
use crate::mapping::Geometry;

fn put(frame: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    let (w, h) = frame.dimensions();
    if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
        frame.put_pixel(x as u32, y as u32, color);
    }
}

/// Stroke a rectangle outline, clamped to the frame bounds.
pub fn stroke_rect(frame: &mut RgbImage, rect: Rect, color: Rgb<u8>, thickness: u32) {
    for t in 0..thickness as i32 {
        let x0 = rect.x + t;
        let y0 = rect.y + t;
        let x1 = rect.right() - 1 - t;
        let y1 = rect.bottom() - 1 - t;
        if x0 > x1 || y0 > y1 {
            break;
        }
        for x in x0..=x1 {
            put(frame, x, y0, color);
            put(frame, x, y1, color);
        }
        for y in y0..=y1 {
            put(frame, x0, y, color);
            put(frame, x1, y, color);
        }
    }
}

/// Draw every live sprite onto the camera frame.
pub fn paint_sprites(frame: &mut RgbImage, state: &GameState, geom: &Geometry) {
    let mut draw = |rect: Rect, color: Rgb<u8>| {
        stroke_rect(frame, geom.display_rect_to_camera(rect), color, 2);
    };

    draw(state.ship.rect(), state.ship.color());
    for enemy in &state.enemies {
        draw(enemy.rect(), enemy.color());
    }
    for shot in &state.shots {
        draw(shot.rect(), shot.color());
    }
}
