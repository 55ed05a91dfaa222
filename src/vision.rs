/// Color-blob tracker.
///
/// Takes a mirrored camera frame and answers one question per tick: where is
/// the largest region of pixels matching the target hue ranges?  The pipeline
/// is HSV thresholding → mask union across ranges → connected-region labeling
/// → largest region by pixel area → first-moment centroid.

use image::{imageops, RgbImage};

/// One camera frame, RGB, at capture resolution.
pub type Frame = RgbImage;

// ── HSV thresholds ────────────────────────────────────────────────────────────

/// Inclusive HSV threshold box.  Hue is on the halved 0..=179 scale so the
/// conventional red thresholds (0–10 and 170–180) apply directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HsvRange {
    pub hue: (u8, u8),
    pub sat: (u8, u8),
    pub val: (u8, u8),
}

impl HsvRange {
    pub const fn new(hue: (u8, u8), sat: (u8, u8), val: (u8, u8)) -> Self {
        Self { hue, sat, val }
    }

    fn contains(&self, (h, s, v): (u8, u8, u8)) -> bool {
        self.hue.0 <= h
            && h <= self.hue.1
            && self.sat.0 <= s
            && s <= self.sat.1
            && self.val.0 <= v
            && v <= self.val.1
    }
}

/// Convert one RGB pixel to HSV with hue halved to 0..=179.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { 255.0 * delta / max };
    let h_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        // rem_euclid keeps magenta-side reds on the high end of the circle
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };

    (
        ((h_deg / 2.0).round()).min(179.0) as u8,
        s.round() as u8,
        v.round() as u8,
    )
}

// ── Blob extraction ───────────────────────────────────────────────────────────

/// A connected region of threshold-matching pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blob {
    /// Pixel count (the zeroth moment).
    pub area: u32,
    /// First-moment centroid, camera space.
    pub center_x: u32,
    pub center_y: u32,
}

/// Binary mask of pixels matching ANY of the ranges, row-major.
fn build_mask(frame: &Frame, ranges: &[HsvRange]) -> Vec<bool> {
    frame
        .pixels()
        .map(|p| {
            let hsv = rgb_to_hsv(p[0], p[1], p[2]);
            ranges.iter().any(|r| r.contains(hsv))
        })
        .collect()
}

/// Largest 4-connected region of matching pixels, or `None` when the mask is
/// empty.  Centroid division is guarded against a degenerate zero-area
/// region rather than trusted.
pub fn largest_blob(frame: &Frame, ranges: &[HsvRange]) -> Option<Blob> {
    let (w, h) = frame.dimensions();
    let mask = build_mask(frame, ranges);
    let mut seen = vec![false; mask.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut best: Option<(u32, u64, u64)> = None;

    for start in 0..mask.len() {
        if !mask[start] || seen[start] {
            continue;
        }

        let mut area: u32 = 0;
        let mut sum_x: u64 = 0;
        let mut sum_y: u64 = 0;
        seen[start] = true;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let x = idx as u32 % w;
            let y = idx as u32 / w;
            area += 1;
            sum_x += x as u64;
            sum_y += y as u64;

            if x > 0 {
                let n = idx - 1;
                if mask[n] && !seen[n] {
                    seen[n] = true;
                    stack.push(n);
                }
            }
            if x + 1 < w {
                let n = idx + 1;
                if mask[n] && !seen[n] {
                    seen[n] = true;
                    stack.push(n);
                }
            }
            if y > 0 {
                let n = idx - w as usize;
                if mask[n] && !seen[n] {
                    seen[n] = true;
                    stack.push(n);
                }
            }
            if y + 1 < h {
                let n = idx + w as usize;
                if mask[n] && !seen[n] {
                    seen[n] = true;
                    stack.push(n);
                }
            }
        }

        if best.map_or(true, |(a, _, _)| area > a) {
            best = Some((area, sum_x, sum_y));
        }
    }

    let (area, sum_x, sum_y) = best?;
    if area == 0 {
        return None;
    }
    Some(Blob {
        area,
        center_x: (sum_x / area as u64) as u32,
        center_y: (sum_y / area as u64) as u32,
    })
}

/// The tracker contract: centroid x of the largest sufficiently-large blob
/// matching any range, or `None`.  The area gate is strict — a blob exactly
/// at the threshold does not count.
pub fn detect(frame: &Frame, ranges: &[HsvRange], min_area: u32) -> Option<u32> {
    largest_blob(frame, ranges)
        .filter(|b| b.area > min_area)
        .map(|b| b.center_x)
}

/// Mirror the frame horizontally.  Applied at capture time, before
/// detection, so moving a hand left steers the ship left.
pub fn mirror(frame: &Frame) -> Frame {
    imageops::flip_horizontal(frame)
}
