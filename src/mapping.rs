/// Camera-space ↔ display-space geometry.
///
/// `Geometry` owns both resolutions and the scale factors between them, and
/// is passed explicitly to the components that need it.  Every resolution
/// change goes through `set_display`/`set_camera` so the factors can never
/// go stale.

use crate::entities::Rect;
use crate::settings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    display_w: u32,
    display_h: u32,
    cam_w: u32,
    cam_h: u32,
    /// Camera pixels per display pixel.
    scale_x: f32,
    scale_y: f32,
}

impl Geometry {
    /// Build from a display mode; the camera resolution comes from the mode
    /// table, with the base resolution as fallback for unknown displays.
    pub fn new(display_w: u32, display_h: u32) -> Self {
        let (cam_w, cam_h) = settings::camera_mode_for((display_w, display_h));
        let mut geom = Self {
            display_w,
            display_h,
            cam_w,
            cam_h,
            scale_x: 0.0,
            scale_y: 0.0,
        };
        geom.recompute();
        geom
    }

    fn recompute(&mut self) {
        self.scale_x = self.cam_w as f32 / self.display_w as f32;
        self.scale_y = self.cam_h as f32 / self.display_h as f32;
    }

    /// Switch display mode.  Re-derives the camera resolution and both scale
    /// factors in the same step.
    pub fn set_display(&mut self, w: u32, h: u32) {
        self.display_w = w;
        self.display_h = h;
        let (cw, ch) = settings::camera_mode_for((w, h));
        self.cam_w = cw;
        self.cam_h = ch;
        self.recompute();
    }

    /// Record a camera resolution that changed independently of the display
    /// (a device that refused the requested mode).
    pub fn set_camera(&mut self, w: u32, h: u32) {
        self.cam_w = w;
        self.cam_h = h;
        self.recompute();
    }

    pub fn display_width(&self) -> u32 {
        self.display_w
    }

    pub fn display_height(&self) -> u32 {
        self.display_h
    }

    pub fn camera_resolution(&self) -> (u32, u32) {
        (self.cam_w, self.cam_h)
    }

    /// Camera x → display x.  Linear: 0 ↦ 0 and cam_w ↦ display_w.
    pub fn to_display_x(&self, cam_x: u32) -> i32 {
        (cam_x as u64 * self.display_w as u64 / self.cam_w as u64) as i32
    }

    /// Display rect → camera rect via the reciprocal scale; how game sprites
    /// land on the camera frame.
    pub fn display_rect_to_camera(&self, rect: Rect) -> Rect {
        Rect {
            x: (rect.x as f32 * self.scale_x) as i32,
            y: (rect.y as f32 * self.scale_y) as i32,
            w: (rect.w as f32 * self.scale_x) as u32,
            h: (rect.h as f32 * self.scale_y) as u32,
        }
    }
}
