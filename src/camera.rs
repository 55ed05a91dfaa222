/// Capture sources and the device lifecycle.
///
/// One rule governs the real device: the handle is scoped.  It is acquired
/// at startup or on a resolution change and always released before being
/// reacquired — reopening a held device leaks the handle.  Mid-run read
/// failures are soft: the source returns `None` for the tick and the game
/// keeps running on the last known ship position.

use image::{Rgb, RgbImage};

use crate::vision::{self, Frame};

#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("failed to open capture device {index}")]
    OpenFailed { index: u32 },
    #[error("capture backend error: {0}")]
    Backend(String),
}

/// A stream of mirrored camera frames.
pub trait FrameSource {
    /// Pull one frame; `None` means no usable frame this tick.
    fn frame(&mut self) -> Option<Frame>;

    /// Release the device and reacquire it at a new capture resolution.
    fn reconfigure(&mut self, width: u32, height: u32) -> Result<(), CameraError>;

    fn resolution(&self) -> (u32, u32);
}

/// Open the configured source: the real device when the `camera` feature is
/// compiled in (and not overridden), the synthetic sweep otherwise.
pub fn open_source(
    index: u32,
    width: u32,
    height: u32,
    synthetic: bool,
) -> Result<Box<dyn FrameSource>, CameraError> {
    #[cfg(feature = "camera")]
    if !synthetic {
        return Ok(Box::new(DeviceCamera::open(index, width, height)?));
    }

    #[cfg(not(feature = "camera"))]
    let _ = (index, synthetic);

    Ok(Box::new(SyntheticCamera::new(width, height)))
}

// ── Synthetic source ──────────────────────────────────────────────────────────

/// Stand-in source: a red disc sweeping across a dark frame.  Lets the whole
/// pipeline run without a capture backend, and doubles as the `--synthetic`
/// demo mode.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    ticks: u64,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, ticks: 0 }
    }
}

impl FrameSource for SyntheticCamera {
    fn frame(&mut self) -> Option<Frame> {
        self.ticks += 1;
        let (w, h) = (self.width, self.height);
        let radius = (h / 8).max(8) as i32;

        let phase = self.ticks as f32 / 90.0;
        let span = (w as i32 - 2 * radius).max(1) as f32;
        let cx = (phase.sin() * 0.5 + 0.5) * span;
        let cx = cx as i32 + radius;
        let cy = h as i32 / 2;

        let mut frame = RgbImage::from_pixel(w, h, Rgb([24, 32, 40]));
        for y in (cy - radius)..=(cy + radius) {
            for x in (cx - radius)..=(cx + radius) {
                if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
                    continue;
                }
                if (x - cx).pow(2) + (y - cy).pow(2) <= radius * radius {
                    frame.put_pixel(x as u32, y as u32, Rgb([220, 20, 30]));
                }
            }
        }
        Some(vision::mirror(&frame))
    }

    fn reconfigure(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// ── Real device (OpenCV backend) ──────────────────────────────────────────────

#[cfg(feature = "camera")]
pub use device::DeviceCamera;

#[cfg(feature = "camera")]
mod device {
    use image::RgbImage;
    use opencv::core::Mat;
    use opencv::prelude::*;
    use opencv::videoio::{self, VideoCapture};

    use super::{CameraError, FrameSource};
    use crate::vision::{self, Frame};

    /// Scoped wrapper around the OpenCV capture handle.
    pub struct DeviceCamera {
        cap: VideoCapture,
        index: u32,
        width: u32,
        height: u32,
    }

    impl DeviceCamera {
        pub fn open(index: u32, width: u32, height: u32) -> Result<Self, CameraError> {
            let cap = Self::acquire(index, width, height)?;
            log::info!("capture device {index} opened at {width}x{height}");
            Ok(Self { cap, index, width, height })
        }

        fn acquire(index: u32, width: u32, height: u32) -> Result<VideoCapture, CameraError> {
            let backend = |e: opencv::Error| CameraError::Backend(e.to_string());
            let mut cap = VideoCapture::new(index as i32, videoio::CAP_ANY).map_err(backend)?;
            if !cap.is_opened().map_err(backend)? {
                return Err(CameraError::OpenFailed { index });
            }
            cap.set(videoio::CAP_PROP_FRAME_WIDTH, width as f64)
                .map_err(backend)?;
            cap.set(videoio::CAP_PROP_FRAME_HEIGHT, height as f64)
                .map_err(backend)?;
            Ok(cap)
        }
    }

    impl FrameSource for DeviceCamera {
        fn frame(&mut self) -> Option<Frame> {
            let mut mat = Mat::default();
            match self.cap.read(&mut mat) {
                Ok(true) => {}
                _ => return None,
            }
            if mat.cols() <= 0 || mat.rows() <= 0 {
                return None;
            }

            let (w, h) = (mat.cols() as u32, mat.rows() as u32);
            let data = mat.data_bytes().ok()?;
            let mut rgb = Vec::with_capacity(data.len());
            for px in data.chunks_exact(3) {
                // OpenCV delivers BGR
                rgb.extend_from_slice(&[px[2], px[1], px[0]]);
            }
            let frame = RgbImage::from_raw(w, h, rgb)?;
            Some(vision::mirror(&frame))
        }

        fn reconfigure(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
            // Release first — reopening a held device leaks the handle.
            let _ = self.cap.release();
            self.cap = Self::acquire(self.index, width, height)?;
            self.width = width;
            self.height = height;
            log::info!("capture device {} reconfigured to {width}x{height}", self.index);
            Ok(())
        }

        fn resolution(&self) -> (u32, u32) {
            (self.width, self.height)
        }
    }

    impl Drop for DeviceCamera {
        fn drop(&mut self) {
            let _ = self.cap.release();
        }
    }
}
