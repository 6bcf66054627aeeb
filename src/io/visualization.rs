//! Frame capture and GIF generation for replaying a run's collapse order

use crate::algorithm::executor::{CollapseEvent, Generator};
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::{canvas, draw_cell, ensure_parent_dir, tile_color};
use crate::spatial::grid::Position;
use crate::spatial::tiles::TileSet;
use image::{Frame, RgbaImage};
use std::path::Path;

/// Collapse events of one run, ready to be replayed as an animation
pub struct VisualizationCapture {
    events: Vec<CollapseEvent>,
    dimensions: (usize, usize),
    tiles: TileSet,
}

impl VisualizationCapture {
    /// Start an empty capture for a `width` × `height` grid
    pub fn new(width: usize, height: usize, tiles: TileSet) -> Self {
        Self {
            events: Vec::with_capacity(width * height),
            dimensions: (width, height),
            tiles,
        }
    }

    /// Capture everything a generator has collapsed so far
    pub fn from_generator(generator: &Generator) -> Self {
        let config = generator.config();
        let mut capture = Self::new(config.width, config.height, generator.tiles().clone());
        for event in generator.history() {
            capture.record(*event);
        }
        capture
    }

    /// Append one collapse
    pub fn record(&mut self, event: CollapseEvent) {
        self.events.push(event);
    }

    /// Returns all recorded collapses
    pub fn events(&self) -> &[CollapseEvent] {
        &self.events
    }

    /// Returns the total number of recorded collapses
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Export the captured collapses as a GIF with automatic frame skipping
    ///
    /// If the requested delay is shorter than viewers reliably honour, frames
    /// are dropped so the apparent speed is kept. The last frame is held
    /// longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No collapses were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32, scale: u32) -> Result<()> {
        if self.events.is_empty() {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "visualization",
                value: output_path.display().to_string(),
                reason: "no collapses captured".to_string(),
            });
        }
        if scale == 0 {
            return Err(crate::io::error::invalid_parameter(
                "scale",
                &scale,
                &"must be at least 1",
            ));
        }

        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize, scale);

        ensure_parent_dir(output_path)?;
        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize, scale: u32) -> Vec<Frame> {
        let (width, height) = self.dimensions;
        let mut img = canvas(width, height, scale);
        for y in 0..height {
            for x in 0..width {
                draw_cell(&mut img, Position::new(x, y), None, scale);
            }
        }

        let mut frames = vec![Self::frame(img.clone(), delay_ms)];

        for (count, event) in self.events.iter().enumerate() {
            let tile = self
                .tiles
                .get(event.tile)
                .map(|tile| (tile, tile_color(event.tile, self.tiles.len())));
            draw_cell(&mut img, event.position, tile, scale);

            if (count + 1) % skip_factor == 0 {
                frames.push(Self::frame(img.clone(), delay_ms));
            }
        }

        if self.events.len() % skip_factor != 0 {
            frames.push(Self::frame(img.clone(), delay_ms));
        }

        // Final frame displays longer for better visibility
        frames.push(Self::frame(img, delay_ms * 25));
        frames
    }

    fn frame(img: RgbaImage, delay_ms: u32) -> Frame {
        Frame::from_parts(img, 0, 0, image::Delay::from_numer_denom_ms(delay_ms, 1))
    }
}
