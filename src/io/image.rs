//! PNG export drawing each cell as a small socket glyph
//!
//! A cell occupies 3x3 glyph units: the centre and every exposed socket arm
//! are painted in the tile's colour, the corners in a darker shade of it.
//! Unresolved cells are flat grey.

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::grid::{Grid, Position};
use crate::spatial::tiles::{Direction, Tile, TileSet};
use image::{Rgba, RgbaImage};
use std::path::Path;

const UNRESOLVED_COLOR: [u8; 4] = [96, 96, 96, 255];
const GLYPH_UNITS: u32 = 3;

/// Distinct colour for tile `index` out of `tile_count`, spread around the hue circle
pub fn tile_color(index: usize, tile_count: usize) -> [u8; 4] {
    let hue = if tile_count == 0 {
        0.0
    } else {
        index as f64 / tile_count as f64 * 360.0
    };
    let (saturation, value) = (0.65, 0.95);

    let chroma = value * saturation;
    let sector = hue / 60.0;
    let secondary = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };
    let offset = value - chroma;
    let channel = |c: f64| ((c + offset) * 255.0).round().clamp(0.0, 255.0) as u8;

    [channel(r), channel(g), channel(b), 255]
}

fn shade(color: [u8; 4]) -> [u8; 4] {
    [color[0] / 3, color[1] / 3, color[2] / 3, color[3]]
}

fn fill_unit(img: &mut RgbaImage, origin: (u32, u32), unit: (u32, u32), scale: u32, color: [u8; 4]) {
    for dy in 0..scale {
        for dx in 0..scale {
            let px = origin.0 + unit.0 * scale + dx;
            let py = origin.1 + unit.1 * scale + dy;
            if let Some(pixel) = img.get_pixel_mut_checked(px, py) {
                *pixel = Rgba(color);
            }
        }
    }
}

/// Paint one cell's glyph; `tile` is `None` for unresolved cells
pub(crate) fn draw_cell(
    img: &mut RgbaImage,
    position: Position,
    tile: Option<(&Tile, [u8; 4])>,
    scale: u32,
) {
    let cell_size = GLYPH_UNITS * scale;
    let origin = (position.x as u32 * cell_size, position.y as u32 * cell_size);

    let Some((tile, color)) = tile else {
        for uy in 0..GLYPH_UNITS {
            for ux in 0..GLYPH_UNITS {
                fill_unit(img, origin, (ux, uy), scale, UNRESOLVED_COLOR);
            }
        }
        return;
    };

    let background = shade(color);
    for uy in 0..GLYPH_UNITS {
        for ux in 0..GLYPH_UNITS {
            fill_unit(img, origin, (ux, uy), scale, background);
        }
    }

    fill_unit(img, origin, (1, 1), scale, color);
    for direction in tile.sockets().iter() {
        let unit = match direction {
            Direction::North => (1, 0),
            Direction::South => (1, 2),
            Direction::East => (2, 1),
            Direction::West => (0, 1),
        };
        fill_unit(img, origin, unit, scale, color);
    }
}

/// Blank canvas sized for a `width` × `height` grid at `scale`
pub(crate) fn canvas(width: usize, height: usize, scale: u32) -> RgbaImage {
    let cell_size = GLYPH_UNITS * scale;
    RgbaImage::new(width as u32 * cell_size, height as u32 * cell_size)
}

/// Draw the whole grid
pub fn render_grid_image(grid: &Grid, tiles: &TileSet, scale: u32) -> RgbaImage {
    let mut img = canvas(grid.width(), grid.height(), scale);
    for cell in grid.cells() {
        let tile = cell.chosen().and_then(|index| {
            tiles
                .get(index)
                .map(|tile| (tile, tile_color(index, tiles.len())))
        });
        draw_cell(&mut img, cell.position(), tile, scale);
    }
    img
}

/// Create the parent directory of `output_path` if it has one
pub(crate) fn ensure_parent_dir(output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Export the grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is zero
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Grid,
    tiles: &TileSet,
    output_path: &Path,
    scale: u32,
) -> Result<()> {
    if scale == 0 {
        return Err(crate::io::error::invalid_parameter(
            "scale",
            &scale,
            &"must be at least 1",
        ));
    }

    let img = render_grid_image(grid, tiles, scale);
    ensure_parent_dir(output_path)?;

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
