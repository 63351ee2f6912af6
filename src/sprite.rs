//! Decoded images and their half-block rendering.

use crate::error::QueryError;
use crate::utils::clip;
use image::imageops::FilterType;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use std::fmt;

/// Edge length sprites are scaled to after download.
pub const SPRITE_SIZE: u32 = 280;

/// Pixels with alpha below this are treated as see-through.
const ALPHA_THRESHOLD: u8 = 128;

const BACKGROUND_PNG: &[u8] = include_bytes!("../assets/PokeballBackground.png");
const DEFAULT_SPRITE_PNG: &[u8] = include_bytes!("../assets/PokeballDefault.png");
const LOGO_PNG: &[u8] = include_bytes!("../assets/PokedexLogo.png");

/// An RGBA image held in memory, row-major, 4 bytes per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl Sprite {
    /// Decode an encoded image (PNG etc.) keeping its native size.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, QueryError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self {
            width: img.width(),
            height: img.height(),
            rgba: img.into_raw(),
        })
    }

    /// Decode and scale to exactly `w` x `h`.
    pub fn from_bytes_resized(bytes: &[u8], w: u32, h: u32) -> Result<Self, QueryError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let resized = image::imageops::resize(&img, w, h, FilterType::Lanczos3);
        Ok(Self {
            width: w,
            height: h,
            rgba: resized.into_raw(),
        })
    }

    /// Read one pixel; `None` when out of range.
    fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let idx = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?
            .checked_mul(4)?;
        let p = self.rgba.get(idx..idx + 4)?;
        Some((p[0], p[1], p[2], p[3]))
    }
}

/// Images bundled with the binary, decoded once at startup.
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Sprite,
    pub default_sprite: Sprite,
    pub logo: Sprite,
}

impl Assets {
    pub fn load() -> Result<Self, QueryError> {
        Ok(Self {
            background: Sprite::from_bytes(BACKGROUND_PNG)?,
            default_sprite: Sprite::from_bytes_resized(DEFAULT_SPRITE_PNG, SPRITE_SIZE, SPRITE_SIZE)?,
            logo: Sprite::from_bytes(LOGO_PNG)?,
        })
    }
}

/// Paint `sprite` into `area` with Unicode half-blocks, two pixels per cell,
/// using nearest-neighbour scaling.
///
/// Transparent pixels take the `backdrop` colour when one is given, otherwise
/// the cell underneath is left as it was.
pub fn render_sprite(buf: &mut Buffer, area: Rect, sprite: &Sprite, backdrop: Option<Color>) {
    let Some(area) = clip(area, buf.area) else {
        return;
    };
    if sprite.width == 0 || sprite.height == 0 {
        return;
    }

    let cell_w = area.width as u32;
    let cell_h = area.height as u32;
    let pixel_h = cell_h * 2;

    for cy in 0..cell_h {
        for cx in 0..cell_w {
            let px = (cx * sprite.width) / cell_w;
            let top_py = (cy * 2 * sprite.height) / pixel_h;
            let bot_py = ((cy * 2 + 1) * sprite.height) / pixel_h;

            let top = sprite
                .pixel(px, top_py)
                .filter(|p| p.3 >= ALPHA_THRESHOLD)
                .map(|p| Color::Rgb(p.0, p.1, p.2))
                .or(backdrop);
            let bot = sprite
                .pixel(px, bot_py)
                .filter(|p| p.3 >= ALPHA_THRESHOLD)
                .map(|p| Color::Rgb(p.0, p.1, p.2))
                .or(backdrop);

            let cell = buf.get_mut(area.x + cx as u16, area.y + cy as u16);
            match (top, bot) {
                (Some(t), Some(b)) => {
                    cell.set_char('▀');
                    cell.set_fg(t);
                    cell.set_bg(b);
                }
                (Some(t), None) => {
                    cell.set_char('▀');
                    cell.set_fg(t);
                    cell.set_bg(Color::Reset);
                }
                (None, Some(b)) => {
                    cell.set_char('▄');
                    cell.set_fg(b);
                    cell.set_bg(Color::Reset);
                }
                (None, None) => {}
            }
        }
    }
}
