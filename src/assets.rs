//! Text-art sprites for the grinding station.
//!
//! Each sprite has a fixed cell size. Art loaded from disk is padded or cut
//! to that size, and when loading fails a sprite of exactly the same size is
//! drawn procedurally, so anything positioned against the sprite is unaffected.

use crate::error::AssetError;
use rand::Rng;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Cell used for transparent pixels.
pub const TRANSPARENT: char = ' ';

const STONE_RIM: char = '▒';
const STONE_CORE: char = '█';
const LEAF: char = '▓';

/// Number of leaf blobs in the generated leaf pile.
const FALLBACK_LEAF_COUNT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    GrindStone,
    TeaLeaves,
}

impl AssetKind {
    pub const ALL: [AssetKind; 2] = [AssetKind::GrindStone, AssetKind::TeaLeaves];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::GrindStone => "grind-stone.txt",
            Self::TeaLeaves => "tea-leaves.txt",
        }
    }

    /// Sprite size in terminal cells (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            Self::GrindStone => (16, 8),
            Self::TeaLeaves => (20, 10),
        }
    }

    /// Size of the same sprite on the logical particle canvas.
    pub fn canvas_size(&self) -> (f64, f64) {
        match self {
            Self::GrindStone => (160.0, 160.0),
            Self::TeaLeaves => (200.0, 200.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    rows: Vec<Vec<char>>,
}

impl Sprite {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            rows: vec![vec![TRANSPARENT; width]; height],
        }
    }

    /// Build a sprite from text art, padding or truncating to the given size.
    pub fn from_art(art: &str, width: usize, height: usize) -> Self {
        let mut sprite = Self::blank(width, height);
        for (y, line) in art.lines().take(height).enumerate() {
            for (x, c) in line.chars().take(width).enumerate() {
                sprite.rows[y][x] = c;
            }
        }
        sprite
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    fn set(&mut self, x: usize, y: usize, c: char) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = c;
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }

    /// Number of non-transparent cells.
    pub fn filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&c| c != TRANSPARENT)
            .count()
    }
}

/// Read a sprite from `dir`.
pub fn load_sprite(dir: &Path, kind: AssetKind) -> Result<Sprite, AssetError> {
    let path = dir.join(kind.file_name());
    let art = fs::read_to_string(&path).map_err(|source| AssetError::Read {
        path: path.clone(),
        source,
    })?;
    if art.trim().is_empty() {
        return Err(AssetError::Empty { path });
    }

    let (width, height) = kind.dimensions();
    Ok(Sprite::from_art(&art, width, height))
}

/// Draw a stand-in sprite with the same size as the real asset.
pub fn fallback_sprite<R: Rng>(kind: AssetKind, rng: &mut R) -> Sprite {
    match kind {
        AssetKind::GrindStone => fallback_stone(),
        AssetKind::TeaLeaves => fallback_leaves(rng),
    }
}

/// Load a sprite, substituting the fallback on any failure.
pub fn load_or_fallback<R: Rng>(dir: Option<&Path>, kind: AssetKind, rng: &mut R) -> Sprite {
    let loaded = match dir {
        Some(dir) => load_sprite(dir, kind),
        None => Err(AssetError::NoDirectory),
    };

    match loaded {
        Ok(sprite) => {
            debug!(asset = kind.file_name(), "asset loaded");
            sprite
        }
        Err(err) => {
            warn!(asset = kind.file_name(), error = %err, "asset unavailable, drawing fallback");
            fallback_sprite(kind, rng)
        }
    }
}

/// Centre of cell (x, y) in canvas units.
fn cell_centre(kind: AssetKind, x: usize, y: usize) -> (f64, f64) {
    let (width, height) = kind.dimensions();
    let (canvas_w, canvas_h) = kind.canvas_size();
    (
        (x as f64 + 0.5) / width as f64 * canvas_w,
        (y as f64 + 0.5) / height as f64 * canvas_h,
    )
}

/// Two concentric discs: a rim of radius 70 and a core of radius 50 on a
/// 160-unit canvas.
fn fallback_stone() -> Sprite {
    let kind = AssetKind::GrindStone;
    let (width, height) = kind.dimensions();
    let mut sprite = Sprite::blank(width, height);

    for y in 0..height {
        for x in 0..width {
            let (px, py) = cell_centre(kind, x, y);
            let r = ((px - 80.0).powi(2) + (py - 80.0).powi(2)).sqrt();
            if r <= 50.0 {
                sprite.set(x, y, STONE_CORE);
            } else if r <= 70.0 {
                sprite.set(x, y, STONE_RIM);
            }
        }
    }
    sprite
}

/// A pile of randomly placed, randomly rotated leaf ellipses on a 200-unit
/// canvas.
fn fallback_leaves<R: Rng>(rng: &mut R) -> Sprite {
    let kind = AssetKind::TeaLeaves;
    let (width, height) = kind.dimensions();
    let mut sprite = Sprite::blank(width, height);

    for _ in 0..FALLBACK_LEAF_COUNT {
        let cx = 100.0 + (rng.gen::<f64>() - 0.5) * 80.0;
        let cy = 100.0 + (rng.gen::<f64>() - 0.5) * 80.0;
        let rx = 10.0 + rng.gen::<f64>() * 20.0;
        let ry = 5.0 + rng.gen::<f64>() * 10.0;
        let angle = rng.gen::<f64>() * PI;
        let (sin, cos) = angle.sin_cos();

        for y in 0..height {
            for x in 0..width {
                let (px, py) = cell_centre(kind, x, y);
                let (dx, dy) = (px - cx, py - cy);
                let u = dx * cos + dy * sin;
                let v = -dx * sin + dy * cos;
                if (u / rx).powi(2) + (v / ry).powi(2) <= 1.0 {
                    sprite.set(x, y, LEAF);
                }
            }
        }
    }
    sprite
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_from_art_pads_and_truncates() {
        let sprite = Sprite::from_art("abc\nde\nfghij\nextra", 4, 3);
        assert_eq!(sprite.width(), 4);
        assert_eq!(sprite.height(), 3);
        assert_eq!(sprite.lines(), vec!["abc ", "de  ", "fghi"]);
    }

    #[test]
    fn test_fallbacks_match_declared_dimensions() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for kind in AssetKind::ALL {
            let sprite = fallback_sprite(kind, &mut rng);
            assert_eq!((sprite.width(), sprite.height()), kind.dimensions());
            assert!(sprite.filled_cells() > 0);
        }
    }

    #[test]
    fn test_stone_has_core_inside_rim() {
        let stone = fallback_stone();
        assert_eq!(stone.get(8, 4), Some(STONE_CORE));
        assert_eq!(stone.get(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_missing_directory_falls_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let sprite = load_or_fallback(None, AssetKind::GrindStone, &mut rng);
        assert_eq!(sprite, fallback_stone());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = std::env::temp_dir().join("teacraft_no_such_assets_dir");
        let err = load_sprite(&dir, AssetKind::TeaLeaves).unwrap_err();
        assert!(matches!(err, AssetError::Read { .. }));
    }
}
