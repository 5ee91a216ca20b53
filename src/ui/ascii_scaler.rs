//! Scales text-art sprites to fit the drawing area.
//!
//! Uses nearest-neighbour sampling so block characters stay intact.

use teacraft::assets::Sprite;

/// Scales a sprite to the target size. Returns the sprite's own lines when
/// the size already matches.
pub fn scale_sprite(sprite: &Sprite, target_width: usize, target_height: usize) -> Vec<String> {
    let source = sprite.lines();
    if source.is_empty() || target_width == 0 || target_height == 0 {
        return vec![];
    }
    if target_width == sprite.width() && target_height == sprite.height() {
        return source;
    }

    let rows: Vec<Vec<char>> = source.iter().map(|l| l.chars().collect()).collect();
    let (source_width, source_height) = (sprite.width(), sprite.height());

    (0..target_height)
        .map(|y| {
            let row = &rows[((y * source_height) / target_height).min(source_height - 1)];
            (0..target_width)
                .map(|x| {
                    let sx = ((x * source_width) / target_width).min(source_width - 1);
                    row.get(sx).copied().unwrap_or(' ')
                })
                .collect()
        })
        .collect()
}

/// Largest size with the sprite's aspect ratio that fits in the box, never
/// larger than the sprite itself.
pub fn fit_size(sprite: &Sprite, max_width: usize, max_height: usize) -> (usize, usize) {
    let (w, h) = (sprite.width(), sprite.height());
    if w == 0 || h == 0 || (w <= max_width && h <= max_height) {
        return (w, h);
    }
    let scale = f64::min(max_width as f64 / w as f64, max_height as f64 / h as f64);
    (
        ((w as f64 * scale).floor() as usize).max(1),
        ((h as f64 * scale).floor() as usize).max(1),
    )
}

/// Applies heat shading to text art using character density.
pub fn apply_density_shading(sprite: Vec<String>, density: f64) -> Vec<String> {
    let shading_map: &[(char, char)] = if density < 0.3 {
        &[('█', '▒'), ('▓', '░'), ('▒', '░')]
    } else if density < 0.7 {
        &[('█', '▓')]
    } else {
        &[('░', '▒'), ('▒', '▓')]
    };

    sprite
        .iter()
        .map(|line| apply_char_map(line, shading_map))
        .collect()
}

fn apply_char_map(line: &str, char_map: &[(char, char)]) -> String {
    line.chars()
        .map(|c| {
            for (from, to) in char_map {
                if c == *from {
                    return *to;
                }
            }
            c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_sprite_same_size() {
        let sprite = Sprite::from_art("AB\nCD\nEF", 2, 3);
        assert_eq!(scale_sprite(&sprite, 2, 3), vec!["AB", "CD", "EF"]);
    }

    #[test]
    fn test_scale_sprite_smaller() {
        let sprite = Sprite::from_art("abcd\nefgh\nijkl\nmnop", 4, 4);
        // Samples rows 0 and 2, columns 0 and 2.
        assert_eq!(scale_sprite(&sprite, 2, 2), vec!["ac", "ik"]);
    }

    #[test]
    fn test_scale_sprite_larger() {
        let sprite = Sprite::from_art("A\nB", 1, 2);
        assert_eq!(scale_sprite(&sprite, 2, 4), vec!["AA", "AA", "BB", "BB"]);
    }

    #[test]
    fn test_fit_size_keeps_aspect() {
        let sprite = Sprite::blank(16, 8);
        assert_eq!(fit_size(&sprite, 40, 20), (16, 8));
        assert_eq!(fit_size(&sprite, 8, 20), (8, 4));
        assert_eq!(fit_size(&sprite, 40, 4), (8, 4));
    }

    #[test]
    fn test_density_shading() {
        let light = apply_density_shading(vec!["█▓".to_string()], 0.1);
        assert_eq!(light[0], "▒░");
        let dense = apply_density_shading(vec!["░▒".to_string()], 0.9);
        assert_eq!(dense[0], "▒▓");
    }
}
