// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shape colour assignment.

/// Colours handed out to new shapes, in order.
pub const SHAPE_COLORS: &[[u8; 3]] = &[
    [255, 99, 71],   // Tomato
    [30, 144, 255],  // Dodger blue
    [50, 205, 50],   // Lime green
    [255, 165, 0],   // Orange
    [186, 85, 211],  // Orchid
    [0, 206, 209],   // Turquoise
    [255, 105, 180], // Pink
    [240, 230, 140], // Khaki
];

/// Round-robin cursor over [`SHAPE_COLORS`].
#[derive(Debug, Clone, Default)]
pub struct Palette {
    next: usize,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the next colour and advance the cursor.
    pub fn next_color(&mut self) -> [u8; 3] {
        let color = SHAPE_COLORS[self.next % SHAPE_COLORS.len()];
        self.next = (self.next + 1) % SHAPE_COLORS.len();
        color
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps_around() {
        let mut palette = Palette::new();
        let first = palette.next_color();
        for _ in 1..SHAPE_COLORS.len() {
            palette.next_color();
        }
        assert_eq!(palette.next_color(), first);
    }

    #[test]
    fn test_reset_restarts_sequence() {
        let mut palette = Palette::new();
        palette.next_color();
        palette.next_color();
        palette.reset();
        assert_eq!(palette.next_color(), SHAPE_COLORS[0]);
    }
}
