//! Immutable game configuration.
//!
//! The engine takes all of its tunable constants through [`GameConfig`]
//! rather than process-wide globals: board edge length, the display glyphs
//! for the two marks, and the value constants used to seed and train the
//! position graph.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration shared by a board and its position graph.
///
/// # Examples
///
/// ```
/// use oxo::config::GameConfig;
///
/// let config = GameConfig::default()
///     .with_draw_value(0.85)
///     .with_glyphs(['X', 'O']);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board edge length (3 for the standard game)
    pub size: usize,
    /// Display glyphs for the two marks, in declared order
    pub glyphs: [char; 2],
    /// Initial value assigned to non-terminal positions
    pub default_value: f64,
    /// Value of a position where the board's winning mark has won
    pub win_value: f64,
    /// Value of a position where the opposing mark has won
    pub lose_value: f64,
    /// Learning target for drawn games
    pub draw_value: f64,
}

impl GameConfig {
    /// Create a configuration for the given board edge length, with the
    /// standard glyphs and value constants.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            glyphs: ['x', 'o'],
            default_value: 0.5,
            win_value: 1.0,
            lose_value: 0.0,
            draw_value: 0.5,
        }
    }

    /// Set the display glyphs for the two marks.
    pub fn with_glyphs(mut self, glyphs: [char; 2]) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Set the initial value of non-terminal positions.
    pub fn with_default_value(mut self, value: f64) -> Self {
        self.default_value = value;
        self
    }

    /// Set the learning target for drawn games.
    pub fn with_draw_value(mut self, value: f64) -> Self {
        self.draw_value = value;
        self
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Check that the configuration describes a playable board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the edge length is below 2,
    /// the glyphs collide with each other or the empty-cell marker, or any
    /// value constant falls outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(Error::InvalidConfiguration {
                message: format!("board edge length must be at least 2, got {}", self.size),
            });
        }

        if self.glyphs[0] == self.glyphs[1] {
            return Err(Error::InvalidConfiguration {
                message: format!("mark glyphs must differ, both are '{}'", self.glyphs[0]),
            });
        }

        if self.glyphs.contains(&crate::grid::EMPTY_GLYPH) {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "mark glyphs may not use the empty-cell marker '{}'",
                    crate::grid::EMPTY_GLYPH
                ),
            });
        }

        for (name, value) in [
            ("default", self.default_value),
            ("win", self.win_value),
            ("lose", self.lose_value),
            ("draw", self.draw_value),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} value must lie in [0, 1], got {value}"),
                });
            }
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.size, 3);
        assert_eq!(config.cell_count(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_board() {
        let config = GameConfig::new(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_colliding_glyphs() {
        let config = GameConfig::default().with_glyphs(['x', 'x']);
        assert!(config.validate().is_err());

        let config = GameConfig::default().with_glyphs(['.', 'o']);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = GameConfig::default().with_draw_value(1.5);
        assert!(config.validate().is_err());

        let config = GameConfig::default().with_default_value(f64::NAN);
        assert!(config.validate().is_err());
    }
}
