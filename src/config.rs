use std::{fs, path::Path, time::Duration};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::state::Grid;
use crate::term::board_size;

const MIN_CELL_SIZE: u32 = 10;
// The starting snake occupies column 5 of row 5
const MIN_GRID_CELLS: u32 = 6;

/// Board geometry and speed. Loaded from TOML, every field optional.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Side of one grid cell in pixels.
    pub cell_size: u32,
    /// Milliseconds between ticks.
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config { width: 400, height: 400, cell_size: 20, tick_ms: 150 }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;
        Config::from_toml_str(&text)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Checks the geometry and returns the grid it describes.
    pub fn grid(&self) -> Result<Grid> {
        if self.cell_size < MIN_CELL_SIZE {
            return Err(Error::InvalidConfig(format!(
                "cell size {} is below the minimum of {}", self.cell_size, MIN_CELL_SIZE
            )));
        }

        if self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            return Err(Error::InvalidConfig(format!(
                "{}x{} canvas is not a whole number of {}px cells", self.width, self.height, self.cell_size
            )));
        }

        let (columns, rows) = (self.width / self.cell_size, self.height / self.cell_size);
        if columns < MIN_GRID_CELLS || rows < MIN_GRID_CELLS {
            return Err(Error::InvalidConfig(format!(
                "{}x{} grid is smaller than {}x{}", columns, rows, MIN_GRID_CELLS, MIN_GRID_CELLS
            )));
        }

        if self.tick_ms == 0 {
            return Err(Error::InvalidConfig("tick interval must be positive".to_string()));
        }

        let too_big = || Error::InvalidConfig(format!("{}x{} grid is too large", columns, rows));
        let grid = Grid::new(
            i32::try_from(columns).map_err(|_| too_big())?,
            i32::try_from(rows).map_err(|_| too_big())?,
        );

        // The board must be addressable in terminal coordinates
        board_size(grid)?;
        Ok(grid)
    }
}
