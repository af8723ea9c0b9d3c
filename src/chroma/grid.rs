//! Fixed-size color buffer behind every custom effect.
//!
//! The native SDK receives the grid as one contiguous, row-major block of
//! packed colors. Cells are reachable by flat index, by `(row, column)` or
//! by a named LED whose value carries the row in its high byte and the
//! column in its low byte.
use serde::Serialize;

use crate::error::{ChromaError, Result};

use super::color::Color;

/// Row and column counts of a device's custom grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
}

impl GridLayout {
    #[must_use]
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// A single-row strip of `leds` cells.
    #[must_use]
    pub const fn strip(leds: usize) -> Self {
        Self::new(1, leds)
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows * self.columns
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of `(row, column)`, range-checked.
    pub fn index_of(&self, row: usize, column: usize) -> Result<usize> {
        if row >= self.rows {
            return Err(ChromaError::OutOfRange {
                name: "row",
                index: row,
                bound: self.rows,
            });
        }
        if column >= self.columns {
            return Err(ChromaError::OutOfRange {
                name: "column",
                index: column,
                bound: self.columns,
            });
        }
        Ok(column + row * self.columns)
    }
}

/// A named LED that resolves to a grid cell.
///
/// The raw value encodes the row in the high byte and the column in the
/// low byte.
pub trait GridPosition: Copy {
    fn to_raw(self) -> u16;

    fn row(self) -> usize {
        usize::from(self.to_raw() >> 8)
    }

    fn column(self) -> usize {
        usize::from(self.to_raw() & 0xFF)
    }
}

/// Custom-effect color buffer of fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectGrid {
    layout: GridLayout,
    colors: Box<[Color]>,
}

impl EffectGrid {
    /// A grid with every cell black.
    #[must_use]
    pub fn new(layout: GridLayout) -> Self {
        Self::filled(layout, Color::BLACK)
    }

    /// A grid with every cell set to `color`.
    #[must_use]
    pub fn filled(layout: GridLayout, color: Color) -> Self {
        Self {
            layout,
            colors: vec![color; layout.len()].into_boxed_slice(),
        }
    }

    /// Build from exactly `layout.len()` colors in row-major order.
    pub fn from_slice(layout: GridLayout, colors: &[Color]) -> Result<Self> {
        if colors.len() != layout.len() {
            return Err(ChromaError::Validation(format!(
                "colors has incorrect size, should be {}, actual is {}",
                layout.len(),
                colors.len()
            )));
        }
        Ok(Self {
            layout,
            colors: colors.into(),
        })
    }

    /// Build from a 2D array whose shape must match `layout` exactly.
    pub fn from_rows<R: AsRef<[Color]>>(layout: GridLayout, rows: &[R]) -> Result<Self> {
        if rows.len() != layout.rows {
            return Err(ChromaError::Validation(format!(
                "colors has incorrect number of rows, should be {}, received {}",
                layout.rows,
                rows.len()
            )));
        }

        let mut colors = Vec::with_capacity(layout.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != layout.columns {
                return Err(ChromaError::Validation(format!(
                    "colors has incorrect number of columns, should be {}, received {} for row {index}",
                    layout.columns,
                    row.len()
                )));
            }
            colors.extend_from_slice(row);
        }

        Ok(Self {
            layout,
            colors: colors.into_boxed_slice(),
        })
    }

    #[must_use]
    pub const fn layout(&self) -> GridLayout {
        self.layout
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Read-only view of the cells in row-major order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    // ── Flat addressing ──────────────────────────────────────

    pub fn get(&self, index: usize) -> Result<Color> {
        self.colors
            .get(index)
            .copied()
            .ok_or(ChromaError::OutOfRange {
                name: "index",
                index,
                bound: self.layout.len(),
            })
    }

    pub fn set(&mut self, index: usize, color: Color) -> Result<()> {
        let bound = self.layout.len();
        let cell = self.colors.get_mut(index).ok_or(ChromaError::OutOfRange {
            name: "index",
            index,
            bound,
        })?;
        *cell = color;
        Ok(())
    }

    // ── Row / column addressing ──────────────────────────────

    pub fn get_at(&self, row: usize, column: usize) -> Result<Color> {
        self.get(self.layout.index_of(row, column)?)
    }

    pub fn set_at(&mut self, row: usize, column: usize, color: Color) -> Result<()> {
        let index = self.layout.index_of(row, column)?;
        self.set(index, color)
    }

    // ── Named LED addressing ─────────────────────────────────

    pub fn get_led<L: GridPosition>(&self, led: L) -> Result<Color> {
        self.get_at(led.row(), led.column())
    }

    pub fn set_led<L: GridPosition>(&mut self, led: L, color: Color) -> Result<()> {
        self.set_at(led.row(), led.column(), color)
    }

    // ── Whole-grid operations ────────────────────────────────

    /// Set every cell to `color`.
    pub fn fill(&mut self, color: Color) {
        self.colors.fill(color);
    }

    /// Set every cell to black.
    pub fn clear(&mut self) {
        self.fill(Color::BLACK);
    }

    /// Compare against a 2D array; any shape mismatch is simply unequal.
    #[must_use]
    pub fn eq_rows<R: AsRef<[Color]>>(&self, rows: &[R]) -> bool {
        rows.len() == self.layout.rows
            && rows
                .iter()
                .zip(self.colors.chunks(self.layout.columns.max(1)))
                .all(|(theirs, ours)| theirs.as_ref() == ours)
    }

    /// The packed little-endian blob handed to the native layer.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_le_bytes()).collect()
    }
}

impl PartialEq<[Color]> for EffectGrid {
    fn eq(&self, other: &[Color]) -> bool {
        *self.colors == *other
    }
}

impl PartialEq<&[Color]> for EffectGrid {
    fn eq(&self, other: &&[Color]) -> bool {
        *self.colors == **other
    }
}

impl PartialEq<Vec<Color>> for EffectGrid {
    fn eq(&self, other: &Vec<Color>) -> bool {
        *self.colors == **other
    }
}

impl PartialEq<Vec<Vec<Color>>> for EffectGrid {
    fn eq(&self, other: &Vec<Vec<Color>>) -> bool {
        self.eq_rows(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: GridLayout = GridLayout::new(3, 4);

    #[derive(Clone, Copy)]
    struct Cell(u16);

    impl GridPosition for Cell {
        fn to_raw(self) -> u16 {
            self.0
        }
    }

    #[test]
    fn three_addressing_modes_share_storage() {
        let mut grid = EffectGrid::new(LAYOUT);
        grid.set_at(2, 1, Color::RED).unwrap();
        assert_eq!(grid.get(1 + 2 * 4).unwrap(), Color::RED);
        assert_eq!(grid.get_led(Cell(0x0201)).unwrap(), Color::RED);

        grid.set_led(Cell(0x0003), Color::BLUE).unwrap();
        assert_eq!(grid.get_at(0, 3).unwrap(), Color::BLUE);
        assert_eq!(grid.get(3).unwrap(), Color::BLUE);
    }

    #[test]
    fn out_of_range_reports_name_and_bound() {
        let mut grid = EffectGrid::new(LAYOUT);
        assert_eq!(
            grid.get_at(3, 0),
            Err(ChromaError::OutOfRange {
                name: "row",
                index: 3,
                bound: 3
            })
        );
        assert_eq!(
            grid.set_at(0, 4, Color::RED),
            Err(ChromaError::OutOfRange {
                name: "column",
                index: 4,
                bound: 4
            })
        );
        assert_eq!(
            grid.set(12, Color::RED),
            Err(ChromaError::OutOfRange {
                name: "index",
                index: 12,
                bound: 12
            })
        );
        assert!(grid.get_led(Cell(0x0500)).is_err());
        assert_eq!(grid, EffectGrid::new(LAYOUT));
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        let short = vec![vec![Color::BLACK; 4]; 2];
        assert!(matches!(
            EffectGrid::from_rows(LAYOUT, &short),
            Err(ChromaError::Validation(_))
        ));

        let mut ragged = vec![vec![Color::BLACK; 4]; 3];
        ragged[1].pop();
        let err = EffectGrid::from_rows(LAYOUT, &ragged).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn from_rows_is_row_major() {
        let rows: Vec<Vec<Color>> = (0..3u8)
            .map(|r| (0..4u8).map(|c| Color::new(r, c, 0)).collect())
            .collect();
        let grid = EffectGrid::from_rows(LAYOUT, &rows).unwrap();
        assert_eq!(grid.get(5).unwrap(), Color::new(1, 1, 0));
        assert_eq!(grid, rows);
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(EffectGrid::from_slice(LAYOUT, &[Color::RED; 11]).is_err());
        let grid = EffectGrid::from_slice(LAYOUT, &[Color::RED; 12]).unwrap();
        assert_eq!(grid, EffectGrid::filled(LAYOUT, Color::RED));
    }

    #[test]
    fn equality_with_mismatched_shapes_is_false() {
        let grid = EffectGrid::filled(LAYOUT, Color::GREEN);
        assert!(grid != vec![Color::GREEN; 11]);
        assert!(grid == vec![Color::GREEN; 12]);
        assert!(!grid.eq_rows(&vec![vec![Color::GREEN; 3]; 4]));
        assert_ne!(grid, EffectGrid::filled(GridLayout::new(4, 3), Color::GREEN));
    }

    #[test]
    fn clone_is_deep() {
        let original = EffectGrid::filled(LAYOUT, Color::WHITE);
        let mut copy = original.clone();
        copy.set(0, Color::BLACK).unwrap();
        assert_eq!(original.get(0).unwrap(), Color::WHITE);
        assert_ne!(original, copy);
    }

    #[test]
    fn to_bytes_packs_each_cell() {
        let mut grid = EffectGrid::new(GridLayout::strip(2));
        grid.set(1, Color::new(1, 2, 3)).unwrap();
        assert_eq!(grid.to_bytes(), vec![0, 0, 0, 0, 1, 2, 3, 0]);
    }
}
