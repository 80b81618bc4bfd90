/// Per-cell state of a section's seat plan
use crate::models::Seat;
use tracing::warn;

/// Grid size the mobile client always draws.
pub const DEFAULT_ROWS: u32 = 5;
pub const DEFAULT_COLUMNS: u32 = 6;
/// Largest layout drawn; bigger ones are treated as malformed.
pub const MAX_CELLS: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatCell {
    Available,
    /// Held by the current user
    Mine,
    TakenByOther { student_id: i64 },
}

impl SeatCell {
    /// Whether the current user may select this cell.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, SeatCell::TakenByOther { .. })
    }
}

/// Zero-based seat coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatCoord {
    pub row: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeatGrid {
    rows: u32,
    columns: u32,
    cells: Vec<SeatCell>,
}

impl SeatGrid {
    /// Derives the display state of every cell from the occupied seats.
    ///
    /// Seats outside the grid are skipped. If two seats claim the same cell
    /// the later one wins. A layout over [`MAX_CELLS`] yields an empty grid.
    pub fn derive(rows: u32, columns: u32, seats: &[Seat], current_user: Option<i64>) -> Self {
        let (rows, columns) = match rows.checked_mul(columns) {
            Some(total) if total <= MAX_CELLS => (rows, columns),
            _ => {
                warn!(rows, columns, "Seat layout too large, ignoring");
                (0, 0)
            }
        };
        let mut cells = vec![SeatCell::Available; (rows * columns) as usize];

        for seat in seats {
            let Some(student_id) = seat.occupant_id() else {
                continue;
            };
            if seat.row >= rows || seat.column >= columns {
                warn!(
                    section_id = seat.section_id,
                    row = seat.row,
                    column = seat.column,
                    "Seat outside grid, ignoring"
                );
                continue;
            }
            let index = (seat.row * columns + seat.column) as usize;
            cells[index] = if Some(student_id) == current_user {
                SeatCell::Mine
            } else {
                SeatCell::TakenByOther { student_id }
            };
        }

        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn mobile(seats: &[Seat], current_user: Option<i64>) -> Self {
        Self::derive(DEFAULT_ROWS, DEFAULT_COLUMNS, seats, current_user)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cells in the layout.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, row: u32, column: u32) -> Option<SeatCell> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get((row * self.columns + column) as usize).copied()
    }

    /// The current user's seat, if they hold one.
    pub fn my_seat(&self) -> Option<SeatCoord> {
        self.cells
            .iter()
            .position(|c| *c == SeatCell::Mine)
            .map(|i| SeatCoord {
                row: i as u32 / self.columns,
                column: i as u32 % self.columns,
            })
    }

    pub fn available_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == SeatCell::Available)
            .count()
    }

    /// Rows of cells, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[SeatCell]> {
        self.cells.chunks(self.columns.max(1) as usize)
    }

    /// Text rendering: `.` free, `*` mine, `x` taken, `#` the pending selection.
    pub fn render(&self, selection: Option<SeatCoord>) -> String {
        let mut out = String::new();
        out.push_str("    ");
        for column in 0..self.columns {
            out.push_str(&format!("{:>3}", column + 1));
        }
        out.push('\n');
        for (row, cells) in self.iter_rows().enumerate() {
            out.push_str(&format!("{:>3} ", row + 1));
            for (column, cell) in cells.iter().enumerate() {
                let here = SeatCoord {
                    row: row as u32,
                    column: column as u32,
                };
                let mark = if selection == Some(here) {
                    '#'
                } else {
                    match cell {
                        SeatCell::Available => '.',
                        SeatCell::Mine => '*',
                        SeatCell::TakenByOther { .. } => 'x',
                    }
                };
                out.push_str(&format!("{:>3}", mark));
            }
            out.push('\n');
        }
        out
    }
}

/// Client-local seat choice, held until submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatSelection {
    selected: Option<SeatCoord>,
}

impl SeatSelection {
    /// Selects a cell if the user may take it. Returns whether it was accepted.
    pub fn select(&mut self, grid: &SeatGrid, row: u32, column: u32) -> bool {
        match grid.cell(row, column) {
            Some(cell) if cell.is_selectable() => {
                self.selected = Some(SeatCoord { row, column });
                true
            }
            _ => false,
        }
    }

    pub fn selected(&self) -> Option<SeatCoord> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(row: u32, column: u32, student_id: i64) -> Seat {
        Seat {
            id: 0,
            section_id: 1,
            student: None,
            student_id: Some(student_id),
            row,
            column,
        }
    }

    #[test]
    fn test_single_own_seat() {
        let grid = SeatGrid::mobile(&[seat(2, 3, 10)], Some(10));
        for row in 0..DEFAULT_ROWS {
            for column in 0..DEFAULT_COLUMNS {
                let expected = if (row, column) == (2, 3) {
                    SeatCell::Mine
                } else {
                    SeatCell::Available
                };
                assert_eq!(grid.cell(row, column), Some(expected));
            }
        }
        assert_eq!(grid.my_seat(), Some(SeatCoord { row: 2, column: 3 }));
        assert_eq!(grid.available_count(), 29);
    }

    #[test]
    fn test_oversized_layout_yields_empty_grid() {
        let grid = SeatGrid::derive(70_000, 70_000, &[seat(1, 1, 10)], Some(10));
        assert_eq!((grid.rows(), grid.columns()), (0, 0));
        assert_eq!(grid.capacity(), 0);
        assert_eq!(grid.cell(1, 1), None);
        assert_eq!(grid.my_seat(), None);

        let grid = SeatGrid::derive(100, 100, &[], None);
        assert_eq!(grid.capacity(), 10_000);
        assert_eq!(SeatGrid::derive(100, 101, &[], None).capacity(), 0);
    }

    #[test]
    fn test_taken_by_other_and_out_of_range() {
        let grid = SeatGrid::derive(2, 2, &[seat(0, 1, 4), seat(5, 5, 6)], Some(10));
        assert_eq!(grid.cell(0, 1), Some(SeatCell::TakenByOther { student_id: 4 }));
        assert_eq!(grid.available_count(), 3);
        assert_eq!(grid.cell(5, 5), None);
        assert_eq!(grid.my_seat(), None);
    }

    #[test]
    fn test_selection_rules() {
        let grid = SeatGrid::derive(2, 2, &[seat(0, 0, 4), seat(1, 1, 10)], Some(10));
        let mut selection = SeatSelection::default();

        assert!(!selection.select(&grid, 0, 0));
        assert_eq!(selection.selected(), None);

        assert!(selection.select(&grid, 1, 1));
        assert!(selection.select(&grid, 0, 1));
        assert_eq!(selection.selected(), Some(SeatCoord { row: 0, column: 1 }));

        assert!(!selection.select(&grid, 9, 9));
        selection.clear();
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn test_render_marks() {
        let grid = SeatGrid::derive(1, 3, &[seat(0, 0, 4), seat(0, 2, 10)], Some(10));
        let text = grid.render(Some(SeatCoord { row: 0, column: 1 }));
        let last = text.lines().nth(1).unwrap();
        assert!(last.ends_with("x  #  *"));
    }
}
