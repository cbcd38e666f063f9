// vim: set ai et ts=4 sts=4:
use std::fmt;

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum SquareStatus {
    FilledIn,
    CrossedOut,
    Unknown,
}
impl fmt::Display for SquareStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            SquareStatus::FilledIn   => "FilledIn",
            SquareStatus::CrossedOut => "CrossedOut",
            SquareStatus::Unknown    => "Unknown",
        })
    }
}

// ------------------------------------------------

#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Error {
    OutOfBounds { x: usize, y: usize },
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OutOfBounds { x, y } =>
                write!(f, "square (col={:-2}, row={:-2}) lies outside the grid", x, y),
        }
    }
}

// ------------------------------------------------

#[derive(Debug, Clone)]
pub struct Square {
    row: usize,
    col: usize,
    status: SquareStatus,
}
impl Square {
    pub fn new(x: usize, y: usize) -> Square {
        Square {
            row: y,
            col: x,
            status: SquareStatus::Unknown,
        }
    }

    pub fn get_row(&self) -> usize { self.row }
    pub fn get_col(&self) -> usize { self.col }
    pub fn get_status(&self) -> SquareStatus { self.status }
    pub fn set_status(&mut self, new_status: SquareStatus) {
        self.status = new_status;
    }

    pub fn fmt_visual(&self) -> &str {
        match self.status {
            SquareStatus::CrossedOut => " ",
            SquareStatus::FilledIn   => "\u{25A0}",
            SquareStatus::Unknown    => ".",
        }
    }
}
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fmt_visual())
    }
}

// ------------------------------------------------

#[derive(Clone)]
pub struct Grid {
    pub squares: Vec<Vec<Square>>,
}
impl Grid {
    pub fn new(width: usize, height: usize)
        -> Self
    {
        Grid {
            squares: (0..height).map(|y| (0..width).map(|x| Square::new(x, y))
                                                   .collect::<Vec<_>>())
                                .collect(),
        }
    }

    pub fn width(&self) -> usize { self.squares[0].len() }
    pub fn height(&self) -> usize { self.squares.len() }
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    // unchecked accessors for in-grid callers that have already validated their indices
    pub fn get_square(&self, x: usize, y: usize) -> &Square {
        &self.squares[y][x]
    }
    pub fn get_square_mut(&mut self, x: usize, y: usize) -> &mut Square {
        &mut self.squares[y][x]
    }

    pub fn status_at(&self, x: usize, y: usize) -> Result<SquareStatus, Error> {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        Ok(self.get_square(x, y).get_status())
    }
    pub fn set_status_at(&mut self, x: usize, y: usize, status: SquareStatus)
        -> Result<(), Error>
    {
        if !self.contains(x, y) {
            return Err(Error::OutOfBounds { x, y });
        }
        self.get_square_mut(x, y).set_status(status);
        Ok(())
    }

    pub fn clear(&mut self) {
        for row in self.squares.iter_mut() {
            for square in row.iter_mut() {
                square.set_status(SquareStatus::Unknown);
            }
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_starts_unknown() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(grid.status_at(x, y), Ok(SquareStatus::Unknown));
            }
        }
    }

    #[test]
    fn bounds_are_checked() {
        let mut grid = Grid::new(4, 3);
        assert_eq!(grid.status_at(4, 0), Err(Error::OutOfBounds { x: 4, y: 0 }));
        assert_eq!(grid.set_status_at(0, 3, SquareStatus::FilledIn),
                   Err(Error::OutOfBounds { x: 0, y: 3 }));
        assert!(grid.set_status_at(3, 2, SquareStatus::FilledIn).is_ok());
        assert_eq!(grid.status_at(3, 2), Ok(SquareStatus::FilledIn));
    }

    #[test]
    fn clear_resets_every_square() {
        let mut grid = Grid::new(2, 2);
        grid.set_status_at(0, 0, SquareStatus::FilledIn).unwrap();
        grid.set_status_at(1, 1, SquareStatus::CrossedOut).unwrap();
        grid.clear();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(grid.status_at(x, y), Ok(SquareStatus::Unknown));
            }
        }
    }
}
