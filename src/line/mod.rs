// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

use std::fmt;
use std::rc::Rc;
use std::cell::{Ref, RefMut, RefCell};
use ansi_term::{Colour, Style, ANSIString};

use super::util::{Direction, Direction::*};
use super::grid::{Grid, Square, SquareStatus, SquareStatus::FilledIn};

pub use self::solver::GapTuples;

/// Collapses a line of cells into the ordered lengths of its contiguous
/// filled runs. Gaps are not recorded; an all-empty line yields an empty
/// sequence.
pub fn run_lengths<I>(cells: I) -> Vec<usize>
    where I: IntoIterator<Item = bool>
{
    let mut result = Vec::<usize>::new();
    let mut current: usize = 0;
    for filled in cells {
        if filled {
            current += 1;
        } else if current > 0 {
            result.push(current);
            current = 0;
        }
    }
    if current > 0 {
        result.push(current);
    }
    result
}

pub trait DirectionalSequence
{
    fn get_row_index(&self) -> usize;
    fn get_direction(&self) -> Direction;
    fn get_grid(&self) -> &Rc<RefCell<Grid>>;

    fn square_index(&self, at: usize) -> (usize, usize) {
        match self.get_direction() {
            Horizontal => (at, self.get_row_index()),
            Vertical   => (self.get_row_index(), at),
        }
    }
    fn get_square(&self, index: usize) -> Ref<Square> {
        let grid = self.get_grid().borrow();
        let (x,y) = self.square_index(index);
        Ref::map(grid, |g| g.get_square(x, y))
    }
    fn get_square_mut(&self, index: usize) -> RefMut<Square> {
        let grid = self.get_grid().borrow_mut();
        let (x,y) = self.square_index(index);
        RefMut::map(grid, |g| g.get_square_mut(x, y))
    }
}

/// One row or column of the puzzle, together with the hint runs it must
/// realize. Rows and columns are the same thing viewed through a different
/// `Direction`; all solver logic lives here and is applied twice.
#[derive(Debug)]
pub struct Line {
    pub direction: Direction,
    pub index:     usize,
    pub length:    usize,
    pub runs:      Vec<usize>,
    pub grid:      Rc<RefCell<Grid>>,
}

impl Line {
    pub fn new(grid: &Rc<RefCell<Grid>>,
               direction: Direction,
               index: usize,
               run_lengths: &[usize]) -> Self
    {
        let length = match direction {
            Horizontal => grid.borrow().width(),
            Vertical   => grid.borrow().height(),
        };
        Line {
            direction,
            index,
            length,
            runs: run_lengths.to_vec(),
            grid: Rc::clone(grid),
        }
    }

    pub fn statuses(&self) -> Vec<SquareStatus> {
        (0..self.length).map(|i| self.get_square(i).get_status())
                        .collect()
    }

    /// The run-length sequence the line currently shows on the board.
    pub fn current_run_lengths(&self) -> Vec<usize> {
        run_lengths((0..self.length).map(|i| self.get_square(i).get_status() == FilledIn))
    }

    /// Whether the line's filled runs currently match its hints exactly
    /// (same count, same lengths, same order).
    pub fn matches_runs(&self) -> bool {
        self.current_run_lengths() == self.runs
    }

    /// Hint text as shown next to the line; an empty hint list reads "0".
    pub fn runs_text(&self) -> String {
        if self.runs.is_empty() {
            return String::from("0");
        }
        self.runs.iter()
                 .map(|len| len.to_string())
                 .collect::<Vec<_>>()
                 .join(" ")
    }

    pub fn runs_colored(&self, emit_color: bool) -> Vec<ANSIString> {
        let style = match emit_color && self.matches_runs() {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        };
        if self.runs.is_empty() {
            return vec![style.paint("0")];
        }
        self.runs.iter()
                 .map(|len| style.paint(len.to_string()))
                 .collect()
    }
}
impl DirectionalSequence for Line {
    fn get_row_index(&self) -> usize { self.index }
    fn get_direction(&self) -> Direction { self.direction }
    fn get_grid(&self)      -> &Rc<RefCell<Grid>> { &self.grid }
}
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} ({})", self.direction, self.index, self.runs_text())
    }
}
