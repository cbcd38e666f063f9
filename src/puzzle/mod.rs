// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

use std::fmt;
use std::rc::Rc;
use std::cell::RefCell;
use std::convert::TryFrom;
use log::info;
use rand::Rng;
use yaml_rust::Yaml;

use super::grid::{Grid, SquareStatus, SquareStatus::{CrossedOut, FilledIn, Unknown}, Error};
use super::util::{ralign, ralign_joined_coloreds, Direction::*};
use super::line::{Line, run_lengths};

pub use self::solver::{Solver, SolverState, TICKS_BETWEEN_SOLVES};

/// Fraction of squares that end up filled in a generated puzzle. Exposed as
/// a CLI flag; this default matches the density the game has always used.
pub const DEFAULT_FILL_PROBABILITY: f64 = 0.4;

/// One puzzle session: the shared grid, its row and column lines (which carry
/// the hints), the win flag and the auto-solver state. Replaced wholesale on
/// "new puzzle"; nothing here outlives the session.
#[derive(Debug)]
pub struct Puzzle {
    pub rows: Vec<Line>,
    pub cols: Vec<Line>,
    pub grid: Rc<RefCell<Grid>>,
    solved: bool,
    solver: Solver,
}

impl Puzzle {
    pub fn new(grid: &Rc<RefCell<Grid>>,
               row_run_lengths: &[Vec<usize>],
               col_run_lengths: &[Vec<usize>]) -> Self
    {
        let rows = (0..grid.borrow().height()).map(|y| Line::new(grid, Horizontal, y, &row_run_lengths[y]))
                                              .collect::<Vec<_>>();
        let cols = (0..grid.borrow().width()).map(|x| Line::new(grid, Vertical, x, &col_run_lengths[x]))
                                             .collect::<Vec<_>>();
        Puzzle {
            rows,
            cols,
            grid: Rc::clone(grid),
            solved: false,
            solver: Solver::new(),
        }
    }
    pub fn width(&self) -> usize { self.grid.borrow().width() }
    pub fn height(&self) -> usize { self.grid.borrow().height() }

    /// Builds a random puzzle: each square of a throwaway solution grid is
    /// filled with probability `fill_probability`, hints are derived from its
    /// rows and columns, and the solution itself is dropped. The hints are
    /// the only record of the target; no solvability check is made, so a
    /// generated puzzle may be ambiguous.
    pub fn generate<R: Rng>(width: usize,
                            height: usize,
                            fill_probability: f64,
                            rng: &mut R) -> Self
    {
        let solution: Vec<Vec<bool>> =
            (0..height).map(|_| (0..width).map(|_| rng.gen::<f64>() < fill_probability)
                                          .collect())
                       .collect();
        let row_run_lengths = solution.iter()
                                      .map(|row| run_lengths(row.iter().cloned()))
                                      .collect::<Vec<_>>();
        let col_run_lengths = (0..width).map(|x| run_lengths((0..height).map(|y| solution[y][x])))
                                        .collect::<Vec<_>>();

        let grid = Rc::new(RefCell::new(Grid::new(width, height)));
        info!("generated {}x{} puzzle with fill probability {}", width, height, fill_probability);
        Puzzle::new(&grid, &row_run_lengths, &col_run_lengths)
    }

    pub fn from_yaml(doc: &Yaml) -> Puzzle
    {
        let row_run_lengths = Self::_parse_lines(&doc["rows"]);
        let col_run_lengths = Self::_parse_lines(&doc["cols"]);
        let grid = Rc::new(RefCell::new(
            Grid::new(col_run_lengths.len(), row_run_lengths.len())
        ));
        Puzzle::new(&grid, &row_run_lengths, &col_run_lengths)
    }

    fn _parse_lines(input: &Yaml) -> Vec<Vec<usize>> {
        let list: &Vec<Yaml> = input.as_vec().unwrap();
        list.iter()
            .map(|yaml_val| Self::_parse_line_runs(yaml_val))
            .collect()
    }

    fn _parse_line_runs(input: &Yaml) -> Vec<usize> {
        match input {
            Yaml::String(_)  => { input.as_str().unwrap()
                                       .split_whitespace()
                                       .map(|int| int.trim().parse().unwrap())
                                       .collect()
                                },
            Yaml::Integer(_) => { vec![ usize::try_from(input.as_i64().unwrap()).unwrap() ] }
            Yaml::Null       => { vec![] }
            _ => panic!("Unexpected data type: {:?}", input),
        }
    }

    /// Resets every square to unknown but keeps the hints (and the current
    /// auto-solver state) intact.
    pub fn clear(&mut self) {
        self.grid.borrow_mut().clear();
        self.solved = false;
    }

    /// The three-state click cycle: a known square reverts to unknown, an
    /// unknown square becomes crossed-out in mark mode or filled otherwise.
    /// Ignores clicks outside the grid and does nothing once the puzzle is
    /// won; the board stays frozen until it is cleared or replaced.
    pub fn toggle(&mut self, x: usize, y: usize, mark_mode: bool) {
        if self.solved {
            return;
        }
        if !self.grid.borrow().contains(x, y) {
            return;
        }
        let current = self.grid.borrow().get_square(x, y).get_status();
        let next = match current {
            Unknown if mark_mode => CrossedOut,
            Unknown              => FilledIn,
            _                    => Unknown,
        };
        self.grid.borrow_mut().get_square_mut(x, y).set_status(next);
        self.detect_win();
    }

    pub fn square_status(&self, x: usize, y: usize) -> Result<SquareStatus, Error> {
        self.grid.borrow().status_at(x, y)
    }

    pub fn row_hint_text(&self, y: usize) -> Option<String> {
        self.rows.get(y).map(|row| row.runs_text())
    }
    pub fn col_hint_text(&self, x: usize) -> Option<String> {
        self.cols.get(x).map(|col| col.runs_text())
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Recomputes the win flag: every row and column must currently show
    /// exactly its hinted run sequence.
    pub fn detect_win(&mut self) -> bool {
        let won = self.rows.iter().all(|row| row.matches_runs())
               && self.cols.iter().all(|col| col.matches_runs());
        if won && !self.solved {
            info!("puzzle solved");
        }
        self.solved = won;
        won
    }
}

impl Puzzle {
    // helper functions for the board pretty-printer
    fn _fmt_line(out: &mut String,
                 prefix: &str,
                 left_delim: &str,
                 right_delim: &str,
                 columnwise_separator: &str,
                 content_parts: &[String])
    {
        out.push_str(prefix);
        out.push(' ');
        out.push_str(left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            out.push_str(s);
            if ((idx+1) % 5 == 0) && (idx < content_parts.len()-1) {
                out.push_str(columnwise_separator);
            }
        }
        out.push_str(right_delim);
        out.push('\n');
    }

    fn _fmt_header(&self,
                   out: &mut String,
                   line_idx: usize,
                   prefix_len: usize)
    {
        let mut content_parts = Vec::<String>::new();
        for col in &self.cols {
            let part: String;

            if line_idx < col.runs.len() {
                part = col.runs[col.runs.len()-1-line_idx].to_string();
            } else if col.runs.is_empty() && line_idx == 0 {
                part = String::from("0");
            } else {
                part = String::from("");
            }

            content_parts.push(format!(" {:-2}", part));
        }

        Self::_fmt_line(out,
                        &ralign("", prefix_len),
                        " ",
                        " ",
                        " ",
                        &content_parts)
    }

    /// Renders the board with its hints; with `emit_color`, hint prefixes of
    /// lines that already match their runs are dimmed.
    pub fn fmt_board(&self, emit_color: bool) -> String {
        let mut out = String::new();

        let prefix_len = self.rows.iter()
                                  .map(|row| row.runs_text().len())
                                  .max()
                                  .unwrap_or(0);
        let row_prefixes = self.rows.iter()
                                    .map(|row| ralign_joined_coloreds(&row.runs_colored(emit_color),
                                                                      prefix_len,
                                                                      emit_color))
                                    .collect::<Vec<_>>();
        let max_col_runs = self.cols.iter()
                                    .map(|col| col.runs.len().max(1))
                                    .max()
                                    .unwrap_or(1);
        let grid = self.grid.borrow();

        for i in (0..max_col_runs).rev() {
            self._fmt_header(&mut out, i, prefix_len);
        }

        // top board line
        Self::_fmt_line(&mut out,
                        &ralign("", prefix_len),
                        "\u{2554}",
                        "\u{2557}",
                        "\u{2564}",
                        &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                                          .collect::<Vec<_>>());

        for y in 0..self.height() {
            // board content line
            Self::_fmt_line(&mut out,
                            &row_prefixes[y],
                            "\u{2551}",
                            "\u{2551}",
                            "\u{2502}",
                            &grid.squares[y].iter()
                                            .map(|s| format!(" {:1} ", s))
                                            .collect::<Vec<_>>());

            // horizontal board separator line
            if ((y+1) % 5 == 0) && (y != self.height()-1) {
                Self::_fmt_line(&mut out,
                                &ralign("", prefix_len),
                                "\u{255F}",
                                "\u{2562}",
                                "\u{253C}",
                                &(0..self.width()).map(|_| String::from("\u{2500}\u{2500}\u{2500}"))
                                                  .collect::<Vec<_>>());
            }
        }
        // bottom board line
        Self::_fmt_line(&mut out,
                        &ralign("", prefix_len),
                        "\u{255A}",
                        "\u{255D}",
                        "\u{2567}",
                        &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                                          .collect::<Vec<_>>());

        out
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self,
           f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "{}", self.fmt_board(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use yaml_rust::YamlLoader;

    fn puzzle_2x2() -> Puzzle {
        // solution:  ■ .
        //            ■ ■
        let grid = Rc::new(RefCell::new(Grid::new(2, 2)));
        Puzzle::new(&grid, &[vec![1], vec![2]], &[vec![2], vec![1]])
    }

    #[test]
    fn generated_hints_account_for_every_filled_square() {
        let mut rng = StdRng::seed_from_u64(42);
        let puzzle = Puzzle::generate(10, 10, DEFAULT_FILL_PROBABILITY, &mut rng);
        assert_eq!(puzzle.rows.len(), 10);
        assert_eq!(puzzle.cols.len(), 10);
        // every filled square of the solution is counted once per direction
        let row_total: usize = puzzle.rows.iter().flat_map(|r| r.runs.iter()).sum();
        let col_total: usize = puzzle.cols.iter().flat_map(|c| c.runs.iter()).sum();
        assert_eq!(row_total, col_total);
    }

    #[test]
    fn hints_reproduce_a_known_solution() {
        let solution = vec![
            vec![true,  false, true ],
            vec![true,  true,  true ],
            vec![false, false, false],
        ];
        let row_runs = solution.iter()
                               .map(|row| run_lengths(row.iter().cloned()))
                               .collect::<Vec<_>>();
        let col_runs = (0..3).map(|x| run_lengths((0..3).map(|y| solution[y][x])))
                             .collect::<Vec<_>>();
        assert_eq!(row_runs, vec![vec![1, 1], vec![3], vec![]]);
        assert_eq!(col_runs, vec![vec![2], vec![1], vec![2]]);

        // marking exactly the solution's squares wins the puzzle
        let grid = Rc::new(RefCell::new(Grid::new(3, 3)));
        let mut puzzle = Puzzle::new(&grid, &row_runs, &col_runs);
        for y in 0..3 {
            for x in 0..3 {
                if solution[y][x] {
                    puzzle.toggle(x, y, false);
                }
            }
        }
        assert!(puzzle.is_solved());
    }

    #[test]
    fn from_yaml_accepts_strings_integers_and_nulls() {
        let docs = YamlLoader::load_from_str("
rows:
    - 1 1
    - 3
    -
cols:
    - 2
    - 1
    - 2
").unwrap();
        let puzzle = Puzzle::from_yaml(&docs[0]);
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.height(), 3);
        assert_eq!(puzzle.rows[0].runs, vec![1, 1]);
        assert_eq!(puzzle.rows[2].runs, Vec::<usize>::new());
        assert_eq!(puzzle.row_hint_text(2), Some(String::from("0")));
        assert_eq!(puzzle.col_hint_text(0), Some(String::from("2")));
    }

    #[test]
    fn toggle_cycles_through_three_states() {
        let mut puzzle = puzzle_2x2();
        puzzle.toggle(0, 0, false);
        assert_eq!(puzzle.square_status(0, 0), Ok(FilledIn));
        puzzle.toggle(0, 0, false);
        assert_eq!(puzzle.square_status(0, 0), Ok(Unknown));
        puzzle.toggle(0, 0, true);
        assert_eq!(puzzle.square_status(0, 0), Ok(CrossedOut));
        puzzle.toggle(0, 0, true);
        assert_eq!(puzzle.square_status(0, 0), Ok(Unknown));
        // a known square reverts regardless of the mode flag
        puzzle.toggle(0, 0, false);
        puzzle.toggle(0, 0, true);
        assert_eq!(puzzle.square_status(0, 0), Ok(Unknown));
    }

    #[test]
    fn toggle_ignores_out_of_bounds_clicks() {
        let mut puzzle = puzzle_2x2();
        puzzle.toggle(5, 0, false);
        puzzle.toggle(0, 17, true);
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(puzzle.square_status(x, y), Ok(Unknown));
            }
        }
    }

    #[test]
    fn win_detection_needs_every_line_to_match() {
        let mut puzzle = puzzle_2x2();
        puzzle.toggle(0, 0, false);
        puzzle.toggle(0, 1, false);
        assert!(!puzzle.is_solved());
        puzzle.toggle(1, 1, false);
        assert!(puzzle.is_solved());
    }

    #[test]
    fn near_miss_is_not_a_win() {
        // fill the right squares in row 0 but swap the two in row 1
        let grid = Rc::new(RefCell::new(Grid::new(2, 2)));
        let mut puzzle = Puzzle::new(&grid, &[vec![1], vec![1]], &[vec![2], vec![]]);
        puzzle.toggle(0, 0, false);
        puzzle.toggle(1, 1, false); // wrong column
        assert!(!puzzle.is_solved());
    }

    #[test]
    fn board_freezes_after_winning() {
        let mut puzzle = puzzle_2x2();
        puzzle.toggle(0, 0, false);
        puzzle.toggle(0, 1, false);
        puzzle.toggle(1, 1, false);
        assert!(puzzle.is_solved());
        puzzle.toggle(0, 0, false);
        assert_eq!(puzzle.square_status(0, 0), Ok(FilledIn));
        // clearing lifts the freeze
        puzzle.clear();
        assert!(!puzzle.is_solved());
        assert_eq!(puzzle.square_status(0, 0), Ok(Unknown));
        puzzle.toggle(0, 0, true);
        assert_eq!(puzzle.square_status(0, 0), Ok(CrossedOut));
    }

    #[test]
    fn clear_keeps_the_hints() {
        let mut puzzle = puzzle_2x2();
        puzzle.toggle(0, 0, false);
        puzzle.clear();
        assert_eq!(puzzle.row_hint_text(0), Some(String::from("1")));
        assert_eq!(puzzle.row_hint_text(1), Some(String::from("2")));
        assert_eq!(puzzle.square_status(0, 0), Ok(Unknown));
    }

    #[test]
    fn board_rendering_includes_hints_and_squares() {
        let mut puzzle = puzzle_2x2();
        puzzle.toggle(0, 0, false);
        let board = puzzle.fmt_board(false);
        assert!(board.contains("\u{2554}")); // top-left corner
        assert!(board.contains("\u{25A0}")); // the filled square
        assert!(board.contains("1 "));       // row hint prefix
    }
}
