// vim: set ai et ts=4 sts=4 sw=4:
use log::debug;

use super::{Line, DirectionalSequence};
use super::super::grid::{SquareStatus, SquareStatus::{CrossedOut, FilledIn, Unknown}};

/// Enumerates every way to distribute extra gap cells in front of a line's
/// runs: all k-tuples of non-negative integers whose sum is at most `slack`.
/// Tuple position i is the number of extra empty cells placed before run i,
/// on top of the mandatory single separator between adjacent runs. Whatever
/// slack a tuple leaves unspent ends up in the implicit trailing gap, which
/// is why the sum may fall short of `slack`.
///
/// The sequence is lazy and finite; for k = 0 it yields exactly one empty
/// tuple (the only gap assignment of a hintless line).
pub struct GapTuples {
    slack:   usize,
    current: Vec<usize>,
    done:    bool,
}

impl GapTuples {
    pub fn new(k: usize, slack: usize) -> Self {
        GapTuples {
            slack,
            current: vec![0; k],
            done: false,
        }
    }
}

impl Iterator for GapTuples {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let item = self.current.clone();

        // advance to the lexicographically next tuple whose sum stays within
        // the slack; carry into the previous position when one overflows
        let mut i = self.current.len();
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            self.current[i] += 1;
            for v in self.current[i+1..].iter_mut() {
                *v = 0;
            }
            if self.current.iter().sum::<usize>() <= self.slack {
                break;
            }
            self.current[i] = 0;
        }

        Some(item)
    }
}

/// Lays out one fully-determined candidate line of the given length: for each
/// run, first its gap (the mandatory separator plus the tuple's extra cells),
/// then the run's filled cells; everything after the last run stays empty.
///
/// A gap tuple whose arity differs from the hint count is a contract
/// violation inside this module, not reachable from callers.
fn realize_line(gaps: &[usize], runs: &[usize], length: usize) -> Vec<SquareStatus> {
    assert_eq!(gaps.len(), runs.len(), "gap tuple and hint list incompatible");

    let mut line = vec![CrossedOut; length];
    let mut index: usize = 0;
    let mut separator: usize = 0; // no mandatory separator before the first run
    for (&gap, &run) in gaps.iter().zip(runs.iter()) {
        index += gap + separator;
        debug_assert!(index + run <= length, "too much gap space");
        for cell in line[index..index+run].iter_mut() {
            *cell = FilledIn;
        }
        index += run;
        separator = 1;
    }
    line
}

impl Line {
    /// Runs single-line constraint propagation: enumerates every realization
    /// of this line's runs that is consistent with its already-known squares,
    /// and commits each square that comes out the same in all of them.
    /// Returns whether any square changed.
    ///
    /// Sound but deliberately incomplete; deductions that need several lines
    /// at once are out of reach and such squares simply stay unknown.
    pub fn solve(&self) -> bool {
        let statuses = self.statuses();
        let k = self.runs.len();

        // a hintless line has a single realization: all empty
        if k == 0 {
            if statuses.contains(&FilledIn) {
                return false;
            }
            return self.commit_forced(&statuses, &vec![false; self.length], &vec![true; self.length]);
        }

        let total: usize = self.runs.iter().sum();
        let min_length = total + (k - 1);
        if min_length > self.length {
            // unsatisfiable hints admit zero realizations; nothing to commit
            return false;
        }
        let slack = self.length - min_length;

        let mut can_be_filled = vec![false; self.length];
        let mut can_be_empty  = vec![false; self.length];
        for gaps in GapTuples::new(k, slack) {
            let realized = realize_line(&gaps, &self.runs, self.length);

            // discard realizations that contradict a known square
            let consistent = statuses.iter()
                                     .zip(realized.iter())
                                     .all(|(&known, &real)| known == Unknown || known == real);
            if !consistent {
                continue;
            }

            for (i, &real) in realized.iter().enumerate() {
                match real {
                    FilledIn   => can_be_filled[i] = true,
                    CrossedOut => can_be_empty[i]  = true,
                    Unknown    => unreachable!("realized line contains an unknown square"),
                }
            }
        }

        self.commit_forced(&statuses, &can_be_filled, &can_be_empty)
    }

    fn commit_forced(&self,
                     statuses: &[SquareStatus],
                     can_be_filled: &[bool],
                     can_be_empty: &[bool]) -> bool
    {
        let mut changed = false;
        for i in 0..self.length {
            if can_be_empty[i] && !can_be_filled[i] && statuses[i] != CrossedOut {
                self.get_square_mut(i).set_status(CrossedOut);
                changed = true;
            } else if can_be_filled[i] && !can_be_empty[i] && statuses[i] != FilledIn {
                self.get_square_mut(i).set_status(FilledIn);
                changed = true;
            }
        }
        if changed {
            debug!("committed forced squares in {}", self);
        }
        changed
    }
}
