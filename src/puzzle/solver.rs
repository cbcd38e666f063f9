// vim: set ai et ts=4 sts=4 sw=4:
use log::{debug, info};

use super::Puzzle;

/// Ticks that must elapse between two solved lines. Propagation runs at a
/// fixed cadence rather than every frame so the host loop stays responsive
/// and the deductions remain watchable.
pub const TICKS_BETWEEN_SOLVES: u32 = 15;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum SolverState {
    Idle,
    Running,
}

/// Auto-solver bookkeeping, owned by its puzzle session. While running, each
/// elapsed cooldown solves one line, round-robin over all rows and then all
/// columns; a full pass without a single change means the single-line solver
/// is exhausted and the scheduler parks itself.
#[derive(Debug)]
pub struct Solver {
    state:           SolverState,
    cooldown:        u32,
    cursor:          usize, // next line to solve: rows first, then columns
    changed_in_pass: bool,
}

impl Solver {
    pub fn new() -> Self {
        Solver {
            state:           SolverState::Idle,
            cooldown:        0,
            cursor:          0,
            changed_in_pass: false,
        }
    }
}

impl Puzzle {
    /// Arms the auto-solver. The cooldown starts saturated, so the first
    /// tick after this call solves a line immediately.
    pub fn start_auto_solve(&mut self) {
        self.solver.state = SolverState::Running;
        self.solver.cooldown = TICKS_BETWEEN_SOLVES;
        info!("auto-solver started");
    }

    pub fn is_auto_solving(&self) -> bool {
        self.solver.state == SolverState::Running
    }

    /// Stops the auto-solver where it stands. Squares it already committed
    /// are ordinary board state and stay put.
    pub fn cancel_auto_solve(&mut self) {
        if self.solver.state != SolverState::Idle {
            self.solver.state = SolverState::Idle;
            info!("auto-solver cancelled");
        }
    }

    /// Advances the auto-solver by one unit of external time. Most ticks
    /// only age the cooldown; when it has elapsed, exactly one row or column
    /// is solved to completion before control returns, and win detection is
    /// re-run on the result.
    pub fn tick(&mut self) {
        if self.solver.state != SolverState::Running {
            return;
        }
        if self.solver.cooldown < TICKS_BETWEEN_SOLVES {
            self.solver.cooldown += 1;
            return;
        }
        self.solver.cooldown = 0;

        let cursor = self.solver.cursor;
        let changed = if cursor < self.rows.len() {
            self.rows[cursor].solve()
        } else {
            self.cols[cursor - self.rows.len()].solve()
        };
        debug!("auto-solve step at line {}/{}: changed={}",
               cursor, self.rows.len() + self.cols.len(), changed);

        self.solver.changed_in_pass |= changed;
        self.solver.cursor += 1;
        if self.solver.cursor == self.rows.len() + self.cols.len() {
            self.solver.cursor = 0;
            if !self.solver.changed_in_pass {
                // neither a row nor a column pass produced anything new
                self.solver.state = SolverState::Idle;
                info!("auto-solver exhausted");
            }
            self.solver.changed_in_pass = false;
        }

        self.detect_win();
    }
}
