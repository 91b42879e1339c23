//! Pair presentation controller.
//!
//! Owns the shuffled worklist and the cursor, maps each [`Decision`] onto
//! relocations and advances through the list two images at a time, with a
//! single trailing image when the list has odd length.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::relocator::{Category, Relocation, RelocationError, Relocator};
use super::validator::filter_valid_images;

/// A user's answer to the currently presented snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    KeepLeft,
    KeepRight,
    DiscardBoth,
    Keep,
    Discard,
}

impl Decision {
    fn fits(&self, mode: Mode) -> bool {
        match self {
            Decision::KeepLeft | Decision::KeepRight | Decision::DiscardBoth => mode == Mode::Pair,
            Decision::Keep | Decision::Discard => mode == Mode::Single,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Pair,
    Single,
    Terminated,
}

/// What the presentation layer should render right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub left: Option<&'a Path>,
    pub right: Option<&'a Path>,
    /// 1-based position of `left` in the worklist
    pub position: usize,
    pub total: usize,
}

/// Result of handing a decision to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advanced(Mode),
    Ignored,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no valid image files were found to process")]
    EmptyInput,

    #[error("failed to create destination directories: {0}")]
    Destinations(#[source] io::Error),

    #[error(transparent)]
    Relocation(#[from] RelocationError),
}

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Fixed shuffle seed; `None` shuffles from the thread RNG
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub kept: usize,
    pub discarded: usize,
    pub skipped: usize,
}

pub struct Session {
    worklist: Vec<PathBuf>,
    cursor: usize,
    aborted: bool,
    relocator: Relocator,
    stats: SessionStats,
}

impl Session {
    /// Validate the candidates, shuffle them and prepare the destination directories.
    pub fn start<P: AsRef<Path>>(
        candidates: &[P],
        options: &SessionOptions,
        relocator: Relocator,
    ) -> Result<Self, SessionError> {
        let report = filter_valid_images(candidates);
        if report.valid.is_empty() {
            warn!(
                "No valid image files were found to process ({} rejected)",
                report.rejected.len()
            );
            return Err(SessionError::EmptyInput);
        }
        let mut worklist = report.valid;

        match options.seed {
            Some(seed) => {
                debug!("Shuffling worklist with seed {}", seed);
                worklist.shuffle(&mut StdRng::seed_from_u64(seed));
            }
            None => worklist.shuffle(&mut rand::thread_rng()),
        }

        Self::from_worklist(worklist, relocator)
    }

    /// Build a session over an already validated worklist, keeping its order.
    pub fn from_worklist(
        worklist: Vec<PathBuf>,
        relocator: Relocator,
    ) -> Result<Self, SessionError> {
        if worklist.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        relocator
            .destinations()
            .ensure()
            .map_err(SessionError::Destinations)?;

        info!("Session started with {} image(s)", worklist.len());
        Ok(Self {
            worklist,
            cursor: 0,
            aborted: false,
            relocator,
            stats: SessionStats::default(),
        })
    }

    pub fn mode(&self) -> Mode {
        if self.aborted || self.cursor >= self.worklist.len() {
            Mode::Terminated
        } else if self.cursor + 1 < self.worklist.len() {
            Mode::Pair
        } else {
            Mode::Single
        }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let mode = self.mode();
        let (left, right) = match mode {
            Mode::Pair => (
                Some(self.worklist[self.cursor].as_path()),
                Some(self.worklist[self.cursor + 1].as_path()),
            ),
            Mode::Single => (Some(self.worklist[self.cursor].as_path()), None),
            Mode::Terminated => (None, None),
        };

        Snapshot {
            mode,
            left,
            right,
            position: (self.cursor + 1).min(self.worklist.len()),
            total: self.worklist.len(),
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Apply a decision to the current snapshot and advance.
    ///
    /// Decisions arriving after termination, or that don't match the current
    /// mode, are ignored. A relocation failure ends the session; moves already
    /// made for the same pair stay where they are.
    pub fn decide(&mut self, decision: Decision) -> Result<Step, SessionError> {
        let mode = self.mode();
        if !decision.fits(mode) {
            debug!("Ignoring {:?} while in {:?}", decision, mode);
            return Ok(Step::Ignored);
        }

        let left = self.worklist[self.cursor].clone();
        let moves: Vec<(PathBuf, Category)> = match decision {
            Decision::KeepLeft => vec![
                (left, Category::Kept),
                (self.worklist[self.cursor + 1].clone(), Category::Discarded),
            ],
            Decision::KeepRight => vec![
                (self.worklist[self.cursor + 1].clone(), Category::Kept),
                (left, Category::Discarded),
            ],
            Decision::DiscardBoth => vec![
                (left, Category::Discarded),
                (self.worklist[self.cursor + 1].clone(), Category::Discarded),
            ],
            Decision::Keep => vec![(left, Category::Kept)],
            Decision::Discard => vec![(left, Category::Discarded)],
        };

        info!("Decision {:?} at position {}", decision, self.cursor + 1);
        for (path, category) in &moves {
            if let Err(e) = self.apply(path, *category) {
                error!("Aborting session: {}", e);
                self.aborted = true;
                return Err(e.into());
            }
        }

        self.cursor += moves.len();
        let next = self.mode();
        if next == Mode::Terminated {
            info!(
                "Session finished: {} kept, {} discarded, {} skipped",
                self.stats.kept, self.stats.discarded, self.stats.skipped
            );
        }
        Ok(Step::Advanced(next))
    }

    fn apply(&mut self, path: &Path, category: Category) -> Result<(), RelocationError> {
        match self.relocator.relocate(path, category)? {
            Relocation::Moved { dest } => {
                debug!("{:?} now at {:?}", path, dest);
                match category {
                    Category::Kept => self.stats.kept += 1,
                    Category::Discarded => self.stats.discarded += 1,
                }
            }
            Relocation::SkippedMissing => self.stats.skipped += 1,
        }
        Ok(())
    }
}
