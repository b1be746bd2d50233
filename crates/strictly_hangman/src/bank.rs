//! Word list and hangman drawings, loaded once and read-only afterwards.

use derive_getters::Getters;
use rand::seq::IndexedRandom;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Non-blank lines making up every drawing after the first.
pub const STAGE_HEIGHT: usize = 7;

/// Failure to build or draw from a [`WordBank`].
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BankError {
    /// A source file could not be opened or read.
    #[display("Failed to read {}: {}", path.display(), source)]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The stage source produced no drawing at all.
    #[display("Stage source contains no drawings")]
    NoStages,

    /// There is no word to pick from.
    #[display("Word bank is empty")]
    Empty,
}

/// Candidate words and the ordered hangman drawings.
///
/// `stages()[0]` is shown before any error and the last stage when the game
/// is lost, so the number of errors allowed is `stages().len() - 1`.
#[derive(Debug, Clone, Getters)]
pub struct WordBank {
    words: Vec<String>,
    stages: Vec<String>,
}

impl WordBank {
    /// Builds a bank from already-parsed words and stages.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::NoStages`] if `stages` is empty.
    #[instrument(skip_all, fields(words = words.len(), stages = stages.len()))]
    pub fn new(words: Vec<String>, stages: Vec<String>) -> Result<Self, BankError> {
        if stages.is_empty() {
            return Err(BankError::NoStages);
        }
        Ok(Self { words, stages })
    }

    /// Loads the word list and stage drawings from files.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::Io`] if either file cannot be read and
    /// [`BankError::NoStages`] if the stage file yields no drawing.
    #[instrument(skip_all, fields(words_path = %words_path.as_ref().display()))]
    pub fn load(
        words_path: impl AsRef<Path>,
        stages_path: impl AsRef<Path>,
    ) -> Result<Self, BankError> {
        let words_path = words_path.as_ref();
        let stages_path = stages_path.as_ref();
        debug!(stages_path = %stages_path.display(), "Loading word bank");

        let words = read_words(open(words_path)?).map_err(|source| BankError::Io {
            path: words_path.to_path_buf(),
            source,
        })?;
        let stages = read_stages(open(stages_path)?).map_err(|source| BankError::Io {
            path: stages_path.to_path_buf(),
            source,
        })?;

        let bank = Self::new(words, stages)?;
        info!(
            words = bank.words.len(),
            stages = bank.stages.len(),
            "Word bank loaded"
        );
        Ok(bank)
    }

    /// Parses a bank from in-memory readers.
    ///
    /// # Errors
    ///
    /// Same as [`WordBank::load`], with `<reader>` standing in for the path.
    #[instrument(skip_all)]
    pub fn from_readers(words: impl BufRead, stages: impl BufRead) -> Result<Self, BankError> {
        let io = |source| BankError::Io {
            path: PathBuf::from("<reader>"),
            source,
        };
        Self::new(read_words(words).map_err(io)?, read_stages(stages).map_err(io)?)
    }

    /// Errors allowed before a game is lost.
    pub fn max_errors(&self) -> usize {
        self.stages.len() - 1
    }

    /// Drawing for the given error count, clamped to the final stage.
    pub fn stage(&self, errors: usize) -> &str {
        let index = errors.min(self.max_errors());
        &self.stages[index]
    }

    /// Picks a word uniformly at random, lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::Empty`] if the bank has no words.
    #[instrument(skip(self), fields(words = self.words.len()))]
    pub fn pick_random_word(&self) -> Result<String, BankError> {
        let word = self.words.choose(&mut rand::rng()).ok_or_else(|| {
            warn!("No words to pick from");
            BankError::Empty
        })?;
        debug!(len = word.chars().count(), "Picked word");
        Ok(word.to_lowercase())
    }
}

fn open(path: &Path) -> Result<BufReader<File>, BankError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| BankError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// One word per line; blank lines are skipped.
fn read_words(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

/// First line is stage 0 as-is; every following stage is [`STAGE_HEIGHT`]
/// non-blank lines joined with newlines. A trailing partial block is dropped.
fn read_stages(reader: impl BufRead) -> std::io::Result<Vec<String>> {
    let mut lines = reader.lines();
    let mut stages = match lines.next() {
        Some(first) => vec![first?],
        None => return Ok(Vec::new()),
    };

    let mut block: Vec<String> = Vec::with_capacity(STAGE_HEIGHT);
    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        block.push(line);
        if block.len() == STAGE_HEIGHT {
            stages.push(block.join("\n"));
            block.clear();
        }
    }

    if !block.is_empty() {
        debug!(lines = block.len(), "Dropping incomplete trailing stage");
    }
    Ok(stages)
}
