//! Line-based terminal front end.
//!
//! Generic over its input and output so whole games can be scripted in tests.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use strictly_hangman::{
    Feedback, Outcome, ScoreStore, Session, SessionSnapshot, WordBank, apply, new_session,
};
use tracing::{debug, info, instrument, warn};

/// Typed in place of a guess to save the game and quit.
pub const STOP_COMMAND: &str = "STOP";

const RULES: &str = "\
Rules:
A word is picked at random from a list.
You have as many attempts as there are steps in the hangman drawing.
Some letters are revealed when the game starts.
Propose either a letter or a whole word (two characters or more).
A wrong word costs two attempts.
You cannot propose the same letter or word twice.
Type 'STOP' at any time to save the game and quit.
Good luck!";

/// How a game left the play loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// Won or lost.
    Finished(Outcome),
    /// The player typed `STOP`; the game was saved.
    Saved,
    /// Input ran out mid-game.
    Closed,
}

/// Interactive terminal session for one player.
#[derive(Debug)]
pub struct TerminalGame<R, W> {
    bank: WordBank,
    scores: ScoreStore,
    save_path: PathBuf,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalGame<R, W> {
    /// Creates a terminal game reading from `input` and printing to `output`.
    pub fn new(
        bank: WordBank,
        scores: ScoreStore,
        save_path: impl Into<PathBuf>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            bank,
            scores,
            save_path: save_path.into(),
            input,
            output,
        }
    }

    /// Consumes the game and returns its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks for the player's name, then runs the menu until the player quits,
    /// saves a game, or input ends.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to Hangman")?;
        let Some(player) = self.ask_name()? else {
            return Ok(());
        };
        self.register(&player)?;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Choose an option:")?;
            writeln!(self.output, "1. Start a game")?;
            writeln!(self.output, "2. Show the rules")?;
            writeln!(self.output, "3. Show the scores")?;
            writeln!(self.output, "4. Quit")?;

            let Some(choice) = self.read_line()? else {
                return Ok(());
            };
            match choice.trim() {
                "1" => {
                    let word = self.bank.pick_random_word()?;
                    let session = new_session(&player, &word, self.bank.max_errors());
                    match self.play(session)? {
                        GameEnd::Finished(_) => continue,
                        GameEnd::Saved | GameEnd::Closed => return Ok(()),
                    }
                }
                "2" => writeln!(self.output, "\n{}", RULES)?,
                "3" => self.print_scores()?,
                "4" => {
                    writeln!(self.output, "Thanks for playing! See you soon.")?;
                    return Ok(());
                }
                other => {
                    debug!(choice = other, "Invalid menu choice");
                    writeln!(self.output, "Invalid choice. Pick an option from 1 to 4.")?;
                }
            }
        }
    }

    /// Resumes the game saved at `path` and plays it to the end.
    ///
    /// A snapshot of a finished game is only reported, never replayed.
    ///
    /// # Errors
    ///
    /// Fails if the snapshot cannot be read or does not describe a valid game.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn resume(&mut self, path: impl AsRef<Path>) -> Result<GameEnd> {
        let path = path.as_ref();
        let session = SessionSnapshot::load(path)
            .and_then(|snapshot| snapshot.restore(self.bank.max_errors()))
            .with_context(|| format!("Could not resume the game saved at {}", path.display()))?;

        if let Some(outcome) = session.status().outcome() {
            writeln!(self.output, "This game is already over ({}).", outcome)?;
            writeln!(self.output, "The word was: {}", session.word())?;
            return Ok(GameEnd::Finished(outcome));
        }

        info!(player = %session.player_name(), "Resuming saved game");
        self.register(session.player_name())?;
        self.play(session)
    }

    /// Runs the turn loop until the game ends, is saved, or input ends.
    #[instrument(skip(self, session), fields(player = %session.player_name()))]
    pub fn play(&mut self, mut session: Session) -> Result<GameEnd> {
        while !session.status().is_over() {
            self.print_board(&session)?;

            let Some(line) = self.read_line()? else {
                warn!("Input closed mid-game");
                return Ok(GameEnd::Closed);
            };
            if line.trim().eq_ignore_ascii_case(STOP_COMMAND) {
                return self.save(&session);
            }

            match apply(&mut session, &line) {
                Ok(Feedback::Hit { .. }) => writeln!(self.output, "Good guess!")?,
                Ok(Feedback::Miss) => writeln!(self.output, "Wrong guess.")?,
                Ok(Feedback::WrongWord) => writeln!(self.output, "That's not the word.")?,
                Ok(Feedback::Finished(_)) => {}
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }

        let outcome = session
            .status()
            .outcome()
            .context("Play loop left an unfinished game")?;
        self.finish(&session, outcome)?;
        Ok(GameEnd::Finished(outcome))
    }

    fn finish(&mut self, session: &Session, outcome: Outcome) -> Result<()> {
        match outcome {
            Outcome::Won => {
                writeln!(self.output, "\nCongratulations, you found the word!")?;
                writeln!(self.output, "The word was: {}", session.word())?;
                if let Err(e) = self.scores.record_win(session.player_name()) {
                    warn!(error = %e, "Failed to record win");
                    writeln!(self.output, "Could not save your score!")?;
                }
            }
            Outcome::Lost => {
                writeln!(self.output, "\n-----------------------------")?;
                writeln!(self.output, "{}", self.bank.stage(*session.errors()))?;
                writeln!(self.output, "\nYou lost.")?;
                writeln!(self.output, "The word was: {}", session.word())?;
            }
        }
        Ok(())
    }

    fn save(&mut self, session: &Session) -> Result<GameEnd> {
        match SessionSnapshot::capture(session).save(&self.save_path) {
            Ok(()) => writeln!(self.output, "Game saved. See you soon!")?,
            Err(e) => {
                warn!(error = %e, "Failed to save game");
                writeln!(self.output, "Could not save the game: {}", e)?;
            }
        }
        Ok(GameEnd::Saved)
    }

    fn print_board(&mut self, session: &Session) -> Result<()> {
        let mask: Vec<String> = session.mask().iter().map(char::to_string).collect();
        let guessed: Vec<String> = session.guessed().iter().map(char::to_string).collect();

        writeln!(self.output, "\n-----------------------------")?;
        writeln!(self.output, "{}", self.bank.stage(*session.errors()))?;
        writeln!(self.output, "\nWord to guess: {}", mask.join(" "))?;
        writeln!(self.output, "Letters guessed: {}", guessed.join(" "))?;
        writeln!(self.output, "Attempts remaining: {}", session.attempts_remaining())?;
        writeln!(
            self.output,
            "Enter a letter or a word (or '{}' to save and quit):",
            STOP_COMMAND
        )?;
        Ok(())
    }

    fn print_scores(&mut self) -> Result<()> {
        writeln!(self.output, "\nCurrent scores:")?;
        match self.scores.board() {
            Ok(board) => {
                for score in board.ranked() {
                    writeln!(self.output, "{}: {}", score.name(), score.score())?;
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to read scores");
                writeln!(self.output, "Scores are unavailable.")?;
            }
        }
        Ok(())
    }

    fn ask_name(&mut self) -> Result<Option<String>> {
        loop {
            writeln!(self.output, "Enter your name:")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            let name = line.trim();
            if !name.is_empty() {
                return Ok(Some(name.to_string()));
            }
        }
    }

    /// Makes sure the player appears on the scoreboard. Failure is reported
    /// but does not stop the game.
    fn register(&mut self, player: &str) -> Result<()> {
        if let Err(e) = self.scores.register_player(player) {
            warn!(error = %e, "Failed to register player");
            writeln!(self.output, "Could not read the score file: {}", e.message)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
