use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Fixed board presets offered to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 9x9, 10 mines
    #[default]
    Easy,
    /// 16x16, 40 mines
    Medium,
    /// 16 rows by 30 columns, 99 mines
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked(9, 9, 10),
            Self::Medium => GameConfig::new_unchecked(16, 16, 40),
            Self::Hard => GameConfig::new_unchecked(16, 30, 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ConfigProblem::UnknownDifficulty.into())
    }
}

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    /// No further moves are accepted once the game is won or lost
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Outcome of the primary action on a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Cells opened by this action, game still in progress.
    Revealed(Vec<Coord2>),
    /// Cells opened by this action, which completed the board.
    Won(Vec<Coord2>),
    /// The mine that was triggered. Every unflagged mine is now revealed.
    HitMine(Coord2),
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub fn revealed_cells(&self) -> &[Coord2] {
        match self {
            Self::Revealed(cells) | Self::Won(cells) => cells,
            Self::NoChange | Self::HitMine(_) => &[],
        }
    }
}

/// Snapshot of the session counters for the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub game_state: GameState,
    pub flag_count: CellCount,
    pub mine_count: CellCount,
    /// Mines minus flags, negative when over-flagged.
    pub mines_left: i32,
    pub elapsed_seconds: u64,
}

/// One game from start to finish. A new game replaces the whole session.
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    state: GameState,
    flag_count: CellCount,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Starts a preset game with a freshly seeded random layout.
    pub fn new_game(difficulty: Difficulty) -> Result<Self> {
        Self::with_generator(
            difficulty.config(),
            RandomMineGenerator::from_entropy(PlacementStrategy::default()),
        )
    }

    /// Starts a preset game whose layout is fully determined by `seed`.
    pub fn new_game_seeded(difficulty: Difficulty, seed: u64) -> Result<Self> {
        Self::with_generator(
            difficulty.config(),
            RandomMineGenerator::new(seed, PlacementStrategy::default()),
        )
    }

    pub fn with_generator(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let board = Board::generate(config, generator)?;
        log::info!(
            "New game: {}x{} with {} mines",
            config.rows(),
            config.cols(),
            config.mines()
        );
        Ok(Self {
            board,
            state: GameState::Playing,
            flag_count: 0,
            started_at: None,
            ended_at: None,
            triggered_mine: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count()) - i32::from(self.flag_count)
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn get_cell(&self, coords: Coord2) -> Result<CellView> {
        self.board.cell(coords).map(Cell::view)
    }

    /// Reveal, or nothing if the cell cannot be revealed or the game is over.
    pub fn on_cell_primary_action(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.state.is_terminal() {
            return Ok(RevealOutcome::NoChange);
        }

        Ok(match self.board.reveal(coords)? {
            RevealResult::NoChange => RevealOutcome::NoChange,
            RevealResult::HitMine(mine) => {
                self.mark_started();
                self.triggered_mine = Some(mine);
                self.board.finalize_loss();
                self.end_game(GameState::Lost);
                RevealOutcome::HitMine(mine)
            }
            RevealResult::Revealed(cells) => {
                self.mark_started();
                if self.board.check_win() {
                    self.end_game(GameState::Won);
                    RevealOutcome::Won(cells)
                } else {
                    RevealOutcome::Revealed(cells)
                }
            }
        })
    }

    /// Toggle a flag, or nothing if the cell is revealed or the game is over.
    pub fn on_cell_secondary_action(&mut self, coords: Coord2) -> Result<FlagResult> {
        let coords = self.board.validate_coords(coords)?;
        if self.state.is_terminal() {
            return Ok(FlagResult::NoChange);
        }

        let result = self.board.toggle_flag(coords)?;
        if result.has_update() {
            self.mark_started();
            self.flag_count = self.flag_count.saturating_add_signed(result.delta().into());
            log::debug!("{:?} at {:?}, {} flags", result, coords, self.flag_count);
        }
        Ok(result)
    }

    pub fn get_state(&self) -> SessionState {
        self.state_at(Instant::now())
    }

    pub fn state_at(&self, now: Instant) -> SessionState {
        SessionState {
            game_state: self.state,
            flag_count: self.flag_count,
            mine_count: self.mine_count(),
            mines_left: self.mines_left(),
            elapsed_seconds: self.elapsed_secs_at(now),
        }
    }

    /// How many seconds have passed since the first move, 0 if there was none
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Instant::now())
    }

    /// Like [`GameSession::elapsed_secs`] but measured against `now`. Frozen
    /// once the game is over.
    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or(now)
                .saturating_duration_since(started_at)
                .as_secs(),
            None => 0,
        }
    }

    fn mark_started(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn end_game(&mut self, state: GameState) {
        if self.state.is_terminal() {
            return;
        }
        self.state = state;
        self.ended_at = Some(Instant::now());
        log::info!("Game over: {:?} after {}s", state, self.elapsed_secs());
    }
}
