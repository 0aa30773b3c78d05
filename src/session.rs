//! Game session
//!
//! Alternates stage one and stage two until the player quits or runs out of
//! lives, carrying score and lives from stage to stage and raising the
//! difficulty level every few completed pairs.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::Cue;
use crate::consts::{PAIRS_PER_LEVEL, STARTING_LIVES};
use crate::error::GameError;
use crate::highscores::HighScore;
use crate::platform::{Engine, InputSource};
use crate::renderer::{self, Canvas};
use crate::settings::Settings;
use crate::sim::{Stage, StageOne, StageOutcome, StageReport, StageTwo, tick};

/// Difficulty level and progress toward the next one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    level: u32,
    counter: u32,
}

impl LevelProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Count a completed stage pair; every third one raises the level
    pub fn complete_pair(&mut self) {
        self.counter += 1;
        if self.counter >= PAIRS_PER_LEVEL {
            self.counter = 0;
            self.level += 1;
            log::info!("Difficulty raised to level {}", self.level);
        }
    }
}

/// How the session went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub outcome: StageOutcome,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub pairs_completed: u32,
    pub new_high_score: bool,
}

pub struct Session {
    high_score: HighScore,
    rng: Pcg32,
    score: u64,
    lives: u32,
    progress: LevelProgress,
    pairs_completed: u32,
}

impl Session {
    /// Load the high score and seed the RNG. A missing or corrupt high
    /// score file stops the game here.
    pub fn start(settings: &Settings) -> Result<Self, GameError> {
        let high_score = HighScore::load(&settings.high_score_path)?;
        let seed = settings.seed.unwrap_or_else(rand::random);
        Ok(Self::new(high_score, seed))
    }

    pub fn new(high_score: HighScore, seed: u64) -> Self {
        log::info!(
            "Session start: high score {}, seed {}",
            high_score.score(),
            seed
        );
        Self {
            high_score,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: STARTING_LIVES,
            progress: LevelProgress::new(),
            pairs_completed: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    /// Play stage pairs until one ends the session, then record the score
    pub fn run<C: Canvas, I: InputSource>(
        &mut self,
        engine: &mut Engine<C, I>,
    ) -> Result<SessionSummary, GameError> {
        engine.audio.play(Cue::MusicLoop);
        let outcome = self.play_pairs(|stage| play_stage(engine, stage))?;

        let new_high_score = self.high_score.record(self.score)?;
        let summary = SessionSummary {
            outcome,
            score: self.score,
            lives: self.lives,
            level: self.progress.level(),
            pairs_completed: self.pairs_completed,
            new_high_score,
        };
        log::info!("Session over: {:?}", summary);
        Ok(summary)
    }

    /// Alternate stage one and stage two, handing each to `play` and folding
    /// its report back in, until an outcome ends the session
    pub fn play_pairs<F>(&mut self, mut play: F) -> Result<StageOutcome, GameError>
    where
        F: FnMut(Stage) -> Result<StageReport, GameError>,
    {
        loop {
            let report = play(Stage::One(self.stage_one()))?;
            self.absorb(&report);
            if report.outcome.ends_session() {
                return Ok(report.outcome);
            }

            let report = play(Stage::Two(self.stage_two()))?;
            self.absorb(&report);
            if report.outcome.ends_session() {
                return Ok(report.outcome);
            }

            self.pairs_completed += 1;
            self.progress.complete_pair();
        }
    }

    fn stage_one(&self) -> StageOne {
        StageOne::new(
            self.score,
            self.high_score.score(),
            self.lives,
            self.progress.level(),
        )
    }

    fn stage_two(&mut self) -> StageTwo {
        StageTwo::new(
            self.score,
            self.high_score.score(),
            self.lives,
            self.progress.level(),
            &mut self.rng,
        )
    }

    fn absorb(&mut self, report: &StageReport) {
        self.score = report.score;
        self.lives = report.lives;
    }
}

/// Run one stage to completion on `engine`
pub fn play_stage<C: Canvas, I: InputSource>(
    engine: &mut Engine<C, I>,
    mut stage: Stage,
) -> Result<StageReport, GameError> {
    loop {
        let input = engine.input.poll()?;
        tick(&mut stage, &input);
        engine.audio.play_events(&stage.drain_events());
        renderer::draw_frame(&mut engine.canvas, &stage)?;

        if let Some(report) = stage.report() {
            if log::log_enabled!(log::Level::Debug) {
                match serde_json::to_string(&stage) {
                    Ok(json) => log::debug!("Final stage state: {}", json),
                    Err(err) => log::debug!("Stage snapshot failed: {}", err),
                }
            }
            return Ok(report);
        }
        engine.limiter.wait();
    }
}
