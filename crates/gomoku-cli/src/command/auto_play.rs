use std::path::PathBuf;

use gomoku_adaptive::{
    adaptive_match::AdaptiveMatch,
    controller::RatingController,
    difficulty::Difficulty,
};
use gomoku_engine::{GameOutcome, Side, TOTAL_CELLS};
use gomoku_evaluator::{
    ai_parameters::AiParameters,
    move_selector::{MoveSelector, SelectorSeed},
};
use serde::Serialize;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Number of games to simulate
    #[arg(long, default_value_t = 20)]
    games: usize,
    /// Fixed difficulty of the simulated human player
    #[arg(long, default_value_t = 2.0)]
    opponent_difficulty: f64,
    /// Ratings file, loaded on start if present and saved after the last game
    #[arg(long)]
    ratings: Option<PathBuf>,
    /// Rating constants (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the adaptive computer (32 hex digits)
    #[arg(long)]
    seed: Option<SelectorSeed>,
    /// Seed for the simulated human player (32 hex digits)
    #[arg(long)]
    opponent_seed: Option<SelectorSeed>,
    /// Abandon a game unrecorded after this many stones
    #[arg(long, default_value_t = TOTAL_CELLS)]
    max_moves: usize,
    /// Write the rating trajectory as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

/// State after one simulated game.
#[derive(Debug, Clone, Serialize)]
struct GameRecord {
    game: usize,
    /// `None` for draws and abandoned games.
    winner: Option<Side>,
    moves: usize,
    human_rating: i32,
    computer_rating: i32,
    difficulty: f64,
}

/// Plays out the current game. Returns the outcome, or `None` if the move limit was hit.
fn play_game(
    session: &mut AdaptiveMatch,
    opponent: &mut MoveSelector,
    opponent_params: &AiParameters,
    max_moves: usize,
) -> anyhow::Result<Option<GameOutcome>> {
    while session.game().board().stone_count() < max_moves {
        let selection = opponent.select(session.game().board(), Side::Human, opponent_params)?;
        if let Some(outcome) = session.play_human(selection.pos.row(), selection.pos.col())? {
            return Ok(Some(outcome));
        }
        if session.game().board().stone_count() >= max_moves {
            break;
        }
        if let Some(outcome) = session.play_computer()?.outcome {
            return Ok(Some(outcome));
        }
    }
    Ok(None)
}

/// Parameters of a player fixed at `difficulty`, clamped to the controller's range.
fn fixed_parameters(controller: &RatingController, difficulty: f64) -> AiParameters {
    let config = controller.config();
    Difficulty::clamped(difficulty, config.base_difficulty, config.max_difficulty).ai_parameters()
}

fn record_of(session: &AdaptiveMatch, game: usize, outcome: Option<GameOutcome>) -> GameRecord {
    let controller = session.controller();
    GameRecord {
        game,
        winner: outcome.and_then(GameOutcome::winner),
        moves: session.game().board().stone_count(),
        human_rating: controller.rating(Side::Human),
        computer_rating: controller.rating(Side::Computer),
        difficulty: controller.difficulty(),
    }
}

fn run_games(
    controller: RatingController,
    selector: MoveSelector,
    mut opponent: MoveSelector,
    opponent_params: &AiParameters,
    games: usize,
    max_moves: usize,
) -> anyhow::Result<(RatingController, Vec<GameRecord>)> {
    let mut session = AdaptiveMatch::new(controller, selector);
    let mut records = Vec::with_capacity(games);
    for game in 1..=games {
        if game > 1 {
            session.next_game();
        }
        let outcome = play_game(&mut session, &mut opponent, opponent_params, max_moves)?;
        let record = record_of(&session, game, outcome);
        eprintln!(
            "Game #{game}: {} after {} stones | ratings {} / {} | difficulty {:.2}",
            match (outcome, record.winner) {
                (None, _) => "abandoned".to_owned(),
                (Some(_), None) => "draw".to_owned(),
                (Some(_), Some(winner)) => format!("{winner} wins"),
            },
            record.moves,
            record.human_rating,
            record.computer_rating,
            record.difficulty,
        );
        records.push(record);
    }
    let score = session.scoreboard();
    eprintln!(
        "Final score: human {} / computer {} / draws {}",
        score.human_wins, score.computer_wins, score.draws
    );
    Ok((session.controller().clone(), records))
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        games,
        opponent_difficulty,
        ratings,
        config,
        seed,
        opponent_seed,
        max_moves,
        output,
    } = arg;

    let config = util::load_rating_config(config.as_deref())?;
    let controller = util::load_controller(config, ratings.as_deref())?;
    let opponent_params = fixed_parameters(&controller, *opponent_difficulty);
    eprintln!("Opponent parameters: {opponent_params:?}");

    let selector = util::build_selector(*seed);
    let opponent = util::build_selector(*opponent_seed);

    let (controller, records) = run_games(
        controller,
        selector,
        opponent,
        &opponent_params,
        *games,
        *max_moves,
    )?;

    if let Some(path) = ratings {
        util::save_controller(&controller, path)?;
        eprintln!("Saved ratings to {}", path.display());
    }
    if let Some(path) = output {
        util::write_json_file("trajectory", path, &records)?;
        eprintln!("Wrote trajectory to {}", path.display());
    }
    Ok(())
}
