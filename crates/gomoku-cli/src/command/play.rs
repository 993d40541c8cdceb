use std::{
    io::{self, BufRead as _, Write as _},
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use gomoku_adaptive::adaptive_match::{AdaptiveMatch, MatchError};
use gomoku_engine::{GameOutcome, PlayError, Side};
use gomoku_evaluator::{ai_parameters::SearchDepth, move_selector::SelectorSeed};
use rand::Rng;

use crate::{util, view};

const BASE_THINK_TIME: Duration = Duration::from_millis(300);
const THINK_TIME_PER_DEPTH: Duration = Duration::from_millis(400);
const MAX_THINK_JITTER_MS: f64 = 500.0;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Ratings file, loaded on start if present and saved after every finished game
    #[arg(long)]
    ratings: Option<PathBuf>,
    /// Rating constants (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the computer's random choices (32 hex digits)
    #[arg(long)]
    seed: Option<SelectorSeed>,
    /// Answer immediately instead of pausing to "think"
    #[arg(long, default_value_t = false)]
    no_delay: bool,
}

enum Input {
    Move { row: usize, col: usize },
    Resign,
    Quit,
    Help,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut words = line.split(|c: char| c.is_whitespace() || c == ',').filter(|w| !w.is_empty());
    let first = words.next()?;
    let input = match first {
        "q" | "quit" | "exit" => Input::Quit,
        "r" | "resign" => Input::Resign,
        "h" | "help" | "?" => Input::Help,
        _ => {
            let row = first.parse().ok()?;
            let col = words.next()?.parse().ok()?;
            Input::Move { row, col }
        }
    };
    if words.next().is_some() {
        return None;
    }
    Some(input)
}

const HELP: &str = "Enter a move as `row col` (0-based). Commands: resign, quit, help.";

/// How long the computer appears to think at a given search depth.
fn think_time<R>(depth: SearchDepth, rng: &mut R) -> Duration
where
    R: Rng + ?Sized,
{
    let jitter = Duration::from_secs_f64(rng.random::<f64>() * MAX_THINK_JITTER_MS / 1000.0);
    BASE_THINK_TIME + THINK_TIME_PER_DEPTH * depth.get() + jitter
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        ratings,
        config,
        seed,
        no_delay,
    } = arg;

    let config = util::load_rating_config(config.as_deref())?;
    let controller = util::load_controller(config, ratings.as_deref())?;
    let mut session = AdaptiveMatch::new(controller, util::build_selector(*seed));
    let mut rng = rand::rng();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    println!("{HELP}");
    view::draw_status(&mut stdout, &session)?;
    view::draw_board(&mut stdout, &session)?;

    loop {
        if session.game().session_state().is_finished() {
            print!("Play again? [y/N] ");
        } else {
            print!("Your move: ");
        }
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        if session.game().session_state().is_finished() {
            if matches!(line.trim(), "y" | "yes") {
                session.next_game();
                view::draw_status(&mut stdout, &session)?;
                view::draw_board(&mut stdout, &session)?;
                continue;
            }
            break;
        }

        let Some(input) = parse_input(&line) else {
            eprintln!("Unrecognized input: {:?}", line.trim());
            continue;
        };
        let outcome = match input {
            Input::Help => {
                println!("{HELP}");
                continue;
            }
            Input::Quit => break,
            Input::Resign => Some(session.forfeit(Side::Human)?),
            Input::Move { row, col } => match session.play_human(row, col) {
                Ok(outcome) => outcome,
                Err(MatchError::Play(err @ PlayError::InvalidMove(_))) => {
                    eprintln!("{err}");
                    continue;
                }
                Err(err) => return Err(err.into()),
            },
        };

        let outcome = match outcome {
            Some(outcome) => Some(outcome),
            None => {
                view::draw_board(&mut stdout, &session)?;
                play_computer(&mut session, &mut rng, !*no_delay)?
            }
        };

        view::draw_board(&mut stdout, &session)?;
        if let Some(outcome) = outcome {
            finish_game(&session, outcome, ratings.as_deref())?;
            view::draw_status(&mut stdout, &session)?;
        }
    }

    Ok(())
}

fn play_computer<R>(
    session: &mut AdaptiveMatch,
    rng: &mut R,
    delay: bool,
) -> anyhow::Result<Option<GameOutcome>>
where
    R: Rng + ?Sized,
{
    println!("Computer is thinking...");
    let started = Instant::now();
    let computer = session.play_computer()?;
    if delay {
        let target = think_time(computer.params.search_depth(), rng);
        if let Some(rest) = target.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
    eprintln!(
        "Computer played {} ({}, depth {})",
        computer.selection.pos,
        computer.selection.reason,
        computer.params.search_depth().get(),
    );
    Ok(computer.outcome)
}

fn finish_game(
    session: &AdaptiveMatch,
    outcome: GameOutcome,
    ratings: Option<&Path>,
) -> anyhow::Result<()> {
    println!("{}", view::outcome_message(outcome));
    if let Some(change) = session.last_change().filter(|_| outcome.is_win()) {
        eprintln!(
            "Rating change: you {:+.1}, computer {:+.1} (K = {:.1}); difficulty now {:.2}",
            change.human_delta, change.computer_delta, change.k_factor, change.difficulty,
        );
    }
    if let Some(path) = ratings {
        util::save_controller(session.controller(), path)?;
        eprintln!("Saved ratings to {}", path.display());
    }
    Ok(())
}
