//! The `peakmatch play` command.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use peakmatch_core::config::load_config_from;
use peakmatch_core::engine::SelectOutcome;
use peakmatch_core::history::HistoryStore;
use peakmatch_core::model::{Dataset, Side, TileRef};
use peakmatch_core::parser;
use peakmatch_core::session::{Screen, SessionController};
use peakmatch_core::storage::JsonFileStore;
use peakmatch_core::traits::KeyValueStore;

use crate::render;

type Session = SessionController<JsonFileStore>;
type Input = Lines<BufReader<Stdin>>;

enum Flow {
    Continue,
    Done,
}

pub async fn execute(
    name: String,
    dataset_path: Option<PathBuf>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if dataset_path.is_some() {
        config.dataset = dataset_path;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    let dataset = match &config.dataset {
        Some(path) => parser::parse_dataset(path)?,
        None => Dataset::mountains(),
    };
    let history = HistoryStore::open(JsonFileStore::new(&config.history_dir))?;
    tracing::debug!(
        history_dir = %config.history_dir.display(),
        sessions = history.len(),
        "history opened"
    );
    let mut session = SessionController::from_config(dataset, history, &config);

    session.start(&name)?;
    println!(
        "{}: match each {} with its {}.",
        session.dataset().name,
        session.dataset().left_title.to_lowercase(),
        session.dataset().right_title.to_lowercase()
    );
    println!("{}\n", render::PLAY_HELP);
    print_board(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let deadline = session.engine().and_then(|e| e.next_deadline());
        tokio::select! {
            _ = sleep_until(deadline) => {
                redraw_after_reset(&mut session, Instant::now());
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    session.exit(true);
                    println!("Input closed, quiz abandoned.");
                    break;
                };
                if let Flow::Done = handle_line(&mut session, &line, &mut lines).await? {
                    break;
                }
            }
        }
    }

    if session.screen() == Screen::Result {
        tokio::time::sleep(config.result_delay()).await;
        if let Some(result) = session.last_result() {
            println!("\n{}", render::result(result));
        }
    }

    Ok(())
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending::<()>().await,
    }
}

async fn handle_line(session: &mut Session, line: &str, lines: &mut Input) -> Result<Flow> {
    let mut redraw = false;

    for token in line.split_whitespace() {
        match token.to_lowercase().as_str() {
            "help" | "?" => println!("{}", render::PLAY_HELP),
            "board" => redraw = true,
            "pause" => {
                session.pause()?;
                println!("Paused. Type `resume` to continue.");
            }
            "resume" => {
                session.resume();
                redraw = true;
            }
            "exit" | "quit" => {
                println!("Are you sure you want to exit? Progress will be lost. [y/N]");
                let answer = lines.next_line().await?.unwrap_or_default();
                let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
                if session.exit(confirmed) {
                    println!("Quiz abandoned.");
                    return Ok(Flow::Done);
                }
                redraw = true;
            }
            other => match parse_tile(other) {
                Some(tile) => {
                    if select(session, tile)? {
                        return Ok(Flow::Done);
                    }
                    redraw = true;
                }
                None => println!("Unknown command `{token}`. Type `help` for commands."),
            },
        }
    }

    if redraw && !session.is_paused() {
        print_board(session);
    }
    Ok(Flow::Continue)
}

/// Returns `true` once the board is complete.
fn select(session: &mut Session, tile: TileRef) -> Result<bool> {
    match session.select(tile, Instant::now()) {
        Ok(SelectOutcome::Ignored) => println!("Already matched."),
        Ok(SelectOutcome::Matched { .. }) => println!("Match!"),
        Ok(SelectOutcome::Mismatched { .. }) => println!("Not a match."),
        Ok(SelectOutcome::Selected) => {}
        Ok(SelectOutcome::Completed { .. }) => {
            print_board(session);
            return Ok(true);
        }
        Err(e) if session.screen() == Screen::Result => {
            print_board(session);
            eprintln!("Warning: this session was not saved: {e:#}");
            return Ok(true);
        }
        Err(e) if e.is_user_error() => println!("{e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(false)
}

/// Parse `l3` / `r10` (1-based, as displayed) into a tile reference.
fn parse_tile(token: &str) -> Option<TileRef> {
    let (side, number) = token.split_at_checked(1)?;
    let side: Side = side.parse().ok()?;
    let number: usize = number.parse().ok()?;
    number.checked_sub(1).map(|pos| TileRef::new(side, pos))
}

/// Fire due resets and redraw if any tile went back to idle.
fn redraw_after_reset<S: KeyValueStore>(
    session: &mut SessionController<S>,
    now: Instant,
) -> bool {
    let reset = session.tick(now);
    if reset.is_empty() || session.is_paused() {
        return false;
    }
    print_board(session);
    true
}

fn print_board<S: KeyValueStore>(session: &SessionController<S>) {
    if let Some(engine) = session.engine() {
        println!("{}", render::board(session.dataset(), engine));
    }
}
