//! Terminal rendering of the board, results and history.

use chrono::Local;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, Table};

use peakmatch_core::engine::MatchingEngine;
use peakmatch_core::history::HistoryRow;
use peakmatch_core::model::{Dataset, Side, TileState};
use peakmatch_core::session::QuizResult;

fn marker(state: TileState) -> &'static str {
    match state {
        TileState::Idle => "[ ]",
        TileState::Selected => "[*]",
        TileState::Matched => "[=]",
        TileState::Error => "[x]",
    }
}

/// Two-column board with 1-based positions, as typed by the player.
pub fn board(dataset: &Dataset, engine: &MatchingEngine) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new(&dataset.left_title),
        Cell::new("#"),
        Cell::new(&dataset.right_title),
    ]);

    let left = engine.tiles(Side::Left);
    let right = engine.tiles(Side::Right);
    for (pos, (l, r)) in left.iter().zip(right).enumerate() {
        let left_label = match dataset.item(l.item_id) {
            Some(item) => match &item.detail {
                Some(detail) => format!("{} ({detail})", item.left),
                None => item.left.clone(),
            },
            None => String::new(),
        };
        let right_label = dataset
            .item(r.item_id)
            .map(|item| item.right.clone())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(format!("l{}", pos + 1)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} {left_label}", marker(l.state))),
            Cell::new(format!("r{}", pos + 1)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{} {right_label}", marker(r.state))),
        ]);
    }

    let stats = engine.stats();
    format!(
        "{table}\nMatches: {}/{}   Moves: {}",
        stats.matches,
        engine.total_items(),
        stats.moves
    )
}

pub fn result(result: &QuizResult) -> String {
    format!(
        "Quiz complete, {}!\nScore: {}\nMoves: {}\n{}",
        result.user_name,
        result.score,
        result.moves,
        result.message()
    )
}

/// History table, most recent first.
pub fn history(rows: &[HistoryRow]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Date", "Name", "Score", "Moves", "Improvement"]);

    for row in rows {
        let date = row
            .entry
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M");
        table.add_row(vec![
            Cell::new(date),
            Cell::new(&row.entry.user_name),
            Cell::new(row.entry.score).set_alignment(CellAlignment::Right),
            Cell::new(row.entry.moves).set_alignment(CellAlignment::Right),
            Cell::new(row.trend()),
        ]);
    }

    table.to_string()
}

pub const PLAY_HELP: &str = "\
Commands:
  l<N> / r<N>   select a tile in the left or right column (e.g. `l3 r7`)
  board         redraw the board
  pause         pause the quiz
  resume        resume a paused quiz
  exit          leave the quiz (progress is lost)
  help          show this help";
