//! Gomoku board rendering and terminal-to-cell hit testing.

use std::collections::HashMap;

use gomoku_tui::types::{BOARD_SIZE, Move};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Terminal columns per board cell.
const CELL_WIDTH: u16 = 2;

/// Renders the board centered in `area` and returns the inner grid
/// rectangle used for mouse hit testing.
///
/// Stones placed by the first seat (`player_1_id`) draw black, any other id
/// draws white. The cursor cell is highlighted.
pub fn render_board(
    f: &mut Frame,
    area: Rect,
    view: Option<(&str, &[Move])>,
    cursor: (u16, u16),
) -> Rect {
    let board_area = center_rect(area, BOARD_SIZE * CELL_WIDTH + 2, BOARD_SIZE + 2);
    let block = Block::default().borders(Borders::ALL).title("Gomoku");
    let grid = block.inner(board_area);

    // true = black stone (first seat).
    let mut stones: HashMap<(u16, u16), bool> = HashMap::new();
    if let Some((player_1_id, moves)) = view {
        for m in moves {
            stones.insert((m.x_coord, m.y_coord), m.player_id == player_1_id);
        }
    }

    let mut lines = Vec::with_capacity(BOARD_SIZE as usize);
    for row in 0..BOARD_SIZE {
        let mut spans = Vec::with_capacity(BOARD_SIZE as usize);
        for col in 0..BOARD_SIZE {
            let (symbol, style) = match stones.get(&(col, row)) {
                Some(true) => (
                    "● ",
                    Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
                ),
                Some(false) => (
                    "○ ",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                None => ("· ", Style::default().fg(Color::DarkGray)),
            };
            let style = if (col, row) == cursor {
                style.bg(Color::Yellow)
            } else {
                style
            };
            spans.push(Span::styled(symbol, style));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, board_area);
    grid
}

/// Maps a terminal coordinate to a board cell, or `None` outside the grid.
pub fn hit_test(grid: Rect, column: u16, row: u16) -> Option<(u16, u16)> {
    if column < grid.x || row < grid.y {
        return None;
    }
    if column >= grid.x + BOARD_SIZE * CELL_WIDTH || row >= grid.y + BOARD_SIZE {
        return None;
    }
    Some(((column - grid.x) / CELL_WIDTH, row - grid.y))
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Length(area.width.saturating_sub(width) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(area.height.saturating_sub(height) / 2),
        ])
        .split(horizontal[1])[1]
}
