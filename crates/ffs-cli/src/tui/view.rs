use std::path::Path;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::app::PickerState;
use ffs_core::matcher::MatchOptions;
use ffs_core::session::{CandidateSource, Session};

pub fn render_picker<S: CandidateSource>(
    f: &mut Frame,
    state: &mut PickerState,
    session: &Session<S>,
    root: &Path,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(1),    // results
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    // Input
    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::raw(&state.query),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(search_title(session.options())),
    );

    f.render_widget(input, chunks[0]);

    let cursor_x = chunks[0].x + 3 + state.query.chars().count() as u16;
    let cursor_y = chunks[0].y + 1;
    f.set_cursor_position((cursor_x, cursor_y));

    // Results
    let items: Vec<ListItem> = session
        .filtered()
        .iter()
        .map(|c| ListItem::new(Line::from(Span::raw(c.display_key.as_str()))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", root.display())),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[1], &mut state.list);

    // Status bar
    let mut spans = vec![
        Span::styled(
            format!(" {}/{} ", session.filtered().len(), session.full_set().len()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            " | ESC: cancel | Enter: select | Ctrl-R: refresh",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(msg) = &state.message {
        spans.push(Span::styled(
            format!("  {msg}"),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[2]);
}

fn search_title(options: &MatchOptions) -> &'static str {
    if options.case_insensitive {
        "Search (ignore case)"
    } else {
        "Search"
    }
}
