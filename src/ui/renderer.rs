use crate::core::app::App;
use crate::core::conversation::ConversationKind;
use crate::core::message::TranscriptRole;
use crate::ui::dialogue::{dialogue_lines, status_text, EMPTY_DIALOGUE};
use crate::ui::picker::CharacterTile;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const PICKER_WIDTH: u16 = 34;

pub fn ui(f: &mut Frame, app: &App) {
    let snapshot = app.snapshot();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PICKER_WIDTH), Constraint::Min(0)])
        .split(f.area());

    render_picker(f, columns[0], app);

    let input_height = if app.accepts_text_input() { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(input_height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    let title = format!(
        "Parley v{} - {}",
        env!("CARGO_PKG_VERSION"),
        match app.mode {
            ConversationKind::TwoParty => "Two characters",
            ConversationKind::UserAndCharacter => "You and a character",
        }
    );

    let lines: Vec<Line> = dialogue_lines(&snapshot)
        .into_iter()
        .flat_map(|line| {
            let style = match line.role {
                TranscriptRole::User => Style::default().fg(Color::Cyan),
                TranscriptRole::Assistant => Style::default(),
                TranscriptRole::System | TranscriptRole::Other(_) => {
                    Style::default().fg(Color::DarkGray)
                }
            };
            let mut spans = Vec::new();
            if let Some(speaker) = line.speaker {
                spans.push(Span::styled(
                    format!("{speaker}: "),
                    style.add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::styled(line.content, style));
            [Line::from(spans), Line::from("")]
        })
        .collect();
    let lines = if lines.is_empty() {
        vec![Line::from(Span::styled(
            EMPTY_DIALOGUE,
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        lines
    };

    let dialogue = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    f.render_widget(dialogue, rows[0]);

    if app.accepts_text_input() {
        let (visible, cursor_col) = input_tail(&snapshot.input, rows[1].width);
        let input = Paragraph::new(visible)
            .style(Style::default().fg(Color::Cyan))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Message (Enter to send)"),
            );
        f.render_widget(input, rows[1]);
        f.set_cursor_position((
            rows[1].x.saturating_add(cursor_col),
            rows[1].y.saturating_add(1),
        ));
    }

    let status_line = match &snapshot.error {
        Some(error) => Line::from(vec![
            Span::styled(error.clone(), Style::default().fg(Color::Red)),
            Span::raw(" • "),
            Span::raw(status_text(&snapshot)),
        ]),
        None => Line::from(status_text(&snapshot)),
    };
    f.render_widget(Paragraph::new(status_line), rows[2]);

    let hints = match app.mode {
        ConversationKind::TwoParty => {
            "Space select • Ctrl+S start • Enter next turn • Tab mode • Esc clear • Ctrl+C quit"
        }
        ConversationKind::UserAndCharacter => {
            "Ctrl+Space select • Ctrl+S start • Enter send • Tab mode • Esc clear • Ctrl+C quit"
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        rows[3],
    );
}

/// The part of `input` that fits a bordered box `box_width` columns wide,
/// keeping the end of the text and one free column for the cursor, plus the
/// cursor's column relative to the box's left edge.
fn input_tail(input: &str, box_width: u16) -> (&str, u16) {
    let inner = usize::from(box_width.saturating_sub(2));
    let room = inner.saturating_sub(1);
    let count = input.chars().count();
    let skip = count.saturating_sub(room);
    let start = input
        .char_indices()
        .nth(skip)
        .map_or(input.len(), |(index, _)| index);
    let shown = count - skip;
    let cursor_col = u16::try_from(shown + 1)
        .unwrap_or(u16::MAX)
        .min(box_width.saturating_sub(2));
    (&input[start..], cursor_col)
}

fn render_picker(f: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app.tiles().iter().flat_map(tile_lines).collect();
    let picker = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.picker.title.as_str()),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(picker, area);
}

fn tile_lines(tile: &CharacterTile) -> [Line<'static>; 2] {
    let marker = match (tile.selected, tile.order) {
        (true, Some(order)) => format!("[{order}]"),
        (true, None) => "[x]".to_string(),
        (false, _) => "[ ]".to_string(),
    };
    let cursor = if tile.focused { "> " } else { "  " };
    let mut name_style = Style::default().add_modifier(Modifier::BOLD);
    if tile.selected {
        name_style = name_style.fg(Color::Green);
    }
    if tile.focused {
        name_style = name_style.add_modifier(Modifier::REVERSED);
    }
    [
        Line::from(vec![
            Span::raw(cursor),
            Span::raw(format!("{marker} ")),
            Span::styled(tile.character.name.clone(), name_style),
        ]),
        Line::from(Span::styled(
            format!("      {}", tile.character.role),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}
