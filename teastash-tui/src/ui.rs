//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use teastash_core::{DraftField, RemoteStore};

use crate::app::{App, Mode};

/// Accent for titles and the add form
const ACCENT: Color = Color::Rgb(39, 174, 96);
/// Border color for unfocused blocks
const BORDER_DIM: Color = Color::Rgb(80, 80, 80);
/// Secondary text (bag counts, hints)
const TEXT_DIM: Color = Color::Rgb(130, 130, 130);

/// Render the application UI.
pub fn render<R: RemoteStore + 'static>(frame: &mut Frame, app: &mut App<R>) {
    let area = frame.area();

    // Layout: header, add form, tea table, footer
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(3), // Add form
        Constraint::Min(3),    // Tea table
        Constraint::Length(1), // Footer
    ])
    .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        " teastash - currently available tea",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    render_form(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);
}

/// Render the two-field add form.
fn render_form<R: RemoteStore + 'static>(
    frame: &mut Frame,
    app: &App<R>,
    area: ratatui::layout::Rect,
) {
    let fields = Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let draft = app.draft();
    let editing = app.mode == Mode::Edit;

    let field_block = |title: &'static str, focused: bool| {
        let style = if focused && editing {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(BORDER_DIM)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .title(title)
    };

    let name = Paragraph::new(draft.name.as_str())
        .block(field_block("Name", app.focus == DraftField::Name));
    let bags = Paragraph::new(draft.bags.as_str())
        .block(field_block("# of bags", app.focus == DraftField::Bags));

    frame.render_widget(name, fields[0]);
    frame.render_widget(bags, fields[1]);
}

/// Render the tea table.
fn render_table<R: RemoteStore + 'static>(
    frame: &mut Frame,
    app: &mut App<R>,
    area: ratatui::layout::Rect,
) {
    let teas = app.teas();

    if teas.is_empty() {
        let empty = Paragraph::new("No tea yet - press 'a' to add some")
            .style(Style::default().fg(TEXT_DIM))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(BORDER_DIM)));
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = teas
        .iter()
        .map(|tea| {
            let bags = format!("{} bags", tea.bags);
            let synced = if tea.id.is_some() { "" } else { "(syncing)" };
            Row::new(vec![
                Cell::from(tea.name.clone()),
                Cell::from(Span::styled(bags, Style::default().fg(TEXT_DIM))),
                Cell::from(Span::styled(synced, Style::default().fg(TEXT_DIM))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(60),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
        ],
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER_DIM)),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::Rgb(40, 60, 40))
            .add_modifier(Modifier::BOLD),
    );

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Render the key-hint footer for the current mode.
fn render_footer<R: RemoteStore + 'static>(
    frame: &mut Frame,
    app: &App<R>,
    area: ratatui::layout::Rect,
) {
    let hints = match app.mode {
        Mode::Browse => " a add | d drink | x delete | r refresh | j/k move | q quit",
        Mode::Edit => " type to edit | Tab switch field | Enter add | Esc cancel",
    };
    let footer = Paragraph::new(hints).style(Style::default().fg(TEXT_DIM));
    frame.render_widget(footer, area);
}
