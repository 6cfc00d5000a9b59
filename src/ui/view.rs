//! Panel rendering
//!
//! Layout, top to bottom:
//! - API key form (key absent) or key status with the change hint
//! - Description editor
//! - Control bar (generate; download / copy once a result exists)
//! - Result panes: diagram source (left) and description (right)
//! - Help line
//!
//! An open notification is drawn last, centered over everything.

use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::credentials::CredentialState;
use crate::ui::state::{App, Focus, NotificationKind, DOWNLOAD_LABEL};

/// Render the whole UI
pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> std::io::Result<()> {
    terminal.draw(|f| draw(f, app))?;
    Ok(())
}

/// Draw one frame
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_key_panel(f, app, chunks[0]);
    render_description_panel(f, app, chunks[1]);
    render_controls(f, app, chunks[2]);
    render_results(f, app, chunks[3]);
    render_help(f, chunks[4]);

    if app.notification().is_some() {
        render_notification(f, app);
    }
}

fn focus_style(app: &App, focus: Focus) -> Style {
    if app.focus == focus {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

fn render_key_panel(f: &mut Frame, app: &App, area: Rect) {
    let (title, line) = match app.credential_state() {
        CredentialState::Absent => {
            let masked = "*".repeat(app.key_input.chars().count());
            (
                " OpenAI API Key (Enter to save) ",
                Line::from(Span::raw(masked)),
            )
        }
        CredentialState::Present => (
            " OpenAI API Key ",
            Line::from(vec![
                Span::styled("API key saved", Style::default().fg(Color::Green)),
                Span::styled("  [Ctrl+K] Change", Style::default().fg(Color::DarkGray)),
            ]),
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(focus_style(app, Focus::ApiKey));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_description_panel(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Database Description ")
        .border_style(focus_style(app, Focus::Description));

    let text: Text = if app.description.is_empty() && app.focus != Focus::Description {
        Line::from(Span::styled(
            "Describe your tables, fields and relationships...",
            Style::default().fg(Color::DarkGray),
        ))
        .into()
    } else {
        Text::raw(app.description.as_str())
    };

    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_controls(f: &mut Frame, app: &App, area: Rect) {
    let generate_style = if app.is_generating() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::styled("[Ctrl+G] ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.generate_label(), generate_style),
    ];

    if app.has_result() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled("[Ctrl+D] ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(DOWNLOAD_LABEL, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw("   "));
        spans.push(Span::styled("[Ctrl+Y] ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(app.copy_label(), Style::default().fg(Color::Cyan)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let diagram_block = Block::default().borders(Borders::ALL).title(" Diagram ");
    let diagram_lines: Vec<Line> = match (app.result(), app.rendered()) {
        (_, Some(rendered)) => {
            let mut lines = vec![Line::from(Span::styled(
                format!("Rendered: {}", rendered.svg_path.display()),
                Style::default().fg(Color::Green),
            ))];
            lines.push(Line::from(""));
            lines.extend(rendered.source.lines().map(|l| Line::from(l.to_string())));
            lines
        }
        (Some(result), None) => result
            .diagram_source
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect(),
        (None, None) => vec![Line::from(Span::styled(
            "No diagram yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    f.render_widget(
        Paragraph::new(diagram_lines)
            .block(diagram_block)
            .wrap(Wrap { trim: false })
            .scroll((app.preview_scroll, 0)),
        panes[0],
    );

    let description_block = Block::default()
        .borders(Borders::ALL)
        .title(" Description ")
        .border_style(focus_style(app, Focus::Preview));
    let description: Text = match app.description_preview() {
        Some(text) => Text::raw(text),
        None => Line::from(Span::styled(
            "No description yet",
            Style::default().fg(Color::DarkGray),
        ))
        .into(),
    };
    f.render_widget(
        Paragraph::new(description)
            .block(description_block)
            .wrap(Wrap { trim: false })
            .scroll((app.preview_scroll, 0)),
        panes[1],
    );
}

fn render_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(Span::styled(
        "Tab focus | Ctrl+G generate | Ctrl+D png | Ctrl+Y copy | Ctrl+K change key | Esc quit",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(help, area);
}

fn render_notification(f: &mut Frame, app: &App) {
    let Some(note) = app.notification() else {
        return;
    };

    let (title, color) = match note.kind {
        NotificationKind::Validation => (" Notice ", Color::Yellow),
        NotificationKind::Error => (" Error ", Color::Red),
        NotificationKind::Info => (" Info ", Color::Green),
    };

    let area = centered_rect(60, 7, f.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color));
    let body = vec![
        Line::from(note.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            "Enter / Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Rectangle `percent_x` wide and `height` tall, centered in `r`
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
