use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use crate::app::{App, InputMode, Screen};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.screen {
        Screen::Translate => render_translate_screen(app, frame, body_area),
        Screen::History => render_history_screen(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let history_indicator = if app.history_lines.is_empty() {
        String::new()
    } else {
        format!(" [{} in history]", app.history_lines.len())
    };

    let title = Line::from(vec![
        Span::styled(" traduire ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(history_indicator, Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match (app.screen, app.input_mode) {
        (Screen::History, _) => " HISTORY ",
        (Screen::Translate, InputMode::Editing) => " EDIT ",
        (Screen::Translate, InputMode::Normal) => " TRANSLATE ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = match (app.screen, app.input_mode) {
        (Screen::Translate, InputMode::Editing) => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" translate ", label_style),
            Span::styled(" Ctrl+U ", key_style),
            Span::styled(" clear ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" done ", label_style),
        ],
        (Screen::Translate, InputMode::Normal) => vec![
            Span::styled(" i ", key_style),
            Span::styled(" edit ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" translate ", label_style),
            Span::styled(" f/F ", key_style),
            Span::styled(" from ", label_style),
            Span::styled(" t/T ", key_style),
            Span::styled(" to ", label_style),
            Span::styled(" s ", key_style),
            Span::styled(" swap ", label_style),
            Span::styled(" h ", key_style),
            Span::styled(" history ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
        (Screen::History, _) => vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" scroll ", label_style),
            Span::styled(" c ", key_style),
            Span::styled(" clear history ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" back ", label_style),
        ],
    };

    let mut spans = vec![Span::styled(mode_text, mode_style)];
    spans.extend(hints);

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_translate_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [input_area, languages_area, action_area, result_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    render_input(app, frame, input_area);
    render_languages(app, frame, languages_area);
    render_action(app, frame, action_area);

    // Result panel only once something has been translated
    if let Some(result) = &app.last_result {
        // Title follows the pair the result was made with, not the pickers
        let title = match app.last_result_pair {
            Some((from, to)) => format!(" {} -> {} ", from.display_name(), to.display_name()),
            None => " Translation ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(title);

        let text = Text::from(vec![
            Line::from(Span::styled(
                result.original_text.as_str(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(Span::styled(
                result.translated_text.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ]);

        let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
        frame.render_widget(paragraph, result_area);
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Text to translate ");
    let inner = block.inner(area);

    // Scroll horizontally so the cursor stays inside the box
    let width = inner.width.max(1) as usize;
    let offset = app.input_cursor.saturating_sub(width - 1);

    let content = if app.input.is_empty() && !editing {
        Paragraph::new(Span::styled(
            "Press i to type...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(app.input.as_str()).scroll((0, offset as u16))
    };

    frame.render_widget(content.block(block), area);

    if editing {
        let cursor_x = (app.input_cursor - offset) as u16;
        frame.set_cursor_position((inner.x + cursor_x, inner.y));
    }
}

fn render_languages(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Languages ");

    let picker = |label: &'static str, name: &'static str| {
        vec![
            Span::styled(label, Style::default().fg(Color::DarkGray)),
            Span::styled(name, Style::default().fg(Color::Cyan).bold()),
        ]
    };

    let mut spans = picker(" From: ", app.source_language.display_name());
    spans.push(Span::raw("  ->  "));
    spans.extend(picker("To: ", app.target_language.display_name()));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_action(app: &App, frame: &mut Frame, area: Rect) {
    let line = if app.is_loading {
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        Line::from(Span::styled(
            format!(" Translating{}", dots),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ))
    } else if app.can_translate() {
        Line::from(vec![
            Span::styled(" [ Translate ] ", Style::default().bg(Color::Green).fg(Color::Black)),
            Span::styled(" press Enter", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            " [ Translate ] ",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_history_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    app.history_area = Some(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" History ({}) ", app.history_lines.len()));

    if app.history_lines.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "No translations yet.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = app
        .history_lines
        .iter()
        .map(|line| ListItem::new(line.as_str()))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.history_state);
}
