use crate::app::{App, AppMode, Field};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};
use tasktimer_core::{
    elapsed_label, format_duration, format_time, progress_percent, Notifier, Phase, Scheduler,
    UNNAMED_TASK,
};

pub fn draw<S: Scheduler, N: Notifier>(f: &mut Frame, app: &App<S, N>) {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.theme().background)),
        area,
    );

    if app.fullscreen {
        draw_fullscreen(f, area, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(9), Constraint::Length(7)])
        .split(columns[0]);

    draw_header(f, chunks[0], app);
    draw_session(f, left[0], app);
    draw_setup(f, left[1], app);
    draw_completed(f, columns[1], app);
    draw_status_bar(f, chunks[2], app);

    if let AppMode::Editing(field) = app.mode {
        draw_input_overlay(f, field, &app.input_buffer, app);
    }
}

fn draw_header<S: Scheduler, N: Notifier>(f: &mut Frame, area: Rect, app: &App<S, N>) {
    let theme = app.theme();
    let icons = &app.config.icons;
    let text = Line::from(vec![
        Span::raw(icons.header_left.clone()),
        Span::styled(
            "TASK TIMER",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        ),
        Span::raw(icons.header_right.clone()),
        Span::styled(
            "  stay focused and track your productivity",
            Style::default().fg(theme.gray),
        ),
    ]);
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.surface)),
        ),
        area,
    );
}

/// Countdown style: red and blinking inside the warning window.
fn countdown_style<S: Scheduler, N: Notifier>(app: &App<S, N>) -> Style {
    let theme = app.theme();
    if app.controller.machine().is_in_warning_period() {
        Style::default()
            .fg(theme.red)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD)
    }
}

fn gauge<S: Scheduler, N: Notifier>(app: &App<S, N>) -> Gauge<'static> {
    let theme = app.theme();
    let state = app.controller.machine().state();
    let percent = progress_percent(state.total_time, state.time_left)
        .round()
        .clamp(0.0, 100.0) as u16;
    let fg = if app.controller.machine().is_in_warning_period() {
        theme.red
    } else {
        theme.blue
    };
    Gauge::default()
        .gauge_style(Style::default().fg(fg).bg(theme.surface))
        .percent(percent)
}

fn warning_line<S: Scheduler, N: Notifier>(app: &App<S, N>, shout: bool) -> Line<'static> {
    let machine = app.controller.machine();
    if !machine.is_in_warning_period() {
        return Line::from("");
    }
    let text = if shout {
        format!(
            "{} WARNING: {} REMAINING!",
            app.config.icons.warning,
            format_time(machine.state().time_left)
        )
    } else {
        format!(
            "{} Warning: {} remaining!",
            app.config.icons.warning,
            format_time(machine.state().time_left)
        )
    };
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(app.theme().red)
            .add_modifier(Modifier::BOLD),
    ))
}

fn draw_session<S: Scheduler, N: Notifier>(f: &mut Frame, area: Rect, app: &App<S, N>) {
    let theme = app.theme();
    let icons = &app.config.icons;
    let machine = app.controller.machine();
    let state = machine.state();

    let (state_icon, state_color) = match machine.phase() {
        Phase::Running => (&icons.play, theme.green),
        Phase::Paused => (&icons.pause, theme.yellow),
        Phase::Idle => (&icons.stop, theme.gray),
    };
    let task = if state.current_task.is_empty() {
        "No task selected"
    } else {
        state.current_task.as_str()
    };

    let block = Block::default()
        .title(Span::styled(
            format!(" {} Current Session ", icons.clock),
            Style::default().fg(theme.gray),
        ))
        .title_bottom(Line::from(vec![
            Span::styled(format!(" {} ", state_icon), Style::default().fg(state_color)),
            Span::styled(format!("{} ", task), Style::default().fg(theme.foreground)),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if machine.is_in_warning_period() {
            theme.red
        } else {
            theme.green
        }));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let digits: Vec<Line> = big_text(&format_time(state.time_left))
        .into_iter()
        .map(|row| Line::from(Span::styled(row, countdown_style(app))))
        .collect();
    f.render_widget(Paragraph::new(digits).alignment(Alignment::Center), rows[0]);
    f.render_widget(gauge(app), rows[1]);
    f.render_widget(
        Paragraph::new(elapsed_label(state.total_time, state.time_left))
            .style(Style::default().fg(theme.gray))
            .alignment(Alignment::Center),
        rows[3],
    );
    f.render_widget(
        Paragraph::new(warning_line(app, false)).alignment(Alignment::Center),
        rows[4],
    );
}

fn draw_setup<S: Scheduler, N: Notifier>(f: &mut Frame, area: Rect, app: &App<S, N>) {
    let theme = app.theme();
    let block = Block::default()
        .title(Span::styled(" Task Setup ", Style::default().fg(theme.gray)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.green));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let label = Style::default().fg(theme.gray);
    let value = Style::default().fg(theme.foreground);
    let key = Style::default().fg(theme.blue);
    let task = if app.task_name.is_empty() {
        Span::styled("Enter task name...", Style::default().fg(theme.gray))
    } else {
        Span::styled(app.task_name.clone(), value)
    };
    let lines = vec![
        Line::from(vec![Span::styled("[t] Task      ", key), task]),
        Line::from(vec![
            Span::styled("[h/m/s] Time  ", key),
            Span::styled(
                format!(
                    "{}h {}m {}s",
                    app.duration.hours, app.duration.minutes, app.duration.seconds
                ),
                value,
            ),
            Span::styled("   [c] set duration", label),
        ]),
        Line::from(vec![
            Span::styled("[w] Warning   ", key),
            Span::styled(
                format!("{}", app.controller.machine().warning().period),
                value,
            ),
            Span::styled(" seconds before end", label),
        ]),
        Line::from(Span::styled(
            "Timer turns red and shows a warning when this time remains",
            label,
        )),
    ];
    f.render_widget(Paragraph::new(lines), inner_area);
}

fn draw_completed<S: Scheduler, N: Notifier>(f: &mut Frame, area: Rect, app: &App<S, N>) {
    let theme = app.theme();
    let icons = &app.config.icons;
    let log = app.controller.log();
    let block = Block::default()
        .title(Span::styled(
            format!(" {} Completed Tasks ", icons.completed),
            Style::default().fg(theme.gray),
        ))
        .title_bottom(Span::styled(
            format!(
                " {} tasks completed {} {} ",
                log.len(),
                icons.separator,
                format_duration(log.total_time())
            ),
            Style::default().fg(theme.gray),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.green));

    if log.is_empty() {
        let inner_area = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(
            Paragraph::new("No completed tasks yet")
                .style(Style::default().fg(theme.gray))
                .alignment(Alignment::Center),
            inner_area,
        );
        return;
    }

    let items: Vec<ListItem> = log
        .iter()
        .map(|task| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    task.name.clone(),
                    Style::default()
                        .fg(theme.foreground)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(
                        format!(" {} ", format_duration(task.duration)),
                        Style::default().fg(theme.background).bg(theme.cyan),
                    ),
                    Span::styled(
                        format!(" {}", task.completed_at.format("%Y-%m-%d %H:%M")),
                        Style::default().fg(theme.gray),
                    ),
                ]),
            ])
        })
        .collect();

    let select = format!("{} ", icons.select);
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.surface).fg(theme.selection))
        .highlight_symbol(select.as_str());
    let mut state = ListState::default().with_selected(Some(app.selected_index()));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar<S: Scheduler, N: Notifier>(f: &mut Frame, area: Rect, app: &App<S, N>) {
    let theme = app.theme();
    let (mode_text, mode_color) = match app.mode {
        AppMode::Normal => ("NORMAL", theme.green),
        AppMode::Editing(Field::TaskName) => ("INSERT", theme.yellow),
        AppMode::Editing(_) => ("TIME", theme.magenta),
    };
    let help = if app.mode == AppMode::Normal {
        "space:start/pause │ r:reset │ c:set │ t/h/m/s/w:edit │ d:del │ f:full │ D:dark │ q:quit"
    } else {
        "enter:confirm │ esc:cancel"
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", mode_text),
                Style::default()
                    .bg(mode_color)
                    .fg(theme.background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(help),
        ]))
        .block(Block::default().style(Style::default().bg(theme.surface).fg(theme.gray))),
        area,
    );
}

fn draw_fullscreen<S: Scheduler, N: Notifier>(f: &mut Frame, area: Rect, app: &App<S, N>) {
    let theme = app.theme();
    let state = app.controller.machine().state();
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let body = centered_rect(80, 80, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(body);

    let task = if state.current_task.is_empty() {
        UNNAMED_TASK
    } else {
        state.current_task.as_str()
    };
    f.render_widget(
        Paragraph::new("Current Task")
            .style(Style::default().fg(theme.gray))
            .alignment(Alignment::Center),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(task)
            .style(
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center),
        rows[1],
    );

    let digits: Vec<Line> = big_text(&format_time(state.time_left))
        .into_iter()
        .map(|row| Line::from(Span::styled(row, countdown_style(app))))
        .collect();
    f.render_widget(Paragraph::new(digits).alignment(Alignment::Center), rows[2]);

    f.render_widget(gauge(app), centered_rect(70, 100, rows[3]));
    f.render_widget(
        Paragraph::new(elapsed_label(state.total_time, state.time_left))
            .style(Style::default().fg(theme.gray))
            .alignment(Alignment::Center),
        rows[4],
    );
    f.render_widget(
        Paragraph::new(warning_line(app, true)).alignment(Alignment::Center),
        rows[5],
    );
    f.render_widget(
        Paragraph::new("ESC exit fullscreen • SPACE play/pause • r reset")
            .style(Style::default().fg(theme.gray))
            .alignment(Alignment::Center),
        rows[6],
    );
}

fn draw_input_overlay<S: Scheduler, N: Notifier>(
    f: &mut Frame,
    field: Field,
    input: &str,
    app: &App<S, N>,
) {
    let theme = app.theme();
    let area = centered_rect(60, 20, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.yellow))
        .border_type(BorderType::Double)
        .style(Style::default().bg(theme.background));
    let inner_area = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(theme.foreground)),
            Span::styled(input.to_string(), Style::default().fg(theme.foreground)),
            Span::styled(
                app.config.icons.input_cursor.clone(),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ])),
        inner_area,
    );
}

const GLYPH_HEIGHT: usize = 5;

fn glyph(c: char) -> [&'static str; GLYPH_HEIGHT] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => ["  █", "  █", "  █", "  █", "  █"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => [" ", " ", " ", " ", " "],
    }
}

/// Render digits and colons as five rows of block characters.
pub fn big_text(text: &str) -> Vec<String> {
    (0..GLYPH_HEIGHT)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
