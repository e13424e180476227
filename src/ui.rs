use crate::app::{ActiveInput, App, AuthField, AuthForm, InputMode, Row, Screen};
use crate::models::Task;
use crate::triage;
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event as CEvent};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

fn centered_rect_absolute(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length((r.height.saturating_sub(height)) / 2),
                Constraint::Length(height),
                Constraint::Length((r.height.saturating_sub(height) + 1) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Length((r.width.saturating_sub(width)) / 2),
                Constraint::Length(width),
                Constraint::Length((r.width.saturating_sub(width) + 1) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}

// Main event loop
pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> io::Result<()> {
    loop {
        app.tick();
        let today = Local::now().date_naive();

        terminal.draw(|f| draw(f, &mut app, today))?;

        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key) = event::read()? {
                let should_quit = app.handle_input(key).await;
                if should_quit {
                    return Ok(());
                }
            }
        }
    }
}

fn draw(f: &mut Frame, app: &mut App, today: NaiveDate) {
    let size = f.area();

    // Split the main layout into body and footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(size);

    let body_chunk = chunks[0];
    let footer_chunk = chunks[1];

    match app.screen {
        Screen::Splash => draw_splash(f, body_chunk),
        Screen::Login => draw_login(f, app, body_chunk),
        Screen::Register => draw_register(f, app, body_chunk),
        Screen::Dashboard => draw_dashboard(f, app, body_chunk),
        Screen::Tasks => draw_tasks(f, app, body_chunk, today),
    }

    draw_footer(f, app, footer_chunk);
}

// ---------------------------------------------------------------------
// Screens
// ---------------------------------------------------------------------

fn draw_splash(f: &mut Frame, area: Rect) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(40),
                Constraint::Length(3),
                Constraint::Percentage(40),
            ]
            .as_ref(),
        )
        .split(area);

    let text = Text::from(vec![
        Line::from(Span::styled(
            "TaskFlow",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Personal task manager",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), vertical[1]);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let mut spans = vec![
        Span::styled(
            format!("{label:>11}: "),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value.to_string(), value_style),
    ];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Green)));
    }
    Line::from(spans)
}

fn masked(form: &AuthForm) -> String {
    "*".repeat(form.password.chars().count())
}

fn draw_login(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_absolute(52, 7, area);
    let block = Block::default().borders(Borders::ALL).title("Log in");

    let lines = vec![
        Line::from(""),
        field_line(
            "Email",
            &app.login_form.email,
            app.login_form.focus == Some(AuthField::Email),
        ),
        field_line(
            "Password",
            &masked(&app.login_form),
            app.login_form.focus == Some(AuthField::Password),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "No account yet? Press Ctrl+r to register.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn draw_register(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_absolute(52, 8, area);
    let block = Block::default().borders(Borders::ALL).title("Register");

    let lines = vec![
        Line::from(""),
        field_line(
            "Full name",
            &app.register_form.full_name,
            app.register_form.focus == Some(AuthField::FullName),
        ),
        field_line(
            "Email",
            &app.register_form.email,
            app.register_form.focus == Some(AuthField::Email),
        ),
        field_line(
            "Password",
            &masked(&app.register_form),
            app.register_form.focus == Some(AuthField::Password),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Esc returns to the log in screen.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn draw_dashboard(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)].as_ref())
        .split(area);

    let name = app
        .user
        .as_ref()
        .map(|u| u.full_name.clone())
        .unwrap_or_else(|| "there".to_string());
    let active = app.tasks.iter().filter(|t| !t.is_done).count();

    let header = Text::from(vec![
        Line::from(Span::styled(
            format!("Hello, {name}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("You have {active} active tasks")),
    ]);
    f.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
        chunks[0],
    );

    let items: Vec<ListItem> = app
        .dashboard_entries()
        .into_iter()
        .map(|(name, count)| {
            ListItem::new(Line::from(vec![
                Span::raw(name),
                Span::styled(
                    format!("  ({count})"),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Categories"))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, chunks[1], &mut app.dashboard_state);
}

fn draw_tasks(f: &mut Frame, app: &mut App, area: Rect, today: NaiveDate) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    // Search bar
    let search_style = if app.input_mode == InputMode::Search {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let search = Paragraph::new(app.search.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(search_style),
    );
    f.render_widget(search, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(chunks[1]);

    let rows = app.visible_rows(today);
    let list_title = match app.filter {
        None => "All Tasks".to_string(),
        Some(category) => category.name().to_string(),
    };

    // Left panel: grouped task list
    let list = if !rows.is_empty() {
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| match row {
                Row::Header(title) => ListItem::new(Line::from(Span::styled(
                    title.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))),
                Row::Task(task) => ListItem::new(task_line(task, today)),
            })
            .collect();

        List::new(items)
            .block(Block::default().borders(Borders::ALL).title(list_title))
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ")
    } else {
        List::new(vec![ListItem::new("No tasks here yet")])
            .block(Block::default().borders(Borders::ALL).title(list_title))
    };

    f.render_stateful_widget(list, panels[0], &mut app.tasks_state);

    // Right panel: details of the selected task
    let detail_block = Block::default().borders(Borders::ALL).title("Task Details");
    if let Some(task) = app.selected_task(&rows) {
        let paragraph = Paragraph::new(detail_lines(task, today))
            .block(detail_block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, panels[1]);
    } else {
        let paragraph = Paragraph::new("Select a task to view details")
            .block(detail_block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, panels[1]);
    }

    // Add/edit dialog
    if matches!(app.input_mode, InputMode::Editing | InputMode::Insert) {
        draw_task_dialog(f, app, area);
    }
}

fn task_line(task: &Task, today: NaiveDate) -> Line<'static> {
    let score = triage::priority_score(task, today);
    let mut spans = vec![Span::styled(
        "▌ ",
        Style::default().fg(priority_color(score)),
    )];

    if task.is_done {
        spans.push(Span::styled("DONE ", Style::default().fg(Color::Green)));
    }
    if task.is_important {
        spans.push(Span::styled("! ", Style::default().fg(Color::Yellow)));
    }
    spans.push(Span::raw(task.title.clone()));
    if let Some(due) = task.due_date {
        spans.push(Span::styled(
            format!("  (due {due})"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

fn priority_color(score: i32) -> Color {
    match score {
        0 => Color::DarkGray,
        1..=2 => Color::Yellow,
        3..=4 => Color::LightRed,
        _ => Color::Red,
    }
}

fn detail_lines(task: &Task, today: NaiveDate) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    let due = match task.due_date {
        Some(date) => date.to_string(),
        None => "No due date".to_string(),
    };
    lines.push(Line::from(vec![
        Span::styled("Due Date: ", bold),
        Span::raw(due),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Category: ", bold),
        Span::raw(triage::assign_category(&task.title, &task.description).name()),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Priority: ", bold),
        Span::raw(triage::priority_score(task, today).to_string()),
    ]));

    let mut status = if task.is_done { "Done" } else { "Active" }.to_string();
    if task.is_important {
        status.push_str(", important");
    }
    lines.push(Line::from(vec![
        Span::styled("Status: ", bold),
        Span::raw(status),
    ]));

    lines.push(Line::from(vec![Span::styled("Description: ", bold)]));
    if task.description.is_empty() {
        lines.push(Line::from(Span::raw("No description".to_string())));
    } else {
        for text_line in task.description.lines() {
            lines.push(Line::from(Span::raw(text_line.to_string())));
        }
    }

    lines
}

fn draw_task_dialog(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.editing_task.is_some() {
        "Edit Task"
    } else {
        "New Task"
    };

    let popup = centered_rect_absolute(64, 8, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Green));

    let typing = app.input_mode == InputMode::Insert;
    let lines = vec![
        field_line(
            "Title",
            &app.new_task_title,
            typing && app.active_input == ActiveInput::Title,
        ),
        field_line(
            "Description",
            &app.new_task_description,
            typing && app.active_input == ActiveInput::Description,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "@YYYY-MM-DD sets the due date, a standalone ! marks important",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .block(block)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

// ---------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------

fn key_span(key: &str) -> Span<'static> {
    Span::styled(format!(" {key} "), Style::default().fg(Color::Red))
}

fn get_legend(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    let mut push = |key: &str, action: &str| {
        spans.push(key_span(key));
        spans.push(Span::raw(format!(": {action} ")));
    };

    match app.screen {
        Screen::Splash => push("any key", "Continue"),
        Screen::Login => {
            push("Tab", "Next Field");
            push("Enter", "Log In");
            push("Ctrl+r", "Register");
            push("Esc", "Quit");
        }
        Screen::Register => {
            push("Tab", "Next Field");
            push("Enter", "Create Account");
            push("Esc", "Back");
        }
        Screen::Dashboard => {
            push("j", "Down");
            push("k", "Up");
            push("Enter", "Open");
            push("q", "Log Out");
        }
        Screen::Tasks => match app.input_mode {
            InputMode::Normal => {
                push("j/k", "Move");
                push("a", "Add");
                push("e", "Edit");
                push("d", "Delete");
                push("Space", "Toggle Done");
                push("i", "Toggle Important");
                push("/", "Search");
                push("v", "Archived");
                push("q", "Back");
            }
            InputMode::Search => {
                push("Enter", "Keep Filter");
                push("Esc", "Clear");
            }
            InputMode::Editing => {
                push("i", "Edit Field");
                push("Tab", "Switch Field");
                push("Enter", "Save");
                push("Esc", "Cancel");
            }
            InputMode::Insert => {
                push("Esc", "Stop Typing");
            }
        },
    }

    Line::from(spans)
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let status_line = match &app.status {
        Some(status) => Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(""),
    };

    let legend = Paragraph::new(vec![status_line, get_legend(app)])
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(legend, area);
}
