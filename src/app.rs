use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use tracing::warn;

use crate::auth;
use crate::models::{NewTask, Task, User};
use crate::parser::parse_task_input;
use crate::store::Store;
use crate::triage::{self, Category, DateGroup};

const SPLASH_DURATION: Duration = Duration::from_millis(1200);

/// Which destination is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Splash,
    Login,
    Register,
    Dashboard,
    Tasks,
}

#[derive(Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Insert,
    Search,
}

/// Focused field of the task dialog.
#[derive(Clone, Copy, PartialEq)]
pub enum ActiveInput {
    Title,
    Description,
}

/// Focused field of the login/register forms.
#[derive(Clone, Copy, PartialEq)]
pub enum AuthField {
    FullName,
    Email,
    Password,
}

#[derive(Default)]
pub struct AuthForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub focus: Option<AuthField>,
}

impl AuthForm {
    fn reset(&mut self, focus: AuthField) {
        self.full_name.clear();
        self.email.clear();
        self.password.clear();
        self.focus = Some(focus);
    }

    fn active_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            Some(AuthField::FullName) => Some(&mut self.full_name),
            Some(AuthField::Email) => Some(&mut self.email),
            Some(AuthField::Password) => Some(&mut self.password),
            None => None,
        }
    }

    /// Tab order; the login form has no full-name field.
    fn focus_next(&mut self, has_full_name: bool) {
        self.focus = match self.focus {
            Some(AuthField::FullName) => Some(AuthField::Email),
            Some(AuthField::Email) => Some(AuthField::Password),
            Some(AuthField::Password) if has_full_name => Some(AuthField::FullName),
            Some(AuthField::Password) => Some(AuthField::Email),
            None => Some(AuthField::Email),
        };
    }
}

/// One entry of the task list: a date-group header or a task.
pub enum Row {
    Header(String),
    Task(Task),
}

pub struct App {
    store: Store,
    pub screen: Screen,
    pub user: Option<User>,
    pub login_form: AuthForm,
    pub register_form: AuthForm,
    pub dashboard_state: ListState,
    /// `None` is the "All Tasks" view.
    pub filter: Option<Category>,
    pub tasks: Vec<Task>,
    pub tasks_state: ListState,
    pub search: String,
    pub input_mode: InputMode,
    pub active_input: ActiveInput,
    pub new_task_title: String,
    pub new_task_description: String,
    /// `Some` while the dialog edits an existing task, `None` while adding.
    pub editing_task: Option<Task>,
    pub show_archived: bool,
    pub status: Option<String>,
    splash_started: Instant,
}

impl App {
    pub fn new(store: Store, show_archived: bool) -> App {
        let mut dashboard_state = ListState::default();
        dashboard_state.select(Some(0));

        App {
            store,
            screen: Screen::Splash,
            user: None,
            login_form: AuthForm {
                focus: Some(AuthField::Email),
                ..AuthForm::default()
            },
            register_form: AuthForm::default(),
            dashboard_state,
            filter: None,
            tasks: Vec::new(),
            tasks_state: ListState::default(),
            search: String::new(),
            input_mode: InputMode::Normal,
            active_input: ActiveInput::Title,
            new_task_title: String::new(),
            new_task_description: String::new(),
            editing_task: None,
            show_archived,
            status: None,
            splash_started: Instant::now(),
        }
    }

    /// Called once per event-loop iteration; advances the splash screen.
    pub fn tick(&mut self) {
        if self.screen == Screen::Splash && self.splash_started.elapsed() >= SPLASH_DURATION {
            self.screen = Screen::Login;
        }
    }

    /// Returns true when the application should exit.
    pub async fn handle_input(&mut self, key: KeyEvent) -> bool {
        // Status messages are transient: any key clears the previous one.
        self.status = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.screen {
            Screen::Splash => {
                self.screen = Screen::Login;
                false
            }
            Screen::Login => self.handle_login(key).await,
            Screen::Register => self.handle_register(key).await,
            Screen::Dashboard => self.handle_dashboard(key).await,
            Screen::Tasks => self.handle_tasks(key).await,
        }
    }

    // ------------------------------------------------------------------
    // Login / register
    // ------------------------------------------------------------------

    async fn handle_login(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
            self.register_form.reset(AuthField::FullName);
            self.screen = Screen::Register;
            return false;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Tab => self.login_form.focus_next(false),
            KeyCode::Enter => self.submit_login().await,
            KeyCode::Char(c) => {
                if let Some(buffer) = self.login_form.active_buffer() {
                    buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.login_form.active_buffer() {
                    buffer.pop();
                }
            }
            _ => {}
        }
        false
    }

    async fn handle_register(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.login_form.reset(AuthField::Email);
                self.screen = Screen::Login;
            }
            KeyCode::Tab => self.register_form.focus_next(true),
            KeyCode::Enter => self.submit_register().await,
            KeyCode::Char(c) => {
                if let Some(buffer) = self.register_form.active_buffer() {
                    buffer.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = self.register_form.active_buffer() {
                    buffer.pop();
                }
            }
            _ => {}
        }
        false
    }

    async fn submit_login(&mut self) {
        let store = self.store.clone();
        let email = self.login_form.email.trim().to_string();
        let password = self.login_form.password.clone();

        let result = tokio::task::spawn_blocking(move || auth::login(&store, &email, &password)).await;
        match result {
            Ok(Ok(Some(user))) => {
                self.user = Some(user);
                self.login_form.reset(AuthField::Email);
                self.dashboard_state.select(Some(0));
                self.screen = Screen::Dashboard;
                self.reload_tasks().await;
            }
            Ok(Ok(None)) => self.status = Some("Invalid email or password".to_string()),
            Ok(Err(err)) => {
                warn!(%err, "login failed");
                self.status = Some("Something went wrong, try again".to_string());
            }
            Err(err) => warn!(%err, "login task failed"),
        }
    }

    async fn submit_register(&mut self) {
        let full_name = self.register_form.full_name.trim().to_string();
        let email = self.register_form.email.trim().to_string();
        let password = self.register_form.password.clone();

        if full_name.is_empty() || email.is_empty() || password.is_empty() {
            self.status = Some("All fields are required".to_string());
            return;
        }

        let store = self.store.clone();
        let result = tokio::task::spawn_blocking(move || {
            auth::register(&store, &full_name, &email, &password)
        })
        .await;
        match result {
            Ok(Ok(true)) => {
                self.login_form.reset(AuthField::Email);
                self.screen = Screen::Login;
                self.status = Some("Account created, log in to continue".to_string());
            }
            Ok(Ok(false)) => self.status = Some("Email already exists".to_string()),
            Ok(Err(err)) => {
                warn!(%err, "registration failed");
                self.status = Some("Something went wrong, try again".to_string());
            }
            Err(err) => warn!(%err, "registration task failed"),
        }
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    /// Dashboard rows: "All Tasks" followed by every category, each with
    /// its active-task count.
    pub fn dashboard_entries(&self) -> Vec<(String, usize)> {
        let mut entries = vec![(
            "All Tasks".to_string(),
            self.tasks.iter().filter(|t| !t.is_done).count(),
        )];
        for category in Category::ALL {
            let count = self
                .tasks
                .iter()
                .filter(|t| {
                    !t.is_done && triage::assign_category(&t.title, &t.description) == category
                })
                .count();
            entries.push((category.name().to_string(), count));
        }
        entries
    }

    async fn handle_dashboard(&mut self, key: KeyEvent) -> bool {
        let len = 1 + Category::ALL.len();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.log_out(),
            KeyCode::Char('j') | KeyCode::Down => {
                let i = match self.dashboard_state.selected() {
                    Some(i) if i >= len - 1 => 0,
                    Some(i) => i + 1,
                    None => 0,
                };
                self.dashboard_state.select(Some(i));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let i = match self.dashboard_state.selected() {
                    Some(0) | None => len - 1,
                    Some(i) => i - 1,
                };
                self.dashboard_state.select(Some(i));
            }
            KeyCode::Enter => {
                let selected = self.dashboard_state.selected().unwrap_or(0);
                self.filter = if selected == 0 {
                    None
                } else {
                    Some(Category::ALL[selected - 1])
                };
                self.search.clear();
                self.input_mode = InputMode::Normal;
                self.screen = Screen::Tasks;
                self.reload_tasks().await;
            }
            _ => {}
        }
        false
    }

    fn log_out(&mut self) {
        self.user = None;
        self.tasks.clear();
        self.tasks_state.select(None);
        self.login_form.reset(AuthField::Email);
        self.screen = Screen::Login;
    }

    // ------------------------------------------------------------------
    // Task list
    // ------------------------------------------------------------------

    async fn handle_tasks(&mut self, key: KeyEvent) -> bool {
        let today = Local::now().date_naive();
        match self.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.screen = Screen::Dashboard;
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    let rows = self.visible_rows(today);
                    self.select_next(&rows);
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    let rows = self.visible_rows(today);
                    self.select_previous(&rows);
                }
                KeyCode::Char('/') => self.input_mode = InputMode::Search,
                KeyCode::Char('v') => {
                    self.show_archived = !self.show_archived;
                    let rows = self.visible_rows(today);
                    self.clamp_selection(&rows);
                }
                KeyCode::Char('a') => {
                    self.editing_task = None;
                    self.new_task_title.clear();
                    self.new_task_description.clear();
                    self.active_input = ActiveInput::Title;
                    self.input_mode = InputMode::Editing;
                }
                KeyCode::Char('e') => {
                    let rows = self.visible_rows(today);
                    if let Some(task) = self.selected_task(&rows) {
                        self.new_task_title = compose_title_input(task);
                        self.new_task_description = task.description.clone();
                        self.editing_task = Some(task.clone());
                        self.active_input = ActiveInput::Title;
                        self.input_mode = InputMode::Editing;
                    }
                }
                KeyCode::Char('d') => self.delete_selected(today).await,
                KeyCode::Char(' ') => self.toggle_done_selected(today).await,
                KeyCode::Char('i') => self.toggle_important_selected(today).await,
                _ => {}
            },

            InputMode::Search => match key.code {
                KeyCode::Esc => {
                    self.search.clear();
                    self.input_mode = InputMode::Normal;
                    let rows = self.visible_rows(today);
                    self.clamp_selection(&rows);
                }
                KeyCode::Enter => self.input_mode = InputMode::Normal,
                KeyCode::Char(c) => {
                    self.search.push(c);
                    let rows = self.visible_rows(today);
                    self.clamp_selection(&rows);
                }
                KeyCode::Backspace => {
                    self.search.pop();
                    let rows = self.visible_rows(today);
                    self.clamp_selection(&rows);
                }
                _ => {}
            },

            InputMode::Editing => match key.code {
                KeyCode::Char('i') => self.input_mode = InputMode::Insert,
                KeyCode::Tab => {
                    self.active_input = match self.active_input {
                        ActiveInput::Title => ActiveInput::Description,
                        ActiveInput::Description => ActiveInput::Title,
                    };
                }
                KeyCode::Enter => self.submit_dialog().await,
                KeyCode::Esc => {
                    self.new_task_title.clear();
                    self.new_task_description.clear();
                    self.editing_task = None;
                    self.input_mode = InputMode::Normal;
                }
                _ => {}
            },

            InputMode::Insert => match key.code {
                KeyCode::Char(c) => match self.active_input {
                    ActiveInput::Title => self.new_task_title.push(c),
                    ActiveInput::Description => self.new_task_description.push(c),
                },
                KeyCode::Backspace => {
                    match self.active_input {
                        ActiveInput::Title => self.new_task_title.pop(),
                        ActiveInput::Description => self.new_task_description.pop(),
                    };
                }
                KeyCode::Esc => self.input_mode = InputMode::Editing,
                _ => {}
            },
        }
        false
    }

    /// The rendered rows of the task list: active tasks filtered by
    /// category and search, sorted by priority, grouped under date
    /// headers, with the archived (completed) section at the bottom.
    pub fn visible_rows(&self, today: NaiveDate) -> Vec<Row> {
        let mut active: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| !t.is_done)
            .filter(|t| match self.filter {
                None => true,
                Some(category) => {
                    triage::assign_category(&t.title, &t.description) == category
                }
            })
            .filter(|t| self.matches_search(t))
            .collect();
        active.sort_by_key(|t| std::cmp::Reverse(triage::priority_score(t, today)));

        let mut rows = Vec::new();
        for group in DateGroup::ORDER {
            let in_group: Vec<&Task> = active
                .iter()
                .copied()
                .filter(|t| triage::date_group(t.due_date, today) == group)
                .collect();
            if in_group.is_empty() {
                continue;
            }
            rows.push(Row::Header(group.label().to_string()));
            rows.extend(in_group.into_iter().map(|t| Row::Task(t.clone())));
        }

        // The archived section ignores the category and search filters.
        if self.show_archived {
            let archived: Vec<&Task> = self.tasks.iter().filter(|t| t.is_done).collect();
            if !archived.is_empty() {
                rows.push(Row::Header("Archived".to_string()));
                rows.extend(archived.into_iter().map(|t| Row::Task(t.clone())));
            }
        }

        rows
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }

    pub fn selected_task<'a>(&self, rows: &'a [Row]) -> Option<&'a Task> {
        match rows.get(self.tasks_state.selected()?) {
            Some(Row::Task(task)) => Some(task),
            _ => None,
        }
    }

    fn select_next(&mut self, rows: &[Row]) {
        self.select_step(rows, 1);
    }

    fn select_previous(&mut self, rows: &[Row]) {
        self.select_step(rows, rows.len().saturating_sub(1));
    }

    /// Move the selection by `step` positions (mod length), skipping
    /// header rows, wrapping around.
    fn select_step(&mut self, rows: &[Row], step: usize) {
        if rows.is_empty() {
            self.tasks_state.select(None);
            return;
        }
        let len = rows.len();
        let mut i = self.tasks_state.selected().unwrap_or(len - 1);
        for _ in 0..len {
            i = (i + step) % len;
            if matches!(rows[i], Row::Task(_)) {
                self.tasks_state.select(Some(i));
                return;
            }
        }
        self.tasks_state.select(None);
    }

    /// Keep the selection on a task row after the row set changed.
    fn clamp_selection(&mut self, rows: &[Row]) {
        let on_task = self
            .tasks_state
            .selected()
            .is_some_and(|i| matches!(rows.get(i), Some(Row::Task(_))));
        if !on_task {
            let first = rows.iter().position(|row| matches!(row, Row::Task(_)));
            self.tasks_state.select(first);
        }
    }

    async fn reload_tasks(&mut self) {
        let Some(user) = &self.user else {
            return;
        };
        let store = self.store.clone();
        let user_id = user.id;

        match tokio::task::spawn_blocking(move || store.tasks_for_user(user_id)).await {
            Ok(Ok(tasks)) => {
                self.tasks = tasks;
                let today = Local::now().date_naive();
                let rows = self.visible_rows(today);
                self.clamp_selection(&rows);
            }
            Ok(Err(err)) => {
                warn!(%err, "failed to load tasks");
                self.status = Some("Could not load tasks".to_string());
            }
            Err(err) => warn!(%err, "task load failed"),
        }
    }

    async fn submit_dialog(&mut self) {
        let parsed = parse_task_input(&self.new_task_title);
        if parsed.title.is_empty() {
            self.status = Some("Task title cannot be empty".to_string());
            return;
        }
        let description = self.new_task_description.trim().to_string();

        let store = self.store.clone();
        let result = match &self.editing_task {
            None => {
                let Some(user) = &self.user else {
                    return;
                };
                let task = NewTask {
                    title: parsed.title,
                    description,
                    due_date: parsed.due_date,
                    is_important: parsed.important,
                    user_id: user.id,
                };
                tokio::task::spawn_blocking(move || store.add_task(&task).map(|_| ())).await
            }
            Some(original) => {
                let task = Task {
                    title: parsed.title,
                    description,
                    due_date: parsed.due_date,
                    is_important: parsed.important,
                    ..original.clone()
                };
                tokio::task::spawn_blocking(move || store.update_task(&task)).await
            }
        };

        match result {
            Ok(Ok(())) => {
                self.new_task_title.clear();
                self.new_task_description.clear();
                self.editing_task = None;
                self.input_mode = InputMode::Normal;
                self.reload_tasks().await;
            }
            Ok(Err(err)) => {
                warn!(%err, "failed to save task");
                self.status = Some("Could not save task".to_string());
            }
            Err(err) => warn!(%err, "task save failed"),
        }
    }

    async fn toggle_done_selected(&mut self, today: NaiveDate) {
        let rows = self.visible_rows(today);
        let Some(task) = self.selected_task(&rows) else {
            return;
        };
        let mut updated = task.clone();
        updated.is_done = !updated.is_done;
        self.persist_update(updated).await;
    }

    async fn toggle_important_selected(&mut self, today: NaiveDate) {
        let rows = self.visible_rows(today);
        let Some(task) = self.selected_task(&rows) else {
            return;
        };
        let mut updated = task.clone();
        updated.is_important = !updated.is_important;
        self.persist_update(updated).await;
    }

    async fn persist_update(&mut self, task: Task) {
        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || store.update_task(&task)).await {
            Ok(Ok(())) => self.reload_tasks().await,
            Ok(Err(err)) => {
                warn!(%err, "failed to update task");
                self.status = Some("Could not update task".to_string());
            }
            Err(err) => warn!(%err, "task update failed"),
        }
    }

    async fn delete_selected(&mut self, today: NaiveDate) {
        let rows = self.visible_rows(today);
        let Some(task) = self.selected_task(&rows) else {
            return;
        };
        let task_id = task.id;

        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || store.delete_task(task_id)).await {
            Ok(Ok(())) => self.reload_tasks().await,
            Ok(Err(err)) => {
                warn!(%err, "failed to delete task");
                self.status = Some("Could not delete task".to_string());
            }
            Err(err) => warn!(%err, "task delete failed"),
        }
    }
}

/// Rebuild the dialog title input for an existing task, re-appending the
/// quick-add markers so that saving without edits round-trips.
fn compose_title_input(task: &Task) -> String {
    let mut input = task.title.clone();
    if let Some(due) = task.due_date {
        input.push_str(&format!(" @{}", due.format("%Y-%m-%d")));
    }
    if task.is_important {
        input.push_str(" !");
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = Store::open(dir.path().join("taskflow.db")).expect("open store");
        (dir, App::new(store, false))
    }

    fn task(id: i64, title: &str, due_date: Option<NaiveDate>, is_done: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            due_date,
            is_done,
            is_important: false,
            user_id: 1,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn titles(rows: &[Row]) -> Vec<String> {
        rows.iter()
            .map(|row| match row {
                Row::Header(h) => format!("# {h}"),
                Row::Task(t) => t.title.clone(),
            })
            .collect()
    }

    #[test]
    fn test_rows_group_in_fixed_order_and_sort_by_priority() {
        let (_dir, mut app) = test_app();
        let today = date(2026, 8, 5);
        app.tasks = vec![
            task(1, "someday", None, false),
            task(2, "due tomorrow", Some(date(2026, 8, 6)), false),
            task(3, "due today", Some(today), false),
            task(4, "done", Some(today), true),
        ];

        let rows = app.visible_rows(today);
        assert_eq!(
            titles(&rows),
            vec![
                "# Today",
                "due today",
                "# Tomorrow",
                "due tomorrow",
                "# No Date",
                "someday",
            ]
        );
    }

    #[test]
    fn test_archived_section_appears_when_enabled() {
        let (_dir, mut app) = test_app();
        let today = date(2026, 8, 5);
        app.tasks = vec![task(1, "open", None, false), task(2, "closed", None, true)];

        assert_eq!(titles(&app.visible_rows(today)), vec!["# No Date", "open"]);

        app.show_archived = true;
        assert_eq!(
            titles(&app.visible_rows(today)),
            vec!["# No Date", "open", "# Archived", "closed"]
        );
    }

    #[test]
    fn test_search_filters_title_and_description() {
        let (_dir, mut app) = test_app();
        let today = date(2026, 8, 5);
        let mut described = task(1, "water plants", None, false);
        described.description = "in the garden".to_string();
        app.tasks = vec![described, task(2, "feed cat", None, false)];

        app.search = "GARDEN".to_string();
        assert_eq!(titles(&app.visible_rows(today)), vec!["# No Date", "water plants"]);
    }

    #[test]
    fn test_category_filter() {
        let (_dir, mut app) = test_app();
        let today = date(2026, 8, 5);
        app.tasks = vec![
            task(1, "clean kitchen", None, false),
            task(2, "team meeting", None, false),
            task(3, "misc", None, false),
        ];

        app.filter = Some(Category::Work);
        assert_eq!(titles(&app.visible_rows(today)), vec!["# No Date", "team meeting"]);

        app.filter = Some(Category::Other);
        assert_eq!(titles(&app.visible_rows(today)), vec!["# No Date", "misc"]);
    }

    #[test]
    fn test_selection_skips_headers_and_wraps() {
        let (_dir, mut app) = test_app();
        let today = date(2026, 8, 5);
        app.tasks = vec![
            task(1, "a", Some(today), false),
            task(2, "b", None, false),
        ];
        let rows = app.visible_rows(today);
        // rows: [Header(Today), a, Header(No Date), b]

        app.select_next(&rows);
        assert_eq!(app.selected_task(&rows).map(|t| t.id), Some(1));
        app.select_next(&rows);
        assert_eq!(app.selected_task(&rows).map(|t| t.id), Some(2));
        app.select_next(&rows);
        assert_eq!(app.selected_task(&rows).map(|t| t.id), Some(1));
        app.select_previous(&rows);
        assert_eq!(app.selected_task(&rows).map(|t| t.id), Some(2));
    }

    #[test]
    fn test_clamp_selection_falls_back_to_first_task() {
        let (_dir, mut app) = test_app();
        let today = date(2026, 8, 5);
        app.tasks = vec![task(1, "only", None, false)];
        app.tasks_state.select(Some(5));

        let rows = app.visible_rows(today);
        app.clamp_selection(&rows);
        assert_eq!(app.selected_task(&rows).map(|t| t.id), Some(1));
    }

    #[test]
    fn test_dashboard_entries_count_active_tasks() {
        let (_dir, mut app) = test_app();
        app.tasks = vec![
            task(1, "clean kitchen", None, false),
            task(2, "cook dinner", None, false),
            task(3, "team meeting", None, false),
            task(4, "clean garage", None, true),
            task(5, "misc", None, false),
        ];

        let entries = app.dashboard_entries();
        assert_eq!(entries[0], ("All Tasks".to_string(), 4));
        assert_eq!(entries[1], ("Home".to_string(), 2));
        assert_eq!(entries[2], ("Work".to_string(), 1));
        assert_eq!(entries[9], ("Other".to_string(), 1));
    }

    #[test]
    fn test_compose_title_input_round_trips_through_parser() {
        let mut t = task(1, "Pay rent", Some(date(2026, 9, 1)), false);
        t.is_important = true;

        let input = compose_title_input(&t);
        let parsed = parse_task_input(&input);
        assert_eq!(parsed.title, "Pay rent");
        assert_eq!(parsed.due_date, Some(date(2026, 9, 1)));
        assert!(parsed.important);
    }
}
