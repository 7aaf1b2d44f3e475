use crate::config::{Config, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tasktimer_core::input::{MAX_HOURS, MAX_MINUTES, MAX_SECONDS, MAX_WARNING_PERIOD};
use tasktimer_core::{normalize_field, Controller, DurationInput, Notifier, Scheduler, TaskId};
use tracing::debug;

/// Setup fields the user can edit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    TaskName,
    Hours,
    Minutes,
    Seconds,
    WarningPeriod,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::TaskName => "Task Name",
            Field::Hours => "Hours (0-23)",
            Field::Minutes => "Minutes (0-59)",
            Field::Seconds => "Seconds (0-59)",
            Field::WarningPeriod => "Warning Period (seconds before end)",
        }
    }

    /// Upper bound for numeric fields, `None` for free text.
    pub fn max(&self) -> Option<u64> {
        match self {
            Field::TaskName => None,
            Field::Hours => Some(MAX_HOURS),
            Field::Minutes => Some(MAX_MINUTES),
            Field::Seconds => Some(MAX_SECONDS),
            Field::WarningPeriod => Some(MAX_WARNING_PERIOD),
        }
    }
}

#[derive(Default, Clone, Copy, PartialEq, Debug)]
pub enum AppMode {
    #[default]
    Normal,
    Editing(Field),
}

pub struct App<S: Scheduler, N: Notifier> {
    pub controller: Controller<S, N>,
    pub config: Config,
    pub mode: AppMode,
    pub input_buffer: String,
    /// Name typed in the setup panel. Only reaches the timer on start, reset or set-duration.
    pub task_name: String,
    pub duration: DurationInput,
    pub dark_mode: bool,
    pub fullscreen: bool,
    /// Highlighted completed task. `None` highlights the newest entry.
    pub selected_task: Option<TaskId>,
    pub should_quit: bool,
}

impl<S: Scheduler, N: Notifier> App<S, N> {
    pub fn new(mut controller: Controller<S, N>, config: Config) -> Self {
        let duration = config.timer.duration();
        let task_name = config.timer.task.clone();
        controller.configure(duration, &task_name);
        Self {
            controller,
            mode: AppMode::Normal,
            input_buffer: String::new(),
            task_name,
            duration,
            dark_mode: config.dark_mode,
            fullscreen: false,
            selected_task: None,
            should_quit: false,
            config,
        }
    }

    pub fn theme(&self) -> &Theme {
        self.config.theme(self.dark_mode)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.mode {
            AppMode::Editing(field) => self.handle_editing(field, key.code),
            AppMode::Normal if self.fullscreen => self.handle_fullscreen(key.code),
            AppMode::Normal => self.handle_normal(key.code),
        }
    }

    fn handle_normal(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(' ') => self.toggle_timer(),
            KeyCode::Char('r') => self.reset_timer(),
            KeyCode::Char('c') => self.set_duration(),
            KeyCode::Char('t') => self.begin_edit(Field::TaskName),
            KeyCode::Char('h') => self.begin_edit(Field::Hours),
            KeyCode::Char('m') => self.begin_edit(Field::Minutes),
            KeyCode::Char('s') => self.begin_edit(Field::Seconds),
            KeyCode::Char('w') => self.begin_edit(Field::WarningPeriod),
            KeyCode::Char('d') => self.delete_selected_task(),
            KeyCode::Char('f') => self.toggle_fullscreen(),
            KeyCode::Char('D') => self.toggle_dark_mode(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            _ => {}
        }
    }

    fn handle_fullscreen(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('f') => self.exit_fullscreen(),
            KeyCode::Char(' ') => self.toggle_timer(),
            KeyCode::Char('r') => self.reset_timer(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_editing(&mut self, field: Field, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                self.commit_edit(field);
                self.mode = AppMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                if field == Field::TaskName || c.is_ascii_digit() {
                    self.input_buffer.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn begin_edit(&mut self, field: Field) {
        self.input_buffer = match field {
            Field::TaskName => self.task_name.clone(),
            Field::Hours => self.duration.hours.to_string(),
            Field::Minutes => self.duration.minutes.to_string(),
            Field::Seconds => self.duration.seconds.to_string(),
            Field::WarningPeriod => self.controller.machine().warning().period.to_string(),
        };
        self.mode = AppMode::Editing(field);
    }

    fn commit_edit(&mut self, field: Field) {
        let value = field.max().map(|max| normalize_field(&self.input_buffer, max));
        debug!("Committing {:?} = {:?}", field, self.input_buffer);
        match (field, value) {
            (Field::TaskName, _) => self.task_name = self.input_buffer.trim().to_string(),
            (Field::Hours, Some(v)) => self.duration.hours = v,
            (Field::Minutes, Some(v)) => self.duration.minutes = v,
            (Field::Seconds, Some(v)) => self.duration.seconds = v,
            (Field::WarningPeriod, Some(v)) => self.controller.set_warning_period(v),
            _ => {}
        }
    }

    pub fn toggle_timer(&mut self) {
        self.controller.toggle(&self.task_name);
    }

    pub fn reset_timer(&mut self) {
        self.controller.reset(self.duration, &self.task_name);
    }

    pub fn set_duration(&mut self) {
        self.controller.configure(self.duration, &self.task_name);
    }

    pub fn on_tick(&mut self) {
        self.controller.tick();
    }

    /// Position of the highlighted task in the log, newest first.
    pub fn selected_index(&self) -> usize {
        self.selected_task
            .and_then(|id| self.controller.log().iter().position(|task| task.id == id))
            .unwrap_or(0)
    }

    fn select_index(&mut self, index: usize) {
        self.selected_task = self.controller.log().get(index).map(|task| task.id);
    }

    pub fn delete_selected_task(&mut self) {
        let index = self.selected_index();
        let Some(id) = self.controller.log().get(index).map(|task| task.id) else {
            return;
        };
        self.controller.remove_completed(id);
        let len = self.controller.log().len();
        self.select_index(index.min(len.saturating_sub(1)));
    }

    pub fn move_selection_up(&mut self) {
        self.select_index(self.selected_index().saturating_sub(1));
    }

    pub fn move_selection_down(&mut self) {
        let len = self.controller.log().len();
        if len > 0 {
            self.select_index((self.selected_index() + 1).min(len - 1));
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tasktimer_core::testing::{ManualScheduler, RecordingNotifier};
    use tasktimer_core::{Phase, Settings};

    type TestApp = App<ManualScheduler, RecordingNotifier>;

    fn app() -> TestApp {
        let controller = Controller::new(
            ManualScheduler::new(),
            RecordingNotifier::granted(),
            Settings::default(),
        );
        App::new(controller, Config::default())
    }

    fn press(app: &mut TestApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut TestApp, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn tick(app: &mut TestApp, n: u64) {
        for _ in 0..n {
            app.on_tick();
        }
    }

    #[test]
    fn test_starts_with_configured_duration() {
        let app = app();
        let state = app.controller.machine().state();
        assert_eq!(state.total_time, 25 * 60);
        assert_eq!(state.time_left, 25 * 60);
        assert!(!state.is_running);
    }

    #[test]
    fn test_edit_and_set_duration() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        type_str(&mut app, "Write report");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "0");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('s'));
        type_str(&mut app, "x9");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.task_name, "Write report");
        assert_eq!(app.duration, DurationInput::new(0, 0, 9));

        press(&mut app, KeyCode::Char('c'));
        let state = app.controller.machine().state();
        assert_eq!(state.total_time, 9);
        assert_eq!(state.current_task, "Write report");
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('h'));
        type_str(&mut app, "5");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.duration.hours, 0);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let mut app = app();
        press(&mut app, KeyCode::Char('m'));
        type_str(&mut app, "0");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.duration.minutes, 59);

        press(&mut app, KeyCode::Char('w'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "99999");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.machine().warning().period, 3600);
    }

    #[test]
    fn test_set_duration_with_zero_keeps_session() {
        let mut app = app();
        app.duration = DurationInput::default();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.controller.machine().state().total_time, 25 * 60);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.controller.machine().state().total_time, 0);
    }

    #[test]
    fn test_space_toggles_and_session_completes() {
        let mut app = app();
        app.task_name = "sprint".to_string();
        app.duration = DurationInput::new(0, 0, 3);
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.controller.machine().phase(), Phase::Running);

        tick(&mut app, 1);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.controller.machine().phase(), Phase::Paused);
        tick(&mut app, 5);
        assert_eq!(app.controller.machine().state().time_left, 2);

        press(&mut app, KeyCode::Char(' '));
        tick(&mut app, 2);
        assert_eq!(app.controller.log().len(), 1);
        assert_eq!(
            app.controller.log().get(0).map(|t| t.name.as_str()),
            Some("sprint")
        );
    }

    #[test]
    fn test_fullscreen_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('f'));
        assert!(app.fullscreen);

        // Setup keys are inert in full-screen.
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.mode, AppMode::Normal);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.controller.machine().is_running());
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.controller.machine().is_running());

        press(&mut app, KeyCode::Esc);
        assert!(!app.fullscreen);
        press(&mut app, KeyCode::Esc);
        assert!(!app.fullscreen);
    }

    #[test]
    fn test_delete_selected_task() {
        let mut app = app();
        app.duration = DurationInput::default();
        for name in ["a", "b", "c"] {
            app.task_name = name.to_string();
            press(&mut app, KeyCode::Char('r'));
            press(&mut app, KeyCode::Char(' '));
        }
        assert_eq!(app.controller.log().len(), 3);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_index(), 2);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.selected_index(), 1);
        let names: Vec<&str> = app.controller.log().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);

        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('d'));
        assert!(app.controller.log().is_empty());
        assert_eq!(app.selected_task, None);
        assert_eq!(app.selected_index(), 0);
    }

    #[test]
    fn test_selection_follows_task_when_sessions_complete() {
        let mut app = app();
        app.duration = DurationInput::default();
        for name in ["a", "b"] {
            app.task_name = name.to_string();
            press(&mut app, KeyCode::Char('r'));
            press(&mut app, KeyCode::Char(' '));
        }
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_index(), 1);

        app.task_name = "c".to_string();
        app.duration = DurationInput::new(0, 0, 1);
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Char(' '));
        tick(&mut app, 1);
        assert_eq!(app.controller.log().len(), 3);
        assert_eq!(app.selected_index(), 2);

        press(&mut app, KeyCode::Char('d'));
        let names: Vec<&str> = app.controller.log().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
    }

    #[test]
    fn test_dark_mode_and_quit() {
        let mut app = app();
        assert!(!app.dark_mode);
        assert_eq!(app.theme().background, Config::default().light_theme.background);
        press(&mut app, KeyCode::Char('D'));
        assert!(app.dark_mode);
        assert_eq!(app.theme().background, Config::default().theme.background);

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
