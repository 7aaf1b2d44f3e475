use pretty_assertions::assert_eq;
use tasktimer_core::testing::{ManualScheduler, RecordingNotifier};
use tasktimer_core::{Controller, DurationInput, Phase, Settings, TaskId};

fn controller(warning_period: u64) -> Controller<ManualScheduler, RecordingNotifier> {
    Controller::new(
        ManualScheduler::new(),
        RecordingNotifier::granted(),
        Settings {
            warning_period,
            ..Settings::default()
        },
    )
}

fn check_invariants(c: &Controller<ManualScheduler, RecordingNotifier>) {
    let state = c.machine().state();
    assert!(state.time_left <= state.total_time);
    assert!(c.scheduler().active() <= 1);
    assert_eq!(c.is_ticking(), state.is_running && state.time_left > 0);
}

#[test]
fn pomodoro_with_interruption() {
    let mut c = controller(60);
    c.configure(DurationInput::from_minutes(25), "deep work");
    c.start("deep work");
    check_invariants(&c);

    for _ in 0..600 {
        c.tick();
        check_invariants(&c);
    }
    c.pause();
    assert_eq!(c.machine().phase(), Phase::Paused);
    for _ in 0..100 {
        c.tick();
    }
    assert_eq!(c.machine().state().time_left, 900);

    c.start("deep work");
    let mut ticks = 0;
    while c.machine().is_running() {
        c.tick();
        check_invariants(&c);
        ticks += 1;
    }

    assert_eq!(ticks, 900);
    assert_eq!(c.machine().phase(), Phase::Idle);
    assert_eq!(c.log().len(), 1);
    assert_eq!(c.log().get(0).map(|t| t.duration), Some(1500));
    assert_eq!(c.notifier().titles(), vec!["Timer Warning!", "Timer Complete!"]);
    assert_eq!(
        c.notifier().delivered[0].body,
        "Only 1m remaining for deep work"
    );
}

#[test]
fn back_to_back_sessions_are_logged_newest_first() {
    let mut c = controller(0);
    for (name, seconds) in [("read", 3), ("write", 2), ("", 1)] {
        c.reset(DurationInput::new(0, 0, seconds), name);
        c.start(name);
        for _ in 0..seconds {
            c.tick();
        }
        check_invariants(&c);
    }

    let logged: Vec<(String, u64)> = c
        .log()
        .iter()
        .map(|t| (t.name.clone(), t.duration))
        .collect();
    assert_eq!(
        logged,
        vec![
            ("Unnamed Task".to_string(), 1),
            ("write".to_string(), 2),
            ("read".to_string(), 3),
        ]
    );
    assert_eq!(c.log().total_time(), 6);
}

#[test]
fn deleting_unknown_id_changes_nothing() {
    let mut c = controller(0);
    c.configure(DurationInput::new(0, 0, 1), "one");
    c.start("one");
    c.tick();

    let before: Vec<_> = c.log().iter().cloned().collect();
    assert!(!c.remove_completed(TaskId::new()));
    let after: Vec<_> = c.log().iter().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn configure_and_reset_treat_zero_differently() {
    let mut c = controller(0);
    c.configure(DurationInput::new(0, 1, 0), "x");

    c.configure(DurationInput::default(), "y");
    assert_eq!(c.machine().state().total_time, 60);
    assert_eq!(c.machine().state().current_task, "x");

    c.reset(DurationInput::default(), "y");
    assert_eq!(c.machine().state().total_time, 0);
    assert_eq!(c.machine().state().time_left, 0);
    assert!(!c.machine().is_running());
    assert_eq!(c.machine().state().current_task, "y");
}

#[test]
fn log_entries_serialize() {
    let mut c = controller(0);
    c.configure(DurationInput::new(0, 0, 2), "json");
    c.start("json");
    c.tick();
    c.tick();

    let value = serde_json::to_value(c.log().get(0).expect("entry")).expect("serialize");
    assert_eq!(value["name"], "json");
    assert_eq!(value["duration"], 2);
    assert_eq!(value["time_spent"], 2);
    assert!(value["id"].is_string());
    assert!(value["completed_at"].is_string());
}
