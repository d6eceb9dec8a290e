use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use klack::app::{App, Flow};
use klack::runtime::{AppEvent, FixedTicker, Runner, TestEventSource};
use klack::session::{Completion, Phase};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn code(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Drive the app until it quits or the channel runs dry
fn drive(app: &mut App, events: Vec<AppEvent>) -> Flow {
    let (tx, rx) = mpsc::channel();
    let count = events.len();
    for ev in events {
        tx.send(ev).unwrap();
    }
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(5)),
    );

    for _ in 0..count + 10 {
        if app.on_event(runner.step()) == Flow::Quit {
            return Flow::Quit;
        }
    }
    Flow::Continue
}

// Headless integration using the internal runtime + App without a TTY
#[test]
fn headless_typing_flow_completes() {
    let mut app = App::new("cat", "test");

    let flow = drive(&mut app, "cbt".chars().map(key).collect());

    assert_eq!(flow, Flow::Continue);
    assert_eq!(app.session.phase(), Phase::Complete);
    assert_eq!(
        app.completion,
        Some(Completion {
            accuracy: 67,
            errors: 1
        })
    );
}

#[test]
fn headless_delete_and_retype() {
    let mut app = App::new("ab", "test");

    let events = vec![key('a'), code(KeyCode::Backspace), key('a'), key('b')];
    drive(&mut app, events);

    assert_eq!(app.session.total_chars_typed(), 3);
    assert_eq!(app.session.total_errors(), 0);
    assert_eq!(app.completion.map(|c| c.accuracy), Some(100));
}

#[test]
fn headless_reset_from_completion_and_quit() {
    let mut app = App::new("hi", "test");

    let events = vec![key('h'), key('o'), key('r'), key('h'), code(KeyCode::Esc)];
    let flow = drive(&mut app, events);

    assert_eq!(flow, Flow::Quit);
    assert_eq!(app.session.phase(), Phase::InProgress);
    assert_eq!(app.session.input_text(), "h");
    assert_eq!(app.session.total_chars_typed(), 1);
    assert!(app.completion.is_none());
}

#[test]
fn headless_ctrl_r_resets_mid_session() {
    let mut app = App::new("hello", "test");

    let events = vec![
        key('h'),
        key('x'),
        AppEvent::Key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
    ];
    drive(&mut app, events);

    assert_eq!(app.session.input_text(), "");
    assert_eq!(app.session.total_errors(), 0);
    assert_eq!(app.session.live_stats().accuracy, 100);
}

#[test]
fn headless_paste_overrun() {
    let mut app = App::new("abc", "test");

    drive(&mut app, vec![key('a'), AppEvent::Paste("bcdef".into())]);

    assert_eq!(app.session.input_text(), "abc");
    assert_eq!(app.session.total_chars_typed(), 3);
    assert!(app.completion.is_some());
}
