use crate::input::{completed_key_action, paste_action, typing_key_action, KeyAction};
use crate::runtime::AppEvent;
use crate::session::{Completion, Session};
use crate::update::{update, Command, Message};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Top-level controller owning the session and what the screen shows
#[derive(Debug)]
pub struct App {
    pub session: Session,
    /// Present while the completion panel is shown
    pub completion: Option<Completion>,
    /// Where the target text came from
    pub source_label: String,
    /// Set when the next loop iteration should redraw
    pub dirty: bool,
}

impl App {
    pub fn new(target_text: &str, source_label: impl Into<String>) -> Self {
        Self {
            session: Session::new(target_text),
            completion: None,
            source_label: source_label.into(),
            dirty: true,
        }
    }

    pub fn on_event(&mut self, event: AppEvent) -> Flow {
        let action = match event {
            AppEvent::Key(key) => {
                if self.session.is_complete() {
                    completed_key_action(key)
                } else {
                    typing_key_action(&self.session.input_text(), key)
                }
            }
            AppEvent::Paste(text) if !self.session.is_complete() => {
                paste_action(&self.session.input_text(), &text)
            }
            AppEvent::Paste(_) | AppEvent::Tick => KeyAction::Ignore,
            AppEvent::Resize => {
                self.dirty = true;
                KeyAction::Ignore
            }
        };

        match action {
            KeyAction::Dispatch(msg) => {
                self.dispatch(msg);
                Flow::Continue
            }
            KeyAction::Quit => Flow::Quit,
            KeyAction::Ignore => Flow::Continue,
        }
    }

    pub fn dispatch(&mut self, msg: Message) {
        if msg == Message::Reset {
            self.completion = None;
        }
        for cmd in update(&mut self.session, msg) {
            self.execute(cmd);
        }
    }

    fn execute(&mut self, cmd: Command) {
        match cmd {
            Command::Render => self.dirty = true,
            Command::Complete(done) => {
                log::debug!("showing completion panel");
                self.completion = Some(done);
                self.dirty = true;
            }
        }
    }
}
