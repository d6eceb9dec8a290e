//! Reducer for the typing session.
//!
//! Messages come from the input layer with the already-settled buffer value;
//! the reducer mutates the session and returns the side effects the app has
//! to carry out.

use crate::session::{Completion, Session};

/// Input messages to the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Full input buffer after an insertion or deletion
    Edit(String),
    Reset,
}

/// Side effects requested by the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Render,
    Complete(Completion),
}

/// Session + Message → Commands
pub fn update(session: &mut Session, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    match msg {
        Message::Edit(buffer) => {
            if session.is_complete() {
                return cmds;
            }
            let completion = session.apply_input(&buffer);
            log::trace!(
                "edit len={} typed={} errors={}",
                session.input().len(),
                session.total_chars_typed(),
                session.total_errors()
            );
            cmds.push(Command::Render);
            if let Some(done) = completion {
                cmds.push(Command::Complete(done));
            }
        }
        Message::Reset => {
            log::info!("session reset (was {})", session.phase());
            session.reset();
            cmds.push(Command::Render);
        }
    }

    cmds
}
