use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::update::Message;

/// What a key press means to the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Dispatch(Message),
    Quit,
    Ignore,
}

/// Map a key press while typing to the settled buffer it produces.
///
/// `buffer` is the input as currently stored in the session.
pub fn typing_key_action(buffer: &str, key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('r') if ctrl => KeyAction::Dispatch(Message::Reset),
        KeyCode::Char('u') if ctrl => edit(buffer, String::new()),
        // many terminals report ctrl+backspace as ctrl+h
        KeyCode::Char('w') | KeyCode::Char('h') if ctrl => edit(buffer, delete_word(buffer)),
        KeyCode::Backspace if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {
            edit(buffer, delete_word(buffer))
        }
        KeyCode::Backspace => {
            let mut next = buffer.to_string();
            next.pop();
            edit(buffer, next)
        }
        KeyCode::Char(_) if ctrl => KeyAction::Ignore,
        KeyCode::Char(c) => {
            let mut next = buffer.to_string();
            next.push(c);
            KeyAction::Dispatch(Message::Edit(next))
        }
        // tab, enter, arrows: no edit
        _ => KeyAction::Ignore,
    }
}

/// Keys accepted on the completion panel
pub fn completed_key_action(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('r') => KeyAction::Dispatch(Message::Reset),
        _ => KeyAction::Ignore,
    }
}

/// Append pasted text; line breaks and tabs become plain spaces
pub fn paste_action(buffer: &str, pasted: &str) -> KeyAction {
    let cleaned: String = pasted
        .chars()
        .filter(|c| *c != '\r')
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect();
    if cleaned.is_empty() {
        return KeyAction::Ignore;
    }
    KeyAction::Dispatch(Message::Edit(format!("{buffer}{cleaned}")))
}

fn edit(buffer: &str, next: String) -> KeyAction {
    if next == buffer {
        KeyAction::Ignore
    } else {
        KeyAction::Dispatch(Message::Edit(next))
    }
}

fn delete_word(buffer: &str) -> String {
    let trimmed = buffer.trim_end();
    match trimmed.rfind(char::is_whitespace) {
        Some(idx) => {
            let ws_len = trimmed[idx..].chars().next().map_or(1, char::len_utf8);
            trimmed[..idx + ws_len].to_string()
        }
        None => String::new(),
    }
}
