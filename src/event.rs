use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    Reload,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Key(KeyAction),
    Resize,
}

/// Waits for the next event the viewer cares about. `None` once the
/// terminal stops producing events.
pub async fn next_event(reader: &mut EventStream) -> Option<ViewerEvent> {
    loop {
        match reader.next().await {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                if let Some(action) = key_to_action(key) {
                    return Some(ViewerEvent::Key(action));
                }
            }
            Some(Ok(Event::Resize(_, _))) => return Some(ViewerEvent::Resize),
            Some(Ok(_)) => {}
            Some(Err(_)) | None => return None,
        }
    }
}

pub fn key_to_action(key: KeyEvent) -> Option<KeyAction> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(KeyAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(KeyAction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(KeyAction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(KeyAction::Right),
        KeyCode::Char('r') => Some(KeyAction::Reload),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        _ => None,
    }
}
