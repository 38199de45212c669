use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use crate::app::App;
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        // Terminal window focus follows the input focus
        AppEvent::FocusGained => app.widget.focus(),
        AppEvent::FocusLost => app.widget.blur(),
        AppEvent::Tick => {
            app.on_tick(Instant::now());
            app.poll_reply().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.widget.is_focused() {
        handle_input_focused(app, key);
    } else {
        handle_unfocused(app, key);
    }
}

fn handle_unfocused(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // Scroll the conversation
        KeyCode::Char('j') | KeyCode::Down => app.scroll_chat_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_chat_up(1),
        KeyCode::PageDown => app.scroll_chat_down(app.chat_height / 2),
        KeyCode::PageUp => app.scroll_chat_up(app.chat_height / 2),
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        KeyCode::Char('g') => app.chat_scroll = 0,

        // Focus the input
        KeyCode::Tab | KeyCode::Enter | KeyCode::Char('i') => app.widget.focus(),

        // Typing anything else starts a question right away
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.widget.focus();
            app.widget.insert_char(c);
        }

        _ => {}
    }
}

fn handle_input_focused(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Tab => app.widget.blur(),
        KeyCode::Enter => {
            // Shift+Enter is not a submit
            if !key.modifiers.contains(KeyModifiers::SHIFT) {
                app.submit();
            }
        }
        KeyCode::Backspace => app.widget.backspace(),
        KeyCode::Delete => app.widget.delete(),
        KeyCode::Left => app.widget.cursor_left(),
        KeyCode::Right => app.widget.cursor_right(),
        KeyCode::Home => app.widget.cursor_home(),
        KeyCode::End => app.widget.cursor_end(),
        KeyCode::Up => app.scroll_chat_up(1),
        KeyCode::Down => app.scroll_chat_down(1),
        KeyCode::Char(c) => app.widget.insert_char(c),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_chat_down(3),
        MouseEventKind::ScrollUp => app.scroll_chat_up(3),
        _ => {}
    }
}
