use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Button};
use crate::shapes::ShapeKind;

/// Handle a key press
pub fn handle_key(app: &mut App, key: KeyEvent) {
    app.clear_status();

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Enter if app.scene().is_drawing() => app.finish_drawing(),
        KeyCode::Enter | KeyCode::Char('s') => app.press_button(Button::Submit),
        KeyCode::Esc => app.cancel_drawing(),
        KeyCode::Char('r') => app.press_button(Button::Reset),
        KeyCode::Char('d') | KeyCode::Delete => app.press_button(Button::Delete),
        KeyCode::Char('i') => app.insert_vertex(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.press_button(Button::Palette(index));
        }
        KeyCode::Char('p') => app.choose_drawing_mode(ShapeKind::Polygon),
        KeyCode::Char('l') => app.choose_drawing_mode(ShapeKind::Polyline),
        KeyCode::Char('m') => app.choose_drawing_mode(ShapeKind::Marker),
        KeyCode::Char('b') => app.choose_drawing_mode(ShapeKind::Rectangle),
        KeyCode::Char('c') => app.choose_drawing_mode(ShapeKind::Circle),
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') => app.zoom_out(),
        KeyCode::Left => app.pan(-4, 0),
        KeyCode::Right => app.pan(4, 0),
        KeyCode::Up => app.pan(0, -2),
        KeyCode::Down => app.pan(0, 2),
        _ => {}
    }
}

/// Handle mouse events on the map and button bar
pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.pointer_down(event.column, event.row);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.pointer_drag(event.column, event.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.pointer_up(event.column, event.row);
        }
        MouseEventKind::Down(MouseButton::Right) => {
            app.cancel_drawing();
        }
        MouseEventKind::ScrollUp => {
            if event.modifiers.contains(KeyModifiers::SHIFT) {
                app.pan(0, -3);
            } else {
                app.zoom_in();
            }
        }
        MouseEventKind::ScrollDown => {
            if event.modifiers.contains(KeyModifiers::SHIFT) {
                app.pan(0, 3);
            } else {
                app.zoom_out();
            }
        }
        MouseEventKind::ScrollLeft => {
            app.pan(-3, 0);
        }
        MouseEventKind::ScrollRight => {
            app.pan(3, 0);
        }
        _ => {}
    }
}
