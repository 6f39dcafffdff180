use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use reprise_core::{
    InputEvent, Key, KeyEvent, Modifiers, PointerButton, PointerEvent, PointerEventKind, Vec2,
};

fn modifiers(m: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: m.contains(KeyModifiers::SHIFT),
        ctrl: m.contains(KeyModifiers::CONTROL),
        alt: m.contains(KeyModifiers::ALT),
    }
}

fn button(b: MouseButton) -> PointerButton {
    match b {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Tertiary,
    }
}

/// Maps a crossterm event onto the runtime's input model. Events the UI
/// has no use for (releases, scrolls, focus, paste) map to `None`.
pub fn translate(ev: Event) -> Option<InputEvent> {
    match ev {
        Event::Key(k) if k.kind == KeyEventKind::Press => {
            let mut mods = modifiers(k.modifiers);
            let key = match k.code {
                KeyCode::Char(' ') => Key::Space,
                KeyCode::Char(c) => Key::Character(c),
                KeyCode::Enter => Key::Enter,
                KeyCode::Tab => Key::Tab,
                KeyCode::BackTab => {
                    mods.shift = true;
                    Key::Tab
                }
                KeyCode::Esc => Key::Escape,
                KeyCode::Up => Key::ArrowUp,
                KeyCode::Down => Key::ArrowDown,
                _ => return None,
            };
            Some(InputEvent::Key(KeyEvent::new(key).with_modifiers(mods)))
        }
        Event::Mouse(m) => {
            let event = match m.kind {
                MouseEventKind::Down(b) => PointerEventKind::Down(button(b)),
                MouseEventKind::Up(b) => PointerEventKind::Up(button(b)),
                MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerEventKind::Move,
                _ => return None,
            };
            Some(InputEvent::Pointer(PointerEvent {
                event,
                position: Vec2::cell_center(m.column, m.row),
                modifiers: modifiers(m.modifiers),
            }))
        }
        Event::Resize(cols, rows) => Some(InputEvent::Resize {
            cols: cols as u32,
            rows: rows as u32,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent as CtKeyEvent, MouseEvent};

    use super::*;

    #[test]
    fn space_and_backtab_are_normalized() {
        let space = translate(Event::Key(CtKeyEvent::new(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
        )));
        assert!(matches!(
            space,
            Some(InputEvent::Key(KeyEvent { key: Key::Space, .. }))
        ));

        let back = translate(Event::Key(CtKeyEvent::new(
            KeyCode::BackTab,
            KeyModifiers::NONE,
        )));
        match back {
            Some(InputEvent::Key(ke)) => {
                assert_eq!(ke.key, Key::Tab);
                assert!(ke.modifiers.shift);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn mouse_lands_in_cell_center() {
        let ev = translate(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 1,
            modifiers: KeyModifiers::NONE,
        }));
        match ev {
            Some(InputEvent::Pointer(pe)) => {
                assert_eq!(pe.event, PointerEventKind::Down(PointerButton::Primary));
                assert_eq!(pe.position, Vec2 { x: 3.5, y: 1.5 });
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn scroll_is_ignored() {
        let ev = translate(Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
        assert!(ev.is_none());
    }
}
