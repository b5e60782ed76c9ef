use super::*;

#[test]
fn arrows_move_and_mod_arrows_walk_history() {
    assert_eq!(command_for(&KeyEvent::new(Key::ArrowUp)), Some(KeyCommand::Move(Direction::Up)));
    assert_eq!(command_for(&KeyEvent::new(Key::ArrowDown)), Some(KeyCommand::Move(Direction::Down)));

    let meta = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    assert_eq!(command_for(&KeyEvent::with_modifiers(Key::ArrowLeft, meta)), Some(KeyCommand::HistoryBack));
    assert_eq!(command_for(&KeyEvent::with_modifiers(Key::ArrowRight, ctrl)), Some(KeyCommand::HistoryForward));
}

#[test]
fn enter_and_space_are_bound() {
    assert_eq!(command_for(&KeyEvent::new(Key::Enter)), Some(KeyCommand::GoToDefinition));
    assert_eq!(command_for(&KeyEvent::new(Key::Space)), Some(KeyCommand::Swallow));
}

#[test]
fn unbound_keys_are_left_to_the_host() {
    assert_eq!(command_for(&KeyEvent::new(Key::Other("a".into()))), None);
    let meta = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    assert_eq!(command_for(&KeyEvent::with_modifiers(Key::ArrowUp, meta)), None);
}
