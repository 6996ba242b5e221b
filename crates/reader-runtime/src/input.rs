use crate::controller::ReaderAction;

/// Keys the reader panel responds to while it is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderKey {
    ArrowLeft,
    ArrowRight,
    Escape,
    Plus,
    Equals,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

/// Shortcuts handled by the catalog page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalShortcut {
    OpenSearch,
    ScrollToTop,
}

/// Map a key press to a reader action.
///
/// Pages turn right to left, so the left arrow advances.
pub fn reader_action_for_key(key: ReaderKey) -> ReaderAction {
    match key {
        ReaderKey::ArrowLeft => ReaderAction::NextPage,
        ReaderKey::ArrowRight => ReaderAction::PreviousPage,
        ReaderKey::Escape => ReaderAction::Close,
        ReaderKey::Plus | ReaderKey::Equals => ReaderAction::ZoomIn,
        ReaderKey::Minus => ReaderAction::ZoomOut,
    }
}

/// Wheel zoom only applies with the zoom modifier held
pub fn reader_action_for_wheel(direction: WheelDirection, zoom_modifier: bool) -> Option<ReaderAction> {
    if !zoom_modifier {
        return None;
    }
    Some(match direction {
        WheelDirection::Up => ReaderAction::ZoomIn,
        WheelDirection::Down => ReaderAction::ZoomOut,
    })
}

/// `command` is Ctrl on most platforms and Cmd on macOS
pub fn global_shortcut(command: bool, key: char) -> Option<GlobalShortcut> {
    if !command {
        return None;
    }
    match key.to_ascii_lowercase() {
        'k' => Some(GlobalShortcut::OpenSearch),
        'h' => Some(GlobalShortcut::ScrollToTop),
        _ => None,
    }
}
