/// A key press together with its modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    /// Key name as reported by the host, e.g. `"Delete"`, `"Backspace"`, `"z"`.
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Ctrl on most platforms, Cmd on macOS.
    fn has_platform_modifier(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    DeleteSelection,
    Undo,
    Redo,
}

impl EditorAction {
    /// Maps a key chord to an editor action.
    ///
    /// `Delete`, or `Backspace` with the platform modifier, deletes the selection.
    /// Modifier+Z undoes and Modifier+Shift+Z redoes.
    pub fn from_key(chord: &KeyChord) -> Option<Self> {
        let modifier = chord.has_platform_modifier();
        if chord.key == "Delete" || (chord.key == "Backspace" && modifier) {
            return Some(EditorAction::DeleteSelection);
        }
        if modifier && chord.key.eq_ignore_ascii_case("z") {
            return Some(if chord.shift {
                EditorAction::Redo
            } else {
                EditorAction::Undo
            });
        }
        None
    }
}
