use indexmap::IndexSet;

// ---------------------------------------------------------------------------
// Input events
// ---------------------------------------------------------------------------

/// Keys a column header reacts to. Anything else is `Other` and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKey {
    Space,
    Enter,
    Other,
}

/// Modifier state at the time of a click or key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectModifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl SelectModifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
    };

    /// Ctrl or Meta (Cmd on macOS) requests multi-select.
    pub fn is_multi(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press on a focused column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderKeyEvent {
    pub key: HeaderKey,
    pub modifiers: SelectModifiers,
}

impl HeaderKeyEvent {
    pub fn new(key: HeaderKey, modifiers: SelectModifiers) -> Self {
        Self { key, modifiers }
    }
}

// ---------------------------------------------------------------------------
// Selection model
// ---------------------------------------------------------------------------

/// Set of selected column names, kept in insertion order for display.
///
/// Names are not checked against any dataset; callers pass valid columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionModel {
    selected: IndexSet<String>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, col: &str) -> bool {
        self.selected.contains(col)
    }

    /// Add `col` if absent, remove it if present. Other members are kept.
    pub fn toggle(&mut self, col: &str) {
        if !self.selected.shift_remove(col) {
            self.selected.insert(col.to_string());
        }
    }

    /// Set the selection to exactly `cols`; duplicates collapse.
    pub fn replace<I, S>(&mut self, cols: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = cols.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Single-select toggle: `{col}` becomes empty, anything else becomes `{col}`.
    fn select_only(&mut self, col: &str) {
        let only_col = self.selected.len() == 1 && self.selected.contains(col);
        if only_col {
            self.clear();
        } else {
            self.replace([col]);
        }
    }

    /// Pointer click on a column header.
    pub fn on_header_click(&mut self, col: &str, modifiers: SelectModifiers) {
        if modifiers.is_multi() {
            self.toggle(col);
        } else {
            self.select_only(col);
        }
    }

    /// Key press on a focused column header.
    ///
    /// Returns `true` when the event was handled and its default action
    /// should be suppressed. Unhandled keys leave the selection untouched.
    pub fn on_header_key_down(&mut self, event: &HeaderKeyEvent, col: &str) -> bool {
        match event.key {
            HeaderKey::Space | HeaderKey::Enter => {
                self.on_header_click(col, event.modifiers);
                true
            }
            HeaderKey::Other => false,
        }
    }

    /// Selected names in display order.
    pub fn to_vec(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(cols: &[&str]) -> SelectionModel {
        let mut s = SelectionModel::new();
        s.replace(cols.iter().copied());
        s
    }

    fn enter(modifiers: SelectModifiers) -> HeaderKeyEvent {
        HeaderKeyEvent::new(HeaderKey::Enter, modifiers)
    }

    #[test]
    fn toggle_twice_restores_selection() {
        for base in [&[][..], &["a"][..], &["a", "b"][..]] {
            for col in ["a", "b", "c"] {
                let mut s = selection(base);
                let before = s.clone();
                s.toggle(col);
                s.toggle(col);
                assert_eq!(s, before, "toggle({col}) twice from {base:?}");
            }
        }
    }

    #[test]
    fn toggle_keeps_other_members() {
        let mut s = selection(&["a", "b"]);
        s.toggle("c");
        assert_eq!(s.to_vec(), vec!["a", "b", "c"]);
        s.toggle("a");
        assert_eq!(s.to_vec(), vec!["b", "c"]);
    }

    #[test]
    fn replace_collapses_duplicates_and_keeps_order() {
        let s = selection(&["b", "a", "b"]);
        assert_eq!(s.to_vec(), vec!["b", "a"]);
    }

    #[test]
    fn enter_without_modifier_is_exclusive() {
        let mut s = selection(&["a"]);
        assert!(s.on_header_key_down(&enter(SelectModifiers::NONE), "a"));
        assert!(s.is_empty());

        let mut s = selection(&["a"]);
        s.on_header_key_down(&enter(SelectModifiers::NONE), "b");
        assert_eq!(s.to_vec(), vec!["b"]);

        let mut s = selection(&["a", "b"]);
        s.on_header_key_down(&enter(SelectModifiers::NONE), "a");
        assert_eq!(s.to_vec(), vec!["a"]);
    }

    #[test]
    fn modifier_makes_selection_additive() {
        let mut s = selection(&["a"]);
        s.on_header_key_down(&enter(SelectModifiers::CTRL), "b");
        assert_eq!(s.to_vec(), vec!["a", "b"]);

        let meta = SelectModifiers {
            ctrl: false,
            meta: true,
        };
        s.on_header_key_down(&HeaderKeyEvent::new(HeaderKey::Space, meta), "a");
        assert_eq!(s.to_vec(), vec!["b"]);
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut s = selection(&["a"]);
        let event = HeaderKeyEvent::new(HeaderKey::Other, SelectModifiers::CTRL);
        assert!(!s.on_header_key_down(&event, "b"));
        assert_eq!(s.to_vec(), vec!["a"]);
    }

    #[test]
    fn click_matches_keyboard_semantics() {
        let mut s = selection(&["a"]);
        s.on_header_click("a", SelectModifiers::NONE);
        assert!(s.is_empty());
        s.on_header_click("a", SelectModifiers::NONE);
        s.on_header_click("b", SelectModifiers::CTRL);
        assert_eq!(s.to_vec(), vec!["a", "b"]);
    }
}
