//! Keyboard-navigable menu widgets.
//!
//! A [`Menu`] is `Closed` until opened by click, hover or focus. While open,
//! arrow keys move a circular focus index, Home/End jump to the ends and
//! Enter/Space activate the focused item, which also closes the menu.

mod account;
mod category;

pub use account::{AccountMenu, AccountMenuItem};
pub use category::CategoryMenu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open { focus: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKey {
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Enter,
    Space,
    Escape,
    Tab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// Trigger clicked: opens when closed, closes when open.
    ToggleClick,
    Hover,
    Focus,
    OutsideClick,
    Key(MenuKey),
    /// Pointer activation of a specific item.
    ItemClick(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Unchanged,
    Opened,
    Closed,
    FocusMoved(usize),
    Activated(usize),
}

#[derive(Debug, Clone)]
pub struct Menu {
    len: usize,
    state: MenuState,
    initial_focus: usize,
}

impl Menu {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            state: MenuState::Closed,
            initial_focus: 0,
        }
    }

    /// Item focused when the menu opens. Out-of-range values are ignored.
    pub fn with_initial_focus(mut self, index: usize) -> Self {
        if index < self.len {
            self.initial_focus = index;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    pub fn focused(&self) -> Option<usize> {
        match self.state {
            MenuState::Open { focus } => Some(focus),
            MenuState::Closed => None,
        }
    }

    pub fn open(&mut self) -> MenuOutcome {
        if self.is_open() || self.len == 0 {
            return MenuOutcome::Unchanged;
        }
        self.state = MenuState::Open {
            focus: self.initial_focus,
        };
        MenuOutcome::Opened
    }

    pub fn close(&mut self) -> MenuOutcome {
        if !self.is_open() {
            return MenuOutcome::Unchanged;
        }
        self.state = MenuState::Closed;
        MenuOutcome::Closed
    }

    pub fn handle(&mut self, event: MenuEvent) -> MenuOutcome {
        match (self.state, event) {
            (MenuState::Closed, MenuEvent::ToggleClick | MenuEvent::Hover | MenuEvent::Focus) => {
                self.open()
            }
            (MenuState::Closed, MenuEvent::Key(MenuKey::Enter | MenuKey::Space | MenuKey::ArrowDown)) => {
                self.open()
            }
            (MenuState::Closed, _) => MenuOutcome::Unchanged,

            (MenuState::Open { .. }, MenuEvent::ToggleClick | MenuEvent::OutsideClick) => self.close(),
            (MenuState::Open { .. }, MenuEvent::Hover | MenuEvent::Focus) => MenuOutcome::Unchanged,
            (MenuState::Open { .. }, MenuEvent::ItemClick(index)) => self.activate(index),
            (MenuState::Open { focus }, MenuEvent::Key(key)) => self.handle_key(focus, key),
        }
    }

    fn handle_key(&mut self, focus: usize, key: MenuKey) -> MenuOutcome {
        let last = self.len - 1;
        match key {
            MenuKey::ArrowDown => self.move_focus(if focus >= last { 0 } else { focus + 1 }),
            MenuKey::ArrowUp => self.move_focus(if focus == 0 { last } else { focus - 1 }),
            MenuKey::Home => self.move_focus(0),
            MenuKey::End => self.move_focus(last),
            MenuKey::Enter | MenuKey::Space => self.activate(focus),
            MenuKey::Escape | MenuKey::Tab => self.close(),
        }
    }

    fn move_focus(&mut self, focus: usize) -> MenuOutcome {
        self.state = MenuState::Open { focus };
        MenuOutcome::FocusMoved(focus)
    }

    fn activate(&mut self, index: usize) -> MenuOutcome {
        if index >= self.len {
            return MenuOutcome::Unchanged;
        }
        self.state = MenuState::Closed;
        MenuOutcome::Activated(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_close_paths() {
        let mut menu = Menu::new(3);
        assert_eq!(menu.handle(MenuEvent::Hover), MenuOutcome::Opened);
        assert_eq!(menu.focused(), Some(0));
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::Escape)), MenuOutcome::Closed);

        assert_eq!(menu.handle(MenuEvent::ToggleClick), MenuOutcome::Opened);
        assert_eq!(menu.handle(MenuEvent::OutsideClick), MenuOutcome::Closed);

        assert_eq!(menu.handle(MenuEvent::Focus), MenuOutcome::Opened);
        assert_eq!(menu.handle(MenuEvent::ToggleClick), MenuOutcome::Closed);
        assert_eq!(menu.handle(MenuEvent::OutsideClick), MenuOutcome::Unchanged);
    }

    #[test]
    fn test_focus_wraps() {
        let mut menu = Menu::new(3);
        menu.open();
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::ArrowUp)), MenuOutcome::FocusMoved(2));
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::ArrowDown)), MenuOutcome::FocusMoved(0));
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::ArrowDown)), MenuOutcome::FocusMoved(1));
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::End)), MenuOutcome::FocusMoved(2));
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::Home)), MenuOutcome::FocusMoved(0));
    }

    #[test]
    fn test_activation_closes() {
        let mut menu = Menu::new(4);
        menu.open();
        menu.handle(MenuEvent::Key(MenuKey::End));
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::Space)), MenuOutcome::Activated(3));
        assert!(!menu.is_open());

        menu.open();
        assert_eq!(menu.handle(MenuEvent::ItemClick(9)), MenuOutcome::Unchanged);
        assert_eq!(menu.handle(MenuEvent::ItemClick(1)), MenuOutcome::Activated(1));
        assert_eq!(menu.state(), MenuState::Closed);
    }

    #[test]
    fn test_keys_ignored_while_closed() {
        let mut menu = Menu::new(2);
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::Home)), MenuOutcome::Unchanged);
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::Escape)), MenuOutcome::Unchanged);
        assert_eq!(menu.handle(MenuEvent::Key(MenuKey::ArrowDown)), MenuOutcome::Opened);
    }

    #[test]
    fn test_empty_menu_never_opens() {
        let mut menu = Menu::new(0);
        assert_eq!(menu.handle(MenuEvent::ToggleClick), MenuOutcome::Unchanged);
        assert!(!menu.is_open());
    }

    #[test]
    fn test_initial_focus() {
        let mut menu = Menu::new(3).with_initial_focus(2);
        menu.open();
        assert_eq!(menu.focused(), Some(2));

        let mut menu = Menu::new(3).with_initial_focus(7);
        menu.open();
        assert_eq!(menu.focused(), Some(0));
    }
}
