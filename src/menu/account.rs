use std::fmt;
use std::str::FromStr;

use super::{Menu, MenuEvent, MenuOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountMenuItem {
    Profile,
    Favorites,
    Settings,
    Admin,
    Logout,
}

impl AccountMenuItem {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountMenuItem::Profile => "profile",
            AccountMenuItem::Favorites => "favorites",
            AccountMenuItem::Settings => "settings",
            AccountMenuItem::Admin => "admin",
            AccountMenuItem::Logout => "logout",
        }
    }
}

impl fmt::Display for AccountMenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountMenuItem {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(AccountMenuItem::Profile),
            "favorites" => Ok(AccountMenuItem::Favorites),
            "settings" => Ok(AccountMenuItem::Settings),
            "admin" => Ok(AccountMenuItem::Admin),
            "logout" => Ok(AccountMenuItem::Logout),
            other => Err(crate::Error::Parse(format!("unknown account menu item: {other}"))),
        }
    }
}

/// Account dropdown. The admin entry only exists for admins; the last
/// activated item receives focus on the next open.
#[derive(Debug, Clone)]
pub struct AccountMenu {
    items: Vec<AccountMenuItem>,
    menu: Menu,
}

impl AccountMenu {
    pub fn new(is_admin: bool, last_item: Option<AccountMenuItem>) -> Self {
        let items: Vec<_> = [
            AccountMenuItem::Profile,
            AccountMenuItem::Favorites,
            AccountMenuItem::Settings,
            AccountMenuItem::Admin,
            AccountMenuItem::Logout,
        ]
        .into_iter()
        .filter(|item| is_admin || *item != AccountMenuItem::Admin)
        .collect();

        let focus = last_item
            .and_then(|last| items.iter().position(|i| *i == last))
            .unwrap_or(0);
        let menu = Menu::new(items.len()).with_initial_focus(focus);
        Self { items, menu }
    }

    pub fn items(&self) -> &[AccountMenuItem] {
        &self.items
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn focused_item(&self) -> Option<AccountMenuItem> {
        self.menu.focused().map(|i| self.items[i])
    }

    /// Feed an event; returns the activated item, if any.
    pub fn handle(&mut self, event: MenuEvent) -> Option<AccountMenuItem> {
        match self.menu.handle(event) {
            MenuOutcome::Activated(index) => {
                let item = self.items[index];
                self.menu = self.menu.clone().with_initial_focus(index);
                Some(item)
            }
            _ => None,
        }
    }
}
