use super::{Menu, MenuEvent, MenuOutcome};
use crate::catalog::{Catalog, Category, CategoryId};
use crate::discovery::FilterState;

/// Sidebar category dropdown: "All" followed by every catalog category.
#[derive(Debug, Clone)]
pub struct CategoryMenu {
    entries: Vec<Category>,
    menu: Menu,
}

impl CategoryMenu {
    pub fn new(catalog: &Catalog, active: &CategoryId) -> Self {
        let mut entries = Vec::with_capacity(catalog.categories().len() + 1);
        entries.push(Category::new(CategoryId::all(), "All"));
        entries.extend(catalog.categories().iter().cloned());

        let focus = entries.iter().position(|c| &c.id == active).unwrap_or(0);
        let menu = Menu::new(entries.len()).with_initial_focus(focus);
        Self { entries, menu }
    }

    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Feed an event; an activation selects that category in `state`.
    pub fn handle(&mut self, event: MenuEvent, state: &mut FilterState) -> MenuOutcome {
        let outcome = self.menu.handle(event);
        if let MenuOutcome::Activated(index) = outcome {
            state.set_category(self.entries[index].id.clone());
            self.menu = self.menu.clone().with_initial_focus(index);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;
    use crate::menu::MenuKey;

    #[test]
    fn test_selects_category() {
        let catalog = builtin_catalog();
        let mut state = FilterState::default();
        let mut menu = CategoryMenu::new(&catalog, &state.active_category);
        assert_eq!(menu.entries().len(), catalog.categories().len() + 1);

        menu.handle(MenuEvent::ToggleClick, &mut state);
        menu.handle(MenuEvent::Key(MenuKey::ArrowDown), &mut state);
        let outcome = menu.handle(MenuEvent::Key(MenuKey::Enter), &mut state);
        assert_eq!(outcome, MenuOutcome::Activated(1));
        assert_eq!(state.active_category, catalog.categories()[0].id);
    }

    #[test]
    fn test_focus_starts_on_active_category() {
        let catalog = builtin_catalog();
        let mut state = FilterState::new().category("audio");
        let mut menu = CategoryMenu::new(&catalog, &state.active_category);
        menu.handle(MenuEvent::Focus, &mut state);
        let focused = menu.menu().focused().unwrap();
        assert_eq!(menu.entries()[focused].id.as_str(), "audio");
    }
}
