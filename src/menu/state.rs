//! Selection state for a paginated menu.
//!
//! `MenuState::apply` is the whole navigation table: every key event is
//! resolved against the page boundaries here, and nowhere else.

use std::ops::Range;

use super::input::KeyEvent;

/// Result of applying one key to the menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Selection or page changed.
    Moved,
    /// Key had no effect (boundary reached, or unrecognized key).
    Unchanged,
    /// The user confirmed the item at this index.
    Select(usize),
    /// The user asked to leave the menu.
    Quit,
}

/// Cursor and page position within a fixed list of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuState {
    selected_index: usize,
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
    total_pages: usize,
    paginated: bool,
}

impl MenuState {
    /// Create state for `total_items` items, starting on the first item.
    ///
    /// Pagination only takes effect when the items do not fit on one page;
    /// otherwise the whole list is a single page.
    #[must_use]
    pub fn new(total_items: usize, paginate: bool, items_per_page: usize) -> Self {
        debug_assert!(total_items > 0, "menu requires at least one item");
        debug_assert!(
            !paginate || items_per_page > 0,
            "paginated menu requires a positive page size"
        );

        let paginated = paginate && items_per_page > 0 && total_items > items_per_page;
        let items_per_page = if paginated {
            items_per_page
        } else {
            total_items.max(1)
        };
        let total_pages = total_items.div_ceil(items_per_page).max(1);

        Self {
            selected_index: 0,
            current_page: 0,
            items_per_page,
            total_items,
            total_pages,
            paginated,
        }
    }

    /// Index of the highlighted item in the full list.
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Zero-based page currently shown.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Effective page size.
    #[must_use]
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Number of items in the menu.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Whether pagination is in effect.
    #[must_use]
    pub fn is_paginated(&self) -> bool {
        self.paginated
    }

    /// Indices visible on the current page.
    #[must_use]
    pub fn page_range(&self) -> Range<usize> {
        self.range_of(self.current_page)
    }

    fn range_of(&self, page: usize) -> Range<usize> {
        let start = page * self.items_per_page;
        let end = (start + self.items_per_page).min(self.total_items);
        start..end
    }

    /// Apply a key press.
    pub fn apply(&mut self, key: KeyEvent) -> Transition {
        match key {
            KeyEvent::Up => self.move_up(),
            KeyEvent::Down => self.move_down(),
            KeyEvent::PageUp => self.page_up(),
            KeyEvent::PageDown => self.page_down(),
            KeyEvent::Enter => Transition::Select(self.selected_index),
            KeyEvent::Quit => Transition::Quit,
            KeyEvent::Unrecognized => Transition::Unchanged,
        }
    }

    fn move_up(&mut self) -> Transition {
        if self.selected_index > self.page_range().start {
            self.selected_index -= 1;
            Transition::Moved
        } else if self.current_page > 0 {
            self.current_page -= 1;
            self.selected_index = self.page_range().end - 1;
            Transition::Moved
        } else {
            Transition::Unchanged
        }
    }

    fn move_down(&mut self) -> Transition {
        if self.selected_index + 1 < self.page_range().end {
            self.selected_index += 1;
            Transition::Moved
        } else if self.current_page + 1 < self.total_pages {
            self.go_to_page(self.current_page + 1)
        } else {
            Transition::Unchanged
        }
    }

    fn page_up(&mut self) -> Transition {
        if self.paginated && self.current_page > 0 {
            self.go_to_page(self.current_page - 1)
        } else {
            Transition::Unchanged
        }
    }

    fn page_down(&mut self) -> Transition {
        if self.paginated && self.current_page + 1 < self.total_pages {
            self.go_to_page(self.current_page + 1)
        } else {
            Transition::Unchanged
        }
    }

    /// Switch page and select its first item.
    fn go_to_page(&mut self, page: usize) -> Transition {
        self.current_page = page;
        self.selected_index = self.page_range().start;
        Transition::Moved
    }
}
