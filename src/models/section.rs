use crate::error::AuthoringError;

use super::{ChoiceTarget, Item, PageBreak, PageId};

/// One rendered page: a page break followed by the page's content items.
///
/// The page break is created with the section and is always its first item.
/// Further page breaks are rejected, so a section can never describe two pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    id: PageId,
    items: Vec<Item>,
}

impl Section {
    pub fn new(id: PageId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            items: vec![Item::PageBreak(PageBreak {
                id,
                title: title.into(),
                description: description.into(),
            })],
        }
    }

    /// The id carried by this section's page break.
    pub fn id(&self) -> PageId {
        self.id
    }

    /// Append a content item.
    pub fn add_item(&mut self, item: impl Into<Item>) -> Result<(), AuthoringError> {
        let item = item.into();
        if item.is_page_break() {
            return Err(AuthoringError::NestedPageBreak { page: self.id });
        }
        self.items.push(item);
        Ok(())
    }

    /// Builder-style [`Section::add_item`].
    pub fn with_item(mut self, item: impl Into<Item>) -> Result<Self, AuthoringError> {
        self.add_item(item)?;
        Ok(self)
    }

    /// All items, page break first.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The interactive items that follow the page break.
    pub fn content(&self) -> &[Item] {
        &self.items[1..]
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    /// Every page this section links to.
    pub fn navigation_targets(&self) -> impl Iterator<Item = PageId> + '_ {
        self.items
            .iter()
            .flat_map(Item::targets)
            .filter_map(|target| match target {
                ChoiceTarget::NavigateTo(id) => Some(id),
                ChoiceTarget::Submit => None,
            })
    }
}
