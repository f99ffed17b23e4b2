//! The ordered list of remote calls that materializes one form.
//!
//! The service needs a page to exist before items can be placed in it, so
//! publishing runs in passes:
//!
//! 1. create an empty form with the title,
//! 2. create every page break, indexed among page breaks only,
//! 3. create every other item, indexed among non-page-break items only,
//! 4. insert an entry question at index 0 whose single choice jumps to the
//!    start page.

use std::fmt;

use serde::Serialize;

use crate::models::record::ItemRecord;
use crate::models::{FormInfo, Item, PageId, SingleChoice};
use crate::story::AssembledForm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Request {
    CreateItem(CreateItem),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateItem {
    pub item: ItemRecord,
    pub location: Location,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub index: usize,
}

impl Request {
    pub fn create_item(item: &Item, index: usize) -> Self {
        Self::CreateItem(CreateItem {
            item: item.to_record(),
            location: Location { index },
        })
    }
}

/// Body of one `batchUpdate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchUpdate {
    pub requests: Vec<Request>,
}

/// Publishing pass, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Create,
    PageBreaks,
    Content,
    Entry,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::PageBreaks => "page_breaks",
            Self::Content => "content",
            Self::Entry => "entry",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The question placed in front of the first page.
pub fn entry_item(start: PageId) -> Item {
    SingleChoice::new("Start", "").navigate("Go", start).into()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPlan {
    pub create: FormInfo,
    pub page_breaks: BatchUpdate,
    pub content: BatchUpdate,
    pub entry: BatchUpdate,
}

impl PublishPlan {
    pub fn new(assembled: &AssembledForm) -> Self {
        let (page_breaks, content): (Vec<&Item>, Vec<&Item>) =
            assembled.form.items().partition(|item| item.is_page_break());

        Self {
            create: assembled.form.info(),
            page_breaks: indexed(page_breaks),
            content: indexed(content),
            entry: BatchUpdate {
                requests: vec![Request::create_item(&entry_item(assembled.start), 0)],
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.create.info.title
    }

    /// Item batches in execution order.
    pub fn batches(&self) -> [(Stage, &BatchUpdate); 3] {
        [
            (Stage::PageBreaks, &self.page_breaks),
            (Stage::Content, &self.content),
            (Stage::Entry, &self.entry),
        ]
    }
}

fn indexed(items: Vec<&Item>) -> BatchUpdate {
    BatchUpdate {
        requests: items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Request::create_item(item, index))
            .collect(),
    }
}
