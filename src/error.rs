use thiserror::Error;

use crate::models::PageId;

/// A story that cannot be compiled into a consistent set of pages.
///
/// These are authoring mistakes. They are detected before anything is sent to
/// the publishing service and are never recovered from.
#[derive(Debug, Error)]
pub enum AuthoringError {
    #[error("world state type {world} is not a bijection onto 0..{count}: {reason}")]
    NonBijectiveWorldState {
        world: &'static str,
        count: usize,
        reason: String,
    },

    #[error("scene {0} is registered more than once")]
    DuplicateScene(&'static str),

    #[error("scene {0} is not registered with this story")]
    UnregisteredScene(&'static str),

    #[error("scene {scene} was given a world state encoded as {code}, outside 0..{count}")]
    StateOutOfRange {
        scene: &'static str,
        code: usize,
        count: u32,
    },

    #[error("page id space of {0} pages does not fit in a u32")]
    IdSpaceOverflow(u128),

    #[error("page {page} already has a page break")]
    NestedPageBreak { page: PageId },

    #[error("scene {scene} generated page {actual}, expected {expected}")]
    MismatchedPageId {
        scene: &'static str,
        expected: PageId,
        actual: PageId,
    },

    #[error("page {0} was generated more than once")]
    DuplicatePageId(PageId),

    #[error("page {0} is reserved but was never generated")]
    MissingPage(PageId),

    #[error("page {page} links to page {target}, which does not exist")]
    DanglingTarget { page: PageId, target: PageId },

    #[error("start page {0} does not exist")]
    UnknownStartPage(PageId),

    #[error("no start page was chosen")]
    NoStartPage,
}
