use serde::Serialize;

use super::{Item, Section};

/// A complete questionnaire: a title plus every page in assembly order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Form {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Every item of every section, flattened in page order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.sections.iter().flat_map(|s| s.items().iter())
    }

    /// Body of the service's "create form" call.
    pub fn info(&self) -> FormInfo {
        FormInfo::titled(&self.title)
    }
}

/// `{"info": {"title": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormInfo {
    pub info: FormTitle,
}

impl FormInfo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            info: FormTitle {
                title: title.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormTitle {
    pub title: String,
}
