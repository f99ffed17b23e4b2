//! Form assembly.
//!
//! Pages are generated world state by world state (in `W::all()` order), and
//! within one state scene by scene (in registration order). Single scenes
//! follow, in registration order. This order is what readers see as page order
//! in the published form.
//!
//! The assembled form is validated before it is handed to a publisher, so an
//! inconsistent story never reaches the remote service.

use std::collections::HashSet;

use crate::error::AuthoringError;
use crate::models::{Form, PageId, Section};

use super::world::WorldState;
use super::Story;

/// A self-consistent form plus the page it opens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledForm {
    pub form: Form,
    pub start: PageId,
}

impl<W: WorldState> Story<W> {
    /// Generate every page and validate the result.
    pub fn assemble(&self) -> Result<AssembledForm, AuthoringError> {
        let mut form = Form::new(self.title.clone());

        for ws in W::all() {
            for (key, scene) in &self.scenes {
                let expected = self.ids.scene_by_key(*key, &ws)?;
                let section = scene.generate_section(&ws, &self.ids)?;
                check_page_id(scene.name(), expected, &section)?;
                form.add_section(section);
            }
        }
        for (key, scene) in &self.singles {
            let expected = self.ids.single_by_key(*key)?;
            let section = scene.generate_section(&self.ids)?;
            check_page_id(scene.name(), expected, &section)?;
            form.add_section(section);
        }

        validate(&form, self.ids.len(), self.start)?;

        tracing::info!(
            title = %form.title,
            sections = form.sections.len(),
            items = form.items().count(),
            start = %self.start,
            "assembled form"
        );

        Ok(AssembledForm {
            form,
            start: self.start,
        })
    }
}

fn check_page_id(
    scene: &'static str,
    expected: PageId,
    section: &Section,
) -> Result<(), AuthoringError> {
    if section.id() != expected {
        return Err(AuthoringError::MismatchedPageId {
            scene,
            expected,
            actual: section.id(),
        });
    }
    Ok(())
}

/// Check that `form` has exactly one page for every id in `0..pages`, that every
/// link resolves, and that `start` exists.
pub fn validate(form: &Form, pages: u32, start: PageId) -> Result<(), AuthoringError> {
    let mut generated = HashSet::with_capacity(form.sections.len());
    for section in &form.sections {
        if !generated.insert(section.id()) {
            return Err(AuthoringError::DuplicatePageId(section.id()));
        }
    }

    if let Some(missing) = (0..pages).map(PageId).find(|id| !generated.contains(id)) {
        return Err(AuthoringError::MissingPage(missing));
    }

    for section in &form.sections {
        if let Some(target) = section
            .navigation_targets()
            .find(|target| !generated.contains(target))
        {
            return Err(AuthoringError::DanglingTarget {
                page: section.id(),
                target,
            });
        }
    }

    if !generated.contains(&start) {
        return Err(AuthoringError::UnknownStartPage(start));
    }
    Ok(())
}
