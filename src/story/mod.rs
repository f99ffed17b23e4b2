//! Story authoring and compilation.
//!
//! A story is a world-state type plus two ordered lists of page generators:
//!
//! - [`Scene`]: produces one page per world state.
//! - [`SingleScene`]: produces exactly one page, whatever the world state.
//!
//! [`StoryBuilder::build`] validates the world-state space and allocates page
//! ids ([`ids`]); [`Story::assemble`] generates every page and checks that the
//! result is self-consistent ([`assemble`]).

pub mod assemble;
pub mod ids;
pub mod world;

use crate::error::AuthoringError;
use crate::models::{PageId, Section};

pub use assemble::AssembledForm;
pub use ids::{IdRange, PageIds, SceneKey, SceneKind};
pub use world::{MixedRadix, WorldState};

/// A page generator with one instance per world state.
///
/// The returned section's page break must carry `ids.scene::<Self>(ws)`.
/// Links to other pages should only use ids obtained from `ids`.
pub trait Scene<W: WorldState>: 'static {
    fn generate_section(&self, ws: &W, ids: &PageIds<W>) -> Result<Section, AuthoringError>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A page generator with exactly one instance.
///
/// The returned section's page break must carry `ids.single::<Self>()`.
pub trait SingleScene<W: WorldState>: 'static {
    fn generate_section(&self, ids: &PageIds<W>) -> Result<Section, AuthoringError>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

enum StartPage<W> {
    Scene(SceneKey, W),
    Single(SceneKey),
}

/// Collects scenes in registration order.
///
/// Registration order is observable: it decides id allocation and the order of
/// pages in the published form.
pub struct StoryBuilder<W: WorldState> {
    title: String,
    singles: Vec<(SceneKey, Box<dyn SingleScene<W>>)>,
    scenes: Vec<(SceneKey, Box<dyn Scene<W>>)>,
    start: Option<StartPage<W>>,
}

impl<W: WorldState> StoryBuilder<W> {
    pub fn scene<S: Scene<W>>(mut self, scene: S) -> Self {
        self.scenes.push((SceneKey::of::<S>(), Box::new(scene)));
        self
    }

    pub fn single<S: SingleScene<W>>(mut self, scene: S) -> Self {
        self.singles.push((SceneKey::of::<S>(), Box::new(scene)));
        self
    }

    /// Open the story on scene `S` in world state `ws`.
    pub fn start_at<S: Scene<W>>(mut self, ws: W) -> Self {
        self.start = Some(StartPage::Scene(SceneKey::of::<S>(), ws));
        self
    }

    /// Open the story on single scene `S`.
    pub fn start_at_single<S: SingleScene<W>>(mut self) -> Self {
        self.start = Some(StartPage::Single(SceneKey::of::<S>()));
        self
    }

    pub fn build(self) -> Result<Story<W>, AuthoringError> {
        world::validate::<W>()?;

        let single_keys: Vec<_> = self.singles.iter().map(|(key, _)| *key).collect();
        let scene_keys: Vec<_> = self.scenes.iter().map(|(key, _)| *key).collect();
        let ids = PageIds::allocate(&single_keys, &scene_keys)?;

        let start = match self.start.ok_or(AuthoringError::NoStartPage)? {
            StartPage::Scene(key, ws) => ids.scene_by_key(key, &ws)?,
            StartPage::Single(key) => ids.single_by_key(key)?,
        };

        tracing::debug!(
            title = %self.title,
            singles = single_keys.len(),
            scenes = scene_keys.len(),
            states = W::count(),
            pages = ids.len(),
            %start,
            "allocated story page ids"
        );

        Ok(Story {
            title: self.title,
            singles: self.singles,
            scenes: self.scenes,
            ids,
            start,
        })
    }
}

/// A validated story with frozen page ids, ready to assemble.
pub struct Story<W: WorldState> {
    title: String,
    singles: Vec<(SceneKey, Box<dyn SingleScene<W>>)>,
    scenes: Vec<(SceneKey, Box<dyn Scene<W>>)>,
    ids: PageIds<W>,
    start: PageId,
}

impl<W: WorldState> Story<W> {
    pub fn builder(title: impl Into<String>) -> StoryBuilder<W> {
        StoryBuilder {
            title: title.into(),
            singles: Vec::new(),
            scenes: Vec::new(),
            start: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn ids(&self) -> &PageIds<W> {
        &self.ids
    }

    pub fn start(&self) -> PageId {
        self.start
    }
}
