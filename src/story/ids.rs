//! Page id allocation.
//!
//! Single scenes take one id each, in registration order, starting at 0. Each
//! per-state scene then reserves a block of `W::count()` ids:
//!
//! ```text
//! base(single_i) = i
//! base(scene_i)  = singles + W::count() * i
//! id(scene, ws)  = base(scene) + ws.encode()
//! ```
//!
//! The blocks partition `0..singles + W::count() * scenes` without gaps. The
//! result is frozen into [`PageIds`], which every scene receives when it
//! generates its page, so no id can be computed before allocation.

use std::any::TypeId;
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::error::AuthoringError;
use crate::models::PageId;

use super::world::WorldState;
use super::{Scene, SingleScene};

/// Identity of a registered scene type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneKey {
    type_id: TypeId,
    name: &'static str,
}

impl SceneKey {
    pub fn of<S: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<S>(),
            name: std::any::type_name::<S>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    /// One page in total.
    Single,
    /// One page per world state.
    PerState,
}

/// The block of ids reserved for one scene type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub scene: &'static str,
    pub kind: SceneKind,
    pub base: PageId,
    pub span: u32,
}

impl IdRange {
    pub fn contains(&self, id: PageId) -> bool {
        id.0 >= self.base.0 && id.0 - self.base.0 < self.span
    }
}

/// Frozen allocation: scene type to base offset.
#[derive(Debug)]
pub struct PageIds<W> {
    ranges: Vec<IdRange>,
    by_type: HashMap<TypeId, usize>,
    len: u32,
    _world: PhantomData<fn() -> W>,
}

impl<W: WorldState> PageIds<W> {
    /// Reserve ids for `singles` then `scenes`, each in the given order.
    pub fn allocate(singles: &[SceneKey], scenes: &[SceneKey]) -> Result<Self, AuthoringError> {
        let states = W::count();
        let total = singles.len() as u128 + states as u128 * scenes.len() as u128;
        if total > u128::from(u32::MAX) {
            return Err(AuthoringError::IdSpaceOverflow(total));
        }
        // Bounded by the check above.
        let span = states as u32;

        let mut ids = Self {
            ranges: Vec::with_capacity(singles.len() + scenes.len()),
            by_type: HashMap::new(),
            len: total as u32,
            _world: PhantomData,
        };

        let mut next = 0u32;
        for key in singles {
            ids.reserve(*key, SceneKind::Single, next, 1)?;
            next += 1;
        }
        for key in scenes {
            ids.reserve(*key, SceneKind::PerState, next, span)?;
            next += span;
        }
        debug_assert_eq!(next, ids.len);

        Ok(ids)
    }

    fn reserve(
        &mut self,
        key: SceneKey,
        kind: SceneKind,
        base: u32,
        span: u32,
    ) -> Result<(), AuthoringError> {
        if self.by_type.contains_key(&key.type_id) {
            return Err(AuthoringError::DuplicateScene(key.name));
        }
        tracing::debug!(scene = key.name, base, span, "reserved page ids");
        self.by_type.insert(key.type_id, self.ranges.len());
        self.ranges.push(IdRange {
            scene: key.name,
            kind,
            base: PageId(base),
            span,
        });
        Ok(())
    }

    fn range_of(&self, key: SceneKey, kind: SceneKind) -> Result<&IdRange, AuthoringError> {
        self.by_type
            .get(&key.type_id)
            .map(|&index| &self.ranges[index])
            .filter(|range| range.kind == kind)
            .ok_or(AuthoringError::UnregisteredScene(key.name))
    }

    /// Page id of scene `S` in world state `ws`.
    pub fn scene<S: Scene<W>>(&self, ws: &W) -> Result<PageId, AuthoringError> {
        self.scene_by_key(SceneKey::of::<S>(), ws)
    }

    /// Page id of single scene `S`.
    pub fn single<S: SingleScene<W>>(&self) -> Result<PageId, AuthoringError> {
        self.single_by_key(SceneKey::of::<S>())
    }

    pub(crate) fn scene_by_key(&self, key: SceneKey, ws: &W) -> Result<PageId, AuthoringError> {
        let range = self.range_of(key, SceneKind::PerState)?;
        // A state built outside `W::all()` may encode past its scene's block.
        let code = ws.encode();
        let offset = u32::try_from(code)
            .ok()
            .filter(|offset| *offset < range.span)
            .ok_or(AuthoringError::StateOutOfRange {
                scene: key.name,
                code,
                count: range.span,
            })?;
        Ok(PageId(range.base.0 + offset))
    }

    pub(crate) fn single_by_key(&self, key: SceneKey) -> Result<PageId, AuthoringError> {
        Ok(self.range_of(key, SceneKind::Single)?.base)
    }

    /// Base offset of a registered scene type.
    pub fn base_of<S: 'static>(&self) -> Option<PageId> {
        self.by_type
            .get(&TypeId::of::<S>())
            .map(|&index| self.ranges[index].base)
    }

    /// Number of reserved ids. Reserved ids are exactly `0..len()`.
    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reserved blocks in allocation order.
    pub fn ranges(&self) -> &[IdRange] {
        &self.ranges
    }

    pub fn contains(&self, id: PageId) -> bool {
        id.0 < self.len
    }
}
