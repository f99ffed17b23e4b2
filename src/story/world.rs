//! Finite world-state spaces.
//!
//! A world state is one configuration of the story's conditions (is the button
//! pressed? does the player carry the key?). The whole space must be small
//! enough to enumerate: every scene is generated once per state.

use std::fmt::Debug;
use std::ops::Range;

use crate::error::AuthoringError;

/// A finite, enumerable set of world configurations.
///
/// `encode` must be a bijection from the states yielded by `all` onto
/// `0..count()`. [`validate`] checks this and story construction runs it.
pub trait WorldState: Clone + Debug + 'static {
    /// Number of distinct states.
    fn count() -> usize;

    /// Dense code of this state in `0..count()`.
    fn encode(&self) -> usize;

    /// Every state exactly once. Each call starts a fresh enumeration in the
    /// same order.
    fn all() -> impl Iterator<Item = Self>;
}

/// The single-state space, for stories whose pages never vary.
impl WorldState for () {
    fn count() -> usize {
        1
    }

    fn encode(&self) -> usize {
        0
    }

    fn all() -> impl Iterator<Item = Self> {
        std::iter::once(())
    }
}

impl WorldState for bool {
    fn count() -> usize {
        2
    }

    fn encode(&self) -> usize {
        usize::from(*self)
    }

    fn all() -> impl Iterator<Item = Self> {
        [false, true].into_iter()
    }
}

/// Mixed-radix numbering for states made of several independent fields.
///
/// Field `0` is the least significant digit, so for radices `[2, 3]` the code
/// of digits `[d0, d1]` is `d0 + 2 * d1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MixedRadix<const N: usize> {
    radices: [usize; N],
}

impl<const N: usize> MixedRadix<N> {
    pub const fn new(radices: [usize; N]) -> Self {
        Self { radices }
    }

    /// Product of all radices.
    pub fn count(&self) -> usize {
        self.radices.iter().product()
    }

    pub fn encode(&self, digits: [usize; N]) -> usize {
        let mut code = 0;
        let mut weight = 1;
        for (digit, radix) in digits.iter().zip(self.radices) {
            debug_assert!(*digit < radix, "digit {digit} out of range for radix {radix}");
            code += digit * weight;
            weight *= radix;
        }
        code
    }

    pub fn decode(&self, mut code: usize) -> [usize; N] {
        let mut digits = [0; N];
        for (digit, radix) in digits.iter_mut().zip(self.radices) {
            *digit = code % radix;
            code /= radix;
        }
        digits
    }

    /// All codes in enumeration order.
    pub fn codes(&self) -> Range<usize> {
        0..self.count()
    }
}

/// Check that `W` encodes its enumeration as a bijection onto `0..W::count()`.
pub fn validate<W: WorldState>() -> Result<(), AuthoringError> {
    let count = W::count();
    let fail = |reason: String| AuthoringError::NonBijectiveWorldState {
        world: std::any::type_name::<W>(),
        count,
        reason,
    };

    let mut seen = vec![false; count];
    let mut yielded = 0usize;
    for state in W::all() {
        yielded += 1;
        if yielded > count {
            return Err(fail(format!("enumeration yields more than {count} states")));
        }
        let code = state.encode();
        match seen.get_mut(code) {
            None => return Err(fail(format!("{state:?} encodes to {code}"))),
            Some(true) => return Err(fail(format!("code {code} is shared by several states"))),
            Some(slot) => *slot = true,
        }
    }

    if yielded != count {
        return Err(fail(format!("enumeration yields only {yielded} states")));
    }
    Ok(())
}
