use core::num::NonZero;

/// Index of a slot in an [`Arena`](super::arena::Arena).
///
/// Stored as `NonZero<u32>` so the niche optimization makes `Option<Handle>`
/// the same size as `u32`; linked structures keep an `Option<Handle>` in every
/// child/parent slot and would otherwise double in size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<u32>);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn new(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        // Shifted by one so that slot 0 stays clear of the zero niche.
        match NonZero::new((index + 1) as u32) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
