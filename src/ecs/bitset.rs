//! Fixed size bit-set used as the component signature of an entity.

use super::MAX_COMPONENTS;

/// A fixed size bit-set of [`MAX_COMPONENTS`] bits. Bit `i` set means the
/// entity owns an instance of the component type with id `i`.
///
/// `Signature` is `Copy` and hashable so it can be used as the key of the
/// signature reverse index.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    bits: u32,
}

impl Signature {
    /// Creates a new `Signature` with *ZERO* bit.
    #[inline]
    pub fn new() -> Self {
        Signature { bits: 0 }
    }

    /// Sets the bit at `index`.
    #[inline]
    pub fn insert(&mut self, index: usize) {
        self.bits |= 1 << Self::checked(index);
    }

    /// Clears the bit at `index`.
    #[inline]
    pub fn remove(&mut self, index: usize) {
        self.bits &= !(1 << Self::checked(index));
    }

    /// Returns `true` if the bit at `index` is set.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        (self.bits & (1 << Self::checked(index))) > 0
    }

    /// Returns `true` if every bit set in `rhs` is also set in `self`.
    #[inline]
    pub fn contains_all(&self, rhs: Signature) -> bool {
        (self.bits & rhs.bits) == rhs.bits
    }

    /// Clears all bits in this set.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns whether there are no bits set in this set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns the number of set bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns an iterator over the set bits, in ascending order.
    #[inline]
    pub fn iter(&self) -> SignatureIter {
        SignatureIter {
            signature: *self,
            cursor: 0,
        }
    }

    #[inline]
    fn checked(index: usize) -> usize {
        assert!(
            index < MAX_COMPONENTS,
            "Too many components. (MAX_COMPONENTS: {:?})",
            MAX_COMPONENTS
        );
        index
    }
}

/// Immutable `Signature` iterator, created by the `iter` method.
pub struct SignatureIter {
    signature: Signature,
    cursor: usize,
}

impl Iterator for SignatureIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < MAX_COMPONENTS {
            self.cursor += 1;

            if self.signature.contains(self.cursor - 1) {
                return Some(self.cursor - 1);
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic() {
        let mut bits = Signature::new();
        assert!(bits.is_empty());
        assert!(!bits.contains(5));

        bits.insert(5);
        assert!(bits.contains(5));

        bits.insert(9);
        assert!(bits.contains(9));
        assert!(!bits.contains(12));

        bits.insert(12);
        assert!(bits.contains(12));
        assert_eq!(bits.len(), 3);

        bits.remove(5);
        assert!(!bits.contains(5));
        assert!(bits.contains(9));
        assert!(bits.contains(12));

        bits.clear();
        assert!(bits == Signature::new());
    }

    #[test]
    fn superset() {
        let mut required = Signature::new();
        required.insert(0);
        required.insert(2);

        let mut sig = Signature::new();
        sig.insert(0);
        assert!(!sig.contains_all(required));

        sig.insert(2);
        assert!(sig.contains_all(required));

        sig.insert(7);
        assert!(sig.contains_all(required));
        assert!(!required.contains_all(sig));

        assert!(sig.contains_all(Signature::new()));
    }

    #[test]
    fn iterate() {
        let mut bits = Signature::new();
        bits.insert(1);
        bits.insert(3);
        bits.insert(31);

        let v: Vec<usize> = bits.iter().collect();
        assert_eq!(v, vec![1, 3, 31]);
    }

    #[test]
    #[should_panic]
    fn out_of_range() {
        let mut bits = Signature::new();
        bits.insert(MAX_COMPONENTS);
    }
}
