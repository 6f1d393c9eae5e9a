//! Per-entity signature tracking and the reverse index queries run against.

use std::collections::HashMap;

use super::bitset::Signature;
use super::registry::ComponentTypeId;
use super::{Entity, MAX_ENTITIES};

/// `SignatureTracker` maintains, per entity, the bit-vector recording which
/// component types are currently attached, together with a reverse index
/// from signature value to the set of entities sharing it.
///
/// Every mutation routes through [`SignatureTracker::set`], the single choke
/// point that keeps both sides consistent: the index's content always equals
/// the set of living entities partitioned by signature, and no bucket is
/// ever left empty.
pub struct SignatureTracker {
    signatures: Vec<Signature>,
    buckets: HashMap<Signature, Vec<Entity>>,
}

impl SignatureTracker {
    /// Constructs a new `SignatureTracker` with every signature all-zero and
    /// an empty reverse index.
    pub fn new() -> Self {
        SignatureTracker {
            signatures: vec![Signature::new(); MAX_ENTITIES as usize],
            buckets: HashMap::new(),
        }
    }

    /// Returns the current signature of `ent`.
    #[inline]
    pub fn get(&self, ent: Entity) -> Signature {
        self.signatures[ent.index() as usize]
    }

    /// Starts tracking `ent` with an all-zero signature. Called when the
    /// entity is created.
    pub fn activate(&mut self, ent: Entity) {
        self.signatures[ent.index() as usize] = Signature::new();
        self.buckets.entry(Signature::new()).or_default().push(ent);
    }

    /// Stops tracking `ent` and resets its signature. Called when the entity
    /// is destroyed.
    pub fn deactivate(&mut self, ent: Entity) {
        let old = self.signatures[ent.index() as usize];
        self.remove_from_bucket(old, ent);
        self.signatures[ent.index() as usize] = Signature::new();
    }

    /// Stores `new` as the signature of `ent` and migrates its membership in
    /// the reverse index: the entity leaves the bucket of its old signature
    /// (deleting the bucket if it becomes empty) and joins the bucket of the
    /// new one (creating it if absent).
    pub fn set(&mut self, ent: Entity, new: Signature) {
        let old = self.signatures[ent.index() as usize];
        if old == new {
            return;
        }

        self.remove_from_bucket(old, ent);
        self.signatures[ent.index() as usize] = new;
        self.buckets.entry(new).or_default().push(ent);
    }

    /// Sets bit `id` in the signature of `ent`.
    #[inline]
    pub fn insert_bit(&mut self, ent: Entity, id: ComponentTypeId) {
        let mut sig = self.get(ent);
        sig.insert(id.index());
        self.set(ent, sig);
    }

    /// Clears bit `id` in the signature of `ent`.
    #[inline]
    pub fn remove_bit(&mut self, ent: Entity, id: ComponentTypeId) {
        let mut sig = self.get(ent);
        sig.remove(id.index());
        self.set(ent, sig);
    }

    /// Returns every tracked entity whose signature is a superset of
    /// `required`.
    ///
    /// The scan walks the distinct signatures currently in use, not every
    /// entity, so the cost is proportional to the number of buckets.
    /// Ordering across buckets is unspecified; within a bucket, entities
    /// come out in the order they joined it.
    pub fn query(&self, required: Signature) -> Vec<Entity> {
        let mut matches = Vec::new();
        for (sig, bucket) in &self.buckets {
            if sig.contains_all(required) {
                matches.extend_from_slice(bucket);
            }
        }
        matches
    }

    /// Returns the number of distinct signatures currently in use.
    #[inline]
    pub fn buckets(&self) -> usize {
        self.buckets.len()
    }

    fn remove_from_bucket(&mut self, sig: Signature, ent: Entity) {
        if let Some(bucket) = self.buckets.get_mut(&sig) {
            bucket.retain(|&v| v != ent);
            if bucket.is_empty() {
                self.buckets.remove(&sig);
            }
        }
    }
}

impl Default for SignatureTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sig(bits: &[usize]) -> Signature {
        let mut s = Signature::new();
        for &b in bits {
            s.insert(b);
        }
        s
    }

    fn sorted(mut v: Vec<Entity>) -> Vec<Entity> {
        v.sort();
        v
    }

    #[test]
    fn migrates_between_buckets() {
        let mut tracker = SignatureTracker::new();
        let e1 = Entity::new(0);

        tracker.activate(e1);
        assert_eq!(tracker.buckets(), 1);

        tracker.set(e1, sig(&[0]));
        assert_eq!(tracker.get(e1), sig(&[0]));
        // The all-zero bucket emptied and must be gone.
        assert_eq!(tracker.buckets(), 1);

        tracker.set(e1, sig(&[0, 2]));
        assert_eq!(tracker.buckets(), 1);
        assert_eq!(tracker.query(sig(&[0, 2])), vec![e1]);

        tracker.deactivate(e1);
        assert_eq!(tracker.buckets(), 0);
        assert!(tracker.query(Signature::new()).is_empty());
    }

    #[test]
    fn query_superset() {
        let mut tracker = SignatureTracker::new();
        let e1 = Entity::new(0);
        let e2 = Entity::new(1);
        let e3 = Entity::new(2);

        for &e in &[e1, e2, e3] {
            tracker.activate(e);
        }

        tracker.set(e1, sig(&[0, 1]));
        tracker.set(e2, sig(&[0, 2]));
        tracker.set(e3, sig(&[0, 1, 2]));
        assert_eq!(tracker.buckets(), 3);

        assert_eq!(sorted(tracker.query(sig(&[0, 1]))), vec![e1, e3]);
        assert_eq!(sorted(tracker.query(sig(&[0]))), vec![e1, e2, e3]);
        assert_eq!(tracker.query(sig(&[1, 2])), vec![e3]);
        assert!(tracker.query(sig(&[3])).is_empty());
    }

    #[test]
    fn zero_signature_entities_stay_indexed() {
        let mut tracker = SignatureTracker::new();
        let e1 = Entity::new(0);
        let e2 = Entity::new(1);

        tracker.activate(e1);
        tracker.activate(e2);
        tracker.set(e2, sig(&[1]));

        // An empty requirement matches every living entity.
        assert_eq!(sorted(tracker.query(Signature::new())), vec![e1, e2]);
        // A non-empty one never matches the all-zero bucket.
        assert_eq!(tracker.query(sig(&[1])), vec![e2]);
    }

    #[test]
    fn bucket_preserves_join_order() {
        let mut tracker = SignatureTracker::new();
        let entities: Vec<_> = (0..4).map(Entity::new).collect();

        for &e in &entities {
            tracker.activate(e);
            tracker.set(e, sig(&[5]));
        }

        assert_eq!(tracker.query(sig(&[5])), entities);
    }
}
