use {
    super::{Digest, Md5, Ring, RingError, RingResult, ServerSet, build_ring},
    parking_lot::RwLock,
    std::sync::Arc,
    tracing::debug,
};

struct Slot<D> {
    ring: Option<Arc<Ring<D>>>,
    version: u64,
}

/// Swappable handle to the current ring.
///
/// Rings are never modified in place: a rebuilt ring replaces the current
/// one atomically, while lookups still holding the previous ring (obtained
/// via [`load()`](Self::load)) keep using it undisturbed.
pub struct SharedRing<D = Md5> {
    slot: RwLock<Slot<D>>,
}

impl<D> Default for SharedRing<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> SharedRing<D> {
    /// Creates a handle with no ring yet.
    ///
    /// Lookups fail with [`RingError::EmptyRing`] until a ring is stored.
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(Slot {
                ring: None,
                version: 0,
            }),
        }
    }

    /// Creates a handle holding the given ring.
    pub fn from_ring(ring: Ring<D>) -> Self {
        let shared = Self::new();
        shared.store(ring);
        shared
    }

    /// Returns the current ring.
    pub fn load(&self) -> RingResult<Arc<Ring<D>>> {
        self.slot.read().ring.clone().ok_or(RingError::EmptyRing)
    }

    /// Replaces the current ring, returning the previous one (if any).
    pub fn store(&self, ring: Ring<D>) -> Option<Arc<Ring<D>>> {
        let ring = Arc::new(ring);
        let mut slot = self.slot.write();
        slot.version += 1;
        debug!(
            version = slot.version,
            points = ring.point_count(),
            "ring swapped"
        );
        slot.ring.replace(ring)
    }

    /// Number of rings stored so far.
    pub fn version(&self) -> u64 {
        self.slot.read().version
    }
}

impl<D: Digest> SharedRing<D> {
    /// Returns identifier of the server responsible for the given key.
    pub fn route(&self, key: impl AsRef<[u8]>) -> RingResult<Arc<str>> {
        let ring = self.load()?;
        Ok(ring.point(key).shared_owner().clone())
    }
}

impl SharedRing<Md5> {
    /// Builds a ring from the given servers and swaps it in.
    ///
    /// On failure the current ring stays in place.
    pub fn rebuild(&self, servers: &ServerSet) -> RingResult<()> {
        let ring = build_ring(servers)?;
        self.store(ring);
        Ok(())
    }
}
