use {
    super::{
        Digest,
        Md5,
        Server,
        hash::key_position,
        interval::{Interval, KeyRange},
    },
    std::sync::Arc,
};

/// Point on the hash circle, owned by a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingPoint {
    position: u32,
    owner: Arc<str>,
}

impl RingPoint {
    pub(crate) fn new(position: u32, owner: Arc<str>) -> Self {
        Self { position, owner }
    }

    /// Position of the point on the circle.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Identifier of the server that placed the point.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub(crate) fn shared_owner(&self) -> &Arc<str> {
        &self.owner
    }
}

/// Consistent hash ring.
///
/// Sorted sequence of points on a circular 32-bit space. A key is routed to
/// the owner of the first point at or after the key's position, wrapping
/// around to the lowest point when the key lands past the last one.
///
/// A ring is immutable: when the server set changes, build a new one (see
/// [`SharedRing`](crate::SharedRing) for swapping rings under readers).
/// Rings are never empty, since construction fails unless at least one
/// server has a non-zero weight.
#[derive(Debug, Clone)]
pub struct Ring<D = Md5> {
    /// Points, ascending by position.
    points: Vec<RingPoint>,

    /// Servers the ring was built from, in insertion order.
    servers: Vec<Server>,

    digest: D,
}

impl<D> Ring<D> {
    pub(crate) fn new(points: Vec<RingPoint>, servers: Vec<Server>, digest: D) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert!(points.windows(2).all(|w| w[0].position <= w[1].position));
        Self {
            points,
            servers,
            digest,
        }
    }

    /// Points of the ring, ascending by position.
    pub fn points(&self) -> &[RingPoint] {
        &self.points
    }

    /// Total number of points on the ring.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of points placed by the given server.
    pub fn points_of(&self, id: &str) -> usize {
        self.points.iter().filter(|point| point.owner() == id).count()
    }

    /// Servers the ring was built from.
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Digest used to place keys.
    pub fn digest(&self) -> &D {
        &self.digest
    }

    /// Returns the point responsible for the given position.
    ///
    /// That is the point with the smallest position greater than or equal to
    /// `position`, or the first point of the ring if there is none.
    pub fn owner_at(&self, position: u32) -> &RingPoint {
        let idx = self.points.partition_point(|point| point.position < position);
        self.points.get(idx).unwrap_or(&self.points[0])
    }

    /// Returns arcs of the circle controlled by the given server.
    ///
    /// Each point owns positions after its predecessor, up to and including
    /// its own position; the first point also owns everything past the last
    /// point. Points sharing a position with their predecessor own nothing
    /// and are skipped.
    ///
    /// Empty if the server placed no points.
    pub fn intervals(&self, id: &str) -> Vec<Interval<'_>> {
        let last = self.points.len() - 1;
        self.points
            .iter()
            .enumerate()
            .filter(|(_, point)| point.owner() == id)
            .filter_map(|(idx, point)| {
                let key_range = if idx == 0 {
                    KeyRange::Wrapping(self.points[last].position, point.position)
                } else {
                    let start = self.points[idx - 1].position;
                    if start == point.position {
                        return None;
                    }
                    KeyRange::Bounded(start, point.position)
                };
                Some(Interval::new(key_range, point.owner()))
            })
            .collect()
    }
}

impl<D: Digest> Ring<D> {
    /// Returns position on the circle to which a given key will be assigned.
    pub fn position(&self, key: impl AsRef<[u8]>) -> u32 {
        key_position(&self.digest, key.as_ref())
    }

    /// Returns the point responsible for the given key.
    pub fn point(&self, key: impl AsRef<[u8]>) -> &RingPoint {
        self.owner_at(self.position(key))
    }

    /// Returns identifier of the server responsible for the given key.
    pub fn route(&self, key: impl AsRef<[u8]>) -> &str {
        self.point(key).owner()
    }
}
