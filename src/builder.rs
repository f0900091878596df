use {
    super::{
        Digest,
        Md5,
        Ring,
        RingError,
        RingPoint,
        RingResult,
        ServerSet,
        hash::digest_points,
    },
    tracing::{debug, warn},
};

/// Digest rounds granted to a server owning the whole circle, per server in
/// the set. Every round yields four points.
pub const ROUNDS_PER_SERVER: u32 = 40;

/// Number of digest rounds allocated to a server.
///
/// The share is computed in single precision and scaled in double precision
/// before flooring, the same way libketama does; other clients rely on the
/// exact point counts this produces.
///
/// Servers with a tiny share may get zero rounds and thus no points.
pub fn hash_rounds(weight: u64, total_weight: u64, server_count: usize) -> u32 {
    let share = weight as f32 / total_weight as f32;
    let rounds = share as f64 * ROUNDS_PER_SERVER as f64 * server_count as f64;
    (rounds as f32).floor() as u32
}

/// Ring builder.
///
/// Reads a snapshot of the server set; the set can be modified freely
/// once the ring is built.
pub struct RingBuilder<'a, D = Md5>(&'a ServerSet, D);

impl<'a> RingBuilder<'a> {
    /// Create new ring builder using the MD5 digest.
    pub fn new(servers: &'a ServerSet) -> Self {
        Self(servers, Md5)
    }
}

impl<'a, D: Digest> RingBuilder<'a, D> {
    /// Transform the builder into one with a different digest.
    ///
    /// Rings built with different digests do not route keys the same way.
    pub fn with_digest<T: Digest>(self, digest: T) -> RingBuilder<'a, T> {
        RingBuilder(self.0, digest)
    }

    /// Build the ring.
    ///
    /// Fails if the set has no servers, if any identifier is empty, or if
    /// the total weight is zero (or does not fit into `u64`).
    pub fn build(self) -> RingResult<Ring<D>> {
        let RingBuilder(servers, digest) = self;
        let servers = servers.as_slice();
        if servers.is_empty() {
            return Err(RingError::NoServers);
        }
        if servers.iter().any(|server| server.id().is_empty()) {
            return Err(RingError::EmptyIdentifier);
        }
        let total_weight = servers
            .iter()
            .try_fold(0u64, |acc, server| acc.checked_add(server.weight()))
            .ok_or(RingError::WeightOverflow)?;
        if total_weight == 0 {
            return Err(RingError::ZeroTotalWeight);
        }

        debug!(servers = servers.len(), total_weight, "building ring");

        let capacity = servers.len() * ROUNDS_PER_SERVER as usize * 4;
        let mut points = Vec::with_capacity(capacity);
        for (idx, server) in servers.iter().enumerate() {
            let rounds = hash_rounds(server.weight(), total_weight, servers.len());
            debug!(
                idx,
                server = server.id(),
                weight = server.weight(),
                rounds,
                "allocated hash rounds"
            );
            if rounds == 0 {
                warn!(
                    server = server.id(),
                    weight = server.weight(),
                    "server weight too small, no points on the ring"
                );
            }

            for k in 0..rounds {
                let input = format!("{}-{}", server.id(), k);
                let points_of_round = digest_points(&digest.digest(input.as_bytes()))
                    .map(|position| RingPoint::new(position, server.shared_id().clone()));
                points.extend(points_of_round);
            }
        }

        // Lookup relies on ascending order.
        points.sort_unstable_by_key(RingPoint::position);
        debug!(points = points.len(), "ring built");

        Ok(Ring::new(points, servers.to_vec(), digest))
    }
}

/// Builds a ketama-compatible (MD5) ring from the given servers.
pub fn build_ring(servers: &ServerSet) -> RingResult<Ring> {
    RingBuilder::new(servers).build()
}
