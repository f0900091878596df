//! Weighted consistent hashing for distributed cache clients.
//!
//! Servers are placed on a circular 32-bit hash space as a number of points
//! proportional to their weight. A key is routed to the server owning the
//! first point at or after the key's hash, so adding or removing a server only
//! remaps the keys that land next to its points.
//!
//! Point placement and key hashing follow the ketama scheme (MD5, 40 digest
//! rounds per server, four points per digest), so routing agrees with other
//! ketama-compatible memcached clients.
//!
//! ```
//! use continuum::{ServerSet, build_ring};
//!
//! let mut servers = ServerSet::new();
//! servers
//!     .add_host("10.0.1.1", 11211, 600)
//!     .add_host("10.0.1.2", 11211, 300);
//!
//! let ring = build_ring(&servers).unwrap();
//! let server = ring.route("user:42");
//! assert!(server == "10.0.1.1:11211" || server == "10.0.1.2:11211");
//! ```

mod builder;
mod config;
mod error;
mod hash;
mod interval;
mod migration;
mod ring;
mod server;
mod shared;

pub use {
    builder::{ROUNDS_PER_SERVER, RingBuilder, build_ring, hash_rounds},
    error::{RingError, RingResult},
    hash::{DIGEST_LEN, Digest, Md5, digest_points, key_position},
    interval::{Interval, KeyRange},
    migration::{MigrationPlan, Move},
    ring::{Ring, RingPoint},
    server::{Server, ServerSet},
    shared::SharedRing,
};
