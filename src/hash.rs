use {auto_impl::auto_impl, std::array};

/// Size of a digest, in bytes.
pub const DIGEST_LEN: usize = 16;

/// Source of 128-bit digests used to place points and keys on the circle.
///
/// Every client sharing a cache cluster must use the same digest to agree on
/// routing. [`Md5`] is what libketama and libmemcached use.
#[auto_impl(&, Box, Arc)]
pub trait Digest {
    /// Digests an arbitrary byte string.
    fn digest(&self, bytes: &[u8]) -> [u8; DIGEST_LEN];
}

/// MD5 digest, the default for ketama-compatible rings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Md5;

impl Digest for Md5 {
    fn digest(&self, bytes: &[u8]) -> [u8; DIGEST_LEN] {
        md5::compute(bytes).0
    }
}

/// Splits a digest into four positions on the circle.
///
/// Each successive 4-byte group is read as a little-endian word.
pub fn digest_points(digest: &[u8; DIGEST_LEN]) -> [u32; 4] {
    array::from_fn(|i| {
        let off = i * 4;
        u32::from_le_bytes([
            digest[off],
            digest[off + 1],
            digest[off + 2],
            digest[off + 3],
        ])
    })
}

/// Position of a key on the circle: the first word of its digest.
pub fn key_position<D: Digest>(digest: &D, key: &[u8]) -> u32 {
    digest_points(&digest.digest(key))[0]
}
