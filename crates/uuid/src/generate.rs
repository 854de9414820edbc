//! Version 3, 4 and 5 generation.
//!
//! Every generator fills a 16-byte buffer, then injects the variant bits into byte 8 and the
//! version bits into byte 6, in that order.

use crate::value::UUID_LEN;
use crate::{Uuid, UuidResult, Variant};
use md5::Md5;
use rand::rngs::OsRng;
use rand::RngCore;
use sha1::{Digest, Sha1};

impl Uuid {
    /// Generates a random (version 4) UUID from the operating system's secure random source.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Source`](crate::UuidError::Source) if the random source fails.
    pub fn new_v4() -> UuidResult<Self> {
        Self::new_v4_from(&mut OsRng)
    }

    /// Generates a random (version 4) UUID, drawing bytes from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Source`](crate::UuidError::Source) if `rng` fails to fill the buffer.
    pub fn new_v4_from<R: RngCore + ?Sized>(rng: &mut R) -> UuidResult<Self> {
        let mut bytes = [0u8; UUID_LEN];
        rng.try_fill_bytes(&mut bytes).map_err(|e| {
            tracing::warn!(error = %e, "random source failed during UUID generation");
            e
        })?;
        Ok(Self::from_bytes(stamp(bytes, Variant::Rfc4122, 4)))
    }

    /// Generates a name-based (version 3) UUID from the MD5 hash of `namespace` and `name`.
    ///
    /// The same inputs always produce the same UUID.
    ///
    /// # Arguments
    ///
    /// * `namespace` - Namespace UUID whose bytes prefix the hashed input, e.g. [`NAMESPACE_DNS`].
    /// * `name` - Name within the namespace, hashed as raw bytes.
    ///
    /// # Returns
    ///
    /// Returns a UUID with the RFC 4122 variant and version 3.
    ///
    /// [`NAMESPACE_DNS`]: crate::NAMESPACE_DNS
    pub fn new_v3(namespace: &Uuid, name: &[u8]) -> Self {
        Self::from_bytes(stamp(hash_name::<Md5>(namespace, name), Variant::Rfc4122, 3))
    }

    /// Generates a name-based (version 5) UUID from the SHA-1 hash of `namespace` and `name`.
    ///
    /// The 20-byte digest is truncated to its first 16 bytes.
    ///
    /// # Arguments
    ///
    /// * `namespace` - Namespace UUID whose bytes prefix the hashed input.
    /// * `name` - Name within the namespace, hashed as raw bytes.
    ///
    /// # Returns
    ///
    /// Returns a UUID with the RFC 4122 variant and version 5. The same inputs always produce the
    /// same UUID.
    pub fn new_v5(namespace: &Uuid, name: &[u8]) -> Self {
        Self::from_bytes(stamp(hash_name::<Sha1>(namespace, name), Variant::Rfc4122, 5))
    }
}

/// Hashes the namespace bytes followed by the name and keeps the first 16 digest bytes.
fn hash_name<D: Digest>(namespace: &Uuid, name: &[u8]) -> [u8; UUID_LEN] {
    let mut hasher = D::new();
    hasher.update(namespace.as_bytes());
    hasher.update(name);
    let digest = hasher.finalize();

    let mut bytes = [0u8; UUID_LEN];
    bytes.copy_from_slice(&digest[..UUID_LEN]);
    bytes
}

fn stamp(mut bytes: [u8; UUID_LEN], variant: Variant, version: u8) -> [u8; UUID_LEN] {
    set_variant(&mut bytes, variant);
    set_version(&mut bytes, version);
    bytes
}

/// Sets the marker bits of byte 8 and clears the reserved bits below them.
fn set_variant(bytes: &mut [u8; UUID_LEN], variant: Variant) {
    let clear = match variant {
        Variant::Ncs => 0xbf,
        Variant::Rfc4122 => 0x7f,
        Variant::Microsoft => 0x3f,
        Variant::Future => return,
    };
    bytes[8] = (bytes[8] | variant.marker()) & clear;
}

/// Writes `version` into the top nibble of byte 6.
fn set_version(bytes: &mut [u8; UUID_LEN], version: u8) {
    bytes[6] = (bytes[6] & 0x0f) | (version << 4);
}
