//! Share code encoding/decoding.
//!
//! [`ShareCodec`] bundles the registries, tier map and limits a codec runs
//! against. It holds only shared references and plain values, so one codec
//! can be used from any number of threads at once.

pub mod compress;
pub mod decode;
pub mod encode;
pub mod link;
mod wire;

use crate::builtin::{REGISTRIES, TIERS};
use crate::limits::CodecLimits;
use crate::model::Registries;
use crate::safety::TierMap;

pub use compress::{compress, decompress};
pub use decode::{check_length, normalize_prefix, split_version};
pub use encode::EncodeOutput;
pub use link::{ShareLink, extract_share_code};

/// Encoder and decoder over injected registries, tiers and limits.
#[derive(Debug, Clone, Copy)]
pub struct ShareCodec<'a> {
    registries: &'a Registries,
    tiers: &'a TierMap,
    limits: CodecLimits,
}

impl<'a> ShareCodec<'a> {
    /// Creates a codec over the given configuration.
    pub fn new(registries: &'a Registries, tiers: &'a TierMap, limits: CodecLimits) -> Self {
        Self {
            registries,
            tiers,
            limits,
        }
    }

    /// The registries this codec resolves ids against.
    pub fn registries(&self) -> &'a Registries {
        self.registries
    }

    /// The tier map this codec filters optimizations with.
    pub fn tiers(&self) -> &'a TierMap {
        self.tiers
    }

    /// The limits this codec enforces.
    pub fn limits(&self) -> &CodecLimits {
        &self.limits
    }
}

impl ShareCodec<'static> {
    /// Creates a codec over the built-in tables and default limits.
    pub fn builtin() -> Self {
        Self::new(&REGISTRIES, &TIERS, CodecLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_codec_is_shareable_across_threads() {
        assert_send_sync::<ShareCodec<'static>>();
    }

    #[test]
    fn test_concurrent_use() {
        let codec = ShareCodec::builtin();
        let selection = crate::model::Selection {
            packages: vec!["Valve.Steam".to_string()],
            ..Default::default()
        };
        let expected = codec.encode(&selection).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let output = codec.encode(&selection).unwrap();
                    assert_eq!(output, expected);
                    let resolved = codec.decode(&output.fragment).unwrap();
                    assert_eq!(resolved.selection, selection);
                });
            }
        });
    }
}
