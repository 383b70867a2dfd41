//! loadout-link: compact, versioned share links for loadout selections.
//!
//! This crate turns a user's configuration selection (hardware, DNS,
//! peripherals, optimizations, packages, persona) into a short share code
//! and back, and is built to survive old, hand-edited and hostile codes.
//!
//! # Quick Start
//!
//! ```rust
//! use loadout_link::{Cpu, Gpu, OptimizationKey, Selection, ShareCodec};
//!
//! let selection = Selection {
//!     cpu: Some(Cpu::Intel),
//!     gpu: Some(Gpu::Nvidia),
//!     optimizations: vec![OptimizationKey::Pagefile, OptimizationKey::Defender],
//!     packages: vec!["Steam.Steam".to_string()],
//!     ..Selection::default()
//! };
//!
//! let codec = ShareCodec::builtin();
//! let link = codec.share_link(&selection, "https://loadout.example").unwrap();
//! assert_eq!(link.blocked, 1); // defender never travels in a link
//!
//! let resolved = codec.decode_link(&link.url).unwrap();
//! assert_eq!(resolved.selection.cpu, Some(Cpu::Intel));
//! assert_eq!(resolved.selection.optimizations, vec![OptimizationKey::Pagefile]);
//! assert_eq!(resolved.skipped, 0);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Domain values, ID registries and selections
//! - [`safety`]: Optimization risk tiers and the share filter
//! - [`codec`]: Share code encoding/decoding and link assembly
//! - [`validate`]: Package-key validation against a catalog
//! - [`builtin`]: Registry and tier tables shipped with the application
//! - [`error`]: Error types
//! - [`limits`]: Wire constants and decoder limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - Code length is checked before any decompression
//! - Decompressed size and every list length are bounded
//! - Ludicrous-tier optimizations are filtered on encode and again on decode
//! - Unknown ids are skipped and reported, never guessed
//!
//! # Wire Format
//!
//! A share code is `{version}.{payload}`, optionally preceded by the legacy
//! `#` marker. The payload is unpadded base64url over a zstd frame holding a
//! JSON record with short keys (`v`, `c`, `g`, `d`, `p`, `m`, `o`, `k`,
//! `r`). Links carry the code in the `b` query parameter.

pub mod builtin;
pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod safety;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{EncodeOutput, ShareCodec, ShareLink, extract_share_code};
pub use error::{DecodeError, EncodeError, ErrorCode, InvalidValue, RegistryError};
pub use limits::{CodecLimits, WIRE_VERSION};
pub use model::{
    Cpu, DecodeWarning, DnsProvider, Field, Gpu, IdRegistry, MonitorSoftware, OptimizationKey,
    PeripheralBrand, Persona, Registries, RegistryValue, ResolvedSelection, Selection,
};
pub use safety::{Tier, TierMap};
pub use validate::{CatalogContext, PackageValidation, validate_packages};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
