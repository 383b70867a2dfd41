//! Share code decoding.
//!
//! Decoding runs as a fixed sequence of stages. Stages 1-6 are structural
//! and the first failure ends the decode with a [`DecodeError`]:
//!
//! 1. strip legacy markers
//! 2. length guard (before anything is decompressed)
//! 3. split `{version}.{payload}`
//! 4. decompress
//! 5. parse the record
//! 6. dispatch on version
//!
//! Stage 7 resolves every field against the registries. Problems there are
//! recorded as [`DecodeWarning`]s on the result and never fail the decode.

use serde_json::Value;
use tracing::debug;

use crate::codec::ShareCodec;
use crate::codec::compress::decompress;
use crate::codec::wire::{RawRecord, parse_record};
use crate::error::DecodeError;
use crate::limits::{CARRIER_PARAM, LEGACY_MARKER, VERSION_SEPARATOR, WIRE_VERSION};
use crate::model::{
    DecodeWarning, Field, IdRegistry, OptimizationKey, RegistryValue, ResolvedSelection, Selection,
};

/// Longest rendering of a bad raw entry kept in a warning.
const PREVIEW_LEN: usize = 32;

/// Strips leading legacy markers and the `b=` carrier prefix.
///
/// `#b=1.abc`, `#1.abc`, `b=1.abc` and `1.abc` all normalize to `1.abc`.
pub fn normalize_prefix(input: &str) -> &str {
    let trimmed = input.trim().trim_start_matches(LEGACY_MARKER);
    trimmed
        .strip_prefix(CARRIER_PARAM)
        .and_then(|rest| rest.strip_prefix('='))
        .unwrap_or(trimmed)
}

/// Rejects a share code longer than `max_chars` characters.
pub fn check_length(code: &str, max_chars: usize) -> Result<(), DecodeError> {
    // Byte length bounds character count from above.
    if code.len() <= max_chars {
        return Ok(());
    }
    let len = code.chars().count();
    if len > max_chars {
        return Err(DecodeError::PayloadTooLarge { len, max: max_chars });
    }
    Ok(())
}

/// Splits `{version}.{payload}` and parses the version.
pub fn split_version(code: &str) -> Result<(u32, &str), DecodeError> {
    let (raw, payload) = code
        .split_once(VERSION_SEPARATOR)
        .ok_or(DecodeError::MissingVersionSeparator)?;
    let invalid = || DecodeError::InvalidVersion { raw: raw.to_string() };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let version = raw.parse::<u32>().map_err(|_| invalid())?;
    Ok((version, payload))
}

impl ShareCodec<'_> {
    /// Decodes a share code into a resolved selection.
    ///
    /// Accepts the code with or without the legacy `#` marker and `b=`
    /// prefix. Structural problems fail the whole decode; unresolvable
    /// entries are skipped and reported on the result.
    pub fn decode(&self, input: &str) -> Result<ResolvedSelection, DecodeError> {
        self.decode_stages(input).inspect_err(|err| {
            debug!(code = err.code().code(), error = %err, "share code rejected");
        })
    }

    fn decode_stages(&self, input: &str) -> Result<ResolvedSelection, DecodeError> {
        let code = normalize_prefix(input);
        if code.is_empty() {
            return Err(DecodeError::EmptyPayload);
        }

        check_length(code, self.limits.max_payload_chars)?;

        let (version, payload) = split_version(code)?;

        let bytes = decompress(payload, self.limits.max_decompressed_bytes)?;

        let record = parse_record(&bytes)?;

        match version {
            WIRE_VERSION => self.resolve_v1(version, record),
            _ => Err(DecodeError::UnsupportedVersion { version }),
        }
    }

    fn resolve_v1(&self, version: u32, record: RawRecord) -> Result<ResolvedSelection, DecodeError> {
        if record.v != i64::from(version) {
            return Err(DecodeError::VersionMismatch {
                envelope: version,
                record: record.v,
            });
        }

        let registries = self.registries;
        let mut resolver = Resolver::new(self);

        let selection = Selection {
            cpu: resolver.scalar(&registries.cpu, record.c.as_ref()),
            gpu: resolver.scalar(&registries.gpu, record.g.as_ref()),
            dns_provider: resolver.scalar(&registries.dns_provider, record.d.as_ref()),
            peripherals: resolver.list(&registries.peripherals, record.p.as_ref()),
            monitor_software: resolver.list(&registries.monitor_software, record.m.as_ref()),
            optimizations: resolver.optimizations(record.o.as_ref()),
            packages: resolver.packages(record.k.as_ref()),
            persona: resolver.scalar(&registries.persona, record.r.as_ref()),
        };

        Ok(ResolvedSelection {
            selection,
            skipped: resolver.skipped,
            warnings: resolver.warnings,
        })
    }
}

/// Accumulates soft issues while resolving one record.
struct Resolver<'c, 'a> {
    codec: &'c ShareCodec<'a>,
    skipped: usize,
    warnings: Vec<DecodeWarning>,
}

impl<'c, 'a> Resolver<'c, 'a> {
    fn new(codec: &'c ShareCodec<'a>) -> Self {
        Self {
            codec,
            skipped: 0,
            warnings: Vec::new(),
        }
    }

    fn skip(&mut self, count: usize, warning: DecodeWarning) {
        debug!(%warning, "share code entry skipped");
        self.skipped += count;
        self.warnings.push(warning);
    }

    /// Reads a registry id, warning on anything that is not a `u32`.
    fn read_id(&mut self, field: Field, raw: &Value) -> Option<u32> {
        match raw.as_u64() {
            Some(id) => match u32::try_from(id) {
                Ok(id) => Some(id),
                Err(_) => {
                    self.skip(1, DecodeWarning::UnknownId { field, id });
                    None
                }
            },
            None => {
                self.skip(1, DecodeWarning::InvalidEntry { field, raw: preview(raw) });
                None
            }
        }
    }

    fn resolve<V: RegistryValue>(&mut self, registry: &IdRegistry<V>, raw: &Value) -> Option<V> {
        let id = self.read_id(V::FIELD, raw)?;
        let value = registry.to_value(id);
        if value.is_none() {
            self.skip(
                1,
                DecodeWarning::UnknownId {
                    field: V::FIELD,
                    id: u64::from(id),
                },
            );
        }
        value
    }

    fn scalar<V: RegistryValue>(&mut self, registry: &IdRegistry<V>, raw: Option<&Value>) -> Option<V> {
        self.resolve(registry, raw?)
    }

    /// Returns the entries of an array field, cut to the length limit.
    fn entries<'v>(&mut self, field: Field, raw: Option<&'v Value>) -> &'v [Value] {
        let Some(raw) = raw else {
            return &[];
        };
        let Some(entries) = raw.as_array() else {
            self.skip(1, DecodeWarning::NotAnArray { field });
            return &[];
        };
        let max = self.codec.limits.max_array_len;
        if entries.len() > max {
            self.skip(
                entries.len() - max,
                DecodeWarning::Truncated {
                    field,
                    len: entries.len(),
                    max,
                },
            );
            return &entries[..max];
        }
        entries
    }

    fn list<V: RegistryValue>(&mut self, registry: &IdRegistry<V>, raw: Option<&Value>) -> Vec<V> {
        self.entries(V::FIELD, raw)
            .iter()
            .filter_map(|entry| self.resolve(registry, entry))
            .collect()
    }

    /// Resolves optimizations and drops any the tier map will not share.
    fn optimizations(&mut self, raw: Option<&Value>) -> Vec<OptimizationKey> {
        let ShareCodec { registries, tiers, .. } = *self.codec;
        let keys = self.list(&registries.optimizations, raw);
        let (kept, blocked) = tiers.retain_shareable(keys);
        for key in blocked {
            self.skip(
                1,
                DecodeWarning::Blocked {
                    key,
                    tier: tiers.tier(key),
                },
            );
        }
        kept
    }

    fn packages(&mut self, raw: Option<&Value>) -> Vec<String> {
        self.entries(Field::Packages, raw)
            .iter()
            .filter_map(|entry| match entry.as_str() {
                Some(key) => Some(key.to_string()),
                None => {
                    self.skip(
                        1,
                        DecodeWarning::InvalidEntry {
                            field: Field::Packages,
                            raw: preview(entry),
                        },
                    );
                    None
                }
            })
            .collect()
    }
}

/// Renders a raw entry for a warning, cut to [`PREVIEW_LEN`] characters.
fn preview(raw: &Value) -> String {
    let text = raw.to_string();
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}
