//! Share URL assembly and extraction.

use url::Url;

use crate::codec::ShareCodec;
use crate::error::{DecodeError, EncodeError};
use crate::limits::CARRIER_PARAM;
use crate::model::{ResolvedSelection, Selection};

/// A fully assembled share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// The share code carried by the link.
    pub fragment: String,
    /// `{origin}/?b={fragment}`
    pub url: String,
    /// Length of `url` in characters.
    pub length: usize,
    /// True when `length` is above the advisory limit.
    pub exceeds_recommended: bool,
    /// Optimizations dropped by the safety filter.
    pub blocked: usize,
}

/// Finds the share code in a link.
///
/// Accepts a full URL carrying the code in the `b` query parameter or in the
/// fragment (`#b=...` or `#1...`), or a bare code. A fragment that neither
/// starts with `b=` nor with a version digit is an ordinary page anchor.
/// Returns `None` if nothing that could be a code is present.
pub fn extract_share_code(link: &str) -> Option<String> {
    let link = link.trim();
    let code = match Url::parse(link) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == CARRIER_PARAM)
            .map(|(_, code)| code.into_owned())
            .or_else(|| {
                url.fragment()
                    .filter(|f| f.starts_with("b=") || f.starts_with(|c: char| c.is_ascii_digit()))
                    .map(str::to_string)
            })?,
        // Not an absolute URL: treat the whole input as a code.
        Err(_) => link.to_string(),
    };
    if code.is_empty() { None } else { Some(code) }
}

impl ShareCodec<'_> {
    /// Encodes a selection and wraps it in a link under `origin`.
    pub fn share_link(&self, selection: &Selection, origin: &str) -> Result<ShareLink, EncodeError> {
        let output = self.encode(selection)?;
        let url = format!(
            "{}/?{}={}",
            origin.trim_end_matches('/'),
            CARRIER_PARAM,
            output.fragment
        );
        let length = url.chars().count();
        Ok(ShareLink {
            exceeds_recommended: length > self.limits.recommended_url_len,
            fragment: output.fragment,
            url,
            length,
            blocked: output.blocked,
        })
    }

    /// Extracts the share code from a link and decodes it.
    pub fn decode_link(&self, link: &str) -> Result<ResolvedSelection, DecodeError> {
        let code = extract_share_code(link).ok_or(DecodeError::MissingShareCode)?;
        self.decode(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{REGISTRIES, TIERS};
    use crate::limits::CodecLimits;
    use crate::model::{Cpu, Gpu};

    fn selection() -> Selection {
        Selection {
            cpu: Some(Cpu::Amd),
            gpu: Some(Gpu::Nvidia),
            packages: vec!["Mozilla.Firefox".to_string()],
            ..Selection::default()
        }
    }

    #[test]
    fn test_share_link_shape() {
        let link = ShareCodec::builtin()
            .share_link(&selection(), "https://loadout.example/")
            .unwrap();
        assert_eq!(link.url, format!("https://loadout.example/?b={}", link.fragment));
        assert_eq!(link.length, link.url.len());
        assert!(!link.exceeds_recommended);
        assert_eq!(link.blocked, 0);
    }

    #[test]
    fn test_share_link_flags_long_urls() {
        let limits = CodecLimits {
            recommended_url_len: 40,
            ..CodecLimits::default()
        };
        let link = ShareCodec::new(&REGISTRIES, &TIERS, limits)
            .share_link(&selection(), "https://loadout.example")
            .unwrap();
        assert!(link.length > 40);
        assert!(link.exceeds_recommended);
    }

    #[test]
    fn test_extract_share_code() {
        assert_eq!(
            extract_share_code("https://loadout.example/?b=1.abc&x=2"),
            Some("1.abc".to_string())
        );
        assert_eq!(
            extract_share_code("https://loadout.example/#b=1.abc"),
            Some("b=1.abc".to_string())
        );
        assert_eq!(extract_share_code("#1.abc"), Some("#1.abc".to_string()));
        assert_eq!(extract_share_code("1.abc"), Some("1.abc".to_string()));
        assert_eq!(
            extract_share_code("https://loadout.example/#1.abc"),
            Some("1.abc".to_string())
        );
        assert_eq!(extract_share_code("https://loadout.example/"), None);
        assert_eq!(extract_share_code("https://loadout.example/#section"), None);
        assert_eq!(extract_share_code("https://loadout.example/?b="), None);
        assert_eq!(extract_share_code("   "), None);
    }

    #[test]
    fn test_decode_link_roundtrip() {
        let codec = ShareCodec::builtin();
        let link = codec.share_link(&selection(), "https://loadout.example").unwrap();

        let from_query = codec.decode_link(&link.url).unwrap();
        assert_eq!(from_query.selection, selection());

        let legacy = format!("https://loadout.example/#b={}", link.fragment);
        assert_eq!(codec.decode_link(&legacy).unwrap(), from_query);
    }

    #[test]
    fn test_decode_link_without_code() {
        assert_eq!(
            ShareCodec::builtin().decode_link("https://loadout.example/about"),
            Err(DecodeError::MissingShareCode)
        );
    }

    #[test]
    fn test_decode_link_ignores_page_anchor() {
        assert_eq!(
            ShareCodec::builtin().decode_link("https://loadout.example/#section"),
            Err(DecodeError::MissingShareCode)
        );
    }
}
