//! Candidate text encodings and strict decoding.
//!
//! Every candidate decodes without replacement: a byte sequence that is not
//! valid in the candidate encoding fails the attempt instead of producing
//! U+FFFD characters.

use std::fmt;

use encoding_rs::{EUC_KR, UTF_8};
use serde::Serialize;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A text encoding the loader may try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum EncodingCandidate {
    /// UTF-8 with an optional byte-order mark, which is removed.
    Utf8Sig,
    /// Windows code page 949 (Unified Hangul Code).
    Cp949,
    /// EUC-KR restricted to KS X 1001 two-byte pairs.
    EucKr,
    /// UTF-8 with no byte-order mark handling.
    Utf8,
}

/// Default priority order, most likely to succeed first.
pub const DEFAULT_CANDIDATES: [EncodingCandidate; 4] = [
    EncodingCandidate::Utf8Sig,
    EncodingCandidate::Cp949,
    EncodingCandidate::EucKr,
    EncodingCandidate::Utf8,
];

impl EncodingCandidate {
    /// Label used in messages and reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Utf8Sig => "utf-8-sig",
            Self::Cp949 => "cp949",
            Self::EucKr => "euc-kr",
            Self::Utf8 => "utf-8",
        }
    }

    /// Looks up a candidate by label, ignoring ASCII case and `_`/`-`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "utf-8-sig" | "utf8-sig" => Some(Self::Utf8Sig),
            "cp949" | "windows-949" | "uhc" => Some(Self::Cp949),
            "euc-kr" | "euckr" => Some(Self::EucKr),
            "utf-8" | "utf8" => Some(Self::Utf8),
            _ => None,
        }
    }

    /// Decodes `bytes`, returning `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8Sig => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                decode_strict(UTF_8, body)
            }
            Self::Cp949 => decode_strict(EUC_KR, bytes),
            Self::EucKr => {
                if is_ks_x_1001(bytes) {
                    decode_strict(EUC_KR, bytes)
                } else {
                    None
                }
            }
            Self::Utf8 => decode_strict(UTF_8, bytes),
        }
    }
}

impl fmt::Display for EncodingCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<EncodingCandidate> for &'static str {
    fn from(candidate: EncodingCandidate) -> Self {
        candidate.label()
    }
}

fn decode_strict(encoding: &'static encoding_rs::Encoding, bytes: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
}

/// Checks that every non-ASCII byte belongs to a KS X 1001 pair
/// (lead and trail both in `0xA1..=0xFE`).
///
/// `encoding_rs` decodes the `euc-kr` label as code page 949, which also
/// accepts the UHC extension range; this check narrows it to plain EUC-KR.
fn is_ks_x_1001(bytes: &[u8]) -> bool {
    let mut iter = bytes.iter().copied();
    while let Some(byte) = iter.next() {
        if byte < 0x80 {
            continue;
        }
        if !(0xA1..=0xFE).contains(&byte) {
            return false;
        }
        match iter.next() {
            Some(trail) if (0xA1..=0xFE).contains(&trail) => {}
            _ => return false,
        }
    }
    true
}
