//! Backend wire shapes.
//!
//! These types mirror the canister's interface description field for field,
//! in the JSON form the gateway exchanges:
//!
//! - `nat` / `int` travel as decimal strings ([`WireNat`], [`WireInt`])
//! - payload-free variants travel as single-key objects, `{"Music": null}`
//! - `opt T` travels as a zero-or-one-element array ([`WireOpt`])
//! - `blob` travels as standard base64
//! - results travel as `{"Ok": ..}` / `{"Err": {"VideoNotFound": null}}`
//!
//! Nothing outside the binding layer and [`crate::convert`] should need them.

use std::fmt;

use bytes::Bytes;
use candid::{Int, Nat, Principal};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::VidChainError;
use crate::types::Category;

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// Arbitrary-precision natural in its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireNat(pub Nat);

impl From<Nat> for WireNat {
    fn from(n: Nat) -> Self {
        Self(n)
    }
}

impl From<u64> for WireNat {
    fn from(n: u64) -> Self {
        Self(Nat::from(n))
    }
}

impl Serialize for WireNat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        nat_text::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for WireNat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        nat_text::deserialize(deserializer).map(Self)
    }
}

/// Arbitrary-precision signed integer in its wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireInt(pub Int);

impl From<Int> for WireInt {
    fn from(n: Int) -> Self {
        Self(n)
    }
}

impl From<i64> for WireInt {
    fn from(n: i64) -> Self {
        Self(Int::from(n))
    }
}

impl Serialize for WireInt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        int_text::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for WireInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        int_text::deserialize(deserializer).map(Self)
    }
}

/// `Nat` as a plain decimal string. Plain JSON numbers are accepted on read.
pub mod nat_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Nat, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Nat, D::Error> {
        deserializer.deserialize_any(NatVisitor)
    }

    struct NatVisitor;

    impl<'de> Visitor<'de> for NatVisitor {
        type Value = Nat;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative decimal integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Nat, E> {
            Ok(Nat::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Nat, E> {
            u64::try_from(v)
                .map(Nat::from)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Nat, E> {
            if v.is_empty() || !v.bytes().all(|b| b.is_ascii_digit()) {
                return Err(E::invalid_value(de::Unexpected::Str(v), &self));
            }
            v.parse::<Nat>().map_err(E::custom)
        }
    }
}

/// `Int` as a plain decimal string. Plain JSON numbers are accepted on read.
pub mod int_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Int, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Int, D::Error> {
        deserializer.deserialize_any(IntVisitor)
    }

    struct IntVisitor;

    impl<'de> Visitor<'de> for IntVisitor {
        type Value = Int;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal integer")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Int, E> {
            Ok(Int::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Int, E> {
            Ok(Int::from(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Int, E> {
            let digits = v.strip_prefix('-').unwrap_or(v);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(E::invalid_value(de::Unexpected::Str(v), &self));
            }
            v.parse::<Int>().map_err(E::custom)
        }
    }

    /// Serialize-only helper for `Option<Int>` fields on caller-facing types.
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<Int>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => serializer.collect_str(&v.0),
                None => serializer.serialize_none(),
            }
        }
    }
}

/// `Principal` in its textual form (`aaaaa-aa`).
pub mod principal_text {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Principal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_text())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Principal, D::Error> {
        let text = String::deserialize(deserializer)?;
        Principal::from_text(&text).map_err(de::Error::custom)
    }
}

/// `blob` as standard base64. A JSON array of bytes is accepted on read.
pub mod blob {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    use super::*;

    pub fn serialize<S: Serializer>(value: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        deserializer.deserialize_any(BlobVisitor)
    }

    struct BlobVisitor;

    impl<'de> Visitor<'de> for BlobVisitor {
        type Value = Bytes;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a base64 string or an array of bytes")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Bytes, E> {
            STANDARD.decode(v).map(Bytes::from).map_err(E::custom)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Bytes, A::Error> {
            let mut buf = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(byte) = seq.next_element::<u8>()? {
                buf.push(byte);
            }
            Ok(Bytes::from(buf))
        }
    }
}

// ---------------------------------------------------------------------------
// opt T
// ---------------------------------------------------------------------------

/// Optional value in the backend's zero-or-one-element array encoding.
///
/// Reading an array with more than one element is an error. Convert to
/// `Option<T>` with [`into_option`](Self::into_option) as soon as the value
/// leaves the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WireOpt<T>(Option<T>);

impl<T> WireOpt<T> {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn some(value: T) -> Self {
        Self(Some(value))
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_option(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_option(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for WireOpt<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> From<Option<T>> for WireOpt<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<WireOpt<T>> for Option<T> {
    fn from(value: WireOpt<T>) -> Self {
        value.0
    }
}

impl<T: Serialize> Serialize for WireOpt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for WireOpt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut items = Vec::<T>::deserialize(deserializer)?;
        match items.len() {
            0 => Ok(Self(None)),
            1 => Ok(Self(items.pop())),
            n => Err(de::Error::invalid_length(n, &"zero or one element")),
        }
    }
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

fn serialize_tag<S: Serializer>(tag: &str, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(tag, &())?;
    map.end()
}

/// Reads `{"Tag": null}` or a bare `"Tag"` and yields the tag.
fn deserialize_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(TagVisitor)
}

struct TagVisitor;

impl<'de> Visitor<'de> for TagVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a variant tag")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<String, A::Error> {
        let tag: String = map
            .next_key()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let _: de::IgnoredAny = map.next_value()?;
        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(tag)
    }
}

/// [`Category`] in its variant encoding. Unknown tags read as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WireCategory(pub Category);

impl From<Category> for WireCategory {
    fn from(c: Category) -> Self {
        Self(c)
    }
}

impl Serialize for WireCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_tag(self.0.label(), serializer)
    }
}

impl<'de> Deserialize<'de> for WireCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_tag(deserializer).map(|tag| Self(Category::from_label(&tag)))
    }
}

/// [`VidChainError`] in its variant encoding. Unknown tags are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireError(pub VidChainError);

impl Serialize for WireError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_tag(self.0.tag(), serializer)
    }
}

impl<'de> Deserialize<'de> for WireError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = deserialize_tag(deserializer)?;
        VidChainError::from_tag(&tag)
            .map(Self)
            .ok_or_else(|| de::Error::unknown_variant(&tag, &ERROR_TAGS))
    }
}

const ERROR_TAGS: [&str; 8] = [
    "Unauthorized",
    "VideoNotFound",
    "InsufficientTokens",
    "InvalidContent",
    "DuplicateAction",
    "ReportLimitExceeded",
    "InvalidCategory",
    "InvalidDuration",
];

/// The backend's `Result<T, Error>` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WireResult<T> {
    Ok(T),
    Err(WireError),
}

impl<T> WireResult<T> {
    pub fn into_result(self) -> Result<T, VidChainError> {
        match self {
            Self::Ok(v) => Ok(v),
            Self::Err(WireError(e)) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMedia {
    #[serde(with = "blob")]
    pub content: Bytes,
    #[serde(with = "blob")]
    pub thumbnail: Bytes,
    pub is_short: bool,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideo {
    pub id: WireNat,
    pub title: String,
    pub description: String,
    pub category: WireCategory,
    pub channel: String,
    #[serde(with = "principal_text")]
    pub uploader: Principal,
    pub timestamp: WireInt,
    pub duration: WireNat,
    pub media: RawMedia,
    pub views: WireNat,
    pub likes: WireNat,
    pub dislikes: WireNat,
    pub token_rewards: WireNat,
    pub is_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileWire {
    pub name: String,
    #[serde(default)]
    pub email: WireOpt<String>,
    #[serde(default)]
    pub gender: WireOpt<String>,
    #[serde(default)]
    pub birthday: WireOpt<WireInt>,
    pub channel_name: String,
    pub total_views: WireNat,
    pub token_balance: WireNat,
}

/// Argument of `updateProfile`. Every optional field is always present on
/// the wire, as `[]` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdateWire {
    pub name: String,
    pub email: WireOpt<String>,
    pub gender: WireOpt<String>,
    pub birthday: WireOpt<WireInt>,
}

/// Argument of `uploadVideo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadVideoWire {
    pub title: String,
    pub description: String,
    pub category: WireCategory,
    pub channel: String,
    #[serde(with = "blob")]
    pub media: Bytes,
    #[serde(with = "blob")]
    pub thumbnail: Bytes,
    pub duration: WireNat,
    pub is_short: bool,
    pub content_type: String,
    /// UTF-8 bytes of the lowercase hex content digest.
    #[serde(with = "blob")]
    pub content_hash: Bytes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAnalyticsWire {
    pub total_views: WireNat,
    pub avg_watch_time: f64,
    pub popular_content: Vec<RawVideo>,
}
