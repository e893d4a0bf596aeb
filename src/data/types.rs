//! Record types for the works dataset.
//!
//! `Work` mirrors one entry of `works.json`. `Creator` is derived from works
//! by the index and never read from disk.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Content category of a work.
///
/// Values outside the known set are kept verbatim in [`WorkType::Unknown`]
/// so they survive a load/export cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum WorkType {
    Text,
    Visual,
    Video,
    Other,
    Illust,
    Comic,
    Music,
    Unknown(String),
}

impl WorkType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Visual => "visual",
            Self::Video => "video",
            Self::Other => "other",
            Self::Illust => "illust",
            Self::Comic => "comic",
            Self::Music => "music",
            Self::Unknown(raw) => raw,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for WorkType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "text" => Self::Text,
            "visual" => Self::Visual,
            "video" => Self::Video,
            "other" => Self::Other,
            "illust" => Self::Illust,
            "comic" => Self::Comic,
            "music" => Self::Music,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<&str> for WorkType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<WorkType> for String {
    fn from(ty: WorkType) -> Self {
        match ty {
            WorkType::Unknown(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single creative item from `works.json`.
///
/// Every field is optional on input. Text fields accept strings, numbers and
/// booleans; anything else reads as absent. Fields this type does not know
/// about are kept in `extra` and written back on export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub bilibili_space: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub slot: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::work_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub work_type: Option<WorkType>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub cover: String,

    #[serde(default, deserialize_with = "lenient::text")]
    pub url: String,

    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub bilibili_url: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub content_file: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub source_type_raw: Option<String>,

    #[serde(default, deserialize_with = "lenient::day_offset", skip_serializing_if = "Option::is_none")]
    pub day_offset: Option<i64>,

    #[serde(default, deserialize_with = "lenient::tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Work {
    /// Trimmed `creatorId`, if it is non-empty.
    pub fn creator_key(&self) -> Option<&str> {
        trimmed(self.creator_id.as_deref())
    }

    /// Trimmed `(creatorId, creatorName)`, only when both are non-empty.
    ///
    /// Works without an identity contribute no creator.
    pub fn creator_identity(&self) -> Option<(&str, &str)> {
        Some((self.creator_key()?, trimmed(self.creator_name.as_deref())?))
    }

    /// Trimmed `bilibiliSpace`, empty when missing.
    pub fn space(&self) -> &str {
        self.bilibili_space.as_deref().map_or("", str::trim)
    }

    /// Trimmed `avatar`; blank values read as absent.
    pub fn avatar_url(&self) -> Option<&str> {
        trimmed(self.avatar.as_deref())
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Attribution entity derived from works, deduplicated by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub id: String,
    pub name: String,
    pub bilibili_space: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Creator {
    /// Build a creator from the first work that names it.
    pub(super) fn first_seen(id: &str, name: &str, work: &Work) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            bilibili_space: work.space().to_owned(),
            avatar: work.avatar_url().map(str::to_owned),
        }
    }
}

/// Works sharing one `dayOffset`, as shown on the timeline page.
///
/// `day` is `None` for the trailing group of works without an offset.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineDay<'a> {
    pub day: Option<i64>,
    pub works: Vec<&'a Work>,
}

/// A creator attribute that a later work disagrees on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CreatorField {
    Name,
    BilibiliSpace,
    Avatar,
}

impl fmt::Display for CreatorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::BilibiliSpace => "bilibiliSpace",
            Self::Avatar => "avatar",
        })
    }
}

/// Later creator metadata ignored by first-write-wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Divergence {
    pub creator_id: String,
    pub work_id: String,
    pub field: CreatorField,
    pub kept: String,
    pub ignored: String,
}

/// Data-quality findings over the loaded works.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexReport {
    /// Works that contributed no creator.
    pub orphans: Vec<String>,
    /// Work ids seen more than once, in first-appearance order.
    pub duplicate_works: Vec<String>,
    pub divergences: Vec<Divergence>,
}

impl IndexReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.duplicate_works.is_empty() && self.divergences.is_empty()
    }
}

/// Loose deserializers matching how the front-end coerces `works.json`.
mod lenient {
    use super::WorkType;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// `String(value || '')`: falsy scalars (`false`, `0`, `""`) read as absent.
    fn coerce(value: Value) -> Option<String> {
        let falsy = match &value {
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::String(s) => s.is_empty(),
            _ => false,
        };
        if falsy { None } else { scalar(value) }
    }

    /// Scalars as text; integral floats print without a trailing `.0`.
    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) if n.is_f64() => n.as_f64().map(|f| f.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Value::deserialize(d).map(coerce)
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        opt_text(d).map(Option::unwrap_or_default)
    }

    pub fn work_type<'de, D: Deserializer<'de>>(d: D) -> Result<Option<WorkType>, D::Error> {
        opt_text(d).map(|raw| raw.map(WorkType::from))
    }

    #[allow(clippy::cast_possible_truncation)] // integral check done first
    pub fn day_offset<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn tags<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Array(items) => Some(items.into_iter().filter_map(scalar).collect()),
            _ => None,
        })
    }
}
