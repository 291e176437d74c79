// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zone identity: a fixed offset or a region bound to its rules.
//!
//! [`ZoneId::of`] dispatches on the shape of the id:
//!
//! | Input | Result |
//! |-------|--------|
//! | `Z`, `+01:00`, `-5`, … | the [`ZoneOffset`] itself |
//! | `UTC`, `GMT`, `UT` | prefix region with UTC rules |
//! | `UTC+01:00`, `GMT-5`, … | prefix region with fixed rules, id normalized |
//! | `GMT0`, `UTC_x`, … | region id checked against the providers |
//! | `Etc/GMT+5` | region with fixed `-05:00` rules |
//! | `Asia/Tokyo`, … | region id checked against the providers |

use crate::error::Error;
use crate::instant::Instant;
use crate::temporal::{queries, TemporalAccessor};
use crate::tz::offset::ZoneOffset;
use crate::tz::provider;
use crate::tz::rules::ZoneRules;
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Common three-letter abbreviations mapped to zone ids.
///
/// Not used by [`ZoneId::of`]; pass it to [`ZoneId::of_with_aliases`].
pub static SHORT_IDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("ACT", "Australia/Darwin"),
        ("AET", "Australia/Sydney"),
        ("AGT", "America/Argentina/Buenos_Aires"),
        ("ART", "Africa/Cairo"),
        ("AST", "America/Anchorage"),
        ("BET", "America/Sao_Paulo"),
        ("BST", "Asia/Dhaka"),
        ("CAT", "Africa/Harare"),
        ("CNT", "America/St_Johns"),
        ("CST", "America/Chicago"),
        ("CTT", "Asia/Shanghai"),
        ("EAT", "Africa/Addis_Ababa"),
        ("ECT", "Europe/Paris"),
        ("IET", "America/Indiana/Indianapolis"),
        ("IST", "Asia/Kolkata"),
        ("JST", "Asia/Tokyo"),
        ("MIT", "Pacific/Apia"),
        ("NET", "Asia/Yerevan"),
        ("NST", "Pacific/Auckland"),
        ("PLT", "Asia/Karachi"),
        ("PNT", "America/Phoenix"),
        ("PRT", "America/Puerto_Rico"),
        ("PST", "America/Los_Angeles"),
        ("SST", "Pacific/Guadalcanal"),
        ("VST", "Asia/Ho_Chi_Minh"),
        ("EST", "-05:00"),
        ("MST", "-07:00"),
        ("HST", "-10:00"),
    ]
    .into_iter()
    .collect()
});

/// A time-zone id.
#[derive(Clone)]
pub struct ZoneId {
    kind: ZoneIdKind,
}

#[derive(Clone)]
enum ZoneIdKind {
    Offset(ZoneOffset),
    Region { id: Arc<str>, rules: Arc<ZoneRules> },
}

impl ZoneId {
    /// The UTC offset as a zone id.
    pub const UTC: ZoneId = ZoneId {
        kind: ZoneIdKind::Offset(ZoneOffset::UTC),
    };

    /// Parses and resolves a zone id.
    ///
    /// ```
    /// use calendoch::{ZoneId, ZoneOffset};
    ///
    /// let zone = ZoneId::of("Etc/GMT+5").unwrap();
    /// assert_eq!(zone.id(), "Etc/GMT+5");
    /// assert_eq!(zone.normalized(), ZoneId::from(ZoneOffset::of_hours(-5).unwrap()));
    ///
    /// assert_eq!(ZoneId::of("UTC+0100").unwrap().id(), "UTC+01:00");
    /// assert_eq!(ZoneId::of("GMT+00:00").unwrap().id(), "GMT");
    /// ```
    pub fn of(id: &str) -> Result<Self, Error> {
        let bytes = id.as_bytes();
        if bytes.len() <= 1 || bytes[0] == b'+' || bytes[0] == b'-' {
            return ZoneOffset::of(id).map(Self::from);
        }
        if id.starts_with("UTC") || id.starts_with("GMT") {
            return Self::of_with_prefix(id, 3);
        }
        if id.starts_with("UT") {
            return Self::of_with_prefix(id, 2);
        }
        Self::region(id)
    }

    /// Like [`ZoneId::of`], first replacing `id` through `aliases`.
    ///
    /// ```
    /// use calendoch::{ZoneId, SHORT_IDS};
    ///
    /// let est = ZoneId::of_with_aliases("EST", &SHORT_IDS).unwrap();
    /// assert_eq!(est.id(), "-05:00");
    /// ```
    pub fn of_with_aliases(id: &str, aliases: &HashMap<&str, &str>) -> Result<Self, Error> {
        let resolved = aliases.get(id).copied().unwrap_or(id);
        Self::of(resolved)
    }

    /// A zone with the same rules as `offset`, named with `prefix`.
    ///
    /// `prefix` must be empty (the offset itself is returned) or one of
    /// `GMT`, `UTC`, `UT`.
    pub fn of_offset(prefix: &str, offset: ZoneOffset) -> Result<Self, Error> {
        if prefix.is_empty() {
            return Ok(Self::from(offset));
        }
        if !matches!(prefix, "GMT" | "UTC" | "UT") {
            return Err(Error::illegal(format!(
                "prefix should be GMT, UTC or UT, is: {prefix}"
            )));
        }
        let id = if offset.total_seconds() == 0 {
            prefix.to_string()
        } else {
            format!("{prefix}{offset}")
        };
        Ok(Self {
            kind: ZoneIdKind::Region {
                id: id.into(),
                rules: Arc::new(offset.rules()),
            },
        })
    }

    fn of_with_prefix(id: &str, prefix_len: usize) -> Result<Self, Error> {
        let (prefix, suffix) = id.split_at(prefix_len);
        match suffix.as_bytes().first() {
            None => Self::of_offset(prefix, ZoneOffset::UTC),
            Some(b'+' | b'-') => {
                let offset = ZoneOffset::of(suffix).map_err(|err| match err {
                    Error::Format {
                        position, message, ..
                    } => Error::format(id, prefix_len + position, message),
                    other => other,
                })?;
                Self::of_offset(prefix, offset)
            }
            Some(_) => Self::region(id),
        }
    }

    fn region(id: &str) -> Result<Self, Error> {
        check_region_id(id)?;
        let rules = provider::rules_for(id)?;
        Ok(Self {
            kind: ZoneIdKind::Region {
                id: id.into(),
                rules,
            },
        })
    }

    /// The zone named by the `TZ` environment variable, UTC when unset.
    ///
    /// An optional leading `:` is ignored.  Values that do not resolve fall
    /// back to UTC.
    pub fn system_default() -> Self {
        let Ok(tz) = std::env::var("TZ") else {
            return Self::UTC;
        };
        let name = tz.strip_prefix(':').unwrap_or(&tz);
        if name.is_empty() {
            return Self::UTC;
        }
        match Self::of(name) {
            Ok(zone) => zone,
            Err(_err) => {
                warn!("ignoring TZ={tz:?}, falling back to UTC: {_err}");
                Self::UTC
            }
        }
    }

    /// Zone carried by `temporal`, falling back to its offset.
    pub fn from_temporal(temporal: &dyn TemporalAccessor) -> Result<Self, Error> {
        queries::zone()
            .query_from(temporal)?
            .ok_or_else(|| Error::illegal("unable to obtain ZoneId from temporal value"))
    }

    /// Snapshot of the region ids known to the registered providers.
    pub fn available_zone_ids() -> BTreeSet<String> {
        provider::available_zone_ids()
    }

    // ── accessors ─────────────────────────────────────────────────────

    pub fn id(&self) -> Cow<'_, str> {
        match &self.kind {
            ZoneIdKind::Offset(offset) => offset.id(),
            ZoneIdKind::Region { id, .. } => Cow::Borrowed(&**id),
        }
    }

    /// The offset, if this id is a plain offset.
    pub fn as_offset(&self) -> Option<ZoneOffset> {
        match self.kind {
            ZoneIdKind::Offset(offset) => Some(offset),
            ZoneIdKind::Region { .. } => None,
        }
    }

    /// Rules of this zone; borrowed for regions, built inline for offsets.
    pub fn rules(&self) -> Cow<'_, ZoneRules> {
        match &self.kind {
            ZoneIdKind::Offset(offset) => Cow::Owned(offset.rules()),
            ZoneIdKind::Region { rules, .. } => Cow::Borrowed(&**rules),
        }
    }

    /// Offset in effect at `instant`.
    pub fn offset_at(&self, instant: Instant) -> ZoneOffset {
        match &self.kind {
            ZoneIdKind::Offset(offset) => *offset,
            ZoneIdKind::Region { rules, .. } => rules.offset_at(instant),
        }
    }

    /// The offset itself when the rules never change, otherwise `self`.
    pub fn normalized(&self) -> ZoneId {
        match &self.kind {
            ZoneIdKind::Offset(_) => self.clone(),
            ZoneIdKind::Region { rules, .. } => match rules.fixed_offset() {
                Some(offset) => Self::from(offset),
                None => self.clone(),
            },
        }
    }
}

/// Region id grammar: at least two characters, an ASCII letter first, then
/// letters, digits and `~ . _ + - : /`, with no empty `/` segment.
fn check_region_id(id: &str) -> Result<(), Error> {
    let bytes = id.as_bytes();
    if bytes.len() < 2 {
        return Err(Error::format(id, 0, "invalid ID for region-based ZoneId"));
    }
    for (i, &b) in bytes.iter().enumerate() {
        let ok = match b {
            b'a'..=b'z' | b'A'..=b'Z' => true,
            b'0'..=b'9' | b'~' | b'.' | b'_' | b'+' | b'-' | b':' => i != 0,
            b'/' => i != 0 && bytes[i - 1] != b'/' && i + 1 != bytes.len(),
            _ => false,
        };
        if !ok {
            return Err(Error::format(id, i, "invalid ID for region-based ZoneId"));
        }
    }
    Ok(())
}

impl From<ZoneOffset> for ZoneId {
    fn from(offset: ZoneOffset) -> Self {
        Self {
            kind: ZoneIdKind::Offset(offset),
        }
    }
}

impl Default for ZoneId {
    fn default() -> Self {
        Self::UTC
    }
}

impl PartialEq for ZoneId {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (ZoneIdKind::Offset(a), ZoneIdKind::Offset(b)) => a == b,
            (ZoneIdKind::Region { id: a, .. }, ZoneIdKind::Region { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for ZoneId {}

impl Hash for ZoneId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ZoneIdKind::Offset(offset) => write!(f, "ZoneId::Offset({offset})"),
            ZoneIdKind::Region { id, .. } => write!(f, "ZoneId::Region({id})"),
        }
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for ZoneId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::of(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ZoneId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.id())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ZoneId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text = <Cow<'de, str>>::deserialize(deserializer)?;
        ZoneId::of(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn offset(h: i64) -> ZoneOffset {
        ZoneOffset::of_hours(h).unwrap()
    }

    #[test]
    fn test_offset_ids() {
        assert_eq!(ZoneId::of("Z").unwrap(), ZoneId::UTC);
        assert_eq!(ZoneId::of("+01:00").unwrap().as_offset(), Some(offset(1)));
        assert_eq!(ZoneId::of("-0530").unwrap().id(), "-05:30");
        assert_eq!(ZoneId::of("").unwrap_err().kind(), ErrorKind::Format);
        assert_eq!(ZoneId::of("+").unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn test_prefixed_ids() {
        let utc = ZoneId::of("UTC").unwrap();
        assert_eq!(utc.id(), "UTC");
        assert!(utc.as_offset().is_none());
        assert_eq!(utc.normalized(), ZoneId::UTC);

        let ut = ZoneId::of("UT-05:30").unwrap();
        assert_eq!(ut.id(), "UT-05:30");
        assert_eq!(ut.offset_at(Instant::EPOCH).total_seconds(), -19_800);

        assert_eq!(ZoneId::of("GMT+0").unwrap().id(), "GMT");
        assert_eq!(ZoneId::of("UTC+1").unwrap().id(), "UTC+01:00");
        assert_ne!(ZoneId::of("UTC").unwrap(), ZoneId::of("GMT").unwrap());
    }

    #[test]
    fn test_prefixed_ids_with_bad_offset() {
        let err = ZoneId::of("UTC+01-00").unwrap_err();
        assert!(matches!(err, Error::Format { position: 6, .. }), "{err:?}");
        assert_eq!(ZoneId::of("GMT+19").unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn test_prefix_followed_by_region_text() {
        let zone = ZoneId::of("GMT0").unwrap();
        assert_eq!(zone.id(), "GMT0");
        assert_eq!(zone.normalized(), ZoneId::UTC);
        assert_eq!(ZoneId::of("UTCx").unwrap_err().kind(), ErrorKind::UnknownZone);
    }

    #[test]
    fn test_etc_gmt() {
        let plus = ZoneId::of("Etc/GMT+5").unwrap();
        assert_eq!(plus.normalized(), ZoneId::from(offset(-5)));
        assert!(plus.rules().is_fixed_offset());
        assert!(matches!(plus.rules(), Cow::Borrowed(_)));
        assert!(std::ptr::eq(&*plus.rules(), &*plus.clone().rules()));
        let utc = ZoneId::UTC.rules();
        assert_eq!(utc.fixed_offset(), Some(ZoneOffset::UTC));
        let minus = ZoneId::of("Etc/GMT-14").unwrap();
        assert_eq!(minus.offset_at(Instant::EPOCH), offset(14));
        assert_eq!(
            ZoneId::of("Etc/GMT+13").unwrap_err().kind(),
            ErrorKind::UnknownZone
        );
    }

    #[test]
    fn test_region_grammar() {
        for bad in ["A", "1Asia", "Asia//Tokyo", "Asia/", "Asia/Tok yo", "Asia/Tök", "_x"] {
            let kind = ZoneId::of(bad).unwrap_err().kind();
            assert_eq!(kind, ErrorKind::Format, "{bad}");
        }
        for unknown in ["Europe/Atlantis", "Ab", "Foo~bar.baz_1+2-3:4"] {
            let kind = ZoneId::of(unknown).unwrap_err().kind();
            assert_eq!(kind, ErrorKind::UnknownZone, "{unknown}");
        }
    }

    #[test]
    fn test_region_resolves() {
        let tokyo = ZoneId::of("Asia/Tokyo").unwrap();
        assert_eq!(tokyo.to_string(), "Asia/Tokyo");
        assert_eq!(tokyo.offset_at(Instant::EPOCH), offset(9));
        let kathmandu: ZoneId = "Asia/Kathmandu".parse().unwrap();
        assert_eq!(
            kathmandu.normalized().as_offset().map(|o| o.id().into_owned()),
            Some("+05:45".to_string())
        );
    }

    #[test]
    fn test_of_offset_prefixes() {
        let zone = ZoneId::of_offset("UTC", offset(2)).unwrap();
        assert_eq!(zone.id(), "UTC+02:00");
        assert_eq!(ZoneId::of_offset("", offset(2)).unwrap(), ZoneId::from(offset(2)));
        assert_eq!(
            ZoneId::of_offset("BST", offset(1)).unwrap_err().kind(),
            ErrorKind::IllegalArgument
        );
    }

    #[test]
    fn test_aliases() {
        let ist = ZoneId::of_with_aliases("IST", &SHORT_IDS).unwrap();
        assert_eq!(ist.id(), "Asia/Kolkata");
        let plain = ZoneId::of_with_aliases("Asia/Tokyo", &SHORT_IDS).unwrap();
        assert_eq!(plain.id(), "Asia/Tokyo");
        let missing = ZoneId::of_with_aliases("PST", &SHORT_IDS).unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::UnknownZone);
    }

    #[test]
    fn test_from_temporal_uses_offset() {
        let zone = ZoneId::from_temporal(&offset(3)).unwrap();
        assert_eq!(zone, ZoneId::from(offset(3)));
    }

    #[test]
    fn test_equality_by_id() {
        use std::collections::HashSet;
        let a = ZoneId::of("Asia/Tokyo").unwrap();
        let b = ZoneId::of("Asia/Tokyo").unwrap();
        let set: HashSet<ZoneId> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
