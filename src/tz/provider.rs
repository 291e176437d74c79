// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zone rule providers and the process-wide registry.
//!
//! Region-based zone ids are resolved through a set of
//! [`ZoneRulesProvider`]s.  Each provider owns a disjoint set of ids; the
//! registry remembers which provider owns which id and caches the rules it
//! hands out, so repeated lookups of the same id share one `Arc<ZoneRules>`.
//!
//! The registry always starts with the built-in provider, which knows the
//! `UTC`/`GMT` aliases, the POSIX-style `Etc/GMT±N` zones and a handful of
//! regions that observe a single fixed offset.  Full IANA data is expected to
//! come from a provider registered by the application.

use crate::error::Error;
use crate::tz::offset::ZoneOffset;
use crate::tz::rules::ZoneRules;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// A source of zone rules for a set of region ids.
pub trait ZoneRulesProvider: Send + Sync {
    /// Every id this provider can resolve.
    fn provide_zone_ids(&self) -> BTreeSet<String>;

    /// Rules for `region_id`, `None` when the id is not provided.
    fn provide_rules(&self, region_id: &str) -> Option<ZoneRules>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Built-in provider
// ═══════════════════════════════════════════════════════════════════════════

/// Ids that are plain aliases of UTC.
const UTC_ALIASES: &[&str] = &[
    "UTC",
    "GMT",
    "UT",
    "UCT",
    "GMT0",
    "Zulu",
    "Universal",
    "Greenwich",
    "Etc/UTC",
    "Etc/GMT",
    "Etc/UCT",
    "Etc/GMT0",
    "Etc/GMT+0",
    "Etc/GMT-0",
    "Etc/Zulu",
    "Etc/Universal",
    "Etc/Greenwich",
];

/// Regions without daylight saving, as `(id, offset seconds)`.
const FIXED_REGIONS: &[(&str, i64)] = &[
    ("Africa/Addis_Ababa", 3 * 3_600),
    ("Africa/Harare", 2 * 3_600),
    ("America/Phoenix", -7 * 3_600),
    ("America/Puerto_Rico", -4 * 3_600),
    ("Asia/Dhaka", 6 * 3_600),
    ("Asia/Ho_Chi_Minh", 7 * 3_600),
    ("Asia/Karachi", 5 * 3_600),
    ("Asia/Kathmandu", 5 * 3_600 + 45 * 60),
    ("Asia/Kolkata", 5 * 3_600 + 30 * 60),
    ("Asia/Shanghai", 8 * 3_600),
    ("Asia/Tokyo", 9 * 3_600),
    ("Pacific/Honolulu", -10 * 3_600),
];

/// The provider that is always registered.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinProvider;

impl BuiltinProvider {
    /// Offset of an `Etc/GMT±N` id.  The sign is inverted relative to the
    /// number, so `Etc/GMT+5` is five hours *behind* UTC.
    fn etc_gmt_offset(region_id: &str) -> Option<ZoneOffset> {
        let rest = region_id.strip_prefix("Etc/GMT")?;
        let (sign, digits) = match rest.as_bytes().first()? {
            b'+' => (-1, &rest[1..]),
            b'-' => (1, &rest[1..]),
            _ => return None,
        };
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // No leading zeros: "Etc/GMT+05" is not an id.
        if digits.len() == 2 && digits.starts_with('0') {
            return None;
        }
        let hours: i64 = digits.parse().ok()?;
        let max = if sign < 0 { 12 } else { 14 };
        if hours > max {
            return None;
        }
        ZoneOffset::of_hours(sign * hours).ok()
    }
}

impl ZoneRulesProvider for BuiltinProvider {
    fn provide_zone_ids(&self) -> BTreeSet<String> {
        let mut ids: BTreeSet<String> = UTC_ALIASES.iter().map(|id| id.to_string()).collect();
        ids.extend((1..=12).map(|h| format!("Etc/GMT+{h}")));
        ids.extend((1..=14).map(|h| format!("Etc/GMT-{h}")));
        ids.extend(FIXED_REGIONS.iter().map(|(id, _)| id.to_string()));
        ids
    }

    fn provide_rules(&self, region_id: &str) -> Option<ZoneRules> {
        if UTC_ALIASES.contains(&region_id) {
            return Some(ZoneRules::fixed(ZoneOffset::UTC));
        }
        if let Some(offset) = Self::etc_gmt_offset(region_id) {
            return Some(ZoneRules::fixed(offset));
        }
        FIXED_REGIONS
            .iter()
            .find(|(id, _)| *id == region_id)
            .and_then(|&(_, seconds)| ZoneOffset::of_total_seconds(seconds).ok())
            .map(ZoneRules::fixed)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════

struct Registry {
    /// Region id to the provider that owns it.
    owners: RwLock<HashMap<String, Arc<dyn ZoneRulesProvider>>>,
    /// Rules already handed out, keyed by region id.
    cache: RwLock<HashMap<String, Arc<ZoneRules>>>,
}

impl Registry {
    fn new() -> Self {
        let builtin: Arc<dyn ZoneRulesProvider> = Arc::new(BuiltinProvider);
        let owners = builtin
            .provide_zone_ids()
            .into_iter()
            .map(|id| (id, Arc::clone(&builtin)))
            .collect();
        Self {
            owners: RwLock::new(owners),
            cache: RwLock::new(HashMap::new()),
        }
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Adds `provider` to the process-wide registry.
///
/// Fails with an illegal-argument error, registering nothing, when any of its
/// ids is already owned by another provider.
pub fn register_provider<P>(provider: P) -> Result<(), Error>
where
    P: ZoneRulesProvider + 'static,
{
    let provider: Arc<dyn ZoneRulesProvider> = Arc::new(provider);
    let ids = provider.provide_zone_ids();
    let mut owners = REGISTRY.owners.write();
    if let Some(duplicate) = ids.iter().find(|id| owners.contains_key(id.as_str())) {
        return Err(Error::illegal(format!(
            "unable to register zone as one already registered with that id: {duplicate}"
        )));
    }
    debug!("registering zone rules provider with {} ids", ids.len());
    for id in ids {
        owners.insert(id, Arc::clone(&provider));
    }
    Ok(())
}

/// Snapshot of every registered region id.
///
/// Each call builds a new set; changing it has no effect on the registry.
pub fn available_zone_ids() -> BTreeSet<String> {
    REGISTRY.owners.read().keys().cloned().collect()
}

/// Rules for `region_id`, resolved once and then served from the cache.
pub(crate) fn rules_for(region_id: &str) -> Result<Arc<ZoneRules>, Error> {
    if let Some(rules) = REGISTRY.cache.read().get(region_id) {
        return Ok(Arc::clone(rules));
    }
    trace!("zone rules cache miss for {region_id}");
    let provider = REGISTRY.owners.read().get(region_id).cloned();
    let rules = provider
        .and_then(|p| p.provide_rules(region_id))
        .ok_or_else(|| {
            debug!("no zone rules provider knows {region_id}");
            Error::UnknownZone(region_id.to_string())
        })?;
    let mut cache = REGISTRY.cache.write();
    let rules = cache
        .entry(region_id.to_string())
        .or_insert_with(|| Arc::new(rules));
    Ok(Arc::clone(rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::instant::Instant;
    use crate::tz::rules::ZoneOffsetTransition;

    struct Fictional;

    impl ZoneRulesProvider for Fictional {
        fn provide_zone_ids(&self) -> BTreeSet<String> {
            ["Test/Provider/Summer".to_string()].into_iter().collect()
        }

        fn provide_rules(&self, region_id: &str) -> Option<ZoneRules> {
            if region_id != "Test/Provider/Summer" {
                return None;
            }
            let one = ZoneOffset::of_hours(1).ok()?;
            let two = ZoneOffset::of_hours(2).ok()?;
            let t = ZoneOffsetTransition::new(0, one, two).ok()?;
            ZoneRules::of_transitions(one, vec![t]).ok()
        }
    }

    #[test]
    fn test_etc_gmt_sign_is_inverted() {
        let p = BuiltinProvider;
        let rules = p.provide_rules("Etc/GMT+5").unwrap();
        assert_eq!(rules.fixed_offset(), Some(ZoneOffset::of_hours(-5).unwrap()));
        let rules = p.provide_rules("Etc/GMT-14").unwrap();
        assert_eq!(rules.fixed_offset(), Some(ZoneOffset::of_hours(14).unwrap()));
        assert!(p.provide_rules("Etc/GMT+13").is_none());
        assert!(p.provide_rules("Etc/GMT-15").is_none());
        assert!(p.provide_rules("Etc/GMT+05").is_none());
    }

    #[test]
    fn test_builtin_ids_resolve() {
        let p = BuiltinProvider;
        for id in p.provide_zone_ids() {
            assert!(p.provide_rules(&id).is_some(), "{id}");
        }
    }

    #[test]
    fn test_register_and_resolve() {
        register_provider(Fictional).unwrap();
        assert!(available_zone_ids().contains("Test/Provider/Summer"));

        let rules = rules_for("Test/Provider/Summer").unwrap();
        assert!(!rules.is_fixed_offset());
        let after = Instant::of_epoch_second(10, 0).unwrap();
        assert_eq!(rules.offset_at(after), ZoneOffset::of_hours(2).unwrap());

        let again = rules_for("Test/Provider/Summer").unwrap();
        assert!(Arc::ptr_eq(&rules, &again));

        let err = register_provider(Fictional).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalArgument);
    }

    #[test]
    fn test_unknown_region() {
        let err = rules_for("Mars/Olympus_Mons").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownZone);
    }

    #[test]
    fn test_available_ids_are_snapshots() {
        let mut ids = available_zone_ids();
        assert!(ids.contains("Asia/Tokyo"));
        ids.clear();
        ids.insert("Nowhere/Land".to_string());
        let fresh = available_zone_ids();
        assert!(fresh.contains("Asia/Tokyo"));
        assert!(!fresh.contains("Nowhere/Land"));
    }
}
