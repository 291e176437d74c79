// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Offsets, zone ids and the rules that connect them to the time line.

pub mod offset;
pub mod provider;
pub mod rules;
pub mod zone_id;

pub use offset::ZoneOffset;
pub use provider::{available_zone_ids, register_provider, BuiltinProvider, ZoneRulesProvider};
pub use rules::{ZoneOffsetTransition, ZoneRules};
pub use zone_id::{ZoneId, SHORT_IDS};
