// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Offset-at-instant rules of a zone.

use crate::error::Error;
use crate::instant::Instant;
use crate::tz::offset::ZoneOffset;
use std::fmt;

/// A discontinuity in the local time line of a zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ZoneOffsetTransition {
    epoch_second: i64,
    before: ZoneOffset,
    after: ZoneOffset,
}

impl ZoneOffsetTransition {
    /// Transition at `epoch_second` from `before` to `after`.
    ///
    /// The two offsets must differ.
    pub fn new(epoch_second: i64, before: ZoneOffset, after: ZoneOffset) -> Result<Self, Error> {
        if before == after {
            return Err(Error::illegal(format!(
                "transition offsets must differ: {before}"
            )));
        }
        Ok(Self {
            epoch_second,
            before,
            after,
        })
    }

    #[inline]
    pub fn epoch_second(&self) -> i64 {
        self.epoch_second
    }

    #[inline]
    pub fn instant(&self) -> Result<Instant, Error> {
        Instant::of_epoch_second(self.epoch_second, 0)
    }

    #[inline]
    pub fn offset_before(&self) -> ZoneOffset {
        self.before
    }

    #[inline]
    pub fn offset_after(&self) -> ZoneOffset {
        self.after
    }

    /// `true` when local clocks jump forward, skipping some local times.
    pub fn is_gap(&self) -> bool {
        self.after.total_seconds() > self.before.total_seconds()
    }

    /// `true` when local clocks fall back, repeating some local times.
    pub fn is_overlap(&self) -> bool {
        self.after.total_seconds() < self.before.total_seconds()
    }
}

impl fmt::Display for ZoneOffsetTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_gap() { "Gap" } else { "Overlap" };
        write!(
            f,
            "Transition[{kind} at {} {} to {}]",
            self.epoch_second, self.before, self.after
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ZoneRules
// ═══════════════════════════════════════════════════════════════════════════

/// The offset rules of a zone: a single fixed offset or a list of
/// transitions sorted by instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneRules {
    kind: RulesKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum RulesKind {
    Fixed(ZoneOffset),
    Transitions {
        initial: ZoneOffset,
        transitions: Vec<ZoneOffsetTransition>,
    },
}

impl ZoneRules {
    pub const fn fixed(offset: ZoneOffset) -> Self {
        Self {
            kind: RulesKind::Fixed(offset),
        }
    }

    /// Rules starting at `initial` and changing at each transition.
    ///
    /// Transitions must be strictly increasing in time and chain: each
    /// `offset_before` equals the previous `offset_after`.  An empty list
    /// collapses to fixed rules.
    pub fn of_transitions(
        initial: ZoneOffset,
        transitions: Vec<ZoneOffsetTransition>,
    ) -> Result<Self, Error> {
        let mut current = initial;
        let mut last: Option<i64> = None;
        for t in &transitions {
            if t.before != current {
                return Err(Error::illegal(format!(
                    "transition at {} starts from {}, expected {current}",
                    t.epoch_second, t.before
                )));
            }
            if last.is_some_and(|prev| prev >= t.epoch_second) {
                return Err(Error::illegal("transitions must be strictly increasing"));
            }
            last = Some(t.epoch_second);
            current = t.after;
        }
        if transitions.is_empty() {
            return Ok(Self::fixed(initial));
        }
        Ok(Self {
            kind: RulesKind::Transitions {
                initial,
                transitions,
            },
        })
    }

    /// `true` when the offset never varies.
    pub fn is_fixed_offset(&self) -> bool {
        matches!(self.kind, RulesKind::Fixed(_))
    }

    /// The offset in effect at `instant`.
    pub fn offset_at(&self, instant: Instant) -> ZoneOffset {
        match &self.kind {
            RulesKind::Fixed(offset) => *offset,
            RulesKind::Transitions {
                initial,
                transitions,
            } => {
                let second = instant.epoch_second();
                // Number of transitions at or before `second`.
                let index = transitions.partition_point(|t| t.epoch_second <= second);
                match index {
                    0 => *initial,
                    n => transitions[n - 1].after,
                }
            }
        }
    }

    /// The single offset of fixed rules.
    pub fn fixed_offset(&self) -> Option<ZoneOffset> {
        match self.kind {
            RulesKind::Fixed(offset) => Some(offset),
            RulesKind::Transitions { .. } => None,
        }
    }

    pub fn transitions(&self) -> &[ZoneOffsetTransition] {
        match &self.kind {
            RulesKind::Fixed(_) => &[],
            RulesKind::Transitions { transitions, .. } => transitions,
        }
    }

    /// The first transition strictly after `instant`.
    pub fn next_transition(&self, instant: Instant) -> Option<&ZoneOffsetTransition> {
        let second = instant.epoch_second();
        let transitions = self.transitions();
        let index = transitions.partition_point(|t| t.epoch_second <= second);
        transitions.get(index)
    }
}

impl From<ZoneOffset> for ZoneRules {
    fn from(offset: ZoneOffset) -> Self {
        Self::fixed(offset)
    }
}
