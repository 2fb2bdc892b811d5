//! # Compliance State — Single Source of Truth
//!
//! Defines [`ComplianceState`], the closed set of states a dated record can
//! be in, and [`Tier`], the display bucket used for remaining-period
//! coloring. Both carry the same severity order so that badges, remaining
//! periods and sort weights never disagree.
//!
//! Severity order: `Expired > SoonToExpire > Active`. The derived `Ord`
//! follows declaration order, so `max()` over a set of states yields the
//! most severe one.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DocketError;

/// Compliance state of a dated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComplianceState {
    /// Expiry is further out than the soon-to-expire window, or unknown.
    Active,
    /// Expiry falls within the soon-to-expire window (today inclusive).
    SoonToExpire,
    /// Expiry is in the past.
    Expired,
}

impl ComplianceState {
    /// All states in ascending severity.
    pub fn all() -> &'static [ComplianceState] {
        &[Self::Active, Self::SoonToExpire, Self::Expired]
    }

    /// Sort weight; larger is more severe.
    pub fn weight(&self) -> u8 {
        match self {
            Self::Active => 0,
            Self::SoonToExpire => 1,
            Self::Expired => 2,
        }
    }

    /// Wire identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::SoonToExpire => "soonToExpire",
            Self::Expired => "expired",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::SoonToExpire => "Soon to expire",
            Self::Expired => "Expired",
        }
    }

    /// The most severe of an iterator of states, or `None` when empty.
    pub fn most_severe<I>(states: I) -> Option<ComplianceState>
    where
        I: IntoIterator<Item = ComplianceState>,
    {
        states.into_iter().max()
    }
}

impl std::fmt::Display for ComplianceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplianceState {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "soonToExpire" | "soon_to_expire" | "soon" => Ok(Self::SoonToExpire),
            "expired" => Ok(Self::Expired),
            other => Err(DocketError::UnknownState(other.to_string())),
        }
    }
}

/// Severity tier of a remaining period.
///
/// Mirrors [`ComplianceState`] and adds `Unknown` for records without a
/// known expiry date, which are rendered neutrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    /// No known expiry date.
    Unknown,
    /// Outside the soon-to-expire window.
    Active,
    /// Within the soon-to-expire window.
    Soon,
    /// Overdue.
    Expired,
}

impl From<ComplianceState> for Tier {
    fn from(state: ComplianceState) -> Self {
        match state {
            ComplianceState::Active => Self::Active,
            ComplianceState::SoonToExpire => Self::Soon,
            ComplianceState::Expired => Self::Expired,
        }
    }
}
