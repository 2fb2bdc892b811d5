//! # Record Categories — Closed Set of Collections
//!
//! Defines [`RecordCategory`], the one definition of every collection the
//! dashboard tracks, and [`RecordKind`], the record shape each collection
//! holds. Every `match` on `RecordCategory` is exhaustive: adding a
//! collection forces every label, kind and routing site to handle it.
//!
//! | Category | Kind | Label |
//! |----------|------|-------|
//! | `commercialLicense` | single | Commercial license |
//! | `operationalLicense` | single | Operational license |
//! | `civilDefenseCert` | single | Civil defense |
//! | `specialAgency` | single | Special agency |
//! | `leaseContract` | dual | Lease contract |
//! | `generalContract` | single | Supplier contract |
//! | `trademarkCert` | single | Trademark |
//! | `otherTopic` | single | Other topic |
//! | `procedure` | reference | Procedure |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DocketError;

/// A record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordCategory {
    /// Commercial (trade) licenses.
    CommercialLicense,
    /// Operational licenses.
    OperationalLicense,
    /// Civil defense certificates.
    CivilDefenseCert,
    /// Special agencies (powers of attorney).
    SpecialAgency,
    /// Lease contracts with documented and internal expiry tracks.
    LeaseContract,
    /// Supplier contracts.
    GeneralContract,
    /// Registered trademark certificates.
    TrademarkCert,
    /// Miscellaneous dated items (permits, memberships, subscriptions).
    OtherTopic,
    /// Procedures and requirements reference data.
    Procedure,
}

/// The record shape a collection holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    /// One expiry date.
    Single,
    /// Documented and internal expiry tracks.
    Dual,
    /// No expiry at all.
    Reference,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Dual => "dual",
            Self::Reference => "reference",
        })
    }
}

/// The eight collections that carry expiry dates, in display order.
pub const TRACKED_CATEGORIES: [RecordCategory; 8] = [
    RecordCategory::CommercialLicense,
    RecordCategory::OperationalLicense,
    RecordCategory::CivilDefenseCert,
    RecordCategory::LeaseContract,
    RecordCategory::GeneralContract,
    RecordCategory::SpecialAgency,
    RecordCategory::TrademarkCert,
    RecordCategory::OtherTopic,
];

impl RecordCategory {
    /// Every collection, trackable ones first.
    pub fn all() -> &'static [RecordCategory] {
        &[
            Self::CommercialLicense,
            Self::OperationalLicense,
            Self::CivilDefenseCert,
            Self::LeaseContract,
            Self::GeneralContract,
            Self::SpecialAgency,
            Self::TrademarkCert,
            Self::OtherTopic,
            Self::Procedure,
        ]
    }

    /// The record shape this collection holds.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::LeaseContract => RecordKind::Dual,
            Self::Procedure => RecordKind::Reference,
            Self::CommercialLicense
            | Self::OperationalLicense
            | Self::CivilDefenseCert
            | Self::SpecialAgency
            | Self::GeneralContract
            | Self::TrademarkCert
            | Self::OtherTopic => RecordKind::Single,
        }
    }

    /// Whether records in this collection carry expiry dates.
    pub fn is_tracked(&self) -> bool {
        self.kind() != RecordKind::Reference
    }

    /// Wire identifier, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CommercialLicense => "commercialLicense",
            Self::OperationalLicense => "operationalLicense",
            Self::CivilDefenseCert => "civilDefenseCert",
            Self::SpecialAgency => "specialAgency",
            Self::LeaseContract => "leaseContract",
            Self::GeneralContract => "generalContract",
            Self::TrademarkCert => "trademarkCert",
            Self::OtherTopic => "otherTopic",
            Self::Procedure => "procedure",
        }
    }

    /// Display label used in unified views and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CommercialLicense => "Commercial license",
            Self::OperationalLicense => "Operational license",
            Self::CivilDefenseCert => "Civil defense",
            Self::SpecialAgency => "Special agency",
            Self::LeaseContract => "Lease contract",
            Self::GeneralContract => "Supplier contract",
            Self::TrademarkCert => "Trademark",
            Self::OtherTopic => "Other topic",
            Self::Procedure => "Procedure",
        }
    }
}

impl std::fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordCategory {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| DocketError::UnknownCategory(s.to_string()))
    }
}
