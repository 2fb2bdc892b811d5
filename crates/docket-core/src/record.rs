//! # Record Shapes
//!
//! The three record shapes stored in Docket collections:
//!
//! - [`TrackedRecord`] — one expiry date (licenses, certificates, agencies,
//!   supplier contracts, trademarks, other topics).
//! - [`DualTrackRecord`] — lease contracts with independent *documented*
//!   and *internal* expiry tracks.
//! - [`Procedure`] — reference data with no expiry.
//!
//! [`RecordData`] is the explicit tagged union of the three, and
//! [`Record<T>`] pairs any of them with its [`RecordId`].
//!
//! ## Derived Fields
//!
//! None of these types stores a compliance status. Statuses are pure
//! functions of the dates and the current day, computed by `docket-status`
//! on every read, so a date edit can never leave a stale badge behind.
//!
//! ## Pass-Through Data
//!
//! Notes and attachments are carried verbatim and never inspected.

use serde::{Deserialize, Serialize};

use crate::category::RecordKind;
use crate::error::DocketError;
use crate::identity::RecordId;
use crate::temporal::{known_date, CalendarDate, RecordDate};

/// An opaque file attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Original file name.
    pub name: String,
    /// MIME type as reported by the uploader.
    #[serde(rename = "type", default)]
    pub mime_type: String,
    /// Encoded content (typically a data URL).
    #[serde(default)]
    pub data: String,
}

/// How a supplier contract renews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenewalType {
    /// Renewed by hand.
    Manual,
    /// Renews automatically.
    Automatic,
}

/// Which expiry tracks a lease contract is expected to carry.
///
/// Descriptive only: aggregation always uses the dates actually present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContractType {
    /// Registered with the authorities only.
    Documented,
    /// Internal agreement only.
    Internal,
    /// Both a documented and an internal agreement.
    DocumentedAndInternal,
}

/// A record with a single expiry date.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedRecord {
    /// Display name.
    pub name: String,
    /// Reference number issued by the authority or counterparty.
    #[serde(default)]
    pub number: String,
    /// Expiry date as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<RecordDate>,
    /// Registration date (trademark certificates).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<RecordDate>,
    /// Renewal mode (supplier contracts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_type: Option<RenewalType>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Cost of the license or contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Attached documents.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl TrackedRecord {
    /// A record with a name and reference number and nothing else.
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            ..Self::default()
        }
    }

    /// Set the expiry date text.
    pub fn with_expiry(mut self, date: impl Into<RecordDate>) -> Self {
        self.expiry_date = Some(date.into());
        self
    }

    /// Set the cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The known expiry date, if any.
    pub fn expiry(&self) -> Option<CalendarDate> {
        known_date(self.expiry_date.as_ref())
    }
}

/// A lease contract with documented and internal expiry tracks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DualTrackRecord {
    /// Display name.
    pub name: String,
    /// Contract number.
    #[serde(default)]
    pub number: String,
    /// Expected tracks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_type: Option<ContractType>,
    /// Expiry of the contract registered with the authorities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documented_expiry_date: Option<RecordDate>,
    /// Expiry of the internal agreement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_expiry_date: Option<RecordDate>,
    /// Cost of the documented contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documented_cost: Option<f64>,
    /// Cost of the internal agreement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_cost: Option<f64>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Attached documents.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl DualTrackRecord {
    /// A contract with a name and number and no tracks.
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            ..Self::default()
        }
    }

    /// Set the documented track date text.
    pub fn with_documented(mut self, date: impl Into<RecordDate>) -> Self {
        self.documented_expiry_date = Some(date.into());
        self
    }

    /// Set the internal track date text.
    pub fn with_internal(mut self, date: impl Into<RecordDate>) -> Self {
        self.internal_expiry_date = Some(date.into());
        self
    }

    /// Set both costs.
    pub fn with_costs(mut self, documented: Option<f64>, internal: Option<f64>) -> Self {
        self.documented_cost = documented;
        self.internal_cost = internal;
        self
    }

    /// Documented track text, if present and non-blank.
    pub fn documented_track(&self) -> Option<&RecordDate> {
        self.documented_expiry_date.as_ref().filter(|d| !d.is_blank())
    }

    /// Internal track text, if present and non-blank.
    pub fn internal_track(&self) -> Option<&RecordDate> {
        self.internal_expiry_date.as_ref().filter(|d| !d.is_blank())
    }

    /// The date shown for the contract: documented if present, else internal.
    pub fn display_date(&self) -> Option<&RecordDate> {
        self.documented_track().or_else(|| self.internal_track())
    }

    /// Sum of both costs, absent costs counting as zero.
    pub fn total_cost(&self) -> f64 {
        self.documented_cost.unwrap_or(0.0) + self.internal_cost.unwrap_or(0.0)
    }
}

/// Reference data describing how a license is renewed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Procedure {
    /// Name of the license the procedure renews.
    pub license_name: String,
    /// Issuing authority.
    pub authority: String,
    /// Contact phone numbers.
    pub contact_numbers: String,
    /// Contact email.
    pub email: String,
    /// Name of the authority's portal.
    pub website_name: String,
    /// Portal URL.
    pub website_url: String,
    /// Portal username.
    pub username: String,
    /// Portal password.
    pub password: String,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Responsible employee.
    pub employee_name: String,
    /// Responsible employee's staff number.
    pub employee_number: String,
    /// Required documents.
    pub requirements: String,
    /// Attached documents.
    pub attachments: Vec<Attachment>,
}

/// A record body of any shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RecordData {
    /// Single expiry date.
    Single(TrackedRecord),
    /// Documented and internal tracks.
    Dual(DualTrackRecord),
    /// No expiry.
    Procedure(Procedure),
}

impl RecordData {
    /// Parse an untagged JSON body as the shape `kind` dictates.
    ///
    /// # Errors
    ///
    /// Returns [`DocketError::Serialization`] when the body does not match.
    pub fn from_value(kind: RecordKind, value: serde_json::Value) -> Result<Self, DocketError> {
        Ok(match kind {
            RecordKind::Single => Self::Single(serde_json::from_value(value)?),
            RecordKind::Dual => Self::Dual(serde_json::from_value(value)?),
            RecordKind::Reference => Self::Procedure(serde_json::from_value(value)?),
        })
    }

    /// Shape of this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Single(_) => RecordKind::Single,
            Self::Dual(_) => RecordKind::Dual,
            Self::Procedure(_) => RecordKind::Reference,
        }
    }

    /// Display name (license name for procedures).
    pub fn name(&self) -> &str {
        match self {
            Self::Single(r) => &r.name,
            Self::Dual(r) => &r.name,
            Self::Procedure(p) => &p.license_name,
        }
    }

    /// Attached documents.
    pub fn attachments(&self) -> &[Attachment] {
        match self {
            Self::Single(r) => &r.attachments,
            Self::Dual(r) => &r.attachments,
            Self::Procedure(p) => &p.attachments,
        }
    }

    /// Basic sanity checks applied before a record is stored.
    ///
    /// Names must be non-blank and costs finite and non-negative. Dates are
    /// deliberately not checked: unparsable dates are stored as entered.
    pub fn validate(&self) -> Result<(), DocketError> {
        if self.name().trim().is_empty() {
            return Err(DocketError::Validation("name must not be empty".to_string()));
        }
        let costs: Vec<(&str, Option<f64>)> = match self {
            Self::Single(r) => vec![("cost", r.cost)],
            Self::Dual(r) => vec![
                ("documentedCost", r.documented_cost),
                ("internalCost", r.internal_cost),
            ],
            Self::Procedure(_) => Vec::new(),
        };
        for (field, cost) in costs {
            if let Some(c) = cost {
                if !c.is_finite() || c < 0.0 {
                    return Err(DocketError::Validation(format!(
                        "{field} must be a non-negative number, got {c}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A record body paired with its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Identifier, unique within the record's collection.
    pub id: RecordId,
    /// The record body.
    #[serde(flatten)]
    pub data: T,
}

impl<T> Record<T> {
    /// Pair a body with an identifier.
    pub fn new(id: RecordId, data: T) -> Self {
        Self { id, data }
    }
}

/// A stored record of any shape.
pub type AnyRecord = Record<RecordData>;
