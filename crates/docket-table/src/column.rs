//! # Columns
//!
//! The closed set of sortable columns. Each column belongs to exactly one
//! comparison class, which decides how two cell values are ordered.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use docket_core::DocketError;

/// How values in a column are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    /// Compliance state, by severity weight.
    Severity,
    /// Record date, by parsed calendar day.
    Date,
    /// Integer or decimal quantity.
    Numeric,
    /// Free text, case-folded.
    Text,
}

/// A sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Id,
    Category,
    Name,
    Number,
    Notes,
    ExpiryDate,
    DocumentedExpiryDate,
    InternalExpiryDate,
    RegistrationDate,
    Remaining,
    Status,
    DocumentedStatus,
    InternalStatus,
    Cost,
    DocumentedCost,
    InternalCost,
    DisplayCost,
    RenewalType,
    ContractType,
    LicenseName,
    Authority,
    ContactNumbers,
    Email,
    WebsiteName,
    WebsiteUrl,
    Username,
    EmployeeName,
    EmployeeNumber,
    Requirements,
}

impl Column {
    /// All columns in declaration order.
    pub fn all() -> &'static [Column] {
        use Column::*;
        &[
            Id,
            Category,
            Name,
            Number,
            Notes,
            ExpiryDate,
            DocumentedExpiryDate,
            InternalExpiryDate,
            RegistrationDate,
            Remaining,
            Status,
            DocumentedStatus,
            InternalStatus,
            Cost,
            DocumentedCost,
            InternalCost,
            DisplayCost,
            RenewalType,
            ContractType,
            LicenseName,
            Authority,
            ContactNumbers,
            Email,
            WebsiteName,
            WebsiteUrl,
            Username,
            EmployeeName,
            EmployeeNumber,
            Requirements,
        ]
    }

    /// Wire key, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Category => "category",
            Self::Name => "name",
            Self::Number => "number",
            Self::Notes => "notes",
            Self::ExpiryDate => "expiryDate",
            Self::DocumentedExpiryDate => "documentedExpiryDate",
            Self::InternalExpiryDate => "internalExpiryDate",
            Self::RegistrationDate => "registrationDate",
            Self::Remaining => "remaining",
            Self::Status => "status",
            Self::DocumentedStatus => "documentedStatus",
            Self::InternalStatus => "internalStatus",
            Self::Cost => "cost",
            Self::DocumentedCost => "documentedCost",
            Self::InternalCost => "internalCost",
            Self::DisplayCost => "displayCost",
            Self::RenewalType => "renewalType",
            Self::ContractType => "contractType",
            Self::LicenseName => "licenseName",
            Self::Authority => "authority",
            Self::ContactNumbers => "contactNumbers",
            Self::Email => "email",
            Self::WebsiteName => "websiteName",
            Self::WebsiteUrl => "websiteUrl",
            Self::Username => "username",
            Self::EmployeeName => "employeeName",
            Self::EmployeeNumber => "employeeNumber",
            Self::Requirements => "requirements",
        }
    }

    /// Comparison class of the column.
    pub fn class(&self) -> ColumnClass {
        match self {
            Self::Status | Self::DocumentedStatus | Self::InternalStatus => ColumnClass::Severity,
            Self::ExpiryDate
            | Self::DocumentedExpiryDate
            | Self::InternalExpiryDate
            | Self::RegistrationDate => ColumnClass::Date,
            Self::Id
            | Self::Remaining
            | Self::Cost
            | Self::DocumentedCost
            | Self::InternalCost
            | Self::DisplayCost => ColumnClass::Numeric,
            _ => ColumnClass::Text,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "recordTypeLabel" is the historical key of the category column.
        if s == "recordTypeLabel" {
            return Ok(Self::Category);
        }
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DocketError::UnknownColumn(s.to_string()))
    }
}
