//! Customer model

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{
    common::{
        parse_iso_date, parse_optional_timestamp, require_list, require_text, Address, PersonName,
    },
    Assertions,
};
use crate::error::{AppError, AppResult};

/// Account status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
            CustomerStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CustomerStatus::Active),
            "inactive" => Ok(CustomerStatus::Inactive),
            "suspended" => Ok(CustomerStatus::Suspended),
            _ => Err(AppError::Constraint {
                field: "status".to_string(),
                message: format!("unknown customer status '{}'", s),
            }),
        }
    }
}

/// Customer as exchanged over HTTP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Customer {
    /// Email address, primary key
    #[validate(
        email(message = "email is not a valid address"),
        length(max = 255, message = "email is longer than 255 characters")
    )]
    pub email: String,
    pub name: PersonName,
    #[validate(length(max = 32, message = "phone_number is longer than 32 characters"))]
    pub phone_number: String,
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,
    pub address: Address,
    /// Assigned by the server on creation (RFC 3339); ignored on input
    pub registration_date: String,
    /// RFC 3339 timestamp, empty when the customer never logged in
    pub last_login: String,
    pub status: CustomerStatus,
    pub notes: String,
    pub languages: Vec<String>,
}

impl Assertions for Customer {
    fn assert_required(&self) -> AppResult<()> {
        require_text("email", &self.email)?;
        require_text("first_name", &self.name.first_name)?;
        require_text("last_name", &self.name.last_name)?;
        require_text("dob", &self.dob)?;
        require_list("languages", &self.languages)?;
        Ok(())
    }

    fn assert_constraints(&self) -> AppResult<()> {
        self.validate()?;
        self.name.validate()?;
        self.address.validate()?;
        parse_iso_date("dob", &self.dob)?;
        parse_optional_timestamp("registration_date", &self.registration_date)?;
        parse_optional_timestamp("last_login", &self.last_login)?;
        Ok(())
    }
}
