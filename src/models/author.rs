//! Author model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{
    common::{parse_iso_date, require_list, require_text, Address, PersonName},
    Assertions,
};
use crate::error::AppResult;

/// Author as exchanged over HTTP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Author {
    /// Generated on creation when left empty
    #[validate(length(max = 64, message = "id is longer than 64 characters"))]
    pub id: String,
    pub name: PersonName,
    /// Date of birth (YYYY-MM-DD)
    pub dob: String,
    pub address: Address,
    pub languages: Vec<String>,
}

impl Assertions for Author {
    fn assert_required(&self) -> AppResult<()> {
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
        Ok(())
    }
}
