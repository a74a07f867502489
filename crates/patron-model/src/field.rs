//! Semantic field types recognized in patron data columns.
//!
//! A column of input data is eventually assigned exactly one of these
//! types, or [`FieldType::Unknown`] when the evidence is too thin or
//! too contradictory to commit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The semantic type of a patron data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Telephone number (7, 10, or 11 digits after separator stripping).
    Phone,
    /// Postal code in the configured locale's format.
    PostalCode,
    /// Gender against a small fixed vocabulary.
    Gender,
    /// Email address.
    Email,
    /// Country name or recognized abbreviation.
    Country,
    /// Province or state code/name within the configured country.
    Province,
    /// Calendar date (birth date or similar).
    Date,
    /// Given (first) name.
    GivenName,
    /// Family (last) name.
    FamilyName,
    /// Street address line.
    StreetAddress,
    /// Library card number or other external barcode.
    Barcode,
    /// Could not be determined.
    Unknown,
}

impl FieldType {
    /// Every type a classifier can vote for, in declaration order.
    /// Excludes [`FieldType::Unknown`], which is an absence of a verdict.
    pub const CLASSIFIABLE: [FieldType; 11] = [
        FieldType::Phone,
        FieldType::PostalCode,
        FieldType::Gender,
        FieldType::Email,
        FieldType::Country,
        FieldType::Province,
        FieldType::Date,
        FieldType::GivenName,
        FieldType::FamilyName,
        FieldType::StreetAddress,
        FieldType::Barcode,
    ];

    /// Canonical lowercase name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Phone => "phone",
            FieldType::PostalCode => "postalCode",
            FieldType::Gender => "gender",
            FieldType::Email => "email",
            FieldType::Country => "country",
            FieldType::Province => "province",
            FieldType::Date => "birthday",
            FieldType::GivenName => "firstName",
            FieldType::FamilyName => "lastName",
            FieldType::StreetAddress => "street",
            FieldType::Barcode => "barcode",
            FieldType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    /// Parses a configuration field name. Accepts the aliases the original
    /// registration projects used (`fname`, `pcode`, `dob`, `state`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let field = match normalized.as_str() {
            "phone" | "phonenumber" | "homephone" => FieldType::Phone,
            "postalcode" | "pcode" | "postcode" | "zip" | "zipcode" => FieldType::PostalCode,
            "gender" | "sex" => FieldType::Gender,
            "email" | "emailaddress" => FieldType::Email,
            "country" => FieldType::Country,
            "province" | "state" | "prov" => FieldType::Province,
            "birthday" | "birthdate" | "dob" | "date" => FieldType::Date,
            "firstname" | "fname" | "givenname" => FieldType::GivenName,
            "lastname" | "lname" | "familyname" | "surname" => FieldType::FamilyName,
            "street" | "address" | "streetaddress" => FieldType::StreetAddress,
            "barcode" | "userid" | "cardnumber" => FieldType::Barcode,
            _ => return Err(format!("unknown field name: {s}")),
        };
        Ok(field)
    }
}
