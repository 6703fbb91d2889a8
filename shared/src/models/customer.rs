//! Customer Model

use serde::{Deserialize, Serialize};

/// Membership tier, drives the membership discount rate table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl MembershipTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Bronze => "bronze",
            MembershipTier::Silver => "silver",
            MembershipTier::Gold => "gold",
            MembershipTier::Platinum => "platinum",
        }
    }

    /// Suffix used in membership discount codes (e.g. `MEM-GOLD`)
    pub fn code(&self) -> &'static str {
        match self {
            MembershipTier::Bronze => "BRONZE",
            MembershipTier::Silver => "SILVER",
            MembershipTier::Gold => "GOLD",
            MembershipTier::Platinum => "PLATINUM",
        }
    }
}

/// Postal address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub zip: String,
}

/// Customer entity (read-only to the pipeline)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub membership: MembershipTier,
    pub address: Address,
    pub is_active: bool,
}
