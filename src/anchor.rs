// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Anchor status classification.
//!
//! Status codes come from an external protocol that may grow new values,
//! so classification is total: unknown codes map to `None`.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AnchorStatus {
    NotRequested = 0,
    Pending = 1,
    Processing = 2,
    Anchored = 3,
    Failed = 4,
}

impl AnchorStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(AnchorStatus::NotRequested),
            1 => Some(AnchorStatus::Pending),
            2 => Some(AnchorStatus::Processing),
            3 => Some(AnchorStatus::Anchored),
            4 => Some(AnchorStatus::Failed),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            AnchorStatus::NotRequested => "NOT_REQUESTED",
            AnchorStatus::Pending => "PENDING",
            AnchorStatus::Processing => "PROCESSING",
            AnchorStatus::Anchored => "ANCHORED",
            AnchorStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for AnchorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

/// Human label `"<NAME> (<n>)"` for a raw status code.
pub fn format_anchor_status(code: i64) -> Option<String> {
    AnchorStatus::from_code(code).map(|status| status.to_string())
}
