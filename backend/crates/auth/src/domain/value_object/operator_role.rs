use serde::{Deserialize, Serialize};
use std::fmt;

/// Warehouse role carried by every operator account and token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorRole {
    Admin,
    /// Warehouse floor staff, uploads captures
    Bodega,
    /// Call-center staff, reads captures
    CallCenter,
}

impl OperatorRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use OperatorRole::*;
        match self {
            Admin => "admin",
            Bodega => "bodega",
            CallCenter => "callcenter",
        }
    }
}

impl fmt::Display for OperatorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
