//! Role-gate policy checks.

use crate::error::AuthError;
use crate::principal::Principal;

/// Require the administrator role on an already-authenticated principal.
///
/// - No IO
/// - No panics
/// - Pure function of the attached identity
///
/// The admin and staff flags are independent boolean axes; only
/// `is_admin` matters here.
pub fn require_admin(principal: &Principal) -> Result<(), AuthError> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
