//! Access policy decisions.
//!
//! Pure functions over the optional request-scoped identity claim, so
//! every policy is testable without HTTP plumbing. All rejections are
//! Unauthorized — the chain does not distinguish "not logged in" from
//! "not allowed".

use openjobs_core::ServiceError;

use crate::token::Claims;

/// Any authenticated caller.
pub fn require_logged_in(claims: Option<&Claims>) -> Result<(), ServiceError> {
    match claims {
        Some(_) => Ok(()),
        None => Err(ServiceError::Unauthorized("authentication required".into())),
    }
}

/// Privileged caller only.
pub fn require_admin(claims: Option<&Claims>) -> Result<(), ServiceError> {
    match claims {
        Some(c) if c.is_admin => Ok(()),
        _ => Err(ServiceError::Unauthorized("admin privileges required".into())),
    }
}

/// The path-addressed user themselves, or a privileged caller.
pub fn require_self_or_admin(
    claims: Option<&Claims>,
    username: &str,
) -> Result<(), ServiceError> {
    match claims {
        Some(c) if c.is_admin || c.username == username => Ok(()),
        _ => Err(ServiceError::Unauthorized("access denied".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(username: &str, is_admin: bool) -> Claims {
        Claims {
            username: username.into(),
            is_admin,
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn logged_in_accepts_any_claim() {
        assert!(require_logged_in(Some(&claims("joe", false))).is_ok());
        assert!(require_logged_in(Some(&claims("amy", true))).is_ok());
    }

    #[test]
    fn logged_in_rejects_no_claim() {
        assert!(matches!(
            require_logged_in(None),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn admin_requires_admin_flag() {
        assert!(require_admin(Some(&claims("amy", true))).is_ok());
        assert!(require_admin(Some(&claims("joe", false))).is_err());
    }

    #[test]
    fn admin_rejects_no_claim() {
        assert!(matches!(
            require_admin(None),
            Err(ServiceError::Unauthorized(_))
        ));
    }

    #[test]
    fn self_or_admin_accepts_matching_username() {
        assert!(require_self_or_admin(Some(&claims("joe", false)), "joe").is_ok());
    }

    #[test]
    fn self_or_admin_rejects_other_username() {
        assert!(require_self_or_admin(Some(&claims("joe", false)), "amy").is_err());
    }

    #[test]
    fn self_or_admin_accepts_admin_for_anyone() {
        assert!(require_self_or_admin(Some(&claims("root", true)), "amy").is_ok());
    }

    #[test]
    fn self_or_admin_rejects_no_claim() {
        assert!(require_self_or_admin(None, "joe").is_err());
    }
}
