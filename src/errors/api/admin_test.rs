#[cfg(test)]
mod tests {
    use crate::errors::AdminError;
    use crate::errors::internal::{CredentialError, InternalError};
    use sea_orm::DbErr;

    #[test]
    fn test_admin_required_maps_to_403() {
        let err = AdminError::from_internal_error(InternalError::Credential(
            CredentialError::AdminRequired,
        ));
        assert!(matches!(err, AdminError::AdminRequired(_)));
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_self_modification_maps_to_403() {
        let err = AdminError::from_internal_error(InternalError::Credential(
            CredentialError::SelfModificationDenied,
        ));
        assert!(matches!(err, AdminError::SelfModificationDenied(_)));
        assert_eq!(err.message(), "You cannot change your own role");
    }

    #[test]
    fn test_user_not_found_maps_to_404() {
        let err = AdminError::from_internal_error(InternalError::Credential(
            CredentialError::UserNotFound("u-1".to_string()),
        ));
        assert_eq!(err.status_code(), 404);
        assert!(err.message().contains("u-1"));
    }

    #[test]
    fn test_expired_session_maps_to_401() {
        let err = AdminError::from_internal_error(InternalError::Credential(
            CredentialError::ExpiredToken("jwt".to_string()),
        ));
        assert!(matches!(err, AdminError::Unauthorized(_)));
    }

    #[test]
    fn test_database_error_converts_to_internal_server_error() {
        let err = AdminError::from_internal_error(InternalError::database(
            "count_users",
            DbErr::RecordNotFound("test".to_string()),
        ));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "An internal error occurred");
    }
}
