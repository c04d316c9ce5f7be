#[cfg(test)]
mod tests {
    use crate::errors::ItemApiError;
    use crate::errors::internal::{FieldViolation, InternalError, ItemError, StorageError};

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ItemApiError::from_internal_error(InternalError::Item(ItemError::NotFound(
            "42".to_string(),
        )));
        assert!(matches!(err, ItemApiError::NotFound(_)));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_validation_carries_every_field() {
        let err = ItemApiError::from_internal_error(InternalError::Item(ItemError::Validation(
            vec![
                FieldViolation::new("name", "Item name must be at least 2 characters"),
                FieldViolation::new("contact_email", "Please enter a valid email address"),
            ],
        )));
        match err {
            ItemApiError::Validation(json) => {
                assert_eq!(json.0.status_code, 400);
                let fields: Vec<&str> = json.0.fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(fields, vec!["name", "contact_email"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_filter_maps_to_400() {
        let err = ItemApiError::from_internal_error(InternalError::Item(
            ItemError::invalid_filter("sort", "unknown value 'sideways'"),
        ));
        assert!(matches!(err, ItemApiError::InvalidFilter(_)));
        assert!(err.message().contains("sort"));
    }

    #[test]
    fn test_storage_errors_map_to_client_errors() {
        let too_large = ItemApiError::from_internal_error(InternalError::Storage(
            StorageError::TooLarge {
                size: 6 * 1024 * 1024,
                max: 5 * 1024 * 1024,
            },
        ));
        assert_eq!(too_large.status_code(), 413);
        assert_eq!(too_large.message(), "Images may be at most 5 MB");

        let unsupported = ItemApiError::from_internal_error(InternalError::Storage(
            StorageError::UnsupportedType("exe".to_string()),
        ));
        assert_eq!(unsupported.status_code(), 415);
    }

    #[test]
    fn test_io_error_hides_details() {
        let err = ItemApiError::from_internal_error(InternalError::Storage(StorageError::Io {
            operation: "write_image".to_string(),
            source: std::io::Error::other("disk full"),
        }));
        assert_eq!(err.status_code(), 500);
        assert!(!err.message().contains("disk full"));
    }
}
