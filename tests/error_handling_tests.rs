#[cfg(test)]
mod error_handling_tests {
    use chrono::DateTime;
    use laundry_invoice_server::catalog::{CatalogError, CatalogFile};
    use laundry_invoice_server::delivery::{DeliveryError, PhoneNumber};
    use laundry_invoice_server::invoice::{IssueError, RenderError};
    use laundry_invoice_server::ErrorResponse;

    #[test]
    fn test_error_response_constructors() {
        let error_response = ErrorResponse::bad_request("Invalid JSON body");
        assert_eq!(error_response.error, "BadRequest");
        assert!(error_response.message.contains("Invalid JSON"));

        assert_eq!(ErrorResponse::not_found("x").error, "NotFound");
        assert_eq!(
            ErrorResponse::internal_error("x").error,
            "InternalServerError"
        );
    }

    #[test]
    fn test_error_response_timestamp_is_rfc3339() {
        let error_response = ErrorResponse::internal_error("boom");
        assert!(DateTime::parse_from_rfc3339(&error_response.timestamp).is_ok());
    }

    #[test]
    fn test_error_response_serialization() {
        let error_response = ErrorResponse::new("BadRequest", "missing items");
        let json = serde_json::to_value(&error_response).unwrap();

        assert_eq!(json["error"], "BadRequest");
        assert_eq!(json["message"], "missing items");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_issue_error_displays_the_cause() {
        let err = IssueError::from(RenderError::Pdf("broken stream".to_string()));
        assert_eq!(err.to_string(), "failed to produce PDF: broken stream");
    }

    #[test]
    fn test_invalid_recipient_error_names_the_input() {
        let err = PhoneNumber::normalize("12", "965").unwrap_err();
        assert!(matches!(err, DeliveryError::InvalidRecipient { ref input, .. } if input == "12"));
        assert!(err.to_string().contains("'12'"));
    }

    #[test]
    fn test_malformed_catalog_json() {
        let result = CatalogFile::from_json("{ malformed json ");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }
}
