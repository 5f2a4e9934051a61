use super::{CreateProductRequest, UpdateProductRequest, ValidationError, ValidationResult};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

impl Validate for CreateProductRequest {
    fn validate(&self) -> ValidationResult<()> {
        // Typed fields are checked before the required string fields
        if self.price.is_none() || self.status.is_none() || self.stock.is_none() {
            return Err(ValidationError::InvalidFieldTypes);
        }

        let required = [&self.title, &self.description, &self.code, &self.category];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(ValidationError::MissingRequiredFields);
        }

        Ok(())
    }
}

impl Validate for UpdateProductRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_not_blank("title", &self.title)?;
        validate_not_blank("description", &self.description)?;
        validate_not_blank("code", &self.code)?;
        validate_not_blank("category", &self.category)?;
        Ok(())
    }
}

/// Only string fields are checked for blankness on partial updates;
/// numeric and boolean fields are accepted unchecked.
fn validate_not_blank(field: &str, value: &Option<String>) -> ValidationResult<()> {
    if let Some(value) = value {
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create_request() -> CreateProductRequest {
        CreateProductRequest {
            title: "Widget".to_string(),
            description: "A widget".to_string(),
            code: "W1".to_string(),
            category: "tools".to_string(),
            price: Some(9.99),
            status: Some(true),
            stock: Some(5),
        }
    }

    #[test]
    fn test_valid_create_request_passes() {
        assert!(valid_create_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_missing_typed_field_fails() {
        let mut request = valid_create_request();
        request.price = None;

        match request.validate() {
            Err(ValidationError::InvalidFieldTypes) => {}
            other => panic!("Expected InvalidFieldTypes, got {:?}", other),
        }
    }

    #[test]
    fn test_create_request_blank_title_fails() {
        let mut request = valid_create_request();
        request.title = "   ".to_string();

        match request.validate() {
            Err(ValidationError::MissingRequiredFields) => {}
            other => panic!("Expected MissingRequiredFields, got {:?}", other),
        }
    }

    #[test]
    fn test_create_request_type_check_runs_before_field_check() {
        let mut request = valid_create_request();
        request.title = String::new();
        request.stock = None;

        match request.validate() {
            Err(ValidationError::InvalidFieldTypes) => {}
            other => panic!("Expected InvalidFieldTypes, got {:?}", other),
        }
    }

    #[test]
    fn test_update_request_blank_string_field_fails() {
        let request = UpdateProductRequest {
            description: Some("  ".to_string()),
            ..Default::default()
        };

        match request.validate() {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "description"),
            other => panic!("Expected EmptyField, got {:?}", other),
        }
    }

    #[test]
    fn test_update_request_absent_fields_pass() {
        assert!(UpdateProductRequest::default().validate().is_ok());
    }
}
