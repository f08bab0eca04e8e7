//! # Validation Module
//!
//! Input validation for kiosk requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (axum)                                         │
//! │  └── Malformed JSON → 400 before any rule runs                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Every field is checked, failures are collected                    │
//! │  └── One message per failing field                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (product_number)                                           │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-field validators return [`ValidationResult`]. Request validators
//! run all of them and return [`CoreError::InvalidInput`] holding every
//! failure, so a client sending `{}` sees all four product messages at once.
//!
//! ## Usage
//! ```rust
//! use kiosk_core::dto::ProductCreateRequest;
//! use kiosk_core::validation::validate_product_create;
//! use kiosk_core::CoreError;
//!
//! let err = validate_product_create(&ProductCreateRequest::default()).unwrap_err();
//! match err {
//!     CoreError::InvalidInput(errors) => assert_eq!(errors.len(), 4),
//!     other => panic!("unexpected {other}"),
//! }
//! ```

use chrono::NaiveDate;

use crate::dto::{OrderCreateRequest, OrderStatisticsMailRequest, ProductCreateRequest};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::ProductDraft;
use crate::{MAX_PRODUCT_NAME_LEN, MAX_PRODUCT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank (whitespace-only counts as blank)
/// - At most 200 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use kiosk_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name(" Americano ").unwrap(), "Americano");
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name",
            message: "Product name is required.",
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a product price in won. Zero is rejected, and so is anything
/// above [`MAX_PRODUCT_PRICE`].
pub fn validate_price(price: Option<i64>) -> ValidationResult<Money> {
    let Some(price) = price else {
        return Err(ValidationError::Required {
            field: "price",
            message: "Product price is required.",
        });
    };

    if price <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price",
            message: "Product price must be positive.",
        });
    }

    if price > MAX_PRODUCT_PRICE {
        return Err(ValidationError::TooLarge {
            field: "price",
            max: MAX_PRODUCT_PRICE,
        });
    }

    Ok(Money::from_won(price))
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be blank
/// - Exactly one '@' with a non-empty local part and a dotted domain
///
/// This is a shape check for obvious typos, not RFC 5322.
pub fn validate_email(field: &'static str, email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field,
            message: "Email is required.",
        });
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if !well_formed || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be an email address".to_string(),
        });
    }

    Ok(email.to_string())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a product creation request.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Admin: Register Product                                                │
/// │                                                                         │
/// │  {type, sellingStatus, name, price}                                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_product_create() ← THIS FUNCTION                              │
/// │       │                                                                 │
/// │       ├── type missing?          → "Product type is required."          │
/// │       ├── sellingStatus missing? → "Product selling status is required."│
/// │       ├── name blank?            → "Product name is required."          │
/// │       ├── price <= 0?            → "Product price must be positive."    │
/// │       │                                                                 │
/// │       └── OK → ProductDraft (product number assigned by the service)    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_product_create(request: &ProductCreateRequest) -> CoreResult<ProductDraft> {
    let mut errors = Vec::new();

    let product_type = request.product_type;
    if product_type.is_none() {
        errors.push(ValidationError::Required {
            field: "type",
            message: "Product type is required.",
        });
    }

    let selling_status = request.selling_status;
    if selling_status.is_none() {
        errors.push(ValidationError::Required {
            field: "sellingStatus",
            message: "Product selling status is required.",
        });
    }

    let name = validate_product_name(request.name.as_deref().unwrap_or_default())
        .map_err(|e| errors.push(e))
        .ok();

    let price = validate_price(request.price)
        .map_err(|e| errors.push(e))
        .ok();

    match (product_type, selling_status, name, price) {
        (Some(product_type), Some(selling_status), Some(name), Some(price)) => Ok(ProductDraft {
            product_type,
            selling_status,
            name,
            price,
        }),
        _ => Err(CoreError::InvalidInput(errors)),
    }
}

/// Validates an order request and returns its product numbers, trimmed and
/// in request order.
pub fn validate_order_create(request: &OrderCreateRequest) -> CoreResult<Vec<String>> {
    if request.product_numbers.is_empty() {
        return Err(CoreError::InvalidInput(vec![ValidationError::Required {
            field: "productNumbers",
            message: "Product numbers are required.",
        }]));
    }

    let numbers: Vec<String> = request
        .product_numbers
        .iter()
        .map(|n| n.trim().to_string())
        .collect();

    if numbers.iter().any(String::is_empty) {
        return Err(CoreError::InvalidInput(vec![ValidationError::InvalidFormat {
            field: "productNumbers",
            reason: "must not contain blank entries".to_string(),
        }]));
    }

    Ok(numbers)
}

/// Validates a statistics mail request into `(date, recipient)`.
pub fn validate_statistics_mail(
    request: &OrderStatisticsMailRequest,
) -> CoreResult<(NaiveDate, String)> {
    let mut errors = Vec::new();

    if request.date.is_none() {
        errors.push(ValidationError::Required {
            field: "date",
            message: "Report date is required.",
        });
    }

    let email = match request.email.as_deref() {
        Some(email) => validate_email("email", email)
            .map_err(|e| errors.push(e))
            .ok(),
        None => {
            errors.push(ValidationError::Required {
                field: "email",
                message: "Email is required.",
            });
            None
        }
    };

    match (request.date, email) {
        (Some(date), Some(email)) => Ok((date, email)),
        _ => Err(CoreError::InvalidInput(errors)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductSellingStatus, ProductType};

    fn valid_request() -> ProductCreateRequest {
        ProductCreateRequest {
            product_type: Some(ProductType::Handmade),
            selling_status: Some(ProductSellingStatus::Selling),
            name: Some("Cappuccino".to_string()),
            price: Some(5000),
        }
    }

    fn messages(err: CoreError) -> Vec<(String, String)> {
        match err {
            CoreError::InvalidInput(errors) => errors
                .iter()
                .map(|e| (e.field().to_string(), e.to_string()))
                .collect(),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert_eq!(validate_product_name("Latte").unwrap(), "Latte");
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(Some(4000)).unwrap().won(), 4000);
        assert_eq!(validate_price(Some(MAX_PRODUCT_PRICE)).unwrap().won(), MAX_PRODUCT_PRICE);
        assert!(validate_price(Some(0)).is_err());
        assert!(validate_price(Some(-1)).is_err());
        assert!(validate_price(None).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("email", " owner@cafe.test ").unwrap(), "owner@cafe.test");
        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "owner").is_err());
        assert!(validate_email("email", "@cafe.test").is_err());
        assert!(validate_email("email", "owner@cafe").is_err());
        assert!(validate_email("email", "a@b@cafe.test").is_err());
        assert!(validate_email("email", "own er@cafe.test").is_err());
    }

    #[test]
    fn test_valid_product_request() {
        let draft = validate_product_create(&valid_request()).unwrap();
        assert_eq!(draft.name, "Cappuccino");
        assert_eq!(draft.price.won(), 5000);

        let product = draft.with_number("003".to_string());
        assert_eq!(product.product_number, "003");
    }

    #[test]
    fn test_missing_type() {
        let request = ProductCreateRequest {
            product_type: None,
            ..valid_request()
        };
        let errors = messages(validate_product_create(&request).unwrap_err());
        assert_eq!(
            errors,
            vec![("type".to_string(), "Product type is required.".to_string())]
        );
    }

    #[test]
    fn test_missing_selling_status() {
        let request = ProductCreateRequest {
            selling_status: None,
            ..valid_request()
        };
        let errors = messages(validate_product_create(&request).unwrap_err());
        assert_eq!(
            errors,
            vec![(
                "sellingStatus".to_string(),
                "Product selling status is required.".to_string()
            )]
        );
    }

    #[test]
    fn test_blank_name() {
        let request = ProductCreateRequest {
            name: Some("  ".to_string()),
            ..valid_request()
        };
        let errors = messages(validate_product_create(&request).unwrap_err());
        assert_eq!(
            errors,
            vec![("name".to_string(), "Product name is required.".to_string())]
        );
    }

    #[test]
    fn test_non_positive_price() {
        let request = ProductCreateRequest {
            price: Some(0),
            ..valid_request()
        };
        let errors = messages(validate_product_create(&request).unwrap_err());
        assert_eq!(
            errors,
            vec![("price".to_string(), "Product price must be positive.".to_string())]
        );
    }

    #[test]
    fn test_price_above_max_is_rejected() {
        let request = ProductCreateRequest {
            price: Some(i64::MAX),
            ..valid_request()
        };
        let errors = messages(validate_product_create(&request).unwrap_err());
        assert_eq!(
            errors,
            vec![("price".to_string(), "price must be at most 100000000.".to_string())]
        );
    }

    #[test]
    fn test_missing_price() {
        let request = ProductCreateRequest {
            price: None,
            ..valid_request()
        };
        let errors = messages(validate_product_create(&request).unwrap_err());
        assert_eq!(
            errors,
            vec![("price".to_string(), "Product price is required.".to_string())]
        );
    }

    #[test]
    fn test_all_failures_are_collected() {
        let errors = messages(validate_product_create(&ProductCreateRequest::default()).unwrap_err());
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(fields, vec!["type", "sellingStatus", "name", "price"]);
    }

    #[test]
    fn test_validate_order_create() {
        let request = OrderCreateRequest {
            product_numbers: vec!["001".to_string(), " 002 ".to_string(), "001".to_string()],
        };
        assert_eq!(
            validate_order_create(&request).unwrap(),
            vec!["001", "002", "001"]
        );

        let empty = OrderCreateRequest::default();
        let errors = messages(validate_order_create(&empty).unwrap_err());
        assert_eq!(errors[0].1, "Product numbers are required.");

        let blank = OrderCreateRequest {
            product_numbers: vec!["001".to_string(), " ".to_string()],
        };
        assert!(validate_order_create(&blank).is_err());
    }

    #[test]
    fn test_validate_statistics_mail() {
        let request = OrderStatisticsMailRequest {
            date: NaiveDate::from_ymd_opt(2024, 4, 1),
            email: Some("owner@cafe.test".to_string()),
        };
        let (date, email) = validate_statistics_mail(&request).unwrap();
        assert_eq!(date.to_string(), "2024-04-01");
        assert_eq!(email, "owner@cafe.test");

        let errors = messages(validate_statistics_mail(&OrderStatisticsMailRequest::default()).unwrap_err());
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(fields, vec!["date", "email"]);
    }
}
