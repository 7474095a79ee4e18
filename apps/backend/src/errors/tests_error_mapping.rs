// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_item_not_found() {
    let nf = DomainError::item_not_found("A1");
    let app: AppError = nf.into();
    assert_eq!(app.code(), ErrorCode::ItemNotFound);
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_other_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Other("Record".into()), "gone");
    let app: AppError = nf.into();
    assert_eq!(app.code(), ErrorCode::NotFound);
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let other = DomainError::infra(InfraErrorKind::Other("DbError".into()), "boom");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn not_found_detail_names_the_article_number() {
    let nf = DomainError::item_not_found("SKU-42");
    assert!(nf.is_not_found());
    assert!(nf.to_string().contains("SKU-42"));
}
