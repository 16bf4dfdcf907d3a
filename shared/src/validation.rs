//! Validation helpers for record creation
//!
//! Category and quality strings are deliberately NOT validated against their
//! enumerated sets; unrecognized values are stored and aggregated as-is.
//! Numeric bounds below are enforced at the persistence seam.

use rust_decimal::Decimal;

/// Validate a cost amount (zero is allowed, negative is not)
pub fn validate_cost_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Cost amount cannot be negative");
    }
    Ok(())
}

/// Validate a harvested quantity
pub fn validate_harvest_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Harvest quantity must be greater than 0");
    }
    Ok(())
}

/// Validate an optional per-unit sale price
pub fn validate_unit_price(unit_price: Option<Decimal>) -> Result<(), &'static str> {
    match unit_price {
        Some(price) if price < Decimal::ZERO => Err("Unit price cannot be negative"),
        _ => Ok(()),
    }
}

/// Validate a planted or project land area
pub fn validate_area(area: Decimal) -> Result<(), &'static str> {
    if area <= Decimal::ZERO {
        return Err("Area must be greater than 0");
    }
    Ok(())
}

/// Validate an expected yield target
pub fn validate_expected_yield(expected_yield: Decimal) -> Result<(), &'static str> {
    if expected_yield < Decimal::ZERO {
        return Err("Expected yield cannot be negative");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let has_at = email.contains('@');
    let has_dot = email.rsplit('@').next().is_some_and(|domain| domain.contains('.'));
    if has_at && has_dot && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_amount_zero_allowed() {
        assert!(validate_cost_amount(Decimal::ZERO).is_ok());
        assert!(validate_cost_amount(Decimal::from(120)).is_ok());
    }

    #[test]
    fn test_cost_amount_negative_rejected() {
        assert!(validate_cost_amount(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_harvest_quantity_must_be_positive() {
        assert!(validate_harvest_quantity(Decimal::from(5)).is_ok());
        assert!(validate_harvest_quantity(Decimal::ZERO).is_err());
        assert!(validate_harvest_quantity(Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_unit_price_absent_is_valid() {
        assert!(validate_unit_price(None).is_ok());
        assert!(validate_unit_price(Some(Decimal::ZERO)).is_ok());
        assert!(validate_unit_price(Some(Decimal::from(-2))).is_err());
    }

    #[test]
    fn test_area_bounds() {
        assert!(validate_area(Decimal::from(1)).is_ok());
        assert!(validate_area(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_expected_yield_zero_allowed() {
        assert!(validate_expected_yield(Decimal::ZERO).is_ok());
        assert!(validate_expected_yield(Decimal::from(-10)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("farmer@example.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no-domain@host").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }
}
