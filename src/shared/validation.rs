use rust_decimal::Decimal;
use validator::ValidationError;

/// Largest price a NUMERIC(18,2) column holds
const MAX_PRICE: Decimal = Decimal::from_parts(2_808_348_671, 232_830_643, 0, false, 2); // 9999999999999999.99

/// Prices must be strictly positive, carry at most two decimals and fit the
/// price column
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if !price.is_sign_positive() || price.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("Price must be greater than zero".into());
        return Err(err);
    }

    if price.normalize().scale() > 2 {
        let mut err = ValidationError::new("scale");
        err.message = Some("Price must have at most two decimal places".into());
        return Err(err);
    }

    if *price > MAX_PRICE {
        let mut err = ValidationError::new("range");
        err.message = Some("Price is too large".into());
        return Err(err);
    }

    Ok(())
}

/// Movie titles: 1-200 characters once surrounding whitespace is removed
pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    validate_trimmed_length(value, 200, "Title")
}

/// Category names: 1-100 characters once surrounding whitespace is removed
pub fn validate_category_name(value: &str) -> Result<(), ValidationError> {
    validate_trimmed_length(value, 100, "Name")
}

/// Length is measured on the trimmed value, which is what gets stored
fn validate_trimmed_length(value: &str, max: usize, label: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();

    if len == 0 {
        let mut err = ValidationError::new("required");
        err.message = Some(format!("{} is required", label).into());
        return Err(err);
    }

    if len > max {
        let mut err = ValidationError::new("length");
        err.message = Some(format!("{} must be 1-{} characters", label, max).into());
        return Err(err);
    }

    Ok(())
}
