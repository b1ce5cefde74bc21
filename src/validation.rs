//! Shared checks for word entry fields and category names.

/// English, Thai and Category must each be non-blank after trimming.
pub fn validate_required_fields(
    english: &str,
    thai: &str,
    category: &str,
) -> Result<(), &'static str> {
    if english.trim().is_empty() {
        return Err("English field is required");
    }
    if thai.trim().is_empty() {
        return Err("Thai field is required");
    }
    if category.trim().is_empty() {
        return Err("Category field is required");
    }
    Ok(())
}

/// Trims and lowercases a category name. Blank names are rejected.
pub fn normalize_category(name: &str) -> Result<String, &'static str> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return Err("Category name must not be empty");
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_entry_accepted() {
        assert!(validate_required_fields("Hello", "สวัสดี", "basics").is_ok());
    }

    #[test]
    fn blank_english_rejected() {
        assert!(validate_required_fields("   ", "สวัสดี", "basics").is_err());
    }

    #[test]
    fn blank_thai_rejected() {
        assert!(validate_required_fields("Hello", "", "basics").is_err());
    }

    #[test]
    fn blank_category_rejected() {
        assert_eq!(
            validate_required_fields("Hello", "สวัสดี", "\t"),
            Err("Category field is required")
        );
    }

    #[test]
    fn category_is_trimmed_and_lowercased() {
        assert_eq!(normalize_category("  Travel ").unwrap(), "travel");
    }

    #[test]
    fn blank_category_name_rejected() {
        assert!(normalize_category("   ").is_err());
    }
}
