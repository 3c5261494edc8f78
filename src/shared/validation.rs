use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating reporter/worker id fields
    /// Must be lowercase alphanumeric with hyphens
    /// - Valid: "demo-citizen-1", "user123", "rpt-abc-123"
    /// - Invalid: "-user", "user-", "user--1", "User", "user_1"
    pub static ref ID_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_regex_valid() {
        assert!(ID_REGEX.is_match("demo-citizen-1"));
        assert!(ID_REGEX.is_match("user123"));
        assert!(ID_REGEX.is_match("a"));
        assert!(ID_REGEX.is_match("rpt-abc-123"));
    }

    #[test]
    fn test_id_regex_invalid() {
        assert!(!ID_REGEX.is_match("-user")); // starts with hyphen
        assert!(!ID_REGEX.is_match("user-")); // ends with hyphen
        assert!(!ID_REGEX.is_match("user--1")); // double hyphen
        assert!(!ID_REGEX.is_match("User")); // uppercase
        assert!(!ID_REGEX.is_match("user_1")); // underscore
        assert!(!ID_REGEX.is_match("")); // empty
    }
}
