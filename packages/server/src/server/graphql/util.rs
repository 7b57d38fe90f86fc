use juniper::{FieldError, FieldResult, Value};

use crate::common::Id;

/// Resolver error with a plain message and no extensions
pub fn field_error<M: std::fmt::Display>(message: M) -> FieldError {
    FieldError::new(message, Value::null())
}

/// Parse a typed id from a GraphQL string argument
pub fn parse_id<T>(raw: &str, what: &str) -> FieldResult<Id<T>> {
    Id::parse(raw.trim()).map_err(|_| field_error(format!("Invalid {}: {}", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{PostId, UserId};

    #[test]
    fn test_parse_id() {
        let id = UserId::new();
        let parsed: UserId = parse_id(&id.to_string(), "user id").unwrap();
        assert_eq!(parsed, id);

        let err = parse_id::<crate::common::Post>("nope", "post id").unwrap_err();
        assert_eq!(err.message(), "Invalid post id: nope");
    }

    #[test]
    fn test_field_error_carries_message_only() {
        let err = field_error("User not found");
        assert_eq!(err.message(), "User not found");
        assert!(err.extensions().is_null());
    }

    #[test]
    fn test_parse_id_trims_whitespace() {
        let id = PostId::new();
        let parsed: PostId = parse_id(&format!("  {} ", id), "post id").unwrap();
        assert_eq!(parsed, id);
    }
}
