use crate::models::domain::{FieldKind, SchemaField};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Builder rows for the default summary schema
    pub fn summary_fields() -> Vec<SchemaField> {
        vec![
            SchemaField::new("summary", FieldKind::String, true),
            SchemaField::new("keyword", FieldKind::List, true),
        ]
    }

    /// Rows covering every field kind with one level of nesting
    pub fn case_study_fields() -> Vec<SchemaField> {
        vec![
            SchemaField::new("title", FieldKind::String, true),
            SchemaField::new("revenue", FieldKind::Number, false),
            SchemaField::new("profitable", FieldKind::Boolean, false),
            SchemaField::new("competitors", FieldKind::List, false),
            SchemaField::object(
                "founder",
                true,
                vec![
                    SchemaField::new("name", FieldKind::String, true),
                    SchemaField::new("age", FieldKind::Number, false),
                    SchemaField::new("previous_startups", FieldKind::List, false),
                ],
            ),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixture_names_are_unique() {
        let fields = case_study_fields();
        let mut names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), fields.len());
    }

    #[test]
    fn test_summary_fixture() {
        let fields = summary_fields();
        assert_eq!(fields.len(), 2);
        assert!(fields.iter().all(|f| f.required));
    }
}
