use crate::models::domain::{FieldKind, ObjectSchema, SchemaField, SchemaNode};

/// Builder rows rendered from a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRows {
    pub fields: Vec<SchemaField>,
    pub truncated: bool,
}

/// Builds an object schema from builder rows.
///
/// Rows without a name are skipped so a half-filled row never breaks
/// generation. A repeated name overwrites the earlier property.
pub fn fields_to_schema(fields: &[SchemaField]) -> ObjectSchema {
    let mut schema = ObjectSchema::default();

    for field in fields {
        let name = field.name.trim();
        if name.is_empty() {
            continue;
        }

        let node = match field.kind {
            FieldKind::String => SchemaNode::String,
            FieldKind::Number => SchemaNode::Number,
            FieldKind::Boolean => SchemaNode::Boolean,
            FieldKind::List => SchemaNode::list(),
            FieldKind::Object => SchemaNode::Object(fields_to_schema(&field.children)),
        };
        schema.properties.insert(name.to_string(), node);

        if field.required && !schema.is_required(name) {
            schema.required.push(name.to_string());
        }
    }

    schema
}

/// Renders a schema as builder rows, expanding one level of nested objects.
pub fn schema_to_fields(schema: &ObjectSchema) -> FieldRows {
    let mut truncated = false;
    let fields = rows_for(schema, 0, &mut truncated);
    FieldRows { fields, truncated }
}

const MAX_DEPTH: usize = 1;

fn rows_for(schema: &ObjectSchema, depth: usize, truncated: &mut bool) -> Vec<SchemaField> {
    if schema.properties.is_empty() {
        return vec![SchemaField::placeholder()];
    }

    schema
        .properties
        .iter()
        .map(|(name, node)| {
            let required = schema.is_required(name);
            match node {
                SchemaNode::String => SchemaField::new(name, FieldKind::String, required),
                SchemaNode::Number => SchemaField::new(name, FieldKind::Number, required),
                SchemaNode::Boolean => SchemaField::new(name, FieldKind::Boolean, required),
                SchemaNode::List { .. } => SchemaField::new(name, FieldKind::List, required),
                SchemaNode::Object(inner) if depth < MAX_DEPTH => {
                    SchemaField::object(name, required, rows_for(inner, depth + 1, truncated))
                }
                SchemaNode::Object(inner) => {
                    if !inner.properties.is_empty() {
                        *truncated = true;
                    }
                    SchemaField::object(name, required, Vec::new())
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{case_study_fields, summary_fields};
    use serde_json::json;

    fn strip(fields: &[SchemaField]) -> Vec<(String, FieldKind, bool, Vec<SchemaField>)> {
        fields
            .iter()
            .map(|f| (f.name.clone(), f.kind, f.required, f.children.clone()))
            .collect()
    }

    #[test]
    fn test_fields_to_schema_basic() {
        let schema = fields_to_schema(&summary_fields());

        assert_eq!(
            schema.to_value(),
            json!({
                "type": "object",
                "properties": {
                    "summary": { "type": "string" },
                    "keyword": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["summary", "keyword"]
            })
        );
    }

    #[test]
    fn test_round_trip_preserves_names_types_required() {
        let fields = case_study_fields();
        let rows = schema_to_fields(&fields_to_schema(&fields));

        assert!(!rows.truncated);
        assert_eq!(strip(&rows.fields), strip(&fields));
    }

    #[test]
    fn test_required_consistency() {
        let fields = vec![
            SchemaField::new("a", FieldKind::String, true),
            SchemaField::new("b", FieldKind::Number, false),
            SchemaField::new("c", FieldKind::Boolean, true),
        ];
        let schema = fields_to_schema(&fields);
        assert_eq!(schema.required, vec!["a", "c"]);
        assert!(!schema.is_required("b"));
        assert!(!schema.is_required("missing"));
    }

    #[test]
    fn test_unnamed_rows_are_skipped() {
        let fields = vec![
            SchemaField::new("", FieldKind::String, true),
            SchemaField::new("   ", FieldKind::Number, true),
            SchemaField::new("kept", FieldKind::String, false),
        ];
        let schema = fields_to_schema(&fields);
        assert_eq!(schema.properties.len(), 1);
        assert!(schema.required.is_empty());
    }

    #[test]
    fn test_duplicate_names_overwrite() {
        let fields = vec![
            SchemaField::new("x", FieldKind::String, true),
            SchemaField::new("x", FieldKind::Number, true),
        ];
        let schema = fields_to_schema(&fields);
        assert_eq!(schema.properties.len(), 1);
        assert_eq!(schema.properties["x"], SchemaNode::Number);
        assert_eq!(schema.required, vec!["x"]);
    }

    #[test]
    fn test_children_of_non_object_are_ignored() {
        let mut field = SchemaField::new("tags", FieldKind::List, false);
        field.children.push(SchemaField::new("ignored", FieldKind::String, false));

        let schema = fields_to_schema(&[field]);
        assert_eq!(schema.properties["tags"], SchemaNode::list());
    }

    #[test]
    fn test_empty_schema_renders_one_placeholder_row() {
        let rows = schema_to_fields(&ObjectSchema::default());
        assert_eq!(rows.fields, vec![SchemaField::placeholder()]);

        let back = fields_to_schema(&rows.fields);
        assert!(back.properties.is_empty());
        assert_eq!(back.to_value(), json!({ "type": "object", "properties": {} }));
    }

    #[test]
    fn test_list_element_type_is_not_preserved() {
        let schema = ObjectSchema::from_value(&json!({
            "type": "object",
            "properties": {
                "scores": { "type": "array", "items": { "type": "number" } }
            }
        }))
        .unwrap();

        let rows = schema_to_fields(&schema);
        assert_eq!(rows.fields[0].kind, FieldKind::List);
        assert_eq!(
            fields_to_schema(&rows.fields).to_value()["properties"]["scores"],
            json!({ "type": "array", "items": { "type": "string" } })
        );
    }

    #[test]
    fn test_deep_nesting_is_truncated() {
        let schema = ObjectSchema::from_value(&json!({
            "type": "object",
            "properties": {
                "story": {
                    "type": "object",
                    "properties": {
                        "founder": {
                            "type": "object",
                            "properties": { "name": { "type": "string" } }
                        },
                        "background": { "type": "string" }
                    },
                    "required": ["background"]
                }
            }
        }))
        .unwrap();

        let rows = schema_to_fields(&schema);
        assert!(rows.truncated);

        let story = &rows.fields[0];
        assert_eq!(story.kind, FieldKind::Object);
        assert_eq!(story.children.len(), 2);
        assert_eq!(story.children[0].name, "founder");
        assert!(story.children[0].children.is_empty());
        assert!(story.children[1].required);
    }

    #[test]
    fn test_missing_required_means_nothing_required() {
        let schema = ObjectSchema::from_value(&json!({
            "type": "object",
            "properties": { "a": { "type": "string" }, "b": { "type": "boolean" } }
        }))
        .unwrap();

        let rows = schema_to_fields(&schema);
        assert!(rows.fields.iter().all(|f| !f.required));
    }
}
