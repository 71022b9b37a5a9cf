use crate::shape::Shape;

/// Structural snapshot of a shape: field names and declared type names.
///
/// Diagnostic surface only — it never carries field values, and the mapper
/// never consults it. Useful for logging what two shapes share before
/// wiring a conversion, or for exporting a shape's layout to tooling.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

/// A single field in a schema report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub name: String,
    /// Declared type as written (`Option<i32>`, `HashMap<String, i64>`).
    /// Names are for humans; the mapper matches on `TypeId`, not on this.
    pub type_name: String,
}

/// Build the schema report for a shape. Fields in declaration order.
pub fn schema_of<S: Shape>() -> Schema {
    Schema {
        fields: S::fields()
            .iter()
            .map(|f| Field {
                name: f.name().to_string(),
                type_name: f.type_name().to_string(),
            })
            .collect(),
    }
}

impl Schema {
    /// Names of the fields this schema shares with `other` by
    /// (name, type name) — the fields a conversion would copy, assuming
    /// type names are not aliased.
    pub fn matched(&self, other: &Schema) -> Vec<String> {
        self.fields
            .iter()
            .filter(|f| other.fields.contains(f))
            .map(|f| f.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, Schema};

    fn schema(fields: &[(&str, &str)]) -> Schema {
        Schema {
            fields: fields
                .iter()
                .map(|(name, type_name)| Field {
                    name: name.to_string(),
                    type_name: type_name.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn matched_requires_name_and_type_name() {
        let a = schema(&[("id", "i64"), ("name", "String"), ("age", "i32")]);
        let b = schema(&[("id", "i64"), ("name", "String"), ("age", "i64")]);

        assert_eq!(a.matched(&b), vec!["id".to_string(), "name".to_string()]);
    }

    #[test]
    fn matched_is_empty_for_disjoint_shapes() {
        let a = schema(&[("id", "i64")]);
        let b = schema(&[("uid", "i64")]);
        assert!(a.matched(&b).is_empty());
    }
}
