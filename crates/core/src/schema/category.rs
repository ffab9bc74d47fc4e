//! Category entity schema.
//!
//! Categories are created from a single `nombre` and deleted by integer
//! id, so handlers use partial mode almost exclusively. The `id` field is
//! generated by the store and validated only when present.

use serde_json::{Map, Value};

use crate::types::CategoryId;

use super::{bounded_text, codes, FieldError, Mode, ObjectValidator, ValidationErrors};

/// Maximum length of a category name.
const NOMBRE_MAX: usize = 255;

/// A validated, coerced category payload.
#[derive(Debug, Clone)]
pub struct CategoryData {
    pub id: Option<CategoryId>,
    pub nombre: Option<String>,
    pub activa: Option<bool>,
}

/// Validate a category payload.
///
/// # Errors
///
/// Returns [`ValidationErrors`] describing every failing field.
pub fn validate(input: &Map<String, Value>, mode: Mode) -> Result<CategoryData, ValidationErrors> {
    let mut v = ObjectValidator::new(input, mode);

    let id = v.generated_integer("id").and_then(|i| {
        match i32::try_from(i) {
            Ok(i) => Some(CategoryId::new(i)),
            Err(_) => {
                v.push(FieldError::new(
                    "id",
                    codes::TOO_BIG,
                    "El id es muy grande.",
                ));
                None
            }
        }
    });

    let nombre = v.string("nombre").and_then(|s| {
        bounded_text(
            &mut v,
            "nombre",
            s,
            NOMBRE_MAX,
            "El nombre es obligatorio",
            "El nombre es muy largo",
        )
    });

    let activa = v.boolean("activa");

    v.finish(CategoryData { id, nombre, activa })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_partial_nombre_only() {
        let data = validate(&obj(json!({"nombre": "insumos médicos"})), Mode::Partial).unwrap();
        assert_eq!(data.nombre.as_deref(), Some("insumos médicos"));
        assert!(data.id.is_none());
        assert!(data.activa.is_none());
    }

    #[test]
    fn test_partial_id_only() {
        let data = validate(&obj(json!({"id": 4})), Mode::Partial).unwrap();
        assert_eq!(data.id.unwrap().as_i32(), 4);
    }

    #[test]
    fn test_id_wrong_type() {
        let err = validate(&obj(json!({"id": "cuatro"})), Mode::Partial).unwrap_err();
        let e = &err.errors()[0];
        assert_eq!(e.path, vec!["id"]);
        assert_eq!(e.code, codes::INVALID_TYPE);
        assert_eq!(e.expected, Some("number"));
        assert_eq!(e.message, "Invalid input: expected number, received string");
    }

    #[test]
    fn test_empty_nombre_rejected() {
        let err = validate(&obj(json!({"nombre": ""})), Mode::Partial).unwrap_err();
        assert_eq!(err.errors()[0].code, codes::TOO_SMALL);
        assert_eq!(err.errors()[0].message, "El nombre es obligatorio");
    }

    #[test]
    fn test_long_nombre_rejected() {
        let err = validate(
            &obj(json!({"nombre": "x".repeat(256)})),
            Mode::Partial,
        )
        .unwrap_err();
        assert_eq!(err.errors()[0].code, codes::TOO_BIG);
    }

    #[test]
    fn test_activa_wrong_type() {
        let err = validate(&obj(json!({"activa": "si"})), Mode::Partial).unwrap_err();
        assert_eq!(err.errors()[0].expected, Some("boolean"));
    }

    #[test]
    fn test_full_mode_requires_nombre_and_activa() {
        let err = validate(&obj(json!({})), Mode::Full).unwrap_err();
        let mut fields: Vec<&str> = err.errors().iter().map(|e| e.path[0].as_str()).collect();
        fields.sort_unstable();
        assert_eq!(fields, vec!["activa", "nombre"]);
    }
}
