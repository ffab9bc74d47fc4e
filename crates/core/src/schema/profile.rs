//! Shipping-profile entity schema.
//!
//! The profile update touches the user's contact fields (`correo`,
//! `numero_celular`) and the shipping address in one payload, so a single
//! schema covers both. The PUT handler uses full mode.

use serde_json::{Map, Value};

use crate::types::{Email, PhoneNumber};

use super::{bounded_text, codes, FieldError, Mode, ObjectValidator, ValidationErrors};

/// Maximum length of an address field.
const CAMPO_MAX: usize = 255;

/// A validated, coerced shipping-profile payload.
#[derive(Debug, Clone)]
pub struct ProfileData {
    pub correo: Option<Email>,
    pub numero_celular: Option<PhoneNumber>,
    pub ciudad: Option<String>,
    pub barrio: Option<String>,
    pub direccion: Option<String>,
    pub codigo_postal: Option<String>,
}

/// Validate a shipping-profile payload.
///
/// # Errors
///
/// Returns [`ValidationErrors`] describing every failing field.
pub fn validate(input: &Map<String, Value>, mode: Mode) -> Result<ProfileData, ValidationErrors> {
    let mut v = ObjectValidator::new(input, mode);

    let correo = v.string("correo").and_then(|s| match Email::parse(s) {
        Ok(email) => Some(email),
        Err(_) => {
            v.push(FieldError::new(
                "correo",
                codes::INVALID_FORMAT,
                "El correo electrónico no es válido",
            ));
            None
        }
    });

    let numero_celular = v
        .string("numero_celular")
        .and_then(|s| match PhoneNumber::parse(s) {
            Ok(numero) => Some(numero),
            Err(_) => {
                v.push(FieldError::new(
                    "numero_celular",
                    codes::INVALID_FORMAT,
                    "El número de celular no es válido.",
                ));
                None
            }
        });

    let ciudad = v.string("ciudad").and_then(|s| {
        bounded_text(
            &mut v,
            "ciudad",
            s,
            CAMPO_MAX,
            "La ciudad es obligatoria",
            "La ciudad es muy larga",
        )
    });

    let barrio = v.string("barrio").and_then(|s| {
        bounded_text(
            &mut v,
            "barrio",
            s,
            CAMPO_MAX,
            "El barrio es obligatorio",
            "El barrio es muy largo",
        )
    });

    let direccion = v.string("direccion").and_then(|s| {
        bounded_text(
            &mut v,
            "direccion",
            s,
            CAMPO_MAX,
            "La dirección es obligatoria",
            "La dirección es muy larga",
        )
    });

    let codigo_postal = v.string("codigo_postal").and_then(|s| {
        bounded_text(
            &mut v,
            "codigo_postal",
            s,
            CAMPO_MAX,
            "El código postal es obligatorio",
            "El código postal es muy largo",
        )
    });

    v.finish(ProfileData {
        correo,
        numero_celular,
        ciudad,
        barrio,
        direccion,
        codigo_postal,
    })
}

/// A complete profile-update payload: every field present and valid.
#[derive(Debug, Clone)]
pub struct ProfileUpdateData {
    pub correo: Email,
    pub numero_celular: PhoneNumber,
    pub ciudad: String,
    pub barrio: String,
    pub direccion: String,
    pub codigo_postal: String,
}

/// Validate a profile-update payload in full mode, yielding non-optional
/// fields.
///
/// # Errors
///
/// Returns [`ValidationErrors`] describing every absent or invalid field.
pub fn validate_update(input: &Map<String, Value>) -> Result<ProfileUpdateData, ValidationErrors> {
    let data = validate(input, Mode::Full)?;
    let (
        Some(correo),
        Some(numero_celular),
        Some(ciudad),
        Some(barrio),
        Some(direccion),
        Some(codigo_postal),
    ) = (
        data.correo,
        data.numero_celular,
        data.ciudad,
        data.barrio,
        data.direccion,
        data.codigo_postal,
    )
    else {
        // Full mode reports every absent or invalid field as an error.
        unreachable!("full-mode validation guarantees required fields");
    };
    Ok(ProfileUpdateData {
        correo,
        numero_celular,
        ciudad,
        barrio,
        direccion,
        codigo_postal,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn full_payload() -> Map<String, Value> {
        obj(json!({
            "correo": "ana@example.com",
            "numero_celular": "3001234567",
            "ciudad": "Bogotá",
            "barrio": "Chapinero",
            "direccion": "Calle 45 # 13-25",
            "codigo_postal": "110231"
        }))
    }

    #[test]
    fn test_full_mode_accepts_complete_payload() {
        let data = validate(&full_payload(), Mode::Full).unwrap();
        assert_eq!(data.ciudad.as_deref(), Some("Bogotá"));
        assert_eq!(data.codigo_postal.as_deref(), Some("110231"));
    }

    #[test]
    fn test_full_mode_requires_every_field() {
        let err = validate(&obj(json!({})), Mode::Full).unwrap_err();
        assert_eq!(err.errors().len(), 6);
        assert!(err.errors().iter().all(|e| e.message == "Required"));
    }

    #[test]
    fn test_empty_address_fields_rejected() {
        let mut input = full_payload();
        input.insert("ciudad".into(), json!(""));
        input.insert("barrio".into(), json!(""));
        let err = validate(&input, Mode::Full).unwrap_err();
        let fields: Vec<&str> = err.errors().iter().map(|e| e.path[0].as_str()).collect();
        assert_eq!(fields, vec!["ciudad", "barrio"]);
        assert!(err.errors().iter().all(|e| e.code == codes::TOO_SMALL));
    }

    #[test]
    fn test_long_direccion_rejected() {
        let mut input = full_payload();
        input.insert("direccion".into(), json!("x".repeat(256)));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert_eq!(err.errors()[0].path, vec!["direccion"]);
        assert_eq!(err.errors()[0].code, codes::TOO_BIG);
    }

    #[test]
    fn test_partial_mode_for_patches() {
        let data = validate(&obj(json!({"ciudad": "Medellín"})), Mode::Partial).unwrap();
        assert_eq!(data.ciudad.as_deref(), Some("Medellín"));
        assert!(data.correo.is_none());
    }

    #[test]
    fn test_validate_update_yields_concrete_fields() {
        let data = validate_update(&full_payload()).unwrap();
        assert_eq!(data.correo.as_str(), "ana@example.com");
        assert_eq!(data.barrio, "Chapinero");
    }

    #[test]
    fn test_validate_update_rejects_missing_field() {
        let mut input = full_payload();
        input.remove("codigo_postal");
        let err = validate_update(&input).unwrap_err();
        assert_eq!(err.errors()[0].path, vec!["codigo_postal"]);
    }

    #[test]
    fn test_invalid_celular_format() {
        let mut input = full_payload();
        input.insert("numero_celular".into(), json!("no-digitos"));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert_eq!(err.errors()[0].path, vec!["numero_celular"]);
        assert_eq!(err.errors()[0].code, codes::INVALID_FORMAT);
    }
}
