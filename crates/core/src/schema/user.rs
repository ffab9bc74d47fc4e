//! User entity schema.
//!
//! One canonical rule set serving creation (full mode) and filters,
//! deletes and patches (partial mode). The `id` field is generated by the
//! store and therefore validated only when present, in either mode.

use secrecy::SecretString;
use serde_json::{Map, Value};

use crate::types::{
    DigitStringError, Email, IdentificationNumber, IdentificationTypeId, PhoneNumber, UserId,
};

use super::{bounded_text, codes, FieldError, Mode, ObjectValidator, ValidationErrors};

/// JSON field name of the password (carries an eñe on the wire).
pub const FIELD_CONTRASENA: &str = "contraseña";

/// Maximum length of a display name.
const NOMBRE_MAX: usize = 255;
/// Minimum length of a password.
const CONTRASENA_MIN: usize = 8;

/// A validated, coerced user payload.
///
/// Fields are `Some` when present in the input; full-mode validation
/// guarantees presence of everything except `id`. The password is wrapped
/// in [`SecretString`] so it is redacted from `Debug` output and never
/// serialized.
#[derive(Debug, Clone)]
pub struct UserData {
    pub id: Option<UserId>,
    pub nombre: Option<String>,
    pub correo: Option<Email>,
    pub numero_identificacion: Option<IdentificationNumber>,
    pub contrasena: Option<SecretString>,
    pub identificacion_id: Option<IdentificationTypeId>,
    pub numero_celular: Option<PhoneNumber>,
}

/// Validate a user payload.
///
/// # Errors
///
/// Returns [`ValidationErrors`] describing every failing field. Rule
/// failures on the same field (e.g. several password composition rules)
/// are all reported.
pub fn validate(input: &Map<String, Value>, mode: Mode) -> Result<UserData, ValidationErrors> {
    let mut v = ObjectValidator::new(input, mode);

    let id = v.generated_string("id").and_then(|s| match UserId::parse(s) {
        Ok(id) => Some(id),
        Err(_) => {
            v.push(FieldError::new(
                "id",
                codes::INVALID_FORMAT,
                "El id no es un UUID válido.",
            ));
            None
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

    let numero_identificacion = v.string("numero_identificacion").and_then(|s| {
        match IdentificationNumber::parse(s) {
            Ok(numero) => Some(numero),
            Err(e) => {
                v.push(identification_error(e));
                None
            }
        }
    });

    let contrasena = v
        .string(FIELD_CONTRASENA)
        .and_then(|s| validate_contrasena(&mut v, s));

    let identificacion_id = v.integer("identificacion_id").and_then(|i| {
        if i <= 0 {
            v.push(FieldError::new(
                "identificacion_id",
                codes::TOO_SMALL,
                "El ID de identificación debe ser un número entero positivo.",
            ));
            return None;
        }
        match i32::try_from(i) {
            Ok(i) => Some(IdentificationTypeId::new(i)),
            Err(_) => {
                v.push(FieldError::new(
                    "identificacion_id",
                    codes::TOO_BIG,
                    "El ID de identificación es muy grande.",
                ));
                None
            }
        }
    });

    let numero_celular = v
        .string("numero_celular")
        .and_then(|s| match PhoneNumber::parse(s) {
            Ok(numero) => Some(numero),
            Err(e) => {
                v.push(phone_error(e));
                None
            }
        });

    v.finish(UserData {
        id,
        nombre,
        correo,
        numero_identificacion,
        contrasena,
        identificacion_id,
        numero_celular,
    })
}

/// A complete creation payload: every field present and valid.
///
/// Produced by [`validate_new`]; the generated `id` is never part of a
/// creation payload.
#[derive(Debug, Clone)]
pub struct NewUserData {
    pub nombre: String,
    pub correo: Email,
    pub numero_identificacion: IdentificationNumber,
    pub contrasena: SecretString,
    pub identificacion_id: IdentificationTypeId,
    pub numero_celular: PhoneNumber,
}

/// Validate a creation payload in full mode, yielding non-optional fields.
///
/// # Errors
///
/// Returns [`ValidationErrors`] describing every absent or invalid field.
pub fn validate_new(input: &Map<String, Value>) -> Result<NewUserData, ValidationErrors> {
    let data = validate(input, Mode::Full)?;
    let (
        Some(nombre),
        Some(correo),
        Some(numero_identificacion),
        Some(contrasena),
        Some(identificacion_id),
        Some(numero_celular),
    ) = (
        data.nombre,
        data.correo,
        data.numero_identificacion,
        data.contrasena,
        data.identificacion_id,
        data.numero_celular,
    )
    else {
        // Full mode reports every absent or invalid field as an error.
        unreachable!("full-mode validation guarantees required fields");
    };
    Ok(NewUserData {
        nombre,
        correo,
        numero_identificacion,
        contrasena,
        identificacion_id,
        numero_celular,
    })
}

/// Apply the password composition rules, reporting every violated rule.
fn validate_contrasena(v: &mut ObjectValidator<'_>, s: &str) -> Option<SecretString> {
    let mut ok = true;
    if s.chars().count() < CONTRASENA_MIN {
        v.push(FieldError::new(
            FIELD_CONTRASENA,
            codes::TOO_SMALL,
            "La contraseña debe tener al menos 8 caracteres.",
        ));
        ok = false;
    }
    if !s.chars().any(|c| c.is_ascii_lowercase()) {
        v.push(FieldError::new(
            FIELD_CONTRASENA,
            codes::INVALID_FORMAT,
            "La contraseña debe contener al menos una minúscula.",
        ));
        ok = false;
    }
    if !s.chars().any(|c| c.is_ascii_uppercase()) {
        v.push(FieldError::new(
            FIELD_CONTRASENA,
            codes::INVALID_FORMAT,
            "La contraseña debe contener al menos una mayúscula.",
        ));
        ok = false;
    }
    if !s.chars().any(|c| c.is_ascii_digit()) {
        v.push(FieldError::new(
            FIELD_CONTRASENA,
            codes::INVALID_FORMAT,
            "La contraseña debe contener al menos un número.",
        ));
        ok = false;
    }
    ok.then(|| SecretString::from(s.to_owned()))
}

fn identification_error(e: DigitStringError) -> FieldError {
    match e {
        DigitStringError::TooShort { .. } => FieldError::new(
            "numero_identificacion",
            codes::TOO_SMALL,
            "El número de identificación debe tener al menos 7 dígitos.",
        ),
        DigitStringError::TooLong { .. } => FieldError::new(
            "numero_identificacion",
            codes::TOO_BIG,
            "El número de identificación no puede exceder los 20 dígitos.",
        ),
        DigitStringError::NonDigit => FieldError::new(
            "numero_identificacion",
            codes::INVALID_FORMAT,
            "El número de identificación solo puede contener dígitos.",
        ),
    }
}

fn phone_error(e: DigitStringError) -> FieldError {
    match e {
        DigitStringError::TooShort { .. } => FieldError::new(
            "numero_celular",
            codes::TOO_SMALL,
            "El número de celular debe tener al menos 10 dígitos.",
        ),
        DigitStringError::TooLong { .. } => FieldError::new(
            "numero_celular",
            codes::TOO_BIG,
            "El número de celular no puede exceder los 20 dígitos.",
        ),
        DigitStringError::NonDigit => FieldError::new(
            "numero_celular",
            codes::INVALID_FORMAT,
            "El número de celular solo puede contener dígitos.",
        ),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn full_payload() -> Map<String, Value> {
        obj(json!({
            "nombre": "ana maría",
            "correo": "ana@example.com",
            "numero_identificacion": "10203040",
            "contraseña": "Segura123",
            "identificacion_id": 1,
            "numero_celular": "3001234567"
        }))
    }

    #[test]
    fn test_full_mode_accepts_complete_payload() {
        let data = validate(&full_payload(), Mode::Full).unwrap();
        assert_eq!(data.nombre.as_deref(), Some("ana maría"));
        assert_eq!(data.correo.unwrap().as_str(), "ana@example.com");
        assert_eq!(data.numero_identificacion.unwrap().as_str(), "10203040");
        assert_eq!(data.contrasena.unwrap().expose_secret(), "Segura123");
        assert_eq!(data.identificacion_id.unwrap().as_i32(), 1);
        assert_eq!(data.numero_celular.unwrap().as_str(), "3001234567");
        assert!(data.id.is_none());
    }

    #[test]
    fn test_full_mode_does_not_require_id() {
        // Creation payloads never carry an id; it is generated by the store.
        assert!(validate(&full_payload(), Mode::Full).is_ok());
    }

    #[test]
    fn test_full_mode_requires_every_other_field() {
        let err = validate(&obj(json!({})), Mode::Full).unwrap_err();
        let mut fields: Vec<&str> = err
            .errors()
            .iter()
            .map(|e| e.path[0].as_str())
            .collect();
        fields.sort_unstable();
        assert_eq!(
            fields,
            vec![
                "contraseña",
                "correo",
                "identificacion_id",
                "nombre",
                "numero_celular",
                "numero_identificacion",
            ]
        );
        assert!(err.errors().iter().all(|e| e.message == "Required"));
    }

    #[test]
    fn test_partial_mode_validates_only_present_fields() {
        let data = validate(
            &obj(json!({"numero_identificacion": "10203040"})),
            Mode::Partial,
        )
        .unwrap();
        assert!(data.numero_identificacion.is_some());
        assert!(data.nombre.is_none());
        assert!(data.correo.is_none());
    }

    #[test]
    fn test_partial_mode_still_rejects_invalid_present_field() {
        let err = validate(
            &obj(json!({"numero_identificacion": "123"})),
            Mode::Partial,
        )
        .unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].path, vec!["numero_identificacion"]);
        assert_eq!(err.errors()[0].code, codes::TOO_SMALL);
    }

    #[test]
    fn test_short_identification_cites_minimum_rule() {
        let mut input = full_payload();
        input.insert("numero_identificacion".into(), json!("12345"));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        let e = &err.errors()[0];
        assert_eq!(e.path, vec!["numero_identificacion"]);
        assert_eq!(e.code, codes::TOO_SMALL);
        assert!(e.message.contains("al menos 7"));
    }

    #[test]
    fn test_password_without_digit_identifies_contrasena() {
        let mut input = full_payload();
        input.insert(FIELD_CONTRASENA.into(), json!("SinNumeros"));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].path, vec![FIELD_CONTRASENA]);
        assert!(err.errors()[0].message.contains("un número"));
    }

    #[test]
    fn test_password_without_uppercase() {
        let mut input = full_payload();
        input.insert(FIELD_CONTRASENA.into(), json!("minuscula1"));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert!(err.errors()[0].message.contains("mayúscula"));
    }

    #[test]
    fn test_password_without_lowercase() {
        let mut input = full_payload();
        input.insert(FIELD_CONTRASENA.into(), json!("MAYUSCULA1"));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert!(err.errors()[0].message.contains("minúscula"));
    }

    #[test]
    fn test_short_password_reports_every_violated_rule() {
        let mut input = full_payload();
        input.insert(FIELD_CONTRASENA.into(), json!("abc"));
        let err = validate(&input, Mode::Full).unwrap_err();
        // Too short, no uppercase, no digit.
        assert_eq!(err.errors().len(), 3);
        assert!(err.errors().iter().all(|e| e.path == vec![FIELD_CONTRASENA]));
    }

    #[test]
    fn test_identificacion_id_must_be_positive() {
        let mut input = full_payload();
        input.insert("identificacion_id".into(), json!(0));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert_eq!(err.errors()[0].code, codes::TOO_SMALL);
        assert!(err.errors()[0].message.contains("positivo"));
    }

    #[test]
    fn test_identificacion_id_wrong_type() {
        let mut input = full_payload();
        input.insert("identificacion_id".into(), json!("1"));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert_eq!(err.errors()[0].code, codes::INVALID_TYPE);
        assert_eq!(err.errors()[0].expected, Some("number"));
    }

    #[test]
    fn test_invalid_id_format() {
        let err = validate(&obj(json!({"id": "no-uuid"})), Mode::Partial).unwrap_err();
        assert_eq!(err.errors()[0].path, vec!["id"]);
        assert_eq!(err.errors()[0].code, codes::INVALID_FORMAT);
    }

    #[test]
    fn test_valid_id_accepted_in_partial_mode() {
        let data = validate(
            &obj(json!({"id": "11111111-2222-3333-4444-555555555555"})),
            Mode::Partial,
        )
        .unwrap();
        assert!(data.id.is_some());
    }

    #[test]
    fn test_invalid_correo() {
        let mut input = full_payload();
        input.insert("correo".into(), json!("no-es-correo"));
        let err = validate(&input, Mode::Full).unwrap_err();
        assert_eq!(err.errors()[0].path, vec!["correo"]);
        assert_eq!(err.errors()[0].code, codes::INVALID_FORMAT);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut input = full_payload();
        input.insert("rol".into(), json!("admin"));
        assert!(validate(&input, Mode::Full).is_ok());
    }

    #[test]
    fn test_validate_new_yields_concrete_fields() {
        let data = validate_new(&full_payload()).unwrap();
        assert_eq!(data.nombre, "ana maría");
        assert_eq!(data.correo.as_str(), "ana@example.com");
        assert_eq!(data.contrasena.expose_secret(), "Segura123");
    }

    #[test]
    fn test_validate_new_rejects_incomplete_payload() {
        let mut input = full_payload();
        input.remove("correo");
        let err = validate_new(&input).unwrap_err();
        assert_eq!(err.errors()[0].path, vec!["correo"]);
        assert_eq!(err.errors()[0].message, "Required");
    }

    #[test]
    fn test_multiple_invalid_fields_all_reported() {
        let err = validate(
            &obj(json!({
                "nombre": "",
                "correo": "x",
                "numero_identificacion": "abc1234",
                "contraseña": "Segura123",
                "identificacion_id": 1,
                "numero_celular": "3001234567"
            })),
            Mode::Full,
        )
        .unwrap_err();
        let fields: Vec<&str> = err.errors().iter().map(|e| e.path[0].as_str()).collect();
        assert!(fields.contains(&"nombre"));
        assert!(fields.contains(&"correo"));
        assert!(fields.contains(&"numero_identificacion"));
    }
}
