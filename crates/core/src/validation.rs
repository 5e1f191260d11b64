//! Client-side input validation.
//!
//! Synchronous checks run before a create/update request is assembled, so
//! obviously incomplete forms never reach the wire. The remote API remains
//! the source of truth for authoritative validation. Problems accumulate,
//! so the user sees every missing field at once, not one per attempt.

use clinident_model::{Doctor, Patient};
use clinident_types::RequiredText;
use regex::Regex;
use std::sync::OnceLock;

/// One or more validation problems, in field order.
#[derive(Debug, thiserror::Error)]
#[error("{}", .issues.join("; "))]
pub struct ValidationErrors {
    pub issues: Vec<String>,
}

pub type ValidationResult = std::result::Result<(), ValidationErrors>;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Permissive on purpose: something@something.tld. The server decides.
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Whether `email` looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

fn require(issues: &mut Vec<String>, value: &str, message: &str) {
    if RequiredText::new(value).is_err() {
        issues.push(message.to_owned());
    }
}

fn require_opt(issues: &mut Vec<String>, value: Option<&str>, message: &str) {
    require(issues, value.unwrap_or(""), message);
}

/// Validate a doctor create/update form.
pub fn validate_doctor(doctor: &Doctor) -> ValidationResult {
    let mut issues = Vec::new();

    require(
        &mut issues,
        &doctor.numero_documento,
        "el número de documento es requerido",
    );
    require(&mut issues, &doctor.nombre, "el nombre es requerido");
    require(&mut issues, &doctor.apellido, "el apellido es requerido");
    match doctor.email.as_deref() {
        None | Some("") => issues.push("el email es requerido".to_owned()),
        Some(email) if !is_valid_email(email) => {
            issues.push("el email no tiene un formato válido".to_owned())
        }
        Some(_) => {}
    }
    require_opt(
        &mut issues,
        doctor.telefono.as_deref(),
        "el teléfono es requerido",
    );
    require(
        &mut issues,
        &doctor.especialidad,
        "la especialidad es requerida",
    );
    if doctor.rol_id.is_none() {
        issues.push("el rol es requerido".to_owned());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { issues })
    }
}

/// Validate a patient create/update form.
pub fn validate_patient(patient: &Patient) -> ValidationResult {
    let mut issues = Vec::new();

    require(
        &mut issues,
        &patient.numero_documento,
        "el número de documento es requerido",
    );
    require(&mut issues, &patient.nombre, "el nombre es requerido");
    require(&mut issues, &patient.apellido, "el apellido es requerido");
    require_opt(
        &mut issues,
        patient.direccion.as_deref(),
        "la dirección es requerida",
    );
    require_opt(
        &mut issues,
        patient.genero.as_deref(),
        "el género es requerido",
    );
    if let Some(email) = patient.email.as_deref() {
        if !email.is_empty() && !is_valid_email(email) {
            issues.push("el email no tiene un formato válido".to_owned());
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { issues })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_doctor() -> Doctor {
        Doctor {
            id: None,
            numero_documento: String::new(),
            nombre: String::new(),
            apellido: String::new(),
            email: None,
            telefono: None,
            direccion: None,
            especialidad: String::new(),
            rol_id: None,
            usuario_id: None,
            password: None,
        }
    }

    #[test]
    fn accumulates_every_missing_doctor_field() {
        let err = validate_doctor(&blank_doctor()).expect_err("must fail");
        assert_eq!(err.issues.len(), 7);
        assert!(err.issues[0].contains("número de documento"));
        assert!(err.to_string().contains("; "));
    }

    #[test]
    fn rejects_malformed_email_only_once_required_fields_pass() {
        let mut doctor = blank_doctor();
        doctor.numero_documento = "0911223344".into();
        doctor.nombre = "Luis".into();
        doctor.apellido = "Mora".into();
        doctor.email = Some("not-an-email".into());
        doctor.telefono = Some("0990000000".into());
        doctor.especialidad = "Endodoncia".into();
        doctor.rol_id = Some(2);

        let err = validate_doctor(&doctor).expect_err("must fail");
        assert_eq!(err.issues, vec!["el email no tiene un formato válido"]);

        doctor.email = Some("luis@clinica.ec".into());
        assert!(validate_doctor(&doctor).is_ok());
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let mut doctor = blank_doctor();
        doctor.numero_documento = "   ".into();
        doctor.nombre = "\t".into();

        let err = validate_doctor(&doctor).expect_err("must fail");
        assert!(err.issues.iter().any(|i| i.contains("número de documento")));
        assert!(err.issues.iter().any(|i| i == "el nombre es requerido"));
    }

    #[test]
    fn patient_email_is_optional_but_checked_when_present() {
        let mut patient = Patient {
            id: None,
            numero_documento: "0102030405".into(),
            nombre: "Sarah".into(),
            apellido: "Williams".into(),
            email: None,
            telefono: None,
            fecha_nacimiento: None,
            direccion: Some("Av. Amazonas 10".into()),
            genero: Some("F".into()),
        };
        assert!(validate_patient(&patient).is_ok());

        patient.email = Some("broken@".into());
        assert!(validate_patient(&patient).is_err());
    }

    #[test]
    fn email_shape_checks() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
    }
}
