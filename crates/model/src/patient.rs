//! Patient wire model and export projection.

use crate::{full_name, Exportable};
use clinident_types::{ExportRecord, FieldValue, Fields};
use serde::{Deserialize, Serialize};

/// A clinic patient as served by `GET /api/pacientes`.
///
/// `id` is absent on a create payload and assigned by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub numero_documento: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    /// ISO date string (`YYYY-MM-DD`).
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub genero: Option<String>,
}

impl Patient {
    /// Display name used in lists and notifications.
    pub fn display_name(&self) -> String {
        full_name(&self.nombre, &self.apellido)
    }
}

impl Fields for Patient {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "numeroDocumento" => Some(self.numero_documento.as_str().into()),
            "nombre" => Some(self.nombre.as_str().into()),
            "apellido" => Some(self.apellido.as_str().into()),
            "email" => Some(self.email.clone().into()),
            "telefono" => Some(self.telefono.clone().into()),
            "fechaNacimiento" => Some(self.fecha_nacimiento.clone().into()),
            "direccion" => Some(self.direccion.clone().into()),
            "genero" => Some(self.genero.clone().into()),
            _ => None,
        }
    }
}

impl Exportable for Patient {
    fn entity_name() -> &'static str {
        "pacientes"
    }

    fn export_headers() -> &'static [&'static str] {
        &[
            "Número de Documento",
            "Nombre",
            "Apellido",
            "Nombre Completo",
            "Email",
            "Teléfono",
            "Fecha de Nacimiento",
            "Dirección",
            "ID",
        ]
    }

    fn export_row(&self) -> ExportRecord {
        vec![
            (
                "Número de Documento".into(),
                self.numero_documento.clone(),
            ),
            ("Nombre".into(), self.nombre.clone()),
            ("Apellido".into(), self.apellido.clone()),
            ("Nombre Completo".into(), self.display_name()),
            ("Email".into(), self.email.clone().unwrap_or_default()),
            ("Teléfono".into(), self.telefono.clone().unwrap_or_default()),
            (
                "Fecha de Nacimiento".into(),
                self.fecha_nacimiento.clone().unwrap_or_default(),
            ),
            (
                "Dirección".into(),
                self.direccion.clone().unwrap_or_default(),
            ),
            (
                "ID".into(),
                self.id.map(|id| id.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Patient {
        Patient {
            id: Some(7),
            numero_documento: "0102030405".into(),
            nombre: "Sarah".into(),
            apellido: "Williams".into(),
            email: Some("sarah@example.com".into()),
            telefono: None,
            fecha_nacimiento: Some("1992-03-20".into()),
            direccion: None,
            genero: Some("F".into()),
        }
    }

    #[test]
    fn decodes_camel_case_wire_fields() {
        let json = r#"{
            "id": 7,
            "numeroDocumento": "0102030405",
            "nombre": "Sarah",
            "apellido": "Williams",
            "fechaNacimiento": "1992-03-20",
            "genero": "F"
        }"#;
        let patient: Patient = serde_json::from_str(json).expect("decode patient");
        assert_eq!(patient.numero_documento, "0102030405");
        assert_eq!(patient.fecha_nacimiento.as_deref(), Some("1992-03-20"));
        assert_eq!(patient.email, None);
    }

    #[test]
    fn create_payload_omits_id() {
        let mut patient = sample();
        patient.id = None;
        let json = serde_json::to_string(&patient).expect("encode patient");
        assert!(!json.contains("\"id\""));
        assert!(json.contains("\"numeroDocumento\""));
    }

    #[test]
    fn fields_lookup_uses_wire_names() {
        let patient = sample();
        assert_eq!(patient.field_text("numeroDocumento"), "0102030405");
        assert_eq!(patient.field_text("telefono"), "");
        assert_eq!(patient.field("inexistente"), None);
    }

    #[test]
    fn export_row_follows_header_order() {
        let patient = sample();
        let row = patient.export_row();
        let labels: Vec<&str> = row.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, Patient::export_headers());
        assert_eq!(row[3].1, "Sarah Williams");
        assert_eq!(row[8].1, "7");
    }
}
