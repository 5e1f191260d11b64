//! Doctor wire model and export projection.
//!
//! A doctor is backed by a linked user account on the server
//! (`usuarioId`); the account is created first and the doctor references
//! it. The `password` field only travels on create/update payloads and is
//! never rendered or exported.

use crate::{full_name, Exportable};
use clinident_types::{ExportRecord, FieldValue, Fields};
use serde::{Deserialize, Serialize};

/// A clinic doctor as served by `GET /api/medicos`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub numero_documento: String,
    pub nombre: String,
    pub apellido: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    pub especialidad: String,
    #[serde(default)]
    pub rol_id: Option<i64>,
    /// Id of the linked user account, assigned by the server.
    #[serde(default)]
    pub usuario_id: Option<i64>,
    /// Only present on outbound create/update payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Doctor {
    /// Display name used in lists and notifications.
    pub fn display_name(&self) -> String {
        full_name(&self.nombre, &self.apellido)
    }
}

impl Fields for Doctor {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "numeroDocumento" => Some(self.numero_documento.as_str().into()),
            "nombre" => Some(self.nombre.as_str().into()),
            "apellido" => Some(self.apellido.as_str().into()),
            "email" => Some(self.email.clone().into()),
            "telefono" => Some(self.telefono.clone().into()),
            "direccion" => Some(self.direccion.clone().into()),
            "especialidad" => Some(self.especialidad.as_str().into()),
            "rolId" => Some(self.rol_id.into()),
            "usuarioId" => Some(self.usuario_id.into()),
            _ => None,
        }
    }
}

impl Exportable for Doctor {
    fn entity_name() -> &'static str {
        "medicos"
    }

    fn export_headers() -> &'static [&'static str] {
        &[
            "Número de Documento",
            "Nombre",
            "Apellido",
            "Nombre Completo",
            "Email",
            "Teléfono",
            "Especialidad",
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
            ("Especialidad".into(), self.especialidad.clone()),
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

    #[test]
    fn password_never_serializes_when_absent() {
        let doctor = Doctor {
            id: Some(3),
            numero_documento: "0911223344".into(),
            nombre: "Luis".into(),
            apellido: "Mora".into(),
            email: None,
            telefono: None,
            direccion: None,
            especialidad: "Ortodoncia".into(),
            rol_id: Some(2),
            usuario_id: Some(12),
            password: None,
        };
        let json = serde_json::to_string(&doctor).expect("encode doctor");
        assert!(!json.contains("password"));
        assert!(json.contains("\"usuarioId\":12"));
    }

    #[test]
    fn decodes_linked_account_id() {
        let json = r#"{
            "id": 3,
            "numeroDocumento": "0911223344",
            "nombre": "Luis",
            "apellido": "Mora",
            "especialidad": "Ortodoncia",
            "usuarioId": 12
        }"#;
        let doctor: Doctor = serde_json::from_str(json).expect("decode doctor");
        assert_eq!(doctor.usuario_id, Some(12));
        assert_eq!(doctor.field_text("especialidad"), "Ortodoncia");
    }
}
