//! Bank account wire model.

use crate::Exportable;
use clinident_types::{ExportRecord, FieldValue, Fields};
use serde::{Deserialize, Serialize};

/// A clinic bank account as served by `GET /api/bancos`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nombre: String,
    #[serde(default)]
    pub codigo: Option<String>,
    #[serde(default)]
    pub numero_cuenta: Option<String>,
    #[serde(default)]
    pub tipo_cuenta: Option<String>,
}

impl Fields for Bank {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "nombre" => Some(self.nombre.as_str().into()),
            "codigo" => Some(self.codigo.clone().into()),
            "numeroCuenta" => Some(self.numero_cuenta.clone().into()),
            "tipoCuenta" => Some(self.tipo_cuenta.clone().into()),
            _ => None,
        }
    }
}

impl Exportable for Bank {
    fn entity_name() -> &'static str {
        "bancos"
    }

    fn export_headers() -> &'static [&'static str] {
        &["Nombre", "Código", "Número de Cuenta", "Tipo de Cuenta", "ID"]
    }

    fn export_row(&self) -> ExportRecord {
        vec![
            ("Nombre".into(), self.nombre.clone()),
            ("Código".into(), self.codigo.clone().unwrap_or_default()),
            (
                "Número de Cuenta".into(),
                self.numero_cuenta.clone().unwrap_or_default(),
            ),
            (
                "Tipo de Cuenta".into(),
                self.tipo_cuenta.clone().unwrap_or_default(),
            ),
            (
                "ID".into(),
                self.id.map(|id| id.to_string()).unwrap_or_default(),
            ),
        ]
    }
}
