//! Billing wire models: proformas (draft invoices), their line details,
//! and cobranzas (the collection items payments are applied against).

use clinident_types::{FieldValue, Fields};
use serde::{Deserialize, Serialize};

/// A draft invoice as served by `GET /api/proformas`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proforma {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub numero: String,
    pub estado: String,
    #[serde(default)]
    pub paciente_id: Option<i64>,
    #[serde(default)]
    pub medico_id: Option<i64>,
    /// ISO date string (`YYYY-MM-DD`).
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
}

impl Fields for Proforma {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "numero" => Some(self.numero.as_str().into()),
            "estado" => Some(self.estado.as_str().into()),
            "pacienteId" => Some(self.paciente_id.into()),
            "medicoId" => Some(self.medico_id.into()),
            "fecha" => Some(self.fecha.clone().into()),
            "total" => Some(self.total.into()),
            _ => None,
        }
    }
}

/// One line of a proforma, from `GET /api/detalles-proforma`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProformaDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub proforma_id: i64,
    #[serde(default)]
    pub producto_id: Option<i64>,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub cantidad: f64,
    pub precio_unitario: f64,
}

impl ProformaDetail {
    /// Line subtotal.
    pub fn subtotal(&self) -> f64 {
        self.cantidad * self.precio_unitario
    }
}

/// A collection item as served by `GET /api/cobranzas`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cobranza {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub proforma_id: i64,
    pub monto: f64,
    #[serde(default)]
    pub saldo: Option<f64>,
    pub estado: String,
    /// ISO date string (`YYYY-MM-DD`).
    #[serde(default)]
    pub fecha_vencimiento: Option<String>,
}

impl Fields for Cobranza {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "proformaId" => Some(self.proforma_id.into()),
            "monto" => Some(self.monto.into()),
            "saldo" => Some(self.saldo.into()),
            "estado" => Some(self.estado.as_str().into()),
            "fechaVencimiento" => Some(self.fecha_vencimiento.clone().into()),
            _ => None,
        }
    }
}
