//! Product (treatment/service catalogue entry) wire model.

use crate::Exportable;
use clinident_types::{ExportRecord, FieldValue, Fields};
use serde::{Deserialize, Serialize};

/// A catalogue product as served by `GET /api/productos`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: f64,
    #[serde(default)]
    pub categoria: Option<String>,
}

impl Fields for Product {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "codigo" => Some(self.codigo.as_str().into()),
            "nombre" => Some(self.nombre.as_str().into()),
            "descripcion" => Some(self.descripcion.clone().into()),
            "precio" => Some(self.precio.into()),
            "categoria" => Some(self.categoria.clone().into()),
            _ => None,
        }
    }
}

impl Exportable for Product {
    fn entity_name() -> &'static str {
        "productos"
    }

    fn export_headers() -> &'static [&'static str] {
        &["Código", "Nombre", "Descripción", "Precio", "Categoría", "ID"]
    }

    fn export_row(&self) -> ExportRecord {
        vec![
            ("Código".into(), self.codigo.clone()),
            ("Nombre".into(), self.nombre.clone()),
            (
                "Descripción".into(),
                self.descripcion.clone().unwrap_or_default(),
            ),
            ("Precio".into(), format!("{:.2}", self.precio)),
            (
                "Categoría".into(),
                self.categoria.clone().unwrap_or_default(),
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
    fn price_renders_with_two_decimals_in_exports() {
        let product = Product {
            id: Some(1),
            codigo: "LIMP-01".into(),
            nombre: "Limpieza dental".into(),
            descripcion: None,
            precio: 35.0,
            categoria: Some("Prevención".into()),
        };
        let row = product.export_row();
        assert_eq!(row[3], ("Precio".to_owned(), "35.00".to_owned()));
    }
}
