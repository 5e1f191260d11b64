//! Financial-account and user-account wire models.

use serde::{Deserialize, Serialize};

/// A movement on the clinic's accounts, posted to `POST /api/cuentas`.
///
/// This is the payload the specialist-payment wizard assembles: the
/// category of the movement, the cobranza it settles against, the doctor
/// being paid, and the amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMovement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub categoria_id: i64,
    pub cobranza_id: i64,
    pub medico_id: i64,
    pub monto: f64,
    /// ISO date string (`YYYY-MM-DD`).
    pub fecha_movimiento: String,
    pub descripcion: String,
}

/// A login account linked to a doctor (`/api/usuarios`).
///
/// Shares the doctor's identity fields; the password is stored server-side
/// and only travels on create/update payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
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
    pub rol_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// A role as served by `GET /api/roles`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub nombre: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_serializes_wizard_payload_shape() {
        let movement = AccountMovement {
            id: None,
            categoria_id: 5,
            cobranza_id: 31,
            medico_id: 3,
            monto: 80.0,
            fecha_movimiento: "2026-08-30".into(),
            descripcion: "Pago a especialista".into(),
        };
        let json = serde_json::to_value(&movement).expect("encode movement");
        assert_eq!(json["categoriaId"], 5);
        assert_eq!(json["cobranzaId"], 31);
        assert_eq!(json["fechaMovimiento"], "2026-08-30");
        assert!(json.get("id").is_none());
    }
}
