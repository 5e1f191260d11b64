//! Billing resource clients: proformas and cobranzas.

use crate::{ApiClient, ClientResult};
use clinident_core::Endpoint;
use clinident_model::{Cobranza, Proforma, ProformaDetail};

/// Proforma (draft invoice) client (`/api/proformas`).
#[derive(Clone, Debug)]
pub struct ProformasApi {
    client: ApiClient,
}

impl ProformasApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Proforma>> {
        let url = self.client.config().url(Endpoint::Proformas);
        self.client.get_json(&url).await
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<Proforma> {
        let url = self.client.config().resource_url(Endpoint::Proformas, id);
        self.client.get_json(&url).await
    }

    /// Proformas issued to one patient.
    pub async fn by_patient(&self, patient_id: i64) -> ClientResult<Vec<Proforma>> {
        let url = self
            .client
            .config()
            .subpath_url(Endpoint::Proformas, &format!("paciente/{patient_id}"));
        self.client.get_json(&url).await
    }

    /// Proformas attended by one doctor.
    pub async fn by_doctor(&self, doctor_id: i64) -> ClientResult<Vec<Proforma>> {
        let url = self
            .client
            .config()
            .subpath_url(Endpoint::Proformas, &format!("medico/{doctor_id}"));
        self.client.get_json(&url).await
    }

    /// Proformas in a given state (e.g. `PENDIENTE`).
    pub async fn by_status(&self, status: &str) -> ClientResult<Vec<Proforma>> {
        let url = self
            .client
            .config()
            .subpath_url(Endpoint::Proformas, &format!("estado/{status}"));
        self.client.get_json(&url).await
    }

    /// Every proforma line detail, across proformas.
    pub async fn details(&self) -> ClientResult<Vec<ProformaDetail>> {
        let url = self.client.config().url(Endpoint::DetallesProforma);
        self.client.get_json(&url).await
    }
}

/// Cobranza (collection item) client (`/api/cobranzas`).
#[derive(Clone, Debug)]
pub struct CobranzasApi {
    client: ApiClient,
}

impl CobranzasApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Cobranza>> {
        let url = self.client.config().url(Endpoint::Cobranzas);
        self.client.get_json(&url).await
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<Cobranza> {
        let url = self.client.config().resource_url(Endpoint::Cobranzas, id);
        self.client.get_json(&url).await
    }

    /// Collection items belonging to one proforma.
    pub async fn by_proforma(&self, proforma_id: i64) -> ClientResult<Vec<Cobranza>> {
        let url = self
            .client
            .config()
            .subpath_url(Endpoint::Cobranzas, &format!("proforma/{proforma_id}"));
        self.client.get_json(&url).await
    }

    pub async fn create(&self, cobranza: &Cobranza) -> ClientResult<Cobranza> {
        let url = self.client.config().url(Endpoint::Cobranzas);
        self.client.post_json(&url, cobranza).await
    }
}
