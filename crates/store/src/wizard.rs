//! Five-step specialist payment wizard.
//!
//! Walks the operator from patient to doctor to proforma to cobranza to
//! the amount entry, loading each dependent list when its step is
//! entered, and finally posts an account movement in the specialist
//! payment category.

use crate::gateway::PaymentGateway;
use crate::notify::{Notification, Notifier};
use chrono::Utc;
use clinident_client::ClientError;
use clinident_core::filter::FilterSet;
use clinident_core::format::format_currency;
use clinident_model::{AccountMovement, Cobranza, Doctor, Patient, Proforma};
use std::sync::Arc;

/// Ledger category id for specialist payments.
pub const PAYMENT_CATEGORY_ID: i64 = 5;

const DEFAULT_DESCRIPTION: &str = "Pago a especialista";

/// The wizard's ordered steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    SelectPatient,
    SelectDoctor,
    SelectProforma,
    SelectCobranza,
    EnterAmount,
}

impl WizardStep {
    /// 1-based position, as shown to the operator.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::SelectPatient => 1,
            WizardStep::SelectDoctor => 2,
            WizardStep::SelectProforma => 3,
            WizardStep::SelectCobranza => 4,
            WizardStep::EnterAmount => 5,
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::SelectPatient => Some(WizardStep::SelectDoctor),
            WizardStep::SelectDoctor => Some(WizardStep::SelectProforma),
            WizardStep::SelectProforma => Some(WizardStep::SelectCobranza),
            WizardStep::SelectCobranza => Some(WizardStep::EnterAmount),
            WizardStep::EnterAmount => None,
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::SelectPatient => None,
            WizardStep::SelectDoctor => Some(WizardStep::SelectPatient),
            WizardStep::SelectProforma => Some(WizardStep::SelectDoctor),
            WizardStep::SelectCobranza => Some(WizardStep::SelectProforma),
            WizardStep::EnterAmount => Some(WizardStep::SelectCobranza),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error(transparent)]
    Remote(#[from] ClientError),
    #[error("debe seleccionar un paciente")]
    NoPatientSelected,
    #[error("debe seleccionar un médico")]
    NoDoctorSelected,
    #[error("debe seleccionar una proforma")]
    NoProformaSelected,
    #[error("debe seleccionar una cobranza")]
    NoCobranzaSelected,
    #[error("debe especificar un monto válido para el pago")]
    InvalidAmount,
}

pub struct SpecialistPaymentWizard<G: PaymentGateway> {
    gateway: G,
    notifier: Arc<dyn Notifier>,
    step: WizardStep,
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    proformas: Vec<Proforma>,
    cobranzas: Vec<Cobranza>,
    selected_patient: Option<Patient>,
    selected_doctor: Option<Doctor>,
    selected_proforma: Option<Proforma>,
    selected_cobranza: Option<Cobranza>,
    search: FilterSet,
    pub amount: Option<f64>,
    pub description: String,
    loading: bool,
    loading_proformas: bool,
    loading_cobranzas: bool,
    loading_payment: bool,
}

impl<G: PaymentGateway> SpecialistPaymentWizard<G> {
    pub fn new(gateway: G, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            step: WizardStep::SelectPatient,
            patients: Vec::new(),
            doctors: Vec::new(),
            proformas: Vec::new(),
            cobranzas: Vec::new(),
            selected_patient: None,
            selected_doctor: None,
            selected_proforma: None,
            selected_cobranza: None,
            search: FilterSet::new(),
            amount: None,
            description: DEFAULT_DESCRIPTION.to_owned(),
            loading: false,
            loading_proformas: false,
            loading_cobranzas: false,
            loading_payment: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn loading_proformas(&self) -> bool {
        self.loading_proformas
    }

    pub fn loading_cobranzas(&self) -> bool {
        self.loading_cobranzas
    }

    pub fn loading_payment(&self) -> bool {
        self.loading_payment
    }

    pub fn cobranzas(&self) -> &[Cobranza] {
        &self.cobranzas
    }

    pub fn selected_patient(&self) -> Option<&Patient> {
        self.selected_patient.as_ref()
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.selected_doctor.as_ref()
    }

    pub fn selected_proforma(&self) -> Option<&Proforma> {
        self.selected_proforma.as_ref()
    }

    pub fn selected_cobranza(&self) -> Option<&Cobranza> {
        self.selected_cobranza.as_ref()
    }

    /// Fetch the patient and doctor lists the first two steps draw from.
    pub async fn load_base_data(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = async {
            let patients = self.gateway.patients().await?;
            let doctors = self.gateway.doctors().await?;
            Ok::<_, ClientError>((patients, doctors))
        }
        .await;
        self.loading = false;

        match result {
            Ok((patients, doctors)) => {
                self.patients = patients;
                self.doctors = doctors;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Error al conectarse al servidor"));
                Err(e)
            }
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search.set_global_filter(term);
    }

    pub fn search_term(&self) -> &str {
        self.search.search_term()
    }

    /// Patients matching the step's search box.
    pub fn filtered_patients(&self) -> Vec<Patient> {
        self.search
            .filter_data(&self.patients, &["nombre", "apellido", "numeroDocumento"])
    }

    /// Doctors matching the step's search box.
    pub fn filtered_doctors(&self) -> Vec<Doctor> {
        self.search
            .filter_data(&self.doctors, &["nombre", "apellido", "especialidad"])
    }

    /// Proformas of the selected patient matching the search box.
    pub fn filtered_proformas(&self) -> Vec<Proforma> {
        self.search.filter_data(&self.proformas, &["numero", "estado"])
    }

    pub fn select_patient(&mut self, patient: Patient) {
        self.selected_patient = Some(patient);
        // Downstream choices no longer apply.
        self.selected_proforma = None;
        self.selected_cobranza = None;
        self.proformas.clear();
        self.cobranzas.clear();
    }

    pub fn select_doctor(&mut self, doctor: Doctor) {
        self.selected_doctor = Some(doctor);
    }

    pub fn select_proforma(&mut self, proforma: Proforma) {
        self.selected_proforma = Some(proforma);
        self.selected_cobranza = None;
        self.cobranzas.clear();
    }

    pub fn select_cobranza(&mut self, cobranza: Cobranza) {
        self.selected_cobranza = Some(cobranza);
        if self.amount.is_none() {
            self.amount = cobranza_suggestion(self.selected_cobranza.as_ref());
        }
    }

    /// Advance one step, verifying the current step's selection and
    /// loading whatever the next step needs.
    pub async fn next_step(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::SelectPatient if self.selected_patient.is_none() => {
                return Err(WizardError::NoPatientSelected)
            }
            WizardStep::SelectDoctor if self.selected_doctor.is_none() => {
                return Err(WizardError::NoDoctorSelected)
            }
            WizardStep::SelectProforma if self.selected_proforma.is_none() => {
                return Err(WizardError::NoProformaSelected)
            }
            WizardStep::SelectCobranza if self.selected_cobranza.is_none() => {
                return Err(WizardError::NoCobranzaSelected)
            }
            _ => {}
        }

        let Some(next) = self.step.next() else {
            return Ok(self.step);
        };
        self.go_to_step(next).await
    }

    /// Step back without touching the selections already made.
    pub async fn previous_step(&mut self) -> Result<WizardStep, WizardError> {
        match self.step.previous() {
            Some(prev) => self.go_to_step(prev).await,
            None => Ok(self.step),
        }
    }

    /// Jump to a step, resetting the search box and loading the lists
    /// the step depends on.
    pub async fn go_to_step(&mut self, step: WizardStep) -> Result<WizardStep, WizardError> {
        self.search.clear_global_filter();

        match step {
            WizardStep::SelectProforma => self.load_proformas().await?,
            WizardStep::SelectCobranza => self.load_cobranzas().await?,
            _ => {}
        }

        self.step = step;
        Ok(step)
    }

    async fn load_proformas(&mut self) -> Result<(), WizardError> {
        let patient_id = self
            .selected_patient
            .as_ref()
            .and_then(|p| p.id)
            .ok_or(WizardError::NoPatientSelected)?;

        self.loading_proformas = true;
        let result = self.gateway.proformas_by_patient(patient_id).await;
        self.loading_proformas = false;

        match result {
            Ok(data) => {
                self.proformas = data;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Error al cargar las proformas"));
                Err(e.into())
            }
        }
    }

    async fn load_cobranzas(&mut self) -> Result<(), WizardError> {
        let proforma_id = self
            .selected_proforma
            .as_ref()
            .and_then(|p| p.id)
            .ok_or(WizardError::NoProformaSelected)?;

        self.loading_cobranzas = true;
        let result = self.gateway.cobranzas_by_proforma(proforma_id).await;
        self.loading_cobranzas = false;

        match result {
            Ok(data) => {
                self.cobranzas = data;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Error al cargar las cobranzas"));
                Err(e.into())
            }
        }
    }

    /// Post the account movement for the gathered selections, then reset
    /// the wizard for the next payment.
    pub async fn process_payment(&mut self) -> Result<AccountMovement, WizardError> {
        let amount = match self.amount {
            Some(a) if a > 0.0 && a.is_finite() => a,
            _ => {
                self.notifier.notify(Notification::warn(
                    "Monto inválido",
                    "Debe especificar un monto válido para el pago",
                ));
                return Err(WizardError::InvalidAmount);
            }
        };
        let cobranza_id = self
            .selected_cobranza
            .as_ref()
            .and_then(|c| c.id)
            .ok_or(WizardError::NoCobranzaSelected)?;
        let doctor_id = self
            .selected_doctor
            .as_ref()
            .and_then(|d| d.id)
            .ok_or(WizardError::NoDoctorSelected)?;

        let movement = AccountMovement {
            id: None,
            categoria_id: PAYMENT_CATEGORY_ID,
            cobranza_id,
            medico_id: doctor_id,
            monto: amount,
            fecha_movimiento: Utc::now().date_naive().format("%Y-%m-%d").to_string(),
            descripcion: self.description.clone(),
        };

        self.loading_payment = true;
        let result = self.gateway.post_movement(&movement).await;
        self.loading_payment = false;

        match result {
            Ok(posted) => {
                self.notifier.notify(Notification::success(format!(
                    "Pago de {} registrado correctamente",
                    format_currency(amount)
                )));
                self.reset();
                Ok(posted)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo registrar el pago"));
                Err(e.into())
            }
        }
    }

    /// Clear every selection and return to the first step. Base lists
    /// stay loaded.
    pub fn reset(&mut self) {
        self.step = WizardStep::SelectPatient;
        self.selected_patient = None;
        self.selected_doctor = None;
        self.selected_proforma = None;
        self.selected_cobranza = None;
        self.proformas.clear();
        self.cobranzas.clear();
        self.search.clear_global_filter();
        self.amount = None;
        self.description = DEFAULT_DESCRIPTION.to_owned();
    }
}

fn cobranza_suggestion(cobranza: Option<&Cobranza>) -> Option<f64> {
    let c = cobranza?;
    Some(c.saldo.unwrap_or(c.monto))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::TracingNotifier;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn patient(id: i64, nombre: &str) -> Patient {
        Patient {
            id: Some(id),
            numero_documento: "0955667788".into(),
            nombre: nombre.into(),
            apellido: "Vera".into(),
            email: None,
            telefono: None,
            fecha_nacimiento: None,
            direccion: None,
            genero: None,
        }
    }

    fn doctor(id: i64) -> Doctor {
        Doctor {
            id: Some(id),
            numero_documento: "0911223344".into(),
            nombre: "Luis".into(),
            apellido: "Mora".into(),
            email: None,
            telefono: None,
            direccion: None,
            especialidad: "Endodoncia".into(),
            rol_id: Some(2),
            usuario_id: Some(40),
            password: None,
        }
    }

    fn proforma(id: i64, numero: &str) -> Proforma {
        Proforma {
            id: Some(id),
            numero: numero.into(),
            estado: "pendiente".into(),
            paciente_id: Some(1),
            medico_id: Some(9),
            fecha: Some("2026-08-01".into()),
            total: Some(220.0),
        }
    }

    fn cobranza(id: i64) -> Cobranza {
        Cobranza {
            id: Some(id),
            proforma_id: 30,
            monto: 120.0,
            saldo: Some(80.0),
            estado: "pendiente".into(),
            fecha_vencimiento: None,
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        posted: Mutex<Vec<AccountMovement>>,
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn patients(&self) -> Result<Vec<Patient>, ClientError> {
            Ok(vec![patient(1, "Ana"), patient(2, "Bruno")])
        }
        async fn doctors(&self) -> Result<Vec<Doctor>, ClientError> {
            Ok(vec![doctor(9)])
        }
        async fn proformas_by_patient(&self, patient_id: i64) -> Result<Vec<Proforma>, ClientError> {
            assert_eq!(patient_id, 1);
            Ok(vec![proforma(30, "PRO-030"), proforma(31, "PRO-031")])
        }
        async fn cobranzas_by_proforma(&self, proforma_id: i64) -> Result<Vec<Cobranza>, ClientError> {
            assert_eq!(proforma_id, 30);
            Ok(vec![cobranza(300)])
        }
        async fn post_movement(
            &self,
            movement: &AccountMovement,
        ) -> Result<AccountMovement, ClientError> {
            self.posted.lock().unwrap().push(movement.clone());
            Ok(AccountMovement {
                id: Some(71),
                ..movement.clone()
            })
        }
    }

    fn wizard() -> SpecialistPaymentWizard<FakeGateway> {
        SpecialistPaymentWizard::new(FakeGateway::default(), Arc::new(TracingNotifier))
    }

    #[tokio::test]
    async fn cannot_advance_without_a_selection() {
        let mut wizard = wizard();
        wizard.load_base_data().await.expect("load");

        let err = wizard.next_step().await.expect_err("must block");
        assert!(matches!(err, WizardError::NoPatientSelected));
        assert_eq!(wizard.step(), WizardStep::SelectPatient);
    }

    #[tokio::test]
    async fn full_walk_posts_the_movement_and_resets() {
        let mut wizard = wizard();
        wizard.load_base_data().await.expect("load");

        wizard.select_patient(patient(1, "Ana"));
        wizard.next_step().await.expect("to doctor");
        assert_eq!(wizard.step(), WizardStep::SelectDoctor);

        wizard.select_doctor(doctor(9));
        wizard.next_step().await.expect("to proforma");
        assert_eq!(wizard.filtered_proformas().len(), 2);

        wizard.select_proforma(proforma(30, "PRO-030"));
        wizard.next_step().await.expect("to cobranza");
        assert_eq!(wizard.cobranzas().len(), 1);

        wizard.select_cobranza(cobranza(300));
        wizard.next_step().await.expect("to amount");
        assert_eq!(wizard.step(), WizardStep::EnterAmount);
        // Outstanding balance pre-fills the amount.
        assert_eq!(wizard.amount, Some(80.0));

        let posted = wizard.process_payment().await.expect("payment");
        assert_eq!(posted.id, Some(71));
        assert_eq!(posted.categoria_id, PAYMENT_CATEGORY_ID);
        assert_eq!(posted.cobranza_id, 300);
        assert_eq!(posted.medico_id, 9);
        assert_eq!(posted.descripcion, "Pago a especialista");

        assert_eq!(wizard.step(), WizardStep::SelectPatient);
        assert!(wizard.selected_patient().is_none());
        assert_eq!(wizard.amount, None);
    }

    #[tokio::test]
    async fn rejects_a_non_positive_amount() {
        let mut wizard = wizard();
        wizard.load_base_data().await.expect("load");
        wizard.select_patient(patient(1, "Ana"));
        wizard.next_step().await.expect("to doctor");
        wizard.select_doctor(doctor(9));
        wizard.next_step().await.expect("to proforma");
        wizard.select_proforma(proforma(30, "PRO-030"));
        wizard.next_step().await.expect("to cobranza");
        wizard.select_cobranza(cobranza(300));
        wizard.next_step().await.expect("to amount");

        wizard.amount = Some(0.0);
        let err = wizard.process_payment().await.expect_err("must reject");
        assert!(matches!(err, WizardError::InvalidAmount));
        assert!(wizard.gateway.posted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn changing_patient_clears_downstream_selections() {
        let mut wizard = wizard();
        wizard.load_base_data().await.expect("load");
        wizard.select_patient(patient(1, "Ana"));
        wizard.next_step().await.expect("to doctor");
        wizard.select_doctor(doctor(9));
        wizard.next_step().await.expect("to proforma");
        wizard.select_proforma(proforma(30, "PRO-030"));

        wizard.select_patient(patient(2, "Bruno"));
        assert!(wizard.selected_proforma().is_none());
        assert!(wizard.filtered_proformas().is_empty());
    }

    #[tokio::test]
    async fn search_box_narrows_patients_and_resets_between_steps() {
        let mut wizard = wizard();
        wizard.load_base_data().await.expect("load");

        wizard.set_search_term("bru");
        let filtered = wizard.filtered_patients();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].nombre, "Bruno");

        wizard.select_patient(patient(1, "Ana"));
        wizard.next_step().await.expect("to doctor");
        assert_eq!(wizard.search_term(), "");
    }
}
