//! Patient list store.

use crate::gateway::PatientsGateway;
use crate::notify::{Notification, Notifier};
use clinident_client::ClientError;
use clinident_core::validation::{validate_patient, ValidationErrors};
use clinident_model::Patient;
use std::sync::Arc;

/// Errors surfaced by patient store operations.
#[derive(Debug, thiserror::Error)]
pub enum PatientStoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Remote(#[from] ClientError),
}

/// Owns the loaded patient collection and its flags.
pub struct PatientStore<G: PatientsGateway> {
    gateway: G,
    notifier: Arc<dyn Notifier>,
    items: Vec<Patient>,
    loading: bool,
    is_saving: bool,
}

impl<G: PatientsGateway> PatientStore<G> {
    pub fn new(gateway: G, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            items: Vec::new(),
            loading: false,
            is_saving: false,
        }
    }

    pub fn items(&self) -> &[Patient] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Patient> {
        self.items.iter().find(|p| p.id == Some(id))
    }

    /// Replace the collection wholesale from the server.
    ///
    /// Loads cannot overlap: `&mut self` keeps the store exclusively
    /// borrowed across the await, so a second load can only start after
    /// this one has applied or failed. No stale result can win.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.gateway.fetch_all().await;
        self.loading = false;

        match result {
            Ok(data) => {
                self.items = data;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Error al conectarse al servidor"));
                Err(e)
            }
        }
    }

    /// Create a patient and append the server's echo to the list.
    pub async fn create(&mut self, patient: Patient) -> Result<Patient, PatientStoreError> {
        if let Err(errors) = validate_patient(&patient) {
            self.notifier
                .notify(Notification::warn("Campos requeridos", errors.to_string()));
            return Err(errors.into());
        }

        self.is_saving = true;
        let result = self.gateway.create(&patient).await;
        self.is_saving = false;

        match result {
            Ok(created) => {
                self.items.push(created.clone());
                self.notifier
                    .notify(Notification::success("Paciente creado correctamente"));
                Ok(created)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo crear el paciente"));
                Err(e.into())
            }
        }
    }

    /// Update a patient and replace it in place, preserving list order.
    pub async fn update(&mut self, id: i64, patient: Patient) -> Result<Patient, PatientStoreError> {
        if let Err(errors) = validate_patient(&patient) {
            self.notifier
                .notify(Notification::warn("Campos requeridos", errors.to_string()));
            return Err(errors.into());
        }

        self.is_saving = true;
        let result = self.gateway.update(id, &patient).await;
        self.is_saving = false;

        match result {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|p| p.id == Some(id)) {
                    *slot = updated.clone();
                }
                self.notifier
                    .notify(Notification::success("Paciente actualizado correctamente"));
                Ok(updated)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo actualizar el paciente"));
                Err(e.into())
            }
        }
    }

    /// Delete a patient and remove it from the list.
    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.is_saving = true;
        let result = self.gateway.delete(id).await;
        self.is_saving = false;

        match result {
            Ok(()) => {
                self.items.retain(|p| p.id != Some(id));
                self.notifier
                    .notify(Notification::success("Paciente eliminado correctamente"));
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo eliminar el paciente"));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn patient(nombre: &str) -> Patient {
        Patient {
            id: None,
            numero_documento: "0102030405".into(),
            nombre: nombre.into(),
            apellido: "Vela".into(),
            email: None,
            telefono: None,
            fecha_nacimiento: None,
            direccion: Some("Av. Amazonas 10".into()),
            genero: Some("F".into()),
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        next_id: AtomicI64,
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeGateway {
        fn failing() -> Self {
            let fake = Self::default();
            fake.fail.store(true, Ordering::SeqCst);
            fake
        }

        fn check(&self) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(ClientError::Status {
                    status: 500,
                    body: "boom".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl PatientsGateway for FakeGateway {
        async fn fetch_all(&self) -> Result<Vec<Patient>, ClientError> {
            self.check()?;
            Ok(vec![Patient {
                id: Some(1),
                ..patient("Ana")
            }])
        }
        async fn create(&self, p: &Patient) -> Result<Patient, ClientError> {
            self.check()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 100;
            Ok(Patient {
                id: Some(id),
                ..p.clone()
            })
        }
        async fn update(&self, id: i64, p: &Patient) -> Result<Patient, ClientError> {
            self.check()?;
            Ok(Patient {
                id: Some(id),
                ..p.clone()
            })
        }
        async fn delete(&self, _id: i64) -> Result<(), ClientError> {
            self.check()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<Notification>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.sent.lock().unwrap().push(notification);
        }
    }

    fn store(gateway: FakeGateway) -> (PatientStore<FakeGateway>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (PatientStore::new(gateway, notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn create_appends_exactly_one_entry_with_server_id() {
        let (mut store, notifier) = store(FakeGateway::default());
        let created = store.create(patient("Ana")).await.expect("create");
        assert_eq!(store.count(), 1);
        assert_eq!(created.id, Some(100));
        assert_eq!(store.items()[0].id, Some(100));
        assert!(!store.is_saving());
        assert_eq!(
            notifier.sent.lock().unwrap()[0].severity,
            Severity::Success
        );
    }

    #[tokio::test]
    async fn update_replaces_in_place_preserving_length_and_order() {
        let (mut store, _) = store(FakeGateway::default());
        store.create(patient("Ana")).await.expect("create a");
        store.create(patient("Bruno")).await.expect("create b");
        let first_id = store.items()[0].id.unwrap();

        let mut renamed = patient("Anita");
        renamed.id = Some(first_id);
        store.update(first_id, renamed).await.expect("update");

        assert_eq!(store.count(), 2);
        assert_eq!(store.items()[0].nombre, "Anita");
        assert_eq!(store.items()[1].nombre, "Bruno");
    }

    #[tokio::test]
    async fn delete_removes_exactly_the_matching_entry() {
        let (mut store, _) = store(FakeGateway::default());
        store.create(patient("Ana")).await.expect("create a");
        store.create(patient("Bruno")).await.expect("create b");
        let first_id = store.items()[0].id.unwrap();

        store.delete(first_id).await.expect("delete");
        assert_eq!(store.count(), 1);
        assert_eq!(store.items()[0].nombre, "Bruno");
    }

    #[tokio::test]
    async fn loads_run_to_completion_one_at_a_time() {
        let (mut store, _) = store(FakeGateway::default());
        store.load().await.expect("first load");
        store.load().await.expect("second load");
        assert_eq!(store.gateway.calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.count(), 1);
        assert!(!store.loading());
    }

    #[tokio::test]
    async fn failed_load_clears_loading_and_notifies() {
        let (mut store, notifier) = store(FakeGateway::failing());
        let err = store.load().await.expect_err("must fail");
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
        assert!(!store.loading());
        assert!(store.items().is_empty());
        assert_eq!(notifier.sent.lock().unwrap()[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn failed_create_leaves_local_state_untouched() {
        let (mut store, _) = store(FakeGateway::default());
        store.load().await.expect("load");
        store.gateway.fail.store(true, Ordering::SeqCst);

        assert!(store.create(patient("Ana")).await.is_err());
        assert_eq!(store.count(), 1);
        assert!(!store.is_saving());
    }

    #[tokio::test]
    async fn validation_failure_never_reaches_the_wire() {
        let (mut store, notifier) = store(FakeGateway::default());
        let mut incomplete = patient("Ana");
        incomplete.numero_documento = String::new();
        incomplete.direccion = None;

        let err = store.create(incomplete).await.expect_err("must fail");
        assert!(matches!(err, PatientStoreError::Invalid(_)));
        assert_eq!(store.gateway.calls.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.sent.lock().unwrap()[0].severity, Severity::Warn);
    }
}
