//! Doctor list store, including the two-phase create saga.
//!
//! Creating a doctor is a two-step remote operation: the linked user
//! account is created first, then the doctor referencing its id. If the
//! second step fails the store rolls the account back; if the rollback
//! fails too, the caller gets a structured error naming the orphaned
//! account instead of a silent leak.

use crate::gateway::{DoctorsGateway, RolesGateway, UsersGateway};
use crate::notify::{Notification, Notifier};
use clinident_client::{ClientError, DEFAULT_DOCTOR_PASSWORD};
use clinident_core::validation::{validate_doctor, ValidationErrors};
use clinident_model::{Doctor, Role, UserAccount};
use std::sync::Arc;

/// Errors surfaced by doctor store operations.
#[derive(Debug, thiserror::Error)]
pub enum DoctorStoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Remote(#[from] ClientError),
    #[error("server returned a user account without an id")]
    AccountMissingId,
    #[error("doctor {0} has no linked user account")]
    MissingLinkedAccount(i64),
    #[error(
        "doctor create failed and rollback of user account {account_id} also failed: \
         create={create_error}; rollback={rollback_error}"
    )]
    OrphanedAccount {
        account_id: i64,
        #[source]
        create_error: ClientError,
        rollback_error: ClientError,
    },
}

/// Owns the loaded doctor collection, the role list, and their flags.
pub struct DoctorStore<D, U, R>
where
    D: DoctorsGateway,
    U: UsersGateway,
    R: RolesGateway,
{
    doctors: D,
    users: U,
    roles_gateway: R,
    notifier: Arc<dyn Notifier>,
    items: Vec<Doctor>,
    roles: Vec<Role>,
    loading: bool,
    is_saving: bool,
}

impl<D, U, R> DoctorStore<D, U, R>
where
    D: DoctorsGateway,
    U: UsersGateway,
    R: RolesGateway,
{
    pub fn new(doctors: D, users: U, roles_gateway: R, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            doctors,
            users,
            roles_gateway,
            notifier,
            items: Vec::new(),
            roles: Vec::new(),
            loading: false,
            is_saving: false,
        }
    }

    pub fn items(&self) -> &[Doctor] {
        &self.items
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Doctor> {
        self.items.iter().find(|d| d.id == Some(id))
    }

    /// Replace the doctor collection wholesale from the server. `&mut self`
    /// serializes loads, so a stale result can never overwrite a newer one.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.loading = true;
        let result = self.doctors.fetch_all().await;
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

    /// Load the assignable roles.
    pub async fn load_roles(&mut self) -> Result<(), ClientError> {
        match self.roles_gateway.fetch_all().await {
            Ok(data) => {
                self.roles = data;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Error al cargar los roles"));
                Err(e)
            }
        }
    }

    /// Two-phase create: user account first, then the doctor referencing
    /// it. On success the server's doctor echo is appended to the list.
    pub async fn create(&mut self, doctor: Doctor) -> Result<Doctor, DoctorStoreError> {
        if let Err(errors) = validate_doctor(&doctor) {
            self.notifier
                .notify(Notification::warn("Campos requeridos", errors.to_string()));
            return Err(errors.into());
        }

        self.is_saving = true;
        let result = self.create_linked(doctor).await;
        self.is_saving = false;

        match result {
            Ok(created) => {
                self.items.push(created.clone());
                self.notifier
                    .notify(Notification::success("Médico creado correctamente"));
                Ok(created)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo crear el médico"));
                Err(e)
            }
        }
    }

    async fn create_linked(&self, doctor: Doctor) -> Result<Doctor, DoctorStoreError> {
        let account = linked_account(&doctor, Some(DEFAULT_DOCTOR_PASSWORD.to_owned()));
        let created_account = self.users.create(&account).await?;
        let account_id = created_account.id.ok_or(DoctorStoreError::AccountMissingId)?;

        let mut payload = doctor;
        payload.usuario_id = Some(account_id);

        match self.doctors.create(&payload).await {
            Ok(created) => Ok(created),
            Err(create_error) => {
                tracing::warn!(account_id, "doctor create failed; rolling back user account");
                match self.users.delete(account_id).await {
                    Ok(()) => Err(create_error.into()),
                    Err(rollback_error) => Err(DoctorStoreError::OrphanedAccount {
                        account_id,
                        create_error,
                        rollback_error,
                    }),
                }
            }
        }
    }

    /// Update a doctor, propagating the shared identity fields to the
    /// linked user account, then replace it in place.
    pub async fn update(&mut self, id: i64, doctor: Doctor) -> Result<Doctor, DoctorStoreError> {
        if let Err(errors) = validate_doctor(&doctor) {
            self.notifier
                .notify(Notification::warn("Campos requeridos", errors.to_string()));
            return Err(errors.into());
        }

        self.is_saving = true;
        let result = self.update_linked(id, doctor).await;
        self.is_saving = false;

        match result {
            Ok(updated) => {
                if let Some(slot) = self.items.iter_mut().find(|d| d.id == Some(id)) {
                    *slot = updated.clone();
                }
                self.notifier
                    .notify(Notification::success("Médico actualizado correctamente"));
                Ok(updated)
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo actualizar el médico"));
                Err(e)
            }
        }
    }

    async fn update_linked(&self, id: i64, doctor: Doctor) -> Result<Doctor, DoctorStoreError> {
        let current = self.doctors.fetch_by_id(id).await?;
        let account_id = current
            .usuario_id
            .ok_or(DoctorStoreError::MissingLinkedAccount(id))?;

        // Password stays server-side: the account update carries none.
        let account = linked_account(&doctor, None);
        self.users.update(account_id, &account).await?;

        Ok(self.doctors.update(id, &doctor).await?)
    }

    /// Delete a doctor and remove it from the list.
    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.is_saving = true;
        let result = self.doctors.delete(id).await;
        self.is_saving = false;

        match result {
            Ok(()) => {
                self.items.retain(|d| d.id != Some(id));
                self.notifier
                    .notify(Notification::success("Médico eliminado correctamente"));
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("No se pudo eliminar el médico"));
                Err(e)
            }
        }
    }
}

fn linked_account(doctor: &Doctor, password: Option<String>) -> UserAccount {
    UserAccount {
        id: None,
        numero_documento: doctor.numero_documento.clone(),
        nombre: doctor.nombre.clone(),
        apellido: doctor.apellido.clone(),
        email: doctor.email.clone(),
        telefono: doctor.telefono.clone(),
        rol_id: doctor.rol_id,
        password,
    }
}
