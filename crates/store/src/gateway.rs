//! Gateway seams between stores and the resource clients.
//!
//! The traits are defined on the consumer side so store logic can be tested
//! against in-memory fakes; the blanket implementations below wire them to
//! the real `clinident-client` services.

use async_trait::async_trait;
use clinident_client::{
    AccountsApi, ApiClient, BanksApi, ClientResult, CobranzasApi, DoctorsApi, PatientsApi,
    ProductsApi, ProformasApi, RolesApi, UsersApi,
};
use clinident_model::{
    AccountMovement, Bank, Cobranza, Doctor, Patient, Product, Proforma, Role, UserAccount,
};

#[async_trait]
pub trait PatientsGateway: Send + Sync {
    async fn fetch_all(&self) -> ClientResult<Vec<Patient>>;
    async fn create(&self, patient: &Patient) -> ClientResult<Patient>;
    async fn update(&self, id: i64, patient: &Patient) -> ClientResult<Patient>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

#[async_trait]
pub trait DoctorsGateway: Send + Sync {
    async fn fetch_all(&self) -> ClientResult<Vec<Doctor>>;
    async fn fetch_by_id(&self, id: i64) -> ClientResult<Doctor>;
    async fn create(&self, doctor: &Doctor) -> ClientResult<Doctor>;
    async fn update(&self, id: i64, doctor: &Doctor) -> ClientResult<Doctor>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

#[async_trait]
pub trait UsersGateway: Send + Sync {
    async fn create(&self, account: &UserAccount) -> ClientResult<UserAccount>;
    async fn update(&self, id: i64, account: &UserAccount) -> ClientResult<UserAccount>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

#[async_trait]
pub trait RolesGateway: Send + Sync {
    async fn fetch_all(&self) -> ClientResult<Vec<Role>>;
}

#[async_trait]
pub trait ProductsGateway: Send + Sync {
    async fn fetch_all(&self) -> ClientResult<Vec<Product>>;
    async fn create(&self, product: &Product) -> ClientResult<Product>;
    async fn update(&self, id: i64, product: &Product) -> ClientResult<Product>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

#[async_trait]
pub trait BanksGateway: Send + Sync {
    async fn fetch_all(&self) -> ClientResult<Vec<Bank>>;
    async fn create(&self, bank: &Bank) -> ClientResult<Bank>;
    async fn update(&self, id: i64, bank: &Bank) -> ClientResult<Bank>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

/// Everything the specialist-payment wizard needs, as one seam.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn patients(&self) -> ClientResult<Vec<Patient>>;
    async fn doctors(&self) -> ClientResult<Vec<Doctor>>;
    async fn proformas_by_patient(&self, patient_id: i64) -> ClientResult<Vec<Proforma>>;
    async fn cobranzas_by_proforma(&self, proforma_id: i64) -> ClientResult<Vec<Cobranza>>;
    async fn post_movement(&self, movement: &AccountMovement) -> ClientResult<AccountMovement>;
}

#[async_trait]
impl PatientsGateway for PatientsApi {
    async fn fetch_all(&self) -> ClientResult<Vec<Patient>> {
        self.get_all().await
    }
    async fn create(&self, patient: &Patient) -> ClientResult<Patient> {
        PatientsApi::create(self, patient).await
    }
    async fn update(&self, id: i64, patient: &Patient) -> ClientResult<Patient> {
        PatientsApi::update(self, id, patient).await
    }
    async fn delete(&self, id: i64) -> ClientResult<()> {
        PatientsApi::delete(self, id).await
    }
}

#[async_trait]
impl DoctorsGateway for DoctorsApi {
    async fn fetch_all(&self) -> ClientResult<Vec<Doctor>> {
        self.get_all().await
    }
    async fn fetch_by_id(&self, id: i64) -> ClientResult<Doctor> {
        self.get_by_id(id).await
    }
    async fn create(&self, doctor: &Doctor) -> ClientResult<Doctor> {
        DoctorsApi::create(self, doctor).await
    }
    async fn update(&self, id: i64, doctor: &Doctor) -> ClientResult<Doctor> {
        DoctorsApi::update(self, id, doctor).await
    }
    async fn delete(&self, id: i64) -> ClientResult<()> {
        DoctorsApi::delete(self, id).await
    }
}

#[async_trait]
impl UsersGateway for UsersApi {
    async fn create(&self, account: &UserAccount) -> ClientResult<UserAccount> {
        UsersApi::create(self, account).await
    }
    async fn update(&self, id: i64, account: &UserAccount) -> ClientResult<UserAccount> {
        UsersApi::update(self, id, account).await
    }
    async fn delete(&self, id: i64) -> ClientResult<()> {
        UsersApi::delete(self, id).await
    }
}

#[async_trait]
impl RolesGateway for RolesApi {
    async fn fetch_all(&self) -> ClientResult<Vec<Role>> {
        self.get_all().await
    }
}

#[async_trait]
impl ProductsGateway for ProductsApi {
    async fn fetch_all(&self) -> ClientResult<Vec<Product>> {
        self.get_all().await
    }
    async fn create(&self, product: &Product) -> ClientResult<Product> {
        ProductsApi::create(self, product).await
    }
    async fn update(&self, id: i64, product: &Product) -> ClientResult<Product> {
        ProductsApi::update(self, id, product).await
    }
    async fn delete(&self, id: i64) -> ClientResult<()> {
        ProductsApi::delete(self, id).await
    }
}

#[async_trait]
impl BanksGateway for BanksApi {
    async fn fetch_all(&self) -> ClientResult<Vec<Bank>> {
        self.get_all().await
    }
    async fn create(&self, bank: &Bank) -> ClientResult<Bank> {
        BanksApi::create(self, bank).await
    }
    async fn update(&self, id: i64, bank: &Bank) -> ClientResult<Bank> {
        BanksApi::update(self, id, bank).await
    }
    async fn delete(&self, id: i64) -> ClientResult<()> {
        BanksApi::delete(self, id).await
    }
}

/// Bundle of the client services backing the payment wizard.
#[derive(Clone, Debug)]
pub struct PaymentBackend {
    patients: PatientsApi,
    doctors: DoctorsApi,
    proformas: ProformasApi,
    cobranzas: CobranzasApi,
    accounts: AccountsApi,
}

impl PaymentBackend {
    pub fn new(client: ApiClient) -> Self {
        Self {
            patients: PatientsApi::new(client.clone()),
            doctors: DoctorsApi::new(client.clone()),
            proformas: ProformasApi::new(client.clone()),
            cobranzas: CobranzasApi::new(client.clone()),
            accounts: AccountsApi::new(client),
        }
    }
}

#[async_trait]
impl PaymentGateway for PaymentBackend {
    async fn patients(&self) -> ClientResult<Vec<Patient>> {
        self.patients.get_all().await
    }
    async fn doctors(&self) -> ClientResult<Vec<Doctor>> {
        self.doctors.get_all().await
    }
    async fn proformas_by_patient(&self, patient_id: i64) -> ClientResult<Vec<Proforma>> {
        self.proformas.by_patient(patient_id).await
    }
    async fn cobranzas_by_proforma(&self, proforma_id: i64) -> ClientResult<Vec<Cobranza>> {
        self.cobranzas.by_proforma(proforma_id).await
    }
    async fn post_movement(&self, movement: &AccountMovement) -> ClientResult<AccountMovement> {
        self.accounts.create_movement(movement).await
    }
}
