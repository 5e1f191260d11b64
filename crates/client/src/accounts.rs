//! Account-side resource clients: financial movements (`/api/cuentas`),
//! user accounts (`/api/usuarios`) and roles (`/api/roles`).

use crate::{ApiClient, ClientResult};
use clinident_core::Endpoint;
use clinident_model::{AccountMovement, Role, UserAccount};

/// Financial movements client.
#[derive(Clone, Debug)]
pub struct AccountsApi {
    client: ApiClient,
}

impl AccountsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn movements(&self) -> ClientResult<Vec<AccountMovement>> {
        let url = self.client.config().url(Endpoint::Cuentas);
        self.client.get_json(&url).await
    }

    /// Post a movement (the wizard's payment) and get the stored record
    /// back with its id.
    pub async fn create_movement(
        &self,
        movement: &AccountMovement,
    ) -> ClientResult<AccountMovement> {
        let url = self.client.config().url(Endpoint::Cuentas);
        self.client.post_json(&url, movement).await
    }
}

/// User-account client, used by the doctor-creation saga.
#[derive(Clone, Debug)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_by_id(&self, id: i64) -> ClientResult<UserAccount> {
        let url = self.client.config().resource_url(Endpoint::Usuarios, id);
        self.client.get_json(&url).await
    }

    pub async fn create(&self, account: &UserAccount) -> ClientResult<UserAccount> {
        let url = self.client.config().url(Endpoint::Usuarios);
        self.client.post_json(&url, account).await
    }

    pub async fn update(&self, id: i64, account: &UserAccount) -> ClientResult<UserAccount> {
        let url = self.client.config().resource_url(Endpoint::Usuarios, id);
        self.client.put_json(&url, account).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let url = self.client.config().resource_url(Endpoint::Usuarios, id);
        self.client.delete(&url).await
    }
}

/// Role lookup client.
#[derive(Clone, Debug)]
pub struct RolesApi {
    client: ApiClient,
}

impl RolesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> ClientResult<Vec<Role>> {
        let url = self.client.config().url(Endpoint::Roles);
        self.client.get_json(&url).await
    }
}
