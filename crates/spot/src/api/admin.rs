use super::or_empty;
use crate::client::SpotClient;
use crate::error::SpotResult;
use crate::models::{Admin, CreateAdminRequest};

pub struct AdminApi<'a> {
    client: &'a SpotClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a SpotClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> SpotResult<Vec<Admin>> {
        or_empty(self.client.get("/system-admin/admins").await, "admins")
    }

    pub async fn list_system_admins(&self) -> SpotResult<Vec<Admin>> {
        or_empty(
            self.client.get("/system-admin/system-admins").await,
            "system admins",
        )
    }

    pub async fn get(&self, id: i64) -> SpotResult<Admin> {
        self.client.get(&format!("/admin/{id}")).await
    }

    pub async fn create_admin(&self, request: &CreateAdminRequest) -> SpotResult<Admin> {
        self.client.post("/system-admin/create-admin", request).await
    }

    pub async fn create_system_admin(&self, request: &CreateAdminRequest) -> SpotResult<Admin> {
        self.client
            .post("/system-admin/create-system-admin", request)
            .await
    }

    /// Grants system-admin rights.
    pub async fn promote(&self, id: i64) -> SpotResult<Admin> {
        self.client
            .put_empty(&format!("/system-admin/promote/{id}"))
            .await
    }

    pub async fn demote(&self, id: i64) -> SpotResult<Admin> {
        self.client
            .put_empty(&format!("/system-admin/demote/{id}"))
            .await
    }

    pub async fn delete(&self, id: i64) -> SpotResult<()> {
        self.client
            .delete(&format!("/system-admin/admin/{id}"))
            .await
    }
}
