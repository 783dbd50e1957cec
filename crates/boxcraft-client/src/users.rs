use boxcraft_types::{User, UserDraft};
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.get_list("/admin/users").await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> Result<(), ClientError> {
        if draft.password.as_deref().map_or(true, str::is_empty) {
            return Err(ClientError::Invalid("A password is required for new users".into()));
        }
        self.mutate(Method::POST, "/admin/users", draft).await
    }

    pub async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<(), ClientError> {
        let mut draft = draft.clone();
        if draft.password.as_deref().is_some_and(str::is_empty) {
            draft.password = None;
        }
        self.mutate(Method::PUT, &format!("/admin/users/{id}"), &draft)
            .await
    }

    pub async fn delete_user(&self, id: u64) -> Result<(), ClientError> {
        self.delete(&format!("/admin/users/{id}")).await
    }
}
