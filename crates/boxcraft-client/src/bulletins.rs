use boxcraft_types::{Bulletin, BulletinDraft};
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn list_bulletins(&self) -> Result<Vec<Bulletin>, ClientError> {
        self.get_list("/bulletins").await
    }

    pub async fn get_bulletin(&self, id: u64) -> Result<Bulletin, ClientError> {
        self.get_record(&format!("/bulletins/{id}")).await
    }

    pub async fn create_bulletin(&self, draft: &BulletinDraft) -> Result<(), ClientError> {
        self.mutate(Method::POST, "/bulletins", draft).await
    }

    pub async fn update_bulletin(&self, id: u64, draft: &BulletinDraft) -> Result<(), ClientError> {
        self.mutate(Method::PUT, &format!("/bulletins/{id}"), draft)
            .await
    }

    pub async fn delete_bulletin(&self, id: u64) -> Result<(), ClientError> {
        self.delete(&format!("/bulletins/{id}")).await
    }
}
