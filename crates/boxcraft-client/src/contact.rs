use boxcraft_types::ContactMessage;
use reqwest::Method;

use crate::api::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn send_contact(&self, message: &ContactMessage) -> Result<(), ClientError> {
        if message.name.trim().is_empty()
            || message.email.trim().is_empty()
            || message.message.trim().is_empty()
        {
            return Err(ClientError::Invalid(
                "Name, email and message are required".into(),
            ));
        }
        self.mutate(Method::POST, "/contact", message).await
    }
}
