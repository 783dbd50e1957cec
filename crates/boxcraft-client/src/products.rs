use boxcraft_types::{ImageUpload, Product, ProductDraft};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;

use crate::api::ApiClient;
use crate::error::ClientError;

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryEntry {
    Name(String),
    Named { name: String },
}

impl ApiClient {
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get_list("/products").await
    }

    pub async fn get_product(&self, id: u64) -> Result<Product, ClientError> {
        self.get_record(&format!("/products/{id}")).await
    }

    pub async fn product_categories(&self) -> Result<Vec<String>, ClientError> {
        let entries: Vec<CategoryEntry> = self.get_list("/products/categories").await?;
        Ok(entries
            .into_iter()
            .map(|entry| match entry {
                CategoryEntry::Name(name) | CategoryEntry::Named { name } => name,
            })
            .collect())
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<(), ClientError> {
        self.save_product(Method::POST, "/products", draft).await
    }

    pub async fn update_product(&self, id: u64, draft: &ProductDraft) -> Result<(), ClientError> {
        self.save_product(Method::PUT, &format!("/products/{id}"), draft)
            .await
    }

    pub async fn delete_product(&self, id: u64) -> Result<(), ClientError> {
        self.delete(&format!("/products/{id}")).await
    }

    // Multipart only when a file is attached; plain JSON otherwise.
    async fn save_product(
        &self,
        method: Method,
        path: &str,
        draft: &ProductDraft,
    ) -> Result<(), ClientError> {
        if draft.name.trim().is_empty() {
            return Err(ClientError::Invalid("Product name is required".into()));
        }

        match &draft.image {
            Some(image) => {
                let form = multipart_form(draft, image)?;
                self.send(self.request(method, path).multipart(form)).await?;
                Ok(())
            }
            None => self.mutate(method, path, draft).await,
        }
    }
}

fn multipart_form(draft: &ProductDraft, image: &ImageUpload) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for (name, value) in draft.form_fields() {
        form = form.text(name, value);
    }

    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)
        .map_err(|e| ClientError::Invalid(format!("unsupported image type: {e}")))?;

    Ok(form.part("image", part))
}
