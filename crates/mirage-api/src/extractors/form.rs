//! Multipart form collection.

use std::collections::HashMap;

use axum::extract::Multipart;

use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_service::Upload;

/// Text fields and at most one file from a multipart body.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, String>,
    file: Option<Upload>,
}

impl FormData {
    /// Drain `multipart`. Parts named in `file_fields` that carry a
    /// filename become the upload; every other part is read as text.
    pub async fn read(mut multipart: Multipart, file_fields: &[&str]) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if file_fields.contains(&name.as_str()) && field.file_name().is_some() {
                if form.file.is_some() {
                    return Err(AppError::validation("Only one file may be attached"));
                }
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(malformed)?;
                form.file = Some(Upload {
                    filename,
                    content_type,
                    data,
                });
            } else {
                let value = field.text().await.map_err(malformed)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Text value of `name`, if sent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Text value of `name`, or an empty string.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default()
    }

    pub fn take_file(&mut self) -> Option<Upload> {
        self.file.take()
    }
}

fn malformed(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::validation(format!("Malformed multipart body: {}", err.body_text()))
}
