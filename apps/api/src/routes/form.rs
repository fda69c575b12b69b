use std::collections::HashMap;

use axum::extract::Multipart;

use crate::errors::AppError;
use crate::extraction::Upload;

/// A fully-read multipart body: text fields and file parts by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl MultipartForm {
    /// Drains the multipart stream. A part with a filename is a file; an empty
    /// file part without a name (an unselected file input) is ignored.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let bytes = field.bytes().await?;
                    if filename.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.files.insert(name, Upload::new(filename, bytes));
                }
                None => {
                    let value = field.text().await?;
                    form.texts.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// Removes and returns the first file present under any of `names`.
    pub fn take_file(&mut self, names: &[&str]) -> Option<Upload> {
        names.iter().find_map(|n| self.files.remove(*n))
    }
}
