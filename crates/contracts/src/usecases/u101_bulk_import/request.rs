use serde::{Deserialize, Serialize};

/// Тело запроса upload: строки без ошибок в порядке исходного файла
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRequest<U> {
    pub rows: Vec<U>,
}

impl<U> UploadRequest<U> {
    pub fn new(rows: Vec<U>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
