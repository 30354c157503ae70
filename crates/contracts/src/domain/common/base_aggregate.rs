use serde::{Deserialize, Serialize};
use super::EntityMetadata;

/// Базовый агрегат с обязательными полями для всех агрегатов
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Уникальный идентификатор записи
    pub id: Id,
    /// Клуб (тенант), которому принадлежит запись
    #[serde(rename = "clubId")]
    pub club_id: String,
    /// Бизнес-код записи (например, "TM-1a2b3c4d")
    pub code: String,
    /// Описание/название записи
    pub description: String,
    /// Метаданные жизненного цикла
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// Создать новый агрегат
    pub fn new(id: Id, club_id: String, code: String, description: String) -> Self {
        Self {
            id,
            club_id,
            code,
            description,
            metadata: EntityMetadata::new(),
        }
    }

    /// Создать агрегат с существующими метаданными (для загрузки из БД)
    pub fn with_metadata(
        id: Id,
        club_id: String,
        code: String,
        description: String,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            club_id,
            code,
            description,
            metadata,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
