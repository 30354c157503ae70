use chrono::Utc;
use contracts::domain::a001_team::{Team, TeamId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::system::tenant::ClubId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_team")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub club_id: String,
    pub code: String,
    pub description: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Team {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| {
            tracing::warn!("a001_team row has non-UUID id: {}", m.id);
            Uuid::new_v4()
        });

        Team {
            base: BaseAggregate::with_metadata(
                TeamId(uuid),
                m.club_id,
                m.code,
                m.description,
                metadata,
            ),
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_by_club(club: &ClubId) -> anyhow::Result<Vec<Team>> {
    let mut items: Vec<Team> = Entity::find()
        .filter(Column::ClubId.eq(club.as_str()))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.sort_by(|a, b| {
        a.base
            .description
            .to_lowercase()
            .cmp(&b.base.description.to_lowercase())
    });
    Ok(items)
}

pub async fn get_by_id(club: &ClubId, id: Uuid) -> anyhow::Result<Option<Team>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::ClubId.eq(club.as_str()))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Занят ли id в любом клубе (первичный ключ общий для всех клубов)
pub async fn id_exists(id: Uuid) -> anyhow::Result<bool> {
    let found = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(found.is_some())
}

pub async fn insert(aggregate: &Team) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        club_id: Set(aggregate.base.club_id.clone()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}
