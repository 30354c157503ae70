use chrono::Utc;
use contracts::domain::a001_team::TeamId;
use contracts::domain::a002_player::{Player, PlayerId};
use contracts::domain::common::{BaseAggregate, EntityMetadata};
use contracts::system::tenant::ClubId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_player")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub club_id: String,
    pub team_id: String,
    pub code: String,
    pub description: String,
    pub email: Option<String>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn parse_uuid(raw: &str, column: &str) -> Uuid {
    Uuid::parse_str(raw).unwrap_or_else(|_| {
        tracing::warn!("a002_player.{} is not a UUID: {}", column, raw);
        Uuid::nil()
    })
}

impl From<Model> for Player {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };

        Player {
            base: BaseAggregate::with_metadata(
                PlayerId(parse_uuid(&m.id, "id")),
                m.club_id,
                m.code,
                m.description,
                metadata,
            ),
            team_id: TeamId(parse_uuid(&m.team_id, "team_id")),
            email: m.email,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn list_by_club(club: &ClubId) -> anyhow::Result<Vec<Player>> {
    let mut items: Vec<Player> = Entity::find()
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

pub async fn list_by_team(club: &ClubId, team_id: Uuid) -> anyhow::Result<Vec<Player>> {
    let items = Entity::find()
        .filter(Column::ClubId.eq(club.as_str()))
        .filter(Column::TeamId.eq(team_id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Занят ли id в любом клубе (первичный ключ общий для всех клубов)
pub async fn id_exists(id: Uuid) -> anyhow::Result<bool> {
    let found = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(found.is_some())
}

pub async fn insert(aggregate: &Player) -> anyhow::Result<Uuid> {
    let uuid = aggregate.base.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        club_id: Set(aggregate.base.club_id.clone()),
        team_id: Set(aggregate.team_id.value().to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        email: Set(aggregate.email.clone()),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}
