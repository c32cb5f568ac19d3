use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use tracing::{debug, error};

use crate::entities::{players, prelude::*};
use game_types::{PlayerError, PlayerRecord};

/// Player records keyed by name. Creates are insert-only, updates replace
/// both tallies.
pub struct PlayerRepository {
    db: DatabaseConnection,
}

fn backend(err: DbErr) -> PlayerError {
    error!("Player store failure: {}", err);
    PlayerError::backend(err)
}

fn to_column(field: &str, value: u32) -> Result<i32, PlayerError> {
    i32::try_from(value).map_err(|_| PlayerError::validation(format!("{} out of range", field)))
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_record(model: players::Model) -> PlayerRecord {
        PlayerRecord {
            player_name: model.player_name,
            wins: model.wins.max(0) as u32,
            losses: model.losses.max(0) as u32,
        }
    }

    pub async fn find(&self, player_name: &str) -> Result<PlayerRecord, PlayerError> {
        Players::find_by_id(player_name.to_string())
            .one(&self.db)
            .await
            .map_err(backend)?
            .map(Self::model_to_record)
            .ok_or_else(|| PlayerError::not_found(player_name))
    }

    /// Insert a new player. Fails with `Conflict` instead of overwriting an
    /// existing row.
    pub async fn create(
        &self,
        player_name: &str,
        wins: u32,
        losses: u32,
    ) -> Result<PlayerRecord, PlayerError> {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        let model = players::ActiveModel {
            player_name: sea_orm::ActiveValue::Set(player_name.to_string()),
            wins: sea_orm::ActiveValue::Set(to_column("wins", wins)?),
            losses: sea_orm::ActiveValue::Set(to_column("losses", losses)?),
            created_at: sea_orm::ActiveValue::Set(now),
            updated_at: sea_orm::ActiveValue::Set(now),
        };

        let inserted = Players::insert(model)
            .on_conflict(
                OnConflict::column(players::Column::PlayerName)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;

        match inserted {
            Ok(0) | Err(DbErr::RecordNotInserted) => Err(PlayerError::conflict(player_name)),
            Ok(_) => {
                debug!(player = player_name, "Player created");
                Ok(PlayerRecord::new(player_name, wins, losses))
            }
            Err(err) => Err(backend(err)),
        }
    }

    /// Replace both tallies of an existing player and return the stored row.
    pub async fn update_stats(
        &self,
        player_name: &str,
        wins: u32,
        losses: u32,
    ) -> Result<PlayerRecord, PlayerError> {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        let result = Players::update_many()
            .col_expr(players::Column::Wins, Expr::value(to_column("wins", wins)?))
            .col_expr(players::Column::Losses, Expr::value(to_column("losses", losses)?))
            .col_expr(players::Column::UpdatedAt, Expr::value(now))
            .filter(players::Column::PlayerName.eq(player_name))
            .exec(&self.db)
            .await
            .map_err(backend)?;

        if result.rows_affected == 0 {
            return Err(PlayerError::not_found(player_name));
        }

        debug!(player = player_name, wins, losses, "Player stats replaced");
        self.find(player_name).await
    }
}
