//! Banner repository: planned banners and tile claims.
//!
//! A planned banner is the latest capture of a banner tile during the current event, read
//! from the ticket log of the planner's claims channel, joined with the planner's claim on
//! that tile. Claims live in `planner_tile_claim`, at most one row per (planner, tile); the
//! row is kept when unclaimed with its claimant cleared.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::planner::PlannerRepository,
    model::banner::{GetPlannedBannersParam, PlannedBanner, TileStatus},
    util::parse::parse_optional_id_column,
};

/// Repository providing planned banner queries and claim operations.
pub struct BannerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BannerRepository<'a> {
    /// Creates a new BannerRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `BannerRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists the planned banners of a planner.
    ///
    /// Planners without a claims channel have no planned banners. The expiry window and claim
    /// filters apply to the latest capture of each tile only.
    ///
    /// # Arguments
    /// - `param` - Planner, candidate tiles, event start and optional filters
    ///
    /// # Returns
    /// - `Ok(Vec<PlannedBanner>)` - Banners ordered by expiration
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_planned_banners(
        &self,
        param: GetPlannedBannersParam,
    ) -> Result<Vec<PlannedBanner>, DbErr> {
        let Some(claims_channel_id) = self.claims_channel_of(param.planner_channel_id).await?
        else {
            return Ok(Vec::new());
        };
        if param.tiles.is_empty() {
            return Ok(Vec::new());
        }

        let captures = self
            .latest_captures(claims_channel_id, &param.tiles, param.since)
            .await?;
        let claims = self.claims_for(param.planner_channel_id, &param.tiles).await?;

        let mut banners = Vec::new();
        for (tile, captured_at) in captures {
            let (claimed_by, claimed_at) = claims.get(&tile).cloned().unwrap_or((None, None));
            let banner = PlannedBanner {
                tile,
                planner_channel_id: param.planner_channel_id,
                captured_at,
                claimed_by,
                claimed_at,
            };

            if let Some((from, to)) = param.expire_between {
                let expires_at = banner.expires_at();
                if expires_at < from || expires_at >= to {
                    continue;
                }
            }
            if !param.claimed_status.matches(banner.claimed_by) {
                continue;
            }

            banners.push(banner);
        }

        banners.sort_by(|a, b| {
            a.captured_at
                .cmp(&b.captured_at)
                .then_with(|| a.tile.cmp(&b.tile))
        });

        Ok(banners)
    }

    /// Lists the banners of all active planners that expire soonest.
    ///
    /// # Arguments
    /// - `tiles` - Banner tile codes
    /// - `now` - Banners already expired at this time are skipped
    /// - `since` - Start of the current event
    /// - `limit` - Maximum number of banners returned
    ///
    /// # Returns
    /// - `Ok(Vec<PlannedBanner>)` - Up to `limit` banners, soonest first
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_closest_to_expire(
        &self,
        tiles: &[String],
        now: DateTime<Utc>,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<PlannedBanner>, DbErr> {
        let planners = PlannerRepository::new(self.db).get_all(true).await?;

        let mut banners = Vec::new();
        for planner in planners {
            let planned = self
                .get_planned_banners(
                    GetPlannedBannersParam::new(planner.channel_id, tiles.to_vec(), since)
                        .expiring_between(now, DateTime::<Utc>::MAX_UTC),
                )
                .await?;
            banners.extend(planned);
        }

        banners.sort_by(|a, b| {
            a.expires_at()
                .cmp(&b.expires_at())
                .then_with(|| a.planner_channel_id.cmp(&b.planner_channel_id))
                .then_with(|| a.tile.cmp(&b.tile))
        });
        banners.truncate(limit);

        Ok(banners)
    }

    /// Gets the claim and capture state of one tile.
    ///
    /// # Returns
    /// - `Ok(Some(TileStatus))` - Planner exists
    /// - `Ok(None)` - Channel is not a planner
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_tile_status(
        &self,
        planner_channel_id: u64,
        tile: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<TileStatus>, DbErr> {
        let Some(planner) = PlannerRepository::new(self.db)
            .get_by_channel_id(planner_channel_id)
            .await?
        else {
            return Ok(None);
        };

        let tiles = [tile.to_string()];
        let captured_at = match planner.claims_channel_id {
            Some(claims_channel_id) => self
                .latest_captures(claims_channel_id, &tiles, since)
                .await?
                .remove(tile),
            None => None,
        };
        let (claimed_by, claimed_at) = self
            .claims_for(planner_channel_id, &tiles)
            .await?
            .remove(tile)
            .unwrap_or((None, None));

        Ok(Some(TileStatus {
            tile: tile.to_string(),
            planner_channel_id,
            claimed_by,
            claimed_at,
            captured_at,
        }))
    }

    /// Claims a tile for a member.
    ///
    /// The claimant and the claim time are written by one conditional update that only
    /// matches an unclaimed row, so two racing claims cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(true)` - Tile claimed
    /// - `Ok(false)` - Tile was already claimed
    /// - `Err(DbErr)` - Database error during update or insert
    pub async fn claim_tile(
        &self,
        planner_channel_id: u64,
        tile: &str,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::PlannerTileClaim::update_many()
            .col_expr(
                entity::planner_tile_claim::Column::ClaimedBy,
                Expr::value(Some(user_id.to_string())),
            )
            .col_expr(
                entity::planner_tile_claim::Column::ClaimedAt,
                Expr::value(Some(now)),
            )
            .filter(
                entity::planner_tile_claim::Column::PlannerChannelId
                    .eq(planner_channel_id.to_string()),
            )
            .filter(entity::planner_tile_claim::Column::Tile.eq(tile))
            .filter(entity::planner_tile_claim::Column::ClaimedBy.is_null())
            .exec(self.db)
            .await?;

        if result.rows_affected > 0 {
            return Ok(true);
        }

        if self.find_claim(planner_channel_id, tile).await?.is_some() {
            return Ok(false);
        }

        entity::planner_tile_claim::ActiveModel {
            id: ActiveValue::NotSet,
            planner_channel_id: ActiveValue::Set(planner_channel_id.to_string()),
            tile: ActiveValue::Set(tile.to_string()),
            claimed_by: ActiveValue::Set(Some(user_id.to_string())),
            claimed_at: ActiveValue::Set(Some(now)),
        }
        .insert(self.db)
        .await?;

        Ok(true)
    }

    /// Clears the claim on a tile.
    ///
    /// # Returns
    /// - `Ok(Some(user_id))` - Tile unclaimed, returns the previous claimant
    /// - `Ok(None)` - Tile was not claimed
    /// - `Err(DbErr)` - Database error during update
    pub async fn unclaim_tile(
        &self,
        planner_channel_id: u64,
        tile: &str,
    ) -> Result<Option<u64>, DbErr> {
        let Some(claim) = self.find_claim(planner_channel_id, tile).await? else {
            return Ok(None);
        };
        let Some(previous) = claim.claimed_by.clone() else {
            return Ok(None);
        };

        let result = entity::prelude::PlannerTileClaim::update_many()
            .col_expr(
                entity::planner_tile_claim::Column::ClaimedBy,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::planner_tile_claim::Column::ClaimedAt,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .filter(entity::planner_tile_claim::Column::Id.eq(claim.id))
            .filter(entity::planner_tile_claim::Column::ClaimedBy.eq(previous.as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        parse_optional_id_column("claimed_by", Some(&previous))
    }

    /// Lists the tiles a member claims in a planner.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Claimed tile codes, sorted
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_claims_by(
        &self,
        user_id: u64,
        planner_channel_id: u64,
    ) -> Result<Vec<String>, DbErr> {
        let claims = entity::prelude::PlannerTileClaim::find()
            .filter(
                entity::planner_tile_claim::Column::PlannerChannelId
                    .eq(planner_channel_id.to_string()),
            )
            .filter(entity::planner_tile_claim::Column::ClaimedBy.eq(user_id.to_string()))
            .order_by_asc(entity::planner_tile_claim::Column::Tile)
            .all(self.db)
            .await?;

        Ok(claims.into_iter().map(|claim| claim.tile).collect())
    }

    async fn claims_channel_of(&self, planner_channel_id: u64) -> Result<Option<u64>, DbErr> {
        let planner = PlannerRepository::new(self.db)
            .get_by_channel_id(planner_channel_id)
            .await?;

        Ok(planner.and_then(|planner| planner.claims_channel_id))
    }

    /// Latest capture time of each tile in the claims channel since the event start.
    async fn latest_captures(
        &self,
        claims_channel_id: u64,
        tiles: &[String],
        since: DateTime<Utc>,
    ) -> Result<BTreeMap<String, DateTime<Utc>>, DbErr> {
        let captures = entity::prelude::TileCapture::find()
            .filter(entity::tile_capture::Column::ClaimsChannelId.eq(claims_channel_id.to_string()))
            .filter(entity::tile_capture::Column::Tile.is_in(tiles.iter().cloned()))
            .filter(entity::tile_capture::Column::CapturedAt.gte(since))
            .all(self.db)
            .await?;

        let mut latest: BTreeMap<String, DateTime<Utc>> = BTreeMap::new();
        for capture in captures {
            latest
                .entry(capture.tile)
                .and_modify(|at| {
                    if capture.captured_at > *at {
                        *at = capture.captured_at;
                    }
                })
                .or_insert(capture.captured_at);
        }

        Ok(latest)
    }

    /// Claimant and claim time of each tile that has a claim row.
    async fn claims_for(
        &self,
        planner_channel_id: u64,
        tiles: &[String],
    ) -> Result<HashMap<String, (Option<u64>, Option<DateTime<Utc>>)>, DbErr> {
        let claims = entity::prelude::PlannerTileClaim::find()
            .filter(
                entity::planner_tile_claim::Column::PlannerChannelId
                    .eq(planner_channel_id.to_string()),
            )
            .filter(entity::planner_tile_claim::Column::Tile.is_in(tiles.iter().cloned()))
            .all(self.db)
            .await?;

        let mut by_tile = HashMap::new();
        for claim in claims {
            let claimed_by = parse_optional_id_column("claimed_by", claim.claimed_by.as_deref())?;
            let claimed_at = claimed_by.and(claim.claimed_at);
            by_tile.insert(claim.tile, (claimed_by, claimed_at));
        }

        Ok(by_tile)
    }

    async fn find_claim(
        &self,
        planner_channel_id: u64,
        tile: &str,
    ) -> Result<Option<entity::planner_tile_claim::Model>, DbErr> {
        entity::prelude::PlannerTileClaim::find()
            .filter(
                entity::planner_tile_claim::Column::PlannerChannelId
                    .eq(planner_channel_id.to_string()),
            )
            .filter(entity::planner_tile_claim::Column::Tile.eq(tile))
            .one(self.db)
            .await
    }
}
