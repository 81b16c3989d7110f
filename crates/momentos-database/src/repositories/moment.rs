//! Moment repository: CRUD, feed queries, tags, and the view counter.

use sqlx::PgPool;
use uuid::Uuid;

use momentos_core::error::{AppError, ErrorKind};
use momentos_core::result::AppResult;
use momentos_core::types::pagination::{PageRequest, PageResponse};
use momentos_entity::moment::{CreateMoment, FeedFilter, Moment, MomentListing, MomentTag, UpdateMoment};

/// Columns of a [`MomentListing`]. `$1` is the viewer id (nullable).
const LISTING_COLUMNS: &str = "m.*, \
        u.username AS owner_username, \
        u.first_name AS owner_first_name, \
        u.last_name AS owner_last_name, \
        u.avatar AS owner_avatar, \
        u.is_private AS owner_is_private, \
        (SELECT COUNT(*) FROM likes l WHERE l.moment_id = m.id) AS total_likes, \
        EXISTS (SELECT 1 FROM likes l WHERE l.moment_id = m.id AND l.user_id = $1) AS is_liked";

/// Moments the viewer `$1` may see: their own, or public moments of public users.
const VISIBLE_TO_VIEWER: &str =
    "(m.user_id = $1::uuid OR (u.is_private = FALSE AND m.is_private = FALSE))";

/// Feed filters over `$2` tag slug, `$3` owner username, `$4` search pattern.
/// `EXISTS` keeps one row per moment however many tags match.
const FEED_FILTERS: &str = "($2::text IS NULL OR EXISTS ( \
            SELECT 1 FROM moment_tags mt JOIN tags t ON t.id = mt.tag_id \
            WHERE mt.moment_id = m.id AND t.slug = $2)) \
        AND ($3::text IS NULL OR LOWER(u.username) = LOWER($3)) \
        AND ($4::text IS NULL OR m.title ILIKE $4 OR m.description ILIKE $4 OR EXISTS ( \
            SELECT 1 FROM moment_tags mt JOIN tags t ON t.id = mt.tag_id \
            WHERE mt.moment_id = m.id AND t.name ILIKE $4))";

/// Repository for moments and their tag links.
#[derive(Debug, Clone)]
pub struct MomentRepository {
    pool: PgPool,
}

impl MomentRepository {
    /// Create a new moment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a bare moment row.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Moment>> {
        sqlx::query_as::<_, Moment>("SELECT * FROM moments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find moment", e))
    }

    /// Find a moment with owner and like data, without visibility filtering.
    pub async fn find_listing(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> AppResult<Option<MomentListing>> {
        sqlx::query_as::<_, MomentListing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM moments m JOIN users u ON u.id = m.user_id \
             WHERE m.id = $2"
        ))
        .bind(viewer)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load moment", e))
    }

    /// Run a filtered, sorted, paginated feed query.
    pub async fn feed(
        &self,
        filter: &FeedFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<MomentListing>> {
        let search = filter.search_pattern();

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM moments m JOIN users u ON u.id = m.user_id \
             WHERE {VISIBLE_TO_VIEWER} AND {FEED_FILTERS}"
        ))
        .bind(filter.viewer)
        .bind(&filter.tag_slug)
        .bind(&filter.owner_username)
        .bind(&search)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count feed", e))?;

        let items = sqlx::query_as::<_, MomentListing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM moments m JOIN users u ON u.id = m.user_id \
             WHERE {VISIBLE_TO_VIEWER} AND {FEED_FILTERS} \
             ORDER BY {} LIMIT $5 OFFSET $6",
            filter.sort.order_by_sql()
        ))
        .bind(filter.viewer)
        .bind(&filter.tag_slug)
        .bind(&filter.owner_username)
        .bind(&search)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load feed", e))?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    /// Visible moments related to `moment_id`: most shared tags first, then newest.
    pub async fn suggestions(
        &self,
        moment_id: Uuid,
        viewer: Option<Uuid>,
        limit: i64,
    ) -> AppResult<Vec<MomentListing>> {
        sqlx::query_as::<_, MomentListing>(&format!(
            "SELECT {LISTING_COLUMNS} FROM moments m JOIN users u ON u.id = m.user_id \
             WHERE m.id <> $2 AND {VISIBLE_TO_VIEWER} \
             ORDER BY (SELECT COUNT(*) FROM moment_tags a JOIN moment_tags b ON b.tag_id = a.tag_id \
                       WHERE a.moment_id = m.id AND b.moment_id = $2) DESC, \
                      m.created_at DESC, m.id DESC \
             LIMIT $3"
        ))
        .bind(viewer)
        .bind(moment_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load suggestions", e))
    }

    /// Tags attached to each of the given moments, ordered by name.
    pub async fn tags_for(&self, moment_ids: &[Uuid]) -> AppResult<Vec<MomentTag>> {
        if moment_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, MomentTag>(
            "SELECT mt.moment_id, t.id, t.name, t.slug FROM moment_tags mt \
             JOIN tags t ON t.id = mt.tag_id \
             WHERE mt.moment_id = ANY($1) ORDER BY t.name ASC",
        )
        .bind(moment_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load moment tags", e))
    }

    /// Insert a moment and link its tags in one transaction.
    pub async fn create(&self, data: &CreateMoment, tag_ids: &[Uuid]) -> AppResult<Moment> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let moment = sqlx::query_as::<_, Moment>(
            "INSERT INTO moments (user_id, title, description, video, thumbnail, duration_seconds, is_private) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.video)
        .bind(&data.thumbnail)
        .bind(data.duration_seconds)
        .bind(data.is_private)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create moment", e))?;

        sqlx::query(
            "INSERT INTO moment_tags (moment_id, tag_id) SELECT $1, UNNEST($2::uuid[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(moment.id)
        .bind(tag_ids)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to tag moment", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit moment", e)
        })?;

        Ok(moment)
    }

    /// Apply a partial update, optionally replacing the tag set.
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateMoment,
        tag_ids: Option<&[Uuid]>,
    ) -> AppResult<Moment> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let moment = sqlx::query_as::<_, Moment>(
            "UPDATE moments SET title = COALESCE($2, title), \
                                description = COALESCE($3, description), \
                                thumbnail = COALESCE($4, thumbnail), \
                                is_private = COALESCE($5, is_private), \
                                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.thumbnail)
        .bind(data.is_private)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update moment", e))?
        .ok_or_else(|| AppError::not_found(format!("Moment {id} not found")))?;

        if let Some(tag_ids) = tag_ids {
            sqlx::query("DELETE FROM moment_tags WHERE moment_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to clear moment tags", e)
                })?;

            sqlx::query(
                "INSERT INTO moment_tags (moment_id, tag_id) SELECT $1, UNNEST($2::uuid[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(tag_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to tag moment", e))?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit moment update", e)
        })?;

        Ok(moment)
    }

    /// Delete a moment. Likes, comments, tags links and notifications cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM moments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete moment", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Atomically add one view and return the new count.
    pub async fn increment_views(&self, id: Uuid) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, i64>(
            "UPDATE moments SET views = views + 1 WHERE id = $1 RETURNING views",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count view", e))
    }
}
