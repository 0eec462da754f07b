//! Post repository implementation.
//!
//! Every listing shares one projection: the post, its author's profile, the
//! like and retweet counters, the viewer's membership flags, and the
//! attachment. Bind order is fixed across listings:
//!
//! | param | meaning                                  |
//! |-------|------------------------------------------|
//! | `$1`  | viewer (nullable)                        |
//! | `$2`  | cursor timestamp (nullable)              |
//! | `$3`  | cursor tie-break id (nullable)           |
//! | `$4`  | row limit, page size plus one            |
//! | `$5`  | listing subject (user id or hashtag)     |

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mirage_core::result::AppResult;
use mirage_core::types::id::{FileId, PostId, UserId};
use mirage_core::types::page::PageRequest;
use mirage_entity::post::{Attachment, NewPost, Post, PostView};
use mirage_entity::user::Profile;

use super::PostRepository;
use crate::error::db_error;

macro_rules! view_columns {
    () => {
        "p.id, p.text, p.hash_tags, p.created_at, \
         u.id AS author_id, u.username AS author_username, \
         u.display_name AS author_display_name, u.image AS author_image, \
         u.bio AS author_bio, u.created_at AS author_created_at, \
         (SELECT COUNT(*) FROM followee fw WHERE fw.followee_id = u.id) AS author_followers, \
         (SELECT COUNT(*) FROM followee fw WHERE fw.user_id = u.id) AS author_followee, \
         EXISTS (SELECT 1 FROM followee fw WHERE fw.user_id = $1 AND fw.followee_id = u.id) AS author_following, \
         (SELECT COUNT(*) FROM post_likes lk WHERE lk.post_id = p.id) AS likes, \
         EXISTS (SELECT 1 FROM post_likes lk WHERE lk.post_id = p.id AND lk.user_id = $1) AS liked, \
         (SELECT COUNT(*) FROM post_retweets rt WHERE rt.post_id = p.id) AS retweets, \
         EXISTS (SELECT 1 FROM post_retweets rt WHERE rt.post_id = p.id AND rt.user_id = $1) AS retweeted, \
         f.id AS file_id, f.file_type, f.filename AS file_name, f.url AS file_url \
         FROM posts p \
         JOIN users u ON u.id = p.user_id \
         LEFT JOIN files f ON f.post_id = p.id"
    };
}

/// A newest-first listing: `$is_retweet` marks rows that qualify through a
/// retweet, `$filter` selects the rows. Each post matches at most once
/// because qualification goes through `EXISTS`, never a multiplying join.
macro_rules! listing_query {
    ($is_retweet:literal, $filter:literal) => {
        concat!(
            "SELECT ",
            $is_retweet,
            " AS is_retweet, ",
            view_columns!(),
            " WHERE (",
            $filter,
            ") AND ($2::timestamptz IS NULL OR p.created_at < $2 \
               OR ($3::uuid IS NOT NULL AND p.created_at = $2 AND p.id < $3)) \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $4"
        )
    };
}

const FEED_QUERY: &str = listing_query!(
    "NOT EXISTS (SELECT 1 FROM followee fw WHERE fw.user_id = $5 AND fw.followee_id = p.user_id)",
    "EXISTS (SELECT 1 FROM followee fw WHERE fw.user_id = $5 AND fw.followee_id = p.user_id) \
     OR EXISTS (SELECT 1 FROM post_retweets rt JOIN followee fw ON fw.followee_id = rt.user_id \
                WHERE rt.post_id = p.id AND fw.user_id = $5)"
);

const PROFILE_POSTS_QUERY: &str = listing_query!(
    "p.user_id <> $5",
    "p.user_id = $5 \
     OR EXISTS (SELECT 1 FROM post_retweets rt WHERE rt.post_id = p.id AND rt.user_id = $5)"
);

const LIKED_POSTS_QUERY: &str = listing_query!(
    "FALSE",
    "EXISTS (SELECT 1 FROM post_likes lk WHERE lk.post_id = p.id AND lk.user_id = $5)"
);

const HASHTAG_QUERY: &str = listing_query!(
    "FALSE",
    "EXISTS (SELECT 1 FROM unnest(p.hash_tags) AS tag WHERE lower(tag) = lower($5))"
);

const SINGLE_VIEW_QUERY: &str = concat!(
    "SELECT FALSE AS is_retweet, ",
    view_columns!(),
    " WHERE p.id = $2"
);

/// Flat row produced by the shared projection.
#[derive(Debug, FromRow)]
struct PostViewRow {
    id: PostId,
    text: Option<String>,
    hash_tags: Vec<String>,
    created_at: DateTime<Utc>,
    is_retweet: bool,
    author_id: UserId,
    author_username: String,
    author_display_name: String,
    author_image: String,
    author_bio: Option<String>,
    author_created_at: DateTime<Utc>,
    author_followers: i64,
    author_followee: i64,
    author_following: bool,
    likes: i64,
    liked: bool,
    retweets: i64,
    retweeted: bool,
    file_id: Option<FileId>,
    file_type: Option<String>,
    file_name: Option<String>,
    file_url: Option<String>,
}

impl From<PostViewRow> for PostView {
    fn from(row: PostViewRow) -> Self {
        let file = match (row.file_id, row.file_type, row.file_name, row.file_url) {
            (Some(id), Some(file_type), Some(filename), Some(url)) => Some(Attachment {
                id,
                file_type,
                filename,
                url,
                post_id: row.id,
            }),
            _ => None,
        };
        PostView {
            id: row.id,
            text: row.text,
            hash_tags: row.hash_tags,
            author: Profile {
                id: row.author_id,
                username: row.author_username,
                display_name: row.author_display_name,
                image: row.author_image,
                bio: row.author_bio,
                followers: row.author_followers,
                followee: row.author_followee,
                following: row.author_following,
                created_at: row.author_created_at,
            },
            likes: row.likes,
            liked: row.liked,
            retweets: row.retweets,
            retweeted: row.retweeted,
            is_retweet: row.is_retweet,
            file,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed [`PostRepository`].
#[derive(Debug, Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn listing<S>(
        &self,
        sql: &'static str,
        viewer: Option<UserId>,
        page: &PageRequest,
        subject: S,
        context: &'static str,
    ) -> AppResult<Vec<PostView>>
    where
        S: for<'q> sqlx::Encode<'q, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + Send + 'static,
    {
        let cursor = page.cursor;
        let rows = sqlx::query_as::<_, PostViewRow>(sql)
            .bind(viewer)
            .bind(cursor.map(|c| c.created_at))
            .bind(cursor.and_then(|c| c.id))
            .bind(page.fetch_limit())
            .bind(subject)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error(context))?;
        Ok(rows.into_iter().map(PostView::from).collect())
    }

    async fn toggle(&self, table: &'static str, user: UserId, post: PostId) -> AppResult<bool> {
        let removed = sqlx::query(&format!(
            "DELETE FROM {table} WHERE user_id = $1 AND post_id = $2"
        ))
        .bind(user)
        .bind(post)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to update post"))?
        .rows_affected();
        if removed > 0 {
            return Ok(false);
        }

        sqlx::query(&format!(
            "INSERT INTO {table} (user_id, post_id) VALUES ($1, $2) ON CONFLICT DO NOTHING"
        ))
        .bind(user)
        .bind(post)
        .execute(&self.pool)
        .await
        .map_err(db_error("Post not found"))?;
        Ok(true)
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create(&self, data: &NewPost) -> AppResult<Post> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to start transaction"))?;

        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO posts (id, text, user_id, hash_tags) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.id)
        .bind(&data.text)
        .bind(data.user_id)
        .bind(&data.hash_tags)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to create post"))?;

        if let Some(file) = &data.file {
            sqlx::query(
                "INSERT INTO files (id, file_type, filename, url, post_id) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(file.id)
            .bind(&file.file_type)
            .bind(&file.filename)
            .bind(&file.url)
            .bind(post.id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to attach file to post"))?;
        }

        tx.commit().await.map_err(db_error("Failed to commit post"))?;
        Ok(post)
    }

    async fn find_by_id(&self, id: PostId) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find post"))
    }

    async fn view(&self, id: PostId, viewer: Option<UserId>) -> AppResult<Option<PostView>> {
        let row = sqlx::query_as::<_, PostViewRow>(SINGLE_VIEW_QUERY)
            .bind(viewer)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load post"))?;
        Ok(row.map(PostView::from))
    }

    async fn delete(&self, id: PostId) -> AppResult<bool> {
        let removed = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete post"))?
            .rows_affected();
        Ok(removed > 0)
    }

    async fn toggle_like(&self, user: UserId, post: PostId) -> AppResult<bool> {
        self.toggle("post_likes", user, post).await
    }

    async fn toggle_retweet(&self, user: UserId, post: PostId) -> AppResult<bool> {
        self.toggle("post_retweets", user, post).await
    }

    async fn feed(&self, viewer: UserId, page: &PageRequest) -> AppResult<Vec<PostView>> {
        self.listing(FEED_QUERY, Some(viewer), page, viewer, "Failed to load feed")
            .await
    }

    async fn profile_posts(
        &self,
        author: UserId,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>> {
        self.listing(PROFILE_POSTS_QUERY, viewer, page, author, "Failed to load posts")
            .await
    }

    async fn liked_posts(
        &self,
        user: UserId,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>> {
        self.listing(LIKED_POSTS_QUERY, viewer, page, user, "Failed to load liked posts")
            .await
    }

    async fn hashtag_posts(
        &self,
        tag: &str,
        viewer: Option<UserId>,
        page: &PageRequest,
    ) -> AppResult<Vec<PostView>> {
        self.listing(HASHTAG_QUERY, viewer, page, tag.to_string(), "Failed to search posts")
            .await
    }
}
