//! Post creation, deletion, reactions, and listings.

use std::sync::Arc;

use tracing::info;

use mirage_core::error::AppError;
use mirage_core::result::AppResult;
use mirage_core::traits::storage::StorageProvider;
use mirage_core::types::cursor::FeedCursor;
use mirage_core::types::id::{FileId, PostId, UserId};
use mirage_core::types::page::{Page, PageRequest};
use mirage_database::{PostRepository, UserRepository};
use mirage_entity::post::{NewAttachment, NewPost, PostView};
use mirage_entity::user::User;
use mirage_storage::media::{self, POST_MEDIA_TYPES};

use super::input::CreatePostInput;
use crate::context::RequestContext;
use crate::hashtag::extract_hashtags;
use crate::upload;
use crate::validation::check;

/// Handles posts and the listings built from them.
#[derive(Debug, Clone)]
pub struct PostService {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    storage: Arc<dyn StorageProvider>,
    page_size: u32,
}

impl PostService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        storage: Arc<dyn StorageProvider>,
        page_size: u32,
    ) -> Self {
        Self {
            users,
            posts,
            storage,
            page_size,
        }
    }

    /// Publish a post.
    ///
    /// The attachment is uploaded before the post and its file row are
    /// written in one transaction. If that write fails the upload is
    /// removed again, so a post and its file exist together or not at all.
    pub async fn create(&self, ctx: &RequestContext, input: CreatePostInput) -> AppResult<PostView> {
        let input = input.normalized();
        check(&input)?;
        if input.text.is_none() && input.media.is_none() {
            return Err(AppError::validation("A post needs text or an attachment"));
        }
        if input.media.as_ref().is_some_and(|m| !m.is_one_of(POST_MEDIA_TYPES)) {
            return Err(AppError::validation(
                "Attachments must be a JPEG, PNG, GIF, or WebP image or an MP4 video",
            ));
        }

        let file = match &input.media {
            Some(upload) => Some(NewAttachment {
                id: FileId::new(),
                file_type: media::essence(&upload.content_type),
                filename: upload.filename.clone(),
                url: upload::store(self.storage.as_ref(), "media", upload).await?,
            }),
            None => None,
        };

        let data = NewPost {
            id: PostId::new(),
            user_id: ctx.user_id,
            hash_tags: input.text.as_deref().map(extract_hashtags).unwrap_or_default(),
            text: input.text,
            file,
        };

        let post = match self.posts.create(&data).await {
            Ok(post) => post,
            Err(e) => {
                if let Some(file) = &data.file {
                    upload::discard(self.storage.as_ref(), &file.url).await;
                }
                return Err(e);
            }
        };

        info!(
            post_id = %post.id,
            user_id = %ctx.user_id,
            hashtags = post.hash_tags.len(),
            with_file = data.file.is_some(),
            "Post created"
        );
        self.view(post.id, Some(ctx.user_id)).await
    }

    /// One post as seen by `viewer`.
    pub async fn view(&self, id: PostId, viewer: Option<UserId>) -> AppResult<PostView> {
        self.posts
            .view(id, viewer)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))
    }

    /// Delete a post. Only its author may do so.
    ///
    /// Returns the post as it was just before deletion.
    pub async fn delete(&self, ctx: &RequestContext, id: PostId) -> AppResult<PostView> {
        let post = self.view(id, Some(ctx.user_id)).await?;
        if post.author.id != ctx.user_id {
            return Err(AppError::authorization("You can only delete your own posts"));
        }

        if !self.posts.delete(id).await? {
            return Err(AppError::not_found("Post not found"));
        }
        if let Some(file) = &post.file {
            upload::discard(self.storage.as_ref(), &file.url).await;
        }

        info!(post_id = %id, user_id = %ctx.user_id, "Post deleted");
        Ok(post)
    }

    /// Like the post, or take the like back.
    pub async fn like(&self, ctx: &RequestContext, id: PostId) -> AppResult<PostView> {
        self.view(id, None).await?;
        let liked = self.posts.toggle_like(ctx.user_id, id).await?;
        info!(post_id = %id, user_id = %ctx.user_id, liked, "Like toggled");
        self.view(id, Some(ctx.user_id)).await
    }

    /// Retweet the post, or take the retweet back.
    pub async fn retweet(&self, ctx: &RequestContext, id: PostId) -> AppResult<PostView> {
        self.view(id, None).await?;
        let retweeted = self.posts.toggle_retweet(ctx.user_id, id).await?;
        info!(post_id = %id, user_id = %ctx.user_id, retweeted, "Retweet toggled");
        self.view(id, Some(ctx.user_id)).await
    }

    /// Posts from, or retweeted by, accounts the viewer follows.
    pub async fn feed(&self, ctx: &RequestContext, cursor: Option<&str>) -> AppResult<Page<PostView>> {
        let page = self.page_request(cursor)?;
        let rows = self.posts.feed(ctx.user_id, &page).await?;
        Ok(Page::from_probe(rows, &page))
    }

    /// Posts written or retweeted by `username`.
    pub async fn profile_posts(
        &self,
        username: &str,
        viewer: Option<UserId>,
        cursor: Option<&str>,
    ) -> AppResult<Page<PostView>> {
        let page = self.page_request(cursor)?;
        let user = self.find_user(username).await?;
        let rows = self.posts.profile_posts(user.id, viewer, &page).await?;
        Ok(Page::from_probe(rows, &page))
    }

    /// Posts liked by `username`.
    pub async fn liked_posts(
        &self,
        username: &str,
        viewer: Option<UserId>,
        cursor: Option<&str>,
    ) -> AppResult<Page<PostView>> {
        let page = self.page_request(cursor)?;
        let user = self.find_user(username).await?;
        let rows = self.posts.liked_posts(user.id, viewer, &page).await?;
        Ok(Page::from_probe(rows, &page))
    }

    /// Posts tagged with `hashtag`; the leading `#` is optional.
    pub async fn hashtag(
        &self,
        hashtag: &str,
        viewer: Option<UserId>,
        cursor: Option<&str>,
    ) -> AppResult<Page<PostView>> {
        let page = self.page_request(cursor)?;
        let tag = hashtag.trim().trim_start_matches('#');
        if tag.is_empty() {
            return Err(AppError::validation("Hashtag must not be empty"));
        }
        let rows = self
            .posts
            .hashtag_posts(&format!("#{tag}"), viewer, &page)
            .await?;
        Ok(Page::from_probe(rows, &page))
    }

    fn page_request(&self, cursor: Option<&str>) -> AppResult<PageRequest> {
        let cursor = cursor
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(FeedCursor::decode)
            .transpose()?;
        Ok(PageRequest::new(cursor, self.page_size))
    }

    async fn find_user(&self, username: &str) -> AppResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }
}
