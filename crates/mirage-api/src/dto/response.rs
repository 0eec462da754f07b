//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mirage_core::types::id::{PostId, UserId};
use mirage_core::types::page::Page;
use mirage_entity::post::{Attachment, PostView};
use mirage_entity::user::{Profile, User};

/// The signed-in account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub image: String,
    pub about: Option<String>,
}

impl From<User> for AccountResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            display_name: user.display_name,
            image: user.image,
            about: user.bio,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub image: String,
    pub bio: Option<String>,
    pub followers: i64,
    /// Accounts this user follows.
    pub followee: i64,
    /// Whether the viewer follows this user.
    pub following: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            display_name: profile.display_name,
            image: profile.image,
            bio: profile.bio,
            followers: profile.followers,
            followee: profile.followee,
            following: profile.following,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    pub url: String,
    pub filetype: String,
    pub filename: String,
}

impl From<Attachment> for FileResponse {
    fn from(file: Attachment) -> Self {
        Self {
            url: file.url,
            filetype: file.file_type,
            filename: file.filename,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: PostId,
    pub text: Option<String>,
    pub likes: i64,
    pub liked: bool,
    pub retweets: i64,
    pub retweeted: bool,
    pub is_retweet: bool,
    pub file: Option<FileResponse>,
    pub author: ProfileResponse,
    pub created_at: DateTime<Utc>,
}

impl From<PostView> for PostResponse {
    fn from(post: PostView) -> Self {
        Self {
            id: post.id,
            text: post.text,
            likes: post.likes,
            liked: post.liked,
            retweets: post.retweets,
            retweeted: post.retweeted,
            is_retweet: post.is_retweet,
            file: post.file.map(FileResponse::from),
            author: post.author.into(),
            created_at: post.created_at,
        }
    }
}

/// One page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub posts: Vec<PostResponse>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl From<Page<PostView>> for FeedResponse {
    fn from(page: Page<PostView>) -> Self {
        let page = page.map(PostResponse::from);
        Self {
            posts: page.items,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub storage: String,
}
