//! Validated account inputs.

use validator::Validate;

use crate::upload::Upload;
use crate::validation::{alphanumeric, non_blank};

/// New account details.
#[derive(Debug, Clone, Validate)]
pub struct RegisterInput {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(
        length(min = 4, max = 15, message = "Username must be between 4 and 15 characters"),
        custom(function = "alphanumeric")
    )]
    pub username: String,
    #[validate(length(min = 4, max = 50, message = "Display name must be between 4 and 50 characters"))]
    pub display_name: String,
    #[validate(length(min = 6, max = 150, message = "Password must be between 6 and 150 characters"))]
    pub password: String,
}

impl RegisterInput {
    pub(crate) fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            username: self.username.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
            password: self.password,
        }
    }
}

/// Login credentials.
#[derive(Debug, Clone, Validate)]
pub struct LoginInput {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginInput {
    pub(crate) fn normalized(self) -> Self {
        Self {
            email: self.email.trim().to_lowercase(),
            password: self.password,
        }
    }
}

/// Replacement account fields and an optional new avatar.
#[derive(Debug, Clone, Validate)]
pub struct EditAccountInput {
    #[validate(
        length(min = 4, max = 15, message = "Username must be between 4 and 15 characters"),
        custom(function = "alphanumeric")
    )]
    pub username: String,
    #[validate(length(min = 4, max = 50, message = "Display name must be between 4 and 50 characters"))]
    pub display_name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(max = 160, message = "Bio must be at most 160 characters"))]
    pub bio: Option<String>,
    pub avatar: Option<Upload>,
}

impl EditAccountInput {
    pub(crate) fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            display_name: self.display_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            bio: non_blank(self.bio),
            avatar: self.avatar,
        }
    }
}
