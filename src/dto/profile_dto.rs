use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::validate_not_blank;

/// Changing the password requires the current one
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    pub current_password: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub new_password: Option<String>,
}

/// Base64 image, raw or as a `data:` URL
#[derive(Debug, Deserialize, Validate)]
pub struct AvatarUploadRequest {
    #[validate(required, length(min = 1))]
    pub avatar: Option<String>,
}
