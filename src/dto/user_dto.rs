use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserRole;
use crate::utils::validation::validate_not_blank;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(required, length(max = 100), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(required, email)]
    pub email: Option<String>,
    #[validate(required, length(min = 8, max = 128))]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(max = 100), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    pub role: Option<UserRole>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub id: Option<Uuid>,
    pub role: Option<UserRole>,
}
