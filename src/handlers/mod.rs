use axum::Json;

pub mod appointments;
pub mod doctors;
pub mod error;
pub mod login;

use error::MessageBody;

pub async fn index() -> Json<MessageBody> {
    Json(MessageBody {
        message: "Hospital scheduling API".to_string(),
    })
}
