use utoipa::OpenApi;

use crate::routes::{health, message};

#[derive(OpenApi)]
#[openapi(info(
    title = "resume-board",
    description = "Guestbook API for a personal resume site",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(message::MessageApi::openapi());
    root
}
