//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::{test, web};

use super::state::HttpState;
use super::views::Views;
use crate::domain::UserRecord;
use crate::domain::test_support::directory_with;

/// Handler state over a directory seeded with `records` and a fixed clock.
pub(crate) fn test_state(records: Vec<UserRecord>) -> web::Data<HttpState> {
    let views = Views::new().expect("embedded templates parse");
    web::Data::new(HttpState::new(
        Arc::new(directory_with(records)),
        Arc::new(views),
    ))
}

/// Read a response body as UTF-8 text.
pub(crate) async fn body_text<B: MessageBody>(response: ServiceResponse<B>) -> String {
    let bytes = test::read_body(response).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// `Location` header of a redirect.
pub(crate) fn location<B>(response: &ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}
