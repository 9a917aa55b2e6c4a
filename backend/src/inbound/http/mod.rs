//! HTTP inbound adapter: server-rendered pages over the user directory.

pub mod cache_control;
pub mod detail;
pub mod error;
pub mod forms;
pub mod health;
pub mod list;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod views;

pub use error::ApiResult;

use actix_web::web;

/// Register every page, form endpoint and probe.
///
/// Handlers expect [`state::HttpState`] and [`health::HealthState`] to be
/// registered as app data by the caller.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use roster::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list::list_users)
        .service(list::new_user)
        .service(list::edit_user)
        .service(list::submit_user)
        .service(list::delete_user_by_id)
        .service(list::delete_user)
        .service(detail::user_detail)
        .service(health::ready)
        .service(health::live);
}
