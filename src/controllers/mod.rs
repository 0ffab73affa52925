pub mod bookings;
pub mod inquiries;
pub mod rooms;
pub mod users;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(rooms::routes())
        .merge(bookings::routes())
        .merge(inquiries::routes())
        .merge(users::routes())
}

/// Paging window for list endpoints. `page` is floored at 1 and `limit` is
/// clamped to 1..=100; the offset is computed in i64 so oversized page
/// numbers query an empty window instead of overflowing.
pub(crate) fn page_window(page: Option<u32>, limit: Option<u32>) -> (u32, u32, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).clamp(1, 100);
    let offset = (i64::from(page) - 1) * i64::from(limit);
    (page, limit, offset)
}
