// Endpoint bindings
//
// One module per backend resource. Each function describes a single REST
// call as an `ApiRequest`; response envelopes that wrap the resource live
// next to the calls that return them.

pub mod carts;
pub mod notifications;
pub mod orders;
pub mod wishlist;

use std::borrow::Cow;

/// Percent-encode an identifier so it occupies exactly one path segment.
///
/// `/`, `?`, `#` and `%` are escaped; a bare `.` or `..` is left for the
/// executor to reject.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}
