// Notification endpoints
//
// Admin-scoped: none of these paths carry a user id. The list and count
// reads feed the notification mirrors; mark-read answers with the updated
// notification, mark-all-read and delete with a status payload.

use super::segment;
use crate::executor::ApiRequest;

/// `GET /notifications`
pub fn list() -> ApiRequest {
    ApiRequest::get("/notifications")
}

/// `GET /notifications/unread-count`
pub fn unread_count() -> ApiRequest {
    ApiRequest::get("/notifications/unread-count")
}

/// `PUT /notifications/mark-read/{id}`
pub fn mark_read(id: &str) -> ApiRequest {
    ApiRequest::put(format!("/notifications/mark-read/{}", segment(id)))
}

/// `PUT /notifications/mark-all-read`
pub fn mark_all_read() -> ApiRequest {
    ApiRequest::put("/notifications/mark-all-read")
}

/// `DELETE /notifications/delete/{id}`
pub fn delete(id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/notifications/delete/{}", segment(id)))
}

#[cfg(test)]
mod tests {
    use reqwest::Method;

    use super::*;

    #[test]
    fn mutation_methods() {
        assert_eq!(mark_read("n1").method, Method::PUT);
        assert_eq!(mark_read("n1").path, "/notifications/mark-read/n1");
        assert_eq!(mark_all_read().method, Method::PUT);
        assert_eq!(delete("n1").method, Method::DELETE);
        assert_eq!(delete("n1").path, "/notifications/delete/n1");
    }

    #[test]
    fn ids_are_escaped() {
        assert_eq!(
            delete("../mark-all-read").path,
            "/notifications/delete/..%2Fmark-all-read"
        );
        assert_eq!(mark_read("n1#x").path, "/notifications/mark-read/n1%23x");
    }
}
