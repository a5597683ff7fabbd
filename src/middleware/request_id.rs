// ABOUTME: Request id generation for correlation and structured logging
// ABOUTME: Assigns a short unique id to every request lacking an x-request-id header
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use http::{HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Generates `req_<uuid>` request ids for incoming requests.
///
/// Used with `SetRequestIdLayer`, which keeps a caller-supplied
/// `x-request-id` header when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeExerciseRequestId;

impl MakeRequestId for MakeExerciseRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("req_{}", Uuid::new_v4().simple());
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}
