//! Turns failed searches into HTTP responses.
//!
//! A rejected query parameter becomes a 400 that echoes the offending field,
//! so clients can correct the query. A search engine failure becomes a 500
//! with a generic message; its details stay in the log under the trace id
//! the client receives.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result type returned by the search handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent to clients in place of engine failure details.
const ENGINE_FAILURE_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The body a client may see: rejections verbatim, engine failures reduced
/// to the generic message and trace id.
fn client_body(error: &Error) -> Cow<'_, Error> {
    match error.code() {
        ErrorCode::InvalidRequest => Cow::Borrowed(error),
        ErrorCode::InternalError => {
            let generic = Error::internal(ENGINE_FAILURE_MESSAGE);
            Cow::Owned(match error.trace_id() {
                Some(id) => generic.with_trace_id(id.to_owned()),
                None => generic,
            })
        }
    }
}

fn log_failure(error: &Error) {
    let trace_id = error.trace_id().unwrap_or_default();
    match error.code() {
        ErrorCode::InvalidRequest => debug!(
            trace_id,
            reason = error.message(),
            details = ?error.details(),
            "search request rejected"
        ),
        ErrorCode::InternalError => error!(
            trace_id,
            reason = error.message(),
            "search failed; client sees a generic error"
        ),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_failure(self);

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_body(self))
    }
}
