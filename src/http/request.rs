//! Request body extraction.
//!
//! Only bodies declared as `application/xml` are read, mirroring a plain
//! text body parser bound to that media type. Anything else yields an empty
//! payload rather than an error.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
};

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

const XML_MEDIA_TYPE: &str = "application/xml";

/// Raw request text, taken verbatim from an XML-typed body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlBody(pub String);

/// Whether `headers` declare an `application/xml` body.
pub fn is_xml_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|media| media.trim().eq_ignore_ascii_case(XML_MEDIA_TYPE))
        .unwrap_or(false)
}

impl<S> FromRequest<S> for XmlBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_xml_content(req.headers()) {
            tracing::debug!("Body not declared as XML; using empty payload");
            return Ok(XmlBody::default());
        }

        // Honors DefaultBodyLimit; oversize bodies are rejected with 413.
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let text = match String::from_utf8(bytes.to_vec()) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Body is not valid UTF-8; decoding lossily");
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(XmlBody(text))
    }
}
