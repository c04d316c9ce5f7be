use poem::error::SizedLimitError;
use poem::http::{Method, header};
use poem::{Endpoint, Middleware, Request, Result};

/// Rejects oversized image uploads from the `Content-Length` header before
/// the body is read.
///
/// Only `POST` to the configured path is checked. Every other request passes
/// through untouched, so bodiless GETs never need a `Content-Length`.
pub struct ImageUploadLimit {
    path: &'static str,
    max_bytes: usize,
}

impl ImageUploadLimit {
    pub fn new(path: &'static str, max_bytes: usize) -> Self {
        Self { path, max_bytes }
    }
}

impl<E: Endpoint> Middleware<E> for ImageUploadLimit {
    type Output = ImageUploadLimitEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        ImageUploadLimitEndpoint {
            inner: ep,
            path: self.path,
            max_bytes: self.max_bytes,
        }
    }
}

pub struct ImageUploadLimitEndpoint<E> {
    inner: E,
    path: &'static str,
    max_bytes: usize,
}

impl<E: Endpoint> ImageUploadLimitEndpoint<E> {
    fn applies_to(&self, req: &Request) -> bool {
        req.method() == Method::POST && req.uri().path().trim_end_matches('/') == self.path
    }
}

impl<E: Endpoint> Endpoint for ImageUploadLimitEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        if self.applies_to(&req) {
            let content_length = req
                .headers()
                .get(header::CONTENT_LENGTH)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .ok_or(SizedLimitError::MissingContentLength)?;

            if content_length > self.max_bytes as u64 {
                tracing::debug!(content_length, max = self.max_bytes, "Image upload rejected by size");
                return Err(SizedLimitError::PayloadTooLarge.into());
            }
        }

        self.inner.call(req).await
    }
}
