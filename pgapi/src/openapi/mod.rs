//! OpenAPI documentation.
//!
//! [`ApiDoc`] is assembled at compile time from the `#[utoipa::path]` annotations on the
//! handlers and the `ToSchema` derives on the API models. It is served as JSON at
//! `/docs/openapi.json` and rendered by Scalar at `/docs`.

mod api;

pub use api::ApiDoc;
