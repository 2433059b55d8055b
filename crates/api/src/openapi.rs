// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` and Swagger UI endpoints
//!
//! Serves the generated specification as JSON plus a static Swagger UI page
//! that loads the bundle from a CDN, so no assets ship with the binary.

use axum::{Json, response::Html};
use utoipa::OpenApi;

use crate::docs::ApiDoc;

const SWAGGER_UI_VERSION: &str = "5.17.14";

/// `OpenAPI` specification endpoint
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Swagger UI endpoint
pub async fn swagger_ui() -> Html<String> {
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Game API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui.css" />
    <style>
        body {{ margin: 0; background: #fafafa; }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            SwaggerUIBundle({{
                url: '/api-doc/openapi.json',
                dom_id: '#swagger-ui',
                deepLinking: true,
            }});
        }}
    </script>
</body>
</html>
"#,
        v = SWAGGER_UI_VERSION
    );
    Html(html)
}
