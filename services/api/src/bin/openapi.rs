//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI 3 document of the SEO writer API. The output path is
//! the first argument, `openapi.json` by default.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());

    let doc = ApiDoc::openapi();
    let operations: usize = doc.paths.paths.values().map(operation_count).sum();
    std::fs::write(&path, doc.to_pretty_json()?)?;
    println!("OpenAPI specification ({} operations) written to {}", operations, path);
    Ok(())
}

fn operation_count(item: &utoipa::openapi::path::PathItem) -> usize {
    [
        item.get.is_some(),
        item.put.is_some(),
        item.post.is_some(),
        item.delete.is_some(),
        item.patch.is_some(),
    ]
    .into_iter()
    .filter(|present| *present)
    .count()
}
