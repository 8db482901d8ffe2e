//! Print the lunch vote OpenAPI document as YAML.

use std::io::Write;

use color_eyre::eyre::{Context, Result};
use lunchvote::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi()
        .to_yaml()
        .wrap_err("failed to render OpenAPI document")?;
    std::io::stdout()
        .write_all(document.as_bytes())
        .wrap_err("failed to write OpenAPI document")
}
