use anyhow::Result;

// Print the OpenAPI document for the API (used by docs tooling)
fn main() -> Result<()> {
    let spec = jiten::api::openapi().to_pretty_json()?;
    println!("{spec}");
    Ok(())
}
