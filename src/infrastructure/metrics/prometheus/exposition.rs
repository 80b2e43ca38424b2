use crate::error::Result;
use prometheus::{Encoder, Registry, TextEncoder};

/// Content type of the text exposition format.
pub fn content_type() -> String {
    // ---
    TextEncoder::new().format_type().to_string()
}

/// Render every metric family in `registry` in Prometheus text format.
pub fn render(registry: &Registry) -> Result<String> {
    // ---
    let families = registry.gather();
    Ok(TextEncoder::new().encode_to_string(&families)?)
}
