use crate::generator::{GeneratedConfig, GeneratorResult};
use tracing::{debug, trace};

const YAML_FENCE: &str = "```yaml";
const FENCE: &str = "```";

/// Recover the configuration body from a model reply.
///
/// Strips one leading ```` ```yaml ```` (or bare ```` ``` ````) marker and one
/// trailing ```` ``` ```` marker, trimming whitespace around the result. Replies
/// without fences pass through trimmed. The raw reply is kept verbatim.
pub fn extract_config(raw: &str) -> GeneratorResult<GeneratedConfig> {
    let mut content = raw.trim();
    trace!("Initial response length: {} characters", content.len());

    if let Some(rest) = content.strip_prefix(YAML_FENCE) {
        debug!("Detected ```yaml code block, extracting content");
        content = rest;
    } else if let Some(rest) = content.strip_prefix(FENCE) {
        debug!("Detected ``` code block, extracting content");
        content = rest;
    }

    if content.ends_with(FENCE) {
        debug!("Detected trailing ``` code block, removing it");
        if let Some((body, _)) = content.rsplit_once(FENCE) {
            content = body;
        }
    }

    let yaml_content = content.trim().to_string();
    debug!("Extracted YAML content length: {} characters", yaml_content.len());
    trace!("YAML content starts with: {}...", preview(&yaml_content, 50));

    Ok(GeneratedConfig {
        yaml_content,
        raw_response: raw.to_string(),
    })
}

/// First `max_chars` characters of `text`, for log previews
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
