//! Walk the reflection tree and collect markdown fragments per component.

use crate::buffer::FragmentBuffer;
use crate::markdown;
use crate::model::*;
use tracing::debug;

/// Name prefix of public API modules.
pub const MODULE_PREFIX: &str = "MDC";

/// Build the fragment buffer for a whole project.
///
/// Each top-level file section contributes one fragment per documented
/// module, stored under the section's grouping key.
pub fn extract(project: &Project) -> FragmentBuffer {
    let mut buffer = FragmentBuffer::new();

    for section in &project.children {
        let Some(modules) = section.children.as_deref() else {
            continue;
        };
        let key = grouping_key(&section.name);

        for module in modules.iter().filter(|m| is_documented_module(m)) {
            debug!(module = %module.name, key = %key, "rendering module");
            buffer.push(&key, markdown::render_module(module));
        }
    }

    buffer
}

/// `"mdc-list/foundation"` → `mdc-list`
pub fn grouping_key(section_name: &str) -> String {
    let unquoted = section_name.replace('"', "");
    unquoted.split('/').next().unwrap_or_default().to_string()
}

/// Public modules only; constants and type aliases carry nothing to document.
pub fn is_documented_module(node: &ReflectionNode) -> bool {
    node.name.starts_with(MODULE_PREFIX)
        && !matches!(
            node.kind,
            ReflectionKind::Variable | ReflectionKind::TypeAlias
        )
}
