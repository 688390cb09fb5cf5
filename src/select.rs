use crate::config::FALLBACK_EXAMPLE;
use crate::error::PlaygroundError;
use crate::registry::Registry;

/// The example shown on this page load, plus its neighbours for navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub current: String,
    pub names: Vec<&'static str>,
}

impl Selection {
    /// Picks an example and checks it exists, so startup can bail out before
    /// anything is drawn.
    pub fn resolve(
        registry: &Registry,
        query: Option<&str>,
        build_override: Option<&str>,
    ) -> Result<Self, PlaygroundError> {
        let picked = pick_example(query, build_override, registry.first());
        let entry = registry.resolve(picked)?;
        Ok(Self {
            current: entry.name.to_string(),
            names: registry.names(),
        })
    }
}

/// Query parameter, then build-time override, then the first registered
/// example, then [`FALLBACK_EXAMPLE`]. Empty strings count as unset.
pub fn pick_example<'a>(
    query: Option<&'a str>,
    build_override: Option<&'a str>,
    first: Option<&'a str>,
) -> &'a str {
    [query, build_override, first]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or(FALLBACK_EXAMPLE)
}
