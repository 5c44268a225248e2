/// Why the interactive map could not be shown.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapLoadError {
    /// No API key configured.
    #[error("no map API key configured")]
    MissingKey,
    /// The provider refused or failed.
    #[error("map provider unavailable: {0}")]
    Unavailable(String),
}

/// Loaded interactive map.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MapWidget {
    /// Embed location handed to the page.
    pub embed_url: String,
}

/// Source of the contact section's interactive map.
pub trait MapProvider {
    /// Load the widget with `api_key`.
    fn load(&self, api_key: Option<&str>) -> Result<MapWidget, MapLoadError>;
}

/// Provider that builds an embed URL when a key is present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedMapProvider {
    /// Embed endpoint.
    pub base_url: String,
    /// Place query.
    pub query: String,
}

impl MapProvider for EmbedMapProvider {
    fn load(&self, api_key: Option<&str>) -> Result<MapWidget, MapLoadError> {
        let key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(MapLoadError::MissingKey)?;
        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(MapLoadError::Unavailable(format!("malformed key '{key}'")));
        }
        let query: String = self
            .query
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '+' })
            .collect();
        Ok(MapWidget {
            embed_url: format!("{}?key={key}&q={query}", self.base_url),
        })
    }
}

/// Provider that always fails, for offline rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineMapProvider;

impl MapProvider for OfflineMapProvider {
    fn load(&self, _api_key: Option<&str>) -> Result<MapWidget, MapLoadError> {
        Err(MapLoadError::Unavailable("offline".to_owned()))
    }
}

/// What the contact section shows in the map slot: exactly one of the two.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MapView {
    /// Interactive map.
    Widget(MapWidget),
    /// Plain address block.
    StaticAddress {
        /// Postal address.
        address: String,
    },
}

impl MapView {
    /// Load the map, falling back to `address` when the provider fails.
    pub fn resolve(provider: &dyn MapProvider, api_key: Option<&str>, address: &str) -> Self {
        match provider.load(api_key) {
            Ok(widget) => Self::Widget(widget),
            Err(err) => {
                tracing::warn!(%err, "map failed to load; showing static address");
                Self::StaticAddress {
                    address: address.to_owned(),
                }
            }
        }
    }

    /// Return `true` when the fallback is shown.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::StaticAddress { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/map.rs"]
mod tests;
