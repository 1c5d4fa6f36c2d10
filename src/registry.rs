/*!
 * Fragment loader registry.
 *
 * The host keeps one registry mapping scheme prefixes to loaders. It is
 * filled once at start-up through `register_fragment_loaders`.
 */

use async_trait::async_trait;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::ResolutionError;
use crate::fragment::Fragment;
use crate::identifier::YOUTUBE_SCHEMES;

/// Common trait for fragment loaders
///
/// A loader receives the argument after `<scheme>:` and turns it into a fragment.
#[async_trait]
pub trait FragmentLoader: Send + Sync {
    /// Load the fragment for an argument
    async fn load(&self, argument: &str) -> Result<Fragment, ResolutionError>;
}

/// Scheme prefix to loader mapping
#[derive(Default)]
pub struct LoaderRegistry {
    loaders: BTreeMap<String, Arc<dyn FragmentLoader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader for a scheme, replacing any previous one
    pub fn register(&mut self, scheme: &str, loader: Arc<dyn FragmentLoader>) {
        let scheme = scheme.trim().to_lowercase();
        if self.loaders.insert(scheme.clone(), loader).is_some() {
            warn!("Fragment loader for '{}' was replaced", scheme);
        } else {
            debug!("Registered fragment loader for '{}'", scheme);
        }
    }

    /// Registered schemes in sorted order
    pub fn schemes(&self) -> Vec<&str> {
        self.loaders.keys().map(String::as_str).collect()
    }

    pub fn get(&self, scheme: &str) -> Option<Arc<dyn FragmentLoader>> {
        self.loaders.get(&scheme.trim().to_lowercase()).cloned()
    }

    /// Resolve a `<scheme>:<argument>` reference with the matching loader
    pub async fn resolve(&self, reference: &str) -> Result<Fragment, ResolutionError> {
        let (scheme, argument) = reference.split_once(':').ok_or_else(|| {
            ResolutionError::MalformedIdentifier(format!(
                "Expected '<scheme>:<argument>', got '{}'",
                reference
            ))
        })?;

        let loader = self
            .get(scheme)
            .ok_or_else(|| ResolutionError::UnknownScheme(scheme.trim().to_lowercase()))?;

        loader.load(argument).await
    }
}

/// Register the YouTube loader under every scheme it answers to
pub fn register_fragment_loaders(registry: &mut LoaderRegistry, loader: Arc<dyn FragmentLoader>) {
    for scheme in YOUTUBE_SCHEMES {
        registry.register(scheme, Arc::clone(&loader));
    }
}
