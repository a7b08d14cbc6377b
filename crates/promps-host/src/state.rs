//! Host state shared by all commands

use promps_core::{Locale, PatternCatalog};

use crate::config::AppConfig;
use crate::error::{CommandError, Result};
use crate::macros::MacroRegistry;

/// Where pattern templates come from
#[derive(Debug, Clone)]
pub enum CatalogState {
    /// The built-in catalog, localized per request
    Builtin,
    /// A catalog loaded from the configured file
    Custom(PatternCatalog),
    /// The configured catalog failed to load; pattern features are off
    Unavailable(String),
}

/// Everything a command can read or change
#[derive(Debug)]
pub struct HostState {
    pub config: AppConfig,
    pub catalog: CatalogState,
    pub macros: MacroRegistry,
}

impl HostState {
    /// Build the state, loading the configured pattern catalog if any
    ///
    /// A catalog that fails to load does not stop the host; it only disables
    /// the pattern commands.
    pub fn from_config(config: AppConfig) -> Self {
        let catalog = match &config.pattern_catalog {
            None => CatalogState::Builtin,
            Some(path) => match PatternCatalog::load(path) {
                Ok(catalog) => CatalogState::Custom(catalog),
                Err(e) => {
                    log::error!("Failed to load pattern catalog {:?}: {}", path, e);
                    CatalogState::Unavailable(format!("{}: {}", path.display(), e))
                }
            },
        };

        Self {
            config,
            catalog,
            macros: MacroRegistry::new(),
        }
    }

    /// Catalog to use for a request in `locale`
    pub fn catalog(&self, locale: Locale) -> Result<&PatternCatalog> {
        match &self.catalog {
            CatalogState::Builtin => Ok(PatternCatalog::builtin(locale)),
            CatalogState::Custom(catalog) => Ok(catalog),
            CatalogState::Unavailable(reason) => {
                Err(CommandError::CatalogUnavailable(reason.clone()))
            }
        }
    }

    /// Locale from the request, or the configured default
    pub fn locale(&self, requested: Option<Locale>) -> Locale {
        requested.unwrap_or(self.config.default_locale)
    }
}

impl Default for HostState {
    fn default() -> Self {
        Self::from_config(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_by_default() {
        let state = HostState::default();
        assert!(matches!(state.catalog, CatalogState::Builtin));
        assert_eq!(state.catalog(Locale::En).unwrap().len(), 9);
        assert_eq!(state.locale(None), Locale::Ja);
        assert_eq!(state.locale(Some(Locale::En)), Locale::En);
    }

    #[test]
    fn test_missing_catalog_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            pattern_catalog: Some(dir.path().join("patterns.json")),
            ..AppConfig::default()
        };

        let state = HostState::from_config(config);
        assert!(matches!(
            state.catalog(Locale::Ja),
            Err(CommandError::CatalogUnavailable(_))
        ));
    }

    #[test]
    fn test_custom_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        let catalog = PatternCatalog::builtin(Locale::Ja).templates()[..2].to_vec();
        std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let state = HostState::from_config(AppConfig {
            pattern_catalog: Some(path),
            ..AppConfig::default()
        });
        assert_eq!(state.catalog(Locale::En).unwrap().len(), 2);
    }
}
