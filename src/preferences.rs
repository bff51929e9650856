//! Persisted language preference.
//!
//! The chosen language lives under [`LANG_STORAGE_KEY`] in an asynchronous
//! key-value store. Storage is the only I/O around the translation core, so
//! the store sits behind a trait: [`MemoryPreferenceStore`] for tests and
//! embedding, [`FilePreferenceStore`] for a JSON file on disk.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{RoutesError, RoutesResult};
use crate::matcher::match_url;
use crate::route::RouteNode;
use crate::service::{
    InitialLanguage, LANG_STORAGE_KEY, LanguageChange, LocalizedRoutesService, PreferenceWrite,
};

/// Asynchronous key-value storage for user preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> RoutesResult<Option<String>>;

    async fn put(&self, key: &str, value: &str) -> RoutesResult<()>;

    /// Name of this store, used in log output.
    fn store_name(&self) -> &str;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        Self {
            values: RwLock::new(HashMap::from([(key.to_string(), value.to_string())])),
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> RoutesResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> RoutesResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}

/// Store backed by a JSON object file. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> RoutesResult<HashMap<String, String>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(RoutesError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| RoutesError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> RoutesResult<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn put(&self, key: &str, value: &str) -> RoutesResult<()> {
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());

        let content = serde_json::to_string_pretty(&values)
            .map_err(|e| RoutesError::Store(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| RoutesError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| RoutesError::Io {
                path: self.path.clone(),
                source,
            })
    }

    fn store_name(&self) -> &str {
        "file"
    }
}

/// Carry out a [`PreferenceWrite`].
///
/// # Returns
/// `true` if the store was written.
pub async fn apply_preference(
    store: &dyn PreferenceStore,
    write: &PreferenceWrite,
) -> RoutesResult<bool> {
    let lang = match write {
        PreferenceWrite::IfAbsent(lang) => {
            if store.get(LANG_STORAGE_KEY).await?.is_some() {
                return Ok(false);
            }
            lang
        }
        PreferenceWrite::Always(lang) => lang,
    };
    store.put(LANG_STORAGE_KEY, lang).await?;
    tracing::debug!(store = store.store_name(), lang = %lang, "Stored language preference");
    Ok(true)
}

/// Result of [`bootstrap`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bootstrap {
    pub lang: String,
    pub routes: Vec<RouteNode>,
    /// Where to navigate when the stored language differs from the URL
    pub redirect_to: Option<String>,
}

/// Start the service for the first URL the user opened.
///
/// A language prefix in the URL wins. Otherwise the default language is
/// activated first and the stored preference, if it names another language,
/// is activated after it, which redirects to the translated URL.
pub async fn bootstrap(
    service: &mut LocalizedRoutesService,
    store: &dyn PreferenceStore,
    url: &str,
) -> RoutesResult<Bootstrap> {
    let lang = match service.init(url) {
        InitialLanguage::FromUrl(lang) => {
            activate(service, store, &lang, url).await?;
            return Ok(Bootstrap {
                lang,
                routes: service.routes().to_vec(),
                redirect_to: None,
            });
        }
        InitialLanguage::Unchanged(lang) => {
            return Ok(Bootstrap {
                lang,
                routes: service.routes().to_vec(),
                redirect_to: None,
            });
        }
        InitialLanguage::Deferred => {
            let stored = match store.get(LANG_STORAGE_KEY).await {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::warn!(store = store.store_name(), error = %e, "Could not read language preference");
                    None
                }
            };
            service.resolve_stored_language(stored.as_deref())
        }
    };

    let default_lang = service.settings().default_lang.clone();
    activate(service, store, &default_lang, url).await?;
    if lang == default_lang {
        return Ok(Bootstrap {
            lang,
            routes: service.routes().to_vec(),
            redirect_to: None,
        });
    }

    let change = activate(service, store, &lang, url).await?;
    Ok(Bootstrap {
        lang,
        routes: change.routes,
        redirect_to: change.redirect_to,
    })
}

async fn activate(
    service: &mut LocalizedRoutesService,
    store: &dyn PreferenceStore,
    lang: &str,
    url: &str,
) -> RoutesResult<LanguageChange> {
    let snapshot = match_url(service.routes(), url).unwrap_or_default();
    let change = service.change_language(lang, url, &snapshot)?;
    if let Err(e) = apply_preference(store, &change.preference).await {
        tracing::warn!(store = store.store_name(), lang, error = %e, "Could not store language preference");
    }
    Ok(change)
}
