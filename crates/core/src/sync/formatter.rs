//! Normalizes raw catalog items into records, translating on demand.
//!
//! The central cost control of the pipeline lives here: translation
//! calls are billed and rate-limited, so an item whose stored row is
//! already translated is passed through with its stored localized text
//! and zero remote calls.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::warn;

use crate::catalog::{CatalogRecord, Category, RawCatalogItem, TranslatedText, Translator};

/// Thumbnail references arrive as a bare base path; the rendered URL is
/// always the path plus this extension. No network call involved.
pub const THUMBNAIL_EXT: &str = "jpg";

/// Per-batch bound on in-flight translation calls. Items are
/// independent remote calls, but both services are rate-limited.
pub const TRANSLATION_MAX_IN_FLIGHT: usize = 4;

/// Turns raw upstream items into normalized records, invoking the
/// translator only for items not yet translated locally.
pub struct CategoryFormatter {
    translator: Arc<dyn Translator>,
    target_lang: String,
}

impl CategoryFormatter {
    pub fn new(translator: Arc<dyn Translator>, target_lang: impl Into<String>) -> Self {
        Self {
            translator,
            target_lang: target_lang.into(),
        }
    }

    /// Normalize a full category batch. `known` carries localized text
    /// for rows already marked translated; those items skip the
    /// translator entirely. A single item's translation failure
    /// degrades that item to untranslated and never aborts the batch.
    pub async fn normalize(
        &self,
        category: Category,
        raw_items: Vec<RawCatalogItem>,
        known: &HashMap<i64, TranslatedText>,
    ) -> Vec<CatalogRecord> {
        stream::iter(raw_items.into_iter().map(|item| {
            let existing = known.get(&item.upstream_id).cloned();
            self.normalize_item(category, item, existing)
        }))
        .buffered(TRANSLATION_MAX_IN_FLIGHT)
        .collect()
        .await
    }

    async fn normalize_item(
        &self,
        category: Category,
        item: RawCatalogItem,
        existing: Option<TranslatedText>,
    ) -> CatalogRecord {
        let thumbnail = item
            .thumbnail_path
            .as_deref()
            .map(|path| format!("{path}.{THUMBNAIL_EXT}"));

        // Translated is terminal: copy the stored localized text through
        // unchanged and pay nothing.
        if let Some(existing) = existing {
            return CatalogRecord {
                upstream_id: item.upstream_id,
                title_original: item.title,
                title_pt: Some(existing.title_pt),
                description: Some(existing.description),
                thumbnail,
                is_translated: true,
            };
        }

        let description_original = item.description.unwrap_or_default();

        let title_pt = match self
            .translator
            .translate(&item.title, &self.target_lang)
            .await
        {
            Ok(translated) => Some(translated),
            Err(e) => {
                warn!(
                    "{category}: title translation failed for item {}, keeping original until next tick: {e}",
                    item.upstream_id
                );
                return CatalogRecord {
                    upstream_id: item.upstream_id,
                    title_original: item.title,
                    title_pt: None,
                    description: none_if_blank(description_original),
                    thumbnail,
                    is_translated: false,
                };
            }
        };

        // Upstream descriptions are frequently blank; a blank one has
        // nothing to translate and must not burn a call every tick.
        let (description, is_translated) = if description_original.trim().is_empty() {
            (Some(String::new()), true)
        } else {
            match self
                .translator
                .translate(&description_original, &self.target_lang)
                .await
            {
                Ok(translated) => (Some(translated), true),
                Err(e) => {
                    warn!(
                        "{category}: description translation failed for item {}, keeping original until next tick: {e}",
                        item.upstream_id
                    );
                    (Some(description_original), false)
                }
            }
        };

        CatalogRecord {
            upstream_id: item.upstream_id,
            title_original: item.title,
            title_pt,
            description,
            thumbnail,
            is_translated,
        }
    }
}

fn none_if_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
