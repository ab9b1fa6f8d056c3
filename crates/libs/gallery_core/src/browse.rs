//! Forward-only cursor pagination over the gallery listings, the way the
//! infinite-scroll lists consume it: fetch a page, accumulate, remember
//! `endCursor`, stop for good once `hasNextPage` goes false.

use crate::error::GatewayError;
use crate::gateway::PersistenceGateway;
use gallery_types::GallerySummary;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    Active,
    Archived,
}

pub struct GalleryPager {
    gateway: Arc<dyn PersistenceGateway>,
    scope: ListScope,
    page_size: usize,
    cursor: Option<String>,
    has_next_page: bool,
    galleries: Vec<GallerySummary>,
}

impl GalleryPager {
    #[must_use]
    pub fn new(gateway: Arc<dyn PersistenceGateway>, scope: ListScope, page_size: usize) -> Self {
        Self {
            gateway,
            scope,
            page_size,
            cursor: None,
            has_next_page: true,
            galleries: Vec::new(),
        }
    }

    /// Fetch the next page and append it. A no-op once the listing is
    /// exhausted. Returns how many new summaries arrived.
    #[instrument(skip(self), fields(scope = ?self.scope))]
    pub async fn fetch_next(&mut self) -> Result<usize, GatewayError> {
        if !self.has_next_page {
            return Ok(0);
        }

        let page = match self.scope {
            ListScope::Active => {
                self.gateway
                    .list_galleries_paginated(self.cursor.as_deref(), self.page_size)
                    .await?
            }
            ListScope::Archived => {
                self.gateway
                    .list_archives_paginated(self.cursor.as_deref(), self.page_size)
                    .await?
            }
        };

        let fetched = page.galleries.len();
        self.galleries.extend(page.galleries);
        self.cursor = page.page_info.end_cursor;
        self.has_next_page = page.page_info.has_next_page;
        Ok(fetched)
    }

    #[must_use]
    pub fn galleries(&self) -> &[GallerySummary] {
        &self.galleries
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Forget everything and start from the first page again (used after
    /// an archive/restore changes the listing).
    pub fn reset(&mut self) {
        self.cursor = None;
        self.has_next_page = true;
        self.galleries.clear();
    }
}
