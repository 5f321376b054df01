// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod listing_crawler;
pub mod store_sync;
pub mod sync_orchestrator;

pub use listing_crawler::{BlockOutcome, ListingCrawler};
pub use store_sync::{StoreDirectorySync, StoreSyncReport};
pub use sync_orchestrator::{
    ListingRunParams, SyncComponents, SyncOptions, SyncOrchestrator, SyncRunError,
};
