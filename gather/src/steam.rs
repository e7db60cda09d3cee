//! Steam Web API + storefront client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `all-ids` pages through `IStoreService/GetAppList` with a `last_appid`
//! cursor; `store-details` asks the storefront for one app at a time. Base
//! URLs are configurable so tests can point the client at a local server.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::GatherError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";
pub const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com";
pub const APP_LIST_PAGE_SIZE: u32 = 50_000;

/// One app from the store app list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppListEntry {
    pub appid: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
struct AppListEnvelope {
    #[serde(default)]
    response: AppListPage,
}

#[derive(Debug, Default, Deserialize)]
struct AppListPage {
    #[serde(default)]
    apps: Vec<AppListEntry>,
}

pub struct SteamClient {
    http: reqwest::Client,
    api_base_url: String,
    store_base_url: String,
}

impl SteamClient {
    /// Build a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(api_base_url: &str, store_base_url: &str, timeout: Duration) -> Result<Self, GatherError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("steam-companion-gather")
            .build()?;
        Ok(Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            store_base_url: store_base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetch one app-list page starting after `last_appid`.
    ///
    /// Returns `Ok(None)` when Steam answers with a non-success status.
    async fn fetch_app_list_page(&self, api_key: &str, last_appid: u32) -> Result<Option<Vec<AppListEntry>>, GatherError> {
        let url = format!("{}/IStoreService/GetAppList/v1/", self.api_base_url);
        let max_results = APP_LIST_PAGE_SIZE.to_string();
        let last = last_appid.to_string();
        let resp = self
            .http
            .get(url)
            .query(&[
                ("key", api_key),
                ("include_games", "true"),
                ("include_dlc", "false"),
                ("include_software", "false"),
                ("include_videos", "false"),
                ("include_hardware", "false"),
                ("max_results", max_results.as_str()),
                ("last_appid", last.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), last_appid, "app list request failed");
            return Ok(None);
        }

        let envelope: AppListEnvelope = resp.json().await?;
        Ok(Some(envelope.response.apps))
    }

    /// Page through the full store app list.
    ///
    /// Stops on the first empty page. A non-success status also stops the
    /// walk, keeping whatever was collected so far.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an undecodable page.
    pub async fn fetch_all_ids(&self, api_key: &str) -> Result<Vec<AppListEntry>, GatherError> {
        let mut all_apps = Vec::new();
        let mut last_appid = 0;

        loop {
            let Some(apps) = self.fetch_app_list_page(api_key, last_appid).await? else {
                break;
            };
            let Some(last) = apps.last() else {
                break;
            };
            last_appid = last.appid;

            let fetched = apps.len();
            all_apps.extend(apps);
            info!(fetched, total = all_apps.len(), last_appid, "fetched app list page");
        }

        Ok(all_apps)
    }

    /// Fetch the storefront details document for one app.
    ///
    /// Transport errors, non-success statuses and invalid JSON are logged
    /// and reported as `None` so the caller can move on.
    pub async fn fetch_details(&self, app_id: u32) -> Option<Value> {
        let url = format!("{}/api/appdetails", self.store_base_url);
        let resp = match self.http.get(url).query(&[("appids", app_id)]).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(app_id, error = %e, "details request failed");
                return None;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(app_id, status = status.as_u16(), "details request returned error status");
            return None;
        }

        match resp.json::<Value>().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(app_id, error = %e, "details response was not valid JSON");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl crate::store::DetailsSource for SteamClient {
    async fn details(&self, app_id: u32) -> Option<Value> {
        self.fetch_details(app_id).await
    }
}

#[cfg(test)]
#[path = "steam_test.rs"]
mod tests;
