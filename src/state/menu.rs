//! Overlay asset discovery and menu selection.
//!
//! DESIGN
//! ======
//! The menu is built once on mount. `Discovery` yields candidate URLs in a
//! fixed order; probe-based discovery keeps only the candidates the server
//! confirms, so a missing or unreachable asset never shows up as a broken
//! thumbnail. Selection is plain state so it can be tested without a browser.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use std::future::Future;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Shown in place of the menu when discovery finds nothing.
pub const EMPTY_MESSAGE: &str = "No glasses found.";

/// Placeholder replaced by the candidate number in a probe template.
pub const INDEX_PLACEHOLDER: &str = "{n}";

pub const DEFAULT_TEMPLATE: &str = "/glasses/glasses{n}.png";
pub const DEFAULT_COUNT: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("probe request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Where the menu's candidate URLs come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discovery {
    /// Numbered paths, each checked for existence before it is listed.
    Probe { template: String, range: RangeInclusive<u32> },
    /// A fixed number of files under a static prefix, listed without checking.
    Static { prefix: String, count: u32, extension: String },
}

impl Default for Discovery {
    fn default() -> Self {
        Self::Probe {
            template: DEFAULT_TEMPLATE.to_owned(),
            range: 1..=DEFAULT_COUNT,
        }
    }
}

impl Discovery {
    /// Probe discovery with `TRYON_ASSET_TEMPLATE` / `TRYON_ASSET_COUNT` overrides.
    ///
    /// A template without the `{n}` placeholder, or a count that doesn't parse,
    /// falls back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let template = match std::env::var("TRYON_ASSET_TEMPLATE") {
            Ok(t) if t.contains(INDEX_PLACEHOLDER) => t,
            Ok(t) => {
                log::warn!("menu: TRYON_ASSET_TEMPLATE {t:?} has no {INDEX_PLACEHOLDER} placeholder; using default");
                DEFAULT_TEMPLATE.to_owned()
            }
            Err(_) => DEFAULT_TEMPLATE.to_owned(),
        };
        let count = match std::env::var("TRYON_ASSET_COUNT") {
            Ok(v) => v.trim().parse::<u32>().unwrap_or(DEFAULT_COUNT),
            Err(_) => DEFAULT_COUNT,
        };
        Self::Probe { template, range: 1..=count }
    }

    /// Candidate URLs in menu order.
    #[must_use]
    pub fn candidates(&self) -> Vec<String> {
        match self {
            Self::Probe { template, range } => range
                .clone()
                .map(|n| template.replace(INDEX_PLACEHOLDER, &n.to_string()))
                .collect(),
            Self::Static { prefix, count, extension } => {
                (1..=*count).map(|n| format!("{prefix}{n}.{extension}")).collect()
            }
        }
    }

    #[must_use]
    pub fn needs_probe(&self) -> bool {
        matches!(self, Self::Probe { .. })
    }
}

/// Existence check for a candidate asset URL.
pub trait AssetProbe {
    /// `Ok(true)` when the asset can be fetched.
    fn exists(&self, url: &str) -> impl Future<Output = Result<bool, ProbeError>>;
}

/// Build the menu from `discovery`, probing candidates one at a time in order.
///
/// Misses are dropped quietly; probe errors are logged and dropped.
pub async fn discover<P: AssetProbe>(discovery: &Discovery, probe: &P) -> AssetMenu {
    let candidates = discovery.candidates();
    if !discovery.needs_probe() {
        log::info!("menu: {} static assets", candidates.len());
        return AssetMenu::new(candidates);
    }

    let total = candidates.len();
    let mut found = Vec::with_capacity(total);
    for url in candidates {
        match probe.exists(&url).await {
            Ok(true) => found.push(url),
            Ok(false) => log::debug!("menu: {url} not present"),
            Err(e) => log::warn!("menu: probe {url} failed: {e}"),
        }
    }
    log::info!("menu: discovered {} of {total} assets", found.len());
    AssetMenu::new(found)
}

/// The list of selectable overlay assets and which one is chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetMenu {
    options: Vec<String>,
    selected: Option<String>,
}

impl AssetMenu {
    #[must_use]
    pub fn new(options: Vec<String>) -> Self {
        Self { options, selected: None }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// The message to show instead of options, if there are none.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MESSAGE)
    }

    /// Mark `url` selected and return it for forwarding to the canvas.
    ///
    /// URLs that aren't in the menu are ignored.
    pub fn select(&mut self, url: &str) -> Option<&str> {
        if !self.options.iter().any(|o| o == url) {
            log::warn!("menu: ignoring selection of unknown asset {url}");
            return None;
        }
        self.selected = Some(url.to_owned());
        self.selected.as_deref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_selected(&self, url: &str) -> bool {
        self.selected.as_deref() == Some(url)
    }

    /// Accessible label for the option at `index`.
    #[must_use]
    pub fn label(index: usize) -> String {
        format!("Glasses {}", index + 1)
    }
}
