//! Template render context.
//!
//! A `RenderContext` is an immutable, ordered map of named values. Layers
//! are stacked by [`RenderContext::with`], which returns a new context where
//! the later keys win:
//!
//! ```text
//! site context      site, base_url, <data tables>
//!   └─ page         + page { path, url }
//!       └─ post     + title, tags, post { ... }
//! ```

use crate::config::SiteConfig;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    values: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Shared context for every page of the site.
    ///
    /// Data tables are bound by file stem; `site` and `base_url` take
    /// precedence over a table of the same name.
    pub fn for_site(
        config: &SiteConfig,
        data: BTreeMap<String, Value>,
    ) -> serde_json::Result<Self> {
        let site = serde_json::to_value(&config.site)?;
        Ok(Self { values: data }.with([
            ("site", site),
            ("base_url", Value::from(config.base_url())),
        ]))
    }

    /// New context with `overrides` layered on top.
    #[must_use]
    pub fn with<K, I>(&self, overrides: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut values = self.values.clone();
        values.extend(overrides.into_iter().map(|(k, v)| (k.into(), v)));
        Self { values }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn to_tera(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        for (key, value) in &self.values {
            ctx.insert(key.as_str(), value);
        }
        ctx
    }
}
