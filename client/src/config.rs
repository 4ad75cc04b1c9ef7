//! Client-side configuration: where the backend lives.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host renders the values into `<meta>` tags during SSR and also
//! provides them as a Leptos context. After hydration the browser reads the
//! tags back; builds without a host fall back to compile-time environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// `<meta name=...>` carrying the backend base URL.
pub const API_BASE_META: &str = "placify-api-base-url";
/// `<meta name=...>` carrying the external registration form URL.
pub const REFERRAL_FORM_META: &str = "placify-referral-form-url";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash; `None` when unset.
    pub api_base_url: Option<String>,
    /// Optional external form friends can be sent to.
    pub referral_form_url: Option<String>,
}

fn normalize(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl ClientConfig {
    pub fn new(api_base_url: Option<&str>, referral_form_url: Option<&str>) -> Self {
        Self { api_base_url: normalize(api_base_url), referral_form_url: normalize(referral_form_url) }
    }

    /// Values baked in at compile time.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("PLACIFY_API_BASE_URL"), option_env!("PLACIFY_REFERRAL_FORM_URL"))
    }

    /// Resolve configuration in the current environment: page `<meta>` tags
    /// in the browser, build-time values elsewhere.
    pub fn detect() -> Self {
        let build = Self::from_build_env();
        #[cfg(feature = "hydrate")]
        {
            let page = Self::new(read_meta(API_BASE_META).as_deref(), read_meta(REFERRAL_FORM_META).as_deref());
            Self {
                api_base_url: page.api_base_url.or(build.api_base_url),
                referral_form_url: page.referral_form_url.or(build.referral_form_url),
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            build
        }
    }

    /// Link to the external registration form tagged with `code`.
    pub fn referral_form_link(&self, code: &str) -> Option<String> {
        let base = self.referral_form_url.as_deref()?;
        let sep = if base.contains('?') { '&' } else { '?' };
        let encoded: String = url::form_urlencoded::byte_serialize(code.as_bytes()).collect();
        Some(format!("{base}{sep}ref={encoded}"))
    }
}

#[cfg(feature = "hydrate")]
fn read_meta(name: &str) -> Option<String> {
    let doc = web_sys::window()?.document()?;
    let el = doc.query_selector(&format!("meta[name=\"{name}\"]")).ok().flatten()?;
    el.get_attribute("content")
}
