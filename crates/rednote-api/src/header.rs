use crate::{
    consts::{BROWSER_USER_AGENT, WEB_ORIGIN},
    error::Result,
};
use http::{
    header::{
        ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE, COOKIE, ORIGIN, PRAGMA, REFERER,
        USER_AGENT,
    },
    HeaderMap, HeaderName, HeaderValue,
};
use rednote_signer::SignedHeaders;

/// `X-s` signature token header
pub static X_S: HeaderName = HeaderName::from_static("x-s");

/// `X-t` timestamp token header
pub static X_T: HeaderName = HeaderName::from_static("x-t");

static SEC_CH_UA: HeaderName = HeaderName::from_static("sec-ch-ua");
static SEC_CH_UA_MOBILE: HeaderName = HeaderName::from_static("sec-ch-ua-mobile");
static SEC_CH_UA_PLATFORM: HeaderName = HeaderName::from_static("sec-ch-ua-platform");
static SEC_FETCH_DEST: HeaderName = HeaderName::from_static("sec-fetch-dest");
static SEC_FETCH_MODE: HeaderName = HeaderName::from_static("sec-fetch-mode");
static SEC_FETCH_SITE: HeaderName = HeaderName::from_static("sec-fetch-site");

/// Static part of the header set, imitating a desktop Chrome browsing the web frontend
///
/// The template is never mutated while dispatching. Every request gets its own copy with the dynamic entries laid on top.
#[derive(Clone, Debug)]
pub struct HeaderTemplate {
    headers: HeaderMap,
}

impl HeaderTemplate {
    /// Replace the User-Agent of the template
    ///
    /// # Errors
    ///
    /// - The value isn't a valid header value
    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self> {
        self.headers
            .insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
        Ok(self)
    }

    /// Headers of the template
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Build the header set of a single request
    ///
    /// # Errors
    ///
    /// - The cookie isn't a valid header value
    /// - The signer produced an `X-s` token that isn't a valid header value
    pub fn overlay(&self, cookie: &str, signed: &SignedHeaders) -> Result<HeaderMap> {
        let x_s = HeaderValue::from_str(&signed.x_s).map_err(rednote_signer::Error::custom)?;

        let mut headers = self.headers.clone();
        headers.insert(COOKIE, HeaderValue::from_str(cookie)?);
        headers.insert(X_S.clone(), x_s);
        headers.insert(X_T.clone(), HeaderValue::from(signed.x_t));

        Ok(headers)
    }
}

impl Default for HeaderTemplate {
    fn default() -> Self {
        let entries = [
            (ACCEPT, "application/json, text/plain, */*"),
            (ACCEPT_LANGUAGE, "zh-CN,zh;q=0.9"),
            (CACHE_CONTROL, "no-cache"),
            (CONTENT_TYPE, "application/json;charset=UTF-8"),
            (ORIGIN, WEB_ORIGIN),
            (PRAGMA, "no-cache"),
            (REFERER, "https://www.xiaohongshu.com/"),
            (
                SEC_CH_UA.clone(),
                r#""Chromium";v="112", "Google Chrome";v="112", "Not:A-Brand";v="99""#,
            ),
            (SEC_CH_UA_MOBILE.clone(), "?0"),
            (SEC_CH_UA_PLATFORM.clone(), r#""Windows""#),
            (SEC_FETCH_DEST.clone(), "empty"),
            (SEC_FETCH_MODE.clone(), "cors"),
            (SEC_FETCH_SITE.clone(), "same-site"),
            (USER_AGENT, BROWSER_USER_AGENT),
        ];

        let headers = entries
            .into_iter()
            .map(|(name, value)| (name, HeaderValue::from_static(value)))
            .collect();

        Self { headers }
    }
}
