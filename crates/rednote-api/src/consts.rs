/// Host serving the web API
pub const DEFAULT_HOST: &str = "https://edith.xiaohongshu.com";

/// Origin of the web frontend the API expects requests from
pub const WEB_ORIGIN: &str = "https://www.xiaohongshu.com";

/// Path of the "post a comment to a note" endpoint
pub const COMMENT_POST_PATH: &str = "/api/sns/web/v1/comment/post";

/// User-Agent of the browser the header template imitates
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/112.0.0.0 Safari/537.36";
