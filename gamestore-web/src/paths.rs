//! Deployment-relative URLs: router base, API base, and static assets.
use gamestore_core::constants::DEFAULT_API_BASE;

/// Prefix `relative` with the deployment base path.
///
/// When `PUBLIC_URL` is set at compile time (e.g., `/shop` for a subdirectory
/// deployment), generated URLs are prefixed accordingly. Local builds without
/// `PUBLIC_URL` fall back to root-anchored paths.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    asset_path_with_base(relative, option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Base path for the router.
///
/// Returns `None` when no base path is configured so the router falls back to root.
#[must_use]
pub fn router_base() -> Option<String> {
    router_base_with_base(option_env!("PUBLIC_URL").unwrap_or(""))
}

/// Backend base URL, from `GAMESTORE_API_URL` at compile time.
#[must_use]
pub fn api_base() -> String {
    api_base_with(option_env!("GAMESTORE_API_URL"))
}

/// Image URL for a game icon; absolute URLs pass through untouched.
#[must_use]
pub fn game_image(gameicon: Option<&str>) -> String {
    match gameicon.map(str::trim).filter(|icon| !icon.is_empty()) {
        Some(icon) if icon.starts_with("http://") || icon.starts_with("https://") => {
            icon.to_string()
        }
        Some(icon) if icon.starts_with('/') => icon.to_string(),
        Some(icon) => asset_path(&format!("images/{icon}")),
        None => asset_path("images/placeholder.png"),
    }
}

fn asset_path_with_base(relative: &str, base: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = relative.trim_start_matches('/');

    if base.is_empty() {
        format!("/{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

fn router_base_with_base(base: &str) -> Option<String> {
    let base = base.trim_end_matches('/').trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

fn api_base_with(configured: Option<&str>) -> String {
    let base = configured
        .map(|b| b.trim().trim_end_matches('/'))
        .filter(|b| !b.is_empty())
        .unwrap_or(DEFAULT_API_BASE);
    base.to_string()
}
