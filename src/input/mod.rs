use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

// Chrome extension IDs are the transliterated hex of a key hash, so the
// alphabet is a-p, never a-z.
static CHROME_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-p]{32}$").unwrap());
static CHROME_ID_EXTRACT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-p]{32}").unwrap());
static FIREFOX_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/addon/([^/?]+)").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub enum InputType {
    ChromeId(String),
    ChromeUrl(String),
    FirefoxUrl(String),
    FirefoxSlug(String),
    LocalFile(String),
}

pub fn detect_input(input: &str) -> InputType {
    let input = input.trim();
    let input_lower = input.to_lowercase();

    // Check for local file first (ends with .crx, .xpi or .zip, or is a path)
    if input_lower.ends_with(".crx") || input_lower.ends_with(".xpi") || input_lower.ends_with(".zip")
    {
        return InputType::LocalFile(input.to_string());
    }

    // Check for Chrome Web Store URL (case-insensitive)
    if input_lower.contains("chromewebstore.google.com")
        || input_lower.contains("chrome.google.com/webstore")
    {
        return InputType::ChromeUrl(input.to_string());
    }

    // Check for Firefox Add-ons URL (case-insensitive)
    if input_lower.contains("addons.mozilla.org") {
        return InputType::FirefoxUrl(input.to_string());
    }

    // Check for Chrome extension ID (32 chars over a-p)
    if CHROME_ID_RE.is_match(input) {
        return InputType::ChromeId(input.to_string());
    }

    // Check if it's a file path that exists
    if Path::new(input).exists() {
        return InputType::LocalFile(input.to_string());
    }

    // Default: assume Firefox slug (addon name)
    InputType::FirefoxSlug(input.to_string())
}

pub fn extract_chrome_id_from_url(url: &str) -> Option<String> {
    CHROME_ID_EXTRACT_RE
        .find(url)
        .map(|m| m.as_str().to_string())
}

pub fn extract_firefox_slug_from_url(url: &str) -> Option<String> {
    // Pattern: /addon/{slug}/ or /addon/{slug}
    FIREFOX_SLUG_RE.captures(url).map(|c| c[1].to_string())
}
