use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::client::{API_URL, ClientConfig};

#[derive(Debug, Default)]
struct RcConfig {
    url: Option<String>,
    verify: Option<bool>,
}

/// Resolves the endpoint in order: explicit argument, `NIH_REPORTER_URL`,
/// the first rc file found, then the public API URL.
pub(crate) fn load_config(url: Option<String>) -> Result<ClientConfig> {
    let mut url = url.or_else(|| std::env::var("NIH_REPORTER_URL").ok());
    let mut verify: Option<bool> = None;

    for rc_path in rc_candidates() {
        if rc_path.exists() {
            let cfg = read_rc(&rc_path).with_context(|| {
                format!("failed to read configuration file {}", rc_path.display())
            })?;
            tracing::debug!(path = %rc_path.display(), "loaded rc file");

            if url.is_none() {
                url = cfg.url;
            }
            verify = cfg.verify;
            break;
        }
    }

    Ok(ClientConfig {
        url: url.unwrap_or_else(|| API_URL.to_string()),
        verify: verify.unwrap_or(true),
    })
}

fn read_rc(path: &Path) -> Result<RcConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_rc(&text))
}

fn parse_rc(text: &str) -> RcConfig {
    let mut cfg = RcConfig::default();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // `url: https://...` contains a second colon; split on the first one only.
        if let Some((k, v)) = line.split_once(':') {
            let v = strip_quotes(v.trim());
            if v.is_empty() {
                continue;
            }
            match k.trim() {
                "url" => cfg.url = Some(v.to_string()),
                "verify" => cfg.verify = Some(v != "0" && !v.eq_ignore_ascii_case("false")),
                _ => {}
            }
        }
    }

    cfg
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    ['"', '\'']
        .into_iter()
        .find_map(|q| s.strip_prefix(q).and_then(|rest| rest.strip_suffix(q)))
        .unwrap_or(s)
}

/// Rc files to try, most specific first: `NIH_REPORTER_RC` alone when set,
/// otherwise `./.reporterrc` then `~/.reporterrc`.
fn rc_candidates() -> Vec<PathBuf> {
    if let Ok(p) = std::env::var("NIH_REPORTER_RC") {
        return vec![PathBuf::from(p)];
    }

    let mut v = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        v.push(cwd.join(".reporterrc"));
    }
    if let Some(home) = dirs::home_dir() {
        v.push(home.join(".reporterrc"));
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_and_verify() {
        let cfg = parse_rc(
            "# local mirror\nurl: \"http://localhost:8080/v2/projects/search\"\nverify: 0\nkey: ignored\n",
        );
        assert_eq!(
            cfg.url.as_deref(),
            Some("http://localhost:8080/v2/projects/search")
        );
        assert_eq!(cfg.verify, Some(false));
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = parse_rc("url:\nverify: 1\n");
        assert_eq!(cfg.url, None);
        assert_eq!(cfg.verify, Some(true));
    }

    #[test]
    fn strip_quotes_only_when_paired() {
        assert_eq!(strip_quotes("'abc'"), "abc");
        assert_eq!(strip_quotes("\"abc"), "\"abc");
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn explicit_url_wins() {
        let cfg = load_config(Some("http://127.0.0.1:9/search".into())).unwrap();
        assert_eq!(cfg.url, "http://127.0.0.1:9/search");
    }
}
