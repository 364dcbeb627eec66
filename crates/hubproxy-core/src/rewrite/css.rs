//! `url(...)` and `@import` rewriting for style sheets.

use crate::resolver::UrlResolver;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static CSS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?P<kw>url)\(\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^"'\s)][^\s)]*))\s*\)"#,
    )
    .expect("valid CSS url regex")
});

static CSS_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?P<kw>@import\s+)(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')"#)
        .expect("valid CSS import regex")
});

/// Returns (quote, reference) for whichever alternative matched.
pub(super) fn quoted<'h>(caps: &Captures<'h>) -> Option<(&'static str, &'h str)> {
    if let Some(m) = caps.name("dq") {
        return Some(("\"", m.as_str()));
    }
    if let Some(m) = caps.name("sq") {
        return Some(("'", m.as_str()));
    }
    if let Some(m) = caps.name("bq") {
        return Some(("`", m.as_str()));
    }
    caps.name("bare").map(|m| ("", m.as_str()))
}

/// Rewrites every relative `url()` and `@import` target in `input`, resolving
/// against the directory of `current`.
pub fn rewrite_css(input: &str, current: &str, resolver: &UrlResolver) -> String {
    let with_urls = CSS_URL_RE.replace_all(input, |caps: &Captures| {
        let whole = &caps[0];
        let Some((quote, reference)) = quoted(caps) else {
            return whole.to_string();
        };
        match resolver.resolve(current, reference) {
            Some(target) => format!("{}({quote}{target}{quote})", &caps["kw"]),
            None => whole.to_string(),
        }
    });

    CSS_IMPORT_RE
        .replace_all(&with_urls, |caps: &Captures| {
            let whole = &caps[0];
            let Some((quote, reference)) = quoted(caps) else {
                return whole.to_string();
            };
            match resolver.resolve(current, reference) {
                Some(target) => format!("{}{quote}{target}{quote}", &caps["kw"]),
                None => whole.to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::encode_component;

    const SRC: &str = "https://example.com/game/index.html";

    fn rewrite(input: &str, current: &str) -> String {
        rewrite_css(input, current, &UrlResolver::new(SRC))
    }

    #[test]
    fn rewrites_single_quoted_parent_url() {
        let out = rewrite("body{background:url('../bg.png')}", "css/style.css");
        assert_eq!(
            out,
            format!(
                "body{{background:url('/api/bg.png?src={}')}}",
                encode_component(SRC)
            )
        );
    }

    #[test]
    fn rewrites_double_quoted_and_bare_urls() {
        let enc = encode_component(SRC);
        let out = rewrite(
            r#"@font-face{src:url("fonts/a.woff2") format("woff2"),url( fonts/a.ttf )}"#,
            "style.css",
        );
        assert_eq!(
            out,
            format!(
                r#"@font-face{{src:url("/api/fonts/a.woff2?src={enc}") format("woff2"),url(/api/fonts/a.ttf?src={enc})}}"#
            )
        );
    }

    #[test]
    fn leaves_absolute_targets_untouched() {
        let input = concat!(
            "a{background:url(https://cdn.example.com/x.png)}",
            "b{background:url('//cdn.example.com/y.png')}",
            "c{background:url(\"data:image/png;base64,AAAA\")}",
            "d{filter:url(#blur)}",
        );
        assert_eq!(rewrite(input, "css/style.css"), input);
    }

    #[test]
    fn rewrites_import_strings() {
        let enc = encode_component(SRC);
        let out = rewrite(
            "@import \"base.css\";\n@import 'theme/dark.css';\n@import url(print.css) print;",
            "css/main.css",
        );
        assert_eq!(
            out,
            format!(
                "@import \"/api/css/base.css?src={enc}\";\n@import '/api/css/theme/dark.css?src={enc}';\n@import url(/api/css/print.css?src={enc}) print;"
            )
        );
    }

    #[test]
    fn source_comes_before_reference_query() {
        let enc = encode_component(SRC);
        let out = rewrite("i{background:url(icons.svg?v=4#play)}", "ui/hud.css");
        assert_eq!(
            out,
            format!("i{{background:url(/api/ui/icons.svg?src={enc}&v=4#play)}}")
        );
    }

    #[test]
    fn reference_src_parameter_does_not_shadow_source() {
        let enc = encode_component(SRC);
        let out = rewrite("a{background:url(thumb.php?src=x.png)}", "css/a.css");
        assert_eq!(
            out,
            format!("a{{background:url(/api/css/thumb.php?src={enc}&src=x.png)}}")
        );
    }
}
