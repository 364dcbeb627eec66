//! Module specifier rewriting for JavaScript.
//!
//! Only string-literal specifiers are touched: `import('./x.js')` with any quote
//! style, plus static `import ... from './x.js'` / `export ... from` / `import './x.js'`
//! when the specifier is explicitly relative. Computed `import(expr)`, template
//! literals with `${...}` and `import.meta.url`-based resolution are left alone.

use super::css::quoted;
use crate::resolver::UrlResolver;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static DYNAMIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<pre>^|[^.\w$])(?P<kw>import\s*\(\s*)(?:'(?P<sq>[^'\\\r\n]*)'|"(?P<dq>[^"\\\r\n]*)"|`(?P<bq>[^`\\]*)`)(?P<post>\s*[,)])"#,
    )
    .expect("valid dynamic import regex")
});

static STATIC_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<pre>^|[^.\w$])(?P<kw>(?:from|import)\s*)(?:'(?P<sq>\.{0,2}/[^'\\\r\n]*)'|"(?P<dq>\.{0,2}/[^"\\\r\n]*)")"#,
    )
    .expect("valid static import regex")
});

/// Rewrites literal module specifiers in `input`, resolving against the directory
/// of `current`.
pub fn rewrite_js(input: &str, current: &str, resolver: &UrlResolver) -> String {
    let dynamic = DYNAMIC_IMPORT_RE.replace_all(input, |caps: &Captures| {
        let whole = &caps[0];
        let Some((quote, reference)) = quoted(caps) else {
            return whole.to_string();
        };
        if quote == "`" && reference.contains("${") {
            return whole.to_string();
        }
        match resolver.resolve(current, reference) {
            Some(target) => format!(
                "{}{}{quote}{target}{quote}{}",
                &caps["pre"], &caps["kw"], &caps["post"]
            ),
            None => whole.to_string(),
        }
    });

    STATIC_IMPORT_RE
        .replace_all(&dynamic, |caps: &Captures| {
            let whole = &caps[0];
            let Some((quote, reference)) = quoted(caps) else {
                return whole.to_string();
            };
            match resolver.resolve(current, reference) {
                Some(target) => format!("{}{}{quote}{target}{quote}", &caps["pre"], &caps["kw"]),
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
        rewrite_js(input, current, &UrlResolver::new(SRC))
    }

    #[test]
    fn rewrites_dynamic_import_literal() {
        let out = rewrite("import('./mod.js')", "js/app.js");
        assert_eq!(
            out,
            format!("import('/api/js/mod.js?src={}')", encode_component(SRC))
        );
    }

    #[test]
    fn all_quote_styles() {
        let enc = encode_component(SRC);
        let out = rewrite(
            "const a = await import(\"../lib/a.js\");\nconst b = import(`./b.js`, { with: {} });",
            "js/app.js",
        );
        assert_eq!(
            out,
            format!(
                "const a = await import(\"/api/lib/a.js?src={enc}\");\nconst b = import(`/api/js/b.js?src={enc}`, {{ with: {{}} }});"
            )
        );
    }

    #[test]
    fn non_literal_imports_are_untouched() {
        for input in [
            "import(moduleName)",
            "import(`./levels/${n}.js`)",
            "import('./a' + '.js')",
            "new URL('./data.bin', import.meta.url)",
            "loader.import('./plugin.js')",
            "import('https://cdn.example.com/x.js')",
        ] {
            assert_eq!(rewrite(input, "js/app.js"), input, "{input}");
        }
    }

    #[test]
    fn rewrites_relative_static_specifiers_only() {
        let enc = encode_component(SRC);
        let input = "import { a } from './a.js';\nimport '../polyfill.js';\nexport * from \"./b.js\";\nimport React from 'react';";
        assert_eq!(
            rewrite(input, "js/main.js"),
            format!(
                "import {{ a }} from '/api/js/a.js?src={enc}';\nimport '/api/polyfill.js?src={enc}';\nexport * from \"/api/js/b.js?src={enc}\";\nimport React from 'react';"
            )
        );
    }
}
