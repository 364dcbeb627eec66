//! Path-stack normalization of `/`-separated asset paths.

/// Normalizes `path` into a rooted path.
///
/// Empty and `.` segments are dropped, `..` pops the previous segment and is
/// silently ignored when there is nothing to pop. The result always starts with
/// `/`; an empty path becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let mut stack: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            s => stack.push(s),
        }
    }
    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    out.push_str(&stack.join("/"));
    out
}

/// Directory component of `path`: everything up to and including the last `/`,
/// or empty when `path` has no `/`.
pub fn directory_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dot_segments() {
        assert_eq!(normalize_path("assets/css/../img/x.png"), "/assets/img/x.png");
        assert_eq!(normalize_path("./a/./b.js"), "/a/b.js");
        assert_eq!(normalize_path("a//b"), "/a/b");
    }

    #[test]
    fn parent_segments_do_not_underflow() {
        assert_eq!(normalize_path("../../x.png"), "/x.png");
        assert_eq!(normalize_path("a/../../b"), "/b");
    }

    #[test]
    fn empty_path_is_root() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path(".."), "/");
        assert_eq!(normalize_path("a/.."), "/");
    }

    #[test]
    fn directory_component() {
        assert_eq!(directory_of("assets/css/main.css"), "assets/css/");
        assert_eq!(directory_of("index.html"), "");
        assert_eq!(directory_of("dir/"), "dir/");
    }
}
