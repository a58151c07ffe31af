use std::env;

/// Repository metadata cgit exports to every filter it spawns.
///
/// Only used to annotate log output; it never changes what a filter emits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoContext {
    pub url: Option<String>,
    pub name: Option<String>,
    pub path: Option<String>,
    pub owner: Option<String>,
    pub default_branch: Option<String>,
    pub section: Option<String>,
    pub clone_url: Option<String>,
}

impl RepoContext {
    /// Read the `CGIT_REPO_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            url: get("CGIT_REPO_URL"),
            name: get("CGIT_REPO_NAME"),
            path: get("CGIT_REPO_PATH"),
            owner: get("CGIT_REPO_OWNER"),
            default_branch: get("CGIT_REPO_DEFBRANCH"),
            section: get("CGIT_REPO_SECTION"),
            clone_url: get("CGIT_REPO_CLONE_URL"),
        }
    }

    /// Short label for log spans: the repo url, else its name, else `-`.
    pub fn label(&self) -> &str {
        self.url
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_reads_all_variables() {
        let ctx = RepoContext::from_lookup(lookup_from(&[
            ("CGIT_REPO_URL", "cgit.git"),
            ("CGIT_REPO_NAME", "cgit"),
            ("CGIT_REPO_PATH", "/srv/git/cgit.git"),
            ("CGIT_REPO_OWNER", "Jason"),
            ("CGIT_REPO_DEFBRANCH", "master"),
            ("CGIT_REPO_SECTION", "tools"),
            ("CGIT_REPO_CLONE_URL", "https://git.example.org/cgit.git"),
        ]));
        assert_eq!(ctx.url.as_deref(), Some("cgit.git"));
        assert_eq!(ctx.default_branch.as_deref(), Some("master"));
        assert_eq!(ctx.clone_url.as_deref(), Some("https://git.example.org/cgit.git"));
        assert_eq!(ctx.label(), "cgit.git");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let ctx = RepoContext::from_lookup(lookup_from(&[("CGIT_REPO_URL", ""), ("CGIT_REPO_NAME", "cgit")]));
        assert_eq!(ctx.url, None);
        assert_eq!(ctx.label(), "cgit");
    }

    #[test]
    fn test_label_without_metadata() {
        let ctx = RepoContext::from_lookup(|_| None);
        assert_eq!(ctx, RepoContext::default());
        assert_eq!(ctx.label(), "-");
    }
}
