use std::collections::BTreeMap;

use super::{fold_key, EnvOverlay};

/// Read-only capture of the inherited process environment.
#[derive(Clone, Debug, Default)]
pub struct EnvSnapshot {
    vars: Vec<(String, String)>,
}

impl EnvSnapshot {
    /// Captures the current process environment. Non-UTF-8 entries are converted lossily.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Union of `snapshot` and `overlay`, sorted case-insensitively.
///
/// On a case-insensitive collision the later value wins (overlay over
/// snapshot) while the name keeps the spelling it was first listed with.
pub fn merged(snapshot: &EnvSnapshot, overlay: &EnvOverlay) -> Vec<(String, String)> {
    let mut all: BTreeMap<String, (String, String)> = BTreeMap::new();

    for (name, value) in snapshot.iter().chain(overlay.iter()) {
        all.entry(fold_key(name))
            .and_modify(|(_, v)| *v = value.to_string())
            .or_insert_with(|| (name.to_string(), value.to_string()));
    }

    all.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_wins_case_insensitively() {
        let snapshot = EnvSnapshot::from_pairs([("PATH", "/usr/bin"), ("HOME", "/home/u")]);
        let mut overlay = EnvOverlay::new();
        overlay.set("path", "/opt/bin");
        overlay.set("A", "1");

        let listing = merged(&snapshot, &overlay);
        assert_eq!(
            listing,
            vec![
                ("A".to_string(), "1".to_string()),
                ("HOME".to_string(), "/home/u".to_string()),
                ("PATH".to_string(), "/opt/bin".to_string()),
            ]
        );
    }

    #[test]
    fn test_sorted_ignoring_case() {
        let snapshot = EnvSnapshot::from_pairs([("beta", "2"), ("Alpha", "1"), ("GAMMA", "3")]);
        let names: Vec<String> = merged(&snapshot, &EnvOverlay::new())
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(names, vec!["Alpha", "beta", "GAMMA"]);
    }

    #[test]
    fn test_capture_sees_process_env() {
        let snapshot = EnvSnapshot::capture();
        assert_eq!(snapshot.iter().count(), std::env::vars_os().count());
    }
}
