#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{SystemTime, UNIX_EPOCH};

    // Global counter and lock for thread-safe temporary file creation
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    static TEMP_LOCK: Mutex<()> = Mutex::new(());

    /// Creates a temporary route table with a unique name
    pub fn create_temp_table(content: &str, ext: &str) -> PathBuf {
        let _lock = TEMP_LOCK.lock().unwrap();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::SeqCst);
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let path = std::env::temp_dir().join(format!(
            "rdfa_test_{}_{}_{}.{}",
            std::process::id(),
            counter,
            nanos,
            ext
        ));

        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn create_temp_yaml(content: &str) -> PathBuf {
        create_temp_table(content, "yaml")
    }

    pub fn create_temp_json(content: &str) -> PathBuf {
        create_temp_table(content, "json")
    }

    /// Cleanup temporary files (best effort)
    pub fn cleanup_temp_files(paths: &[PathBuf]) {
        for path in paths {
            let _ = std::fs::remove_file(path);
        }
    }
}

pub mod fixtures {
    use routedfa::matching::{DfaMatcher, MatcherBuilder, MatcherOptions, Vectorize};

    /// Cost-model settings that force each jump table variant for wide states.
    pub fn table_policies() -> Vec<(&'static str, MatcherOptions)> {
        vec![
            (
                "linear",
                MatcherOptions {
                    linear_search_max: usize::MAX,
                    trie_threshold: None,
                    vectorize: Vectorize::Never,
                },
            ),
            (
                "dictionary",
                MatcherOptions {
                    linear_search_max: 1,
                    trie_threshold: None,
                    vectorize: Vectorize::Never,
                },
            ),
            (
                "trie",
                MatcherOptions {
                    linear_search_max: 1,
                    trie_threshold: Some(2),
                    vectorize: Vectorize::Never,
                },
            ),
            (
                "trie-vectorized",
                MatcherOptions {
                    linear_search_max: 1,
                    trie_threshold: Some(2),
                    vectorize: Vectorize::Always,
                },
            ),
            ("default", MatcherOptions::default()),
        ]
    }

    /// Build a matcher whose endpoints are the templates themselves.
    pub fn build(options: MatcherOptions, templates: &[&'static str]) -> DfaMatcher<&'static str> {
        let mut builder = MatcherBuilder::new(options);
        for template in templates {
            builder.add_template(template, *template).unwrap();
        }
        builder.build().unwrap()
    }

    pub fn endpoints(matcher: &DfaMatcher<&'static str>, path: &str) -> Vec<&'static str> {
        matcher.match_path(path).iter().map(|c| c.endpoint).collect()
    }
}
