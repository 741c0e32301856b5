//! Test step definitions

use serde::Serialize;

use crate::common::config::TestsConfig;

/// Suffix the client understands as "recursively"
pub const RECURSIVE: &str = "...";

/// One client invocation, without the output-format flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestStep {
    pub args: Vec<String>,
}

impl TestStep {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The client subcommand, used as the step's name in logs
    pub fn name(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }
}

/// `<alias>/<bucket>` joined by exactly one separator
pub fn alias_path(alias: &str, bucket: &str) -> String {
    format!("{}/{}", alias.trim_end_matches('/'), bucket)
}

/// The fixed test sequence
///
/// list, make bucket, set access policy, copy the corpus in, remove
/// everything again.
pub fn fixed_sequence(alias: &str, corpus_dir: &str, tests: &TestsConfig) -> Vec<TestStep> {
    let bucket = alias_path(alias, &tests.bucket);

    vec![
        TestStep::new(["ls", alias]),
        TestStep::new(["mb", bucket.as_str()]),
        TestStep::new(["access", "set", tests.access_policy.as_str(), bucket.as_str()]),
        TestStep::new([
            "cp".to_string(),
            format!("{}{}", corpus_dir, RECURSIVE),
            bucket.clone(),
        ]),
        TestStep::new([
            "rm".to_string(),
            "--force".to_string(),
            format!("{}{}", bucket, RECURSIVE),
        ]),
    ]
}
