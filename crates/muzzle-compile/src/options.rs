/// Options handed to [`compile`](crate::program::compile).
#[derive(Debug, Clone, Default)]
pub struct CompilerOptions {
    /// Lint rule sets to enable, e.g. `core/recommended`.
    pub rule_sets: Vec<String>,
}
