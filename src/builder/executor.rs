//! A minimal local executor for scheduled copy actions.

use std::path::Path;

use anyhow::Result;

use crate::builder::actions::CopyAction;
use crate::util::fs::copy_file;

/// Executes copy actions against the local filesystem.
///
/// Inputs resolve under the module tree, outputs under a separate output
/// directory, so the tree itself is never written to.
pub struct LocalExecutor<'a> {
    tree_root: &'a Path,
    out_dir: &'a Path,
}

impl<'a> LocalExecutor<'a> {
    pub fn new(tree_root: &'a Path, out_dir: &'a Path) -> Self {
        LocalExecutor { tree_root, out_dir }
    }

    /// Run every action, returning the number executed.
    pub fn execute(&self, actions: &[CopyAction]) -> Result<usize> {
        for action in actions {
            tracing::debug!(input = %action.input, output = %action.output, "copying snapshot");
            let input = self.tree_root.join(&action.input);
            let output = self.out_dir.join(&action.output);
            copy_file(&input, &output)?;
        }
        Ok(actions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_execute_copies_byte_identical() {
        let tree = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        fs::create_dir_all(tree.path().join("hw")).unwrap();
        fs::write(tree.path().join("hw/current.txt"), "interface INfc {}\n").unwrap();

        let actions = vec![CopyAction {
            input: "hw/current.txt".to_string(),
            output: "hw/gen/android.hardware.txt".to_string(),
        }];

        let executor = LocalExecutor::new(tree.path(), out.path());
        let count = executor.execute(&actions).unwrap();

        assert_eq!(count, 1);
        let copied = fs::read(out.path().join("hw/gen/android.hardware.txt")).unwrap();
        let original = fs::read(tree.path().join("hw/current.txt")).unwrap();
        assert_eq!(copied, original);
    }

    #[test]
    fn test_execute_missing_input_fails() {
        let tree = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let actions = vec![CopyAction {
            input: "nowhere/current.txt".to_string(),
            output: "nowhere/gen/x.txt".to_string(),
        }];

        let executor = LocalExecutor::new(tree.path(), out.path());
        assert!(executor.execute(&actions).is_err());
    }
}
