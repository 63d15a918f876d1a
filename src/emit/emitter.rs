//! The secondary-target emission pass.
//!
//! One target per resolved package root and interface package. Emission is a
//! pure function of resolved state: it never mutates the graph, and no
//! target depends on the emission order of unrelated targets.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::core::declaration::SNAPSHOT_FILE;
use crate::emit::target::{AttrValue, BuildTarget, Label};
use crate::resolver::resolve::{Resolve, ResolvedPackage, ResolvedRoot};
use crate::util::fs::{tree_exists, tree_join};

const ROOT_RULE: &str = "package_root";
const ROOT_BZL: &str = "//build/rules/interface:package_root.bzl";
const PACKAGE_RULE: &str = "interface_package";
const PACKAGE_BZL: &str = "//build/rules/interface:interface_package.bzl";

/// Emits secondary targets from a resolved graph.
pub struct TargetEmitter<'a> {
    tree_root: &'a Path,
    resolve: &'a Resolve,
}

impl<'a> TargetEmitter<'a> {
    pub fn new(tree_root: &'a Path, resolve: &'a Resolve) -> Self {
        TargetEmitter { tree_root, resolve }
    }

    /// Emit one target per resolved module, roots first, each ordered by name.
    pub fn emit(&self) -> Vec<BuildTarget> {
        let mut targets = Vec::with_capacity(self.resolve.roots.len() + self.resolve.packages.len());
        for root in self.resolve.roots.values() {
            targets.push(self.emit_root(root));
        }
        for pkg in self.resolve.packages.values() {
            targets.push(self.emit_package(pkg));
        }
        targets
    }

    fn emit_root(&self, root: &ResolvedRoot) -> BuildTarget {
        let mut target = BuildTarget::new(ROOT_RULE, ROOT_BZL, &root.name, &root.dir);
        if let Some(path) = &root.declared_path {
            target.set("path", AttrValue::String(path.clone()));
        }
        // The secondary representation has its own source-visibility rules,
        // so the snapshot is re-probed at the declaring directory here rather
        // than read from resolution state.
        if tree_exists(self.tree_root, &tree_join(&root.dir, SNAPSHOT_FILE)) {
            target.set("current", AttrValue::Label(Label::local(SNAPSHOT_FILE)));
        }
        target
    }

    fn emit_package(&self, pkg: &ResolvedPackage) -> BuildTarget {
        let mut target = BuildTarget::new(PACKAGE_RULE, PACKAGE_BZL, &pkg.name, &pkg.dir);
        target.set("root", AttrValue::String(pkg.root.clone()));

        if let Some(root) = self.resolve.root(&pkg.root) {
            if let Some(snapshot) = &root.current_snapshot {
                target.set(
                    "root_interface_file",
                    AttrValue::Label(snapshot_label(&pkg.dir, snapshot)),
                );
            }
        }

        if let Some(min_sdk) = &pkg.min_sdk_version {
            target.set("min_sdk_version", AttrValue::String(min_sdk.clone()));
        }

        target.set("srcs", AttrValue::StringList(pkg.srcs.clone()));

        // No empty-list attribute: deps is omitted when the lineage is empty.
        if !pkg.deps.is_empty() {
            target.set(
                "deps",
                AttrValue::LabelList(
                    pkg.deps
                        .iter()
                        .map(|dep| Label::reference(&pkg.dir, &dep.dir, &dep.name))
                        .collect(),
                ),
            );
        }

        target
    }
}

/// Label for a tree-relative snapshot path, as seen from `from_dir`.
fn snapshot_label(from_dir: &str, snapshot: &str) -> Label {
    let (dir, file) = match snapshot.rsplit_once('/') {
        Some((dir, file)) => (dir, file),
        None => ("", snapshot),
    };
    Label::reference(from_dir, dir, file)
}

/// Render all targets of one directory as a build file, load statements first.
pub fn render_build_file(targets: &[&BuildTarget]) -> String {
    let mut loads: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for target in targets {
        loads
            .entry(target.bzl_load_location.as_str())
            .or_default()
            .insert(target.rule_class.as_str());
    }

    let mut out = String::new();
    for (location, rule_classes) in &loads {
        for rule_class in rule_classes {
            out.push_str(&format!("load(\"{}\", \"{}\")\n", location, rule_class));
        }
    }
    for target in targets {
        out.push('\n');
        out.push_str(&target.render());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use crate::builder::actions::RecordedActions;
    use crate::core::declaration::{PackageDecl, RootDecl};
    use crate::core::graph::BuildGraph;
    use crate::core::version::Version;
    use crate::resolver::freeze::{FrozenSet, PlatformHistory};
    use crate::resolver::resolve::Resolver;

    fn root_decl(name: &str, use_current: bool) -> RootDecl {
        RootDecl {
            name: name.to_string(),
            path: None,
            use_current,
            require_frozen: false,
        }
    }

    fn package_decl(name: &str, root: &str, srcs: &[&str], interfaces: &[&str]) -> PackageDecl {
        PackageDecl {
            name: name.to_string(),
            srcs: srcs.iter().map(|s| s.to_string()).collect(),
            root: root.to_string(),
            interfaces: interfaces.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn resolve_tree(tree: &TempDir, graph: &BuildGraph, history: &PlatformHistory) -> Resolve {
        let frozen = FrozenSet::default();
        let mut sink = RecordedActions::new();
        let resolver = Resolver::new(tree.path(), history, &frozen);
        let (resolve, errors) = resolver.resolve(graph, &mut sink);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        resolve
    }

    #[test]
    fn test_versioned_lineage_in_one_directory() {
        let tree = TempDir::new().unwrap();
        fs::write(tree.path().join("current.txt"), "api").unwrap();

        let graph = BuildGraph::new();
        graph.declare_root(root_decl("android.hardware", true), "").unwrap();
        graph
            .declare_package(
                package_decl(
                    "android.hardware.nfc@1.0",
                    "android.hardware",
                    &["types.hal", "IBase.hal"],
                    &[],
                ),
                "",
            )
            .unwrap();
        graph
            .declare_package(
                package_decl(
                    "android.hardware.nfc@1.1",
                    "android.hardware",
                    &["types.hal", "INfc.hal"],
                    &["android.hardware.nfc@1.0"],
                ),
                "",
            )
            .unwrap();

        let mut history = PlatformHistory::new();
        history.insert("android.hardware", Version::new(1, 0), "29");
        history.insert("android.hardware", Version::new(1, 1), "29");

        let resolve = resolve_tree(&tree, &graph, &history);
        let targets = TargetEmitter::new(tree.path(), &resolve).emit();

        assert_eq!(targets.len(), 3);

        let v10 = &targets[1];
        assert_eq!(v10.rule_class, "interface_package");
        assert_eq!(
            v10.render(),
            "\
interface_package(
    name = \"android.hardware.nfc@1.0\",
    min_sdk_version = \"29\",
    root = \"android.hardware\",
    root_interface_file = \":current.txt\",
    srcs = [
        \"types.hal\",
        \"IBase.hal\",
    ],
)"
        );

        let v11 = &targets[2];
        assert_eq!(
            v11.render(),
            "\
interface_package(
    name = \"android.hardware.nfc@1.1\",
    deps = [\":android.hardware.nfc@1.0\"],
    min_sdk_version = \"29\",
    root = \"android.hardware\",
    root_interface_file = \":current.txt\",
    srcs = [
        \"types.hal\",
        \"INfc.hal\",
    ],
)"
        );
    }

    #[test]
    fn test_root_in_another_directory() {
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("foo/bar")).unwrap();
        fs::write(tree.path().join("foo/bar/current.txt"), "api").unwrap();

        let graph = BuildGraph::new();
        graph
            .declare_root(root_decl("android.hardware", true), "foo/bar")
            .unwrap();
        graph
            .declare_package(
                package_decl(
                    "android.hardware.neuralnetworks@1.0",
                    "android.hardware",
                    &["types.hal", "IBase.hal"],
                    &[],
                ),
                "",
            )
            .unwrap();

        let mut history = PlatformHistory::new();
        history.insert("android.hardware", Version::new(1, 0), "30");

        let resolve = resolve_tree(&tree, &graph, &history);
        let targets = TargetEmitter::new(tree.path(), &resolve).emit();

        let pkg = &targets[1];
        assert_eq!(
            pkg.attr("root_interface_file"),
            Some(&AttrValue::Label(Label::absolute("foo/bar", "current.txt")))
        );
        assert_eq!(
            pkg.attr("min_sdk_version"),
            Some(&AttrValue::String("30".to_string()))
        );
    }

    #[test]
    fn test_no_snapshot_omits_attributes() {
        let tree = TempDir::new().unwrap();

        let graph = BuildGraph::new();
        graph.declare_root(root_decl("r", false), "").unwrap();
        graph
            .declare_package(package_decl("pkg@1.0", "r", &["a.hal"], &[]), "")
            .unwrap();

        let resolve = resolve_tree(&tree, &graph, &PlatformHistory::new());
        let targets = TargetEmitter::new(tree.path(), &resolve).emit();

        let root = &targets[0];
        assert_eq!(root.rule_class, "package_root");
        assert!(root.attr("current").is_none());

        let pkg = &targets[1];
        assert!(pkg.attr("root_interface_file").is_none());
        assert!(pkg.attr("deps").is_none());
        assert!(pkg.attr("min_sdk_version").is_none());
    }

    #[test]
    fn test_root_target_attributes() {
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("hw")).unwrap();
        fs::write(tree.path().join("hw/current.txt"), "api").unwrap();

        let graph = BuildGraph::new();
        let mut decl = root_decl("android.hardware", false);
        decl.path = Some("hw".to_string());
        graph.declare_root(decl, "hw").unwrap();

        let resolve = resolve_tree(&tree, &graph, &PlatformHistory::new());
        let targets = TargetEmitter::new(tree.path(), &resolve).emit();

        let root = &targets[0];
        assert_eq!(root.attr("path"), Some(&AttrValue::String("hw".to_string())));
        assert_eq!(
            root.attr("current"),
            Some(&AttrValue::Label(Label::local("current.txt")))
        );
    }

    #[test]
    fn test_cross_directory_deps_fully_qualified() {
        let tree = TempDir::new().unwrap();
        fs::create_dir_all(tree.path().join("v1")).unwrap();
        fs::create_dir_all(tree.path().join("v2")).unwrap();

        let graph = BuildGraph::new();
        graph.declare_root(root_decl("r", false), "").unwrap();
        graph
            .declare_package(package_decl("pkg@1.0", "r", &["a.hal"], &[]), "v1")
            .unwrap();
        graph
            .declare_package(package_decl("pkg@2.0", "r", &["a.hal"], &["pkg@1.0"]), "v2")
            .unwrap();

        let resolve = resolve_tree(&tree, &graph, &PlatformHistory::new());
        let targets = TargetEmitter::new(tree.path(), &resolve).emit();

        let v2 = targets.iter().find(|t| t.name == "pkg@2.0").unwrap();
        assert_eq!(
            v2.attr("deps"),
            Some(&AttrValue::LabelList(vec![Label::absolute("v1", "pkg@1.0")]))
        );
    }

    #[test]
    fn test_emission_is_read_only() {
        let tree = TempDir::new().unwrap();
        fs::write(tree.path().join("current.txt"), "api").unwrap();

        let graph = BuildGraph::new();
        graph.declare_root(root_decl("r", true), "").unwrap();
        graph
            .declare_package(package_decl("pkg@1.0", "r", &["a.hal"], &[]), "")
            .unwrap();

        let resolve = resolve_tree(&tree, &graph, &PlatformHistory::new());
        let emitter = TargetEmitter::new(tree.path(), &resolve);

        let first = emitter.emit();
        let second = emitter.emit();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.render(), b.render());
        }
    }

    #[test]
    fn test_render_build_file_loads() {
        let tree = TempDir::new().unwrap();
        fs::write(tree.path().join("current.txt"), "api").unwrap();

        let graph = BuildGraph::new();
        graph.declare_root(root_decl("r", true), "").unwrap();
        graph
            .declare_package(package_decl("pkg@1.0", "r", &["a.hal"], &[]), "")
            .unwrap();

        let resolve = resolve_tree(&tree, &graph, &PlatformHistory::new());
        let targets = TargetEmitter::new(tree.path(), &resolve).emit();
        let refs: Vec<&BuildTarget> = targets.iter().collect();

        let rendered = render_build_file(&refs);
        assert!(rendered.starts_with(
            "load(\"//build/rules/interface:interface_package.bzl\", \"interface_package\")\n"
        ));
        assert!(rendered.contains(
            "load(\"//build/rules/interface:package_root.bzl\", \"package_root\")\n"
        ));
        assert!(rendered.contains("package_root(\n    name = \"r\",\n"));
        assert!(rendered.ends_with(")\n"));
    }
}
