//! Defines the menu tree data structures.
//!
//! Includes:
//! - Raw `serde` shapes mirroring the on-disk `menu` / `function` objects.
//! - The typed tree (`MenuTree`, `MenuNode`, `ActionNode`) the walker traverses.
//! - `Arguments`, the merged property mapping handed to capabilities.
//!
//! Conversion from the generic parsed value is strict: every node is checked when the
//! file is loaded, so a malformed node never reaches the walker.

use crate::error::{AppError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

// --- Raw file shapes ---

/// A node object as written in a menu file: exactly one of `menu` or `function`.
#[derive(Debug, Deserialize)]
struct RawNode {
    menu: Option<RawMenu>,
    function: Option<RawFunction>,
}

#[derive(Debug, Deserialize)]
struct RawMenu {
    name: String,
    items: Option<Vec<RawNode>>,
    import: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFunction {
    name: String,
    module: String,
    func: Option<String>,
    #[serde(default)]
    args: Vec<Map<String, Value>>,
}

// --- Typed tree ---

/// A node of a menu tree: either a (sub-)menu or a leaf action.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuTree {
    Menu(MenuNode),
    Action(ActionNode),
}

/// A menu with a header and either inline items or an import of another file.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub name: String,
    pub body: MenuBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuBody {
    /// Inline children, never empty.
    Items(Vec<MenuTree>),
    /// Another menu file, already resolved against the declaring file's directory.
    Import(PathBuf),
}

/// A leaf that invokes a registered capability.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionNode {
    /// Display label, also the source of the derived function name.
    pub name: String,
    /// Capability group holding the function.
    pub module: String,
    /// Explicit function name; derived from `name` when absent.
    pub func: Option<String>,
    pub args: Arguments,
}

impl MenuTree {
    /// Label shown for this node in its parent's listing.
    pub fn name(&self) -> &str {
        match self {
            MenuTree::Menu(menu) => &menu.name,
            MenuTree::Action(action) => &action.name,
        }
    }

    /// Converts a generic parsed document into a typed tree.
    ///
    /// `source` is the file the value was read from; import paths are resolved against
    /// its parent directory and it is named in any structural error.
    pub fn from_value(value: Value, source: &Path) -> Result<Self> {
        let raw: RawNode = serde_json::from_value(value)
            .map_err(|e| AppError::structure(source, e.to_string()))?;
        let base = source.parent().unwrap_or_else(|| Path::new(""));
        convert(raw, base, "root").map_err(|message| AppError::structure(source, message))
    }
}

fn convert(raw: RawNode, base: &Path, trail: &str) -> std::result::Result<MenuTree, String> {
    match (raw.menu, raw.function) {
        (Some(menu), None) => convert_menu(menu, base, trail).map(MenuTree::Menu),
        (None, Some(function)) => Ok(MenuTree::Action(ActionNode {
            name: function.name,
            module: function.module,
            func: function.func,
            args: Arguments::merge(function.args),
        })),
        (Some(_), Some(_)) => Err(format!(
            "{}: node has both 'menu' and 'function' keys",
            trail
        )),
        (None, None) => Err(format!(
            "{}: node has neither a 'menu' nor a 'function' key",
            trail
        )),
    }
}

fn convert_menu(menu: RawMenu, base: &Path, trail: &str) -> std::result::Result<MenuNode, String> {
    let trail = format!("{} > {}", trail, menu.name);
    let body = match (menu.items, menu.import) {
        (None, Some(import)) => MenuBody::Import(base.join(import)),
        (Some(_), Some(_)) => {
            return Err(format!("{}: a menu with 'import' cannot also define 'items'", trail))
        },
        (None, None) => return Err(format!("{}: menu has no 'items' and no 'import'", trail)),
        (Some(items), None) if items.is_empty() => {
            return Err(format!("{}: menu 'items' must not be empty", trail))
        },
        (Some(items), None) => MenuBody::Items(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| convert(item, base, &format!("{}[{}]", trail, i + 1)))
                .collect::<std::result::Result<Vec<_>, _>>()?,
        ),
    };

    Ok(MenuNode {
        name: menu.name,
        body,
    })
}

// --- Arguments ---

/// Property mapping passed to a capability.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    /// Merges a sequence of property objects in order.
    ///
    /// A key repeated in a later object overwrites the earlier value, so
    /// `[{"a": 1}, {"a": 2}]` becomes `{"a": 2}`. Menu files in the wild rely on this.
    pub fn merge(entries: impl IntoIterator<Item = Map<String, Value>>) -> Self {
        let mut merged = Map::new();
        for entry in entries {
            merged.extend(entry);
        }
        Self(merged)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the value for `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn source() -> PathBuf {
        PathBuf::from("/menus/main.json")
    }

    #[test]
    fn test_convert_inline_menu_keeps_item_order() {
        let value = json!({"menu": {"name": "Main", "items": [
            {"function": {"name": "First", "module": "demo"}},
            {"menu": {"name": "Second", "items": [
                {"function": {"name": "Nested", "module": "demo", "func": "nested"}}
            ]}},
            {"function": {"name": "Third", "module": "demo"}}
        ]}});

        let tree = MenuTree::from_value(value, &source()).unwrap();
        let MenuTree::Menu(MenuNode { name, body: MenuBody::Items(items) }) = tree else {
            panic!("Expected an inline menu");
        };
        assert_eq!(name, "Main");
        let names: Vec<&str> = items.iter().map(MenuTree::name).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        match &items[1] {
            MenuTree::Menu(sub) => assert!(matches!(&sub.body, MenuBody::Items(i) if i.len() == 1)),
            other => panic!("Expected sub-menu, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_import_resolves_against_source_dir() {
        let value = json!({"menu": {"name": "Main", "items": [
            {"menu": {"name": "Tools", "import": "sub/tools.yaml"}}
        ]}});

        let tree = MenuTree::from_value(value, &source()).unwrap();
        let MenuTree::Menu(MenuNode { body: MenuBody::Items(items), .. }) = tree else {
            panic!("Expected an inline menu");
        };
        assert_eq!(
            items[0],
            MenuTree::Menu(MenuNode {
                name: "Tools".to_string(),
                body: MenuBody::Import(PathBuf::from("/menus/sub/tools.yaml")),
            })
        );
    }

    #[test]
    fn test_convert_function_root() {
        let value = json!({"function": {"name": "Hello World", "module": "demo",
            "args": [{"param1": "x"}, {"param2": "y"}]}});

        let tree = MenuTree::from_value(value, &source()).unwrap();
        let MenuTree::Action(action) = tree else {
            panic!("Expected an action");
        };
        assert_eq!(action.module, "demo");
        assert_eq!(action.func, None);
        assert_eq!(action.args.get_str("param1"), Some("x"));
        assert_eq!(action.args.get_str("param2"), Some("y"));
    }

    // Later duplicates win. Kept for compatibility with existing menu files,
    // not because it is a good idea.
    #[test]
    fn test_arguments_merge_later_duplicate_wins() {
        let args = Arguments::merge(vec![
            json!({"a": 1}).as_object().cloned().unwrap(),
            json!({"a": 2}).as_object().cloned().unwrap(),
        ]);
        assert_eq!(args.len(), 1);
        assert_eq!(args.get("a"), Some(&json!(2)));
    }

    #[test]
    fn test_missing_args_is_empty_mapping() {
        let value = json!({"function": {"name": "Bare", "module": "demo"}});
        let MenuTree::Action(action) = MenuTree::from_value(value, &source()).unwrap() else {
            panic!("Expected an action");
        };
        assert!(action.args.is_empty());
    }

    #[test]
    fn test_node_with_neither_shape_is_rejected() {
        let value = json!({"menu": {"name": "Main", "items": [{"submenu": {}}]}});
        let err = MenuTree::from_value(value, &source()).unwrap_err();
        match err {
            AppError::Structure { path, message } => {
                assert_eq!(path, source());
                assert!(message.contains("root > Main[1]"), "message: {}", message);
                assert!(message.contains("neither"));
            },
            other => panic!("Expected Structure error, got {:?}", other),
        }
    }

    #[test]
    fn test_node_with_both_shapes_is_rejected() {
        let value = json!({
            "menu": {"name": "Main", "items": [{"function": {"name": "A", "module": "m"}}]},
            "function": {"name": "B", "module": "m"}
        });
        let err = MenuTree::from_value(value, &source()).unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_empty_items_is_rejected() {
        let value = json!({"menu": {"name": "Main", "items": []}});
        let err = MenuTree::from_value(value, &source()).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_import_with_items_is_rejected() {
        let value = json!({"menu": {"name": "Main", "import": "x.json", "items": [
            {"function": {"name": "A", "module": "m"}}
        ]}});
        let err = MenuTree::from_value(value, &source()).unwrap_err();
        assert!(err.to_string().contains("cannot also define 'items'"));
    }

    #[test]
    fn test_function_without_module_is_rejected() {
        let value = json!({"function": {"name": "Hello"}});
        let err = MenuTree::from_value(value, &source()).unwrap_err();
        assert!(matches!(err, AppError::Structure { .. }));
        assert!(err.to_string().contains("module"));
    }
}
