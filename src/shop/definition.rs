//! Shop Definition Structures
//!
//! Two shop shapes exist: a folder shop whose membership is derived from the
//! vault (folder prefix plus an optional item tag), and a custom shop with a
//! fixed item list and weighted random pools.

use serde::{Deserialize, Serialize};

/// A shop definition, loadable from a TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShopDefinition {
    Folder(FolderShop),
    Custom(CustomShop),
}

/// Shop whose stock is every note under a vault folder, unioned with every
/// note carrying the item tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderShop {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub folder_path: String,
    /// Notes carrying this tag are members regardless of folder
    #[serde(default)]
    pub item_tag: Option<String>,
}

/// Hand-built shop: fixed items plus probabilistic random pools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomShop {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Optional note describing the shop itself
    #[serde(default)]
    pub linked_note: Option<String>,
    /// Always listed, in order
    #[serde(default)]
    pub fixed_items: Vec<String>,
    /// Re-rolled on every listing
    #[serde(default, rename = "pool")]
    pub pools: Vec<RandomPool>,
}

/// A named pool of note paths eligible for probabilistic inclusion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomPool {
    pub name: String,
    /// Per-item acceptance probability in [0, 1]
    pub chance: f64,
    /// Upper bound on picks from this pool per listing
    pub max_items: usize,
    #[serde(default)]
    pub items: Vec<String>,
}

impl ShopDefinition {
    /// The default folder shop every player has: the configured items folder
    /// unioned with `#item`-tagged notes.
    pub fn default_folder(folder_path: &str) -> Self {
        ShopDefinition::Folder(FolderShop {
            name: "General Store".to_string(),
            description: String::new(),
            folder_path: folder_path.to_string(),
            item_tag: Some("item".to_string()),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            ShopDefinition::Folder(shop) => &shop.name,
            ShopDefinition::Custom(shop) => &shop.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ShopDefinition::Folder(shop) => &shop.description,
            ShopDefinition::Custom(shop) => &shop.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_shop_parses_from_toml() {
        let toml_content = r#"
kind = "folder"
name = "General Store"
folder_path = "Items/"
item_tag = "item"
"#;
        let shop: ShopDefinition = toml::from_str(toml_content).unwrap();
        match shop {
            ShopDefinition::Folder(folder) => {
                assert_eq!(folder.name, "General Store");
                assert_eq!(folder.folder_path, "Items/");
                assert_eq!(folder.item_tag.as_deref(), Some("item"));
            }
            ShopDefinition::Custom(_) => panic!("expected folder shop"),
        }
    }

    #[test]
    fn custom_shop_parses_pools() {
        let toml_content = r#"
kind = "custom"
name = "Black Market"
description = "Rarities, sometimes."
fixed_items = ["Items/Dagger.md"]

[[pool]]
name = "Contraband"
chance = 0.5
max_items = 2
items = ["Items/Relic.md", "Items/Gem.md"]
"#;
        let shop: ShopDefinition = toml::from_str(toml_content).unwrap();
        match shop {
            ShopDefinition::Custom(custom) => {
                assert_eq!(custom.fixed_items, vec!["Items/Dagger.md"]);
                assert_eq!(custom.pools.len(), 1);
                assert_eq!(custom.pools[0].max_items, 2);
                assert!((custom.pools[0].chance - 0.5).abs() < f64::EPSILON);
            }
            ShopDefinition::Folder(_) => panic!("expected custom shop"),
        }
    }
}
