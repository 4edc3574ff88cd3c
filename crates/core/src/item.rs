//! Item catalogue - resources, food and tools carried in the inventory

use serde::{Deserialize, Serialize};

/// Every item the survival core knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Chopped from trees; the universal crafting material.
    Wood,
    /// Mined from rocks; needed to strike a fire.
    FlintStone,
    /// Foraged from bushes.
    Berries,
    /// Gathered from fruit trees.
    Apple,
    /// Apple cooked over a campfire.
    RoastedApple,
    /// Harvested from fauna.
    RawMeat,
    /// Raw meat cooked over a campfire.
    CookedMeat,
    /// Ammunition for the bow.
    Arrow,
    /// Ranged tool.
    Bow,
    /// Hand-held light.
    Torch,
    /// Empty water container.
    Waterskin,
    /// Filled water container.
    FullWaterskin,
}

/// Inventory category, which decides stacking ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Raw materials and ammunition.
    Resource,
    /// Anything edible.
    Food,
    /// Single-instance capability items.
    Tool,
}

impl ItemCategory {
    /// Maximum count a single stack of this category may hold.
    pub fn stack_cap(self) -> u32 {
        match self {
            ItemCategory::Resource => 50,
            ItemCategory::Food => 20,
            ItemCategory::Tool => 1,
        }
    }
}

/// Tools that are toggled active rather than consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    /// Fires arrows.
    Bow,
    /// Carried light source.
    Torch,
}

impl ToolKind {
    /// Inventory item backing this tool.
    pub fn item(self) -> ItemKind {
        match self {
            ToolKind::Bow => ItemKind::Bow,
            ToolKind::Torch => ItemKind::Torch,
        }
    }
}

/// Stat changes applied when a food item is eaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodEffect {
    /// Hunger restored.
    pub hunger: f32,
    /// Health change (negative for unsafe food).
    pub health: f32,
}

impl ItemKind {
    /// All item kinds, in declaration order.
    pub const ALL: [ItemKind; 12] = [
        ItemKind::Wood,
        ItemKind::FlintStone,
        ItemKind::Berries,
        ItemKind::Apple,
        ItemKind::RoastedApple,
        ItemKind::RawMeat,
        ItemKind::CookedMeat,
        ItemKind::Arrow,
        ItemKind::Bow,
        ItemKind::Torch,
        ItemKind::Waterskin,
        ItemKind::FullWaterskin,
    ];

    /// Player-facing name.
    pub fn display_name(self) -> &'static str {
        match self {
            ItemKind::Wood => "Wood",
            ItemKind::FlintStone => "Flint Stone",
            ItemKind::Berries => "Berries",
            ItemKind::Apple => "Apple",
            ItemKind::RoastedApple => "Roasted Apple",
            ItemKind::RawMeat => "Raw Meat",
            ItemKind::CookedMeat => "Cooked Meat",
            ItemKind::Arrow => "Arrow",
            ItemKind::Bow => "Bow",
            ItemKind::Torch => "Torch",
            ItemKind::Waterskin => "Waterskin (Empty)",
            ItemKind::FullWaterskin => "Waterskin (Full)",
        }
    }

    /// Look up a kind by its display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.display_name().eq_ignore_ascii_case(name))
    }

    /// Short tag the HUD maps to an icon.
    pub fn icon(self) -> &'static str {
        match self {
            ItemKind::Wood => "log",
            ItemKind::FlintStone => "flint",
            ItemKind::Berries => "berries",
            ItemKind::Apple => "apple",
            ItemKind::RoastedApple => "apple_roasted",
            ItemKind::RawMeat => "meat_raw",
            ItemKind::CookedMeat => "meat_cooked",
            ItemKind::Arrow => "arrow",
            ItemKind::Bow => "bow",
            ItemKind::Torch => "torch",
            ItemKind::Waterskin => "waterskin_empty",
            ItemKind::FullWaterskin => "waterskin_full",
        }
    }

    /// Category of this item.
    pub fn category(self) -> ItemCategory {
        match self {
            ItemKind::Wood | ItemKind::FlintStone | ItemKind::Arrow => ItemCategory::Resource,
            ItemKind::Berries
            | ItemKind::Apple
            | ItemKind::RoastedApple
            | ItemKind::RawMeat
            | ItemKind::CookedMeat => ItemCategory::Food,
            ItemKind::Bow | ItemKind::Torch | ItemKind::Waterskin | ItemKind::FullWaterskin => {
                ItemCategory::Tool
            }
        }
    }

    /// Stack ceiling for this item.
    pub fn stack_cap(self) -> u32 {
        self.category().stack_cap()
    }

    /// Display rank; lower ranks are listed first.
    ///
    /// tools > fire-starting items > prepared food > raw food > ammunition > raw materials
    pub fn display_priority(self) -> u8 {
        match self {
            ItemKind::Bow | ItemKind::Torch | ItemKind::Waterskin | ItemKind::FullWaterskin => 0,
            ItemKind::FlintStone => 1,
            ItemKind::RoastedApple | ItemKind::CookedMeat => 2,
            ItemKind::Berries | ItemKind::Apple | ItemKind::RawMeat => 3,
            ItemKind::Arrow => 4,
            ItemKind::Wood => 5,
        }
    }

    /// Stat effect when eaten, `None` for inedible items.
    pub fn food_effect(self) -> Option<FoodEffect> {
        let (hunger, health) = match self {
            ItemKind::Apple => (15.0, 0.0),
            ItemKind::RoastedApple => (25.0, 0.0),
            ItemKind::CookedMeat => (55.0, 5.0),
            ItemKind::RawMeat => (12.0, -8.0),
            ItemKind::Berries => (10.0, 0.0),
            _ => return None,
        };
        Some(FoodEffect { hunger, health })
    }

    /// The tool this item toggles, if any.
    pub fn tool(self) -> Option<ToolKind> {
        match self {
            ItemKind::Bow => Some(ToolKind::Bow),
            ItemKind::Torch => Some(ToolKind::Torch),
            _ => None,
        }
    }

    /// The other fill state of a water container. Both states share one slot.
    pub fn container_variant(self) -> Option<ItemKind> {
        match self {
            ItemKind::Waterskin => Some(ItemKind::FullWaterskin),
            ItemKind::FullWaterskin => Some(ItemKind::Waterskin),
            _ => None,
        }
    }

    /// What this item becomes when cooked over a fire.
    pub fn cooked(self) -> Option<ItemKind> {
        match self {
            ItemKind::RawMeat => Some(ItemKind::CookedMeat),
            ItemKind::Apple => Some(ItemKind::RoastedApple),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::from_name(kind.display_name()), Some(kind));
        }
        assert_eq!(ItemKind::from_name("flint stone"), Some(ItemKind::FlintStone));
        assert_eq!(ItemKind::from_name("Pebble"), None);
    }

    #[test]
    fn resources_cap_higher_than_food() {
        assert!(ItemCategory::Resource.stack_cap() > ItemCategory::Food.stack_cap());
        assert_eq!(ItemKind::Bow.stack_cap(), 1);
    }

    #[test]
    fn waterskin_states_pair_up() {
        assert_eq!(
            ItemKind::Waterskin.container_variant(),
            Some(ItemKind::FullWaterskin)
        );
        assert_eq!(
            ItemKind::FullWaterskin.container_variant(),
            Some(ItemKind::Waterskin)
        );
        assert_eq!(ItemKind::Bow.container_variant(), None);
    }

    #[test]
    fn food_values() {
        let raw = ItemKind::RawMeat.food_effect().unwrap();
        assert_eq!(raw.hunger, 12.0);
        assert_eq!(raw.health, -8.0);
        assert_eq!(ItemKind::CookedMeat.food_effect().unwrap().hunger, 55.0);
        assert_eq!(ItemKind::Apple.food_effect().unwrap().hunger, 15.0);
        assert_eq!(ItemKind::RoastedApple.food_effect().unwrap().hunger, 25.0);
        assert_eq!(ItemKind::Berries.food_effect().unwrap().hunger, 10.0);
        assert!(ItemKind::Wood.food_effect().is_none());
    }

    #[test]
    fn display_priority_orders_categories() {
        assert!(ItemKind::Bow.display_priority() < ItemKind::FlintStone.display_priority());
        assert!(
            ItemKind::FlintStone.display_priority() < ItemKind::CookedMeat.display_priority()
        );
        assert!(ItemKind::CookedMeat.display_priority() < ItemKind::RawMeat.display_priority());
        assert!(ItemKind::RawMeat.display_priority() < ItemKind::Arrow.display_priority());
        assert!(ItemKind::Arrow.display_priority() < ItemKind::Wood.display_priority());
    }

    #[test]
    fn cooking_table() {
        assert_eq!(ItemKind::RawMeat.cooked(), Some(ItemKind::CookedMeat));
        assert_eq!(ItemKind::Apple.cooked(), Some(ItemKind::RoastedApple));
        assert_eq!(ItemKind::Berries.cooked(), None);
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&ItemKind::FlintStone).unwrap();
        assert_eq!(json, "\"FlintStone\"");
    }
}
