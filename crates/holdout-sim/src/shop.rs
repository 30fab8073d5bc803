//! Upgrade shop.
//!
//! A fixed catalog of tiered upgrades and consumables. Purchases are
//! atomic: affordability and the tier cap are checked before any gold
//! moves, so a failed purchase leaves balance, tier, and player stats
//! untouched. Owned tiers persist under stable per-kind keys and are
//! replayed (effects only, no spending) when a session loads.

use hecs::World;

use holdout_core::constants;
use holdout_core::enums::UpgradeKind;
use holdout_core::stats::CombatantStats;

use crate::bus::EventBus;
use crate::ledger::EconomyLedger;
use crate::persistence::PrefStore;
use crate::world;

/// One catalog entry. `value` is the magnitude granted by the most
/// recently purchased tier; `cost` is the price of the next one.
///
/// Authored items may carry explicit per-tier cost/value tables; items
/// without them fall back to the per-category closed-form formulas.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopItem {
    pub kind: UpgradeKind,
    pub display_name: String,
    pub description: String,
    base_cost: u32,
    pub cost: u32,
    pub tier: u32,
    pub max_tier: u32,
    pub consumable: bool,
    pub value: f32,
    /// `cost_table[t]` is the price of tier `t + 1`.
    cost_table: Option<Vec<u32>>,
    /// `value_table[t]` is the magnitude granted by tier `t + 1`.
    value_table: Option<Vec<f32>>,
}

impl ShopItem {
    pub fn new(
        kind: UpgradeKind,
        display_name: &str,
        description: &str,
        base_cost: u32,
        max_tier: u32,
        consumable: bool,
        value: f32,
    ) -> Self {
        Self {
            kind,
            display_name: display_name.to_string(),
            description: description.to_string(),
            base_cost,
            cost: base_cost,
            tier: 0,
            max_tier,
            consumable,
            value,
            cost_table: None,
            value_table: None,
        }
    }

    /// Attach explicit per-tier tables, overriding the formulas. The
    /// first table entry is the opening price, and the cost table's
    /// length becomes the tier cap so no tier can sell past the table.
    pub fn with_tables(mut self, cost_table: Vec<u32>, value_table: Vec<f32>) -> Self {
        if let Some(&first) = cost_table.first() {
            self.cost = first;
        }
        self.max_tier = cost_table.len() as u32;
        self.cost_table = Some(cost_table);
        self.value_table = Some(value_table);
        self
    }

    pub fn is_maxed(&self) -> bool {
        !self.consumable && self.tier >= self.max_tier
    }

    /// Move to the next tier, updating the granted value and the price
    /// of the tier after it. Explicit tables win over the formulas.
    /// Consumables never call this.
    fn advance_tier(&mut self) {
        self.tier += 1;
        let tier = self.tier;
        match self.kind {
            UpgradeKind::DamageBoost => {
                self.value = 5.0 + tier as f32 * 2.0;
                self.cost = self.base_cost + tier * 50;
            }
            UpgradeKind::HealthBoost => {
                self.value = 10.0 + tier as f32 * 5.0;
                self.cost = self.base_cost + tier * 40;
            }
            UpgradeKind::SpeedBoost => {
                self.value = 0.5 + tier as f32 * 0.2;
                self.cost = self.base_cost + tier * 30;
            }
            UpgradeKind::SpinningFireball => {
                if tier == 1 {
                    self.cost = 200;
                    self.display_name = "Twin Fireballs".to_string();
                    self.description = "Add a second fireball to the orbit".to_string();
                } else {
                    self.cost = 0;
                }
            }
            UpgradeKind::PeriodicSword => {
                if tier == 1 {
                    self.cost = 150;
                    self.value = 15.0;
                    self.display_name = "Sharpened Sword".to_string();
                    self.description = "Sharpen the sword for extra damage".to_string();
                } else {
                    self.cost = 0;
                    self.value = 20.0;
                }
            }
            UpgradeKind::HealthPotion | UpgradeKind::TempDamageBoost => {}
        }

        if let Some(table) = &self.value_table {
            if let Some(&value) = table.get(tier as usize - 1) {
                self.value = value;
            }
        }
        if let Some(table) = &self.cost_table {
            self.cost = table.get(tier as usize).copied().unwrap_or(0);
        }
    }

    fn level_key(&self) -> String {
        format!("shop_item_{}_level", self.kind.as_str())
    }

    fn cost_key(&self) -> String {
        format!("shop_item_{}_cost", self.kind.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Shop {
    items: Vec<ShopItem>,
}

impl Default for Shop {
    fn default() -> Self {
        Self {
            items: default_catalog(),
        }
    }
}

fn default_catalog() -> Vec<ShopItem> {
    vec![
        ShopItem::new(
            UpgradeKind::DamageBoost,
            "Damage Boost",
            "Permanently raise damage dealt",
            100,
            5,
            false,
            0.0,
        ),
        ShopItem::new(
            UpgradeKind::HealthBoost,
            "Health Boost",
            "Permanently raise maximum health",
            80,
            5,
            false,
            0.0,
        ),
        ShopItem::new(
            UpgradeKind::SpeedBoost,
            "Speed Boost",
            "Permanently raise movement speed",
            60,
            5,
            false,
            0.0,
        ),
        ShopItem::new(
            UpgradeKind::SpinningFireball,
            "Spinning Fireball",
            "A fireball orbits you, burning enemies it touches",
            100,
            2,
            false,
            0.0,
        ),
        ShopItem::new(
            UpgradeKind::PeriodicSword,
            "Sword",
            "A sword swings around you at regular intervals",
            120,
            2,
            false,
            0.0,
        ),
        ShopItem::new(
            UpgradeKind::HealthPotion,
            "Health Potion",
            "Restore health immediately",
            25,
            0,
            true,
            constants::HEALTH_POTION_HEAL,
        ),
        ShopItem::new(
            UpgradeKind::TempDamageBoost,
            "Battle Fury",
            "A burst of extra damage for a short while",
            40,
            0,
            true,
            constants::TEMP_BOOST_AMOUNT,
        ),
    ]
}

impl Shop {
    /// A shop over a custom catalog, for authored item sets.
    pub fn new(items: Vec<ShopItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    pub fn item(&self, kind: UpgradeKind) -> Option<&ShopItem> {
        self.items.iter().find(|i| i.kind == kind)
    }

    /// Attempt a purchase. Returns whether it went through.
    ///
    /// Order matters: the tier cap is checked first, then gold is
    /// spent, and only then does the tier advance and the effect apply.
    /// The new tier and next cost are persisted in the same breath.
    #[allow(clippy::too_many_arguments)]
    pub fn try_buy(
        &mut self,
        kind: UpgradeKind,
        ledger: &mut EconomyLedger,
        store: &mut PrefStore,
        bus: &mut EventBus,
        player: &mut CombatantStats,
        world: &mut World,
    ) -> bool {
        let Some(index) = self.items.iter().position(|i| i.kind == kind) else {
            return false;
        };
        if self.items[index].is_maxed() {
            return false;
        }
        if !ledger.spend(self.items[index].cost, store, bus) {
            return false;
        }

        let item = &mut self.items[index];
        if !item.consumable {
            item.advance_tier();
            store.set(&item.level_key(), i64::from(item.tier));
            store.set(&item.cost_key(), i64::from(item.cost));
            if let Err(e) = store.flush() {
                eprintln!("shop: {e}");
            }
        }
        apply_effect(&self.items[index], player, world);
        true
    }

    /// Replay persisted purchases onto a fresh player and world. Tiers
    /// advance and effects apply exactly as they did when bought, but
    /// no gold moves. The stored next-cost wins over the recomputed one
    /// so old saves keep their prices.
    pub fn load_owned(&mut self, store: &PrefStore, player: &mut CombatantStats, world: &mut World) {
        for item in &mut self.items {
            if item.consumable {
                continue;
            }
            let saved_tier = store.get(&item.level_key(), 0).max(0) as u32;
            for _ in 0..saved_tier.min(item.max_tier) {
                item.advance_tier();
                apply_effect(item, player, world);
            }
            if item.tier > 0 {
                let saved_cost = store.get(&item.cost_key(), i64::from(item.cost));
                item.cost = saved_cost.max(0) as u32;
            }
        }
    }

    /// Wipe every owned upgrade: despawn purchase-created actors,
    /// restore the catalog to its defaults, and delete the persisted
    /// keys. Keys are derived from the upgrade kind, so renaming a
    /// display name can never orphan a stored tier.
    pub fn reset_all(&mut self, store: &mut PrefStore, world: &mut World) {
        let mut buffer = Vec::new();
        world::clear_effect_actors(world, &mut buffer);

        for item in &self.items {
            store.delete(&item.level_key());
            store.delete(&item.cost_key());
        }
        self.items = default_catalog();
        if let Err(e) = store.flush() {
            eprintln!("shop: {e}");
        }
    }
}

/// Apply the effect of the item's current tier (or of one consumable
/// use) to the player and world.
fn apply_effect(item: &ShopItem, player: &mut CombatantStats, world: &mut World) {
    match item.kind {
        UpgradeKind::DamageBoost => player.add_permanent_damage_boost(item.value),
        UpgradeKind::HealthBoost => player.increase_max_health(item.value),
        UpgradeKind::SpeedBoost => player.add_speed_boost(item.value),
        UpgradeKind::HealthPotion => player.heal(item.value),
        UpgradeKind::TempDamageBoost => {
            player.add_temporary_damage_boost(item.value, constants::TEMP_BOOST_DURATION)
        }
        UpgradeKind::SpinningFireball => {
            world::add_orbiting_fireball(world);
        }
        UpgradeKind::PeriodicSword => {
            // Tier 1 spawns the sword with no bonus; later tiers only
            // raise its damage.
            let bonus = if item.tier > 1 { item.value } else { 0.0 };
            world::spawn_or_upgrade_sword(world, bonus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{EffectActor, OrbitingFireball};

    struct Fixture {
        shop: Shop,
        ledger: EconomyLedger,
        store: PrefStore,
        bus: EventBus,
        player: CombatantStats,
        world: World,
    }

    fn fixture(gold: u32) -> Fixture {
        let mut store = PrefStore::in_memory();
        let mut bus = EventBus::new();
        let mut ledger = EconomyLedger::load(&store);
        ledger.add(gold, &mut store, &mut bus);
        Fixture {
            shop: Shop::default(),
            ledger,
            store,
            bus,
            player: CombatantStats::player_default(),
            world: World::new(),
        }
    }

    fn buy(f: &mut Fixture, kind: UpgradeKind) -> bool {
        f.shop.try_buy(
            kind,
            &mut f.ledger,
            &mut f.store,
            &mut f.bus,
            &mut f.player,
            &mut f.world,
        )
    }

    #[test]
    fn purchase_spends_advances_and_applies() {
        let mut f = fixture(500);
        assert!(buy(&mut f, UpgradeKind::DamageBoost));

        assert_eq!(f.ledger.balance(), 400);
        let item = f.shop.item(UpgradeKind::DamageBoost).unwrap();
        assert_eq!(item.tier, 1);
        assert_eq!(item.cost, 150);
        // Tier 1 grants +7% damage.
        assert!((f.player.damage_multiplier - 1.07).abs() < 1e-5);
        assert_eq!(f.store.get("shop_item_damage_boost_level", 0), 1);
        assert_eq!(f.store.get("shop_item_damage_boost_cost", 0), 150);
    }

    #[test]
    fn unaffordable_purchase_changes_nothing() {
        let mut f = fixture(99);
        assert!(!buy(&mut f, UpgradeKind::DamageBoost));

        assert_eq!(f.ledger.balance(), 99);
        assert_eq!(f.shop.item(UpgradeKind::DamageBoost).unwrap().tier, 0);
        assert!((f.player.damage_multiplier - 1.0).abs() < 1e-6);
        assert!(!f.store.contains("shop_item_damage_boost_level"));
    }

    #[test]
    fn maxed_item_refuses_even_with_gold() {
        let mut f = fixture(100_000);
        for _ in 0..5 {
            assert!(buy(&mut f, UpgradeKind::DamageBoost));
        }
        let balance = f.ledger.balance();
        assert!(!buy(&mut f, UpgradeKind::DamageBoost));
        assert_eq!(f.ledger.balance(), balance);
        assert_eq!(f.shop.item(UpgradeKind::DamageBoost).unwrap().tier, 5);
    }

    #[test]
    fn consumables_never_tier_or_persist() {
        let mut f = fixture(200);
        assert!(buy(&mut f, UpgradeKind::HealthPotion));
        assert!(buy(&mut f, UpgradeKind::HealthPotion));

        let item = f.shop.item(UpgradeKind::HealthPotion).unwrap();
        assert_eq!(item.tier, 0);
        assert_eq!(item.cost, 25);
        assert_eq!(f.ledger.balance(), 150);
        assert!(!f.store.contains("shop_item_health_potion_level"));
    }

    #[test]
    fn potion_heals_and_fury_boosts() {
        let mut f = fixture(200);
        f.player.take_damage(80.0);
        assert!(buy(&mut f, UpgradeKind::HealthPotion));
        assert!((f.player.current_health - 70.0).abs() < 1e-5);

        assert!(buy(&mut f, UpgradeKind::TempDamageBoost));
        assert!((f.player.effective_damage() - 20.0).abs() < 1e-5);
        assert!((f.player.boost_time_left() - constants::TEMP_BOOST_DURATION).abs() < 1e-5);
    }

    #[test]
    fn fireball_tiers_grow_the_orbit() {
        let mut f = fixture(1000);
        assert!(buy(&mut f, UpgradeKind::SpinningFireball));
        assert_eq!(
            f.world.query_mut::<&OrbitingFireball>().into_iter().count(),
            1
        );
        assert_eq!(f.shop.item(UpgradeKind::SpinningFireball).unwrap().cost, 200);

        assert!(buy(&mut f, UpgradeKind::SpinningFireball));
        assert_eq!(
            f.world.query_mut::<&OrbitingFireball>().into_iter().count(),
            2
        );
        // Both tiers owned.
        assert!(!buy(&mut f, UpgradeKind::SpinningFireball));
    }

    #[test]
    fn load_replays_tiers_without_spending() {
        let mut f = fixture(1000);
        assert!(buy(&mut f, UpgradeKind::DamageBoost));
        assert!(buy(&mut f, UpgradeKind::DamageBoost));
        assert!(buy(&mut f, UpgradeKind::SpinningFireball));
        let bought_multiplier = f.player.damage_multiplier;
        let store = f.store.clone();

        let mut shop = Shop::default();
        let mut player = CombatantStats::player_default();
        let mut world = World::new();
        shop.load_owned(&store, &mut player, &mut world);

        assert_eq!(shop.item(UpgradeKind::DamageBoost).unwrap().tier, 2);
        assert!((player.damage_multiplier - bought_multiplier).abs() < 1e-5);
        assert_eq!(world.query_mut::<&OrbitingFireball>().into_iter().count(), 1);
        // Replay touched no gold.
        assert_eq!(store.get(constants::CURRENCY_KEY, 0), f.store.get(constants::CURRENCY_KEY, 0));
    }

    #[test]
    fn reset_clears_actors_tiers_and_keys() {
        let mut f = fixture(1000);
        assert!(buy(&mut f, UpgradeKind::DamageBoost));
        assert!(buy(&mut f, UpgradeKind::SpinningFireball));

        f.shop.reset_all(&mut f.store, &mut f.world);

        assert_eq!(f.shop.item(UpgradeKind::DamageBoost).unwrap().tier, 0);
        assert_eq!(f.shop.item(UpgradeKind::DamageBoost).unwrap().cost, 100);
        assert!(!f.store.contains("shop_item_damage_boost_level"));
        assert!(!f.store.contains("shop_item_spinning_fireball_level"));
        assert_eq!(f.world.query_mut::<&EffectActor>().into_iter().count(), 0);
    }

    #[test]
    fn explicit_tables_override_formulas() {
        let mut f = fixture(1000);
        f.shop = Shop::new(vec![ShopItem::new(
            UpgradeKind::DamageBoost,
            "Damage Boost",
            "Permanently raise damage dealt",
            100,
            2,
            false,
            0.0,
        )
        .with_tables(vec![30, 70], vec![3.0, 6.0])]);

        // Opening price comes from the table, not the base cost.
        assert_eq!(f.shop.item(UpgradeKind::DamageBoost).unwrap().cost, 30);

        assert!(buy(&mut f, UpgradeKind::DamageBoost));
        let item = f.shop.item(UpgradeKind::DamageBoost).unwrap();
        assert_eq!(item.cost, 70);
        assert!((item.value - 3.0).abs() < 1e-6);
        assert!((f.player.damage_multiplier - 1.03).abs() < 1e-6);

        assert!(buy(&mut f, UpgradeKind::DamageBoost));
        let item = f.shop.item(UpgradeKind::DamageBoost).unwrap();
        assert!((item.value - 6.0).abs() < 1e-6);
        assert_eq!(f.ledger.balance(), 900);
    }

    #[test]
    fn cost_table_length_caps_the_tier_count() {
        let mut f = fixture(1000);
        // Declared cap of 5, but only two priced tiers.
        f.shop = Shop::new(vec![ShopItem::new(
            UpgradeKind::HealthBoost,
            "Health Boost",
            "Permanently raise maximum health",
            100,
            5,
            false,
            0.0,
        )
        .with_tables(vec![10, 20], vec![1.0, 2.0])]);

        assert_eq!(f.shop.item(UpgradeKind::HealthBoost).unwrap().max_tier, 2);
        assert!(buy(&mut f, UpgradeKind::HealthBoost));
        assert!(buy(&mut f, UpgradeKind::HealthBoost));

        // Past the table the item is maxed, never free.
        assert!(f.shop.item(UpgradeKind::HealthBoost).unwrap().is_maxed());
        assert!(!buy(&mut f, UpgradeKind::HealthBoost));
        assert_eq!(f.ledger.balance(), 970);
    }

    #[test]
    fn sword_second_tier_sharpens_in_place() {
        let mut f = fixture(1000);
        assert!(buy(&mut f, UpgradeKind::PeriodicSword));

        // Tier 1 spawns the sword at base damage.
        let base: Vec<f32> = f
            .world
            .query_mut::<&crate::world::PeriodicSword>()
            .into_iter()
            .map(|(_, s)| s.damage)
            .collect();
        assert_eq!(base, vec![constants::SWORD_DAMAGE]);

        assert!(buy(&mut f, UpgradeKind::PeriodicSword));

        // Tier 2 sharpens the existing sword by the tier's full value.
        let item = f.shop.item(UpgradeKind::PeriodicSword).unwrap();
        let swords: Vec<f32> = f
            .world
            .query_mut::<&crate::world::PeriodicSword>()
            .into_iter()
            .map(|(_, s)| s.damage)
            .collect();
        assert_eq!(swords.len(), 1);
        assert!((swords[0] - (constants::SWORD_DAMAGE + item.value)).abs() < 1e-5);
        assert!((swords[0] - (constants::SWORD_DAMAGE + 20.0)).abs() < 1e-5);
    }
}
