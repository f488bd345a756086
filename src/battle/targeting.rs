//! Target selection rules.
//!
//! Whether a battler may target another is decided by an ordered chain of
//! [`SelectionRule`]s held in the [`TargetFilter`] resource. Rules are
//! registered once at startup with an explicit priority; each rule may
//! decide (`Some`) or defer (`None`). The first decision wins. If every
//! applicable rule defers, the built-in default row rule decides the way
//! plain melee targeting does.

use bevy::prelude::*;

use crate::data::{SkillDef, WeaponRegistry};

use super::components::{Equipment, Side};

/// Everything a rule may inspect about the acting or targeted battler.
pub struct BattlerView<'a> {
    pub entity: Entity,
    pub side: Side,
    pub row: u32,
    /// Present for party members only; troop battlers carry no equipment.
    pub equipment: Option<&'a Equipment>,
}

/// Shared lookups for one selection pass. All candidate targets of a given
/// action are on the same side, so the nearest occupied row is computed once
/// by the caller.
pub struct TargetingContext<'a> {
    pub weapons: &'a WeaponRegistry,
    /// Whether the row formation layer is active. Without it, rows carry no
    /// targeting meaning and the default rule admits every living opponent.
    pub row_formation: bool,
    /// Nearest occupied row on the targets' side, if anyone is standing.
    pub nearest_target_row: Option<u32>,
}

/// A composable targeting predicate.
///
/// `evaluate` returns `Some(true)` to admit the target, `Some(false)` to
/// veto it, or `None` to defer to lower-priority rules.
pub trait SelectionRule: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this rule has anything to say about the given skill.
    fn applies_to(&self, skill: &SkillDef) -> bool;

    fn evaluate(
        &self,
        user: &BattlerView,
        target: &BattlerView,
        ctx: &TargetingContext,
    ) -> Option<bool>;
}

/// Ordered chain of selection rules.
///
/// Registration happens once at startup, driven by the capability set;
/// nothing re-orders or extends the chain mid-battle.
#[derive(Resource, Default)]
pub struct TargetFilter {
    rules: Vec<(i32, Box<dyn SelectionRule>)>,
}

impl TargetFilter {
    /// Register a rule. Lower priority values are consulted first.
    pub fn register(&mut self, priority: i32, rule: Box<dyn SelectionRule>) {
        self.rules.push((priority, rule));
        self.rules.sort_by_key(|(p, _)| *p);
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Decide whether `target` is a valid target for `user` acting with
    /// `skill`. Walks the rule chain in priority order; the first rule that
    /// applies and decides wins, otherwise the default row rule decides.
    pub fn is_valid_target(
        &self,
        skill: &SkillDef,
        user: &BattlerView,
        target: &BattlerView,
        ctx: &TargetingContext,
    ) -> bool {
        for (_, rule) in &self.rules {
            if !rule.applies_to(skill) {
                continue;
            }
            if let Some(decision) = rule.evaluate(user, target, ctx) {
                return decision;
            }
        }
        default_row_rule(target, ctx)
    }
}

/// Built-in melee targeting: only the nearest occupied opposing row is
/// reachable, whatever its index. This intentionally differs from a weapon
/// declared `min=1, max=1`, which can hit row 1 and nothing else.
pub fn default_row_rule(target: &BattlerView, ctx: &TargetingContext) -> bool {
    if !ctx.row_formation {
        return true;
    }
    match ctx.nearest_target_row {
        Some(nearest) => target.row == nearest,
        None => false,
    }
}

/// Admits targets by the acting battler's equipped weapon range.
///
/// Applies only to skills tagged `WeaponRange`. The first equipped weapon
/// that declares range metadata decides: the target's row must fall within
/// the weapon's inclusive bounds. A user whose weapons declare no range
/// defers to default melee targeting; a user with no equipment at all can
/// never satisfy a range requirement.
pub struct WeaponRangeRule;

/// Consulted before any other custom rule.
pub const WEAPON_RANGE_PRIORITY: i32 = 0;

impl SelectionRule for WeaponRangeRule {
    fn name(&self) -> &'static str {
        "weapon-range"
    }

    fn applies_to(&self, skill: &SkillDef) -> bool {
        skill.is_ranged()
    }

    fn evaluate(
        &self,
        user: &BattlerView,
        target: &BattlerView,
        ctx: &TargetingContext,
    ) -> Option<bool> {
        let Some(equipment) = user.equipment else {
            return Some(false);
        };

        for &weapon_id in &equipment.weapons {
            let Some(weapon) = ctx.weapons.get(weapon_id) else {
                continue;
            };
            if weapon.range.is_declared() {
                return Some(weapon.range.contains(target.row));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::notetags::parse_notes;
    use crate::data::WeaponDef;

    fn weapon(id: u32, notes: &str) -> WeaponDef {
        let parsed = parse_notes(notes);
        WeaponDef {
            id,
            name: format!("weapon-{id}"),
            notes: notes.to_string(),
            range: parsed.range,
            selection_tags: parsed.tags,
        }
    }

    fn skill(notes: &str) -> SkillDef {
        SkillDef {
            id: 1,
            name: "Attack".to_string(),
            power: 5,
            inflicts: None,
            notes: notes.to_string(),
            selection_tags: parse_notes(notes).tags,
        }
    }

    fn registry(weapons: Vec<WeaponDef>) -> WeaponRegistry {
        let mut registry = WeaponRegistry::default();
        for w in weapons {
            registry.weapons.insert(w.id, w);
        }
        registry
    }

    fn view(entity_index: u32, side: Side, row: u32, equipment: Option<&Equipment>) -> BattlerView {
        BattlerView {
            entity: Entity::from_raw(entity_index),
            side,
            row,
            equipment,
        }
    }

    fn ctx<'a>(weapons: &'a WeaponRegistry, nearest: Option<u32>) -> TargetingContext<'a> {
        TargetingContext {
            weapons,
            row_formation: true,
            nearest_target_row: nearest,
        }
    }

    fn ranged_filter() -> TargetFilter {
        let mut filter = TargetFilter::default();
        filter.register(WEAPON_RANGE_PRIORITY, Box::new(WeaponRangeRule));
        filter
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let weapons = registry(vec![weapon(1, "<Weapon Min Range: 2>\n<Weapon Max Range: 4>")]);
        let equipment = Equipment { weapons: vec![1] };
        let filter = ranged_filter();
        let skill = skill("<Weapon Range: 9>");
        let user = view(0, Side::Party, 0, Some(&equipment));
        let ctx = ctx(&weapons, Some(0));

        for (row, expected) in [(1, false), (2, true), (3, true), (4, true), (5, false)] {
            let target = view(10 + row, Side::Troop, row, None);
            assert_eq!(
                filter.is_valid_target(&skill, &user, &target, &ctx),
                expected,
                "row {row}"
            );
        }
    }

    #[test]
    fn undeclared_range_defers_to_melee_rule() {
        // Sword declares nothing, so the range rule must defer and the
        // default rule admits only the nearest occupied row.
        let weapons = registry(vec![weapon(1, "A plain arming sword.")]);
        let equipment = Equipment { weapons: vec![1] };
        let filter = ranged_filter();
        let skill = skill("<Weapon Range: 9>");
        let user = view(0, Side::Party, 0, Some(&equipment));
        let ctx = ctx(&weapons, Some(1));

        let front = view(11, Side::Troop, 1, None);
        let back = view(12, Side::Troop, 3, None);
        assert!(filter.is_valid_target(&skill, &user, &front, &ctx));
        assert!(!filter.is_valid_target(&skill, &user, &back, &ctx));
    }

    #[test]
    fn first_weapon_with_metadata_decides() {
        // Slot order: plain sword first, then a bow. The sword has no
        // metadata, so the bow's bounds apply.
        let weapons = registry(vec![
            weapon(1, "A plain arming sword."),
            weapon(2, "<Weapon Range: 2>"),
        ]);
        let equipment = Equipment { weapons: vec![1, 2] };
        let filter = ranged_filter();
        let skill = skill("<Weapon Range: 9>");
        let user = view(0, Side::Party, 0, Some(&equipment));
        let ctx = ctx(&weapons, Some(3));

        let near = view(11, Side::Troop, 2, None);
        let far = view(12, Side::Troop, 3, None);
        assert!(filter.is_valid_target(&skill, &user, &near, &ctx));
        assert!(!filter.is_valid_target(&skill, &user, &far, &ctx));
    }

    #[test]
    fn unequipped_user_never_satisfies_range() {
        let weapons = registry(vec![]);
        let filter = ranged_filter();
        let skill = skill("<Weapon Range: 9>");
        let user = view(0, Side::Troop, 0, None);
        let ctx = ctx(&weapons, Some(0));

        let target = view(11, Side::Party, 0, None);
        assert!(!filter.is_valid_target(&skill, &user, &target, &ctx));
    }

    #[test]
    fn untagged_skill_skips_the_range_rule() {
        // min=1,max=1 would forbid row 0, but the skill carries no tag, so
        // only melee targeting applies.
        let weapons = registry(vec![weapon(1, "<Weapon Min Range: 1>\n<Weapon Max Range: 1>")]);
        let equipment = Equipment { weapons: vec![1] };
        let filter = ranged_filter();
        let skill = skill("");
        let user = view(0, Side::Party, 0, Some(&equipment));
        let ctx = ctx(&weapons, Some(0));

        let target = view(11, Side::Troop, 0, None);
        assert!(filter.is_valid_target(&skill, &user, &target, &ctx));
    }

    #[test]
    fn strict_row_one_weapon_differs_from_melee() {
        // A min=1,max=1 weapon hits row 1 only, even when row 0 is empty
        // and melee would reach whatever row is nearest.
        let weapons = registry(vec![weapon(1, "<Weapon Min Range: 1>\n<Weapon Max Range: 1>")]);
        let equipment = Equipment { weapons: vec![1] };
        let filter = ranged_filter();
        let skill = skill("<Weapon Range: 9>");
        let user = view(0, Side::Party, 0, Some(&equipment));
        let ctx = ctx(&weapons, Some(2));

        let row_two = view(11, Side::Troop, 2, None);
        assert!(!filter.is_valid_target(&skill, &user, &row_two, &ctx));
        // Melee (no chain registered) reaches the nearest row regardless
        let empty = TargetFilter::default();
        assert!(empty.is_valid_target(&skill, &user, &row_two, &ctx));
    }

    #[test]
    fn empty_filter_without_rows_admits_everyone() {
        let weapons = registry(vec![]);
        let filter = TargetFilter::default();
        let skill = skill("");
        let user = view(0, Side::Party, 0, None);
        let ctx = TargetingContext {
            weapons: &weapons,
            row_formation: false,
            nearest_target_row: None,
        };

        let target = view(11, Side::Troop, 7, None);
        assert!(filter.is_valid_target(&skill, &user, &target, &ctx));
    }

    #[test]
    fn rules_are_consulted_in_priority_order() {
        struct AdmitAll;
        impl SelectionRule for AdmitAll {
            fn name(&self) -> &'static str {
                "admit-all"
            }
            fn applies_to(&self, _skill: &SkillDef) -> bool {
                true
            }
            fn evaluate(
                &self,
                _user: &BattlerView,
                _target: &BattlerView,
                _ctx: &TargetingContext,
            ) -> Option<bool> {
                Some(true)
            }
        }

        let weapons = registry(vec![]);
        let skill = skill("<Weapon Range: 9>");
        let user = view(0, Side::Troop, 0, None);
        let target = view(11, Side::Party, 0, None);
        let ctx = ctx(&weapons, Some(0));

        // AdmitAll registered ahead of the range rule wins
        let mut filter = TargetFilter::default();
        filter.register(WEAPON_RANGE_PRIORITY, Box::new(WeaponRangeRule));
        filter.register(WEAPON_RANGE_PRIORITY - 1, Box::new(AdmitAll));
        assert!(filter.is_valid_target(&skill, &user, &target, &ctx));

        // Behind it, the range rule's veto comes first
        let mut filter = TargetFilter::default();
        filter.register(WEAPON_RANGE_PRIORITY, Box::new(WeaponRangeRule));
        filter.register(WEAPON_RANGE_PRIORITY + 1, Box::new(AdmitAll));
        assert!(!filter.is_valid_target(&skill, &user, &target, &ctx));
    }
}
