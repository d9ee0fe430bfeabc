#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that builds fixed fortification layouts tier by tier.
//!
//! Every placement is attempted whether or not it looks affordable; the board
//! declines what it cannot pay for, so a poor turn simply stops taking effect
//! part-way through a tier. Upgrade sub-passes of [`UpgradeGate::Affordable`]
//! tiers re-check the structure balance first and are skipped outright when
//! not even the cheapest upgrade can be paid.

pub mod layout;
pub mod sweep;

use corner_rush_core::{Board, BoardLocation, Intent, ResourceKind, UnitKind};

/// Single ordered action inside a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// One unit of the kind on every location, in order.
    Place(UnitKind, &'static [BoardLocation]),
    /// Upgrade of the friendly unit on every location, in order.
    Upgrade(&'static [BoardLocation]),
}

/// Balance check applied before a tier's upgrade steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeGate {
    /// Upgrades are always submitted.
    Always,
    /// Upgrades are skipped when the cheapest upgrade is unaffordable.
    Affordable,
}

/// Named group of steps built together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    /// Name used in diagnostics.
    pub name: &'static str,
    /// Check applied before upgrade steps.
    pub gate: UpgradeGate,
    /// Steps in build order.
    pub steps: &'static [Step],
}

/// Summary of a fortification pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FortificationReport {
    /// Units the board accepted.
    pub placed: u32,
    /// Upgrades the board accepted.
    pub upgraded: u32,
    /// Upgrade steps skipped by their tier's gate.
    pub skipped_upgrades: u32,
}

/// Builds a layout of tiers in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fortification {
    tiers: &'static [Tier],
}

impl Fortification {
    /// Creates a builder for the provided tiers.
    #[must_use]
    pub const fn new(tiers: &'static [Tier]) -> Self {
        Self { tiers }
    }

    /// Builder for the layered corner rush defense.
    #[must_use]
    pub const fn corner_rush() -> Self {
        Self::new(layout::CORNER_RUSH)
    }

    /// Tiers built by this builder.
    #[must_use]
    pub const fn tiers(&self) -> &'static [Tier] {
        self.tiers
    }

    /// Submits every tier to the board in order.
    pub fn handle<B: Board + ?Sized>(&self, board: &mut B) -> FortificationReport {
        let mut report = FortificationReport::default();
        for tier in self.tiers {
            build_tier(board, tier, &mut report);
        }
        tracing::debug!(
            placed = report.placed,
            upgraded = report.upgraded,
            skipped = report.skipped_upgrades,
            "fortification pass finished"
        );
        report
    }
}

fn build_tier<B: Board + ?Sized>(board: &mut B, tier: &Tier, report: &mut FortificationReport) {
    for step in tier.steps {
        match *step {
            Step::Place(kind, locations) => {
                report.placed += board.apply(&Intent::place(kind, locations));
            }
            Step::Upgrade(locations) => {
                if tier.gate == UpgradeGate::Affordable && !can_afford_any_upgrade(board) {
                    tracing::debug!(tier = tier.name, "skipping upgrades, balance too low");
                    report.skipped_upgrades += 1;
                    continue;
                }
                report.upgraded += board.apply(&Intent::upgrade(locations));
            }
        }
    }
}

fn can_afford_any_upgrade<B: Board + ?Sized>(board: &B) -> bool {
    let cheapest = UnitKind::STATIONARY
        .into_iter()
        .filter_map(|kind| board.upgrade_cost(kind))
        .map(|cost| cost.structure)
        .reduce(f64::min);
    match cheapest {
        Some(price) => board.resource(ResourceKind::StructurePoints) >= price,
        None => false,
    }
}
