//! Shop overlay and the buy → place flow.
//!
//! Buying charges the catalog price up front and arms a single placement.
//! The placement then either commits or is abandoned; neither path refunds.

use starhold_core::enums::ShopItem;
use starhold_core::error::SimError;

use crate::economy::{CostTable, Ledger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementState {
    #[default]
    Idle,
    /// Paid for and waiting for a commit point.
    Pending { item: ShopItem, cost: u32 },
}

#[derive(Debug, Clone, Default)]
pub struct PurchaseFlow {
    state: PlacementState,
    shop_open: bool,
    costs: CostTable,
}

impl PurchaseFlow {
    pub fn new(costs: CostTable) -> Self {
        Self {
            costs,
            ..Default::default()
        }
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn pending_item(&self) -> Option<ShopItem> {
        match self.state {
            PlacementState::Pending { item, .. } => Some(item),
            PlacementState::Idle => None,
        }
    }

    pub fn shop_open(&self) -> bool {
        self.shop_open
    }

    pub fn toggle_shop(&mut self) {
        self.shop_open = !self.shop_open;
    }

    pub fn hide_shop(&mut self) {
        self.shop_open = false;
    }

    /// Debit `item`'s price and enter placement. Returns the amount charged.
    ///
    /// A placement already pending is replaced; its charge is kept.
    pub fn buy(&mut self, item: ShopItem, ledger: &mut Ledger) -> Result<u32, SimError> {
        let cost = self.costs.cost_of(item);
        ledger.debit(cost)?;
        self.state = PlacementState::Pending { item, cost };
        self.shop_open = false;
        Ok(cost)
    }

    /// Leave placement for a commit attempt. The flow is idle afterwards
    /// whether or not the commit succeeds.
    pub fn take_pending(&mut self) -> Option<ShopItem> {
        let item = self.pending_item();
        self.state = PlacementState::Idle;
        item
    }

    /// Abandon the pending placement. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.state != PlacementState::Idle;
        self.state = PlacementState::Idle;
        was_pending
    }

    /// Back to idle with the overlay hidden.
    pub fn reset(&mut self) {
        self.state = PlacementState::Idle;
        self.shop_open = false;
    }
}
