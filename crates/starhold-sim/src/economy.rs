//! Gem balance and the shop price list.

use starhold_core::enums::ShopItem;
use starhold_core::error::SimError;

/// The session's gem balance. Never negative.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    gems: u32,
}

impl Ledger {
    pub fn new(starting_gems: u32) -> Self {
        Self {
            gems: starting_gems,
        }
    }

    pub fn balance(&self) -> u32 {
        self.gems
    }

    pub fn credit(&mut self, amount: u32) {
        self.gems = self.gems.saturating_add(amount);
    }

    /// Withdraw `amount`, or leave the balance untouched if it is too small.
    pub fn debit(&mut self, amount: u32) -> Result<(), SimError> {
        if self.gems < amount {
            return Err(SimError::InsufficientFunds {
                cost: amount,
                balance: self.gems,
            });
        }
        self.gems -= amount;
        Ok(())
    }

    pub fn reset(&mut self, starting_gems: u32) {
        self.gems = starting_gems;
    }
}

/// Static catalog prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostTable {
    pub wall: u32,
    pub repair: u32,
    pub turret: u32,
    pub ship_upgrade: u32,
    pub new_ship: u32,
}

impl Default for CostTable {
    fn default() -> Self {
        Self {
            wall: 10,
            repair: 5,
            turret: 50,
            ship_upgrade: 40,
            new_ship: 100,
        }
    }
}

impl CostTable {
    pub fn cost_of(&self, item: ShopItem) -> u32 {
        match item {
            ShopItem::Wall => self.wall,
            ShopItem::Repair => self.repair,
            ShopItem::Turret => self.turret,
            ShopItem::ShipUpgrade => self.ship_upgrade,
            ShopItem::NewShip => self.new_ship,
        }
    }
}
