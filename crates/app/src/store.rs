//! Marketplace store: the single owner of all mutable marketplace state.
//!
//! Wallet balance, parcel ownership, transactions, notifications, and
//! missions are only ever mutated through the methods here, which keeps the
//! core invariants in one place: balance never goes negative, and a
//! parcel's `owned` flag flips false -> true at most once.

use rand::Rng;
use worldgen::Parcel;

/// Starting wallet balance in DOGG.
pub const STARTING_BALANCE: u32 = 5000;
/// Simulated settlement latency for a purchase, seconds.
pub const PURCHASE_DELAY_SECS: f32 = 0.5;
/// Notifications auto-dismiss after this many seconds.
pub const NOTIFICATION_SECS: f32 = 6.0;
/// At most this many notifications are retained.
pub const MAX_NOTIFICATIONS: usize = 50;

/// The user's mock wallet.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub address: String,
    pub balance: u32,
    /// Ids of parcels bought this session, in purchase order.
    pub lands: Vec<String>,
}

impl Wallet {
    fn new() -> Self {
        let mut rng = rand::thread_rng();
        const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let tag: String = (0..11)
            .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
            .collect();
        Self {
            address: format!("DOGG{}", tag),
            balance: STARTING_BALANCE,
            lands: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    BuyLand,
    Earn,
}

/// One settled ledger entry. Newest first in the store.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Monotonic sequence number (stands in for a timestamp).
    pub seq: u64,
    pub kind: TxKind,
    /// Signed amount in DOGG (negative = spent).
    pub amount: i64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

/// Fire-and-forget toast with an auto-dismiss timer. Newest first.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub time_remaining: f32,
}

/// A reward mission. Claiming is idempotent.
#[derive(Debug, Clone)]
pub struct Mission {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub reward: u32,
    pub claimed: bool,
}

fn builtin_missions() -> Vec<Mission> {
    let m = |id, title: &str, description: &str, reward| Mission {
        id,
        title: title.to_string(),
        description: description.to_string(),
        reward,
        claimed: false,
    };
    vec![
        m(1, "Daily Login", "Log in daily to earn rewards", 50),
        m(2, "Buy First Land", "Purchase your first land plot", 100),
        m(3, "Invite 5 Friends", "Share your referral link", 250),
    ]
}

/// A purchase that has been accepted but not yet settled.
#[derive(Debug, Clone, Copy)]
struct PendingPurchase {
    parcel_index: usize,
    resolve_at: f32,
}

/// Portfolio totals derived from the arena + wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketStats {
    pub total_parcels: usize,
    pub owned_parcels: usize,
    /// Sum of purchase prices of the wallet's parcels.
    pub portfolio_value: u64,
}

/// Single source of truth for marketplace state.
pub struct MarketStore {
    /// Parcel arena; vector index is the stable parcel handle.
    pub parcels: Vec<Parcel>,
    pub wallet: Wallet,
    pub transactions: Vec<Transaction>,
    pub notifications: Vec<Notification>,
    pub missions: Vec<Mission>,
    pending: Vec<PendingPurchase>,
    next_seq: u64,
}

impl MarketStore {
    /// Take ownership of the canonical parcel list.
    pub fn new(parcels: Vec<Parcel>) -> Self {
        Self {
            parcels,
            wallet: Wallet::new(),
            transactions: Vec::new(),
            notifications: Vec::new(),
            missions: builtin_missions(),
            pending: Vec::new(),
            next_seq: 1,
        }
    }

    /// Attempt to buy a parcel. Returns true when the purchase was accepted
    /// (it settles after [`PURCHASE_DELAY_SECS`]); false when rejected.
    ///
    /// Rejection leaves every piece of state untouched except for the
    /// insufficient-balance notification.
    pub fn purchase(&mut self, parcel_index: usize, now: f32) -> bool {
        let Some(parcel) = self.parcels.get(parcel_index) else {
            return false;
        };
        if parcel.owned || self.is_purchase_pending(parcel_index) {
            // Double-submit guard: ownership is monotonic.
            return false;
        }
        if self.wallet.balance < parcel.price {
            self.notify(
                NotificationKind::Error,
                "Purchase Failed",
                "Insufficient balance to purchase this land",
            );
            return false;
        }

        log::info!("Purchase accepted: {} for {} DOGG", parcel.id, parcel.price);
        self.pending.push(PendingPurchase {
            parcel_index,
            resolve_at: now + PURCHASE_DELAY_SECS,
        });
        true
    }

    /// Whether a purchase for this parcel is still settling.
    pub fn is_purchase_pending(&self, parcel_index: usize) -> bool {
        self.pending.iter().any(|p| p.parcel_index == parcel_index)
    }

    /// Advance store time: settle due purchases, expire notifications.
    pub fn update(&mut self, now: f32, dt: f32) {
        let due: Vec<usize> = self
            .pending
            .iter()
            .filter(|p| now >= p.resolve_at)
            .map(|p| p.parcel_index)
            .collect();
        self.pending.retain(|p| now < p.resolve_at);
        for parcel_index in due {
            self.settle_purchase(parcel_index);
        }

        for n in &mut self.notifications {
            n.time_remaining -= dt;
        }
        self.notifications.retain(|n| n.time_remaining > 0.0);
    }

    /// Complete a due purchase: deduct, flip ownership, record, notify.
    fn settle_purchase(&mut self, parcel_index: usize) {
        let Some(parcel) = self.parcels.get_mut(parcel_index) else {
            return;
        };
        if parcel.owned || self.wallet.balance < parcel.price {
            // Balance may have been spent by a settlement earlier this
            // frame; reject late rather than go negative.
            let id = parcel.id.clone();
            self.notify(
                NotificationKind::Error,
                "Purchase Failed",
                &format!("Could not complete purchase of {}", id),
            );
            return;
        }

        parcel.owned = true;
        let id = parcel.id.clone();
        let price = parcel.price;
        self.wallet.balance -= price;
        self.wallet.lands.push(id.clone());
        self.push_transaction(
            TxKind::BuyLand,
            -(price as i64),
            format!("Purchased land {}", id),
        );
        self.notify(
            NotificationKind::Success,
            "Land Purchased",
            &format!("Successfully purchased {} for {} DOGG!", id, price),
        );
    }

    /// Claim a mission reward. Idempotent: a second claim returns false and
    /// moves no funds. "Buy First Land" requires an owned parcel.
    pub fn claim_mission(&mut self, mission_id: u32) -> bool {
        let owns_land = !self.wallet.lands.is_empty();
        let Some(mission) = self.missions.iter_mut().find(|m| m.id == mission_id) else {
            return false;
        };
        if mission.claimed {
            return false;
        }
        if mission_id == 2 && !owns_land {
            self.notify(
                NotificationKind::Info,
                "Mission Locked",
                "Buy a land plot first to claim this reward",
            );
            return false;
        }

        mission.claimed = true;
        let reward = mission.reward;
        let title = mission.title.clone();
        self.wallet.balance += reward;
        self.push_transaction(TxKind::Earn, reward as i64, format!("Mission: {}", title));
        self.notify(
            NotificationKind::Success,
            "Mission Complete",
            &format!("{} - earned {} DOGG", title, reward),
        );
        true
    }

    /// Post a toast. Oldest entries beyond the cap are dropped.
    pub fn notify(&mut self, kind: NotificationKind, title: &str, message: &str) {
        self.notifications.insert(
            0,
            Notification {
                kind,
                title: title.to_string(),
                message: message.to_string(),
                time_remaining: NOTIFICATION_SECS,
            },
        );
        self.notifications.truncate(MAX_NOTIFICATIONS);
    }

    fn push_transaction(&mut self, kind: TxKind, amount: i64, description: String) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.transactions.insert(0, Transaction { seq, kind, amount, description });
    }

    /// Set the hovered flag on at most one parcel.
    pub fn set_hovered(&mut self, index: Option<usize>) {
        for p in &mut self.parcels {
            p.hovered = false;
        }
        if let Some(i) = index {
            if let Some(p) = self.parcels.get_mut(i) {
                p.hovered = true;
            }
        }
    }

    pub fn stats(&self) -> MarketStats {
        let portfolio_value = self
            .wallet
            .lands
            .iter()
            .filter_map(|id| self.parcels.iter().find(|p| &p.id == id))
            .map(|p| p.price as u64)
            .sum();
        MarketStats {
            total_parcels: self.parcels.len(),
            owned_parcels: self.wallet.lands.len(),
            portfolio_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Rgb;
    use glam::Vec3;
    use worldgen::{Parcel, ParcelKind};

    fn test_parcel(id: &str, price: u32, owned: bool) -> Parcel {
        Parcel {
            id: id.to_string(),
            grid_x: 0,
            grid_y: 0,
            island: "Doggverse".to_string(),
            price,
            kind: ParcelKind::Standard,
            owned,
            base_color: Rgb::from_hex(0x3b82f6),
            base_emissive: Rgb::from_hex(0x111111),
            position: Vec3::new(0.0, 12.5, 0.0),
            hovered: false,
        }
    }

    fn store_with(parcels: Vec<Parcel>, balance: u32) -> MarketStore {
        let mut store = MarketStore::new(parcels);
        store.wallet.balance = balance;
        store
    }

    /// Balance 400, price 500: rejected, nothing mutated, error
    /// notification posted.
    #[test]
    fn insufficient_balance_rejects_without_mutation() {
        let mut store = store_with(vec![test_parcel("DOG-A1", 500, false)], 400);
        let accepted = store.purchase(0, 0.0);
        assert!(!accepted);
        assert_eq!(store.wallet.balance, 400);
        assert!(!store.parcels[0].owned);
        assert!(store.transactions.is_empty());
        assert_eq!(store.notifications.len(), 1);
        assert_eq!(store.notifications[0].kind, NotificationKind::Error);
    }

    /// Balance 1000, price 500: settles after the delay with balance,
    /// ownership, ledger, and notification all updated.
    #[test]
    fn successful_purchase_settles_after_delay() {
        let mut store = store_with(vec![test_parcel("DOG-A1", 500, false)], 1000);
        assert!(store.purchase(0, 0.0));

        // Not yet settled: still unowned, balance intact.
        store.update(0.3, 0.3);
        assert!(!store.parcels[0].owned);
        assert_eq!(store.wallet.balance, 1000);
        assert!(store.is_purchase_pending(0));

        store.update(0.6, 0.3);
        assert!(store.parcels[0].owned);
        assert_eq!(store.wallet.balance, 500);
        assert_eq!(store.wallet.lands, vec!["DOG-A1".to_string()]);
        assert_eq!(store.transactions.len(), 1);
        assert_eq!(store.transactions[0].kind, TxKind::BuyLand);
        assert_eq!(store.transactions[0].amount, -500);
        assert_eq!(store.notifications[0].kind, NotificationKind::Success);
        assert!(!store.is_purchase_pending(0));
    }

    /// Ownership is monotonic. Buying an owned parcel returns false and
    /// mutates neither balance nor the ledger.
    #[test]
    fn second_purchase_of_owned_parcel_is_a_no_op() {
        let mut store = store_with(vec![test_parcel("DOG-A1", 500, false)], 1000);
        assert!(store.purchase(0, 0.0));
        store.update(1.0, 1.0);
        assert!(store.parcels[0].owned);

        let balance = store.wallet.balance;
        let tx_count = store.transactions.len();
        assert!(!store.purchase(0, 2.0));
        store.update(3.0, 1.0);
        assert_eq!(store.wallet.balance, balance);
        assert_eq!(store.transactions.len(), tx_count);
        assert_eq!(store.wallet.lands.len(), 1);
    }

    /// Double-submit guard: a second purchase while one is in flight is
    /// rejected and only one settlement happens.
    #[test]
    fn rapid_resubmit_while_pending_is_rejected() {
        let mut store = store_with(vec![test_parcel("DOG-A1", 500, false)], 1000);
        assert!(store.purchase(0, 0.0));
        assert!(!store.purchase(0, 0.1));
        assert!(!store.purchase(0, 0.2));
        store.update(1.0, 1.0);
        assert_eq!(store.wallet.balance, 500);
        assert_eq!(store.wallet.lands.len(), 1);
        assert_eq!(store.transactions.len(), 1);
    }

    /// Two pending purchases whose combined price exceeds the balance:
    /// the first settles, the second fails late without going negative.
    #[test]
    fn late_settlement_cannot_overdraw() {
        let parcels = vec![
            test_parcel("DOG-A1", 600, false),
            test_parcel("DOG-A2", 600, false),
        ];
        let mut store = store_with(parcels, 1000);
        assert!(store.purchase(0, 0.0));
        assert!(store.purchase(1, 0.0));
        store.update(1.0, 1.0);

        assert_eq!(store.wallet.balance, 400);
        let owned: Vec<bool> = store.parcels.iter().map(|p| p.owned).collect();
        assert_eq!(owned.iter().filter(|o| **o).count(), 1);
        assert_eq!(store.transactions.len(), 1);
    }

    #[test]
    fn mission_claim_is_idempotent() {
        let mut store = store_with(vec![test_parcel("DOG-A1", 500, false)], 1000);
        assert!(store.claim_mission(1));
        assert_eq!(store.wallet.balance, 1050);
        assert!(!store.claim_mission(1));
        assert_eq!(store.wallet.balance, 1050);
        assert_eq!(store.transactions.len(), 1);
        assert_eq!(store.transactions[0].kind, TxKind::Earn);
    }

    #[test]
    fn buy_first_land_mission_requires_owned_parcel() {
        let mut store = store_with(vec![test_parcel("DOG-A1", 500, false)], 1000);
        assert!(!store.claim_mission(2));
        assert!(store.purchase(0, 0.0));
        store.update(1.0, 1.0);
        assert!(store.claim_mission(2));
        assert_eq!(store.wallet.balance, 500 + 100);
    }

    #[test]
    fn notifications_expire_and_cap() {
        let mut store = store_with(vec![], 0);
        for i in 0..60 {
            store.notify(NotificationKind::Info, "N", &format!("{}", i));
        }
        assert_eq!(store.notifications.len(), MAX_NOTIFICATIONS);
        // Newest first: the last posted message leads.
        assert_eq!(store.notifications[0].message, "59");

        store.update(0.0, NOTIFICATION_SECS + 0.1);
        assert!(store.notifications.is_empty());
    }

    #[test]
    fn stats_track_portfolio_value() {
        let parcels = vec![
            test_parcel("DOG-A1", 700, false),
            test_parcel("DOG-A2", 800, false),
            test_parcel("DOG-A3", 900, true), // pre-sold, not ours
        ];
        let mut store = store_with(parcels, 5000);
        assert!(store.purchase(0, 0.0));
        assert!(store.purchase(1, 0.0));
        store.update(1.0, 1.0);
        let stats = store.stats();
        assert_eq!(stats.total_parcels, 3);
        assert_eq!(stats.owned_parcels, 2);
        assert_eq!(stats.portfolio_value, 1500);
    }

    #[test]
    fn wallet_address_carries_currency_prefix() {
        let store = MarketStore::new(vec![]);
        assert!(store.wallet.address.starts_with("DOGG"));
        assert_eq!(store.wallet.address.len(), 15);
    }
}
