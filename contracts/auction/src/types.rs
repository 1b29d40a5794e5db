use soroban_sdk::{contracttype, Address, Bytes, BytesN, Env, Map, Val, Vec};

/// Immutable auction parameters, fixed when the auction is started.
///
/// Successive escrow states must carry a structurally identical copy of
/// this record; any difference between the consumed and the recreated
/// state is tampering and the transition is rejected.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionDetails {
    pub seller: Address,
    pub currency: BytesN<32>,
    pub token: Bytes,
    pub start_bid: i128,
    pub bid_pct_increase: u32,
    pub start_time: u64,
    pub bid_time_increment: u64,
}

impl AuctionDetails {
    /// The auctioned asset, always held in quantity 1 by the escrow record.
    pub fn asset(&self) -> AssetId {
        AssetId {
            currency: self.currency.clone(),
            name: self.token.clone(),
        }
    }
}

/// The current highest bid, in the smallest settlement unit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidDetails {
    pub bidder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Who triggered closing. Only the seller may legally close.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CloseDetails {
    pub closer: Address,
}

/// State attached to the escrow record. Consumed and recreated wholesale
/// by every accepted bid; consumed without replacement by close.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionDatum {
    pub details: AuctionDetails,
    pub highest_bid: BidDetails,
}

impl AuctionDatum {
    /// Successor state for an accepted bid: identical details, new highest
    /// bid. This is the datum a bid transaction must attach to its
    /// continuing output.
    pub fn advanced(&self, bid: &BidDetails) -> AuctionDatum {
        AuctionDatum {
            details: self.details.clone(),
            highest_bid: bid.clone(),
        }
    }
}

/// The operation a transaction claims to perform against the escrow record.
///
/// `Auction` is never accepted by the validator; the constructor is kept so
/// the wire encoding stays compatible with datums and redeemers produced by
/// older coordinators.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuctionAction {
    Bid(BidDetails),
    Close(CloseDetails),
    Auction(AuctionDetails),
}

/// A (currency, token name) pair identifying the auctioned asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetId {
    pub currency: BytesN<32>,
    pub name: Bytes,
}

/// Value carried by a single output: an amount of the settlement currency
/// plus per-asset quantities. Compared structurally.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputValue {
    pub settlement: i128,
    pub assets: Map<AssetId, i64>,
}

impl OutputValue {
    /// Settlement currency only, no assets. The shape of a refund or a
    /// seller payout.
    pub fn settlement_only(env: &Env, amount: i128) -> OutputValue {
        OutputValue {
            settlement: amount,
            assets: Map::new(env),
        }
    }

    /// Exactly one unit of `asset`, no settlement. The shape of the asset
    /// payout to the winning bidder.
    pub fn asset_only(env: &Env, asset: &AssetId) -> OutputValue {
        let mut assets = Map::new(env);
        assets.set(asset.clone(), 1);
        OutputValue {
            settlement: 0,
            assets,
        }
    }

    /// One unit of `asset` plus `highest_bid` in settlement currency. The
    /// value the escrow record holds while the auction is open.
    pub fn escrow(env: &Env, asset: &AssetId, highest_bid: i128) -> OutputValue {
        let mut assets = Map::new(env);
        assets.set(asset.clone(), 1);
        OutputValue {
            settlement: highest_bid,
            assets,
        }
    }

    pub fn quantity_of(&self, asset: &AssetId) -> i64 {
        self.assets.get(asset.clone()).unwrap_or(0)
    }
}

/// One output created by the candidate transaction.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TxOut {
    pub recipient: Address,
    pub value: OutputValue,
    pub datum_hash: Option<BytesN<32>>,
}

/// Everything the host exposes about a candidate transaction: which address
/// the escrow script lives at, the outputs the transaction creates, and the
/// datum witness map keyed by hash. The validator reads nothing else.
///
/// Witness entries are attached as untyped values; decoding them to an
/// [`AuctionDatum`] is a fallible downcast, never a host abort.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TxContext {
    pub escrow: Address,
    pub outputs: Vec<TxOut>,
    pub datums: Map<BytesN<32>, Val>,
}

/// Stable reference to a ledger output.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputRef {
    pub tx_id: BytesN<32>,
    pub index: u32,
}

/// One entry of a ledger snapshot, as handed to the locator. The attached
/// datum, when present, is untyped like a witness entry in [`TxContext`].
#[contracttype]
#[derive(Clone, Debug)]
pub struct LedgerOutput {
    pub reference: OutputRef,
    pub value: OutputValue,
    pub datum: Option<Val>,
}

/// The unique live escrow record for an asset, as found by the locator.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiveAuction {
    pub reference: OutputRef,
    pub datum: AuctionDatum,
}
