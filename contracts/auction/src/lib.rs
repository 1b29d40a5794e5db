#![no_std]

mod locate;
pub mod types;
mod validate;

use soroban_sdk::{contract, contracterror, contractimpl, Bytes, BytesN, Env, Vec};
use types::{AuctionAction, AuctionDatum, LedgerOutput, LiveAuction, TxContext};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    ExpectedExactlyOneContinuingOutput = 1,
    DatumNotFound = 2,
    DecodeError = 3,
    WrongOutputDatum = 4,
    WrongOutputValue = 5,
    BidTooLow = 6,
    ExpectedExactlyOneRefundOutput = 7,
    WrongRefundAmount = 8,
    NotSeller = 9,
    AssetPayoutMissing = 10,
    SettlementPayoutMissing = 11,
    AuctionNotFound = 12,
    AuctionTokenMismatch = 13,
    AmbiguousLiveAuction = 14,
    UnsupportedAction = 15,
}

#[contract]
pub struct AuctionValidatorContract;

#[contractimpl]
impl AuctionValidatorContract {
    /// Decide whether a candidate transaction is an admissible transition
    /// of the auction state it consumes. Pure: the answer depends only on
    /// the arguments, and the first failing check is the reported reason.
    pub fn validate(
        env: Env,
        datum: AuctionDatum,
        action: AuctionAction,
        tx: TxContext,
    ) -> Result<(), Error> {
        validate::validate(&env, &datum, &action, &tx)
    }

    /// Smallest amount the next bid must strictly exceed.
    pub fn min_acceptable_bid(datum: AuctionDatum) -> i128 {
        validate::min_acceptable_bid(&datum)
    }

    /// Timestamp after which the current highest bid can no longer be
    /// outbid. Advisory for coordinators; see the bid checks for what is
    /// actually enforced.
    pub fn deadline(datum: AuctionDatum) -> u64 {
        validate::deadline(&datum)
    }

    /// Find the unique live escrow record for `(currency, token)` in a
    /// snapshot of ledger outputs.
    pub fn find_live_auction(
        env: Env,
        outputs: Vec<LedgerOutput>,
        currency: BytesN<32>,
        token: Bytes,
    ) -> Result<LiveAuction, Error> {
        locate::find_live_auction(&env, &outputs, &currency, &token)
    }
}

#[cfg(test)]
mod test;
