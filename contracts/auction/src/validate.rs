use soroban_sdk::{Address, Env, TryFromVal};

use crate::types::{
    AuctionAction, AuctionDatum, BidDetails, CloseDetails, OutputValue, TxContext, TxOut,
};
use crate::Error;

/// Smallest amount the next bid must strictly exceed:
/// `floor(highest_bid * (100 + pct) / 100)`. Truncating division; a bid
/// equal to this value is rejected. Saturates at the type bound, where no
/// bid can be sufficient anyway.
pub fn min_acceptable_bid(datum: &AuctionDatum) -> i128 {
    datum
        .highest_bid
        .amount
        .checked_mul(100 + datum.details.bid_pct_increase as i128)
        .map(|raised| raised / 100)
        .unwrap_or(i128::MAX)
}

/// Sliding-window deadline: each accepted bid restarts the clock from its
/// own timestamp. Saturates at the end of time.
pub fn deadline(datum: &AuctionDatum) -> u64 {
    datum
        .highest_bid
        .timestamp
        .saturating_add(datum.details.bid_time_increment)
}

/// Decide whether `action` is an admissible transition of `datum` given the
/// shape of the candidate transaction. Checks run left to right and the
/// first failure is the reported rejection.
pub fn validate(
    env: &Env,
    datum: &AuctionDatum,
    action: &AuctionAction,
    tx: &TxContext,
) -> Result<(), Error> {
    match action {
        AuctionAction::Bid(bid) => validate_bid(env, datum, bid, tx),
        AuctionAction::Close(close) => validate_close(env, datum, close, tx),
        // Vestigial constructor, kept for wire compatibility only.
        AuctionAction::Auction(_) => Err(Error::UnsupportedAction),
    }
}

fn validate_bid(
    env: &Env,
    datum: &AuctionDatum,
    bid: &BidDetails,
    tx: &TxContext,
) -> Result<(), Error> {
    let own = continuing_output(tx)?;
    let next = resolve_datum(env, tx, &own)?;

    // The successor state must differ from the consumed one in the highest
    // bid and nothing else.
    if next.details != datum.details || next.highest_bid != *bid {
        return Err(Error::WrongOutputDatum);
    }

    let asset = datum.details.asset();
    if own.value != OutputValue::escrow(env, &asset, bid.amount) {
        return Err(Error::WrongOutputValue);
    }

    if bid.amount <= min_acceptable_bid(datum) {
        return Err(Error::BidTooLow);
    }

    let previous = &datum.highest_bid;
    let refund = refund_output(tx, &previous.bidder)?;
    if refund.value != OutputValue::settlement_only(env, previous.amount) {
        return Err(Error::WrongRefundAmount);
    }

    Ok(())
}

fn validate_close(
    env: &Env,
    datum: &AuctionDatum,
    close: &CloseDetails,
    tx: &TxContext,
) -> Result<(), Error> {
    if close.closer != datum.details.seller {
        return Err(Error::NotSeller);
    }

    let asset = datum.details.asset();
    let winner = &datum.highest_bid.bidder;
    if !pays(tx, winner, &OutputValue::asset_only(env, &asset)) {
        return Err(Error::AssetPayoutMissing);
    }

    let proceeds = OutputValue::settlement_only(env, datum.highest_bid.amount);
    if !pays(tx, &datum.details.seller, &proceeds) {
        return Err(Error::SettlementPayoutMissing);
    }

    Ok(())
}

/// The single output recreated at the escrow address. Zero or several is a
/// malformed transition.
fn continuing_output(tx: &TxContext) -> Result<TxOut, Error> {
    let mut own: Option<TxOut> = None;
    for out in tx.outputs.iter() {
        if out.recipient == tx.escrow {
            if own.is_some() {
                return Err(Error::ExpectedExactlyOneContinuingOutput);
            }
            own = Some(out);
        }
    }
    own.ok_or(Error::ExpectedExactlyOneContinuingOutput)
}

/// The single output refunding the outbid party.
fn refund_output(tx: &TxContext, previous_bidder: &Address) -> Result<TxOut, Error> {
    let mut refund: Option<TxOut> = None;
    for out in tx.outputs.iter() {
        if out.recipient == *previous_bidder {
            if refund.is_some() {
                return Err(Error::ExpectedExactlyOneRefundOutput);
            }
            refund = Some(out);
        }
    }
    refund.ok_or(Error::ExpectedExactlyOneRefundOutput)
}

fn resolve_datum(env: &Env, tx: &TxContext, out: &TxOut) -> Result<AuctionDatum, Error> {
    let hash = out.datum_hash.clone().ok_or(Error::DatumNotFound)?;
    let val = tx.datums.get(hash).ok_or(Error::DatumNotFound)?;
    AuctionDatum::try_from_val(env, &val).map_err(|_| Error::DecodeError)
}

fn pays(tx: &TxContext, to: &Address, value: &OutputValue) -> bool {
    tx.outputs
        .iter()
        .any(|out| out.recipient == *to && out.value == *value)
}
