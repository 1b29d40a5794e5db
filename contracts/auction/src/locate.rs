use soroban_sdk::{Bytes, BytesN, Env, TryFromVal, Vec};

use crate::types::{AssetId, AuctionDatum, LedgerOutput, LiveAuction};
use crate::Error;

/// Find the unique live escrow record for `(currency, token)` in a snapshot
/// of ledger outputs.
///
/// An output is a candidate when it holds exactly one unit of the asset.
/// More than one candidate means the one-record-per-auction invariant is
/// broken somewhere upstream, and that is surfaced as a hard error rather
/// than resolved by picking a winner.
pub fn find_live_auction(
    env: &Env,
    outputs: &Vec<LedgerOutput>,
    currency: &BytesN<32>,
    token: &Bytes,
) -> Result<LiveAuction, Error> {
    let asset = AssetId {
        currency: currency.clone(),
        name: token.clone(),
    };

    let mut found: Option<LedgerOutput> = None;
    for out in outputs.iter() {
        if out.value.quantity_of(&asset) == 1 {
            if found.is_some() {
                return Err(Error::AmbiguousLiveAuction);
            }
            found = Some(out);
        }
    }
    let out = found.ok_or(Error::AuctionNotFound)?;

    let val = out.datum.ok_or(Error::DatumNotFound)?;
    let datum = AuctionDatum::try_from_val(env, &val).map_err(|_| Error::DecodeError)?;
    if datum.details.currency != *currency || datum.details.token != *token {
        return Err(Error::AuctionTokenMismatch);
    }

    Ok(LiveAuction {
        reference: out.reference,
        datum,
    })
}
