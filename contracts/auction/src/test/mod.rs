
use crate::types::{
    AuctionDatum, AuctionDetails, BidDetails, LedgerOutput, OutputRef, OutputValue, TxContext,
    TxOut,
};
use crate::{AuctionValidatorContract, AuctionValidatorContractClient};
use soroban_sdk::{
    testutils::Address as _, xdr::ToXdr, Address, Bytes, BytesN, Env, IntoVal, Map, Val, Vec,
};

pub struct Fixture {
    pub env: Env,
    pub client: AuctionValidatorContractClient<'static>,
    pub escrow: Address,
    pub seller: Address,
    pub first_bidder: Address,
    pub challenger: Address,
}

pub fn setup_test() -> Fixture {
    let env = Env::default();
    let contract_id = env.register(AuctionValidatorContract, ());
    let client = AuctionValidatorContractClient::new(&env, &contract_id);

    let escrow = Address::generate(&env);
    let seller = Address::generate(&env);
    let first_bidder = Address::generate(&env);
    let challenger = Address::generate(&env);

    Fixture {
        env,
        client,
        escrow,
        seller,
        first_bidder,
        challenger,
    }
}

pub fn currency(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[7u8; 32])
}

pub fn token(env: &Env) -> Bytes {
    Bytes::from_slice(env, b"gavel")
}

pub fn details(env: &Env, seller: &Address) -> AuctionDetails {
    AuctionDetails {
        seller: seller.clone(),
        currency: currency(env),
        token: token(env),
        start_bid: 100,
        bid_pct_increase: 5,
        start_time: 1_000,
        bid_time_increment: 600,
    }
}

pub fn datum(env: &Env, seller: &Address, bidder: &Address, amount: i128, ts: u64) -> AuctionDatum {
    AuctionDatum {
        details: details(env, seller),
        highest_bid: BidDetails {
            bidder: bidder.clone(),
            amount,
            timestamp: ts,
        },
    }
}

pub fn bid(bidder: &Address, amount: i128, ts: u64) -> BidDetails {
    BidDetails {
        bidder: bidder.clone(),
        amount,
        timestamp: ts,
    }
}

/// Attach a datum the way a coordinator would: the witness value itself,
/// keyed by the hash of its canonical encoding.
pub fn attached_datum(env: &Env, datum: &AuctionDatum) -> (BytesN<32>, Val) {
    let bytes = datum.clone().to_xdr(env);
    let hash = env.crypto().sha256(&bytes).to_bytes();
    (hash, datum.into_val(env))
}

/// A well-formed bid transaction: one continuing output at the escrow
/// address carrying the successor datum and escrow value, plus one refund
/// output to `refund_to`.
pub fn bid_tx(
    env: &Env,
    escrow: &Address,
    next: &AuctionDatum,
    refund_to: &Address,
    refund_amount: i128,
) -> TxContext {
    let asset = next.details.asset();
    let (hash, witness) = attached_datum(env, next);

    let mut datums = Map::new(env);
    datums.set(hash.clone(), witness);

    let mut outputs = Vec::new(env);
    outputs.push_back(TxOut {
        recipient: escrow.clone(),
        value: OutputValue::escrow(env, &asset, next.highest_bid.amount),
        datum_hash: Some(hash),
    });
    outputs.push_back(TxOut {
        recipient: refund_to.clone(),
        value: OutputValue::settlement_only(env, refund_amount),
        datum_hash: None,
    });

    TxContext {
        escrow: escrow.clone(),
        outputs,
        datums,
    }
}

/// A well-formed close transaction: the asset to the winner, the proceeds
/// to the seller, nothing recreated at the escrow address.
pub fn close_tx(
    env: &Env,
    escrow: &Address,
    closing: &AuctionDatum,
    winner: &Address,
    seller: &Address,
) -> TxContext {
    let asset = closing.details.asset();

    let mut outputs = Vec::new(env);
    outputs.push_back(TxOut {
        recipient: winner.clone(),
        value: OutputValue::asset_only(env, &asset),
        datum_hash: None,
    });
    outputs.push_back(TxOut {
        recipient: seller.clone(),
        value: OutputValue::settlement_only(env, closing.highest_bid.amount),
        datum_hash: None,
    });

    TxContext {
        escrow: escrow.clone(),
        outputs,
        datums: Map::new(env),
    }
}

pub fn output_ref(env: &Env, tx_byte: u8, index: u32) -> OutputRef {
    OutputRef {
        tx_id: BytesN::from_array(env, &[tx_byte; 32]),
        index,
    }
}

/// A snapshot entry holding the live escrow record for `datum`.
pub fn live_output(env: &Env, reference: OutputRef, datum: &AuctionDatum) -> LedgerOutput {
    let (_, witness) = attached_datum(env, datum);
    LedgerOutput {
        reference,
        value: OutputValue::escrow(env, &datum.details.asset(), datum.highest_bid.amount),
        datum: Some(witness),
    }
}
