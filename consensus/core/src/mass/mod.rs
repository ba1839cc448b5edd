use crate::{
    subnets::SUBNETWORK_ID_SIZE,
    tx::{Transaction, TransactionInput, TransactionOutput},
};
use kastx_hashes::HASH_SIZE;
use serde::{Deserialize, Serialize};

/// Fixed bytes every transaction pays for regardless of its inputs and outputs.
pub const BASE_OVERHEAD: u64 = 10;
/// Estimated bytes of one signed pay-to-pubkey input.
pub const INPUT_SIZE: u64 = 151;
/// Script bytes of one standard output.
pub const SCRIPT_SIZE_PER_OUTPUT: u64 = 34;
/// Bytes of the script public key version preceding every output script.
pub const SCRIPT_VERSION_SIZE: u64 = 2;
/// Floor of every fee, in sompi.
pub const MIN_FEE: u64 = 1000;

pub const MASS_PER_TX_BYTE: u64 = 1;
pub const MASS_PER_SCRIPT_PUB_KEY_BYTE: u64 = 10;
pub const MASS_PER_SIG_OP: u64 = 1000;

/// Mass is divided by this to get the byte-equivalent size a fee rate applies to.
pub const MASS_TO_SIZE_DIVISOR: u64 = 10;

/// The maximum mass a transaction may have to be accepted by the mempool.
pub const MAXIMUM_STANDARD_TRANSACTION_MASS: u64 = 100_000;

// transaction_estimated_serialized_size is the estimated size of a transaction in some
// serialization. This has to be deterministic, but not necessarily accurate, since
// it's only used as the size component in the transaction and block mass limit
// calculation.
pub fn transaction_estimated_serialized_size(tx: &Transaction) -> u64 {
    let mut size: u64 = 0;
    size += 2; // Tx version (u16)
    size += 8; // Number of inputs (u64)
    let inputs_size: u64 = tx.inputs.iter().map(transaction_input_estimated_serialized_size).sum();
    size += inputs_size;

    size += 8; // number of outputs (u64)
    let outputs_size: u64 = tx.outputs.iter().map(transaction_output_estimated_serialized_size).sum();
    size += outputs_size;

    size += 8; // lock time (u64)
    size += SUBNETWORK_ID_SIZE as u64;
    size += 8; // gas (u64)
    size += HASH_SIZE as u64; // payload hash

    size += 8; // length of the payload (u64)
    size += tx.payload.len() as u64;
    size
}

fn transaction_input_estimated_serialized_size(input: &TransactionInput) -> u64 {
    let mut size = 0;
    size += outpoint_estimated_serialized_size();

    size += 8; // length of signature script (u64)
    size += input.signature_script.len() as u64;

    size += 8; // sequence (uint64)
    size
}

const fn outpoint_estimated_serialized_size() -> u64 {
    let mut size: u64 = 0;
    size += HASH_SIZE as u64; // Previous tx ID
    size += 4; // Index (u32)
    size
}

pub fn transaction_output_estimated_serialized_size(output: &TransactionOutput) -> u64 {
    let mut size: u64 = 0;
    size += 8; // value (u64)
    size += 2; // output.ScriptPublicKey.Version (u16)
    size += 8; // length of script public key (u64)
    size += output.script_public_key.script().len() as u64;
    size
}

/// The weighted components a mass total is made of.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassBreakdown {
    pub base_mass: u64,
    pub script_pub_key_mass: u64,
    pub sig_ops_mass: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassCalculationResult {
    pub mass: u64,
    pub tx_size: u64,
    pub script_pub_key_size: u64,
    pub sig_ops_count: u64,
    /// `ceil(mass / 10)`, the size a per-byte fee rate multiplies
    pub equivalent_size: u64,
    pub breakdown: MassBreakdown,
}

/// Mass estimation from input and output counts, for unsigned transactions whose
/// inputs each carry one signature and whose outputs pay standard scripts.
#[derive(Clone, Debug)]
pub struct MassCalculator {
    mass_per_tx_byte: u64,
    mass_per_script_pub_key_byte: u64,
    mass_per_sig_op: u64,
}

impl Default for MassCalculator {
    fn default() -> Self {
        Self::new(MASS_PER_TX_BYTE, MASS_PER_SCRIPT_PUB_KEY_BYTE, MASS_PER_SIG_OP)
    }
}

impl MassCalculator {
    pub fn new(mass_per_tx_byte: u64, mass_per_script_pub_key_byte: u64, mass_per_sig_op: u64) -> Self {
        Self { mass_per_tx_byte, mass_per_script_pub_key_byte, mass_per_sig_op }
    }

    pub fn calc_mass(&self, inputs: usize, outputs: usize) -> MassCalculationResult {
        let inputs = inputs as u64;
        let outputs = outputs as u64;

        let tx_size = BASE_OVERHEAD.saturating_add(inputs.saturating_mul(INPUT_SIZE));
        let script_pub_key_size = outputs.saturating_mul(SCRIPT_VERSION_SIZE + SCRIPT_SIZE_PER_OUTPUT);
        let sig_ops_count = inputs;

        let breakdown = MassBreakdown {
            base_mass: tx_size.saturating_mul(self.mass_per_tx_byte),
            script_pub_key_mass: script_pub_key_size.saturating_mul(self.mass_per_script_pub_key_byte),
            sig_ops_mass: sig_ops_count.saturating_mul(self.mass_per_sig_op),
        };
        let mass = breakdown.base_mass.saturating_add(breakdown.script_pub_key_mass).saturating_add(breakdown.sig_ops_mass);

        MassCalculationResult {
            mass,
            tx_size,
            script_pub_key_size,
            sig_ops_count,
            equivalent_size: mass.div_ceil(MASS_TO_SIZE_DIVISOR),
            breakdown,
        }
    }

    /// `max(ceil(equivalent_size * fee_rate), MIN_FEE)` in sompi. A negative or
    /// non-finite rate yields the minimum fee.
    pub fn calc_fee(&self, inputs: usize, outputs: usize, fee_rate: f64) -> u64 {
        let equivalent_size = self.calc_mass(inputs, outputs).equivalent_size;
        fee_for_size(equivalent_size, fee_rate)
    }

    /// Compute mass of an actual transaction: its estimated serialized size, the
    /// bytes of its output scripts and its declared sig op counts, each weighted.
    pub fn calc_tx_compute_mass(&self, tx: &Transaction) -> u64 {
        if tx.is_coinbase() {
            return 0;
        }

        let size = transaction_estimated_serialized_size(tx);
        let mass_for_size = size.saturating_mul(self.mass_per_tx_byte);
        let total_script_public_key_size: u64 =
            tx.outputs.iter().map(|output| SCRIPT_VERSION_SIZE + output.script_public_key.script().len() as u64).sum();
        let total_script_public_key_mass = total_script_public_key_size.saturating_mul(self.mass_per_script_pub_key_byte);

        let total_sigops: u64 = tx.inputs.iter().map(|input| input.sig_op_count as u64).sum();
        let total_sigops_mass = total_sigops.saturating_mul(self.mass_per_sig_op);

        mass_for_size.saturating_add(total_script_public_key_mass).saturating_add(total_sigops_mass)
    }
}

fn fee_for_size(equivalent_size: u64, fee_rate: f64) -> u64 {
    if !fee_rate.is_finite() || fee_rate <= 0.0 {
        return MIN_FEE;
    }
    // float to int casts saturate
    let fee = (equivalent_size as f64 * fee_rate).ceil() as u64;
    fee.max(MIN_FEE)
}
