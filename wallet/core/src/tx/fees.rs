//!
//! Fee estimation and the relay dust rule.
//!

use kastx_consensus_core::{
    mass::{transaction_output_estimated_serialized_size, MassCalculator},
    tx::TransactionOutput,
};
use serde::{Deserialize, Serialize};

/// Estimated bytes of the input that would later spend an output, as assumed by the dust rule.
const DUST_INPUT_SIZE: u64 = 148;

/// Mass and fee of a transaction shape at a given fee rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimate {
    pub mass: u64,
    pub equivalent_size: u64,
    pub fee: u64,
}

/// Estimates the fee of a transaction spending `inputs` standard inputs into
/// `outputs` standard outputs, at `fee_rate` sompi per equivalent byte.
pub fn estimate_fee(inputs: usize, outputs: usize, fee_rate: f64) -> FeeEstimate {
    let calculator = MassCalculator::default();
    let result = calculator.calc_mass(inputs, outputs);
    FeeEstimate { mass: result.mass, equivalent_size: result.equivalent_size, fee: calculator.calc_fee(inputs, outputs, fee_rate) }
}

/// An output is dust when spending it would cost more than a third of its
/// value at the minimum relay fee.
pub fn is_transaction_output_dust(output: &TransactionOutput, minimum_relay_fee: u64) -> bool {
    // Large enough to never be dust, and the product below would overflow
    if output.value > u64::MAX / 1000 {
        return false;
    }
    let total_serialized_size = transaction_output_estimated_serialized_size(output) + DUST_INPUT_SIZE;
    output.value * 1000 / (3 * total_serialized_size) < minimum_relay_fee
}
