use super::HasherExtensions;
use crate::tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput};
use kastx_hashes::{Hash, Hasher, HasherBase, TransactionID};

/// Not intended for direct use by clients. Instead use `tx.id()`
///
/// The id is the `TransactionID` domain hash applied twice over the transaction
/// encoding with signature scripts blanked and sig op counts skipped.
pub fn id(tx: &Transaction) -> TransactionId {
    TransactionID::hash(single_pass_id(tx))
}

fn single_pass_id(tx: &Transaction) -> Hash {
    let mut hasher = TransactionID::new();
    write_transaction_for_transaction_id(&mut hasher, tx);
    hasher.finalize()
}

fn write_transaction_for_transaction_id<T: HasherBase>(hasher: &mut T, tx: &Transaction) {
    hasher.write_u16(tx.version).write_len(tx.inputs.len());
    for input in tx.inputs.iter() {
        write_input_without_signature(hasher, input);
    }

    hasher.write_len(tx.outputs.len());
    for output in tx.outputs.iter() {
        write_output(hasher, output);
    }

    hasher.write_u64(tx.lock_time).update(tx.subnetwork_id).write_u64(tx.gas).write_var_bytes(&tx.payload);
}

#[inline(always)]
fn write_input_without_signature<T: HasherBase>(hasher: &mut T, input: &TransactionInput) {
    write_outpoint(hasher, &input.previous_outpoint);
    // Signature script is replaced by an empty array and the sig op count is skipped
    hasher.write_var_bytes(&[]).write_u64(input.sequence);
}

#[inline(always)]
fn write_outpoint<T: HasherBase>(hasher: &mut T, outpoint: &TransactionOutpoint) {
    hasher.update(outpoint.transaction_id).write_u32(outpoint.index);
}

#[inline(always)]
fn write_output<T: HasherBase>(hasher: &mut T, output: &TransactionOutput) {
    hasher
        .write_u64(output.value)
        .write_u16(output.script_public_key.version())
        .write_var_bytes(output.script_public_key.script());
}
