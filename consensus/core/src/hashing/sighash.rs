use kastx_hashes::{Hash, Hasher, HasherBase, TransactionSigningHash, TransactionSigningHashECDSA, ZERO_HASH};

use crate::tx::{PopulatedTransaction, ScriptPublicKey, TransactionOutpoint, TransactionOutput};

use super::{sighash_type::SigHashType, HasherExtensions};

/// Hashes shared by every input of one transaction. A cache instance belongs to a
/// single transaction snapshot: after mutating the transaction, invalidate the
/// affected entries before hashing again.
#[derive(Default, Debug, Clone)]
pub struct SigHashReusedValues {
    previous_outputs_hash: Option<Hash>,
    sequence_hash: Option<Hash>,
    sig_op_counts_hash: Option<Hash>,
    outputs_hash: Option<Hash>,
    payload_hash: Option<Hash>,
}

impl SigHashReusedValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the hashes derived from inputs (outpoints, sequences and sig op counts).
    pub fn invalidate_inputs(&mut self) {
        self.previous_outputs_hash = None;
        self.sequence_hash = None;
        self.sig_op_counts_hash = None;
    }

    pub fn invalidate_outputs(&mut self) {
        self.outputs_hash = None;
    }

    /// Must also be called when the subnetwork id changes.
    pub fn invalidate_payload(&mut self) {
        self.payload_hash = None;
    }

    pub fn invalidate_all(&mut self) {
        *self = Self::default();
    }
}

fn previous_outputs_hash(tx: &PopulatedTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_anyone_can_pay() {
        return ZERO_HASH;
    }

    *reused_values.previous_outputs_hash.get_or_insert_with(|| {
        let mut hasher = TransactionSigningHash::new();
        for input in tx.tx.inputs.iter() {
            hash_outpoint(&mut hasher, input.previous_outpoint);
        }
        hasher.finalize()
    })
}

fn sequence_hash(tx: &PopulatedTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_single() || hash_type.is_sighash_anyone_can_pay() || hash_type.is_sighash_none() {
        return ZERO_HASH;
    }

    *reused_values.sequence_hash.get_or_insert_with(|| {
        let mut hasher = TransactionSigningHash::new();
        for input in tx.tx.inputs.iter() {
            hasher.write_u64(input.sequence);
        }
        hasher.finalize()
    })
}

fn sig_op_counts_hash(tx: &PopulatedTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues) -> Hash {
    if hash_type.is_sighash_anyone_can_pay() {
        return ZERO_HASH;
    }

    *reused_values.sig_op_counts_hash.get_or_insert_with(|| {
        let mut hasher = TransactionSigningHash::new();
        for input in tx.tx.inputs.iter() {
            hasher.write_u8(input.sig_op_count);
        }
        hasher.finalize()
    })
}

fn payload_hash(tx: &PopulatedTransaction, reused_values: &mut SigHashReusedValues) -> Hash {
    if !tx.tx.subnetwork_id.permits_payload() {
        return ZERO_HASH;
    }

    *reused_values.payload_hash.get_or_insert_with(|| {
        let mut hasher = TransactionSigningHash::new();
        hasher.write_var_bytes(&tx.tx.payload);
        hasher.finalize()
    })
}

fn outputs_hash(tx: &PopulatedTransaction, hash_type: SigHashType, reused_values: &mut SigHashReusedValues, input_index: usize) -> Hash {
    if hash_type.is_sighash_none() {
        return ZERO_HASH;
    }

    if hash_type.is_sighash_single() {
        // If the relevant output exists - return its hash, otherwise return zero-hash
        let Some(output) = tx.outputs().get(input_index) else {
            return ZERO_HASH;
        };
        let mut hasher = TransactionSigningHash::new();
        hash_output(&mut hasher, output);
        return hasher.finalize();
    }

    // Otherwise, return hash of all outputs. Re-use hash if available.
    *reused_values.outputs_hash.get_or_insert_with(|| {
        let mut hasher = TransactionSigningHash::new();
        for output in tx.outputs().iter() {
            hash_output(&mut hasher, output);
        }
        hasher.finalize()
    })
}

fn hash_outpoint(hasher: &mut impl Hasher, outpoint: TransactionOutpoint) {
    hasher.update(outpoint.transaction_id);
    hasher.write_u32(outpoint.index);
}

fn hash_output(hasher: &mut impl Hasher, output: &TransactionOutput) {
    hasher.write_u64(output.value);
    hash_script_public_key(hasher, &output.script_public_key);
}

fn hash_script_public_key(hasher: &mut impl Hasher, script_public_key: &ScriptPublicKey) {
    hasher.write_u16(script_public_key.version());
    hasher.write_var_bytes(script_public_key.script());
}

/// Computes the digest a Schnorr signature over input `input_index` commits to.
///
/// # Panics
///
/// Panics if `input_index` is out of bounds.
pub fn calc_schnorr_signature_hash(
    tx: &PopulatedTransaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
) -> Hash {
    let (input, entry) = tx.populated_input(input_index);
    let mut hasher = TransactionSigningHash::new();
    hasher
        .write_u16(tx.tx.version)
        .update(previous_outputs_hash(tx, hash_type, reused_values))
        .update(sequence_hash(tx, hash_type, reused_values))
        .update(sig_op_counts_hash(tx, hash_type, reused_values));
    hash_outpoint(&mut hasher, input.previous_outpoint);
    hash_script_public_key(&mut hasher, &entry.script_public_key);
    hasher
        .write_u64(entry.amount)
        .write_u64(input.sequence)
        .write_u8(input.sig_op_count)
        .update(outputs_hash(tx, hash_type, reused_values, input_index))
        .write_u64(tx.tx.lock_time)
        .update(tx.tx.subnetwork_id)
        .write_u64(tx.tx.gas)
        .update(payload_hash(tx, reused_values))
        .write_u8(hash_type.to_u8());
    hasher.finalize()
}

/// ECDSA digest: `sha256(sha256("TransactionSigningHashECDSA") || schnorr_digest)`.
///
/// # Panics
///
/// Panics if `input_index` is out of bounds.
pub fn calc_ecdsa_signature_hash(
    tx: &PopulatedTransaction,
    input_index: usize,
    hash_type: SigHashType,
    reused_values: &mut SigHashReusedValues,
) -> Hash {
    let hash = calc_schnorr_signature_hash(tx, input_index, hash_type, reused_values);
    let mut hasher = TransactionSigningHashECDSA::new();
    hasher.update(hash);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use smallvec::SmallVec;

    use crate::{
        hashing::sighash_type::{SIG_HASH_ALL, SIG_HASH_ANY_ONE_CAN_PAY, SIG_HASH_NONE, SIG_HASH_SINGLE},
        subnets::{SubnetworkId, SUBNETWORK_ID_NATIVE, SUBNETWORK_ID_PAYLOAD},
        tx::{Transaction, TransactionId, TransactionInput, UtxoEntry},
    };

    use super::*;

    // cspell:disable
    const PREV_TX_ID: &str = "8fd3dcbb2f6c9e59b9a8b0f01f5e8d0ddc27c46e6e7b1e3c08e72ef3d16c9a41";
    const ECDSA_SPK: &str = "210279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798ab";
    const SCHNORR_SPK: &str = "20c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5ac";
    // cspell:enable

    fn spk(hex_str: &str) -> ScriptPublicKey {
        ScriptPublicKey::from_vec(0, hex::decode(hex_str).unwrap())
    }

    fn input(index: u32) -> TransactionInput {
        TransactionInput::new(TransactionOutpoint::new(TransactionId::from_str(PREV_TX_ID).unwrap(), index), vec![], 0, 1)
    }

    fn change_back_tx() -> Transaction {
        Transaction::new(
            0,
            vec![input(0)],
            vec![TransactionOutput::new(1000, spk(SCHNORR_SPK)), TransactionOutput::new(19399789000, spk(ECDSA_SPK))],
            0,
            SUBNETWORK_ID_NATIVE,
            0,
            vec![],
        )
    }

    #[test]
    fn test_signature_hash() {
        let prev_tx_id = TransactionId::from_str("880eb9819a31821d9d2399e2f35e2433b72637e393d71ecc9b8d0250f49153c3").unwrap();
        let mut bytes = [0u8; 34];
        faster_hex::hex_decode("208325613d2eeaf7176ac6c670b13c0043156c427438ed72d74b7800862ad884e8ac".as_bytes(), &mut bytes).unwrap();
        let script_pub_key_1 = SmallVec::from(bytes.to_vec());

        let mut bytes = [0u8; 34];
        faster_hex::hex_decode("20fcef4c106cf11135bbd70f02a726a92162d2fb8b22f0469126f800862ad884e8ac".as_bytes(), &mut bytes).unwrap();
        let script_pub_key_2 = SmallVec::from_vec(bytes.to_vec());

        let tx = Transaction::new(
            0,
            vec![
                TransactionInput::new(TransactionOutpoint::new(prev_tx_id, 0), vec![], 0, 0),
                TransactionInput::new(TransactionOutpoint::new(prev_tx_id, 1), vec![], 1, 0),
                TransactionInput::new(TransactionOutpoint::new(prev_tx_id, 2), vec![], 2, 0),
            ],
            vec![
                TransactionOutput { value: 300, script_public_key: ScriptPublicKey::new(0, script_pub_key_2.clone()) },
                TransactionOutput { value: 300, script_public_key: ScriptPublicKey::new(0, script_pub_key_1.clone()) },
            ],
            1615462089000,
            SubnetworkId::from_bytes([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            0,
            vec![],
        );

        let populated_tx = PopulatedTransaction::new(
            &tx,
            vec![
                UtxoEntry::new(100, ScriptPublicKey::new(0, script_pub_key_1), 0, false),
                UtxoEntry::new(200, ScriptPublicKey::new(0, script_pub_key_2.clone()), 0, false),
                UtxoEntry::new(300, ScriptPublicKey::new(0, script_pub_key_2), 0, false),
            ],
        );

        let mut reused_values = SigHashReusedValues::new();
        assert_eq!(
            calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut reused_values).to_string(),
            "b363613fe99c8bb1d3712656ec8dfaea621ee6a9a95d851aec5bb59363b03f5e"
        );
    }

    #[test]
    fn test_change_back_scenario_digests() {
        let tx = change_back_tx();
        let populated_tx = PopulatedTransaction::new(&tx, vec![UtxoEntry::new(19399800000, spk(ECDSA_SPK), 0, false)]);

        let mut reused_values = SigHashReusedValues::new();
        let schnorr = calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut reused_values);
        assert_eq!(schnorr.to_string(), "0a3363d3376c461af544aa00151f83d4a37a3cf9bed213ef40f8f8ddbde1af35");

        let ecdsa = calc_ecdsa_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut reused_values);
        assert_eq!(ecdsa.to_string(), "f4deb8dbd3f331def9aa424b678ac687d03c07d28216c3db16ea0982979ba0c6");
        assert_ne!(schnorr, ecdsa);
    }

    #[test]
    fn test_reused_values_match_fresh_computation() {
        let mut tx = change_back_tx();
        tx.inputs.push(input(1));
        let entries =
            vec![UtxoEntry::new(19399800000, spk(ECDSA_SPK), 0, false), UtxoEntry::new(5000, spk(SCHNORR_SPK), 0, false)];
        let populated_tx = PopulatedTransaction::new(&tx, entries);

        let mut shared = SigHashReusedValues::new();
        let first = calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut shared);
        let second = calc_schnorr_signature_hash(&populated_tx, 1, SIG_HASH_ALL, &mut shared);
        assert_eq!(first.to_string(), "8e29cd1de598b4b0e9c79902c61b4aa422da6b4d31c4a1f8d194c02dc0ff2c52");
        assert_eq!(second.to_string(), "e692da9bfb3791628d5d79e8203eede479bd52ff153d1c9653a7e00c5cf233bd");
        assert_eq!(second, calc_schnorr_signature_hash(&populated_tx, 1, SIG_HASH_ALL, &mut SigHashReusedValues::new()));
    }

    #[test]
    fn test_payload_is_committed_outside_native_subnetwork() {
        let mut tx = change_back_tx();
        tx.outputs.truncate(1);
        tx.subnetwork_id = SUBNETWORK_ID_PAYLOAD;
        tx.payload = b"hello".to_vec();
        let entries = vec![UtxoEntry::new(19399800000, spk(ECDSA_SPK), 0, false)];

        let populated_tx = PopulatedTransaction::new(&tx, entries.clone());
        let digest = calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut SigHashReusedValues::new());
        assert_eq!(digest.to_string(), "21ae729f3ebc5914864e908a9a1d161c6e5bbb4cb7eda563252b20a319834a0d");

        let mut other = tx.clone();
        other.payload = b"world".to_vec();
        let populated_other = PopulatedTransaction::new(&other, entries.clone());
        assert_ne!(digest, calc_schnorr_signature_hash(&populated_other, 0, SIG_HASH_ALL, &mut SigHashReusedValues::new()));

        // the native subnetwork ignores the payload bytes entirely
        let mut native = tx.clone();
        native.subnetwork_id = SUBNETWORK_ID_NATIVE;
        let mut native_other = native.clone();
        native_other.payload = b"world".to_vec();
        assert_eq!(
            calc_schnorr_signature_hash(&PopulatedTransaction::new(&native, entries.clone()), 0, SIG_HASH_ALL, &mut SigHashReusedValues::new()),
            calc_schnorr_signature_hash(&PopulatedTransaction::new(&native_other, entries), 0, SIG_HASH_ALL, &mut SigHashReusedValues::new()),
        );
    }

    #[test]
    fn test_stale_cache_requires_invalidation() {
        let entries = vec![UtxoEntry::new(19399800000, spk(ECDSA_SPK), 0, false)];
        let mut tx = change_back_tx();
        let mut reused_values = SigHashReusedValues::new();
        let before = calc_schnorr_signature_hash(&PopulatedTransaction::new(&tx, entries.clone()), 0, SIG_HASH_ALL, &mut reused_values);

        tx.outputs[0].value += 1;
        tx.inputs[0].sequence = 7;
        let populated_tx = PopulatedTransaction::new(&tx, entries);
        let fresh = calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut SigHashReusedValues::new());
        assert_ne!(before, fresh);

        reused_values.invalidate_outputs();
        let partially_invalidated = calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut reused_values);
        assert_ne!(partially_invalidated, fresh);

        reused_values.invalidate_inputs();
        assert_eq!(calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut reused_values), fresh);
    }

    #[test]
    fn test_payload_change_requires_invalidation() {
        let entries = vec![UtxoEntry::new(19399800000, spk(ECDSA_SPK), 0, false)];
        let mut tx = change_back_tx();
        tx.subnetwork_id = SUBNETWORK_ID_PAYLOAD;
        tx.payload = b"hello".to_vec();
        let mut reused_values = SigHashReusedValues::new();
        let before = calc_schnorr_signature_hash(&PopulatedTransaction::new(&tx, entries.clone()), 0, SIG_HASH_ALL, &mut reused_values);

        let mut repayloaded = tx.clone();
        repayloaded.payload = b"world".to_vec();
        let populated_tx = PopulatedTransaction::new(&repayloaded, entries.clone());
        let fresh = calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut SigHashReusedValues::new());
        assert_ne!(before, fresh);

        // the cached payload hash still describes the old payload
        assert_eq!(calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut reused_values), before);
        reused_values.invalidate_payload();
        assert_eq!(calc_schnorr_signature_hash(&populated_tx, 0, SIG_HASH_ALL, &mut reused_values), fresh);

        let mut rewritten = repayloaded.clone();
        rewritten.payload = b"again".to_vec();
        rewritten.outputs[0].value += 1;
        rewritten.inputs[0].sig_op_count = 2;
        let populated_rewritten = PopulatedTransaction::new(&rewritten, entries);
        let rewritten_fresh = calc_schnorr_signature_hash(&populated_rewritten, 0, SIG_HASH_ALL, &mut SigHashReusedValues::new());
        assert_ne!(calc_schnorr_signature_hash(&populated_rewritten, 0, SIG_HASH_ALL, &mut reused_values), rewritten_fresh);
        reused_values.invalidate_all();
        assert_eq!(calc_schnorr_signature_hash(&populated_rewritten, 0, SIG_HASH_ALL, &mut reused_values), rewritten_fresh);
    }

    #[test]
    fn test_non_default_sighash_types() {
        let entries = vec![UtxoEntry::new(19399800000, spk(ECDSA_SPK), 0, false)];
        let tx = change_back_tx();
        let mut altered_outputs = tx.clone();
        altered_outputs.outputs[1].value -= 10;

        let digest = |tx: &Transaction, hash_type: SigHashType| {
            calc_schnorr_signature_hash(&PopulatedTransaction::new(tx, entries.clone()), 0, hash_type, &mut SigHashReusedValues::new())
        };

        // NONE commits to no output
        assert_eq!(digest(&tx, SIG_HASH_NONE), digest(&altered_outputs, SIG_HASH_NONE));
        // SINGLE commits only to the output sharing the input's index
        assert_eq!(digest(&tx, SIG_HASH_SINGLE), digest(&altered_outputs, SIG_HASH_SINGLE));
        assert_ne!(digest(&tx, SIG_HASH_ALL), digest(&altered_outputs, SIG_HASH_ALL));

        // ANYONECANPAY ignores the other inputs
        let mut extra_input = tx.clone();
        extra_input.inputs.push(input(5));
        let extended_entries = vec![entries[0].clone(), UtxoEntry::new(1, spk(SCHNORR_SPK), 0, false)];
        let anyone_can_pay = SigHashType::from_u8(SIG_HASH_ALL.to_u8() | SIG_HASH_ANY_ONE_CAN_PAY.to_u8()).unwrap();
        assert_eq!(
            digest(&tx, anyone_can_pay),
            calc_schnorr_signature_hash(
                &PopulatedTransaction::new(&extra_input, extended_entries),
                0,
                anyone_can_pay,
                &mut SigHashReusedValues::new()
            )
        );
    }

    #[test]
    fn test_single_without_matching_output() {
        let mut tx = change_back_tx();
        tx.inputs.push(input(1));
        tx.outputs.truncate(1);
        let mut altered = tx.clone();
        altered.outputs[0].value = 1;
        let entries =
            vec![UtxoEntry::new(19399800000, spk(ECDSA_SPK), 0, false), UtxoEntry::new(5000, spk(SCHNORR_SPK), 0, false)];

        let digest = |tx: &Transaction, input_index: usize, hash_type: SigHashType| {
            calc_schnorr_signature_hash(&PopulatedTransaction::new(tx, entries.clone()), input_index, hash_type, &mut SigHashReusedValues::new())
        };

        // input 1 has no output at its index, so no output is committed to
        assert_eq!(digest(&tx, 1, SIG_HASH_SINGLE), digest(&altered, 1, SIG_HASH_SINGLE));
        assert_ne!(digest(&tx, 0, SIG_HASH_SINGLE), digest(&altered, 0, SIG_HASH_SINGLE));
        // NONE and SINGLE still differ through the trailing type byte
        assert_ne!(digest(&tx, 1, SIG_HASH_SINGLE), digest(&tx, 1, SIG_HASH_NONE));
    }
}
