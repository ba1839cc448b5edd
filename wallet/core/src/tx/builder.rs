//!
//! [`TransactionBuilder`] assembles a transaction from caller-supplied UTXOs,
//! applies the recipient and dust policies, and signs every input with the
//! scheme its locking script demands.
//!

use crate::{
    error::Error,
    result::Result,
    settings::TransactionBuilderSettings,
    tx::{
        fees::is_transaction_output_dust,
        observer::{NoopObserver, SignatureScheme, SigningObserver},
    },
    utxo::UtxoForSigning,
};
use kastx_addresses::Address;
use kastx_consensus_core::{
    constants::{SIGNATURE_PUSH_LEN, SIGNATURE_SIZE, TX_VERSION},
    hashing::{
        sighash::{calc_ecdsa_signature_hash, calc_schnorr_signature_hash, SigHashReusedValues},
        sighash_type::SIG_HASH_ALL,
    },
    mass::{MassCalculator, MAXIMUM_STANDARD_TRANSACTION_MASS},
    sign::{sign_ecdsa, sign_schnorr},
    subnets::SUBNETWORK_ID_NATIVE,
    tx::{serializable::SerializableTransaction, PopulatedTransaction, Transaction, TransactionId, TransactionInput, TransactionOutput},
};
use kastx_txscript::{pay_to_address_script, script_class::ScriptClass, signature_script};
use kastx_wallet_keys::privatekey::PrivateKey;
use std::sync::Arc;

/// Every standard input carries a single signature check.
const SIG_OP_COUNT: u8 = 1;

struct PendingInput {
    utxo: UtxoForSigning,
    private_key: PrivateKey,
}

/// A fully signed transaction, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub fee: u64,
    pub mass: u64,
}

impl SignedTransaction {
    pub fn id(&self) -> TransactionId {
        self.transaction.id()
    }

    pub fn to_serializable(&self) -> SerializableTransaction {
        SerializableTransaction::from(&self.transaction)
    }
}

/// Returns the id of `transaction`, which does not depend on its signature scripts.
pub fn transaction_id(transaction: &Transaction) -> TransactionId {
    transaction.id()
}

pub struct TransactionBuilder {
    settings: TransactionBuilderSettings,
    inputs: Vec<PendingInput>,
    outputs: Vec<TransactionOutput>,
    recipients: usize,
    fee: u64,
    change_settled: bool,
    observer: Arc<dyn SigningObserver>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new(TransactionBuilderSettings::default())
    }
}

impl TransactionBuilder {
    pub fn new(settings: TransactionBuilderSettings) -> Self {
        Self {
            settings,
            inputs: vec![],
            outputs: vec![],
            recipients: 0,
            fee: 0,
            change_settled: false,
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SigningObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn settings(&self) -> &TransactionBuilderSettings {
        &self.settings
    }

    /// Once change is settled the amounts are fixed, so inputs, outputs and fee are frozen.
    fn ensure_open(&self) -> Result<()> {
        if self.change_settled {
            return Err(Error::ChangeSettled);
        }
        Ok(())
    }

    /// Adds a UTXO to spend along with the key that unlocks it.
    pub fn add_input(&mut self, utxo: UtxoForSigning, private_key: PrivateKey) -> Result<&mut Self> {
        self.ensure_open()?;
        log::trace!("adding input {} of {} sompi", utxo.outpoint, utxo.amount());
        self.inputs.push(PendingInput { utxo, private_key });
        Ok(self)
    }

    /// Adds a recipient output. Fails on a malformed address, once the recipient
    /// limit is reached, or for dust when the dust policy is enforced.
    pub fn add_output(&mut self, address: &str, amount: u64) -> Result<&mut Self> {
        let address = Address::try_from(address)?;
        self.add_output_to(&address, amount)
    }

    pub fn add_output_to(&mut self, address: &Address, amount: u64) -> Result<&mut Self> {
        self.ensure_open()?;
        if self.recipients >= self.settings.max_recipient_outputs {
            return Err(Error::TooManyRecipients { max: self.settings.max_recipient_outputs });
        }
        let output = TransactionOutput::new(amount, pay_to_address_script(address)?);
        if self.settings.enforce_dust_policy && is_transaction_output_dust(&output, self.settings.minimum_relay_fee) {
            return Err(Error::DustOutput { address: address.to_string(), amount });
        }
        self.outputs.push(output);
        self.recipients += 1;
        Ok(self)
    }

    pub fn set_fee(&mut self, fee: u64) -> Result<&mut Self> {
        self.ensure_open()?;
        self.fee = fee;
        Ok(self)
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn total_input_value(&self) -> Result<u64> {
        self.inputs.iter().try_fold(0u64, |total, input| total.checked_add(input.utxo.amount())).ok_or(Error::AmountOverflow)
    }

    pub fn total_output_value(&self) -> Result<u64> {
        self.outputs.iter().try_fold(0u64, |total, output| total.checked_add(output.value)).ok_or(Error::AmountOverflow)
    }

    /// What the inputs leave over once outputs and fee are paid.
    fn remainder(&self) -> Result<u64> {
        let available = self.total_input_value()?;
        let required = self.total_output_value()?.checked_add(self.fee).ok_or(Error::AmountOverflow)?;
        available.checked_sub(required).ok_or_else(|| Error::InsufficientFunds { required, available, shortfall: required - available })
    }

    /// Sends whatever the inputs leave over to `address`.
    ///
    /// Returns the change amount, or `None` when the remainder was too small to
    /// be worth an output (zero, below `minimum_change`, or dust) and is left to the fee.
    ///
    /// Either way the change is settled: later calls to `add_input`, `add_output`,
    /// `set_fee` or `add_change_output` fail with [`Error::ChangeSettled`].
    pub fn add_change_output(&mut self, address: &str) -> Result<Option<u64>> {
        self.ensure_open()?;
        let address = Address::try_from(address)?;
        let change = self.remainder()?;
        let output = TransactionOutput::new(change, pay_to_address_script(&address)?);
        if change == 0
            || change < self.settings.minimum_change
            || (self.settings.enforce_dust_policy && is_transaction_output_dust(&output, self.settings.minimum_relay_fee))
        {
            log::debug!("change of {change} sompi is left to the fee");
            self.change_settled = true;
            return Ok(None);
        }
        self.outputs.push(output);
        self.change_settled = true;
        Ok(Some(change))
    }

    fn unsigned_transaction(&self) -> Transaction {
        let inputs = self
            .inputs
            .iter()
            .map(|input| TransactionInput::new(input.utxo.outpoint, vec![], self.settings.sequence, SIG_OP_COUNT))
            .collect();
        Transaction::new(TX_VERSION, inputs, self.outputs.clone(), 0, SUBNETWORK_ID_NATIVE, 0, vec![])
    }

    /// Compute mass the transaction will have once every input carries a signature script.
    pub fn estimated_mass(&self) -> u64 {
        let mut transaction = self.unsigned_transaction();
        for input in transaction.inputs.iter_mut() {
            input.signature_script = vec![0; 1 + SIGNATURE_SIZE + 1];
        }
        MassCalculator::default().calc_tx_compute_mass(&transaction)
    }

    /// Checks the transaction could be signed and relayed as it stands.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::NoInputs);
        }
        self.remainder()?;
        let mass = self.estimated_mass();
        if mass > MAXIMUM_STANDARD_TRANSACTION_MASS {
            return Err(Error::MassLimitExceeded { mass, limit: MAXIMUM_STANDARD_TRANSACTION_MASS });
        }
        Ok(())
    }

    /// Signs every input with `SIG_HASH_ALL`. Whatever the inputs leave over after
    /// the outputs is the fee.
    pub fn sign(self) -> Result<SignedTransaction> {
        self.validate()?;
        let mut transaction = self.unsigned_transaction();
        let entries = self.inputs.iter().map(|input| input.utxo.entry.clone()).collect();

        let signature_scripts = {
            let populated = PopulatedTransaction::new(&transaction, entries);
            let mut reused_values = SigHashReusedValues::new();
            self.inputs
                .iter()
                .enumerate()
                .map(|(index, input)| self.sign_input(&populated, index, input, &mut reused_values))
                .collect::<Result<Vec<_>>>()?
        };
        for (input, script) in transaction.inputs.iter_mut().zip(signature_scripts) {
            input.signature_script = script;
        }

        let total_input_value = self.total_input_value()?;
        let total_output_value = transaction.total_output_value().ok_or(Error::AmountOverflow)?;
        let fee = total_input_value.checked_sub(total_output_value).ok_or(Error::AmountOverflow)?;
        let mass = MassCalculator::default().calc_tx_compute_mass(&transaction);

        let id = transaction.id();
        self.observer.on_transaction_signed(&id);
        log::debug!(
            "signed transaction {id}: {} inputs, {} outputs, fee {fee}, mass {mass}",
            transaction.inputs.len(),
            transaction.outputs.len()
        );
        Ok(SignedTransaction { transaction, fee, mass })
    }

    fn sign_input(
        &self,
        populated: &PopulatedTransaction,
        index: usize,
        input: &PendingInput,
        reused_values: &mut SigHashReusedValues,
    ) -> Result<Vec<u8>> {
        let script = input.utxo.entry.script_public_key.script();
        let public_key = input.private_key.to_public_key();
        let signature = match input.utxo.address_type() {
            ScriptClass::PubKey => {
                if script[1..33] != public_key.x_only().serialize() {
                    return Err(Error::KeyMismatch { index });
                }
                let digest = calc_schnorr_signature_hash(populated, index, SIG_HASH_ALL, reused_values);
                self.observer.on_sighash(index, SignatureScheme::Schnorr, &digest);
                let keypair = secp256k1::Keypair::from_secret_key(secp256k1::SECP256K1, input.private_key.as_secret_key());
                sign_schnorr(&keypair, digest)
            }
            ScriptClass::PubKeyECDSA => {
                if script[1..34] != public_key.serialize() {
                    return Err(Error::KeyMismatch { index });
                }
                let digest = calc_ecdsa_signature_hash(populated, index, SIG_HASH_ALL, reused_values);
                self.observer.on_sighash(index, SignatureScheme::Ecdsa, &digest);
                sign_ecdsa(input.private_key.as_secret_key(), digest)
            }
            ScriptClass::ScriptHash | ScriptClass::NonStandard => return Err(Error::UnsupportedScript { index }),
        };
        let script = signature_script(&signature, SIG_HASH_ALL)?;
        debug_assert_eq!(script[0], SIGNATURE_PUSH_LEN);
        self.observer.on_input_signed(index, &script);
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::observer::LogObserver;
    use kastx_consensus_core::{
        sign::verify_transaction,
        tx::{ScriptPublicKey, TransactionOutpoint, UtxoEntry},
    };
    use kastx_hashes::Hash;
    use kastx_txscript::{address_to_script, pay_to_script_hash_script};
    use std::{str::FromStr, sync::Mutex};

    // cspell:disable
    const KEY_ONE: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const KEY_TWO: &str = "0000000000000000000000000000000000000000000000000000000000000002";
    const KEY_ONE_ECDSA: &str = "kaspa:qyp8n0nx0muaewav2ksx99wwsu9swq5mlndjmn3gm9vl9q2mzmup0xqyr5q6q2p";
    const KEY_ONE_SCHNORR: &str = "kaspa:qpumuen7l8wthtz45p3ftn58pvrs9xlumvkuu2xet8egzkcklqtes4ypce9sf";
    const KEY_TWO_SCHNORR: &str = "kaspa:qrrqglu5g8kh6mfsg4qxa9wq0nv9cauwfwxw70984wkqnw2uwz0w23n3jj3wt";
    const PREVIOUS_TX: &str = "8fd3dcbb2f6c9e59b9a8b0f01f5e8d0ddc27c46e6e7b1e3c08e72ef3d16c9a41";
    // cspell:enable

    #[derive(Default)]
    struct RecordingObserver {
        sighashes: Mutex<Vec<(usize, SignatureScheme, Hash)>>,
        signed: Mutex<Vec<TransactionId>>,
    }

    impl SigningObserver for RecordingObserver {
        fn on_sighash(&self, input_index: usize, scheme: SignatureScheme, digest: &Hash) {
            self.sighashes.lock().unwrap().push((input_index, scheme, *digest));
        }

        fn on_transaction_signed(&self, id: &TransactionId) {
            self.signed.lock().unwrap().push(*id);
        }
    }

    fn key(hex: &str) -> PrivateKey {
        PrivateKey::try_new(hex).unwrap()
    }

    fn utxo(address: &str, amount: u64, index: u32) -> UtxoForSigning {
        let outpoint = TransactionOutpoint::new(Hash::from_str(PREVIOUS_TX).unwrap(), index);
        UtxoForSigning::new(outpoint, UtxoEntry::new(amount, address_to_script(address).unwrap(), 0, false))
    }

    fn populated(signed: &SignedTransaction, entries: Vec<UtxoEntry>) -> PopulatedTransaction<'_> {
        PopulatedTransaction::new(&signed.transaction, entries)
    }

    #[test]
    fn test_ecdsa_change_back() {
        let observer = Arc::new(RecordingObserver::default());
        let input = utxo(KEY_ONE_ECDSA, 19_399_800_000, 0);
        let mut builder = TransactionBuilder::default().with_observer(observer.clone());
        builder.add_input(input.clone(), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 1000).unwrap();
        builder.set_fee(10_000).unwrap();
        assert_eq!(builder.add_change_output(KEY_ONE_ECDSA).unwrap(), Some(19_399_789_000));
        let signed = builder.sign().unwrap();

        let expected_digest = Hash::from_str("f4deb8dbd3f331def9aa424b678ac687d03c07d28216c3db16ea0982979ba0c6").unwrap();
        assert_eq!(*observer.sighashes.lock().unwrap(), vec![(0, SignatureScheme::Ecdsa, expected_digest)]);
        assert_eq!(*observer.signed.lock().unwrap(), vec![signed.id()]);

        let transaction = &signed.transaction;
        assert_eq!(transaction.outputs[0].value, 1000);
        assert_eq!(transaction.outputs[0].script_public_key, address_to_script(KEY_TWO_SCHNORR).unwrap());
        assert_eq!(transaction.outputs[1].script_public_key, input.entry.script_public_key);
        assert_eq!(transaction.inputs[0].sig_op_count, 1);
        assert_eq!(transaction.inputs[0].signature_script.len(), 66);
        assert_eq!(transaction.inputs[0].signature_script[65], SIG_HASH_ALL.to_u8());
        assert_eq!(signed.fee, 10_000);
        assert_eq!(signed.mass, 2047);
        assert_eq!(transaction_id(transaction), signed.id());

        verify_transaction(&populated(&signed, vec![input.entry.clone()])).unwrap();

        // RFC 6979 nonces make signing reproducible
        let mut again = TransactionBuilder::default();
        again.add_input(input, key(KEY_ONE)).unwrap();
        again.add_output(KEY_TWO_SCHNORR, 1000).unwrap();
        again.set_fee(10_000).unwrap();
        again.add_change_output(KEY_ONE_ECDSA).unwrap();
        assert_eq!(again.sign().unwrap(), signed);
    }

    #[test]
    fn test_schnorr_inputs() {
        let observer = Arc::new(RecordingObserver::default());
        let first = utxo(KEY_TWO_SCHNORR, 30_000, 0);
        let second = utxo(KEY_ONE_SCHNORR, 20_000, 1);
        let mut builder = TransactionBuilder::default().with_observer(observer.clone());
        builder.add_input(first.clone(), key(KEY_TWO)).unwrap().add_input(second.clone(), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_ONE_ECDSA, 25_000).unwrap();
        builder.set_fee(5_000).unwrap();
        assert_eq!(builder.add_change_output(KEY_TWO_SCHNORR).unwrap(), Some(20_000));
        let signed = builder.sign().unwrap();

        let schemes: Vec<_> = observer.sighashes.lock().unwrap().iter().map(|(index, scheme, _)| (*index, *scheme)).collect();
        assert_eq!(schemes, vec![(0, SignatureScheme::Schnorr), (1, SignatureScheme::Schnorr)]);
        assert!(signed.transaction.is_fully_signed());
        assert_eq!(signed.fee, 5_000);
        verify_transaction(&populated(&signed, vec![first.entry, second.entry])).unwrap();
        assert_eq!(signed.to_serializable().outputs.len(), 2);
    }

    #[test]
    fn test_recipient_limit() {
        let mut builder = TransactionBuilder::default();
        builder.add_input(utxo(KEY_ONE_SCHNORR, 100_000, 0), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 10_000).unwrap();
        builder.add_output(KEY_ONE_ECDSA, 10_000).unwrap();
        assert!(matches!(builder.add_output(KEY_TWO_SCHNORR, 10_000), Err(Error::TooManyRecipients { max: 2 })));
        // change does not count against the limit
        builder.set_fee(2_000).unwrap();
        assert_eq!(builder.add_change_output(KEY_ONE_SCHNORR).unwrap(), Some(78_000));
        assert!(matches!(builder.add_change_output(KEY_ONE_SCHNORR), Err(Error::ChangeSettled)));
        assert_eq!(builder.sign().unwrap().transaction.outputs.len(), 3);
    }

    #[test]
    fn test_invalid_recipient_address() {
        let mut builder = TransactionBuilder::default();
        assert!(matches!(builder.add_output("kaspa:notanaddress", 10_000), Err(Error::Address(_))));
        assert!(matches!(builder.add_change_output("kaspa"), Err(Error::Address(_))));
    }

    #[test]
    fn test_dust_policy() {
        let mut builder = TransactionBuilder::default();
        assert!(matches!(builder.add_output(KEY_TWO_SCHNORR, 599), Err(Error::DustOutput { amount: 599, .. })));
        builder.add_output(KEY_TWO_SCHNORR, 600).unwrap();

        let settings = TransactionBuilderSettings { enforce_dust_policy: false, ..Default::default() };
        let mut lenient = TransactionBuilder::new(settings);
        lenient.add_output(KEY_TWO_SCHNORR, 1).unwrap();

        // dust change goes to the fee
        let input = utxo(KEY_ONE_SCHNORR, 12_100, 0);
        let mut builder = TransactionBuilder::default();
        builder.add_input(input, key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 10_000).unwrap();
        builder.set_fee(2_000).unwrap();
        assert_eq!(builder.add_change_output(KEY_ONE_SCHNORR).unwrap(), None);
        let signed = builder.sign().unwrap();
        assert_eq!(signed.transaction.outputs.len(), 1);
        assert_eq!(signed.fee, 2_100);
    }

    #[test]
    fn test_minimum_change() {
        let settings = TransactionBuilderSettings { minimum_change: 50_000, ..Default::default() };
        let mut builder = TransactionBuilder::new(settings);
        builder.add_input(utxo(KEY_ONE_SCHNORR, 60_000, 0), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 10_000).unwrap();
        builder.set_fee(1_000).unwrap();
        assert_eq!(builder.add_change_output(KEY_ONE_SCHNORR).unwrap(), None);
        assert_eq!(builder.sign().unwrap().fee, 50_000);
    }

    #[test]
    fn test_validate_with_surplus() {
        let mut builder = TransactionBuilder::default();
        builder.add_input(utxo(KEY_ONE_SCHNORR, 100_000, 0), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 10_000).unwrap();
        builder.set_fee(1_000).unwrap();
        builder.validate().unwrap();

        // exactly solvent
        builder.set_fee(90_000).unwrap();
        builder.validate().unwrap();
        assert_eq!(builder.add_change_output(KEY_ONE_SCHNORR).unwrap(), None);
        assert_eq!(builder.sign().unwrap().fee, 90_000);
    }

    #[test]
    fn test_settled_change_freezes_builder() {
        let mut builder = TransactionBuilder::default();
        builder.add_input(utxo(KEY_ONE_SCHNORR, 100_000, 0), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 10_000).unwrap();
        builder.set_fee(1_000).unwrap();
        assert_eq!(builder.add_change_output(KEY_ONE_SCHNORR).unwrap(), Some(89_000));

        assert!(matches!(builder.set_fee(5_000), Err(Error::ChangeSettled)));
        assert!(matches!(builder.add_output(KEY_ONE_ECDSA, 10_000), Err(Error::ChangeSettled)));
        assert!(matches!(builder.add_input(utxo(KEY_ONE_SCHNORR, 1_000, 1), key(KEY_ONE)), Err(Error::ChangeSettled)));
        assert_eq!(builder.fee(), 1_000);

        let signed = builder.sign().unwrap();
        assert_eq!(signed.fee, 1_000);
        assert_eq!(signed.transaction.outputs.len(), 2);

        // change left to the fee settles it as well
        let mut builder = TransactionBuilder::default();
        builder.add_input(utxo(KEY_ONE_SCHNORR, 10_500, 0), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 10_000).unwrap();
        assert_eq!(builder.add_change_output(KEY_ONE_SCHNORR).unwrap(), None);
        assert!(matches!(builder.set_fee(100), Err(Error::ChangeSettled)));
        assert_eq!(builder.sign().unwrap().fee, 500);
    }

    #[test]
    fn test_log_observer() {
        let input = utxo(KEY_ONE_SCHNORR, 50_000, 0);
        let mut builder = TransactionBuilder::default().with_observer(Arc::new(LogObserver));
        builder.add_input(input.clone(), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 20_000).unwrap();
        builder.set_fee(1_000).unwrap();
        let signed = builder.sign().unwrap();
        verify_transaction(&populated(&signed, vec![input.entry])).unwrap();
    }

    #[test]
    fn test_insufficient_funds() {
        let mut builder = TransactionBuilder::default();
        builder.add_input(utxo(KEY_ONE_SCHNORR, 10_000, 0), key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 9_500).unwrap();
        builder.set_fee(1_000).unwrap();
        let expected = |err| matches!(err, Error::InsufficientFunds { required: 10_500, available: 10_000, shortfall: 500 });
        assert!(expected(builder.add_change_output(KEY_ONE_SCHNORR).unwrap_err()));
        assert!(expected(builder.validate().unwrap_err()));
        assert!(expected(builder.sign().unwrap_err()));
    }

    #[test]
    fn test_validate_failures() {
        assert!(matches!(TransactionBuilder::default().validate(), Err(Error::NoInputs)));

        let mut overflow = TransactionBuilder::default();
        overflow.add_input(utxo(KEY_ONE_SCHNORR, u64::MAX, 0), key(KEY_ONE)).unwrap();
        overflow.add_input(utxo(KEY_ONE_SCHNORR, 1, 1), key(KEY_ONE)).unwrap();
        assert!(matches!(overflow.validate(), Err(Error::AmountOverflow)));

        // each signed input adds 118 bytes and one sig op, 1_118 mass
        let mut heavy = TransactionBuilder::default();
        for index in 0..100 {
            heavy.add_input(utxo(KEY_ONE_SCHNORR, 10_000, index), key(KEY_ONE)).unwrap();
        }
        heavy.add_output(KEY_TWO_SCHNORR, 10_000).unwrap();
        assert!(matches!(heavy.validate(), Err(Error::MassLimitExceeded { limit: MAXIMUM_STANDARD_TRANSACTION_MASS, .. })));
    }

    #[test]
    fn test_key_mismatch() {
        let mut builder = TransactionBuilder::default();
        builder.add_input(utxo(KEY_ONE_ECDSA, 10_000, 0), key(KEY_TWO)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 5_000).unwrap();
        assert!(matches!(builder.sign(), Err(Error::KeyMismatch { index: 0 })));

        let mut builder = TransactionBuilder::default();
        builder.add_input(utxo(KEY_TWO_SCHNORR, 10_000, 0), key(KEY_TWO)).unwrap();
        builder.add_input(utxo(KEY_ONE_SCHNORR, 10_000, 1), key(KEY_TWO)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 5_000).unwrap();
        assert!(matches!(builder.sign(), Err(Error::KeyMismatch { index: 1 })));
    }

    #[test]
    fn test_unsupported_script() {
        let outpoint = TransactionOutpoint::new(Hash::from_str(PREVIOUS_TX).unwrap(), 0);
        let p2sh = UtxoForSigning::new(outpoint, UtxoEntry::new(10_000, pay_to_script_hash_script(&[0x51]), 0, false));
        let mut builder = TransactionBuilder::default();
        builder.add_input(p2sh, key(KEY_ONE)).unwrap();
        builder.add_output(KEY_TWO_SCHNORR, 5_000).unwrap();
        assert!(matches!(builder.sign(), Err(Error::UnsupportedScript { index: 0 })));

        let bare = UtxoForSigning::new(outpoint, UtxoEntry::new(10_000, ScriptPublicKey::from_vec(0, vec![0x51]), 0, false));
        let mut builder = TransactionBuilder::default();
        builder.add_input(bare, key(KEY_ONE)).unwrap();
        assert!(matches!(builder.sign(), Err(Error::UnsupportedScript { index: 0 })));
    }
}
