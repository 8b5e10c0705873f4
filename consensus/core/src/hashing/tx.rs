use super::HasherExtensions;
use crate::tx::{Transaction, TransactionId, TransactionInput, TransactionOutpoint, TransactionOutput};
use bagcoin_hashes::{DoubleSha256, Hasher};

/// Not intended for direct use by clients. Instead use `tx.id()`
pub fn id(tx: &Transaction) -> TransactionId {
    let mut hasher = DoubleSha256::new();
    write_transaction(&mut hasher, tx);
    hasher.finalize()
}

/// Write the transaction into the provided hasher according to the consensus encoding
fn write_transaction<T: Hasher>(hasher: &mut T, tx: &Transaction) {
    hasher.update(tx.version.to_le_bytes()).write_len(tx.inputs.len());
    for input in tx.inputs.iter() {
        write_input(hasher, input);
    }

    hasher.write_len(tx.outputs.len());
    for output in tx.outputs.iter() {
        write_output(hasher, output);
    }

    hasher.update(tx.lock_time.to_le_bytes());
}

#[inline(always)]
fn write_input<T: Hasher>(hasher: &mut T, input: &TransactionInput) {
    write_outpoint(hasher, &input.previous_outpoint);
    hasher.write_var_bytes(input.signature_script.as_slice()).update(input.sequence.to_le_bytes());
}

#[inline(always)]
fn write_outpoint<T: Hasher>(hasher: &mut T, outpoint: &TransactionOutpoint) {
    hasher.update(outpoint.transaction_id).update(outpoint.index.to_le_bytes());
}

#[inline(always)]
fn write_output<T: Hasher>(hasher: &mut T, output: &TransactionOutput) {
    hasher.update(output.value.to_le_bytes()).write_var_bytes(&output.script_public_key);
}
