//! Public-input vector for batch proofs.
//!
//! The verifier circuit consumes one `(hash, x, y)` triple per signature, laid out
//! as `[hash_0, x_0, y_0, hash_1, x_1, y_1, ...]`. Any other order makes every
//! honest proof fail, so this layout is fixed.

use zkbatch_primitives::FieldElement;

/// Number of public inputs contributed by each signature.
pub const INPUTS_PER_SIGNATURE: usize = 3;

/// Builds the ordered public-input vector for a batch.
///
/// The three slices must have equal length; callers check this before building.
pub fn build_public_inputs(
    message_hashes: &[FieldElement],
    public_keys_x: &[FieldElement],
    public_keys_y: &[FieldElement],
) -> Vec<FieldElement> {
    debug_assert_eq!(message_hashes.len(), public_keys_x.len());
    debug_assert_eq!(message_hashes.len(), public_keys_y.len());

    let mut inputs = Vec::with_capacity(message_hashes.len() * INPUTS_PER_SIGNATURE);
    for ((hash, x), y) in message_hashes
        .iter()
        .zip(public_keys_x)
        .zip(public_keys_y)
    {
        inputs.extend_from_slice(&[*hash, *x, *y]);
    }
    inputs
}
