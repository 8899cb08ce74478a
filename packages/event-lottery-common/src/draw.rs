use sha2::{Digest, Sha256};

/// Derive a 32-byte draw seed from the draw context.
///
/// `seed = sha256( event_id_be || draw_seq_be || time_nanos_be || height_be || sender_bytes )`
///
/// `draw_seq` is the per-event count of draws already held, so two draws for
/// the same event in the same block still produce independent permutations.
pub fn derive_seed(
    event_id: u64,
    draw_seq: u64,
    time_nanos: u64,
    height: u64,
    sender: &str,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(event_id.to_be_bytes());
    hasher.update(draw_seq.to_be_bytes());
    hasher.update(time_nanos.to_be_bytes());
    hasher.update(height.to_be_bytes());
    hasher.update(sender.as_bytes());
    hasher.finalize().into()
}

/// Draw the next u64 from the seed's hash stream.
///
/// Each value is `sha256(seed || counter_be)[0..8]`, so the stream is fully
/// determined by the seed and position.
fn stream_u64(seed: &[u8; 32], counter: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed);
    hasher.update(counter.to_be_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[0..8]);
    u64::from_be_bytes(bytes)
}

/// Fair permutation of the indices `0..len` via Fisher–Yates, driven by the
/// seed's hash stream. Every permutation is (up to the negligible modulo bias
/// of a u64 over small bounds) equally likely, and the result is fully
/// determined by the seed.
pub fn fair_permutation(seed: &[u8; 32], len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut counter: u64 = 0;
    for i in (1..len).rev() {
        let j = (stream_u64(seed, counter) % (i as u64 + 1)) as usize;
        indices.swap(i, j);
        counter += 1;
    }
    indices
}

/// Partition a pool of `len` candidates into `count` winners and the rest
/// losers: shuffle the index space, take the first `count` as winners.
///
/// Pure computation, no side effects. The two returned index sets are
/// disjoint and their union is exactly `0..len`. `count` is capped at `len`;
/// callers are expected to have validated the requested count beforehand.
pub fn draw(seed: &[u8; 32], len: usize, count: usize) -> (Vec<usize>, Vec<usize>) {
    let count = count.min(len);
    let permutation = fair_permutation(seed, len);
    let losers = permutation[count..].to_vec();
    let mut winners = permutation;
    winners.truncate(count);
    (winners, losers)
}
