//! Merkle eligibility gate.
//!
//! Leaves commit to `(wallet, marker)` where the marker is the tier index for
//! Merkle-gated rounds or `IBO_WHITELIST_MARKER` for the IBO whitelist window.
//! Inner nodes hash the sorted pair, so a proof is just the list of siblings.

use anchor_lang::prelude::Pubkey;
use bytemuck::{Pod, Zeroable};

pub type Hash32 = [u8; 32];

/// Byte layout hashed into a leaf (40 bytes, no padding).
#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct LeafPreimage {
    wallet: [u8; 32],
    marker: [u8; 8],
}

pub fn leaf_hash(wallet: &Pubkey, marker: u64) -> Hash32 {
    let preimage = LeafPreimage {
        wallet: wallet.to_bytes(),
        marker: marker.to_le_bytes(),
    };
    *blake3::hash(bytemuck::bytes_of(&preimage)).as_bytes()
}

pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = blake3::Hasher::new();
    hasher.update(lo);
    hasher.update(hi);
    *hasher.finalize().as_bytes()
}

/// Folds `proof` over `leaf` and compares against `root`.
///
/// An all-zero root never verifies, so an unconfigured tier rejects everyone.
pub fn verify(proof: &[Hash32], root: &Hash32, leaf: Hash32) -> bool {
    if *root == [0u8; 32] {
        return false;
    }
    let computed = proof
        .iter()
        .fold(leaf, |current, sibling| hash_pair(&current, sibling));
    computed == *root
}

pub fn verify_wallet(proof: &[Hash32], root: &Hash32, wallet: &Pubkey, marker: u64) -> bool {
    verify(proof, root, leaf_hash(wallet, marker))
}


#[cfg(test)]
mod tests {
    use super::test_tree::build;
    use super::*;
    use crate::test_utils::key;

    fn wallets(n: u8) -> Vec<Pubkey> {
        (1..=n).map(key).collect()
    }

    #[test]
    fn every_member_verifies() {
        let ws = wallets(7);
        let entries: Vec<_> = ws.iter().enumerate().map(|(i, w)| (*w, (i % 3) as u64)).collect();
        let (root, proofs) = build(&entries);
        for ((wallet, marker), proof) in entries.iter().zip(proofs.iter()) {
            assert!(verify_wallet(proof, &root, wallet, *marker));
        }
    }

    #[test]
    fn wrong_marker_or_wallet_fails() {
        let ws = wallets(4);
        let entries: Vec<_> = ws.iter().map(|w| (*w, 1u64)).collect();
        let (root, proofs) = build(&entries);
        assert!(!verify_wallet(&proofs[0], &root, &ws[0], 2));
        assert!(!verify_wallet(&proofs[0], &root, &key(200), 1));
        assert!(!verify_wallet(&proofs[0], &root, &ws[1], 1));
    }

    #[test]
    fn single_leaf_tree_needs_empty_proof() {
        let w = key(9);
        let (root, proofs) = build(&[(w, 0)]);
        assert!(proofs[0].is_empty());
        assert!(verify_wallet(&[], &root, &w, 0));
    }

    #[test]
    fn zero_root_rejects() {
        let w = key(9);
        assert!(!verify(&[], &[0u8; 32], leaf_hash(&w, 0)));
    }

    #[test]
    fn tampered_sibling_fails() {
        let ws = wallets(5);
        let entries: Vec<_> = ws.iter().map(|w| (*w, 0u64)).collect();
        let (root, mut proofs) = build(&entries);
        proofs[2][0][0] ^= 0x01;
        assert!(!verify_wallet(&proofs[2], &root, &ws[2], 0));
    }
}
