//! Data-parallel dispatch over independent message slices.
//!
//! A batch is `count` complete AEAD calls laid out in flat buffers: element
//! `i` owns bytes `i * 16..(i + 1) * 16` of the key, nonce and tag buffers
//! and the `i`-th equal-width slice of the message and associated-data
//! buffers. Elements share nothing, so the dispatch maps onto a
//! work-stealing thread pool without any ordering or cross-slice
//! visibility; a sequential loop would produce identical output.

use crate::error::{Error, Result};
use crate::utils::array16;
use crate::{core, KEY_LEN, NONCE_LEN, TAG_LEN};
use alloc::vec::Vec;
use rayon::prelude::*;

/// Per-element slice widths of a validated batch layout.
struct Layout {
    msg_len: usize,
    aad_len: usize,
}

/// Check that the flat buffers split evenly into `count` elements.
fn validate_layout(
    keys: &[u8],
    nonces: &[u8],
    msgs_len: usize,
    aads_len: usize,
    count: usize,
) -> Result<Layout> {
    if keys.len() != count * KEY_LEN || nonces.len() != count * NONCE_LEN {
        return Err(Error::BatchLengthMismatch);
    }

    if count == 0 {
        if msgs_len != 0 || aads_len != 0 {
            return Err(Error::BatchLengthMismatch);
        }
        return Ok(Layout {
            msg_len: 0,
            aad_len: 0,
        });
    }

    if msgs_len % count != 0 || aads_len % count != 0 {
        return Err(Error::BatchLengthMismatch);
    }

    Ok(Layout {
        msg_len: msgs_len / count,
        aad_len: aads_len / count,
    })
}

/// Encrypt `count` independent messages.
///
/// Each element is one scalar [`crate::encrypt`] call; outputs are returned
/// as the concatenated ciphertexts (same width per element as the
/// plaintexts) and one 16-byte tag per element. `count` may be zero.
///
/// # Errors
///
/// Returns [`Error::BatchLengthMismatch`] when the buffers do not split into
/// `count` equal-width slices, and propagates per-call length errors.
pub fn batch_encrypt(
    keys: &[u8],
    nonces: &[u8],
    plaintexts: &[u8],
    aads: &[u8],
    count: usize,
) -> Result<(Vec<u8>, Vec<[u8; TAG_LEN]>)> {
    let layout = validate_layout(keys, nonces, plaintexts.len(), aads.len(), count)?;

    let results: Vec<(Vec<u8>, [u8; TAG_LEN])> = (0..count)
        .into_par_iter()
        .map(|i| {
            let key = array16(&keys[i * KEY_LEN..(i + 1) * KEY_LEN]);
            let nonce = array16(&nonces[i * NONCE_LEN..(i + 1) * NONCE_LEN]);
            let plaintext = &plaintexts[i * layout.msg_len..(i + 1) * layout.msg_len];
            let aad = &aads[i * layout.aad_len..(i + 1) * layout.aad_len];
            core::encrypt(plaintext, aad, &key, &nonce)
        })
        .collect::<Result<_>>()?;

    let mut ciphertexts = Vec::with_capacity(plaintexts.len());
    let mut tags = Vec::with_capacity(count);
    for (ciphertext, tag) in results {
        ciphertexts.extend_from_slice(&ciphertext);
        tags.push(tag);
    }
    Ok((ciphertexts, tags))
}

/// Decrypt `count` independent messages.
///
/// Returns the concatenated recovered plaintexts and one verification flag
/// per element. A failed element keeps `ok[i] = false` and contributes a
/// zeroed slice; there is no cross-element failure propagation. Callers MUST
/// ignore the plaintext slice of any element whose flag is false.
pub fn batch_decrypt(
    keys: &[u8],
    nonces: &[u8],
    tags: &[u8],
    ciphertexts: &[u8],
    aads: &[u8],
    count: usize,
) -> Result<(Vec<u8>, Vec<bool>)> {
    if tags.len() != count * TAG_LEN {
        return Err(Error::BatchLengthMismatch);
    }
    let layout = validate_layout(keys, nonces, ciphertexts.len(), aads.len(), count)?;

    let results: Vec<(Vec<u8>, bool)> = (0..count)
        .into_par_iter()
        .map(|i| {
            let key = array16(&keys[i * KEY_LEN..(i + 1) * KEY_LEN]);
            let nonce = array16(&nonces[i * NONCE_LEN..(i + 1) * NONCE_LEN]);
            let tag = array16(&tags[i * TAG_LEN..(i + 1) * TAG_LEN]);
            let ciphertext = &ciphertexts[i * layout.msg_len..(i + 1) * layout.msg_len];
            let aad = &aads[i * layout.aad_len..(i + 1) * layout.aad_len];
            match core::decrypt(ciphertext, &tag, aad, &key, &nonce) {
                Ok(plaintext) => (plaintext, true),
                Err(_) => (alloc::vec![0u8; layout.msg_len], false),
            }
        })
        .collect();

    let mut plaintexts = Vec::with_capacity(ciphertexts.len());
    let mut flags = Vec::with_capacity(count);
    for (plaintext, ok) in results {
        plaintexts.extend_from_slice(&plaintext);
        flags.push(ok);
    }
    Ok((plaintexts, flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decrypt, encrypt};

    fn build_batch(count: usize, msg_len: usize, aad_len: usize) -> (Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>) {
        let mut keys = Vec::new();
        let mut nonces = Vec::new();
        let mut msgs = Vec::new();
        let mut aads = Vec::new();
        for i in 0..count {
            keys.extend((0..KEY_LEN).map(|j| (i * 31 + j) as u8));
            nonces.extend((0..NONCE_LEN).map(|j| (i * 17 + j) as u8 ^ 0xa5));
            msgs.extend((0..msg_len).map(|j| (i + j) as u8));
            aads.extend((0..aad_len).map(|j| (i * 3 + j) as u8));
        }
        (keys, nonces, msgs, aads)
    }

    #[test]
    fn test_batch_matches_scalar() {
        let count = 5;
        let (keys, nonces, msgs, aads) = build_batch(count, 23, 9);

        let (encs, tags) = batch_encrypt(&keys, &nonces, &msgs, &aads, count).unwrap();
        assert_eq!(encs.len(), msgs.len());
        assert_eq!(tags.len(), count);

        for i in 0..count {
            let key = array16(&keys[i * KEY_LEN..(i + 1) * KEY_LEN]);
            let nonce = array16(&nonces[i * NONCE_LEN..(i + 1) * NONCE_LEN]);
            let (ciphertext, tag) =
                encrypt(&msgs[i * 23..(i + 1) * 23], &aads[i * 9..(i + 1) * 9], &key, &nonce)
                    .unwrap();
            assert_eq!(&encs[i * 23..(i + 1) * 23], &ciphertext[..]);
            assert_eq!(tags[i], tag);
        }
    }

    #[test]
    fn test_batch_roundtrip() {
        let count = 4;
        let (keys, nonces, msgs, aads) = build_batch(count, 32, 0);

        let (encs, tags) = batch_encrypt(&keys, &nonces, &msgs, &aads, count).unwrap();
        let flat_tags: Vec<u8> = tags.iter().flatten().copied().collect();

        let (decs, flags) =
            batch_decrypt(&keys, &nonces, &flat_tags, &encs, &aads, count).unwrap();
        assert_eq!(decs, msgs);
        assert!(flags.iter().all(|&ok| ok));
    }

    #[test]
    fn test_batch_per_element_failure() {
        let count = 3;
        let (keys, nonces, msgs, aads) = build_batch(count, 16, 4);

        let (encs, tags) = batch_encrypt(&keys, &nonces, &msgs, &aads, count).unwrap();
        let mut flat_tags: Vec<u8> = tags.iter().flatten().copied().collect();
        flat_tags[TAG_LEN] ^= 1; // corrupt element 1 only

        let (decs, flags) =
            batch_decrypt(&keys, &nonces, &flat_tags, &encs, &aads, count).unwrap();
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(&decs[..16], &msgs[..16]);
        assert_eq!(&decs[16..32], &[0u8; 16]); // failed slice is zeroed
        assert_eq!(&decs[32..], &msgs[32..]);
    }

    #[test]
    fn test_empty_batch() {
        let (encs, tags) = batch_encrypt(&[], &[], &[], &[], 0).unwrap();
        assert!(encs.is_empty());
        assert!(tags.is_empty());

        let (decs, flags) = batch_decrypt(&[], &[], &[], &[], &[], 0).unwrap();
        assert!(decs.is_empty());
        assert!(flags.is_empty());
    }

    #[test]
    fn test_batch_layout_mismatch() {
        let (keys, nonces, msgs, aads) = build_batch(2, 8, 0);

        // key buffer short by one element
        assert_eq!(
            batch_encrypt(&keys[..KEY_LEN], &nonces, &msgs, &aads, 2),
            Err(Error::BatchLengthMismatch)
        );
        // message bytes not divisible by count
        assert_eq!(
            batch_encrypt(&keys, &nonces, &msgs[..15], &aads, 2),
            Err(Error::BatchLengthMismatch)
        );
        // tag buffer mis-sized for decrypt
        assert_eq!(
            batch_decrypt(&keys, &nonces, &[0u8; 16], &msgs, &aads, 2),
            Err(Error::BatchLengthMismatch)
        );
        // non-empty payload with an empty batch
        assert_eq!(
            batch_encrypt(&[], &[], &[1u8], &[], 0),
            Err(Error::BatchLengthMismatch)
        );
    }

    #[test]
    fn test_batch_scalar_interop() {
        // a batch element decrypts with the scalar API and vice versa
        let (keys, nonces, msgs, aads) = build_batch(1, 40, 12);
        let (encs, tags) = batch_encrypt(&keys, &nonces, &msgs, &aads, 1).unwrap();

        let key = array16(&keys);
        let nonce = array16(&nonces);
        let plaintext = decrypt(&encs, &tags[0], &aads, &key, &nonce).unwrap();
        assert_eq!(plaintext, msgs);
    }
}
