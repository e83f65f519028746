//! Core Acorn-128 state machine and AEAD orchestration.
//!
//! The 293-bit register is packed into seven `u64` words, one per LFSR
//! segment, oldest bits lowest. The segment lengths (61, 46, 47, 39, 37, 59
//! and 4 bits) put every keystream and feedback tap at a fixed offset inside
//! one word, so a bulk update can retire 32 (or 8) register bits per call
//! while staying bit-exact with the single-bit recurrence.

use crate::error::{Error, Result};
use crate::utils::{self, ch, ct_eq, le32, maj};
use alloc::vec::Vec;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bit lengths of the seven LFSR segments, oldest first.
#[cfg(test)]
pub(crate) const SEGMENT_BITS: [usize; 7] = [61, 46, 47, 39, 37, 59, 4];

/// Lane mask for the 32-bit bulk update.
const LANES32: u64 = 0xffff_ffff;
/// Lane mask for the 8-bit bulk update.
const LANES8: u64 = 0xff;

/// Control bits broadcast across all 32 lanes.
const CA_ON: u32 = u32::MAX;
const CB_ON: u32 = u32::MAX;

/// Tap words captured before the in-place segment mixing.
///
/// The keystream and feedback functions read `s[244]`, `s[235]`, `s[196]`,
/// `s[160]`, `s[111]` and `s[66]` from the state as it was at the start of
/// the step; the mixing below rewrites the words those taps live in, so the
/// shifted copies are taken first. `s[23]` and `s[12]` sit in word 0, which
/// the mixing never writes, and are captured alongside for symmetry.
struct Taps {
    w244: u64,
    w235: u64,
    w196: u64,
    w160: u64,
    w111: u64,
    w66: u64,
    w23: u64,
    w12: u64,
}

/// The packed 293-bit Acorn register.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct AcornState {
    words: [u64; 7],
}

impl AcornState {
    /// Create a new zero-initialized register.
    pub(crate) fn new() -> Self {
        Self { words: [0u64; 7] }
    }

    #[inline]
    fn capture(&self) -> Taps {
        let w = &self.words;
        Taps {
            w244: w[5] >> 14,
            w235: w[5] >> 5,
            w196: w[4] >> 3,
            w160: w[3] >> 6,
            w111: w[2] >> 4,
            w66: w[1] >> 5,
            w23: w[0] >> 23,
            w12: w[0] >> 12,
        }
    }

    /// The six intra-register tap XORs, over `mask` lanes at once.
    #[inline]
    fn mix(&mut self, taps: &Taps, mask: u64) {
        let w = &mut self.words;
        w[6] ^= (w[5] ^ taps.w235) & mask;
        w[5] ^= (w[4] ^ taps.w196) & mask;
        w[4] ^= (w[3] ^ taps.w160) & mask;
        w[3] ^= (w[2] ^ taps.w111) & mask;
        w[2] ^= (w[1] ^ taps.w66) & mask;
        w[1] ^= (w[0] ^ taps.w23) & mask;
    }

    /// Keystream word: `ks = s[12] ^ s[154] ^ maj(s[235], s[61], s[193])
    /// ^ ch(s[230], s[111], s[66])`.
    ///
    /// The mixed taps (`s[154]`, `s[61]`, `s[193]`, `s[230]`) read the words
    /// rewritten by `mix`; the rest come from the captured copies.
    #[inline]
    fn keystream(&self, taps: &Taps) -> u64 {
        let w = &self.words;
        taps.w12 ^ w[3] ^ maj(taps.w235, w[1], w[4]) ^ ch(w[5], taps.w111, taps.w66)
    }

    /// Feedback word: `fb = s[0] ^ !s[107] ^ maj(s[244], s[23], s[160])
    /// ^ (ca & s[196]) ^ (cb & ks)`.
    #[inline]
    fn feedback(&self, taps: &Taps, ca: u64, cb: u64, ks: u64) -> u64 {
        let w = &self.words;
        w[0] ^ !w[2] ^ maj(taps.w244, taps.w23, taps.w160) ^ (ca & taps.w196) ^ (cb & ks)
    }

    /// Retire 32 bits: drop each word's low 32 bits and pull the successor
    /// segment down. The shift counts are the segment lengths minus 32.
    #[inline]
    fn shift32(&mut self) {
        let w = &mut self.words;
        w[0] = (w[0] >> 32) | ((w[1] & LANES32) << 29);
        w[1] = (w[1] >> 32) | ((w[2] & LANES32) << 14);
        w[2] = (w[2] >> 32) | ((w[3] & LANES32) << 15);
        w[3] = (w[3] >> 32) | ((w[4] & LANES32) << 7);
        w[4] = (w[4] >> 32) | ((w[5] & LANES32) << 5);
        w[5] = (w[5] >> 32) | ((w[6] & LANES32) << 27);
        w[6] >>= 32;
    }

    /// Retire 8 bits; shift counts are the segment lengths minus 8.
    #[inline]
    fn shift8(&mut self) {
        let w = &mut self.words;
        w[0] = (w[0] >> 8) | ((w[1] & LANES8) << 53);
        w[1] = (w[1] >> 8) | ((w[2] & LANES8) << 38);
        w[2] = (w[2] >> 8) | ((w[3] & LANES8) << 39);
        w[3] = (w[3] >> 8) | ((w[4] & LANES8) << 31);
        w[4] = (w[4] >> 8) | ((w[5] & LANES8) << 29);
        w[5] = (w[5] >> 8) | ((w[6] & LANES8) << 51);
        w[6] >>= 8;
    }

    /// Advance the register by 32 bits, absorbing message word `m`.
    ///
    /// Equivalent to 32 single-bit steps with the bits of `m` taken low to
    /// high; the caller must keep `(ca, cb)` constant across the word.
    /// Returns the 32 keystream bits.
    #[inline]
    pub(crate) fn update32(&mut self, m: u32, ca: u32, cb: u32) -> u32 {
        let taps = self.capture();
        self.mix(&taps, LANES32);
        let ks = self.keystream(&taps) as u32;
        let fb = self.feedback(&taps, u64::from(ca), u64::from(cb), u64::from(ks)) as u32;
        self.words[6] ^= u64::from(fb ^ m) << 4;
        self.shift32();
        ks
    }

    /// Decrypt-form 32-bit step: recover the plaintext word from ciphertext
    /// word `c` and feed the plaintext, not the ciphertext, back into the
    /// register. Returns the recovered plaintext word.
    #[inline]
    fn update32_dec(&mut self, c: u32, ca: u32, cb: u32) -> u32 {
        let taps = self.capture();
        self.mix(&taps, LANES32);
        let ks = self.keystream(&taps) as u32;
        let recovered = c ^ ks;
        let fb = self.feedback(&taps, u64::from(ca), u64::from(cb), u64::from(ks)) as u32;
        self.words[6] ^= u64::from(fb ^ recovered) << 4;
        self.shift32();
        recovered
    }

    /// Advance the register by 8 bits; the byte-granular form of `update32`,
    /// used for message tails shorter than one word.
    #[inline]
    pub(crate) fn update8(&mut self, m: u8, ca: u8, cb: u8) -> u8 {
        let taps = self.capture();
        self.mix(&taps, LANES8);
        let ks = self.keystream(&taps) as u8;
        let fb = self.feedback(&taps, u64::from(ca), u64::from(cb), u64::from(ks)) as u8;
        self.words[6] ^= u64::from(fb ^ m) << 4;
        self.shift8();
        ks
    }

    /// Decrypt-form 8-bit step.
    #[inline]
    fn update8_dec(&mut self, c: u8, ca: u8, cb: u8) -> u8 {
        let taps = self.capture();
        self.mix(&taps, LANES8);
        let ks = self.keystream(&taps) as u8;
        let recovered = c ^ ks;
        let fb = self.feedback(&taps, u64::from(ca), u64::from(cb), u64::from(ks)) as u8;
        self.words[6] ^= u64::from(fb ^ recovered) << 4;
        self.shift8();
        recovered
    }

    /// Load key and nonce into the register: 128 key bits, 128 nonce bits,
    /// then 1536 further key bits read cyclically with the very first of
    /// them complemented. 1792 steps in total, all with both control bits
    /// set.
    pub(crate) fn init(&mut self, key: &[u8; 16], nonce: &[u8; 16]) {
        let kw = [
            le32(&key[..4]),
            le32(&key[4..8]),
            le32(&key[8..12]),
            le32(&key[12..]),
        ];

        for word in kw {
            self.update32(word, CA_ON, CB_ON);
        }
        for chunk in nonce.chunks_exact(4) {
            self.update32(le32(chunk), CA_ON, CB_ON);
        }

        self.update32(kw[0] ^ 1, CA_ON, CB_ON);
        for i in 1..48 {
            self.update32(kw[i & 3], CA_ON, CB_ON);
        }
    }

    /// The 256-bit phase separator: a lone `1` bit, 127 zeros with `ca` on,
    /// then 128 zeros with `ca` off. `cb` is on for the associated-data
    /// phase and off for the payload phase.
    fn absorb_separator(&mut self, cb: u32) {
        self.update32(1, CA_ON, cb);
        for _ in 0..3 {
            self.update32(0, CA_ON, cb);
        }
        for _ in 0..4 {
            self.update32(0, 0, cb);
        }
    }

    /// Absorb associated data and the trailing domain separator.
    pub(crate) fn absorb_aad(&mut self, aad: &[u8]) {
        let mut chunks = aad.chunks_exact(4);
        for chunk in chunks.by_ref() {
            self.update32(le32(chunk), CA_ON, CB_ON);
        }
        for &byte in chunks.remainder() {
            self.update8(byte, u8::MAX, u8::MAX);
        }

        self.absorb_separator(CB_ON);
    }

    /// Encrypt the payload, absorbing plaintext and emitting ciphertext,
    /// then close the phase with its separator.
    pub(crate) fn seal(&mut self, plaintext: &[u8]) -> Vec<u8> {
        let mut ciphertext = Vec::with_capacity(plaintext.len());

        let mut chunks = plaintext.chunks_exact(4);
        for chunk in chunks.by_ref() {
            let m = le32(chunk);
            let ks = self.update32(m, CA_ON, 0);
            ciphertext.extend_from_slice(&(m ^ ks).to_le_bytes());
        }
        for &byte in chunks.remainder() {
            let ks = self.update8(byte, u8::MAX, 0);
            ciphertext.push(byte ^ ks);
        }

        self.absorb_separator(0);
        ciphertext
    }

    /// Decrypt the payload with the decrypt-form steps, then close the phase
    /// with the same separator as `seal` (the separator bits are public
    /// constants, so the encrypt form absorbs them in both directions).
    pub(crate) fn open(&mut self, ciphertext: &[u8]) -> Vec<u8> {
        let mut plaintext = Vec::with_capacity(ciphertext.len());

        let mut chunks = ciphertext.chunks_exact(4);
        for chunk in chunks.by_ref() {
            let recovered = self.update32_dec(le32(chunk), CA_ON, 0);
            plaintext.extend_from_slice(&recovered.to_le_bytes());
        }
        for &byte in chunks.remainder() {
            plaintext.push(self.update8_dec(byte, u8::MAX, 0));
        }

        self.absorb_separator(0);
        plaintext
    }

    /// Run the 768 finalization steps and return the authentication tag,
    /// packed from the last 128 keystream bits.
    pub(crate) fn finalize(&mut self) -> [u8; 16] {
        for _ in 0..20 {
            self.update32(0, CA_ON, CB_ON);
        }

        let mut tag = [0u8; 16];
        for chunk in tag.chunks_exact_mut(4) {
            let ks = self.update32(0, CA_ON, CB_ON);
            chunk.copy_from_slice(&ks.to_le_bytes());
        }
        tag
    }

    /// Read one logical register bit by its index in the 293-bit view.
    #[cfg(test)]
    pub(crate) fn bit(&self, index: usize) -> u64 {
        let mut base = 0;
        for (word, len) in self.words.iter().zip(SEGMENT_BITS) {
            if index < base + len {
                return (word >> (index - base)) & 1;
            }
            base += len;
        }
        panic!("register bit index {index} out of range");
    }
}

/// Encrypt plaintext with associated data using Acorn-128.
pub(crate) fn encrypt(
    plaintext: &[u8],
    aad: &[u8],
    key: &[u8; 16],
    nonce: &[u8; 16],
) -> Result<(Vec<u8>, [u8; 16])> {
    utils::validate_lengths(plaintext.len(), aad.len())?;

    let mut state = AcornState::new();
    state.init(key, nonce);
    state.absorb_aad(aad);
    let ciphertext = state.seal(plaintext);
    let tag = state.finalize();

    Ok((ciphertext, tag))
}

/// Decrypt ciphertext and verify the authentication tag.
pub(crate) fn decrypt(
    ciphertext: &[u8],
    tag: &[u8; 16],
    aad: &[u8],
    key: &[u8; 16],
    nonce: &[u8; 16],
) -> Result<Vec<u8>> {
    utils::validate_lengths(ciphertext.len(), aad.len())?;

    let mut state = AcornState::new();
    state.init(key, nonce);
    state.absorb_aad(aad);
    let mut plaintext = state.open(ciphertext);
    let expected = state.finalize();

    if !ct_eq(tag, &expected) {
        plaintext.zeroize();
        return Err(Error::AuthenticationFailed);
    }

    Ok(plaintext)
}
