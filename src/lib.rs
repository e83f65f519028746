//! # Acorn-128 - Lightweight Authenticated Encryption
//!
//! This crate provides an implementation of the Acorn-128 v3 authenticated
//! cipher with associated data (AEAD), a finalist of the CAESAR competition
//! for lightweight applications.
//!
//! Acorn-128 is a bit-oriented stream cipher built from seven interlocked
//! linear feedback shift registers totalling 293 bits. This implementation
//! keeps the register packed in seven words and retires 32 state bits per
//! update (8 for message tails), which is bit-exactly equivalent to the
//! single-bit reference recurrence.
//!
//! ## Features
//!
//! - **Single-shot AEAD**: 128-bit keys, nonces and tags, associated data of
//!   any length, messages of any length including empty
//! - **Constant-time**: no secret-dependent branches in the cipher core, tag
//!   comparison without early exit
//! - **Secret hygiene**: register state is zeroized on drop, recovered
//!   plaintext is zeroized before an authentication-failure return
//! - **Batch mode**: data-parallel encryption and decryption of independent
//!   message slices (`std` builds)
//! - **No-std compatible**: the scalar API needs only `alloc`
//!
//! ## Usage
//!
//! ```rust
//! use acorn128::{encrypt, decrypt};
//!
//! let key = [0u8; 16];      // 128-bit key
//! let nonce = [0u8; 16];    // 128-bit nonce
//! let plaintext = b"Hello, world!";
//! let aad = b"additional data";
//!
//! // Encrypt
//! let (ciphertext, tag) = encrypt(plaintext, aad, &key, &nonce)?;
//!
//! // Decrypt
//! let decrypted = decrypt(&ciphertext, &tag, aad, &key, &nonce)?;
//! assert_eq!(decrypted, plaintext);
//! # Ok::<(), acorn128::Error>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(feature = "std")]
mod batch;
#[cfg(test)]
mod bitwise;
mod core;
mod error;
mod utils;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};

#[cfg(feature = "std")]
pub use batch::{batch_decrypt, batch_encrypt};

use alloc::vec::Vec;

/// Length in bytes of an Acorn-128 key.
pub const KEY_LEN: usize = 16;

/// Length in bytes of an Acorn-128 nonce.
pub const NONCE_LEN: usize = 16;

/// Length in bytes of an Acorn-128 authentication tag.
pub const TAG_LEN: usize = 16;

/// Encrypts plaintext with associated data using Acorn-128.
///
/// # Arguments
///
/// * `plaintext` - The data to encrypt
/// * `aad` - Additional authenticated data (not encrypted, but authenticated)
/// * `key` - 128-bit encryption key
/// * `nonce` - 128-bit nonce (must be unique for each encryption with the same key)
///
/// # Returns
///
/// A tuple of (ciphertext, authentication_tag) on success, or an error. The
/// ciphertext has exactly the length of the plaintext.
///
/// # Security
///
/// - The nonce MUST NOT be reused with the same key; reuse destroys both
///   confidentiality and authenticity and the library cannot detect it
/// - The key MUST be randomly chosen from a uniform distribution
///
/// # Example
///
/// ```rust
/// use acorn128::encrypt;
///
/// let key = [0u8; 16];
/// let nonce = [0u8; 16];
/// let plaintext = b"secret message";
/// let aad = b"public header";
///
/// let (ciphertext, tag) = encrypt(plaintext, aad, &key, &nonce)?;
/// # Ok::<(), acorn128::Error>(())
/// ```
pub fn encrypt(
    plaintext: &[u8],
    aad: &[u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<(Vec<u8>, [u8; TAG_LEN])> {
    core::encrypt(plaintext, aad, key, nonce)
}

/// Decrypts ciphertext and verifies the authentication tag.
///
/// # Arguments
///
/// * `ciphertext` - The encrypted data
/// * `tag` - 128-bit authentication tag
/// * `aad` - Additional authenticated data (must match encryption)
/// * `key` - 128-bit encryption key (must match encryption)
/// * `nonce` - 128-bit nonce (must match encryption)
///
/// # Returns
///
/// The decrypted plaintext on success, or [`Error::AuthenticationFailed`] if
/// the tag does not match. An authentication failure is an ordinary return
/// value, not a fault; the partially recovered plaintext is wiped before the
/// error is returned.
///
/// # Security
///
/// - If tag verification fails, no plaintext data is returned
/// - Tag comparison is performed in constant time
///
/// # Example
///
/// ```rust
/// use acorn128::{encrypt, decrypt};
///
/// let key = [0u8; 16];
/// let nonce = [0u8; 16];
/// let plaintext = b"secret message";
/// let aad = b"public header";
///
/// let (ciphertext, tag) = encrypt(plaintext, aad, &key, &nonce)?;
/// let decrypted = decrypt(&ciphertext, &tag, aad, &key, &nonce)?;
///
/// assert_eq!(decrypted, plaintext);
/// # Ok::<(), acorn128::Error>(())
/// ```
pub fn decrypt(
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
    aad: &[u8],
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<Vec<u8>> {
    core::decrypt(ciphertext, tag, aad, key, nonce)
}
