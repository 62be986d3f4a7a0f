//! Stable object identifiers for function signatures.
//!
//! Catalog clients (the `pg_proc` compatibility layer) address functions by a
//! small integer. The identifier is a deterministic structural hash of the
//! signature, so it survives restarts and only changes when the signature
//! does.
//!
//! # Hash (version 1)
//!
//! 32-bit FNV-1a over the UTF-8 key
//!
//! ```text
//! proc:<schema.>name(<arg>,<arg>,...)
//! ```
//!
//! The return type and kind are not part of the key. Changing the key layout
//! or the hash function requires bumping `OID_HASH_VERSION`.

use std::fmt::Write;

use crate::Signature;

/// Version of the key layout and hash function.
pub const OID_HASH_VERSION: u32 = 1;

/// FNV-1a offset basis (32-bit).
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
/// FNV-1a prime (32-bit).
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash key of a signature.
pub fn oid_key(signature: &Signature) -> String {
    let mut key = String::from("proc:");
    // Writing into a String cannot fail.
    let _ = write!(key, "{}(", signature.name());
    for (i, arg) in signature.argument_types().iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        let _ = write!(key, "{arg}");
    }
    key.push(')');
    key
}

/// Object identifier of a signature.
pub fn function_oid(signature: &Signature) -> i32 {
    let hash = fnv1a_32(oid_key(signature).as_bytes());
    i32::from_ne_bytes(hash.to_ne_bytes())
}

fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}
