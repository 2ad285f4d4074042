//! # sigcipher - Signature Transform Interpreter
//!
//! Recovers a usable media-access signature from the obfuscated transform
//! recipe embedded in a player script asset. The script is opaque text and
//! is never executed; the recipe is recovered by structural pattern
//! matching:
//!
//! - locate the entry-point function that computes the signature
//! - extract the ordered transform plan it runs
//! - classify the container's obfuscated operation definitions into the
//!   three canonical operations (reverse, crop-front, rotary-swap)
//! - apply the resolved plan to the ciphered character sequence
//!
//! Fetching the script and using the decoded signature belong to the
//! surrounding retrieval layer; this crate takes text in and hands a string
//! back. When the upstream generator's output drifts away from the known
//! shapes, decoding fails loudly rather than guessing.
//!
//! ## Example
//!
//! ```rust
//! use sigcipher::{Cipher, ScriptAsset};
//!
//! let script = ScriptAsset::new(concat!(
//!     "var DE={AJ:function(a){a.reverse()}, ",
//!     "VR:function(a,b){a.splice(0,b)}};\n",
//!     "EE=function(a){a=a.split(\"\");DE.AJ(a,0);DE.VR(a,2);",
//!     "return a.join(\"\")};\n",
//!     "c&&d.set(\"signature\",EE(c));\n",
//! ));
//!
//! let cipher = Cipher::new();
//! let decoded = cipher.decipher_signature(&script, "abcdef")?;
//! assert_eq!(decoded, "dcba");
//! # Ok::<(), sigcipher::CipherError>(())
//! ```

pub mod asset;
pub mod cache;
pub mod cipher;
pub mod error;
pub mod extract;
pub mod ops;

// Re-export main types
pub use asset::ScriptAsset;
pub use cipher::{Cipher, CipherStats};
pub use error::CipherError;
pub use ops::Op;

/// Result type alias for sigcipher operations
pub type Result<T> = std::result::Result<T, CipherError>;
