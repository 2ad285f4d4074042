//! Canonical transform operations and shape classification
//!
//! Obfuscated operation bodies are never executed. Each definition is
//! classified by structural text match into one of exactly three canonical
//! operations; anything else is a hard error, since guessing at an
//! unrecognized transform would produce a subtly wrong signature that only
//! fails downstream.

use crate::error::CipherError;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// A canonical transform operation.
///
/// Closed set: the upstream generator only ever emits these three shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Invert element order. Call sites always pass a second argument for
    /// uniformity; it is ignored.
    Reverse,
    /// Drop the first `b` elements, keep the rest in order.
    CropFront,
    /// Swap positions `0` and `b % len`.
    RotarySwap,
}

impl Op {
    /// Apply this operation to a character sequence, returning a new one
    pub fn apply(self, sig: &[char], arg: usize) -> Vec<char> {
        match self {
            Op::Reverse => sig.iter().rev().copied().collect(),
            Op::CropFront => sig.get(arg..).unwrap_or_default().to_vec(),
            Op::RotarySwap => {
                if sig.is_empty() {
                    return Vec::new();
                }
                let r = arg % sig.len();
                let mut out = sig.to_vec();
                out.swap(0, r);
                out
            }
        }
    }
}

/// Ordered (body shape, operation) matchers. First match wins; a well-formed
/// definition matches at most one.
const SHAPES: [(&str, Op); 3] = [
    // AJ:function(a){a.reverse()}
    (r"\{\w\.reverse\(\)\}", Op::Reverse),
    // VR:function(a,b){a.splice(0,b)}
    (r"\{\w\.splice\(0,\w\)\}", Op::CropFront),
    // kT:function(a,b){var c=a[0];a[0]=a[b%a.length];a[b]=c}
    (
        r"\{var\s\w=\w\[0\];\w\[0\]=\w\[\w%\w\.length\];\w\[\w\]=\w\}",
        Op::RotarySwap,
    ),
];

/// Classify a single operation function body into a canonical operation
fn classify(func: &str) -> Result<Op> {
    for (pattern, op) in SHAPES {
        if Regex::new(pattern)?.is_match(func) {
            return Ok(op);
        }
    }
    Err(CipherError::UnknownOperationShape(func.to_string()))
}

/// Build the name -> operation lookup table from raw definitions.
///
/// Each definition has the form `name:function(...){body}`. Names are
/// assumed unique within a container.
pub fn resolve_operations(definitions: &[String]) -> Result<HashMap<String, Op>> {
    let mut table = HashMap::with_capacity(definitions.len());
    for def in definitions {
        let (name, func) = def
            .split_once(':')
            .ok_or_else(|| CipherError::UnknownOperationShape(def.clone()))?;
        let op = classify(func)?;
        debug!("resolved operation {} -> {:?}", name, op);
        table.insert(name.to_string(), op);
    }
    Ok(table)
}
