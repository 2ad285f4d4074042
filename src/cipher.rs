//! Top-level signature deciphering pipeline

use crate::asset::ScriptAsset;
use crate::cache::MemoCache;
use crate::error::CipherError;
use crate::extract::{extract_operations, extract_plan, locate_entry_point, parse_call};
use crate::ops::{resolve_operations, Op};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Signature decipherer.
///
/// Stateless apart from its memoization caches: the operation table is built
/// once per (script, container) and the full decode result once per
/// (script, ciphered input). Shareable across threads via `&self`.
pub struct Cipher {
    table_cache: MemoCache<String, Arc<HashMap<String, Op>>>,
    signature_cache: MemoCache<String, String>,
    table_builds: AtomicUsize,
}

/// Cache usage counters, mainly useful in tests and diagnostics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherStats {
    /// Times an operation table was actually extracted and resolved
    pub table_builds: usize,
    /// Distinct operation tables currently cached
    pub table_entries: u64,
    /// Distinct decoded signatures currently cached
    pub signature_entries: u64,
}

impl Cipher {
    /// Create a new cipher instance
    pub fn new() -> Self {
        Self {
            table_cache: MemoCache::new(Duration::from_secs(3600)),
            signature_cache: MemoCache::new(Duration::from_secs(3600)),
            table_builds: AtomicUsize::new(0),
        }
    }

    /// Decipher a signature using the transform recipe embedded in `script`.
    ///
    /// Repeated calls with an identical script and ciphered input are served
    /// from cache.
    pub fn decipher_signature(&self, script: &ScriptAsset, ciphered: &str) -> Result<String> {
        let sig_key = format!("{:016x}:{}", script.fingerprint(), ciphered);
        if let Some(cached) = self.signature_cache.get(&sig_key) {
            debug!("signature cache hit");
            return Ok(cached);
        }

        let entry = locate_entry_point(script.text())?;
        let plan = extract_plan(script.text(), &entry)?;

        // Every call in the plan shares one container; take it from the first.
        let container = plan[0]
            .split_once('.')
            .map(|(var, _)| var.to_string())
            .ok_or_else(|| CipherError::MalformedCall(plan[0].clone()))?;
        debug!("entry {} container {}", entry, container);

        let table = self.transform_table(script, &container)?;

        let mut signature: Vec<char> = ciphered.chars().collect();
        for call in &plan {
            let (name, arg) = parse_call(call)?;
            let op = table
                .get(&name)
                .copied()
                .ok_or_else(|| CipherError::UnknownOperationName(name.clone()))?;
            signature = op.apply(&signature, arg);
            debug!(
                "applied {:?}({}) via {} -> {}",
                op,
                arg,
                name,
                signature.iter().collect::<String>()
            );
        }

        let decoded: String = signature.into_iter().collect();
        self.signature_cache.insert(sig_key, decoded.clone());
        Ok(decoded)
    }

    /// Operation table for (script, container), built on first use
    fn transform_table(
        &self,
        script: &ScriptAsset,
        container: &str,
    ) -> Result<Arc<HashMap<String, Op>>> {
        let key = format!("{:016x}:{}", script.fingerprint(), container);
        self.table_cache.get_or_try_insert_with(key, || {
            self.table_builds.fetch_add(1, Ordering::Relaxed);
            let definitions = extract_operations(script.text(), container)?;
            let table = resolve_operations(&definitions)?;
            debug!("built operation table with {} entries", table.len());
            Ok(Arc::new(table))
        })
    }

    /// Cache usage counters
    pub fn stats(&self) -> CipherStats {
        CipherStats {
            table_builds: self.table_builds.load(Ordering::Relaxed),
            table_entries: self.table_cache.entry_count(),
            signature_entries: self.signature_cache.entry_count(),
        }
    }
}

impl Default for Cipher {
    fn default() -> Self {
        Self::new()
    }
}
