//! Structural extraction of the transform recipe from script text
//!
//! The script asset is opaque text with no formal grammar; the only contract
//! is "whatever the upstream generator happens to emit". Each extractor
//! matches one fixed structural pattern and fails hard when it is absent,
//! which signals format drift to the caller.

use crate::error::CipherError;
use crate::Result;
use regex::Regex;
use tracing::debug;

/// Find the name of the top-level function that computes the signature.
///
/// The marker is the assignment of the computed signature to the output
/// parameter, e.g. `c&&d.set("signature",EE(c));` yields `EE`.
pub fn locate_entry_point(js: &str) -> Result<String> {
    let pattern = Regex::new(r#""signature",\s?([a-zA-Z0-9$]+)\("#)?;
    debug!("locating entry point");

    pattern
        .captures(js)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(CipherError::PatternNotFound("entry_point"))
}

/// Extract the ordered transform plan from the entry function body.
///
/// The body has a fixed two-statement wrapper: one housekeeping assignment,
/// the semicolon-separated call sequence, and a return-like statement.
/// Only the middle part is kept.
pub fn extract_plan(js: &str, entry: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(&format!(
        r#"{}=function\(\w\)\{{[a-z=.\("\)]*;(.*);(?:.+)\}}"#,
        regex::escape(entry)
    ))?;
    debug!("extracting transform plan for entry {}", entry);

    let plan: Vec<String> = pattern
        .captures(js)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().split(';').map(str::to_string).collect())
        .unwrap_or_default();

    if plan.is_empty() {
        return Err(CipherError::PatternNotFound("transform_plan"));
    }

    debug!("transform plan has {} calls", plan.len());
    Ok(plan)
}

/// Extract the raw operation definitions declared by the container.
///
/// Given `var DE={AJ:function(a){a.reverse()}, ...};` returns one string
/// per `name:function(...){body}` entry. Embedded newlines are normalized
/// to spaces before splitting.
pub fn extract_operations(js: &str, container: &str) -> Result<Vec<String>> {
    let pattern = Regex::new(&format!(
        r#"(?s)var {}=\{{(.*?)\}};"#,
        regex::escape(container)
    ))?;
    debug!("extracting operations for container {}", container);

    let body = pattern
        .captures(js)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(CipherError::PatternNotFound("transform_object"))?;

    Ok(body
        .replace('\n', " ")
        .split(", ")
        .map(str::to_string)
        .collect())
}

/// Parse one plan call into its operation name and integer argument.
///
/// `DE.AJ(a,15)` yields `("AJ", 15)`. The container and the evolving
/// sequence variable are ignored here.
pub fn parse_call(call: &str) -> Result<(String, usize)> {
    let pattern = Regex::new(r"[a-zA-Z0-9$]+\.([a-zA-Z0-9$]+)\([a-zA-Z0-9$]+,(\d+)\)")?;

    let caps = pattern
        .captures(call)
        .ok_or_else(|| CipherError::MalformedCall(call.to_string()))?;

    let name = caps[1].to_string();
    let arg = caps[2]
        .parse::<usize>()
        .map_err(|_| CipherError::MalformedCall(call.to_string()))?;

    Ok((name, arg))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = concat!(
        "var DE={AJ:function(a){a.reverse()}, ",
        "VR:function(a,b){a.splice(0,b)}, ",
        "kT:function(a,b){var c=a[0];a[0]=a[b%a.length];a[b]=c}};\n",
        "EE=function(a){a=a.split(\"\");DE.AJ(a,0);DE.VR(a,2);DE.kT(a,3);",
        "return a.join(\"\")};\n",
        "c&&d.set(\"signature\",EE(c));\n",
    );

    #[test]
    fn test_locate_entry_point() {
        assert_eq!(locate_entry_point(SCRIPT).unwrap(), "EE");
    }

    #[test]
    fn test_locate_entry_point_with_dollar_name() {
        let js = r#"c&&d.set("signature", x$9z(c));"#;
        assert_eq!(locate_entry_point(js).unwrap(), "x$9z");
    }

    #[test]
    fn test_locate_entry_point_missing_marker() {
        let result = locate_entry_point("var DE={};");
        assert!(matches!(
            result,
            Err(CipherError::PatternNotFound("entry_point"))
        ));
    }

    #[test]
    fn test_extract_plan() {
        let plan = extract_plan(SCRIPT, "EE").unwrap();
        assert_eq!(plan, vec!["DE.AJ(a,0)", "DE.VR(a,2)", "DE.kT(a,3)"]);
    }

    #[test]
    fn test_extract_plan_missing_body() {
        let result = extract_plan(SCRIPT, "ZZ");
        assert!(matches!(
            result,
            Err(CipherError::PatternNotFound("transform_plan"))
        ));
    }

    #[test]
    fn test_extract_operations() {
        let defs = extract_operations(SCRIPT, "DE").unwrap();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0], "AJ:function(a){a.reverse()}");
        assert_eq!(defs[1], "VR:function(a,b){a.splice(0,b)}");
        assert_eq!(
            defs[2],
            "kT:function(a,b){var c=a[0];a[0]=a[b%a.length];a[b]=c}"
        );
    }

    #[test]
    fn test_extract_operations_spanning_newlines() {
        let js = "var DE={AJ:function(a){a.reverse()},\nVR:function(a,b){a.splice(0,b)}};";
        let defs = extract_operations(js, "DE").unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[1], "VR:function(a,b){a.splice(0,b)}");
    }

    #[test]
    fn test_extract_operations_missing_container() {
        let result = extract_operations(SCRIPT, "QQ");
        assert!(matches!(
            result,
            Err(CipherError::PatternNotFound("transform_object"))
        ));
    }

    #[test]
    fn test_parse_call() {
        assert_eq!(parse_call("DE.AJ(a,15)").unwrap(), ("AJ".to_string(), 15));
        assert_eq!(parse_call("w$.q2(a,0)").unwrap(), ("q2".to_string(), 0));
    }

    #[test]
    fn test_parse_call_malformed() {
        for bad in ["DE.AJ(a)", "DE.AJ(a,x)", "AJ(a,15)", ""] {
            let result = parse_call(bad);
            assert!(
                matches!(result, Err(CipherError::MalformedCall(_))),
                "expected MalformedCall for {:?}",
                bad
            );
        }
    }
}
