//! Request and callback signatures.
//!
//! A signature is the lowercase hex MD5 digest of every `key=value` pair, sorted by key and
//! concatenated without separators, followed by the raw application secret. The remote
//! service recomputes the same digest independently, so key order, pair format, and encoding
//! must stay bit-exact.

// crates.io
use md5::{Digest, Md5};
// self
use crate::_prelude::*;

/// Parameter carrying the signature on signed requests and callbacks.
pub const SIGNATURE_PARAM: &str = "sig";

/// Errors produced while verifying a presented signature.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum SignatureError {
	/// The parameter set did not include a signature.
	#[error("Parameter set carries no `{param}` signature.")]
	Missing {
		/// Name of the parameter that was expected to hold the signature.
		param: String,
	},
	/// The presented signature does not match the recomputed one.
	#[error("Signature mismatch.")]
	Mismatch,
}

/// Computes the signature for `params` keyed with `secret`.
///
/// The result does not depend on the iteration order of `params`.
pub fn compute_signature<I, K, V>(params: I, secret: &str) -> String
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	hex::encode(digest(params, secret))
}

/// Verifies a parameter set that carries its own `sig` entry.
///
/// The `sig` entry is excluded from the recomputed digest.
pub fn verify_signature<I, K, V>(params: I, secret: &str) -> Result<(), SignatureError>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut presented = None;
	let mut signed = Vec::new();

	for (key, value) in params {
		if key.as_ref() == SIGNATURE_PARAM {
			presented = Some(value.as_ref().to_owned());
		} else {
			signed.push((key, value));
		}
	}

	let presented =
		presented.ok_or_else(|| SignatureError::Missing { param: SIGNATURE_PARAM.into() })?;

	matches_presented(&digest(signed, secret), &presented)
}

/// Verifies callback parameters namespaced under `prefix` (for example `fb_sig`).
///
/// The signature is read from `prefix` itself; every `<prefix>_<name>` entry contributes
/// `<name>=<value>` to the digest. Unrelated parameters are ignored.
pub fn verify_prefixed_signature<I, K, V>(
	params: I,
	prefix: &str,
	secret: &str,
) -> Result<(), SignatureError>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut presented = None;
	let mut signed = BTreeMap::new();

	for (key, value) in params {
		let key = key.as_ref();

		if key == prefix {
			presented = Some(value.as_ref().to_owned());
		} else if let Some(name) =
			key.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('_'))
		{
			signed.insert(name.to_owned(), value.as_ref().to_owned());
		}
	}

	let presented = presented.ok_or_else(|| SignatureError::Missing { param: prefix.into() })?;

	matches_presented(&digest(&signed, secret), &presented)
}

fn digest<I, K, V>(params: I, secret: &str) -> Vec<u8>
where
	I: IntoIterator<Item = (K, V)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	let mut pairs = params.into_iter().collect::<Vec<_>>();

	pairs.sort_by(|(lhs, _), (rhs, _)| lhs.as_ref().as_bytes().cmp(rhs.as_ref().as_bytes()));

	let mut hasher = Md5::new();

	for (key, value) in &pairs {
		hasher.update(key.as_ref().as_bytes());
		hasher.update(b"=");
		hasher.update(value.as_ref().as_bytes());
	}

	hasher.update(secret.as_bytes());

	hasher.finalize().to_vec()
}

// Hex case is not significant; anything that does not decode to a digest is a mismatch.
fn matches_presented(expected: &[u8], presented: &str) -> Result<(), SignatureError> {
	let presented = hex::decode(presented).map_err(|_| SignatureError::Mismatch)?;

	if constant_time_eq(expected, &presented) { Ok(()) } else { Err(SignatureError::Mismatch) }
}

fn constant_time_eq(lhs: &[u8], rhs: &[u8]) -> bool {
	lhs.len() == rhs.len() && lhs.iter().zip(rhs).fold(0, |acc, (l, r)| acc | (l ^ r)) == 0
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn signature_matches_reference_digest() {
		// md5("a=1b=2secret")
		let params = [("b", "2"), ("a", "1")];

		assert_eq!(compute_signature(params, "secret"), "d37cfe88ec8ff020e497f5197bf3ba1c");
	}

	#[test]
	fn empty_parameter_set_hashes_secret_only() {
		// md5("secret")
		assert_eq!(
			compute_signature(Vec::<(&str, &str)>::new(), "secret"),
			"5ebe2294ecd0e0f08eab7690d2a6ee69"
		);
	}

	#[test]
	fn keys_sort_bytewise_not_by_pair() {
		let params = [("a0", "x"), ("a", "y")];
		let mut hasher = Md5::new();

		hasher.update(b"a=ya0=xs");

		assert_eq!(compute_signature(params, "s"), hex::encode(hasher.finalize()));
	}

	#[test]
	fn verify_requires_signature_param() {
		let err = verify_signature([("a", "1")], "secret")
			.expect_err("Verification without `sig` must fail.");

		assert_eq!(err, SignatureError::Missing { param: "sig".into() });
	}

	#[test]
	fn verification_accepts_either_hex_case() {
		let sig = compute_signature([("a", "1")], "secret");
		let upper = sig.to_ascii_uppercase();

		assert_eq!(verify_signature([("a", "1"), ("sig", upper.as_str())], "secret"), Ok(()));
	}

	#[test]
	fn malformed_presented_signatures_are_mismatches() {
		let sig = compute_signature([("a", "1")], "secret");
		let truncated = &sig[..30];
		let extended = format!("{sig}00");
		let garbled = format!("{}zz", &sig[..30]);

		for presented in [truncated, extended.as_str(), garbled.as_str(), ""] {
			assert_eq!(
				verify_signature([("a", "1"), ("sig", presented)], "secret"),
				Err(SignatureError::Mismatch),
				"Presented signature {presented:?} must not verify."
			);
		}
	}

	#[test]
	fn constant_time_eq_requires_equal_length() {
		assert!(constant_time_eq(b"digest", b"digest"));
		assert!(!constant_time_eq(b"digest", b"digesT"));
		assert!(!constant_time_eq(b"digest", b"diges"));
	}

	#[test]
	fn prefixed_verification_strips_namespace() {
		let signed = [("user", "42"), ("time", "1200000000")];
		let sig = compute_signature(signed, "secret");
		let callback = [
			("fb_sig_user", "42"),
			("fb_sig_time", "1200000000"),
			("fb_sig", sig.as_str()),
			("unrelated", "ignored"),
			("fb_sigx", "ignored"),
		];

		assert_eq!(verify_prefixed_signature(callback, "fb_sig", "secret"), Ok(()));
		assert_eq!(
			verify_prefixed_signature(callback, "fb_sig", "other"),
			Err(SignatureError::Mismatch)
		);
	}
}
