use super::*;

#[test]
fn generated_tokens_are_hex_and_unique() {
    let a = generate_token();
    let b = generate_token();
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}

#[test]
fn hash_token_is_sha256_hex() {
    assert_eq!(hash_token("abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn admin_tokens_match_only_configured_values() {
    let tokens = AdminTokens::new(["alpha", "beta"]);
    assert_eq!(tokens.len(), 2);
    assert!(tokens.is_admin("alpha"));
    assert!(tokens.is_admin("beta"));
    assert!(!tokens.is_admin("gamma"));
    assert!(!tokens.is_admin(""));
}

#[test]
fn empty_set_admits_nobody() {
    let tokens = AdminTokens::default();
    assert!(tokens.is_empty());
    assert!(!tokens.is_admin("anything"));
}
