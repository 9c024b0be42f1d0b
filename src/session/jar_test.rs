use super::*;

// =============================================================================
// token_from_cookie_header
// =============================================================================

#[test]
fn header_with_token_only() {
    assert_eq!(token_from_cookie_header("token=abc123").as_deref(), Some("abc123"));
}

#[test]
fn header_with_other_cookies() {
    let header = "theme=dark; token=abc123; sidebar=open";
    assert_eq!(token_from_cookie_header(header).as_deref(), Some("abc123"));
}

#[test]
fn header_value_is_percent_decoded() {
    assert_eq!(token_from_cookie_header("token=a%2Bb%3Dc").as_deref(), Some("a+b=c"));
}

#[test]
fn header_name_must_match_exactly() {
    assert_eq!(token_from_cookie_header("xtoken=nope; token_v2=nope"), None);
}

#[test]
fn header_empty_token_is_absent() {
    assert_eq!(token_from_cookie_header("token="), None);
    assert_eq!(token_from_cookie_header(""), None);
}

// =============================================================================
// CookieJarStorage
// =============================================================================

#[test]
fn store_sets_mirror_attributes() {
    let jar = CookieJarStorage::new(true);
    jar.store("tok").unwrap();

    let header = jar.set_cookie_header().unwrap().unwrap();
    assert!(header.starts_with("token=tok"));
    assert!(header.contains("Path=/"));
    assert!(header.contains("Max-Age=604800"));
    assert!(header.contains("SameSite=Lax"));
    assert!(header.contains("Secure"));
}

#[test]
fn insecure_jar_omits_secure_flag() {
    let jar = CookieJarStorage::new(false);
    jar.store("tok").unwrap();
    let header = jar.set_cookie_header().unwrap().unwrap();
    assert!(!header.contains("Secure"));
}

#[test]
fn load_returns_stored_token() {
    let jar = CookieJarStorage::new(false);
    assert_eq!(jar.load().unwrap(), None);
    jar.store("tok").unwrap();
    assert_eq!(jar.load().unwrap().as_deref(), Some("tok"));
}

#[test]
fn clear_expires_the_cookie() {
    let jar = CookieJarStorage::new(false);
    jar.store("tok").unwrap();
    jar.clear().unwrap();

    assert_eq!(jar.load().unwrap(), None);
    let header = jar.set_cookie_header().unwrap().unwrap();
    assert!(header.starts_with("token=;"));
    assert!(header.contains("1970"));
}

#[test]
fn persistent_jar_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies");

    CookieJarStorage::persistent(&path, false)
        .store("durable-cookie")
        .unwrap();

    let reopened = CookieJarStorage::persistent(&path, false);
    assert_eq!(reopened.load().unwrap().as_deref(), Some("durable-cookie"));
}

#[test]
fn persistent_jar_ignores_lapsed_cookie() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cookies");
    std::fs::write(&path, "token=old; Path=/; Expires=Wed, 21 Oct 2015 07:28:00 GMT\n").unwrap();

    let jar = CookieJarStorage::persistent(&path, false);
    assert_eq!(jar.load().unwrap(), None);
}

#[test]
fn persistent_jar_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let jar = CookieJarStorage::persistent(dir.path().join("nope"), false);
    assert_eq!(jar.load().unwrap(), None);
    jar.clear().unwrap();
}
