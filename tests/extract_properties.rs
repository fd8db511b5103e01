// tests/extract_properties.rs
use gift_code_announcer::extract::{extract_codes, BLACKLIST};

const PAGE: &str = r#"
<div class="codes">
  <h2>Active codes</h2>
  <ul>
    <li><code>KS2024GIFT</code> – 500 gems</li>
    <li><code>vip777abc</code> (new!)</li>
    <li>Join our DISCORD server, open SETTINGS, then REDEEM.</li>
  </ul>
  <a href="/android">Android</a> | <a href="/website">Website</a>
</div>
"#;

#[test]
fn extraction_is_idempotent() {
    let a = extract_codes(PAGE);
    let b = extract_codes(PAGE);
    assert_eq!(a, b);
    assert!(a.contains("KS2024GIFT"));
    assert!(a.contains("VIP777ABC"));
}

#[test]
fn blacklisted_words_never_survive_any_context() {
    let contexts = ["{}", " {} ", "<b>{}</b>", "({})", "{}!", "\"{}\"", "x {} y", "{}\n{}"];
    for word in BLACKLIST {
        for ctx in contexts {
            for variant in [word.to_string(), word.to_lowercase()] {
                let text = ctx.replace("{}", &variant);
                let out = extract_codes(&text);
                assert!(
                    !out.contains(*word),
                    "{word} leaked from {text:?}: {out:?}"
                );
            }
        }
    }
}

#[test]
fn length_window_is_six_to_sixteen() {
    for len in 1..=20usize {
        let token: String = "A1".chars().cycle().take(len).collect();
        let out = extract_codes(&format!("code: {token}."));
        let expected = (6..=16).contains(&len);
        assert_eq!(out.contains(&token), expected, "len {len}: {out:?}");
    }
}

#[test]
fn output_is_uppercase_alphanumeric() {
    let out = extract_codes(PAGE);
    for code in &out {
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert!((6..=16).contains(&code.len()));
    }
}
