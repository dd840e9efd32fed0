//! Integration tests for QR Studio
//!
//! These go through the public API the way the CLI and the studio do:
//! typed content in, payload and warnings out, rendered codes that scan,
//! and a history that survives a reload from disk.

use qrstudio::history::{FileStore, History, HistoryEntry, Preferences, MAX_HISTORY};
use qrstudio::payload::{ContentRecord, ContentType, EmailFields, SmsFields, VcardFields};
use qrstudio::qr::{generate_qr_to_file, read_qr_from_file, DotStyle, EyeStyle};
use qrstudio::settings::Settings;
use qrstudio::{encode, validate, EcLevel, HexColor, QrConfig, Severity, Studio};
use tempfile::tempdir;

fn record(content_type: ContentType, fields: &[(&str, &str)]) -> ContentRecord {
    let mut record = ContentRecord::empty(content_type);
    for (name, value) in fields {
        record.set_field(name, value).unwrap();
    }
    record
}

/// Every type with its required field missing encodes to nothing
#[test]
fn test_missing_required_fields_encode_empty() {
    let cases = [
        record(ContentType::Url, &[]),
        record(ContentType::Text, &[]),
        record(ContentType::Email, &[("subject", "Hi")]),
        record(ContentType::Phone, &[]),
        record(ContentType::Sms, &[("message", "hello")]),
        record(ContentType::Wifi, &[("password", "secret")]),
        record(ContentType::Vcard, &[("phone", "123"), ("org", "ACME")]),
    ];
    for record in &cases {
        assert_eq!(encode(record), "", "{:?}", record.content_type());
    }
}

#[test]
fn test_email_subject_only() {
    let email = ContentRecord::Email(EmailFields {
        to: "a@b.com".into(),
        subject: "Hi There".into(),
        body: String::new(),
    });
    assert_eq!(encode(&email), "mailto:a@b.com?subject=Hi%20There");
}

#[test]
fn test_sms_without_message() {
    let sms = ContentRecord::Sms(SmsFields {
        phone: "+15550000000".into(),
        message: String::new(),
    });
    assert_eq!(encode(&sms), "sms:+15550000000");
}

/// Punctuation a browser leaves alone in URI components stays literal
#[test]
fn test_email_and_sms_keep_uri_marks() {
    let sms = ContentRecord::Sms(SmsFields {
        phone: "+15550000000".into(),
        message: "On my way!".into(),
    });
    assert_eq!(encode(&sms), "sms:+15550000000?body=On%20my%20way!");

    let email = ContentRecord::Email(EmailFields {
        to: "a@b.com".into(),
        subject: "Call me! (now)".into(),
        body: "it's *urgent*".into(),
    });
    assert_eq!(
        encode(&email),
        "mailto:a@b.com?subject=Call%20me!%20(now)&body=it's%20*urgent*"
    );
}

#[test]
fn test_wifi_escaping() {
    let wifi = record(
        ContentType::Wifi,
        &[("ssid", "My;Net"), ("password", "p\"w"), ("encryption", "WPA"), ("hidden", "true")],
    );
    assert_eq!(encode(&wifi), r#"WIFI:T:WPA;S:My\;Net;P:p\"w;H:true;;"#);

    // a backslash is escaped once, not again after the other rules
    let wifi = record(ContentType::Wifi, &[("ssid", r"a\;b")]);
    assert_eq!(encode(&wifi), r"WIFI:T:WPA;S:a\\\;b;P:;H:false;;");
}

#[test]
fn test_vcard_lines() {
    let card = ContentRecord::Vcard(VcardFields {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        phone: "123".into(),
        ..Default::default()
    });
    let encoded = encode(&card);
    let lines: Vec<&str> = encoded.split("\r\n").collect();
    assert_eq!(
        lines,
        vec!["BEGIN:VCARD", "VERSION:3.0", "FN:Jane Doe", "N:Doe;Jane;;;", "TEL:123", "END:VCARD"]
    );

    let last_only = record(ContentType::Vcard, &[("lastName", "Doe")]);
    assert!(encode(&last_only).contains("\r\nFN:Doe\r\nN:Doe;;;;\r\n"));
}

#[test]
fn test_encoding_is_idempotent() {
    let card = record(
        ContentType::Vcard,
        &[("first_name", "Zoë"), ("email", "zoe@example.com"), ("url", "https://z.example")],
    );
    assert_eq!(encode(&card), encode(&card.clone()));
}

#[test]
fn test_capacity_error_only() {
    let payload = "x".repeat(2100);
    let warnings = validate(&payload, &QrConfig::default());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Error);
    assert!(warnings[0].message.contains("90%"));
}

#[test]
fn test_contrast_warnings() {
    let ok = validate("hello", &QrConfig::default());
    assert!(ok.is_empty());

    let config = QrConfig {
        fg_color: "#777777".parse().unwrap(),
        bg_color: "#888888".parse().unwrap(),
        ..Default::default()
    };
    let warnings = validate("hello", &config);
    assert!(warnings
        .iter()
        .any(|w| w.severity == Severity::Error && w.message.starts_with("Very low contrast")));
}

#[test]
fn test_invalid_colors_rejected() {
    assert!("#fff".parse::<HexColor>().is_err());
    assert!("red".parse::<HexColor>().is_err());
    assert!("#12345g".parse::<HexColor>().is_err());
}

/// 21 saves through a file store leave the newest 20 after a reload
#[test]
fn test_history_cap_survives_reload() {
    let dir = tempdir().unwrap();
    let mut history = History::load(FileStore::new(dir.path())).unwrap();

    for i in 0..21 {
        let content = record(ContentType::Text, &[("text", &format!("note {}", i))]);
        history
            .push(HistoryEntry::new(content, QrConfig::default(), None))
            .unwrap();
    }

    let reloaded = History::load(FileStore::new(dir.path())).unwrap();
    assert_eq!(reloaded.len(), MAX_HISTORY);
    assert_eq!(reloaded.entries()[0].encoded, "note 20");
    assert_eq!(reloaded.entries()[MAX_HISTORY - 1].encoded, "note 1");

    let ids: Vec<i64> = reloaded.entries().iter().map(|e| e.id).collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn test_studio_save_and_restore() {
    let dir = tempdir().unwrap();
    let mut studio = Studio::new(&Settings::default());
    studio.select_type(ContentType::Email);
    studio.set_field("to", "team@example.com").unwrap();
    studio.set_field("body", "Lunch?").unwrap();
    studio.set_dot_style(DotStyle::Classy);

    let mut history = History::load(FileStore::new(dir.path())).unwrap();
    history.push(studio.snapshot().unwrap()).unwrap();

    let reloaded = History::load(FileStore::new(dir.path())).unwrap();
    let entry = reloaded.entries()[0].clone();
    assert_eq!(entry.encoded, "mailto:team@example.com?body=Lunch%3F");
    assert_eq!(entry.label, "team@example.com");

    let mut fresh = Studio::new(&Settings::default());
    fresh.restore(&entry);
    assert_eq!(fresh.content_type(), ContentType::Email);
    assert_eq!(fresh.config().dot_style, DotStyle::Classy);
    assert_eq!(fresh.encoded(), entry.encoded);
    assert_eq!(reloaded.entries()[0], entry);
}

#[test]
fn test_preferences_persist() {
    let dir = tempdir().unwrap();
    Preferences::new(FileStore::new(dir.path()))
        .set_dark_mode(true)
        .unwrap();
    let prefs = Preferences::new(FileStore::new(dir.path()));
    assert_eq!(prefs.dark_mode().unwrap(), Some(true));
}

/// A rendered PNG scans back to the encoded payload
#[test]
fn test_rendered_png_scans() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("phone.png");
    let payload = encode(&record(ContentType::Phone, &[("phone", "+15551234567")]));

    let config = QrConfig {
        dot_style: DotStyle::Square,
        eye_style: EyeStyle::Square,
        error_correction: EcLevel::Q,
        size: 400,
        margin: 40,
        ..Default::default()
    };
    generate_qr_to_file(&payload, &path, &config, None).unwrap();

    assert_eq!(read_qr_from_file(&path).unwrap(), "tel:+15551234567");
}

#[test]
fn test_svg_file_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("code.svg");
    generate_qr_to_file("https://example.com", &path, &QrConfig::default(), None).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
}
