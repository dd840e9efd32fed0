//! Payload encoding for each content type.
//!
//! The formats are consumed by phone camera apps, so they are reproduced
//! exactly: field order, separators and escaping all matter.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use super::{ContentRecord, EmailFields, SmsFields, VcardFields, WifiFields};

/// Line separator mandated by vCard.
const CRLF: &str = "\r\n";

/// Characters left alone by URI component encoding: ASCII alphanumerics
/// and `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encodes a content record into its QR payload.
///
/// Returns an empty string when the required field of the record is
/// missing; callers treat that as "nothing to render".
pub fn encode(record: &ContentRecord) -> String {
    let payload = match record {
        ContentRecord::Url(d) => d.url.clone(),
        ContentRecord::Text(d) => d.text.clone(),
        ContentRecord::Email(d) => encode_email(d),
        ContentRecord::Phone(d) => {
            if d.phone.is_empty() {
                String::new()
            } else {
                format!("tel:{}", d.phone)
            }
        }
        ContentRecord::Sms(d) => encode_sms(d),
        ContentRecord::Wifi(d) => encode_wifi(d),
        ContentRecord::Vcard(d) => encode_vcard(d),
    };

    debug!(
        content_type = %record.content_type(),
        bytes = payload.len(),
        "encoded payload"
    );
    payload
}

fn encode_email(d: &EmailFields) -> String {
    if d.to.is_empty() {
        return String::new();
    }

    let mut uri = format!("mailto:{}", d.to);
    let mut params = Vec::with_capacity(2);
    if !d.subject.is_empty() {
        params.push(format!("subject={}", percent_encode(&d.subject)));
    }
    if !d.body.is_empty() {
        params.push(format!("body={}", percent_encode(&d.body)));
    }
    if !params.is_empty() {
        uri.push('?');
        uri.push_str(&params.join("&"));
    }
    uri
}

fn encode_sms(d: &SmsFields) -> String {
    if d.phone.is_empty() {
        return String::new();
    }

    if d.message.is_empty() {
        format!("sms:{}", d.phone)
    } else {
        format!("sms:{}?body={}", d.phone, percent_encode(&d.message))
    }
}

fn encode_wifi(d: &WifiFields) -> String {
    if d.ssid.is_empty() {
        return String::new();
    }

    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        d.encryption.as_str(),
        wifi_escape(&d.ssid),
        wifi_escape(&d.password),
        if d.hidden { "true" } else { "false" }
    )
}

fn encode_vcard(d: &VcardFields) -> String {
    if d.first_name.is_empty() && d.last_name.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", d.full_name()),
        format!("N:{};{};;;", d.last_name, d.first_name),
    ];

    let optional = [
        ("TEL", &d.phone),
        ("EMAIL", &d.email),
        ("ORG", &d.org),
        ("TITLE", &d.title),
        ("URL", &d.url),
    ];
    for (key, value) in optional {
        if !value.is_empty() {
            lines.push(format!("{}:{}", key, value));
        }
    }

    lines.push("END:VCARD".to_string());
    lines.join(CRLF)
}

/// Escapes `\`, `;`, `,` and `"` for the `WIFI:` format.
///
/// Backslashes are escaped first so the escapes added for the other
/// characters are not doubled.
pub fn wifi_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | ';' | ',' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// URI component encoding: everything outside [`URI_COMPONENT`] becomes
/// `%XX` over its UTF-8 bytes.
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ContentType, WifiEncryption};

    fn record(ty: ContentType, fields: &[(&str, &str)]) -> ContentRecord {
        let mut record = ContentRecord::empty(ty);
        for (name, value) in fields {
            record.set_field(name, value).unwrap();
        }
        record
    }

    #[test]
    fn test_empty_records_encode_to_empty() {
        for ty in ContentType::ALL {
            assert_eq!(encode(&ContentRecord::empty(ty)), "", "{}", ty);
        }
    }

    #[test]
    fn test_optional_fields_alone_are_not_enough() {
        let email = record(ContentType::Email, &[("subject", "Hi"), ("body", "there")]);
        assert_eq!(encode(&email), "");

        let sms = record(ContentType::Sms, &[("message", "hello")]);
        assert_eq!(encode(&sms), "");

        let wifi = record(ContentType::Wifi, &[("password", "secret"), ("hidden", "true")]);
        assert_eq!(encode(&wifi), "");

        let vcard = record(ContentType::Vcard, &[("phone", "123"), ("org", "Acme")]);
        assert_eq!(encode(&vcard), "");
    }

    #[test]
    fn test_url_and_text_verbatim() {
        let url = record(ContentType::Url, &[("url", "https://example.com/a b")]);
        assert_eq!(encode(&url), "https://example.com/a b");

        let text = record(ContentType::Text, &[("text", "line one\nline two")]);
        assert_eq!(encode(&text), "line one\nline two");
    }

    #[test]
    fn test_email_subject_only() {
        let email = record(ContentType::Email, &[("to", "a@b.com"), ("subject", "Hi There")]);
        assert_eq!(encode(&email), "mailto:a@b.com?subject=Hi%20There");
    }

    #[test]
    fn test_email_variants() {
        let bare = record(ContentType::Email, &[("to", "a@b.com")]);
        assert_eq!(encode(&bare), "mailto:a@b.com");

        let body_only = record(ContentType::Email, &[("to", "a@b.com"), ("body", "x&y")]);
        assert_eq!(encode(&body_only), "mailto:a@b.com?body=x%26y");

        let both = record(
            ContentType::Email,
            &[("to", "a@b.com"), ("subject", "é"), ("body", "a=b")],
        );
        assert_eq!(encode(&both), "mailto:a@b.com?subject=%C3%A9&body=a%3Db");
    }

    #[test]
    fn test_phone() {
        let phone = record(ContentType::Phone, &[("phone", "+1 555 000")]);
        assert_eq!(encode(&phone), "tel:+1 555 000");
    }

    #[test]
    fn test_sms() {
        let bare = record(ContentType::Sms, &[("phone", "+15550000000"), ("message", "")]);
        assert_eq!(encode(&bare), "sms:+15550000000");

        let with_body = record(ContentType::Sms, &[("phone", "+15550000000"), ("message", "On my way!")]);
        assert_eq!(encode(&with_body), "sms:+15550000000?body=On%20my%20way!");
    }

    #[test]
    fn test_uri_marks_stay_unescaped() {
        let text = "Call me! (now) it's *urgent*";
        let expected = "Call%20me!%20(now)%20it's%20*urgent*";
        assert_eq!(percent_encode(text), expected);

        let sms = record(ContentType::Sms, &[("phone", "+1"), ("message", text)]);
        assert_eq!(encode(&sms), format!("sms:+1?body={}", expected));

        let email = record(
            ContentType::Email,
            &[("to", "a@b.com"), ("subject", text), ("body", "-_.~")],
        );
        assert_eq!(
            encode(&email),
            format!("mailto:a@b.com?subject={}&body=-_.~", expected)
        );

        assert_eq!(percent_encode("a/b?c#d"), "a%2Fb%3Fc%23d");
    }

    #[test]
    fn test_wifi_escaping() {
        let wifi = ContentRecord::Wifi(WifiFields {
            ssid: "My;Net".to_string(),
            password: "p\"w".to_string(),
            encryption: WifiEncryption::Wpa,
            hidden: true,
        });
        assert_eq!(encode(&wifi), r#"WIFI:T:WPA;S:My\;Net;P:p\"w;H:true;;"#);
    }

    #[test]
    fn test_wifi_backslash_not_doubled() {
        assert_eq!(wifi_escape(r"a\;b"), r"a\\\;b");
        assert_eq!(wifi_escape("a,b"), r"a\,b");
        assert_eq!(wifi_escape("plain"), "plain");
    }

    #[test]
    fn test_wifi_open_network() {
        let wifi = record(ContentType::Wifi, &[("ssid", "Cafe"), ("encryption", "nopass")]);
        assert_eq!(encode(&wifi), "WIFI:T:nopass;S:Cafe;P:;H:false;;");
    }

    #[test]
    fn test_vcard_minimal() {
        let vcard = record(
            ContentType::Vcard,
            &[("firstName", "Jane"), ("lastName", "Doe"), ("phone", "123")],
        );
        let encoded = encode(&vcard);
        let lines: Vec<&str> = encoded.split("\r\n").collect();
        assert_eq!(
            lines,
            vec![
                "BEGIN:VCARD",
                "VERSION:3.0",
                "FN:Jane Doe",
                "N:Doe;Jane;;;",
                "TEL:123",
                "END:VCARD",
            ]
        );
        assert!(!encoded.ends_with("\r\n"));
    }

    #[test]
    fn test_vcard_last_name_only_and_full() {
        let last_only = record(ContentType::Vcard, &[("lastName", "Doe")]);
        assert_eq!(
            encode(&last_only),
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Doe\r\nN:Doe;;;;\r\nEND:VCARD"
        );

        let full = record(
            ContentType::Vcard,
            &[
                ("firstName", "Jane"),
                ("email", "j@d.io"),
                ("org", "Acme"),
                ("title", "CTO"),
                ("url", "https://d.io"),
            ],
        );
        assert_eq!(
            encode(&full),
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Jane\r\nN:;Jane;;;\r\nEMAIL:j@d.io\r\nORG:Acme\r\nTITLE:CTO\r\nURL:https://d.io\r\nEND:VCARD"
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let vcard = record(ContentType::Vcard, &[("firstName", "Jane"), ("url", "x")]);
        assert_eq!(encode(&vcard), encode(&vcard.clone()));
    }
}
