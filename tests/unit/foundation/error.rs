use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PhotopostError::asset("x")
            .to_string()
            .contains("asset unavailable:")
    );
    assert!(
        PhotopostError::input("x")
            .to_string()
            .contains("input unavailable:")
    );
    assert!(
        PhotopostError::empty("x")
            .to_string()
            .contains("no usage data:")
    );
    assert!(
        PhotopostError::date_range("x")
            .to_string()
            .contains("date range unparsable:")
    );
    assert!(PhotopostError::render("x").to_string().contains("render error:"));
    assert!(PhotopostError::config("x").to_string().contains("config error:"));
    assert!(PhotopostError::fetch("x").to_string().contains("fetch error:"));
}

#[test]
fn admission_rejection_is_a_busy_signal() {
    let err = PhotopostError::AdmissionRejected { chat_id: 7 };
    assert!(err.is_busy());
    assert!(err.to_string().contains("chat 7"));
    assert!(!PhotopostError::render("x").is_busy());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PhotopostError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
