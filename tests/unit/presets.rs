use super::*;

#[test]
fn defaults_match_the_form_presets() {
    assert_eq!(PageSize::default(), PageSize::A4);
    assert_eq!(FontSize::default().points(), 36);
}

#[test]
fn page_table_is_fixed() {
    assert_eq!(PageSize::A3.dims_cm(), (29.7, 42.02));
    assert_eq!(PageSize::A4.dims_cm(), (20.99, 29.7));
    assert_eq!(PageSize::A5.dims_cm(), (14.82, 20.99));
}

#[test]
fn page_size_parses_case_insensitively() {
    assert_eq!("a4".parse::<PageSize>().unwrap(), PageSize::A4);
    assert_eq!(" A3 ".parse::<PageSize>().unwrap(), PageSize::A3);
    let err = "Letter".parse::<PageSize>().unwrap_err();
    assert!(err.to_string().contains("unknown page size"));
}

#[test]
fn font_size_only_accepts_choices() {
    for p in FontSize::CHOICES {
        assert_eq!(FontSize::new(p).unwrap().points(), p);
    }
    assert!(FontSize::new(13).is_err());
    assert!("abc".parse::<FontSize>().is_err());
    assert_eq!("48".parse::<FontSize>().unwrap().points(), 48);
    assert_eq!(FontSize::all().count(), 5);
}

#[test]
fn serde_uses_labels_and_points() {
    let json = serde_json::to_string(&(PageSize::A5, FontSize::new(64).unwrap())).unwrap();
    assert_eq!(json, r#"["A5",64]"#);

    let bad: Result<FontSize, _> = serde_json::from_str("30");
    assert!(bad.is_err());
}
