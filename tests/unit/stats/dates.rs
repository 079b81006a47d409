use super::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn month_name_uses_current_year() {
    let r = parse_caption_date_range("ИЮНЬ", ymd(2024, 9, 15)).unwrap();
    assert_eq!(r.start, ymd(2024, 6, 1));
    assert_eq!(r.end, ymd(2024, 6, 30));
}

#[test]
fn month_and_year_combine() {
    let r = parse_caption_date_range("итоги: февраль 2024!", ymd(2025, 1, 1)).unwrap();
    assert_eq!(r.start, ymd(2024, 2, 1));
    assert_eq!(r.end, ymd(2024, 2, 29));
}

#[test]
fn november_is_recognized() {
    let r = parse_caption_date_range("ноябрь", ymd(2023, 3, 3)).unwrap();
    assert_eq!(r.start, ymd(2023, 11, 1));
    assert_eq!(r.end, ymd(2023, 11, 30));
}

#[test]
fn english_month_names_work_too() {
    let r = parse_caption_date_range("December 2022", ymd(2024, 1, 1)).unwrap();
    assert_eq!(r.start, ymd(2022, 12, 1));
    assert_eq!(r.end, ymd(2022, 12, 31));
}

#[test]
fn year_alone_selects_whole_year() {
    let r = parse_caption_date_range("2021", ymd(2024, 5, 5)).unwrap();
    assert_eq!(r.start, ymd(2021, 1, 1));
    assert_eq!(r.end, ymd(2021, 12, 31));
}

#[test]
fn blank_caption_is_rejected() {
    let err = parse_caption_date_range("", ymd(2024, 5, 5)).unwrap_err();
    assert!(matches!(err, PhotopostError::DateRangeUnparsable(_)));
    assert!(parse_caption_date_range("   \n", ymd(2024, 5, 5)).is_err());
}

#[test]
fn caption_without_tokens_selects_current_month() {
    let r = parse_caption_date_range("my stats please", ymd(2024, 4, 10)).unwrap();
    assert_eq!(r.start, ymd(2024, 4, 1));
    assert_eq!(r.end, ymd(2024, 4, 30));
}

#[test]
fn small_numbers_are_not_years() {
    let r = parse_caption_date_range("1999 42", ymd(2024, 4, 10)).unwrap();
    assert_eq!(r.start, ymd(2024, 4, 1));
}

#[test]
fn year_with_russian_suffix_is_read() {
    let r = parse_caption_date_range("ИЮНЬ 2023г", ymd(2024, 9, 15)).unwrap();
    assert_eq!(r.start, ymd(2023, 6, 1));
    assert_eq!(r.end, ymd(2023, 6, 30));

    let r = parse_caption_date_range("итоги 2022 г.", ymd(2024, 9, 15)).unwrap();
    assert_eq!(r.start, ymd(2022, 1, 1));
    let r = parse_caption_date_range("итоги 2022г.", ymd(2024, 9, 15)).unwrap();
    assert_eq!(r.end, ymd(2022, 12, 31));
}
