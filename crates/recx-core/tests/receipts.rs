//! End-to-end extraction over realistic OCR output.

use pretty_assertions::assert_eq;
use recx_core::{analyze_receipt, DatePass, DateTier, ExtractionConfig, ReceiptAnalyzer};

const CAFE_RECEIPT: &str = "\
스타벅스 강남점
사업자번호 123-45-67890
거래일시 25709702 14:32
아메리카노 4500
카페라떼 5,000
아메리카노 4500
합계 14,000원
받은금액 15,000
";

#[test]
fn test_cafe_receipt() {
    let result = analyze_receipt(CAFE_RECEIPT);

    assert_eq!(result.date.as_deref(), Some("25/09/02"));
    assert_eq!(result.total_amount, Some(14000));
    assert_eq!(
        result.items,
        Some(vec![
            "사업자번호".to_string(),
            "거래일시".to_string(),
            "아메리카노".to_string(),
            "카페라떼".to_string(),
            "합계원".to_string(),
            "받은금액".to_string(),
        ])
    );
}

#[test]
fn test_cafe_receipt_report() {
    let report = ReceiptAnalyzer::new().analyze_with_report(CAFE_RECEIPT);

    let date = report.date_source.unwrap();
    assert_eq!(date.source.line, 2);
    assert_eq!(date.pass, DatePass::Labeled);
    assert_eq!(date.tier, DateTier::ExactPrefix);
    assert_eq!(report.total_source.unwrap().line, 6);
    assert_eq!(report.line_count, 9);
}

#[test]
fn test_windows_line_endings_and_full_width() {
    let text = "날짜　２５．０５．０８\r\n총금액　３３，０００\r\n";
    let result = analyze_receipt(text);

    assert_eq!(result.date.as_deref(), Some("25.05.08"));
    assert_eq!(result.total_amount, Some(33000));
}

#[test]
fn test_register_number_glued_to_date() {
    let result = analyze_receipt("POS 0425/05/08 No.1234");
    assert_eq!(result.date.as_deref(), Some("25/05/08"));
}

#[test]
fn test_json_shape() {
    let result = analyze_receipt("거래일시 25709702\n합계 12,500원");
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["date"], "25/09/02");
    assert_eq!(value["totalAmount"], 12500);
    assert!(value["items"].is_array());

    let without_items = ReceiptAnalyzer::new().with_items(false).analyze("합계 12,500원");
    let value = serde_json::to_value(&without_items).unwrap();
    assert!(value.get("items").is_none());
}

#[test]
fn test_concurrent_calls() {
    let analyzer = ReceiptAnalyzer::with_config(&ExtractionConfig::default()).unwrap();
    let inputs: Vec<String> = (0..8)
        .map(|i| format!("거래일시 25.0{}.1{}\n합계 {},000", i + 1, i, i + 1))
        .collect();

    let results: Vec<_> = std::thread::scope(|scope| {
        let analyzer = &analyzer;
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || analyzer.analyze(input)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.date, Some(format!("25.0{}.1{}", i + 1, i)));
        assert_eq!(result.total_amount, Some((i as u64 + 1) * 1000));
    }
}
