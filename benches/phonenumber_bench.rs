use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rphonenumber::{
    InMemoryMetadataRepository, NumberFormat, PhoneMetadata, PhoneNumberDesc, PhoneNumberFormat,
    PhoneNumberUtil,
};

/// A few regions are enough to exercise every code path of parse and format.
fn bench_repository() -> InMemoryMetadataRepository {
    InMemoryMetadataRepository::new([
        PhoneMetadata {
            id: "US".into(),
            country_code: 1,
            general_desc: PhoneNumberDesc::new(r"[2-9]\d{9}", &[10]).with_local_only_lengths(&[7]),
            fixed_line: Some(PhoneNumberDesc::new(r"[2-9]\d{9}", &[])),
            mobile: Some(PhoneNumberDesc::new(r"[2-9]\d{9}", &[])),
            toll_free: Some(PhoneNumberDesc::new(r"8(?:00|33|44|55|66|77|88)\d{7}", &[])),
            international_prefix: "011".into(),
            national_prefix: Some("1".into()),
            same_mobile_and_fixed_line_pattern: true,
            number_format: vec![
                NumberFormat::new(r"(\d{3})(\d{4})", "$1-$2"),
                NumberFormat::new(r"(\d{3})(\d{3})(\d{4})", "($1) $2-$3"),
            ],
            intl_number_format: vec![NumberFormat::new(r"(\d{3})(\d{3})(\d{4})", "$1-$2-$3")],
            main_country_for_code: true,
            ..Default::default()
        },
        PhoneMetadata {
            id: "GB".into(),
            country_code: 44,
            general_desc: PhoneNumberDesc::new(r"[1-357-9]\d{9}", &[10]),
            fixed_line: Some(PhoneNumberDesc::new(r"[1-3]\d{9}", &[])),
            mobile: Some(PhoneNumberDesc::new(r"7[1-57-9]\d{8}", &[])),
            international_prefix: "00".into(),
            national_prefix: Some("0".into()),
            number_format: vec![
                NumberFormat::new(r"(\d{2})(\d{4})(\d{4})", "$1 $2 $3")
                    .with_leading_digits(&["2"])
                    .with_national_prefix_formatting_rule("0$1"),
                NumberFormat::new(r"(\d{4})(\d{6})", "$1 $2")
                    .with_leading_digits(&["7"])
                    .with_national_prefix_formatting_rule("0$1"),
            ],
            ..Default::default()
        },
        PhoneMetadata {
            id: "DE".into(),
            country_code: 49,
            general_desc: PhoneNumberDesc::new(r"\d{5,14}", &[5, 6, 7, 8, 9, 10, 11, 12, 13, 14]),
            fixed_line: Some(PhoneNumberDesc::new(r"[2-9]\d{4,13}", &[])),
            mobile: Some(PhoneNumberDesc::new(r"1[5-7]\d{8,9}", &[10, 11])),
            international_prefix: "00".into(),
            national_prefix: Some("0".into()),
            number_format: vec![
                NumberFormat::new(r"(\d{2})(\d{3,8})", "$1 $2")
                    .with_leading_digits(&["3[02]|40|[68]9"])
                    .with_national_prefix_formatting_rule("0$1"),
                NumberFormat::new(r"(\d{3})(\d{7,8})", "$1 $2")
                    .with_leading_digits(&["1[5-7]"])
                    .with_national_prefix_formatting_rule("0$1"),
            ],
            ..Default::default()
        },
    ])
}

fn setup_numbers() -> Vec<(&'static str, &'static str)> {
    vec![
        ("(650) 253-0000", "US"),
        ("1-800-FLOWERS", "US"),
        ("+44 20 8765 4321", "GB"),
        ("020 8765 4321", "GB"),
        ("07912 345678 ext. 1234", "GB"),
        ("011 44 7912 345678", "US"),
        ("030 123456", "DE"),
        ("+49 1512 3456789", "DE"),
        ("12345", "DE"),
    ]
}

fn parsing_benchmark(c: &mut Criterion) {
    let phone_util = PhoneNumberUtil::new(bench_repository());
    let numbers = setup_numbers();

    c.bench_function("parse", |b| {
        b.iter(|| {
            for (number, region) in &numbers {
                let _ = phone_util.parse(black_box(number), black_box(region));
            }
        })
    });
}

fn formatting_benchmark(c: &mut Criterion) {
    let phone_util = PhoneNumberUtil::new(bench_repository());
    let numbers: Vec<_> = setup_numbers()
        .into_iter()
        .filter_map(|(number, region)| phone_util.parse(number, region).ok())
        .collect();

    let mut group = c.benchmark_group("format");
    for format in [
        PhoneNumberFormat::E164,
        PhoneNumberFormat::International,
        PhoneNumberFormat::National,
        PhoneNumberFormat::RFC3966,
    ] {
        group.bench_function(format!("{:?}", format), |b| {
            b.iter(|| {
                for number in &numbers {
                    phone_util.format(black_box(number), black_box(format));
                }
            })
        });
    }
    group.bench_function("out of country from US", |b| {
        b.iter(|| {
            for number in &numbers {
                phone_util.format_out_of_country_calling_number(black_box(number), "US");
            }
        })
    });
    group.finish();
}

fn as_you_type_benchmark(c: &mut Criterion) {
    let phone_util = PhoneNumberUtil::new(bench_repository());

    c.bench_function("as you type", |b| {
        let mut formatter = phone_util.get_as_you_type_formatter("US");
        b.iter(|| {
            formatter.clear();
            for next_char in "+442087654321".chars() {
                black_box(formatter.input_digit(next_char));
            }
        })
    });
}

criterion_group!(benches, parsing_benchmark, formatting_benchmark, as_you_type_benchmark);
criterion_main!(benches);
