use chrono::NaiveDate;
use patti_records::{
    csv_enum, csv_record, ColumnMapping, ErrorKind, ParserOptions, PattiError, RecordParser,
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

csv_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub enum Status {
        #[default]
        Active,
        Inactive,
    }
}

csv_enum! {
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub enum Priority {
        #[default]
        Low = 1,
        High = 3,
    }
}

csv_record! {
    #[derive(Debug, Default, PartialEq, Clone)]
    pub struct Person {
        pub name: String,
        pub age: i32,
    }
    mappings {
        "name" => ColumnMapping::named("Name"),
        "age" => ColumnMapping::named("Age"),
    }
}

csv_record! {
    #[derive(Debug, Default, PartialEq)]
    pub struct Order {
        pub id: Uuid,
        pub placed: chrono::NaiveDateTime,
        pub amount: Decimal,
        pub quantity: i64,
        pub express: bool,
        pub status: Status,
        pub priority: Priority,
        pub discount: Option<f64>,
        pub grade: Option<char>,
    }
}

fn person(name: &str, age: i32) -> Person {
    Person {
        name: name.into(),
        age,
    }
}

const INPUT: [&str; 3] = ["Name,Age", "John,30", "\"Unclosed,40"];

#[test]
fn strict_fails_on_line_three() {
    init_logging();
    let opts = ParserOptions::builder().strict_mode(true).build().unwrap();
    let err = RecordParser::<Person>::new(opts).parse(INPUT).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Line 3"), "{}", msg);
    assert!(msg.to_lowercase().contains("unclosed quote"), "{}", msg);
    assert!(matches!(err, PattiError::Line { line_number: 3, .. }));
}

#[test]
fn lenient_collects_line_three() {
    init_logging();
    let res = RecordParser::<Person>::default().parse(INPUT).unwrap();
    assert_eq!(Err(PattiError::ErrorsNotAcknowledged), res.records().map(|r| r.to_vec()));

    assert!(res.has_errors());
    assert_eq!(Ok(vec![person("John", 30)]), res.records().map(|r| r.to_vec()));
    assert_eq!(1, res.errors().len());
    assert_eq!(3, res.errors()[0].line_number);
}

#[test]
fn blank_line_consumes_line_number() {
    init_logging();
    let opts = ParserOptions::builder().has_header_row(false).build().unwrap();
    csv_record! {
        #[derive(Debug, Default, PartialEq)]
        struct Pair {
            key: String,
            value: i32,
        }
    }
    let res = RecordParser::<Pair>::new(opts)
        .parse(["H,0", "a,1", "", "b,2", "c,x"])
        .unwrap();
    let errs = res.errors();
    assert_eq!(1, errs.len());
    assert_eq!(5, errs[0].line_number);
    assert_eq!(3, res.records().unwrap().len());
}

#[test]
fn all_value_types() {
    init_logging();
    let res = RecordParser::<Order>::new(ParserOptions::builder().strict_mode(true).build().unwrap())
        .parse_str(
            "id,placed,amount,quantity,express,status,priority,discount,grade\n\
             67e55044-10b1-426f-9247-bb680e5fe0c8,2024-03-15 13:45:10,19.99,3,yes,inactive,3,0.1,A\n\
             00000000-0000-0000-0000-000000000000,03/15/2024,1.5E+3,-7,0,Active,Low,,\n",
        )
        .unwrap();
    let orders = res.records().unwrap();
    assert_eq!(2, orders.len());

    assert_eq!(
        Order {
            id: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            placed: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(13, 45, 10)
                .unwrap(),
            amount: Decimal::new(1999, 2),
            quantity: 3,
            express: true,
            status: Status::Inactive,
            priority: Priority::High,
            discount: Some(0.1),
            grade: Some('A'),
        },
        orders[0]
    );

    let second = &orders[1];
    assert_eq!(Uuid::nil(), second.id);
    assert_eq!(Decimal::new(1500, 0), second.amount);
    assert_eq!(-7, second.quantity);
    assert!(!second.express);
    assert_eq!(Status::Active, second.status);
    assert_eq!(Priority::Low, second.priority);
    assert_eq!(None, second.discount);
    assert_eq!(None, second.grade);
}

#[test]
fn boolean_no_match_is_distinguishable() {
    init_logging();
    csv_record! {
        #[derive(Debug, Default)]
        struct Flag {
            on: bool,
        }
    }
    let res = RecordParser::<Flag>::default()
        .parse(["on", "maybe", "yes"])
        .unwrap();
    let errs = res.errors();
    assert_eq!(ErrorKind::TypeConversionFailure, errs[0].kind);
    assert!(errs[0].error_message.contains("neither the truthy nor the falsy"));
    assert!(res.records().unwrap()[0].on);
}

#[test]
fn out_of_range_column() {
    init_logging();
    csv_record! {
        #[derive(Debug, Default)]
        struct Far {
            sixth: String,
        }
        mappings {
            "sixth" => ColumnMapping::indexed(5),
        }
    }
    let opts = ParserOptions::builder()
        .has_header_row(false)
        .strict_mode(true)
        .build()
        .unwrap();
    let err = RecordParser::<Far>::new(opts).parse(["a,b,c"]).unwrap_err();
    assert_eq!(ErrorKind::ColumnIndexOutOfRange, err.kind());
    match err {
        PattiError::Line { source, .. } => assert_eq!(
            "Column index 5 is out of range (available columns: 3)",
            source.to_string()
        ),
        other => panic!("unexpected error {:?}", other),
    }
}

#[cfg(feature = "jsonconf")]
#[test]
fn options_from_json() {
    init_logging();
    let opts = ParserOptions::from_json_str(
        r##"{ "delimiter": ";", "strictMode": true, "lines": { "skipLinesByStartswith": ["#"] } }"##,
    )
    .unwrap();
    let res = RecordParser::<Person>::new(opts)
        .parse(["# generated", "Name;Age", "John;30"])
        .unwrap();
    assert_eq!(Ok(&[person("John", 30)][..]), res.records());
}
